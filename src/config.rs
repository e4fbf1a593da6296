use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::catalog::{CatalogSource, ClimateZone};
use crate::load::FormulaVariant;
use crate::session::CalculatorSettings;

/// 기본 설정 파일 이름.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// UI 언어 코드(ko/en). 없으면 시스템 로케일을 따른다.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// 부하 추정식
    pub formula_variant: FormulaVariant,
    /// 멀티존 기본 기후 구역
    pub default_zone: ClimateZone,
    /// 싱글존 결과에 표시할 SEER 등급
    pub seer_tiers: Vec<u32>,
    /// 로그 레벨(error/warn/info/debug/trace/off)
    pub log_level: String,
    /// 카탈로그 위치. TOML 표로 저장되므로 마지막에 둔다.
    pub catalog: CatalogSource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            formula_variant: FormulaVariant::PerSquareFoot,
            default_zone: ClimateZone::South,
            seer_tiers: vec![25],
            log_level: "warn".to_string(),
            catalog: CatalogSource::Builtin,
        }
    }
}

impl Config {
    /// 계산기 세션에 넘길 설정을 만든다. SEER 목록이 비어 있으면 25만 사용한다.
    pub fn calculator_settings(&self) -> CalculatorSettings {
        let seer_tiers = if self.seer_tiers.is_empty() {
            vec![25]
        } else {
            self.seer_tiers.clone()
        };
        CalculatorSettings {
            variant: self.formula_variant,
            seer_tiers,
            default_zone: self.default_zone,
        }
    }

    /// 설정 파일에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        save_config(self, path)
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("설정 파일 입출력 오류 ({path}): {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        Ok(cfg)
    }
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
