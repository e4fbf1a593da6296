use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::document::CatalogDocument;
use super::Catalog;

/// 원격 카탈로그 요청 제한 시간.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// 카탈로그 로드 시 발생 가능한 오류.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("카탈로그 파일을 읽을 수 없음 ({path}): {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("카탈로그 JSON 파싱 오류: {0}")]
    Json(#[from] serde_json::Error),
    #[error("카탈로그 TOML 파싱 오류: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("카탈로그 요청 실패: {0}")]
    Http(#[from] reqwest::Error),
    #[error("카탈로그 서버 응답 HTTP {status} ({url})")]
    HttpStatus { url: String, status: u16 },
    #[error("지원하지 않는 카탈로그 형식: {0}")]
    UnsupportedFormat(String),
}

/// 카탈로그를 어디서 가져올지 지정한다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CatalogSource {
    /// 컴파일된 내장 테이블
    #[default]
    Builtin,
    /// 로컬 JSON/TOML 파일
    File { path: PathBuf },
    /// HTTP(S)로 받는 JSON 문서
    Url { url: String },
}

impl CatalogSource {
    /// CLI 인자 해석: "builtin", http(s) URL, 그 외는 파일 경로.
    pub fn from_arg(arg: &str) -> Self {
        let trimmed = arg.trim();
        if trimmed.eq_ignore_ascii_case("builtin") {
            CatalogSource::Builtin
        } else if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            CatalogSource::Url {
                url: trimmed.to_string(),
            }
        } else {
            CatalogSource::File {
                path: PathBuf::from(trimmed),
            }
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Builtin => f.write_str("builtin"),
            CatalogSource::File { path } => write!(f, "{}", path.display()),
            CatalogSource::Url { url } => f.write_str(url),
        }
    }
}

/// 지정된 위치에서 카탈로그를 완전히 로드한다.
pub fn load_from_source(source: &CatalogSource) -> Result<Catalog, CatalogError> {
    let catalog = match source {
        CatalogSource::Builtin => Catalog::builtin(),
        CatalogSource::File { path } => load_from_path(path)?,
        CatalogSource::Url { url } => load_from_url(url)?,
    };
    info!("catalog loaded from {source}");
    Ok(catalog)
}

/// 파일에서 카탈로그를 읽는다. 확장자가 .toml이면 TOML, .json이거나 없으면 JSON.
pub fn load_from_path(path: &Path) -> Result<Catalog, CatalogError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let is_toml = match ext.as_deref() {
        Some("toml") => true,
        Some("json") | None => false,
        Some(other) => return Err(CatalogError::UnsupportedFormat(other.to_string())),
    };
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let doc: CatalogDocument = if is_toml {
        toml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    Ok(doc.into_catalog())
}

/// HTTP GET으로 카탈로그 문서를 받는다. 2xx가 아니면 오류.
pub fn load_from_url(url: &str) -> Result<Catalog, CatalogError> {
    debug!("fetching catalog from {url}");
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()?;
    let response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(CatalogError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let body = response.text()?;
    parse_json(&body)
}

/// JSON 문서 문자열을 카탈로그로 변환한다.
pub fn parse_json(body: &str) -> Result<Catalog, CatalogError> {
    let doc: CatalogDocument = serde_json::from_str(body)?;
    Ok(doc.into_catalog())
}
