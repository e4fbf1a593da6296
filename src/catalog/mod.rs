//! 장비 카탈로그. 계산 중에는 읽기 전용 스냅샷으로만 다룬다.
//!
//! 내장 테이블(`builtin`), 외부 문서 형식(`document`), 파일/URL 로더(`loader`),
//! 원자적 교체 저장소(`store`)로 구성한다.

pub mod builtin;
pub mod document;
pub mod loader;
pub mod store;

use std::collections::BTreeMap;
use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::room::UnitType;

pub use loader::{load_from_path, load_from_source, load_from_url, CatalogError, CatalogSource};
pub use store::CatalogStore;

/// 실외기 카탈로그를 나누는 기후 구역.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
pub enum ClimateZone {
    #[default]
    South,
    North,
}

impl ClimateZone {
    pub const ALL: [ClimateZone; 2] = [Self::South, Self::North];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "south" | "s" => Some(Self::South),
            "north" | "n" => Some(Self::North),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::South => "South",
            Self::North => "North",
        }
    }
}

impl fmt::Display for ClimateZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// 싱글존 에어핸들러 항목. (BTU, SEER) 조합으로 조회한다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirHandler {
    pub btu: u32,
    pub seer: u32,
    pub sku: Option<String>,
    pub name: Option<String>,
}

impl AirHandler {
    /// 표시할 모델명. SKU가 없거나 비어 있으면 이름을 쓴다.
    pub fn model(&self) -> Option<&str> {
        fn non_empty(s: &Option<String>) -> Option<&str> {
            s.as_deref().filter(|v| !v.trim().is_empty())
        }
        non_empty(&self.sku).or_else(|| non_empty(&self.name))
    }
}

/// 멀티존 실내기 항목.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndoorUnit {
    pub unit_type: UnitType,
    pub sku: String,
}

/// 멀티존 실외기 조합.
#[derive(Debug, Clone, PartialEq)]
pub struct OutdoorCombination {
    pub sku: String,
    /// 정격 용량 [BTU/h]
    pub capacity_btu: u32,
    /// 허용 최대 부하 비율(> 1.0)
    pub max_load_ratio: f64,
    /// 연결 가능한 실내기 수
    pub port_count: u32,
}

impl OutdoorCombination {
    /// 용량/비율/포트 수가 계산에 쓸 수 있는 값인지 확인한다.
    pub fn is_valid(&self) -> bool {
        self.capacity_btu > 0
            && self.port_count > 0
            && self.max_load_ratio.is_finite()
            && self.max_load_ratio > 1.0
    }
}

/// 한 세션 동안 변하지 않는 카탈로그 스냅샷.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    single_zone: Vec<AirHandler>,
    multi_zone: BTreeMap<u32, Vec<IndoorUnit>>,
    outdoor: BTreeMap<ClimateZone, Vec<OutdoorCombination>>,
}

impl Catalog {
    pub fn new(
        single_zone: Vec<AirHandler>,
        multi_zone: BTreeMap<u32, Vec<IndoorUnit>>,
        outdoor: BTreeMap<ClimateZone, Vec<OutdoorCombination>>,
    ) -> Self {
        Self {
            single_zone,
            multi_zone,
            outdoor,
        }
    }

    /// 로드 실패 시 사용하는 빈 카탈로그. 모든 조회가 "해당 모델 없음"이 된다.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.single_zone.is_empty()
            && self.multi_zone.values().all(Vec::is_empty)
            && self.outdoor.values().all(Vec::is_empty)
    }

    pub fn air_handlers(&self) -> &[AirHandler] {
        &self.single_zone
    }

    pub fn indoor_units(&self) -> &BTreeMap<u32, Vec<IndoorUnit>> {
        &self.multi_zone
    }

    /// 싱글존 BTU 후보. 카탈로그 순서를 유지하고 중복만 제거한다.
    pub fn single_zone_buckets(&self) -> Vec<u32> {
        let mut out: Vec<u32> = Vec::with_capacity(self.single_zone.len());
        for h in &self.single_zone {
            if !out.contains(&h.btu) {
                out.push(h.btu);
            }
        }
        out
    }

    /// 멀티존 BTU 후보(오름차순).
    pub fn multi_zone_buckets(&self) -> Vec<u32> {
        self.multi_zone.keys().copied().collect()
    }

    /// (BTU, SEER)에 맞는 첫 번째 에어핸들러.
    pub fn air_handler(&self, btu: u32, seer: u32) -> Option<&AirHandler> {
        self.single_zone
            .iter()
            .find(|h| h.btu == btu && h.seer == seer)
    }

    /// (BTU, 실내기 형식)에 맞는 첫 번째 실내기.
    pub fn indoor_unit(&self, btu: u32, unit_type: UnitType) -> Option<&IndoorUnit> {
        self.multi_zone
            .get(&btu)?
            .iter()
            .find(|u| u.unit_type == unit_type)
    }

    /// 구역별 실외기 조합(카탈로그 순서). 구역이 없으면 빈 슬라이스.
    pub fn outdoor_combinations(&self, zone: ClimateZone) -> &[OutdoorCombination] {
        self.outdoor.get(&zone).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 카탈로그에 등장하는 SEER 등급(오름차순).
    pub fn seer_tiers(&self) -> Vec<u32> {
        let mut tiers: Vec<u32> = self.single_zone.iter().map(|h| h.seer).collect();
        tiers.sort_unstable();
        tiers.dedup();
        tiers
    }
}
