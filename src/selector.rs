//! 부하(BTU)에 맞는 장비를 카탈로그에서 고른다.
//!
//! 모든 함수는 카탈로그를 읽기만 하며, 결과가 없어도 오류가 아니라 결과 변형으로
//! 표현한다(해당 모델 없음, 용량 초과, 빈 조합 목록).

use serde::Serialize;

use crate::catalog::{AirHandler, Catalog, ClimateZone};
use crate::room::UnitType;

/// 가장 가까운 모델 용량보다 이 비율을 넘게 크면 단일 시스템으로 감당할 수 없다고 본다.
pub const CAPACITY_TOLERANCE: f64 = 1.1;
/// 부하율 등급 경계.
pub const GREEN_MAX_LOAD: f64 = 1.10;
pub const YELLOW_MAX_LOAD: f64 = 1.20;

/// 싱글존 선정 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SingleZoneSelection {
    Model { sku: String, nearest_btu: u32 },
    /// 카탈로그에 해당 (BTU, SEER) 모델이 없다.
    NotAvailable { nearest_btu: Option<u32> },
    /// 부하가 가장 가까운 모델 용량의 110%를 넘는다. 복수 시스템/전문가 상담 권고.
    ExceedsCapacity { nearest_btu: u32 },
}

impl SingleZoneSelection {
    pub fn sku(&self) -> Option<&str> {
        match self {
            SingleZoneSelection::Model { sku, .. } => Some(sku),
            _ => None,
        }
    }
}

/// 멀티존 실내기 선정 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndoorSelection {
    Model { sku: String, nearest_btu: u32 },
    NotAvailable { nearest_btu: Option<u32> },
}

impl IndoorSelection {
    pub fn sku(&self) -> Option<&str> {
        match self {
            IndoorSelection::Model { sku, .. } => Some(sku),
            IndoorSelection::NotAvailable { .. } => None,
        }
    }
}

/// 실외기 부하율 등급.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadSeverity {
    Green,
    Yellow,
    Orange,
}

impl LoadSeverity {
    /// `≤ 1.10` green, `≤ 1.20` yellow, 그 이상 orange.
    pub fn classify(load_ratio: f64) -> Self {
        if load_ratio <= GREEN_MAX_LOAD {
            LoadSeverity::Green
        } else if load_ratio <= YELLOW_MAX_LOAD {
            LoadSeverity::Yellow
        } else {
            LoadSeverity::Orange
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoadSeverity::Green => "green",
            LoadSeverity::Yellow => "yellow",
            LoadSeverity::Orange => "orange",
        }
    }
}

/// 조건을 통과한 실외기 조합.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinationResult {
    pub sku: String,
    pub capacity_btu: u32,
    pub port_count: u32,
    /// 총 부하 / 정격 용량 (1.0 = 100%)
    pub load_ratio: f64,
    pub severity: LoadSeverity,
}

impl CombinationResult {
    /// 100% 부하에서 벗어난 정도. 정렬 기준.
    pub fn deviation(&self) -> f64 {
        (1.0 - self.load_ratio).abs()
    }

    /// 소수 첫째 자리까지의 백분율 문자열("111.1").
    pub fn load_percent_display(&self) -> String {
        format!("{:.1}", self.load_ratio * 100.0)
    }
}

/// `btu`에 가장 가까운 용량을 찾는다.
///
/// 거리가 같으면 먼저 나온 후보를 유지한다(엄격한 `<` 비교).
pub fn nearest_bucket(buckets: &[u32], btu: u32) -> Option<u32> {
    let mut iter = buckets.iter().copied();
    let first = iter.next()?;
    Some(iter.fold(first, |best, cand| {
        if cand.abs_diff(btu) < best.abs_diff(btu) {
            cand
        } else {
            best
        }
    }))
}

fn exceeds_capacity(btu: u32, bucket: u32) -> bool {
    btu as f64 > bucket as f64 * CAPACITY_TOLERANCE
}

/// 싱글존 에어핸들러를 고른다.
///
/// 부하가 용량 허용치를 넘으면 모델 유무와 관계없이 용량 초과 권고가 된다.
/// 빈 카탈로그는 항상 `NotAvailable`이다.
pub fn select_single_zone_unit(catalog: &Catalog, btu: u32, seer: u32) -> SingleZoneSelection {
    let Some(nearest) = nearest_bucket(&catalog.single_zone_buckets(), btu) else {
        return SingleZoneSelection::NotAvailable { nearest_btu: None };
    };
    if exceeds_capacity(btu, nearest) {
        return SingleZoneSelection::ExceedsCapacity {
            nearest_btu: nearest,
        };
    }
    match catalog.air_handler(nearest, seer).and_then(AirHandler::model) {
        Some(sku) => SingleZoneSelection::Model {
            sku: sku.to_string(),
            nearest_btu: nearest,
        },
        None => SingleZoneSelection::NotAvailable {
            nearest_btu: Some(nearest),
        },
    }
}

/// 요청한 SEER 등급마다 싱글존 모델을 고른다. 순서는 `tiers` 순서를 따른다.
pub fn select_single_zone_tiers(
    catalog: &Catalog,
    btu: u32,
    tiers: &[u32],
) -> Vec<(u32, SingleZoneSelection)> {
    tiers
        .iter()
        .map(|&seer| (seer, select_single_zone_unit(catalog, btu, seer)))
        .collect()
}

/// 멀티존 방 하나의 실내기를 고른다. 가장 가까운 용량 + 방의 실내기 형식으로 조회한다.
pub fn select_indoor_unit(catalog: &Catalog, btu: u32, unit_type: UnitType) -> IndoorSelection {
    let Some(nearest) = nearest_bucket(&catalog.multi_zone_buckets(), btu) else {
        return IndoorSelection::NotAvailable { nearest_btu: None };
    };
    match catalog.indoor_unit(nearest, unit_type) {
        Some(unit) => IndoorSelection::Model {
            sku: unit.sku.clone(),
            nearest_btu: nearest,
        },
        None => IndoorSelection::NotAvailable {
            nearest_btu: Some(nearest),
        },
    }
}

/// 구역의 실외기 조합 중 포트 수와 최대 부하 비율을 만족하는 것을 골라
/// 100% 부하에 가까운 순으로 정렬한다. 통과한 조합이 없으면 빈 목록.
pub fn select_outdoor_combinations(
    catalog: &Catalog,
    zone: ClimateZone,
    total_btu: u32,
    room_count: usize,
) -> Vec<CombinationResult> {
    let total = total_btu as f64;
    let mut results: Vec<CombinationResult> = catalog
        .outdoor_combinations(zone)
        .iter()
        .filter(|c| {
            c.capacity_btu > 0
                && room_count <= c.port_count as usize
                && total <= c.capacity_btu as f64 * c.max_load_ratio
        })
        .map(|c| {
            let load_ratio = total / c.capacity_btu as f64;
            CombinationResult {
                sku: c.sku.clone(),
                capacity_btu: c.capacity_btu,
                port_count: c.port_count,
                load_ratio,
                severity: LoadSeverity::classify(load_ratio),
            }
        })
        .collect();
    // 안정 정렬이므로 같은 편차는 카탈로그 순서를 유지한다.
    results.sort_by(|a, b| a.deviation().total_cmp(&b.deviation()));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{IndoorUnit, OutdoorCombination};
    use std::collections::BTreeMap;

    fn outdoor_only(combos: Vec<OutdoorCombination>) -> Catalog {
        let mut outdoor = BTreeMap::new();
        outdoor.insert(ClimateZone::South, combos);
        Catalog::new(Vec::new(), BTreeMap::new(), outdoor)
    }

    fn combo(sku: &str, cap: u32, ratio: f64, ports: u32) -> OutdoorCombination {
        OutdoorCombination {
            sku: sku.into(),
            capacity_btu: cap,
            max_load_ratio: ratio,
            port_count: ports,
        }
    }

    #[test]
    fn nearest_bucket_prefers_smaller_distance() {
        assert_eq!(nearest_bucket(&[9000, 12000, 18000], 10000), Some(9000));
        assert_eq!(nearest_bucket(&[9000, 12000, 18000], 11000), Some(12000));
        assert_eq!(nearest_bucket(&[], 11000), None);
    }

    #[test]
    fn nearest_bucket_tie_keeps_first() {
        assert_eq!(nearest_bucket(&[9000, 12000], 10500), Some(9000));
        assert_eq!(nearest_bucket(&[12000, 9000], 10500), Some(12000));
    }

    #[test]
    fn severity_boundaries() {
        assert_eq!(LoadSeverity::classify(1.10), LoadSeverity::Green);
        assert_eq!(LoadSeverity::classify(1.1000001), LoadSeverity::Yellow);
        assert_eq!(LoadSeverity::classify(1.20), LoadSeverity::Yellow);
        assert_eq!(LoadSeverity::classify(1.2000001), LoadSeverity::Orange);
        assert_eq!(LoadSeverity::classify(0.5), LoadSeverity::Green);
    }

    #[test]
    fn outdoor_ranking_prefers_closest_to_full_load() {
        let c = outdoor_only(vec![
            combo("S24", 24000, 1.5, 3),
            combo("S18", 18000, 1.33, 2),
        ]);
        let ranked = select_outdoor_combinations(&c, ClimateZone::South, 20000, 2);
        let skus: Vec<&str> = ranked.iter().map(|r| r.sku.as_str()).collect();
        assert_eq!(skus, vec!["S18", "S24"]);
        assert_eq!(ranked[0].load_percent_display(), "111.1");
        assert_eq!(ranked[0].severity, LoadSeverity::Yellow);
        assert_eq!(ranked[1].load_percent_display(), "83.3");
        assert_eq!(ranked[1].severity, LoadSeverity::Green);
    }

    #[test]
    fn equal_deviation_keeps_catalog_order() {
        let c = outdoor_only(vec![combo("A", 20000, 1.5, 3), combo("B", 20000, 1.5, 3)]);
        let ranked = select_outdoor_combinations(&c, ClimateZone::South, 20000, 2);
        assert_eq!(ranked[0].sku, "A");
        assert_eq!(ranked[1].sku, "B");
    }

    #[test]
    fn port_and_ratio_filters() {
        let c = outdoor_only(vec![combo("S18", 18000, 1.33, 2)]);
        assert!(select_outdoor_combinations(&c, ClimateZone::South, 20000, 3).is_empty());
        assert!(select_outdoor_combinations(&c, ClimateZone::South, 24000, 2).is_empty());
        assert!(select_outdoor_combinations(&c, ClimateZone::North, 10000, 2).is_empty());
    }

    #[test]
    fn indoor_lookup_joins_bucket_and_type() {
        let mut multi = BTreeMap::new();
        multi.insert(
            9000,
            vec![IndoorUnit {
                unit_type: UnitType::SlimDuct,
                sku: "SD9".into(),
            }],
        );
        let c = Catalog::new(Vec::new(), multi, BTreeMap::new());
        assert_eq!(
            select_indoor_unit(&c, 8000, UnitType::SlimDuct).sku(),
            Some("SD9")
        );
        assert_eq!(
            select_indoor_unit(&c, 8000, UnitType::HighWall),
            IndoorSelection::NotAvailable {
                nearest_btu: Some(9000)
            }
        );
    }

    #[test]
    fn empty_catalog_is_never_an_error() {
        let c = Catalog::empty();
        assert_eq!(
            select_single_zone_unit(&c, 50_000, 25),
            SingleZoneSelection::NotAvailable { nearest_btu: None }
        );
        assert_eq!(
            select_indoor_unit(&c, 9000, UnitType::HighWall),
            IndoorSelection::NotAvailable { nearest_btu: None }
        );
        assert!(select_outdoor_combinations(&c, ClimateZone::South, 9000, 2).is_empty());
    }
}
