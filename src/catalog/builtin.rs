//! 컴파일 시점에 포함되는 기본 카탈로그.
//! 원격 카탈로그를 받지 못했거나 설정이 builtin일 때 사용한다.

use std::collections::BTreeMap;

use super::{AirHandler, Catalog, ClimateZone, IndoorUnit, OutdoorCombination};
use crate::room::UnitType;

struct HandlerRow {
    btu: u32,
    seer: u32,
    sku: &'static str,
}

const fn hr(btu: u32, seer: u32, sku: &'static str) -> HandlerRow {
    HandlerRow { btu, seer, sku }
}

/// SEER 20/22/25 싱글존 라인업. 36k는 SEER 20만 판매한다.
const SINGLE_ZONE: &[HandlerRow] = &[
    hr(9000, 20, "AJAN09HP115V1C / AJAN09HP230V1C"),
    hr(9000, 22, "AFEB09HP115V1C / AFEB09HP230V1C"),
    hr(9000, 25, "AMAR09HP115V1C / AMAR09HP230V1C"),
    hr(12000, 20, "AJAN12HP115V1C / AJAN12HP230V1C"),
    hr(12000, 22, "AFEB12HP115V1C / AFEB12HP230V1C"),
    hr(12000, 25, "AMAR12HP115V1C / AMAR12HP230V1C"),
    hr(18000, 20, "AJAN18HP230V1C"),
    hr(18000, 22, "AFEB18HP230V2C"),
    hr(18000, 25, "AMAR18HP230V1C"),
    hr(24000, 20, "AJAN24HP230V1C"),
    hr(24000, 22, "AFEB24HP230V1C"),
    hr(24000, 25, "AMAR24HP230V1C"),
    hr(36000, 20, "AJAN36HP230V1C"),
];

/// 멀티존 실내기. 7k/36k는 벽걸이형만 있다.
const MULTI_ZONE: &[(u32, &[(UnitType, &str)])] = &[
    (7000, &[(UnitType::HighWall, "AFEB07HP230V1CH")]),
    (
        9000,
        &[
            (UnitType::HighWall, "AFEB09HP230V1CH"),
            (UnitType::FourWayCassette, "AFEB09HP230V1CC"),
            (UnitType::SlimDuct, "AFEB09HP230V1SD"),
            (UnitType::FloorCeiling, "AFEB09HP230V1FL"),
        ],
    ),
    (
        12000,
        &[
            (UnitType::HighWall, "AFEB12HP230V1CH"),
            (UnitType::FourWayCassette, "AFEB12HP230V1CC"),
            (UnitType::SlimDuct, "AFEB12HP230V1SD"),
            (UnitType::FloorCeiling, "AFEB12HP230V1FL"),
        ],
    ),
    (
        18000,
        &[
            (UnitType::HighWall, "AFEB18HP230V1CH"),
            (UnitType::FourWayCassette, "AFEB18HP230V1CC"),
            (UnitType::SlimDuct, "AFEB18HP230V1SD"),
            (UnitType::FloorCeiling, "AFEB18HP230V1FL"),
        ],
    ),
    (
        24000,
        &[
            (UnitType::HighWall, "AFEB24HP230V1CH"),
            (UnitType::FourWayCassette, "AFEB24HP230V1CC"),
            (UnitType::SlimDuct, "AFEB24HP230V1SD"),
            (UnitType::FloorCeiling, "AFEB24HP230V1FL"),
        ],
    ),
    (36000, &[(UnitType::HighWall, "AFEB36HP230V1CH")]),
];

struct OutdoorRow {
    sku: &'static str,
    capacity: u32,
    max_ratio: f64,
    ports: u32,
}

const fn od(sku: &'static str, capacity: u32, max_ratio: f64, ports: u32) -> OutdoorRow {
    OutdoorRow {
        sku,
        capacity,
        max_ratio,
        ports,
    }
}

const OUTDOOR_SOUTH: &[OutdoorRow] = &[
    od("ASPR18HPMULO", 18000, 1.33, 2),
    od("ASPR24HPMULO", 24000, 1.5, 3),
    od("ASPR36HPMULO", 36000, 1.5, 4),
    od("ASPR42HPMULO", 42000, 1.42, 5),
];

const OUTDOOR_NORTH: &[OutdoorRow] = &[
    od("ASUM18HPMULO", 18000, 1.33, 2),
    od("ASUM24HPMULO", 24000, 1.5, 3),
    od("ASUM36HPMULO", 36000, 1.5, 4),
    od("ASUM42HPMULO", 42000, 1.42, 5),
];

fn outdoor_rows(rows: &[OutdoorRow]) -> Vec<OutdoorCombination> {
    rows.iter()
        .map(|r| OutdoorCombination {
            sku: r.sku.to_string(),
            capacity_btu: r.capacity,
            max_load_ratio: r.max_ratio,
            port_count: r.ports,
        })
        .collect()
}

impl Catalog {
    /// 내장 테이블로 카탈로그를 만든다.
    pub fn builtin() -> Self {
        let single_zone = SINGLE_ZONE
            .iter()
            .map(|r| AirHandler {
                btu: r.btu,
                seer: r.seer,
                sku: Some(r.sku.to_string()),
                name: None,
            })
            .collect();

        let multi_zone = MULTI_ZONE
            .iter()
            .map(|(btu, units)| {
                let units = units
                    .iter()
                    .map(|(unit_type, sku)| IndoorUnit {
                        unit_type: *unit_type,
                        sku: sku.to_string(),
                    })
                    .collect();
                (*btu, units)
            })
            .collect();

        let mut outdoor = BTreeMap::new();
        outdoor.insert(ClimateZone::South, outdoor_rows(OUTDOOR_SOUTH));
        outdoor.insert(ClimateZone::North, outdoor_rows(OUTDOOR_NORTH));

        Catalog::new(single_zone, multi_zone, outdoor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_are_consistent() {
        let c = Catalog::builtin();
        assert_eq!(c.single_zone_buckets(), vec![9000, 12000, 18000, 24000, 36000]);
        assert_eq!(
            c.multi_zone_buckets(),
            vec![7000, 9000, 12000, 18000, 24000, 36000]
        );
        assert_eq!(c.seer_tiers(), vec![20, 22, 25]);
        for zone in ClimateZone::ALL {
            let combos = c.outdoor_combinations(zone);
            assert_eq!(combos.len(), 4);
            assert!(combos.iter().all(OutdoorCombination::is_valid));
        }
    }

    #[test]
    fn builtin_36k_only_has_seer_20() {
        let c = Catalog::builtin();
        assert!(c.air_handler(36000, 20).is_some());
        assert!(c.air_handler(36000, 22).is_none());
        assert!(c.indoor_unit(36000, UnitType::SlimDuct).is_none());
    }
}
