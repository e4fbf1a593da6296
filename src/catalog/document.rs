//! 외부 카탈로그 문서 형식(JSON/TOML).
//!
//! ```json
//! {
//!   "productCatalog": {
//!     "singleZone": { "airHandlers": [ { "btu": 9000, "seer": 25, "sku": "..." } ] },
//!     "multiZone": { "indoorUnits": { "9000": [ { "type": "High Wall", "sku": "..." } ] } }
//!   },
//!   "outdoorCombinations": {
//!     "South": [ { "sku": "...", "capacity": 18000, "maxRatio": 1.33, "ports": 2 } ]
//!   }
//! }
//! ```
//!
//! 문서의 일부가 비어 있거나 항목이 잘못되어도 실패하지 않는다. 잘못된 항목은
//! 경고 로그를 남기고 버린다. 목록은 항목 단위로 해석하므로 한 항목의 형식 오류가
//! 문서 전체를 거부하지 않는다. BTU 같은 정수 필드는 `9000.0`이나 `"9000"`도 받는다.

use std::collections::BTreeMap;

use log::warn;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{AirHandler, Catalog, ClimateZone, IndoorUnit, OutdoorCombination};
use crate::room::UnitType;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    #[serde(default)]
    pub product_catalog: ProductCatalogDoc,
    #[serde(default, deserialize_with = "lenient_entry_map")]
    pub outdoor_combinations: BTreeMap<String, Vec<OutdoorDoc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCatalogDoc {
    #[serde(default)]
    pub single_zone: SingleZoneDoc,
    #[serde(default)]
    pub multi_zone: MultiZoneDoc,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleZoneDoc {
    #[serde(default, deserialize_with = "lenient_entries")]
    pub air_handlers: Vec<AirHandlerDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirHandlerDoc {
    #[serde(deserialize_with = "whole_number")]
    pub btu: u32,
    #[serde(deserialize_with = "whole_number")]
    pub seer: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiZoneDoc {
    /// 키는 BTU 문자열("9000")이다.
    #[serde(default, deserialize_with = "lenient_entry_map")]
    pub indoor_units: BTreeMap<String, Vec<IndoorUnitDoc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndoorUnitDoc {
    #[serde(rename = "type")]
    pub unit_type: String,
    pub sku: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutdoorDoc {
    pub sku: String,
    #[serde(deserialize_with = "whole_number")]
    pub capacity: u32,
    pub max_ratio: f64,
    #[serde(deserialize_with = "whole_number")]
    pub ports: u32,
}

/// 목록을 항목 단위로 해석한다. 해석되지 않는 항목과 배열이 아닌 값은 버린다.
fn lenient_entries<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parsable_entries(value))
}

/// 키마다 항목 목록을 가진 맵. 각 목록은 `lenient_entries`와 같이 해석한다.
fn lenient_entry_map<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Object(map) = value else {
        if !value.is_null() {
            warn!("catalog section is not a map; ignored");
        }
        return Ok(BTreeMap::new());
    };
    Ok(map
        .into_iter()
        .map(|(key, items)| (key, parsable_entries(items)))
        .collect())
}

fn parsable_entries<T: DeserializeOwned>(value: Value) -> Vec<T> {
    let items = match value {
        Value::Array(items) => items,
        Value::Null => return Vec::new(),
        _ => {
            warn!("catalog entry list is not an array; ignored");
            return Vec::new();
        }
    };
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("catalog entry {item} skipped: {e}");
                None
            }
        })
        .collect()
}

/// 0 이상 `u32::MAX` 이하의 정수. 소수부가 0인 실수와 숫자 문자열도 받는다.
fn whole_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(n) if n.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&n) => Ok(n as u32),
        _ => Err(D::Error::custom(format!("expected a whole number, got {value}"))),
    }
}

impl CatalogDocument {
    /// 문서를 카탈로그로 변환한다. 해석할 수 없는 항목은 건너뛴다.
    pub fn into_catalog(self) -> Catalog {
        let single_zone = self
            .product_catalog
            .single_zone
            .air_handlers
            .into_iter()
            .map(|h| AirHandler {
                btu: h.btu,
                seer: h.seer,
                sku: h.sku,
                name: h.name,
            })
            .collect();

        let mut multi_zone: BTreeMap<u32, Vec<IndoorUnit>> = BTreeMap::new();
        for (key, units) in self.product_catalog.multi_zone.indoor_units {
            let Ok(btu) = key.trim().parse::<u32>() else {
                warn!("indoor unit bucket '{key}' is not a BTU value; skipped");
                continue;
            };
            let entry = multi_zone.entry(btu).or_default();
            for unit in units {
                match UnitType::parse(&unit.unit_type) {
                    Some(unit_type) => entry.push(IndoorUnit {
                        unit_type,
                        sku: unit.sku,
                    }),
                    None => warn!(
                        "indoor unit {} has unknown type '{}'; skipped",
                        unit.sku, unit.unit_type
                    ),
                }
            }
        }

        let mut outdoor: BTreeMap<ClimateZone, Vec<OutdoorCombination>> = BTreeMap::new();
        for (zone_key, combos) in self.outdoor_combinations {
            let Some(zone) = ClimateZone::parse(&zone_key) else {
                warn!("unknown climate zone '{zone_key}'; skipped");
                continue;
            };
            let entry = outdoor.entry(zone).or_default();
            for c in combos {
                let combo = OutdoorCombination {
                    sku: c.sku,
                    capacity_btu: c.capacity,
                    max_load_ratio: c.max_ratio,
                    port_count: c.ports,
                };
                if combo.is_valid() {
                    entry.push(combo);
                } else {
                    warn!(
                        "outdoor combination {} has invalid capacity/ratio/ports; skipped",
                        combo.sku
                    );
                }
            }
        }

        Catalog::new(single_zone, multi_zone, outdoor)
    }
}

impl From<&Catalog> for CatalogDocument {
    fn from(catalog: &Catalog) -> Self {
        let air_handlers = catalog
            .air_handlers()
            .iter()
            .map(|h| AirHandlerDoc {
                btu: h.btu,
                seer: h.seer,
                sku: h.sku.clone(),
                name: h.name.clone(),
            })
            .collect();

        let indoor_units = catalog
            .indoor_units()
            .iter()
            .map(|(btu, units)| {
                let units = units
                    .iter()
                    .map(|u| IndoorUnitDoc {
                        unit_type: u.unit_type.display_name().to_string(),
                        sku: u.sku.clone(),
                    })
                    .collect();
                (btu.to_string(), units)
            })
            .collect();

        let outdoor_combinations = ClimateZone::ALL
            .into_iter()
            .filter_map(|zone| {
                let combos = catalog.outdoor_combinations(zone);
                if combos.is_empty() {
                    return None;
                }
                let docs = combos
                    .iter()
                    .map(|c| OutdoorDoc {
                        sku: c.sku.clone(),
                        capacity: c.capacity_btu,
                        max_ratio: c.max_load_ratio,
                        ports: c.port_count,
                    })
                    .collect();
                Some((zone.as_str().to_string(), docs))
            })
            .collect();

        CatalogDocument {
            product_catalog: ProductCatalogDoc {
                single_zone: SingleZoneDoc { air_handlers },
                multi_zone: MultiZoneDoc { indoor_units },
            },
            outdoor_combinations,
        }
    }
}
