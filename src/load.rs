//! 방 단위 냉난방 부하(BTU) 추정식.
//!
//! Manual J 계산이 아니라 사전 견적용 근사식이다. 개정판마다 식이 달라 두 가지를
//! 전략으로 모두 제공한다.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::room::{InsulationLevel, RoomInput};

/// 부하 추정식 선택.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FormulaVariant {
    /// 구판: 체적 × 5 에 창/문 부하를 더하고 단열 계수를 곱한다.
    Multiplicative,
    /// 보정판: ft²당 25 BTU 기준에 천장고·단열 가산치를 더한다.
    #[default]
    PerSquareFoot,
}

impl FormulaVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Multiplicative => "multiplicative",
            Self::PerSquareFoot => "per-square-foot",
        }
    }
}

/// 부하 계산 결과.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LoadResult {
    pub btu: u32,
}

const VOLUME_FACTOR: f64 = 5.0;
const LEGACY_WINDOW_BTU: f64 = 100.0;
const LEGACY_DOOR_BTU: f64 = 50.0;

const BASE_BTU_PER_SQ_FT: f64 = 25.0;
const STANDARD_CEILING_FT: f64 = 8.0;
const BTU_PER_SQ_FT_PER_EXTRA_FT: f64 = 1.6;
const WINDOW_BTU: f64 = 1500.0;
const DOOR_BTU: f64 = 300.0;

/// 구판 식의 단열 계수.
fn insulation_factor(level: InsulationLevel) -> f64 {
    match level {
        InsulationLevel::Good => 1.0,
        InsulationLevel::Fair => 1.1,
        InsulationLevel::Poor => 1.2,
    }
}

/// 보정판 식의 ft²당 단열 가산치.
fn insulation_adder(level: InsulationLevel) -> f64 {
    match level {
        InsulationLevel::Good => 0.0,
        InsulationLevel::Fair => 3.0,
        InsulationLevel::Poor => 7.0,
    }
}

fn multiplicative_raw(room: &RoomInput) -> f64 {
    let base = room.area_sq_ft * room.ceiling_height_ft * VOLUME_FACTOR;
    let windows = room.window_count as f64 * LEGACY_WINDOW_BTU;
    let doors = room.door_count as f64 * LEGACY_DOOR_BTU;
    (base + windows + doors) * insulation_factor(room.insulation)
}

fn per_square_foot_raw(room: &RoomInput) -> f64 {
    let mut btu_per_sq_ft = BASE_BTU_PER_SQ_FT;
    // 8 ft 초과분만 가산한다.
    if room.ceiling_height_ft > STANDARD_CEILING_FT {
        btu_per_sq_ft += (room.ceiling_height_ft - STANDARD_CEILING_FT) * BTU_PER_SQ_FT_PER_EXTRA_FT;
    }
    btu_per_sq_ft += insulation_adder(room.insulation);

    let area_load = room.area_sq_ft * btu_per_sq_ft;
    let window_load = room.window_count as f64 * WINDOW_BTU;
    let door_load = room.door_count as f64 * DOOR_BTU;
    area_load + window_load + door_load
}

/// 방 하나의 부하를 추정한다.
///
/// 중간값이 유한하지 않으면(NaN/∞) 0 BTU를 반환하고, 음수도 0으로 자른다.
pub fn estimate_load(room: &RoomInput, variant: FormulaVariant) -> LoadResult {
    let raw = match variant {
        FormulaVariant::Multiplicative => multiplicative_raw(room),
        FormulaVariant::PerSquareFoot => per_square_foot_raw(room),
    };
    LoadResult {
        btu: to_btu(raw),
    }
}

/// 여러 방의 부하 합계.
pub fn total_load(rooms: &[RoomInput], variant: FormulaVariant) -> u32 {
    rooms
        .iter()
        .map(|r| estimate_load(r, variant).btu)
        .fold(0u32, u32::saturating_add)
}

fn to_btu(raw: f64) -> u32 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    let rounded = raw.round();
    if rounded >= u32::MAX as f64 {
        u32::MAX
    } else {
        rounded as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(area: f64, height: f64, windows: u32, doors: u32, ins: InsulationLevel) -> RoomInput {
        RoomInput {
            area_sq_ft: area,
            ceiling_height_ft: height,
            window_count: windows,
            door_count: doors,
            insulation: ins,
            ..Default::default()
        }
    }

    #[test]
    fn multiplicative_reference_values() {
        // (300*8*5 + 2*100 + 1*50) * 1.1 = 13475
        let r = room(300.0, 8.0, 2, 1, InsulationLevel::Fair);
        assert_eq!(estimate_load(&r, FormulaVariant::Multiplicative).btu, 13_475);
    }

    #[test]
    fn per_square_foot_reference_values() {
        // 25 + (10-8)*1.6 + 7 = 35.2 BTU/ft², 400*35.2 + 3*1500 + 2*300 = 19180
        let r = room(400.0, 10.0, 3, 2, InsulationLevel::Poor);
        assert_eq!(estimate_load(&r, FormulaVariant::PerSquareFoot).btu, 19_180);
    }

    #[test]
    fn low_ceiling_has_no_height_bonus() {
        let low = room(500.0, 7.0, 0, 0, InsulationLevel::Good);
        let std = room(500.0, 8.0, 0, 0, InsulationLevel::Good);
        assert_eq!(
            estimate_load(&low, FormulaVariant::PerSquareFoot),
            estimate_load(&std, FormulaVariant::PerSquareFoot)
        );
        assert_eq!(estimate_load(&std, FormulaVariant::PerSquareFoot).btu, 12_500);
    }

    #[test]
    fn non_finite_inputs_resolve_to_zero() {
        let r = room(f64::NAN, 8.0, 1, 1, InsulationLevel::Good);
        assert_eq!(estimate_load(&r, FormulaVariant::Multiplicative).btu, 0);
        let r = room(f64::INFINITY, 8.0, 0, 0, InsulationLevel::Good);
        assert_eq!(estimate_load(&r, FormulaVariant::PerSquareFoot).btu, 0);
    }

    #[test]
    fn negative_programmatic_input_clamps_to_zero() {
        let r = room(-100.0, 8.0, 0, 0, InsulationLevel::Good);
        assert_eq!(estimate_load(&r, FormulaVariant::PerSquareFoot).btu, 0);
    }

    #[test]
    fn total_sums_each_room() {
        let rooms = [
            room(100.0, 8.0, 0, 0, InsulationLevel::Good),
            room(200.0, 8.0, 0, 0, InsulationLevel::Good),
        ];
        assert_eq!(total_load(&rooms, FormulaVariant::PerSquareFoot), 7_500);
    }
}
