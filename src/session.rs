//! 계산기 세션 상태.
//!
//! `Uninitialized → Editing → Calculated → Editing` 순으로만 움직인다. 입력이
//! 바뀌면 이전 계산 결과는 즉시 버린다.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, ClimateZone};
use crate::load::{estimate_load, FormulaVariant};
use crate::room::RoomInput;
use crate::selector::{
    select_indoor_unit, select_outdoor_combinations, select_single_zone_tiers, CombinationResult,
    IndoorSelection, SingleZoneSelection,
};

pub const MIN_MULTI_ZONE_ROOMS: usize = 2;
pub const MAX_MULTI_ZONE_ROOMS: usize = 5;

/// 시스템 형식.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SystemType {
    #[default]
    Single,
    Multi,
}

impl SystemType {
    /// 이 형식에서 허용되는 방 개수 범위.
    pub fn room_bounds(&self) -> (usize, usize) {
        match self {
            SystemType::Single => (1, 1),
            SystemType::Multi => (MIN_MULTI_ZONE_ROOMS, MAX_MULTI_ZONE_ROOMS),
        }
    }
}

/// 방 하나의 추천 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "system", rename_all = "snake_case")]
pub enum RoomRecommendation {
    /// SEER 등급별 싱글존 선정
    Single { tiers: Vec<(u32, SingleZoneSelection)> },
    /// 멀티존 실내기 선정
    Multi { indoor: IndoorSelection },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomReport {
    pub label: String,
    pub btu: u32,
    pub recommendation: RoomRecommendation,
}

/// 한 번의 계산 결과 전체.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationReport {
    pub system: SystemType,
    pub zone: ClimateZone,
    pub variant: FormulaVariant,
    pub rooms: Vec<RoomReport>,
    pub total_btu: u32,
    /// 멀티존일 때만 Some. 빈 목록이면 적합한 실외기가 없다는 뜻이다.
    pub outdoor: Option<Vec<CombinationResult>>,
}

/// 세션 진행 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Editing,
    /// `report`가 현재 입력과 일치한다.
    Calculated,
}

/// 세션 생성 시 고정되는 설정값.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorSettings {
    pub variant: FormulaVariant,
    /// 싱글존에서 보여줄 SEER 등급
    pub seer_tiers: Vec<u32>,
    pub default_zone: ClimateZone,
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        Self {
            variant: FormulaVariant::default(),
            seer_tiers: vec![25],
            default_zone: ClimateZone::South,
        }
    }
}

/// 입력 폼 하나에 해당하는 계산기 세션.
#[derive(Debug, Clone)]
pub struct CalculatorSession {
    settings: CalculatorSettings,
    system: SystemType,
    zone: ClimateZone,
    variant: FormulaVariant,
    rooms: Vec<RoomInput>,
    state: SessionState,
    report: Option<CalculationReport>,
}

impl CalculatorSession {
    pub fn new(settings: CalculatorSettings) -> Self {
        let zone = settings.default_zone;
        let variant = settings.variant;
        Self {
            settings,
            system: SystemType::Single,
            zone,
            variant,
            rooms: vec![RoomInput::default()],
            state: SessionState::Uninitialized,
            report: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn system(&self) -> SystemType {
        self.system
    }

    pub fn zone(&self) -> ClimateZone {
        self.zone
    }

    pub fn variant(&self) -> FormulaVariant {
        self.variant
    }

    pub fn rooms(&self) -> &[RoomInput] {
        &self.rooms
    }

    /// 가장 최근 계산 결과. 입력이 바뀐 뒤에는 None.
    pub fn report(&self) -> Option<&CalculationReport> {
        self.report.as_ref()
    }

    fn invalidate(&mut self) {
        self.state = SessionState::Editing;
        self.report = None;
    }

    /// 싱글존이면 첫 방만 남기고, 멀티존이면 방 개수를 2~5로 맞춘다.
    pub fn set_system_type(&mut self, system: SystemType) {
        self.system = system;
        let n = self.rooms.len();
        self.resize_rooms(n);
        self.invalidate();
    }

    /// 방 개수를 현재 시스템 형식의 범위로 잘라서 적용한다. 적용된 개수를 반환한다.
    pub fn set_room_count(&mut self, count: usize) -> usize {
        let applied = self.resize_rooms(count);
        self.invalidate();
        applied
    }

    fn resize_rooms(&mut self, count: usize) -> usize {
        let (min, max) = self.system.room_bounds();
        let n = count.clamp(min, max);
        self.rooms.resize_with(n, RoomInput::default);
        n
    }

    /// 방 입력을 바꾼다. 범위를 벗어난 인덱스는 무시하고 false를 반환한다.
    pub fn update_room(&mut self, index: usize, room: RoomInput) -> bool {
        match self.rooms.get_mut(index) {
            Some(slot) => {
                *slot = room;
                self.invalidate();
                true
            }
            None => false,
        }
    }

    pub fn set_zone(&mut self, zone: ClimateZone) {
        self.zone = zone;
        self.invalidate();
    }

    pub fn set_variant(&mut self, variant: FormulaVariant) {
        self.variant = variant;
        self.invalidate();
    }

    /// 초기 상태로 되돌린다(싱글존, 기본 구역, 빈 방 하나).
    pub fn reset(&mut self) {
        self.system = SystemType::Single;
        self.zone = self.settings.default_zone;
        self.variant = self.settings.variant;
        self.rooms = vec![RoomInput::default()];
        self.state = SessionState::Uninitialized;
        self.report = None;
    }

    /// 부하 추정과 장비 선정을 한 번에 수행하고 `Calculated` 상태로 전환한다.
    pub fn calculate(&mut self, catalog: &Catalog) -> &CalculationReport {
        let report = build_report(
            catalog,
            self.system,
            self.zone,
            self.variant,
            &self.settings.seer_tiers,
            &self.rooms,
        );
        self.state = SessionState::Calculated;
        self.report.insert(report)
    }
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::new(CalculatorSettings::default())
    }
}

/// 세션 없이 바로 보고서를 만든다. 방 목록은 호출자가 범위를 맞춰야 한다.
pub fn build_report(
    catalog: &Catalog,
    system: SystemType,
    zone: ClimateZone,
    variant: FormulaVariant,
    seer_tiers: &[u32],
    rooms: &[RoomInput],
) -> CalculationReport {
    let mut total: u32 = 0;
    let room_reports: Vec<RoomReport> = rooms
        .iter()
        .enumerate()
        .map(|(i, room)| {
            let btu = estimate_load(room, variant).btu;
            total = total.saturating_add(btu);
            let recommendation = match system {
                SystemType::Single => RoomRecommendation::Single {
                    tiers: select_single_zone_tiers(catalog, btu, seer_tiers),
                },
                SystemType::Multi => RoomRecommendation::Multi {
                    indoor: select_indoor_unit(catalog, btu, room.unit_type),
                },
            };
            RoomReport {
                label: room.label(i),
                btu,
                recommendation,
            }
        })
        .collect();

    let outdoor = match system {
        SystemType::Single => None,
        SystemType::Multi => Some(select_outdoor_combinations(
            catalog,
            zone,
            total,
            rooms.len(),
        )),
    };

    CalculationReport {
        system,
        zone,
        variant,
        rooms: room_reports,
        total_btu: total,
        outdoor,
    }
}
