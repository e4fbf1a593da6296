use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// 면적 입력 상한(ft²). 입력 폼의 max 속성과 동일하다.
pub const MAX_AREA_SQ_FT: f64 = 100_000.0;
/// 두 자리 입력 마스크(천장고·창·문) 상한.
pub const MAX_TWO_DIGIT: u32 = 99;
/// 방 이름 최대 길이(문자 수).
pub const MAX_ROOM_NAME_CHARS: usize = 40;

/// 방 이름 자동완성 후보.
pub const ROOM_NAME_SUGGESTIONS: &[&str] = &[
    "Living Room",
    "Dining Room",
    "Kitchen",
    "Master Bedroom",
    "Bedroom",
    "Office",
    "Family Room",
    "Den",
    "Basement",
    "Garage",
    "Sunroom",
    "Bonus Room",
];

/// 단열 상태.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
pub enum InsulationLevel {
    #[default]
    Good,
    Fair,
    Poor,
}

impl InsulationLevel {
    pub const ALL: [InsulationLevel; 3] = [Self::Good, Self::Fair, Self::Poor];

    /// "good"/"fair"/"poor" (대소문자 무시)를 해석한다. 알 수 없으면 None.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "good" | "g" => Some(Self::Good),
            "fair" | "f" => Some(Self::Fair),
            "poor" | "p" => Some(Self::Poor),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }
}

/// 멀티존 실내기 형식. 카탈로그 문서에서는 표시 이름 문자열로 저장된다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UnitType {
    #[default]
    #[serde(rename = "High Wall")]
    HighWall,
    #[serde(rename = "Slim Duct")]
    SlimDuct,
    #[serde(rename = "Floor/Ceiling")]
    FloorCeiling,
    #[serde(rename = "4-Way Ceiling Cassette")]
    FourWayCassette,
}

impl UnitType {
    pub const ALL: [UnitType; 4] = [
        Self::HighWall,
        Self::SlimDuct,
        Self::FloorCeiling,
        Self::FourWayCassette,
    ];

    /// 카탈로그 문서에서 쓰는 표시 이름.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::HighWall => "High Wall",
            Self::SlimDuct => "Slim Duct",
            Self::FloorCeiling => "Floor/Ceiling",
            Self::FourWayCassette => "4-Way Ceiling Cassette",
        }
    }

    /// 표시 이름이나 CLI 약칭(high-wall, slim-duct, floor-ceiling, cassette)을 해석한다.
    pub fn parse(s: &str) -> Option<Self> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.display_name().eq_ignore_ascii_case(&key))
            .or(match key.as_str() {
                "high-wall" | "highwall" | "wall" => Some(Self::HighWall),
                "slim-duct" | "slimduct" | "duct" => Some(Self::SlimDuct),
                "floor-ceiling" | "floorceiling" | "floor" => Some(Self::FloorCeiling),
                "cassette" | "4-way" | "four-way-cassette" => Some(Self::FourWayCassette),
                _ => None,
            })
    }
}

/// 한 방의 부하 계산 입력값. 계산마다 새로 만들어지고 저장되지 않는다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomInput {
    /// 방 이름(비어 있으면 "Room N"으로 표시)
    pub name: String,
    /// 바닥 면적 [ft²]
    pub area_sq_ft: f64,
    /// 천장고 [ft]
    pub ceiling_height_ft: f64,
    pub window_count: u32,
    pub door_count: u32,
    pub insulation: InsulationLevel,
    /// 멀티존에서만 의미가 있다.
    pub unit_type: UnitType,
}

impl RoomInput {
    /// 폼의 원시 문자열 입력으로 방을 만든다. 잘못된 숫자는 0으로 처리한다.
    pub fn from_raw(raw: &RawRoomFields<'_>) -> Self {
        Self {
            name: raw.name.to_string(),
            area_sq_ft: lenient_number(raw.area),
            ceiling_height_ft: lenient_number(raw.ceiling_height),
            window_count: clamp_int(raw.windows, 0, MAX_TWO_DIGIT),
            door_count: clamp_int(raw.doors, 0, MAX_TWO_DIGIT),
            insulation: InsulationLevel::parse(raw.insulation).unwrap_or_default(),
            unit_type: UnitType::parse(raw.unit_type).unwrap_or_default(),
        }
        .sanitized()
    }

    /// 입력 폼과 같은 범위로 값을 자른다. NaN/∞ 는 0이 된다.
    pub fn sanitized(mut self) -> Self {
        self.name = self.name.trim().chars().take(MAX_ROOM_NAME_CHARS).collect();
        self.area_sq_ft = clamp_finite(self.area_sq_ft, MAX_AREA_SQ_FT);
        self.ceiling_height_ft = clamp_finite(self.ceiling_height_ft, MAX_TWO_DIGIT as f64);
        self.window_count = self.window_count.min(MAX_TWO_DIGIT);
        self.door_count = self.door_count.min(MAX_TWO_DIGIT);
        self
    }

    /// 결과 표시에 쓸 이름. 이름이 비어 있으면 1부터 시작하는 순번을 붙인다.
    pub fn label(&self, index: usize) -> String {
        if self.name.trim().is_empty() {
            format!("Room {}", index + 1)
        } else {
            self.name.clone()
        }
    }
}

/// 입력 폼에서 넘어온 가공 전 문자열 묶음.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawRoomFields<'a> {
    pub name: &'a str,
    pub area: &'a str,
    pub ceiling_height: &'a str,
    pub windows: &'a str,
    pub doors: &'a str,
    pub insulation: &'a str,
    pub unit_type: &'a str,
}

/// 숫자로 해석할 수 없거나 유한하지 않은 입력은 0으로 본다.
pub fn lenient_number(s: &str) -> f64 {
    match s.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// 정수로 해석한 뒤 [min, max]로 제한한다. 소수점 이하는 버리고, 실패하면 0.
pub fn clamp_int(s: &str, min: u32, max: u32) -> u32 {
    let v = lenient_number(s).trunc();
    if v <= min as f64 {
        min
    } else if v >= max as f64 {
        max
    } else {
        v as u32
    }
}

fn clamp_finite(v: f64, max: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, max)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_numbers_become_zero() {
        assert_eq!(lenient_number(""), 0.0);
        assert_eq!(lenient_number("abc"), 0.0);
        assert_eq!(lenient_number("NaN"), 0.0);
        assert_eq!(lenient_number("inf"), 0.0);
        assert_eq!(lenient_number(" 12.5 "), 12.5);
    }

    #[test]
    fn counts_are_clamped_to_two_digits() {
        assert_eq!(clamp_int("150", 0, MAX_TWO_DIGIT), 99);
        assert_eq!(clamp_int("-3", 0, MAX_TWO_DIGIT), 0);
        assert_eq!(clamp_int("4.9", 0, MAX_TWO_DIGIT), 4);
        assert_eq!(clamp_int("x", 0, MAX_TWO_DIGIT), 0);
    }

    #[test]
    fn raw_fields_fall_back_to_defaults() {
        let room = RoomInput::from_raw(&RawRoomFields {
            name: "",
            area: "250000",
            ceiling_height: "nine",
            windows: "2",
            doors: "",
            insulation: "terrible",
            unit_type: "cassette",
        });
        assert_eq!(room.area_sq_ft, MAX_AREA_SQ_FT);
        assert_eq!(room.ceiling_height_ft, 0.0);
        assert_eq!(room.window_count, 2);
        assert_eq!(room.door_count, 0);
        assert_eq!(room.insulation, InsulationLevel::Good);
        assert_eq!(room.unit_type, UnitType::FourWayCassette);
        assert_eq!(room.label(2), "Room 3");
    }

    #[test]
    fn long_names_are_truncated() {
        let long = "x".repeat(60);
        let room = RoomInput::from_raw(&RawRoomFields {
            name: &long,
            ..Default::default()
        });
        assert_eq!(room.name.chars().count(), MAX_ROOM_NAME_CHARS);
    }

    #[test]
    fn sanitized_clamps_programmatic_values() {
        let room = RoomInput {
            area_sq_ft: f64::NAN,
            ceiling_height_ft: -4.0,
            window_count: 500,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(room.area_sq_ft, 0.0);
        assert_eq!(room.ceiling_height_ft, 0.0);
        assert_eq!(room.window_count, MAX_TWO_DIGIT);
    }

    #[test]
    fn unit_type_accepts_display_names() {
        assert_eq!(UnitType::parse("Floor/Ceiling"), Some(UnitType::FloorCeiling));
        assert_eq!(UnitType::parse("slim-duct"), Some(UnitType::SlimDuct));
        assert_eq!(UnitType::parse("window"), None);
    }
}
