//! clap 명령줄 정의와 인자 → 도메인 값 변환.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::AppError;
use crate::catalog::ClimateZone;
use crate::config::DEFAULT_CONFIG_FILE;
use crate::load::FormulaVariant;
use crate::room::{InsulationLevel, RawRoomFields, RoomInput, UnitType};
use crate::session::{MAX_MULTI_ZONE_ROOMS, MIN_MULTI_ZONE_ROOMS};

/// HVAC 부하 추정 및 장비 선정 도구
#[derive(Debug, Parser)]
#[command(
    name = "hvac_sizing_toolbox",
    version,
    about = "Rough HVAC load estimate and equipment selection (not a Manual J calculation)"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// UI 언어(ko, en, auto)
    #[arg(long, global = true)]
    pub lang: Option<String>,

    /// 카탈로그 위치(builtin, 파일 경로, http(s) URL). 설정값을 덮어쓴다.
    #[arg(long, global = true)]
    pub catalog: Option<String>,

    /// 부하 추정식. 설정값을 덮어쓴다.
    #[arg(long, global = true, value_enum)]
    pub variant: Option<FormulaVariant>,

    /// 로그 상세도 (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 대화형 메뉴 (기본값)
    Interactive,
    /// 방 하나를 싱글존으로 계산
    Single(SingleArgs),
    /// 2~5개 방을 멀티존으로 계산
    Multi(MultiArgs),
    /// 현재 카탈로그 요약 또는 내보내기
    Catalog(CatalogArgs),
}

#[derive(Debug, Args)]
pub struct SingleArgs {
    /// 면적 [ft²]
    #[arg(long, default_value_t = 0.0)]
    pub area: f64,
    /// 천장고 [ft]
    #[arg(long, default_value_t = 8.0)]
    pub height: f64,
    #[arg(long, default_value_t = 0)]
    pub windows: u32,
    #[arg(long, default_value_t = 0)]
    pub doors: u32,
    #[arg(long, value_enum, default_value_t = InsulationLevel::Good)]
    pub insulation: InsulationLevel,
    #[arg(long)]
    pub name: Option<String>,
    /// 표시할 SEER 등급(쉼표 구분). 없으면 설정값.
    #[arg(long, value_delimiter = ',')]
    pub seer: Vec<u32>,
    /// JSON으로 출력
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct MultiArgs {
    /// 기후 구역. 없으면 설정값.
    #[arg(long, value_enum)]
    pub zone: Option<ClimateZone>,
    /// 방 정의: "면적,천장고,창,문,단열,실내기형식[,이름]"
    #[arg(long = "room", required = true)]
    pub rooms: Vec<String>,
    /// JSON으로 출력
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// 카탈로그 문서(JSON)를 표준 출력으로 내보낸다
    #[arg(long)]
    pub export: bool,
}

impl SingleArgs {
    pub fn room(&self) -> RoomInput {
        RoomInput {
            name: self.name.clone().unwrap_or_default(),
            area_sq_ft: self.area,
            ceiling_height_ft: self.height,
            window_count: self.windows,
            door_count: self.doors,
            insulation: self.insulation,
            ..Default::default()
        }
        .sanitized()
    }
}

impl MultiArgs {
    /// 방 정의를 모두 해석한다. 방 개수가 2~5를 벗어나면 오류.
    pub fn parse_rooms(&self) -> Result<Vec<RoomInput>, AppError> {
        let count = self.rooms.len();
        if !(MIN_MULTI_ZONE_ROOMS..=MAX_MULTI_ZONE_ROOMS).contains(&count) {
            return Err(AppError::RoomCount { count });
        }
        self.rooms.iter().map(|s| parse_room_spec(s)).collect()
    }
}

/// "면적,천장고,창,문,단열,실내기형식[,이름]"을 해석한다.
///
/// 숫자는 폼 입력과 같이 관대하게 처리하지만(잘못된 값은 0), 단열 상태와
/// 실내기 형식은 오타를 잡기 위해 엄격하게 확인한다.
pub fn parse_room_spec(spec: &str) -> Result<RoomInput, AppError> {
    let fields: Vec<&str> = spec.split(',').map(str::trim).collect();
    if !(6..=7).contains(&fields.len()) {
        return Err(AppError::InvalidRoomSpec {
            spec: spec.to_string(),
            reason: "expected area,height,windows,doors,insulation,unit-type[,name]",
        });
    }
    if InsulationLevel::parse(fields[4]).is_none() {
        return Err(AppError::InvalidRoomSpec {
            spec: spec.to_string(),
            reason: "insulation must be good, fair or poor",
        });
    }
    if UnitType::parse(fields[5]).is_none() {
        return Err(AppError::InvalidRoomSpec {
            spec: spec.to_string(),
            reason: "unknown unit type",
        });
    }
    Ok(RoomInput::from_raw(&RawRoomFields {
        area: fields[0],
        ceiling_height: fields[1],
        windows: fields[2],
        doors: fields[3],
        insulation: fields[4],
        unit_type: fields[5],
        name: fields.get(6).copied().unwrap_or_default(),
    }))
}
