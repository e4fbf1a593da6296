use std::io::Write;
use std::path::PathBuf;

use log::{debug, info};
use thiserror::Error;

use crate::catalog::document::CatalogDocument;
use crate::catalog::{CatalogError, CatalogSource, CatalogStore};
use crate::cli::{CatalogArgs, Command, MultiArgs, SingleArgs};
use crate::config::{Config, ConfigError};
use crate::i18n::{self, Translator};
use crate::load::FormulaVariant;
use crate::report;
use crate::session::{build_report, CalculationReport, CalculatorSettings, SystemType};
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 표준 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 카탈로그 로드 오류
    #[error("카탈로그 오류: {0}")]
    Catalog(#[from] CatalogError),
    /// 로거 초기화 오류
    #[error("로거 초기화 오류: {0}")]
    Logger(#[from] log::SetLoggerError),
    /// JSON 출력 오류
    #[error("JSON 출력 오류: {0}")]
    Json(#[from] serde_json::Error),
    /// `--room` 값 형식 오류
    #[error("잘못된 방 정의 '{spec}': {reason}")]
    InvalidRoomSpec { spec: String, reason: &'static str },
    /// 멀티존 방 개수 범위 오류
    #[error("멀티존은 방이 2~5개여야 합니다 (입력: {count})")]
    RoomCount { count: usize },
}

/// 한 번의 실행 동안 공유되는 상태.
pub struct App {
    pub config: Config,
    pub config_path: PathBuf,
    pub catalog_source: CatalogSource,
    pub store: CatalogStore,
    pub tr: Translator,
    variant_override: Option<FormulaVariant>,
}

impl App {
    /// 카탈로그를 로드해서 실행 상태를 만든다. 로드에 실패하면 빈 카탈로그로 계속한다.
    pub fn new(
        config: Config,
        config_path: PathBuf,
        catalog_source: CatalogSource,
        variant_override: Option<FormulaVariant>,
        tr: Translator,
    ) -> Self {
        let store = CatalogStore::load_or_empty(&catalog_source);
        Self::with_store(config, config_path, catalog_source, store, variant_override, tr)
    }

    /// 이미 준비된 카탈로그 저장소로 실행 상태를 만든다.
    pub fn with_store(
        config: Config,
        config_path: PathBuf,
        catalog_source: CatalogSource,
        store: CatalogStore,
        variant_override: Option<FormulaVariant>,
        tr: Translator,
    ) -> Self {
        Self {
            config,
            config_path,
            catalog_source,
            store,
            tr,
            variant_override,
        }
    }

    /// 설정값에 `--variant` 덮어쓰기를 반영한 세션 설정.
    pub fn settings(&self) -> CalculatorSettings {
        let mut settings = self.config.calculator_settings();
        if let Some(v) = self.variant_override {
            settings.variant = v;
        }
        settings
    }

    pub fn save_config(&self) -> Result<(), AppError> {
        self.config.save(&self.config_path)?;
        debug!("config saved to {}", self.config_path.display());
        Ok(())
    }

    /// 설정 메뉴에서 추정식을 바꾸면 CLI 덮어쓰기는 더 이상 적용하지 않는다.
    fn clear_variant_override(&mut self) {
        self.variant_override = None;
    }
}

/// 서브커맨드를 실행한다. 없으면 대화형 메뉴.
pub fn dispatch(app: &mut App, command: Option<Command>) -> Result<(), AppError> {
    let stdout = std::io::stdout();
    match command {
        None | Some(Command::Interactive) => run(app),
        Some(Command::Single(args)) => run_single(app, &args, &mut stdout.lock()),
        Some(Command::Multi(args)) => run_multi(app, &args, &mut stdout.lock()),
        Some(Command::Catalog(args)) => run_catalog(app, &args, &mut stdout.lock()),
    }
}

/// 대화형 메인 루프를 실행한다.
pub fn run(app: &mut App) -> Result<(), AppError> {
    if !ui_cli::accept_disclaimer(&app.tr)? {
        println!("{}", app.tr.t(i18n::keys::DISCLAIMER_DECLINED));
        return Ok(());
    }
    loop {
        match ui_cli::main_menu(&app.tr)? {
            MenuChoice::SingleZone => ui_cli::handle_single_zone(app)?,
            MenuChoice::MultiZone => ui_cli::handle_multi_zone(app)?,
            MenuChoice::Catalog => ui_cli::handle_catalog(app)?,
            MenuChoice::Settings => {
                let before = app.config.formula_variant;
                ui_cli::handle_settings(&app.tr, &mut app.config)?;
                if app.config.formula_variant != before {
                    app.clear_variant_override();
                }
                app.save_config()?;
                println!("{}", app.tr.t(i18n::keys::SETTINGS_SAVED));
            }
            MenuChoice::Exit => {
                app.save_config()?;
                println!("{}", app.tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}

/// `single` 서브커맨드.
pub fn run_single(app: &App, args: &SingleArgs, out: &mut impl Write) -> Result<(), AppError> {
    let settings = app.settings();
    let seer_tiers = if args.seer.is_empty() {
        settings.seer_tiers
    } else {
        args.seer.clone()
    };
    let catalog = app.store.snapshot();
    let report = build_report(
        &catalog,
        SystemType::Single,
        settings.default_zone,
        settings.variant,
        &seer_tiers,
        &[args.room()],
    );
    info!("single zone: {} BTU", report.total_btu);
    write_report(app, &report, args.json, out)
}

/// `multi` 서브커맨드.
pub fn run_multi(app: &App, args: &MultiArgs, out: &mut impl Write) -> Result<(), AppError> {
    let rooms = args.parse_rooms()?;
    let settings = app.settings();
    let zone = args.zone.unwrap_or(settings.default_zone);
    let catalog = app.store.snapshot();
    let report = build_report(
        &catalog,
        SystemType::Multi,
        zone,
        settings.variant,
        &settings.seer_tiers,
        &rooms,
    );
    info!(
        "multi zone: {} rooms, {} BTU total, zone {zone}",
        rooms.len(),
        report.total_btu
    );
    write_report(app, &report, args.json, out)
}

/// `catalog` 서브커맨드. `--export`면 현재 스냅샷을 문서 형식으로 출력한다.
pub fn run_catalog(app: &App, args: &CatalogArgs, out: &mut impl Write) -> Result<(), AppError> {
    let catalog = app.store.snapshot();
    if args.export {
        let doc = CatalogDocument::from(catalog.as_ref());
        serde_json::to_writer_pretty(&mut *out, &doc)?;
        writeln!(out)?;
    } else {
        write!(
            out,
            "{}",
            report::render_catalog_summary(&app.tr, &app.catalog_source, &catalog)
        )?;
    }
    Ok(())
}

fn write_report(
    app: &App,
    report: &CalculationReport,
    json: bool,
    out: &mut impl Write,
) -> Result<(), AppError> {
    if json {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
    } else {
        write!(out, "{}", report::render_report(&app.tr, report))?;
    }
    Ok(())
}
