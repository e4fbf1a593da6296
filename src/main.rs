use std::process::ExitCode;

use clap::Parser;
use hvac_sizing_toolbox::app::{self, App, AppError};
use hvac_sizing_toolbox::catalog::CatalogSource;
use hvac_sizing_toolbox::cli::Cli;
use hvac_sizing_toolbox::i18n::{self, Translator};
use hvac_sizing_toolbox::{config, logger};

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    match try_run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("오류: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let cfg = config::load_or_default(&cli.global.config)?;

    let level = logger::raise_level(logger::parse_level(&cfg.log_level), cli.global.verbose);
    logger::initialize(level)?;

    let lang = i18n::resolve_language(cli.global.lang.as_deref(), cfg.language.as_deref());
    let tr = Translator::new_with_pack(&lang, None);

    let source = cli
        .global
        .catalog
        .as_deref()
        .map(CatalogSource::from_arg)
        .unwrap_or_else(|| cfg.catalog.clone());

    let mut app = App::new(
        cfg,
        cli.global.config.clone(),
        source,
        cli.global.variant,
        tr,
    );
    app::dispatch(&mut app, cli.command)
}
