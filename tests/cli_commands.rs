use std::path::PathBuf;

use clap::Parser;
use hvac_sizing_toolbox::app::{run_catalog, run_multi, run_single, App, AppError};
use hvac_sizing_toolbox::catalog::{Catalog, CatalogSource, CatalogStore};
use hvac_sizing_toolbox::cli::{Cli, Command};
use hvac_sizing_toolbox::config::Config;
use hvac_sizing_toolbox::i18n::Translator;
use hvac_sizing_toolbox::load::FormulaVariant;

fn app(catalog: Catalog, variant: Option<FormulaVariant>) -> App {
    App::with_store(
        Config::default(),
        PathBuf::from("unused-config.toml"),
        CatalogSource::Builtin,
        CatalogStore::new(catalog),
        variant,
        Translator::new("en"),
    )
}

fn command(args: &[&str]) -> Command {
    let mut argv = vec!["hvac_sizing_toolbox"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv)
        .expect("parse args")
        .command
        .expect("subcommand")
}

#[test]
fn single_prints_each_seer_tier() {
    let app = app(Catalog::builtin(), None);
    let Command::Single(args) = command(&[
        "single", "--area", "400", "--height", "10", "--windows", "3", "--doors", "2",
        "--insulation", "poor", "--seer", "20,22,25",
    ]) else {
        panic!("expected single");
    };
    let mut out = Vec::new();
    run_single(&app, &args, &mut out).expect("run single");
    let text = String::from_utf8(out).expect("utf8");
    assert!(text.contains("Room 1: 19180 BTU"), "{text}");
    assert!(text.contains("SEER 20: AJAN18HP230V1C"), "{text}");
    assert!(text.contains("SEER 25: AMAR18HP230V1C"), "{text}");
    assert!(text.contains("Preliminary estimate only."));
}

#[test]
fn single_with_default_tier_shows_recommended_system() {
    let app = app(Catalog::builtin(), Some(FormulaVariant::Multiplicative));
    let Command::Single(args) = command(&[
        "single", "--area", "250", "--windows", "1", "--doors", "1", "--insulation", "fair",
        "--name", "Den",
    ]) else {
        panic!("expected single");
    };
    let mut out = Vec::new();
    run_single(&app, &args, &mut out).expect("run single");
    let text = String::from_utf8(out).expect("utf8");
    // (250*8*5 + 100 + 50) * 1.1
    assert!(text.contains("Den: 11165 BTU"), "{text}");
    assert!(text.contains("Recommended System: AMAR12HP115V1C / AMAR12HP230V1C"), "{text}");
}

#[test]
fn multi_json_output_is_machine_readable() {
    let app = app(Catalog::builtin(), None);
    let Command::Multi(args) = command(&[
        "multi", "--zone", "south", "--json",
        "--room", "400,10,3,2,poor,slim-duct,Office",
        "--room", "300,8,0,0,good,high-wall",
    ]) else {
        panic!("expected multi");
    };
    let mut out = Vec::new();
    run_multi(&app, &args, &mut out).expect("run multi");
    let value: serde_json::Value = serde_json::from_slice(&out).expect("json");
    assert_eq!(value["total_btu"], 26_680);
    assert_eq!(value["zone"], "South");
    assert_eq!(value["rooms"][0]["label"], "Office");
    assert_eq!(value["outdoor"][0]["sku"], "ASPR24HPMULO");
}

#[test]
fn multi_rejects_single_room() {
    let app = app(Catalog::builtin(), None);
    let Command::Multi(args) = command(&["multi", "--room", "400,10,3,2,poor,slim-duct"]) else {
        panic!("expected multi");
    };
    let err = run_multi(&app, &args, &mut Vec::new()).unwrap_err();
    assert!(matches!(err, AppError::RoomCount { count: 1 }));
}

#[test]
fn empty_catalog_still_reports_loads() {
    let app = app(Catalog::empty(), None);
    let Command::Multi(args) = command(&[
        "multi",
        "--room", "300,8,0,0,good,high-wall",
        "--room", "300,8,0,0,good,cassette",
    ]) else {
        panic!("expected multi");
    };
    let mut out = Vec::new();
    run_multi(&app, &args, &mut out).expect("run multi");
    let text = String::from_utf8(out).expect("utf8");
    assert!(text.contains("Room 2: 7500 BTU"), "{text}");
    assert!(text.contains("Model not available for this capacity"));
    assert!(text.contains("No suitable outdoor unit found"));
}

#[test]
fn catalog_export_parses_back() {
    let app = app(Catalog::builtin(), None);
    let Command::Catalog(args) = command(&["catalog", "--export"]) else {
        panic!("expected catalog");
    };
    let mut out = Vec::new();
    run_catalog(&app, &args, &mut out).expect("run catalog");
    let body = String::from_utf8(out).expect("utf8");
    let parsed = hvac_sizing_toolbox::catalog::loader::parse_json(&body).expect("parse export");
    assert_eq!(parsed, Catalog::builtin());
}
