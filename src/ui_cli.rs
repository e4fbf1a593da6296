use std::io::{self, BufRead, Write};

use log::warn;

use crate::app::{App, AppError};
use crate::catalog::ClimateZone;
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::load::FormulaVariant;
use crate::report;
use crate::room::{InsulationLevel, RawRoomFields, RoomInput, UnitType, ROOM_NAME_SUGGESTIONS};
use crate::session::{CalculatorSession, SystemType};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    SingleZone,
    MultiZone,
    Catalog,
    Settings,
    Exit,
}

/// 시작 시 면책 문구를 보여주고 동의 여부를 받는다.
pub fn accept_disclaimer(tr: &Translator) -> Result<bool, AppError> {
    println!("{}", tr.t(keys::DISCLAIMER_TITLE));
    println!("{}", tr.t(keys::DISCLAIMER_TEXT));
    let answer = read_line(tr.t(keys::DISCLAIMER_PROMPT))?;
    Ok(is_yes(&answer))
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_SINGLE_ZONE));
    println!("{}", tr.t(keys::MAIN_MENU_MULTI_ZONE));
    println!("{}", tr.t(keys::MAIN_MENU_CATALOG));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    choose_menu(tr, &mut io::stdin().lock())
}

/// 올바른 번호가 나올 때까지 읽는다. 입력이 끝나면 종료를 선택한 것으로 본다.
fn choose_menu(tr: &Translator, reader: &mut impl BufRead) -> Result<MenuChoice, AppError> {
    loop {
        let sel = match prompt_from(reader, tr.t(keys::PROMPT_MENU_SELECT)) {
            Err(e) if is_end_of_input(&e) => return Ok(MenuChoice::Exit),
            other => other?,
        };
        match parse_menu_choice(&sel) {
            Some(choice) => return Ok(choice),
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn parse_menu_choice(s: &str) -> Option<MenuChoice> {
    match s.trim() {
        "1" => Some(MenuChoice::SingleZone),
        "2" => Some(MenuChoice::MultiZone),
        "3" => Some(MenuChoice::Catalog),
        "4" => Some(MenuChoice::Settings),
        "0" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// 싱글존 계산 메뉴.
pub fn handle_single_zone(app: &App) -> Result<(), AppError> {
    let tr = &app.tr;
    println!("{}", tr.t(keys::SINGLE_ZONE_HEADING));
    let mut session = CalculatorSession::new(app.settings());
    let room = read_room(tr, 0, false)?;
    session.update_room(0, room);

    let catalog = app.store.snapshot();
    let report = session.calculate(&catalog);
    print!("{}", report::render_report(tr, report));
    Ok(())
}

/// 멀티존 계산 메뉴.
pub fn handle_multi_zone(app: &App) -> Result<(), AppError> {
    let tr = &app.tr;
    println!("{}", tr.t(keys::MULTI_ZONE_HEADING));
    let mut session = CalculatorSession::new(app.settings());
    session.set_system_type(SystemType::Multi);

    let requested = read_line(tr.t(keys::PROMPT_ROOM_COUNT))?;
    let count = session.set_room_count(requested.trim().parse().unwrap_or(0));

    println!("{}", tr.t(keys::ZONE_OPTIONS));
    let sel = read_line(tr.t(keys::PROMPT_SELECT))?;
    let zone = pick(&ClimateZone::ALL, &sel).unwrap_or(session.zone());
    session.set_zone(zone);

    for index in 0..count {
        let room = read_room(tr, index, true)?;
        session.update_room(index, room);
    }

    let catalog = app.store.snapshot();
    let report = session.calculate(&catalog);
    print!("{}", report::render_report(tr, report));
    Ok(())
}

/// 카탈로그 요약을 보여주고 원하면 다시 로드한다.
pub fn handle_catalog(app: &App) -> Result<(), AppError> {
    let tr = &app.tr;
    print!(
        "{}",
        report::render_catalog_summary(tr, &app.catalog_source, &app.store.snapshot())
    );
    let answer = read_line(tr.t(keys::CATALOG_PROMPT_RELOAD))?;
    if !is_yes(&answer) {
        return Ok(());
    }
    match app.store.reload(&app.catalog_source) {
        Ok(_) => println!("{}", tr.t(keys::CATALOG_RELOADED)),
        Err(e) => {
            warn!("catalog reload from {} failed: {e}", app.catalog_source);
            println!("{} {e}", tr.t(keys::CATALOG_RELOAD_FAILED));
        }
    }
    Ok(())
}

/// 설정 메뉴를 처리한다. 빈 입력은 현재 값을 유지한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));

    println!(
        "{} {}",
        tr.t(keys::SETTINGS_CURRENT_VARIANT),
        cfg.formula_variant.as_str()
    );
    println!("{}", tr.t(keys::SETTINGS_VARIANT_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    if !sel.trim().is_empty() {
        match pick(&[FormulaVariant::PerSquareFoot, FormulaVariant::Multiplicative], &sel) {
            Some(v) => cfg.formula_variant = v,
            None => println!("{}", tr.t(keys::SETTINGS_INVALID)),
        }
    }

    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_ZONE), cfg.default_zone);
    println!("{}", tr.t(keys::ZONE_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    if !sel.trim().is_empty() {
        match pick(&ClimateZone::ALL, &sel) {
            Some(z) => cfg.default_zone = z,
            None => println!("{}", tr.t(keys::SETTINGS_INVALID)),
        }
    }

    let current: Vec<String> = cfg.seer_tiers.iter().map(u32::to_string).collect();
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_SEER), current.join(", "));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_SEER))?;
    if !sel.trim().is_empty() {
        match parse_seer_list(&sel) {
            Some(tiers) => cfg.seer_tiers = tiers,
            None => println!("{}", tr.t(keys::SETTINGS_INVALID)),
        }
    }
    Ok(())
}

/// 방 하나의 입력을 받는다. 숫자가 아니면 0으로 처리된다.
fn read_room(tr: &Translator, index: usize, with_unit_type: bool) -> Result<RoomInput, AppError> {
    println!("{} {}]", tr.t(keys::ROOM_HEADING), index + 1);
    println!("  ({})", ROOM_NAME_SUGGESTIONS.join(", "));
    let name = read_line(tr.t(keys::PROMPT_ROOM_NAME))?;
    let area = read_line(tr.t(keys::PROMPT_AREA))?;
    let height = read_line(tr.t(keys::PROMPT_CEILING_HEIGHT))?;
    let windows = read_line(tr.t(keys::PROMPT_WINDOWS))?;
    let doors = read_line(tr.t(keys::PROMPT_DOORS))?;

    println!("{}", tr.t(keys::INSULATION_OPTIONS));
    let sel = read_line(tr.t(keys::PROMPT_SELECT))?;
    let insulation = pick(&InsulationLevel::ALL, &sel).unwrap_or_default();

    let unit_type = if with_unit_type {
        println!("{}", tr.t(keys::UNIT_TYPE_OPTIONS));
        let sel = read_line(tr.t(keys::PROMPT_SELECT))?;
        pick(&UnitType::ALL, &sel).unwrap_or_default()
    } else {
        UnitType::default()
    };

    Ok(RoomInput::from_raw(&RawRoomFields {
        name: &name,
        area: &area,
        ceiling_height: &height,
        windows: &windows,
        doors: &doors,
        insulation: insulation.as_str(),
        unit_type: unit_type.display_name(),
    }))
}

/// "1".."n" 번호로 목록에서 고른다.
fn pick<T: Copy>(options: &[T], sel: &str) -> Option<T> {
    let n: usize = sel.trim().parse().ok()?;
    options.get(n.checked_sub(1)?).copied()
}

fn parse_seer_list(s: &str) -> Option<Vec<u32>> {
    let tiers: Vec<u32> = s
        .split(',')
        .map(|part| part.trim().parse::<u32>().ok().filter(|v| *v > 0))
        .collect::<Option<_>>()?;
    (!tiers.is_empty()).then_some(tiers)
}

fn is_yes(s: &str) -> bool {
    matches!(s.trim().to_ascii_lowercase().as_str(), "y" | "yes" | "예" | "네")
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    prompt_from(&mut io::stdin().lock(), prompt)
}

/// 프롬프트를 출력하고 한 줄을 읽는다. 0바이트를 읽으면(EOF) `UnexpectedEof` 오류.
fn prompt_from(reader: &mut impl BufRead, prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if reader.read_line(&mut buf)? == 0 {
        return Err(AppError::Io(io::ErrorKind::UnexpectedEof.into()));
    }
    Ok(buf)
}

fn is_end_of_input(err: &AppError) -> bool {
    matches!(err, AppError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_choices() {
        assert_eq!(parse_menu_choice(" 2\n"), Some(MenuChoice::MultiZone));
        assert_eq!(parse_menu_choice("0"), Some(MenuChoice::Exit));
        assert_eq!(parse_menu_choice("9"), None);
    }

    #[test]
    fn pick_is_one_based() {
        assert_eq!(pick(&InsulationLevel::ALL, "1"), Some(InsulationLevel::Good));
        assert_eq!(pick(&InsulationLevel::ALL, "3\n"), Some(InsulationLevel::Poor));
        assert_eq!(pick(&InsulationLevel::ALL, "0"), None);
        assert_eq!(pick(&InsulationLevel::ALL, "4"), None);
        assert_eq!(pick(&ClimateZone::ALL, "x"), None);
    }

    #[test]
    fn seer_list_parsing() {
        assert_eq!(parse_seer_list("20, 22,25"), Some(vec![20, 22, 25]));
        assert_eq!(parse_seer_list("20,abc"), None);
        assert_eq!(parse_seer_list("0"), None);
    }

    #[test]
    fn closed_input_is_an_error_not_an_empty_line() {
        let err = prompt_from(&mut io::Cursor::new(""), "> ").unwrap_err();
        assert!(is_end_of_input(&err));
        let line = prompt_from(&mut io::Cursor::new("2\n"), "> ").expect("line");
        assert_eq!(line, "2\n");
        let blank = prompt_from(&mut io::Cursor::new("\n"), "> ").expect("blank line");
        assert_eq!(blank, "\n");
    }

    #[test]
    fn menu_exits_when_input_runs_out() {
        let tr = Translator::new("en");
        let choice = choose_menu(&tr, &mut io::Cursor::new("x\n9\n")).expect("menu");
        assert_eq!(choice, MenuChoice::Exit);
        let choice = choose_menu(&tr, &mut io::Cursor::new("x\n2\n")).expect("menu");
        assert_eq!(choice, MenuChoice::MultiZone);
    }

    #[test]
    fn yes_answers() {
        assert!(is_yes("Y\n"));
        assert!(is_yes("예"));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
    }
}
