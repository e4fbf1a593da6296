use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const APP_EXIT: &str = "general.app_exit";

    pub const DISCLAIMER_TITLE: &str = "disclaimer.title";
    pub const DISCLAIMER_TEXT: &str = "disclaimer.text";
    pub const DISCLAIMER_PROMPT: &str = "disclaimer.prompt";
    pub const DISCLAIMER_DECLINED: &str = "disclaimer.declined";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_SINGLE_ZONE: &str = "main_menu.single_zone";
    pub const MAIN_MENU_MULTI_ZONE: &str = "main_menu.multi_zone";
    pub const MAIN_MENU_CATALOG: &str = "main_menu.catalog";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const SINGLE_ZONE_HEADING: &str = "single_zone.heading";
    pub const MULTI_ZONE_HEADING: &str = "multi_zone.heading";
    pub const ROOM_HEADING: &str = "room.heading";
    pub const PROMPT_ROOM_NAME: &str = "prompt.room_name";
    pub const PROMPT_AREA: &str = "prompt.area";
    pub const PROMPT_CEILING_HEIGHT: &str = "prompt.ceiling_height";
    pub const PROMPT_WINDOWS: &str = "prompt.windows";
    pub const PROMPT_DOORS: &str = "prompt.doors";
    pub const INSULATION_OPTIONS: &str = "room.insulation_options";
    pub const UNIT_TYPE_OPTIONS: &str = "room.unit_type_options";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const PROMPT_ROOM_COUNT: &str = "prompt.room_count";
    pub const ZONE_OPTIONS: &str = "multi_zone.zone_options";

    pub const RESULT_TITLE: &str = "result.title";
    pub const RESULT_RECOMMENDED_SYSTEM: &str = "result.recommended_system";
    pub const RESULT_MODEL: &str = "result.model";
    pub const RESULT_TOTAL_LOAD: &str = "result.total_load";
    pub const RESULT_OUTDOOR_TITLE: &str = "result.outdoor_title";
    pub const RESULT_CAPACITY: &str = "result.capacity";
    pub const RESULT_PORT: &str = "result.port";
    pub const RESULT_PORTS: &str = "result.ports";
    pub const RESULT_SYSTEM_LOAD: &str = "result.system_load";
    pub const ADVISORY_NOT_AVAILABLE: &str = "advisory.not_available";
    pub const ADVISORY_EXCEEDS_CAPACITY: &str = "advisory.exceeds_capacity";
    pub const ADVISORY_NO_OUTDOOR: &str = "advisory.no_outdoor";
    pub const ADVISORY_ESTIMATE_ONLY: &str = "advisory.estimate_only";

    pub const CATALOG_HEADING: &str = "catalog.heading";
    pub const CATALOG_SOURCE: &str = "catalog.source";
    pub const CATALOG_SINGLE_ZONE: &str = "catalog.single_zone";
    pub const CATALOG_MULTI_ZONE: &str = "catalog.multi_zone";
    pub const CATALOG_OUTDOOR: &str = "catalog.outdoor";
    pub const CATALOG_EMPTY: &str = "catalog.empty";
    pub const CATALOG_PROMPT_RELOAD: &str = "catalog.prompt_reload";
    pub const CATALOG_RELOADED: &str = "catalog.reloaded";
    pub const CATALOG_RELOAD_FAILED: &str = "catalog.reload_failed";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_VARIANT: &str = "settings.current_variant";
    pub const SETTINGS_VARIANT_OPTIONS: &str = "settings.variant_options";
    pub const SETTINGS_CURRENT_ZONE: &str = "settings.current_zone";
    pub const SETTINGS_CURRENT_SEER: &str = "settings.current_seer";
    pub const SETTINGS_PROMPT_SEER: &str = "settings.prompt_seer";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 언어팩 → 선택 언어 → 영어 순으로 찾고, 없으면 키를 그대로 돌려준다.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        let builtin = match self.lang {
            Language::Ko => ko(key).or_else(|| en(key)),
            Language::En => en(key),
        };
        builtin.unwrap_or(key)
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵 또는 중첩 표.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }
    Some(map)
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        APP_EXIT => "프로그램을 종료합니다.",
        DISCLAIMER_TITLE => "\n=== 안내 ===",
        DISCLAIMER_TEXT => "이 계산기는 사전 견적용 근사치만 제공하며 Manual J 부하 계산을 대체하지 않습니다. 반드시 자격 있는 HVAC 전문가와 확인하세요.",
        DISCLAIMER_PROMPT => "동의하고 계속하시겠습니까? (y/n): ",
        DISCLAIMER_DECLINED => "동의하지 않아 종료합니다.",
        MAIN_MENU_TITLE => "\n=== HVAC 용량 산정 ===",
        MAIN_MENU_SINGLE_ZONE => "1) 싱글존 계산",
        MAIN_MENU_MULTI_ZONE => "2) 멀티존 계산",
        MAIN_MENU_CATALOG => "3) 카탈로그 확인/다시 로드",
        MAIN_MENU_SETTINGS => "4) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        SINGLE_ZONE_HEADING => "\n-- 싱글존 --",
        MULTI_ZONE_HEADING => "\n-- 멀티존 --",
        ROOM_HEADING => "\n[방",
        PROMPT_ROOM_NAME => "방 이름 (예: Living Room): ",
        PROMPT_AREA => "면적 [ft²]: ",
        PROMPT_CEILING_HEIGHT => "천장고 [ft]: ",
        PROMPT_WINDOWS => "창문 수: ",
        PROMPT_DOORS => "문 수: ",
        INSULATION_OPTIONS => "단열 상태: 1=Good 2=Fair 3=Poor",
        UNIT_TYPE_OPTIONS => "실내기 형식: 1=High Wall 2=Slim Duct 3=Floor/Ceiling 4=4-Way Ceiling Cassette",
        PROMPT_SELECT => "선택: ",
        PROMPT_ROOM_COUNT => "방 개수 (2~5): ",
        ZONE_OPTIONS => "기후 구역: 1=South 2=North",
        RESULT_TITLE => "\n결과",
        RESULT_RECOMMENDED_SYSTEM => "추천 시스템",
        RESULT_MODEL => "모델",
        RESULT_TOTAL_LOAD => "전체 시스템 부하:",
        RESULT_OUTDOOR_TITLE => "추천 실외기:",
        RESULT_CAPACITY => "BTU 용량",
        RESULT_PORT => "포트",
        RESULT_PORTS => "포트",
        RESULT_SYSTEM_LOAD => "시스템 부하율:",
        ADVISORY_NOT_AVAILABLE => "해당 용량의 모델이 없습니다",
        ADVISORY_EXCEEDS_CAPACITY => "⚠️ 부하가 용량을 초과합니다. 복수 시스템을 권장하거나 전문가와 상담하세요.",
        ADVISORY_NO_OUTDOOR => "⚠️ 적합한 실외기가 없습니다. 복수 시스템을 권장하거나 맞춤 설계를 위해 전문가와 상담하세요.",
        ADVISORY_ESTIMATE_ONLY => "※ 사전 견적용 근사치입니다.",
        CATALOG_HEADING => "\n-- 카탈로그 --",
        CATALOG_SOURCE => "소스:",
        CATALOG_SINGLE_ZONE => "싱글존 에어핸들러:",
        CATALOG_MULTI_ZONE => "멀티존 실내기 용량:",
        CATALOG_OUTDOOR => "실외기 조합:",
        CATALOG_EMPTY => "카탈로그가 비어 있어 추천 모델을 표시할 수 없습니다.",
        CATALOG_PROMPT_RELOAD => "다시 로드하시겠습니까? (y/n): ",
        CATALOG_RELOADED => "카탈로그를 다시 로드했습니다.",
        CATALOG_RELOAD_FAILED => "카탈로그 로드 실패, 기존 카탈로그를 유지합니다:",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_VARIANT => "현재 부하식:",
        SETTINGS_VARIANT_OPTIONS => "1) 보정식(ft²당 25 BTU)  2) 구형 계수식",
        SETTINGS_CURRENT_ZONE => "기본 기후 구역:",
        SETTINGS_CURRENT_SEER => "싱글존 SEER 등급:",
        SETTINGS_PROMPT_SEER => "SEER 등급 (쉼표 구분, 취소하려면 엔터): ",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        APP_EXIT => "Exiting.",
        DISCLAIMER_TITLE => "\n=== Disclaimer ===",
        DISCLAIMER_TEXT => "This sizing tool is for preliminary estimates only and does not replace a proper Manual J load calculation. Always verify with a licensed HVAC professional.",
        DISCLAIMER_PROMPT => "Accept and continue? (y/n): ",
        DISCLAIMER_DECLINED => "Disclaimer not accepted; exiting.",
        MAIN_MENU_TITLE => "\n=== HVAC Sizing Toolbox ===",
        MAIN_MENU_SINGLE_ZONE => "1) Single zone",
        MAIN_MENU_MULTI_ZONE => "2) Multi zone",
        MAIN_MENU_CATALOG => "3) Catalog / reload",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        SINGLE_ZONE_HEADING => "\n-- Single Zone --",
        MULTI_ZONE_HEADING => "\n-- Multi Zone --",
        ROOM_HEADING => "\n[Room",
        PROMPT_ROOM_NAME => "Room name (e.g. Living Room): ",
        PROMPT_AREA => "Area [ft²]: ",
        PROMPT_CEILING_HEIGHT => "Ceiling height [ft]: ",
        PROMPT_WINDOWS => "Windows: ",
        PROMPT_DOORS => "Doors: ",
        INSULATION_OPTIONS => "Insulation: 1=Good 2=Fair 3=Poor",
        UNIT_TYPE_OPTIONS => "Unit type: 1=High Wall 2=Slim Duct 3=Floor/Ceiling 4=4-Way Ceiling Cassette",
        PROMPT_SELECT => "Select: ",
        PROMPT_ROOM_COUNT => "Number of rooms (2-5): ",
        ZONE_OPTIONS => "Climate zone: 1=South 2=North",
        RESULT_TITLE => "\nResults",
        RESULT_RECOMMENDED_SYSTEM => "Recommended System",
        RESULT_MODEL => "Model",
        RESULT_TOTAL_LOAD => "Total System Load:",
        RESULT_OUTDOOR_TITLE => "Recommended Outdoor Units:",
        RESULT_CAPACITY => "BTU Capacity",
        RESULT_PORT => "Port",
        RESULT_PORTS => "Ports",
        RESULT_SYSTEM_LOAD => "System Load:",
        ADVISORY_NOT_AVAILABLE => "Model not available for this capacity",
        ADVISORY_EXCEEDS_CAPACITY => "⚠️ Load exceeds capacity. Recommend multiple systems or contact professional.",
        ADVISORY_NO_OUTDOOR => "⚠️ No suitable outdoor unit found. Recommend multiple systems or contact a professional for a custom solution.",
        ADVISORY_ESTIMATE_ONLY => "Preliminary estimate only.",
        CATALOG_HEADING => "\n-- Catalog --",
        CATALOG_SOURCE => "Source:",
        CATALOG_SINGLE_ZONE => "Single-zone air handlers:",
        CATALOG_MULTI_ZONE => "Multi-zone indoor capacities:",
        CATALOG_OUTDOOR => "Outdoor combinations:",
        CATALOG_EMPTY => "Catalog is empty; no model recommendations are available.",
        CATALOG_PROMPT_RELOAD => "Reload now? (y/n): ",
        CATALOG_RELOADED => "Catalog reloaded.",
        CATALOG_RELOAD_FAILED => "Catalog reload failed; keeping the current catalog:",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_VARIANT => "Load formula:",
        SETTINGS_VARIANT_OPTIONS => "1) Corrected (25 BTU/ft²)  2) Legacy multiplier",
        SETTINGS_CURRENT_ZONE => "Default climate zone:",
        SETTINGS_CURRENT_SEER => "Single-zone SEER tiers:",
        SETTINGS_PROMPT_SEER => "SEER tiers (comma separated, enter to keep): ",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; unchanged.",
        SETTINGS_SAVED => "Settings saved.",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_language_falls_back_to_english() {
        let tr = Translator::new("fr");
        assert_eq!(tr.language(), Language::En);
        assert_eq!(tr.t(keys::APP_EXIT), "Exiting.");
    }

    #[test]
    fn missing_key_returns_key() {
        let tr = Translator::new("ko");
        assert_eq!(tr.t("no.such.key"), "no.such.key");
    }

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language(Some("ko-KR"), Some("en")), "ko");
        assert_eq!(resolve_language(Some("auto"), Some("en-us")), "en");
    }

    #[test]
    fn nested_pack_keys_are_flattened() {
        let map = parse_toml_to_map("[advisory]\nnot_available = \"N/A\"\n").expect("parse");
        assert_eq!(map.get("advisory.not_available").map(String::as_str), Some("N/A"));
    }

    #[test]
    fn pack_overrides_builtin_strings() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join("en.toml"),
            "[advisory]\nnot_available = \"Sold out\"\n",
        )
        .expect("write pack");
        let tr = Translator::new_with_pack("en", dir.path().to_str());
        assert_eq!(tr.t(keys::ADVISORY_NOT_AVAILABLE), "Sold out");
        assert_eq!(tr.t(keys::APP_EXIT), "Exiting.");
    }
}
