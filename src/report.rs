//! 계산 결과를 사람이 읽을 수 있는 텍스트로 만든다.

use std::fmt::Write as _;

use crate::catalog::{Catalog, CatalogSource, ClimateZone};
use crate::i18n::{keys, Translator};
use crate::selector::{CombinationResult, IndoorSelection, SingleZoneSelection};
use crate::session::{CalculationReport, RoomRecommendation};

/// 싱글존 선정 결과 한 줄.
pub fn single_zone_text(tr: &Translator, selection: &SingleZoneSelection) -> String {
    match selection {
        SingleZoneSelection::Model { sku, .. } => sku.clone(),
        SingleZoneSelection::NotAvailable { .. } => tr.t(keys::ADVISORY_NOT_AVAILABLE).to_string(),
        SingleZoneSelection::ExceedsCapacity { .. } => {
            tr.t(keys::ADVISORY_EXCEEDS_CAPACITY).to_string()
        }
    }
}

/// 멀티존 실내기 선정 결과 한 줄.
pub fn indoor_text(tr: &Translator, selection: &IndoorSelection) -> String {
    match selection {
        IndoorSelection::Model { sku, .. } => sku.clone(),
        IndoorSelection::NotAvailable { .. } => tr.t(keys::ADVISORY_NOT_AVAILABLE).to_string(),
    }
}

/// "24000 BTU Capacity | 3 Ports" 형식의 실외기 사양 줄.
pub fn outdoor_specs_text(tr: &Translator, combo: &CombinationResult) -> String {
    let port_label = if combo.port_count > 1 {
        tr.t(keys::RESULT_PORTS)
    } else {
        tr.t(keys::RESULT_PORT)
    };
    format!(
        "{} {} | {} {}",
        combo.capacity_btu,
        tr.t(keys::RESULT_CAPACITY),
        combo.port_count,
        port_label
    )
}

/// 보고서 전체를 렌더링한다.
pub fn render_report(tr: &Translator, report: &CalculationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", tr.t(keys::RESULT_TITLE));

    for room in &report.rooms {
        let _ = writeln!(out, "{}: {} BTU", room.label, room.btu);
        match &room.recommendation {
            RoomRecommendation::Single { tiers } => {
                if let [(_, only)] = tiers.as_slice() {
                    let _ = writeln!(
                        out,
                        "  {}: {}",
                        tr.t(keys::RESULT_RECOMMENDED_SYSTEM),
                        single_zone_text(tr, only)
                    );
                } else {
                    for (seer, selection) in tiers {
                        let _ = writeln!(out, "  SEER {seer}: {}", single_zone_text(tr, selection));
                    }
                }
            }
            RoomRecommendation::Multi { indoor } => {
                let _ = writeln!(
                    out,
                    "  {}: {}",
                    tr.t(keys::RESULT_MODEL),
                    indoor_text(tr, indoor)
                );
            }
        }
    }

    if let Some(outdoor) = &report.outdoor {
        let _ = writeln!(
            out,
            "\n{} {} BTU ({})",
            tr.t(keys::RESULT_TOTAL_LOAD),
            report.total_btu,
            report.zone
        );
        if outdoor.is_empty() {
            let _ = writeln!(out, "{}", tr.t(keys::ADVISORY_NO_OUTDOOR));
        } else {
            let _ = writeln!(out, "{}", tr.t(keys::RESULT_OUTDOOR_TITLE));
            for combo in outdoor {
                let _ = writeln!(out, "  [{}] {}", combo.severity.as_str(), combo.sku);
                let _ = writeln!(out, "    {}", outdoor_specs_text(tr, combo));
                let _ = writeln!(
                    out,
                    "    {} {}%",
                    tr.t(keys::RESULT_SYSTEM_LOAD),
                    combo.load_percent_display()
                );
            }
        }
    }

    let _ = writeln!(out, "{}", tr.t(keys::ADVISORY_ESTIMATE_ONLY));
    out
}

/// 카탈로그 요약(소스, 항목 수, 구역별 실외기).
pub fn render_catalog_summary(tr: &Translator, source: &CatalogSource, catalog: &Catalog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", tr.t(keys::CATALOG_HEADING));
    let _ = writeln!(out, "{} {source}", tr.t(keys::CATALOG_SOURCE));
    if catalog.is_empty() {
        let _ = writeln!(out, "{}", tr.t(keys::CATALOG_EMPTY));
        return out;
    }

    let buckets: Vec<String> = catalog
        .single_zone_buckets()
        .iter()
        .map(u32::to_string)
        .collect();
    let tiers: Vec<String> = catalog.seer_tiers().iter().map(u32::to_string).collect();
    let _ = writeln!(
        out,
        "{} {} (BTU: {}; SEER: {})",
        tr.t(keys::CATALOG_SINGLE_ZONE),
        catalog.air_handlers().len(),
        buckets.join(", "),
        tiers.join(", ")
    );

    let multi: Vec<String> = catalog
        .multi_zone_buckets()
        .iter()
        .map(u32::to_string)
        .collect();
    let _ = writeln!(out, "{} {}", tr.t(keys::CATALOG_MULTI_ZONE), multi.join(", "));

    let _ = writeln!(out, "{}", tr.t(keys::CATALOG_OUTDOOR));
    for zone in ClimateZone::ALL {
        for c in catalog.outdoor_combinations(zone) {
            let _ = writeln!(
                out,
                "  {zone:<5} {:<14} {:>6} BTU  x{:.2}  {} ports",
                c.sku, c.capacity_btu, c.max_load_ratio, c.port_count
            );
        }
    }
    out
}
