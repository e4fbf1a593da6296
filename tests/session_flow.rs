use hvac_sizing_toolbox::catalog::{Catalog, ClimateZone};
use hvac_sizing_toolbox::load::FormulaVariant;
use hvac_sizing_toolbox::room::{InsulationLevel, RoomInput, UnitType};
use hvac_sizing_toolbox::selector::{IndoorSelection, SingleZoneSelection};
use hvac_sizing_toolbox::session::{
    CalculatorSession, CalculatorSettings, RoomRecommendation, SessionState, SystemType,
};

fn office() -> RoomInput {
    RoomInput {
        name: "Office".into(),
        area_sq_ft: 400.0,
        ceiling_height_ft: 10.0,
        window_count: 3,
        door_count: 2,
        insulation: InsulationLevel::Poor,
        unit_type: UnitType::SlimDuct,
    }
}

#[test]
fn single_zone_calculation_walks_through_states() {
    let catalog = Catalog::builtin();
    let mut session = CalculatorSession::new(CalculatorSettings {
        seer_tiers: vec![20, 22, 25],
        ..Default::default()
    });
    assert_eq!(session.state(), SessionState::Uninitialized);

    assert!(session.update_room(0, office()));
    assert_eq!(session.state(), SessionState::Editing);

    let report = session.calculate(&catalog);
    assert_eq!(report.total_btu, 19_180);
    assert!(report.outdoor.is_none());
    let room = &report.rooms[0];
    assert_eq!(room.label, "Office");
    match &room.recommendation {
        RoomRecommendation::Single { tiers } => {
            let seers: Vec<u32> = tiers.iter().map(|(s, _)| *s).collect();
            assert_eq!(seers, vec![20, 22, 25]);
            assert!(tiers
                .iter()
                .all(|(_, sel)| matches!(sel, SingleZoneSelection::Model { nearest_btu: 18_000, .. })));
        }
        other => panic!("unexpected recommendation: {other:?}"),
    }
    assert_eq!(session.state(), SessionState::Calculated);
    assert!(session.report().is_some());
}

#[test]
fn editing_discards_previous_report() {
    let catalog = Catalog::builtin();
    let mut session = CalculatorSession::default();
    session.update_room(0, office());
    session.calculate(&catalog);

    session.set_variant(FormulaVariant::Multiplicative);
    assert_eq!(session.state(), SessionState::Editing);
    assert!(session.report().is_none());

    let report = session.calculate(&catalog);
    // (400*10*5 + 3*100 + 2*50) * 1.2
    assert_eq!(report.total_btu, 24_480);
}

#[test]
fn out_of_range_room_index_is_ignored() {
    let mut session = CalculatorSession::default();
    assert!(!session.update_room(3, office()));
    assert_eq!(session.state(), SessionState::Uninitialized);
}

#[test]
fn multi_zone_report_has_indoor_and_outdoor() {
    let catalog = Catalog::builtin();
    let mut session = CalculatorSession::default();
    session.set_system_type(SystemType::Multi);
    session.set_zone(ClimateZone::North);
    let den = RoomInput {
        area_sq_ft: 300.0,
        ceiling_height_ft: 8.0,
        unit_type: UnitType::HighWall,
        ..Default::default()
    };
    session.update_room(0, office());
    session.update_room(1, den);

    let report = session.calculate(&catalog);
    assert_eq!(report.rooms[1].label, "Room 2");
    assert_eq!(report.rooms[1].btu, 7_500);
    assert_eq!(report.total_btu, 19_180 + 7_500);
    match &report.rooms[0].recommendation {
        RoomRecommendation::Multi { indoor } => {
            assert_eq!(
                indoor,
                &IndoorSelection::Model {
                    sku: "AFEB18HP230V1SD".into(),
                    nearest_btu: 18_000
                }
            );
        }
        other => panic!("unexpected recommendation: {other:?}"),
    }
    let outdoor = report.outdoor.as_ref().expect("multi zone has outdoor list");
    assert_eq!(outdoor[0].sku, "ASUM24HPMULO");
}

#[test]
fn reset_returns_to_single_zone_defaults() {
    let mut session = CalculatorSession::new(CalculatorSettings {
        default_zone: ClimateZone::North,
        ..Default::default()
    });
    session.set_system_type(SystemType::Multi);
    session.set_room_count(4);
    session.set_zone(ClimateZone::South);
    session.reset();
    assert_eq!(session.system(), SystemType::Single);
    assert_eq!(session.zone(), ClimateZone::North);
    assert_eq!(session.rooms().len(), 1);
    assert_eq!(session.state(), SessionState::Uninitialized);
}
