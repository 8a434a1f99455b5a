//! Debug console dispatch through a full session.

use super::{session, submit};
use pretty_assertions::assert_eq;
use skirmish::commands::DispatchError;
use skirmish::console::{DisplayState, LogLevel};
use skirmish::game::{ResourceKind, UnitFormationType};

#[test]
fn test_add_gold_updates_bank_and_hud() {
    let mut s = session();
    let result = submit(&mut s, "add_gold 250");

    assert_eq!(result, Some(Ok("add_gold".to_string())));
    let player = s.game.my_player_id;
    assert_eq!(s.game.resource_amount(player, ResourceKind::Gold), 750);
    assert_eq!(
        s.hud.resources.iter().find(|(k, _)| *k == ResourceKind::Gold).map(|(_, t)| t.to_string()),
        Some("750".to_string())
    );
    assert!(s.console.input.is_empty());
}

#[test]
fn test_negative_gold_is_accepted() {
    let mut s = session();
    submit(&mut s, "add_gold -600");
    let player = s.game.my_player_id;
    assert_eq!(s.game.resource_amount(player, ResourceKind::Gold), -100);
}

#[test]
fn test_missing_argument_is_reported_and_input_kept() {
    let mut s = session();
    let result = submit(&mut s, "add_gold");

    assert_eq!(
        result,
        Some(Err(DispatchError::MissingArgument {
            name: "add_gold".to_string(),
            expected: 1,
            found: 0,
        }))
    );
    let last = s.console.log.last().expect("error line logged");
    assert_eq!(last.level, LogLevel::Error);
    assert_eq!(last.text, "Missing parameter! 'add_gold' expects 1, got 0");
    assert_eq!(s.console.input.text, "add_gold");
}

#[test]
fn test_unknown_command_is_silent() {
    let mut s = session();
    let before = s.console.log.len();
    let result = submit(&mut s, "teleport 3");

    assert!(matches!(
        result,
        Some(Err(DispatchError::UnknownCommand { ref name })) if name == "teleport"
    ));
    assert_eq!(s.console.log.len(), before);
}

#[test]
fn test_command_names_are_case_insensitive() {
    let mut s = session();
    assert_eq!(submit(&mut s, "ADD_GOLD 10"), Some(Ok("add_gold".to_string())));
}

#[test]
fn test_empty_input_does_nothing() {
    let mut s = session();
    assert_eq!(submit(&mut s, ""), None);
}

#[test]
fn test_help_then_typing_returns_to_idle() {
    let mut s = session();
    submit(&mut s, "?");
    assert_eq!(s.console.display, DisplayState::ShowHelp);
    assert_eq!(s.overlay_lines().len(), 5);

    s.console.input.insert('a');
    s.update();
    assert_eq!(s.console.display, DisplayState::Idle);
}

#[test]
fn test_autocomplete_lists_matching_commands() {
    let mut s = session();
    s.console.input.insert_str("s");
    s.update();
    assert!(s.console.request_autocomplete());
    s.update();

    assert_eq!(s.console.display, DisplayState::ShowAutocomplete);
    let lines = s.overlay_lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("spawn_units <code> <amount>"));
    assert!(lines[1].starts_with("set_unit_formation_type <formation_index>"));
}

#[test]
fn test_spawn_units_adds_characters() {
    let mut s = session();
    let before = s.game.units().len();
    submit(&mut s, "spawn_units soldier 3");

    let soldiers = s.game.units().iter().filter(|u| u.code == "soldier").count();
    assert_eq!(soldiers, 3);
    assert_eq!(s.game.units().len(), before + 3);
}

#[test]
fn test_spawn_units_max_amount_fills_area() {
    let mut s = session();
    let result = submit(&mut s, "spawn_units soldier 2147483647");

    assert_eq!(result, Some(Ok("spawn_units".to_string())));
    let soldiers = s.game.units().iter().filter(|u| u.code == "soldier").count();
    assert!(soldiers > 0);
    assert!(soldiers < 1000);
    assert_eq!(
        s.console.log.last().map(|l| l.text.clone()),
        Some(format!("Spawned {soldiers} x soldier"))
    );
}

#[test]
fn test_spawn_units_bad_amount_is_reported() {
    let mut s = session();
    let result = submit(&mut s, "spawn_units soldier many");

    assert!(matches!(
        result,
        Some(Err(DispatchError::ArgumentTypeMismatch { reported: true, .. }))
    ));
    assert_eq!(
        s.console.log.last().map(|l| l.level),
        Some(LogLevel::Error)
    );
}

#[test]
fn test_formation_index() {
    let mut s = session();
    submit(&mut s, "set_unit_formation_type 3");
    assert_eq!(s.game.formation, UnitFormationType::XCross);

    submit(&mut s, "set_unit_formation_type 9");
    assert_eq!(s.game.formation, UnitFormationType::XCross);
    assert_eq!(s.console.log.last().map(|l| l.level), Some(LogLevel::Warning));
}

#[test]
fn test_toggle_fov_flips_parameter() {
    let mut s = session();
    let before = s.game.parameters.bool("enable_fov").unwrap_or(false);
    submit(&mut s, "toggle_fov");
    assert_eq!(s.game.parameters.bool("enable_fov"), Some(!before));
}
