//! Skill timers driven through a session with paused time.

use super::session;
use skirmish::skills::SkillPhase;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_training_spawns_unit_after_cast_time() {
    let mut s = session();
    let house = s.select_next().expect("house is selectable");
    s.update();

    s.trigger_skill(0).expect("skill is ready");
    s.update();
    assert_eq!(s.skills.manager(house, 0).map(|m| m.phase()), Some(SkillPhase::Casting));
    assert_eq!(s.game.units().len(), 1);

    tokio::time::sleep(Duration::from_millis(500)).await;
    s.update();
    assert_eq!(s.game.units().len(), 1);

    tokio::time::sleep(Duration::from_millis(600)).await;
    s.update();
    assert_eq!(s.game.units().len(), 2);
    assert_eq!(s.game.units()[1].code, "soldier");
    assert_eq!(
        s.skills.manager(house, 0).map(|m| m.phase()),
        Some(SkillPhase::OnCooldown)
    );
}

#[tokio::test(start_paused = true)]
async fn test_trigger_while_busy_is_rejected() {
    let mut s = session();
    s.select_next();
    s.update();

    s.trigger_skill(0).expect("first trigger");
    let err = s.trigger_skill(0).expect_err("skill is casting");
    assert_eq!(err.category(), "Skill Error");

    tokio::time::sleep(Duration::from_millis(1100)).await;
    s.update();
    assert!(s.trigger_skill(0).is_err(), "still on cooldown");

    tokio::time::sleep(Duration::from_millis(5100)).await;
    s.update();
    assert!(s.trigger_skill(0).is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_trigger_without_selection() {
    let mut s = session();
    assert!(s.trigger_skill(0).is_err());
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_cancels_training() {
    let mut s = session();
    let house = s.select_next().expect("house is selectable");
    s.update();
    s.trigger_skill(0).expect("skill is ready");

    s.shutdown();
    tokio::time::sleep(Duration::from_secs(2)).await;
    s.update();

    assert_eq!(s.game.units().len(), 1);
    assert_eq!(s.skills.manager(house, 0).map(|m| m.phase()), Some(SkillPhase::Ready));
}

#[tokio::test(start_paused = true)]
async fn test_trained_units_are_selectable() {
    let mut s = session();
    s.select_next();
    s.update();
    s.trigger_skill(0).expect("skill is ready");

    tokio::time::sleep(Duration::from_millis(1100)).await;
    s.update();

    let soldier = s.select_next().expect("new soldier is selectable");
    s.update();
    assert_eq!(s.hud.selected_units.total(), 2);
    assert_eq!(s.hud.unit_menu.unit, Some(soldier));
    assert!(s.hud.unit_menu.skills.is_empty());
}
