//! Game cheat commands (toggle_fov, add_gold, spawn_units, set_unit_formation_type).

use super::CommandContext;
use crate::game::events::{EventPayload, CHECK_BUILDING_BUTTONS, UNITS_SPAWNED, UPDATE_RESOURCE_TEXTS};
use crate::game::parameters::{ParameterValue, ENABLE_FOV};
use crate::game::sampling::sample_positions;
use crate::game::{ResourceKind, UnitFormationType};
use tracing::{info, warn};

/// Minimum distance between units spawned by `spawn_units`.
const SPAWN_RADIUS: f32 = 1.5;
/// Side of the square area around the camera focus used by `spawn_units`.
const SPAWN_AREA: f32 = 15.0;

/// Handle `toggle_fov`.
pub fn toggle_fov(ctx: &mut CommandContext<'_>) {
    let enabled = !ctx.game.parameters.bool(ENABLE_FOV).unwrap_or(false);
    match ctx
        .game
        .parameters
        .set_and_publish(ctx.events, ENABLE_FOV, ParameterValue::Bool(enabled))
    {
        Ok(_) => {
            info!(enabled, "FOV toggled");
            ctx.log
                .info(format!("FOV {}", if enabled { "enabled" } else { "disabled" }));
        }
        Err(e) => {
            warn!(error = %e, "Cannot toggle FOV");
            ctx.log.warning(e.to_string());
        }
    }
}

/// Handle `add_gold <amount>`.
pub fn add_gold(ctx: &mut CommandContext<'_>, amount: i32) {
    let player = ctx.game.my_player_id;
    let total = ctx
        .game
        .add_resource(player, ResourceKind::Gold, i64::from(amount));
    ctx.events.trigger(UPDATE_RESOURCE_TEXTS);
    ctx.events.trigger(CHECK_BUILDING_BUTTONS);

    info!(player, amount, total, "Gold added");
    ctx.log.info(format!("Added {amount} gold ({total} total)"));
}

/// Handle `spawn_units <code> <amount>`.
pub fn spawn_units(ctx: &mut CommandContext<'_>, code: &str, amount: i32) {
    if ctx.game.catalog.character(code).is_none() {
        warn!(code, "Unknown character code");
        ctx.log.warning(format!("Unknown character '{code}'"));
        return;
    }
    let Ok(count) = usize::try_from(amount) else {
        warn!(amount, "Negative spawn amount");
        ctx.log.warning(format!("Cannot spawn {amount} units"));
        return;
    };

    let positions = sample_positions(
        &mut rand::thread_rng(),
        count,
        SPAWN_RADIUS,
        SPAWN_AREA,
        SPAWN_AREA,
        ctx.game.camera_focus,
    );

    let owner = ctx.game.my_player_id;
    let mut spawned = 0;
    for position in positions {
        if let Some(id) = ctx.game.spawn_unit(code, owner, position) {
            if let Some(unit) = ctx.game.unit_mut(id) {
                unit.fov_enabled = true;
            }
            spawned += 1;
        }
    }

    if spawned > 0 {
        ctx.events.publish(UNITS_SPAWNED, EventPayload::Int(spawned));
    }
    if spawned < i64::from(amount) {
        warn!(code, requested = amount, spawned, "Spawn area saturated");
    }
    info!(code, spawned, "Units spawned");
    ctx.log.info(format!("Spawned {spawned} x {code}"));
}

/// Handle `set_unit_formation_type <formation_index>`.
pub fn set_unit_formation_type(ctx: &mut CommandContext<'_>, index: i32) {
    match UnitFormationType::try_from(index) {
        Ok(formation) => {
            ctx.game.formation = formation;
            info!(?formation, "Formation type set");
            ctx.log
                .info(format!("Formation set to {}", formation.display_name()));
        }
        Err(index) => {
            warn!(index, "Formation index out of range");
            ctx.log.warning(format!(
                "Formation index {index} out of range (0..{})",
                UnitFormationType::ALL.len()
            ));
        }
    }
}
