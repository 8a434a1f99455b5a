//! Game session.
//!
//! Ties the game state, event bus, skill timers, HUD and debug console
//! together and runs the per-frame update. Front ends (the interactive TUI
//! and headless mode) drive a [`Session`] and only read it for rendering.

use crate::commands::help::{autocomplete_lines, help_lines};
use crate::commands::{builtin_registry, CommandRouter, DispatchError};
use crate::config::Config;
use crate::console::{ConsoleState, DisplayState};
use crate::error::{Result, SkirmishError};
use crate::game::{EventBus, GameState, UnitId};
use crate::hud::{self, Hud};
use crate::skills::{SkillSignal, SkillSystem};
use tracing::{debug, info, warn};

/// A running game with its console and HUD.
#[derive(Debug)]
pub struct Session {
    pub game: GameState,
    pub events: EventBus,
    pub skills: SkillSystem,
    pub hud: Hud,
    pub console: ConsoleState,
    router: CommandRouter,
}

impl Session {
    /// Builds a session from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let game = GameState::from_config(config)?;
        let mut events = EventBus::new();
        let mut skills = SkillSystem::new();
        skills.sync_units(&game);
        let hud = Hud::new(&game, &mut events);

        let mut console = ConsoleState::new(config.console.max_log_lines);
        if config.console.open_on_start {
            console.open();
        }

        let router = CommandRouter::new(builtin_registry());
        info!(
            commands = router.registry().len(),
            units = game.units().len(),
            "Session started"
        );

        Ok(Self {
            game,
            events,
            skills,
            hud,
            console,
            router,
        })
    }

    pub fn router(&self) -> &CommandRouter {
        &self.router
    }

    /// Dispatches the console input line.
    pub fn submit_console(&mut self) -> Option<std::result::Result<String, DispatchError>> {
        self.console
            .submit(&self.router, &mut self.game, &mut self.events)
    }

    /// Lines of the overlay below the console input, if one is shown.
    pub fn overlay_lines(&self) -> Vec<String> {
        match self.console.display {
            DisplayState::Idle => Vec::new(),
            DisplayState::ShowHelp => help_lines(self.router.registry()),
            DisplayState::ShowAutocomplete => {
                autocomplete_lines(self.router.registry(), &self.console.input.text)
            }
        }
    }

    /// Triggers a skill of the most recently selected unit.
    pub fn trigger_skill(&mut self, slot: usize) -> Result<()> {
        let unit = self
            .game
            .last_selected()
            .map(|u| u.id)
            .ok_or_else(|| SkirmishError::skill("no unit selected"))?;
        self.skills.trigger(unit, slot, &mut self.events)?;
        Ok(())
    }

    /// Selects the first own unit that is not selected yet.
    pub fn select_next(&mut self) -> Option<UnitId> {
        let selection = self.game.selection();
        let next = self
            .game
            .my_units()
            .map(|u| u.id)
            .find(|id| !selection.contains(id))?;
        hud::select_unit(&mut self.game, &mut self.events, next).then_some(next)
    }

    /// Deselects the most recently selected unit.
    pub fn deselect_last(&mut self) -> Option<UnitId> {
        let last = self.game.selection().last().copied()?;
        hud::deselect_unit(&mut self.game, &mut self.events, last).then_some(last)
    }

    /// Opens or closes the settings panel. Returns whether it is open.
    pub fn toggle_settings(&mut self) -> bool {
        self.hud.settings.toggle(&mut self.game, &mut self.events)
    }

    /// Flips the settings toggle under the cursor.
    pub fn settings_toggle(&mut self) {
        let result = self
            .hud
            .settings
            .toggle_current(&mut self.game.parameters, &mut self.events);
        self.report_setting(result);
    }

    /// Moves the settings slider under the cursor.
    pub fn settings_adjust(&mut self, steps: i32) {
        let result =
            self.hud
                .settings
                .adjust_current(&mut self.game.parameters, &mut self.events, steps);
        self.report_setting(result);
    }

    fn report_setting(&mut self, result: Result<bool>) {
        if let Err(e) = result {
            warn!(error = %e, "Setting rejected");
            self.console.log.warning(e.to_string());
        }
    }

    /// Applies a skill timer signal.
    pub fn handle_skill_signal(&mut self, signal: SkillSignal) -> bool {
        self.skills
            .handle_signal(signal, &mut self.game, &mut self.events)
    }

    /// Runs the end-of-frame update: pending skill signals, skill managers
    /// for new units, HUD events and the console overlay check.
    pub fn update(&mut self) {
        let signals = self.skills.process_pending(&mut self.game, &mut self.events);
        self.skills.sync_units(&self.game);
        let handled = self.hud.process_events(&self.game, &self.skills);
        self.console.end_frame();
        if signals > 0 || handled > 0 {
            debug!(signals, handled, "Frame updated");
        }
    }

    /// Cancels running skill timers.
    pub fn shutdown(&mut self) {
        self.skills.cancel_all();
        debug!("Session stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ResourceKind;
    use crate::skills::SkillPhase;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn session() -> Session {
        Session::new(&Config::default()).unwrap()
    }

    fn type_line(session: &mut Session, text: &str) {
        session.console.input.insert_str(text);
        session.update();
    }

    #[test]
    fn test_new_session_from_defaults() {
        let session = session();
        assert!(!session.console.visible);
        assert_eq!(session.router().registry().len(), 5);
        assert_eq!(session.game.units().len(), 1);
        assert_eq!(session.hud.resources.text(ResourceKind::Gold), "500");
    }

    #[test]
    fn test_open_on_start() {
        let mut config = Config::default();
        config.console.open_on_start = true;
        assert!(Session::new(&config).unwrap().console.visible);
    }

    #[test]
    fn test_add_gold_refreshes_hud() {
        let mut session = session();
        type_line(&mut session, "add_gold 250");

        assert_eq!(session.submit_console(), Some(Ok("add_gold".to_string())));
        assert!(session.console.input.is_empty());
        session.update();
        assert_eq!(session.hud.resources.text(ResourceKind::Gold), "750");
    }

    #[test]
    fn test_help_overlay_survives_frame() {
        let mut session = session();
        type_line(&mut session, "?");
        session.submit_console();
        session.update();

        assert_eq!(session.console.display, DisplayState::ShowHelp);
        assert_eq!(session.overlay_lines().len(), 5);

        type_line(&mut session, "a");
        assert_eq!(session.console.display, DisplayState::Idle);
        assert!(session.overlay_lines().is_empty());
    }

    #[test]
    fn test_autocomplete_overlay() {
        let mut session = session();
        type_line(&mut session, "s");
        assert!(session.console.request_autocomplete());
        session.update();

        assert_eq!(
            session.overlay_lines(),
            vec![
                "spawn_units <code> <amount> - Instantiates multiple instances of a character unit (by reference code), using a Poisson disc sampling for random positioning.".to_string(),
                "set_unit_formation_type <formation_index> - Sets the unit formation type (by index).".to_string(),
            ]
        );
    }

    #[test]
    fn test_failed_dispatch_keeps_input() {
        let mut session = session();
        type_line(&mut session, "add_gold");

        let result = session.submit_console().unwrap();
        assert!(matches!(result, Err(DispatchError::MissingArgument { .. })));
        assert_eq!(session.console.input.text, "add_gold");
    }

    #[test]
    fn test_select_next_and_deselect_last() {
        let mut session = session();
        let house = session.select_next().unwrap();
        assert!(session.select_next().is_none());
        session.update();
        assert_eq!(session.hud.unit_menu.title, "House");

        assert_eq!(session.deselect_last(), Some(house));
        session.update();
        assert!(!session.hud.unit_menu.visible);
    }

    #[test]
    fn test_trigger_skill_requires_selection() {
        let mut session = session();
        let err = session.trigger_skill(0).unwrap_err();
        assert_eq!(err.category(), "Skill Error");
    }

    #[test]
    fn test_settings_toggle_pauses() {
        let mut session = session();
        assert!(session.toggle_settings());
        assert!(session.game.paused);
        session.settings_toggle();
        assert_eq!(session.game.parameters.bool("enable_fov"), Some(false));
        assert!(!session.toggle_settings());
        assert!(!session.game.paused);
    }

    #[tokio::test(start_paused = true)]
    async fn test_skill_cycle_through_update() {
        let mut session = session();
        let house = session.select_next().unwrap();
        session.update();
        session.trigger_skill(0).unwrap();
        session.update();
        assert!(!session.hud.unit_menu.skills[0].ready);

        tokio::time::sleep(Duration::from_millis(1100)).await;
        session.update();
        assert_eq!(session.game.units().len(), 2);
        assert_eq!(
            session.skills.manager(house, 0).unwrap().phase(),
            SkillPhase::OnCooldown
        );

        tokio::time::sleep(Duration::from_millis(5100)).await;
        session.update();
        assert!(session.hud.unit_menu.skills[0].ready);
    }
}
