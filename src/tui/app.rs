//! Application state for the TUI.
//!
//! Wraps a [`Session`] with the UI-only state (key help, toasts) and maps
//! key presses to session actions depending on which panel has focus.

use crate::app::Session;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// How long a toast stays on screen.
const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Which panel receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Map and HUD shortcuts.
    #[default]
    World,
    /// Debug console input.
    Console,
    /// Settings panel.
    Settings,
}

/// A transient notification.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    shown_at: Instant,
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    /// Whether the application is still running.
    pub running: bool,
    pub session: Session,
    /// Whether the key help overlay is shown.
    pub show_key_help: bool,
    pub toast: Option<Toast>,
}

impl App {
    /// Creates a new App instance.
    pub fn new(session: Session) -> Self {
        Self {
            running: true,
            session,
            show_key_help: false,
            toast: None,
        }
    }

    /// Panel that receives key presses.
    pub fn focus(&self) -> Focus {
        if self.session.hud.settings.open {
            Focus::Settings
        } else if self.session.console.visible {
            Focus::Console
        } else {
            Focus::World
        }
    }

    /// Shows a toast notification.
    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            shown_at: Instant::now(),
        });
    }

    /// Clears the toast once it has expired.
    pub fn clear_expired_toast(&mut self) {
        if self
            .toast
            .as_ref()
            .is_some_and(|t| t.shown_at.elapsed() >= TOAST_DURATION)
        {
            self.toast = None;
        }
    }

    /// Runs the end-of-frame update.
    pub fn tick(&mut self) {
        self.session.update();
        self.clear_expired_toast();
    }

    /// Handles an event and updates application state.
    pub fn handle_event(&mut self, event: super::Event) {
        use super::Event;

        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize(_, _) => {
                // Terminal resize is handled automatically by ratatui
            }
            Event::Tick => self.clear_expired_toast(),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return;
        }

        if self.show_key_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('?')) {
                self.show_key_help = false;
            }
            return;
        }

        match self.focus() {
            Focus::Console => self.handle_console_key(key),
            Focus::Settings => self.handle_settings_key(key),
            Focus::World => self.handle_world_key(key),
        }
    }

    /// Handles key events when the console is open.
    fn handle_console_key(&mut self, key: KeyEvent) {
        let console = &mut self.session.console;

        match key.code {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('`') => console.close(),
            KeyCode::Enter => {
                if let Some(result) = self.session.submit_console() {
                    match result {
                        Ok(name) => debug!(command = %name, "Console command ran"),
                        Err(e) => debug!(error = %e, "Console command failed"),
                    }
                }
            }
            KeyCode::Tab => {
                console.request_autocomplete();
            }
            KeyCode::Char(c) => console.input.insert(c),
            KeyCode::Backspace => console.input.backspace(),
            KeyCode::Delete => console.input.delete(),
            KeyCode::Left => console.input.move_left(),
            KeyCode::Right => console.input.move_right(),
            KeyCode::Home => console.input.move_home(),
            KeyCode::End => console.input.move_end(),
            _ => {}
        }
    }

    /// Handles key events when the settings panel is open.
    fn handle_settings_key(&mut self, key: KeyEvent) {
        let session = &mut self.session;
        let store = &session.game.parameters;

        match key.code {
            KeyCode::Esc | KeyCode::Char('o') => {
                session.toggle_settings();
            }
            KeyCode::Up => session.hud.settings.move_cursor(store, -1),
            KeyCode::Down => session.hud.settings.move_cursor(store, 1),
            KeyCode::Tab => session.hud.settings.next_menu(store),
            KeyCode::Left => session.settings_adjust(-1),
            KeyCode::Right => session.settings_adjust(1),
            KeyCode::Char(' ') | KeyCode::Enter => session.settings_toggle(),
            KeyCode::Char('q') => self.running = false,
            _ => {}
        }
    }

    /// Handles key events on the map.
    fn handle_world_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::F(1) | KeyCode::Char('`') => self.session.console.open(),
            KeyCode::Char('h') | KeyCode::Char('?') => self.show_key_help = true,
            KeyCode::Char('o') => {
                self.session.toggle_settings();
            }
            KeyCode::Char('s') => {
                if self.session.select_next().is_none() {
                    self.show_toast("No more units to select");
                }
            }
            KeyCode::Char('x') => {
                self.session.deselect_last();
            }
            KeyCode::Char('b') => self.session.hud.hover_next_building(&self.session.game),
            KeyCode::Esc => self.session.hud.unhover_building(),
            KeyCode::Char(c @ '1'..='9') => {
                let slot = c as usize - '1' as usize;
                if let Err(e) = self.session.trigger_skill(slot) {
                    warn!(slot, error = %e, "Skill not triggered");
                    self.show_toast(e.to_string());
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::console::DisplayState;
    use crate::tui::Event;
    use pretty_assertions::assert_eq;

    fn app() -> App {
        App::new(Session::new(&Config::default()).unwrap())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
        app.tick();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_app_new() {
        let app = app();
        assert!(app.running);
        assert_eq!(app.focus(), Focus::World);
        assert!(app.toast.is_none());
    }

    #[test]
    fn test_ctrl_c_quits_from_console() {
        let mut app = app();
        press(&mut app, KeyCode::F(1));
        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(!app.running);
    }

    #[test]
    fn test_console_keys_edit_input() {
        let mut app = app();
        press(&mut app, KeyCode::Char('`'));
        assert_eq!(app.focus(), Focus::Console);

        // World shortcuts are plain text while the console is open.
        type_text(&mut app, "sq");
        assert!(app.running);
        assert_eq!(app.session.console.input.text, "sq");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.session.console.input.text, "s");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focus(), Focus::World);
    }

    #[test]
    fn test_console_help_and_autocomplete() {
        let mut app = app();
        press(&mut app, KeyCode::F(1));
        type_text(&mut app, "?");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.console.display, DisplayState::ShowHelp);
        assert!(app.session.console.input.is_empty());

        type_text(&mut app, "add");
        assert_eq!(app.session.console.display, DisplayState::Idle);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.session.console.display, DisplayState::ShowAutocomplete);
        assert_eq!(app.session.overlay_lines().len(), 1);
    }

    #[test]
    fn test_world_selection_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.session.game.selection().len(), 1);
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(
            app.toast.as_ref().map(|t| t.message.as_str()),
            Some("No more units to select")
        );
        press(&mut app, KeyCode::Char('x'));
        assert!(app.session.game.selection().is_empty());
    }

    #[test]
    fn test_skill_key_without_selection_shows_toast() {
        let mut app = app();
        press(&mut app, KeyCode::Char('1'));
        assert!(app.toast.is_some());
    }

    #[test]
    fn test_settings_focus_and_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.focus(), Focus::Settings);
        assert!(app.session.game.paused);

        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.session.game.parameters.bool("enable_fov"), Some(false));

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Right);
        assert_eq!(
            app.session.game.parameters.get("game_speed"),
            Some(crate::game::ParameterValue::Int(2))
        );

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focus(), Focus::World);
        assert!(!app.session.game.paused);
    }

    #[test]
    fn test_key_help_swallows_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('h'));
        assert!(app.show_key_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_key_help);
    }

    #[test]
    fn test_building_hover_cycle() {
        let mut app = app();
        press(&mut app, KeyCode::Char('b'));
        assert!(app.session.hud.info_panel.visible);
        press(&mut app, KeyCode::Esc);
        assert!(!app.session.hud.info_panel.visible);
    }
}
