//! Game settings panel.
//!
//! Lists parameter groups that have at least one field shown in game. The
//! content area shows the fields of the selected group with an editor derived
//! from each field: a toggle for booleans, a slider for ranged numbers and no
//! editor for unranged numbers.

use crate::error::Result;
use crate::game::events::{EventBus, PAUSE_GAME, RESUME_GAME};
use crate::game::parameters::{EditorKind, ParameterStore, ParameterValue};
use crate::game::GameState;
use tracing::debug;

/// Number of slider steps across a parameter's range.
const SLIDER_STEPS: f64 = 20.0;

/// One row of the settings content.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingRow {
    /// Field name.
    pub field: String,
    /// Capitalized label.
    pub label: String,
    pub value: ParameterValue,
    pub editor: EditorKind,
}

/// State of the settings panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPanel {
    pub open: bool,
    /// Index into [`SettingsPanel::menus`].
    pub menu: usize,
    /// Selected row in the content area.
    pub cursor: usize,
}

/// Turns `field_name` into `Field name`.
pub fn capitalize_label(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl SettingsPanel {
    /// Opens or closes the panel, pausing or resuming the game.
    pub fn toggle(&mut self, game: &mut GameState, events: &mut EventBus) -> bool {
        self.open = !self.open;
        game.paused = self.open;
        events.trigger(if self.open { PAUSE_GAME } else { RESUME_GAME });
        debug!(open = self.open, "Settings panel toggled");
        self.open
    }

    /// Names of the groups with fields shown in game.
    pub fn menus(store: &ParameterStore) -> Vec<&str> {
        store
            .groups()
            .iter()
            .filter(|g| g.fields_to_show_in_game().next().is_some())
            .map(|g| g.name.as_str())
            .collect()
    }

    /// Name of the selected group.
    pub fn current_menu<'a>(&self, store: &'a ParameterStore) -> Option<&'a str> {
        Self::menus(store).get(self.menu).copied()
    }

    /// Selects a group by index, resetting the row cursor.
    pub fn select_menu(&mut self, store: &ParameterStore, index: usize) -> bool {
        if index >= Self::menus(store).len() {
            return false;
        }
        self.menu = index;
        self.cursor = 0;
        true
    }

    /// Cycles to the next group.
    pub fn next_menu(&mut self, store: &ParameterStore) {
        let count = Self::menus(store).len();
        if count > 0 {
            self.menu = (self.menu + 1) % count;
            self.cursor = 0;
        }
    }

    /// Rows of the selected group.
    pub fn rows(&self, store: &ParameterStore) -> Vec<SettingRow> {
        let Some(group) = self.current_menu(store).and_then(|name| store.group(name)) else {
            return Vec::new();
        };
        group
            .fields_to_show_in_game()
            .map(|field| SettingRow {
                field: field.name.clone(),
                label: capitalize_label(&field.name),
                value: field.value,
                editor: field.editor(),
            })
            .collect()
    }

    pub fn move_cursor(&mut self, store: &ParameterStore, delta: isize) {
        let count = self.rows(store).len();
        if count == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(count - 1);
    }

    /// Flips the toggle under the cursor. Returns false for other editors.
    pub fn toggle_current(&self, store: &mut ParameterStore, events: &mut EventBus) -> Result<bool> {
        let Some(row) = self.rows(store).into_iter().nth(self.cursor) else {
            return Ok(false);
        };
        let ParameterValue::Bool(current) = row.value else {
            return Ok(false);
        };
        store.set_and_publish(events, &row.field, ParameterValue::Bool(!current))?;
        Ok(true)
    }

    /// Moves the slider under the cursor by `steps`. Returns false for other editors.
    pub fn adjust_current(
        &self,
        store: &mut ParameterStore,
        events: &mut EventBus,
        steps: i32,
    ) -> Result<bool> {
        let Some(row) = self.rows(store).into_iter().nth(self.cursor) else {
            return Ok(false);
        };
        let EditorKind::Slider { min, max } = row.editor else {
            return Ok(false);
        };

        let value = match row.value {
            ParameterValue::Int(i) => {
                let step = ((max - min) / SLIDER_STEPS).round().max(1.0) as i64;
                ParameterValue::Int(i + step * i64::from(steps))
            }
            ParameterValue::Float(f) => {
                ParameterValue::Float(f + (max - min) / SLIDER_STEPS * f64::from(steps))
            }
            ParameterValue::Bool(_) => return Ok(false),
        };
        store.set_and_publish(events, &row.field, value)?;
        Ok(true)
    }
}
