//! Selected-units list and the selected-unit menu.

use crate::game::{GameState, Unit, UnitId};
use crate::skills::SkillSystem;

/// Count of selected units sharing a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedEntry {
    pub code: String,
    pub name: String,
    pub count: u32,
}

/// Selected units grouped by type, in first-selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedUnitsList {
    pub entries: Vec<SelectedEntry>,
}

impl SelectedUnitsList {
    pub fn add(&mut self, unit: &Unit) {
        match self.entries.iter_mut().find(|e| e.code == unit.code) {
            Some(entry) => entry.count += 1,
            None => self.entries.push(SelectedEntry {
                code: unit.code.clone(),
                name: unit.name.clone(),
                count: 1,
            }),
        }
    }

    /// Decrements the count of `code`; the entry goes away at zero.
    pub fn remove(&mut self, code: &str) {
        let Some(index) = self.entries.iter().position(|e| e.code == code) else {
            return;
        };
        let entry = &mut self.entries[index];
        entry.count -= 1;
        if entry.count == 0 {
            self.entries.remove(index);
        }
    }

    pub fn total(&self) -> u32 {
        self.entries.iter().map(|e| e.count).sum()
    }
}

/// A skill button of the selected-unit menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillButton {
    pub slot: usize,
    pub name: String,
    pub ready: bool,
}

/// Details of the most recently selected unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedUnitMenu {
    pub visible: bool,
    pub unit: Option<UnitId>,
    pub title: String,
    pub level: String,
    /// Production lines such as `+3 Gold`.
    pub production: Vec<String>,
    pub skills: Vec<SkillButton>,
}

impl SelectedUnitMenu {
    /// Shows `unit`'s details.
    pub fn set_unit(&mut self, unit: &Unit, skills: &SkillSystem) {
        self.unit = Some(unit.id);
        self.title = unit.name.clone();
        self.level = format!("Level {}", unit.level);
        self.production = unit
            .production
            .iter()
            .map(|(kind, amount)| format!("+{amount} {kind}"))
            .collect();
        self.refresh_skills(skills);
        self.visible = true;
    }

    /// Re-reads the ready flag of every skill button.
    pub fn refresh_skills(&mut self, skills: &SkillSystem) {
        self.skills = self
            .unit
            .map(|id| {
                skills
                    .managers(id)
                    .iter()
                    .enumerate()
                    .map(|(slot, manager)| SkillButton {
                        slot,
                        name: manager.skill().name.clone(),
                        ready: manager.is_ready(),
                    })
                    .collect()
            })
            .unwrap_or_default();
    }

    /// Shows the last selected unit, or hides the menu when nothing is selected.
    pub fn follow_selection(&mut self, game: &GameState, skills: &SkillSystem) {
        match game.last_selected() {
            Some(unit) => self.set_unit(unit, skills),
            None => self.hide(),
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.unit = None;
        self.skills.clear();
    }
}
