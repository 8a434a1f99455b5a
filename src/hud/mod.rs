//! HUD view-model.
//!
//! Mirrors the in-game UI: resource counters, building menu, info panel,
//! selected-units list, selected-unit menu and settings panel. The HUD keeps
//! cached state that is refreshed from game events, which it drains once per
//! frame; widgets only read it.

pub mod buildings;
pub mod resources;
pub mod selection;
pub mod settings;

use crate::game::events::{
    EventPayload, CHECK_BUILDING_BUTTONS, DESELECT_UNIT, SELECT_UNIT, SKILL_READY,
    UPDATE_RESOURCE_TEXTS,
};
use crate::game::{EventBus, GameState, Subscription, UnitId};
use crate::skills::SkillSystem;
use buildings::{BuildingMenu, InfoPanel};
use resources::ResourceCounters;
use selection::{SelectedUnitMenu, SelectedUnitsList};
use settings::SettingsPanel;
use tracing::trace;

/// Events the HUD listens to.
const HUD_EVENTS: [&str; 5] = [
    UPDATE_RESOURCE_TEXTS,
    CHECK_BUILDING_BUTTONS,
    SELECT_UNIT,
    DESELECT_UNIT,
    SKILL_READY,
];

/// The HUD.
#[derive(Debug)]
pub struct Hud {
    pub resources: ResourceCounters,
    pub building_menu: BuildingMenu,
    pub info_panel: InfoPanel,
    pub selected_units: SelectedUnitsList,
    pub unit_menu: SelectedUnitMenu,
    pub settings: SettingsPanel,
    /// Index of the building shown in the info panel.
    hovered: Option<usize>,
    subscription: Subscription,
}

impl Hud {
    /// Builds the HUD from the current game state and subscribes to its events.
    pub fn new(game: &GameState, events: &mut EventBus) -> Self {
        let bank = game.my_bank();
        Self {
            resources: ResourceCounters::new(&bank),
            building_menu: BuildingMenu::new(&game.catalog, &bank),
            info_panel: InfoPanel::default(),
            selected_units: SelectedUnitsList::default(),
            unit_menu: SelectedUnitMenu::default(),
            settings: SettingsPanel::default(),
            hovered: None,
            subscription: events.subscribe(&HUD_EVENTS),
        }
    }

    /// Applies pending events. Returns how many were handled.
    pub fn process_events(&mut self, game: &GameState, skills: &SkillSystem) -> usize {
        let events = self.subscription.drain();
        let count = events.len();

        for event in events {
            trace!(name = %event.name, "HUD event");
            match (event.name.as_str(), event.payload) {
                (UPDATE_RESOURCE_TEXTS, _) => {
                    let bank = game.my_bank();
                    self.resources.refresh(&bank);
                    self.building_menu.check(&game.catalog, &bank);
                }
                (CHECK_BUILDING_BUTTONS, _) => {
                    self.building_menu.check(&game.catalog, &game.my_bank());
                }
                (SELECT_UNIT, EventPayload::Unit(id)) => self.on_select(id, game, skills),
                (DESELECT_UNIT, EventPayload::Text(code)) => {
                    self.selected_units.remove(&code);
                    self.unit_menu.follow_selection(game, skills);
                }
                (SKILL_READY, _) => self.unit_menu.refresh_skills(skills),
                _ => {}
            }
        }

        // Casting starts without an event.
        self.unit_menu.refresh_skills(skills);
        count
    }

    fn on_select(&mut self, id: UnitId, game: &GameState, skills: &SkillSystem) {
        if let Some(unit) = game.unit(id) {
            self.selected_units.add(unit);
            self.unit_menu.set_unit(unit, skills);
        }
    }

    /// Shows the info panel for the building at `index` in the menu.
    pub fn hover_building(&mut self, index: usize, game: &GameState) {
        let data = self
            .building_menu
            .buttons
            .get(index)
            .and_then(|b| game.catalog.building(&b.code));
        if let Some(data) = data {
            self.info_panel.show(data, &game.my_bank());
            self.hovered = Some(index);
        }
    }

    /// Cycles the hovered building; hides the panel after the last one.
    pub fn hover_next_building(&mut self, game: &GameState) {
        let next = self.hovered.map_or(0, |i| i + 1);
        if next >= self.building_menu.buttons.len() {
            self.unhover_building();
        } else {
            self.hover_building(next, game);
        }
    }

    /// Index of the building shown in the info panel.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn unhover_building(&mut self) {
        self.info_panel.hide();
        self.hovered = None;
    }
}

/// Adds a unit to the selection and publishes `SelectUnit`.
pub fn select_unit(game: &mut GameState, events: &mut EventBus, id: UnitId) -> bool {
    if !game.select(id) {
        return false;
    }
    events.publish(SELECT_UNIT, EventPayload::Unit(id));
    true
}

/// Removes a unit from the selection and publishes `DeselectUnit` with its code.
pub fn deselect_unit(game: &mut GameState, events: &mut EventBus, id: UnitId) -> bool {
    let Some(code) = game.unit(id).map(|u| u.code.clone()) else {
        return false;
    };
    if !game.deselect(id) {
        return false;
    }
    events.publish(DESELECT_UNIT, EventPayload::Text(code));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::game::{Position, ResourceKind};
    use pretty_assertions::assert_eq;

    struct Fixture {
        game: GameState,
        events: EventBus,
        skills: SkillSystem,
        hud: Hud,
    }

    fn fixture() -> Fixture {
        let game = GameState::from_config(&Config::default()).unwrap();
        let mut events = EventBus::new();
        let mut skills = SkillSystem::new();
        skills.sync_units(&game);
        let hud = Hud::new(&game, &mut events);
        Fixture {
            game,
            events,
            skills,
            hud,
        }
    }

    #[test]
    fn test_resource_texts_refresh_on_event() {
        let mut fx = fixture();
        assert_eq!(fx.hud.resources.text(ResourceKind::Gold), "500");

        fx.game.add_resource(0, ResourceKind::Gold, 25);
        fx.hud.process_events(&fx.game, &fx.skills);
        assert_eq!(fx.hud.resources.text(ResourceKind::Gold), "500");

        fx.events.trigger(UPDATE_RESOURCE_TEXTS);
        assert_eq!(fx.hud.process_events(&fx.game, &fx.skills), 1);
        assert_eq!(fx.hud.resources.text(ResourceKind::Gold), "525");
    }

    #[test]
    fn test_building_buttons_follow_resources() {
        let mut fx = fixture();
        assert!(!fx.hud.building_menu.button("tower").unwrap().enabled);

        fx.game.add_resource(0, ResourceKind::Stone, 100);
        fx.events.trigger(CHECK_BUILDING_BUTTONS);
        fx.hud.process_events(&fx.game, &fx.skills);
        assert!(fx.hud.building_menu.button("tower").unwrap().enabled);
    }

    #[test]
    fn test_select_and_deselect_update_panels() {
        let mut fx = fixture();
        let house = fx.game.units()[0].id;
        let soldier = fx
            .game
            .spawn_unit("soldier", 0, Position::default())
            .unwrap();

        assert!(select_unit(&mut fx.game, &mut fx.events, house));
        assert!(select_unit(&mut fx.game, &mut fx.events, soldier));
        assert!(!select_unit(&mut fx.game, &mut fx.events, soldier));
        fx.hud.process_events(&fx.game, &fx.skills);
        assert_eq!(fx.hud.selected_units.total(), 2);
        assert_eq!(fx.hud.unit_menu.title, "Soldier");

        assert!(deselect_unit(&mut fx.game, &mut fx.events, soldier));
        fx.hud.process_events(&fx.game, &fx.skills);
        assert_eq!(fx.hud.unit_menu.title, "House");
        assert_eq!(fx.hud.unit_menu.skills.len(), 1);

        deselect_unit(&mut fx.game, &mut fx.events, house);
        fx.hud.process_events(&fx.game, &fx.skills);
        assert!(!fx.hud.unit_menu.visible);
        assert!(fx.hud.selected_units.entries.is_empty());
    }

    #[test]
    fn test_hover_next_building_cycles() {
        let mut fx = fixture();

        fx.hud.hover_next_building(&fx.game);
        assert_eq!(fx.hud.info_panel.title, "House");
        fx.hud.hover_next_building(&fx.game);
        fx.hud.hover_next_building(&fx.game);
        assert_eq!(fx.hud.info_panel.title, "Tower");
        fx.hud.hover_next_building(&fx.game);
        assert!(!fx.hud.info_panel.visible);
        fx.hud.hover_next_building(&fx.game);
        assert_eq!(fx.hud.info_panel.title, "House");
    }
}
