//! Building menu and info panel.

use crate::game::catalog::{Catalog, UnitData};
use crate::game::{ResourceBank, ResourceKind};

/// One entry of the building menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildingButton {
    pub code: String,
    pub name: String,
    /// Affordable with the current resources.
    pub enabled: bool,
}

/// One button per catalog building, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildingMenu {
    pub buttons: Vec<BuildingButton>,
}

impl BuildingMenu {
    pub fn new(catalog: &Catalog, bank: &ResourceBank) -> Self {
        let buttons = catalog
            .buildings
            .iter()
            .map(|data| BuildingButton {
                code: data.code.clone(),
                name: data.name.clone(),
                enabled: data.can_buy(bank),
            })
            .collect();
        Self { buttons }
    }

    /// Re-checks affordability of every building.
    pub fn check(&mut self, catalog: &Catalog, bank: &ResourceBank) {
        for button in &mut self.buttons {
            button.enabled = catalog
                .building(&button.code)
                .is_some_and(|data| data.can_buy(bank));
        }
    }

    pub fn button(&self, code: &str) -> Option<&BuildingButton> {
        self.buttons.iter().find(|b| b.code == code)
    }
}

/// A cost line of the info panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostLine {
    pub resource: ResourceKind,
    pub amount: i64,
    /// False when the player holds less than `amount`.
    pub affordable: bool,
}

/// Details of the hovered building.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoPanel {
    pub visible: bool,
    pub title: String,
    pub description: String,
    pub costs: Vec<CostLine>,
}

impl InfoPanel {
    /// Fills the panel from a unit type and shows it.
    ///
    /// An empty code or description keeps the previous text.
    pub fn show(&mut self, data: &UnitData, bank: &ResourceBank) {
        if !data.code.is_empty() {
            self.title = data.name.clone();
        }
        if !data.description.is_empty() {
            self.description = data.description.clone();
        }
        self.costs = data
            .cost
            .iter()
            .map(|c| CostLine {
                resource: c.resource,
                amount: c.amount,
                affordable: bank.get(&c.resource).copied().unwrap_or(0) >= c.amount,
            })
            .collect();
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bank(gold: i64, wood: i64, stone: i64) -> ResourceBank {
        ResourceBank::from([
            (ResourceKind::Gold, gold),
            (ResourceKind::Wood, wood),
            (ResourceKind::Stone, stone),
        ])
    }

    #[test]
    fn test_menu_tracks_affordability() {
        let catalog = Catalog::default();
        let mut menu = BuildingMenu::new(&catalog, &bank(100, 50, 0));

        assert!(menu.button("house").unwrap().enabled);
        assert!(!menu.button("sawmill").unwrap().enabled);
        assert!(!menu.button("tower").unwrap().enabled);

        menu.check(&catalog, &bank(1000, 1000, 1000));
        assert!(menu.buttons.iter().all(|b| b.enabled));
    }

    #[test]
    fn test_info_panel_flags_unaffordable_costs() {
        let catalog = Catalog::default();
        let mut panel = InfoPanel::default();

        panel.show(catalog.building("house").unwrap(), &bank(100, 10, 0));
        assert!(panel.visible);
        assert_eq!(panel.title, "House");
        assert_eq!(
            panel.costs,
            vec![
                CostLine {
                    resource: ResourceKind::Gold,
                    amount: 100,
                    affordable: true
                },
                CostLine {
                    resource: ResourceKind::Wood,
                    amount: 50,
                    affordable: false
                },
            ]
        );

        panel.hide();
        assert!(!panel.visible);
    }

    #[test]
    fn test_info_panel_keeps_text_for_blank_fields() {
        let catalog = Catalog::default();
        let mut panel = InfoPanel::default();
        panel.show(catalog.building("tower").unwrap(), &bank(0, 0, 0));

        let mut blank = catalog.building("house").unwrap().clone();
        blank.description.clear();
        panel.show(&blank, &bank(0, 0, 0));
        assert_eq!(panel.title, "House");
        assert!(panel.description.contains("archers"));
    }
}
