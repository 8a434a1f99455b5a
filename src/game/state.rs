//! The game-state store.
//!
//! Holds everything the console commands, skills and HUD read or write:
//! per-player resources, game parameters, the unit roster, the selection and
//! the global formation type. All mutation happens on the main loop.

use super::catalog::{Catalog, Footprint, ResourceBank, ResourceKind, UnitKind};
use super::parameters::ParameterStore;
use crate::config::Config;
use crate::error::{Result, SkirmishError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info};

/// Player identifier.
pub type PlayerId = u8;

/// Unique id of a unit instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A point on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub z: f32,
}

impl Position {
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    pub fn distance(&self, other: &Position) -> f32 {
        ((self.x - other.x).powi(2) + (self.z - other.z).powi(2)).sqrt()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.z)
    }
}

/// Global formation used when moving groups of units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum UnitFormationType {
    #[default]
    None,
    Line,
    Grid,
    XCross,
}

impl UnitFormationType {
    pub const ALL: [UnitFormationType; 4] = [Self::None, Self::Line, Self::Grid, Self::XCross];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Line => "Line",
            Self::Grid => "Grid",
            Self::XCross => "X-Cross",
        }
    }
}

impl TryFrom<i32> for UnitFormationType {
    type Error = i32;

    fn try_from(index: i32) -> std::result::Result<Self, Self::Error> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(index)
    }
}

/// A unit instance on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unit {
    pub id: UnitId,
    pub code: String,
    pub name: String,
    pub kind: UnitKind,
    pub owner: PlayerId,
    pub level: u32,
    pub position: Position,
    pub footprint: Footprint,
    pub production: BTreeMap<ResourceKind, i64>,
    pub skills: Vec<String>,
    pub field_of_view: f32,
    pub fov_enabled: bool,
}

/// The game-state store.
#[derive(Debug)]
pub struct GameState {
    /// The local player.
    pub my_player_id: PlayerId,
    pub resources: BTreeMap<PlayerId, ResourceBank>,
    pub parameters: ParameterStore,
    pub formation: UnitFormationType,
    pub catalog: Catalog,
    /// Point the camera looks at; debug spawns land around it.
    pub camera_focus: Position,
    pub paused: bool,
    units: Vec<Unit>,
    selection: Vec<UnitId>,
    next_unit_id: u32,
}

impl GameState {
    /// Creates an empty world for the local player.
    pub fn new(my_player_id: PlayerId, catalog: Catalog, parameters: ParameterStore) -> Self {
        Self {
            my_player_id,
            resources: BTreeMap::new(),
            parameters,
            formation: UnitFormationType::default(),
            catalog,
            camera_focus: Position::default(),
            paused: false,
            units: Vec::new(),
            selection: Vec::new(),
            next_unit_id: 1,
        }
    }

    /// Builds the initial world from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.catalog.validate()?;
        let parameters = ParameterStore::new(config.parameters.clone())?;
        let game_config = &config.game;

        if game_config.my_player_id >= game_config.players {
            return Err(SkirmishError::config(format!(
                "my_player_id {} is out of range for {} players",
                game_config.my_player_id, game_config.players
            )));
        }

        let mut state = Self::new(game_config.my_player_id, config.catalog.clone(), parameters);
        state.camera_focus = game_config.camera_focus;
        for player in 0..game_config.players {
            let bank = ResourceKind::ALL
                .iter()
                .map(|kind| {
                    let amount = game_config.starting_resources.get(kind).copied().unwrap_or(0);
                    (*kind, amount)
                })
                .collect();
            state.resources.insert(player, bank);
        }

        for initial in &game_config.initial_units {
            let owner = initial.owner.unwrap_or(game_config.my_player_id);
            state
                .spawn_unit(&initial.code, owner, initial.position)
                .ok_or_else(|| {
                    SkirmishError::config(format!("unknown initial unit '{}'", initial.code))
                })?;
        }

        info!(
            player = state.my_player_id,
            units = state.units.len(),
            "Game state initialized"
        );
        Ok(state)
    }

    /// Resources of one player.
    pub fn bank(&self, player: PlayerId) -> Option<&ResourceBank> {
        self.resources.get(&player)
    }

    /// Resources of the local player.
    pub fn my_bank(&self) -> ResourceBank {
        self.bank(self.my_player_id).cloned().unwrap_or_default()
    }

    pub fn resource_amount(&self, player: PlayerId, kind: ResourceKind) -> i64 {
        self.bank(player)
            .and_then(|bank| bank.get(&kind))
            .copied()
            .unwrap_or(0)
    }

    /// Adds (or removes, if negative) an amount. Returns the new amount.
    pub fn add_resource(&mut self, player: PlayerId, kind: ResourceKind, amount: i64) -> i64 {
        let entry = self
            .resources
            .entry(player)
            .or_default()
            .entry(kind)
            .or_insert(0);
        *entry = entry.saturating_add(amount);
        debug!(player, %kind, amount, total = *entry, "Resource changed");
        *entry
    }

    /// Spawns a unit of the catalog type `code`. Returns None for unknown codes.
    pub fn spawn_unit(&mut self, code: &str, owner: PlayerId, position: Position) -> Option<UnitId> {
        let data = self.catalog.unit(code)?;
        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;

        self.units.push(Unit {
            id,
            code: data.code.clone(),
            name: data.name.clone(),
            kind: data.kind,
            owner,
            level: 1,
            position,
            footprint: data.footprint,
            production: data.production.clone(),
            skills: data.skills.clone(),
            field_of_view: data.field_of_view,
            fov_enabled: false,
        });
        debug!(%id, code, owner, %position, "Unit spawned");
        Some(id)
    }

    /// Removes a unit and drops it from the selection.
    pub fn remove_unit(&mut self, id: UnitId) -> Option<Unit> {
        let index = self.units.iter().position(|u| u.id == id)?;
        self.selection.retain(|s| *s != id);
        Some(self.units.remove(index))
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id == id)
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Units owned by the local player.
    pub fn my_units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(move |u| u.owner == self.my_player_id)
    }

    /// Adds a unit to the selection. Returns false if unknown or already selected.
    pub fn select(&mut self, id: UnitId) -> bool {
        if self.unit(id).is_none() || self.selection.contains(&id) {
            return false;
        }
        self.selection.push(id);
        true
    }

    /// Removes a unit from the selection. Returns false if it was not selected.
    pub fn deselect(&mut self, id: UnitId) -> bool {
        let before = self.selection.len();
        self.selection.retain(|s| *s != id);
        self.selection.len() != before
    }

    /// Selected units, oldest first.
    pub fn selection(&self) -> &[UnitId] {
        &self.selection
    }

    /// The most recently selected unit.
    pub fn last_selected(&self) -> Option<&Unit> {
        self.selection.last().and_then(|id| self.unit(*id))
    }
}
