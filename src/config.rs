//! Configuration management for Skirmish.
//!
//! Handles loading configuration from a TOML file: console settings, the
//! initial game setup, the unit/skill catalog and the parameter groups shown
//! in the settings panel. Every section is optional and falls back to the
//! built-in defaults.

use crate::error::{Result, SkirmishError};
use crate::game::catalog::{Catalog, ResourceKind};
use crate::game::parameters::{default_parameter_groups, ParameterGroup, ParameterStore};
use crate::game::state::{PlayerId, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Main configuration structure for Skirmish.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Debug console settings.
    #[serde(default)]
    pub console: ConsoleConfig,

    /// Initial game setup.
    #[serde(default)]
    pub game: GameConfig,

    /// Building, character and skill definitions.
    #[serde(default)]
    pub catalog: Catalog,

    /// Runtime-tunable parameter groups.
    #[serde(default = "default_parameter_groups")]
    pub parameters: Vec<ParameterGroup>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            console: ConsoleConfig::default(),
            game: GameConfig::default(),
            catalog: Catalog::default(),
            parameters: default_parameter_groups(),
        }
    }
}

/// Debug console settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Show the console as soon as the game starts.
    #[serde(default)]
    pub open_on_start: bool,

    /// Lines kept in the console log.
    #[serde(default = "default_max_log_lines")]
    pub max_log_lines: usize,
}

fn default_max_log_lines() -> usize {
    200
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            open_on_start: false,
            max_log_lines: default_max_log_lines(),
        }
    }
}

/// A unit placed on the map at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitialUnit {
    /// Catalog code.
    pub code: String,
    /// Owner; the local player if omitted.
    #[serde(default)]
    pub owner: Option<PlayerId>,
    #[serde(default)]
    pub position: Position,
}

/// Initial game setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Id of the local player.
    #[serde(default)]
    pub my_player_id: PlayerId,

    /// Number of players.
    #[serde(default = "default_players")]
    pub players: PlayerId,

    /// Resources every player starts with.
    #[serde(default = "default_starting_resources")]
    pub starting_resources: BTreeMap<ResourceKind, i64>,

    #[serde(default)]
    pub camera_focus: Position,

    #[serde(default = "default_initial_units")]
    pub initial_units: Vec<InitialUnit>,
}

fn default_players() -> PlayerId {
    2
}

fn default_starting_resources() -> BTreeMap<ResourceKind, i64> {
    BTreeMap::from([
        (ResourceKind::Gold, 500),
        (ResourceKind::Wood, 300),
        (ResourceKind::Stone, 150),
    ])
}

fn default_initial_units() -> Vec<InitialUnit> {
    vec![InitialUnit {
        code: "house".to_string(),
        owner: None,
        position: Position::new(-4.0, 0.0),
    }]
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            my_player_id: 0,
            players: default_players(),
            starting_resources: default_starting_resources(),
            camera_focus: Position::default(),
            initial_units: default_initial_units(),
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skirmish")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file. A missing file yields the defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| SkirmishError::config(format!("Failed to read config file: {e}")))?;

        let config = Self::parse_toml(&content, path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            SkirmishError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }

    /// Checks cross-section consistency.
    pub fn validate(&self) -> Result<()> {
        if self.console.max_log_lines == 0 {
            return Err(SkirmishError::config("console.max_log_lines must be positive"));
        }
        if self.game.players == 0 {
            return Err(SkirmishError::config("game.players must be at least 1"));
        }
        if self.game.my_player_id >= self.game.players {
            return Err(SkirmishError::config(format!(
                "game.my_player_id {} is out of range for {} players",
                self.game.my_player_id, self.game.players
            )));
        }

        self.catalog.validate()?;
        ParameterStore::new(self.parameters.clone())?;

        for unit in &self.game.initial_units {
            if self.catalog.unit(&unit.code).is_none() {
                return Err(SkirmishError::config(format!(
                    "unknown initial unit '{}'",
                    unit.code
                )));
            }
            if unit.owner.is_some_and(|owner| owner >= self.game.players) {
                return Err(SkirmishError::config(format!(
                    "initial unit '{}' has an out-of-range owner",
                    unit.code
                )));
            }
        }
        Ok(())
    }
}
