//! Static game data: resources, unit definitions and skill definitions.
//!
//! The catalog is loaded once from configuration (or built-in defaults) and
//! is read-only afterwards.

use crate::error::{Result, SkirmishError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::time::Duration;

/// In-game resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Gold,
    Wood,
    Stone,
}

impl ResourceKind {
    /// All resource kinds in display order.
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Gold, ResourceKind::Wood, ResourceKind::Stone];

    /// Returns the display name for this resource.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Gold => "Gold",
            Self::Wood => "Wood",
            Self::Stone => "Stone",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Amount of each resource owned by one player.
pub type ResourceBank = BTreeMap<ResourceKind, i64>;

/// A resource amount, used for costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceValue {
    pub resource: ResourceKind,
    pub amount: i64,
}

impl ResourceValue {
    pub const fn new(resource: ResourceKind, amount: i64) -> Self {
        Self { resource, amount }
    }
}

/// Whether a unit definition describes a building or a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Building,
    Character,
}

/// Ground footprint of a unit (x and z extents).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub x: f32,
    pub z: f32,
}

impl Default for Footprint {
    fn default() -> Self {
        Self { x: 1.0, z: 1.0 }
    }
}

fn default_field_of_view() -> f32 {
    8.0
}

/// Definition of a building or character type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitData {
    /// Reference code (e.g. "house", "soldier").
    pub code: String,
    /// Display name.
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: UnitKind,
    #[serde(default)]
    pub cost: Vec<ResourceValue>,
    /// Resources produced per production tick.
    #[serde(default)]
    pub production: BTreeMap<ResourceKind, i64>,
    /// Skill codes available to units of this type.
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub footprint: Footprint,
    #[serde(default = "default_field_of_view")]
    pub field_of_view: f32,
}

impl UnitData {
    /// Returns true if the bank holds enough of every resource in the cost.
    pub fn can_buy(&self, bank: &ResourceBank) -> bool {
        self.cost
            .iter()
            .all(|c| bank.get(&c.resource).copied().unwrap_or(0) >= c.amount)
    }
}

/// What a skill does when its cast completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillType {
    /// Spawn a character next to the casting unit.
    InstantiateCharacter,
}

/// Definition of a unit skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillData {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub skill_type: SkillType,
    /// Character code spawned by `InstantiateCharacter` skills.
    #[serde(default)]
    pub unit_reference: Option<String>,
    /// Cast time in seconds.
    #[serde(default)]
    pub cast_time: f32,
    /// Cooldown in seconds.
    #[serde(default)]
    pub cooldown: f32,
    #[serde(default)]
    pub on_start_sound: Option<String>,
    #[serde(default)]
    pub on_end_sound: Option<String>,
}

impl SkillData {
    /// Cast time as a duration (negative values count as zero).
    pub fn cast_duration(&self) -> Duration {
        seconds(self.cast_time)
    }

    /// Cooldown as a duration (negative values count as zero).
    pub fn cooldown_duration(&self) -> Duration {
        seconds(self.cooldown)
    }
}

/// NaN and negative values map to zero, overflow saturates.
fn seconds(value: f32) -> Duration {
    if value.is_nan() || value <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f32(value).unwrap_or(Duration::MAX)
}

/// All unit and skill definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub buildings: Vec<UnitData>,
    pub characters: Vec<UnitData>,
    pub skills: Vec<SkillData>,
}

impl Catalog {
    /// Looks up a building by code.
    pub fn building(&self, code: &str) -> Option<&UnitData> {
        self.buildings.iter().find(|b| b.code == code)
    }

    /// Looks up a character by code.
    pub fn character(&self, code: &str) -> Option<&UnitData> {
        self.characters.iter().find(|c| c.code == code)
    }

    /// Looks up any unit (building or character) by code.
    pub fn unit(&self, code: &str) -> Option<&UnitData> {
        self.building(code).or_else(|| self.character(code))
    }

    /// Looks up a skill by code.
    pub fn skill(&self, code: &str) -> Option<&SkillData> {
        self.skills.iter().find(|s| s.code == code)
    }

    /// Checks codes are unique and every reference resolves.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for unit in self.buildings.iter().chain(&self.characters) {
            if !seen.insert(unit.code.as_str()) {
                return Err(SkirmishError::config(format!(
                    "duplicate unit code '{}'",
                    unit.code
                )));
            }
        }
        for building in &self.buildings {
            if building.kind != UnitKind::Building {
                return Err(SkirmishError::config(format!(
                    "'{}' is listed as a building but has kind {:?}",
                    building.code, building.kind
                )));
            }
        }
        for character in &self.characters {
            if character.kind != UnitKind::Character {
                return Err(SkirmishError::config(format!(
                    "'{}' is listed as a character but has kind {:?}",
                    character.code, character.kind
                )));
            }
        }

        let mut skill_codes = HashSet::new();
        for skill in &self.skills {
            if !skill_codes.insert(skill.code.as_str()) {
                return Err(SkirmishError::config(format!(
                    "duplicate skill code '{}'",
                    skill.code
                )));
            }
            for (label, value) in [("cast_time", skill.cast_time), ("cooldown", skill.cooldown)] {
                if !value.is_finite() || value < 0.0 {
                    return Err(SkirmishError::config(format!(
                        "skill '{}' has invalid {label} {value}",
                        skill.code
                    )));
                }
            }
            match (skill.skill_type, skill.unit_reference.as_deref()) {
                (SkillType::InstantiateCharacter, Some(code)) if self.character(code).is_some() => {}
                (SkillType::InstantiateCharacter, Some(code)) => {
                    return Err(SkirmishError::config(format!(
                        "skill '{}' references unknown character '{}'",
                        skill.code, code
                    )));
                }
                (SkillType::InstantiateCharacter, None) => {
                    return Err(SkirmishError::config(format!(
                        "skill '{}' needs a unit_reference",
                        skill.code
                    )));
                }
            }
        }

        for unit in self.buildings.iter().chain(&self.characters) {
            if let Some(missing) = unit.skills.iter().find(|s| self.skill(s).is_none()) {
                return Err(SkirmishError::config(format!(
                    "unknown skill '{}' on unit '{}'",
                    missing, unit.code
                )));
            }
        }

        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        use ResourceKind::{Gold, Stone, Wood};

        let building = |code: &str, name: &str, description: &str| UnitData {
            code: code.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            kind: UnitKind::Building,
            cost: Vec::new(),
            production: BTreeMap::new(),
            skills: Vec::new(),
            footprint: Footprint { x: 3.0, z: 3.0 },
            field_of_view: 12.0,
        };
        let character = |code: &str, name: &str, description: &str| UnitData {
            code: code.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            kind: UnitKind::Character,
            cost: Vec::new(),
            production: BTreeMap::new(),
            skills: Vec::new(),
            footprint: Footprint::default(),
            field_of_view: default_field_of_view(),
        };

        let buildings = vec![
            UnitData {
                cost: vec![ResourceValue::new(Gold, 100), ResourceValue::new(Wood, 50)],
                production: BTreeMap::from([(Gold, 3)]),
                skills: vec!["train_soldier".to_string()],
                ..building("house", "House", "Shelters villagers and trains soldiers.")
            },
            UnitData {
                cost: vec![ResourceValue::new(Gold, 80), ResourceValue::new(Wood, 120)],
                production: BTreeMap::from([(Wood, 5)]),
                ..building("sawmill", "Sawmill", "Produces wood over time.")
            },
            UnitData {
                cost: vec![ResourceValue::new(Gold, 150), ResourceValue::new(Stone, 100)],
                skills: vec!["train_archer".to_string()],
                field_of_view: 20.0,
                ..building("tower", "Tower", "Watches over the surroundings and trains archers.")
            },
        ];

        let characters = vec![
            UnitData {
                cost: vec![ResourceValue::new(Gold, 40)],
                ..character("soldier", "Soldier", "Basic melee unit.")
            },
            UnitData {
                cost: vec![ResourceValue::new(Gold, 50), ResourceValue::new(Wood, 20)],
                field_of_view: 12.0,
                ..character("archer", "Archer", "Ranged unit with a wide field of view.")
            },
            UnitData {
                cost: vec![ResourceValue::new(Gold, 120), ResourceValue::new(Stone, 30)],
                ..character("knight", "Knight", "Heavy melee unit.")
            },
        ];

        let skills = vec![
            SkillData {
                code: "train_soldier".to_string(),
                name: "Train Soldier".to_string(),
                description: "Trains a soldier next to this building.".to_string(),
                skill_type: SkillType::InstantiateCharacter,
                unit_reference: Some("soldier".to_string()),
                cast_time: 1.0,
                cooldown: 5.0,
                on_start_sound: Some("train_start".to_string()),
                on_end_sound: Some("train_end".to_string()),
            },
            SkillData {
                code: "train_archer".to_string(),
                name: "Train Archer".to_string(),
                description: "Trains an archer next to this building.".to_string(),
                skill_type: SkillType::InstantiateCharacter,
                unit_reference: Some("archer".to_string()),
                cast_time: 2.0,
                cooldown: 8.0,
                on_start_sound: None,
                on_end_sound: Some("train_end".to_string()),
            },
        ];

        Self {
            buildings,
            characters,
            skills,
        }
    }
}
