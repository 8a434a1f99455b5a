//! Runtime-tunable game parameters.
//!
//! Parameters are grouped into named menus (e.g. "Game", "Sound"). Each field
//! holds a typed value and optionally a range; the settings panel derives its
//! editor from the value type and range.

use super::events::{EventBus, EventPayload};
use crate::error::{Result, SkirmishError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Field name of the fog-of-war toggle.
pub const ENABLE_FOV: &str = "enable_fov";

/// Returns the event name published when a parameter changes.
pub fn parameter_event(field: &str) -> String {
    format!("UpdateGameParameter:{field}")
}

/// A parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl ParameterValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the numeric value for int and float parameters.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Bool(_) => None,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
        }
    }

    /// Converts to the event payload published on change.
    pub fn to_payload(self) -> EventPayload {
        match self {
            Self::Bool(b) => EventPayload::Bool(b),
            Self::Int(i) => EventPayload::Int(i),
            Self::Float(f) => EventPayload::Float(f),
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => f.write_str("on"),
            Self::Bool(false) => f.write_str("off"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v:.2}"),
        }
    }
}

/// Inclusive numeric range for slider parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterRange {
    pub min: f64,
    pub max: f64,
}

/// Editor shown for a parameter in the settings panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorKind {
    Toggle,
    Slider { min: f64, max: f64 },
    /// Numeric field without a range: shown as a label only.
    None,
}

fn default_true() -> bool {
    true
}

/// One named parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterField {
    pub name: String,
    pub value: ParameterValue,
    #[serde(default)]
    pub range: Option<ParameterRange>,
    #[serde(default = "default_true")]
    pub show_in_game: bool,
}

impl ParameterField {
    pub fn new(name: &str, value: ParameterValue) -> Self {
        Self {
            name: name.to_string(),
            value,
            range: None,
            show_in_game: true,
        }
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range = Some(ParameterRange { min, max });
        self
    }

    pub fn hidden(mut self) -> Self {
        self.show_in_game = false;
        self
    }

    /// Editor kind derived from the value type and range.
    pub fn editor(&self) -> EditorKind {
        match (self.value, self.range) {
            (ParameterValue::Bool(_), _) => EditorKind::Toggle,
            (_, Some(range)) => EditorKind::Slider {
                min: range.min,
                max: range.max,
            },
            (_, None) => EditorKind::None,
        }
    }

    /// Coerces `value` into this field's type, clamping to the range.
    fn coerce(&self, value: ParameterValue) -> Option<ParameterValue> {
        let coerced = match (self.value, value) {
            (ParameterValue::Bool(_), ParameterValue::Bool(b)) => ParameterValue::Bool(b),
            (ParameterValue::Int(_), ParameterValue::Int(_) | ParameterValue::Float(_)) => {
                ParameterValue::Int(value.as_f64()? as i64)
            }
            (ParameterValue::Float(_), ParameterValue::Int(_) | ParameterValue::Float(_)) => {
                ParameterValue::Float(value.as_f64()?)
            }
            _ => return None,
        };

        Some(match (coerced, self.range) {
            (ParameterValue::Int(i), Some(r)) => {
                ParameterValue::Int((i as f64).clamp(r.min, r.max) as i64)
            }
            (ParameterValue::Float(f), Some(r)) => ParameterValue::Float(f.clamp(r.min, r.max)),
            (v, _) => v,
        })
    }
}

/// A named menu of parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterGroup {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<ParameterField>,
}

impl ParameterGroup {
    /// Fields visible in the in-game settings panel.
    pub fn fields_to_show_in_game(&self) -> impl Iterator<Item = &ParameterField> {
        self.fields.iter().filter(|f| f.show_in_game)
    }
}

/// Returns the built-in parameter groups.
pub fn default_parameter_groups() -> Vec<ParameterGroup> {
    vec![
        ParameterGroup {
            name: "Game".to_string(),
            fields: vec![
                ParameterField::new(ENABLE_FOV, ParameterValue::Bool(true)),
                ParameterField::new("game_speed", ParameterValue::Int(1)).with_range(1.0, 5.0),
                ParameterField::new("production_rate", ParameterValue::Float(1.0)).hidden(),
            ],
        },
        ParameterGroup {
            name: "Sound".to_string(),
            fields: vec![
                ParameterField::new("music_volume", ParameterValue::Float(0.5))
                    .with_range(0.0, 1.0),
                ParameterField::new("sfx_volume", ParameterValue::Float(0.8)).with_range(0.0, 1.0),
                ParameterField::new("mute", ParameterValue::Bool(false)),
            ],
        },
        ParameterGroup {
            name: "Units".to_string(),
            fields: vec![
                ParameterField::new("formation_spacing", ParameterValue::Float(1.5))
                    .with_range(0.5, 4.0),
                ParameterField::new("max_selection", ParameterValue::Int(24)),
            ],
        },
        ParameterGroup {
            name: "Debug".to_string(),
            fields: vec![ParameterField::new("show_colliders", ParameterValue::Bool(false)).hidden()],
        },
    ]
}

/// All parameter groups, addressed by unique field name.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterStore {
    groups: Vec<ParameterGroup>,
}

impl ParameterStore {
    /// Creates a store, rejecting duplicate group or field names and
    /// ranges that are inverted or not finite.
    pub fn new(groups: Vec<ParameterGroup>) -> Result<Self> {
        let mut group_names = HashSet::new();
        let mut field_names = HashSet::new();
        for group in &groups {
            if !group_names.insert(group.name.as_str()) {
                return Err(SkirmishError::config(format!(
                    "duplicate parameter group '{}'",
                    group.name
                )));
            }
            for field in &group.fields {
                if !field_names.insert(field.name.as_str()) {
                    return Err(SkirmishError::config(format!(
                        "duplicate parameter field '{}'",
                        field.name
                    )));
                }
                if let Some(range) = field.range {
                    if !range.min.is_finite() || !range.max.is_finite() || range.min > range.max {
                        return Err(SkirmishError::config(format!(
                            "parameter field '{}' has invalid range {}..={}",
                            field.name, range.min, range.max
                        )));
                    }
                }
            }
        }
        Ok(Self { groups })
    }

    pub fn groups(&self) -> &[ParameterGroup] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&ParameterGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&ParameterField> {
        self.groups
            .iter()
            .flat_map(|g| g.fields.iter())
            .find(|f| f.name == name)
    }

    pub fn get(&self, name: &str) -> Option<ParameterValue> {
        self.field(name).map(|f| f.value)
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(|v| v.as_bool())
    }

    /// Sets a field, coercing to its type. Returns the stored value.
    pub fn set(&mut self, name: &str, value: ParameterValue) -> Result<ParameterValue> {
        let field = self
            .groups
            .iter_mut()
            .flat_map(|g| g.fields.iter_mut())
            .find(|f| f.name == name)
            .ok_or_else(|| SkirmishError::config(format!("unknown parameter '{name}'")))?;

        let coerced = field.coerce(value).ok_or_else(|| {
            SkirmishError::config(format!(
                "parameter '{}' expects a {} value, got {}",
                name,
                field.value.type_name(),
                value.type_name()
            ))
        })?;
        field.value = coerced;
        Ok(coerced)
    }

    /// Sets a field and publishes `UpdateGameParameter:<name>` with the new value.
    pub fn set_and_publish(
        &mut self,
        events: &mut EventBus,
        name: &str,
        value: ParameterValue,
    ) -> Result<ParameterValue> {
        let stored = self.set(name, value)?;
        events.publish(parameter_event(name), stored.to_payload());
        Ok(stored)
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self {
            groups: default_parameter_groups(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_groups_are_valid() {
        let store = ParameterStore::new(default_parameter_groups()).unwrap();
        assert_eq!(store.bool(ENABLE_FOV), Some(true));
        assert_eq!(store.groups().len(), 4);
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let mut groups = default_parameter_groups();
        groups[1]
            .fields
            .push(ParameterField::new(ENABLE_FOV, ParameterValue::Bool(false)));
        assert!(ParameterStore::new(groups).is_err());
    }

    #[test]
    fn test_bad_ranges_rejected() {
        for (min, max) in [(1.0, 0.0), (0.0, f64::NAN), (f64::NEG_INFINITY, 1.0)] {
            let mut groups = default_parameter_groups();
            groups[0].fields.push(
                ParameterField::new("zoom", ParameterValue::Float(0.5)).with_range(min, max),
            );
            let err = ParameterStore::new(groups).unwrap_err();
            assert!(err.to_string().contains("'zoom' has invalid range"), "{err}");
        }
    }

    #[test]
    fn test_editor_kind() {
        let store = ParameterStore::default();
        assert_eq!(store.field(ENABLE_FOV).unwrap().editor(), EditorKind::Toggle);
        assert_eq!(
            store.field("music_volume").unwrap().editor(),
            EditorKind::Slider { min: 0.0, max: 1.0 }
        );
        assert_eq!(store.field("max_selection").unwrap().editor(), EditorKind::None);
    }

    #[test]
    fn test_set_coerces_and_clamps() {
        let mut store = ParameterStore::default();
        assert_eq!(
            store.set("game_speed", ParameterValue::Float(3.7)).unwrap(),
            ParameterValue::Int(3)
        );
        assert_eq!(
            store.set("game_speed", ParameterValue::Int(99)).unwrap(),
            ParameterValue::Int(5)
        );
        assert_eq!(
            store.set("music_volume", ParameterValue::Int(0)).unwrap(),
            ParameterValue::Float(0.0)
        );
    }

    #[test]
    fn test_set_rejects_wrong_type() {
        let mut store = ParameterStore::default();
        let err = store.set(ENABLE_FOV, ParameterValue::Int(1)).unwrap_err();
        assert!(err.to_string().contains("expects a bool value"));
        assert!(store.set("nope", ParameterValue::Bool(true)).is_err());
    }

    #[test]
    fn test_set_and_publish() {
        let mut store = ParameterStore::default();
        let mut events = EventBus::new();
        let mut sub = events.subscribe(&[&parameter_event(ENABLE_FOV)]);

        store
            .set_and_publish(&mut events, ENABLE_FOV, ParameterValue::Bool(false))
            .unwrap();

        let event = sub.try_next().unwrap();
        assert_eq!(event.name, "UpdateGameParameter:enable_fov");
        assert_eq!(event.payload, EventPayload::Bool(false));
        assert_eq!(store.bool(ENABLE_FOV), Some(false));
    }

    #[test]
    fn test_parse_group_from_toml() {
        let toml = r#"
name = "Camera"

[[fields]]
name = "zoom"
value = 2.5
range = { min = 1.0, max = 10.0 }

[[fields]]
name = "edge_scroll"
value = true
show_in_game = false
"#;
        let group: ParameterGroup = toml::from_str(toml).unwrap();
        assert_eq!(group.fields[0].value, ParameterValue::Float(2.5));
        assert_eq!(group.fields[1].value, ParameterValue::Bool(true));
        assert_eq!(group.fields_to_show_in_game().count(), 1);
    }
}
