//! Simulation configuration and rule-table definitions.
//!
//! Everything here deserializes with serde. Rule tables can be written either
//! as explicit count lists or in the compact keyed form where each key spells
//! out one count digit per state:
//!
//! ```json
//! { "states": [
//!     { "transitions": { "53": 1 }, "default": 0 },
//!     { "transitions": [ { "counts": [5, 3], "next": 1 },
//!                        { "counts": [6, 2], "next": 1 } ], "default": 0 }
//! ] }
//! ```

use std::collections::BTreeMap;

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::automaton::{
    check_dimensions, Automaton, Boundary, Preset, StateDef, Transition, MAX_NEIGHBORS,
};
use crate::error::{CaError, CaResult};

/// Master configuration for a simulation run
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Grid height in cells
    pub rows: usize,

    /// Grid width in cells
    pub cols: usize,

    /// Edge handling for neighbor counting
    pub boundary: Boundary,

    /// Rule table to evaluate
    pub automaton: AutomatonSource,

    /// Worker threads for stepping (1 = sequential)
    pub threads: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rows: 32,
            cols: 32,
            boundary: Boundary::Toroidal,
            automaton: AutomatonSource::default(),
            threads: 1,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(text: &str) -> CaResult<Self> {
        let config: SimConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> CaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check dimensions. Rule tables are checked when built.
    pub fn validate(&self) -> CaResult<()> {
        check_dimensions(self.rows, self.cols)?;
        Ok(())
    }
}

/// Where the rule table comes from
///
/// A string names a preset, an object is an inline table.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum AutomatonSource {
    /// One of the built-in tables, by name
    Preset(Preset),
    /// An inline table
    Custom(AutomatonDef),
}

impl Default for AutomatonSource {
    fn default() -> Self {
        AutomatonSource::Preset(Preset::default())
    }
}

impl<'de> Deserialize<'de> for AutomatonSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(name) => name
                .parse()
                .map(AutomatonSource::Preset)
                .map_err(de::Error::custom),
            value => AutomatonDef::deserialize(value)
                .map(AutomatonSource::Custom)
                .map_err(de::Error::custom),
        }
    }
}

impl AutomatonSource {
    pub fn build(&self) -> CaResult<Automaton> {
        match self {
            AutomatonSource::Preset(preset) => Ok(preset.automaton()),
            AutomatonSource::Custom(def) => def.build(),
        }
    }
}

/// Serializable rule table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonDef {
    pub states: Vec<StateConfig>,
}

/// Serializable state definition
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateConfig {
    #[serde(default)]
    pub transitions: TransitionTable,
    pub default: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Either explicit transitions or digit-keyed ones
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransitionTable {
    List(Vec<Transition>),
    Keyed(BTreeMap<String, u8>),
}

impl Default for TransitionTable {
    fn default() -> Self {
        TransitionTable::List(Vec::new())
    }
}

impl AutomatonDef {
    /// Resolve keys and validate into an [`Automaton`].
    pub fn build(&self) -> CaResult<Automaton> {
        let num_states = self.states.len();
        let definitions = self
            .states
            .iter()
            .map(|state| {
                let transitions = match &state.transitions {
                    TransitionTable::List(list) => list.clone(),
                    TransitionTable::Keyed(map) => map
                        .iter()
                        .map(|(key, &next)| {
                            Ok(Transition {
                                counts: parse_digit_key(key, num_states)?,
                                next,
                            })
                        })
                        .collect::<CaResult<Vec<_>>>()?,
                };
                Ok(StateDef {
                    transitions,
                    default: state.default,
                    color: state.color.clone(),
                })
            })
            .collect::<CaResult<Vec<_>>>()?;

        Automaton::new(definitions)
    }

    pub fn from_json(text: &str) -> CaResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

impl From<&Automaton> for AutomatonDef {
    fn from(automaton: &Automaton) -> Self {
        AutomatonDef {
            states: automaton
                .states()
                .iter()
                .map(|def| StateConfig {
                    transitions: TransitionTable::List(def.transitions.clone()),
                    default: def.default,
                    color: def.color.clone(),
                })
                .collect(),
        }
    }
}

/// Parse a compact key such as `"026"` into counts `[0, 2, 6]`.
///
/// The key must have exactly one digit per state. Counts never exceed 8, so
/// with a fixed width there is no ambiguity.
fn parse_digit_key(key: &str, num_states: usize) -> CaResult<Vec<u8>> {
    if key.len() != num_states {
        return Err(CaError::invalid(format!(
            "key {key:?} must have exactly {num_states} digits"
        )));
    }
    key.chars()
        .map(|ch| match ch.to_digit(10) {
            Some(d) if d <= MAX_NEIGHBORS as u32 => Ok(d as u8),
            _ => Err(CaError::invalid(format!(
                "key {key:?} contains {ch:?}, expected a count 0-{MAX_NEIGHBORS}"
            ))),
        })
        .collect()
}
