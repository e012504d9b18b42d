//! Histogram-keyed transition tables.
//!
//! A state's transitions are keyed by the full neighbor composition (how many
//! neighbors sit in each state), not by a single live count. That is enough
//! to express classic two-state rules as well as multi-state ones such as
//! Brian's Brain.
//!
//! Keys are packed base-9 in state-index order. Every count is in `0..=8`, so
//! the packing is unambiguous for any state count up to [`MAX_STATES`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::neighbors::MAX_NEIGHBORS;
use super::presets::PALETTE;
use crate::error::{CaError, CaResult};

/// Largest state count whose packed key still fits in a `u64` (9^20 < 2^64).
pub const MAX_STATES: usize = 20;

const KEY_BASE: u64 = MAX_NEIGHBORS as u64 + 1;

/// Packed neighbor histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HistogramKey(u64);

impl HistogramKey {
    /// Pack a histogram. Counts must each be at most 8 and there must be at
    /// most [`MAX_STATES`] of them.
    #[inline]
    pub fn from_histogram(histogram: &[u8]) -> Self {
        debug_assert!(histogram.len() <= MAX_STATES);
        let packed = histogram.iter().fold(0u64, |key, &count| {
            debug_assert!(count <= MAX_NEIGHBORS);
            key * KEY_BASE + count as u64
        });
        HistogramKey(packed)
    }

    /// Unpack into `num_states` counts.
    pub fn counts(self, num_states: usize) -> Vec<u8> {
        let mut counts = vec![0u8; num_states];
        let mut rest = self.0;
        for slot in counts.iter_mut().rev() {
            *slot = (rest % KEY_BASE) as u8;
            rest /= KEY_BASE;
        }
        counts
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// One entry of a state's transition table: neighbor counts, in state-index
/// order, and the state a matching cell moves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub counts: Vec<u8>,
    pub next: u8,
}

/// Definition of a single automaton state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StateDef {
    #[serde(default)]
    pub transitions: Vec<Transition>,
    /// Next state when no transition matches.
    pub default: u8,
    /// Display color, opaque to the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl StateDef {
    pub fn new(default: u8) -> Self {
        StateDef {
            transitions: Vec::new(),
            default,
            color: None,
        }
    }

    pub fn with_transition(mut self, counts: &[u8], next: u8) -> Self {
        self.transitions.push(Transition {
            counts: counts.to_vec(),
            next,
        });
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// A validated rule table.
///
/// Construction guarantees dense state indices, in-range targets and
/// well-formed keys, so evaluation never has to fail.
#[derive(Debug, Clone)]
pub struct Automaton {
    definitions: Vec<StateDef>,
    tables: Vec<HashMap<HistogramKey, u8>>,
}

impl Automaton {
    /// Validate and compile state definitions.
    pub fn new(definitions: Vec<StateDef>) -> CaResult<Self> {
        let num_states = definitions.len();
        if num_states == 0 {
            return Err(CaError::invalid("automaton has no states"));
        }
        if num_states > MAX_STATES {
            return Err(CaError::invalid(format!(
                "{num_states} states exceeds the maximum of {MAX_STATES}"
            )));
        }

        let mut tables = Vec::with_capacity(num_states);
        for (index, def) in definitions.iter().enumerate() {
            check_state(def.default, num_states)?;

            let mut table = HashMap::with_capacity(def.transitions.len());
            for transition in &def.transitions {
                check_state(transition.next, num_states)?;
                check_counts(&transition.counts, num_states)?;

                let key = HistogramKey::from_histogram(&transition.counts);
                match table.insert(key, transition.next) {
                    Some(previous) if previous != transition.next => {
                        return Err(CaError::invalid(format!(
                            "state {index}: counts {:?} map to both {previous} and {}",
                            transition.counts, transition.next
                        )));
                    }
                    _ => {}
                }
            }
            tables.push(table);
        }

        Ok(Automaton {
            definitions,
            tables,
        })
    }

    /// Number of states (`S`).
    #[inline]
    pub fn num_states(&self) -> usize {
        self.definitions.len()
    }

    pub fn states(&self) -> &[StateDef] {
        &self.definitions
    }

    /// Display color of a state.
    ///
    /// States without their own color fall back to [`PALETTE`] by index.
    pub fn color(&self, state: u8) -> Option<&str> {
        let def = self.definitions.get(state as usize)?;
        def.color
            .as_deref()
            .or_else(|| PALETTE.get(state as usize).copied())
    }

    /// Whether `state` indexes into this automaton.
    #[inline]
    pub fn contains(&self, state: u8) -> bool {
        (state as usize) < self.num_states()
    }
}

/// Evaluate the transition for a cell in `current` with the given histogram.
///
/// Falls back to the state's default when the exact composition is not
/// listed. Panics if `current` is not a state of `automaton`.
#[inline]
pub fn next_state(automaton: &Automaton, current: u8, histogram: &[u8]) -> u8 {
    let index = current as usize;
    assert!(
        index < automaton.num_states(),
        "cell state {current} out of range for automaton with {} states",
        automaton.num_states()
    );
    debug_assert_eq!(histogram.len(), automaton.num_states());

    let key = HistogramKey::from_histogram(histogram);
    automaton.tables[index]
        .get(&key)
        .copied()
        .unwrap_or(automaton.definitions[index].default)
}

fn check_state(state: u8, num_states: usize) -> CaResult<()> {
    if (state as usize) < num_states {
        Ok(())
    } else {
        Err(CaError::StateOutOfRange { state, num_states })
    }
}

fn check_counts(counts: &[u8], num_states: usize) -> CaResult<()> {
    if counts.len() != num_states {
        return Err(CaError::invalid(format!(
            "counts {counts:?} must have one entry per state ({num_states})"
        )));
    }
    let total: u32 = counts.iter().map(|&n| n as u32).sum();
    if total > MAX_NEIGHBORS as u32 {
        return Err(CaError::invalid(format!(
            "counts {counts:?} sum to {total}, more than {MAX_NEIGHBORS} neighbors"
        )));
    }
    Ok(())
}
