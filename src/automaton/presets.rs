//! Built-in rule tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::rules::{Automaton, StateDef};
use crate::error::{CaError, CaResult};

/// Default state colors, indexed by state.
///
/// The presets use the first three: background, live, and dying.
pub const PALETTE: [&str; 9] = [
    "#282A36", "#F8F8F2", "#8be9fd", "#50fa7b", "#ffb86c", "#ff79c6", "#bd93f9", "#ff5555",
    "#f1fa8c",
];

/// Automata that ship with the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Preset {
    /// Conway's Game of Life (B3/S23)
    #[default]
    GameOfLife,
    /// Seeds (B2/S): every live cell dies, dead cells with two live neighbors are born
    Seeds,
    /// Brian's Brain: live cells always start dying, dying cells always die
    BriansBrain,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::GameOfLife, Preset::Seeds, Preset::BriansBrain];

    /// Build the rule table for this preset.
    pub fn automaton(self) -> Automaton {
        let definitions = match self {
            Preset::GameOfLife => vec![
                StateDef::new(0)
                    .with_transition(&[5, 3], 1)
                    .with_color(PALETTE[0]),
                StateDef::new(0)
                    .with_transition(&[5, 3], 1)
                    .with_transition(&[6, 2], 1)
                    .with_color(PALETTE[1]),
            ],
            Preset::Seeds => vec![
                StateDef::new(0)
                    .with_transition(&[6, 2], 1)
                    .with_color(PALETTE[0]),
                StateDef::new(0).with_color(PALETTE[1]),
            ],
            Preset::BriansBrain => {
                // Born with exactly two live neighbors, however the rest split
                let mut off = StateDef::new(0).with_color(PALETTE[0]);
                for dead in 0..=6u8 {
                    off = off.with_transition(&[dead, 2, 6 - dead], 1);
                }
                vec![
                    off,
                    StateDef::new(2).with_color(PALETTE[1]),
                    StateDef::new(0).with_color(PALETTE[2]),
                ]
            }
        };

        match Automaton::new(definitions) {
            Ok(automaton) => automaton,
            Err(err) => unreachable!("built-in preset {self} is malformed: {err}"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::GameOfLife => "game_of_life",
            Preset::Seeds => "seeds",
            Preset::BriansBrain => "brians_brain",
        }
    }

    /// Stable numeric id used across the C ABI.
    pub fn id(self) -> u8 {
        match self {
            Preset::GameOfLife => 0,
            Preset::Seeds => 1,
            Preset::BriansBrain => 2,
        }
    }

    pub fn from_id(id: u8) -> CaResult<Self> {
        Preset::ALL
            .into_iter()
            .find(|p| p.id() == id)
            .ok_or_else(|| CaError::UnknownPreset(id.to_string()))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = CaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gol" | "life" | "game_of_life" | "game-of-life" => Ok(Preset::GameOfLife),
            "seeds" => Ok(Preset::Seeds),
            "bb" | "brians_brain" | "brians-brain" => Ok(Preset::BriansBrain),
            _ => Err(CaError::UnknownPreset(s.to_string())),
        }
    }
}

impl TryFrom<String> for Preset {
    type Error = CaError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::rules::next_state;

    #[test]
    fn test_presets_build() {
        assert_eq!(Preset::GameOfLife.automaton().num_states(), 2);
        assert_eq!(Preset::Seeds.automaton().num_states(), 2);
        assert_eq!(Preset::BriansBrain.automaton().num_states(), 3);
    }

    #[test]
    fn test_seeds_rules() {
        let seeds = Preset::Seeds.automaton();
        assert_eq!(next_state(&seeds, 0, &[6, 2]), 1);
        assert_eq!(next_state(&seeds, 0, &[5, 3]), 0);
        // Live cells never survive
        for live in 0..=8u8 {
            assert_eq!(next_state(&seeds, 1, &[8 - live, live]), 0);
        }
    }

    #[test]
    fn test_brians_brain_rules() {
        let bb = Preset::BriansBrain.automaton();

        // Birth needs exactly two firing neighbors, regardless of dying ones
        for dying in 0..=6u8 {
            assert_eq!(next_state(&bb, 0, &[6 - dying, 2, dying]), 1);
        }
        assert_eq!(next_state(&bb, 0, &[5, 3, 0]), 0);
        assert_eq!(next_state(&bb, 0, &[7, 1, 0]), 0);

        // Firing always starts dying, dying always turns off
        assert_eq!(next_state(&bb, 1, &[6, 2, 0]), 2);
        assert_eq!(next_state(&bb, 1, &[0, 0, 8]), 2);
        assert_eq!(next_state(&bb, 2, &[6, 2, 0]), 0);
    }

    #[test]
    fn test_brians_brain_clamped_edge_birth_is_not_listed() {
        // Keys are exact compositions of eight neighbors; an edge cell with
        // five neighbors falls back to the default.
        let bb = Preset::BriansBrain.automaton();
        assert_eq!(next_state(&bb, 0, &[3, 2, 0]), 0);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("gol".parse::<Preset>().unwrap(), Preset::GameOfLife);
        assert_eq!("Seeds".parse::<Preset>().unwrap(), Preset::Seeds);
        assert_eq!("bb".parse::<Preset>().unwrap(), Preset::BriansBrain);
        for preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>().unwrap(), preset);
        }
        assert!(matches!(
            "wireworld".parse::<Preset>(),
            Err(CaError::UnknownPreset(_))
        ));
    }

    #[test]
    fn test_ids() {
        for preset in Preset::ALL {
            assert_eq!(Preset::from_id(preset.id()).unwrap(), preset);
        }
        assert!(Preset::from_id(3).is_err());
    }

    #[test]
    fn test_colors() {
        let bb = Preset::BriansBrain.automaton();
        assert_eq!(bb.color(0), Some("#282A36"));
        assert_eq!(bb.color(2), Some("#8be9fd"));
    }

    #[test]
    fn test_many_state_automaton_gets_palette_colors() {
        let states: Vec<_> = (0..10).map(|_| StateDef::new(0)).collect();
        let auto = Automaton::new(states).unwrap();

        for (state, color) in PALETTE.iter().enumerate() {
            assert_eq!(auto.color(state as u8), Some(*color));
        }
        // Past the palette there is no default
        assert_eq!(auto.color(9), None);
    }
}
