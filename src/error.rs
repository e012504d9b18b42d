//! Error types for fallible construction and validation paths.
//!
//! The stepping engine itself never returns errors: malformed input there is a
//! precondition violation and panics. Everything that accepts data from the
//! outside (rule definitions, configuration, painted cells) validates first
//! and reports through [`CaError`].

use thiserror::Error;

/// Main error type for automaton operations
#[derive(Error, Debug)]
pub enum CaError {
    /// Rule table failed validation
    #[error("Invalid automaton: {0}")]
    InvalidAutomaton(String),

    /// A cell state that does not index into the automaton's state table
    #[error("State {state} out of range for automaton with {num_states} states")]
    StateOutOfRange { state: u8, num_states: usize },

    /// Cell coordinate outside the grid
    #[error("Cell ({row}, {col}) out of bounds for {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Preset name or id not recognised
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    /// Grid dimensions that cannot back a simulation
    #[error("Invalid dimensions: {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    /// Configuration text failed to parse
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for automaton operations
pub type CaResult<T> = Result<T, CaError>;

impl CaError {
    /// Create an invalid-automaton error
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidAutomaton(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = CaError::StateOutOfRange {
            state: 3,
            num_states: 2,
        };
        assert_eq!(
            err.to_string(),
            "State 3 out of range for automaton with 2 states"
        );

        let err = CaError::OutOfBounds {
            row: 4,
            col: 0,
            rows: 4,
            cols: 4,
        };
        assert_eq!(err.to_string(), "Cell (4, 0) out of bounds for 4x4 grid");

        assert_eq!(
            CaError::invalid("empty").to_string(),
            "Invalid automaton: empty"
        );
    }

    #[test]
    fn test_from_json_error() {
        let parse = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: CaError = parse.into();
        assert!(matches!(err, CaError::Config(_)));
    }
}
