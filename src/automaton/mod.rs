//! Core automaton logic and grid operations.
//!
//! This module contains the grid, neighbor counting, rule evaluation and
//! generation stepping. The driver in `simulation` and the FFI layer in
//! `ffi/` call these functions.

pub mod grid;
pub mod neighbors;
pub mod presets;
pub mod region;
pub mod rules;
pub mod stepping;

pub use grid::{check_dimensions, Grid, MAX_CELLS};
pub use neighbors::{count_neighbors, Boundary, MAX_NEIGHBORS, NEIGHBOR_OFFSETS};
pub use presets::{Preset, PALETTE};
pub use region::{extract_region, import_region};
pub use rules::{next_state, Automaton, HistogramKey, StateDef, Transition, MAX_STATES};
pub use stepping::{step, step_parallel};
