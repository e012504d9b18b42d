//! Histogram Automata - multi-state 2D cellular automata
//!
//! Cells hold small integer states and evolve by rule tables keyed on the
//! full composition of their eight neighbors. The engine steps a pair of
//! double-buffered grids; an embedding host drives it through the C ABI in
//! `ffi` or directly through [`Simulation`].

pub mod automaton;
pub mod config;
pub mod error;
pub mod ffi;
pub mod simulation;


pub use automaton::{Automaton, Boundary, Grid, Preset, StateDef};
pub use config::{AutomatonDef, AutomatonSource, SimConfig};
pub use error::{CaError, CaResult};
pub use simulation::Simulation;
