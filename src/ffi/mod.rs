//! C FFI layer for embedding hosts.
//!
//! The host paints cells, steps, and reads regions back to draw them. All
//! functions are marked with `#[no_mangle]` and use `extern "C"`.
//!
//! The actual logic is in `simulation` and `automaton`. These functions are
//! thin wrappers that handle null checks, pointer safety, and C-to-Rust
//! conversions.

pub mod grid;
pub mod lifecycle;
pub mod region;

pub use grid::{ca_clear, ca_get_cell, ca_set_cell, ca_step};
pub use lifecycle::{ca_create, ca_destroy, ca_get_generation, ca_num_states};
pub use region::{ca_extract_region, ca_import_region};
