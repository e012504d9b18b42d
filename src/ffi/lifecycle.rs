//! Simulation creation, destruction, and queries.

use tracing::warn;

use crate::automaton::{Boundary, Preset};
use crate::simulation::Simulation;

/// Creates a zero-filled simulation running a built-in preset.
///
/// `preset`: 0 = Game of Life, 1 = Seeds, 2 = Brian's Brain.
/// `boundary`: 0 = toroidal, 1 = clamped.
///
/// # Returns
/// A pointer to a new Simulation, or null on invalid arguments (including
/// grids with zero cells or more than `MAX_CELLS`).
///
/// # Safety
/// The returned pointer must eventually be freed with `ca_destroy()`.
#[no_mangle]
pub extern "C" fn ca_create(preset: u8, rows: u32, cols: u32, boundary: u8) -> *mut Simulation {
    let preset = match Preset::from_id(preset) {
        Ok(p) => p,
        Err(err) => {
            warn!(%err, "ca_create rejected");
            return std::ptr::null_mut();
        }
    };
    let boundary = match Boundary::from_id(boundary) {
        Some(b) => b,
        None => {
            warn!(boundary, "ca_create rejected: unknown boundary");
            return std::ptr::null_mut();
        }
    };

    match Simulation::new(preset.automaton(), rows as usize, cols as usize, boundary) {
        Ok(sim) => Box::into_raw(Box::new(sim)),
        Err(err) => {
            warn!(%err, "ca_create rejected");
            std::ptr::null_mut()
        }
    }
}

/// Destroys a simulation and frees its memory.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `ca_create()`, or null
/// - `ptr` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn ca_destroy(ptr: *mut Simulation) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Gets the current generation counter.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
///
/// # Returns
/// The generation counter, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn ca_get_generation(ptr: *const Simulation) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).generation()
}

/// Gets the number of states of the running automaton.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
///
/// # Returns
/// The state count, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn ca_num_states(ptr: *const Simulation) -> u32 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).automaton().num_states() as u32
}
