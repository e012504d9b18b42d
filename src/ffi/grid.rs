//! Cell access and stepping.

use tracing::warn;

use crate::simulation::Simulation;

/// Sets a cell of the current generation.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
///
/// # Returns
/// 0 on success, 1 if the pointer is null, the cell is out of bounds, or the
/// state is not defined by the automaton.
#[no_mangle]
pub unsafe extern "C" fn ca_set_cell(ptr: *mut Simulation, row: u32, col: u32, state: u8) -> i32 {
    if ptr.is_null() {
        return 1;
    }

    let sim = &mut *ptr;
    match sim.paint(row as usize, col as usize, state) {
        Ok(()) => 0,
        Err(err) => {
            warn!(%err, "ca_set_cell rejected");
            1
        }
    }
}

/// Gets the state of a cell.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
///
/// # Returns
/// The cell state, or 0 if out of bounds or null pointer.
#[no_mangle]
pub unsafe extern "C" fn ca_get_cell(ptr: *const Simulation, row: u32, col: u32) -> u8 {
    if ptr.is_null() {
        return 0;
    }

    (*ptr).cell(row as usize, col as usize).unwrap_or(0)
}

/// Advances the simulation by one generation.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
#[no_mangle]
pub unsafe extern "C" fn ca_step(ptr: *mut Simulation) {
    if ptr.is_null() {
        return;
    }

    (*ptr).step();
}

/// Resets every cell to state 0 and the generation counter to 0.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
#[no_mangle]
pub unsafe extern "C" fn ca_clear(ptr: *mut Simulation) {
    if ptr.is_null() {
        return;
    }

    (*ptr).clear();
}
