//! Region extraction and import FFI functions.

use tracing::warn;

use crate::simulation::Simulation;

/// Number of cells in the requested (unclamped) region.
fn requested_len(min_row: i32, min_col: i32, max_row: i32, max_col: i32) -> usize {
    let rows = (max_row as i64 - min_row as i64).max(0) as usize;
    let cols = (max_col as i64 - min_col as i64).max(0) as usize;
    rows * cols
}

/// Extracts a rectangular region of the current generation into a buffer.
///
/// # Layout
/// Row-major: row changes slowest, column fastest. Matches the layout
/// expected by `ca_import_region`.
///
/// The buffer holds the rectangle clamped to the grid, packed with the
/// clamped width. For a region partly off the grid the bytes written are
/// fewer than requested and each row is shorter than `max_col - min_col`.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
/// - `out_buf` must point to a buffer with at least
///   `(max_row - min_row) * (max_col - min_col)` bytes
///
/// # Returns
/// Number of bytes written, or 0 on error.
#[no_mangle]
pub unsafe extern "C" fn ca_extract_region(
    ptr: *const Simulation,
    out_buf: *mut u8,
    min_row: i32,
    min_col: i32,
    max_row: i32,
    max_col: i32,
) -> u64 {
    if ptr.is_null() || out_buf.is_null() {
        return 0;
    }

    let sim = &*ptr;
    let len = requested_len(min_row, min_col, max_row, max_col);
    let buf_slice = std::slice::from_raw_parts_mut(out_buf, len);
    sim.extract_region(buf_slice, min_row, min_col, max_row, max_col) as u64
}

/// Imports a rectangular region of cells from a buffer.
///
/// # Layout
/// Row-major (matching `ca_extract_region`). Every value must be a state of
/// the running automaton; if any is not, nothing is written.
///
/// Rows are read packed at the clamped width, not the requested one: a host
/// writing a region that hangs off the grid must lay out only the in-grid
/// part.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
/// - `in_buf` must point to a buffer with at least
///   `(max_row - min_row) * (max_col - min_col)` bytes
///
/// # Returns
/// Number of bytes read, or 0 on error.
#[no_mangle]
pub unsafe extern "C" fn ca_import_region(
    ptr: *mut Simulation,
    in_buf: *const u8,
    min_row: i32,
    min_col: i32,
    max_row: i32,
    max_col: i32,
) -> u64 {
    if ptr.is_null() || in_buf.is_null() {
        return 0;
    }

    let sim = &mut *ptr;
    let len = requested_len(min_row, min_col, max_row, max_col);
    let buf_slice = std::slice::from_raw_parts(in_buf, len);

    match sim.import_region(buf_slice, min_row, min_col, max_row, max_col) {
        Ok(read) => read as u64,
        Err(err) => {
            warn!(%err, "ca_import_region rejected");
            0
        }
    }
}
