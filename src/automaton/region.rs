//! Region extraction and import operations.
//!
//! Regions are half-open rectangles `[min_row, max_row) x [min_col, max_col)`
//! clamped to the grid. Buffers are row-major: row changes slowest, column
//! fastest. Extraction feeds a renderer; import carries painted cells in.

use super::grid::Grid;
use crate::error::{CaError, CaResult};

/// Clamped region bounds in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bounds {
    min_row: usize,
    min_col: usize,
    max_row: usize,
    max_col: usize,
}

impl Bounds {
    fn clamp(grid: &Grid, min_row: i32, min_col: i32, max_row: i32, max_col: i32) -> Option<Self> {
        let clamp_axis = |v: i32, len: usize| (v.max(0) as usize).min(len);

        let bounds = Bounds {
            min_row: clamp_axis(min_row, grid.rows()),
            min_col: clamp_axis(min_col, grid.cols()),
            max_row: clamp_axis(max_row, grid.rows()),
            max_col: clamp_axis(max_col, grid.cols()),
        };

        // Empty or inverted
        if bounds.min_row >= bounds.max_row || bounds.min_col >= bounds.max_col {
            None
        } else {
            Some(bounds)
        }
    }

    fn width(&self) -> usize {
        self.max_col - self.min_col
    }

    fn len(&self) -> usize {
        (self.max_row - self.min_row) * self.width()
    }
}

/// Copy a rectangular region of the grid into `out_buf`.
///
/// # Returns
/// Number of bytes written, or 0 if the region is empty after clamping or the
/// buffer is too small.
pub fn extract_region(
    grid: &Grid,
    out_buf: &mut [u8],
    min_row: i32,
    min_col: i32,
    max_row: i32,
    max_col: i32,
) -> usize {
    let bounds = match Bounds::clamp(grid, min_row, min_col, max_row, max_col) {
        Some(b) => b,
        None => return 0,
    };

    let total = bounds.len();
    if out_buf.len() < total {
        return 0;
    }

    let width = bounds.width();
    for (i, row) in (bounds.min_row..bounds.max_row).enumerate() {
        let start = grid.index_of(row, bounds.min_col);
        out_buf[i * width..(i + 1) * width].copy_from_slice(&grid.cells()[start..start + width]);
    }

    total
}

/// Copy `in_buf` into a rectangular region of the grid.
///
/// Every value is checked against `num_states` before anything is written,
/// so a rejected import leaves the grid untouched.
///
/// # Returns
/// Number of bytes read, or 0 if the region is empty after clamping or the
/// buffer is too short.
pub fn import_region(
    grid: &mut Grid,
    in_buf: &[u8],
    num_states: usize,
    min_row: i32,
    min_col: i32,
    max_row: i32,
    max_col: i32,
) -> CaResult<usize> {
    let bounds = match Bounds::clamp(grid, min_row, min_col, max_row, max_col) {
        Some(b) => b,
        None => return Ok(0),
    };

    let total = bounds.len();
    if in_buf.len() < total {
        return Ok(0);
    }

    let source = &in_buf[..total];
    if let Some(&state) = source.iter().find(|&&s| s as usize >= num_states) {
        return Err(CaError::StateOutOfRange { state, num_states });
    }

    let width = bounds.width();
    for (i, row) in (bounds.min_row..bounds.max_row).enumerate() {
        let start = grid.index_of(row, bounds.min_col);
        grid.cells_mut()[start..start + width].copy_from_slice(&source[i * width..(i + 1) * width]);
    }

    Ok(total)
}
