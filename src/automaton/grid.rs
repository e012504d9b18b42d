//! Grid storage and cell access helpers.

use crate::error::{CaError, CaResult};

/// Largest cell count a grid may hold (256 Mi cells per buffer).
pub const MAX_CELLS: usize = 1 << 28;

/// Check that `rows x cols` is a usable grid size and return its cell count.
///
/// Rejects empty grids, products that overflow, and grids above [`MAX_CELLS`].
pub fn check_dimensions(rows: usize, cols: usize) -> CaResult<usize> {
    match rows.checked_mul(cols) {
        Some(len) if len > 0 && len <= MAX_CELLS => Ok(len),
        _ => Err(CaError::InvalidDimensions { rows, cols }),
    }
}

/// A fixed-size 2D grid of cell states, stored row-major.
///
/// The grid does not know which automaton its values belong to; keeping every
/// cell below the automaton's state count is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Create a grid with every cell in state 0.
    ///
    /// Callers taking sizes from outside should run [`check_dimensions`] first.
    pub fn new(rows: usize, cols: usize) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Calculate the linear index for a 2D coordinate.
    #[inline]
    pub fn index_of(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Check if coordinates are within grid bounds.
    #[inline]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Read a cell. Panics when out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        assert!(
            self.in_bounds(row, col),
            "cell ({row}, {col}) out of bounds for {}x{} grid",
            self.rows,
            self.cols
        );
        self.cells[self.index_of(row, col)]
    }

    /// Write a cell. Panics when out of bounds.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, state: u8) {
        assert!(
            self.in_bounds(row, col),
            "cell ({row}, {col}) out of bounds for {}x{} grid",
            self.rows,
            self.cols
        );
        let idx = self.index_of(row, col);
        self.cells[idx] = state;
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    /// Reset every cell to state 0.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Number of cells currently in `state`.
    pub fn count_state(&self, state: u8) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when both grids have the same dimensions.
    pub fn same_shape(&self, other: &Grid) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }
}
