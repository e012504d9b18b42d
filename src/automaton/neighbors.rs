//! Moore-neighborhood state histograms.

use serde::{Deserialize, Serialize};

use super::grid::Grid;

/// Most neighbors any cell can have (Moore neighborhood).
pub const MAX_NEIGHBORS: u8 = 8;

/// The eight compass offsets, row-major around the center.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Boundary condition for grid edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    /// Edges wrap around to the opposite side
    #[default]
    Toroidal,
    /// Neighbors beyond an edge do not exist
    Clamped,
}

impl Boundary {
    /// Resolve the neighbor of `(row, col)` at offset `(dr, dc)`.
    ///
    /// Returns `None` when the clamped policy drops the neighbor.
    #[inline]
    pub fn resolve(
        self,
        grid: &Grid,
        row: usize,
        col: usize,
        dr: isize,
        dc: isize,
    ) -> Option<(usize, usize)> {
        let rows = grid.rows() as isize;
        let cols = grid.cols() as isize;
        let r = row as isize + dr;
        let c = col as isize + dc;

        match self {
            // rem_euclid, not %: -1 % rows would stay negative
            Boundary::Toroidal => Some((r.rem_euclid(rows) as usize, c.rem_euclid(cols) as usize)),
            Boundary::Clamped => {
                if r < 0 || r >= rows || c < 0 || c >= cols {
                    None
                } else {
                    Some((r as usize, c as usize))
                }
            }
        }
    }

    /// Stable numeric id used across the C ABI.
    pub fn id(self) -> u8 {
        match self {
            Boundary::Toroidal => 0,
            Boundary::Clamped => 1,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Boundary::Toroidal),
            1 => Some(Boundary::Clamped),
            _ => None,
        }
    }
}

/// Tally the states of the neighbors of `(row, col)` into `histogram`.
///
/// The buffer is zeroed first, so a single allocation can be reused for a
/// whole sweep. Its length must be the automaton's state count; a neighbor in
/// a state past the end of the buffer panics.
pub fn count_neighbors(
    grid: &Grid,
    boundary: Boundary,
    histogram: &mut [u8],
    row: usize,
    col: usize,
) {
    histogram.fill(0);

    for &(dr, dc) in NEIGHBOR_OFFSETS.iter() {
        if let Some((r, c)) = boundary.resolve(grid, row, col, dr, dc) {
            let state = grid.cells()[grid.index_of(r, c)];
            histogram[state as usize] += 1;
        }
    }
}
