//! Generation stepping over a pair of grid buffers.
//!
//! All reads come from the `current` snapshot and all writes go to `next`, so
//! the order in which cells are visited never changes the result. Swapping
//! the buffers afterwards is the caller's job.

use rayon::prelude::*;
use rayon::ThreadPool;

use super::grid::Grid;
use super::neighbors::{count_neighbors, Boundary};
use super::rules::{next_state, Automaton};

/// Advance one generation, reading `current` and filling `next`.
///
/// Panics if the two buffers differ in shape or `current` holds a state the
/// automaton does not define.
pub fn step(automaton: &Automaton, boundary: Boundary, current: &Grid, next: &mut Grid) {
    check_buffers(current, next);
    if current.is_empty() {
        return;
    }

    let cols = current.cols();
    let mut histogram = vec![0u8; automaton.num_states()];

    for (row, out) in next.cells_mut().chunks_mut(cols).enumerate() {
        step_row(automaton, boundary, current, row, out, &mut histogram);
    }
}

/// Same as [`step`], with rows spread over `pool`.
///
/// Each worker keeps its own histogram buffer. Output is identical to the
/// sequential sweep.
pub fn step_parallel(
    pool: &ThreadPool,
    automaton: &Automaton,
    boundary: Boundary,
    current: &Grid,
    next: &mut Grid,
) {
    check_buffers(current, next);
    if current.is_empty() {
        return;
    }

    let cols = current.cols();
    let num_states = automaton.num_states();

    pool.install(|| {
        next.cells_mut()
            .par_chunks_mut(cols)
            .enumerate()
            .for_each_init(
                || vec![0u8; num_states],
                |histogram, (row, out)| {
                    step_row(automaton, boundary, current, row, out, histogram);
                },
            );
    });
}

/// Compute one row of the next generation into `out`.
#[inline]
fn step_row(
    automaton: &Automaton,
    boundary: Boundary,
    current: &Grid,
    row: usize,
    out: &mut [u8],
    histogram: &mut [u8],
) {
    for (col, cell) in out.iter_mut().enumerate() {
        count_neighbors(current, boundary, histogram, row, col);
        let state = current.cells()[current.index_of(row, col)];
        *cell = next_state(automaton, state, histogram);
    }
}

fn check_buffers(current: &Grid, next: &Grid) {
    assert!(
        current.same_shape(next),
        "buffer shapes differ: current is {}x{}, next is {}x{}",
        current.rows(),
        current.cols(),
        next.rows(),
        next.cols()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::presets::Preset;
    use crate::automaton::rules::StateDef;

    fn pool(threads: usize) -> ThreadPool {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap()
    }

    #[test]
    fn test_single_cell_dies_on_3x3_torus() {
        let gol = Preset::GameOfLife.automaton();
        let mut current = Grid::new(3, 3);
        let mut next = Grid::new(3, 3);
        current.set(1, 1, 1);

        step(&gol, Boundary::Toroidal, &current, &mut next);

        assert!(next.cells().iter().all(|&c| c == 0));
        // Input untouched
        assert_eq!(current.get(1, 1), 1);
    }

    #[test]
    fn test_blinker_oscillates() {
        let gol = Preset::GameOfLife.automaton();
        let mut current = Grid::new(5, 5);
        let mut next = Grid::new(5, 5);
        current.set(2, 1, 1);
        current.set(2, 2, 1);
        current.set(2, 3, 1);

        step(&gol, Boundary::Toroidal, &current, &mut next);

        // Horizontal becomes vertical
        assert_eq!(next.get(1, 2), 1);
        assert_eq!(next.get(2, 2), 1);
        assert_eq!(next.get(3, 2), 1);
        assert_eq!(next.count_state(1), 3);

        std::mem::swap(&mut current, &mut next);
        step(&gol, Boundary::Toroidal, &current, &mut next);

        assert_eq!(next.get(2, 1), 1);
        assert_eq!(next.get(2, 2), 1);
        assert_eq!(next.get(2, 3), 1);
        assert_eq!(next.count_state(1), 3);
    }

    #[test]
    fn test_block_is_still_life() {
        let gol = Preset::GameOfLife.automaton();
        let mut current = Grid::new(6, 6);
        let mut next = Grid::new(6, 6);
        for &(r, c) in &[(2, 2), (2, 3), (3, 2), (3, 3)] {
            current.set(r, c, 1);
        }

        step(&gol, Boundary::Clamped, &current, &mut next);
        assert_eq!(next, current);
    }

    #[test]
    fn test_dying_state_is_default_only() {
        let bb = Preset::BriansBrain.automaton();
        let mut current = Grid::new(4, 4);
        let mut next = Grid::new(4, 4);
        // Surround a firing cell with every kind of neighbor
        current.set(1, 1, 1);
        current.set(0, 0, 1);
        current.set(0, 1, 2);
        current.set(2, 2, 2);

        step(&bb, Boundary::Toroidal, &current, &mut next);

        assert_eq!(next.get(1, 1), 2);
        assert_eq!(next.get(0, 0), 2);
        assert_eq!(next.get(0, 1), 0);
        assert_eq!(next.get(2, 2), 0);
    }

    #[test]
    fn test_boundary_changes_result() {
        // A horizontal pair on the top edge of a 4x4 torus gives birth on
        // the bottom row; with clamped edges nothing is born there.
        let seeds = Preset::Seeds.automaton();
        let mut current = Grid::new(4, 4);
        current.set(0, 1, 1);
        current.set(0, 2, 1);

        let mut toroidal = Grid::new(4, 4);
        step(&seeds, Boundary::Toroidal, &current, &mut toroidal);
        let mut clamped = Grid::new(4, 4);
        step(&seeds, Boundary::Clamped, &current, &mut clamped);

        assert_eq!(toroidal.get(3, 1), 1);
        assert_eq!(toroidal.get(1, 1), 1);
        assert_eq!(clamped.get(3, 1), 0);
        assert_eq!(clamped.get(1, 1), 1);
        // Seeds: the pair itself dies either way
        assert_eq!(toroidal.get(0, 1), 0);
        assert_eq!(clamped.get(0, 2), 0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let bb = Preset::BriansBrain.automaton();
        let mut current = Grid::new(37, 23);
        let mut lcg = 12345u32;
        for r in 0..37 {
            for c in 0..23 {
                lcg = lcg.wrapping_mul(1103515245).wrapping_add(12345);
                current.set(r, c, ((lcg >> 16) % 3) as u8);
            }
        }

        let pool = pool(4);
        for boundary in [Boundary::Toroidal, Boundary::Clamped] {
            let mut sequential = Grid::new(37, 23);
            let mut parallel = Grid::new(37, 23);
            step(&bb, boundary, &current, &mut sequential);
            step_parallel(&pool, &bb, boundary, &current, &mut parallel);
            assert_eq!(sequential, parallel);
        }
    }

    #[test]
    fn test_empty_grid_is_noop() {
        let gol = Preset::GameOfLife.automaton();
        let current = Grid::new(0, 0);
        let mut next = Grid::new(0, 0);
        step(&gol, Boundary::Toroidal, &current, &mut next);
        step_parallel(&pool(1), &gol, Boundary::Toroidal, &current, &mut next);
        assert!(next.is_empty());
    }

    #[test]
    #[should_panic(expected = "buffer shapes differ")]
    fn test_mismatched_buffers_panic() {
        let gol = Preset::GameOfLife.automaton();
        let current = Grid::new(3, 3);
        let mut next = Grid::new(3, 4);
        step(&gol, Boundary::Toroidal, &current, &mut next);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_invalid_cell_state_panics() {
        let auto = Automaton::new(vec![StateDef::new(0), StateDef::new(0)]).unwrap();
        let mut current = Grid::new(3, 3);
        let mut next = Grid::new(3, 3);
        current.set(0, 0, 5);
        step(&auto, Boundary::Clamped, &current, &mut next);
    }
}
