//! Simulation driver: owns the buffers and runs generations.

use std::sync::atomic::{AtomicBool, Ordering};

use rayon::ThreadPool;
use tracing::{debug, info, warn};

use crate::automaton::{self, Automaton, Boundary, Grid};
use crate::config::SimConfig;
use crate::error::{CaError, CaResult};

/// A running automaton.
///
/// Holds the current and next generation buffers and swaps them after every
/// step, so stepping never allocates.
pub struct Simulation {
    automaton: Automaton,
    boundary: Boundary,
    current: Grid,
    next: Grid,
    generation: u64,
    /// Present only when stepping with more than one thread.
    pool: Option<ThreadPool>,
}

impl Simulation {
    /// Create a zero-filled simulation.
    ///
    /// Fails with [`CaError::InvalidDimensions`] for empty grids or grids
    /// larger than [`MAX_CELLS`](crate::automaton::MAX_CELLS).
    pub fn new(
        automaton: Automaton,
        rows: usize,
        cols: usize,
        boundary: Boundary,
    ) -> CaResult<Self> {
        automaton::check_dimensions(rows, cols)?;

        info!(
            rows,
            cols,
            states = automaton.num_states(),
            ?boundary,
            "creating simulation"
        );

        Ok(Simulation {
            automaton,
            boundary,
            current: Grid::new(rows, cols),
            next: Grid::new(rows, cols),
            generation: 0,
            pool: None,
        })
    }

    /// Build from a validated configuration.
    pub fn from_config(config: &SimConfig) -> CaResult<Self> {
        config.validate()?;
        let automaton = config.automaton.build()?;
        Ok(Self::new(automaton, config.rows, config.cols, config.boundary)?
            .with_threads(config.threads))
    }

    /// Step rows on a dedicated pool of `threads` workers.
    ///
    /// 0 or 1 keeps stepping sequential. If the pool cannot be built the
    /// simulation stays sequential.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.pool = if threads <= 1 {
            None
        } else {
            match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                Ok(pool) => Some(pool),
                Err(err) => {
                    warn!(threads, %err, "thread pool unavailable, stepping sequentially");
                    None
                }
            }
        };
        self
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The generation to render.
    pub fn current(&self) -> &Grid {
        &self.current
    }

    pub fn rows(&self) -> usize {
        self.current.rows()
    }

    pub fn cols(&self) -> usize {
        self.current.cols()
    }

    /// Number of worker threads used per step.
    pub fn threads(&self) -> usize {
        self.pool.as_ref().map_or(1, |pool| pool.current_num_threads())
    }

    /// Read a cell, or `None` outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<u8> {
        if self.current.in_bounds(row, col) {
            Some(self.current.get(row, col))
        } else {
            None
        }
    }

    /// Set a cell of the current generation.
    pub fn paint(&mut self, row: usize, col: usize, state: u8) -> CaResult<()> {
        if !self.current.in_bounds(row, col) {
            return Err(CaError::OutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        if !self.automaton.contains(state) {
            return Err(CaError::StateOutOfRange {
                state,
                num_states: self.automaton.num_states(),
            });
        }
        self.current.set(row, col, state);
        Ok(())
    }

    /// Reset every cell to state 0 and the generation counter to 0.
    pub fn clear(&mut self) {
        self.current.clear();
        self.generation = 0;
    }

    /// Advance one generation.
    pub fn step(&mut self) {
        match &self.pool {
            Some(pool) => automaton::step_parallel(
                pool,
                &self.automaton,
                self.boundary,
                &self.current,
                &mut self.next,
            ),
            None => automaton::step(&self.automaton, self.boundary, &self.current, &mut self.next),
        }

        std::mem::swap(&mut self.current, &mut self.next);
        self.generation += 1;
        debug!(generation = self.generation, "step");
    }

    /// Step up to `generations` times, checking `cancel` before each step.
    ///
    /// A step that has started always completes. Returns the number of steps
    /// performed.
    pub fn run(&mut self, generations: u64, cancel: &AtomicBool) -> u64 {
        let mut done = 0;
        while done < generations {
            if cancel.load(Ordering::Relaxed) {
                debug!(done, requested = generations, "run cancelled");
                break;
            }
            self.step();
            done += 1;
        }
        debug!(done, generation = self.generation, "run finished");
        done
    }

    /// Copy a region of the current generation out for rendering.
    pub fn extract_region(
        &self,
        out_buf: &mut [u8],
        min_row: i32,
        min_col: i32,
        max_row: i32,
        max_col: i32,
    ) -> usize {
        automaton::extract_region(&self.current, out_buf, min_row, min_col, max_row, max_col)
    }

    /// Paint a region of the current generation from a buffer.
    pub fn import_region(
        &mut self,
        in_buf: &[u8],
        min_row: i32,
        min_col: i32,
        max_row: i32,
        max_col: i32,
    ) -> CaResult<usize> {
        automaton::import_region(
            &mut self.current,
            in_buf,
            self.automaton.num_states(),
            min_row,
            min_col,
            max_row,
            max_col,
        )
    }
}
