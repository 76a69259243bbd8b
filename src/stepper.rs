use crate::connectivity::Connectivity;
use crate::grid::{Coord, Grid, EMPTY};

/// What a single call to [`WavefrontStepper::step`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The wavefront grew by `marked` cells and the run goes on
    Advanced { marked: usize },
    /// The end cell was reached in this step
    Reached { marked: usize },
    /// Nothing new was reachable; the end was never reached
    Exhausted,
    /// The run had already ended, nothing changed
    AlreadyEnded,
}

impl StepOutcome {
    pub fn ends_run(self) -> bool {
        matches!(self, StepOutcome::Reached { .. } | StepOutcome::Exhausted)
    }
}

/// Layer-by-layer breadth-first expansion from the grid's start cell.
///
/// The start cell has arrival time 0 and keeps its stored value of 0. Every
/// other reached cell holds the step at which it was first reached, which is
/// its hop distance from the start.
#[derive(Debug, Clone)]
pub struct WavefrontStepper {
    frontier: Vec<Coord>,
    step_count: u32,
    ended: bool,
    nbuf: Vec<Coord>,
}

impl WavefrontStepper {
    /// Fresh stepper whose frontier is the start cell
    pub fn new(start: Coord) -> Self {
        WavefrontStepper {
            frontier: vec![start],
            step_count: 0,
            ended: false,
            nbuf: Vec::with_capacity(8),
        }
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    pub fn has_ended(&self) -> bool {
        self.ended
    }

    /// Cells reached by the last step (the start cell before the first one)
    pub fn frontier(&self) -> &[Coord] {
        &self.frontier
    }

    /// Advance by exactly one layer
    pub fn step(&mut self, grid: &mut Grid, connectivity: Connectivity) -> StepOutcome {
        if self.ended {
            return StepOutcome::AlreadyEnded;
        }

        let arrival = self.step_count as i32 + 1;
        let start = grid.start();
        let end = grid.end();
        let (rows, cols) = (grid.rows(), grid.cols());

        // The end was reached at arrival time 0
        if start == end {
            self.step_count += 1;
            self.ended = true;
            self.frontier.clear();
            return StepOutcome::Reached { marked: 0 };
        }

        let mut next = Vec::new();
        let mut nbuf = std::mem::take(&mut self.nbuf);

        // Cells marked during this pass already hold `arrival`, so a later
        // frontier cell sees them as visited.
        for &cell in &self.frontier {
            connectivity.fill_neighbors(cell, rows, cols, &mut nbuf);
            for &n in nbuf.iter() {
                if n == start || !matches!(grid.get(n), Ok(EMPTY)) {
                    continue;
                }
                if grid.set(n, arrival).is_ok() {
                    next.push(n);
                }
            }
        }

        self.nbuf = nbuf;
        self.step_count += 1;

        let marked = next.len();
        let reached = next.contains(&end);
        self.frontier = next;

        if reached {
            self.ended = true;
            StepOutcome::Reached { marked }
        } else if marked == 0 {
            self.ended = true;
            StepOutcome::Exhausted
        } else {
            StepOutcome::Advanced { marked }
        }
    }
}
