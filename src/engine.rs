use crate::config::Config;
use crate::connectivity::Connectivity;
use crate::error::{Error, Result};
use crate::grid::{Coord, Grid};
use crate::patterns::{PatternCatalog, DEFAULT_PATTERN};
use crate::stepper::{StepOutcome, WavefrontStepper};
use tracing::{debug, info};

/// Owns one grid and one wavefront run, and exposes the command/query
/// surface a display polls every redraw.
#[derive(Debug, Clone)]
pub struct PathfinderEngine {
    grid: Grid,
    connectivity: Connectivity,
    stepper: WavefrontStepper,
    pattern: Option<String>,
}

impl PathfinderEngine {
    /// Fresh engine on the default pattern
    pub fn new(rows: i32, cols: i32) -> Result<Self> {
        Self::with_pattern(rows, cols, DEFAULT_PATTERN)
    }

    pub fn with_pattern(rows: i32, cols: i32, name: &str) -> Result<Self> {
        let grid = PatternCatalog::load(name, rows, cols)?;
        let mut engine = Self::from_grid(grid);
        engine.pattern = Some(name.to_string());
        Ok(engine)
    }

    /// Engine over a caller-built grid; no pattern name is attached
    pub fn from_grid(grid: Grid) -> Self {
        let stepper = WavefrontStepper::new(grid.start());
        PathfinderEngine {
            grid,
            connectivity: Connectivity::Four,
            stepper,
            pattern: None,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let mut engine = Self::with_pattern(
            config.grid.rows,
            config.grid.cols,
            &config.engine.default_pattern,
        )?;
        engine.connectivity = config.engine.connectivity;
        Ok(engine)
    }

    /// Preset names accepted by [`PathfinderEngine::set_pattern`]
    pub fn names() -> Vec<&'static str> {
        PatternCatalog::names()
    }

    /// Toggle an obstacle; returns the cell's new value
    pub fn flip_cell(&mut self, row: i32, col: i32) -> Result<i32> {
        let value = self.grid.flip(Coord::new(row, col))?;
        debug!(row, col, value, "flipped cell");
        Ok(value)
    }

    /// Advance the wavefront by one layer; a no-op once the run ended
    pub fn step(&mut self) -> StepOutcome {
        let outcome = self.stepper.step(&mut self.grid, self.connectivity);
        match outcome {
            StepOutcome::Reached { .. } => {
                info!(steps = self.stepper.step_count(), "end reached")
            }
            StepOutcome::Exhausted => {
                info!(steps = self.stepper.step_count(), "frontier exhausted, end unreachable")
            }
            StepOutcome::Advanced { marked } => {
                debug!(step = self.stepper.step_count(), marked, "wavefront advanced")
            }
            StepOutcome::AlreadyEnded => {}
        }
        outcome
    }

    /// Step until the run ends; returns the final step count
    pub fn run_to_end(&mut self) -> u32 {
        while !self.stepper.has_ended() {
            self.step();
        }
        self.stepper.step_count()
    }

    /// Swap the neighbour policy without touching progress.
    ///
    /// Rejected once the run has ended.
    pub fn set_connectivity(&mut self, connectivity: Connectivity) -> Result<()> {
        if self.stepper.has_ended() {
            return Err(Error::GameEnded);
        }
        if self.connectivity != connectivity {
            debug!(%connectivity, "connectivity changed");
        }
        self.connectivity = connectivity;
        Ok(())
    }

    /// Load a preset and start a new run
    pub fn set_pattern(&mut self, name: &str) -> Result<()> {
        let grid = PatternCatalog::load(name, self.grid.rows(), self.grid.cols())?;
        self.reset_with(grid);
        self.pattern = Some(name.to_string());
        info!(pattern = name, "pattern loaded");
        Ok(())
    }

    /// Replace the grid with one of the same dimensions and start a new run
    pub fn load_grid(&mut self, grid: Grid) -> Result<()> {
        if grid.rows() != self.grid.rows() || grid.cols() != self.grid.cols() {
            return Err(Error::DimensionMismatch {
                expected_rows: self.grid.rows(),
                expected_cols: self.grid.cols(),
                rows: grid.rows(),
                cols: grid.cols(),
            });
        }
        self.reset_with(grid);
        self.pattern = None;
        info!("custom layout loaded");
        Ok(())
    }

    fn reset_with(&mut self, grid: Grid) {
        self.stepper = WavefrontStepper::new(grid.start());
        self.grid = grid;
    }

    pub fn cell_value(&self, row: i32, col: i32) -> Result<i32> {
        self.grid.get(Coord::new(row, col))
    }

    pub fn step_count(&self) -> u32 {
        self.stepper.step_count()
    }

    pub fn has_ended(&self) -> bool {
        self.stepper.has_ended()
    }

    pub fn start_coord(&self) -> Coord {
        self.grid.start()
    }

    pub fn end_coord(&self) -> Coord {
        self.grid.end()
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    pub fn rows(&self) -> i32 {
        self.grid.rows()
    }

    pub fn cols(&self) -> i32 {
        self.grid.cols()
    }

    /// Name of the loaded preset, `None` for a pasted layout
    pub fn pattern_name(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn frontier(&self) -> &[Coord] {
        self.stepper.frontier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_engine_starts_clean() {
        let engine = PathfinderEngine::new(40, 50).unwrap();
        assert_eq!(engine.rows(), 40);
        assert_eq!(engine.cols(), 50);
        assert_eq!(engine.step_count(), 0);
        assert!(!engine.has_ended());
        assert_eq!(engine.pattern_name(), Some("Empty"));
        assert_eq!(engine.connectivity(), Connectivity::Four);
        assert_eq!(engine.frontier(), &[engine.start_coord()]);
    }

    #[test]
    fn from_config_applies_engine_section() {
        let mut config = Config::default();
        config.grid.rows = 10;
        config.grid.cols = 12;
        config.engine.default_pattern = "Maze".to_string();
        config.engine.connectivity = Connectivity::Eight;

        let engine = PathfinderEngine::from_config(&config).unwrap();
        assert_eq!((engine.rows(), engine.cols()), (10, 12));
        assert_eq!(engine.pattern_name(), Some("Maze"));
        assert_eq!(engine.connectivity(), Connectivity::Eight);
    }

    #[test]
    fn from_config_rejects_unknown_pattern() {
        let mut config = Config::default();
        config.engine.default_pattern = "Nope".to_string();
        assert!(matches!(
            PathfinderEngine::from_config(&config),
            Err(Error::UnknownPattern { .. })
        ));
    }

    #[test]
    fn from_config_rejects_oversized_grid() {
        let mut config = Config::default();
        config.grid.rows = 50_000;
        config.grid.cols = 50_000;
        assert!(matches!(
            PathfinderEngine::from_config(&config),
            Err(Error::InvalidDimensions { rows: 50_000, cols: 50_000 })
        ));
    }

    #[test]
    fn load_grid_checks_dimensions() {
        let mut engine = PathfinderEngine::new(3, 3).unwrap();
        let small = Grid::from_layout_text("SE").unwrap();
        assert!(matches!(
            engine.load_grid(small),
            Err(Error::DimensionMismatch { expected_rows: 3, expected_cols: 3, rows: 1, cols: 2 })
        ));

        let fitting = Grid::from_layout_text("S..\n.#.\n..E").unwrap();
        engine.step();
        engine.load_grid(fitting).unwrap();
        assert_eq!(engine.step_count(), 0);
        assert_eq!(engine.pattern_name(), None);
        assert_eq!(engine.cell_value(1, 1).unwrap(), -1);
    }

    #[test]
    fn connectivity_change_keeps_progress() {
        let mut engine = PathfinderEngine::new(40, 50).unwrap();
        engine.step();
        engine.step();
        engine.set_connectivity(Connectivity::Eight).unwrap();
        assert_eq!(engine.step_count(), 2);
        assert_eq!(engine.connectivity(), Connectivity::Eight);
    }
}
