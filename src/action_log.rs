use crate::connectivity::Connectivity;
use crate::engine::PathfinderEngine;
use crate::error::Result;
use crate::grid::Grid;
use crate::stepper::StepOutcome;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

/// Commands a host issues to the engine
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Toggle an obstacle at (row, col)
    FlipCell { row: i32, col: i32 },
    /// Advance one layer
    Step,
    /// Switch the neighbour policy
    SetConnectivity { connectivity: Connectivity },
    /// Load a named preset
    SetPattern { name: String },
    /// Replace the grid with a layout pasted as text
    PasteLayout { layout: String },
}

/// Whether the engine accepted the command
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Applied,
    Rejected,
}

/// Logged action with timestamp and outcome
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedAction {
    /// Milliseconds since the log was created
    pub timestamp_ms: u64,
    pub action: Action,
    pub outcome: Outcome,
}

/// Command log for one session
pub struct ActionLog {
    start_time: Instant,
    actions: Vec<LoggedAction>,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionLog {
    pub fn new() -> Self {
        ActionLog {
            start_time: Instant::now(),
            actions: Vec::new(),
        }
    }

    /// Rebuild a log from previously saved entries
    pub fn from_actions(actions: Vec<LoggedAction>) -> Self {
        ActionLog {
            start_time: Instant::now(),
            actions,
        }
    }

    /// Log an action with the current timestamp
    pub fn log(&mut self, action: Action, outcome: Outcome) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.actions.push(LoggedAction {
            timestamp_ms,
            action,
            outcome,
        });
    }

    /// Apply `action` to `engine` and record the result
    pub fn apply(&mut self, engine: &mut PathfinderEngine, action: Action) -> Outcome {
        let outcome = execute(engine, &action);
        self.log(action, outcome);
        outcome
    }

    pub fn actions(&self) -> &[LoggedAction] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Re-run every applied action on `engine`, in order.
    ///
    /// Rejected entries are skipped. Returns how many actions were applied.
    pub fn replay(&self, engine: &mut PathfinderEngine) -> usize {
        self.actions
            .iter()
            .filter(|logged| logged.outcome == Outcome::Applied)
            .filter(|logged| execute(engine, &logged.action) == Outcome::Applied)
            .count()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.actions)?)
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let actions: Vec<LoggedAction> = serde_json::from_str(&json)?;
        Ok(Self::from_actions(actions))
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut flips = 0;
        let mut steps = 0;
        let mut toggles = 0;
        let mut loads = 0;
        let mut rejected = 0;

        for logged in &self.actions {
            if logged.outcome == Outcome::Rejected {
                rejected += 1;
                continue;
            }
            match &logged.action {
                Action::FlipCell { .. } => flips += 1,
                Action::Step => steps += 1,
                Action::SetConnectivity { .. } => toggles += 1,
                Action::SetPattern { .. } | Action::PasteLayout { .. } => loads += 1,
            }
        }

        let duration = self.actions.last().map(|last| last.timestamp_ms).unwrap_or(0);

        format!(
            "Session Duration: {}ms\n\
             Total Events: {} ({} rejected)\n\
             Grid Edits: {} flips, {} layout loads\n\
             Run Control: {} steps, {} connectivity changes",
            duration,
            self.actions.len(),
            rejected,
            flips,
            loads,
            steps,
            toggles
        )
    }
}

fn execute(engine: &mut PathfinderEngine, action: &Action) -> Outcome {
    let applied = match action {
        Action::FlipCell { row, col } => engine.flip_cell(*row, *col).is_ok(),
        Action::Step => !matches!(engine.step(), StepOutcome::AlreadyEnded),
        Action::SetConnectivity { connectivity } => {
            engine.set_connectivity(*connectivity).is_ok()
        }
        Action::SetPattern { name } => engine.set_pattern(name).is_ok(),
        Action::PasteLayout { layout } => Grid::from_layout_text(layout)
            .and_then(|grid| engine.load_grid(grid))
            .is_ok(),
    };
    if applied {
        Outcome::Applied
    } else {
        Outcome::Rejected
    }
}
