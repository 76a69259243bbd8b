pub mod action_log;
pub mod config;
pub mod connectivity;
pub mod engine;
pub mod error;
pub mod grid;
pub mod logging;
pub mod patterns;
pub mod scheduler;
pub mod stepper;

pub use connectivity::Connectivity;
pub use engine::PathfinderEngine;
pub use error::{Error, Result};
pub use grid::{Coord, Grid};
pub use patterns::PatternCatalog;
pub use scheduler::StepScheduler;
pub use stepper::{StepOutcome, WavefrontStepper};
