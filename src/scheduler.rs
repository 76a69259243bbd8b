use crate::engine::PathfinderEngine;
use std::time::Duration;
use tracing::debug;

/// Drives auto-stepping from elapsed time the host hands in each frame.
///
/// The engine never sleeps or keeps time itself; the scheduler turns frame
/// deltas into whole steps and stops on its own once the run has ended.
#[derive(Debug, Clone)]
pub struct StepScheduler {
    interval: Duration,
    running: bool,
    pending: Duration,
}

impl StepScheduler {
    pub fn new(interval: Duration) -> Self {
        StepScheduler {
            interval,
            running: false,
            pending: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start or stop; returns the new running state.
    ///
    /// Does nothing when the run has already ended.
    pub fn toggle(&mut self, engine: &PathfinderEngine) -> bool {
        if engine.has_ended() {
            return self.running;
        }
        if self.running {
            self.stop();
        } else {
            self.running = true;
            self.pending = Duration::ZERO;
            debug!(interval_ms = self.interval.as_millis() as u64, "auto-step started");
        }
        self.running
    }

    pub fn stop(&mut self) {
        if self.running {
            debug!("auto-step stopped");
        }
        self.running = false;
        self.pending = Duration::ZERO;
    }

    /// Feed `elapsed` time; returns how many steps were taken
    pub fn tick(&mut self, elapsed: Duration, engine: &mut PathfinderEngine) -> u32 {
        if !self.running {
            return 0;
        }

        let mut steps = 0;
        if self.interval.is_zero() {
            if !engine.has_ended() {
                engine.step();
                steps = 1;
            }
        } else {
            self.pending += elapsed;
            while self.pending >= self.interval && !engine.has_ended() {
                self.pending -= self.interval;
                engine.step();
                steps += 1;
            }
        }

        if engine.has_ended() {
            self.stop();
        }
        steps
    }
}
