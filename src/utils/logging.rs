use log::{log_enabled, warn, Level};
use std::time::{Duration, Instant};

use crate::utils::profiling::UpdateProfile;

/// Trace timer around one model update. Counts the sub-steps it covers and
/// reports them with the wall-clock cost when dropped.
pub struct StepTimer<'a> {
    label: &'a str,
    start: Instant,
    substeps: u64,
}

impl<'a> StepTimer<'a> {
    pub fn new(label: &'a str) -> Self {
        if log_enabled!(Level::Trace) {
            log::trace!("⏱️ start {label}");
        }
        Self {
            label,
            start: Instant::now(),
            substeps: 0,
        }
    }

    pub fn count_substep(&mut self) {
        self.substeps += 1;
    }

    pub fn substeps(&self) -> u64 {
        self.substeps
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Profile of the update so far.
    pub fn profile(&self) -> UpdateProfile {
        UpdateProfile {
            substeps: self.substeps,
            integration_time: self.elapsed(),
        }
    }
}

impl<'a> Drop for StepTimer<'a> {
    fn drop(&mut self) {
        if log_enabled!(Level::Trace) {
            log::trace!(
                "⏱️ end {}: {} sub-steps in {} µs",
                self.label,
                self.substeps,
                self.elapsed().as_micros()
            );
        }
    }
}

/// Warns when a single update ran more sub-steps than `budget`.
///
/// Updates are never capped; a host feeding huge elapsed times only gets
/// told about it.
pub fn warn_if_substep_budget_exceeded(substeps: u64, fixed_step: f64, budget: u64) -> bool {
    if substeps > budget {
        warn!(
            "Update ran {substeps} sub-steps of {fixed_step:.6} s (budget {budget}); \
             consider bounding the elapsed time"
        );
        true
    } else {
        false
    }
}
