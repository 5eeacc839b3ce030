use std::time::Duration;

/// Timing and step counts of the most recent update.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct UpdateProfile {
    pub substeps: u64,
    pub integration_time: Duration,
}

impl UpdateProfile {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Mean wall-clock cost of one sub-step.
    pub fn time_per_substep(&self) -> Option<Duration> {
        if self.substeps == 0 {
            None
        } else {
            Some(self.integration_time.div_f64(self.substeps as f64))
        }
    }

    pub fn report(&self) {
        log::debug!(
            "crane update: {} sub-steps in {:.3} ms",
            self.substeps,
            self.integration_time.as_secs_f64() * 1000.0
        );
    }
}
