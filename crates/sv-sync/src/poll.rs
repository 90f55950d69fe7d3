//! Adaptive polling interval.
//!
//! While the simulation produces frames the dashboard polls at
//! `min_interval`.  Each cycle that brings nothing new multiplies the wait
//! by `backoff`, up to `max_interval`, so an idle or unreachable server is
//! not busy-polled.  The first new frame snaps the interval back to the
//! minimum.

use std::time::Duration;

use crate::CycleOutcome;

/// Polling bounds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollConfig {
    pub min_interval: Duration,
    pub max_interval: Duration,
    /// Growth factor applied after an empty or failed cycle.  1 disables
    /// backoff.
    pub backoff:      u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_secs(2),
            max_interval: Duration::from_secs(30),
            backoff:      2,
        }
    }
}

/// Tracks the delay until the next scheduled cycle.
#[derive(Clone, Debug)]
pub struct PollSchedule {
    config:  PollConfig,
    current: Duration,
}

impl PollSchedule {
    pub fn new(config: PollConfig) -> Self {
        let current = config.min_interval;
        Self { config, current }
    }

    /// How long to wait before the next timer-driven cycle.
    #[inline]
    pub fn next_delay(&self) -> Duration {
        self.current
    }

    /// Adjust the interval after a cycle.
    pub fn record(&mut self, outcome: &CycleOutcome) {
        if outcome.advanced() {
            self.current = self.config.min_interval;
        } else {
            self.slow_down();
        }
    }

    /// Lengthen the interval (also used when a cycle ended in an error).
    pub fn slow_down(&mut self) {
        let min = self.config.min_interval;
        let max = self.config.max_interval.max(min);
        let grown = self.current.saturating_mul(self.config.backoff.max(1));
        self.current = grown.clamp(min, max);
    }
}
