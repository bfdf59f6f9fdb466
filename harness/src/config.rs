use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Probability that a single measurement draw passes
pub const TARGET_PASS_PROBABILITY: f64 = 0.85;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Shortest instrument settle delay (inclusive)
    pub settle_min: Duration,
    /// Longest instrument settle delay (exclusive)
    pub settle_max: Duration,
    /// Seed for the random source; a fresh one is drawn when absent
    pub seed: Option<u64>,
    /// Advance a virtual clock instead of sleeping
    pub fast: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            settle_min: Duration::from_millis(500),
            settle_max: Duration::from_millis(1500),
            seed: None,
            fast: false,
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_settle_range(mut self, min: Duration, max: Duration) -> Self {
        self.settle_min = min;
        self.settle_max = max;
        self
    }

    pub fn with_fast_mode(mut self, fast: bool) -> Self {
        self.fast = fast;
        self
    }

    /// The configured seed, or a random one when none was given
    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.settle_max <= self.settle_min {
            return Err(format!(
                "Settle delay range is empty ({:?}..{:?})",
                self.settle_min, self.settle_max
            ));
        }

        if self.settle_max > Duration::from_secs(60) {
            return Err("Settle delay must not exceed 60 seconds".to_string());
        }

        Ok(())
    }
}
