//! Spin tuning
//!
//! These values are tuned by feel ("the spin lasts long enough"), not
//! contracts. Units are per tick, one tick per animation frame.

use serde::{Deserialize, Serialize};

use crate::consts::{DECAY_FACTOR, MAX_VELOCITY, MIN_VELOCITY, STOP_THRESHOLD};
use crate::error::WheelError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinConfig {
    /// Lower bound of the random start velocity (radians/tick)
    pub min_velocity: f64,
    /// Upper bound of the random start velocity (radians/tick)
    pub max_velocity: f64,
    /// Velocity multiplier applied each tick, in (0, 1)
    pub decay_factor: f64,
    /// The wheel stops once velocity falls below this
    pub stop_threshold: f64,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            min_velocity: MIN_VELOCITY,
            max_velocity: MAX_VELOCITY,
            decay_factor: DECAY_FACTOR,
            stop_threshold: STOP_THRESHOLD,
        }
    }
}

impl SpinConfig {
    pub fn validate(&self) -> Result<(), WheelError> {
        let all_finite = [
            self.min_velocity,
            self.max_velocity,
            self.decay_factor,
            self.stop_threshold,
        ]
        .iter()
        .all(|v| v.is_finite());

        if !all_finite {
            return Err(WheelError::InvalidConfig("values must be finite"));
        }
        if self.min_velocity <= 0.0 || self.min_velocity > self.max_velocity {
            return Err(WheelError::InvalidConfig("need 0 < min_velocity <= max_velocity"));
        }
        if self.decay_factor <= 0.0 || self.decay_factor >= 1.0 {
            return Err(WheelError::InvalidConfig("decay_factor must be in (0, 1)"));
        }
        if self.stop_threshold <= 0.0 {
            return Err(WheelError::InvalidConfig("stop_threshold must be positive"));
        }
        Ok(())
    }

    /// Upper bound on ticks for a spin starting at `velocity`.
    ///
    /// Smallest `n` with `velocity * decay^n < threshold`, plus the tick that
    /// observes it.
    pub fn max_ticks_for(&self, velocity: f64) -> u64 {
        if velocity < self.stop_threshold {
            return 1;
        }
        let n = (self.stop_threshold / velocity).ln() / self.decay_factor.ln();
        n.floor() as u64 + 2
    }
}
