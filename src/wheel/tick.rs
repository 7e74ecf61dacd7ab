//! Spin simulation step
//!
//! One `tick` per animation frame. The wheel coasts with friction and snaps
//! to a stop once velocity drops under the threshold, at which point the
//! winner under the pointer is announced exactly once.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{SpinPhase, Wheel, pointer_angle};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start a spin with a random velocity (button click / key press)
    pub spin: bool,
    /// Start a spin with this exact velocity instead of a random draw
    pub impulse: Option<f64>,
    /// Abandon the current spin without announcing a winner
    pub cancel: bool,
}

/// Result of a completed spin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinOutcome {
    /// Index of the winner in the wheel's candidate list
    pub candidate: usize,
    /// Layout angle that sat under the pointer when the wheel stopped
    pub terminal_angle: f64,
    /// Final rotation (radians, unbounded)
    pub final_angle: f64,
    /// Ticks the spin took
    pub ticks: u64,
}

impl Wheel {
    /// Start a spin with a random velocity from the configured range.
    ///
    /// Ignored while already spinning. Returns whether a spin started.
    pub fn start(&mut self) -> bool {
        if self.is_spinning() {
            log::warn!("Spin requested while spinning, ignoring");
            return false;
        }
        let velocity = self
            .rng
            .random_range(self.config.min_velocity..=self.config.max_velocity);
        self.begin(velocity);
        true
    }

    /// Start a spin with a caller-chosen velocity (radians/tick).
    ///
    /// Ignored while spinning, and for non-positive or non-finite impulses.
    pub fn start_with_velocity(&mut self, velocity: f64) -> bool {
        if self.is_spinning() {
            log::warn!("Spin requested while spinning, ignoring");
            return false;
        }
        if !velocity.is_finite() || velocity <= 0.0 {
            log::warn!("Ignoring spin impulse {velocity}");
            return false;
        }
        self.begin(velocity);
        true
    }

    fn begin(&mut self, velocity: f64) {
        self.spin.angular_velocity = velocity;
        self.spin.phase = SpinPhase::Spinning;
        self.spin.ticks = 0;
        log::debug!("Spin started at {velocity:.4} rad/tick");
    }

    /// Abandon an in-flight spin. No winner is picked and the callback does
    /// not fire. Does nothing while idle.
    pub fn cancel(&mut self) {
        if self.is_spinning() {
            log::warn!("Spin abandoned after {} ticks", self.spin.ticks);
        }
        self.spin.angular_velocity = 0.0;
        self.spin.phase = SpinPhase::Idle;
    }

    /// Advance the spin by one frame.
    ///
    /// Returns the outcome on the tick the wheel comes to rest.
    pub fn tick(&mut self) -> Option<SpinOutcome> {
        if !self.is_spinning() {
            return None;
        }

        self.spin.ticks += 1;
        self.spin.angle += self.spin.angular_velocity;

        // Velocity stays positive while spinning
        if self.spin.angular_velocity < self.config.stop_threshold {
            self.spin.angular_velocity = 0.0;
            self.spin.phase = SpinPhase::Idle;
            return Some(self.finish());
        }

        self.spin.angular_velocity *= self.config.decay_factor;
        None
    }

    fn finish(&mut self) -> SpinOutcome {
        let terminal_angle = pointer_angle(self.spin.angle);
        let candidate = self.layout.pick_winner(terminal_angle).candidate;
        self.spins_completed += 1;

        let winner = &self.candidates[candidate];
        log::info!(
            "Wheel stopped on '{}' ({}) after {} ticks",
            winner.label,
            winner.id,
            self.spin.ticks
        );
        if let Some(callback) = self.on_winner.as_mut() {
            callback(winner);
        }

        SpinOutcome {
            candidate,
            terminal_angle,
            final_angle: self.spin.angle,
            ticks: self.spin.ticks,
        }
    }
}

/// Apply one frame of input, then advance the wheel
pub fn tick(wheel: &mut Wheel, input: &TickInput) -> Option<SpinOutcome> {
    if input.cancel {
        wheel.cancel();
    }

    if let Some(velocity) = input.impulse {
        wheel.start_with_velocity(velocity);
    } else if input.spin {
        wheel.start();
    }

    wheel.tick()
}
