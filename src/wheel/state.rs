//! Wheel state and spin bookkeeping
//!
//! A `Wheel` owns its candidates, their segment layout, the spin state and a
//! seeded RNG. Nothing here is shared between wheels.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::candidate::Candidate;
use super::config::SpinConfig;
use super::layout::{Segment, WheelLayout};
use crate::consts::POINTER_ANGLE;
use crate::error::WheelError;
use crate::normalize_angle;

/// Spin state machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpinPhase {
    /// At rest, accepting spin requests
    #[default]
    Idle,
    /// Decaying toward a stop; spin requests are ignored
    Spinning,
}

/// Per-wheel mutable spin state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpinState {
    /// Accumulated rotation (radians, unbounded)
    pub angle: f64,
    /// Radians per tick; positive while spinning
    pub angular_velocity: f64,
    pub phase: SpinPhase,
    /// Ticks elapsed in the current (or last) spin
    pub ticks: u64,
}

/// Map a wheel rotation to the layout angle sitting under the pointer.
///
/// Segments are drawn at `segment_angle + rotation` in canvas space, so the
/// segment under the pointer satisfies `segment_angle = POINTER_ANGLE - rotation`.
#[inline]
pub fn pointer_angle(rotation: f64) -> f64 {
    normalize_angle(POINTER_ANGLE - normalize_angle(rotation))
}

/// Callback fired once per completed spin
pub type WinnerCallback = Box<dyn FnMut(&Candidate)>;

/// A weighted decision wheel
pub struct Wheel {
    pub(super) candidates: Vec<Candidate>,
    pub(super) layout: WheelLayout,
    pub(super) spin: SpinState,
    pub(super) config: SpinConfig,
    pub(super) rng: Pcg32,
    pub(super) on_winner: Option<WinnerCallback>,
    /// Seed the RNG was created from
    pub seed: u64,
    /// Completed spins since construction
    pub spins_completed: u64,
}

impl std::fmt::Debug for Wheel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wheel")
            .field("candidates", &self.candidates.len())
            .field("segments", &self.layout.len())
            .field("spin", &self.spin)
            .field("config", &self.config)
            .field("seed", &self.seed)
            .field("spins_completed", &self.spins_completed)
            .finish_non_exhaustive()
    }
}

impl Wheel {
    /// Create a wheel over `candidates`.
    ///
    /// Fails on an empty list, bad weights, or an invalid config.
    pub fn new(
        candidates: Vec<Candidate>,
        weights: Option<&[f64]>,
        config: SpinConfig,
        seed: u64,
    ) -> Result<Self, WheelError> {
        config.validate()?;
        let layout = WheelLayout::build(&candidates, weights)?;

        Ok(Self {
            candidates,
            layout,
            spin: SpinState::default(),
            config,
            rng: Pcg32::seed_from_u64(seed),
            on_winner: None,
            seed,
            spins_completed: 0,
        })
    }

    /// Register the completion callback, replacing any previous one
    pub fn on_winner(&mut self, callback: impl FnMut(&Candidate) + 'static) {
        self.on_winner = Some(Box::new(callback));
    }

    /// Replace candidates and weights.
    ///
    /// The new layout is built first; on error nothing changes. An in-flight
    /// spin is abandoned without announcing a winner. Rotation is kept.
    pub fn reconfigure(
        &mut self,
        candidates: Vec<Candidate>,
        weights: Option<&[f64]>,
    ) -> Result<(), WheelError> {
        let layout = WheelLayout::build(&candidates, weights)?;
        if self.is_spinning() {
            log::warn!("Wheel reconfigured mid-spin, abandoning spin");
            self.cancel();
        }
        self.candidates = candidates;
        self.layout = layout;
        Ok(())
    }

    /// Swap spin tuning; takes effect from the next tick
    pub fn set_config(&mut self, config: SpinConfig) -> Result<(), WheelError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn config(&self) -> &SpinConfig {
        &self.config
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn segments(&self) -> &[Segment] {
        self.layout.segments()
    }

    pub fn layout(&self) -> &WheelLayout {
        &self.layout
    }

    pub fn spin_state(&self) -> &SpinState {
        &self.spin
    }

    /// Current rotation (radians, unbounded)
    pub fn angle(&self) -> f64 {
        self.spin.angle
    }

    /// Place the wheel at a rotation (e.g. restoring a saved pose).
    ///
    /// Ignored while spinning.
    pub fn set_angle(&mut self, angle: f64) -> bool {
        if self.is_spinning() || !angle.is_finite() {
            return false;
        }
        self.spin.angle = angle;
        true
    }

    pub fn is_spinning(&self) -> bool {
        self.spin.phase == SpinPhase::Spinning
    }

    /// Segment currently under the pointer (live highlight)
    pub fn segment_under_pointer(&self) -> &Segment {
        self.layout.pick_winner(pointer_angle(self.spin.angle))
    }

    /// Candidate currently under the pointer
    pub fn candidate_under_pointer(&self) -> &Candidate {
        &self.candidates[self.segment_under_pointer().candidate]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn places() -> Vec<Candidate> {
        vec![
            Candidate::new("p1", "Taco Place"),
            Candidate::new("p2", "Ramen Bar"),
            Candidate::new("p3", "Pizza Co"),
            Candidate::new("p4", "Diner"),
        ]
    }

    #[test]
    fn test_new_wheel_is_idle() {
        let wheel = Wheel::new(places(), None, SpinConfig::default(), 7).unwrap();
        assert_eq!(wheel.spin_state().phase, SpinPhase::Idle);
        assert_eq!(wheel.spin_state().angular_velocity, 0.0);
        assert_eq!(wheel.segments().len(), 4);
    }

    #[test]
    fn test_new_rejects_empty_and_bad_config() {
        assert!(matches!(
            Wheel::new(Vec::new(), None, SpinConfig::default(), 1),
            Err(WheelError::EmptyCandidates)
        ));
        let config = SpinConfig {
            decay_factor: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            Wheel::new(places(), None, config, 1),
            Err(WheelError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_pointer_angle_at_rest() {
        // Unrotated: pointer (up) sits over layout angle 3π/2
        assert!((pointer_angle(0.0) - (PI + FRAC_PI_2)).abs() < 1e-12);
        // Rotating clockwise by a quarter turn brings layout angle π under it
        assert!((pointer_angle(FRAC_PI_2) - PI).abs() < 1e-12);
        // Full turns change nothing
        assert!((pointer_angle(10.0 * PI + 0.3) - pointer_angle(0.3)).abs() < 1e-9);
    }

    #[test]
    fn test_candidate_under_pointer() {
        let mut wheel = Wheel::new(places(), None, SpinConfig::default(), 7).unwrap();
        // Four quarters; an eighth of a turn back puts layout angle 7π/4 up top
        wheel.spin.angle = -PI / 4.0;
        assert_eq!(wheel.candidate_under_pointer().id, "p4");
        // Eighth of a turn clockwise: layout angle 5π/4
        wheel.spin.angle = PI / 4.0;
        assert_eq!(wheel.candidate_under_pointer().id, "p3");
    }

    #[test]
    fn test_reconfigure_failure_keeps_wheel() {
        let mut wheel = Wheel::new(places(), None, SpinConfig::default(), 7).unwrap();
        let err = wheel.reconfigure(Vec::new(), None).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(wheel.candidates().len(), 4);
        assert_eq!(wheel.segments().len(), 4);
    }

    #[test]
    fn test_reconfigure_rebuilds_layout() {
        let mut wheel = Wheel::new(places(), None, SpinConfig::default(), 7).unwrap();
        let activities = vec![
            Candidate::weighted("a1", "Hike", 1.0),
            Candidate::weighted("a2", "Escape Room", 3.0),
        ];
        wheel.reconfigure(activities, None).unwrap();
        assert_eq!(wheel.segments().len(), 2);
        assert!((wheel.segments()[1].angular_span() - 1.5 * PI).abs() < 1e-12);
    }
}
