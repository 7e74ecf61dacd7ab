//! Rendezvous decision wheel
//!
//! Core modules:
//! - `wheel`: Selection model and spin simulation (pure, no rendering)
//! - `driver`: Fixed-step frame clock and detachable host loop
//! - `render`: Scene composition and canvas drawing
//! - `settings`: Spin tuning presets and persistence
//! - `history`: Recent decisions log

pub mod driver;
pub mod error;
pub mod history;
pub mod render;
pub mod settings;
pub mod wheel;

pub use error::WheelError;
pub use history::DecisionHistory;
pub use settings::{WheelPreset, WheelSettings};
pub use wheel::{Candidate, SpinConfig, SpinOutcome, Wheel};

use glam::DVec2;

/// Wheel configuration constants
pub mod consts {
    use std::f64::consts::{FRAC_PI_2, PI};

    /// Fixed simulation timestep (one tick per 60 Hz animation frame)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Maximum ticks per frame; older backlog is dropped
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Canvas angle of the fixed pointer: straight up on a y-down canvas.
    /// Drawing and selection must both use this value.
    pub const POINTER_ANGLE: f64 = PI + FRAC_PI_2;

    /// Spin defaults (places wheel)
    pub const MIN_VELOCITY: f64 = 0.375; // radians per tick
    pub const MAX_VELOCITY: f64 = 0.625;
    /// Friction applied every tick (larger = longer spin)
    pub const DECAY_FACTOR: f64 = 0.99;
    /// Velocity below which the wheel snaps to a stop
    pub const STOP_THRESHOLD: f64 = 0.0005;
}

/// Normalize angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    use std::f64::consts::TAU;
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: DVec2) -> (f64, f64) {
    (pos.length(), pos.y.atan2(pos.x))
}
