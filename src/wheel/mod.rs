//! Decision wheel core
//!
//! Selection model and spin simulation. This module must stay pure:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod candidate;
pub mod config;
pub mod layout;
pub mod state;
pub mod tick;

pub use candidate::Candidate;
pub use config::SpinConfig;
pub use layout::{PALETTE_SIZE, Segment, WheelLayout, assign_colors};
pub use state::{SpinPhase, SpinState, Wheel, WinnerCallback, pointer_angle};
pub use tick::{SpinOutcome, TickInput, tick};
