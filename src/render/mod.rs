//! Wheel rendering
//!
//! `scene` composes a display list from the wheel's angle and segments;
//! `canvas` plays it onto a browser 2D context.

pub mod palette;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::draw_scene;
pub use scene::{Label, PointerShape, Wedge, WheelGeometry, WheelScene};
