//! Colors for wheel elements

use crate::wheel::PALETTE_SIZE;

/// Segment fills, indexed by `Segment::color`
pub const WHEEL_COLORS: [[f32; 4]; PALETTE_SIZE] = [
    [0.95, 0.42, 0.38, 1.0], // Coral
    [0.98, 0.77, 0.31, 1.0], // Amber
    [0.45, 0.78, 0.52, 1.0], // Sage
    [0.33, 0.62, 0.89, 1.0], // Sky
    [0.62, 0.47, 0.86, 1.0], // Lavender
    [0.93, 0.55, 0.78, 1.0], // Rose
];

pub const OUTLINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const HIGHLIGHT: [f32; 4] = [1.0, 1.0, 1.0, 0.35];
pub const HUB: [f32; 4] = [0.15, 0.15, 0.2, 1.0];
pub const POINTER: [f32; 4] = [0.15, 0.15, 0.2, 1.0];
pub const TEXT: [f32; 4] = [0.1, 0.1, 0.12, 1.0];
pub const BACKGROUND: [f32; 4] = [0.98, 0.97, 0.95, 1.0];

/// Fill color for a palette slot (wraps if out of range)
pub fn segment_color(slot: usize) -> [f32; 4] {
    WHEEL_COLORS[slot % WHEEL_COLORS.len()]
}

/// CSS `rgba(...)` string for a canvas fill/stroke style
pub fn to_css(color: [f32; 4]) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}
