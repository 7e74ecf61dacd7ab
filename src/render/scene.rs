//! Wheel scene composition
//!
//! Turns `{angle, segments}` into a flat display list in canvas space
//! (y down, angles clockwise from east). Pure; drawing happens elsewhere.

use glam::DVec2;

use super::palette;
use crate::wheel::Wheel;
use crate::{cartesian_to_polar, normalize_angle, polar_to_cartesian};

/// Wedges narrower than this (radians) get no label
const MIN_LABEL_SWEEP: f64 = 0.08;
/// Label distance from center, as a fraction of the wheel radius
const LABEL_RADIUS_FACTOR: f64 = 0.62;

/// Where and how big the wheel is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGeometry {
    pub center: DVec2,
    pub radius: f64,
    pub hub_radius: f64,
    pub pointer_length: f64,
}

impl WheelGeometry {
    /// Largest wheel that fits a `width` x `height` surface with room for the
    /// pointer above it
    pub fn fit(width: f64, height: f64) -> Self {
        let pointer_length = (width.min(height) * 0.06).max(8.0);
        let radius = ((width.min(height) / 2.0) - pointer_length).max(1.0);
        Self {
            center: DVec2::new(width / 2.0, height / 2.0 + pointer_length / 2.0),
            radius,
            hub_radius: radius * 0.08,
            pointer_length,
        }
    }
}

/// One filled slice of the wheel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wedge {
    /// Index into the wheel's segment list
    pub segment: usize,
    /// Index into the wheel's candidate list
    pub candidate: usize,
    /// Canvas start angle (radians, normalized to [0, 2π))
    pub start_angle: f64,
    /// Clockwise sweep (radians)
    pub sweep: f64,
    pub color: [f32; 4],
    /// Currently under the pointer
    pub highlighted: bool,
}

impl Wedge {
    /// Whether a canvas angle falls inside `[start, start + sweep)`
    pub fn contains_angle(&self, theta: f64) -> bool {
        normalize_angle(theta - self.start_angle) < self.sweep
    }
}

/// Candidate label placed along a wedge's bisector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Label<'a> {
    pub text: &'a str,
    pub pos: DVec2,
    /// Rotation so the text reads outward along the radius
    pub rotation: f64,
}

/// Fixed triangle pointing into the wheel from above
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerShape {
    pub tip: DVec2,
    pub base_left: DVec2,
    pub base_right: DVec2,
}

impl PointerShape {
    fn above(geometry: &WheelGeometry) -> Self {
        let c = geometry.center;
        let len = geometry.pointer_length;
        // Canvas y grows downward: "up" is negative y
        let tip = DVec2::new(c.x, c.y - geometry.radius + len * 0.5);
        let base_y = c.y - geometry.radius - len * 0.5;
        Self {
            tip,
            base_left: DVec2::new(c.x - len * 0.5, base_y),
            base_right: DVec2::new(c.x + len * 0.5, base_y),
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct WheelScene<'a> {
    pub geometry: WheelGeometry,
    pub wedges: Vec<Wedge>,
    pub labels: Vec<Label<'a>>,
    pub pointer: PointerShape,
}

impl<'a> WheelScene<'a> {
    /// Compose the current frame of `wheel`
    pub fn compose(wheel: &'a Wheel, geometry: WheelGeometry, show_labels: bool) -> Self {
        let rotation = wheel.angle();
        let highlighted = wheel.segment_under_pointer().candidate;
        let candidates = wheel.candidates();

        let mut wedges = Vec::with_capacity(wheel.segments().len());
        let mut labels = Vec::new();

        for (i, seg) in wheel.segments().iter().enumerate() {
            let start_angle = normalize_angle(seg.start + rotation);
            let sweep = seg.angular_span();

            wedges.push(Wedge {
                segment: i,
                candidate: seg.candidate,
                start_angle,
                sweep,
                color: palette::segment_color(seg.color),
                highlighted: seg.candidate == highlighted,
            });

            if show_labels && sweep >= MIN_LABEL_SWEEP {
                let mid = seg.mid_angle() + rotation;
                labels.push(Label {
                    text: &candidates[seg.candidate].label,
                    pos: geometry.center
                        + polar_to_cartesian(geometry.radius * LABEL_RADIUS_FACTOR, mid),
                    rotation: mid,
                });
            }
        }

        Self {
            geometry,
            wedges,
            labels,
            pointer: PointerShape::above(&geometry),
        }
    }

    /// Wedge the drawn pointer tip lies over, from the drawn geometry alone
    pub fn wedge_under_pointer(&self) -> Option<&Wedge> {
        let (_, theta) = cartesian_to_polar(self.pointer.tip - self.geometry.center);
        let theta = normalize_angle(theta);
        self.wedges.iter().find(|w| w.contains_angle(theta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::{Candidate, SpinConfig, pointer_angle};
    use proptest::prelude::*;
    use std::f64::consts::TAU;

    fn wheel(weights: &[f64]) -> Wheel {
        let candidates = (0..weights.len())
            .map(|i| Candidate::new(format!("a{i}"), format!("Activity {i}")))
            .collect();
        Wheel::new(candidates, Some(weights), SpinConfig::default(), 5).unwrap()
    }

    #[test]
    fn test_geometry_fits_surface() {
        let g = WheelGeometry::fit(400.0, 300.0);
        assert!(g.center.y - g.radius - g.pointer_length / 2.0 >= 0.0);
        assert!(g.center.y + g.radius <= 300.0 + 1e-9);
        assert!(g.center.x - g.radius >= 0.0);
    }

    #[test]
    fn test_wedges_cover_circle() {
        let w = wheel(&[1.0, 2.0, 3.0, 0.0]);
        let scene = WheelScene::compose(&w, WheelGeometry::fit(500.0, 500.0), true);
        assert_eq!(scene.wedges.len(), 3);
        let total: f64 = scene.wedges.iter().map(|w| w.sweep).sum();
        assert!((total - TAU).abs() < 1e-9);
        assert_eq!(scene.labels.len(), 3);
        assert_eq!(scene.labels[2].text, "Activity 2");
    }

    #[test]
    fn test_labels_hidden() {
        let w = wheel(&[1.0, 1.0]);
        let scene = WheelScene::compose(&w, WheelGeometry::fit(500.0, 500.0), false);
        assert!(scene.labels.is_empty());
    }

    #[test]
    fn test_pointer_points_up() {
        let w = wheel(&[1.0]);
        let scene = WheelScene::compose(&w, WheelGeometry::fit(500.0, 500.0), true);
        let dir = scene.pointer.tip - scene.geometry.center;
        assert!(dir.x.abs() < 1e-12);
        assert!(dir.y < 0.0);
        assert!(scene.pointer.base_left.y < scene.pointer.tip.y);
    }

    #[test]
    fn test_exactly_one_wedge_highlighted() {
        let mut w = wheel(&[3.0, 1.0, 2.0]);
        w.set_angle(1.3);
        let scene = WheelScene::compose(&w, WheelGeometry::fit(500.0, 500.0), true);
        let lit: Vec<_> = scene.wedges.iter().filter(|w| w.highlighted).collect();
        assert_eq!(lit.len(), 1);
        assert_eq!(Some(lit[0]), scene.wedge_under_pointer());
    }

    #[test]
    fn test_drawn_pointer_matches_pick_winner() {
        let mut w = wheel(&[1.0, 4.0, 2.0, 0.5, 3.0]);
        let geometry = WheelGeometry::fit(640.0, 480.0);
        for k in 0..360 {
            // Offset keeps samples off exact boundaries
            let rotation = k as f64 * TAU / 360.0 + 0.0013;
            assert!(w.set_angle(rotation));
            let scene = WheelScene::compose(&w, geometry, false);
            let drawn = scene.wedge_under_pointer().map(|w| w.candidate);
            let picked = w.layout().pick_winner(pointer_angle(rotation)).candidate;
            assert_eq!(drawn, Some(picked), "rotation {rotation}");
        }
    }

    #[test]
    fn test_completed_spins_match_drawn_pointer() {
        let candidates: Vec<Candidate> = (0..7)
            .map(|i| Candidate::weighted(format!("a{i}"), format!("A{i}"), (i + 1) as f64))
            .collect();
        for seed in 0..20 {
            let mut w = Wheel::new(candidates.clone(), None, SpinConfig::default(), seed).unwrap();
            w.start();
            let outcome = loop {
                if let Some(o) = w.tick() {
                    break o;
                }
            };
            let scene = WheelScene::compose(&w, WheelGeometry::fit(300.0, 300.0), true);
            let drawn = scene.wedge_under_pointer().map(|w| w.candidate);
            assert_eq!(drawn, Some(outcome.candidate), "seed {seed}");
        }
    }

    proptest! {
        #[test]
        fn prop_pointer_selection_consistent(
            weights in prop::collection::vec(0.5f64..10.0, 1..12),
            rotation in -50.0f64..50.0,
        ) {
            let mut w = wheel(&weights);
            w.set_angle(rotation);
            let scene = WheelScene::compose(&w, WheelGeometry::fit(800.0, 600.0), false);
            let drawn = scene.wedge_under_pointer().map(|w| w.candidate);
            let picked = w.layout().pick_winner(pointer_angle(rotation)).candidate;
            prop_assert_eq!(drawn, Some(picked));
        }
    }
}
