//! Selection model: weights to circular partition, angle to winner
//!
//! Segment 0 starts at the wheel's local zero and the rest follow in
//! candidate order. Lengths are proportional to weight, and the last segment
//! always ends at exactly 2π.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use super::candidate::Candidate;
use crate::error::WheelError;
use crate::normalize_angle;

/// Number of colors in the wheel palette
pub const PALETTE_SIZE: usize = 6;

/// Half-open angular interval `[start, end)` owned by one candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Index into the wheel's candidate list
    pub candidate: usize,
    /// Start angle (radians, in [0, 2π))
    pub start: f64,
    /// End angle (radians, in (0, 2π])
    pub end: f64,
    /// Palette slot, never shared with an adjacent segment
    pub color: usize,
}

impl Segment {
    #[inline]
    pub fn angular_span(&self) -> f64 {
        self.end - self.start
    }

    #[inline]
    pub fn mid_angle(&self) -> f64 {
        self.start + self.angular_span() / 2.0
    }

    /// Half-open containment on an already-normalized angle
    #[inline]
    pub fn contains_angle(&self, theta: f64) -> bool {
        theta >= self.start && theta < self.end
    }
}

/// Ordered segment list tiling the full circle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelLayout {
    segments: Vec<Segment>,
}

impl WheelLayout {
    /// Build the partition for `candidates`.
    ///
    /// `weights`, when given, overrides the candidates' own weights and must
    /// match them in length. Zero-weight candidates get no segment, unless
    /// every weight is zero, in which case all candidates share the wheel
    /// evenly.
    pub fn build(candidates: &[Candidate], weights: Option<&[f64]>) -> Result<Self, WheelError> {
        Self::build_with_palette(candidates, weights, PALETTE_SIZE)
    }

    pub fn build_with_palette(
        candidates: &[Candidate],
        weights: Option<&[f64]>,
        palette_size: usize,
    ) -> Result<Self, WheelError> {
        if candidates.is_empty() {
            return Err(WheelError::EmptyCandidates);
        }
        if let Some(w) = weights {
            if w.len() != candidates.len() {
                return Err(WheelError::WeightCountMismatch {
                    expected: candidates.len(),
                    actual: w.len(),
                });
            }
        }

        let raw = resolve_weights(candidates, weights)?;

        // Scale by the largest weight so huge like counts can't overflow the sum
        let max = raw.iter().copied().fold(0.0_f64, f64::max);
        let weighted: Vec<(usize, f64)> = if max > 0.0 {
            raw.iter()
                .enumerate()
                .filter(|(_, w)| **w > 0.0)
                .map(|(i, w)| (i, w / max))
                .collect()
        } else {
            // All zero (or absent): uniform over everything
            (0..candidates.len()).map(|i| (i, 1.0)).collect()
        };

        let total: f64 = weighted.iter().map(|(_, w)| w).sum();
        let colors = assign_colors(weighted.len(), palette_size);

        let mut segments = Vec::with_capacity(weighted.len());
        let mut cumulative = 0.0;
        let mut start = 0.0;
        for (slot, &(candidate, weight)) in weighted.iter().enumerate() {
            cumulative += weight;
            let end = if slot + 1 == weighted.len() {
                TAU
            } else {
                (TAU * cumulative / total).min(TAU)
            };
            segments.push(Segment {
                candidate,
                start,
                end,
                color: colors[slot],
            });
            start = end;
        }

        log::debug!(
            "Built wheel layout: {} segments from {} candidates",
            segments.len(),
            candidates.len()
        );

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segment whose `[start, end)` contains the terminal angle.
    ///
    /// The angle is normalized first. Rounding that lands at or past the last
    /// boundary resolves to the last segment.
    pub fn pick_winner(&self, terminal_angle: f64) -> &Segment {
        let theta = normalize_angle(terminal_angle);
        let idx = self
            .segments
            .partition_point(|s| s.end <= theta)
            .min(self.segments.len().saturating_sub(1));
        &self.segments[idx]
    }

    /// Segment assigned to a candidate, if it has one
    pub fn segment_for(&self, candidate: usize) -> Option<&Segment> {
        self.segments.iter().find(|s| s.candidate == candidate)
    }
}

fn resolve_weights(candidates: &[Candidate], weights: Option<&[f64]>) -> Result<Vec<f64>, WheelError> {
    candidates
        .iter()
        .enumerate()
        .map(|(index, c)| {
            let weight = match weights {
                Some(w) => w[index],
                None => c.weight.unwrap_or(1.0),
            };
            if !weight.is_finite() {
                Err(WheelError::NonFiniteWeight { index })
            } else if weight < 0.0 {
                Err(WheelError::NegativeWeight { index, weight })
            } else {
                Ok(weight)
            }
        })
        .collect()
}

/// Palette slots for `count` consecutive segments around a circle.
///
/// Cycles through the palette, then repairs the wrap-around pair (last next to
/// first). With at least 3 colors no two neighbours match.
pub fn assign_colors(count: usize, palette_size: usize) -> Vec<usize> {
    let palette_size = palette_size.max(1);
    let mut colors: Vec<usize> = (0..count).map(|i| i % palette_size).collect();

    if count > 2 && colors[count - 1] == colors[0] {
        let prev = colors[count - 2];
        let first = colors[0];
        if let Some(c) = (0..palette_size).find(|&c| c != prev && c != first) {
            colors[count - 1] = c;
        }
    }

    colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;
    use std::f64::consts::PI;

    fn candidates(n: usize) -> Vec<Candidate> {
        (0..n)
            .map(|i| Candidate::new(format!("c{i}"), format!("Candidate {i}")))
            .collect()
    }

    #[test]
    fn test_empty_candidates_rejected() {
        let err = WheelLayout::build(&[], None).unwrap_err();
        assert!(matches!(err, WheelError::EmptyCandidates));
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let err = WheelLayout::build(&candidates(3), Some(&[1.0, -2.0, 1.0])).unwrap_err();
        assert!(matches!(err, WheelError::NegativeWeight { index: 1, .. }));
    }

    #[test]
    fn test_non_finite_weight_rejected() {
        let err = WheelLayout::build(&candidates(2), Some(&[f64::NAN, 1.0])).unwrap_err();
        assert!(matches!(err, WheelError::NonFiniteWeight { index: 0 }));
    }

    #[test]
    fn test_weight_count_mismatch_rejected() {
        let err = WheelLayout::build(&candidates(3), Some(&[1.0, 2.0])).unwrap_err();
        assert!(matches!(
            err,
            WheelError::WeightCountMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_uniform_fallback() {
        let cands = candidates(3);
        let zeros = WheelLayout::build(&cands, Some(&[0.0, 0.0, 0.0])).unwrap();
        let absent = WheelLayout::build(&cands, None).unwrap();
        assert_eq!(zeros, absent);
        assert_eq!(zeros.len(), 3);
        for seg in zeros.segments() {
            assert!((seg.angular_span() - TAU / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_weight_candidates_filtered() {
        let layout = WheelLayout::build(&candidates(4), Some(&[2.0, 0.0, 1.0, 1.0])).unwrap();
        assert_eq!(layout.len(), 3);
        assert!(layout.segment_for(1).is_none());
        let first = layout.segment_for(0).unwrap();
        assert!((first.angular_span() - PI).abs() < 1e-12);
    }

    #[test]
    fn test_candidate_weights_used_when_no_override() {
        let cands = vec![
            Candidate::weighted("a", "A", 1.0),
            Candidate::weighted("b", "B", 3.0),
        ];
        let layout = WheelLayout::build(&cands, None).unwrap();
        assert!((layout.segments()[0].angular_span() - TAU / 4.0).abs() < 1e-12);
        assert!((layout.segments()[1].angular_span() - 3.0 * TAU / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_candidate_weight_counts_as_one() {
        let cands = vec![Candidate::new("a", "A"), Candidate::weighted("b", "B", 1.0)];
        let layout = WheelLayout::build(&cands, None).unwrap();
        assert!((layout.segments()[0].angular_span() - PI).abs() < 1e-12);
    }

    #[test]
    fn test_huge_weights_do_not_overflow() {
        let layout = WheelLayout::build(&candidates(2), Some(&[f64::MAX, f64::MAX])).unwrap();
        assert!((layout.segments()[0].end - PI).abs() < 1e-12);
    }

    #[test]
    fn test_pick_winner_half_open_boundary() {
        let layout = WheelLayout::build(&candidates(2), None).unwrap();
        assert_eq!(layout.pick_winner(0.0).candidate, 0);
        assert_eq!(layout.pick_winner(PI).candidate, 1);
        assert_eq!(layout.pick_winner(PI - 1e-9).candidate, 0);
        // Deterministic
        assert_eq!(layout.pick_winner(2.0), layout.pick_winner(2.0));
    }

    #[test]
    fn test_pick_winner_normalizes_and_clamps() {
        let layout = WheelLayout::build(&candidates(2), None).unwrap();
        assert_eq!(layout.pick_winner(TAU).candidate, 0);
        assert_eq!(layout.pick_winner(-0.1).candidate, 1);
        assert_eq!(layout.pick_winner(5.0 * TAU + 0.1).candidate, 0);
        assert_eq!(layout.pick_winner(TAU - 1e-12).candidate, 1);
    }

    #[test]
    fn test_pick_winner_clamps_past_last_segment() {
        // Last boundary short of 2π, as accumulated rounding could leave it
        let layout = WheelLayout {
            segments: vec![
                Segment { candidate: 0, start: 0.0, end: 3.0, color: 0 },
                Segment { candidate: 1, start: 3.0, end: TAU - 1e-6, color: 1 },
            ],
        };
        assert_eq!(layout.pick_winner(TAU - 1e-9).candidate, 1);
    }

    #[test]
    fn test_weighted_proportionality() {
        let layout = WheelLayout::build(&candidates(2), Some(&[1.0, 3.0])).unwrap();
        let mut rng = Pcg32::seed_from_u64(42);
        let mut counts = [0u32; 2];
        for _ in 0..4000 {
            let angle = rng.random_range(0.0..TAU);
            counts[layout.pick_winner(angle).candidate] += 1;
        }
        let ratio = counts[1] as f64 / counts[0] as f64;
        assert!((ratio - 3.0).abs() / 3.0 < 0.15, "ratio was {ratio}");
    }

    #[test]
    fn test_adjacent_colors_differ() {
        for palette in 3..=8 {
            for count in 2..=30 {
                let colors = assign_colors(count, palette);
                for i in 0..count {
                    let next = (i + 1) % count;
                    assert_ne!(
                        colors[i], colors[next],
                        "count {count}, palette {palette}: slots {i} and {next}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_single_segment_covers_circle() {
        let layout = WheelLayout::build(&candidates(1), Some(&[7.0])).unwrap();
        let seg = layout.segments()[0];
        assert_eq!(seg.start, 0.0);
        assert_eq!(seg.end, TAU);
        assert_eq!(layout.pick_winner(4.0).candidate, 0);
    }

    proptest! {
        #[test]
        fn prop_segments_tile_circle(weights in prop::collection::vec(0.0f64..1000.0, 1..40)) {
            let cands = candidates(weights.len());
            let layout = WheelLayout::build(&cands, Some(&weights)).unwrap();
            let segs = layout.segments();

            prop_assert!(!segs.is_empty());
            prop_assert_eq!(segs[0].start, 0.0);
            prop_assert_eq!(segs[segs.len() - 1].end, TAU);
            for pair in segs.windows(2) {
                prop_assert_eq!(pair[0].end, pair[1].start);
            }
            for seg in segs {
                prop_assert!(seg.start <= seg.end);
            }
            let total: f64 = segs.iter().map(Segment::angular_span).sum();
            prop_assert!((total - TAU).abs() < 1e-9);
        }

        #[test]
        fn prop_pick_winner_contains_angle(
            weights in prop::collection::vec(0.1f64..50.0, 1..20),
            angle in -100.0f64..100.0,
        ) {
            let cands = candidates(weights.len());
            let layout = WheelLayout::build(&cands, Some(&weights)).unwrap();
            let seg = layout.pick_winner(angle);
            prop_assert!(seg.contains_angle(normalize_angle(angle)));
        }
    }
}
