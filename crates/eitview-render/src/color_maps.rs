//! Diverging color map and frame normalization.

use glam::Vec3;

/// Normalization divisor for a frame.
///
/// The larger of the frame's largest magnitude and `threshold`, so small
/// signals are not blown up to full color. Falls back to 1 when both are zero.
pub fn normalization(values: &[f32], threshold: f32) -> f32 {
    let min = values.iter().copied().fold(f32::INFINITY, f32::min);
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let norm = (-min).max(max).max(threshold);
    if norm == 0.0 || !norm.is_finite() {
        1.0
    } else {
        norm
    }
}

/// Blue → green → red map keyed on a normalized value in roughly [-1, 1].
///
/// Each channel is a clamped tent: `clamp(-2 |v - c| + 1.5, 0, 1)` with
/// centers 0.5 (red), 0 (green) and -0.5 (blue).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DivergingColorMap;

impl DivergingColorMap {
    const CENTERS: [f32; 3] = [0.5, 0.0, -0.5];

    /// Samples the color map at a normalized value.
    pub fn sample(self, value: f32) -> Vec3 {
        let [r, g, b] = Self::CENTERS.map(|center| tent(value, center));
        Vec3::new(r, g, b)
    }
}

fn tent(value: f32, center: f32) -> f32 {
    (-2.0 * (value - center).abs() + 1.5).clamp(0.0, 1.0)
}
