//! Summary statistics of the displayed frame.

use crate::geometry::AreaWeights;

/// Area-weighted statistics of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStatistics {
    /// Smallest triangle value.
    pub min: f32,
    /// Largest triangle value.
    pub max: f32,
    /// Mean weighted by triangle area.
    pub mean: f32,
    /// Standard deviation weighted by triangle area.
    pub std_dev: f32,
}

impl FrameStatistics {
    /// Computes statistics of `values` (one per triangle).
    ///
    /// Returns `None` for an empty frame. If the mesh has zero total area the
    /// mean and deviation are unweighted.
    pub fn compute(values: &[f32], weights: &AreaWeights) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let min = values.iter().copied().fold(f32::INFINITY, f32::min);
        let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);

        let areas = weights.triangle_area();
        let total: f32 = areas.iter().take(values.len()).sum();
        let weight = |i: usize| -> f32 {
            if total > 0.0 {
                areas.get(i).copied().unwrap_or(0.0) / total
            } else {
                #[allow(clippy::cast_precision_loss)]
                let n = values.len() as f32;
                1.0 / n
            }
        };

        let mean: f32 = values.iter().enumerate().map(|(i, &v)| v * weight(i)).sum();
        let variance: f32 = values
            .iter()
            .enumerate()
            .map(|(i, &v)| (v - mean).powi(2) * weight(i))
            .sum();

        Some(Self {
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
        })
    }
}

/// Figures about the playback itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackStatistics {
    /// Frames shown per second while playing; 0 when still.
    pub system_fps: f64,
    /// Normalization threshold as a percentage.
    pub threshold_percent: f32,
    /// Number of mesh triangles.
    pub mesh_elements: usize,
}

impl PlaybackStatistics {
    /// Computes playback figures from the tick period (seconds) and increment.
    pub fn compute(tick_period: f64, increment: f64, threshold: f32, mesh_elements: usize) -> Self {
        let system_fps = if increment > 0.0 {
            1.0 / (tick_period / increment)
        } else {
            0.0
        };
        Self {
            system_fps,
            threshold_percent: threshold * 100.0,
            mesh_elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;
    use glam::Vec2;

    fn two_triangles() -> AreaWeights {
        // areas 0.5 and 1.0
        let mesh = Mesh::new(
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(3.0, 0.0),
                Vec2::new(0.0, 3.0),
            ],
            vec![[0, 1, 2], [1, 3, 2]],
            vec![],
            1.0,
        )
        .unwrap();
        AreaWeights::compute(&mesh)
    }

    #[test]
    fn test_weighted_statistics() {
        let weights = two_triangles();
        let total = weights.total_area();
        let a0 = weights.triangle_area()[0] / total;
        let a1 = weights.triangle_area()[1] / total;

        let stats = FrameStatistics::compute(&[2.0, -1.0], &weights).unwrap();
        assert_eq!(stats.min, -1.0);
        assert_eq!(stats.max, 2.0);
        let mean = 2.0 * a0 - a1;
        assert!((stats.mean - mean).abs() < 1e-5);
        let var = (2.0 - mean).powi(2) * a0 + (-1.0 - mean).powi(2) * a1;
        assert!((stats.std_dev - var.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_constant_frame_has_no_spread() {
        let stats = FrameStatistics::compute(&[0.7, 0.7], &two_triangles()).unwrap();
        assert!((stats.mean - 0.7).abs() < 1e-6);
        assert!(stats.std_dev.abs() < 1e-6);
    }

    #[test]
    fn test_empty_frame() {
        assert!(FrameStatistics::compute(&[], &AreaWeights::default()).is_none());
    }

    #[test]
    fn test_playback_statistics() {
        let stats = PlaybackStatistics::compute(0.02, 1.0, 0.1, 42);
        assert!((stats.system_fps - 50.0).abs() < 1e-9);
        assert!((stats.threshold_percent - 10.0).abs() < 1e-5);
        assert_eq!(stats.mesh_elements, 42);

        assert_eq!(PlaybackStatistics::compute(0.02, 0.0, 0.1, 1).system_fps, 0.0);
    }
}
