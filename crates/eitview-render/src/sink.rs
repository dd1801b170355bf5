//! The seam between the viewer and a rasterizer.

use glam::{Mat4, Vec3};

use crate::error::{RenderError, RenderResult};

/// Flat, borrowed buffers for one render pass.
///
/// Positions and colors hold three floats per vertex. Triangles are drawn as
/// a triangle list, electrodes as a line list.
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    pub triangle_positions: &'a [f32],
    pub triangle_colors: &'a [f32],
    pub line_positions: &'a [f32],
    pub line_colors: &'a [f32],
    /// Clip-space transform applied to every vertex.
    pub transform: Mat4,
    pub background: Vec3,
}

impl RenderFrame<'_> {
    /// Number of triangle-list vertices.
    pub fn triangle_vertex_count(&self) -> usize {
        self.triangle_positions.len() / 3
    }

    /// Number of line-list vertices.
    pub fn line_vertex_count(&self) -> usize {
        self.line_positions.len() / 3
    }

    /// Checks that every position has a color.
    pub fn validate(&self) -> RenderResult<()> {
        for (positions, colors) in [
            (self.triangle_positions, self.triangle_colors),
            (self.line_positions, self.line_colors),
        ] {
            if positions.len() != colors.len() || positions.len() % 3 != 0 {
                return Err(RenderError::BufferMismatch {
                    positions: positions.len(),
                    colors: colors.len(),
                });
            }
        }
        Ok(())
    }
}

/// Something that can draw a [`RenderFrame`].
pub trait RenderSink {
    /// Width over height of the target, used for the projection.
    fn aspect_ratio(&self) -> f32 {
        1.0
    }

    /// Draws one frame.
    fn submit(&mut self, frame: &RenderFrame<'_>) -> RenderResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame<'a>(positions: &'a [f32], colors: &'a [f32]) -> RenderFrame<'a> {
        RenderFrame {
            triangle_positions: positions,
            triangle_colors: colors,
            line_positions: &[],
            line_colors: &[],
            transform: Mat4::IDENTITY,
            background: Vec3::ONE,
        }
    }

    #[test]
    fn test_validate() {
        let p = [0.0; 9];
        assert!(frame(&p, &[0.0; 9]).validate().is_ok());
        assert!(matches!(
            frame(&p, &[0.0; 6]).validate(),
            Err(RenderError::BufferMismatch { positions: 9, colors: 6 })
        ));
        assert!(frame(&[0.0; 4], &[0.0; 4]).validate().is_err());
    }
}
