//! Maps one reconstruction frame onto colors and node heights.

use eitview_core::{AreaWeights, Mesh};

use crate::buffer::SceneBuffers;
use crate::color_maps::{normalization, DivergingColorMap};

/// Colors the triangles and lifts the nodes of `buffers` for one frame.
///
/// `values` holds one scalar per triangle. Colors are flat per triangle; the
/// height of node `n` is the negated area-weighted average of its incident
/// triangle values, divided by the frame norm. Both buffers are fully
/// overwritten. Returns the norm used.
///
/// Zero-area triangles contribute nothing to the heights.
pub fn map_frame(
    buffers: &mut SceneBuffers,
    mesh: &Mesh,
    weights: &AreaWeights,
    values: &[f32],
    threshold: f32,
) -> f32 {
    debug_assert_eq!(values.len(), mesh.num_triangles());

    let norm = normalization(values, threshold);
    let triangle_area = weights.triangle_area();
    let node_area = weights.node_area();
    let (positions, colors, heights) = buffers.parts_mut();

    heights.iter_mut().for_each(|h| *h = 0.0);

    for (triangle, ids) in mesh.triangles().iter().enumerate() {
        let value = values[triangle];
        let color = DivergingColorMap.sample(value / norm).to_array();
        colors[triangle * 3..triangle * 3 + 3].fill(color);

        let area = triangle_area[triangle];
        if area == 0.0 {
            continue;
        }
        for &id in ids {
            let id = id as usize;
            heights[id] -= value * area / (node_area[id] * norm);
        }
    }

    for (triangle, ids) in mesh.triangles().iter().enumerate() {
        for (corner, &id) in ids.iter().enumerate() {
            positions[triangle * 3 + corner][2] = heights[id as usize];
        }
    }

    norm
}
