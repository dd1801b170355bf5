//! Area weights used to spread per-triangle values onto mesh nodes.

use glam::Vec2;

use crate::mesh::Mesh;

/// Per-triangle and per-node areas of a mesh.
///
/// `node_area[n]` is the sum of the full areas of every triangle incident to
/// node `n`, so summed over all nodes it equals three times the total
/// triangle area.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaWeights {
    triangle_area: Vec<f32>,
    node_area: Vec<f32>,
}

impl AreaWeights {
    /// Computes the weights for a mesh.
    pub fn compute(mesh: &Mesh) -> Self {
        let mut triangle_area = Vec::with_capacity(mesh.num_triangles());
        let mut node_area = vec![0.0; mesh.num_nodes()];

        for (triangle, ids) in mesh.triangles().iter().enumerate() {
            let area = triangle_area_2d(mesh.triangle_nodes(triangle));
            triangle_area.push(area);
            for &id in ids {
                node_area[id as usize] += area;
            }
        }

        Self {
            triangle_area,
            node_area,
        }
    }

    /// Area of each triangle, indexed by triangle id.
    pub fn triangle_area(&self) -> &[f32] {
        &self.triangle_area
    }

    /// Accumulated incident area of each node, indexed by node id.
    pub fn node_area(&self) -> &[f32] {
        &self.node_area
    }

    /// Total mesh area.
    pub fn total_area(&self) -> f32 {
        self.triangle_area.iter().sum()
    }
}

/// Unsigned area of a 2-D triangle (shoelace formula).
pub fn triangle_area_2d([p0, p1, p2]: [Vec2; 3]) -> f32 {
    0.5 * ((p1.x - p0.x) * (p2.y - p0.y) - (p2.x - p0.x) * (p1.y - p0.y)).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn right_triangle() -> Mesh {
        Mesh::new(
            vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)],
            vec![[0, 1, 2]],
            vec![],
            1.0,
        )
        .unwrap()
    }

    #[test]
    fn test_right_triangle_area() {
        let weights = AreaWeights::compute(&right_triangle());
        assert_eq!(weights.triangle_area(), &[0.5]);
        assert_eq!(weights.node_area(), &[0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_orientation_independent() {
        let ccw = [Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0), Vec2::new(0.0, 3.0)];
        let cw = [ccw[0], ccw[2], ccw[1]];
        assert_eq!(triangle_area_2d(ccw), 3.0);
        assert_eq!(triangle_area_2d(cw), 3.0);
    }

    #[test]
    fn test_degenerate_triangle_is_zero() {
        let mesh = Mesh::new(
            vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)],
            vec![[0, 1, 2]],
            vec![],
            1.0,
        )
        .unwrap();
        let weights = AreaWeights::compute(&mesh);
        assert_eq!(weights.triangle_area(), &[0.0]);
        assert_eq!(weights.node_area(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_shared_edge_node_area() {
        // Two unit right triangles sharing the diagonal 0-2.
        let mesh = Mesh::new(
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
            vec![],
            1.0,
        )
        .unwrap();
        let weights = AreaWeights::compute(&mesh);
        assert_eq!(weights.node_area(), &[1.0, 0.5, 1.0, 0.5]);
        assert_eq!(weights.total_area(), 1.0);
    }

    proptest! {
        #[test]
        fn node_area_sums_to_three_times_triangle_area(
            points in prop::collection::vec((-10.0f32..10.0, -10.0f32..10.0), 3..12),
            picks in prop::collection::vec((0usize..1000, 0usize..1000, 0usize..1000), 1..20),
        ) {
            let n = points.len();
            let nodes = points.iter().map(|&(x, y)| Vec2::new(x, y)).collect();
            #[allow(clippy::cast_possible_truncation)]
            let triangles = picks
                .iter()
                .map(|&(a, b, c)| [(a % n) as u32, (b % n) as u32, (c % n) as u32])
                .collect();
            let mesh = Mesh::new(nodes, triangles, vec![], 1.0).unwrap();
            let weights = AreaWeights::compute(&mesh);

            let node_sum: f32 = weights.node_area().iter().sum();
            let tri_sum = weights.total_area();
            prop_assert!((node_sum - 3.0 * tri_sum).abs() <= 1e-3 * (1.0 + tri_sum));
            prop_assert!(weights.triangle_area().iter().all(|&a| a >= 0.0));
        }
    }
}
