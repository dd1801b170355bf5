//! Triangulated 2-D reconstruction mesh.

use glam::Vec2;

use crate::error::{EitViewError, Result};
use crate::io::TextMatrix;

/// Immutable mesh description: nodes, triangles and electrode segments.
///
/// Node and triangle ids are their positions in the respective vectors.
/// Coordinates are in raw model units; [`Mesh::radius`] maps them into the
/// unit render space.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    nodes: Vec<Vec2>,
    triangles: Vec<[u32; 3]>,
    electrodes: Vec<[Vec2; 2]>,
    radius: f32,
}

impl Mesh {
    /// Creates and validates a mesh.
    ///
    /// Fails if a triangle references a node id out of range or the radius is
    /// not a positive finite number.
    pub fn new(
        nodes: Vec<Vec2>,
        triangles: Vec<[u32; 3]>,
        electrodes: Vec<[Vec2; 2]>,
        radius: f32,
    ) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(EitViewError::InvalidMesh(format!(
                "radius must be positive, got {radius}"
            )));
        }

        for (triangle, ids) in triangles.iter().enumerate() {
            if let Some(&bad) = ids.iter().find(|&&id| id as usize >= nodes.len()) {
                return Err(EitViewError::InvalidMesh(format!(
                    "triangle {triangle} references node {bad}, mesh has {} nodes",
                    nodes.len()
                )));
            }
        }

        Ok(Self {
            nodes,
            triangles,
            electrodes,
            radius,
        })
    }

    /// Builds a mesh from text matrices.
    ///
    /// `nodes` is N×2 (x, y), `elements` is M×3 node ids, `electrodes` is E×4
    /// (x0, y0, x1, y1).
    pub fn from_matrices(
        nodes: &TextMatrix,
        elements: &TextMatrix,
        electrodes: &TextMatrix,
        radius: f32,
    ) -> Result<Self> {
        expect_columns("nodes", nodes, 2)?;
        expect_columns("elements", elements, 3)?;
        expect_columns("electrodes", electrodes, 4)?;

        let nodes = nodes.iter_rows().map(|r| Vec2::new(r[0], r[1])).collect();

        let mut triangles = Vec::with_capacity(elements.rows());
        for (element, row) in elements.iter_rows().enumerate() {
            let mut ids = [0u32; 3];
            for (slot, &value) in ids.iter_mut().zip(row) {
                if value < 0.0 || value.fract() != 0.0 {
                    return Err(EitViewError::InvalidMesh(format!(
                        "element {element} has non-integer node id {value}"
                    )));
                }
                // Ids beyond u32 saturate and fail the range check in `new`.
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                {
                    *slot = value as u32;
                }
            }
            triangles.push(ids);
        }

        let electrodes = electrodes
            .iter_rows()
            .map(|r| [Vec2::new(r[0], r[1]), Vec2::new(r[2], r[3])])
            .collect();

        Self::new(nodes, triangles, electrodes, radius)
    }

    /// Node coordinates.
    pub fn nodes(&self) -> &[Vec2] {
        &self.nodes
    }

    /// Triangle connectivity.
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Electrode line segments.
    pub fn electrodes(&self) -> &[[Vec2; 2]] {
        &self.electrodes
    }

    /// Normalization radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Number of electrodes.
    pub fn num_electrodes(&self) -> usize {
        self.electrodes.len()
    }

    /// The three corner positions of a triangle.
    pub fn triangle_nodes(&self, triangle: usize) -> [Vec2; 3] {
        self.triangles[triangle].map(|id| self.nodes[id as usize])
    }

    /// A point scaled into render space.
    pub fn to_render_space(&self, point: Vec2) -> Vec2 {
        point / self.radius
    }

    /// Nodes and elements as text matrices, for dumping alongside logs.
    pub fn to_matrices(&self) -> Result<(TextMatrix, TextMatrix)> {
        let node_values = self.nodes.iter().flat_map(|n| [n.x, n.y]).collect();
        #[allow(clippy::cast_precision_loss)]
        let element_values = self
            .triangles
            .iter()
            .flat_map(|t| t.map(|id| id as f32))
            .collect();

        let nodes = TextMatrix::new(self.nodes.len(), 2, node_values)?;
        let elements = TextMatrix::new(self.triangles.len(), 3, element_values)?;
        Ok((nodes, elements))
    }
}

fn expect_columns(what: &str, matrix: &TextMatrix, columns: usize) -> Result<()> {
    if matrix.rows() > 0 && matrix.columns() != columns {
        return Err(EitViewError::InvalidMesh(format!(
            "{what} matrix must have {columns} columns, found {}",
            matrix.columns()
        )));
    }
    Ok(())
}
