/// Geometry templates shared by placed objects
use crate::error::ModelError;
use crate::math::{vec4, Vec4};

/// Vertex indices of a filled triangle, in winding order
pub type Face = [usize; 3];

/// Vertex indices of a line segment
pub type Edge = [usize; 2];

/// Immutable vertex/face/edge template.
///
/// Built once and shared behind an `Arc` by every object placed from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Model3D {
    vertices: Vec<Vec4>,
    faces: Vec<Face>,
    edges: Vec<Edge>,
    colors: Vec<Vec4>,
}

impl Model3D {
    /// Build a model, checking every index against the vertex list.
    ///
    /// `colors` is either empty or holds one RGBA (0..1) entry per face.
    pub fn new(
        vertices: Vec<Vec4>,
        faces: Vec<Face>,
        edges: Vec<Edge>,
        colors: Vec<Vec4>,
    ) -> Result<Self, ModelError> {
        let vertex_count = vertices.len();

        for (face, indices) in faces.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i >= vertex_count) {
                return Err(ModelError::FaceIndex {
                    face,
                    index,
                    vertex_count,
                });
            }
        }

        for (edge, indices) in edges.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i >= vertex_count) {
                return Err(ModelError::EdgeIndex {
                    edge,
                    index,
                    vertex_count,
                });
            }
        }

        if !colors.is_empty() && colors.len() != faces.len() {
            return Err(ModelError::ColorCount {
                colors: colors.len(),
                faces: faces.len(),
            });
        }

        Ok(Self {
            vertices,
            faces,
            edges,
            colors,
        })
    }

    pub fn vertices(&self) -> &[Vec4] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Colour of face `index`, if the model carries per-face colours
    pub fn face_color(&self, index: usize) -> Option<Vec4> {
        self.colors.get(index).copied()
    }

    /// Edges to draw in wireframe mode.
    ///
    /// Models without explicit edges outline each face instead.
    pub fn outline(&self) -> Vec<Edge> {
        if !self.edges.is_empty() {
            return self.edges.clone();
        }
        self.faces
            .iter()
            .flat_map(|&[a, b, c]| [[a, b], [b, c], [c, a]])
            .collect()
    }

    /// Unit cube spanning -1..1 on every axis.
    ///
    /// Vertices 0-3 lie on z = +1, 4-7 on z = -1. Faces keep the winding
    /// the shading test expects; every face is coloured (0, 1, 1, 1).
    pub fn cube() -> Self {
        let vertices = vec![
            vec4(1.0, 1.0, 1.0),
            vec4(1.0, -1.0, 1.0),
            vec4(-1.0, -1.0, 1.0),
            vec4(-1.0, 1.0, 1.0),
            vec4(1.0, 1.0, -1.0),
            vec4(1.0, -1.0, -1.0),
            vec4(-1.0, -1.0, -1.0),
            vec4(-1.0, 1.0, -1.0),
        ];

        let faces = vec![
            // z = +1
            [0, 1, 2],
            [0, 2, 3],
            // z = -1
            [4, 6, 5],
            [4, 7, 6],
            // sides
            [0, 4, 5],
            [0, 5, 1],
            [1, 5, 6],
            [1, 6, 2],
            [2, 6, 7],
            [2, 7, 3],
            [3, 7, 4],
            [3, 4, 0],
        ];

        let edges = vec![
            [0, 1],
            [1, 2],
            [2, 3],
            [3, 0],
            [4, 5],
            [5, 6],
            [6, 7],
            [7, 4],
            [0, 4],
            [1, 5],
            [2, 6],
            [3, 7],
        ];

        let colors = vec![Vec4::new(0.0, 1.0, 1.0, 1.0); faces.len()];

        Self {
            vertices,
            faces,
            edges,
            colors,
        }
    }
}

impl Default for Model3D {
    fn default() -> Self {
        Self::cube()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_shape() {
        let cube = Model3D::cube();
        assert_eq!(cube.vertices().len(), 8);
        assert_eq!(cube.faces().len(), 12);
        assert_eq!(cube.edges().len(), 12);
        assert_eq!(cube.face_color(11), Some(Vec4::new(0.0, 1.0, 1.0, 1.0)));
        assert_eq!(cube.face_color(12), None);
    }

    #[test]
    fn test_cube_passes_validation() {
        let cube = Model3D::cube();
        let rebuilt = Model3D::new(
            cube.vertices.clone(),
            cube.faces.clone(),
            cube.edges.clone(),
            cube.colors.clone(),
        );
        assert_eq!(rebuilt, Ok(cube));
    }

    #[test]
    fn test_rejects_out_of_range_face() {
        let err = Model3D::new(vec![vec4(0.0, 0.0, 0.0); 3], vec![[0, 1, 3]], vec![], vec![])
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::FaceIndex {
                face: 0,
                index: 3,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn test_rejects_out_of_range_edge() {
        let err = Model3D::new(vec![vec4(0.0, 0.0, 0.0); 2], vec![], vec![[1, 2]], vec![])
            .unwrap_err();
        assert!(matches!(err, ModelError::EdgeIndex { index: 2, .. }));
    }

    #[test]
    fn test_rejects_colour_mismatch() {
        let err = Model3D::new(
            vec![vec4(0.0, 0.0, 0.0); 3],
            vec![[0, 1, 2]],
            vec![],
            vec![Vec4::zeros(); 2],
        )
        .unwrap_err();
        assert_eq!(err, ModelError::ColorCount { colors: 2, faces: 1 });
    }

    #[test]
    fn test_outline_falls_back_to_faces() {
        let tri = Model3D::new(vec![vec4(0.0, 0.0, 0.0); 3], vec![[0, 1, 2]], vec![], vec![])
            .unwrap();
        assert_eq!(tri.outline(), vec![[0, 1], [1, 2], [2, 0]]);
        assert_eq!(Model3D::cube().outline().len(), 12);
    }
}
