//! Error types for model construction and geometry loading

use std::io;
use thiserror::Error;

/// A model whose indices or colours don't line up with its vertices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("face {face} references vertex {index}, model has {vertex_count} vertices")]
    FaceIndex {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
    #[error("edge {edge} references vertex {index}, model has {vertex_count} vertices")]
    EdgeIndex {
        edge: usize,
        index: usize,
        vertex_count: usize,
    },
    #[error("{colors} face colours given for {faces} faces")]
    ColorCount { colors: usize, faces: usize },
}

/// Failure to turn a geometry file into a model.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("failed to read geometry file: {0}")]
    Io(#[from] io::Error),
    #[error("geometry contains no vertices")]
    Empty,
    #[error("invalid model: {0}")]
    Model(#[from] ModelError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_error_display() {
        let err = ModelError::FaceIndex {
            face: 3,
            index: 8,
            vertex_count: 8,
        };
        let msg = err.to_string();
        assert!(msg.contains("face 3"));
        assert!(msg.contains("vertex 8"));
    }

    #[test]
    fn test_geometry_error_wraps_sources() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "dog.obj missing");
        let err: GeometryError = io_err.into();
        assert!(err.to_string().contains("dog.obj missing"));

        let err: GeometryError = ModelError::ColorCount { colors: 1, faces: 2 }.into();
        assert!(matches!(err, GeometryError::Model(_)));
    }
}
