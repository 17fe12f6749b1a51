/// Orthographic mapping from transformed vertices to surface coordinates
use nalgebra::Point2;

use crate::math::{vec4, Vec4};

/// Drawable area the scene is projected onto.
///
/// There is no camera: the model-space origin is placed at the centre of
/// the area and x/y are used as-is (no perspective divide).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Offset added to every transformed vertex: half the width and height
    pub fn origin(&self) -> Vec4 {
        vec4(self.width / 2.0, self.height / 2.0, 0.0)
    }

    /// Drop z (and w) of an already offset vertex
    pub fn to_screen(vertex: &Vec4) -> Point2<f32> {
        Point2::new(vertex.x, vertex.y)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}
