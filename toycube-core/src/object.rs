/// Placed instances of shared models
use std::sync::Arc;

use crate::geometry::Model3D;
use crate::math::Vec4;
use crate::transform::{pipeline, Transform};

/// A model placed in the scene with its own position, rotation and scale.
///
/// Owns no geometry: many objects can share one [`Model3D`].
#[derive(Debug, Clone)]
pub struct Object3D {
    model: Arc<Model3D>,
    pub transform: Transform,
}

impl Object3D {
    pub fn new(model: Arc<Model3D>, transform: Transform) -> Self {
        Self { model, transform }
    }

    pub fn model(&self) -> &Arc<Model3D> {
        &self.model
    }

    pub fn set_model(&mut self, model: Arc<Model3D>) {
        self.model = model;
    }

    /// Model vertices run through this object's transform
    pub fn screen_vertices(&self, origin: &Vec4) -> Vec<Vec4> {
        pipeline(self.model.vertices(), &self.transform, origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec4;

    #[test]
    fn test_objects_share_model() {
        let model = Arc::new(Model3D::cube());
        let a = Object3D::new(Arc::clone(&model), Transform::identity());
        let b = Object3D::new(Arc::clone(&model), Transform::uniform(vec4(5.0, 0.0, 0.0), 2.0));
        assert!(Arc::ptr_eq(a.model(), b.model()));
        assert_eq!(Arc::strong_count(&model), 3);
    }

    #[test]
    fn test_screen_vertices_follow_transform() {
        let obj = Object3D::new(
            Arc::new(Model3D::cube()),
            Transform::uniform(vec4(10.0, 0.0, 0.0), 2.0),
        );
        let out = obj.screen_vertices(&vec4(100.0, 50.0, 0.0));
        assert_eq!(out.len(), 8);
        // vertex 0 is (1, 1, 1)
        assert_eq!(out[0], vec4(112.0, 52.0, 2.0));
    }
}
