/// Scene: the ordered set of placed objects the renderer draws
use std::sync::Arc;

use crate::geometry::Model3D;
use crate::math::vec4;
use crate::object::Object3D;
use crate::settings::SceneLayout;
use crate::transform::Transform;

/// Ordered objects plus the layout they were built from
#[derive(Debug, Clone)]
pub struct Scene {
    layout: SceneLayout,
    objects: Vec<Object3D>,
}

impl Scene {
    /// Populate a scene with `model` according to `layout`
    pub fn setup(layout: SceneLayout, model: Arc<Model3D>) -> Self {
        let objects = match &layout {
            SceneLayout::Single { scale } => {
                vec![Object3D::new(model, Transform::uniform(vec4(0.0, 0.0, 0.0), *scale))]
            }
            &SceneLayout::Grid {
                cols,
                rows,
                spacing,
                scale,
            } => {
                let x0 = (cols.saturating_sub(1)) as f32 * spacing / 2.0;
                let y0 = (rows.saturating_sub(1)) as f32 * spacing / 2.0;
                let mut objects = Vec::with_capacity(cols * rows);
                for row in 0..rows {
                    for col in 0..cols {
                        let position = vec4(col as f32 * spacing - x0, row as f32 * spacing - y0, 0.0);
                        objects.push(Object3D::new(
                            Arc::clone(&model),
                            Transform::uniform(position, scale),
                        ));
                    }
                }
                objects
            }
        };

        log::debug!("scene set up with {} object(s), layout {:?}", objects.len(), layout);
        Self { layout, objects }
    }

    /// Rebuild the object list wholesale, keeping the current model
    pub fn reset(&mut self, layout: SceneLayout) {
        let model = self
            .objects
            .first()
            .map(|o| Arc::clone(o.model()))
            .unwrap_or_else(|| Arc::new(Model3D::cube()));
        *self = Self::setup(layout, model);
    }

    /// Swap the model of every object, keeping their placements
    pub fn replace_model(&mut self, model: Arc<Model3D>) {
        for object in &mut self.objects {
            object.set_model(Arc::clone(&model));
        }
        log::info!(
            "model replaced: {} vertices, {} faces",
            model.vertices().len(),
            model.faces().len()
        );
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    pub fn objects(&self) -> &[Object3D] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut [Object3D] {
        &mut self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::setup(SceneLayout::default(), Arc::new(Model3D::cube()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec4;

    #[test]
    fn test_single_scene() {
        let scene = Scene::default();
        assert_eq!(scene.len(), 1);
        let t = scene.objects()[0].transform;
        assert_eq!(t.position, Vec4::zeros());
        assert_eq!(t.rotation, Vec4::zeros());
        assert_eq!(t.scale, vec4(100.0, 100.0, 100.0));
    }

    #[test]
    fn test_grid_scene_is_centred() {
        let scene = Scene::setup(SceneLayout::grid(), Arc::new(Model3D::cube()));
        assert_eq!(scene.len(), 100);

        let sum = scene
            .objects()
            .iter()
            .fold(Vec4::zeros(), |acc, o| acc + o.transform.position);
        assert!(sum.norm() < 1e-3);

        let first = scene.objects()[0].transform.position;
        assert_eq!(first, vec4(-180.0, -180.0, 0.0));
        assert_eq!(scene.objects()[1].transform.position, vec4(-140.0, -180.0, 0.0));
        assert_eq!(scene.objects()[0].transform.scale, vec4(10.0, 10.0, 10.0));
    }

    #[test]
    fn test_grid_objects_share_one_model() {
        let model = Arc::new(Model3D::cube());
        let scene = Scene::setup(SceneLayout::grid(), Arc::clone(&model));
        assert!(scene.objects().iter().all(|o| Arc::ptr_eq(o.model(), &model)));
    }

    #[test]
    fn test_replace_model_keeps_placement() {
        let mut scene = Scene::setup(SceneLayout::grid(), Arc::new(Model3D::cube()));
        scene.objects_mut()[5].transform.rotate(1.0, 0.0, 0.0);

        let tri = Arc::new(
            Model3D::new(
                vec![vec4(0.0, 0.0, 0.0), vec4(1.0, 0.0, 0.0), vec4(0.0, 1.0, 0.0)],
                vec![[0, 1, 2]],
                vec![],
                vec![],
            )
            .unwrap(),
        );
        scene.replace_model(Arc::clone(&tri));

        assert!(scene.objects().iter().all(|o| Arc::ptr_eq(o.model(), &tri)));
        assert_eq!(scene.objects()[5].transform.rotation.x, 1.0);
    }

    #[test]
    fn test_reset_rebuilds_objects() {
        let mut scene = Scene::default();
        scene.objects_mut()[0].transform.rotate(0.5, 0.0, 0.0);
        scene.reset(SceneLayout::grid());
        assert_eq!(scene.len(), 100);
        scene.reset(SceneLayout::single());
        assert_eq!(scene.objects()[0].transform.rotation, Vec4::zeros());
    }
}
