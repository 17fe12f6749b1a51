//! Immediate-mode draw loop
//!
//! Each frame clears the whole surface, runs every object through the
//! transform pipeline and emits triangles, labels or lines.

use crate::math::{floor_to, Vec4};
use crate::object::Object3D;
use crate::projection::Viewport;
use crate::scene::Scene;
use crate::settings::{RenderMode, RenderSettings};
use crate::shading::{face_shade, DEFAULT_FACE_COLOR};
use crate::surface::Surface;

/// Draw call counts for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub triangles: usize,
    pub culled: usize,
    pub lines: usize,
    pub labels: usize,
}

/// Draws scenes onto a surface
pub struct Renderer {
    settings: RenderSettings,
    viewport: Viewport,
}

impl Renderer {
    pub fn new(settings: RenderSettings, width: f32, height: f32) -> Self {
        Self {
            settings,
            viewport: Viewport::new(width, height),
        }
    }

    /// Renderer sized to `surface`
    pub fn for_surface<S: Surface + ?Sized>(settings: RenderSettings, surface: &S) -> Self {
        let (width, height) = surface.size();
        Self::new(settings, width, height)
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        self.settings.mode = mode;
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Pick up a new surface size; the origin offset follows it
    pub fn resize(&mut self, width: f32, height: f32) {
        log::debug!("viewport resized to {}x{}", width, height);
        self.viewport = Viewport::new(width, height);
    }

    /// Clear the surface and draw every object of `scene`
    pub fn render<S: Surface + ?Sized>(&self, scene: &Scene, surface: &mut S) -> FrameStats {
        let mut stats = FrameStats::default();
        let origin = self.viewport.origin();

        surface.clear(0.0, 0.0, self.viewport.width, self.viewport.height);

        for object in scene.objects() {
            match self.settings.mode {
                RenderMode::Shaded => self.draw_shaded(object, &origin, surface, &mut stats),
                RenderMode::Wireframe => self.draw_wireframe(object, &origin, surface, &mut stats),
            }
        }

        stats
    }

    fn draw_shaded<S: Surface + ?Sized>(
        &self,
        object: &Object3D,
        origin: &Vec4,
        surface: &mut S,
        stats: &mut FrameStats,
    ) {
        let vertices = object.screen_vertices(origin);
        let model = object.model();

        for (index, &[i0, i1, i2]) in model.faces().iter().enumerate() {
            let (v0, v1, v2) = (&vertices[i0], &vertices[i1], &vertices[i2]);
            let face_color = model.face_color(index).unwrap_or(DEFAULT_FACE_COLOR);

            match face_shade(v0, v1, v2, &face_color) {
                Some(color) => {
                    surface.fill_triangle(
                        Viewport::to_screen(v0),
                        Viewport::to_screen(v1),
                        Viewport::to_screen(v2),
                        color,
                    );
                    stats.triangles += 1;
                }
                None => stats.culled += 1,
            }
        }

        if !self.settings.show_labels {
            return;
        }

        for (index, v) in vertices.iter().enumerate() {
            surface.draw_text(
                &vertex_label(index, v),
                v.x,
                v.y,
                self.settings.label_font_size,
                self.settings.label_color,
            );
            stats.labels += 1;
        }
    }

    fn draw_wireframe<S: Surface + ?Sized>(
        &self,
        object: &Object3D,
        origin: &Vec4,
        surface: &mut S,
        stats: &mut FrameStats,
    ) {
        let vertices = object.screen_vertices(origin);

        for [a, b] in object.model().outline() {
            surface.draw_line(
                Viewport::to_screen(&vertices[a]),
                Viewport::to_screen(&vertices[b]),
                self.settings.line_width,
                self.settings.line_color,
            );
            stats.lines += 1;
        }
    }
}

/// `v[i](x, y, z)` with coordinates floored to one decimal
pub fn vertex_label(index: usize, v: &Vec4) -> String {
    format!(
        "v[{}]({}, {}, {})",
        index,
        floor_to(v.x, 1),
        floor_to(v.y, 1),
        floor_to(v.z, 1)
    )
}
