/// toycube Web - canvas 2D renderer for browsers
///
/// The host page owns the frame loop and the event listeners: it calls
/// `render()` from `requestAnimationFrame`, `key_down(event.code)` from a
/// `keydown` listener and `resize(w, h)` when the page size changes.
/// Geometry files are fetched by the host and handed over as text.

use nalgebra::Point2;
use std::sync::Arc;
use toycube_core::{
    parse_obj, Controller, Model3D, ParseOptions, RenderMode, RenderSettings, Renderer, Rgba,
    Scene, SceneLayout, Surface,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// [`Surface`] over a canvas 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    /// Surface over the canvas element with id `canvas_id`
    pub fn from_id(canvas_id: &str) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element #{}", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()?;
        Self::new(canvas)
    }

    pub fn set_size(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (f32, f32) {
        (self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn clear(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ctx.clear_rect(x as f64, y as f64, width as f64, height as f64);
    }

    fn draw_line(&mut self, p0: Point2<f32>, p1: Point2<f32>, width: f32, color: Rgba) {
        self.ctx.set_stroke_style_str(&color.to_string());
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(p0.x as f64, p0.y as f64);
        self.ctx.line_to(p1.x as f64, p1.y as f64);
        self.ctx.stroke();
    }

    fn fill_triangle(&mut self, p0: Point2<f32>, p1: Point2<f32>, p2: Point2<f32>, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.begin_path();
        self.ctx.move_to(p0.x as f64, p0.y as f64);
        self.ctx.line_to(p1.x as f64, p1.y as f64);
        self.ctx.line_to(p2.x as f64, p2.y as f64);
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, font_size: f32, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.set_font(&format!("{}px sans-serif", font_size));
        if let Err(e) = self.ctx.fill_text(text, x as f64, y as f64) {
            web_sys::console::error_2(&JsValue::from_str("toycube: fill_text failed:"), &e);
        }
    }
}

/// Demo handle exported to JavaScript
#[wasm_bindgen]
pub struct WebRenderer {
    surface: CanvasSurface,
    renderer: Renderer,
    scene: Scene,
    controller: Controller,
    parse: ParseOptions,
}

#[wasm_bindgen]
impl WebRenderer {
    /// `mode` is `"shaded"` (single cube) or `"wireframe"` (10x10 grid)
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, mode: &str) -> Result<WebRenderer, JsValue> {
        let surface = CanvasSurface::from_id(canvas_id)?;

        let (render_mode, layout) = match mode {
            "wireframe" => (RenderMode::Wireframe, SceneLayout::grid()),
            "shaded" => (RenderMode::Shaded, SceneLayout::single()),
            other => return Err(JsValue::from_str(&format!("unknown mode {:?}", other))),
        };
        let settings = RenderSettings {
            mode: render_mode,
            ..RenderSettings::default()
        };

        Ok(WebRenderer {
            renderer: Renderer::for_surface(settings, &surface),
            surface,
            scene: Scene::setup(layout, Arc::new(Model3D::cube())),
            controller: Controller::default(),
            parse: ParseOptions::default(),
        })
    }

    /// Read face indices from 1 in geometry passed to `load_obj`
    pub fn set_one_based_indices(&mut self, enabled: bool) {
        self.parse.one_based_indices = enabled;
    }

    /// Resize the canvas and move the origin to its new centre
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface.set_size(width, height);
        self.renderer.resize(width as f32, height as f32);
    }

    /// Render one frame
    pub fn render(&mut self) {
        self.renderer.render(&self.scene, &mut self.surface);
    }

    /// Handle a `KeyboardEvent.code`. Returns whether the scene changed.
    pub fn key_down(&mut self, code: &str) -> bool {
        self.controller.key_code_down(code, &mut self.scene)
    }

    /// Replace the model with parsed geometry text.
    ///
    /// On failure the current model stays and the error is logged to the
    /// console.
    pub fn load_obj(&mut self, text: &str) -> bool {
        match parse_obj(text, &self.parse) {
            Ok(model) => {
                self.scene.replace_model(Arc::new(model));
                true
            }
            Err(e) => {
                web_sys::console::error_1(&JsValue::from_str(&format!("toycube: {}", e)));
                false
            }
        }
    }

    /// Number of objects in the scene
    pub fn object_count(&self) -> usize {
        self.scene.len()
    }
}
