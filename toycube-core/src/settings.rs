//! Serializable settings consumed by the renderer, scene and controller

use serde::{Deserialize, Serialize};

use crate::surface::Rgba;

/// How faces are turned into draw calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Filled, shaded triangles with vertex labels
    #[default]
    Shaded,
    /// Edge outlines only
    Wireframe,
}

/// Draw loop configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub mode: RenderMode,
    /// Draw `v[i](x, y, z)` at every vertex in shaded mode
    pub show_labels: bool,
    pub label_font_size: f32,
    pub label_color: Rgba,
    pub line_width: f32,
    pub line_color: Rgba,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            mode: RenderMode::Shaded,
            show_labels: true,
            label_font_size: 10.0,
            label_color: Rgba::WHITE,
            line_width: 1.0,
            line_color: Rgba::WHITE,
        }
    }
}

/// Which objects a scene is populated with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SceneLayout {
    /// One object at the origin
    Single { scale: f32 },
    /// `cols` x `rows` objects on the XY plane, centred on the origin
    Grid {
        cols: usize,
        rows: usize,
        spacing: f32,
        scale: f32,
    },
}

impl SceneLayout {
    pub fn single() -> Self {
        SceneLayout::Single { scale: 100.0 }
    }

    pub fn grid() -> Self {
        SceneLayout::Grid {
            cols: 10,
            rows: 10,
            spacing: 40.0,
            scale: 10.0,
        }
    }

    pub fn is_grid(&self) -> bool {
        matches!(self, SceneLayout::Grid { .. })
    }
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self::single()
    }
}

/// Step sizes applied per key press
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    /// Radians per arrow key press
    pub rotate_step: f32,
    /// Units per WASD press
    pub move_step: f32,
    /// Scale added per space press (grid only)
    pub grow_step: f32,
    /// Extra rotation per object index in a grid
    pub twist: f32,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            rotate_step: 0.1,
            move_step: 0.1,
            grow_step: 1.0,
            twist: 0.1,
        }
    }
}
