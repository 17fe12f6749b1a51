//! toycube Core Library - vector math, transform pipeline and draw loop
//!
//! This library provides the front-end independent part of the renderer:
//! models and placed objects, the per-vertex transform pipeline, face
//! shading, the scene and keyboard controller, and the immediate-mode draw
//! loop that feeds any [`Surface`].

pub mod error;
pub mod geometry;
pub mod input;
pub mod math;
pub mod obj;
pub mod object;
pub mod projection;
pub mod render;
pub mod scene;
pub mod settings;
pub mod shading;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use error::{GeometryError, ModelError};
pub use geometry::Model3D;
pub use input::{Command, Controller, Key};
pub use math::{vec4, Vec4, Vec4Ext};
pub use obj::{load_obj, parse_obj, ParseOptions};
pub use object::Object3D;
pub use projection::Viewport;
pub use render::{FrameStats, Renderer};
pub use scene::Scene;
pub use settings::{ControlSettings, RenderMode, RenderSettings, SceneLayout};
pub use surface::{DrawCommand, RecordingSurface, Rgba, Surface};
pub use transform::Transform;
