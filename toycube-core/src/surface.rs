//! Drawing surface abstraction
//!
//! The draw loop talks to a [`Surface`] only. Front ends implement it over
//! their own output (a terminal cell grid, a browser canvas) and
//! [`RecordingSurface`] keeps every call for inspection.

use std::fmt;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// 8-bit RGB colour with floating point alpha
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Perceived brightness in 0..=1
    pub fn luminance(&self) -> f32 {
        (0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32) / 255.0
    }
}

/// CSS `rgba(r, g, b, a)` notation
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Immediate-mode 2D drawing target
pub trait Surface {
    /// Current drawable size in surface units
    fn size(&self) -> (f32, f32);

    fn clear(&mut self, x: f32, y: f32, width: f32, height: f32);

    fn draw_line(&mut self, p0: Point2<f32>, p1: Point2<f32>, width: f32, color: Rgba);

    fn fill_triangle(&mut self, p0: Point2<f32>, p1: Point2<f32>, p2: Point2<f32>, color: Rgba);

    fn draw_text(&mut self, text: &str, x: f32, y: f32, font_size: f32, color: Rgba);
}

/// One recorded surface call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Line {
        p0: Point2<f32>,
        p1: Point2<f32>,
        width: f32,
        color: Rgba,
    },
    Triangle {
        points: [Point2<f32>; 3],
        color: Rgba,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        font_size: f32,
        color: Rgba,
    },
}

/// Surface that stores draw calls instead of drawing
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn triangles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Triangle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Text { .. }))
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear {
            x,
            y,
            width,
            height,
        });
    }

    fn draw_line(&mut self, p0: Point2<f32>, p1: Point2<f32>, width: f32, color: Rgba) {
        self.commands.push(DrawCommand::Line {
            p0,
            p1,
            width,
            color,
        });
    }

    fn fill_triangle(&mut self, p0: Point2<f32>, p1: Point2<f32>, p2: Point2<f32>, color: Rgba) {
        self.commands.push(DrawCommand::Triangle {
            points: [p0, p1, p2],
            color,
        });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, font_size: f32, color: Rgba) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            font_size,
            color,
        });
    }
}
