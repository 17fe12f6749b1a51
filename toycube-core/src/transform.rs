/// Per-vertex transform pipeline: placement, rotation, scale, origin offset
use crate::math::{vec4, Vec4};

/// Position, rotation (Euler angles, radians) and per-axis scale of an object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec4,
    pub rotation: Vec4,
    pub scale: Vec4,
}

impl Transform {
    pub fn new(position: Vec4, rotation: Vec4, scale: Vec4) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    pub fn identity() -> Self {
        Self::new(Vec4::zeros(), Vec4::zeros(), vec4(1.0, 1.0, 1.0))
    }

    /// Uniform scale `s` at `position`, no rotation
    pub fn uniform(position: Vec4, s: f32) -> Self {
        Self::new(position, Vec4::zeros(), vec4(s, s, s))
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.rotation.x += dx;
        self.rotation.y += dy;
        self.rotation.z += dz;
    }

    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.position.x += dx;
        self.position.y += dy;
        self.position.z += dz;
    }

    pub fn grow(&mut self, dx: f32, dy: f32, dz: f32) {
        self.scale.x += dx;
        self.scale.y += dy;
        self.scale.z += dz;
    }

    /// Map one model-space vertex to screen space.
    ///
    /// The vertex is placed at `position`, rotated about `position` through
    /// X, then Y, then Z (each stage reads the previous stage's output),
    /// scaled about `position`, and finally shifted by `origin`.
    pub fn apply(&self, vertex: &Vec4, origin: &Vec4) -> Vec4 {
        let pivot = &self.position;

        let v = vertex + pivot;
        let v = rotate_x(&v, pivot, self.rotation.x);
        let v = rotate_y(&v, pivot, self.rotation.y);
        let v = rotate_z(&v, pivot, self.rotation.z);
        let v = scale_about(&v, pivot, &self.scale);

        v + origin
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Transform every vertex, leaving the input untouched
pub fn pipeline(vertices: &[Vec4], transform: &Transform, origin: &Vec4) -> Vec<Vec4> {
    vertices
        .iter()
        .map(|v| transform.apply(v, origin))
        .collect()
}

/// Rotate in the (y, z) plane about `pivot`
pub fn rotate_x(v: &Vec4, pivot: &Vec4, angle: f32) -> Vec4 {
    let d = v - pivot;
    let (sin, cos) = angle.sin_cos();
    let mut r = d;
    r.y = d.y * cos - d.z * sin;
    r.z = d.y * sin + d.z * cos;
    r + pivot
}

/// Rotate in the (z, x) plane about `pivot`
pub fn rotate_y(v: &Vec4, pivot: &Vec4, angle: f32) -> Vec4 {
    let d = v - pivot;
    let (sin, cos) = angle.sin_cos();
    let mut r = d;
    r.z = d.z * cos - d.x * sin;
    r.x = d.z * sin + d.x * cos;
    r + pivot
}

/// Rotate in the (x, y) plane about `pivot`
pub fn rotate_z(v: &Vec4, pivot: &Vec4, angle: f32) -> Vec4 {
    let d = v - pivot;
    let (sin, cos) = angle.sin_cos();
    let mut r = d;
    r.x = d.x * cos - d.y * sin;
    r.y = d.x * sin + d.y * cos;
    r + pivot
}

/// Scale x, y and z about `pivot`; w is left alone
pub fn scale_about(v: &Vec4, pivot: &Vec4, scale: &Vec4) -> Vec4 {
    let mut r = *v;
    r.x = (v.x - pivot.x) * scale.x + pivot.x;
    r.y = (v.y - pivot.y) * scale.y + pivot.y;
    r.z = (v.z - pivot.z) * scale.z + pivot.z;
    r
}
