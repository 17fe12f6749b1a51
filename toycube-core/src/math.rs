/// Vector math shared by the transform pipeline and the shading code
use nalgebra::Vector4;

/// Homogeneous-style 4 component vector (x, y, z, w).
///
/// `w` is a padding slot: geometry operations leave it alone, but `dot`
/// and `norm` still sum over all four components. Add, subtract, scalar
/// multiply and divide come from nalgebra's operators, `dot`, `norm`
/// (magnitude) and `normalize` from its methods.
pub type Vec4 = Vector4<f32>;

/// Build a point-like vector with `w = 0`.
#[inline]
pub fn vec4(x: f32, y: f32, z: f32) -> Vec4 {
    Vec4::new(x, y, z, 0.0)
}

/// Operations nalgebra only offers on 3 component vectors.
pub trait Vec4Ext {
    /// Cross product of the xyz parts, `w` forced to 0.
    fn cross3d(&self, other: &Vec4) -> Vec4;

    /// `self / |self|`. Zero input yields NaN components.
    fn unit(&self) -> Vec4;

    /// True when any component is NaN or infinite.
    fn is_degenerate(&self) -> bool;
}

impl Vec4Ext for Vec4 {
    #[inline]
    fn cross3d(&self, other: &Vec4) -> Vec4 {
        Vec4::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
            0.0,
        )
    }

    #[inline]
    fn unit(&self) -> Vec4 {
        // nalgebra's normalize() divides by the norm without guarding zero
        self / self.norm()
    }

    #[inline]
    fn is_degenerate(&self) -> bool {
        self.iter().any(|c| !c.is_finite())
    }
}

/// Floor `value` to `places` decimal places.
pub fn floor_to(value: f32, places: i32) -> f32 {
    let factor = 10f32.powi(places);
    (value * factor).floor() / factor
}
