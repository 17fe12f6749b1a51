/// Face normals, front-face test and the derived shade colour
use crate::math::{Vec4, Vec4Ext};
use crate::surface::Rgba;

/// Colour used for faces of models without per-face colours
pub const DEFAULT_FACE_COLOR: Vec4 = Vec4::new(0.0, 1.0, 1.0, 1.0);

/// Unit normal of the triangle `v0, v1, v2` in winding order.
///
/// Coincident or collinear vertices give a NaN normal.
pub fn compute_normal(v0: &Vec4, v1: &Vec4, v2: &Vec4) -> Vec4 {
    let e01 = v1 - v0;
    let e12 = v2 - v1;
    e01.cross3d(&e12).unit()
}

/// Whether a face with this normal should be drawn.
///
/// Only `z > 0` passes; NaN normals from degenerate faces never do.
pub fn is_front_facing(normal: &Vec4) -> bool {
    !normal.is_degenerate() && normal.z > 0.0
}

/// Shade for a front-facing face.
///
/// Each colour channel is `channel * (normal.z * 255 + 10)` clamped to
/// 0..=255, alpha is taken from the face colour.
pub fn shade(normal: &Vec4, face_color: &Vec4) -> Rgba {
    let intensity = normal.z * 255.0 + 10.0;
    let channel = |c: f32| (c * intensity).round().clamp(0.0, 255.0) as u8;
    Rgba::new(
        channel(face_color.x),
        channel(face_color.y),
        channel(face_color.z),
        face_color.w.clamp(0.0, 1.0),
    )
}

/// Shade for a face, or `None` when it is culled
pub fn face_shade(v0: &Vec4, v1: &Vec4, v2: &Vec4, face_color: &Vec4) -> Option<Rgba> {
    let normal = compute_normal(v0, v1, v2);
    is_front_facing(&normal).then(|| shade(&normal, face_color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec4;

    #[test]
    fn test_ccw_triangle_faces_positive_z() {
        let (a, b, c) = (vec4(0.0, 0.0, 0.0), vec4(1.0, 0.0, 0.0), vec4(0.0, 1.0, 0.0));
        let n = compute_normal(&a, &b, &c);
        assert!(n.z > 0.0);
        assert!((n.norm() - 1.0).abs() < 1e-6);

        let flipped = compute_normal(&b, &a, &c);
        assert!(flipped.z < 0.0);
        assert!((flipped.z + n.z).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_face_is_culled() {
        let p = vec4(3.0, 3.0, 3.0);
        let n = compute_normal(&p, &p, &vec4(4.0, 4.0, 4.0));
        assert!(n.is_degenerate());
        assert!(!is_front_facing(&n));
        assert_eq!(face_shade(&p, &p, &p, &DEFAULT_FACE_COLOR), None);
    }

    #[test]
    fn test_edge_on_face_is_culled() {
        assert!(!is_front_facing(&vec4(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_shade_of_facing_normal() {
        let color = shade(&vec4(0.0, 0.0, 0.5), &DEFAULT_FACE_COLOR);
        assert_eq!(color, Rgba::new(0, 138, 138, 1.0));
    }

    #[test]
    fn test_shade_is_clamped() {
        // 1.0 * 255 + 10 = 265
        let color = shade(&vec4(0.0, 0.0, 1.0), &DEFAULT_FACE_COLOR);
        assert_eq!(color, Rgba::new(0, 255, 255, 1.0));
    }

    #[test]
    fn test_shade_uses_face_color() {
        let color = shade(&vec4(0.0, 0.0, 0.2), &Vec4::new(1.0, 0.5, 0.0, 0.25));
        // intensity = 61
        assert_eq!(color, Rgba::new(61, 31, 0, 0.25));
    }
}
