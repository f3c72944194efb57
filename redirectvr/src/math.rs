//! Ground-plane helpers.
//!
//! All arc math runs on the horizontal XZ plane. A 3D vector maps to
//! `Vector2 { x: v.x, y: v.z }`; the vertical coordinate is carried
//! separately and re-attached with [`unproject_xz`].
//!
//! "Yaw" is a rotation about world +Y in cgmath's right-handed convention:
//! a positive yaw turns -Z (forward) toward -X.

use cgmath::{vec2, vec3, InnerSpace, Quaternion, Rad, Rotation, Vector2, Vector3};

/// Below this length a vector has no usable direction.
pub const DIRECTION_EPSILON: f32 = 1e-6;

pub fn project_xz(vec: Vector3<f32>) -> Vector2<f32> {
    vec2(vec.x, vec.z)
}

pub fn unproject_xz(vec: Vector2<f32>, y: f32) -> Vector3<f32> {
    vec3(vec.x, y, vec.y)
}

/// Drop the vertical component and normalize. `None` for (near-)vertical input.
pub fn flatten_direction(vec: Vector3<f32>) -> Option<Vector3<f32>> {
    let flat = vec3(vec.x, 0.0, vec.z);
    normalize_or_none(flat)
}

pub fn normalize_or_none<V: InnerSpace<Scalar = f32>>(vec: V) -> Option<V> {
    let magnitude = vec.magnitude();
    if magnitude > DIRECTION_EPSILON && magnitude.is_finite() {
        Some(vec / magnitude)
    } else {
        None
    }
}

/// Forward (-Z) of a rotation, flattened onto the ground plane.
pub fn forward_xz(rotation: Quaternion<f32>) -> Option<Vector3<f32>> {
    flatten_direction(rotation.rotate_vector(vec3(0.0, 0.0, -1.0)))
}

/// Right (+X) of a rotation, flattened onto the ground plane.
pub fn right_xz(rotation: Quaternion<f32>) -> Option<Vector3<f32>> {
    flatten_direction(rotation.rotate_vector(vec3(1.0, 0.0, 0.0)))
}

/// Apply a yaw to a ground-plane vector.
pub fn rotate_yaw_xz(vec: Vector2<f32>, angle: Rad<f32>) -> Vector2<f32> {
    let (sin, cos) = angle.0.sin_cos();
    vec2(vec.x * cos + vec.y * sin, -vec.x * sin + vec.y * cos)
}

/// Direction a point at `radial` from a center moves under a small positive yaw.
pub fn yaw_tangent(radial: Vector2<f32>) -> Vector2<f32> {
    vec2(radial.y, -radial.x)
}

/// Signed yaw taking `from` onto `to`.
pub fn yaw_between(from: Vector2<f32>, to: Vector2<f32>) -> Rad<f32> {
    -signed_angle(from, to)
}

/// Signed counter-clockwise angle taking `from` onto `to`, in (-pi, pi].
pub fn signed_angle(from: Vector2<f32>, to: Vector2<f32>) -> Rad<f32> {
    let cross = from.x * to.y - from.y * to.x;
    Rad(cross.atan2(from.dot(to)))
}

/// Interpolate between two ground-plane displacements by rotating the
/// direction and lerping the magnitude. Degenerates to a plain lerp when
/// either side has no direction.
pub fn blend_displacement(from: Vector2<f32>, to: Vector2<f32>, t: f32) -> Vector2<f32> {
    let t = t.clamp(0.0, 1.0);
    match (normalize_or_none(from), normalize_or_none(to)) {
        (Some(from_dir), Some(to_dir)) => {
            let angle = signed_angle(from_dir, to_dir).0 * t;
            let (sin, cos) = angle.sin_cos();
            let direction = vec2(
                from_dir.x * cos - from_dir.y * sin,
                from_dir.x * sin + from_dir.y * cos,
            );
            let magnitude = from.magnitude() + (to.magnitude() - from.magnitude()) * t;
            direction * magnitude
        }
        _ => from + (to - from) * t,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, Rotation3};

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_projection_drops_vertical() {
        let projected = project_xz(vec3(1.0, 5.0, -2.0));
        assert_eq!(projected, vec2(1.0, -2.0));
        assert_eq!(unproject_xz(projected, 3.0), vec3(1.0, 3.0, -2.0));
    }

    #[test]
    fn test_flatten_vertical_is_none() {
        assert!(flatten_direction(vec3(0.0, 1.0, 0.0)).is_none());
        let flat = flatten_direction(vec3(3.0, 7.0, 4.0)).unwrap();
        assert!(close(flat.magnitude(), 1.0));
        assert_eq!(flat.y, 0.0);
    }

    #[test]
    fn test_forward_and_right_follow_yaw() {
        let rotation = Quaternion::from_angle_y(Deg(90.0));
        let forward = forward_xz(rotation).unwrap();
        let right = right_xz(rotation).unwrap();
        assert!(close(forward.x, -1.0) && close(forward.z, 0.0));
        assert!(close(right.x, 0.0) && close(right.z, -1.0));
    }

    #[test]
    fn test_ground_yaw_matches_quaternion_yaw() {
        let angle = Rad(0.4);
        let v = vec3(0.3, 0.0, -2.0);
        let rotated = Quaternion::from_angle_y(angle).rotate_vector(v);
        let flat = rotate_yaw_xz(project_xz(v), angle);
        assert!(close(flat.x, rotated.x) && close(flat.y, rotated.z));

        assert!(close(yaw_between(project_xz(v), flat).0, 0.4));
        let tangent = yaw_tangent(project_xz(v));
        let small = rotate_yaw_xz(project_xz(v), Rad(1e-3)) - project_xz(v);
        assert!(tangent.normalize().dot(small.normalize()) > 0.999);
    }

    #[test]
    fn test_signed_angle_is_counter_clockwise() {
        let angle = signed_angle(vec2(1.0, 0.0), vec2(0.0, 1.0));
        assert!(close(angle.0, std::f32::consts::FRAC_PI_2));
        let angle = signed_angle(vec2(1.0, 0.0), vec2(0.0, -1.0));
        assert!(close(angle.0, -std::f32::consts::FRAC_PI_2));
    }

    #[test]
    fn test_blend_displacement_endpoints_and_midpoint() {
        let a = vec2(2.0, 0.0);
        let b = vec2(0.0, 4.0);
        assert!(close((blend_displacement(a, b, 0.0) - a).magnitude(), 0.0));
        assert!(close((blend_displacement(a, b, 1.0) - b).magnitude(), 0.0));

        let mid = blend_displacement(a, b, 0.5);
        assert!(close(mid.magnitude(), 3.0));
        assert!(close(mid.x, mid.y));
    }
}
