use cgmath::{vec3, Quaternion, Vector3};
use rapier3d::{
    na::{self, UnitQuaternion},
    prelude::*,
};

pub fn nvec_to_cgmath(vec: Vector<Real>) -> Vector3<f32> {
    Vector3 {
        x: vec.x,
        y: vec.y,
        z: vec.z,
    }
}

pub fn vec_to_npoint(vec: Vector3<f32>) -> Point<Real> {
    point![vec.x, vec.y, vec.z]
}

pub fn vec_to_nvec(vec: Vector3<f32>) -> Vector<Real> {
    vector![vec.x, vec.y, vec.z]
}

pub fn nquat_to_quat(quat: UnitQuaternion<f32>) -> Quaternion<f32> {
    Quaternion {
        v: vec3(quat.i, quat.j, quat.k),
        s: quat.w,
    }
}

/// Rotation of `radians` about the world up axis.
pub fn yaw_to_nquat(radians: f32) -> UnitQuaternion<f32> {
    UnitQuaternion::from_axis_angle(&na::Vector3::y_axis(), radians)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, Rotation, Rotation3};

    #[test]
    fn test_yaw_matches_cgmath_convention() {
        let radians = 0.7;
        let from_rapier = nquat_to_quat(yaw_to_nquat(radians));
        let from_cgmath = Quaternion::from_angle_y(Deg(radians.to_degrees()));

        let probe = vec3(0.0, 0.0, -1.0);
        let a = from_rapier.rotate_vector(probe);
        let b = from_cgmath.rotate_vector(probe);
        assert!((a.x - b.x).abs() < 1e-5);
        assert!((a.z - b.z).abs() < 1e-5);
    }

    #[test]
    fn test_vector_conversion_keeps_components() {
        let v = vec3(1.5, -2.0, 3.25);
        assert_eq!(nvec_to_cgmath(vec_to_nvec(v)), v);
        let p = vec_to_npoint(v);
        assert_eq!((p.x, p.y, p.z), (1.5, -2.0, 3.25));
    }
}
