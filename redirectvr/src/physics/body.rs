use cgmath::{Deg, Quaternion, Rotation3, Vector3};
use rapier3d::prelude::RigidBody;

use super::util::{nquat_to_quat, nvec_to_cgmath, vec_to_nvec, yaw_to_nquat};

/// The externally owned player body that locomotion writes into once per
/// physics step.
pub trait PlayerBody {
    fn position(&self) -> Vector3<f32>;
    fn rotation(&self) -> Quaternion<f32>;
    fn set_position(&mut self, position: Vector3<f32>);
    /// Rotate about world up; positive turns -Z toward -X.
    fn rotate_yaw(&mut self, angle: Deg<f32>);
}

/// Plain transform for hosts without a physics engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerTransform {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
}

impl PlayerTransform {
    pub fn new(position: Vector3<f32>) -> Self {
        PlayerTransform {
            position,
            rotation: Quaternion::from_angle_y(Deg(0.0)),
        }
    }
}

impl PlayerBody for PlayerTransform {
    fn position(&self) -> Vector3<f32> {
        self.position
    }

    fn rotation(&self) -> Quaternion<f32> {
        self.rotation
    }

    fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
    }

    fn rotate_yaw(&mut self, angle: Deg<f32>) {
        self.rotation = Quaternion::from_angle_y(angle) * self.rotation;
    }
}

impl PlayerBody for RigidBody {
    fn position(&self) -> Vector3<f32> {
        nvec_to_cgmath(*self.translation())
    }

    fn rotation(&self) -> Quaternion<f32> {
        nquat_to_quat(*RigidBody::rotation(self))
    }

    fn set_position(&mut self, position: Vector3<f32>) {
        self.set_translation(vec_to_nvec(position), true);
    }

    fn rotate_yaw(&mut self, angle: Deg<f32>) {
        let yaw = yaw_to_nquat(angle.0.to_radians());
        let rotation = yaw * *RigidBody::rotation(self);
        self.set_rotation(rotation, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::forward_xz;
    use cgmath::vec3;
    use rapier3d::prelude::RigidBodyBuilder;

    #[test]
    fn test_transform_and_rigid_body_agree() {
        let mut transform = PlayerTransform::new(vec3(1.0, 0.0, 2.0));
        let mut body = RigidBodyBuilder::kinematic_position_based()
            .translation(vec_to_nvec(vec3(1.0, 0.0, 2.0)))
            .build();

        for b in [&mut transform as &mut dyn PlayerBody, &mut body] {
            b.rotate_yaw(Deg(90.0));
            b.set_position(vec3(4.0, 1.0, -3.0));
        }

        assert_eq!(PlayerBody::position(&body), transform.position);
        let a = forward_xz(transform.rotation).unwrap();
        let b = forward_xz(PlayerBody::rotation(&body)).unwrap();
        assert!((a.x - b.x).abs() < 1e-5 && (a.z - b.z).abs() < 1e-5);
        assert!((a.x + 1.0).abs() < 1e-5);
    }
}
