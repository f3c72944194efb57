//! Recover an implicit steering center from the curvature of the surface in
//! front of the viewer.

use cgmath::{InnerSpace, Quaternion, Rad, Rotation, Rotation3, Vector3};

use crate::{
    math::normalize_or_none,
    physics::{QueryMask, SpatialQuery},
};

/// Edge directions whose cosine is at least `1 - COLINEAR_EPSILON` are
/// treated as a straight line (infinite radius).
pub const COLINEAR_EPSILON: f32 = 1e-5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Vector3<f32>,
    pub radius: f32,
}

/// Circle through three points, or `None` when they are (near-)colinear.
pub fn fit_circle(p1: Vector3<f32>, p2: Vector3<f32>, p3: Vector3<f32>) -> Option<Circle> {
    let d1 = normalize_or_none(p2 - p1)?;
    let d2 = normalize_or_none(p3 - p2)?;
    if d1.dot(d2).abs() >= 1.0 - COLINEAR_EPSILON {
        return None;
    }

    let v1 = p2 - p1;
    let v2 = p3 - p1;
    let v1v1 = v1.dot(v1);
    let v2v2 = v2.dot(v2);
    let v1v2 = v1.dot(v2);

    let determinant = v1v1 * v2v2 - v1v2 * v1v2;
    if determinant.abs() <= f32::EPSILON {
        return None;
    }

    let b = 0.5 / determinant;
    let k1 = b * v2v2 * (v1v1 - v1v2);
    let k2 = b * v1v1 * (v2v2 - v1v2);
    let center = p1 + v1 * k1 + v2 * k2;

    if !(center.x.is_finite() && center.y.is_finite() && center.z.is_finite()) {
        return None;
    }

    Some(Circle {
        center,
        radius: (center - p1).magnitude(),
    })
}

#[derive(Clone, Copy, Debug)]
pub struct SurfaceProbe {
    /// Arc length between neighbouring samples at the hit distance.
    pub sample_distance: f32,
    pub max_distance: f32,
    pub mask: QueryMask,
}

impl Default for SurfaceProbe {
    fn default() -> Self {
        SurfaceProbe {
            sample_distance: 0.1,
            max_distance: 1000.0,
            mask: QueryMask::ALL,
        }
    }
}

impl SurfaceProbe {
    /// Cast a center ray along `forward` and two side rays yawed by
    /// `atan(sample_distance / hit_distance)`, then fit a circle through the
    /// three hits. All three must land on the same object.
    pub fn probe_surface_center(
        &self,
        spatial: &dyn SpatialQuery,
        origin: Vector3<f32>,
        forward: Vector3<f32>,
    ) -> Option<Vector3<f32>> {
        let center_hit = spatial.raycast(origin, forward, self.max_distance, self.mask)?;
        if center_hit.distance <= f32::EPSILON {
            return None;
        }

        let offset = Rad((self.sample_distance / center_hit.distance).atan());
        let left = Quaternion::from_angle_y(-offset).rotate_vector(forward);
        let right = Quaternion::from_angle_y(offset).rotate_vector(forward);

        let left_hit = spatial.raycast(origin, left, self.max_distance, self.mask)?;
        let right_hit = spatial.raycast(origin, right, self.max_distance, self.mask)?;

        if left_hit.object != center_hit.object || right_hit.object != center_hit.object {
            return None;
        }

        fit_circle(left_hit.point, center_hit.point, right_hit.point).map(|circle| circle.center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{ObjectId, PhysicsWorld, RayHit};
    use cgmath::vec3;

    fn on_circle(center: Vector3<f32>, radius: f32, angle: f32) -> Vector3<f32> {
        let u = vec3(1.0, 0.0, 0.0);
        let w = vec3(0.0, 1.0, 1.0).normalize();
        center + (u * angle.cos() + w * angle.sin()) * radius
    }

    #[test]
    fn test_fit_circle_recovers_tilted_circle() {
        let center = vec3(1.0, 2.0, 3.0);
        let circle = fit_circle(
            on_circle(center, 5.0, 0.3),
            on_circle(center, 5.0, 1.7),
            on_circle(center, 5.0, 4.0),
        )
        .unwrap();

        assert!((circle.center - center).magnitude() < 1e-4);
        assert!((circle.radius - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_fit_circle_rejects_colinear_points() {
        let a = vec3(0.0, 0.0, 0.0);
        let b = vec3(1.0, 1.0, 1.0);
        let c = vec3(2.5, 2.5, 2.5);
        assert!(fit_circle(a, b, c).is_none());
        assert!(fit_circle(a, c, b).is_none());
        assert!(fit_circle(a, a, c).is_none());
    }

    #[test]
    fn test_probe_finds_cylinder_axis() {
        let mut world = PhysicsWorld::new();
        world.add_cylinder(ObjectId(3), vec3(0.0, 1.0, -10.0), 2.0, 2.0, QueryMask::WORLD);

        let probe = SurfaceProbe {
            sample_distance: 0.5,
            ..SurfaceProbe::default()
        };
        let center = probe
            .probe_surface_center(&world, vec3(0.0, 1.0, 0.0), vec3(0.0, 0.0, -1.0))
            .unwrap();

        assert!((center.x).abs() < 0.05);
        assert!((center.y - 1.0).abs() < 0.05);
        assert!((center.z + 10.0).abs() < 0.05);
    }

    #[test]
    fn test_probe_flat_wall_has_no_center() {
        let mut world = PhysicsWorld::new();
        world.add_cuboid(
            ObjectId(4),
            vec3(0.0, 1.0, -10.0),
            vec3(20.0, 5.0, 0.5),
            QueryMask::WORLD,
        );

        let probe = SurfaceProbe::default();
        let center =
            probe.probe_surface_center(&world, vec3(0.0, 1.0, 0.0), vec3(0.0, 0.0, -1.0));
        assert!(center.is_none());
    }

    #[test]
    fn test_probe_miss_has_no_center() {
        let world = PhysicsWorld::new();
        let probe = SurfaceProbe::default();
        assert!(probe
            .probe_surface_center(&world, vec3(0.0, 1.0, 0.0), vec3(0.0, 0.0, -1.0))
            .is_none());
    }

    /// Curved surface whose identity changes with the ray's sideways direction.
    struct SplitSurface;

    impl SpatialQuery for SplitSurface {
        fn raycast(
            &self,
            origin: Vector3<f32>,
            direction: Vector3<f32>,
            _max_distance: f32,
            _mask: QueryMask,
        ) -> Option<RayHit> {
            let direction = direction.normalize();
            let distance = 5.0 + direction.x * direction.x * 10.0;
            Some(RayHit {
                point: origin + direction * distance,
                distance,
                object: ObjectId(if direction.x > 0.0 { 1 } else { 2 }),
            })
        }
    }

    #[test]
    fn test_probe_requires_same_object() {
        let probe = SurfaceProbe::default();
        let center =
            probe.probe_surface_center(&SplitSurface, vec3(0.0, 0.0, 0.0), vec3(0.0, 0.0, -1.0));
        assert!(center.is_none());
    }
}
