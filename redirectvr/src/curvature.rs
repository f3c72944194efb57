use cgmath::{Deg, InnerSpace, Rad, Vector2};

use crate::math::{normalize_or_none, rotate_yaw_xz, DIRECTION_EPSILON};

/// Result of sweeping a position along a circle around a steering center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcDisplacement {
    /// Ground-plane offset from the starting position.
    pub displacement: Vector2<f32>,
    /// Yaw swept around the center (see [`crate::math`] for the convention).
    pub rotation: Deg<f32>,
}

impl ArcDisplacement {
    pub fn straight(displacement: Vector2<f32>) -> Self {
        ArcDisplacement {
            displacement,
            rotation: Deg(0.0),
        }
    }
}

/// Move `position` by `travel_distance` along a circle around `center`.
///
/// `curvature_factor` in [-1, 1] sweeps the position around the center
/// (positive is a positive yaw, i.e. rightward when facing the center);
/// `forward_factor` in [-1, 1] spends the
/// distance not used by the sweep moving toward (positive) or away from
/// (negative) the center. Returns `None` when `position` sits on `center`.
pub fn compute_arc(
    center: Vector2<f32>,
    position: Vector2<f32>,
    travel_distance: f32,
    curvature_factor: f32,
    forward_factor: f32,
) -> Option<ArcDisplacement> {
    let from_center = position - center;
    let radius = from_center.magnitude();
    if radius <= DIRECTION_EPSILON || !radius.is_finite() {
        return None;
    }

    let angle = Rad((travel_distance / radius) * curvature_factor);
    let rotated = rotate_yaw_xz(from_center, angle);
    let rotated_position = center + rotated;

    let swept_distance = angle.0 * radius;
    let remaining_distance =
        (travel_distance - swept_distance).clamp(0.0, travel_distance.max(0.0));

    let inward = normalize_or_none(rotated)? * remaining_distance * forward_factor;

    Some(ArcDisplacement {
        displacement: (rotated_position - inward) - position,
        rotation: angle.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::vec2;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_zero_curvature_moves_straight_toward_center() {
        let center = vec2(3.0, 10.0);
        let position = vec2(3.0, 0.0);

        let arc = compute_arc(center, position, 2.0, 0.0, 1.0).unwrap();

        assert_eq!(arc.rotation, Deg(0.0));
        assert!(close(arc.displacement.magnitude(), 2.0));
        assert!(close(arc.displacement.x, 0.0));
        assert!(close(arc.displacement.y, 2.0));
    }

    #[test]
    fn test_zero_curvature_backward() {
        let arc = compute_arc(vec2(0.0, 5.0), vec2(0.0, 0.0), 1.5, 0.0, -1.0).unwrap();
        assert!(close(arc.displacement.y, -1.5));
    }

    #[test]
    fn test_rotation_grows_with_curvature_factor() {
        let center = vec2(0.0, 8.0);
        let position = vec2(1.0, -2.0);
        let mut previous = -1.0;

        for step in 0..=10 {
            let factor = step as f32 / 10.0;
            let positive = compute_arc(center, position, 3.0, factor, 1.0).unwrap();
            let negative = compute_arc(center, position, 3.0, -factor, 1.0).unwrap();

            assert!(positive.rotation.0.abs() >= previous);
            assert!(close(positive.rotation.0.abs(), negative.rotation.0.abs()));
            previous = positive.rotation.0.abs();
        }
        assert!(previous > 0.0);
    }

    #[test]
    fn test_pure_orbit_keeps_radius() {
        let center = vec2(0.0, 0.0);
        let position = vec2(4.0, 0.0);
        let travel = 1.0;

        let arc = compute_arc(center, position, travel, 1.0, 0.0).unwrap();
        let new_position = position + arc.displacement;

        assert!(close((new_position - center).magnitude(), 4.0));
        assert!(close(arc.rotation.0, (travel / 4.0).to_degrees()));
        // Positive yaw carries +X toward -Z.
        assert!(new_position.y < 0.0);
    }

    #[test]
    fn test_full_sweep_leaves_no_forward_travel() {
        let center = vec2(0.0, 0.0);
        let position = vec2(0.0, -2.0);

        let orbit = compute_arc(center, position, 1.0, 1.0, 0.0).unwrap();
        let orbit_and_forward = compute_arc(center, position, 1.0, 1.0, 1.0).unwrap();

        assert!(close(
            (orbit.displacement - orbit_and_forward.displacement).magnitude(),
            0.0
        ));
    }

    #[test]
    fn test_degenerate_radius_is_none() {
        let point = vec2(1.0, 1.0);
        assert!(compute_arc(point, point, 1.0, 0.5, 0.5).is_none());
    }
}
