use cgmath::{Deg, InnerSpace, Rad, Vector2, Vector3};
use engine::targeting_log;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::{
    config::TargetingConfig,
    interest::{InterestId, InterestPoint, InterestRegistry},
    math::{flatten_direction, project_xz},
    physics::SpatialQuery,
    surface_circle::SurfaceProbe,
};

/// How candidates inside the field of view are ranked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Most centered in view wins.
    #[default]
    Angle,
    /// Smallest distance along the view direction, minus radius, wins.
    ProjectedDistance,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetSource {
    Interest(InterestId),
    Surface,
}

/// The point the path bends around this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SteeringTarget {
    pub center: Vector2<f32>,
    /// 1.0 when dead ahead, 0.0 at the edge of the field of view.
    pub curvature_strength: f32,
    pub source: TargetSource,
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    point: InterestPoint,
    cosine: f32,
    projected_distance: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct TargetSelector {
    pub max_angle: Deg<f32>,
    pub policy: SelectionPolicy,
    /// Fallback when no point of interest qualifies.
    pub surface_probe: Option<SurfaceProbe>,
}

impl TargetSelector {
    pub fn from_config(config: &TargetingConfig) -> Self {
        TargetSelector {
            max_angle: Deg(config.max_angle_degrees),
            policy: config.policy,
            surface_probe: config.surface_fallback.then(|| config.surface_probe()),
        }
    }

    pub fn select_target(
        &self,
        registry: &InterestRegistry,
        spatial: &dyn SpatialQuery,
        viewer_position: Vector3<f32>,
        viewer_forward: Vector3<f32>,
    ) -> Option<SteeringTarget> {
        let forward = flatten_direction(viewer_forward)?;

        if let Some(candidate) = self.best_interest(registry.snapshot(), viewer_position, forward)
        {
            return Some(SteeringTarget {
                center: project_xz(candidate.point.position),
                curvature_strength: self.curvature_strength(candidate.cosine),
                source: TargetSource::Interest(candidate.point.id),
            });
        }

        let probe = self.surface_probe.as_ref()?;
        let center = probe.probe_surface_center(spatial, viewer_position, forward)?;
        let cosine = cosine_between_viewer(viewer_position, forward, center)?;
        targeting_log!(trace, "surface center at {:?}", center);

        Some(SteeringTarget {
            center: project_xz(center),
            curvature_strength: self.curvature_strength(cosine),
            source: TargetSource::Surface,
        })
    }

    fn best_interest(
        &self,
        points: &[InterestPoint],
        viewer_position: Vector3<f32>,
        forward: Vector3<f32>,
    ) -> Option<Candidate> {
        let min_cosine = Rad::from(self.max_angle).0.cos();

        let in_view = points.iter().filter_map(|point| {
            let cosine = cosine_between_viewer(viewer_position, forward, point.position)?;
            if cosine < min_cosine {
                return None;
            }
            let offset = point.position - viewer_position;
            Some(Candidate {
                point: *point,
                cosine,
                projected_distance: offset.x * forward.x + offset.z * forward.z - point.radius,
            })
        });

        match self.policy {
            SelectionPolicy::Angle => in_view.min_by_key(|c| OrderedFloat(-c.cosine)),
            SelectionPolicy::ProjectedDistance => {
                in_view.min_by_key(|c| OrderedFloat(c.projected_distance))
            }
        }
    }

    pub fn curvature_strength(&self, cosine: f32) -> f32 {
        let max_radians = Rad::from(self.max_angle).0;
        if max_radians <= f32::EPSILON {
            return 1.0;
        }
        let angle = cosine.clamp(-1.0, 1.0).acos();
        (1.0 - angle / max_radians).clamp(0.0, 1.0)
    }
}

/// Cosine of the horizontal angle between `forward` and the direction from
/// the viewer to `target`. `None` when the target is directly above or below.
pub fn cosine_between_viewer(
    viewer_position: Vector3<f32>,
    forward: Vector3<f32>,
    target: Vector3<f32>,
) -> Option<f32> {
    let direction = flatten_direction(target - viewer_position)?;
    let forward = flatten_direction(forward)?;
    Some(direction.dot(forward))
}
