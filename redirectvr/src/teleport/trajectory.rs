use cgmath::{vec3, InnerSpace, Vector2, Vector3};

use crate::{
    curvature::compute_arc,
    math::{
        blend_displacement, normalize_or_none, project_xz, unproject_xz, yaw_tangent,
        DIRECTION_EPSILON,
    },
    physics::{ObjectId, QueryMask, SpatialQuery},
};

/// Pull of a steering center on the arc's horizontal path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcBend {
    pub center: Vector2<f32>,
    /// 0 keeps the straight ballistic path, 1 follows the curve fully.
    pub weight: f32,
}

/// Initial conditions of a teleport arc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcLaunch {
    pub position: Vector3<f32>,
    /// Unit launch direction.
    pub direction: Vector3<f32>,
    pub speed: f32,
    pub gravity: Vector3<f32>,
    /// Player scale; stretches the whole arc away from the launch point.
    pub scale: f32,
    pub bend: Option<ArcBend>,
}

impl ArcLaunch {
    /// Position on the arc `time` seconds after launch.
    pub fn position_at(&self, time: f32) -> Vector3<f32> {
        let offset = self.direction * (self.speed * time) + self.gravity * (0.5 * time * time);
        let ballistic = self.position + offset * self.scale;

        match self.bend {
            Some(bend) if bend.weight > 0.0 => self.bend_toward(bend, ballistic),
            _ => ballistic,
        }
    }

    /// Re-route the horizontal part of a ballistic position along a circle
    /// around the bend center. The launch direction is split into a
    /// sideways part (sweeps around the center) and an inward part (closes
    /// in on it), the same two factors continuous movement gets from the
    /// thumbstick.
    fn bend_toward(&self, bend: ArcBend, ballistic: Vector3<f32>) -> Vector3<f32> {
        let origin = project_xz(self.position);
        let straight = project_xz(ballistic) - origin;
        let travel = straight.magnitude();
        if travel <= DIRECTION_EPSILON {
            return ballistic;
        }

        let Some(radial) = normalize_or_none(origin - bend.center) else {
            return ballistic;
        };
        let heading = straight / travel;
        let curvature_factor = heading.dot(yaw_tangent(radial));
        let forward_factor = -heading.dot(radial);

        match compute_arc(bend.center, origin, travel, curvature_factor, forward_factor) {
            Some(arc) => {
                let horizontal = blend_displacement(straight, arc.displacement, bend.weight);
                unproject_xz(origin + horizontal, ballistic.y)
            }
            None => ballistic,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcSample {
    pub time: f32,
    pub position: Vector3<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcHit {
    /// Launch-relative time of the hit, refined within the hit segment.
    pub time: f32,
    pub point: Vector3<f32>,
    pub object: ObjectId,
}

/// Sampled teleport arc and where (if anywhere) it lands.
#[derive(Clone, Debug)]
pub struct ArcTrajectory {
    /// Samples from launch up to the hit, or across the whole duration.
    pub samples: Vec<ArcSample>,
    pub hit: Option<ArcHit>,
    pub num_segments: usize,
}

impl ArcTrajectory {
    /// Sample `launch` over `arc_duration` in `num_segments` equal time steps
    /// and sweep each segment against the world.
    pub fn calculate(
        launch: &ArcLaunch,
        arc_duration: f32,
        num_segments: usize,
        spatial: &dyn SpatialQuery,
        mask: QueryMask,
    ) -> Self {
        let num_segments = num_segments.max(1);
        let time_step = arc_duration.max(0.0) / num_segments as f32;

        let mut samples = Vec::with_capacity(num_segments + 1);
        let mut hit = None;

        let mut segment_start_time = 0.0;
        let mut segment_start = launch.position_at(segment_start_time);
        samples.push(ArcSample {
            time: segment_start_time,
            position: segment_start,
        });

        for i in 0..num_segments {
            let segment_end_time = (i + 1) as f32 * time_step;
            let segment_end = launch.position_at(segment_end_time);

            if let Some(ray_hit) = spatial.linecast(segment_start, segment_end, mask) {
                let segment_length = (segment_end - segment_start).magnitude();
                let time =
                    segment_start_time + time_step * (ray_hit.distance / segment_length);
                samples.push(ArcSample {
                    time,
                    position: ray_hit.point,
                });
                hit = Some(ArcHit {
                    time,
                    point: ray_hit.point,
                    object: ray_hit.object,
                });
                break;
            }

            samples.push(ArcSample {
                time: segment_end_time,
                position: segment_end,
            });
            segment_start_time = segment_end_time;
            segment_start = segment_end;
        }

        ArcTrajectory {
            samples,
            hit,
            num_segments,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.hit.is_some()
    }

    /// Where the player ends up: the hit point lifted by `floor_bias`.
    pub fn landing_position(&self, floor_bias: f32) -> Option<Vector3<f32>> {
        self.hit.map(|hit| hit.point + vec3(0.0, floor_bias, 0.0))
    }

    /// Get the arc length (useful for visual feedback)
    pub fn get_arc_length(&self) -> f32 {
        self.samples
            .windows(2)
            .map(|pair| (pair[1].position - pair[0].position).magnitude())
            .sum()
    }

    /// Get trajectory point at normalized position (0.0 to 1.0)
    pub fn get_point_at_normalized_position(&self, t: f32) -> Option<Vector3<f32>> {
        let last = self.samples.len().checked_sub(1)?;
        if last == 0 {
            return Some(self.samples[0].position);
        }

        let scaled = t.clamp(0.0, 1.0) * last as f32;
        let index = (scaled as usize).min(last - 1);
        let t_local = scaled - index as f32;
        let p1 = self.samples[index].position;
        let p2 = self.samples[index + 1].position;

        Some(p1 + (p2 - p1) * t_local)
    }
}
