use cgmath::{vec2, Deg, InnerSpace, Rotation, Vector2, Vector3};
use engine::locomotion_log;

use super::{FrameContext, Locomotion, LocomotionStep, SnapTurn};
use crate::{
    config::ContinuousConfig,
    curvature::{compute_arc, ArcDisplacement},
    input_context::InputContext,
    math::{blend_displacement, forward_xz, project_xz, right_xz, unproject_xz, DIRECTION_EPSILON},
    physics::PlayerBody,
    targeting::{SteeringTarget, TargetSource},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementState {
    pub ground_position: Vector2<f32>,
    /// Yaw swept around steering centers since the last commit.
    pub accumulated_yaw_delta: Deg<f32>,
    pub current_speed: f32,
}

impl Default for MovementState {
    fn default() -> Self {
        MovementState {
            ground_position: vec2(0.0, 0.0),
            accumulated_yaw_delta: Deg(0.0),
            current_speed: 0.0,
        }
    }
}

/// Thumbstick walking that bends toward the selected steering target.
pub struct ContinuousLocomotion {
    config: ContinuousConfig,
    state: MovementState,
    snap_turn: SnapTurn,
    /// Unit input direction, kept while speed ramps down after release.
    heading: Vector2<f32>,
    target: Option<SteeringTarget>,
    needs_commit: bool,
}

impl ContinuousLocomotion {
    pub fn new(config: ContinuousConfig, snap_turn: SnapTurn) -> Self {
        ContinuousLocomotion {
            config,
            state: MovementState::default(),
            snap_turn,
            heading: vec2(0.0, 0.0),
            target: None,
            needs_commit: false,
        }
    }

    pub fn state(&self) -> &MovementState {
        &self.state
    }

    pub fn target(&self) -> Option<&SteeringTarget> {
        self.target.as_ref()
    }

    fn update_speed(&mut self, axis_magnitude: f32, delta_time: f32) {
        let desired = self.config.max_speed * axis_magnitude;
        self.state.current_speed = if self.config.limit_acceleration {
            move_towards(
                self.state.current_speed,
                desired,
                self.config.max_acceleration * delta_time,
            )
        } else {
            desired
        };
    }

    fn displacement(
        &self,
        straight: Vector2<f32>,
        travel: f32,
        target: Option<&SteeringTarget>,
    ) -> ArcDisplacement {
        let Some(target) = target else {
            return ArcDisplacement::straight(straight);
        };
        let Some(arc) = compute_arc(
            target.center,
            self.state.ground_position,
            travel,
            self.heading.x,
            self.heading.y,
        ) else {
            return ArcDisplacement::straight(straight);
        };

        if !self.config.blend_by_strength {
            return arc;
        }
        let strength = target.curvature_strength;
        ArcDisplacement {
            displacement: blend_displacement(straight, arc.displacement, strength),
            rotation: arc.rotation * strength,
        }
    }

    fn log_target_change(&self, next: Option<&SteeringTarget>) {
        let source = |t: Option<&SteeringTarget>| t.map(|t| t.source);
        let (previous, next_source) = (source(self.target.as_ref()), source(next));
        if previous == next_source {
            return;
        }
        match next_source {
            Some(TargetSource::Interest(id)) => {
                locomotion_log!(debug, "steering toward interest {:?}", id)
            }
            Some(TargetSource::Surface) => locomotion_log!(debug, "steering along surface"),
            None => locomotion_log!(debug, "steering target lost"),
        }
    }
}

impl Locomotion for ContinuousLocomotion {
    fn simulate(&mut self, ctx: &FrameContext<'_>, input: &InputContext, delta_time: f32) {
        self.snap_turn.update(input.turn_axis());
        // Frames between two physics steps chain off each other; the body
        // only moves on integrate.
        if !self.needs_commit {
            self.state.ground_position = project_xz(ctx.body_position);
        }
        self.needs_commit = true;

        let axis = input.move_axis();
        let axis_magnitude = axis.magnitude();
        if axis_magnitude > DIRECTION_EPSILON {
            self.heading = axis / axis_magnitude;
        }
        self.update_speed(axis_magnitude, delta_time.max(0.0));

        let travel = self.state.current_speed * delta_time.max(0.0);
        if travel <= 0.0 {
            self.log_target_change(None);
            self.target = None;
            return;
        }

        let head = &input.head;
        let (Some(forward), Some(right)) = (forward_xz(head.rotation), right_xz(head.rotation))
        else {
            return;
        };
        let straight =
            (project_xz(right) * self.heading.x + project_xz(forward) * self.heading.y) * travel;

        let view_forward = head.rotation.rotate_vector(Vector3::new(0.0, 0.0, -1.0));
        let target = ctx.selector.select_target(
            ctx.registry,
            ctx.spatial,
            head.position,
            view_forward,
        );
        self.log_target_change(target.as_ref());

        let step = self.displacement(straight, travel, target.as_ref());
        self.state.ground_position += step.displacement;
        self.state.accumulated_yaw_delta += step.rotation;
        self.target = target;

        locomotion_log!(
            trace,
            "moved {:?}, swept {:?}",
            step.displacement,
            step.rotation
        );
    }

    fn integrate(&mut self, body: &mut dyn PlayerBody, _delta_time: f32) -> LocomotionStep {
        let mut step = LocomotionStep::none();

        if std::mem::take(&mut self.needs_commit) {
            let before = body.position();
            let after = unproject_xz(self.state.ground_position, before.y);
            body.set_position(after);
            step.position_delta = after - before;
        }

        let swept = std::mem::replace(&mut self.state.accumulated_yaw_delta, Deg(0.0));
        step.yaw_delta = swept + self.snap_turn.take();
        if step.yaw_delta != Deg(0.0) {
            body.rotate_yaw(step.yaw_delta);
        }
        step
    }
}

fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}
