use cgmath::{vec3, Deg, Rotation, Vector3};
use engine::teleport_log;

use super::{AcquisitionBlend, ArcBend, ArcLaunch, ArcTrajectory};
use crate::{
    config::TeleportConfig,
    input_context::{ButtonEdge, ButtonTracker, InputContext, Pose},
    locomotion::{FrameContext, Locomotion, LocomotionStep, SnapTurn},
    math::{project_xz, yaw_between},
    physics::PlayerBody,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TeleportPhase {
    Idle,
    /// Button held; the arc is recomputed every frame.
    Aiming,
    /// Button released over a valid landing spot; applied on the next integrate.
    Committing,
}

/// Aim-and-release teleport along a ballistic arc that bends toward the
/// steering target under the aiming hand.
pub struct TeleportLocomotion {
    config: TeleportConfig,
    phase: TeleportPhase,
    /// Edge detection for the configured teleport button.
    button: ButtonTracker,
    acquisition: AcquisitionBlend,
    /// Arc from the most recent aiming frame; committed on release.
    trajectory: Option<ArcTrajectory>,
    snap_turn: SnapTurn,
}

impl TeleportLocomotion {
    pub fn new(config: TeleportConfig, snap_turn: SnapTurn) -> Self {
        TeleportLocomotion {
            config,
            phase: TeleportPhase::Idle,
            button: ButtonTracker::default(),
            acquisition: AcquisitionBlend::default(),
            trajectory: None,
            snap_turn,
        }
    }

    /// Current step of the aim-and-release cycle.
    pub fn phase(&self) -> TeleportPhase {
        self.phase
    }

    /// Arc computed for the current aim, if aiming.
    pub fn trajectory(&self) -> Option<&ArcTrajectory> {
        self.trajectory.as_ref()
    }

    /// Ramp state of the target the arc bends toward.
    pub fn acquisition(&self) -> &AcquisitionBlend {
        &self.acquisition
    }

    fn set_phase(&mut self, phase: TeleportPhase) {
        if self.phase != phase {
            teleport_log!(debug, "phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    fn aim(&mut self, ctx: &FrameContext<'_>, hand: &Pose, delta_time: f32) {
        let direction = hand.rotation.rotate_vector(vec3(0.0, 0.0, -1.0));
        let target = ctx
            .selector
            .select_target(ctx.registry, ctx.spatial, hand.position, direction);
        let weight = self.acquisition.update(
            target,
            delta_time,
            self.config.time_to_change_target_state,
        );

        let bend = if self.config.curve_toward_target {
            self.acquisition.locked_target().map(|target| ArcBend {
                center: target.center,
                weight: weight * target.curvature_strength,
            })
        } else {
            None
        };

        let launch = ArcLaunch {
            position: hand.position,
            direction,
            speed: self.config.speed,
            gravity: self.config.effective_gravity(),
            scale: self.config.scale,
            bend,
        };
        self.trajectory = Some(ArcTrajectory::calculate(
            &launch,
            self.config.arc_duration,
            self.config.segment_count,
            ctx.spatial,
            self.config.mask(),
        ));
    }

    fn has_landing(&self) -> bool {
        self.trajectory
            .as_ref()
            .map_or(false, |trajectory| trajectory.is_valid())
    }

    fn cancel(&mut self) {
        self.trajectory = None;
        self.acquisition.reset();
        self.set_phase(TeleportPhase::Idle);
    }

    /// Yaw keeping the player's facing relative to the locked target.
    fn target_relative_yaw(&self, before: Vector3<f32>, after: Vector3<f32>) -> Deg<f32> {
        match self.acquisition.locked_target() {
            Some(target) => Deg::from(yaw_between(
                project_xz(before) - target.center,
                project_xz(after) - target.center,
            )),
            None => Deg(0.0),
        }
    }
}

impl Locomotion for TeleportLocomotion {
    fn simulate(&mut self, ctx: &FrameContext<'_>, input: &InputContext, delta_time: f32) {
        self.snap_turn.update(input.turn_axis());

        let hand = input.right_hand;
        let pressed = hand.button_value(self.config.button) >= self.config.trigger_threshold;
        let edge = self.button.update(pressed);

        match (self.phase, edge) {
            // Held covers a press that landed while a commit was pending.
            (TeleportPhase::Idle, ButtonEdge::Pressed | ButtonEdge::Held) => {
                self.set_phase(TeleportPhase::Aiming);
                self.aim(ctx, &hand.pose, delta_time);
            }
            (TeleportPhase::Aiming, ButtonEdge::Pressed | ButtonEdge::Held) => {
                self.aim(ctx, &hand.pose, delta_time);
            }
            (TeleportPhase::Aiming, ButtonEdge::Released | ButtonEdge::Idle) => {
                if edge == ButtonEdge::Released && self.has_landing() {
                    self.set_phase(TeleportPhase::Committing);
                } else {
                    self.cancel();
                }
            }
            _ => {}
        }
    }

    fn integrate(&mut self, body: &mut dyn PlayerBody, _delta_time: f32) -> LocomotionStep {
        let mut step = LocomotionStep::none();

        if self.phase == TeleportPhase::Committing {
            let landing = self
                .trajectory
                .as_ref()
                .and_then(|trajectory| trajectory.landing_position(self.config.floor_bias));

            if let Some(after) = landing {
                let before = body.position();
                body.set_position(after);
                step.position_delta = after - before;
                step.yaw_delta = self.target_relative_yaw(before, after);
                teleport_log!(
                    debug,
                    "teleported {:?} -> {:?}, yaw correction {:?}",
                    before,
                    after,
                    step.yaw_delta
                );
            }
            self.cancel();
        }

        step.yaw_delta += self.snap_turn.take();
        if step.yaw_delta != Deg(0.0) {
            body.rotate_yaw(step.yaw_delta);
        }
        step
    }
}
