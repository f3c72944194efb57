//! Movement modes share one interface: a per-frame `simulate` that reads
//! input and targeting, and a per-physics-step `integrate` that commits the
//! result to the player body. Hosts call them in that order each tick.

pub mod continuous;
pub mod snap_turn;

pub use continuous::{ContinuousLocomotion, MovementState};
pub use snap_turn::SnapTurn;

use cgmath::{Deg, Vector3};

use crate::{
    config::{MovementModeKind, RedirectConfig},
    input_context::InputContext,
    interest::InterestRegistry,
    physics::{PlayerBody, SpatialQuery},
    targeting::TargetSelector,
    teleport::TeleportLocomotion,
};

/// Read-only world state available to a movement mode for one frame.
pub struct FrameContext<'a> {
    pub registry: &'a InterestRegistry,
    pub spatial: &'a dyn SpatialQuery,
    pub selector: &'a TargetSelector,
    /// Current position of the externally owned player body.
    pub body_position: Vector3<f32>,
}

/// What one `integrate` call did to the body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocomotionStep {
    pub position_delta: Vector3<f32>,
    pub yaw_delta: Deg<f32>,
}

impl LocomotionStep {
    pub fn none() -> Self {
        LocomotionStep {
            position_delta: Vector3::new(0.0, 0.0, 0.0),
            yaw_delta: Deg(0.0),
        }
    }
}

pub trait Locomotion {
    fn simulate(&mut self, ctx: &FrameContext<'_>, input: &InputContext, delta_time: f32);

    fn integrate(&mut self, body: &mut dyn PlayerBody, delta_time: f32) -> LocomotionStep;
}

/// The active movement mode. Hosts switch modes by replacing the value.
pub enum MovementMode {
    Continuous(ContinuousLocomotion),
    Teleport(TeleportLocomotion),
}

impl MovementMode {
    pub fn from_config(config: &RedirectConfig) -> Self {
        let snap_turn = SnapTurn::new(config.snap_turn.clone());
        match config.mode {
            MovementModeKind::Continuous => MovementMode::Continuous(ContinuousLocomotion::new(
                config.continuous.clone(),
                snap_turn,
            )),
            MovementModeKind::Teleport => {
                MovementMode::Teleport(TeleportLocomotion::new(config.teleport.clone(), snap_turn))
            }
        }
    }

    /// Config tag of the active mode.
    pub fn kind(&self) -> MovementModeKind {
        match self {
            MovementMode::Continuous(_) => MovementModeKind::Continuous,
            MovementMode::Teleport(_) => MovementModeKind::Teleport,
        }
    }
}

impl Locomotion for MovementMode {
    fn simulate(&mut self, ctx: &FrameContext<'_>, input: &InputContext, delta_time: f32) {
        match self {
            MovementMode::Continuous(mode) => mode.simulate(ctx, input, delta_time),
            MovementMode::Teleport(mode) => mode.simulate(ctx, input, delta_time),
        }
    }

    fn integrate(&mut self, body: &mut dyn PlayerBody, delta_time: f32) -> LocomotionStep {
        match self {
            MovementMode::Continuous(mode) => mode.integrate(body, delta_time),
            MovementMode::Teleport(mode) => mode.integrate(body, delta_time),
        }
    }
}
