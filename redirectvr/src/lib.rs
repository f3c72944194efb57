pub mod config;
pub mod curvature;
pub mod input_context;
pub mod interest;
pub mod locomotion;
pub mod math;
pub mod physics;
pub mod surface_circle;
pub mod targeting;
pub mod teleport;

use cgmath::Vector3;
use config::{MovementModeKind, RedirectConfig};
use engine::locomotion_log;
use input_context::InputContext;
use interest::{InterestRegistry, RegistryError, SceneEvent};
use locomotion::{FrameContext, Locomotion, LocomotionStep, MovementMode};
use physics::{PlayerBody, SpatialQuery};
use targeting::TargetSelector;

/// Host-facing entry point. The host forwards scene lifecycle events, calls
/// `update` once per rendered frame and `fixed_update` once per physics step.
pub struct RedirectVr {
    config: RedirectConfig,
    registry: InterestRegistry,
    selector: TargetSelector,
    mode: MovementMode,
}

impl RedirectVr {
    pub fn new(config: RedirectConfig) -> RedirectVr {
        let selector = TargetSelector::from_config(&config.targeting);
        let mode = MovementMode::from_config(&config);
        RedirectVr {
            config,
            registry: InterestRegistry::new(),
            selector,
            mode,
        }
    }

    pub fn handle_scene_event(&mut self, event: SceneEvent) -> Result<(), RegistryError> {
        self.registry.handle_event(event)
    }

    /// Read input and targeting for this frame. Must follow any body
    /// movement from the previous physics step.
    pub fn update(
        &mut self,
        spatial: &dyn SpatialQuery,
        body_position: Vector3<f32>,
        input: &InputContext,
        frame_delta: f32,
    ) {
        let _span = tracing::trace_span!("redirect_update", mode = ?self.mode.kind()).entered();
        let ctx = FrameContext {
            registry: &self.registry,
            spatial,
            selector: &self.selector,
            body_position,
        };
        self.mode.simulate(&ctx, input, frame_delta);
    }

    /// Commit the movement computed since the last physics step.
    pub fn fixed_update(&mut self, body: &mut dyn PlayerBody, physics_delta: f32) -> LocomotionStep {
        let _span = tracing::trace_span!("redirect_fixed_update").entered();
        self.mode.integrate(body, physics_delta)
    }

    /// Switch movement mode. Pending movement of the old mode is dropped.
    pub fn set_mode(&mut self, kind: MovementModeKind) {
        if self.mode.kind() == kind {
            return;
        }
        locomotion_log!(info, "movement mode {:?} -> {:?}", self.mode.kind(), kind);
        self.config.mode = kind;
        self.mode = MovementMode::from_config(&self.config);
    }

    pub fn config(&self) -> &RedirectConfig {
        &self.config
    }

    pub fn registry(&self) -> &InterestRegistry {
        &self.registry
    }

    pub fn mode(&self) -> &MovementMode {
        &self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{vec2, vec3, InnerSpace};
    use interest::InterestId;
    use physics::{ObjectId, PhysicsWorld};

    fn scene() -> (RedirectVr, PhysicsWorld) {
        let mut config = RedirectConfig::default();
        config.continuous.limit_acceleration = false;
        config.continuous.blend_by_strength = false;
        config.continuous.max_speed = 2.0;

        let mut world = PhysicsWorld::new();
        world.add_floor(ObjectId(1), 0.0, 50.0);
        world.spawn_player(vec3(0.0, 0.0, 0.0));

        (RedirectVr::new(config), world)
    }

    fn strafe_right() -> InputContext {
        let mut input = InputContext::default();
        input.head.position = vec3(0.0, 1.6, 0.0);
        input.right_hand.thumbstick = vec2(1.0, 0.0);
        input
    }

    fn tick(redirect: &mut RedirectVr, world: &mut PhysicsWorld, input: &InputContext) {
        let position = world.player_body().unwrap().position().translation.vector;
        redirect.update(&*world, vec3(position.x, position.y, position.z), input, 0.1);
        let body = world.player_body_mut().unwrap();
        redirect.fixed_update(body, 0.1);
    }

    #[test]
    fn test_strafe_orbits_enabled_interest() {
        let (mut redirect, mut world) = scene();
        redirect
            .handle_scene_event(SceneEvent::Enabled {
                id: InterestId(3),
                position: vec3(0.0, 0.0, -4.0),
                scale: vec3(1.0, 2.0, 1.0),
            })
            .unwrap();

        for _ in 0..5 {
            tick(&mut redirect, &mut world, &strafe_right());
        }

        let position = world.player_body().unwrap().position().translation.vector;
        let radius = (vec2(position.x, position.z) - vec2(0.0, -4.0)).magnitude();
        assert!((radius - 4.0).abs() < 1e-3);
        assert!(position.x > 0.0);
    }

    #[test]
    fn test_disabled_interest_restores_straight_motion() {
        let (mut redirect, mut world) = scene();
        let enabled = SceneEvent::Enabled {
            id: InterestId(3),
            position: vec3(0.0, 0.0, -4.0),
            scale: vec3(1.0, 1.0, 1.0),
        };
        redirect.handle_scene_event(enabled).unwrap();
        redirect
            .handle_scene_event(SceneEvent::Disabled { id: InterestId(3) })
            .unwrap();
        assert!(redirect.registry().is_empty());

        // The floor is flat, so the surface probe finds no circle either.
        tick(&mut redirect, &mut world, &strafe_right());
        let position = world.player_body().unwrap().position().translation.vector;
        assert!((position.x - 0.2).abs() < 1e-4);
        assert!(position.z.abs() < 1e-4);
    }

    #[test]
    fn test_lifecycle_misuse_is_reported() {
        let (mut redirect, _) = scene();
        assert_eq!(
            redirect.handle_scene_event(SceneEvent::Disabled { id: InterestId(9) }),
            Err(RegistryError::UnknownInterest(InterestId(9)))
        );
    }

    #[test]
    fn test_set_mode_switches_locomotion() {
        let (mut redirect, _) = scene();
        assert_eq!(redirect.mode().kind(), MovementModeKind::Continuous);

        redirect.set_mode(MovementModeKind::Teleport);
        assert_eq!(redirect.mode().kind(), MovementModeKind::Teleport);
        assert_eq!(redirect.config().mode, MovementModeKind::Teleport);
    }
}
