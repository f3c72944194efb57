// Headless Runtime - replays a scripted input track through the locomotion
// core against a small rapier scene and logs the path the player takes.
//
// Scope levels come from REDIRECT_LOG (e.g. `warn,locomotion=debug`); the
// subscriber filter from RUST_LOG.

use std::path::PathBuf;

use anyhow::{Context, Result};
use cgmath::{vec2, vec3, Deg, Quaternion, Rotation3, Vector3};
use clap::{Parser, ValueEnum};
use engine::{logging::DEFAULT_LOG_ENV, profile};
use redirectvr::{
    config::{MovementModeKind, RedirectConfig},
    input_context::{InputContext, Pose},
    interest::{InterestId, SceneEvent},
    physics::{ObjectId, PhysicsWorld, PlayerBody, QueryMask},
    RedirectVr,
};
use tracing::info;

const EYE_HEIGHT: f32 = 1.6;
const HAND_HEIGHT: f32 = 1.1;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Continuous,
    Teleport,
}

impl From<Mode> for MovementModeKind {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Continuous => MovementModeKind::Continuous,
            Mode::Teleport => MovementModeKind::Teleport,
        }
    }
}

#[derive(Parser)]
#[command(name = "headless_runtime")]
#[command(about = "Replay a scripted input track through redirected locomotion")]
struct Args {
    /// TOML configuration file (defaults to ./redirectvr.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Movement mode, overriding the configuration file
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Number of simulated frames
    #[arg(short, long, default_value = "300")]
    ticks: u32,

    /// Frame and physics step, in seconds
    #[arg(long, default_value = "0.0166")]
    dt: f32,

    /// Log the player position every N frames
    #[arg(long, default_value = "30")]
    report_every: u32,
}

fn main() -> Result<()> {
    engine::logging::init_logging(DEFAULT_LOG_ENV);
    let args = Args::parse();

    let mut config = RedirectConfig::load(args.config.as_deref())?;
    if let Some(mode) = args.mode {
        config.mode = mode.into();
    }
    info!("running {} ticks in {:?} mode", args.ticks, config.mode);

    let mut world = build_world();
    info!("scene has {} colliders", world.collider_count());
    let mut redirect = RedirectVr::new(config);
    for event in scene_events() {
        redirect.handle_scene_event(event)?;
    }

    profile!("simulation", {
        for tick in 0..args.ticks {
            let body = world.player_body().context("player body missing")?;
            let pose = (PlayerBody::position(body), PlayerBody::rotation(body));
            let input = scripted_input(redirect.config().mode, tick, pose.0, pose.1);

            redirect.update(&world, pose.0, &input, args.dt);

            let body = world.player_body_mut().context("player body missing")?;
            let step = redirect.fixed_update(body, args.dt);

            if step.yaw_delta != Deg(0.0) || tick % args.report_every.max(1) == 0 {
                let body = world.player_body().context("player body missing")?;
                info!(
                    "tick {:>4}: position {:?}, yaw delta {:?}",
                    tick,
                    PlayerBody::position(body),
                    step.yaw_delta
                );
            }
        }
    });

    let body = world.player_body().context("player body missing")?;
    info!("final position {:?}", PlayerBody::position(body));
    Ok(())
}

/// A floor, a round pillar for the surface fallback, and a crate.
fn build_world() -> PhysicsWorld {
    let mut world = PhysicsWorld::new();
    world.add_floor(ObjectId(1), 0.0, 50.0);
    world.add_cylinder(
        ObjectId(2),
        vec3(6.0, 1.5, -6.0),
        1.5,
        1.0,
        QueryMask::WORLD,
    );
    world.add_cuboid(
        ObjectId(3),
        vec3(-4.0, 0.5, -10.0),
        vec3(0.5, 0.5, 0.5),
        QueryMask::WORLD | QueryMask::TELEPORT_SURFACE,
    );
    world.spawn_player(vec3(0.0, 0.0, 0.0));
    world
}

fn scene_events() -> Vec<SceneEvent> {
    vec![
        SceneEvent::Enabled {
            id: InterestId(10),
            position: vec3(0.0, 0.0, -8.0),
            scale: vec3(1.0, 1.0, 1.0),
        },
        SceneEvent::Enabled {
            id: InterestId(11),
            position: vec3(-4.0, 0.5, -10.0),
            scale: vec3(0.5, 1.0, 0.5),
        },
    ]
}

/// Head and hands follow the body; the sticks and trigger follow a fixed
/// script that cycles every 240 frames.
fn scripted_input(
    mode: MovementModeKind,
    tick: u32,
    position: Vector3<f32>,
    rotation: Quaternion<f32>,
) -> InputContext {
    let mut input = InputContext::default();
    input.head = Pose {
        position: position + vec3(0.0, EYE_HEIGHT, 0.0),
        rotation,
    };
    input.right_hand.pose = Pose {
        position: position + vec3(0.2, HAND_HEIGHT, -0.2),
        rotation: rotation * Quaternion::from_angle_x(Deg(-25.0)),
    };

    let phase = tick % 240;
    match mode {
        MovementModeKind::Continuous => {
            input.right_hand.thumbstick = match phase {
                0..=59 => vec2(0.0, 1.0),
                60..=179 => vec2(1.0, 0.0),
                _ => vec2(0.7, 0.7),
            };
        }
        MovementModeKind::Teleport => {
            input.right_hand.trigger_value = if phase % 60 < 40 { 1.0 } else { 0.0 };
        }
    }
    if phase == 200 {
        input.left_hand.thumbstick = vec2(1.0, 0.0);
    }
    input
}
