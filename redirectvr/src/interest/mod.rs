mod registry;

pub use registry::{InterestRegistry, RegistryError};

use cgmath::Vector3;

/// Identity of a scene object that carries interest behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InterestId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InterestPoint {
    pub id: InterestId,
    pub position: Vector3<f32>,
    pub radius: f32,
}

impl InterestPoint {
    /// Radius follows the object's lateral (X/Z) scale.
    pub fn from_scale(id: InterestId, position: Vector3<f32>, scale: Vector3<f32>) -> Self {
        InterestPoint {
            id,
            position,
            radius: radius_from_scale(scale),
        }
    }
}

pub fn radius_from_scale(scale: Vector3<f32>) -> f32 {
    scale.x.abs().max(scale.z.abs())
}

/// Lifecycle signals from the scene for interest-bearing objects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneEvent {
    Enabled {
        id: InterestId,
        position: Vector3<f32>,
        scale: Vector3<f32>,
    },
    Moved {
        id: InterestId,
        position: Vector3<f32>,
        scale: Vector3<f32>,
    },
    Disabled {
        id: InterestId,
    },
}

impl SceneEvent {
    pub fn id(&self) -> InterestId {
        match self {
            SceneEvent::Enabled { id, .. }
            | SceneEvent::Moved { id, .. }
            | SceneEvent::Disabled { id } => *id,
        }
    }
}
