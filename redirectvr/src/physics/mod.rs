//! Contracts for the collision and body collaborators, plus a rapier-backed
//! implementation of both.

pub mod body;
pub mod util;
pub mod world;

use bitflags::bitflags;
use cgmath::{InnerSpace, Vector3};

pub use body::{PlayerBody, PlayerTransform};
pub use world::PhysicsWorld;

bitflags! {
    /// Which colliders a query may hit.
    pub struct QueryMask: u32 {
        const WORLD = 0b0001;
        const INTEREST = 0b0010;
        const TELEPORT_SURFACE = 0b0100;
        const ALL = u32::MAX;
    }
}

/// Stable identity of whatever a query hit, comparable across casts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub point: Vector3<f32>,
    /// Distance from the query origin to `point`.
    pub distance: f32,
    pub object: ObjectId,
}

pub trait SpatialQuery {
    /// First hit along `direction` (need not be normalized) within `max_distance`.
    fn raycast(
        &self,
        origin: Vector3<f32>,
        direction: Vector3<f32>,
        max_distance: f32,
        mask: QueryMask,
    ) -> Option<RayHit>;

    /// First hit on the segment from `start` to `end`.
    fn linecast(&self, start: Vector3<f32>, end: Vector3<f32>, mask: QueryMask) -> Option<RayHit> {
        let segment = end - start;
        let length = segment.magnitude();
        if length <= f32::EPSILON {
            return None;
        }
        self.raycast(start, segment / length, length, mask)
    }
}
