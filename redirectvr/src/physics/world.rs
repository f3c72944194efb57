use cgmath::{InnerSpace, Vector3};
use engine::physics_log;
use rapier3d::prelude::*;

use super::{
    util::{vec_to_npoint, vec_to_nvec},
    ObjectId, QueryMask, RayHit, SpatialQuery,
};

/// Static collision scene plus an optional kinematic player body.
///
/// The query pipeline is refreshed on every insertion, so queries always
/// see the current set of colliders without stepping a simulation.
pub struct PhysicsWorld {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    query_pipeline: QueryPipeline,
    player: Option<RigidBodyHandle>,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    pub fn new() -> Self {
        PhysicsWorld {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            query_pipeline: QueryPipeline::new(),
            player: None,
        }
    }

    /// Insert a fixed collider tagged with `id`, queryable through `mask`.
    pub fn add_static(
        &mut self,
        id: ObjectId,
        builder: ColliderBuilder,
        mask: QueryMask,
    ) -> ColliderHandle {
        let groups = InteractionGroups::new(Group::from_bits_truncate(mask.bits()), Group::ALL);
        let collider = builder
            .user_data(id.0 as u128)
            .collision_groups(groups)
            .build();
        let handle = self.colliders.insert(collider);
        self.query_pipeline.update(&self.bodies, &self.colliders);
        physics_log!(debug, "added static collider {:?} ({:?})", id, handle);
        handle
    }

    pub fn add_cuboid(
        &mut self,
        id: ObjectId,
        center: Vector3<f32>,
        half_extents: Vector3<f32>,
        mask: QueryMask,
    ) -> ColliderHandle {
        let builder = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vec_to_nvec(center));
        self.add_static(id, builder, mask)
    }

    /// Upright cylinder centered at `center`.
    pub fn add_cylinder(
        &mut self,
        id: ObjectId,
        center: Vector3<f32>,
        half_height: f32,
        radius: f32,
        mask: QueryMask,
    ) -> ColliderHandle {
        let builder =
            ColliderBuilder::cylinder(half_height, radius).translation(vec_to_nvec(center));
        self.add_static(id, builder, mask)
    }

    /// Thin square slab whose top face lies at `height`.
    pub fn add_floor(&mut self, id: ObjectId, height: f32, half_extent: f32) -> ColliderHandle {
        let thickness = 0.05;
        self.add_cuboid(
            id,
            Vector3::new(0.0, height - thickness, 0.0),
            Vector3::new(half_extent, thickness, half_extent),
            QueryMask::WORLD | QueryMask::TELEPORT_SURFACE,
        )
    }

    /// Create the kinematic player body, or move the existing one.
    pub fn spawn_player(&mut self, position: Vector3<f32>) -> RigidBodyHandle {
        if let Some(handle) = self.player {
            if let Some(body) = self.bodies.get_mut(handle) {
                body.set_translation(vec_to_nvec(position), true);
                return handle;
            }
        }
        let body = RigidBodyBuilder::kinematic_position_based()
            .translation(vec_to_nvec(position))
            .build();
        let handle = self.bodies.insert(body);
        self.player = Some(handle);
        handle
    }

    pub fn player_body(&self) -> Option<&RigidBody> {
        self.player.and_then(|handle| self.bodies.get(handle))
    }

    pub fn player_body_mut(&mut self) -> Option<&mut RigidBody> {
        self.player.and_then(|handle| self.bodies.get_mut(handle))
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }
}

impl SpatialQuery for PhysicsWorld {
    fn raycast(
        &self,
        origin: Vector3<f32>,
        direction: Vector3<f32>,
        max_distance: f32,
        mask: QueryMask,
    ) -> Option<RayHit> {
        let length = direction.magnitude();
        if length <= f32::EPSILON || !length.is_finite() {
            return None;
        }
        let direction = direction / length;

        let ray = Ray::new(vec_to_npoint(origin), vec_to_nvec(direction));
        let filter = QueryFilter::new().groups(InteractionGroups::new(
            Group::ALL,
            Group::from_bits_truncate(mask.bits()),
        ));

        let (handle, toi) = self.query_pipeline.cast_ray(
            &self.bodies,
            &self.colliders,
            &ray,
            max_distance,
            true,
            filter,
        )?;

        let collider = self.colliders.get(handle)?;
        Some(RayHit {
            point: origin + direction * toi,
            distance: toi,
            object: ObjectId(collider.user_data as u64),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::vec3;

    #[test]
    fn test_raycast_hits_floor() {
        let mut world = PhysicsWorld::new();
        world.add_floor(ObjectId(1), 0.0, 50.0);
        assert_eq!(world.collider_count(), 1);

        let hit = world
            .raycast(vec3(0.0, 2.0, 0.0), vec3(0.0, -1.0, 0.0), 10.0, QueryMask::ALL)
            .unwrap();

        assert_eq!(hit.object, ObjectId(1));
        assert!((hit.distance - 2.0).abs() < 1e-4);
        assert!(hit.point.y.abs() < 1e-4);
    }

    #[test]
    fn test_mask_filters_colliders() {
        let mut world = PhysicsWorld::new();
        world.add_cuboid(
            ObjectId(7),
            vec3(0.0, 0.0, -5.0),
            vec3(1.0, 1.0, 1.0),
            QueryMask::INTEREST,
        );

        let origin = vec3(0.0, 0.0, 0.0);
        let forward = vec3(0.0, 0.0, -1.0);
        assert!(world.raycast(origin, forward, 100.0, QueryMask::WORLD).is_none());
        assert!(world.raycast(origin, forward, 100.0, QueryMask::INTEREST).is_some());
    }

    #[test]
    fn test_linecast_respects_segment_length() {
        let mut world = PhysicsWorld::new();
        world.add_floor(ObjectId(1), 0.0, 50.0);

        let start = vec3(0.0, 3.0, 0.0);
        assert!(world.linecast(start, vec3(0.0, 1.0, 0.0), QueryMask::ALL).is_none());

        let hit = world
            .linecast(start, vec3(0.0, -1.0, 0.0), QueryMask::ALL)
            .unwrap();
        assert!((hit.distance - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_spawn_player_reuses_body() {
        let mut world = PhysicsWorld::new();
        let first = world.spawn_player(vec3(0.0, 0.0, 0.0));
        let second = world.spawn_player(vec3(1.0, 0.0, 0.0));
        assert_eq!(first, second);

        let body = world.player_body().unwrap();
        assert_eq!(body.translation().x, 1.0);
    }
}
