use cgmath::Vector3;
use engine::interest_log;
use thiserror::Error;

use super::{radius_from_scale, InterestId, InterestPoint, SceneEvent};

/// Lifecycle misuse by a collaborator. These indicate a bug upstream and are
/// never corrected silently.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate registration of interest object {0:?}")]
    DuplicateRegistration(InterestId),
    #[error("unknown interest object {0:?}")]
    UnknownInterest(InterestId),
}

/// The live set of points of interest, in registration order.
#[derive(Debug, Default, Clone)]
pub struct InterestRegistry {
    points: Vec<InterestPoint>,
}

impl InterestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, point: InterestPoint) -> Result<(), RegistryError> {
        if self.contains(point.id) {
            return Err(RegistryError::DuplicateRegistration(point.id));
        }
        self.points.push(point);
        Ok(())
    }

    pub fn unregister(&mut self, id: InterestId) -> Result<InterestPoint, RegistryError> {
        let index = self
            .index_of(id)
            .ok_or(RegistryError::UnknownInterest(id))?;
        Ok(self.points.remove(index))
    }

    /// Refresh position and radius of a registered point.
    pub fn update(
        &mut self,
        id: InterestId,
        position: Vector3<f32>,
        radius: f32,
    ) -> Result<(), RegistryError> {
        let point = self
            .points
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RegistryError::UnknownInterest(id))?;
        point.position = position;
        point.radius = radius;
        Ok(())
    }

    /// Apply a scene lifecycle event. Failures are logged and returned.
    pub fn handle_event(&mut self, event: SceneEvent) -> Result<(), RegistryError> {
        let result = match event {
            SceneEvent::Enabled {
                id,
                position,
                scale,
            } => self.register(InterestPoint::from_scale(id, position, scale)),
            SceneEvent::Moved {
                id,
                position,
                scale,
            } => self.update(id, position, radius_from_scale(scale)),
            SceneEvent::Disabled { id } => self.unregister(id).map(|_| ()),
        };

        match &result {
            Ok(()) => interest_log!(trace, "applied {:?}", event),
            Err(err) => interest_log!(error, "rejected event for {:?}: {}", event.id(), err),
        }
        result
    }

    pub fn snapshot(&self) -> &[InterestPoint] {
        &self.points
    }

    pub fn contains(&self, id: InterestId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn get(&self, id: InterestId) -> Option<&InterestPoint> {
        self.points.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn index_of(&self, id: InterestId) -> Option<usize> {
        self.points.iter().position(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::vec3;

    fn point(id: u64) -> InterestPoint {
        InterestPoint {
            id: InterestId(id),
            position: vec3(id as f32, 0.0, 0.0),
            radius: 1.0,
        }
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut registry = InterestRegistry::new();
        registry.register(point(1)).unwrap();

        assert_eq!(
            registry.register(point(1)),
            Err(RegistryError::DuplicateRegistration(InterestId(1)))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unregister_unknown_is_rejected() {
        let mut registry = InterestRegistry::new();
        assert_eq!(
            registry.unregister(InterestId(9)),
            Err(RegistryError::UnknownInterest(InterestId(9)))
        );
    }

    #[test]
    fn test_reenable_after_disable() {
        let mut registry = InterestRegistry::new();
        let id = InterestId(5);
        let enabled = SceneEvent::Enabled {
            id,
            position: vec3(0.0, 0.0, -3.0),
            scale: vec3(2.0, 1.0, 0.5),
        };

        registry.handle_event(enabled).unwrap();
        registry.handle_event(SceneEvent::Disabled { id }).unwrap();
        registry.handle_event(enabled).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(id).unwrap().radius, 2.0);
    }

    #[test]
    fn test_moved_refreshes_radius_and_position() {
        let mut registry = InterestRegistry::new();
        let id = InterestId(2);
        registry.register(point(2)).unwrap();

        registry
            .handle_event(SceneEvent::Moved {
                id,
                position: vec3(4.0, 1.0, 4.0),
                scale: vec3(1.0, 9.0, -3.0),
            })
            .unwrap();

        let updated = registry.get(id).unwrap();
        assert_eq!(updated.position, vec3(4.0, 1.0, 4.0));
        assert_eq!(updated.radius, 3.0);
    }

    #[test]
    fn test_snapshot_keeps_registration_order() {
        let mut registry = InterestRegistry::new();
        for id in [3, 1, 2] {
            registry.register(point(id)).unwrap();
        }
        registry.unregister(InterestId(1)).unwrap();

        let ids: Vec<u64> = registry.snapshot().iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![3, 2]);
    }
}
