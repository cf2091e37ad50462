//! Entity and component state shared by all systems.

use crate::ecs::entity::Entity;
use crate::ecs::store::{Component, ComponentStore, Components};
use crate::error::GameError;
use crate::resources::input::InputState;

/// Entities, their components, and the per-frame input snapshot.
///
/// Systems receive `&mut World` from the [`Registry`](super::registry::Registry);
/// there is no entity removal.
#[derive(Debug, Default)]
pub struct World {
    next_entity: u32,
    components: Components,
    input: InputState,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh id. Ids start at 1 and are never reused.
    pub fn create_entity(&mut self) -> Entity {
        self.next_entity += 1;
        Entity::from_raw(self.next_entity)
    }

    /// Number of ids issued so far.
    pub fn entity_count(&self) -> usize {
        self.next_entity as usize
    }

    /// Attach `component` to `entity`, replacing any component of the same
    /// type. The id is not checked against the ids this world issued.
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> Option<T> {
        let replaced = T::store_mut(&mut self.components).insert(entity, component);
        if replaced.is_some() {
            log::trace!("replaced {} on entity {}", T::KIND, entity);
        }
        replaced
    }

    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        T::store(&self.components).get(entity)
    }

    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        T::store_mut(&mut self.components).get_mut(entity)
    }

    /// Like [`get_component`](Self::get_component) but absence is an error.
    pub fn require_component<T: Component>(&self, entity: Entity) -> Result<&T, GameError> {
        self.get_component(entity)
            .ok_or(GameError::MissingComponent {
                entity,
                kind: T::KIND,
            })
    }

    /// Full table for one component type.
    pub fn components_of<T: Component>(&self) -> &ComponentStore<T> {
        T::store(&self.components)
    }

    pub fn components(&self) -> &Components {
        &self.components
    }

    pub fn components_mut(&mut self) -> &mut Components {
        &mut self.components
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Split borrow for systems that read input while writing components.
    pub fn input_and_components_mut(&mut self) -> (&InputState, &mut Components) {
        (&self.input, &mut self.components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::controls::Controls;
    use crate::components::transform::Transform;
    use crate::ecs::store::ComponentKind;

    #[test]
    fn test_entities_are_monotonic_and_start_at_one() {
        let mut world = World::new();
        let a = world.create_entity();
        let b = world.create_entity();
        let c = world.create_entity();
        assert_eq!(a.id(), 1);
        assert!(a < b && b < c);
        assert_eq!(world.entity_count(), 3);
    }

    #[test]
    fn test_add_component_replaces_same_type() {
        let mut world = World::new();
        let e = world.create_entity();
        assert!(world.add_component(e, Transform::at(1.0, 2.0)).is_none());
        let old = world.add_component(e, Transform::at(5.0, 6.0));
        assert_eq!(old.map(|t| t.position.x), Some(1.0));
        assert_eq!(world.get_component::<Transform>(e).unwrap().position.x, 5.0);
    }

    #[test]
    fn test_add_component_accepts_unissued_id() {
        let mut world = World::new();
        let stray = Entity::from_raw(42);
        world.add_component(stray, Transform::default());
        assert!(world.get_component::<Transform>(stray).is_some());
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn test_require_component_reports_kind() {
        let mut world = World::new();
        let e = world.create_entity();
        world.add_component(e, Transform::default());
        assert!(world.require_component::<Transform>(e).is_ok());
        match world.require_component::<Controls>(e) {
            Err(GameError::MissingComponent { entity, kind }) => {
                assert_eq!(entity, e);
                assert_eq!(kind, ComponentKind::Controls);
            }
            other => panic!("expected MissingComponent, got {other:?}"),
        }
    }

    #[test]
    fn test_components_of_returns_whole_table() {
        let mut world = World::new();
        for _ in 0..3 {
            let e = world.create_entity();
            world.add_component(e, Transform::default());
        }
        let lone = world.create_entity();
        world.add_component(lone, Controls::new());
        assert_eq!(world.components_of::<Transform>().len(), 3);
        assert_eq!(world.components_of::<Controls>().len(), 1);
        assert!(!world.components_of::<Transform>().contains(lone));
    }
}
