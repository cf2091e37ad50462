//! Central registry: the world plus the systems that run over it.

use crate::ecs::entity::Entity;
use crate::ecs::store::{Component, ComponentStore};
use crate::ecs::system::{System, SystemKind, SystemsStore};
use crate::ecs::world::World;
use crate::error::GameError;
use crate::systems::render::{DrawSurface, RenderSystem};

/// Owns entities, components and systems. Systems only see state through
/// the [`World`] this registry hands them.
///
/// A frame is `update_systems` followed by `render`; the caller sequences
/// the two.
#[derive(Default)]
pub struct Registry {
    world: World,
    systems: SystemsStore,
    renderer: RenderSystem,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_entity(&mut self) -> Entity {
        self.world.create_entity()
    }

    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> Option<T> {
        self.world.add_component(entity, component)
    }

    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.world.get_component(entity)
    }

    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.world.get_component_mut(entity)
    }

    pub fn require_component<T: Component>(&self, entity: Entity) -> Result<&T, GameError> {
        self.world.require_component(entity)
    }

    pub fn get_all_components_of_type<T: Component>(&self) -> &ComponentStore<T> {
        self.world.components_of()
    }

    /// Register a state system. One instance per kind: a second registration
    /// of the same kind replaces the first, which is returned.
    pub fn add_system(&mut self, system: impl System + 'static) -> Option<Box<dyn System>> {
        let kind = system.kind();
        let replaced = self.systems.insert(Box::new(system));
        if replaced.is_some() {
            log::debug!("replaced {:?} system", kind);
        }
        replaced
    }

    pub fn get_system(&self, kind: SystemKind) -> Option<&dyn System> {
        self.systems.get(kind)
    }

    pub fn get_all_systems(&self) -> impl Iterator<Item = (SystemKind, &dyn System)> {
        self.systems.iter()
    }

    /// Run one tick of every registered state system except `excluded`.
    pub fn update_systems(&mut self, excluded: &[SystemKind]) {
        self.systems.run(&mut self.world, excluded);
    }

    /// Draw the current state. Call after [`update_systems`](Self::update_systems).
    pub fn render<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) {
        self.renderer.render(&self.world, surface);
    }

    pub fn render_system(&self) -> &RenderSystem {
        &self.renderer
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::components::transform::Transform;

    /// Records the order in which systems ran.
    struct Recording {
        kind: SystemKind,
        tag: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl System for Recording {
        fn kind(&self) -> SystemKind {
            self.kind
        }
        fn update(&mut self, _world: &mut World) {
            self.log.borrow_mut().push(self.tag);
        }
    }

    fn recording(kind: SystemKind, tag: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) -> Recording {
        Recording {
            kind,
            tag,
            log: Rc::clone(log),
        }
    }

    #[test]
    fn test_update_runs_in_pipeline_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = Registry::new();
        registry.add_system(recording(SystemKind::Animation, "animation", &log));
        registry.add_system(recording(SystemKind::Input, "input", &log));
        registry.add_system(recording(SystemKind::Movement, "movement", &log));

        registry.update_systems(&[]);
        assert_eq!(*log.borrow(), vec!["input", "movement", "animation"]);
    }

    #[test]
    fn test_update_skips_excluded() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = Registry::new();
        registry.add_system(recording(SystemKind::Input, "input", &log));
        registry.add_system(recording(SystemKind::Movement, "movement", &log));

        registry.update_systems(&[SystemKind::Movement]);
        assert_eq!(*log.borrow(), vec!["input"]);
    }

    #[test]
    fn test_add_system_replaces_same_kind() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = Registry::new();
        assert!(registry.add_system(recording(SystemKind::Input, "first", &log)).is_none());
        assert!(registry.add_system(recording(SystemKind::Input, "second", &log)).is_some());
        assert_eq!(registry.get_all_systems().count(), 1);

        registry.update_systems(&[]);
        assert_eq!(*log.borrow(), vec!["second"]);
    }

    #[test]
    fn test_get_system_by_kind() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = Registry::new();
        registry.add_system(recording(SystemKind::Movement, "movement", &log));
        assert!(registry.get_system(SystemKind::Movement).is_some());
        assert!(registry.get_system(SystemKind::Animation).is_none());
    }

    #[test]
    fn test_component_passthrough() {
        let mut registry = Registry::new();
        let e = registry.create_entity();
        registry.add_component(e, Transform::at(3.0, 4.0));
        registry
            .get_component_mut::<Transform>(e)
            .unwrap()
            .position
            .y = 9.0;
        let t = registry.require_component::<Transform>(e).unwrap();
        assert_eq!((t.position.x, t.position.y), (3.0, 9.0));
        assert_eq!(registry.get_all_components_of_type::<Transform>().len(), 1);
    }
}
