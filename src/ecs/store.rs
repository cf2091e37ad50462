//! Typed component storage.
//!
//! The set of component types is closed: every type implementing
//! [`Component`] owns one [`ComponentStore`] field inside [`Components`] and
//! names the field it lives in. Lookups are plain field accesses, so no type
//! ids or downcasts are involved. Iteration order of a store is unspecified.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::components::animation::Animation;
use crate::components::controls::Controls;
use crate::components::transform::Transform;
use crate::ecs::entity::Entity;

/// Tag for each component type the world can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Transform,
    Controls,
    Animation,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentKind::Transform => "Transform",
            ComponentKind::Controls => "Controls",
            ComponentKind::Animation => "Animation",
        };
        f.write_str(name)
    }
}

/// Per-type table `entity -> component`. At most one instance per entity.
#[derive(Debug, Clone)]
pub struct ComponentStore<T> {
    map: FxHashMap<Entity, T>,
}

impl<T> Default for ComponentStore<T> {
    fn default() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }
}

impl<T> ComponentStore<T> {
    /// Insert or overwrite; returns the replaced component, if any.
    pub fn insert(&mut self, entity: Entity, component: T) -> Option<T> {
        self.map.insert(entity, component)
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.map.get(&entity)
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.map.get_mut(&entity)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.map.contains_key(&entity)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.map.iter().map(|(e, c)| (*e, c))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.map.iter_mut().map(|(e, c)| (*e, c))
    }

    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.map.keys().copied()
    }
}

/// One store per component kind. Fields are public so systems can borrow
/// two stores at once (e.g. `&mut transforms` with `&controls`).
#[derive(Debug, Default)]
pub struct Components {
    pub transforms: ComponentStore<Transform>,
    pub controls: ComponentStore<Controls>,
    pub animations: ComponentStore<Animation>,
}

/// Implemented by every type that can be attached to an entity.
pub trait Component: Sized + 'static {
    const KIND: ComponentKind;

    fn store(components: &Components) -> &ComponentStore<Self>;
    fn store_mut(components: &mut Components) -> &mut ComponentStore<Self>;
}

impl Component for Transform {
    const KIND: ComponentKind = ComponentKind::Transform;

    fn store(components: &Components) -> &ComponentStore<Self> {
        &components.transforms
    }
    fn store_mut(components: &mut Components) -> &mut ComponentStore<Self> {
        &mut components.transforms
    }
}

impl Component for Controls {
    const KIND: ComponentKind = ComponentKind::Controls;

    fn store(components: &Components) -> &ComponentStore<Self> {
        &components.controls
    }
    fn store_mut(components: &mut Components) -> &mut ComponentStore<Self> {
        &mut components.controls
    }
}

impl Component for Animation {
    const KIND: ComponentKind = ComponentKind::Animation;

    fn store(components: &Components) -> &ComponentStore<Self> {
        &components.animations
    }
    fn store_mut(components: &mut Components) -> &mut ComponentStore<Self> {
        &mut components.animations
    }
}
