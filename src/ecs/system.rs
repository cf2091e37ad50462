//! State-update systems and their store.
//!
//! Rendering is not a [`System`]: it needs the frame's draw surface and must
//! run after every state system, so the [`Registry`](super::registry::Registry)
//! drives it as a separate step.

use std::collections::BTreeMap;

use crate::ecs::world::World;

/// One variant per state system. The derived order is the pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SystemKind {
    Input,
    Movement,
    Animation,
}

/// A unit of per-frame logic over the world.
pub trait System {
    fn kind(&self) -> SystemKind;
    fn update(&mut self, world: &mut World);
}

/// At most one system per [`SystemKind`], iterated in pipeline order.
#[derive(Default)]
pub struct SystemsStore {
    systems: BTreeMap<SystemKind, Box<dyn System>>,
}

impl SystemsStore {
    /// Register `system`; a system of the same kind is replaced and returned.
    pub fn insert(&mut self, system: Box<dyn System>) -> Option<Box<dyn System>> {
        self.systems.insert(system.kind(), system)
    }

    pub fn get(&self, kind: SystemKind) -> Option<&dyn System> {
        self.systems.get(&kind).map(|s| s.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (SystemKind, &dyn System)> {
        self.systems.iter().map(|(k, s)| (*k, s.as_ref()))
    }

    /// Run every system not listed in `excluded`, in pipeline order.
    pub fn run(&mut self, world: &mut World, excluded: &[SystemKind]) {
        for (kind, system) in self.systems.iter_mut() {
            if excluded.contains(kind) {
                continue;
            }
            system.update(world);
        }
    }
}
