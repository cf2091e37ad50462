//! Entity identifiers.

use std::fmt;

/// Opaque entity id. Carries no data; components are stored by the
/// [`World`](super::world::World) keyed by this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(u32);

impl Entity {
    /// Wrap a raw id. The world accepts components for ids it never issued.
    pub const fn from_raw(id: u32) -> Self {
        Entity(id)
    }

    pub const fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
