//! Keyboard-driven control of an entity.
//!
//! [`Controls`] maps keys to declarative [`ControlAction`]s and keeps the
//! ordered buffer of bound keys that are currently held. The input system
//! maintains the buffer; the movement system applies the actions.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::components::transform::{Direction, Transform};
use crate::resources::input::Key;

/// What a held key does to a [`Transform`] during one movement tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlAction {
    /// Step one unit along the direction's axis and face that way.
    Move(Direction),
    /// Override the tick's speed.
    SpeedModifier { speed: f32 },
}

impl ControlAction {
    pub fn apply(&self, transform: &mut Transform) {
        match *self {
            ControlAction::Move(direction) => {
                // Sets only the axis this direction moves along.
                let step = direction.unit();
                if step.x != 0.0 {
                    transform.velocity.x = step.x;
                } else {
                    transform.velocity.y = step.y;
                }
                transform.direction = direction;
            }
            ControlAction::SpeedModifier { speed } => transform.speed = speed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: Key,
    pub action: ControlAction,
}

/// Key bindings plus the held-key buffer, most recent press last.
///
/// The buffer never holds duplicates and only holds bound keys.
#[derive(Debug, Clone, Default)]
pub struct Controls {
    bindings: Vec<KeyBinding>,
    held: SmallVec<[Key; 4]>,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`bind`](Self::bind).
    pub fn with_binding(mut self, key: Key, action: ControlAction) -> Self {
        self.bind(key, action);
        self
    }

    /// Bind `key`, replacing its previous action if it had one.
    pub fn bind(&mut self, key: Key, action: ControlAction) {
        match self.bindings.iter_mut().find(|b| b.key == key) {
            Some(binding) => binding.action = action,
            None => self.bindings.push(KeyBinding { key, action }),
        }
    }

    pub fn action_for(&self, key: Key) -> Option<ControlAction> {
        self.bindings
            .iter()
            .find(|b| b.key == key)
            .map(|b| b.action)
    }

    pub fn is_bound(&self, key: Key) -> bool {
        self.action_for(key).is_some()
    }

    /// Bound keys in binding order.
    pub fn bound_keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.bindings.iter().map(|b| b.key)
    }

    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    /// Held keys in press order.
    pub fn held_keys(&self) -> &[Key] {
        &self.held
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Record a press. Returns false for unbound or already-held keys.
    pub fn press(&mut self, key: Key) -> bool {
        if !self.is_bound(key) || self.is_held(key) {
            return false;
        }
        self.held.push(key);
        true
    }

    /// Record a release, keeping the order of the remaining keys.
    /// Returns false if the key was not held.
    pub fn release(&mut self, key: Key) -> bool {
        match self.held.iter().position(|k| *k == key) {
            Some(idx) => {
                self.held.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Drop held keys for which `still_held` returns false.
    pub fn retain_held(&mut self, mut still_held: impl FnMut(Key) -> bool) {
        self.held.retain(|k| still_held(*k));
    }
}
