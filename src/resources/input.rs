//! Per-frame keyboard input.
//!
//! The game only knows a fixed set of [`Key`]s. Once per frame the driver
//! copies the device state into the world's [`InputState`] through a
//! [`KeyboardDevice`]; systems read the snapshot, never the device.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Keys the game can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    W,
    A,
    S,
    D,
    Up,
    Down,
    Left,
    Right,
    LeftShift,
    RightShift,
    Space,
    Enter,
    Escape,
}

impl Key {
    pub const COUNT: usize = 13;

    pub const ALL: [Key; Key::COUNT] = [
        Key::W,
        Key::A,
        Key::S,
        Key::D,
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::LeftShift,
        Key::RightShift,
        Key::Space,
        Key::Enter,
        Key::Escape,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Key::W => "w",
            Key::A => "a",
            Key::S => "s",
            Key::D => "d",
            Key::Up => "up",
            Key::Down => "down",
            Key::Left => "left",
            Key::Right => "right",
            Key::LeftShift => "left_shift",
            Key::RightShift => "right_shift",
            Key::Space => "space",
            Key::Enter => "enter",
            Key::Escape => "escape",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Key::ALL
            .into_iter()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| format!("unknown key '{}'", s.trim()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Boolean key state for one frame.
pub struct BoolState {
    /// Whether the key is held this frame.
    pub active: bool,
    /// Whether the key went down this frame.
    pub just_pressed: bool,
    /// Whether the key went up this frame.
    pub just_released: bool,
}

/// Snapshot of every [`Key`] for the current frame.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: [BoolState; Key::COUNT],
}

impl InputState {
    pub fn get(&self, key: Key) -> BoolState {
        self.keys[key.index()]
    }

    pub fn set(&mut self, key: Key, state: BoolState) {
        self.keys[key.index()] = state;
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.get(key).active
    }

    pub fn just_pressed(&self, key: Key) -> bool {
        self.get(key).just_pressed
    }

    pub fn just_released(&self, key: Key) -> bool {
        self.get(key).just_released
    }
}

/// Source of raw keyboard state, polled once per frame.
///
/// The device guarantees that a key does not report two presses (or two
/// releases) without the opposite edge in between.
pub trait KeyboardDevice {
    fn is_key_down(&self, key: Key) -> bool;
    fn is_key_pressed(&self, key: Key) -> bool;
    fn is_key_released(&self, key: Key) -> bool;
}

#[cfg(feature = "raylib")]
mod raylib_device {
    use raylib::prelude::KeyboardKey;

    use super::{Key, KeyboardDevice};

    fn keyboard_key(key: Key) -> KeyboardKey {
        match key {
            Key::W => KeyboardKey::KEY_W,
            Key::A => KeyboardKey::KEY_A,
            Key::S => KeyboardKey::KEY_S,
            Key::D => KeyboardKey::KEY_D,
            Key::Up => KeyboardKey::KEY_UP,
            Key::Down => KeyboardKey::KEY_DOWN,
            Key::Left => KeyboardKey::KEY_LEFT,
            Key::Right => KeyboardKey::KEY_RIGHT,
            Key::LeftShift => KeyboardKey::KEY_LEFT_SHIFT,
            Key::RightShift => KeyboardKey::KEY_RIGHT_SHIFT,
            Key::Space => KeyboardKey::KEY_SPACE,
            Key::Enter => KeyboardKey::KEY_ENTER,
            Key::Escape => KeyboardKey::KEY_ESCAPE,
        }
    }

    impl KeyboardDevice for raylib::RaylibHandle {
        fn is_key_down(&self, key: Key) -> bool {
            raylib::RaylibHandle::is_key_down(self, keyboard_key(key))
        }
        fn is_key_pressed(&self, key: Key) -> bool {
            raylib::RaylibHandle::is_key_pressed(self, keyboard_key(key))
        }
        fn is_key_released(&self, key: Key) -> bool {
            raylib::RaylibHandle::is_key_released(self, keyboard_key(key))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolstate_default() {
        let bs = BoolState::default();
        assert!(!bs.active);
        assert!(!bs.just_pressed);
        assert!(!bs.just_released);
    }

    #[test]
    fn test_inputstate_default_all_inactive() {
        let input = InputState::default();
        for key in Key::ALL {
            assert!(!input.is_down(key));
            assert!(!input.just_pressed(key));
            assert!(!input.just_released(key));
        }
    }

    #[test]
    fn test_inputstate_set_is_per_key() {
        let mut input = InputState::default();
        input.set(
            Key::D,
            BoolState {
                active: true,
                just_pressed: true,
                just_released: false,
            },
        );
        assert!(input.is_down(Key::D));
        assert!(input.just_pressed(Key::D));
        assert!(!input.is_down(Key::A));
    }

    #[test]
    fn test_key_all_matches_discriminants() {
        for (i, key) in Key::ALL.iter().enumerate() {
            assert_eq!(key.index(), i);
        }
    }

    #[test]
    fn test_key_names_round_trip_through_from_str() {
        for key in Key::ALL {
            assert_eq!(key.name().parse::<Key>(), Ok(key));
        }
        assert_eq!(" Left_Shift ".parse::<Key>(), Ok(Key::LeftShift));
        assert!("f13".parse::<Key>().is_err());
    }
}
