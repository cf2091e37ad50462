//! Input systems.
//!
//! - [`update_input_state`] reads the keyboard device each frame and writes
//!   the results into the world's [`InputState`].
//! - [`InputSystem`] turns press/release edges from that snapshot into each
//!   [`Controls`](crate::components::controls::Controls) held-key buffer.
use crate::ecs::system::{System, SystemKind};
use crate::ecs::world::World;
use crate::resources::input::{BoolState, InputState, Key, KeyboardDevice};

/// Poll the device for every known key and update `input`.
pub fn update_input_state<D: KeyboardDevice + ?Sized>(input: &mut InputState, device: &D) {
    for key in Key::ALL {
        input.set(
            key,
            BoolState {
                active: device.is_key_down(key),
                just_pressed: device.is_key_pressed(key),
                just_released: device.is_key_released(key),
            },
        );
    }
}

/// Maintains held-key buffers from key edges.
///
/// Contract
/// - Reads the world's [`InputState`].
/// - For every bound key: a press edge appends it, a release edge removes it.
/// - Buffered keys the device no longer reports as down are dropped, so a
///   lost release edge cannot leave a key stuck.
#[derive(Debug, Default)]
pub struct InputSystem;

impl InputSystem {
    pub fn new() -> Self {
        InputSystem
    }
}

impl System for InputSystem {
    fn kind(&self) -> SystemKind {
        SystemKind::Input
    }

    fn update(&mut self, world: &mut World) {
        let (input, components) = world.input_and_components_mut();
        for (entity, controls) in components.controls.iter_mut() {
            let bound: Vec<Key> = controls.bound_keys().collect();
            for key in bound {
                if input.just_pressed(key) && controls.press(key) {
                    log::trace!("entity {} pressed {}", entity, key);
                }
                if input.just_released(key) && controls.release(key) {
                    log::trace!("entity {} released {}", entity, key);
                }
            }
            controls.retain_held(|key| input.is_down(key));
        }
    }
}
