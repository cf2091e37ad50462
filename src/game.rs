//! Game setup and the per-frame driver.
//!
//! Character factories build entities out of components; [`Game`] owns the
//! registry, wires up the state systems and exposes the three hooks a frame
//! loop needs: [`Game::update`], [`Game::draw`] and [`Game::layout`].

use glam::Vec2;
use rustc_hash::FxHashMap;

use crate::components::animation::Animation;
use crate::components::controls::Controls;
use crate::components::transform::{Direction, Transform};
use crate::ecs::entity::Entity;
use crate::ecs::registry::Registry;
use crate::error::GameError;
use crate::resources::animationdefs::AnimationSetDef;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::KeyboardDevice;
use crate::resources::spritesheet::SpriteSheet;
use crate::systems::animation::AnimationSystem;
use crate::systems::input::{InputSystem, update_input_state};
use crate::systems::movement::MovementSystem;
use crate::systems::render::DrawSurface;

/// The player's clip table and selection rules.
pub const PLAYER_ANIMATIONS: &str = include_str!("../assets/animations/player.json");

/// Parse the embedded player animation set.
pub fn player_animation_set() -> Result<AnimationSetDef, GameError> {
    AnimationSetDef::from_json(PLAYER_ANIMATIONS)
}

/// Spawn a non-playable character: drawn and animated, never moved by input.
pub fn spawn_character(registry: &mut Registry, transform: Transform, animation: Animation) -> Entity {
    let entity = registry.create_entity();
    registry.add_component(entity, transform);
    registry.add_component(entity, animation);
    entity
}

/// Spawn the keyboard-controlled character at the configured start position,
/// facing down, with the configured key bindings.
pub fn spawn_player(registry: &mut Registry, config: &GameConfig, animation: Animation) -> Entity {
    let mut controls = Controls::new();
    for (key, action) in config.key_bindings() {
        controls.bind(key, action);
    }
    let transform = Transform::new(Vec2::new(config.player_x, config.player_y), Direction::Down);

    let entity = spawn_character(registry, transform, animation);
    registry.add_component(entity, controls);
    log::info!(
        "spawned player {} at ({}, {})",
        entity,
        config.player_x,
        config.player_y
    );
    entity
}

pub struct Game {
    registry: Registry,
    player: Entity,
    render_size: (u32, u32),
}

impl Game {
    /// Register the state systems and spawn the player.
    ///
    /// `sheets` must hold every sheet the player animation set names.
    pub fn new(config: &GameConfig, sheets: &FxHashMap<String, SpriteSheet>) -> Result<Self, GameError> {
        let mut registry = Registry::new();
        registry.add_system(InputSystem::new());
        registry.add_system(MovementSystem::new());
        registry.add_system(AnimationSystem::new());

        let animation = player_animation_set()?.build(sheets)?;
        let player = spawn_player(&mut registry, config, animation);

        Ok(Self {
            registry,
            player,
            render_size: config.render_size(),
        })
    }

    /// One simulation tick: snapshot the keyboard, then run the state systems.
    pub fn update<D: KeyboardDevice + ?Sized>(&mut self, keyboard: &D) {
        update_input_state(self.registry.world_mut().input_mut(), keyboard);
        self.registry.update_systems(&[]);
    }

    /// Draw the current state onto `surface`.
    pub fn draw<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) {
        self.registry.render(surface);
    }

    /// Logical screen size. Independent of the outside (window) size; the
    /// driver scales the logical screen to fit.
    pub fn layout(&self, _outside_width: i32, _outside_height: i32) -> (u32, u32) {
        self.render_size
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }
}
