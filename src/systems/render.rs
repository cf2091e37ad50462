//! Render step.
//!
//! Rendering is driven once per frame by the game loop, after every state
//! system has run, with the frame's [`DrawSurface`] passed in. It draws the
//! active clip's current frame of every entity that has a
//! [`Transform`](crate::components::transform::Transform) and an
//! [`Animation`](crate::components::animation::Animation), at the entity's
//! position, unscaled and unrotated.
use glam::Vec2;

use crate::components::animation::Animation;
use crate::components::transform::Transform;
use crate::ecs::entity::Entity;
use crate::ecs::world::World;
use crate::resources::spritesheet::SpriteFrame;

/// Target for one frame's drawing.
pub trait DrawSurface {
    /// Draw `frame` with its top-left corner at `position`.
    fn draw_frame(&mut self, frame: &SpriteFrame, position: Vec2);
}

#[derive(Debug, Default)]
pub struct RenderSystem {
    sprites_drawn: usize,
}

impl RenderSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw every animated entity in ascending entity order.
    pub fn render<S: DrawSurface + ?Sized>(&mut self, world: &World, surface: &mut S) {
        let animations = world.components_of::<Animation>();
        let transforms = world.components_of::<Transform>();

        let mut to_draw: Vec<(Entity, &Animation, Vec2)> = animations
            .iter()
            .filter_map(|(entity, animation)| {
                transforms
                    .get(entity)
                    .map(|t| (entity, animation, t.position))
            })
            .collect();
        to_draw.sort_by_key(|(entity, _, _)| *entity);

        for (_, animation, position) in &to_draw {
            surface.draw_frame(animation.active().current_frame(), *position);
        }
        self.sprites_drawn = to_draw.len();
    }

    /// Sprites drawn by the last call to [`render`](Self::render).
    pub fn sprites_drawn(&self) -> usize {
        self.sprites_drawn
    }
}

#[cfg(feature = "raylib")]
pub use raylib_surface::RaylibSurface;

#[cfg(feature = "raylib")]
mod raylib_surface {
    use glam::Vec2;
    use raylib::prelude::*;

    use super::DrawSurface;
    use crate::resources::spritesheet::SpriteFrame;
    use crate::resources::texturestore::TextureStore;

    /// Draws frames through any raylib draw handle (screen or texture mode).
    pub struct RaylibSurface<'a, D: RaylibDraw> {
        draw: &'a mut D,
        textures: &'a TextureStore,
    }

    impl<'a, D: RaylibDraw> RaylibSurface<'a, D> {
        pub fn new(draw: &'a mut D, textures: &'a TextureStore) -> Self {
            Self { draw, textures }
        }
    }

    impl<D: RaylibDraw> DrawSurface for RaylibSurface<'_, D> {
        fn draw_frame(&mut self, frame: &SpriteFrame, position: Vec2) {
            let Some(tex) = self.textures.get(&frame.tex_key) else {
                log::warn!("texture '{}' is not loaded", frame.tex_key);
                return;
            };
            let src = Rectangle {
                x: frame.src.x,
                y: frame.src.y,
                width: frame.src.width,
                height: frame.src.height,
            };
            self.draw.draw_texture_rec(
                tex,
                src,
                Vector2 {
                    x: position.x,
                    y: position.y,
                },
                Color::WHITE,
            );
        }
    }
}
