//! Fixed-resolution rendering.
//!
//! The game draws into a framebuffer at its logical resolution, which is
//! then scaled to fit the window with letterboxing/pillarboxing.
//! [`letterbox`] is the pure placement math; [`RenderTarget`] holds the
//! raylib framebuffer.

/// Destination rectangle `(x, y, width, height)` that fits a `game_w` x
/// `game_h` image into a `window_w` x `window_h` window, preserving aspect
/// ratio and centering it.
pub fn letterbox(game_w: u32, game_h: u32, window_w: i32, window_h: i32) -> (f32, f32, f32, f32) {
    if game_w == 0 || game_h == 0 || window_w <= 0 || window_h <= 0 {
        return (0.0, 0.0, 0.0, 0.0);
    }
    let scale = (window_w as f32 / game_w as f32).min(window_h as f32 / game_h as f32);
    let width = game_w as f32 * scale;
    let height = game_h as f32 * scale;
    (
        (window_w as f32 - width) * 0.5,
        (window_h as f32 - height) * 0.5,
        width,
        height,
    )
}

#[cfg(feature = "raylib")]
pub use raylib_target::RenderTarget;

#[cfg(feature = "raylib")]
mod raylib_target {
    use raylib::ffi::{self, TextureFilter};
    use raylib::prelude::*;

    use crate::error::GameError;

    /// Framebuffer at the game's logical resolution.
    pub struct RenderTarget {
        pub texture: RenderTexture2D,
        pub game_width: u32,
        pub game_height: u32,
    }

    impl RenderTarget {
        pub fn new(
            rl: &mut RaylibHandle,
            th: &RaylibThread,
            width: u32,
            height: u32,
        ) -> Result<Self, GameError> {
            let texture = rl
                .load_render_texture(th, width, height)
                .map_err(|e| GameError::RenderTarget(e.to_string()))?;

            let target = Self {
                texture,
                game_width: width,
                game_height: height,
            };
            target.apply_point_filter();
            Ok(target)
        }

        /// Nearest-neighbor scaling keeps pixel art sharp.
        fn apply_point_filter(&self) {
            unsafe {
                ffi::SetTextureFilter(
                    self.texture.texture,
                    TextureFilter::TEXTURE_FILTER_POINT as i32,
                );
            }
        }

        /// Source rectangle for drawing the framebuffer. Height is negative
        /// to undo OpenGL's flipped texture coordinates.
        pub fn source_rect(&self) -> Rectangle {
            Rectangle {
                x: 0.0,
                y: 0.0,
                width: self.game_width as f32,
                height: -(self.game_height as f32),
            }
        }

        /// Where the framebuffer goes in a window of the given size.
        pub fn dest_rect(&self, window_w: i32, window_h: i32) -> Rectangle {
            let (x, y, width, height) =
                super::letterbox(self.game_width, self.game_height, window_w, window_h);
            Rectangle {
                x,
                y,
                width,
                height,
            }
        }
    }
}
