//! Sprite-sheet slicing.
//!
//! A [`SpriteSheet`] only records which texture it is and how big it is;
//! slicing produces [`SpriteFrame`]s, i.e. a texture key plus a source
//! rectangle. Renderers resolve the key to a real texture when drawing.

use std::sync::Arc;

/// Source rectangle inside a texture, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One drawable animation frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteFrame {
    pub tex_key: Arc<str>,
    pub src: FrameRect,
}

/// A loaded sheet's identity and pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteSheet {
    pub tex_key: Arc<str>,
    pub width: u32,
    pub height: u32,
}

impl SpriteSheet {
    pub fn new(tex_key: impl Into<Arc<str>>, width: u32, height: u32) -> Self {
        Self {
            tex_key: tex_key.into(),
            width,
            height,
        }
    }

    /// Cut `tile_width` x `tile_height` tiles at the given `(column, row)`
    /// coordinates, in order.
    ///
    /// Tiles whose top-left corner is outside the sheet (or not representable
    /// in pixels) are skipped; tiles that overflow the right or bottom edge
    /// are clamped to it.
    pub fn slice(&self, tile_width: u32, tile_height: u32, tiles: &[(u32, u32)]) -> Vec<SpriteFrame> {
        let mut frames = Vec::with_capacity(tiles.len());
        for &(column, row) in tiles {
            let origin = column
                .checked_mul(tile_width)
                .zip(row.checked_mul(tile_height))
                .filter(|&(x, y)| x < self.width && y < self.height);
            let Some((start_x, start_y)) = origin else {
                log::warn!(
                    "tile ({}, {}) lies outside sheet '{}' ({}x{})",
                    column,
                    row,
                    self.tex_key,
                    self.width,
                    self.height
                );
                continue;
            };
            let end_x = start_x.saturating_add(tile_width).min(self.width);
            let end_y = start_y.saturating_add(tile_height).min(self.height);
            frames.push(SpriteFrame {
                tex_key: Arc::clone(&self.tex_key),
                src: FrameRect {
                    x: start_x as f32,
                    y: start_y as f32,
                    width: (end_x - start_x) as f32,
                    height: (end_y - start_y) as f32,
                },
            });
        }
        frames
    }
}
