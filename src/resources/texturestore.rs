//! Texture store.
//!
//! Loaded sprite-sheet textures keyed by sheet name. Raylib textures live on
//! the GPU and must be used from the main thread only.
use std::path::Path;

use raylib::prelude::*;
use rustc_hash::FxHashMap;

use crate::error::GameError;
use crate::resources::spritesheet::SpriteSheet;

pub struct TextureStore {
    map: FxHashMap<String, Texture2D>,
}

impl Default for TextureStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureStore {
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, texture: Texture2D) {
        self.map.insert(key.into(), texture);
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<&Texture2D> {
        self.map.get(key.as_ref())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Load the image at `path` as texture `key` and describe it as a sheet.
    pub fn load_sheet(
        &mut self,
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        key: &str,
        path: &Path,
    ) -> Result<SpriteSheet, GameError> {
        let path_str = path.to_string_lossy();
        let texture = rl
            .load_texture(th, &path_str)
            .map_err(|e| GameError::AssetLoad {
                path: path_str.to_string(),
                reason: e.to_string(),
            })?;
        let sheet = SpriteSheet::new(key, texture.width as u32, texture.height as u32);
        log::info!(
            "loaded sheet '{}' from {} ({}x{})",
            key,
            path_str,
            sheet.width,
            sheet.height
        );
        self.insert(key, texture);
        Ok(sheet)
    }
}
