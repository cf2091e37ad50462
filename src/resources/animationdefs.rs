//! Animation set definitions.
//!
//! A character's clip table and clip-selection rules are described in JSON
//! and turned into an [`Animation`] component once its sprite sheets are
//! known:
//!
//! ```json
//! {
//!   "initial": "idle_down",
//!   "tile_width": 80,
//!   "tile_height": 80,
//!   "sheets": { "idle": "sprites/idle.png" },
//!   "clips": [
//!     { "name": "idle_down", "sheet": "idle", "tiles": [[0, 2], [1, 2]],
//!       "ticks_per_phase": 60, "frame_advance_divisor": 10 }
//!   ],
//!   "rules": [
//!     { "clip": "idle_down", "when": { "all": [{ "facing": "down" }, "stationary"] } }
//!   ]
//! }
//! ```
//!
//! Rules are kept in file order, which is their priority order.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::animation::{Animation, Clip, ClipRule};
use crate::error::GameError;
use crate::resources::spritesheet::SpriteSheet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipDef {
    pub name: String,
    /// Key into [`AnimationSetDef::sheets`].
    pub sheet: String,
    /// `(column, row)` tile coordinates, in playback order.
    pub tiles: Vec<(u32, u32)>,
    pub ticks_per_phase: u32,
    pub frame_advance_divisor: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationSetDef {
    pub initial: String,
    pub tile_width: u32,
    pub tile_height: u32,
    /// Sheet key to image path, relative to the assets directory.
    pub sheets: BTreeMap<String, String>,
    pub clips: Vec<ClipDef>,
    #[serde(default)]
    pub rules: Vec<ClipRule>,
}

impl AnimationSetDef {
    pub fn from_json(text: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Slice every clip out of `sheets` and assemble the component.
    ///
    /// Fails on a clip naming a sheet missing from `sheets`, a clip with no
    /// frames left after slicing, or rules/initial naming unknown clips.
    pub fn build(&self, sheets: &FxHashMap<String, SpriteSheet>) -> Result<Animation, GameError> {
        let mut clips = FxHashMap::default();
        for def in &self.clips {
            let sheet = sheets
                .get(&def.sheet)
                .ok_or_else(|| GameError::UnknownSheet {
                    clip: def.name.clone(),
                    sheet: def.sheet.clone(),
                })?;
            let frames = sheet.slice(self.tile_width, self.tile_height, &def.tiles);
            let clip = Clip::new(
                &def.name,
                frames,
                def.ticks_per_phase,
                def.frame_advance_divisor,
            )?;
            if clips.insert(def.name.clone(), clip).is_some() {
                log::warn!("clip '{}' defined twice, keeping the last", def.name);
            }
        }
        log::debug!(
            "built animation with {} clips and {} rules",
            clips.len(),
            self.rules.len()
        );
        Animation::new(self.initial.clone(), clips, self.rules.clone())
    }
}
