//! Sprite animation state and the rules that pick the active clip.
//!
//! An [`Animation`] owns a table of named [`Clip`]s, each with its own frame
//! and tick state, and an ordered list of [`ClipRule`]s. Every tick the
//! animation system evaluates the rules against the entity's
//! [`Transform`](crate::components::transform::Transform); the first rule
//! that holds names the active clip.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::transform::Direction;
use crate::error::GameError;
use crate::resources::spritesheet::SpriteFrame;

/// A looping sequence of frames played on a fixed tick cadence.
///
/// The tick counter runs from 0 to `ticks_per_phase` and wraps; the frame
/// advances on every tick where `tick_counter % frame_advance_divisor == 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub(crate) frames: Vec<SpriteFrame>,
    pub(crate) frame_index: usize,
    pub(crate) tick_counter: u32,
    pub(crate) ticks_per_phase: u32,
    pub(crate) frame_advance_divisor: u32,
}

impl Clip {
    pub fn new(
        name: &str,
        frames: Vec<SpriteFrame>,
        ticks_per_phase: u32,
        frame_advance_divisor: u32,
    ) -> Result<Self, GameError> {
        let invalid = |reason| GameError::InvalidClip {
            clip: name.to_string(),
            reason,
        };
        if frames.is_empty() {
            return Err(invalid("no frames"));
        }
        if ticks_per_phase == 0 {
            return Err(invalid("ticks_per_phase must be positive"));
        }
        if frame_advance_divisor == 0 {
            return Err(invalid("frame_advance_divisor must be positive"));
        }
        Ok(Self {
            frames,
            frame_index: 0,
            tick_counter: 0,
            ticks_per_phase,
            frame_advance_divisor,
        })
    }

    pub fn current_frame(&self) -> &SpriteFrame {
        &self.frames[self.frame_index]
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn tick_counter(&self) -> u32 {
        self.tick_counter
    }

    pub fn ticks_per_phase(&self) -> u32 {
        self.ticks_per_phase
    }

    pub fn frame_advance_divisor(&self) -> u32 {
        self.frame_advance_divisor
    }
}

// Generic, data-driven conditions over a Transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CmpOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

// Condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Facing equals the given direction.
    Facing(Direction),
    /// Velocity is zero on both axes.
    Stationary,
    /// Velocity equals `(dx, dy)` exactly.
    Heading { dx: f32, dy: f32 },
    Speed { op: CmpOp, value: f32 },
    All(Vec<Condition>),
    Any(Vec<Condition>),
    Not(Box<Condition>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipRule {
    pub when: Condition,
    pub clip: String,
}

/// Clip table, active clip, and selection rules of one entity.
///
/// Rules are in priority order. When none holds the active clip is kept.
#[derive(Debug, Clone)]
pub struct Animation {
    pub(crate) clips: FxHashMap<String, Clip>,
    pub(crate) active_clip: String,
    pub(crate) rules: Vec<ClipRule>,
}

impl Animation {
    /// Build an animation starting on `initial`. Fails if `initial` or any
    /// rule target is missing from `clips`.
    pub fn new(
        initial: impl Into<String>,
        clips: FxHashMap<String, Clip>,
        rules: Vec<ClipRule>,
    ) -> Result<Self, GameError> {
        let initial = initial.into();
        if !clips.contains_key(&initial) {
            return Err(GameError::UnknownClip(initial));
        }
        if let Some(rule) = rules.iter().find(|r| !clips.contains_key(&r.clip)) {
            return Err(GameError::UnknownClip(rule.clip.clone()));
        }
        Ok(Self {
            clips,
            active_clip: initial,
            rules,
        })
    }

    pub fn active_clip(&self) -> &str {
        &self.active_clip
    }

    /// The active clip. Always present: names are validated on the way in.
    pub fn active(&self) -> &Clip {
        &self.clips[&self.active_clip]
    }

    pub(crate) fn active_mut(&mut self) -> &mut Clip {
        self.clips
            .get_mut(&self.active_clip)
            .expect("active clip validated at construction")
    }

    pub fn clip(&self, name: &str) -> Option<&Clip> {
        self.clips.get(name)
    }

    pub fn clip_names(&self) -> impl Iterator<Item = &str> {
        self.clips.keys().map(String::as_str)
    }

    pub fn rules(&self) -> &[ClipRule] {
        &self.rules
    }

    /// Switch the active clip by name.
    pub fn set_active(&mut self, name: &str) -> Result<(), GameError> {
        if !self.clips.contains_key(name) {
            return Err(GameError::UnknownClip(name.to_string()));
        }
        if self.active_clip != name {
            self.active_clip = name.to_string();
        }
        Ok(())
    }
}
