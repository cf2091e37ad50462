//! Game systems.
//!
//! The state systems run once per tick in pipeline order through the
//! registry; rendering runs afterwards with the frame's surface.
//!
//! Submodules overview
//! - [`input`] – snapshot the keyboard and maintain each held-key buffer
//! - [`movement`] – apply held-key actions and integrate positions
//! - [`animation`] – select the active clip by rule and advance its frames
//! - [`render`] – draw every animated entity's current frame

pub mod animation;
pub mod input;
pub mod movement;
pub mod render;
