//! Components attached to entities.
//!
//! Submodules overview:
//! - [`transform`] – position, facing, speed and per-tick velocity
//! - [`controls`] – key bindings to declarative actions plus the held-key buffer
//! - [`animation`] – named clips, the active clip and the rules that pick it

pub mod animation;
pub mod controls;
pub mod transform;
