//! Walkabout library.
//!
//! This module exposes the ECS core, components, resources and systems for
//! use by the binary and by integration tests.

pub mod components;
pub mod ecs;
pub mod error;
pub mod game;
pub mod resources;
pub mod systems;
