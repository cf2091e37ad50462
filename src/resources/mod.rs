//! Long-lived data shared with the systems and the frame driver.
//!
//! Overview
//! - `input` – the fixed key set, per-frame keyboard snapshot and device trait
//! - `gameconfig` – INI-backed settings (resolution, window, controls, player)
//! - `spritesheet` – sheet metadata and tile slicing into drawable frames
//! - `animationdefs` – JSON clip tables turned into Animation components
//! - `rendertarget` – fixed-resolution framebuffer and letterbox placement
//! - `texturestore` – loaded textures keyed by sheet key (raylib only)
pub mod animationdefs;
pub mod gameconfig;
pub mod input;
pub mod rendertarget;
pub mod spritesheet;
#[cfg(feature = "raylib")]
pub mod texturestore;
