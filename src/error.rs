//! Error type shared by the library.
//!
//! Everything that can go wrong happens at startup (config, clip table,
//! sprite sheets). The per-frame systems do not fail.

use crate::ecs::entity::Entity;
use crate::ecs::store::ComponentKind;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// An image could not be loaded or decoded.
    #[error("failed to load asset '{path}': {reason}")]
    AssetLoad { path: String, reason: String },

    /// The animation definition file is not valid JSON for the schema.
    #[error("invalid animation definitions: {0}")]
    AnimationDefs(#[from] serde_json::Error),

    /// A clip references a sprite sheet that was never loaded.
    #[error("clip '{clip}' uses unknown sprite sheet '{sheet}'")]
    UnknownSheet { clip: String, sheet: String },

    /// An animation names a clip that is not in its clip table.
    #[error("animation clip '{0}' is not defined")]
    UnknownClip(String),

    #[error("invalid clip '{clip}': {reason}")]
    InvalidClip { clip: String, reason: &'static str },

    /// Explicit component lookup on an entity that lacks it.
    #[error("entity {entity} has no {kind} component")]
    MissingComponent { entity: Entity, kind: ComponentKind },

    #[error("config error: {0}")]
    Config(String),

    #[error("render target: {0}")]
    RenderTarget(String),
}
