//! Minimal entity-component-system core.
//!
//! Submodules overview
//! - [`entity`] – opaque, monotonically issued entity ids
//! - [`store`] – per-type component tables and the closed component set
//! - [`world`] – entities, components and the per-frame input snapshot
//! - [`system`] – the state-system trait and its per-kind store
//! - [`registry`] – world + systems + render step behind one handle

pub mod entity;
pub mod registry;
pub mod store;
pub mod system;
pub mod world;
