//! Data-driven battle content and loaders.
//!
//! This crate houses the bundled default table set and provides loaders for
//! RON/TOML data files:
//! - Simulator sheets (characters, skills, buffs, set effects, materials) —
//!   data-driven via RON
//! - Simulator configuration (HP modifier, turn ceiling, combat balance) —
//!   data-driven via TOML
//!
//! Content is consumed by the action layer as read-only lookup tables and
//! never appears in battle state. Loaders validate cross-references at load
//! time so a dangling id fails fast here instead of aborting a simulation.

pub mod fixtures;
pub mod loaders;

pub use loaders::{ConfigLoader, SheetsLoader};
