//! Configuration loader and schema types.
//!
//! This module exposes the settings that drive asset lookup, playback timing,
//! controls, logging and the track catalog, plus helpers to load them from disk.

mod load;
mod schema;

pub use load::resolve_config_path;
pub use schema::*;

#[cfg(test)]
mod tests;
