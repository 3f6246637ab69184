//! Track catalog: the fixed, ordered list of sound effects shown on screen.
//!
//! Entries come from static configuration; their audio and artwork are
//! resolved once through an [`AssetProvider`] when the catalog is built.

mod assets;
mod model;

pub use assets::*;
pub use model::*;
