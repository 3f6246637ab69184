//! Playback session: the single authoritative state of the screen.
//!
//! The `PlaybackSession` owns the catalog, the audio output and the refresh
//! timer. It is mutated only through its named transitions (or `handle`), and
//! the UI renders from `SessionView` snapshots.

mod event;
mod model;
mod timer;

pub use event::*;
pub use model::*;
pub use timer::*;

#[cfg(test)]
pub(crate) mod testing;
