//! Audio output: the [`AudioOutput`] seam the playback session drives, and a
//! `rodio` implementation of it.

mod output;
mod rodio_output;
mod sink;

pub use output::*;
pub use rodio_output::RodioOutput;
