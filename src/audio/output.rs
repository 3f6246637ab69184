use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// Failure to make a track's audio playable.
#[derive(Debug, Error)]
pub enum ResourceLoadError {
    /// The track has no audio resource at all.
    #[error("no audio resource for \"{track}\"")]
    Missing { track: String },

    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}

/// Something that can play one loaded resource at a time.
///
/// Positions are measured from the start of the loaded resource. Implementations
/// manage their own timing; callers only poll `current_time`.
pub trait AudioOutput {
    /// Replace the loaded resource. Playback is left paused at the start.
    fn load(&mut self, path: &Path) -> Result<(), ResourceLoadError>;
    fn play(&mut self);
    fn pause(&mut self);
    /// Halt playback. The resource stays loaded.
    fn stop(&mut self);
    fn seek(&mut self, position: Duration);
    /// Current position. Reports zero once playback has run to the end.
    fn current_time(&mut self) -> Duration;
    /// Length of the loaded resource, zero when unknown or nothing is loaded.
    fn duration(&self) -> Duration;
}
