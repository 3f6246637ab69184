//! Utilities for creating `rodio` sinks from audio files.
//!
//! The helpers here encapsulate opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::prelude::AudioFile;
use rodio::{Decoder, OutputStream, Sink, Source};

use super::output::ResourceLoadError;

pub(super) type FileDecoder = Decoder<BufReader<File>>;

/// Open and decode `path` without touching any output device.
pub(super) fn open_source(path: &Path) -> Result<FileDecoder, ResourceLoadError> {
    let file = File::open(path).map_err(|source| ResourceLoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    Decoder::new(BufReader::new(file)).map_err(|source| ResourceLoadError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Read the track length from the file's properties, if it has any.
pub(super) fn probe_duration(path: &Path) -> Option<Duration> {
    let tagged = lofty::read_from_path(path).ok()?;
    let duration = tagged.properties().duration();
    (!duration.is_zero()).then_some(duration)
}

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
///
/// Also returns the decoder's own idea of the total length.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    path: &Path,
    start_at: Duration,
) -> Result<(Sink, Option<Duration>), ResourceLoadError> {
    let decoder = open_source(path)?;
    let total = decoder.total_duration();

    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    let source = decoder.skip_duration(start_at);

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok((sink, total))
}
