use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink, StreamError};

use super::output::{AudioOutput, ResourceLoadError};
use super::sink::{create_sink_at, probe_duration};

/// [`AudioOutput`] on the default system output device.
///
/// Seeking rebuilds the sink and skips into the file, so the position is
/// tracked here (start instant + accumulated offset) rather than asked of rodio.
pub struct RodioOutput {
    stream: OutputStream,
    sink: Option<Sink>,
    path: Option<PathBuf>,
    length: Duration,
    // Position while not running; base position while running.
    offset: Duration,
    started_at: Option<Instant>,
}

impl RodioOutput {
    pub fn open() -> Result<Self, StreamError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when OutputStream is dropped, which would
        // scribble over the terminal UI.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            path: None,
            length: Duration::ZERO,
            offset: Duration::ZERO,
            started_at: None,
        })
    }

    fn clamp(&self, position: Duration) -> Duration {
        if self.length.is_zero() {
            position
        } else {
            position.min(self.length)
        }
    }

    fn drop_sink(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
    }

    /// Start a fresh sink at `offset` and let it run.
    fn start_at_offset(&mut self) {
        let Some(path) = self.path.as_deref() else {
            return;
        };
        match create_sink_at(&self.stream, path, self.offset) {
            Ok((sink, _)) => {
                sink.play();
                self.sink = Some(sink);
                self.started_at = Some(Instant::now());
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not restart playback");
                self.sink = None;
                self.started_at = None;
            }
        }
    }
}

impl AudioOutput for RodioOutput {
    fn load(&mut self, path: &Path) -> Result<(), ResourceLoadError> {
        self.drop_sink();
        self.path = None;
        self.length = Duration::ZERO;
        self.offset = Duration::ZERO;
        self.started_at = None;

        let (sink, decoder_total) = create_sink_at(&self.stream, path, Duration::ZERO)?;
        self.sink = Some(sink);
        self.path = Some(path.to_path_buf());
        self.length = probe_duration(path)
            .or(decoder_total)
            .unwrap_or(Duration::ZERO);
        Ok(())
    }

    fn play(&mut self) {
        if self.path.is_none() || self.started_at.is_some() {
            return;
        }
        match self.sink.as_ref() {
            Some(s) if !s.empty() => {
                s.play();
                self.started_at = Some(Instant::now());
            }
            _ => self.start_at_offset(),
        }
    }

    fn pause(&mut self) {
        if let Some(st) = self.started_at.take() {
            self.offset = self.clamp(self.offset + st.elapsed());
        }
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
    }

    fn stop(&mut self) {
        self.drop_sink();
        self.started_at = None;
        self.offset = Duration::ZERO;
    }

    fn seek(&mut self, position: Duration) {
        if self.path.is_none() {
            return;
        }
        let running = self.started_at.is_some();
        self.drop_sink();
        self.started_at = None;
        self.offset = self.clamp(position);
        if running {
            self.start_at_offset();
        }
    }

    fn current_time(&mut self) -> Duration {
        let Some(st) = self.started_at else {
            return self.offset;
        };

        let finished = self.sink.as_ref().is_none_or(|s| s.empty());
        if finished {
            self.sink = None;
            self.started_at = None;
            self.offset = Duration::ZERO;
            return Duration::ZERO;
        }

        self.clamp(self.offset + st.elapsed())
    }

    fn duration(&self) -> Duration {
        self.length
    }
}
