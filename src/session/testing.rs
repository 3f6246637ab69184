//! Test doubles shared by the session, event loop and UI tests.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::PlaybackSession;
use crate::audio::{AudioOutput, ResourceLoadError};
use crate::catalog::{Artwork, AssetProvider, TrackCatalog, TrackEntry};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Load(PathBuf),
    Play,
    Pause,
    Stop,
    Seek(Duration),
}

/// Output that records calls and reports whatever position the test sets.
pub(crate) struct MockOutput {
    pub(crate) calls: Vec<Call>,
    pub(crate) position: Duration,
    pub(crate) length: Duration,
    pub(crate) broken: Vec<PathBuf>,
}

impl MockOutput {
    pub(crate) fn new() -> Self {
        Self {
            calls: Vec::new(),
            position: Duration::ZERO,
            length: Duration::from_secs(30),
            broken: Vec::new(),
        }
    }

    pub(crate) fn loads(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Load(_)))
            .count()
    }

    pub(crate) fn plays(&self) -> usize {
        self.calls.iter().filter(|c| **c == Call::Play).count()
    }
}

impl AudioOutput for MockOutput {
    fn load(&mut self, path: &Path) -> Result<(), ResourceLoadError> {
        if self.broken.iter().any(|b| b == path) {
            return Err(ResourceLoadError::Open {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            });
        }
        self.calls.push(Call::Load(path.to_path_buf()));
        self.position = Duration::ZERO;
        Ok(())
    }

    fn play(&mut self) {
        self.calls.push(Call::Play);
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }

    fn stop(&mut self) {
        self.calls.push(Call::Stop);
        self.position = Duration::ZERO;
    }

    fn seek(&mut self, position: Duration) {
        self.calls.push(Call::Seek(position));
        self.position = position;
    }

    fn current_time(&mut self) -> Duration {
        self.position
    }

    fn duration(&self) -> Duration {
        self.length
    }
}

/// Every default track has audio except the names listed in `silent`.
pub(crate) struct TestAssets {
    pub(crate) silent: Vec<&'static str>,
}

impl AssetProvider for TestAssets {
    fn audio(&self, name: &str) -> Option<PathBuf> {
        if self.silent.contains(&name) {
            None
        } else {
            Some(PathBuf::from(format!("/sfx/{name}.mp3")))
        }
    }

    fn artwork(&self, name: &str) -> Option<Artwork> {
        Some(Artwork {
            name: name.to_string(),
            path: PathBuf::from(format!("/img/{name}.png")),
        })
    }
}

pub(crate) fn catalog_with_silent(silent: Vec<&'static str>) -> TrackCatalog {
    TrackCatalog::build(&TrackEntry::defaults(), &TestAssets { silent }).unwrap()
}

pub(crate) fn session_with_seed(seed: u64) -> PlaybackSession<MockOutput> {
    PlaybackSession::new(
        catalog_with_silent(Vec::new()),
        MockOutput::new(),
        StdRng::seed_from_u64(seed),
        Duration::from_secs(1),
    )
}
