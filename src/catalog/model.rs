use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::assets::AssetProvider;

/// Opaque artwork handle resolved by an [`AssetProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artwork {
    pub name: String,
    pub path: PathBuf,
}

/// One playable entry of the catalog.
#[derive(Debug, Clone)]
pub struct Track {
    /// 1-based, assigned in catalog order.
    pub id: u32,
    pub name: String,
    pub artwork: Option<Artwork>,
    /// Resolved audio file; `None` makes the track silent.
    pub audio: Option<PathBuf>,
}

impl Track {
    pub fn audio_path(&self) -> Option<&Path> {
        self.audio.as_deref()
    }
}

/// Static description of a catalog row, before assets are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrackEntry {
    /// Name shown in the list.
    pub name: String,
    /// Symbolic audio resource name (file stem in the asset directory).
    pub audio: String,
    /// Symbolic artwork name, if the track has any.
    #[serde(default)]
    pub artwork: Option<String>,
}

impl TrackEntry {
    pub fn new(name: &str, audio: &str, artwork: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            audio: audio.to_string(),
            artwork: artwork.map(str::to_string),
        }
    }

    /// The built-in sound effects.
    pub fn defaults() -> Vec<TrackEntry> {
        vec![
            Self::new("Bach", "bach", Some("havana")),
            Self::new("Boing", "boing", Some("avamax")),
            Self::new("Explosion", "explosion", None),
            Self::new("Hit", "hit", None),
            Self::new("Knife", "knife", None),
            Self::new("Shoot", "shoot", None),
            Self::new("Swish", "swish", None),
            Self::new("Wah", "wah", None),
            Self::new("Warble", "warble", None),
        ]
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog has no tracks")]
    Empty,
}

/// Ordered, immutable list of tracks. Display order is navigation order.
#[derive(Debug, Clone)]
pub struct TrackCatalog {
    tracks: Vec<Track>,
}

impl TrackCatalog {
    /// Resolve every entry through `assets` and build the catalog.
    ///
    /// Missing audio or artwork is tolerated; the track is kept and simply has
    /// nothing to play or show.
    pub fn build<A>(entries: &[TrackEntry], assets: &A) -> Result<Self, CatalogError>
    where
        A: AssetProvider + ?Sized,
    {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        let tracks = entries
            .iter()
            .zip(1u32..)
            .map(|(entry, id)| Track {
                id,
                name: entry.name.clone(),
                artwork: entry.artwork.as_deref().and_then(|a| assets.artwork(a)),
                audio: assets.audio(&entry.audio),
            })
            .collect();

        Ok(Self { tracks })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    /// Clamp `index` into `[0, len - 1]`.
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.tracks.len().saturating_sub(1))
    }
}
