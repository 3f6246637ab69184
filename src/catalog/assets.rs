use std::collections::HashMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::AssetSettings;

use super::model::Artwork;

/// Resolves symbolic asset names to files. Absence is a valid answer.
pub trait AssetProvider {
    fn audio(&self, name: &str) -> Option<PathBuf>;
    fn artwork(&self, name: &str) -> Option<Artwork>;
}

/// Asset provider backed by a directory, indexed once by lowercase file stem.
#[derive(Debug, Default)]
pub struct DirAssets {
    audio: HashMap<String, PathBuf>,
    artwork: HashMap<String, PathBuf>,
}

fn normalized_exts(exts: &[String]) -> Vec<String> {
    exts.iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn has_ext(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn stem_key(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
}

impl DirAssets {
    /// Walk `dir` and index audio and artwork files by stem.
    ///
    /// A missing directory yields an empty index. When two files share a stem
    /// the first one in walk order (sorted by file name) wins.
    pub fn index(dir: &Path, settings: &AssetSettings) -> Self {
        let audio_exts = normalized_exts(&settings.audio_extensions);
        let artwork_exts = normalized_exts(&settings.artwork_extensions);

        let mut assets = Self::default();

        for entry in WalkDir::new(dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()))
            .filter_map(Result::ok)
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(key) = stem_key(path) else {
                continue;
            };

            let slot = if has_ext(path, &audio_exts) {
                &mut assets.audio
            } else if has_ext(path, &artwork_exts) {
                &mut assets.artwork
            } else {
                continue;
            };
            slot.entry(key).or_insert_with(|| path.to_path_buf());
        }

        tracing::debug!(
            dir = %dir.display(),
            audio = assets.audio.len(),
            artwork = assets.artwork.len(),
            "indexed assets"
        );
        assets
    }

    pub fn audio_count(&self) -> usize {
        self.audio.len()
    }

    pub fn artwork_count(&self) -> usize {
        self.artwork.len()
    }
}

impl AssetProvider for DirAssets {
    fn audio(&self, name: &str) -> Option<PathBuf> {
        self.audio.get(&name.trim().to_lowercase()).cloned()
    }

    fn artwork(&self, name: &str) -> Option<Artwork> {
        let name = name.trim();
        self.artwork
            .get(&name.to_lowercase())
            .map(|path| Artwork {
                name: name.to_string(),
                path: path.clone(),
            })
    }
}
