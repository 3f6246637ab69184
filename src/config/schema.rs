use std::path::PathBuf;

use serde::Deserialize;

use crate::catalog::TrackEntry;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/soundbite/config.toml` or `~/.config/soundbite/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SOUNDBITE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub assets: AssetSettings,
    pub playback: PlaybackSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
    /// Catalog rows in display order. Written as `[[catalog]]` tables.
    pub catalog: Vec<TrackEntry>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            assets: AssetSettings::default(),
            playback: PlaybackSettings::default(),
            controls: ControlsSettings::default(),
            ui: UiSettings::default(),
            logging: LoggingSettings::default(),
            catalog: TrackEntry::defaults(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    /// Directory holding the bundled sounds and artwork.
    pub dir: PathBuf,
    /// File extensions treated as audio (case-insensitive, without dot).
    pub audio_extensions: Vec<String>,
    /// File extensions treated as artwork (case-insensitive, without dot).
    pub artwork_extensions: Vec<String>,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("assets"),
            audio_extensions: vec![
                "mp3".into(),
                "wav".into(),
                "ogg".into(),
                "flac".into(),
                "m4a".into(),
            ],
            artwork_extensions: vec!["png".into(), "jpg".into(), "jpeg".into()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Interval of the elapsed-time refresh while playing (milliseconds).
    pub tick_ms: u64,
    /// Fixed seed for the shake picker. Unset = seeded from entropy.
    pub shake_seed: Option<u64>,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            tick_ms: 1000,
            shake_seed: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
    /// Minimum horizontal drag across the artwork pane that counts as a swipe.
    pub swipe_min_columns: u16,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            scrub_seconds: 5,
            swipe_min_columns: 4,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ shake it for a surprise ~ ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive, e.g. `info` or `soundbite=debug`.
    /// `RUST_LOG` takes precedence when set.
    pub filter: String,
    /// Log file. Unset = `soundbite.log` in the system temp directory.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingSettings {
    /// The file log lines are written to.
    pub fn file_path(&self) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("soundbite.log"))
    }
}
