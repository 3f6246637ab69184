use std::env;
use std::path::{Path, PathBuf};

use ::config::{Config, ConfigError, Environment, File, FileFormat};
use thiserror::Error;

use super::schema::Settings;

const ENV_PREFIX: &str = "SOUNDBITE";
const CONFIG_PATH_VAR: &str = "SOUNDBITE_CONFIG_PATH";
const APP_DIR: &str = "soundbite";

/// Keys whose environment values are comma-separated lists.
const LIST_KEYS: [&str; 2] = ["assets.audio_extensions", "assets.artwork_extensions"];

/// A rule a loaded configuration breaks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsIssue {
    #[error("playback.tick_ms must be at least 1")]
    ZeroTick,
    #[error("catalog lists no tracks")]
    EmptyCatalog,
    /// 1-based position in `[[catalog]]`.
    #[error("catalog entry #{0} has a blank name")]
    BlankName(usize),
}

impl Settings {
    /// Layer `file` (TOML whatever its extension; absent is fine) under the
    /// `SOUNDBITE__*` environment.
    pub fn load_from(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut env = Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .list_separator(",")
            .try_parsing(true);
        for key in LIST_KEYS {
            env = env.with_list_parse_key(key);
        }

        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }
        builder.add_source(env).build()?.try_deserialize()
    }

    /// Every rule the settings break, in a stable order.
    pub fn validate(&self) -> Result<(), Vec<SettingsIssue>> {
        let mut issues = Vec::new();
        if self.playback.tick_ms == 0 {
            issues.push(SettingsIssue::ZeroTick);
        }
        if self.catalog.is_empty() {
            issues.push(SettingsIssue::EmptyCatalog);
        }
        issues.extend(
            self.catalog
                .iter()
                .enumerate()
                .filter(|(_, entry)| entry.name.trim().is_empty())
                .map(|(i, _)| SettingsIssue::BlankName(i + 1)),
        );

        if issues.is_empty() { Ok(()) } else { Err(issues) }
    }
}

/// `SOUNDBITE_CONFIG_PATH` when set, otherwise [`default_config_path`].
pub fn resolve_config_path() -> Option<PathBuf> {
    non_empty_var(CONFIG_PATH_VAR).or_else(default_config_path)
}

/// `soundbite/config.toml` under `$XDG_CONFIG_HOME`, else under `~/.config`.
/// Empty variables count as unset.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = non_empty_var("XDG_CONFIG_HOME")
        .or_else(|| non_empty_var("HOME").map(|home| home.join(".config")))?;
    Some(config_home.join(APP_DIR).join("config.toml"))
}

fn non_empty_var(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
