use std::path::PathBuf;

use crate::config::{self, Settings};

/// Settings the runtime starts with, and where they came from.
pub struct StartupSettings {
    pub settings: Settings,
    /// Config file that was consulted, if one exists on disk.
    pub source: Option<PathBuf>,
    /// Why the config was thrown away in favour of defaults.
    pub rejected: Vec<String>,
}

impl StartupSettings {
    /// Resolve and validate the config, then let the first argument override
    /// the asset directory. Never fails: a broken config falls back to defaults.
    pub fn load(args: impl IntoIterator<Item = String>) -> Self {
        let source = config::resolve_config_path().filter(|p| p.is_file());
        let (mut settings, rejected) = settle(Settings::load_from(source.as_deref()));

        if let Some(dir) = args.into_iter().nth(1) {
            settings.assets.dir = PathBuf::from(dir);
        }

        Self {
            settings,
            source,
            rejected,
        }
    }

    /// Tell the user about a rejected config. Runs after logging is set up, and
    /// before the alternate screen hides stderr.
    pub fn report(&self) {
        let source = self
            .source
            .as_ref()
            .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

        for reason in &self.rejected {
            eprintln!("soundbite: {source}: {reason}");
            tracing::warn!(config = %source, %reason, "config rejected");
        }
        if self.rejected.is_empty() {
            tracing::info!(config = %source, "settings loaded");
        } else {
            eprintln!("soundbite: running on built-in defaults");
        }
    }
}

/// Keep settings that load and validate; otherwise defaults plus the reasons.
fn settle(loaded: Result<Settings, ::config::ConfigError>) -> (Settings, Vec<String>) {
    match loaded {
        Ok(settings) => match settings.validate() {
            Ok(()) => (settings, Vec::new()),
            Err(issues) => (
                Settings::default(),
                issues.iter().map(ToString::to_string).collect(),
            ),
        },
        Err(e) => (Settings::default(), vec![e.to_string()]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_settings_are_kept() {
        let mut loaded = Settings::default();
        loaded.controls.scrub_seconds = 11;

        let (settings, rejected) = settle(Ok(loaded));
        assert_eq!(settings.controls.scrub_seconds, 11);
        assert!(rejected.is_empty());
    }

    #[test]
    fn invalid_settings_fall_back_with_every_reason() {
        let mut loaded = Settings::default();
        loaded.playback.tick_ms = 0;
        loaded.catalog[1].name = " ".into();
        loaded.controls.scrub_seconds = 11;

        let (settings, rejected) = settle(Ok(loaded));
        assert_eq!(settings.controls.scrub_seconds, 5);
        assert_eq!(settings.playback.tick_ms, 1000);
        assert_eq!(
            rejected,
            vec![
                "playback.tick_ms must be at least 1".to_string(),
                "catalog entry #2 has a blank name".to_string(),
            ]
        );
    }

    #[test]
    fn load_errors_fall_back_to_defaults() {
        let err = ::config::ConfigError::Message("bad toml".into());
        let (settings, rejected) = settle(Err(err));
        assert_eq!(settings.catalog.len(), 9);
        assert_eq!(rejected, vec!["bad toml".to_string()]);
    }
}
