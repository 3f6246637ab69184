use super::load::{SettingsIssue, default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_soundbite_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("SOUNDBITE_CONFIG_PATH", "/tmp/soundbite-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/soundbite-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("soundbite")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("soundbite")
            .join("config.toml")
    );
}

#[test]
fn defaults_carry_the_nine_builtin_tracks() {
    let s = Settings::default();
    assert_eq!(s.catalog.len(), 9);
    assert_eq!(s.catalog[0].name, "Bach");
    assert_eq!(s.catalog[0].artwork.as_deref(), Some("havana"));
    assert_eq!(s.catalog[8].audio, "warble");
    assert_eq!(s.playback.tick_ms, 1000);
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[assets]
dir = "/opt/sounds"
audio_extensions = ["wav"]
artwork_extensions = ["png"]

[playback]
tick_ms = 250
shake_seed = 42

[controls]
scrub_seconds = 9
swipe_min_columns = 6

[ui]
header_text = "hello"

[logging]
filter = "soundbite=debug"
file = "/tmp/soundbite-test.log"

[[catalog]]
name = "Ding"
audio = "ding"
artwork = "bell"

[[catalog]]
name = "Dong"
audio = "dong"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SOUNDBITE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("SOUNDBITE__PLAYBACK__TICK_MS");

    let s = Settings::load_from(resolve_config_path().as_deref()).unwrap();
    assert_eq!(s.assets.dir, std::path::PathBuf::from("/opt/sounds"));
    assert_eq!(s.assets.audio_extensions, vec!["wav".to_string()]);
    assert_eq!(s.assets.artwork_extensions, vec!["png".to_string()]);
    assert_eq!(s.playback.tick_ms, 250);
    assert_eq!(s.playback.shake_seed, Some(42));
    assert_eq!(s.controls.scrub_seconds, 9);
    assert_eq!(s.controls.swipe_min_columns, 6);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.logging.filter, "soundbite=debug");
    assert_eq!(
        s.logging.file_path(),
        std::path::PathBuf::from("/tmp/soundbite-test.log")
    );
    assert_eq!(s.catalog.len(), 2);
    assert_eq!(s.catalog[0].name, "Ding");
    assert_eq!(s.catalog[0].artwork.as_deref(), Some("bell"));
    assert_eq!(s.catalog[1].audio, "dong");
    assert!(s.catalog[1].artwork.is_none());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
tick_ms = 250
"#,
    )
    .unwrap();

    let _g = EnvGuard::set("SOUNDBITE__PLAYBACK__TICK_MS", "500");

    let s = Settings::load_from(Some(&cfg_path)).unwrap();
    assert_eq!(s.playback.tick_ms, 500);
    // Sections the file leaves out keep their defaults.
    assert_eq!(s.catalog.len(), 9);
}

#[test]
fn settings_file_without_toml_extension_is_read_as_toml() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("soundbite.conf");
    std::fs::write(&cfg_path, "[controls]\nscrub_seconds = 12\n").unwrap();

    let s = Settings::load_from(Some(&cfg_path)).unwrap();
    assert_eq!(s.controls.scrub_seconds, 12);
}

#[test]
fn settings_load_tolerates_missing_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let s = Settings::load_from(Some(&dir.path().join("absent.toml"))).unwrap();
    assert_eq!(s.playback.tick_ms, 1000);
    assert_eq!(s.catalog.len(), 9);
}

#[test]
fn settings_env_splits_extension_lists() {
    let _lock = env_lock();
    let _g = EnvGuard::set("SOUNDBITE__ASSETS__AUDIO_EXTENSIONS", "wav,ogg");

    let s = Settings::load_from(None).unwrap();
    assert_eq!(
        s.assets.audio_extensions,
        vec!["wav".to_string(), "ogg".to_string()]
    );
}

#[test]
fn empty_xdg_config_home_counts_as_unset() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");
    let _g3 = EnvGuard::set("SOUNDBITE_CONFIG_PATH", "");

    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir/.config/soundbite/config.toml")
    );
}

#[test]
fn validate_lists_every_broken_rule() {
    let mut s = Settings::default();
    s.playback.tick_ms = 0;
    assert_eq!(s.validate(), Err(vec![SettingsIssue::ZeroTick]));

    let mut s = Settings::default();
    s.catalog.clear();
    assert_eq!(s.validate(), Err(vec![SettingsIssue::EmptyCatalog]));

    let mut s = Settings::default();
    s.playback.tick_ms = 0;
    s.catalog[3].name = "  ".into();
    s.catalog[6].name = String::new();
    let issues = s.validate().unwrap_err();
    assert_eq!(
        issues,
        vec![
            SettingsIssue::ZeroTick,
            SettingsIssue::BlankName(4),
            SettingsIssue::BlankName(7),
        ]
    );
    assert_eq!(issues[1].to_string(), "catalog entry #4 has a blank name");
}
