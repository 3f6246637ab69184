use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Send `tracing` output to the configured log file.
///
/// The terminal belongs to the UI, so nothing is written to stdout/stderr.
/// `RUST_LOG` overrides `logging.filter`.
pub fn init(settings: &LoggingSettings) -> Result<(), Box<dyn std::error::Error>> {
    let path = settings.file_path();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| e as Box<dyn std::error::Error>)?;
    Ok(())
}
