use std::env;
use std::io::{self, Write};
use std::time::Duration;

use crossterm::cursor::Show;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::{AudioOutput, RodioOutput};
use crate::catalog::{DirAssets, TrackCatalog};
use crate::config::Settings;
use crate::session::{PlaybackSession, shake_rng};

mod event_loop;
mod logging;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let startup = settings::StartupSettings::load(env::args());
    let settings = &startup.settings;

    if let Err(e) = logging::init(&settings.logging) {
        eprintln!("soundbite: logging disabled: {e}");
    }
    startup.report();

    let assets = DirAssets::index(&settings.assets.dir, &settings.assets);
    let catalog = TrackCatalog::build(&settings.catalog, &assets)?;
    tracing::info!(
        dir = %settings.assets.dir.display(),
        tracks = catalog.len(),
        silent = catalog.tracks().iter().filter(|t| t.audio.is_none()).count(),
        audio_files = assets.audio_count(),
        artwork_files = assets.artwork_count(),
        "starting soundbite"
    );

    let output = RodioOutput::open()?;
    let mut session = PlaybackSession::new(
        catalog,
        output,
        shake_rng(settings.playback.shake_seed),
        Duration::from_millis(settings.playback.tick_ms),
    );

    enable_raw_mode()?;
    let run_result = run_tui(settings, &mut session);
    let restored = restore_terminal(&mut io::stdout());

    tracing::info!("bye");
    run_result.and(restored)
}

/// Everything between raw mode on and off. Any failure here still leaves the
/// caller to restore the terminal.
fn run_tui<O: AudioOutput>(
    settings: &Settings,
    session: &mut PlaybackSession<O>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut state = event_loop::EventLoopState::new(session, &settings.controls);
    event_loop::run(&mut terminal, settings, session, &mut state)
}

/// Undo raw mode, the alternate screen and mouse capture, and show the cursor.
/// Safe to call when setup only got part of the way.
fn restore_terminal<W: Write>(out: &mut W) -> Result<(), Box<dyn std::error::Error>> {
    let raw = disable_raw_mode();
    execute!(out, LeaveAlternateScreen, DisableMouseCapture, Show)?;
    raw?;
    Ok(())
}
