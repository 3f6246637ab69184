use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::AudioOutput;
use crate::config;
use crate::gesture::{self, DragTracker};
use crate::session::{PlaybackSession, SessionEvent};
use crate::ui::{self, UiLayout};

/// Longest wait for input before the loop runs again.
const IDLE_POLL: Duration = Duration::from_millis(50);

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Highlighted list row; follows the session after select/swipe/shake.
    pub cursor: usize,
    /// Where the last frame put the artwork pane and the slider.
    pub layout: UiLayout,
    drag: DragTracker,
    /// Session revision and cursor of the last drawn frame.
    drawn: Option<(u64, usize)>,
}

impl EventLoopState {
    /// Construct a new `EventLoopState` seeded from `session`.
    pub fn new<O: AudioOutput>(
        session: &PlaybackSession<O>,
        controls: &config::ControlsSettings,
    ) -> Self {
        Self {
            cursor: session.current_index(),
            layout: UiLayout::default(),
            drag: DragTracker::new(controls.swipe_min_columns),
            drawn: None,
        }
    }

    fn needs_redraw<O: AudioOutput>(&self, session: &PlaybackSession<O>) -> bool {
        self.drawn != Some((session.revision(), self.cursor))
    }

    fn move_cursor(&mut self, delta: isize, len: usize) {
        if len == 0 {
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
    }
}

/// Main terminal event loop: drives the refresh timer, draws on change and
/// feeds input to the session. Returns `Ok(())` when shutdown is requested.
pub fn run<O: AudioOutput>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    session: &mut PlaybackSession<O>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        session.poll_timer(Instant::now());

        if state.needs_redraw(session) {
            terminal.draw(|f| {
                state.layout = ui::draw(f, session, state.cursor, &settings.ui, &settings.controls);
            })?;
            state.drawn = Some((session.revision(), state.cursor));
        }

        let timeout = session
            .next_tick_in(Instant::now())
            .map_or(IDLE_POLL, |d| d.min(IDLE_POLL));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if handle_key_event(key, settings, session, state) {
                        session.stop();
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(mouse, session, state),
                Event::Resize(..) => state.drawn = None,
                _ => {}
            }
        }
    }

    Ok(())
}

/// Apply `event` and keep the list cursor on the track it landed on.
fn dispatch<O: AudioOutput>(
    event: SessionEvent,
    session: &mut PlaybackSession<O>,
    state: &mut EventLoopState,
) {
    session.handle(event);
    if matches!(
        event,
        SessionEvent::SelectTrack(_)
            | SessionEvent::SwipeLeft
            | SessionEvent::SwipeRight
            | SessionEvent::Shake
    ) {
        state.cursor = session.current_index();
    }
}

/// Returns true when the user asked to quit.
fn handle_key_event<O: AudioOutput>(
    key: KeyEvent,
    settings: &config::Settings,
    session: &mut PlaybackSession<O>,
    state: &mut EventLoopState,
) -> bool {
    let len = session.catalog().len();
    let scrub = settings.controls.scrub_seconds.min(i64::MAX as u64) as i64;

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('j') | KeyCode::Down => state.move_cursor(1, len),
        KeyCode::Char('k') | KeyCode::Up => state.move_cursor(-1, len),
        KeyCode::Enter => dispatch(SessionEvent::SelectTrack(state.cursor), session, state),
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            dispatch(SessionEvent::TogglePlayPause, session, state)
        }
        KeyCode::Char('s') => dispatch(SessionEvent::Stop, session, state),
        KeyCode::Char('l') | KeyCode::Right => dispatch(SessionEvent::SwipeLeft, session, state),
        KeyCode::Char('h') | KeyCode::Left => dispatch(SessionEvent::SwipeRight, session, state),
        KeyCode::Char('r') => dispatch(SessionEvent::Shake, session, state),
        KeyCode::Char('L') => dispatch(SessionEvent::Nudge(scrub), session, state),
        KeyCode::Char('H') => dispatch(SessionEvent::Nudge(-scrub), session, state),
        _ => {}
    }

    false
}

fn handle_mouse_event<O: AudioOutput>(
    mouse: MouseEvent,
    session: &mut PlaybackSession<O>,
    state: &mut EventLoopState,
) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(seek) = gesture::slider_tap(
                state.layout.slider,
                mouse.column,
                mouse.row,
                session.duration(),
            ) {
                dispatch(seek, session, state);
            } else {
                state.drag.press(mouse.column, mouse.row, state.layout.artwork);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some(swipe) = state.drag.release(mouse.column) {
                dispatch(swipe.event(), session, state);
            }
        }
        MouseEventKind::ScrollDown => state.move_cursor(1, session.catalog().len()),
        MouseEventKind::ScrollUp => state.move_cursor(-1, session.catalog().len()),
        _ => {}
    }
}
