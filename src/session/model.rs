//! Session model types: `PlaybackSession`, `PlaybackState` and `SessionView`.

use std::path::Path;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::audio::{AudioOutput, ResourceLoadError};
use crate::catalog::{Track, TrackCatalog};

use super::event::SessionEvent;
use super::timer::TickTimer;

/// The transport state of the session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::Stopped
    }
}

/// Read-only snapshot of the session for rendering.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SessionView {
    pub current_index: usize,
    pub state: PlaybackState,
    /// Index of the track whose audio is loaded, if the last load succeeded.
    pub loaded: Option<usize>,
    pub elapsed: Duration,
    pub duration: Duration,
}

impl SessionView {
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Position of the slider thumb in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 0.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

/// Build the RNG used by `shake`: fixed when a seed is given.
pub fn shake_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// The playback/navigation state of the screen and the transitions over it.
pub struct PlaybackSession<O: AudioOutput> {
    catalog: TrackCatalog,
    output: O,
    rng: StdRng,
    timer: TickTimer,

    current_index: usize,
    state: PlaybackState,
    loaded: Option<usize>,
    elapsed: Duration,
    duration: Duration,
    last_error: Option<ResourceLoadError>,

    revision: u64,
}

impl<O: AudioOutput> PlaybackSession<O> {
    /// Create a session on the first track. The track is loaded but not played.
    pub fn new(catalog: TrackCatalog, output: O, rng: StdRng, tick_interval: Duration) -> Self {
        let mut session = Self {
            catalog,
            output,
            rng,
            timer: TickTimer::new(tick_interval),
            current_index: 0,
            state: PlaybackState::Stopped,
            loaded: None,
            elapsed: Duration::ZERO,
            duration: Duration::ZERO,
            last_error: None,
            revision: 0,
        };
        session.select_track(0);
        session
    }

    /// Dispatch an event to its transition.
    pub fn handle(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::SelectTrack(i) => self.select_track(i),
            SessionEvent::TogglePlayPause => self.toggle_play_pause(),
            SessionEvent::Stop => self.stop(),
            SessionEvent::SwipeLeft => self.swipe_left(),
            SessionEvent::SwipeRight => self.swipe_right(),
            SessionEvent::Shake => self.shake(),
            SessionEvent::Scrub(position) => self.scrub(position),
            SessionEvent::Nudge(secs) => self.nudge(secs),
            SessionEvent::Tick => self.tick(),
        }
    }

    /// Stop whatever plays, then load track `index` (clamped) with elapsed at zero.
    pub fn select_track(&mut self, index: usize) {
        let index = self.catalog.clamp_index(index);
        self.reset_transport();
        self.current_index = index;
        self.load_current();
        self.bump();
    }

    /// Pause when playing, otherwise start (or resume) playback.
    ///
    /// Does nothing when the current track failed to load.
    pub fn toggle_play_pause(&mut self) {
        if self.loaded.is_none() {
            return;
        }

        if self.state == PlaybackState::Playing {
            self.output.pause();
            self.elapsed = self.output.current_time();
            self.timer.cancel();
            self.state = PlaybackState::Paused;
        } else {
            self.elapsed = self.output.current_time();
            self.start_playing();
        }
        self.bump();
    }

    /// Stop playback and rewind. The current track stays loaded.
    pub fn stop(&mut self) {
        self.reset_transport();
        self.bump();
    }

    /// Move to the next track and play it. At the last track, replays it.
    pub fn swipe_left(&mut self) {
        if self.catalog.is_empty() {
            return;
        }
        let next = self.catalog.clamp_index(self.current_index.saturating_add(1));
        self.select_and_play(next);
    }

    /// Move to the previous track and play it. At the first track, does nothing.
    pub fn swipe_right(&mut self) {
        if self.current_index == 0 {
            return;
        }
        self.select_and_play(self.current_index - 1);
    }

    /// Play a uniformly random track.
    pub fn shake(&mut self) {
        if self.catalog.is_empty() {
            return;
        }
        let pick = self.rng.gen_range(0..self.catalog.len());
        tracing::debug!(index = pick, "shake picked a track");
        self.select_and_play(pick);
    }

    /// Seek to `position`, clamped to the loaded track's duration.
    pub fn scrub(&mut self, position: Duration) {
        if self.loaded.is_none() {
            return;
        }
        let position = position.min(self.duration);
        self.elapsed = position;
        self.output.seek(position);
        self.bump();
    }

    /// Seek `secs` seconds forwards (positive) or backwards (negative).
    pub fn nudge(&mut self, secs: i64) {
        // The cached elapsed lags by up to a tick while playing.
        if self.state == PlaybackState::Playing {
            self.elapsed = self.output.current_time();
        }
        let delta = Duration::from_secs(secs.unsigned_abs());
        let target = if secs >= 0 {
            self.elapsed.saturating_add(delta)
        } else {
            self.elapsed.saturating_sub(delta)
        };
        self.scrub(target);
    }

    /// Refresh the elapsed time from the output. Only meaningful while playing.
    ///
    /// A zero position means the track ran to its end; the session goes back
    /// to the stopped "ready" state.
    pub fn tick(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }

        let now = self.output.current_time();
        if now.is_zero() {
            tracing::debug!(index = self.current_index, "track finished");
            self.timer.cancel();
            self.state = PlaybackState::Stopped;
            self.elapsed = Duration::ZERO;
            self.bump();
        } else if now != self.elapsed {
            self.elapsed = now;
            self.bump();
        }
    }

    /// Fire a `Tick` if the refresh timer is due. Returns whether it fired.
    pub fn poll_timer(&mut self, now: Instant) -> bool {
        if self.timer.poll(now) {
            self.handle(SessionEvent::Tick);
            true
        } else {
            false
        }
    }

    /// Time until the next refresh tick, `None` while not playing.
    pub fn next_tick_in(&self, now: Instant) -> Option<Duration> {
        self.timer.time_until(now)
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            current_index: self.current_index,
            state: self.state,
            loaded: self.loaded,
            elapsed: self.elapsed,
            duration: self.duration,
        }
    }

    /// Bumped on every state change; lets renderers skip identical frames.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn catalog(&self) -> &TrackCatalog {
        &self.catalog
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.catalog.get(self.current_index)
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// The last load failure, cleared by the next successful load.
    pub fn last_error(&self) -> Option<&ResourceLoadError> {
        self.last_error.as_ref()
    }

    fn select_and_play(&mut self, index: usize) {
        self.select_track(index);
        if self.loaded.is_some() {
            self.start_playing();
            self.bump();
        }
    }

    fn start_playing(&mut self) {
        self.output.play();
        self.timer.start(Instant::now());
        self.state = PlaybackState::Playing;
    }

    fn reset_transport(&mut self) {
        self.output.stop();
        self.output.seek(Duration::ZERO);
        self.timer.cancel();
        self.elapsed = Duration::ZERO;
        self.state = PlaybackState::Stopped;
    }

    fn load_current(&mut self) {
        let Some(track) = self.catalog.get(self.current_index) else {
            return;
        };
        let name = track.name.clone();

        let path = track.audio_path().map(Path::to_path_buf);

        let result = match path {
            Some(path) => self.output.load(&path),
            None => Err(ResourceLoadError::Missing {
                track: name.clone(),
            }),
        };

        match result {
            Ok(()) => {
                self.loaded = Some(self.current_index);
                self.duration = self.output.duration();
                self.last_error = None;
                tracing::debug!(track = %name, duration = ?self.duration, "loaded track");
            }
            Err(e) => {
                tracing::warn!(track = %name, error = %e, "failed to load track");
                self.loaded = None;
                self.duration = Duration::ZERO;
                self.last_error = Some(e);
            }
        }
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
impl<O: AudioOutput> PlaybackSession<O> {
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn loaded(&self) -> Option<usize> {
        self.loaded
    }

    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}
