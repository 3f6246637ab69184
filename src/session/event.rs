use std::time::Duration;

/// Discrete inputs the session reacts to, independent of where they came from
/// (keys, mouse gestures, the refresh timer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A list row was chosen. Loads the track without playing it.
    SelectTrack(usize),
    TogglePlayPause,
    Stop,
    /// Swipe towards the left: advance to the next track and play it.
    SwipeLeft,
    /// Swipe towards the right: go back to the previous track and play it.
    SwipeRight,
    /// Play a random track.
    Shake,
    /// Seek to an absolute position within the loaded track.
    Scrub(Duration),
    /// Seek relative to the current position, in seconds.
    Nudge(i64),
    /// Periodic refresh of the elapsed time while playing.
    Tick,
}
