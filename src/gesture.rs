//! Mouse gestures: horizontal drags on the artwork pane become swipes, clicks
//! on the slider become absolute seeks.

use std::time::Duration;

use ratatui::layout::{Position, Rect};

use crate::session::SessionEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    /// Finger moved towards the left edge.
    Left,
    /// Finger moved towards the right edge.
    Right,
}

impl Swipe {
    pub fn event(self) -> SessionEvent {
        match self {
            Swipe::Left => SessionEvent::SwipeLeft,
            Swipe::Right => SessionEvent::SwipeRight,
        }
    }
}

/// Tracks one press/release pair and classifies it as a swipe.
#[derive(Debug, Clone)]
pub struct DragTracker {
    min_columns: u16,
    origin: Option<u16>,
}

impl DragTracker {
    pub fn new(min_columns: u16) -> Self {
        Self {
            min_columns: min_columns.max(1),
            origin: None,
        }
    }

    /// Start a drag if the press landed inside `area`.
    pub fn press(&mut self, column: u16, row: u16, area: Rect) -> bool {
        if area.contains(Position::new(column, row)) {
            self.origin = Some(column);
            true
        } else {
            self.origin = None;
            false
        }
    }

    /// Finish the drag. Short drags and releases without a press yield nothing.
    pub fn release(&mut self, column: u16) -> Option<Swipe> {
        let origin = self.origin.take()?;
        if origin.abs_diff(column) < self.min_columns {
            return None;
        }
        if column < origin {
            Some(Swipe::Left)
        } else {
            Some(Swipe::Right)
        }
    }

    #[cfg(test)]
    pub fn is_dragging(&self) -> bool {
        self.origin.is_some()
    }
}

/// Fraction of the slider width at `column`, in `[0, 1]`.
pub fn slider_fraction(area: Rect, column: u16) -> f64 {
    let span = area.width.saturating_sub(1).max(1);
    let offset = column.saturating_sub(area.x).min(span);
    f64::from(offset) / f64::from(span)
}

/// Translate a click on the slider into a seek event, if it hit the slider.
pub fn slider_tap(area: Rect, column: u16, row: u16, duration: Duration) -> Option<SessionEvent> {
    if area.width == 0 || !area.contains(Position::new(column, row)) {
        return None;
    }
    let position = duration.mul_f64(slider_fraction(area, column));
    Some(SessionEvent::Scrub(position))
}
