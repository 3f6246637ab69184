use std::time::{Duration, Instant};

/// A cancellable repeating deadline polled by the host event loop.
#[derive(Debug, Clone)]
pub struct TickTimer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl TickTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            // A zero interval would make the loop spin.
            interval: interval.max(Duration::from_millis(1)),
            next_due: None,
        }
    }

    #[cfg(test)]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Arm the timer to fire one interval after `now`. Restarts an active timer.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    /// Disarm the timer. Cancelling an inactive timer does nothing.
    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// Return true when the deadline has passed, and re-arm for the next one.
    ///
    /// Fires at most once per call; missed intervals are not replayed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                let mut next = due + self.interval;
                if next <= now {
                    next = now + self.interval;
                }
                self.next_due = Some(next);
                true
            }
            _ => false,
        }
    }

    /// Time left until the next tick, or `None` when inactive.
    pub fn time_until(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}
