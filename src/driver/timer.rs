use std::time::{Duration, Instant};

/// Fixed-interval timer polled by the event loop.
///
/// Pausing keeps the timer alive; `resume` makes it due immediately.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    next_due: Instant,
    paused: bool,
}

impl Interval {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_due: now + period,
            paused: false,
        }
    }

    pub fn new_paused(period: Duration, now: Instant) -> Self {
        Self {
            paused: true,
            ..Self::new(period, now)
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self, now: Instant) {
        if self.paused {
            self.paused = false;
            self.next_due = now;
        }
    }

    /// `true` once per elapsed period. Missed periods are skipped, not
    /// replayed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.paused || now < self.next_due {
            return false;
        }
        self.next_due += self.period;
        if self.next_due <= now {
            self.next_due = now + self.period;
        }
        true
    }

    /// Time left until the next tick, `None` while paused.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        (!self.paused).then(|| self.next_due.saturating_duration_since(now))
    }
}
