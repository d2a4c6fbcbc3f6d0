//! Fixed one-second deadlines for the driver loop.
//!
//! The deadline always advances by exactly one period from its previous value, never from the
//! time the tick was serviced, so late wake-ups do not accumulate drift. Only a successful
//! resync moves the grid.

use embassy_time::{Duration, Instant};

use crate::clock_driver::TickOutcome;

/// Period between clock ticks.
pub const TICK_PERIOD: Duration = Duration::from_millis(1000);

/// Next tick deadline plus the period it advances by.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickCadence {
    deadline: Instant,
    period: Duration,
}

impl TickCadence {
    /// First deadline is one period after `now`.
    #[must_use]
    pub fn new(now: Instant, period: Duration) -> Self {
        Self {
            deadline: later(now, period),
            period,
        }
    }

    #[must_use]
    pub const fn deadline(&self) -> Instant {
        self.deadline
    }

    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// `true` once `now` has reached the deadline.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Move the deadline forward by exactly one period.
    pub fn advance(&mut self) {
        self.deadline = later(self.deadline, self.period);
    }

    /// Schedule the next deadline one period after `now`, dropping any backlog.
    pub fn restart(&mut self, now: Instant) {
        self.deadline = later(now, self.period);
    }

    /// Pick the next deadline once a tick has been serviced at `now`.
    ///
    /// A successful resync already accounts for the time the fetch took, so the grid restarts
    /// from `now`. Otherwise the deadline advances by one period and any ticks missed while a
    /// failed fetch blocked come due immediately.
    pub fn after(&mut self, outcome: TickOutcome, now: Instant) {
        match outcome {
            TickOutcome::Resynced => self.restart(now),
            TickOutcome::Ticked | TickOutcome::ResyncFailed => self.advance(),
        }
    }
}

fn later(instant: Instant, period: Duration) -> Instant {
    instant.checked_add(period).unwrap_or(Instant::MAX)
}
