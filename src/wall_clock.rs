//! Local time-of-day keeping between network synchronizations.
//!
//! [`WallClock`] advances one second per [`tick`](WallClock::tick) and is overwritten by
//! [`resync`](WallClock::resync) with an authoritative reading. Resynchronization happens once
//! per day, gated by an hour latch ([`ResyncWindow`]) so no date is needed.

use crate::time_of_day::TimeOfDay;
use crate::{Error, Result};

/// Seconds added to every authoritative reading to cover the delay between the fetch and
/// the reading becoming visible on the dial.
pub const RESYNC_BIAS_SECONDS: u32 = 2;

/// The two hours that drive the once-a-day resync latch.
///
/// Entering `trigger_hour` while disarmed requests a resync and arms the latch; entering
/// `rearm_hour` while armed disarms it so the next day's window fires again.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResyncWindow {
    trigger_hour: u8,
    rearm_hour: u8,
}

impl ResyncWindow {
    /// Resync at 03:00, re-arm at 02:00 the next day.
    pub const DAILY: Self = Self {
        trigger_hour: 3,
        rearm_hour: 2,
    };

    /// # Errors
    ///
    /// Returns [`Error::InvalidResyncWindow`] if either hour is 24 or more, or if they are equal.
    pub const fn new(trigger_hour: u8, rearm_hour: u8) -> Result<Self> {
        if trigger_hour < 24 && rearm_hour < 24 && trigger_hour != rearm_hour {
            Ok(Self {
                trigger_hour,
                rearm_hour,
            })
        } else {
            Err(Error::InvalidResyncWindow {
                trigger_hour,
                rearm_hour,
            })
        }
    }

    #[must_use]
    pub const fn trigger_hour(self) -> u8 {
        self.trigger_hour
    }

    #[must_use]
    pub const fn rearm_hour(self) -> u8 {
        self.rearm_hour
    }
}

impl Default for ResyncWindow {
    fn default() -> Self {
        Self::DAILY
    }
}

/// Hours, minutes and seconds advanced locally, plus the resync latch.
#[derive(Clone, Debug)]
pub struct WallClock {
    hours: u8,
    minutes: u8,
    seconds: u8,
    resync_armed: bool,
    window: ResyncWindow,
}

impl WallClock {
    /// Start from `fallback`. The firmware overwrites it with the first reading before drawing.
    #[must_use]
    pub const fn new(fallback: TimeOfDay, window: ResyncWindow) -> Self {
        Self {
            hours: fallback.hours(),
            minutes: fallback.minutes(),
            seconds: fallback.seconds(),
            resync_armed: false,
            window,
        }
    }

    /// The current reading.
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "Fields stay in range so the sum stays below one day"
    )]
    #[must_use]
    pub const fn time(&self) -> TimeOfDay {
        TimeOfDay::from_seconds_since_midnight(
            self.hours as u32 * 3600 + self.minutes as u32 * 60 + self.seconds as u32,
        )
    }

    #[must_use]
    pub const fn hours(&self) -> u8 {
        self.hours
    }

    #[must_use]
    pub const fn minutes(&self) -> u8 {
        self.minutes
    }

    #[must_use]
    pub const fn seconds(&self) -> u8 {
        self.seconds
    }

    /// `true` once this window's resync has happened and until the rearm hour is reached.
    #[must_use]
    pub const fn is_resync_armed(&self) -> bool {
        self.resync_armed
    }

    #[must_use]
    pub const fn window(&self) -> ResyncWindow {
        self.window
    }

    /// Advance by one second with carry: seconds into minutes, minutes into hours, and hours
    /// wrap from 23 to 0.
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "Each field is reset before it can pass its maximum"
    )]
    pub const fn tick(&mut self) {
        self.seconds += 1;
        if self.seconds > 59 {
            self.seconds = 0;
            self.minutes += 1;
            if self.minutes > 59 {
                self.minutes = 0;
                self.hours += 1;
                if self.hours > 23 {
                    self.hours = 0;
                }
            }
        }
    }

    /// Overwrite the time from an authoritative reading, then add [`RESYNC_BIAS_SECONDS`].
    pub fn resync(&mut self, reading: TimeOfDay) {
        let biased = reading.wrapping_add_seconds(RESYNC_BIAS_SECONDS);
        self.hours = biased.hours();
        self.minutes = biased.minutes();
        self.seconds = biased.seconds();
        #[cfg(feature = "defmt")]
        defmt::info!("Wall clock resynced to {} (reading {})", biased, reading);
    }

    /// Run the hour latch and report whether a resync should be attempted now.
    ///
    /// The latch arms as soon as a resync is requested, whether or not the fetch that follows
    /// succeeds; a failed attempt waits for the next day's window.
    pub fn take_resync_due(&mut self) -> bool {
        if self.resync_armed && self.hours == self.window.rearm_hour {
            self.resync_armed = false;
        }
        if !self.resync_armed && self.hours == self.window.trigger_hour {
            self.resync_armed = true;
            return true;
        }
        false
    }
}
