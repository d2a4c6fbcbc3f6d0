//! Hour/minute/second readings with wrapping arithmetic.

use core::str::FromStr;

use derive_more::derive::Display;

use crate::{Error, Result};

/// Seconds in one day.
pub const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// A wall-clock reading with no date attached.
///
/// Fields are always in range: `hours < 24`, `minutes < 60`, `seconds < 60`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Display, Default)]
#[display("{hours:02}:{minutes:02}:{seconds:02}")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    hours: u8,
    minutes: u8,
    seconds: u8,
}

impl TimeOfDay {
    /// `00:00:00`, the configuration default when no fallback is given.
    pub const MIDNIGHT: Self = Self {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Build a reading, rejecting out-of-range fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimeOutOfRange`] if any field is past its maximum.
    pub const fn new(hours: u8, minutes: u8, seconds: u8) -> Result<Self> {
        if hours < 24 && minutes < 60 && seconds < 60 {
            Ok(Self {
                hours,
                minutes,
                seconds,
            })
        } else {
            Err(Error::TimeOutOfRange {
                hours,
                minutes,
                seconds,
            })
        }
    }

    /// Build a reading from seconds since midnight, wrapping past one day.
    #[expect(
        clippy::integer_division_remainder_used,
        clippy::arithmetic_side_effects,
        clippy::cast_possible_truncation,
        reason = "Modulo keeps every field in range"
    )]
    #[must_use]
    pub const fn from_seconds_since_midnight(total: u32) -> Self {
        let total = total % SECONDS_PER_DAY;
        Self {
            hours: (total / 3600) as u8,
            minutes: (total % 3600 / 60) as u8,
            seconds: (total % 60) as u8,
        }
    }

    #[must_use]
    pub const fn hours(self) -> u8 {
        self.hours
    }

    #[must_use]
    pub const fn minutes(self) -> u8 {
        self.minutes
    }

    #[must_use]
    pub const fn seconds(self) -> u8 {
        self.seconds
    }

    /// Seconds elapsed since midnight.
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "Fields are range-checked so the sum stays below one day"
    )]
    #[must_use]
    pub const fn seconds_since_midnight(self) -> u32 {
        self.hours as u32 * 3600 + self.minutes as u32 * 60 + self.seconds as u32
    }

    /// Add `seconds`, carrying into minutes and hours and wrapping past 23:59:59.
    #[expect(
        clippy::integer_division_remainder_used,
        clippy::arithmetic_side_effects,
        reason = "Both operands are reduced modulo one day first"
    )]
    #[must_use]
    pub const fn wrapping_add_seconds(self, seconds: u32) -> Self {
        let total = self.seconds_since_midnight() + seconds % SECONDS_PER_DAY;
        Self::from_seconds_since_midnight(total)
    }
}

impl FromStr for TimeOfDay {
    type Err = Error;

    /// Parse `HH:MM:SS`.
    fn from_str(text: &str) -> Result<Self> {
        let mut parts = text.trim().split(':');
        let mut field = || -> Result<u8> {
            let part = parts.next().ok_or(Error::TimeFormat)?;
            if part.len() != 2 {
                return Err(Error::TimeFormat);
            }
            part.parse::<u8>().map_err(|_| Error::TimeFormat)
        };
        let hours = field()?;
        let minutes = field()?;
        let seconds = field()?;
        if parts.next().is_some() {
            return Err(Error::TimeFormat);
        }
        Self::new(hours, minutes, seconds)
    }
}
