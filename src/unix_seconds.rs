//! Unix timestamp type and its conversions to local time of day.

use time::{OffsetDateTime, UtcOffset};

use crate::time_of_day::TimeOfDay;

/// Seconds between the NTP era start (1900-01-01) and the Unix epoch (1970-01-01).
pub const NTP_TO_UNIX_SECONDS: i64 = 2_208_988_800;

/// Units-safe wrapper for Unix timestamps (seconds since 1970-01-01 00:00:00 UTC)
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnixSeconds(pub i64);

impl UnixSeconds {
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }

    /// Convert NTP era-0 seconds to Unix seconds, rejecting instants before 1970.
    #[must_use]
    pub const fn from_ntp_seconds(ntp: u32) -> Option<Self> {
        #[expect(
            clippy::arithmetic_side_effects,
            reason = "u32 promoted to i64 cannot overflow"
        )]
        let seconds = ntp as i64 - NTP_TO_UNIX_SECONDS;
        if seconds >= 0 { Some(Self(seconds)) } else { None }
    }

    #[must_use]
    pub fn to_offset_datetime(self, offset: UtcOffset) -> Option<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp(self.as_i64())
            .ok()
            .and_then(|date_time| date_time.checked_to_offset(offset))
    }

    /// Local wall-clock reading at `offset`, or `None` past the range `time` supports.
    #[must_use]
    pub fn to_time_of_day(self, offset: UtcOffset) -> Option<TimeOfDay> {
        let (hours, minutes, seconds) = self.to_offset_datetime(offset)?.to_hms();
        TimeOfDay::new(hours, minutes, seconds).ok()
    }
}
