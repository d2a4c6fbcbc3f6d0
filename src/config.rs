//! Build-time configuration.
//!
//! `build.rs` exports these values from the environment or a `.env` file:
//!
//! | Variable             | Default        | Meaning                                  |
//! |----------------------|----------------|------------------------------------------|
//! | `WIFI_SSID`          | (empty)        | Network to join                          |
//! | `WIFI_PASS`          | (empty)        | Network password                         |
//! | `UTC_OFFSET_MINUTES` | `0`            | Fixed local offset, no daylight saving   |
//! | `NTP_SERVER`         | `pool.ntp.org` | Host queried for the time                |
//! | `FALLBACK_TIME`      | `00:00:00`     | Initial wall-clock state, never drawn    |
//! | `RESYNC_HOUR`        | `3`            | Hour whose arrival triggers a resync     |
//! | `REARM_HOUR`         | `2`            | Hour whose arrival re-arms the resync    |

use time::UtcOffset;

use crate::time_of_day::TimeOfDay;
use crate::wall_clock::ResyncWindow;
use crate::{Error, Result};

pub const WIFI_SSID: &str = env!("WIFI_SSID");
pub const WIFI_PASS: &str = env!("WIFI_PASS");
pub const UTC_OFFSET_MINUTES: &str = env!("UTC_OFFSET_MINUTES");
pub const NTP_SERVER: &str = env!("NTP_SERVER");
pub const FALLBACK_TIME: &str = env!("FALLBACK_TIME");
pub const RESYNC_HOUR: &str = env!("RESYNC_HOUR");
pub const REARM_HOUR: &str = env!("REARM_HOUR");

/// Delay between Wi-Fi join attempts.
pub const JOIN_RETRY_MS: u32 = 500;
/// Delay between initial time sync attempts.
pub const SYNC_RETRY_MS: u32 = 2000;

/// WiFi network credentials (SSID and password).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WifiCredentials {
    /// Network SSID (up to 32 characters).
    pub ssid: heapless::String<32>,
    /// Network password (up to 64 characters).
    pub password: heapless::String<64>,
}

impl WifiCredentials {
    /// # Errors
    ///
    /// Returns [`Error::CredentialTooLong`] if the SSID exceeds 32 bytes or the password 64.
    pub fn new(ssid: &str, password: &str) -> Result<Self> {
        Ok(Self {
            ssid: heapless::String::try_from(ssid).map_err(|()| Error::CredentialTooLong)?,
            password: heapless::String::try_from(password)
                .map_err(|()| Error::CredentialTooLong)?,
        })
    }
}

/// Everything the firmware needs to know before it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockConfig {
    pub credentials: WifiCredentials,
    pub utc_offset: UtcOffset,
    pub ntp_server: &'static str,
    pub fallback_time: TimeOfDay,
    pub resync_window: ResyncWindow,
}

impl ClockConfig {
    /// Parse the values baked in by `build.rs`.
    ///
    /// # Errors
    ///
    /// See [`ClockConfig::parse`].
    pub fn from_build_env() -> Result<Self> {
        Self::parse(
            WIFI_SSID,
            WIFI_PASS,
            UTC_OFFSET_MINUTES,
            NTP_SERVER,
            FALLBACK_TIME,
            RESYNC_HOUR,
            REARM_HOUR,
        )
    }

    /// Parse configuration from its textual form.
    ///
    /// Empty `fallback_time` means midnight.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CredentialTooLong`], [`Error::InvalidUtcOffset`], [`Error::TimeFormat`],
    /// [`Error::TimeOutOfRange`], [`Error::InvalidHour`] or
    /// [`Error::InvalidResyncWindow`] for the first value that does
    /// not parse.
    pub fn parse(
        ssid: &str,
        password: &str,
        utc_offset_minutes: &str,
        ntp_server: &'static str,
        fallback_time: &str,
        resync_hour: &str,
        rearm_hour: &str,
    ) -> Result<Self> {
        let credentials = WifiCredentials::new(ssid, password)?;
        let utc_offset = parse_utc_offset(utc_offset_minutes)?;
        let fallback_time = if fallback_time.trim().is_empty() {
            TimeOfDay::MIDNIGHT
        } else {
            fallback_time.parse()?
        };
        let resync_window = ResyncWindow::new(parse_hour(resync_hour)?, parse_hour(rearm_hour)?)?;
        Ok(Self {
            credentials,
            utc_offset,
            ntp_server,
            fallback_time,
            resync_window,
        })
    }
}

/// Parse a signed whole number of minutes into a [`UtcOffset`].
///
/// # Errors
///
/// Returns [`Error::InvalidUtcOffset`] if the text is not an integer or the offset is outside
/// what [`UtcOffset`] can represent.
pub fn parse_utc_offset(minutes: &str) -> Result<UtcOffset> {
    let minutes: i32 = minutes.trim().parse().map_err(|_| Error::InvalidUtcOffset)?;
    let seconds = minutes.checked_mul(60).ok_or(Error::InvalidUtcOffset)?;
    UtcOffset::from_whole_seconds(seconds).map_err(|_| Error::InvalidUtcOffset)
}

fn parse_hour(text: &str) -> Result<u8> {
    text.trim().parse().map_err(|_| Error::InvalidHour)
}
