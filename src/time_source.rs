//! Where authoritative time-of-day readings come from.

#![allow(clippy::future_not_send, reason = "single-threaded")]

use embedded_graphics::{pixelcolor::Rgb565, prelude::DrawTarget};
use embedded_hal_async::delay::DelayNs;

use crate::alert::AlertIndicator;
use crate::time_of_day::TimeOfDay;
use crate::{Error, Result};

/// A source of local time-of-day readings, such as an NTP server.
///
/// Readings are already shifted to the configured local offset.
#[allow(async_fn_in_trait, reason = "single-threaded embassy executor, no Send bound needed")]
pub trait TimeSource {
    /// Fetch the current time of day.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimeSync`] when no reading could be obtained.
    async fn fetch(&mut self) -> Result<TimeOfDay>;
}

impl<T: TimeSource> TimeSource for &mut T {
    async fn fetch(&mut self) -> Result<TimeOfDay> {
        (**self).fetch().await
    }
}

/// Block until `time_source` answers, showing `alert` while it does not.
///
/// Each failure is logged, the alert is drawn and the next attempt waits `retry_ms`.
/// The alert is hidden once a reading arrives.
///
/// # Errors
///
/// Returns [`Error::Display`] if the alert cannot be drawn or cleared.
pub async fn wait_for_time<T, D, Dl>(
    time_source: &mut T,
    display: &mut D,
    alert: &AlertIndicator,
    delay: &mut Dl,
    retry_ms: u32,
) -> Result<TimeOfDay>
where
    T: TimeSource,
    D: DrawTarget<Color = Rgb565>,
    Dl: DelayNs,
{
    loop {
        match time_source.fetch().await {
            Ok(reading) => {
                alert.hide(display).map_err(|_| Error::Display)?;
                #[cfg(feature = "defmt")]
                defmt::info!("Initial time sync: {}", reading);
                return Ok(reading);
            }
            Err(err) => {
                log_retry(&err, retry_ms);
                alert.show(display).map_err(|_| Error::Display)?;
                delay.delay_ms(retry_ms).await;
            }
        }
    }
}

#[cfg_attr(not(feature = "defmt"), expect(unused_variables, reason = "Only logged"))]
fn log_retry(err: &Error, retry_ms: u32) {
    #[cfg(feature = "defmt")]
    defmt::warn!("Time sync failed: {}. Retrying in {} ms", err, retry_ms);
}
