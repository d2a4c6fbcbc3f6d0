use core::convert::Infallible;

use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
#[expect(missing_docs, reason = "The variants are self-explanatory.")]
#[derive(Debug, Display, Error)]
pub enum Error {
    // `#[error(not(source))]` below tells `derive_more` that `embassy_executor::SpawnError` does
    // not implement Rust's `core::error::Error` trait.
    #[cfg(feature = "arm")]
    #[display("{_0:?}")]
    TaskSpawn(#[error(not(source))] embassy_executor::SpawnError),

    #[display("Time of day out of range: {hours}:{minutes}:{seconds}")]
    TimeOutOfRange { hours: u8, minutes: u8, seconds: u8 },

    #[display("Time of day must be formatted HH:MM:SS")]
    TimeFormat,

    #[display("UTC offset is not a whole number of minutes within +/-25h")]
    InvalidUtcOffset,

    #[display("Hour must be a whole number")]
    InvalidHour,

    #[display("Invalid resync window (trigger {trigger_hour}, rearm {rearm_hour})")]
    InvalidResyncWindow { trigger_hour: u8, rearm_hour: u8 },

    #[display("WiFi credential is too long")]
    CredentialTooLong,

    #[display("Time sync failed: {_0}")]
    TimeSync(#[error(not(source))] &'static str),

    #[display("Drawing to the display failed")]
    Display,

    #[display("Display initialization failed")]
    DisplayInit,

    #[display("Error setting output state")]
    CannotSetOutputState,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, fmt: defmt::Formatter<'_>) {
        defmt::write!(fmt, "{}", defmt::Display2Format(self));
    }
}

impl From<Infallible> for Error {
    fn from(_: Infallible) -> Self {
        Self::CannotSetOutputState
    }
}

#[cfg(feature = "arm")]
impl From<embassy_executor::SpawnError> for Error {
    fn from(err: embassy_executor::SpawnError) -> Self {
        Self::TaskSpawn(err)
    }
}
