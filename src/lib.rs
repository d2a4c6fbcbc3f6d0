//! Analog clock on a small TFT, kept in step by NTP.
//!
//! The dial, hands, alert icon and status panel draw onto any
//! `embedded_graphics::DrawTarget<Color = Rgb565>`, so everything except the Pico W bring-up
//! ([`tft`], [`wifi`], [`time_sync`]) runs on the host as well.
#![no_std]

pub mod alert;
pub mod clock_driver;
pub mod clock_face;
pub mod config;
mod error;
pub mod frame;
pub mod hand_geometry;
pub mod status_panel;
pub mod tick_cadence;
pub mod time_of_day;
pub mod time_source;
pub mod unix_seconds;
pub mod wall_clock;

#[cfg(feature = "pico1")]
pub mod tft;
#[cfg(feature = "wifi")]
pub mod time_sync;
#[cfg(feature = "wifi")]
pub mod wifi;

// Re-export commonly used items
pub use alert::AlertIndicator;
pub use clock_driver::{ClockDriver, TickOutcome};
pub use clock_face::{ClockFaceRenderer, FaceGeometry, Palette};
pub use config::ClockConfig;
pub use error::{Error, Result};
pub use status_panel::StatusPanel;
pub use time_of_day::TimeOfDay;
pub use time_source::TimeSource;
pub use wall_clock::{ResyncWindow, WallClock};
