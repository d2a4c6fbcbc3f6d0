//! The once-per-second loop that keeps the dial in step with the wall clock.
//!
//! Each tick runs, in order: the daily resync check (fetching from the [`TimeSource`] when it
//! fires), [`WallClock::tick`], and [`ClockFaceRenderer::redraw`]. A failed resync is logged and
//! absorbed so local ticking continues.

#![allow(clippy::future_not_send, reason = "single-threaded")]

use core::convert::Infallible;

use embassy_time::{Instant, Timer};
use embedded_graphics::{pixelcolor::Rgb565, prelude::DrawTarget};

use crate::clock_face::ClockFaceRenderer;
use crate::tick_cadence::{TICK_PERIOD, TickCadence};
use crate::time_source::TimeSource;
use crate::wall_clock::WallClock;
use crate::{Error, Result};

/// What happened during one [`ClockDriver::step`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Ordinary one-second advance.
    Ticked,
    /// The daily window fired and the clock was overwritten before ticking.
    Resynced,
    /// The daily window fired but the fetch failed; the clock kept its local time.
    ResyncFailed,
}

/// Owns the display, the time source, the wall clock and the renderer.
pub struct ClockDriver<D, T> {
    display: D,
    time_source: T,
    wall_clock: WallClock,
    renderer: ClockFaceRenderer,
}

impl<D, T> ClockDriver<D, T>
where
    D: DrawTarget<Color = Rgb565>,
    T: TimeSource,
{
    /// Assemble a driver. The face should already be drawn on `display`.
    #[must_use]
    pub const fn new(
        display: D,
        time_source: T,
        wall_clock: WallClock,
        renderer: ClockFaceRenderer,
    ) -> Self {
        Self {
            display,
            time_source,
            wall_clock,
            renderer,
        }
    }

    #[must_use]
    pub const fn wall_clock(&self) -> &WallClock {
        &self.wall_clock
    }

    #[must_use]
    pub const fn renderer(&self) -> &ClockFaceRenderer {
        &self.renderer
    }

    #[must_use]
    pub const fn display(&self) -> &D {
        &self.display
    }

    pub const fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub const fn time_source_mut(&mut self) -> &mut T {
        &mut self.time_source
    }

    /// Service one deadline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Display`] if redrawing the hands fails. Time source failures are absorbed.
    pub async fn step(&mut self) -> Result<TickOutcome> {
        let mut outcome = TickOutcome::Ticked;
        if self.wall_clock.take_resync_due() {
            outcome = match self.time_source.fetch().await {
                Ok(reading) => {
                    self.wall_clock.resync(reading);
                    TickOutcome::Resynced
                }
                Err(err) => {
                    log_resync_failure(&err);
                    TickOutcome::ResyncFailed
                }
            };
        }

        self.wall_clock.tick();
        self.renderer
            .redraw(&mut self.display, self.wall_clock.time())
            .map_err(|_| Error::Display)?;
        Ok(outcome)
    }

    /// Tick forever on one-second deadlines.
    ///
    /// Deadlines advance by exactly [`TICK_PERIOD`]; see [`TickCadence::after`] for how a
    /// resync moves them. Overdue deadlines are serviced without sleeping.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`step`](Self::step).
    pub async fn run(mut self) -> Result<Infallible> {
        #[cfg(feature = "defmt")]
        defmt::info!("Clock running from {}", self.wall_clock.time());
        let mut cadence = TickCadence::new(Instant::now(), TICK_PERIOD);
        loop {
            if !cadence.is_due(Instant::now()) {
                Timer::at(cadence.deadline()).await;
            }
            let outcome = self.step().await?;
            cadence.after(outcome, Instant::now());
        }
    }
}

#[cfg_attr(not(feature = "defmt"), expect(unused_variables, reason = "Only logged"))]
fn log_resync_failure(err: &Error) {
    #[cfg(feature = "defmt")]
    defmt::warn!("Daily resync failed, keeping local time: {}", err);
}
