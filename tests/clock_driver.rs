#![cfg(feature = "host")]
//! Host-level tests for the tick loop, the daily resync and the startup sync.

use std::collections::VecDeque;

use embassy_futures::block_on;
use embassy_time::{Duration, Instant};
use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use embedded_hal_async::delay::DelayNs;
use tft_clock::frame::Frame;
use tft_clock::tick_cadence::{TICK_PERIOD, TickCadence};
use tft_clock::time_source::wait_for_time;
use tft_clock::{
    AlertIndicator, ClockDriver, ClockFaceRenderer, Error, FaceGeometry, Palette, ResyncWindow,
    Result, TickOutcome, TimeOfDay, TimeSource, WallClock,
};

type Dial = Frame<130, 130>;

fn time(hours: u8, minutes: u8, seconds: u8) -> TimeOfDay {
    TimeOfDay::new(hours, minutes, seconds).expect("valid test time")
}

/// Replies in order, then fails forever.
#[derive(Default)]
struct ScriptedSource {
    replies: VecDeque<Result<TimeOfDay>>,
    calls: usize,
}

impl ScriptedSource {
    fn new(replies: impl IntoIterator<Item = Result<TimeOfDay>>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            calls: 0,
        }
    }
}

impl TimeSource for ScriptedSource {
    async fn fetch(&mut self) -> Result<TimeOfDay> {
        self.calls += 1;
        self.replies
            .pop_front()
            .unwrap_or(Err(Error::TimeSync("no reply scripted")))
    }
}

#[derive(Default)]
struct RecordingDelay {
    total_ns: u64,
}

impl DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

/// A display that rejects every draw.
struct FailingDisplay;

impl OriginDimensions for FailingDisplay {
    fn size(&self) -> Size {
        Size::new(130, 130)
    }
}

impl DrawTarget for FailingDisplay {
    type Color = Rgb565;
    type Error = ();

    fn draw_iter<I>(&mut self, _pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        Err(())
    }
}

fn driver_at(
    start: TimeOfDay,
    source: ScriptedSource,
) -> ClockDriver<Dial, ScriptedSource> {
    let renderer = ClockFaceRenderer::new(FaceGeometry::SMALL_PORTRAIT, Palette::default());
    let mut dial = Dial::new();
    renderer.draw_face(&mut dial).expect("infallible");
    ClockDriver::new(
        dial,
        source,
        WallClock::new(start, ResyncWindow::DAILY),
        renderer,
    )
}

#[test]
fn step_ticks_and_redraws_outside_the_window() {
    let mut driver = driver_at(time(10, 0, 0), ScriptedSource::default());
    let outcome = block_on(driver.step()).expect("step");

    assert_eq!(outcome, TickOutcome::Ticked);
    assert_eq!(driver.wall_clock().time(), time(10, 0, 1));
    assert_eq!(driver.time_source_mut().calls, 0);

    let tip = driver.renderer().render_state().second;
    assert_eq!(tip, tft_clock::hand_geometry::endpoint(6.0, 47, Point::new(64, 64)));
    assert_eq!(driver.display().pixel(tip), Some(Rgb565::RED));
}

#[test]
fn resync_happens_once_on_entering_trigger_hour() {
    let source = ScriptedSource::new([Ok(time(3, 0, 10))]);
    let mut driver = driver_at(time(2, 59, 59), source);

    assert_eq!(block_on(driver.step()).expect("step"), TickOutcome::Ticked);
    assert_eq!(driver.wall_clock().time(), time(3, 0, 0));

    // Reading + 2 s bias, then this step's tick.
    assert_eq!(block_on(driver.step()).expect("step"), TickOutcome::Resynced);
    assert_eq!(driver.wall_clock().time(), time(3, 0, 13));
    assert!(driver.wall_clock().is_resync_armed());

    for _ in 0..100 {
        assert_eq!(block_on(driver.step()).expect("step"), TickOutcome::Ticked);
    }
    assert_eq!(driver.time_source_mut().calls, 1);
    assert_eq!(driver.wall_clock().time(), time(3, 1, 53));
}

#[test]
fn failed_resync_is_absorbed_and_not_retried_until_tomorrow() {
    let source = ScriptedSource::new([Err(Error::TimeSync("unreachable"))]);
    let mut driver = driver_at(time(3, 0, 0), source);

    assert_eq!(block_on(driver.step()).expect("step"), TickOutcome::ResyncFailed);
    assert_eq!(driver.wall_clock().time(), time(3, 0, 1));

    for _ in 0..10 {
        assert_eq!(block_on(driver.step()).expect("step"), TickOutcome::Ticked);
    }
    assert_eq!(driver.time_source_mut().calls, 1);
    assert_eq!(driver.wall_clock().time(), time(3, 0, 11));
}

#[test]
fn display_failure_propagates() {
    let renderer = ClockFaceRenderer::new(FaceGeometry::SMALL_PORTRAIT, Palette::default());
    let mut driver = ClockDriver::new(
        FailingDisplay,
        ScriptedSource::default(),
        WallClock::new(time(12, 0, 0), ResyncWindow::DAILY),
        renderer,
    );
    assert!(matches!(block_on(driver.step()), Err(Error::Display)));
}

#[test]
fn startup_sync_retries_with_alert_until_a_reading_arrives() {
    let mut source = ScriptedSource::new([
        Err(Error::TimeSync("dns")),
        Err(Error::TimeSync("timeout")),
        Ok(time(7, 30, 0)),
    ]);
    let mut display = Dial::filled(Rgb565::GREEN);
    let alert = AlertIndicator::new(Point::new(64, 100), Rgb565::BLACK);
    let mut delay = RecordingDelay::default();

    let reading = block_on(wait_for_time(
        &mut source,
        &mut display,
        &alert,
        &mut delay,
        2000,
    ))
    .expect("eventually succeeds");

    assert_eq!(reading, time(7, 30, 0));
    assert_eq!(source.calls, 3);
    assert_eq!(delay.total_ns, 2 * 2_000_000_000);
    // Hidden again after success.
    assert_eq!(display.count_in(&alert.bounding_box(), Rgb565::BLACK), 576);
    assert_eq!(display.pixel(Point::new(64, 80)), Some(Rgb565::GREEN));
}

#[test]
fn startup_sync_succeeding_first_time_does_not_wait() {
    let mut source = ScriptedSource::new([Ok(time(21, 5, 0))]);
    let mut display = Dial::new();
    let alert = AlertIndicator::new(Point::new(64, 100), Rgb565::BLACK);
    let mut delay = RecordingDelay::default();

    let reading = block_on(wait_for_time(&mut source, &mut display, &alert, &mut delay, 2000))
        .expect("succeeds");
    assert_eq!(reading, time(21, 5, 0));
    assert_eq!(delay.total_ns, 0);
}

#[test]
fn startup_sync_reports_display_failure() {
    let mut source = ScriptedSource::default();
    let alert = AlertIndicator::new(Point::new(64, 100), Rgb565::BLACK);
    let mut delay = RecordingDelay::default();
    let result = block_on(wait_for_time(
        &mut source,
        &mut FailingDisplay,
        &alert,
        &mut delay,
        2000,
    ));
    assert!(matches!(result, Err(Error::Display)));
}

#[test]
fn cadence_advances_by_exactly_one_period() {
    let start = Instant::from_millis(0);
    let mut cadence = TickCadence::new(start, TICK_PERIOD);
    assert_eq!(cadence.period(), Duration::from_millis(1000));
    assert_eq!(cadence.deadline(), Instant::from_millis(1000));
    assert!(!cadence.is_due(Instant::from_millis(999)));
    assert!(cadence.is_due(Instant::from_millis(1000)));

    // Serviced late; the next deadline still lands on the grid.
    assert!(cadence.is_due(Instant::from_millis(1350)));
    cadence.advance();
    assert_eq!(cadence.deadline(), Instant::from_millis(2000));

    for _ in 0..58 {
        cadence.advance();
    }
    assert_eq!(cadence.deadline(), Instant::from_millis(60_000));
}

#[test]
fn cadence_restart_drops_backlog() {
    let mut cadence = TickCadence::new(Instant::from_millis(0), TICK_PERIOD);
    cadence.restart(Instant::from_millis(5_300));
    assert_eq!(cadence.deadline(), Instant::from_millis(6_300));
    assert!(!cadence.is_due(Instant::from_millis(6_000)));
}

#[test]
fn cadence_keeps_its_grid_after_a_failed_resync() {
    let mut cadence = TickCadence::new(Instant::from_millis(0), TICK_PERIOD);
    // The fetch behind the 1 s deadline blocked for 5.2 s before failing.
    cadence.after(TickOutcome::ResyncFailed, Instant::from_millis(6_200));
    assert_eq!(cadence.deadline(), Instant::from_millis(2_000));

    // The missed seconds come due at once, then the grid resumes.
    let mut catch_up = 0;
    while cadence.is_due(Instant::from_millis(6_200)) {
        cadence.after(TickOutcome::Ticked, Instant::from_millis(6_200));
        catch_up += 1;
    }
    assert_eq!(catch_up, 5);
    assert_eq!(cadence.deadline(), Instant::from_millis(7_000));
}

#[test]
fn cadence_restarts_after_a_successful_resync() {
    let mut cadence = TickCadence::new(Instant::from_millis(0), TICK_PERIOD);
    cadence.after(TickOutcome::Resynced, Instant::from_millis(6_200));
    assert_eq!(cadence.deadline(), Instant::from_millis(7_200));
    assert!(!cadence.is_due(Instant::from_millis(6_300)));

    cadence.after(TickOutcome::Ticked, Instant::from_millis(7_250));
    assert_eq!(cadence.deadline(), Instant::from_millis(8_200));
}

#[test]
fn failed_resync_loses_no_seconds_once_caught_up() {
    // One step per cadence deadline serviced up to 6.2 s, as `run` would.
    let source = ScriptedSource::new([Err(Error::TimeSync("timeout"))]);
    let mut driver = driver_at(time(2, 59, 59), source);
    let mut cadence = TickCadence::new(Instant::from_millis(0), TICK_PERIOD);
    let now = Instant::from_millis(6_200);
    while cadence.is_due(now) {
        let outcome = block_on(driver.step()).expect("step");
        cadence.after(outcome, now);
    }
    // Deadlines 1 s through 6 s each ticked once.
    assert_eq!(driver.wall_clock().time(), time(3, 0, 5));
    assert_eq!(driver.time_source_mut().calls, 1);
}
