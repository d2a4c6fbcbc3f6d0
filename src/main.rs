//! Analog NTP clock on a Pico W with a 1.14" ST7789 display.
//!
//! Set `WIFI_SSID`, `WIFI_PASS` and `UTC_OFFSET_MINUTES` in `.env` (see [`tft_clock::config`]).
#![no_std]
#![no_main]
#![allow(clippy::future_not_send, reason = "Single-threaded")]

use core::convert::Infallible;

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_time::Delay;
use embedded_graphics::prelude::DrawTarget;
use panic_probe as _;
use tft_clock::config::{JOIN_RETRY_MS, SYNC_RETRY_MS};
use tft_clock::time_source::wait_for_time;
use tft_clock::time_sync::NtpTimeSource;
use tft_clock::wifi::Wifi;
use tft_clock::{
    AlertIndicator, ClockConfig, ClockDriver, ClockFaceRenderer, Error, FaceGeometry, Palette,
    Result, StatusPanel, WallClock, tft,
};

#[embassy_executor::main]
pub async fn main(spawner: Spawner) -> ! {
    // If it returns, something went wrong.
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());
    let config = ClockConfig::from_build_env()?;
    info!(
        "Config: ssid={}, ntp={}, offset={}s, fallback={}, window={}",
        config.credentials.ssid.as_str(),
        config.ntp_server,
        config.utc_offset.whole_seconds(),
        config.fallback_time,
        config.resync_window
    );

    let _backlight = tft::backlight_on(p.PIN_13);
    let mut display = tft::init(p.SPI1, p.PIN_8, p.PIN_9, p.PIN_10, p.PIN_11, p.PIN_12)?;

    let palette = Palette::default();
    display.clear(palette.background).map_err(|_| Error::Display)?;
    let renderer = ClockFaceRenderer::new(FaceGeometry::SMALL_PORTRAIT, palette);
    renderer.draw_face(&mut display).map_err(|_| Error::Display)?;

    let alert = AlertIndicator::new(StatusPanel::ALERT_SLOT, palette.background);
    alert.show(&mut display).map_err(|_| Error::Display)?;

    let mut wifi = Wifi::new(
        p.PIN_23, p.PIN_25, p.PIO0, p.PIN_24, p.PIN_29, p.DMA_CH0, spawner,
    )
    .await?;
    wifi.join(&config.credentials, JOIN_RETRY_MS).await;
    info!("WiFi connected: {}", wifi.is_connected());

    alert.hide(&mut display).map_err(|_| Error::Display)?;
    StatusPanel::new(StatusPanel::LOWER_HALF, palette)
        .show_connected(&mut display, config.credentials.ssid.as_str())
        .map_err(|_| Error::Display)?;

    let mut time_source = NtpTimeSource::new(wifi.stack(), config.ntp_server, config.utc_offset);
    let reading =
        wait_for_time(&mut time_source, &mut display, &alert, &mut Delay, SYNC_RETRY_MS).await?;

    let mut wall_clock = WallClock::new(config.fallback_time, config.resync_window);
    wall_clock.resync(reading);

    ClockDriver::new(display, time_source, wall_clock, renderer)
        .run()
        .await
}
