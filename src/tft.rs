//! ST7789 135x240 panel on the Waveshare Pico-LCD-1.14 pinout.
//!
//! | Signal | Pin   |
//! |--------|-------|
//! | DC     | GP8   |
//! | CS     | GP9   |
//! | SCK    | GP10  |
//! | MOSI   | GP11  |
//! | RST    | GP12  |
//! | BL     | GP13  |

use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{PIN_8, PIN_9, PIN_10, PIN_11, PIN_12, PIN_13, SPI1};
use embassy_rp::spi::{self, Blocking, Spi};
use embassy_rp::Peri;
use embassy_time::Delay;
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use mipidsi::interface::SpiInterface;
use mipidsi::models::ST7789;
use mipidsi::options::ColorInversion;
use static_cell::StaticCell;

use crate::{Error, Result};

/// Panel width in pixels (portrait).
pub const TFT_WIDTH: u16 = 135;
/// Panel height in pixels (portrait).
pub const TFT_HEIGHT: u16 = 240;

// The 135x240 glass sits inside the controller's 240x320 frame memory.
const OFFSET_X: u16 = 52;
const OFFSET_Y: u16 = 40;
const SPI_FREQUENCY_HZ: u32 = 40_000_000;

type TftSpi = ExclusiveDevice<Spi<'static, SPI1, Blocking>, Output<'static>, NoDelay>;

/// The initialized display, usable as an `embedded_graphics` draw target.
pub type Tft =
    mipidsi::Display<SpiInterface<'static, TftSpi, Output<'static>>, ST7789, Output<'static>>;

/// Turn the backlight on and keep it on.
#[must_use]
pub fn backlight_on(pin_13: Peri<'static, PIN_13>) -> Output<'static> {
    Output::new(pin_13, Level::High)
}

/// Bring up SPI1 and initialize the ST7789.
///
/// # Errors
///
/// Returns [`Error::DisplayInit`] if the controller does not accept the init sequence.
pub fn init(
    spi1: Peri<'static, SPI1>,
    pin_8: Peri<'static, PIN_8>,
    pin_9: Peri<'static, PIN_9>,
    pin_10: Peri<'static, PIN_10>,
    pin_11: Peri<'static, PIN_11>,
    pin_12: Peri<'static, PIN_12>,
) -> Result<Tft> {
    let mut config = spi::Config::default();
    config.frequency = SPI_FREQUENCY_HZ;
    let spi = Spi::new_blocking_txonly(spi1, pin_10, pin_11, config);

    let cs = Output::new(pin_9, Level::High);
    let device = ExclusiveDevice::new_no_delay(spi, cs)?;
    let dc = Output::new(pin_8, Level::Low);

    static BUFFER: StaticCell<[u8; 512]> = StaticCell::new();
    let interface = SpiInterface::new(device, dc, BUFFER.init([0; 512]));

    mipidsi::Builder::new(ST7789, interface)
        .display_size(TFT_WIDTH, TFT_HEIGHT)
        .display_offset(OFFSET_X, OFFSET_Y)
        .invert_colors(ColorInversion::Inverted)
        .reset_pin(Output::new(pin_12, Level::High))
        .init(&mut Delay)
        .map_err(|_| Error::DisplayInit)
}
