//! "Not connected" icon shown while the clock waits for the network.

use embedded_graphics::{
    pixelcolor::{Rgb565, raw::RawU16},
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
};

/// Icon width in pixels.
pub const ALERT_WIDTH: u32 = 24;
/// Icon height in pixels.
pub const ALERT_HEIGHT: u32 = 24;

const ALERT_PIXELS: usize = (ALERT_WIDTH * ALERT_HEIGHT) as usize;

const TRIANGLE_FILL: u16 = 0xFFE0; // yellow
const MARK: u16 = 0x0000;

/// Warning triangle with an exclamation mark, RGB565 row-major.
pub static ALERT_ICON: [u16; ALERT_PIXELS] = warning_triangle();

#[expect(
    clippy::arithmetic_side_effects,
    clippy::indexing_slicing,
    clippy::integer_division_remainder_used,
    reason = "Loop bounds keep every index inside the icon"
)]
const fn warning_triangle() -> [u16; ALERT_PIXELS] {
    const W: usize = ALERT_WIDTH as usize;
    const H: usize = ALERT_HEIGHT as usize;
    const TOP: usize = 1;
    const BOTTOM: usize = H - 2;

    let mut pixels = [MARK; ALERT_PIXELS];
    let mut y = TOP;
    while y <= BOTTOM {
        // Work in doubled coordinates so the apex can sit between the two middle columns.
        let half_width_doubled = 1 + (y - TOP) * (W - 1) / (BOTTOM - TOP);
        let mut x = 0;
        while x < W {
            let offset_doubled = (2 * x + 1).abs_diff(W);
            if offset_doubled <= half_width_doubled {
                let stem = x >= W / 2 - 1 && x <= W / 2 && y >= 8 && y <= 15;
                let dot = x >= W / 2 - 1 && x <= W / 2 && y >= 18 && y <= 19;
                pixels[y * W + x] = if stem || dot { MARK } else { TRIANGLE_FILL };
            }
            x += 1;
        }
        y += 1;
    }
    pixels
}

/// Shows and hides [`ALERT_ICON`] centered on a fixed point.
#[derive(Copy, Clone, Debug)]
pub struct AlertIndicator {
    center: Point,
    background: Rgb565,
}

impl AlertIndicator {
    #[must_use]
    pub const fn new(center: Point, background: Rgb565) -> Self {
        Self { center, background }
    }

    /// Screen area covered by the icon.
    #[expect(clippy::cast_possible_wrap, reason = "Icon is 24 pixels")]
    #[must_use]
    pub fn bounding_box(&self) -> Rectangle {
        let top_left = self.center
            - Point::new((ALERT_WIDTH / 2) as i32, (ALERT_HEIGHT / 2) as i32);
        Rectangle::new(top_left, Size::new(ALERT_WIDTH, ALERT_HEIGHT))
    }

    /// Stream the icon into its bounding box as one contiguous block.
    ///
    /// # Errors
    ///
    /// Returns the display's error if the transfer fails.
    pub fn show<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        display.fill_contiguous(
            &self.bounding_box(),
            ALERT_ICON.iter().map(|&raw| Rgb565::from(RawU16::new(raw))),
        )
    }

    /// Fill the icon's bounding box with the background color.
    ///
    /// # Errors
    ///
    /// Returns the display's error if the fill fails.
    pub fn hide<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.bounding_box()
            .into_styled(PrimitiveStyle::with_fill(self.background))
            .draw(display)
    }
}
