//! An in-memory RGB565 draw target.
//!
//! Useful for rendering the dial off-screen and inspecting individual pixels.
//!
//! ```
//! use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::{Line, PrimitiveStyle}};
//! use tft_clock::frame::Frame;
//!
//! let mut frame = Frame::<16, 8>::new();
//! Line::new(Point::new(0, 0), Point::new(15, 0))
//!     .into_styled(PrimitiveStyle::with_stroke(Rgb565::RED, 1))
//!     .draw(&mut frame)
//!     .unwrap();
//! assert_eq!(frame.pixel(Point::new(7, 0)), Some(Rgb565::RED));
//! ```

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};

/// `WIDTH` x `HEIGHT` pixels, row-major, initially black.
#[derive(Clone, Debug)]
pub struct Frame<const WIDTH: usize, const HEIGHT: usize> {
    rows: [[Rgb565; WIDTH]; HEIGHT],
    pixels_written: usize,
}

impl<const WIDTH: usize, const HEIGHT: usize> Frame<WIDTH, HEIGHT> {
    /// Create a new blank (all black) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self::filled(Rgb565::BLACK)
    }

    /// Create a frame filled with a single color.
    #[must_use]
    pub const fn filled(color: Rgb565) -> Self {
        Self {
            rows: [[color; WIDTH]; HEIGHT],
            pixels_written: 0,
        }
    }

    /// Color at `point`, or `None` outside the frame.
    #[must_use]
    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        let column = usize::try_from(point.x).ok()?;
        let row = usize::try_from(point.y).ok()?;
        self.rows.get(row)?.get(column).copied()
    }

    /// Number of in-bounds pixel writes since creation or the last
    /// [`reset_counter`](Self::reset_counter).
    #[must_use]
    pub const fn pixels_written(&self) -> usize {
        self.pixels_written
    }

    pub const fn reset_counter(&mut self) {
        self.pixels_written = 0;
    }

    /// Count pixels inside `area` that have `color`.
    #[must_use]
    pub fn count_in(
        &self,
        area: &embedded_graphics::primitives::Rectangle,
        color: Rgb565,
    ) -> usize {
        area.points()
            .filter(|&point| self.pixel(point) == Some(color))
            .count()
    }
}

impl<const WIDTH: usize, const HEIGHT: usize> Default for Frame<WIDTH, HEIGHT> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const WIDTH: usize, const HEIGHT: usize> OriginDimensions for Frame<WIDTH, HEIGHT> {
    #[expect(clippy::cast_possible_truncation, reason = "Frames are display sized")]
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl<const WIDTH: usize, const HEIGHT: usize> DrawTarget for Frame<WIDTH, HEIGHT> {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            let (Ok(column), Ok(row)) = (usize::try_from(coord.x), usize::try_from(coord.y)) else {
                continue;
            };
            if let Some(slot) = self.rows.get_mut(row).and_then(|cells| cells.get_mut(column)) {
                *slot = color;
                self.pixels_written = self.pixels_written.saturating_add(1);
            }
        }
        Ok(())
    }
}
