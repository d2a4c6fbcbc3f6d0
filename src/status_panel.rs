//! Text panel below the dial that reports which network the clock joined.

use embedded_graphics::{
    mono_font::{MonoTextStyle, ascii::FONT_6X10},
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};

use crate::clock_face::Palette;

/// Bordered panel occupying the lower part of the screen.
#[derive(Copy, Clone, Debug)]
pub struct StatusPanel {
    area: Rectangle,
    palette: Palette,
}

impl StatusPanel {
    /// The area under the dial on a 135x240 portrait panel.
    pub const LOWER_HALF: Rectangle = Rectangle::new(Point::new(0, 140), Size::new(135, 100));

    /// Center of the blank band between the two text lines of [`Self::LOWER_HALF`]. A 24x24
    /// icon here spans rows 158..182 and never touches either line.
    pub const ALERT_SLOT: Point = Point::new(64, 170);

    #[must_use]
    pub const fn new(area: Rectangle, palette: Palette) -> Self {
        Self { area, palette }
    }

    #[must_use]
    pub const fn area(&self) -> Rectangle {
        self.area
    }

    /// Clear the panel and show "Connected to" over `ssid`.
    ///
    /// # Errors
    ///
    /// Returns the display's error if any primitive fails to draw.
    #[expect(clippy::arithmetic_side_effects, reason = "Offsets stay inside the panel")]
    pub fn show_connected<D>(&self, display: &mut D, ssid: &str) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.area
            .into_styled(PrimitiveStyle::with_fill(self.palette.background))
            .draw(display)?;
        self.area
            .into_styled(PrimitiveStyle::with_stroke(self.palette.border, 1))
            .draw(display)?;

        let character_style = MonoTextStyle::new(&FONT_6X10, self.palette.text);
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Top)
            .build();
        let column = self.area.center().x;
        let top = self.area.top_left.y;

        Text::with_text_style(
            "Connected to",
            Point::new(column, top + 5),
            character_style,
            text_style,
        )
        .draw(display)?;
        Text::with_text_style(
            ssid,
            Point::new(column, top + 45),
            character_style,
            text_style,
        )
        .draw(display)?;
        Ok(())
    }
}
