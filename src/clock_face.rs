//! Analog dial rendering with incremental hand redraws.
//!
//! The static face is drawn once by [`ClockFaceRenderer::draw_face`]. After that,
//! [`ClockFaceRenderer::redraw`] runs once per tick and touches only hand pixels:
//!
//! - On the first tick and whenever seconds wrap to zero, the hour and minute hands are erased at
//!   their remembered endpoints and new endpoints are computed. They are not drawn yet.
//! - Every tick, the previous second hand is erased, the hour and minute hands are drawn, the new
//!   second hand is drawn, and the pivot dot is painted over all three.
//!
//! Hands are erased by drawing the same line, endpoint to pivot, in the background color, so the
//! remembered endpoint for each hand must always match what is on screen.

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle},
};

use crate::hand_geometry::{HandAngles, endpoint};
use crate::time_of_day::TimeOfDay;

/// Dial dimensions in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FaceGeometry {
    pub center: Point,
    pub dial_outer_radius: u32,
    pub dial_inner_radius: u32,
    pub major_tick_outer_radius: u32,
    pub major_tick_inner_radius: u32,
    pub minor_dot_radius: u32,
    pub pivot_radius: u32,
    pub hour_hand_length: u32,
    pub minute_hand_length: u32,
    pub second_hand_length: u32,
}

impl FaceGeometry {
    /// Layout for a 135 pixel wide panel with the dial in the top half.
    pub const SMALL_PORTRAIT: Self = Self {
        center: Point::new(64, 64),
        dial_outer_radius: 61,
        dial_inner_radius: 57,
        major_tick_outer_radius: 57,
        major_tick_inner_radius: 50,
        minor_dot_radius: 53,
        pivot_radius: 3,
        hour_hand_length: 33,
        minute_hand_length: 44,
        second_hand_length: 47,
    };
}

impl Default for FaceGeometry {
    fn default() -> Self {
        Self::SMALL_PORTRAIT
    }
}

/// Colors used on the dial and the status area.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb565,
    pub dial: Rgb565,
    pub cardinal: Rgb565,
    pub hands: Rgb565,
    pub second_hand: Rgb565,
    pub text: Rgb565,
    pub border: Rgb565,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb565::BLACK,
            dial: Rgb565::BLUE,
            cardinal: Rgb565::CYAN,
            hands: Rgb565::WHITE,
            second_hand: Rgb565::RED,
            text: Rgb565::YELLOW,
            border: Rgb565::WHITE,
        }
    }
}

/// Last drawn endpoint of each hand.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RenderState {
    pub hour: Point,
    pub minute: Point,
    pub second: Point,
    first_tick: bool,
}

impl RenderState {
    /// All endpoints start at the pivot, so erasing them before anything is drawn only
    /// touches the pivot.
    #[must_use]
    pub const fn new(center: Point) -> Self {
        Self {
            hour: center,
            minute: center,
            second: center,
            first_tick: true,
        }
    }

    #[must_use]
    pub const fn is_first_tick(&self) -> bool {
        self.first_tick
    }
}

/// Draws the dial once and then updates the hands every tick.
#[derive(Clone, Debug)]
pub struct ClockFaceRenderer {
    geometry: FaceGeometry,
    palette: Palette,
    state: RenderState,
}

impl ClockFaceRenderer {
    #[must_use]
    pub const fn new(geometry: FaceGeometry, palette: Palette) -> Self {
        Self {
            geometry,
            palette,
            state: RenderState::new(geometry.center),
        }
    }

    #[must_use]
    pub const fn geometry(&self) -> &FaceGeometry {
        &self.geometry
    }

    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    #[must_use]
    pub const fn render_state(&self) -> &RenderState {
        &self.state
    }

    /// Draw the dial ring, 12 major ticks, 60 minor dots (cardinals emphasized) and the pivot.
    ///
    /// # Errors
    ///
    /// Returns the display's error if any primitive fails to draw.
    pub fn draw_face<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let geometry = &self.geometry;
        let palette = &self.palette;
        let center = geometry.center;

        fill_circle(display, center, geometry.dial_outer_radius, palette.dial)?;
        fill_circle(display, center, geometry.dial_inner_radius, palette.background)?;

        for degrees in (0..360_u16).step_by(30) {
            let angle = f32::from(degrees);
            let outer = endpoint(angle, geometry.major_tick_outer_radius, center);
            let inner = endpoint(angle, geometry.major_tick_inner_radius, center);
            Line::new(outer, inner)
                .into_styled(PrimitiveStyle::with_stroke(palette.dial, 1))
                .draw(display)?;
        }

        for degrees in (0..360_u16).step_by(6) {
            let dot = endpoint(f32::from(degrees), geometry.minor_dot_radius, center);
            Pixel(dot, palette.dial).draw(display)?;
            if degrees % 90 == 0 {
                fill_circle(display, dot, 1, palette.cardinal)?;
                fill_circle(display, dot + Point::new(1, 0), 1, palette.cardinal)?;
            }
        }

        self.draw_pivot(display)
    }

    /// Update the hands for `time`.
    ///
    /// # Errors
    ///
    /// Returns the display's error if any primitive fails to draw.
    pub fn redraw<D>(&mut self, display: &mut D, time: TimeOfDay) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let angles = HandAngles::from_time(time);
        let center = self.geometry.center;
        let background = self.palette.background;

        if time.seconds() == 0 || self.state.first_tick {
            self.state.first_tick = false;
            #[cfg(feature = "defmt")]
            defmt::debug!("Minute boundary redraw at {}", time);

            self.hand(display, self.state.hour, background)?;
            self.state.hour = endpoint(angles.hour, self.geometry.hour_hand_length, center);
            self.hand(display, self.state.minute, background)?;
            self.state.minute = endpoint(angles.minute, self.geometry.minute_hand_length, center);
        }

        self.hand(display, self.state.second, background)?;
        self.hand(display, self.state.hour, self.palette.hands)?;
        self.hand(display, self.state.minute, self.palette.hands)?;
        self.state.second = endpoint(angles.second, self.geometry.second_hand_length, center);
        self.hand(display, self.state.second, self.palette.second_hand)?;

        self.draw_pivot(display)
    }

    fn hand<D>(&self, display: &mut D, tip: Point, color: Rgb565) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        Line::new(tip, self.geometry.center)
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(display)
    }

    fn draw_pivot<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        fill_circle(
            display,
            self.geometry.center,
            self.geometry.pivot_radius,
            self.palette.second_hand,
        )
    }
}

#[expect(clippy::arithmetic_side_effects, reason = "Radii are small")]
fn fill_circle<D>(
    display: &mut D,
    center: Point,
    radius: u32,
    color: Rgb565,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    Circle::with_center(center, 2 * radius + 1)
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display)
}
