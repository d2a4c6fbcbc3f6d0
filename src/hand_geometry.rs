//! Angles and screen endpoints for the three clock hands.
//!
//! Angles are in degrees, measured clockwise from 12 o'clock. Minute and hour hands carry the
//! fraction of the smaller unit so they sweep instead of jumping.

use embedded_graphics::prelude::Point;

use crate::time_of_day::TimeOfDay;

const DEGREES_TO_RADIANS: f32 = core::f32::consts::PI / 180.0;

/// Angle of a clock field: `field` steps of `360 / field_max` degrees, plus the carried
/// fraction of the next-smaller unit.
#[must_use]
pub fn angle_degrees(field: u8, field_max: u8, fractional_carry_degrees: f32) -> f32 {
    f32::from(field) * (360.0 / f32::from(field_max)) + fractional_carry_degrees
}

/// Project `angle_degrees` onto the screen at `radius` pixels from `center`.
///
/// Zero degrees points straight up, so the trigonometric reference is rotated by -90°.
/// Coordinates are rounded to the nearest pixel.
#[expect(
    clippy::cast_possible_truncation,
    reason = "Rounded values lie within the display"
)]
#[must_use]
pub fn endpoint(angle_degrees: f32, radius: u32, center: Point) -> Point {
    let radians = (angle_degrees - 90.0) * DEGREES_TO_RADIANS;
    #[expect(clippy::cast_precision_loss, reason = "Radii are a few dozen pixels")]
    let radius = radius as f32;
    let dx = libm::roundf(libm::cosf(radians) * radius) as i32;
    let dy = libm::roundf(libm::sinf(radians) * radius) as i32;
    center + Point::new(dx, dy)
}

/// The three hand angles for one reading.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HandAngles {
    pub hour: f32,
    pub minute: f32,
    pub second: f32,
}

impl HandAngles {
    /// Second = `6 * s`; minute = `6 * m + second / 60`; hour = `30 * h + minute / 12`.
    #[must_use]
    pub fn from_time(time: TimeOfDay) -> Self {
        let second = angle_degrees(time.seconds(), 60, 0.0);
        let minute = angle_degrees(time.minutes(), 60, second / 60.0);
        let hour = angle_degrees(time.hours(), 12, minute / 12.0);
        Self {
            hour,
            minute,
            second,
        }
    }
}
