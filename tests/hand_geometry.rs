#![cfg(feature = "host")]
//! Host-level tests for hand angles and their screen projection.

use embedded_graphics::prelude::Point;
use proptest::prelude::*;
use tft_clock::TimeOfDay;
use tft_clock::hand_geometry::{HandAngles, angle_degrees, endpoint};

const CENTER: Point = Point::new(64, 64);

fn angles(hours: u8, minutes: u8, seconds: u8) -> HandAngles {
    HandAngles::from_time(TimeOfDay::new(hours, minutes, seconds).expect("valid test time"))
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn second_angle_is_six_degrees_per_second() {
    for second in 0..60_u8 {
        assert_close(angles(0, 0, second).second, 6.0 * f32::from(second));
    }
}

#[test]
fn minute_hand_carries_fraction_of_second() {
    let hands = angles(10, 30, 30);
    assert_close(hands.second, 180.0);
    assert_close(hands.minute, 183.0);
    assert_close(hands.hour, 315.25);
}

#[test]
fn hour_hand_is_thirty_degrees_per_hour_on_the_hour() {
    assert_close(angles(3, 0, 0).hour, 90.0);
    assert_close(angles(6, 0, 0).hour, 180.0);
    assert_close(angles(0, 0, 0).hour, 0.0);
}

#[test]
fn angle_degrees_adds_carry() {
    assert_close(angle_degrees(15, 60, 0.0), 90.0);
    assert_close(angle_degrees(2, 12, 7.5), 67.5);
}

#[test]
fn zero_degrees_points_straight_up() {
    assert_eq!(endpoint(0.0, 10, CENTER), Point::new(64, 54));
}

#[test]
fn ninety_degrees_points_right() {
    assert_eq!(endpoint(90.0, 10, CENTER), Point::new(74, 64));
}

#[test]
fn cardinal_directions_project_exactly() {
    assert_eq!(endpoint(180.0, 47, CENTER), Point::new(64, 111));
    assert_eq!(endpoint(270.0, 47, CENTER), Point::new(17, 64));
}

#[test]
fn afternoon_hours_share_morning_endpoints() {
    let morning = angles(3, 0, 0);
    let afternoon = angles(15, 0, 0);
    assert_eq!(
        endpoint(morning.hour, 33, CENTER),
        endpoint(afternoon.hour, 33, CENTER)
    );
}

#[test]
fn radius_zero_is_the_center() {
    assert_eq!(endpoint(123.0, 0, CENTER), CENTER);
}

proptest! {
    #[test]
    fn endpoints_lie_on_the_circle(angle in 0.0_f32..360.0, radius in 1_u32..80) {
        let tip = endpoint(angle, radius, CENTER);
        let dx = f64::from(tip.x - CENTER.x);
        let dy = f64::from(tip.y - CENTER.y);
        let distance = (dx * dx + dy * dy).sqrt();
        prop_assert!((distance - f64::from(radius)).abs() <= 1.0);
    }
}
