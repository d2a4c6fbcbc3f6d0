#![cfg(feature = "host")]
//! Host-level tests for build-time configuration parsing.

use tft_clock::config::{WifiCredentials, parse_utc_offset};
use tft_clock::{ClockConfig, Error, ResyncWindow, TimeOfDay};

fn parse(
    offset: &str,
    fallback: &str,
    resync: &str,
    rearm: &str,
) -> tft_clock::Result<ClockConfig> {
    ClockConfig::parse("HomeNet", "secret", offset, "pool.ntp.org", fallback, resync, rearm)
}

#[test]
fn parses_a_complete_configuration() {
    let config = parse("120", "06:30:00", "3", "2").expect("valid config");
    assert_eq!(config.credentials.ssid.as_str(), "HomeNet");
    assert_eq!(config.credentials.password.as_str(), "secret");
    assert_eq!(config.utc_offset.whole_seconds(), 7200);
    assert_eq!(config.ntp_server, "pool.ntp.org");
    assert_eq!(config.fallback_time, TimeOfDay::new(6, 30, 0).expect("valid"));
    assert_eq!(config.resync_window, ResyncWindow::DAILY);
}

#[test]
fn empty_fallback_means_midnight() {
    let config = parse("0", "", "3", "2").expect("valid config");
    assert_eq!(config.fallback_time, TimeOfDay::MIDNIGHT);
}

#[test]
fn build_env_defaults_parse() {
    assert!(ClockConfig::from_build_env().is_ok());
}

#[test]
fn utc_offset_accepts_negative_minutes_and_whitespace() {
    assert_eq!(parse_utc_offset("-300").expect("valid").whole_seconds(), -18_000);
    assert_eq!(parse_utc_offset(" 330 ").expect("valid").whole_seconds(), 19_800);
}

#[test]
fn utc_offset_rejects_garbage_and_out_of_range() {
    assert!(matches!(parse_utc_offset("abc"), Err(Error::InvalidUtcOffset)));
    assert!(matches!(parse_utc_offset("2000"), Err(Error::InvalidUtcOffset)));
    assert!(matches!(parse_utc_offset("99999999999"), Err(Error::InvalidUtcOffset)));
}

#[test]
fn rejects_bad_fallback_time() {
    assert!(matches!(parse("0", "6:30", "3", "2"), Err(Error::TimeFormat)));
    assert!(matches!(
        parse("0", "25:00:00", "3", "2"),
        Err(Error::TimeOutOfRange { hours: 25, .. })
    ));
}

#[test]
fn rejects_bad_resync_hours() {
    assert!(matches!(parse("0", "", "x", "2"), Err(Error::InvalidHour)));
    assert!(matches!(
        parse("0", "", "4", "4"),
        Err(Error::InvalidResyncWindow { .. })
    ));
    assert!(matches!(
        parse("0", "", "24", "2"),
        Err(Error::InvalidResyncWindow { .. })
    ));
    let config = parse("0", "", "15", "14").expect("valid config");
    assert_eq!(config.resync_window.trigger_hour(), 15);
    assert_eq!(config.resync_window.rearm_hour(), 14);
}

#[test]
fn credentials_respect_length_limits() {
    let ssid_32 = "s".repeat(32);
    let password_64 = "p".repeat(64);
    assert!(WifiCredentials::new(&ssid_32, &password_64).is_ok());
    assert!(matches!(
        WifiCredentials::new(&"s".repeat(33), "pw"),
        Err(Error::CredentialTooLong)
    ));
    assert!(matches!(
        WifiCredentials::new("ssid", &"p".repeat(65)),
        Err(Error::CredentialTooLong)
    ));
}
