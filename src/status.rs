//! Pure formatting of sensor readings into status segments.
//!
//! Nothing here performs I/O; every function maps already-fetched values to
//! a short token of icon plus text. Degraded inputs (sentinel strings, zero
//! readings, failed queries) still produce a plausible token.

use chrono::{DateTime, TimeZone};

use crate::audio::MuteState;
use crate::config::{clock, symbols};

/// Battery segment from the raw `energy_full`/`energy_now`/`status` values.
///
/// The icon follows the kernel status string exactly: `Charging` and
/// `Not charging` (plugged in but topped up) show mains power,
/// `Discharging` shows the battery, anything else is unknown.
pub fn battery_token(energy_full: u64, energy_now: u64, status: &str) -> String {
    let symbol = match status {
        "Charging" | "Not charging" => symbols::AC,
        "Discharging" => symbols::BATTERY,
        _ => symbols::UNKNOWN,
    };
    let percent = if energy_full == 0 {
        0
    } else {
        100 * energy_now / energy_full
    };

    format!("{symbol}{percent}%")
}

/// Volume segment for the default sink.
///
/// Mute wins over everything; otherwise the icon comes from a case-sensitive
/// substring match on the active port name, checked in fixed order. A failed
/// mute query ([`MuteState::Invalid`]) does not claim the mute icon and
/// falls through to the port rules.
pub fn volume_token(port_name: &str, volume_percent: u32, mute: MuteState) -> String {
    let symbol = if mute == MuteState::Muted {
        symbols::MUTE
    } else if port_name.contains("headphones") {
        symbols::JACK
    } else if port_name.contains("speaker") {
        symbols::SPEAKERS
    } else if port_name.contains("headset") {
        symbols::BLUETOOTH
    } else {
        symbols::UNKNOWN
    };

    format!("{symbol}{volume_percent}%")
}

/// Clock segment in the compile-time [`clock::DATE_FORMAT`] pattern.
pub fn clock_token<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format(clock::DATE_FORMAT).to_string()
}

/// Link symbol for the first interface that is up, or the no-network symbol
/// when none is.
///
/// Interface class is taken from the kernel's predictable naming scheme:
/// `en*`/`eth*` wired, `wl*` wireless LAN, `ww*` mobile broadband.
pub fn network_token(up_interface: Option<&str>) -> &'static str {
    match up_interface {
        Some(name) if name.starts_with("en") || name.starts_with("eth") => symbols::ETHERNET,
        Some(name) if name.starts_with("wl") => symbols::WLAN,
        Some(name) if name.starts_with("ww") => symbols::WWAN,
        Some(_) => symbols::UNKNOWN,
        None => symbols::NO_NETWORK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_battery_token_floors_percentage() {
        assert_eq!(battery_token(100, 42, "Discharging"), format!("{}42%", symbols::BATTERY));
        // 1/3 floors to 33, never rounds up
        assert_eq!(battery_token(3, 1, "Discharging"), format!("{}33%", symbols::BATTERY));
        assert_eq!(battery_token(3, 2, "Discharging"), format!("{}66%", symbols::BATTERY));
    }

    #[test]
    fn test_battery_token_zero_capacity_guard() {
        assert_eq!(battery_token(0, 42, "Discharging"), format!("{}0%", symbols::BATTERY));
        assert_eq!(battery_token(0, 0, ""), format!("{}0%", symbols::UNKNOWN));
    }

    #[test]
    fn test_battery_token_full_range() {
        assert_eq!(battery_token(100, 0, "Discharging"), format!("{}0%", symbols::BATTERY));
        assert_eq!(battery_token(100, 100, "Charging"), format!("{}100%", symbols::AC));
    }

    #[test]
    fn test_battery_token_icon_follows_status_string() {
        assert!(battery_token(100, 50, "Charging").starts_with(symbols::AC));
        assert!(battery_token(100, 50, "Not charging").starts_with(symbols::AC));
        assert!(battery_token(100, 50, "Discharging").starts_with(symbols::BATTERY));
        // "Full" is a real kernel status but has no mapping of its own
        assert!(battery_token(100, 50, "Full").starts_with(symbols::UNKNOWN));
        assert!(battery_token(100, 50, "").starts_with(symbols::UNKNOWN));
        assert!(battery_token(100, 50, "Can't open status").starts_with(symbols::UNKNOWN));
    }

    #[test]
    fn test_battery_token_status_match_is_exact() {
        assert!(battery_token(100, 50, "charging").starts_with(symbols::UNKNOWN));
        assert!(battery_token(100, 50, "Discharging ").starts_with(symbols::UNKNOWN));
    }

    #[test]
    fn test_volume_token_port_substring_rules() {
        let t = |port| volume_token(port, 40, MuteState::Unmuted);
        assert_eq!(t("analog-output-headphones"), format!("{}40%", symbols::JACK));
        assert_eq!(t("analog-output-speaker"), format!("{}40%", symbols::SPEAKERS));
        assert_eq!(t("headset-output"), format!("{}40%", symbols::BLUETOOTH));
        assert_eq!(t("hdmi-output-1"), format!("{}40%", symbols::UNKNOWN));
    }

    #[test]
    fn test_volume_token_mute_beats_port_rules() {
        let token = volume_token("analog-output-headphones", 40, MuteState::Muted);
        assert_eq!(token, format!("{}40%", symbols::MUTE));
    }

    #[test]
    fn test_volume_token_invalid_mute_does_not_claim_mute_icon() {
        let token = volume_token("analog-output-speaker", 40, MuteState::Invalid);
        assert_eq!(token, format!("{}40%", symbols::SPEAKERS));
    }

    #[test]
    fn test_volume_token_headphones_checked_before_speaker() {
        let token = volume_token("headphones-and-speaker", 40, MuteState::Unmuted);
        assert!(token.starts_with(symbols::JACK));
    }

    #[test]
    fn test_volume_token_match_is_case_sensitive() {
        let token = volume_token("Analog-Output-HEADPHONES", 40, MuteState::Unmuted);
        assert!(token.starts_with(symbols::UNKNOWN));
    }

    #[test]
    fn test_volume_token_degraded_inputs() {
        assert_eq!(volume_token("", 0, MuteState::Invalid), format!("{}0%", symbols::UNKNOWN));
        assert_eq!(volume_token("error", 0, MuteState::Invalid), format!("{}0%", symbols::UNKNOWN));
    }

    #[test]
    fn test_clock_token_default_pattern() {
        let when = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 59).unwrap();
        assert_eq!(clock_token(&when), "09/03/24 14:05");
    }

    #[test]
    fn test_network_token_interface_classes() {
        assert_eq!(network_token(Some("enp0s31f6")), symbols::ETHERNET);
        assert_eq!(network_token(Some("eth0")), symbols::ETHERNET);
        assert_eq!(network_token(Some("wlp1s0")), symbols::WLAN);
        assert_eq!(network_token(Some("wwan0")), symbols::WWAN);
        assert_eq!(network_token(Some("tun0")), symbols::UNKNOWN);
        assert_eq!(network_token(None), symbols::NO_NETWORK);
    }
}
