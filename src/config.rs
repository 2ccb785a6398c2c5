//! Compile-time configuration
//!
//! Every tunable lives here as a constant: sysfs paths, the clock format,
//! the polling period and the status symbols. Edit and rebuild; there is no
//! config file and there are no command-line flags.

/// Power-supply source for the battery segment
pub mod battery {
    /// Sysfs directory holding `energy_full`, `energy_now` and `status`
    pub const SYSFS_DIR: &str = "/sys/class/power_supply/BAT0";
}

/// Network interfaces probed for the link segment, in priority order
pub mod net {
    /// Sysfs directories holding an `operstate` file; the first interface
    /// reporting `up` wins
    pub const SYSFS_DIRS: &[&str] = &["/sys/class/net/enp0s31f6", "/sys/class/net/wlp1s0"];
}

/// Clock segment formatting
pub mod clock {
    /// strftime-style pattern, 24-hour clock
    pub const DATE_FORMAT: &str = "%d/%m/%y %H:%M";
}

/// Polling loop timing
pub mod tick {
    use std::time::Duration;

    /// Pause between status updates; the true period drifts slightly above
    /// this because the queries themselves are not compensated for
    pub const PERIOD: Duration = Duration::from_secs(1);
}

/// Sysfs read limits
pub mod sysfs {
    /// Upper bound on a single sysfs line read, in bytes
    pub const LINE_MAX: u64 = 512;
}

/// Status symbols, one per device state
pub mod symbols {
    /// Built-in or external speakers
    pub const SPEAKERS: &str = "🔈";

    /// Wired headphones on the analog jack
    pub const JACK: &str = "➰";

    /// Bluetooth headset
    pub const BLUETOOTH: &str = "🎧";

    /// Sink is muted
    pub const MUTE: &str = "🔇";

    /// Running on battery
    pub const BATTERY: &str = "🔋";

    /// On mains power
    pub const AC: &str = "🔌";

    /// No interface is up
    pub const NO_NETWORK: &str = "🚫";

    /// Wireless LAN link
    pub const WLAN: &str = "📶";

    /// Mobile broadband link
    pub const WWAN: &str = "📡";

    /// Wired ethernet link
    pub const ETHERNET: &str = "🌍";

    /// State could not be determined
    pub const UNKNOWN: &str = "??";
}
