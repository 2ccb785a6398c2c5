#![forbid(unsafe_code)]

mod audio;
mod config;
mod display;
mod status;
mod sysfs;

use std::env;
use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use anyhow::{Context, Result};
use chrono::Local;
use signal_hook::consts::SIGINT;
use tracing::{Level as TraceLevel, debug, info};
use tracing_subscriber::FmtSubscriber;

use audio::{AudioClient, MuteState};
use display::StatusDisplay;

/// Volume segment for the server's default sink.
///
/// Each query degrades on its own: a cancelled sink lookup renders the
/// placeholder token, a cancelled sub-query only blanks its own field. The
/// segment is always present so the line never changes shape.
fn volume_segment(audio: &mut AudioClient) -> String {
    let Some(sink) = audio.default_sink_name() else {
        debug!("default sink lookup failed, showing placeholder volume");
        return status::volume_token("", 0, MuteState::Invalid);
    };
    let port = audio.active_port_name(&sink).unwrap_or_default();
    let volume = audio.volume_percent(&sink);
    let mute = audio.mute_state(&sink);

    status::volume_token(&port, volume, mute)
}

/// Battery segment from one power-supply sysfs directory.
fn battery_segment(supply: &Path) -> String {
    let full = sysfs::read_u64(supply, "energy_full");
    let now = sysfs::read_u64(supply, "energy_now");
    let state = sysfs::read_line(supply, "status");

    status::battery_token(full, now, &state)
}

/// Link segment for the first configured interface whose `operstate` is up.
fn network_segment<P: AsRef<Path>>(interfaces: &[P]) -> &'static str {
    let up = interfaces
        .iter()
        .map(|dir| dir.as_ref())
        .find(|dir| sysfs::read_line(dir, "operstate") == "up");
    let name = up.and_then(Path::file_name).and_then(OsStr::to_str);

    status::network_token(name)
}

fn main() -> Result<()> {
    // Parse log level from environment variable
    let log_level = match env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // The handler stores one atomic; the loop head is the only reader.
    let interrupted = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(SIGINT, Arc::clone(&interrupted))
        .context("Failed to install the SIGINT handler")?;

    let display = StatusDisplay::open()?;
    let mut audio = AudioClient::connect()?;
    info!(
        battery = config::battery::SYSFS_DIR,
        interfaces = config::net::SYSFS_DIRS.len(),
        "status loop running"
    );

    while !interrupted.load(Ordering::Relaxed) {
        let volume = volume_segment(&mut audio);
        let battery = battery_segment(Path::new(config::battery::SYSFS_DIR));
        let network = network_segment(config::net::SYSFS_DIRS);
        let clock = status::clock_token(&Local::now());

        let line = [volume.as_str(), battery.as_str(), network, clock.as_str()].join(" ");
        debug!(status = %line, "publishing");
        display.publish(&line)?;

        thread::sleep(config::tick::PERIOD);
    }

    info!("interrupt received, shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_battery_segment_reads_sysfs_fixture() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("energy_full"), "100\n").unwrap();
        fs::write(dir.path().join("energy_now"), "42\n").unwrap();
        fs::write(dir.path().join("status"), "Discharging\n").unwrap();

        assert_eq!(battery_segment(dir.path()), format!("{}42%", config::symbols::BATTERY));
    }

    #[test]
    fn test_battery_segment_missing_directory_degrades() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("BAT9");

        // Unreadable files mean zero energy readings and an unknown status
        assert_eq!(battery_segment(&missing), format!("{}0%", config::symbols::UNKNOWN));
    }

    #[test]
    fn test_network_segment_first_up_interface_wins() {
        let root = TempDir::new().unwrap();
        let eth = root.path().join("enp0s31f6");
        let wlan = root.path().join("wlp1s0");
        fs::create_dir(&eth).unwrap();
        fs::create_dir(&wlan).unwrap();
        fs::write(eth.join("operstate"), "down\n").unwrap();
        fs::write(wlan.join("operstate"), "up\n").unwrap();

        assert_eq!(network_segment(&[&eth, &wlan]), config::symbols::WLAN);

        fs::write(eth.join("operstate"), "up\n").unwrap();
        assert_eq!(network_segment(&[&eth, &wlan]), config::symbols::ETHERNET);
    }

    #[test]
    fn test_network_segment_nothing_up() {
        let root = TempDir::new().unwrap();
        let eth = root.path().join("enp0s31f6");
        fs::create_dir(&eth).unwrap();
        fs::write(eth.join("operstate"), "down\n").unwrap();
        let missing = root.path().join("wlp1s0");

        assert_eq!(network_segment(&[&eth, &missing]), config::symbols::NO_NETWORK);
    }

    #[test]
    fn test_interrupt_flag_set_by_raised_signal() {
        let flag = Arc::new(AtomicBool::new(false));
        let registration =
            signal_hook::flag::register(signal_hook::consts::SIGUSR1, Arc::clone(&flag)).unwrap();

        // raise delivers to the calling thread before returning
        signal_hook::low_level::raise(signal_hook::consts::SIGUSR1).unwrap();

        assert!(flag.load(Ordering::Relaxed));
        signal_hook::low_level::unregister(registration);
    }
}
