//! Per-OS construction of `ping` invocations.
//!
//! The flag sets differ per platform:
//! * **Linux** (iputils): `-c` count, `-W` reply timeout in whole seconds.
//! * **macOS / BSD**: `-c` count, `-W` reply timeout in milliseconds.
//! * **Windows**: `-n` count, `-w` reply timeout in milliseconds.

use std::net::Ipv4Addr;
use std::time::Duration;

pub const PING_PROGRAM: &str = "ping";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(any(
            target_os = "macos",
            target_os = "ios",
            target_os = "freebsd",
            target_os = "openbsd",
            target_os = "netbsd",
        )) {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }
}

/// Arguments for a single echo bounded by `timeout`.
pub fn quick_args(platform: Platform, addr: Ipv4Addr, timeout: Duration) -> Vec<String> {
    build_args(platform, addr, 1, timeout)
}

/// Arguments for `count` echoes, each waiting at most `reply_timeout`.
pub fn detailed_args(
    platform: Platform,
    addr: Ipv4Addr,
    count: u32,
    reply_timeout: Duration,
) -> Vec<String> {
    build_args(platform, addr, count, reply_timeout)
}

fn build_args(platform: Platform, addr: Ipv4Addr, count: u32, timeout: Duration) -> Vec<String> {
    let count: String = count.to_string();
    let target: String = addr.to_string();

    match platform {
        Platform::Linux => vec![
            "-n".into(),
            "-c".into(),
            count,
            "-W".into(),
            whole_seconds(timeout).to_string(),
            target,
        ],
        Platform::MacOs => vec![
            "-n".into(),
            "-c".into(),
            count,
            "-W".into(),
            millis(timeout).to_string(),
            target,
        ],
        Platform::Windows => vec![
            "-n".into(),
            count,
            "-w".into(),
            millis(timeout).to_string(),
            target,
        ],
    }
}

// iputils rounds -W down, so anything under a second must become 1
fn whole_seconds(timeout: Duration) -> u64 {
    timeout.as_millis().div_ceil(1_000).max(1) as u64
}

fn millis(timeout: Duration) -> u128 {
    timeout.as_millis().max(1)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
