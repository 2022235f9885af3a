//! # Probe and Scan Results
//!
//! Immutable values produced by the discovery engine:
//! * [`ProbeResult`]: the outcome of one lightweight probe.
//! * [`ScanResult`]: the aggregate of a whole sweep.
//! * [`PingReport`]: round-trip statistics for a single target.

use std::net::Ipv4Addr;
use std::time::Duration;

use crate::error::{DiscoveryError, Result};

/// Outcome of a single bounded-time reachability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    Alive(Ipv4Addr),
    /// Timed out or refused. Expected, not a fault.
    Unreachable(Ipv4Addr),
    /// The probe mechanism could not be invoked at all.
    SetupFailed { addr: Ipv4Addr, reason: String },
}

impl ProbeResult {
    pub fn addr(&self) -> Ipv4Addr {
        match self {
            ProbeResult::Alive(addr) | ProbeResult::Unreachable(addr) => *addr,
            ProbeResult::SetupFailed { addr, .. } => *addr,
        }
    }

    pub fn is_alive(&self) -> bool {
        matches!(self, ProbeResult::Alive(_))
    }
}

/// Live addresses found by one sweep, in ascending address order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub addresses: Vec<Ipv4Addr>,
    pub elapsed: Duration,
    /// Number of probes that were dispatched and resolved.
    pub probed: usize,
    /// Addresses whose probe could not be set up, ascending.
    pub setup_failures: Vec<Ipv4Addr>,
    /// Set when the caller abandoned the sweep before every address was dispatched.
    pub cancelled: bool,
}

impl ScanResult {
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

pub const MIN_PROBE_COUNT: u32 = 1;
pub const MAX_PROBE_COUNT: u32 = 10;
pub const DEFAULT_PROBE_COUNT: u32 = 4;

/// Number of echoes sent by a detailed ping, always within 1-10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ProbeCount(u32);

impl ProbeCount {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for ProbeCount {
    fn default() -> Self {
        Self(DEFAULT_PROBE_COUNT)
    }
}

impl TryFrom<u32> for ProbeCount {
    type Error = DiscoveryError;

    /// Out-of-range counts are rejected, never clamped.
    fn try_from(count: u32) -> Result<Self> {
        if (MIN_PROBE_COUNT..=MAX_PROBE_COUNT).contains(&count) {
            Ok(Self(count))
        } else {
            Err(DiscoveryError::InvalidProbeCount(count))
        }
    }
}

/// Round-trip statistics of a detailed ping.
#[derive(Debug, Clone, PartialEq)]
pub struct PingStats {
    pub target: Ipv4Addr,
    pub sent: u32,
    pub received: u32,
    pub rtts: Vec<Duration>,
    pub min: Option<Duration>,
    pub avg: Option<Duration>,
    pub max: Option<Duration>,
    /// Unmodified output of the probe mechanism.
    pub raw_output: String,
}

impl PingStats {
    /// Builds the statistics from the round-trip times of received replies.
    ///
    /// Replies beyond `sent` are ignored. With zero replies min/avg/max are `None`.
    pub fn new(target: Ipv4Addr, sent: u32, mut rtts: Vec<Duration>, raw_output: String) -> Self {
        rtts.truncate(sent as usize);
        let received: u32 = rtts.len() as u32;

        let min: Option<Duration> = rtts.iter().min().copied();
        let max: Option<Duration> = rtts.iter().max().copied();
        let avg: Option<Duration> = match received {
            0 => None,
            n => Some(rtts.iter().sum::<Duration>() / n),
        };

        Self {
            target,
            sent,
            received,
            rtts,
            min,
            avg,
            max,
            raw_output,
        }
    }

    pub fn lost(&self) -> u32 {
        self.sent.saturating_sub(self.received)
    }

    pub fn loss_percent(&self) -> f64 {
        if self.sent == 0 {
            return 0.0;
        }
        f64::from(self.lost()) * 100.0 / f64::from(self.sent)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PingReport {
    Stats(PingStats),
    /// The probe mechanism could not produce statistics.
    Failed {
        target: Ipv4Addr,
        count: u32,
        reason: String,
    },
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
