//! The central **abstraction** for reachability probing.
//!
//! A [`Prober`] answers two questions about one IPv4 address: is it alive right
//! now, and what do its round trips look like over several echoes.
//!
//! **Architectural Note:**
//! The sweeper and the session only ever talk to this trait. The platform
//! specifics (which program to run, which flags each OS expects, how to read
//! its output) stay inside [`system`], so the engine itself can be driven by a
//! fake backend in tests.

use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;
use pingado_common::network::report::{PingReport, ProbeCount, ProbeResult};

pub mod command;
pub mod output;
pub mod system;

pub use system::SystemPinger;

#[async_trait]
pub trait Prober: Send + Sync {
    /// Sends exactly one echo to `addr` and gives up after `timeout`.
    ///
    /// Silence or refusal is reported as [`ProbeResult::Unreachable`]. Only a
    /// probe that could not be sent at all is [`ProbeResult::SetupFailed`].
    async fn probe_once(&self, addr: Ipv4Addr, timeout: Duration) -> ProbeResult;

    /// Sends `count` echoes to `addr` and reports their round-trip statistics.
    ///
    /// Any mix of answered and lost echoes is a valid report.
    async fn probe_detailed(&self, addr: Ipv4Addr, count: ProbeCount) -> PingReport;
}
