//! # Discovery Session
//!
//! The surface front ends talk to. A session holds no results between calls:
//! every interface listing is read fresh and every scan starts from nothing.
//!
//! Both side effects, probing and interface enumeration, are injected so the
//! session can be exercised without a network.

use std::net::Ipv4Addr;
use std::sync::Arc;

use pingado_common::config::Config;
use pingado_common::error::Result;
use pingado_common::network::interface::{self, NetworkInterface};
use pingado_common::network::range::{self, NetworkRange};
use pingado_common::network::report::{PingReport, ProbeCount, ScanResult};
use tracing::debug;

use crate::prober::{Prober, SystemPinger};
use crate::sweeper::{CancelToken, ProgressCallback, Sweeper};

/// Where the session reads the host's interfaces from.
pub trait InterfaceSource: Send + Sync {
    fn interfaces(&self) -> Vec<NetworkInterface>;
}

pub struct SystemInterfaces;

impl InterfaceSource for SystemInterfaces {
    fn interfaces(&self) -> Vec<NetworkInterface> {
        interface::list_interfaces()
    }
}

pub struct DiscoverySession {
    prober: Arc<dyn Prober>,
    interfaces: Arc<dyn InterfaceSource>,
    cfg: Config,
    cancel: CancelToken,
    on_progress: Option<ProgressCallback>,
}

impl DiscoverySession {
    pub fn new(prober: Arc<dyn Prober>, interfaces: Arc<dyn InterfaceSource>, cfg: &Config) -> Self {
        Self {
            prober,
            interfaces,
            cfg: cfg.clone(),
            cancel: CancelToken::new(),
            on_progress: None,
        }
    }

    /// A session probing through the system `ping` and reading real interfaces.
    pub fn system(cfg: &Config) -> Self {
        let pinger = SystemPinger::new().with_reply_timeout(cfg.probe_timeout);
        Self::new(Arc::new(pinger), Arc::new(SystemInterfaces), cfg)
    }

    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_progress = Some(callback);
        self
    }

    /// Handle that cancels the running scan. Cancelling it also makes every
    /// later scan of this session return immediately.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Active, non-loopback IPv4 interfaces, read anew on every call.
    pub fn list_interfaces(&self) -> Vec<NetworkInterface> {
        let interfaces: Vec<NetworkInterface> = self.interfaces.interfaces();
        debug!("Found {} usable interfaces", interfaces.len());
        interfaces
    }

    /// The interface a scan without explicit target should use.
    pub fn preferred_interface(&self) -> Option<NetworkInterface> {
        let interfaces: Vec<NetworkInterface> = self.list_interfaces();
        interface::preferred_interface(&interfaces).cloned()
    }

    pub fn compute_range(&self, address: &str, netmask: &str) -> Result<NetworkRange> {
        range::compute_network_range(address, netmask)
    }

    /// Sweeps a range given as `"a.b.c.d/n"`.
    pub async fn scan(&self, range: &str) -> Result<ScanResult> {
        self.sweeper().sweep_str(range).await
    }

    pub async fn scan_interface(&self, interface: &NetworkInterface) -> Result<ScanResult> {
        self.sweeper().sweep(&interface.network_range()).await
    }

    /// Sends `count` (1-10) echoes to `address`.
    ///
    /// Malformed input is an error. An unreachable target is not: it comes
    /// back as [`PingReport::Failed`] or as statistics with every echo lost.
    pub async fn ping(&self, address: &str, count: u32) -> Result<PingReport> {
        let target: Ipv4Addr = range::parse_ipv4(address)?;
        let count: ProbeCount = ProbeCount::try_from(count)?;
        debug!("Pinging {target} {} times", count.get());
        Ok(self.prober.probe_detailed(target, count).await)
    }

    fn sweeper(&self) -> Sweeper {
        let sweeper =
            Sweeper::from_config(Arc::clone(&self.prober), &self.cfg).with_cancel_token(self.cancel.clone());

        match &self.on_progress {
            Some(callback) => sweeper.on_progress(Arc::clone(callback)),
            None => sweeper,
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
