//! Stand-ins for the network so the session can be driven end to end.

use std::collections::{HashMap, HashSet};
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use pingado_common::network::interface::NetworkInterface;
use pingado_common::network::report::{PingReport, PingStats, ProbeCount, ProbeResult};
use pingado_core::prober::Prober;
use pingado_core::session::InterfaceSource;
use rand::Rng;

pub struct StaticInterfaces(pub Vec<NetworkInterface>);

impl InterfaceSource for StaticInterfaces {
    fn interfaces(&self) -> Vec<NetworkInterface> {
        self.0.clone()
    }
}

/// A simulated LAN: a set of live hosts, each answering after its own delay.
#[derive(Default)]
pub struct SimulatedLan {
    pub live: HashSet<Ipv4Addr>,
    pub delays: HashMap<Ipv4Addr, Duration>,
    /// Echo round trips of live hosts, cycled per echo. `None` loses the echo.
    pub echoes: Vec<Option<Duration>>,
    pub in_flight: AtomicUsize,
    pub peak: AtomicUsize,
    pub probes: AtomicUsize,
}

impl SimulatedLan {
    pub fn new(live: impl IntoIterator<Item = Ipv4Addr>) -> Self {
        Self {
            live: live.into_iter().collect(),
            echoes: vec![Some(Duration::from_millis(1))],
            ..Default::default()
        }
    }

    /// Gives every address of `a.b.c.1-254` a random answer delay below `max_ms`.
    pub fn with_random_delays(mut self, prefix: [u8; 3], max_ms: u64) -> Self {
        let mut rng = rand::rng();
        for last in 1..=254u8 {
            let addr = Ipv4Addr::new(prefix[0], prefix[1], prefix[2], last);
            self.delays
                .insert(addr, Duration::from_millis(rng.random_range(0..max_ms)));
        }
        self
    }

    pub fn with_echoes(mut self, echoes: Vec<Option<Duration>>) -> Self {
        self.echoes = echoes;
        self
    }
}

#[async_trait]
impl Prober for SimulatedLan {
    async fn probe_once(&self, addr: Ipv4Addr, timeout: Duration) -> ProbeResult {
        self.probes.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let delay = self.delays.get(&addr).copied().unwrap_or_default();
        tokio::time::sleep(delay.min(timeout)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.live.contains(&addr) && delay < timeout {
            ProbeResult::Alive(addr)
        } else {
            ProbeResult::Unreachable(addr)
        }
    }

    async fn probe_detailed(&self, addr: Ipv4Addr, count: ProbeCount) -> PingReport {
        let sent = count.get();
        let rtts: Vec<Duration> = if self.live.contains(&addr) && !self.echoes.is_empty() {
            self.echoes
                .iter()
                .cycle()
                .take(sent as usize)
                .flatten()
                .copied()
                .collect()
        } else {
            Vec::new()
        };
        PingReport::Stats(PingStats::new(addr, sent, rtts, String::new()))
    }
}
