//! # Subnet Sweeper
//!
//! Probes every host of a [`NetworkRange`] concurrently and folds the outcomes
//! into one [`ScanResult`].
//!
//! One tokio task is spawned per address into a [`JoinSet`]. A [`Semaphore`]
//! permit is taken *before* each spawn, so at most `concurrency` probes (and
//! child processes) exist at any moment. All outcomes are collected after the
//! join; tasks never touch shared result state.

use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use pingado_common::config::{Config, DEFAULT_CONCURRENCY, DEFAULT_PROBE_TIMEOUT, SweepScope};
use pingado_common::error::Result;
use pingado_common::network::range::{Ipv4Range, NetworkRange};
use pingado_common::network::report::{ProbeResult, ScanResult};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::prober::Prober;

/// Snapshot handed to the progress observer after every finished probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepProgress {
    pub completed: usize,
    pub total: usize,
    pub alive: usize,
}

pub type ProgressCallback = Arc<dyn Fn(SweepProgress) + Send + Sync>;

/// Shared flag that stops a running sweep from dispatching further probes.
///
/// Probes already in flight still finish and are reported.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

pub struct Sweeper {
    prober: Arc<dyn Prober>,
    probe_timeout: Duration,
    concurrency: usize,
    scope: SweepScope,
    cancel: CancelToken,
    on_progress: Option<ProgressCallback>,
}

impl Sweeper {
    pub fn new(prober: Arc<dyn Prober>) -> Self {
        Self {
            prober,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
            scope: SweepScope::default(),
            cancel: CancelToken::new(),
            on_progress: None,
        }
    }

    pub fn from_config(prober: Arc<dyn Prober>, cfg: &Config) -> Self {
        Self::new(prober)
            .with_timeout(cfg.probe_timeout)
            .with_concurrency(cfg.concurrency)
            .with_scope(cfg.scope)
    }

    /// Clamped to what a [`Semaphore`] can hold. A cap of zero would deadlock
    /// the dispatch loop, so it is raised to one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, Semaphore::MAX_PERMITS);
        self
    }

    pub fn with_timeout(mut self, probe_timeout: Duration) -> Self {
        self.probe_timeout = probe_timeout;
        self
    }

    pub fn with_scope(mut self, scope: SweepScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn on_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_progress = Some(callback);
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Parses `range` ("a.b.c.d/n") and sweeps it.
    pub async fn sweep_str(&self, range: &str) -> Result<ScanResult> {
        let range: NetworkRange = NetworkRange::from_str(range)?;
        self.sweep(&range).await
    }

    pub async fn sweep(&self, range: &NetworkRange) -> Result<ScanResult> {
        let hosts: Ipv4Range = range.sweep_range(self.scope)?;
        let total: usize = hosts.len();
        info!(
            "Sweeping {total} hosts of {range} ({} probes in flight max)",
            self.concurrency
        );

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let completed = Arc::new(AtomicUsize::new(0));
        let alive = Arc::new(AtomicUsize::new(0));
        let mut tasks: JoinSet<ProbeResult> = JoinSet::new();
        let mut cancelled: bool = false;

        let start: Instant = Instant::now();

        for addr in hosts.iter() {
            if self.cancel.is_cancelled() {
                cancelled = true;
                break;
            }

            let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
                break;
            };

            // the wait for a permit may have outlived a cancellation
            if self.cancel.is_cancelled() {
                cancelled = true;
                break;
            }

            let prober: Arc<dyn Prober> = Arc::clone(&self.prober);
            let completed: Arc<AtomicUsize> = Arc::clone(&completed);
            let alive: Arc<AtomicUsize> = Arc::clone(&alive);
            let on_progress: Option<ProgressCallback> = self.on_progress.clone();
            let timeout: Duration = self.probe_timeout;

            tasks.spawn(async move {
                let _permit = permit;
                let result: ProbeResult = prober.probe_once(addr, timeout).await;

                let alive_now: usize = if result.is_alive() {
                    debug!("{addr} is alive");
                    alive.fetch_add(1, Ordering::Relaxed) + 1
                } else {
                    alive.load(Ordering::Relaxed)
                };
                let done: usize = completed.fetch_add(1, Ordering::Relaxed) + 1;

                if let Some(callback) = on_progress {
                    callback(SweepProgress {
                        completed: done,
                        total,
                        alive: alive_now,
                    });
                }

                result
            });
        }

        let mut outcomes: Vec<ProbeResult> = Vec::with_capacity(total);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => outcomes.push(result),
                Err(e) => error!("Probe task failed: {e}"),
            }
        }

        let elapsed: Duration = start.elapsed();
        let result: ScanResult = aggregate(outcomes, elapsed, cancelled);

        if cancelled {
            info!(
                "Sweep of {range} cancelled after {} of {total} probes",
                result.probed
            );
        }
        info!(
            "Found {} live hosts in {range} ({}ms)",
            result.addresses.len(),
            result.elapsed_ms()
        );

        Ok(result)
    }
}

fn aggregate(outcomes: Vec<ProbeResult>, elapsed: Duration, cancelled: bool) -> ScanResult {
    let probed: usize = outcomes.len();
    let mut addresses: Vec<Ipv4Addr> = Vec::new();
    let mut setup_failures: Vec<Ipv4Addr> = Vec::new();
    let mut first_reason: Option<String> = None;

    for outcome in outcomes {
        match outcome {
            ProbeResult::Alive(addr) => addresses.push(addr),
            ProbeResult::Unreachable(_) => {}
            ProbeResult::SetupFailed { addr, reason } => {
                setup_failures.push(addr);
                first_reason.get_or_insert(reason);
            }
        }
    }

    addresses.sort_unstable();
    setup_failures.sort_unstable();

    if let Some(reason) = first_reason {
        warn!(
            "{} probes could not be sent: {reason}",
            setup_failures.len()
        );
    }

    ScanResult {
        addresses,
        elapsed,
        probed,
        setup_failures,
        cancelled,
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
