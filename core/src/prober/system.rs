//! [`Prober`] backed by the operating system's `ping` program.
//!
//! Running the system binary avoids raw sockets, so no elevated privileges are
//! needed. Every invocation is killed once its deadline passes.

use std::io;
use std::net::Ipv4Addr;
use std::process::{ExitStatus, Output, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use pingado_common::config::DEFAULT_PROBE_TIMEOUT;
use pingado_common::network::report::{PingReport, PingStats, ProbeCount, ProbeResult};
use tokio::process::Command;
use tracing::{debug, trace};

use super::Prober;
use super::command::{self, PING_PROGRAM, Platform};
use super::output;

/// Slack on top of the probe timeout for process start-up and teardown.
const GRACE: Duration = Duration::from_millis(500);
/// Default gap between two echoes of a detailed ping.
const ECHO_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct SystemPinger {
    platform: Platform,
    /// Per-echo wait used by detailed pings.
    reply_timeout: Duration,
}

impl Default for SystemPinger {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemPinger {
    pub fn new() -> Self {
        Self {
            platform: Platform::current(),
            reply_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_reply_timeout(mut self, reply_timeout: Duration) -> Self {
        self.reply_timeout = reply_timeout;
        self
    }

    async fn run(&self, args: &[String], deadline: Duration) -> RunOutcome {
        let child = Command::new(PING_PROGRAM)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        match tokio::time::timeout(deadline, child).await {
            Ok(Ok(output)) => RunOutcome::Finished(output),
            Ok(Err(e)) => RunOutcome::SpawnFailed(spawn_failure_reason(&e)),
            Err(_) => RunOutcome::TimedOut,
        }
    }
}

enum RunOutcome {
    Finished(Output),
    SpawnFailed(String),
    TimedOut,
}

#[async_trait]
impl Prober for SystemPinger {
    async fn probe_once(&self, addr: Ipv4Addr, timeout: Duration) -> ProbeResult {
        let args: Vec<String> = command::quick_args(self.platform, addr, timeout);

        let output: Output = match self.run(&args, timeout + GRACE).await {
            RunOutcome::Finished(output) => output,
            RunOutcome::TimedOut => {
                trace!("{addr} did not answer within {}ms", timeout.as_millis());
                return ProbeResult::Unreachable(addr);
            }
            RunOutcome::SpawnFailed(reason) => {
                return ProbeResult::SetupFailed { addr, reason };
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        classify_once(self.platform, addr, &output.status, &stdout, &stderr)
    }

    async fn probe_detailed(&self, addr: Ipv4Addr, count: ProbeCount) -> PingReport {
        let count: u32 = count.get();
        let args: Vec<String> = command::detailed_args(self.platform, addr, count, self.reply_timeout);
        let deadline: Duration = (ECHO_INTERVAL + self.reply_timeout) * count + GRACE;

        let output: Output = match self.run(&args, deadline).await {
            RunOutcome::Finished(output) => output,
            RunOutcome::TimedOut => {
                return PingReport::Failed {
                    target: addr,
                    count,
                    reason: format!("no result within {}s", deadline.as_secs()),
                };
            }
            RunOutcome::SpawnFailed(reason) => {
                return PingReport::Failed {
                    target: addr,
                    count,
                    reason,
                };
            }
        };

        let stdout: String = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr);
        detailed_report(addr, count, stdout, &stderr)
    }
}

/// Turns the output of a single-echo run into its outcome.
///
/// Only a clean exit counts as alive. Stderr is consulted to tell a probe
/// that could not be sent apart from a silent host.
fn classify_once(
    platform: Platform,
    addr: Ipv4Addr,
    status: &ExitStatus,
    stdout: &str,
    stderr: &str,
) -> ProbeResult {
    if is_alive(platform, status, stdout) {
        return ProbeResult::Alive(addr);
    }

    if output::is_setup_failure(stderr) {
        return ProbeResult::SetupFailed {
            addr,
            reason: stderr.trim().to_string(),
        };
    }

    ProbeResult::Unreachable(addr)
}

/// An explicit failure in the output wins over statistics; silence alone
/// still yields statistics with every echo lost.
fn detailed_report(addr: Ipv4Addr, count: u32, stdout: String, stderr: &str) -> PingReport {
    let rtts: Vec<Duration> = output::parse_rtts(&stdout);
    debug!("{addr}: {} of {count} echoes answered", rtts.len());

    match output::failure_reason(&stdout, stderr, rtts.len()) {
        Some(reason) => PingReport::Failed {
            target: addr,
            count,
            reason,
        },
        None => PingReport::Stats(PingStats::new(addr, count, rtts, stdout)),
    }
}

/// Windows `ping` exits 0 on "Destination host unreachable" replies, so a
/// successful exit alone is not enough there.
fn is_alive(platform: Platform, status: &ExitStatus, stdout: &str) -> bool {
    if !status.success() {
        return false;
    }
    match platform {
        Platform::Windows => !output::parse_rtts(stdout).is_empty(),
        Platform::Linux | Platform::MacOs => true,
    }
}

fn spawn_failure_reason(e: &io::Error) -> String {
    match e.kind() {
        io::ErrorKind::NotFound => format!("{PING_PROGRAM} executable not found in PATH"),
        io::ErrorKind::PermissionDenied => format!("not allowed to execute {PING_PROGRAM}"),
        _ => format!("failed to spawn {PING_PROGRAM}: {e}"),
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
