use std::net::Ipv4Addr;
use std::sync::Arc;

use anyhow::{Context, bail};
use colored::*;
use pingado_common::config::Config;
use pingado_common::network::interface::{self, NetworkInterface};
use pingado_common::network::range::NetworkRange;
use pingado_common::network::report::ScanResult;
use pingado_core::session::DiscoverySession;
use pingado_core::sweeper::{CancelToken, SweepProgress};
use tracing::{Instrument, info_span, warn};

use crate::mprint;
use crate::terminal::input::InputHandle;
use crate::terminal::{colors, print, spinner};

#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanTarget {
    Interface(NetworkInterface),
    Range(NetworkRange),
}

pub async fn scan(target: Option<String>, cfg: &Config) -> anyhow::Result<()> {
    let span = info_span!("sweep", indicatif.pb_show = true);
    let progress_span = span.clone();

    let session = DiscoverySession::system(cfg).with_progress(Arc::new(move |progress: SweepProgress| {
        spinner::report_sweep_progress(&progress_span, progress);
    }));

    let interfaces: Vec<NetworkInterface> = session.list_interfaces();
    let target: ScanTarget = resolve_target(target.as_deref(), &interfaces)?;
    let local_ip: Option<Ipv4Addr> = local_address(&target, &interfaces);

    let cancel: CancelToken = session.cancel_token();
    let ctrl_c = tokio::spawn(cancel_on_ctrl_c(cancel.clone()));
    let input = InputHandle::start(cancel);

    let sweep = async {
        match &target {
            ScanTarget::Interface(interface) => session.scan_interface(interface).await,
            ScanTarget::Range(range) => session.scan(&range.to_string()).await,
        }
    };
    let result = sweep.instrument(span).await;

    drop(input);
    ctrl_c.abort();

    let result: ScanResult = result.context("scan failed")?;
    scan_ends(&result, interfaces.len(), local_ip, cfg);
    Ok(())
}

fn resolve_target(target: Option<&str>, interfaces: &[NetworkInterface]) -> anyhow::Result<ScanTarget> {
    match target {
        None => interface::preferred_interface(interfaces)
            .cloned()
            .map(ScanTarget::Interface)
            .context("no active IPv4 interface to scan, pass a range instead"),
        Some(range) if range.contains('/') => range
            .parse::<NetworkRange>()
            .map(ScanTarget::Range)
            .with_context(|| format!("'{range}' is not a valid target")),
        Some(name) => match interface::find_by_name(interfaces, name) {
            Some(interface) => Ok(ScanTarget::Interface(interface.clone())),
            None => bail!("no active IPv4 interface named '{name}'"),
        },
    }
}

/// The address this machine holds inside the swept network, if any.
fn local_address(target: &ScanTarget, interfaces: &[NetworkInterface]) -> Option<Ipv4Addr> {
    match target {
        ScanTarget::Interface(interface) => Some(interface.address),
        ScanTarget::Range(range) => interfaces
            .iter()
            .find(|interface| interface.network_range().network() == range.network())
            .map(|interface| interface.address),
    }
}

async fn cancel_on_ctrl_c(cancel: CancelToken) {
    if tokio::signal::ctrl_c().await.is_ok() {
        cancel.cancel();
    }
}

fn scan_ends(result: &ScanResult, interface_count: usize, local_ip: Option<Ipv4Addr>, cfg: &Config) {
    if result.cancelled {
        warn!("Scan stopped early, {} addresses were probed", result.probed);
    }

    if result.is_empty() {
        print::header("zero hosts detected", cfg.quiet);
        print::no_results("no host answered the sweep");
    } else {
        print::header("live hosts", cfg.quiet);
        print_hosts(result, local_ip, cfg);
    }

    print_statistics(result, interface_count, local_ip, cfg);
}

fn print_hosts(result: &ScanResult, local_ip: Option<Ipv4Addr>, cfg: &Config) {
    for (idx, addr) in result.addresses.iter().enumerate() {
        if cfg.quiet > 1 {
            mprint!("{addr}");
            continue;
        }

        let marker: ColoredString = if Some(*addr) == local_ip {
            " (this device)".dimmed()
        } else {
            "".normal()
        };
        let idx_str: String = format!("[{}]", idx.to_string().color(colors::ACCENT));
        mprint!(
            "{} {}{}",
            idx_str.color(colors::SEPARATOR),
            addr.to_string().color(colors::IPV4_ADDR),
            marker
        );
    }
}

fn print_statistics(result: &ScanResult, interface_count: usize, local_ip: Option<Ipv4Addr>, cfg: &Config) {
    if cfg.quiet > 1 {
        return;
    }

    let active_hosts: ColoredString = format!("{} active hosts", result.addresses.len()).bold().green();
    let total_time: ColoredString = format!("{:.1}s", result.elapsed.as_secs_f64()).bold().yellow();

    if cfg.quiet == 1 {
        mprint!();
        mprint!("Scan complete: {active_hosts} found in {total_time}");
        return;
    }

    print::header("network statistics", cfg.quiet);
    print::set_key_width(["Active hosts", "Interfaces", "Scan time", "Local IP", "Unsendable"]);
    print::aligned_line("Active hosts", active_hosts);
    print::aligned_line("Interfaces", interface_count.to_string().color(colors::TEXT_DEFAULT));
    print::aligned_line("Scan time", total_time);
    print::aligned_line(
        "Local IP",
        local_ip.map_or_else(|| "N/A".dimmed(), |ip| ip.to_string().color(colors::IPV4_ADDR)),
    );
    if !result.setup_failures.is_empty() {
        print::aligned_line(
            "Unsendable",
            format!("{} probes", result.setup_failures.len()).red(),
        );
    }
    print::closing_rule();
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
