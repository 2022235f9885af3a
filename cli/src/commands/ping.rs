use anyhow::Context;
use colored::*;
use pingado_common::config::Config;
use pingado_common::network::report::{PingReport, PingStats};
use pingado_core::session::DiscoverySession;
use tracing::{Instrument, error, info_span};

use crate::mprint;
use crate::terminal::{format, print};

pub async fn ping(
    session: &DiscoverySession,
    address: &str,
    count: u32,
    raw: bool,
    cfg: &Config,
) -> anyhow::Result<()> {
    let span = info_span!("ping", indicatif.pb_show = true);
    let report: PingReport = session
        .ping(address, count)
        .instrument(span)
        .await
        .with_context(|| format!("cannot ping '{address}'"))?;

    match report {
        PingReport::Stats(stats) => print_stats(&stats, raw, cfg),
        PingReport::Failed { target, count, reason } => {
            error!("Ping of {target} ({count} echoes) failed: {reason}");
        }
    }
    Ok(())
}

fn print_stats(stats: &PingStats, raw: bool, cfg: &Config) {
    if cfg.quiet > 1 {
        mprint!("{} {}/{}", stats.target, stats.received, stats.sent);
        return;
    }

    print::header("ping statistics", cfg.quiet);
    print::tree(0, &stats.target.to_string(), &format::ping_details(stats));

    if raw && !stats.raw_output.is_empty() {
        print::header("raw output", cfg.quiet);
        for line in stats.raw_output.lines() {
            mprint!("{}", line.dimmed());
        }
    }
}
