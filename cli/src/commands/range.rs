use anyhow::Context;
use colored::*;
use pingado_common::config::Config;
use pingado_common::network::range::{Ipv4Range, NetworkRange};
use pingado_core::session::DiscoverySession;

use crate::mprint;
use crate::terminal::{colors, format, print};

pub fn range(session: &DiscoverySession, address: &str, netmask: &str, cfg: &Config) -> anyhow::Result<()> {
    let range: NetworkRange = session
        .compute_range(address, netmask)
        .context("failed to compute the network range")?;

    if cfg.quiet > 1 {
        mprint!("{range}");
        return Ok(());
    }

    let hosts: Ipv4Range = range
        .sweep_range(cfg.scope)
        .with_context(|| format!("cannot sweep {range}"))?;

    print::header("network range", cfg.quiet);
    print::set_key_width(["Address", "Netmask", "Range", "Sweep"]);
    print::aligned_line("Address", address.color(colors::IPV4_ADDR));
    print::aligned_line("Netmask", netmask.color(colors::NETMASK));
    print::aligned_line("Range", format::range_value(&range));
    print::aligned_line("Sweep", format::sweep_value(&hosts));
    Ok(())
}
