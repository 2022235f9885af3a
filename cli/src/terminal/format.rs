use std::time::Duration;

use colored::*;
use pingado_common::network::interface::NetworkInterface;
use pingado_common::network::range::{Ipv4Range, NetworkRange};
use pingado_common::network::report::PingStats;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

pub fn range_value(range: &NetworkRange) -> ColoredString {
    let address: ColoredString = range.network().to_string().color(colors::IPV4_ADDR);
    let prefix: ColoredString = range.prefix().to_string().color(colors::IPV4_PREFIX);
    format!("{address}/{prefix}").color(colors::SEPARATOR)
}

pub fn sweep_value(hosts: &Ipv4Range) -> ColoredString {
    let count: usize = hosts.len();
    let noun: &str = if count == 1 { "host" } else { "hosts" };
    format!(
        "{} - {} ({count} {noun})",
        hosts.start_addr.to_string().color(colors::IPV4_ADDR),
        hosts.end_addr.to_string().color(colors::IPV4_ADDR),
    )
    .color(colors::TEXT_DEFAULT)
}

pub fn interface_details(interface: &NetworkInterface) -> Vec<Detail> {
    vec![
        (
            interface.family.to_string(),
            interface.address.to_string().color(colors::IPV4_ADDR),
        ),
        (
            "Netmask".to_string(),
            interface.netmask.to_string().color(colors::NETMASK),
        ),
        ("Range".to_string(), range_value(&interface.network_range())),
    ]
}

pub fn latency(rtt: Option<Duration>) -> ColoredString {
    match rtt {
        Some(rtt) => format!("{:.3} ms", rtt.as_secs_f64() * 1_000.0).color(colors::ACCENT),
        None => "n/a".dimmed(),
    }
}

pub fn ping_details(stats: &PingStats) -> Vec<Detail> {
    let received: ColoredString = match stats.received {
        0 => stats.received.to_string().color(colors::LOST),
        _ => stats.received.to_string().color(colors::ALIVE),
    };
    let loss: ColoredString = match stats.lost() {
        0 => format!("{:.0}%", stats.loss_percent()).color(colors::ALIVE),
        _ => format!("{:.0}%", stats.loss_percent()).color(colors::LOST),
    };

    vec![
        ("Sent".to_string(), stats.sent.to_string().normal()),
        ("Received".to_string(), received),
        ("Loss".to_string(), loss),
        ("Min".to_string(), latency(stats.min)),
        ("Avg".to_string(), latency(stats.avg)),
        ("Max".to_string(), latency(stats.max)),
    ]
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
