use colored::*;
use pingado_common::config::Config;
use pingado_common::network::interface::{self, NetworkInterface};
use pingado_core::session::DiscoverySession;

use crate::mprint;
use crate::terminal::{format, print};

pub fn interfaces(session: &DiscoverySession, cfg: &Config) {
    let interfaces: Vec<NetworkInterface> = session.list_interfaces();

    if interfaces.is_empty() {
        print::header("no usable interfaces", cfg.quiet);
        print::no_results("no active IPv4 interface found");
        return;
    }

    print::header("network interfaces", cfg.quiet);
    let preferred: Option<&NetworkInterface> = interface::preferred_interface(&interfaces);

    for (idx, interface) in interfaces.iter().enumerate() {
        if cfg.quiet > 1 {
            mprint!("{} {}", interface.name, interface.network_range());
            continue;
        }

        let name: String = match preferred {
            Some(best) if best == interface => format!("{} {}", interface.name, "(default)".dimmed()),
            _ => interface.name.clone(),
        };
        print::tree(idx, &name, &format::interface_details(interface));

        if idx + 1 != interfaces.len() {
            mprint!();
        }
    }
}
