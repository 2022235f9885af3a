use std::fmt;
use std::net::Ipv4Addr;

use pnet::datalink::{self, NetworkInterface as DatalinkInterface};
use pnet::ipnetwork::IpNetwork;

#[cfg(target_os = "linux")]
use linux_impl::is_wired;
#[cfg(not(target_os = "linux"))]
use fallback_impl::is_wired;

use crate::network::range::NetworkRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    Ipv4,
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::Ipv4 => write!(f, "IPv4"),
        }
    }
}

/// Snapshot of one IPv4 address bound to an active interface.
///
/// An interface carrying several IPv4 addresses yields one entry per address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInterface {
    pub name: String,
    pub address: Ipv4Addr,
    pub netmask: Ipv4Addr,
    pub family: AddressFamily,
}

impl NetworkInterface {
    pub fn new(name: impl Into<String>, address: Ipv4Addr, netmask: Ipv4Addr) -> Self {
        Self {
            name: name.into(),
            address,
            netmask,
            family: AddressFamily::Ipv4,
        }
    }

    pub fn network_range(&self) -> NetworkRange {
        NetworkRange::from_mask(self.address, self.netmask)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ViabilityError {
    /// The interface is operationally down.
    IsDown,
    /// Loopback interfaces never lead to other hosts.
    IsLoopback,
    /// The interface has no IPv4 address to derive a range from.
    NoIpv4Address,
}

/// Enumerates every active, non-loopback IPv4 address of this machine.
pub fn list_interfaces() -> Vec<NetworkInterface> {
    from_datalink(&datalink::interfaces())
}

/// Flattens raw datalink interfaces into IPv4 snapshots, dropping unusable ones.
pub fn from_datalink(interfaces: &[DatalinkInterface]) -> Vec<NetworkInterface> {
    interfaces
        .iter()
        .filter(|interface| is_viable_interface(interface).is_ok())
        .flat_map(|interface| {
            interface.ips.iter().filter_map(|net| match net {
                IpNetwork::V4(v4) => Some(NetworkInterface::new(
                    interface.name.clone(),
                    v4.ip(),
                    v4.mask(),
                )),
                IpNetwork::V6(_) => None,
            })
        })
        .collect()
}

fn is_viable_interface(interface: &DatalinkInterface) -> Result<(), ViabilityError> {
    if !interface.is_up() {
        return Err(ViabilityError::IsDown);
    }
    if interface.is_loopback() {
        return Err(ViabilityError::IsLoopback);
    }
    if !interface.ips.iter().any(|net| net.is_ipv4()) {
        return Err(ViabilityError::NoIpv4Address);
    }
    Ok(())
}

pub fn find_by_name<'a>(
    interfaces: &'a [NetworkInterface],
    name: &str,
) -> Option<&'a NetworkInterface> {
    interfaces.iter().find(|interface| interface.name == name)
}

/// Picks the interface a scan should default to, preferring wired links.
pub fn preferred_interface(interfaces: &[NetworkInterface]) -> Option<&NetworkInterface> {
    select_best_interface(interfaces, |interface| is_wired(&interface.name))
}

fn select_best_interface(
    interfaces: &[NetworkInterface],
    is_wired: impl Fn(&NetworkInterface) -> bool,
) -> Option<&NetworkInterface> {
    match interfaces.len() {
        0 => None,
        1 => interfaces.first(),
        _ => interfaces
            .iter()
            .find(|&interface| is_wired(interface))
            .or(interfaces.first()),
    }
}

#[cfg(target_os = "linux")]
mod linux_impl {
    use std::path::Path;

    pub fn is_wired(name: &str) -> bool {
        let sysfs = Path::new("/sys/class/net").join(name);
        sysfs.join("device").exists() && !sysfs.join("wireless").exists()
    }
}

#[cfg(not(target_os = "linux"))]
mod fallback_impl {
    pub fn is_wired(name: &str) -> bool {
        // "eth0" on the BSDs, "Ethernet" on Windows
        name.to_ascii_lowercase().starts_with("eth")
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
