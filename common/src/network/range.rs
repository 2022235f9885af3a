//! # Network Range Model
//!
//! Address math for IPv4 subnets.
//!
//! Converts an interface's address and netmask into a [`NetworkRange`]
//! (`"a.b.c.d/n"`) and expands that range into the [`Ipv4Range`] of host
//! addresses a sweep should probe.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;
use tracing::warn;

use crate::config::SweepScope;
use crate::error::{DiscoveryError, Result};

const MAX_PREFIX: u8 = 32;
const SMALLEST_SWEEPABLE_PREFIX: u8 = 16;

/// A continuous range of IPv4 addresses, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Ipv4Addr> + Clone {
        let start: u32 = u32::from(self.start_addr);
        let end: u32 = u32::from(self.end_addr);
        (start..=end).map(Ipv4Addr::from)
    }

    pub fn len(&self) -> usize {
        let start: u32 = u32::from(self.start_addr);
        let end: u32 = u32::from(self.end_addr);
        if start > end {
            0
        } else {
            (end - start) as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A network address plus its CIDR prefix length.
///
/// Renders canonically as `"a.b.c.d/n"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkRange {
    network: Ipv4Addr,
    prefix: u8,
}

impl NetworkRange {
    pub fn new(network: Ipv4Addr, prefix: u8) -> Result<Self> {
        if prefix > MAX_PREFIX {
            return Err(DiscoveryError::InvalidRangeFormat(format!(
                "{network}/{prefix}"
            )));
        }
        Ok(Self { network, prefix })
    }

    /// Builds the range of `address` under `mask`, octet by octet.
    pub fn from_mask(address: Ipv4Addr, mask: Ipv4Addr) -> Self {
        Self {
            network: network_address(address, mask),
            prefix: prefix_len(mask),
        }
    }

    pub fn network(&self) -> Ipv4Addr {
        self.network
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Returns the host addresses a sweep over this range covers.
    ///
    /// With [`SweepScope::Fixed24`] this is always `.1`-`.254` of the /24 built
    /// from the first three octets, even when the prefix describes a larger or
    /// smaller block. A `/16` is therefore never swept in full unless
    /// [`SweepScope::Block`] is requested.
    pub fn sweep_range(&self, scope: SweepScope) -> Result<Ipv4Range> {
        match scope {
            SweepScope::Fixed24 => Ok(self.fixed_block()),
            SweepScope::Block => self.usable_block(),
        }
    }

    fn fixed_block(&self) -> Ipv4Range {
        let [a, b, c, _] = self.network.octets();
        Ipv4Range::new(Ipv4Addr::new(a, b, c, 1), Ipv4Addr::new(a, b, c, 254))
    }

    fn usable_block(&self) -> Result<Ipv4Range> {
        if self.prefix < SMALLEST_SWEEPABLE_PREFIX {
            return Err(DiscoveryError::BlockTooLarge(self.prefix));
        }
        let net = Ipv4Network::new(self.network, self.prefix)
            .map_err(|_| DiscoveryError::InvalidRangeFormat(self.to_string()))?;
        let net_u32: u32 = u32::from(net.network());
        let broadcast_u32: u32 = u32::from(net.broadcast());

        // /31 and /32 have no network or broadcast address to strip
        if self.prefix >= MAX_PREFIX - 1 {
            return Ok(Ipv4Range::new(net.network(), net.broadcast()));
        }

        Ok(Ipv4Range::new(
            Ipv4Addr::from(net_u32.saturating_add(1)),
            Ipv4Addr::from(broadcast_u32.saturating_sub(1)),
        ))
    }
}

impl fmt::Display for NetworkRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix)
    }
}

impl FromStr for NetworkRange {
    type Err = DiscoveryError;

    /// Parses `"a.b.c.d/n"`. The address part is kept as given.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || DiscoveryError::InvalidRangeFormat(s.to_string());

        let (ip_str, prefix_str) = s.split_once('/').ok_or_else(invalid)?;
        let network: Ipv4Addr = ip_str.parse().map_err(|_| invalid())?;
        // u8::from_str alone would let a leading `+` through
        if prefix_str.is_empty() || !prefix_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let prefix: u8 = prefix_str.parse().map_err(|_| invalid())?;

        if prefix > MAX_PREFIX {
            return Err(invalid());
        }
        Ok(Self { network, prefix })
    }
}

/// Parses a strict dotted-decimal IPv4 address.
pub fn parse_ipv4(s: &str) -> Result<Ipv4Addr> {
    s.parse::<Ipv4Addr>()
        .map_err(|_| DiscoveryError::InvalidAddressFormat(s.to_string()))
}

/// Derives the network range of an interface from its address and netmask.
///
/// The prefix is the number of set bits across all four mask octets. Masks
/// with non-contiguous bits still produce a count; they are logged, not
/// rejected.
pub fn compute_network_range(address: &str, netmask: &str) -> Result<NetworkRange> {
    let address: Ipv4Addr = parse_ipv4(address)?;
    let mask: Ipv4Addr = parse_ipv4(netmask)?;

    if !is_contiguous_mask(mask) {
        warn!("Netmask {mask} has non-contiguous bits, prefix is a plain bit count");
    }

    Ok(NetworkRange::from_mask(address, mask))
}

pub fn network_address(address: Ipv4Addr, mask: Ipv4Addr) -> Ipv4Addr {
    let a = address.octets();
    let m = mask.octets();
    Ipv4Addr::new(a[0] & m[0], a[1] & m[1], a[2] & m[2], a[3] & m[3])
}

pub fn prefix_len(mask: Ipv4Addr) -> u8 {
    mask.octets().iter().map(|octet| octet.count_ones() as u8).sum()
}

/// True when the mask is a run of ones followed by a run of zeros.
pub fn is_contiguous_mask(mask: Ipv4Addr) -> bool {
    let bits: u32 = u32::from(mask);
    bits.leading_ones() + bits.trailing_zeros() == 32
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
