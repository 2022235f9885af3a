use thiserror::Error;

/// Failures that abort a single discovery call.
///
/// Probe-level outcomes (unreachable hosts, probes that could not be set up,
/// pings that lost every packet) are *data*, not errors, and live in
/// [`crate::network::report`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    #[error("invalid IPv4 address '{0}'")]
    InvalidAddressFormat(String),

    #[error("invalid network range '{0}'")]
    InvalidRangeFormat(String),

    #[error("probe count {0} is outside the allowed range 1-10")]
    InvalidProbeCount(u32),

    #[error("/{0} is too large to sweep, the smallest accepted prefix is /16")]
    BlockTooLarge(u8),
}

pub type Result<T> = std::result::Result<T, DiscoveryError>;
