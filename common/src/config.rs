use std::time::Duration;

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(1_000);
pub const DEFAULT_CONCURRENCY: usize = 256;

/// Which addresses a sweep covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SweepScope {
    /// Hosts `.1` through `.254` of the /24 formed by the first three octets,
    /// whatever the computed prefix is.
    #[default]
    Fixed24,
    /// Every usable host of the computed block. Capped at /16.
    Block,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Upper bound for a single lightweight probe.
    pub probe_timeout: Duration,
    /// Maximum number of probes in flight at once.
    pub concurrency: usize,
    pub scope: SweepScope,
    pub quiet: u8,
    pub no_banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
            scope: SweepScope::default(),
            quiet: 0,
            no_banner: false,
        }
    }
}
