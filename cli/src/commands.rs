pub mod interfaces;
pub mod ping;
pub mod range;
pub mod scan;

use clap::{ArgAction, Parser, Subcommand};
use pingado_common::config::{DEFAULT_CONCURRENCY, DEFAULT_PROBE_TIMEOUT};
use pingado_common::network::report::DEFAULT_PROBE_COUNT;

#[derive(Parser)]
#[command(name = "pingado", version)]
#[command(about = "Find the live hosts of your local network.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Print less; repeat to print only the essentials
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Skip the banner
    #[arg(long, global = true)]
    pub no_banner: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List the active IPv4 interfaces and their ranges
    #[command(alias = "i")]
    Interfaces,
    /// Compute the network range of an address and netmask
    #[command(alias = "r")]
    Range { address: String, netmask: String },
    /// Sweep a subnet for live hosts
    #[command(alias = "s")]
    Scan {
        /// Interface name or range such as 192.168.1.0/24. Defaults to the preferred interface
        target: Option<String>,
        /// Per-probe timeout in milliseconds
        #[arg(short, long, default_value_t = DEFAULT_PROBE_TIMEOUT.as_millis() as u64)]
        timeout: u64,
        /// Maximum number of probes in flight
        #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,
        /// Sweep every host of the computed block instead of its first /24
        #[arg(long)]
        block: bool,
    },
    /// Send a series of echoes to one host
    #[command(alias = "p")]
    Ping {
        address: String,
        /// Number of echoes, 1-10
        #[arg(short, long, default_value_t = DEFAULT_PROBE_COUNT)]
        count: u32,
        /// Per-echo timeout in milliseconds
        #[arg(short, long, default_value_t = DEFAULT_PROBE_TIMEOUT.as_millis() as u64)]
        timeout: u64,
        /// Also print the output of the ping program
        #[arg(long)]
        raw: bool,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
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

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CommandLine {
        CommandLine::try_parse_from(args).unwrap()
    }

    #[test]
    fn scan_defaults() {
        let cli = parse(&["pingado", "scan"]);
        assert_eq!(cli.command, Commands::Scan {
            target: None,
            timeout: 1_000,
            concurrency: 256,
            block: false,
        });
        assert_eq!(cli.quiet, 0);
    }

    #[test]
    fn scan_alias_with_flags() {
        let cli = parse(&["pingado", "-qq", "s", "10.0.0.0/16", "--block", "-c", "64", "-t", "300"]);
        assert_eq!(cli.command, Commands::Scan {
            target: Some("10.0.0.0/16".to_string()),
            timeout: 300,
            concurrency: 64,
            block: true,
        });
        assert_eq!(cli.quiet, 2);
    }

    #[test]
    fn ping_count_is_passed_through_unchecked() {
        let cli = parse(&["pingado", "p", "192.168.1.1", "-c", "11", "--no-banner"]);
        assert!(cli.no_banner);
        assert!(matches!(cli.command, Commands::Ping { count: 11, raw: false, .. }));
    }

    #[test]
    fn range_requires_address_and_netmask() {
        assert!(CommandLine::try_parse_from(["pingado", "range", "192.168.1.42"]).is_err());
        let cli = parse(&["pingado", "r", "192.168.1.42", "255.255.255.0"]);
        assert_eq!(cli.command, Commands::Range {
            address: "192.168.1.42".to_string(),
            netmask: "255.255.255.0".to_string(),
        });
    }
}
