mod commands;
mod terminal;

use std::time::Duration;

use commands::{CommandLine, Commands, interfaces, ping, range, scan};
use pingado_common::config::{Config, SweepScope};
use pingado_core::session::DiscoverySession;
use terminal::{print, spinner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    spinner::init_logging(commands.quiet);

    let mut cfg = Config {
        quiet: commands.quiet,
        no_banner: commands.no_banner,
        ..Config::default()
    };

    print::banner(cfg.no_banner, cfg.quiet);

    match commands.command {
        Commands::Interfaces => {
            let session = DiscoverySession::system(&cfg);
            interfaces::interfaces(&session, &cfg);
            Ok(())
        }
        Commands::Range { address, netmask } => {
            let session = DiscoverySession::system(&cfg);
            range::range(&session, &address, &netmask, &cfg)
        }
        Commands::Scan {
            target,
            timeout,
            concurrency,
            block,
        } => {
            cfg.probe_timeout = Duration::from_millis(timeout);
            cfg.concurrency = concurrency;
            if block {
                cfg.scope = SweepScope::Block;
            }
            print::header("getting ready for discovery", cfg.quiet);
            scan::scan(target, &cfg).await
        }
        Commands::Ping {
            address,
            count,
            timeout,
            raw,
        } => {
            cfg.probe_timeout = Duration::from_millis(timeout);
            let session = DiscoverySession::system(&cfg);
            ping::ping(&session, &address, count, raw, &cfg).await
        }
    }
}
