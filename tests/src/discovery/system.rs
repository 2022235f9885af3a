//! Runs against the real machine. Needs a `ping` binary and live interfaces,
//! hence ignored by default: `cargo test -- --ignored`.

use std::net::Ipv4Addr;
use std::time::Duration;

use pingado_common::config::Config;
use pingado_common::network::report::PingReport;
use pingado_core::session::DiscoverySession;

fn session() -> DiscoverySession {
    let cfg = Config {
        probe_timeout: Duration::from_millis(500),
        ..Config::default()
    };
    DiscoverySession::system(&cfg)
}

#[test]
#[ignore = "reads the host's interfaces"]
fn system_interfaces_exclude_loopback() {
    let interfaces = session().list_interfaces();
    assert!(interfaces.iter().all(|interface| !interface.address.is_loopback()));
}

#[tokio::test]
#[ignore = "requires a ping binary"]
async fn ping_localhost() -> anyhow::Result<()> {
    let report = session().ping("127.0.0.1", 2).await?;

    match report {
        PingReport::Stats(stats) => {
            assert_eq!(stats.target, Ipv4Addr::LOCALHOST);
            assert_eq!(stats.received, 2);
            assert!(stats.avg.is_some());
        }
        PingReport::Failed { reason, .. } => panic!("ping failed: {reason}"),
    }
    Ok(())
}

#[tokio::test]
#[ignore = "requires a ping binary"]
async fn sweep_loopback_finds_localhost() -> anyhow::Result<()> {
    let result = session().scan("127.0.0.0/24").await?;
    assert!(result.addresses.contains(&Ipv4Addr::LOCALHOST));
    assert!(result.setup_failures.is_empty());
    Ok(())
}
