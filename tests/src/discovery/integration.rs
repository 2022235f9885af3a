use std::net::Ipv4Addr;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use pingado_common::config::{Config, SweepScope};
use pingado_common::error::DiscoveryError;
use pingado_common::network::interface::{self, NetworkInterface};
use pingado_common::network::report::PingReport;
use pingado_core::session::DiscoverySession;
use pingado_core::sweeper::SweepProgress;

use super::fakes::{SimulatedLan, StaticInterfaces};

fn home_interfaces() -> Vec<NetworkInterface> {
    vec![
        NetworkInterface::new("wlan0", Ipv4Addr::new(192, 168, 1, 42), Ipv4Addr::new(255, 255, 255, 0)),
        NetworkInterface::new("eth1", Ipv4Addr::new(10, 0, 5, 200), Ipv4Addr::new(255, 255, 0, 0)),
    ]
}

fn session_with(lan: Arc<SimulatedLan>, cfg: &Config) -> DiscoverySession {
    DiscoverySession::new(lan, Arc::new(StaticInterfaces(home_interfaces())), cfg)
}

fn lan_host(last: u8) -> Ipv4Addr {
    Ipv4Addr::new(192, 168, 1, last)
}

#[tokio::test]
async fn discover_hosts_of_an_interface() {
    let lan = Arc::new(SimulatedLan::new([lan_host(254), lan_host(1), lan_host(42), lan_host(17)]));
    let session = session_with(lan, &Config::default());

    let interfaces = session.list_interfaces();
    let wlan0 = interface::find_by_name(&interfaces, "wlan0").expect("wlan0 is listed");
    assert_eq!(wlan0.network_range().to_string(), "192.168.1.0/24");

    let result = session.scan_interface(wlan0).await.expect("scan succeeds");
    assert_eq!(
        result.addresses,
        vec![lan_host(1), lan_host(17), lan_host(42), lan_host(254)]
    );
    assert_eq!(result.probed, 254);
    assert!(result.setup_failures.is_empty());
}

#[tokio::test]
async fn scan_results_are_sorted_whatever_the_answer_order() {
    let live: Vec<Ipv4Addr> = (1..=254u8).step_by(7).map(lan_host).collect();
    let lan = Arc::new(SimulatedLan::new(live.clone()).with_random_delays([192, 168, 1], 25));
    let session = session_with(lan, &Config::default());

    let result = session.scan("192.168.1.0/24").await.expect("scan succeeds");
    assert_eq!(result.addresses, live);
    assert!(result.elapsed_ms() < 1_000);
}

#[tokio::test]
async fn concurrency_cap_below_host_count_still_probes_everything() {
    let lan = Arc::new(SimulatedLan::new([lan_host(9)]).with_random_delays([192, 168, 1], 3));
    let cfg = Config {
        concurrency: 8,
        ..Config::default()
    };
    let session = session_with(Arc::clone(&lan), &cfg);

    let result = session.scan("192.168.1.0/24").await.expect("scan succeeds");
    assert_eq!(result.addresses, vec![lan_host(9)]);
    assert_eq!(lan.probes.load(Ordering::SeqCst), 254);
    assert!(lan.peak.load(Ordering::SeqCst) <= 8);
}

#[tokio::test]
async fn slow_hosts_count_as_unreachable() {
    let mut lan = SimulatedLan::new([lan_host(5), lan_host(6)]);
    lan.delays.insert(lan_host(6), Duration::from_millis(500));
    let cfg = Config {
        probe_timeout: Duration::from_millis(50),
        ..Config::default()
    };
    let session = session_with(Arc::new(lan), &cfg);

    let result = session.scan("192.168.1.0/24").await.expect("scan succeeds");
    assert_eq!(result.addresses, vec![lan_host(5)]);
}

#[tokio::test]
async fn empty_network_yields_empty_result() {
    let session = session_with(Arc::new(SimulatedLan::default()), &Config::default());
    let result = session.scan("172.16.4.0/24").await.expect("scan succeeds");
    assert!(result.is_empty());
    assert!(!result.cancelled);
}

#[tokio::test]
async fn interface_with_wide_mask_sweeps_first_24_by_default() {
    let lan = Arc::new(SimulatedLan::new([
        Ipv4Addr::new(10, 0, 0, 8),
        Ipv4Addr::new(10, 0, 5, 8),
    ]));
    let session = session_with(Arc::clone(&lan), &Config::default());

    let interfaces = session.list_interfaces();
    let eth1 = interface::find_by_name(&interfaces, "eth1").expect("eth1 is listed");
    let result = session.scan_interface(eth1).await.expect("scan succeeds");

    assert_eq!(result.addresses, vec![Ipv4Addr::new(10, 0, 0, 8)]);
    assert_eq!(lan.probes.load(Ordering::SeqCst), 254);
}

#[tokio::test]
async fn block_scope_reaches_the_whole_subnet() {
    let lan = Arc::new(SimulatedLan::new([
        Ipv4Addr::new(10, 0, 4, 8),
        Ipv4Addr::new(10, 0, 5, 8),
    ]));
    let cfg = Config {
        scope: SweepScope::Block,
        ..Config::default()
    };
    let session = session_with(lan, &cfg);

    let result = session.scan("10.0.4.0/23").await.expect("scan succeeds");
    assert_eq!(
        result.addresses,
        vec![Ipv4Addr::new(10, 0, 4, 8), Ipv4Addr::new(10, 0, 5, 8)]
    );
    assert_eq!(result.probed, 510);
}

#[tokio::test]
async fn cancelled_scan_returns_what_was_probed() {
    let lan = Arc::new(SimulatedLan::new([lan_host(1), lan_host(200)]).with_random_delays([192, 168, 1], 4));
    let cfg = Config {
        concurrency: 2,
        ..Config::default()
    };

    let session = session_with(Arc::clone(&lan), &cfg);
    let token = session.cancel_token();
    let session = session.with_progress(Arc::new(move |progress: SweepProgress| {
        if progress.completed >= 10 {
            token.cancel();
        }
    }));

    let result = session.scan("192.168.1.0/24").await.expect("scan succeeds");
    assert!(result.cancelled);
    assert!(result.probed < 254);
    assert_eq!(result.probed, lan.probes.load(Ordering::SeqCst));
    assert!(!result.addresses.contains(&lan_host(200)));
}

#[tokio::test]
async fn malformed_range_is_rejected() {
    let session = session_with(Arc::new(SimulatedLan::default()), &Config::default());
    assert_eq!(
        session.scan("192.168.1.0/33").await,
        Err(DiscoveryError::InvalidRangeFormat("192.168.1.0/33".to_string()))
    );
}

#[tokio::test]
async fn ping_live_host_with_partial_loss() {
    let lan = SimulatedLan::new([lan_host(1)]).with_echoes(vec![
        Some(Duration::from_millis(4)),
        None,
        Some(Duration::from_millis(8)),
    ]);
    let session = session_with(Arc::new(lan), &Config::default());

    let PingReport::Stats(stats) = session.ping("192.168.1.1", 3).await.expect("valid input") else {
        panic!("expected statistics");
    };
    assert_eq!(stats.sent, 3);
    assert_eq!(stats.received, 2);
    assert_eq!(stats.min, Some(Duration::from_millis(4)));
    assert_eq!(stats.avg, Some(Duration::from_millis(6)));
    assert_eq!(stats.max, Some(Duration::from_millis(8)));
}

#[tokio::test]
async fn ping_silent_host_reports_total_loss() {
    let session = session_with(Arc::new(SimulatedLan::default()), &Config::default());

    let PingReport::Stats(stats) = session.ping("192.168.1.77", 4).await.expect("valid input") else {
        panic!("expected statistics");
    };
    assert_eq!(stats.sent, 4);
    assert_eq!(stats.received, 0);
    assert_eq!(stats.min, None);
    assert_eq!(stats.avg, None);
    assert_eq!(stats.max, None);
}

#[tokio::test]
async fn ping_rejects_count_out_of_bounds() {
    let session = session_with(Arc::new(SimulatedLan::default()), &Config::default());
    assert_eq!(
        session.ping("192.168.1.1", 0).await,
        Err(DiscoveryError::InvalidProbeCount(0))
    );
    assert_eq!(
        session.ping("192.168.1.1", 11).await,
        Err(DiscoveryError::InvalidProbeCount(11))
    );
}
