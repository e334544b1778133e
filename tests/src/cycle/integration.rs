#![cfg(test)]
use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reprobe_common::config::Config;
use reprobe_common::network::target::ProbeTarget;
use reprobe_common::session::{SessionState, TtyTransition};
use reprobe_core::probe;
use reprobe_core::probe::ping::{PingReply, Pinger};
use tokio::net::TcpListener;
use tokio::time::Instant;

/// Counts invocations and always reports a reply, so cycles never
/// depend on a real ping binary.
struct FakePinger {
    calls: AtomicUsize,
}

impl FakePinger {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Pinger for FakePinger {
    async fn ping(&self, _addr: IpAddr) -> anyhow::Result<PingReply> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(PingReply {
            reachable: true,
            exit_code: Some(0),
            elapsed: Duration::from_millis(1),
        })
    }
}

/// A live loopback listener; keep the guard alive for the test's duration.
async fn listener() -> (TcpListener, SocketAddr) {
    let listener: TcpListener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    (listener, addr)
}

/// A loopback port with nothing listening on it.
async fn closed_addr() -> SocketAddr {
    let listener: TcpListener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Short durations so failure paths stay measurable but fast.
fn test_config(local: SocketAddr, internet: SocketAddr) -> Config {
    Config {
        local: ProbeTarget::local(local),
        internet: ProbeTarget::internet(internet),
        cycle_interval: Duration::from_millis(10),
        connect_timeout: Duration::from_millis(500),
        failure_pause: Duration::from_millis(300),
    }
}

#[tokio::test]
async fn cycle_runs_all_three_checks_when_everything_passes() {
    let (_local_guard, local) = listener().await;
    let (_internet_guard, internet) = listener().await;
    let cfg: Config = test_config(local, internet);
    let pinger: FakePinger = FakePinger::new();

    let (state, summary) = probe::run_cycle(SessionState::new(), &cfg, &pinger, true).await;

    assert_eq!(state.cycle, 1);
    assert_eq!(summary.passed(), probe::STEPS);
    assert_eq!(pinger.calls(), 1, "ping must run exactly once per cycle");
    assert!(!summary.paused);
}

#[tokio::test]
async fn local_failure_pauses_and_still_runs_remaining_checks() {
    let local: SocketAddr = closed_addr().await;
    let (_internet_guard, internet) = listener().await;
    let cfg: Config = test_config(local, internet);
    let pinger: FakePinger = FakePinger::new();

    let started: Instant = Instant::now();
    let (_, summary) = probe::run_cycle(SessionState::new(), &cfg, &pinger, true).await;

    assert!(summary.local.is_failure());
    assert!(summary.paused);
    assert!(
        started.elapsed() >= cfg.failure_pause,
        "local failure must be followed by the pause"
    );

    // the cycle keeps going after the pause
    assert!(summary.internet.is_connected());
    assert_eq!(pinger.calls(), 1);
}

#[tokio::test]
async fn internet_failure_never_pauses() {
    let (_local_guard, local) = listener().await;
    let internet: SocketAddr = closed_addr().await;
    let cfg: Config = test_config(local, internet);
    let pinger: FakePinger = FakePinger::new();

    let started: Instant = Instant::now();
    let (_, summary) = probe::run_cycle(SessionState::new(), &cfg, &pinger, true).await;

    assert!(summary.internet.is_failure());
    assert!(!summary.paused);
    assert!(
        started.elapsed() < cfg.failure_pause,
        "internet failures must not trigger the pause"
    );
    assert_eq!(pinger.calls(), 1);
}

#[tokio::test]
async fn both_targets_failing_pauses_once_after_local_only() {
    let local: SocketAddr = closed_addr().await;
    let internet: SocketAddr = closed_addr().await;
    let cfg: Config = test_config(local, internet);
    let pinger: FakePinger = FakePinger::new();

    let started: Instant = Instant::now();
    let (_, summary) = probe::run_cycle(SessionState::new(), &cfg, &pinger, true).await;

    assert!(summary.local.is_failure());
    assert!(summary.internet.is_failure());
    assert!(summary.paused);
    assert!(started.elapsed() >= cfg.failure_pause);
    assert!(
        started.elapsed() < cfg.failure_pause * 2,
        "two failures must still pause only once"
    );
}

#[tokio::test]
async fn detach_notice_fires_exactly_once() {
    let (_local_guard, local) = listener().await;
    let (_internet_guard, internet) = listener().await;
    let cfg: Config = test_config(local, internet);
    let pinger: FakePinger = FakePinger::new();

    let observations: [bool; 5] = [true, true, false, false, true];
    let expected: [TtyTransition; 5] = [
        TtyTransition::Baseline,
        TtyTransition::Steady,
        TtyTransition::Lost,
        TtyTransition::Steady,
        TtyTransition::Steady, // reattach is not announced
    ];

    let mut state: SessionState = SessionState::new();
    for (attached, expected) in observations.into_iter().zip(expected) {
        let (next, summary) = probe::run_cycle(state, &cfg, &pinger, attached).await;
        assert_eq!(summary.tty, expected);
        state = next;
    }

    assert_eq!(state.cycle, 5, "counter increments by one per cycle");
    assert_eq!(pinger.calls(), 5);
}
