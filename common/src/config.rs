use std::time::Duration;

use crate::network::target::ProbeTarget;

/// Baked-in probe parameters. Zero-argument runs use exactly these.
pub mod defaults {
    use std::net::{IpAddr, Ipv4Addr, SocketAddr};

    /// The LAN device whose reachability degrades after detach.
    pub const LOCAL_IP: Ipv4Addr = Ipv4Addr::new(10, 8, 100, 100);
    pub const LOCAL_PORT: u16 = 6379;
    pub const LOCAL_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(LOCAL_IP), LOCAL_PORT);

    /// Control target outside the LAN. Stays reachable when the bug fires.
    pub const INTERNET_IP: Ipv4Addr = Ipv4Addr::new(8, 8, 8, 8);
    pub const INTERNET_PORT: u16 = 53;
    pub const INTERNET_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(INTERNET_IP), INTERNET_PORT);

    pub const CYCLE_INTERVAL_SECS: u64 = 10;
    pub const CONNECT_TIMEOUT_SECS: u64 = 5;
    pub const FAILURE_PAUSE_SECS: u64 = 30;
}

pub struct Config {
    /// Local-network target, probed first every cycle.
    pub local: ProbeTarget,
    /// Internet control target, probed second.
    pub internet: ProbeTarget,
    /// Sleep between cycles.
    pub cycle_interval: Duration,
    /// Upper bound on a single in-progress connect.
    pub connect_timeout: Duration,
    /// Pause after a local failure.
    ///
    /// Long enough for the OS to surface its local-network
    /// permission prompt before the next attempt.
    pub failure_pause: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            local: ProbeTarget::local(defaults::LOCAL_ADDR),
            internet: ProbeTarget::internet(defaults::INTERNET_ADDR),
            cycle_interval: Duration::from_secs(defaults::CYCLE_INTERVAL_SECS),
            connect_timeout: Duration::from_secs(defaults::CONNECT_TIMEOUT_SECS),
            failure_pause: Duration::from_secs(defaults::FAILURE_PAUSE_SECS),
        }
    }
}
