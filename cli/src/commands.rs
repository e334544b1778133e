use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use reprobe_common::config::{Config, defaults};
use reprobe_common::network::target::{self, ProbeTarget, TargetKind, TargetParseError};

#[derive(Parser)]
#[command(name = "reprobe")]
#[command(about = "Reproduces local-network connectivity loss after a terminal detaches.")]
pub struct CommandLine {
    /// Local-network target, ip or ip:port (port defaults to 6379)
    #[arg(long, default_value_t = defaults::LOCAL_ADDR, value_parser = parse_local)]
    pub local: SocketAddr,

    /// Internet control target, ip or ip:port (port defaults to 53)
    #[arg(long, default_value_t = defaults::INTERNET_ADDR, value_parser = parse_internet)]
    pub internet: SocketAddr,

    /// Seconds between test cycles
    #[arg(long, default_value_t = defaults::CYCLE_INTERVAL_SECS)]
    pub interval: u64,

    /// Seconds allowed per connection attempt
    #[arg(long, default_value_t = defaults::CONNECT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Seconds to pause after a LOCAL failure
    #[arg(long, default_value_t = defaults::FAILURE_PAUSE_SECS)]
    pub pause: u64,
}

fn parse_local(s: &str) -> Result<SocketAddr, TargetParseError> {
    target::parse_socket_addr(s, TargetKind::Local.default_port())
}

fn parse_internet(s: &str) -> Result<SocketAddr, TargetParseError> {
    target::parse_socket_addr(s, TargetKind::Internet.default_port())
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        Config {
            local: ProbeTarget::local(self.local),
            internet: ProbeTarget::internet(self.internet),
            cycle_interval: Duration::from_secs(self.interval),
            connect_timeout: Duration::from_secs(self.timeout),
            failure_pause: Duration::from_secs(self.pause),
        }
    }
}
