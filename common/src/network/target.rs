//! # Probe Target Model
//!
//! The two endpoints the probe exercises every cycle:
//! * **LOCAL**: a device on the same LAN, the one affected by the bug.
//! * **INTERNET**: a control endpoint that should stay reachable.
//!
//! Addresses accept either a full `ip:port` pair or a bare IP, in which
//! case the kind's default port is filled in.

use std::fmt;
use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

use crate::config::defaults;

/// Which side of the LAN boundary a target sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetKind {
    Local,
    Internet,
}

impl TargetKind {
    pub fn label(&self) -> &'static str {
        match self {
            TargetKind::Local => "LOCAL",
            TargetKind::Internet => "INTERNET",
        }
    }

    /// Port assumed when a bare IP is given for this kind.
    pub fn default_port(&self) -> u16 {
        match self {
            TargetKind::Local => defaults::LOCAL_PORT,
            TargetKind::Internet => defaults::INTERNET_PORT,
        }
    }
}

/// A single endpoint the probe connects to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbeTarget {
    pub kind: TargetKind,
    pub addr: SocketAddr,
}

impl ProbeTarget {
    pub fn local(addr: SocketAddr) -> Self {
        Self {
            kind: TargetKind::Local,
            addr,
        }
    }

    pub fn internet(addr: SocketAddr) -> Self {
        Self {
            kind: TargetKind::Internet,
            addr,
        }
    }

    pub fn is_local(&self) -> bool {
        self.kind == TargetKind::Local
    }

    pub fn ip(&self) -> IpAddr {
        self.addr.ip()
    }
}

impl fmt::Display for ProbeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.label(), self.addr)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid target address '{0}', expected ip or ip:port")]
pub struct TargetParseError(pub String);

/// Parses `ip:port`, falling back to `ip` plus `default_port`.
pub fn parse_socket_addr(s: &str, default_port: u16) -> Result<SocketAddr, TargetParseError> {
    if let Ok(addr) = s.parse::<SocketAddr>() {
        return Ok(addr);
    }

    s.parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, default_port))
        .map_err(|_| TargetParseError(s.to_string()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
