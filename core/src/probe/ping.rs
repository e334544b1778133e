//! System ping invocation, behind a trait so cycles can run in tests
//! without spawning processes.

use std::net::IpAddr;
use std::process::Stdio;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::Instant;

/// Packets per invocation.
pub const PING_COUNT: u32 = 1;
/// Per-packet reply deadline handed to the ping binary, in seconds.
pub const PING_WAIT_SECS: u32 = 2;

/// What one ping invocation reported.
#[derive(Clone, Copy, Debug)]
pub struct PingReply {
    /// Exit status zero, i.e. a reply came back.
    pub reachable: bool,
    /// Raw exit code when the process exited normally.
    pub exit_code: Option<i32>,
    pub elapsed: Duration,
}

#[async_trait]
pub trait Pinger: Send + Sync {
    async fn ping(&self, addr: IpAddr) -> anyhow::Result<PingReply>;
}

/// Shells out to the platform `ping`, discarding its output and keeping
/// only the exit status.
pub struct SystemPing;

#[async_trait]
impl Pinger for SystemPing {
    async fn ping(&self, addr: IpAddr) -> anyhow::Result<PingReply> {
        let started: Instant = Instant::now();

        let status = Command::new("ping")
            .args(ping_args(addr))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .context("failed to run system ping")?;

        Ok(PingReply {
            reachable: status.success(),
            exit_code: status.code(),
            elapsed: started.elapsed(),
        })
    }
}

/// BSD ping spells the per-packet deadline `-t`; Linux uses `-W`.
fn ping_args(addr: IpAddr) -> Vec<String> {
    let wait_flag: &str = if cfg!(target_os = "macos") { "-t" } else { "-W" };

    vec![
        "-c".into(),
        PING_COUNT.to_string(),
        wait_flag.into(),
        PING_WAIT_SECS.to_string(),
        addr.to_string(),
    ]
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
