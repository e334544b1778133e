//! # Probe Cycle Engine
//!
//! Drives one full diagnostic cycle: terminal observation, the two TCP
//! probes, the system ping, and the post-failure pause policy. State
//! goes in, advanced state and a summary come out; the caller owns the
//! outer loop and the sleep between cycles.

pub mod connect;
pub mod ping;

use chrono::Local;
use tokio::time::sleep;

use reprobe_common::{
    config::Config,
    error, info,
    network::target::ProbeTarget,
    report,
    session::{SessionState, TtyTransition},
    success, warn,
};

use self::connect::ConnectOutcome;
use self::ping::{PingReply, Pinger};

/// Checks performed per cycle: LOCAL connect, INTERNET connect, ping.
pub const STEPS: usize = 3;

/// Everything one cycle observed, for the caller and for tests.
pub struct CycleSummary {
    pub tty: TtyTransition,
    pub local: ConnectOutcome,
    pub internet: ConnectOutcome,
    pub ping: anyhow::Result<PingReply>,
    /// Whether the post-failure pause ran this cycle.
    pub paused: bool,
}

impl CycleSummary {
    pub fn passed(&self) -> usize {
        let mut passed: usize = 0;
        if self.local.is_connected() {
            passed += 1;
        }
        if self.internet.is_connected() {
            passed += 1;
        }
        if matches!(&self.ping, Ok(reply) if reply.reachable) {
            passed += 1;
        }
        passed
    }
}

/// Runs one cycle against `cfg` and returns the advanced state.
///
/// `attached_now` is the caller's fresh terminal observation; taking it
/// as a parameter keeps the engine free of environment probing. Probe
/// failures are recorded and reported, never returned as errors.
pub async fn run_cycle(
    state: SessionState,
    cfg: &Config,
    pinger: &dyn Pinger,
    attached_now: bool,
) -> (SessionState, CycleSummary) {
    let mut state: SessionState = state.advance();

    let stamp = Local::now().format("%Y-%m-%dT%H:%M:%S");
    report::header(&format!("test cycle {} @ {}", state.cycle, stamp));

    let tty: TtyTransition = state.observe_tty(attached_now);
    report_tty(&state, tty);

    report::step(1, STEPS, &format!("tcp connect {}", cfg.local));
    let local: ConnectOutcome = connect::connect_with_timeout(cfg.local.addr, cfg.connect_timeout).await;
    report_connect(&cfg.local, &local);

    let mut paused: bool = false;
    if local.is_failure() {
        warn!(
            "pausing {}s so the OS can raise its local-network prompt",
            cfg.failure_pause.as_secs()
        );
        sleep(cfg.failure_pause).await;
        paused = true;
    }

    report::step(2, STEPS, &format!("tcp connect {}", cfg.internet));
    let internet: ConnectOutcome =
        connect::connect_with_timeout(cfg.internet.addr, cfg.connect_timeout).await;
    report_connect(&cfg.internet, &internet);

    report::step(3, STEPS, &format!("system ping {}", cfg.local.ip()));
    let ping: anyhow::Result<PingReply> = pinger.ping(cfg.local.ip()).await;
    report_ping(&ping);

    let summary = CycleSummary {
        tty,
        local,
        internet,
        ping,
        paused,
    };
    report::cycle_footer(state.cycle, summary.passed(), STEPS);

    (state, summary)
}

fn report_tty(state: &SessionState, transition: TtyTransition) {
    match transition {
        TtyTransition::Baseline => info!("controlling terminal: {} (baseline)", state.tty),
        TtyTransition::Lost => report::detach_alert(state.cycle),
        TtyTransition::Steady => info!("controlling terminal: {}", state.tty),
    }
}

fn report_connect(target: &ProbeTarget, outcome: &ConnectOutcome) {
    let label: &str = target.kind.label();

    match outcome {
        ConnectOutcome::Immediate { latency } => {
            success!("{label}: connected immediately ({latency:.2?})");
        }
        ConnectOutcome::AfterWait { latency } => {
            success!("{label}: connected after wait ({latency:.2?})");
        }
        ConnectOutcome::Failed { error, latency } => {
            // io::Error's Display already carries code and text
            error!("{label}: connect failed after {latency:.2?}: {error}");
        }
        ConnectOutcome::TimedOut { limit } => {
            error!("{label}: connect timed out after {limit:?}");
        }
    }
}

fn report_ping(ping: &anyhow::Result<PingReply>) {
    match ping {
        Ok(reply) if reply.reachable => {
            success!("ping: reply received ({:.2?})", reply.elapsed);
        }
        Ok(reply) => {
            let exit: String = match reply.exit_code {
                Some(code) => format!("exit {code}"),
                None => "killed by signal".to_string(),
            };
            error!("ping: no reply ({exit}, {:.2?})", reply.elapsed);
        }
        Err(e) => {
            error!("ping: could not run: {e:#}");
        }
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
