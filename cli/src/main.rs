mod commands;
mod terminal;

use commands::CommandLine;
use reprobe_common::{config::Config, info, report, session::SessionState, tty};
use reprobe_core::probe::{self, ping::SystemPing};
use tokio::time::sleep;

use crate::terminal::logging;

// The probe is deliberately sequential; one thread is all it gets.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let commands: CommandLine = CommandLine::parse_args();

    logging::init()?;

    let cfg: Config = commands.to_config();
    preamble(&cfg);

    let pinger: SystemPing = SystemPing;
    let mut state: SessionState = SessionState::new();

    loop {
        let attached: bool = tty::stdin_attached();
        let (next, _summary) = probe::run_cycle(state, &cfg, &pinger, attached).await;
        state = next;

        sleep(cfg.cycle_interval).await;
    }
}

fn preamble(cfg: &Config) {
    report::banner(env!("CARGO_PKG_VERSION"));

    report::aligned_line("pid", std::process::id().to_string());
    report::aligned_line("ppid", std::os::unix::process::parent_id().to_string());
    report::aligned_line("local", cfg.local.addr.to_string());
    report::aligned_line("internet", cfg.internet.addr.to_string());
    report::aligned_line("interval", format!("{}s", cfg.cycle_interval.as_secs()));

    info!("run this over ssh, then detach the session (close the tab)");
    info!("watch for LOCAL failures that begin after the detach notice");

    report::fat_separator();
}
