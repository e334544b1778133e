//! Controlling-terminal observation.

use std::io::stdin;

use crossterm::tty::IsTty;

/// Whether stdin is still attached to a terminal.
///
/// Checked once per cycle. After an SSH session detaches, this flips
/// to `false` while the process keeps running.
pub fn stdin_attached() -> bool {
    stdin().is_tty()
}
