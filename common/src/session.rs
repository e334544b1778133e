//! # Session State
//!
//! The only state carried across cycles: a monotonically increasing
//! cycle counter and the last observed terminal-attachment state.
//! Ownership is threaded through the loop, nothing lives in globals.

use std::fmt;

/// Terminal attachment as last observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TtyState {
    /// Nothing observed yet (before the first cycle).
    Unknown,
    Attached,
    Detached,
}

impl fmt::Display for TtyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &str = match self {
            TtyState::Unknown => "unknown",
            TtyState::Attached => "attached",
            TtyState::Detached => "detached",
        };
        write!(f, "{s}")
    }
}

/// What a fresh observation meant relative to the recorded state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TtyTransition {
    /// First observation of the session.
    Baseline,
    /// attached -> detached, the edge the whole probe exists to catch.
    Lost,
    /// No edge worth announcing (includes detached -> attached).
    Steady,
}

#[derive(Clone, Copy, Debug)]
pub struct SessionState {
    /// 1-based once the first cycle starts.
    pub cycle: u64,
    pub tty: TtyState,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            cycle: 0,
            tty: TtyState::Unknown,
        }
    }

    /// Consumes the state and returns it with the counter bumped.
    pub fn advance(mut self) -> Self {
        self.cycle += 1;
        self
    }

    /// Folds a fresh observation into the state and classifies the edge.
    pub fn observe_tty(&mut self, attached: bool) -> TtyTransition {
        let observed: TtyState = if attached {
            TtyState::Attached
        } else {
            TtyState::Detached
        };

        let transition: TtyTransition = match (self.tty, observed) {
            (TtyState::Unknown, _) => TtyTransition::Baseline,
            (TtyState::Attached, TtyState::Detached) => TtyTransition::Lost,
            _ => TtyTransition::Steady,
        };

        self.tty = observed;
        transition
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
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
