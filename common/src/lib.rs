//! Shared building blocks for the probe: runtime configuration, the
//! target model, per-session state, terminal observation, and console
//! reporting.

pub mod config;
pub mod network;
pub mod report;
pub mod session;
pub mod tty;
