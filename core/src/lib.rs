//! Cycle engine for the detach-repro probe.

pub mod probe;
