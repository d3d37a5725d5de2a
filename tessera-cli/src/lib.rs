//! Support library for the tessera CLI binary.
//!
//! Exposes the command pipeline and logging setup so integration tests can
//! drive them without spawning a subprocess.

pub mod cli;
pub mod logging;
