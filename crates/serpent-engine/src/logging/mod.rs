//! Logging utilities.
//!
//! Centralizes logger initialization. The rest of the engine logs through the
//! `log` facade only.

mod init;

pub use init::{init_logging, LoggingConfig};
