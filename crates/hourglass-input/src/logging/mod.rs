//! Logger setup for binaries embedding a duration input.
//!
//! The library itself only talks to the `log` facade; installing a backend
//! is left to the application, which can use [`init_logging`] for the
//! `env_logger` setup used across this workspace.

mod init;

pub use init::{init_logging, LoggingConfig};
