//! Logger setup.
//!
//! Everything in the crate logs through the `log` facade; this module installs
//! the `env_logger` backend once.

mod init;

pub use init::{LoggingConfig, init_logging};
