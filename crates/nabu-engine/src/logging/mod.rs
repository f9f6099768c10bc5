//! Logging utilities.
//!
//! Library code only talks to the `log` facade; binaries and tests call
//! [`init_logging`] once to install `env_logger` as the sink.

mod init;

pub use init::{init_logging, LoggingConfig};