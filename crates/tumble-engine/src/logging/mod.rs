//! Logging utilities.
//!
//! Centralizes logger initialization and common diagnostics on top of the `log`
//! facade, with `env_logger` as the backend.

mod init;

pub use init::{init_logging, truncate_diagnostic, LoggingConfig};
