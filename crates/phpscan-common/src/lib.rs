//! phpscan Common - Shared utilities: tool configuration and logging
//!
//! This crate provides common functionality used by the phpscan library and binary.

pub mod config;
pub mod logging;

pub use config::{AuditConfig, Config, ConfigBuilder, LoggingConfig, ReportFormat};
pub use logging::init_logging;
