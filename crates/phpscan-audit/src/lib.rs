//! phpscan Audit - php.ini security baseline auditing
//!
//! This crate provides:
//! - `Catalog`: the ordered set of baseline rules (built-in or loaded from TOML)
//! - `Configuration`: the parsed `key = value` settings of a php.ini
//! - `ConfigAuditor`: compares settings with rule recommendations, unit-aware
//!   for size and duration settings
//! - Text and JSON report rendering
//!
//! # Example
//!
//! ```
//! use phpscan_audit::{audit_text, report_text, Catalog};
//!
//! let catalog = Catalog::builtin();
//! let findings = audit_text("display_errors = On\n", &catalog);
//! assert!(findings.iter().any(|f| f.key == "display_errors"));
//!
//! let report = report_text("display_errors = On\n", &catalog);
//! assert!(report.contains("Current Value = on, Recommended Value = Off"));
//! ```

pub mod auditor;
pub mod catalog;
pub mod normalize;
pub mod parser;
pub mod report;

pub use auditor::{audit, compare, AuditResult, AuditSummary, Comparison, ConfigAuditor};
pub use catalog::{Catalog, Rule, Setting};
pub use normalize::{is_magnitude_key, normalize_text, to_megabytes, MAGNITUDE_KEYS};
pub use parser::Configuration;
pub use report::{render_json, render_line, render_text, JsonReport};

use phpscan_core::{Finding, Result};
use std::io::BufRead;

/// Audit configuration text, returning structured findings
pub fn audit_text(text: &str, catalog: &Catalog) -> Vec<Finding> {
    audit(&Configuration::parse_str(text), catalog)
}

/// Audit configuration text, returning the rendered text report
pub fn report_text(text: &str, catalog: &Catalog) -> String {
    render_text(&audit_text(text, catalog))
}

/// Audit configuration read from a line source
pub fn audit_reader<R: BufRead>(reader: R, catalog: &Catalog) -> Result<Vec<Finding>> {
    let config = Configuration::parse_reader(reader)?;
    Ok(audit(&config, catalog))
}
