//! Report rendering

use crate::auditor::{AuditResult, AuditSummary};
use chrono::{DateTime, Utc};
use phpscan_core::{Finding, Result};
use serde::Serialize;

/// Render one finding as a report line
pub fn render_line(finding: &Finding) -> String {
    format!(
        "ID {} ({}) - Configuration '{}': Current Value = {}, Recommended Value = {}",
        finding.rule_id, finding.description, finding.key, finding.actual, finding.recommended
    )
}

/// Render findings one per line
///
/// No findings renders as an empty string; callers decide how to present
/// a clean audit.
pub fn render_text(findings: &[Finding]) -> String {
    findings
        .iter()
        .map(render_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Machine-readable audit report
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport<'a> {
    /// Audited file, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'a str>,
    pub generated_at: DateTime<Utc>,
    pub summary: &'a AuditSummary,
    pub findings: &'a [Finding],
}

impl<'a> JsonReport<'a> {
    pub fn new(result: &'a AuditResult, source: Option<&'a str>) -> Self {
        Self {
            source,
            generated_at: Utc::now(),
            summary: &result.summary,
            findings: &result.findings,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Render an audit result as pretty-printed JSON
pub fn render_json(result: &AuditResult, source: Option<&str>) -> Result<String> {
    JsonReport::new(result, source).to_json()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auditor::ConfigAuditor;
    use crate::parser::Configuration;
    use phpscan_core::CompareValue;

    #[test]
    fn test_render_line() {
        let finding = Finding::new(
            "P16",
            "Performance Settings",
            "upload_max_filesize",
            CompareValue::Numeric(4.0),
            CompareValue::Numeric(2.0),
        );
        assert_eq!(
            render_line(&finding),
            "ID P16 (Performance Settings) - Configuration 'upload_max_filesize': Current Value = 4.0, Recommended Value = 2.0"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_text(&[]), "");
    }

    #[test]
    fn test_render_lines_in_order() {
        let config = Configuration::parse_str("display_errors = On\n");
        let result = ConfigAuditor::new().run_audit(&config);
        let report = render_text(&result.findings);

        let lines: Vec<&str> = report.split('\n').collect();
        assert_eq!(lines.len(), result.findings.len());
        assert!(!report.ends_with('\n'));
        assert_eq!(
            lines[0],
            "ID P1 (Authentication) - Configuration 'allow_url_fopen': Current Value = Not Set, Recommended Value = Off"
        );
        assert!(lines.contains(
            &"ID P10 (Error Handling) - Configuration 'display_errors': Current Value = on, Recommended Value = Off"
        ));
    }

    #[test]
    fn test_render_json() {
        let config = Configuration::parse_str("upload_max_filesize = 4M\n");
        let result = ConfigAuditor::new().run_audit(&config);
        let json = render_json(&result, Some("/etc/php/php.ini")).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["source"], "/etc/php/php.ini");
        assert_eq!(value["summary"]["failed"], result.summary.failed);
        let upload = value["findings"]
            .as_array()
            .unwrap()
            .iter()
            .find(|f| f["key"] == "upload_max_filesize")
            .unwrap();
        assert_eq!(upload["actual"], 4.0);
        assert_eq!(upload["recommended"], 2.0);
    }

    #[test]
    fn test_render_json_without_source() {
        let result = ConfigAuditor::new().run_audit(&Configuration::new());
        let json = render_json(&result, None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("source").is_none());
        assert!(value["generated_at"].is_string());
    }
}
