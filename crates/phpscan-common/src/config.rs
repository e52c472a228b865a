//! Configuration management for phpscan

use phpscan_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Audit settings
    #[serde(default)]
    pub audit: AuditConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::Configuration(format!("Failed to parse config: {}", e)))
    }

    /// Create a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Merge with environment variables (PHPSCAN_ prefix)
    pub fn merge_env(self) -> Self {
        self.merge_vars(|name| std::env::var(name).ok())
    }

    /// Merge overrides from an arbitrary variable source
    pub fn merge_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        // Audit settings
        if let Some(val) = var("PHPSCAN_RULES") {
            self.audit.rules_file = Some(val);
        }
        if let Some(val) = var("PHPSCAN_REPORT_FORMAT") {
            if let Ok(format) = val.parse() {
                self.audit.report_format = format;
            }
        }
        if let Some(val) = var("PHPSCAN_FAIL_ON_FINDINGS") {
            if let Ok(flag) = val.parse() {
                self.audit.fail_on_findings = flag;
            }
        }

        // Logging
        if let Some(val) = var("PHPSCAN_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Some(val) = var("PHPSCAN_LOG_FORMAT") {
            self.logging.format = val;
        }

        self
    }
}

/// Audit configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditConfig {
    /// TOML rule catalog replacing the built-in baseline
    pub rules_file: Option<String>,

    /// Report output format
    #[serde(default)]
    pub report_format: ReportFormat,

    /// Exit non-zero when the audit reports any finding
    #[serde(default)]
    pub fail_on_findings: bool,
}

/// Report output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// One line per finding
    #[default]
    Text,
    /// Structured document for machine consumers
    Json,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Text => "text",
            ReportFormat::Json => "json",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(Error::Configuration(format!(
                "Unknown report format: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (pretty, json, compact)
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Log span enter/exit events
    #[serde(default)]
    pub spans: bool,

    /// Include source file and line in log events
    #[serde(default)]
    pub file_lines: bool,
}

fn default_log_level() -> String {
    String::from("warn")
}

fn default_log_format() -> String {
    String::from("compact")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            spans: false,
            file_lines: false,
        }
    }
}

/// Builder for constructing Config
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn rules_file(mut self, path: impl Into<String>) -> Self {
        self.config.audit.rules_file = Some(path.into());
        self
    }

    pub fn report_format(mut self, format: ReportFormat) -> Self {
        self.config.audit.report_format = format;
        self
    }

    pub fn fail_on_findings(mut self, fail: bool) -> Self {
        self.config.audit.fail_on_findings = fail;
        self
    }

    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    pub fn log_format(mut self, format: impl Into<String>) -> Self {
        self.config.logging.format = format.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            [audit]
            rules_file = "/etc/phpscan/rules.toml"
            report_format = "json"
            fail_on_findings = true

            [logging]
            level = "debug"
            format = "json"
            file_lines = true
        "#;

        let config = Config::from_toml(toml).unwrap();
        assert_eq!(
            config.audit.rules_file,
            Some(String::from("/etc/phpscan/rules.toml"))
        );
        assert_eq!(config.audit.report_format, ReportFormat::Json);
        assert!(config.audit.fail_on_findings);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
        assert!(config.logging.file_lines);
        assert!(!config.logging.spans);
    }

    #[test]
    fn test_config_defaults_for_missing_sections() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.audit.rules_file, None);
        assert_eq!(config.audit.report_format, ReportFormat::Text);
        assert!(!config.audit.fail_on_findings);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, "compact");
    }

    #[test]
    fn test_config_rejects_bad_toml() {
        let err = Config::from_toml("[audit\nreport_format =").unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"trace\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.logging.level, "trace");
    }

    #[test]
    fn test_merge_vars() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("PHPSCAN_RULES", "custom.toml"),
            ("PHPSCAN_REPORT_FORMAT", "JSON"),
            ("PHPSCAN_FAIL_ON_FINDINGS", "true"),
            ("PHPSCAN_LOG_LEVEL", "info"),
        ]);

        let config = Config::default().merge_vars(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.audit.rules_file, Some(String::from("custom.toml")));
        assert_eq!(config.audit.report_format, ReportFormat::Json);
        assert!(config.audit.fail_on_findings);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "compact");
    }

    #[test]
    fn test_merge_vars_ignores_unparseable_values() {
        let config = Config::default().merge_vars(|k| match k {
            "PHPSCAN_REPORT_FORMAT" => Some("xml".into()),
            "PHPSCAN_FAIL_ON_FINDINGS" => Some("maybe".into()),
            _ => None,
        });
        assert_eq!(config.audit.report_format, ReportFormat::Text);
        assert!(!config.audit.fail_on_findings);
    }

    #[test]
    fn test_config_builder() {
        let config = Config::builder()
            .rules_file("baseline.toml")
            .report_format(ReportFormat::Json)
            .fail_on_findings(true)
            .log_level("debug")
            .build();

        assert_eq!(config.audit.rules_file, Some(String::from("baseline.toml")));
        assert_eq!(config.audit.report_format, ReportFormat::Json);
        assert!(config.audit.fail_on_findings);
        assert_eq!(config.logging.level, "debug");
    }
}
