//! Baseline rule definitions and the rule catalog

use phpscan_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// A required configuration key and the value it should hold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub recommended: String,
}

/// A named security baseline rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Unique rule ID
    pub id: String,
    /// Policy area the rule covers
    pub description: String,
    /// Required settings, in evaluation order. Empty for policy areas
    /// that are documented but not checkable from php.ini.
    #[serde(default, rename = "setting")]
    pub settings: Vec<Setting>,
}

impl Rule {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            settings: Vec::new(),
        }
    }

    /// Append a required setting
    pub fn setting(mut self, key: impl Into<String>, recommended: impl Into<String>) -> Self {
        self.settings.push(Setting {
            key: key.into(),
            recommended: recommended.into(),
        });
        self
    }

    /// True when the rule has nothing to check
    pub fn is_informational(&self) -> bool {
        self.settings.is_empty()
    }
}

/// Ordered, read-only collection of rules
///
/// Keys may repeat across rules; each occurrence is audited independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default, rename = "rule")]
    rules: Vec<Rule>,
}

impl Catalog {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The built-in php.ini security baseline
    pub fn builtin() -> Self {
        Self::new(builtin_rules())
    }

    /// Load a catalog from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        info!("Loading rule catalog from: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parse a catalog from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, origin: &str) -> Result<Self> {
        let catalog: Catalog = toml::from_str(content).map_err(|e| Error::InvalidCatalog {
            path: origin.to_string(),
            message: e.to_string(),
        })?;

        debug!("Parsed {} rules from {}", catalog.len(), origin);
        Ok(catalog)
    }

    /// Rules in definition order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Get a rule by ID
    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of (rule, key) pairs an audit evaluates
    pub fn setting_count(&self) -> usize {
        self.rules.iter().map(|r| r.settings.len()).sum()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

fn builtin_rules() -> Vec<Rule> {
    vec![
        Rule::new("P1", "Authentication")
            .setting("allow_url_fopen", "Off")
            .setting("log_errors", "On"),
        Rule::new("P2", "Session Management")
            .setting("session.cookie_secure", "On")
            .setting("session.cookie_httponly", "On")
            .setting("session.cookie_samesite", "Strict"),
        Rule::new("P4", "Injection Protection").setting("magic_quotes_gpc", "Off"),
        Rule::new("P5", "Input/Output Validation").setting("filter.default", "unsafe_raw"),
        Rule::new("P6", "XSS Protection").setting("html_errors", "Off"),
        Rule::new("P8", "Data Protection")
            .setting("session.entropy_length", "32")
            .setting("session.hash_function", "sha256"),
        Rule::new("P9", "File and Upload Security").setting("file_uploads", "Off"),
        Rule::new("P10", "Error Handling")
            .setting("display_errors", "Off")
            .setting("log_errors", "On"),
        Rule::new("P12", "Communication Security").setting("session.cookie_secure", "On"),
        Rule::new("P13", "Dependency Security"),
        Rule::new("P14", "Monitoring and Logging").setting("log_errors", "On"),
        Rule::new("P15", "API Security"),
        Rule::new("P16", "Performance Settings")
            .setting("max_execution_time", "30")
            .setting("memory_limit", "128M")
            .setting("post_max_size", "8M")
            .setting("upload_max_filesize", "2M"),
        Rule::new("P17", "Exposure Settings")
            .setting("expose_php", "Off")
            .setting("disable_functions", "exec,passthru,shell_exec,system"),
    ]
}
