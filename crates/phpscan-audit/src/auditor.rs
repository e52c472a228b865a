//! Configuration auditor - evaluates a parsed php.ini against the rule catalog

use crate::catalog::{Catalog, Rule, Setting};
use crate::normalize::{normalize_setting, values_match};
use crate::parser::Configuration;
use phpscan_core::{CompareValue, Finding, EMPTY, NOT_SET};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Configuration auditor that checks settings against a rule catalog
#[derive(Debug, Clone)]
pub struct ConfigAuditor {
    catalog: Catalog,
}

/// Result of a full audit run
#[derive(Debug, Clone)]
pub struct AuditResult {
    /// Deviations, in catalog order then settings order
    pub findings: Vec<Finding>,
    /// Summary statistics
    pub summary: AuditSummary,
}

/// Summary of audit results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSummary {
    /// Rules in the catalog
    pub rules: usize,
    /// Rules with no settings to check
    pub informational: usize,
    /// (rule, key) pairs evaluated
    pub total_checks: usize,
    /// Settings matching their recommendation
    pub passed: usize,
    /// Settings deviating from their recommendation
    pub failed: usize,
    /// Failures caused by an absent key
    pub not_set: usize,
}

impl AuditResult {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Outcome of comparing one setting
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub actual: CompareValue,
    pub recommended: CompareValue,
    pub passed: bool,
}

impl ConfigAuditor {
    /// Create an auditor with the built-in baseline
    pub fn new() -> Self {
        Self::with_catalog(Catalog::builtin())
    }

    /// Create an auditor with a custom catalog
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Run every rule against the configuration
    pub fn run_audit(&self, config: &Configuration) -> AuditResult {
        run_catalog(&self.catalog, config)
    }
}

impl Default for ConfigAuditor {
    fn default() -> Self {
        Self::new()
    }
}

fn run_catalog(catalog: &Catalog, config: &Configuration) -> AuditResult {
    info!(
        "Starting configuration audit: {} rules, {} settings",
        catalog.len(),
        config.len()
    );

    let mut findings = Vec::new();
    let mut summary = AuditSummary {
        rules: catalog.len(),
        ..Default::default()
    };

    for rule in catalog {
        if rule.is_informational() {
            debug!("Skipping informational rule: {} ({})", rule.id, rule.description);
            summary.informational += 1;
            continue;
        }

        for setting in &rule.settings {
            summary.total_checks += 1;

            match execute_check(rule, setting, config) {
                Some(finding) => {
                    summary.failed += 1;
                    if finding.is_missing() {
                        summary.not_set += 1;
                    }
                    findings.push(finding);
                }
                None => summary.passed += 1,
            }
        }
    }

    info!(
        "Audit complete: {} passed, {} failed ({} not set), {} informational rules",
        summary.passed, summary.failed, summary.not_set, summary.informational
    );

    AuditResult { findings, summary }
}

/// Check one setting of a rule, returning a finding on deviation
fn execute_check(rule: &Rule, setting: &Setting, config: &Configuration) -> Option<Finding> {
    let comparison = compare(&setting.key, config.get(&setting.key), &setting.recommended);

    debug!(
        "Check {} {}: current={} recommended={} passed={}",
        rule.id, setting.key, comparison.actual, comparison.recommended, comparison.passed
    );

    if comparison.passed {
        return None;
    }

    Some(Finding::new(
        rule.id.clone(),
        rule.description.clone(),
        setting.key.clone(),
        comparison.actual,
        comparison.recommended,
    ))
}

/// Compare a configured value (`None` when absent) with a recommendation
///
/// Both sides go through the same normalization. A blank actual value
/// becomes `Empty` before the equality test.
pub fn compare(key: &str, actual: Option<&str>, recommended: &str) -> Comparison {
    let mut actual = normalize_setting(key, actual.unwrap_or(NOT_SET));
    let recommended = normalize_setting(key, recommended);

    if actual.is_blank() {
        actual = CompareValue::text(EMPTY);
    }

    let passed = values_match(&actual, &recommended);
    Comparison {
        actual,
        recommended,
        passed,
    }
}

/// Audit a configuration, returning only the findings
pub fn audit(config: &Configuration, catalog: &Catalog) -> Vec<Finding> {
    run_catalog(catalog, config).findings
}
