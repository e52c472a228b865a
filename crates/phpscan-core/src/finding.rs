//! Finding definitions - deviations from a baseline rule

use crate::value::CompareValue;
use serde::{Deserialize, Serialize};

/// A configuration setting that deviates from its recommended value
///
/// Values are kept as normalization produced them: numeric for
/// magnitude-bearing keys, `Not Set` / `Empty` placeholders for missing
/// or blank settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Rule that generated this finding
    pub rule_id: String,
    pub description: String,

    /// Configuration key that deviates
    pub key: String,

    /// Value found in the configuration
    pub actual: CompareValue,
    /// Value the rule recommends
    pub recommended: CompareValue,
}

impl Finding {
    pub fn new(
        rule_id: impl Into<String>,
        description: impl Into<String>,
        key: impl Into<String>,
        actual: CompareValue,
        recommended: CompareValue,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            description: description.into(),
            key: key.into(),
            actual,
            recommended,
        }
    }

    /// True when the key was absent from the configuration
    pub fn is_missing(&self) -> bool {
        self.actual.as_text() == Some(crate::value::NOT_SET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finding_new() {
        let finding = Finding::new(
            "P9",
            "File and Upload Security",
            "file_uploads",
            CompareValue::not_set(),
            CompareValue::text("Off"),
        );

        assert_eq!(finding.rule_id, "P9");
        assert_eq!(finding.key, "file_uploads");
        assert!(finding.is_missing());
    }

    #[test]
    fn test_finding_serializes_values_by_kind() {
        let finding = Finding::new(
            "P16",
            "Performance Settings",
            "upload_max_filesize",
            CompareValue::Numeric(4.0),
            CompareValue::Numeric(2.0),
        );

        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["rule_id"], "P16");
        assert_eq!(json["actual"], 4.0);
        assert_eq!(json["recommended"], 2.0);
        assert!(!finding.is_missing());
    }
}
