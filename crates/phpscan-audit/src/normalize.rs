//! Value normalization
//!
//! Two axes: text is trimmed and lowercased; the four size/duration
//! settings additionally convert unit-suffixed magnitudes to megabytes.

use phpscan_core::CompareValue;

/// Settings whose values are sizes or durations
pub const MAGNITUDE_KEYS: [&str; 4] = [
    "max_execution_time",
    "memory_limit",
    "post_max_size",
    "upload_max_filesize",
];

pub fn is_magnitude_key(key: &str) -> bool {
    MAGNITUDE_KEYS.contains(&key)
}

/// Fold case and surrounding whitespace
pub fn normalize_text(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Convert a magnitude to megabytes
///
/// `M` keeps the numeric part, `G` multiplies it by 1024. A bare digit
/// string is taken as-is, which treats it as megabytes even though PHP
/// reads it as bytes. Anything else comes back unchanged as text.
pub fn to_megabytes(value: &str) -> CompareValue {
    let suffixed = |unit: char| {
        value
            .strip_suffix(unit)
            .or_else(|| value.strip_suffix(unit.to_ascii_lowercase()))
            .and_then(|number| number.trim().parse::<f64>().ok())
    };

    if let Some(megabytes) = suffixed('M') {
        CompareValue::Numeric(megabytes)
    } else if let Some(gigabytes) = suffixed('G') {
        CompareValue::Numeric(gigabytes * 1024.0)
    } else if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        value
            .parse::<f64>()
            .map(CompareValue::Numeric)
            .unwrap_or_else(|_| CompareValue::text(value))
    } else {
        CompareValue::text(value)
    }
}

/// Produce the comparison form of a value for the given key
pub fn normalize_setting(key: &str, value: &str) -> CompareValue {
    if is_magnitude_key(key) {
        to_megabytes(value)
    } else {
        CompareValue::text(value)
    }
}

/// Equality after normalization; a number never equals text
pub fn values_match(actual: &CompareValue, recommended: &CompareValue) -> bool {
    match (actual, recommended) {
        (CompareValue::Numeric(a), CompareValue::Numeric(b)) => a == b,
        (CompareValue::Text(a), CompareValue::Text(b)) => normalize_text(a) == normalize_text(b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  On \t"), "on");
        assert_eq!(normalize_text("Strict"), "strict");
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn test_megabyte_suffix() {
        assert_eq!(to_megabytes("128M"), CompareValue::Numeric(128.0));
        assert_eq!(to_megabytes("4m"), CompareValue::Numeric(4.0));
        assert_eq!(to_megabytes("0.5M"), CompareValue::Numeric(0.5));
    }

    #[test]
    fn test_gigabyte_suffix() {
        assert_eq!(to_megabytes("1G"), CompareValue::Numeric(1024.0));
        assert_eq!(to_megabytes("2g"), CompareValue::Numeric(2048.0));
        assert!(!values_match(&to_megabytes("1G"), &to_megabytes("512M")));
    }

    #[test]
    fn test_bare_digits_taken_as_is() {
        assert_eq!(to_megabytes("30"), CompareValue::Numeric(30.0));
        assert_eq!(to_megabytes("8"), to_megabytes("8M"));
        assert_eq!(to_megabytes("007"), CompareValue::Numeric(7.0));
    }

    #[test]
    fn test_unconvertible_stays_text() {
        assert_eq!(to_megabytes("-1"), CompareValue::text("-1"));
        assert_eq!(to_megabytes("128K"), CompareValue::text("128K"));
        assert_eq!(to_megabytes("M"), CompareValue::text("M"));
        assert_eq!(to_megabytes("lotsM"), CompareValue::text("lotsM"));
        assert_eq!(to_megabytes("Not Set"), CompareValue::text("Not Set"));
        assert_eq!(to_megabytes(""), CompareValue::text(""));
    }

    #[test]
    fn test_normalize_setting_only_converts_magnitude_keys() {
        assert_eq!(
            normalize_setting("memory_limit", "256M"),
            CompareValue::Numeric(256.0)
        );
        assert_eq!(
            normalize_setting("session.entropy_length", "32"),
            CompareValue::text("32")
        );
    }

    #[test]
    fn test_values_match() {
        assert!(values_match(&CompareValue::text("on"), &CompareValue::text(" On")));
        assert!(!values_match(&CompareValue::text("on"), &CompareValue::text("off")));
        assert!(values_match(
            &CompareValue::Numeric(2.0),
            &CompareValue::Numeric(2.0)
        ));
        assert!(!values_match(
            &CompareValue::text("2.0"),
            &CompareValue::Numeric(2.0)
        ));
    }

    #[test]
    fn test_normalization_is_pure() {
        for value in ["1G", "64M", "15", "-1", "abc"] {
            assert_eq!(to_megabytes(value), to_megabytes(value));
        }
    }
}
