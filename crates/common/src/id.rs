//! ID generation utilities.

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use ulid::Ulid;

/// Prefix carried by every report identifier.
pub const REPORT_ID_PREFIX: &str = "CR";

/// Number of timestamp digits kept in a report identifier.
const REPORT_ID_DIGITS: u32 = 6;

#[allow(clippy::expect_used)]
static REPORT_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^CR[0-9]{6}$").expect("static report id pattern"));

/// ID generator for entities.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    _private: (),
}

impl IdGenerator {
    /// Create a new ID generator.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Generate a new ULID-based ID.
    #[must_use]
    pub fn generate(&self) -> String {
        Ulid::new().to_string().to_lowercase()
    }

    /// Current time in milliseconds since the Unix epoch.
    #[must_use]
    pub fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    /// Millisecond timestamp rendered as a decimal string.
    ///
    /// Used as the identifier of registered identities.
    #[must_use]
    pub fn timestamp_id(&self) -> String {
        self.now_millis().to_string()
    }

    /// Report identifier for the current instant.
    #[must_use]
    pub fn report_id(&self) -> String {
        self.report_id_at(self.now_millis())
    }

    /// Report identifier for a given millisecond timestamp.
    ///
    /// The identifier is `CR` followed by the last six decimal digits of the
    /// timestamp. Two reports submitted exactly 1,000,000 ms apart map to the
    /// same identifier; callers that need uniqueness must check the store.
    #[must_use]
    pub fn report_id_at(&self, millis: i64) -> String {
        let modulus = 10_i64.pow(REPORT_ID_DIGITS);
        let digits = millis.rem_euclid(modulus);
        format!(
            "{REPORT_ID_PREFIX}{digits:0width$}",
            width = REPORT_ID_DIGITS as usize
        )
    }
}

/// Whether a string has the shape of a report identifier (`CR` + 6 digits).
#[must_use]
pub fn is_report_id(candidate: &str) -> bool {
    REPORT_ID_PATTERN.is_match(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_ulid() {
        let id_gen = IdGenerator::new();
        let id1 = id_gen.generate();
        let id2 = id_gen.generate();

        assert_eq!(id1.len(), 26);
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_report_id_keeps_last_six_digits() {
        let id_gen = IdGenerator::new();
        assert_eq!(id_gen.report_id_at(1_736_951_400_123), "CR400123");
    }

    #[test]
    fn test_report_id_zero_pads() {
        let id_gen = IdGenerator::new();
        assert_eq!(id_gen.report_id_at(1_736_950_000_042), "CR000042");
        assert_eq!(id_gen.report_id_at(7), "CR000007");
    }

    #[test]
    fn test_report_id_matches_pattern() {
        let id_gen = IdGenerator::new();
        let id = id_gen.report_id();
        assert!(is_report_id(&id), "{id} should match the report id pattern");
    }

    #[test]
    fn test_is_report_id_rejects_other_shapes() {
        assert!(is_report_id("CR123456"));
        assert!(!is_report_id("CR12345"));
        assert!(!is_report_id("cr123456"));
        assert!(!is_report_id("CR1234567"));
        assert!(!is_report_id(" CR123456"));
    }

    #[test]
    fn test_timestamp_id_is_numeric() {
        let id_gen = IdGenerator::new();
        let id = id_gen.timestamp_id();
        assert!(id.chars().all(|c| c.is_ascii_digit()));
    }
}
