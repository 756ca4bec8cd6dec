//! Beleg reference numbers in the format `BEL-YYYY-NNNNNN`.
//!
//! Every journal entry carries exactly one of these. Numbers are assigned by
//! the per-year sequence and are never reused.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix for all entry reference numbers.
pub const REFERENCE_PREFIX: &str = "BEL";

/// Error parsing a reference number.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid reference number: {0}")]
pub struct InvalidReferenceNumber(pub String);

/// A parsed `BEL-YYYY-NNNNNN` reference number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReferenceNumber {
    /// Calendar year the number was issued in.
    pub year: i32,
    /// Sequence number within the year (1-based, gapless for committed bookings).
    pub sequence: i64,
}

impl ReferenceNumber {
    /// Creates a reference number from its parts.
    #[must_use]
    pub const fn new(year: i32, sequence: i64) -> Self {
        Self { year, sequence }
    }
}

impl std::fmt::Display for ReferenceNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{REFERENCE_PREFIX}-{}-{:06}", self.year, self.sequence)
    }
}

impl std::str::FromStr for ReferenceNumber {
    type Err = InvalidReferenceNumber;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '-');
        let prefix = parts.next().unwrap_or_default();
        let year = parts.next().unwrap_or_default();
        let sequence = parts.next().unwrap_or_default();

        if prefix != REFERENCE_PREFIX || year.len() != 4 || sequence.len() < 6 {
            return Err(InvalidReferenceNumber(s.to_string()));
        }

        let year: i32 = year
            .parse()
            .map_err(|_| InvalidReferenceNumber(s.to_string()))?;
        let sequence: i64 = sequence
            .parse()
            .map_err(|_| InvalidReferenceNumber(s.to_string()))?;

        if sequence < 1 {
            return Err(InvalidReferenceNumber(s.to_string()));
        }

        Ok(Self { year, sequence })
    }
}

impl TryFrom<String> for ReferenceNumber {
    type Error = InvalidReferenceNumber;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReferenceNumber> for String {
    fn from(value: ReferenceNumber) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_format() {
        assert_eq!(ReferenceNumber::new(2026, 1).to_string(), "BEL-2026-000001");
        assert_eq!(
            ReferenceNumber::new(2026, 123_456).to_string(),
            "BEL-2026-123456"
        );
        // Sequences past a million keep all digits
        assert_eq!(
            ReferenceNumber::new(2026, 1_000_001).to_string(),
            "BEL-2026-1000001"
        );
    }

    #[test]
    fn test_roundtrip() {
        let parsed: ReferenceNumber = "BEL-2026-000042".parse().unwrap();
        assert_eq!(parsed, ReferenceNumber::new(2026, 42));
        assert_eq!(parsed.to_string(), "BEL-2026-000042");
    }

    #[rstest]
    #[case("BEL-2026-00001")] // too short
    #[case("XYZ-2026-000001")] // wrong prefix
    #[case("BEL-26-000001")] // two-digit year
    #[case("BEL-2026-000000")] // sequence starts at 1
    #[case("BEL-2026-abcdef")]
    #[case("")]
    fn test_rejects_malformed(#[case] input: &str) {
        assert!(input.parse::<ReferenceNumber>().is_err());
    }

    #[test]
    fn test_ordering_within_year() {
        let a = ReferenceNumber::new(2026, 1);
        let b = ReferenceNumber::new(2026, 2);
        let c = ReferenceNumber::new(2027, 1);
        assert!(a < b);
        assert!(b < c);
    }
}
