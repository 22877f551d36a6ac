//! Sequential publication numbers of the form `PP-2024-007`

use pdf_compose::Category;
use std::fmt;
use std::str::FromStr;

/// Minimum digits of the sequence part
const SEQUENCE_WIDTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicationNumber {
    pub category: Category,
    pub year: i32,
    pub sequence: u32,
}

impl PublicationNumber {
    pub fn new(category: Category, year: i32, sequence: u32) -> Self {
        Self {
            category,
            year,
            sequence,
        }
    }

    /// Prefix shared by every number of a category and year, e.g. `WP-2024-`
    pub fn prefix(category: Category, year: i32) -> String {
        format!("{}-{}-", category, year)
    }

    /// Next number after the highest sequence among `existing` with the same
    /// category and year. Entries that do not parse are ignored.
    pub fn next_in_sequence<'a>(
        category: Category,
        year: i32,
        existing: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let max = existing
            .into_iter()
            .filter_map(|s| s.parse::<PublicationNumber>().ok())
            .filter(|n| n.category == category && n.year == year)
            .map(|n| n.sequence)
            .max()
            .unwrap_or(0);

        Self::new(category, year, max + 1)
    }
}

impl fmt::Display for PublicationNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{:0width$}",
            self.category,
            self.year,
            self.sequence,
            width = SEQUENCE_WIDTH
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid publication number: {0}")]
pub struct ParseNumberError(String);

impl FromStr for PublicationNumber {
    type Err = ParseNumberError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || ParseNumberError(s.to_string());
        let mut parts = s.trim().splitn(3, '-');

        let category = parts
            .next()
            .and_then(|c| c.parse::<Category>().ok())
            .ok_or_else(invalid)?;
        let year = parts
            .next()
            .filter(|y| y.len() == 4)
            .and_then(|y| y.parse::<i32>().ok())
            .ok_or_else(invalid)?;
        let sequence = parts
            .next()
            .filter(|q| !q.is_empty() && q.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|q| q.parse::<u32>().ok())
            .ok_or_else(invalid)?;

        Ok(Self::new(category, year, sequence))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_sequence() {
        let number = PublicationNumber::new(Category::PP, 2024, 7);
        assert_eq!(number.to_string(), "PP-2024-007");

        let number = PublicationNumber::new(Category::WP, 2024, 1234);
        assert_eq!(number.to_string(), "WP-2024-1234");
    }

    #[test]
    fn test_parse_roundtrip() {
        let number: PublicationNumber = "BR-2023-042".parse().unwrap();
        assert_eq!(number, PublicationNumber::new(Category::BR, 2023, 42));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("PP-2024".parse::<PublicationNumber>().is_err());
        assert!("XX-2024-001".parse::<PublicationNumber>().is_err());
        assert!("PP-24-001".parse::<PublicationNumber>().is_err());
        assert!("PP-2024-00a".parse::<PublicationNumber>().is_err());
        assert!("PP-2024--1".parse::<PublicationNumber>().is_err());
    }

    #[test]
    fn test_next_in_sequence_uses_max_of_prefix() {
        let existing = [
            "PP-2024-001",
            "PP-2024-009",
            "PP-2024-003",
            "WP-2024-050",
            "PP-2023-120",
            "Publication No",
        ];
        let next = PublicationNumber::next_in_sequence(Category::PP, 2024, existing);
        assert_eq!(next.to_string(), "PP-2024-010");
    }

    #[test]
    fn test_next_in_sequence_starts_at_one() {
        let next = PublicationNumber::next_in_sequence(Category::MN, 2025, []);
        assert_eq!(next.to_string(), "MN-2025-001");
    }
}
