//! Confidence classes assigned by the primary annotation source

use crate::DomainError;
use std::fmt;

/// Confidence of a primary-source mapping
///
/// Variants are declared in ascending order so the derived `Ord` gives
/// `Low < Medium < Good < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfidenceClass {
    /// Weak textual match
    Low,

    /// Partial match
    Medium,

    /// Strong match, not curated
    Good,

    /// Curated or exact match; the only class eligible to auto-finish
    High,
}

impl ConfidenceClass {
    /// All classes in ascending order
    pub const ALL: [ConfidenceClass; 4] = [
        ConfidenceClass::Low,
        ConfidenceClass::Medium,
        ConfidenceClass::Good,
        ConfidenceClass::High,
    ];

    /// Get the class name as the annotation service spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceClass::Low => "LOW",
            ConfidenceClass::Medium => "MEDIUM",
            ConfidenceClass::Good => "GOOD",
            ConfidenceClass::High => "HIGH",
        }
    }

    /// Parse a class name, ignoring case
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "LOW" => Some(ConfidenceClass::Low),
            "MEDIUM" => Some(ConfidenceClass::Medium),
            "GOOD" => Some(ConfidenceClass::Good),
            "HIGH" => Some(ConfidenceClass::High),
            _ => None,
        }
    }

    /// Whether mappings of this class may finish a trait or seed cross-references
    pub fn is_high(&self) -> bool {
        *self == ConfidenceClass::High
    }
}

impl fmt::Display for ConfidenceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ConfidenceClass {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| DomainError::UnknownConfidence(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order() {
        assert!(ConfidenceClass::Low < ConfidenceClass::Medium);
        assert!(ConfidenceClass::Medium < ConfidenceClass::Good);
        assert!(ConfidenceClass::Good < ConfidenceClass::High);

        let mut shuffled = vec![
            ConfidenceClass::Good,
            ConfidenceClass::High,
            ConfidenceClass::Low,
            ConfidenceClass::Medium,
        ];
        shuffled.sort();
        assert_eq!(shuffled, ConfidenceClass::ALL.to_vec());
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(ConfidenceClass::parse("high"), Some(ConfidenceClass::High));
        assert_eq!(ConfidenceClass::parse("Good"), Some(ConfidenceClass::Good));
        assert_eq!(ConfidenceClass::parse(" MEDIUM "), Some(ConfidenceClass::Medium));
        assert_eq!(ConfidenceClass::parse("certain"), None);
    }

    #[test]
    fn test_from_str_error() {
        let err = "certain".parse::<ConfidenceClass>().unwrap_err();
        assert_eq!(err, DomainError::UnknownConfidence("certain".to_string()));
    }

    #[test]
    fn test_display_round_trip() {
        for class in ConfidenceClass::ALL {
            assert_eq!(class.to_string().parse::<ConfidenceClass>().unwrap(), class);
        }
    }

    #[test]
    fn test_only_high_is_high() {
        assert!(ConfidenceClass::High.is_high());
        assert!(!ConfidenceClass::Good.is_high());
        assert!(!ConfidenceClass::Low.is_high());
    }
}
