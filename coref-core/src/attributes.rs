//! Grammatical attributes estimated for mentions and aggregated on entities.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Gender
// =============================================================================

/// Grammatical gender of a referring expression.
///
/// `Neuter` is the non-person gender ("it"). `Unknown` means no evidence,
/// which is what a proper name gets: gender is never read off a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// he / him / his
    Male,
    /// she / her / hers
    Female,
    /// it / its
    Neuter,
    /// No usable evidence
    #[default]
    Unknown,
}

impl Gender {
    /// Short label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Neuter => "neuter",
            Gender::Unknown => "unknown",
        }
    }

    /// Whether a value other than `Unknown` was assigned.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Gender::Unknown)
    }

    /// Two genders are compatible unless both are known and differ.
    #[must_use]
    pub fn compatible(&self, other: &Gender) -> bool {
        !self.is_known() || !other.is_known() || self == other
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Number
// =============================================================================

/// Grammatical number of a referring expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Number {
    /// One referent
    Singular,
    /// More than one referent
    Plural,
    /// No usable evidence
    #[default]
    Unknown,
}

impl Number {
    /// Short label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Number::Singular => "singular",
            Number::Plural => "plural",
            Number::Unknown => "unknown",
        }
    }

    /// Whether a value other than `Unknown` was assigned.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Number::Unknown)
    }

    /// Two numbers are compatible unless both are known and differ.
    #[must_use]
    pub fn compatible(&self, other: &Number) -> bool {
        !self.is_known() || !other.is_known() || self == other
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_is_compatible_with_everything() {
        for g in [Gender::Male, Gender::Female, Gender::Neuter, Gender::Unknown] {
            assert!(Gender::Unknown.compatible(&g));
            assert!(g.compatible(&Gender::Unknown));
        }
        assert!(Number::Unknown.compatible(&Number::Plural));
    }

    #[test]
    fn known_values_must_agree() {
        assert!(!Gender::Male.compatible(&Gender::Female));
        assert!(Gender::Neuter.compatible(&Gender::Neuter));
        assert!(!Number::Singular.compatible(&Number::Plural));
    }

    #[test]
    fn serde_uses_lowercase_labels() {
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"female\"");
        assert_eq!(serde_json::to_string(&Number::Plural).unwrap(), "\"plural\"");
    }
}
