//! Gender and number estimation for mention contexts.
//!
//! The linker calls a [`GenderModel`] and a [`NumberModel`] on every mention
//! context (except in similarity-only mode) and stores the results on the
//! context. Statistical models plug in through the same traits; the lexical
//! baselines here need no training data.
//!
//! # Example
//!
//! ```rust
//! use anno_coref::classify::{GenderModel, PronounGenderModel};
//! use anno_coref::{Gender, Mention, MentionContext, MentionType};
//!
//! let model = PronounGenderModel::default();
//! let he = MentionContext::new(
//!     Mention::new("he", 0, 2, 0).with_mention_type(MentionType::Pronoun),
//!     0, 0, 1,
//! );
//! let (gender, confidence) = model.compute_gender(&he);
//! assert_eq!(gender, Gender::Male);
//! assert!(confidence.get() > 0.5);
//! ```

use crate::lexicon;
use anno_coref_core::{Confidence, Gender, MentionContext, MentionType, Number};

/// Estimates the grammatical gender of a mention.
pub trait GenderModel: Send + Sync {
    /// Gender and the confidence of the estimate.
    fn compute_gender(&self, mention: &MentionContext) -> (Gender, Confidence);
}

/// Estimates the grammatical number of a mention.
pub trait NumberModel: Send + Sync {
    /// Number and the confidence of the estimate.
    fn compute_number(&self, mention: &MentionContext) -> (Number, Confidence);
}

fn looks_like_pronoun(mention: &MentionContext) -> bool {
    match mention.mention().mention_type {
        MentionType::Pronoun => true,
        MentionType::Unknown => lexicon::is_pronoun(mention.text()),
        MentionType::Proper | MentionType::Nominal => false,
    }
}

// =============================================================================
// Gender
// =============================================================================

/// Gender from pronouns only.
///
/// Names and noun phrases get `Unknown` with zero confidence. Gender-neutral
/// person pronouns ("they", "xe") also stay `Unknown`: they carry no binary
/// gender signal and must not pull an entity toward one.
#[derive(Debug, Clone)]
pub struct PronounGenderModel {
    pronoun_confidence: Confidence,
}

impl Default for PronounGenderModel {
    fn default() -> Self {
        Self {
            pronoun_confidence: Confidence::saturating(0.9),
        }
    }
}

impl PronounGenderModel {
    /// Create a model with default confidences.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Confidence reported for gendered pronouns.
    #[must_use]
    pub fn with_pronoun_confidence(mut self, confidence: Confidence) -> Self {
        self.pronoun_confidence = confidence;
        self
    }
}

impl GenderModel for PronounGenderModel {
    fn compute_gender(&self, mention: &MentionContext) -> (Gender, Confidence) {
        if !looks_like_pronoun(mention) {
            return (Gender::Unknown, Confidence::MIN);
        }
        match lexicon::pronoun_gender(mention.text()) {
            Some(g) if g.is_known() => (g, self.pronoun_confidence),
            _ => (Gender::Unknown, Confidence::MIN),
        }
    }
}

// =============================================================================
// Number
// =============================================================================

/// Number from the pronoun lexicon and simple morphology.
///
/// | Mention | Estimate |
/// |---------|----------|
/// | he / she / it | Singular @ pronoun confidence |
/// | we / us | Plural @ pronoun confidence |
/// | they / them | Plural @ ambiguous confidence |
/// | proper name | Singular @ name confidence |
/// | nominal with plural head ("dogs") | Plural @ nominal confidence |
/// | other nominal | Singular @ nominal confidence |
#[derive(Debug, Clone)]
pub struct LexicalNumberModel {
    pronoun_confidence: Confidence,
    ambiguous_confidence: Confidence,
    name_confidence: Confidence,
    nominal_confidence: Confidence,
}

impl Default for LexicalNumberModel {
    fn default() -> Self {
        Self {
            pronoun_confidence: Confidence::saturating(0.9),
            ambiguous_confidence: Confidence::saturating(0.6),
            name_confidence: Confidence::saturating(0.7),
            nominal_confidence: Confidence::saturating(0.6),
        }
    }
}

impl LexicalNumberModel {
    /// Create a model with default confidences.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Confidence reported for unambiguous pronouns.
    #[must_use]
    pub fn with_pronoun_confidence(mut self, confidence: Confidence) -> Self {
        self.pronoun_confidence = confidence;
        self
    }

    /// Confidence reported for proper names.
    #[must_use]
    pub fn with_name_confidence(mut self, confidence: Confidence) -> Self {
        self.name_confidence = confidence;
        self
    }

    /// Confidence reported for common nouns.
    #[must_use]
    pub fn with_nominal_confidence(mut self, confidence: Confidence) -> Self {
        self.nominal_confidence = confidence;
        self
    }
}

/// Crude English plural test on a head word.
fn plural_head(head: &str) -> bool {
    let lower = head.to_lowercase();
    lower.len() > 3
        && lower.ends_with('s')
        && !lower.ends_with("ss")
        && !lower.ends_with("us")
        && !lower.ends_with("is")
}

impl NumberModel for LexicalNumberModel {
    fn compute_number(&self, mention: &MentionContext) -> (Number, Confidence) {
        if looks_like_pronoun(mention) {
            return match lexicon::pronoun_number(mention.text()) {
                Some(n) if lexicon::is_they_form(mention.text()) => (n, self.ambiguous_confidence),
                Some(n) => (n, self.pronoun_confidence),
                None => (Number::Unknown, Confidence::MIN),
            };
        }
        match mention.mention().mention_type {
            MentionType::Proper => (Number::Singular, self.name_confidence),
            MentionType::Nominal if plural_head(mention.mention().head_word()) => {
                (Number::Plural, self.nominal_confidence)
            }
            MentionType::Nominal => (Number::Singular, self.nominal_confidence),
            MentionType::Pronoun | MentionType::Unknown => (Number::Unknown, Confidence::MIN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anno_coref_core::Mention;

    fn ctx(text: &str, mention_type: MentionType) -> MentionContext {
        MentionContext::new(
            Mention::new(text, 0, text.len(), 0).with_mention_type(mention_type),
            0,
            0,
            1,
        )
    }

    #[test]
    fn names_are_never_gendered() {
        let model = PronounGenderModel::default();
        for name in ["Mary", "John", "Alex"] {
            let (g, c) = model.compute_gender(&ctx(name, MentionType::Proper));
            assert_eq!(g, Gender::Unknown);
            assert_eq!(c, Confidence::MIN);
        }
    }

    #[test]
    fn gendered_pronouns() {
        let model = PronounGenderModel::new().with_pronoun_confidence(Confidence::saturating(0.8));
        assert_eq!(
            model.compute_gender(&ctx("She", MentionType::Pronoun)),
            (Gender::Female, Confidence::saturating(0.8))
        );
        assert_eq!(
            model.compute_gender(&ctx("it", MentionType::Unknown)).0,
            Gender::Neuter
        );
    }

    #[test]
    fn neutral_pronouns_carry_no_gender() {
        let model = PronounGenderModel::default();
        assert_eq!(
            model.compute_gender(&ctx("they", MentionType::Pronoun)),
            (Gender::Unknown, Confidence::MIN)
        );
        assert_eq!(
            model.compute_gender(&ctx("xe", MentionType::Pronoun)).0,
            Gender::Unknown
        );
    }

    #[test]
    fn pronoun_typed_as_nominal_is_not_a_pronoun() {
        let model = PronounGenderModel::default();
        assert_eq!(model.compute_gender(&ctx("he", MentionType::Nominal)).0, Gender::Unknown);
    }

    #[test]
    fn number_estimates() {
        let model = LexicalNumberModel::default();
        assert_eq!(model.compute_number(&ctx("he", MentionType::Pronoun)).0, Number::Singular);
        assert_eq!(model.compute_number(&ctx("we", MentionType::Pronoun)).0, Number::Plural);
        assert_eq!(model.compute_number(&ctx("Acme", MentionType::Proper)).0, Number::Singular);
        assert_eq!(model.compute_number(&ctx("the dogs", MentionType::Nominal)).0, Number::Plural);
        assert_eq!(
            model.compute_number(&ctx("the boss", MentionType::Nominal)).0,
            Number::Singular
        );
        assert_eq!(model.compute_number(&ctx("Acme", MentionType::Unknown)).0, Number::Unknown);
    }

    #[test]
    fn they_is_less_certain_than_he() {
        let model = LexicalNumberModel::default();
        let (_, they) = model.compute_number(&ctx("they", MentionType::Pronoun));
        let (_, he) = model.compute_number(&ctx("he", MentionType::Pronoun));
        assert!(he.exceeds(they));
    }
}
