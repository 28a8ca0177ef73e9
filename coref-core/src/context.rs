//! Mentions enriched with position and gender/number estimates.

use crate::{Confidence, Gender, Mention, NodeRef, Number};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A mention together with everything the linker knows about it.
///
/// Built once by the context builder and never modified after it has been
/// handed to the linker. The `with_*` methods consume `self` so the gender
/// and number estimates are filled in before the value is shared.
///
/// # Example
///
/// ```rust
/// use anno_coref_core::{Confidence, Gender, Mention, MentionContext};
///
/// let ctx = MentionContext::new(Mention::new("she", 0, 3, 0), 0, 0, 1)
///     .with_gender(Gender::Female, Confidence::saturating(0.9));
///
/// assert_eq!(ctx.gender(), Gender::Female);
/// assert_eq!(ctx.mentions_in_sentence(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionContext {
    index: usize,
    index_in_sentence: usize,
    mentions_in_sentence: usize,
    mention: Mention,
    gender: Gender,
    gender_confidence: Confidence,
    number: Number,
    number_confidence: Confidence,
}

impl MentionContext {
    /// Create a context for `mention` at document position `index`.
    ///
    /// Gender and number start out `Unknown` with zero confidence.
    #[must_use]
    pub fn new(
        mention: Mention,
        index: usize,
        index_in_sentence: usize,
        mentions_in_sentence: usize,
    ) -> Self {
        Self {
            index,
            index_in_sentence,
            mentions_in_sentence,
            mention,
            gender: Gender::Unknown,
            gender_confidence: Confidence::MIN,
            number: Number::Unknown,
            number_confidence: Confidence::MIN,
        }
    }

    /// Set the gender estimate.
    #[must_use]
    pub fn with_gender(mut self, gender: Gender, confidence: Confidence) -> Self {
        self.gender = gender;
        self.gender_confidence = confidence;
        self
    }

    /// Set the number estimate.
    #[must_use]
    pub fn with_number(mut self, number: Number, confidence: Confidence) -> Self {
        self.number = number;
        self.number_confidence = confidence;
        self
    }

    /// Position of this mention in the document's mention sequence.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Index of the sentence containing this mention.
    #[must_use]
    pub fn sentence(&self) -> usize {
        self.mention.sentence
    }

    /// Position of this mention among the mentions of its sentence.
    #[must_use]
    pub fn index_in_sentence(&self) -> usize {
        self.index_in_sentence
    }

    /// Number of mentions in this mention's sentence.
    #[must_use]
    pub fn mentions_in_sentence(&self) -> usize {
        self.mentions_in_sentence
    }

    /// The originating mention.
    #[must_use]
    pub fn mention(&self) -> &Mention {
        &self.mention
    }

    /// Surface form.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.mention.text
    }

    /// Link to the originating syntactic node.
    #[must_use]
    pub fn node(&self) -> Option<NodeRef> {
        self.mention.node
    }

    /// Gold cluster label copied from the mention.
    #[must_use]
    pub fn id(&self) -> Option<u64> {
        self.mention.id
    }

    /// Estimated gender.
    #[must_use]
    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// Confidence of the gender estimate.
    #[must_use]
    pub fn gender_confidence(&self) -> Confidence {
        self.gender_confidence
    }

    /// Estimated number.
    #[must_use]
    pub fn number(&self) -> Number {
        self.number
    }

    /// Confidence of the number estimate.
    #[must_use]
    pub fn number_confidence(&self) -> Confidence {
        self.number_confidence
    }
}

impl fmt::Display for MentionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} (s{}:{}/{})",
            self.index,
            self.mention,
            self.sentence(),
            self.index_in_sentence,
            self.mentions_in_sentence
        )
    }
}
