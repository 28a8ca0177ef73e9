//! Mention context construction.
//!
//! Turns the ordered mention list of a document into [`MentionContext`]s,
//! one per mention, in the same order:
//!
//! ```text
//! sentence:     0     0     0  |  1     1  |  2
//! mention:      John  Mary  it |  he    it |  she
//! in-sentence:  0     1     2  |  0     1  |  0
//! of:           3     3     3  |  2     2  |  1
//! ```
//!
//! Mentions must arrive grouped by sentence, sentences in increasing order.
//! That is checked up front and a violating sequence is rejected.

use crate::classify::{GenderModel, NumberModel};
use crate::{Error, Result};
use anno_coref_core::{Mention, MentionContext};

/// Builds mention contexts, optionally estimating gender and number.
pub struct ContextBuilder<'a> {
    gender: &'a dyn GenderModel,
    number: &'a dyn NumberModel,
    compute_attributes: bool,
}

impl<'a> ContextBuilder<'a> {
    /// Create a builder that runs both classifiers.
    #[must_use]
    pub fn new(gender: &'a dyn GenderModel, number: &'a dyn NumberModel) -> Self {
        Self {
            gender,
            number,
            compute_attributes: true,
        }
    }

    /// Skip gender and number estimation (similarity-only runs).
    #[must_use]
    pub fn similarity_only(mut self, enabled: bool) -> Self {
        self.compute_attributes = !enabled;
        self
    }

    /// Build one context per mention.
    ///
    /// A mention without a syntactic node link is logged and still gets a
    /// context.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if sentence indices ever decrease, which
    /// means sentences are out of order or a sentence's mentions are not
    /// contiguous.
    pub fn build(&self, mentions: &[Mention]) -> Result<Vec<MentionContext>> {
        check_sentence_order(mentions)?;

        let mut contexts = Vec::with_capacity(mentions.len());
        let mut index_in_sentence = 0;
        let mut mentions_in_sentence = 0;

        for (i, mention) in mentions.iter().enumerate() {
            let new_sentence = i == 0 || mention.sentence != mentions[i - 1].sentence;
            if new_sentence {
                index_in_sentence = 0;
                mentions_in_sentence = mentions[i..]
                    .iter()
                    .take_while(|m| m.sentence == mention.sentence)
                    .count();
            } else {
                index_in_sentence += 1;
            }

            if mention.node.is_none() {
                log::warn!(
                    "mention {} {} has no syntactic node link; continuing without it",
                    i,
                    mention
                );
            }

            let mut ctx =
                MentionContext::new(mention.clone(), i, index_in_sentence, mentions_in_sentence);
            if self.compute_attributes {
                let (gender, gender_confidence) = self.gender.compute_gender(&ctx);
                let (number, number_confidence) = self.number.compute_number(&ctx);
                ctx = ctx
                    .with_gender(gender, gender_confidence)
                    .with_number(number, number_confidence);
            }
            contexts.push(ctx);
        }

        Ok(contexts)
    }
}

/// Reject sequences whose sentence index goes backwards.
fn check_sentence_order(mentions: &[Mention]) -> Result<()> {
    for (i, pair) in mentions.windows(2).enumerate() {
        if pair[1].sentence < pair[0].sentence {
            return Err(Error::invalid_input(format!(
                "mentions are not grouped by sentence: mention {} is in sentence {} \
                 after a mention in sentence {}",
                i + 1,
                pair[1].sentence,
                pair[0].sentence
            )));
        }
    }
    Ok(())
}
