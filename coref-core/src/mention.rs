//! Raw mentions as handed over by a mention finder.
//!
//! A [`Mention`] is one occurrence of a referring expression: a proper name
//! ("John Smith"), a nominal ("the company"), or a pronoun ("he"). Mention
//! extraction and parsing happen upstream; this type only carries what the
//! linker and its resolvers read.
//!
//! # Example
//!
//! ```rust
//! use anno_coref_core::{Mention, MentionType, NodeRef};
//!
//! // "John went home. He slept."
//! let john = Mention::new("John", 0, 4, 0)
//!     .with_mention_type(MentionType::Proper)
//!     .with_node(NodeRef(3));
//! let he = Mention::new("He", 16, 18, 1).with_mention_type(MentionType::Pronoun);
//!
//! assert!(john.node.is_some());
//! assert!(he.is_pronoun());
//! assert!(!john.overlaps(&he));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to the syntactic node a mention was extracted from.
///
/// The linker never dereferences it; it is carried through so resolvers and
/// callers can get back to the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeRef(pub u64);

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Type of referring expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MentionType {
    /// Proper name ("John Smith", "Microsoft")
    Proper,
    /// Common noun phrase ("the company", "a dog")
    Nominal,
    /// Pronoun ("he", "it", "they")
    Pronoun,
    /// Unknown/unspecified
    #[default]
    Unknown,
}

/// A single mention (text span) that may corefer with other mentions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mention {
    /// Surface form
    pub text: String,
    /// Start character offset (inclusive)
    pub start: usize,
    /// End character offset (exclusive)
    pub end: usize,
    /// Index of the sentence containing the mention
    pub sentence: usize,
    /// Link to the originating syntactic node
    pub node: Option<NodeRef>,
    /// Gold cluster label, present only in annotated training data
    pub id: Option<u64>,
    /// Head word, if a head finder ran upstream
    pub head: Option<String>,
    /// Kind of referring expression
    pub mention_type: MentionType,
    /// Named-entity category (e.g. "PER", "ORG")
    pub name_type: Option<String>,
    /// Sense identifiers attached upstream
    pub synsets: Vec<String>,
}

impl Mention {
    /// Create a new mention with text, span and sentence index.
    #[must_use]
    pub fn new(text: impl Into<String>, start: usize, end: usize, sentence: usize) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            sentence,
            node: None,
            id: None,
            head: None,
            mention_type: MentionType::Unknown,
            name_type: None,
            synsets: Vec::new(),
        }
    }

    /// Attach the syntactic node link.
    #[must_use]
    pub fn with_node(mut self, node: NodeRef) -> Self {
        self.node = Some(node);
        self
    }

    /// Attach a gold cluster label.
    #[must_use]
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the head word.
    #[must_use]
    pub fn with_head(mut self, head: impl Into<String>) -> Self {
        self.head = Some(head.into());
        self
    }

    /// Set the mention type.
    #[must_use]
    pub fn with_mention_type(mut self, mention_type: MentionType) -> Self {
        self.mention_type = mention_type;
        self
    }

    /// Set the named-entity category.
    #[must_use]
    pub fn with_name_type(mut self, name_type: impl Into<String>) -> Self {
        self.name_type = Some(name_type.into());
        self
    }

    /// Attach sense identifiers.
    #[must_use]
    pub fn with_synsets<S: Into<String>>(mut self, synsets: impl IntoIterator<Item = S>) -> Self {
        self.synsets = synsets.into_iter().map(Into::into).collect();
        self
    }

    /// Head word if known, otherwise the last token of the surface form.
    #[must_use]
    pub fn head_word(&self) -> &str {
        match &self.head {
            Some(h) => h.as_str(),
            None => self.text.split_whitespace().last().unwrap_or(""),
        }
    }

    /// Whether this mention is a pronoun.
    #[must_use]
    pub fn is_pronoun(&self) -> bool {
        self.mention_type == MentionType::Pronoun
    }

    /// Whether this mention is a proper name.
    #[must_use]
    pub fn is_proper(&self) -> bool {
        self.mention_type == MentionType::Proper
    }

    /// Check if this mention overlaps with another.
    #[must_use]
    pub fn overlaps(&self, other: &Mention) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Span length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if empty span.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Mention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" [{}-{})", self.text, self.start, self.end)
    }
}
