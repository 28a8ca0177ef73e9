//! Clusters of coreferent mentions.
//!
//! A [`DiscourseElement`] is the bare cluster: mentions in document order
//! plus an id. A [`DiscourseEntity`] adds what the cluster as a whole is
//! believed to be (category, senses, gender, number).

use crate::{Confidence, Gender, MentionContext, Number};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// =============================================================================
// EntityKey
// =============================================================================

/// Stable handle to an entity inside one [`crate::DiscourseModel`].
///
/// Assigned when the entity is added to a model and never changed, even when
/// the entity's id is overwritten (flat mode) or the entity moves in the
/// recency order. Keys of entities absorbed by a merge are not redirected to
/// the survivor; looking them up afterwards finds nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityKey(u64);

impl EntityKey {
    /// Key of an entity that has not been added to a model yet.
    pub const UNREGISTERED: Self = Self(0);

    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

// =============================================================================
// DiscourseElement
// =============================================================================

/// An ordered run of mentions sharing a referent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscourseElement {
    key: EntityKey,
    id: u64,
    mentions: Vec<MentionContext>,
}

impl DiscourseElement {
    /// Start an element from its first mention.
    #[must_use]
    pub fn new(first: MentionContext) -> Self {
        Self {
            key: EntityKey::UNREGISTERED,
            id: 0,
            mentions: vec![first],
        }
    }

    /// Stable model handle.
    #[must_use]
    pub fn key(&self) -> EntityKey {
        self.key
    }

    /// Current id. `0` until the element is added to a model.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Overwrite the id. The key is unaffected.
    pub fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    /// Mentions in document order.
    #[must_use]
    pub fn mentions(&self) -> &[MentionContext] {
        &self.mentions
    }

    /// Mentions, most recently added first.
    pub fn recent_mentions(&self) -> impl DoubleEndedIterator<Item = &MentionContext> + '_ {
        self.mentions.iter().rev()
    }

    /// Number of mentions.
    #[must_use]
    pub fn mention_count(&self) -> usize {
        self.mentions.len()
    }

    /// The most recently added mention.
    #[must_use]
    pub fn last_mention(&self) -> Option<&MentionContext> {
        self.mentions.last()
    }

    /// Append a mention.
    pub fn add_mention(&mut self, mention: MentionContext) {
        self.mentions.push(mention);
    }

    pub(crate) fn register(&mut self, key: EntityKey) {
        self.key = key;
        self.id = key.get();
    }

    pub(crate) fn extend(&mut self, mentions: Vec<MentionContext>) {
        self.mentions.extend(mentions);
    }

    pub(crate) fn into_mentions(self) -> Vec<MentionContext> {
        self.mentions
    }
}

// =============================================================================
// DiscourseEntity
// =============================================================================

/// A cluster of mentions believed to corefer, with aggregated attributes.
///
/// # Example
///
/// ```rust
/// use anno_coref_core::{Confidence, DiscourseEntity, Gender, Mention, MentionContext};
///
/// let john = MentionContext::new(Mention::new("John", 0, 4, 0), 0, 0, 1);
/// let he = MentionContext::new(Mention::new("he", 10, 12, 1), 1, 0, 1)
///     .with_gender(Gender::Male, Confidence::saturating(0.9));
///
/// let mut entity = DiscourseEntity::from_mention(john);
/// entity.attach(he);
///
/// assert_eq!(entity.mention_count(), 2);
/// assert_eq!(entity.gender(), Gender::Male);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscourseEntity {
    element: DiscourseElement,
    category: Option<String>,
    synsets: BTreeSet<String>,
    gender: Gender,
    gender_confidence: Confidence,
    number: Number,
    number_confidence: Confidence,
}

impl DiscourseEntity {
    /// Start an entity from its first mention.
    ///
    /// Gender, number, category and senses are seeded from the mention.
    #[must_use]
    pub fn from_mention(first: MentionContext) -> Self {
        let gender = first.gender();
        let gender_confidence = first.gender_confidence();
        let number = first.number();
        let number_confidence = first.number_confidence();
        let category = first.mention().name_type.clone();
        let synsets = first.mention().synsets.iter().cloned().collect();
        Self {
            element: DiscourseElement::new(first),
            category,
            synsets,
            gender,
            gender_confidence,
            number,
            number_confidence,
        }
    }

    /// The underlying mention cluster.
    #[must_use]
    pub fn element(&self) -> &DiscourseElement {
        &self.element
    }

    /// Stable model handle.
    #[must_use]
    pub fn key(&self) -> EntityKey {
        self.element.key()
    }

    /// Current id.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.element.id()
    }

    /// Overwrite the id.
    pub fn set_id(&mut self, id: u64) {
        self.element.set_id(id);
    }

    /// Mentions in document order.
    #[must_use]
    pub fn mentions(&self) -> &[MentionContext] {
        self.element.mentions()
    }

    /// Mentions, most recently added first.
    pub fn recent_mentions(&self) -> impl DoubleEndedIterator<Item = &MentionContext> + '_ {
        self.element.recent_mentions()
    }

    /// Number of mentions.
    #[must_use]
    pub fn mention_count(&self) -> usize {
        self.element.mention_count()
    }

    /// The most recently added mention.
    #[must_use]
    pub fn last_mention(&self) -> Option<&MentionContext> {
        self.element.last_mention()
    }

    /// Semantic category, e.g. a named-entity type.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Set the semantic category.
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = Some(category.into());
    }

    /// Sense identifiers.
    #[must_use]
    pub fn synsets(&self) -> &BTreeSet<String> {
        &self.synsets
    }

    /// Add a sense identifier.
    pub fn add_synset(&mut self, synset: impl Into<String>) {
        self.synsets.insert(synset.into());
    }

    /// Aggregated gender.
    #[must_use]
    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// Confidence of the aggregated gender.
    #[must_use]
    pub fn gender_confidence(&self) -> Confidence {
        self.gender_confidence
    }

    /// Aggregated number.
    #[must_use]
    pub fn number(&self) -> Number {
        self.number
    }

    /// Confidence of the aggregated number.
    #[must_use]
    pub fn number_confidence(&self) -> Confidence {
        self.number_confidence
    }

    /// Attach a newly resolved mention.
    ///
    /// Gender and number are each replaced by the mention's estimate only
    /// when its confidence is strictly higher than the entity's. Ties keep
    /// the current value.
    pub fn attach(&mut self, mention: MentionContext) {
        if mention.gender_confidence().exceeds(self.gender_confidence) {
            self.gender = mention.gender();
            self.gender_confidence = mention.gender_confidence();
        }
        if mention.number_confidence().exceeds(self.number_confidence) {
            self.number = mention.number();
            self.number_confidence = mention.number_confidence();
        }
        self.element.add_mention(mention);
    }

    /// Append every mention of `other`, in `other`'s document order.
    ///
    /// Attributes of `other` are discarded.
    pub(crate) fn absorb(&mut self, other: DiscourseEntity) {
        self.element.extend(other.element.into_mentions());
    }

    pub(crate) fn register(&mut self, key: EntityKey) {
        self.element.register(key);
    }
}

impl fmt::Display for DiscourseEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.id())?;
        for (i, m) in self.mentions().iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{}{}", sep, m.text())?;
        }
        Ok(())
    }
}
