//! Per-document discourse state.
//!
//! # Recency Order
//!
//! Entities are kept most-recently-mentioned first. The order changes in
//! exactly three ways:
//!
//! ```text
//! add_entity(E)      [A, B, C]  →  [E, A, B, C]
//! mention_entity(B)  [A, B, C]  →  [B, A, C]
//! merge(A, C)        [A, B, C]  →  [A, B]        (C's mentions now in A)
//! ```
//!
//! # Ids
//!
//! Every `add_entity` takes the next value of a counter that starts at 1.
//! The counter is owned by the model, survives `clear`, and is never rewound,
//! so an id handed out once is not handed out again even if its entity is
//! later merged away.

use crate::{DiscourseEntity, EntityKey, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Entities of one document in recency order, plus the id counter.
///
/// # Example
///
/// ```rust
/// use anno_coref_core::{DiscourseEntity, DiscourseModel, Mention, MentionContext};
///
/// let mut model = DiscourseModel::new();
/// let ctx = |t: &str, i: usize| MentionContext::new(Mention::new(t, i, i + 1, 0), i, i, 2);
///
/// let a = model.add_entity(DiscourseEntity::from_mention(ctx("Alice", 0)));
/// let b = model.add_entity(DiscourseEntity::from_mention(ctx("Bob", 1)));
/// assert_eq!(model.entity(0).map(|e| e.key()), Some(b));
///
/// model.mention_entity(a)?;
/// assert_eq!(model.entity(0).map(|e| e.key()), Some(a));
/// # Ok::<(), anno_coref_core::Error>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscourseModel {
    entities: VecDeque<DiscourseEntity>,
    next_id: u64,
}

impl Default for DiscourseModel {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscourseModel {
    /// Create an empty model. The first entity added gets id 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entities: VecDeque::new(),
            next_id: 1,
        }
    }

    /// Register `entity` under the next id and put it at the front.
    pub fn add_entity(&mut self, mut entity: DiscourseEntity) -> EntityKey {
        let key = EntityKey::new(self.next_id);
        self.next_id += 1;
        entity.register(key);
        self.entities.push_front(entity);
        key
    }

    /// Move the entity to the front of the recency order.
    ///
    /// # Errors
    ///
    /// [`Error::EntityNotFound`] if the model does not hold `key`. This means
    /// the caller is working from stale state and the run cannot continue.
    pub fn mention_entity(&mut self, key: EntityKey) -> Result<()> {
        let rank = self.rank_of(key).ok_or(Error::EntityNotFound(key))?;
        if rank > 0 {
            if let Some(entity) = self.entities.remove(rank) {
                self.entities.push_front(entity);
            }
        }
        Ok(())
    }

    /// Fold `absorbed` into `survivor` and drop `absorbed` from the model.
    ///
    /// The survivor keeps its id, attributes and recency rank; the absorbed
    /// entity's mentions are appended in their original order. `confidence`
    /// is accepted for future weighting and currently has no effect.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if both keys are the same
    /// - [`Error::EntityNotFound`] if either key is not in the model
    pub fn merge_entities(
        &mut self,
        survivor: EntityKey,
        absorbed: EntityKey,
        confidence: f64,
    ) -> Result<()> {
        if survivor == absorbed {
            return Err(Error::invalid_input(format!(
                "cannot merge entity {} with itself",
                survivor
            )));
        }
        if self.rank_of(survivor).is_none() {
            return Err(Error::EntityNotFound(survivor));
        }
        let rank = self.rank_of(absorbed).ok_or(Error::EntityNotFound(absorbed))?;
        let other = self
            .entities
            .remove(rank)
            .ok_or(Error::EntityNotFound(absorbed))?;
        let target = self.get_mut(survivor).ok_or(Error::EntityNotFound(survivor))?;
        log::debug!(
            "merging entity {} into {} (confidence {:.2})",
            other.id(),
            target.id(),
            confidence
        );
        target.absorb(other);
        Ok(())
    }

    /// Remove all entities. The id counter keeps counting.
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// Entity at recency rank `rank` (0 = most recent).
    #[must_use]
    pub fn entity(&self, rank: usize) -> Option<&DiscourseEntity> {
        self.entities.get(rank)
    }

    /// Number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Whether the model holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities in recency order.
    pub fn entities(&self) -> impl ExactSizeIterator<Item = &DiscourseEntity> + '_ {
        self.entities.iter()
    }

    /// Look up an entity by key.
    #[must_use]
    pub fn get(&self, key: EntityKey) -> Option<&DiscourseEntity> {
        self.entities.iter().find(|e| e.key() == key)
    }

    /// Look up an entity by key, mutably.
    pub fn get_mut(&mut self, key: EntityKey) -> Option<&mut DiscourseEntity> {
        self.entities.iter_mut().find(|e| e.key() == key)
    }

    /// Recency rank of an entity.
    #[must_use]
    pub fn rank_of(&self, key: EntityKey) -> Option<usize> {
        self.entities.iter().position(|e| e.key() == key)
    }

    /// The id the next added entity will receive.
    #[must_use]
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Consume the model, returning entities in recency order.
    #[must_use]
    pub fn into_entities(self) -> Vec<DiscourseEntity> {
        self.entities.into()
    }

    /// Write every entity to the debug log, most recent first.
    pub fn dump(&self) {
        log::debug!("discourse model: {} entities", self.entities.len());
        for (rank, entity) in self.entities.iter().enumerate() {
            log::debug!("  {:>3}: {}", rank, entity);
        }
    }
}
