//! Export of linker output as coreference chains.
//!
//! Evaluation code and downstream consumers usually want clusters of spans,
//! not discourse entities. A [`CorefChain`] is that: the mentions of one
//! referent sorted by position.
//!
//! In flat mode the linker expresses coreference through shared ids only,
//! so [`chains_from_entities`] groups by id rather than by entity.
//!
//! # Example
//!
//! ```rust
//! use anno_coref::chain::chains_from_entities;
//! use anno_coref::{Linker, LinkerConfig, Mention, MentionType, NodeRef};
//!
//! let mentions = vec![
//!     Mention::new("Acme", 0, 4, 0).with_mention_type(MentionType::Proper).with_node(NodeRef(0)),
//!     Mention::new("it", 20, 22, 1).with_mention_type(MentionType::Pronoun).with_node(NodeRef(1)),
//! ];
//! let mut linker = Linker::default_cascade(LinkerConfig::default());
//! let chains = chains_from_entities(&linker.get_entities_from_mentions(&mentions)?);
//!
//! assert_eq!(chains.len(), 1);
//! assert_eq!(chains[0].len(), 2);
//! # Ok::<(), anno_coref::Error>(())
//! ```

use crate::Result;
use anno_coref_core::{DiscourseEntity, Mention};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mentions of one referent, ordered by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorefChain {
    /// The mentions in this chain, ordered by position.
    pub mentions: Vec<Mention>,
    /// Entity id the chain was built from.
    pub cluster_id: Option<u64>,
    /// Entity category, if known.
    pub entity_type: Option<String>,
}

impl CorefChain {
    /// Create a chain; mentions are sorted by span.
    #[must_use]
    pub fn new(mut mentions: Vec<Mention>) -> Self {
        mentions.sort_by_key(|m| (m.start, m.end));
        Self {
            mentions,
            cluster_id: None,
            entity_type: None,
        }
    }

    /// Chain for a single entity.
    #[must_use]
    pub fn from_entity(entity: &DiscourseEntity) -> Self {
        let mut chain = Self::new(entity.mentions().iter().map(|m| m.mention().clone()).collect());
        chain.cluster_id = Some(entity.id());
        chain.entity_type = entity.category().map(str::to_string);
        chain
    }

    /// Number of mentions in this chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mentions.len()
    }

    /// Check if chain is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mentions.is_empty()
    }

    /// Check if this is a singleton (single mention).
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.mentions.len() == 1
    }

    /// Links needed to connect all mentions (n - 1).
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.mentions.len().saturating_sub(1)
    }

    /// Surface forms in order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.mentions.iter().map(|m| m.text.as_str()).collect()
    }
}

/// Group entities into chains by entity id.
///
/// Entities sharing an id (flat mode) land in one chain. Chains are ordered
/// by their first mention.
#[must_use]
pub fn chains_from_entities(entities: &[DiscourseEntity]) -> Vec<CorefChain> {
    let mut by_id: HashMap<u64, CorefChain> = HashMap::new();
    for entity in entities {
        let chain = CorefChain::from_entity(entity);
        match by_id.get_mut(&entity.id()) {
            Some(existing) => {
                existing.mentions.extend(chain.mentions);
                existing.mentions.sort_by_key(|m| (m.start, m.end));
                if existing.entity_type.is_none() {
                    existing.entity_type = chain.entity_type;
                }
            }
            None => {
                by_id.insert(entity.id(), chain);
            }
        }
    }

    let mut chains: Vec<CorefChain> = by_id.into_values().collect();
    chains.sort_by_key(|c| c.mentions.first().map(|m| (m.start, m.end)));
    chains
}

/// Serialize chains as pretty-printed JSON.
///
/// # Errors
///
/// [`crate::Error::Serialization`] if serialization fails.
pub fn chains_to_json(chains: &[CorefChain]) -> Result<String> {
    Ok(serde_json::to_string_pretty(chains)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anno_coref_core::{DiscourseModel, MentionContext};

    fn ctx(text: &str, start: usize) -> MentionContext {
        MentionContext::new(Mention::new(text, start, start + text.len(), 0), start, 0, 1)
    }

    #[test]
    fn chain_from_entity_sorts_mentions() {
        let mut model = DiscourseModel::new();
        let key = model.add_entity(DiscourseEntity::from_mention(ctx("Smith", 40)));
        model.get_mut(key).unwrap().attach(ctx("John Smith", 0));
        model.get_mut(key).unwrap().set_category("PER");

        let chain = CorefChain::from_entity(model.get(key).unwrap());
        assert_eq!(chain.texts(), vec!["John Smith", "Smith"]);
        assert_eq!(chain.cluster_id, Some(1));
        assert_eq!(chain.entity_type.as_deref(), Some("PER"));
        assert_eq!(chain.link_count(), 1);
    }

    #[test]
    fn shared_ids_form_one_chain() {
        let mut model = DiscourseModel::new();
        let first = model.add_entity(DiscourseEntity::from_mention(ctx("John", 0)));
        let second = model.add_entity(DiscourseEntity::from_mention(ctx("he", 10)));
        model.add_entity(DiscourseEntity::from_mention(ctx("Mary", 20)));
        let first_id = model.get(first).unwrap().id();
        model.get_mut(second).unwrap().set_id(first_id);

        let chains = chains_from_entities(&model.into_entities());
        assert_eq!(chains.len(), 2);
        assert_eq!(chains[0].texts(), vec!["John", "he"]);
        assert!(chains[1].is_singleton());
    }

    #[test]
    fn json_export() {
        let chain = CorefChain::new(vec![Mention::new("it", 3, 5, 0)]);
        let json = chains_to_json(&[chain]).unwrap();
        assert!(json.contains("\"text\": \"it\""));
    }
}
