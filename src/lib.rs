//! # anno-coref
//!
//! Coreference linking for Rust: groups the mentions of a document into
//! entities.
//!
//! - **Mention contexts**: position within sentence, gender, number
//! - **Resolver cascade**: pluggable antecedent strategies, reconciled per mention
//! - **Discourse model**: entities in recency order, merged as evidence arrives
//! - **Export**: coreference chains for evaluation
//!
//! ## Quick Start
//!
//! ```rust
//! use anno_coref::{Linker, LinkerConfig, Mention, MentionType, NodeRef};
//!
//! // "John met Mary. He waved."
//! let mentions = vec![
//!     Mention::new("John", 0, 4, 0).with_mention_type(MentionType::Proper).with_node(NodeRef(1)),
//!     Mention::new("Mary", 9, 13, 0).with_mention_type(MentionType::Proper).with_node(NodeRef(2)),
//!     Mention::new("He", 15, 17, 1).with_mention_type(MentionType::Pronoun).with_node(NodeRef(3)),
//! ];
//!
//! let mut linker = Linker::default_cascade(LinkerConfig::default());
//! let entities = linker.get_entities_from_mentions(&mentions)?;
//!
//! // "He" joined the most recent compatible entity and moved it to the front.
//! assert_eq!(entities.len(), 2);
//! assert_eq!(entities[0].mention_count(), 2);
//! # Ok::<(), anno_coref::Error>(())
//! ```
//!
//! ## Modes
//!
//! | Mode | Resolvers called with | Gender/number |
//! |------|-----------------------|---------------|
//! | `Test` | `resolve` | yes |
//! | `Train` | `retain` (gold labels) | yes |
//! | `Eval` | `retain` | yes |
//! | `Sim` | not called | no |
//!
//! ## Design Notes
//!
//! - **No shared state**: each run owns a fresh [`DiscourseModel`]
//! - **Ordered reconciliation**: claims are folded left to right, the first
//!   claimed entity absorbs the rest (no union-find)
//! - **Desync is fatal**: addressing an entity the model does not hold
//!   aborts the run with [`Error::Discourse`]

#![warn(missing_docs)]

pub mod chain;
pub mod classify;
pub mod config;
pub mod context;
mod error;
pub mod lexicon;
pub mod linker;
pub mod resolver;

pub use anno_coref_core::{
    Confidence, DiscourseElement, DiscourseEntity, DiscourseModel, EntityKey, Gender, Mention,
    MentionContext, MentionType, NodeRef, Number,
};
pub use chain::{chains_from_entities, CorefChain};
pub use config::{LinkerConfig, LinkerMode};
pub use error::{Error, Result};
pub use linker::{check_for_merges, update_extent, Linker};
pub use resolver::{Claim, Resolver};

pub mod prelude {
    //! Commonly used items, re-exported for convenience.
    //!
    //! ```rust
    //! use anno_coref::prelude::*;
    //!
    //! let linker = Linker::default_cascade(LinkerConfig::new(LinkerMode::Test));
    //! assert_eq!(linker.resolver_count(), 4);
    //! ```
    pub use crate::chain::CorefChain;
    pub use crate::classify::{GenderModel, NumberModel};
    pub use crate::config::{LinkerConfig, LinkerMode};
    pub use crate::error::{Error, Result};
    pub use crate::linker::Linker;
    pub use crate::resolver::{Claim, Resolver};
    pub use anno_coref_core::{
        DiscourseEntity, DiscourseModel, EntityKey, Gender, Mention, MentionContext, MentionType,
        Number,
    };
}
