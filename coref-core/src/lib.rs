//! # anno-coref-core
//!
//! Discourse-state types shared by the anno-coref linker and its resolvers.
//!
//! This crate provides:
//! - **Input types**: `Mention`, `MentionType`, `NodeRef`
//! - **Attributes**: `Gender`, `Number`, `Confidence`
//! - **Discourse state**: `MentionContext`, `DiscourseElement`,
//!   `DiscourseEntity`, `DiscourseModel`, `EntityKey`
//!
//! Resolvers are written against these types, so they live apart from the
//! orchestration code in `anno-coref`.

pub mod attributes;
pub mod confidence;
pub mod context;
pub mod discourse;
pub mod error;
pub mod mention;
pub mod model;

pub use attributes::{Gender, Number};
pub use confidence::{Confidence, ConfidenceError};
pub use context::MentionContext;
pub use discourse::{DiscourseElement, DiscourseEntity, EntityKey};
pub use error::{Error, Result};
pub use mention::{Mention, MentionType, NodeRef};
pub use model::DiscourseModel;
