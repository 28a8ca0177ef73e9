//! The resolver contract and bundled resolvers.
//!
//! A resolver is one antecedent-finding strategy. The linker asks every
//! resolver in its cascade about every mention:
//!
//! ```text
//!              can_resolve?   Test: resolve    Train/Eval: retain
//! mention ──►  resolver 0  ─► Matched(E3)
//!              resolver 1  ─► (not applicable)
//!              resolver 2  ─► NoMatch
//! ```
//!
//! Resolvers never modify the discourse model. They return a [`Claim`] and
//! the linker reconciles the claims.
//!
//! | Resolver | Applies to |
//! |----------|------------|
//! | [`ProperNounResolver`] | proper names |
//! | [`NominalResolver`] | common-noun phrases, by head word |
//! | [`PluralPronounResolver`] | they / them / their |
//! | [`SingularPronounResolver`] | he / she / it and singular neopronouns |
//! | [`MockResolver`] | scripted, for tests |

mod mock;
mod nominal;
mod pronoun;
mod proper_noun;

pub use mock::MockResolver;
pub use nominal::NominalResolver;
pub use pronoun::{PluralPronounResolver, SingularPronounResolver};
pub use proper_noun::ProperNounResolver;

use crate::Result;
use anno_coref_core::{DiscourseModel, EntityKey, MentionContext};
use serde::{Deserialize, Serialize};

// =============================================================================
// Claim
// =============================================================================

/// A resolver's answer for one mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Claim {
    /// No antecedent: the mention starts something new, or the resolver
    /// does not apply.
    #[default]
    NoMatch,
    /// The mention refers to this existing entity.
    Matched(EntityKey),
}

impl Claim {
    /// The claimed entity, if any.
    #[must_use]
    pub fn entity(&self) -> Option<EntityKey> {
        match self {
            Claim::NoMatch => None,
            Claim::Matched(key) => Some(*key),
        }
    }

    /// Whether an entity was claimed.
    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, Claim::Matched(_))
    }
}

impl From<Option<EntityKey>> for Claim {
    fn from(key: Option<EntityKey>) -> Self {
        key.map_or(Claim::NoMatch, Claim::Matched)
    }
}

// =============================================================================
// Resolver trait
// =============================================================================

/// One antecedent-finding strategy in the linker's cascade.
///
/// `resolve` is called in test mode and must not change the resolver.
/// `retain` is called in train and eval mode with mentions that may carry a
/// gold cluster label; it may record observations that `train` later turns
/// into a fitted model.
pub trait Resolver: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Whether this resolver applies to the mention at all.
    fn can_resolve(&self, mention: &MentionContext) -> bool;

    /// Find the entity the mention refers to.
    fn resolve(&self, mention: &MentionContext, model: &DiscourseModel) -> Claim;

    /// Record a (possibly labelled) mention and return its antecedent.
    fn retain(&mut self, mention: &MentionContext, model: &DiscourseModel) -> Claim;

    /// Fit the resolver on everything retained so far.
    ///
    /// # Errors
    ///
    /// Implementation specific; [`crate::Error::Training`] by convention.
    fn train(&mut self) -> Result<()>;
}

// =============================================================================
// Training helpers
// =============================================================================

/// The entity already holding a mention with the same gold label, with its
/// recency rank.
#[must_use]
pub fn labeled_antecedent(
    mention: &MentionContext,
    model: &DiscourseModel,
) -> Option<(usize, EntityKey)> {
    let id = mention.id()?;
    model
        .entities()
        .enumerate()
        .find(|(_, e)| e.mentions().iter().any(|m| m.id() == Some(id)))
        .map(|(rank, e)| (rank, e.key()))
}

/// How far back labelled antecedents were found.
///
/// Resolvers record the recency rank of every gold antecedent they see
/// during training; fitting yields the smallest search window that would
/// have covered all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AntecedentStats {
    with_antecedent: usize,
    without_antecedent: usize,
    max_rank: Option<usize>,
}

impl AntecedentStats {
    /// Record one observation. `None` means the mention had no antecedent.
    pub fn record(&mut self, rank: Option<usize>) {
        match rank {
            Some(r) => {
                self.with_antecedent += 1;
                self.max_rank = Some(self.max_rank.map_or(r, |m| m.max(r)));
            }
            None => self.without_antecedent += 1,
        }
    }

    /// Total observations recorded.
    #[must_use]
    pub fn observations(&self) -> usize {
        self.with_antecedent + self.without_antecedent
    }

    /// Observations that had an antecedent.
    #[must_use]
    pub fn with_antecedent(&self) -> usize {
        self.with_antecedent
    }

    /// Search window (number of entities to look at) covering every
    /// observed antecedent, or `None` if none was observed.
    #[must_use]
    pub fn fitted_window(&self) -> Option<usize> {
        self.max_rank.map(|r| r + 1)
    }
}

/// Shared `retain` behaviour: look up the labelled antecedent and record it.
pub(crate) fn retain_labeled(
    stats: &mut AntecedentStats,
    mention: &MentionContext,
    model: &DiscourseModel,
) -> Claim {
    let found = labeled_antecedent(mention, model);
    stats.record(found.map(|(rank, _)| rank));
    found.map(|(_, key)| key).into()
}

/// Shared `train` behaviour: fit the window, keep the default if nothing
/// was observed.
pub(crate) fn fit_window(
    name: &str,
    stats: &AntecedentStats,
    default_window: usize,
) -> Option<usize> {
    match stats.fitted_window() {
        Some(window) => {
            log::info!(
                "{}: trained on {} mentions ({} with antecedent), window {}",
                name,
                stats.observations(),
                stats.with_antecedent(),
                window
            );
            Some(window)
        }
        None => {
            log::warn!(
                "{}: no labelled antecedents among {} mentions; keeping window {}",
                name,
                stats.observations(),
                default_window
            );
            None
        }
    }
}
