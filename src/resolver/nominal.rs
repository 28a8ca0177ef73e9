//! Common-noun phrase resolution by head word.

use super::{fit_window, retain_labeled, AntecedentStats, Claim, Resolver};
use crate::Result;
use anno_coref_core::{DiscourseEntity, DiscourseModel, MentionContext, MentionType};

/// Links a nominal mention ("the company") to the most recent entity that
/// holds a nominal with the same head word and agrees in number.
///
/// Heads are compared case-insensitively with surrounding punctuation
/// stripped, so "the company" matches "The Company," but not
/// "the companies" (number disagrees) or "the company's lawyer" (head is
/// "lawyer").
#[derive(Debug, Clone)]
pub struct NominalResolver {
    window: usize,
    trained_window: Option<usize>,
    stats: AntecedentStats,
}

impl Default for NominalResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl NominalResolver {
    /// Create a resolver that looks back over up to 20 entities.
    #[must_use]
    pub fn new() -> Self {
        Self {
            window: 20,
            trained_window: None,
            stats: AntecedentStats::default(),
        }
    }

    /// Number of most recent entities considered before training.
    #[must_use]
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Current search window (trained if available).
    #[must_use]
    pub fn window(&self) -> usize {
        self.trained_window.unwrap_or(self.window)
    }

    /// Observations recorded so far.
    #[must_use]
    pub fn stats(&self) -> &AntecedentStats {
        &self.stats
    }

    fn matches_entity(mention: &MentionContext, entity: &DiscourseEntity) -> bool {
        let head = normalize_head(mention.mention().head_word());
        if head.is_empty() || !mention.number().compatible(&entity.number()) {
            return false;
        }
        entity.mentions().iter().any(|other| {
            other.mention().mention_type == MentionType::Nominal
                && normalize_head(other.mention().head_word()) == head
        })
    }
}

fn normalize_head(head: &str) -> String {
    head.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase()
}

impl Resolver for NominalResolver {
    fn name(&self) -> &'static str {
        "nominal"
    }

    fn can_resolve(&self, mention: &MentionContext) -> bool {
        mention.mention().mention_type == MentionType::Nominal
    }

    fn resolve(&self, mention: &MentionContext, model: &DiscourseModel) -> Claim {
        model
            .entities()
            .take(self.window())
            .find(|e| Self::matches_entity(mention, e))
            .map(DiscourseEntity::key)
            .into()
    }

    fn retain(&mut self, mention: &MentionContext, model: &DiscourseModel) -> Claim {
        retain_labeled(&mut self.stats, mention, model)
    }

    fn train(&mut self) -> Result<()> {
        if let Some(window) = fit_window(self.name(), &self.stats, self.window) {
            self.trained_window = Some(window);
        }
        Ok(())
    }
}
