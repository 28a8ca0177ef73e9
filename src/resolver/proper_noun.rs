//! Proper-name resolution by string matching.

use super::{fit_window, retain_labeled, AntecedentStats, Claim, Resolver};
use crate::Result;
use anno_coref_core::{DiscourseEntity, DiscourseModel, MentionContext};

/// Links a proper name to the most recent entity that already contains a
/// matching proper name.
///
/// Names match when, after lowercasing and collapsing whitespace, one is
/// a whole-word run inside the other:
/// - **Exact**: "Acme Corp" ~ "acme corp"
/// - **Last name**: "Smith" ~ "Dr. John Smith"
/// - **Contained**: "John Smith" ~ "Dr. John Smith"
///
/// When both sides carry a named-entity category the categories must agree,
/// so "Apple" (ORG) never matches "apple" (MISC).
#[derive(Debug, Clone)]
pub struct ProperNounResolver {
    window: usize,
    trained_window: Option<usize>,
    stats: AntecedentStats,
}

impl Default for ProperNounResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProperNounResolver {
    /// Create a resolver that looks back over up to 50 entities.
    #[must_use]
    pub fn new() -> Self {
        Self {
            window: 50,
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

    fn matches_entity(&self, mention: &MentionContext, entity: &DiscourseEntity) -> bool {
        let name = normalize(mention.text());
        if name.is_empty() {
            return false;
        }
        let category = mention.mention().name_type.as_deref();
        entity.mentions().iter().any(|other| {
            let other_mention = other.mention();
            if !other_mention.is_proper() {
                return false;
            }
            if let (Some(a), Some(b)) = (category, other_mention.name_type.as_deref()) {
                if a != b {
                    return false;
                }
            }
            names_match(&name, &normalize(other.text()))
        })
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Check if the shorter normalized name occurs word-aligned in the longer.
fn names_match(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a == b {
        return true;
    }

    let words_a: Vec<&str> = a.split(' ').collect();
    let words_b: Vec<&str> = b.split(' ').collect();
    let (short, long) = if words_a.len() <= words_b.len() {
        (&words_a, &words_b)
    } else {
        (&words_b, &words_a)
    };
    long.windows(short.len()).any(|w| w == short.as_slice())
}

impl Resolver for ProperNounResolver {
    fn name(&self) -> &'static str {
        "proper-noun"
    }

    fn can_resolve(&self, mention: &MentionContext) -> bool {
        mention.mention().is_proper()
    }

    fn resolve(&self, mention: &MentionContext, model: &DiscourseModel) -> Claim {
        model
            .entities()
            .take(self.window())
            .find(|e| self.matches_entity(mention, e))
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
