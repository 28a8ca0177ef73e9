//! Third-person pronoun resolution.

use super::{fit_window, retain_labeled, AntecedentStats, Claim, Resolver};
use crate::lexicon;
use crate::Result;
use anno_coref_core::{DiscourseEntity, DiscourseModel, MentionContext, MentionType, Number};

/// Links he / she / it (and singular neopronouns) to the most recent
/// compatible entity.
///
/// An entity is compatible when its aggregated gender agrees with the
/// pronoun's (unknown on either side agrees with anything) and it is not
/// known to be plural. Names carry no gender, so "he" can link to "Mary";
/// this resolver does not guess gender from names.
///
/// Failing to find an antecedent is meaningful: the linker treats an
/// unresolved singular pronoun as non-referential ("it is raining") and
/// does not start an entity for it.
#[derive(Debug, Clone)]
pub struct SingularPronounResolver {
    window: usize,
    trained_window: Option<usize>,
    stats: AntecedentStats,
}

impl Default for SingularPronounResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SingularPronounResolver {
    /// Create a resolver that looks back over up to 5 entities.
    #[must_use]
    pub fn new() -> Self {
        Self {
            window: 5,
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

    fn compatible(mention: &MentionContext, entity: &DiscourseEntity) -> bool {
        mention.gender().compatible(&entity.gender())
            && Number::Singular.compatible(&entity.number())
    }
}

impl Resolver for SingularPronounResolver {
    fn name(&self) -> &'static str {
        "singular-pronoun"
    }

    fn can_resolve(&self, mention: &MentionContext) -> bool {
        let m = mention.mention();
        matches!(m.mention_type, MentionType::Pronoun | MentionType::Unknown)
            && lexicon::is_singular_third_person(&m.text)
    }

    fn resolve(&self, mention: &MentionContext, model: &DiscourseModel) -> Claim {
        model
            .entities()
            .take(self.window())
            .find(|e| Self::compatible(mention, e))
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

/// Links they / them / their to the most recent entity not known to be
/// singular.
///
/// Singular "they" is not attempted: an entity whose number is known to be
/// singular is skipped, so "John ... they" stays apart. A "they" with no
/// plural antecedent starts its own entity.
#[derive(Debug, Clone)]
pub struct PluralPronounResolver {
    window: usize,
    trained_window: Option<usize>,
    stats: AntecedentStats,
}

impl Default for PluralPronounResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl PluralPronounResolver {
    /// Create a resolver that looks back over up to 5 entities.
    #[must_use]
    pub fn new() -> Self {
        Self {
            window: 5,
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
}

impl Resolver for PluralPronounResolver {
    fn name(&self) -> &'static str {
        "plural-pronoun"
    }

    fn can_resolve(&self, mention: &MentionContext) -> bool {
        let m = mention.mention();
        matches!(m.mention_type, MentionType::Pronoun | MentionType::Unknown)
            && lexicon::is_they_form(&m.text)
    }

    fn resolve(&self, _mention: &MentionContext, model: &DiscourseModel) -> Claim {
        model
            .entities()
            .take(self.window())
            .find(|e| Number::Plural.compatible(&e.number()))
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
