//! Scripted resolver for tests.

use super::{Claim, Resolver};
use crate::{Error, Result};
use anno_coref_core::{DiscourseEntity, DiscourseModel, MentionContext};

/// A resolver whose answers are scripted by surface form.
///
/// `claims("he", "John")` means: when the mention text is "he", claim the
/// most recent entity containing a mention with text "John" (or no match if
/// there is none). The resolver applies to every scripted mention text, and
/// to nothing else unless [`MockResolver::applies_to`] widens it.
///
/// # Example
///
/// ```rust
/// use anno_coref::resolver::{MockResolver, Resolver};
/// use anno_coref::{Mention, MentionContext};
///
/// let r = MockResolver::new("script").claims("he", "John").applies_to("Mary");
/// let he = MentionContext::new(Mention::new("he", 0, 2, 0), 0, 0, 1);
/// assert!(r.can_resolve(&he));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockResolver {
    name: &'static str,
    script: Vec<(String, String)>,
    applicable: Vec<String>,
    fail_training: bool,
}

impl MockResolver {
    /// Create an empty script.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// When the mention text is `mention`, claim the entity containing `antecedent`.
    #[must_use]
    pub fn claims(mut self, mention: impl Into<String>, antecedent: impl Into<String>) -> Self {
        self.script.push((mention.into(), antecedent.into()));
        self
    }

    /// Apply to `mention` without ever finding an antecedent for it.
    #[must_use]
    pub fn applies_to(mut self, mention: impl Into<String>) -> Self {
        self.applicable.push(mention.into());
        self
    }

    /// Make `train` fail.
    #[must_use]
    pub fn failing_training(mut self) -> Self {
        self.fail_training = true;
        self
    }

    fn lookup(&self, mention: &MentionContext, model: &DiscourseModel) -> Claim {
        let Some((_, antecedent)) = self.script.iter().find(|(m, _)| m == mention.text()) else {
            return Claim::NoMatch;
        };
        model
            .entities()
            .find(|e| e.mentions().iter().any(|m| m.text() == antecedent))
            .map(DiscourseEntity::key)
            .into()
    }
}

impl Resolver for MockResolver {
    fn name(&self) -> &'static str {
        self.name
    }

    fn can_resolve(&self, mention: &MentionContext) -> bool {
        self.script.iter().any(|(m, _)| m == mention.text())
            || self.applicable.iter().any(|m| m == mention.text())
    }

    fn resolve(&self, mention: &MentionContext, model: &DiscourseModel) -> Claim {
        self.lookup(mention, model)
    }

    fn retain(&mut self, mention: &MentionContext, model: &DiscourseModel) -> Claim {
        self.lookup(mention, model)
    }

    fn train(&mut self) -> Result<()> {
        if self.fail_training {
            return Err(Error::training(format!("{}: scripted failure", self.name)));
        }
        Ok(())
    }
}
