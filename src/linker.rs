//! The linker: runs the resolver cascade over a document and maintains the
//! discourse model.
//!
//! # Algorithm
//!
//! For every mention context, in document order:
//!
//! ```text
//! 1. ask each resolver            claims = [Matched(E2), n/a, NoMatch, Matched(E5)]
//! 2. fold the claims              E2 absorbs E5                     → E2
//! 3. update the model             attach mention to E2, promote E2
//!                                 (or start a new entity if no claim)
//! ```
//!
//! Two gates can stop step 3. An applicable singular-pronoun resolver that
//! finds nothing marks the mention non-referential ("it is raining"). With
//! `remove_unresolved_mentions`, a mention no resolver applies to is dropped
//! instead of becoming a singleton. Step 2 still runs in both cases.
//!
//! # Example
//!
//! ```rust
//! use anno_coref::{Linker, LinkerConfig, Mention, MentionType, NodeRef};
//!
//! let mentions = vec![
//!     Mention::new("John Smith", 0, 10, 0)
//!         .with_mention_type(MentionType::Proper)
//!         .with_node(NodeRef(1)),
//!     Mention::new("he", 15, 17, 0)
//!         .with_mention_type(MentionType::Pronoun)
//!         .with_node(NodeRef(2)),
//!     Mention::new("Smith", 30, 35, 1)
//!         .with_mention_type(MentionType::Proper)
//!         .with_node(NodeRef(3)),
//! ];
//!
//! let mut linker = Linker::default_cascade(LinkerConfig::default());
//! let entities = linker.get_entities_from_mentions(&mentions)?;
//!
//! assert_eq!(entities.len(), 1);
//! assert_eq!(entities[0].mention_count(), 3);
//! # Ok::<(), anno_coref::Error>(())
//! ```

use crate::classify::{GenderModel, LexicalNumberModel, NumberModel, PronounGenderModel};
use crate::config::{LinkerConfig, LinkerMode};
use crate::context::ContextBuilder;
use crate::resolver::{
    Claim, NominalResolver, PluralPronounResolver, ProperNounResolver, Resolver,
    SingularPronounResolver,
};
use crate::Result;
use anno_coref_core::{
    DiscourseEntity, DiscourseModel, EntityKey, Error as DiscourseError, Mention, MentionContext,
};

/// Orchestrates the resolver cascade for one document at a time.
pub struct Linker {
    config: LinkerConfig,
    resolvers: Vec<Box<dyn Resolver>>,
    singular_pronoun: Option<usize>,
    gender_model: Box<dyn GenderModel>,
    number_model: Box<dyn NumberModel>,
}

impl std::fmt::Debug for Linker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Linker")
            .field("config", &self.config)
            .field("resolvers", &self.resolver_names())
            .field("singular_pronoun", &self.singular_pronoun)
            .finish()
    }
}

impl Linker {
    /// Create a linker with an empty cascade and the lexical classifiers.
    #[must_use]
    pub fn new(config: LinkerConfig) -> Self {
        Self {
            config,
            resolvers: Vec::new(),
            singular_pronoun: None,
            gender_model: Box::new(PronounGenderModel::default()),
            number_model: Box::new(LexicalNumberModel::default()),
        }
    }

    /// Create a linker with the bundled cascade: proper names, nominals,
    /// plural pronouns, then singular pronouns (designated as the
    /// singular-pronoun resolver).
    #[must_use]
    pub fn default_cascade(config: LinkerConfig) -> Self {
        Self::new(config)
            .with_resolver(ProperNounResolver::new())
            .with_resolver(NominalResolver::new())
            .with_resolver(PluralPronounResolver::new())
            .with_singular_pronoun_resolver(SingularPronounResolver::new())
    }

    /// Append a resolver to the cascade.
    #[must_use]
    pub fn with_resolver(mut self, resolver: impl Resolver + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    /// Append a resolver and designate it the singular-pronoun resolver.
    ///
    /// A later call moves the designation.
    #[must_use]
    pub fn with_singular_pronoun_resolver(mut self, resolver: impl Resolver + 'static) -> Self {
        self.singular_pronoun = Some(self.resolvers.len());
        self.resolvers.push(Box::new(resolver));
        self
    }

    /// Switch mode for subsequent runs, keeping the (possibly trained)
    /// cascade.
    #[must_use]
    pub fn with_mode(mut self, mode: LinkerMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Replace the gender classifier.
    #[must_use]
    pub fn with_gender_model(mut self, model: impl GenderModel + 'static) -> Self {
        self.gender_model = Box::new(model);
        self
    }

    /// Replace the number classifier.
    #[must_use]
    pub fn with_number_model(mut self, model: impl NumberModel + 'static) -> Self {
        self.number_model = Box::new(model);
        self
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &LinkerConfig {
        &self.config
    }

    /// Run mode.
    #[must_use]
    pub fn mode(&self) -> LinkerMode {
        self.config.mode
    }

    /// Number of resolvers in the cascade.
    #[must_use]
    pub fn resolver_count(&self) -> usize {
        self.resolvers.len()
    }

    /// Resolver names in cascade order.
    #[must_use]
    pub fn resolver_names(&self) -> Vec<&'static str> {
        self.resolvers.iter().map(|r| r.name()).collect()
    }

    /// Cascade position of the singular-pronoun resolver.
    #[must_use]
    pub fn singular_pronoun_index(&self) -> Option<usize> {
        self.singular_pronoun
    }

    /// Build mention contexts with this linker's classifiers.
    ///
    /// # Errors
    ///
    /// [`crate::Error::InvalidInput`] if mentions are not grouped by sentence.
    pub fn build_contexts(&self, mentions: &[Mention]) -> Result<Vec<MentionContext>> {
        ContextBuilder::new(self.gender_model.as_ref(), self.number_model.as_ref())
            .similarity_only(!self.config.mode.computes_attributes())
            .build(mentions)
    }

    /// Resolve a document and return the final discourse model.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::InvalidInput`] for badly ordered mentions
    /// - [`crate::Error::Discourse`] if the model and the linker lose sync
    pub fn resolve_document(&mut self, mentions: &[Mention]) -> Result<DiscourseModel> {
        let contexts = self.build_contexts(mentions)?;
        let mut model = DiscourseModel::new();
        for mention in contexts {
            self.resolve_mention(mention, &mut model)?;
        }
        if log::log_enabled!(log::Level::Debug) {
            model.dump();
        }
        Ok(model)
    }

    /// Resolve a document and return its entities, most recently mentioned
    /// first.
    ///
    /// # Errors
    ///
    /// See [`Linker::resolve_document`].
    pub fn get_entities_from_mentions(
        &mut self,
        mentions: &[Mention],
    ) -> Result<Vec<DiscourseEntity>> {
        Ok(self.resolve_document(mentions)?.into_entities())
    }

    /// Run a document through the cascade for its side effects on the
    /// resolvers (training data collection); the clusters are discarded.
    ///
    /// # Errors
    ///
    /// See [`Linker::resolve_document`].
    pub fn set_entities_from_mentions(&mut self, mentions: &[Mention]) -> Result<()> {
        self.resolve_document(mentions).map(|_| ())
    }

    /// Train every resolver on what it has retained.
    ///
    /// # Errors
    ///
    /// The first resolver error; later resolvers are not trained.
    pub fn train(&mut self) -> Result<()> {
        for resolver in &mut self.resolvers {
            log::info!("training resolver {}", resolver.name());
            resolver.train()?;
        }
        Ok(())
    }

    /// Resolve one mention against `model` and update it.
    ///
    /// # Errors
    ///
    /// [`crate::Error::Discourse`] if a resolver claims an entity the model
    /// does not hold.
    pub fn resolve_mention(
        &mut self,
        mention: MentionContext,
        model: &mut DiscourseModel,
    ) -> Result<()> {
        let mode = self.config.mode;
        if mode == LinkerMode::Sim {
            log::debug!("{} mode runs no resolvers; skipping {}", mode, mention);
            return Ok(());
        }

        let last = self.resolvers.len().saturating_sub(1);
        let mut claims = vec![Claim::NoMatch; self.resolvers.len()];
        let mut valid_entity = true;
        let mut can_resolve = false;

        for (i, resolver) in self.resolvers.iter_mut().enumerate() {
            if !resolver.can_resolve(&mention) {
                continue;
            }
            claims[i] = match mode {
                LinkerMode::Test => resolver.resolve(&mention, model),
                _ => resolver.retain(&mention, model),
            };
            // The last resolver is a catch-all in training and does not count.
            if mode != LinkerMode::Train || i != last {
                can_resolve = true;
            }
            if Some(i) == self.singular_pronoun && !claims[i].is_match() {
                log::debug!(
                    "{} unresolved by {}; treating as non-referential",
                    mention,
                    resolver.name()
                );
                valid_entity = false;
            }
        }

        if !can_resolve && self.config.remove_unresolved_mentions {
            log::debug!("no resolver applies to {}; dropping it", mention);
            valid_entity = false;
        }

        let entity = check_for_merges(model, &claims)?;
        if valid_entity {
            update_extent(model, mention, entity, self.config.use_discourse_model)?;
        }
        Ok(())
    }
}

/// Fold the resolvers' claims into a single entity.
///
/// The first claimed entity absorbs every different entity claimed after
/// it, in cascade order. A later claim on an entity already absorbed in
/// this pass names the survivor and is a no-op. Returns the surviving
/// entity, or `None` if every resolver abstained.
///
/// # Errors
///
/// [`crate::Error::Discourse`] if a claimed entity is not in the model.
pub fn check_for_merges(
    model: &mut DiscourseModel,
    claims: &[Claim],
) -> Result<Option<EntityKey>> {
    let mut survivor: Option<EntityKey> = None;
    let mut absorbed: Vec<EntityKey> = Vec::new();
    for key in claims.iter().filter_map(Claim::entity) {
        match survivor {
            None => survivor = Some(key),
            Some(first) if first == key || absorbed.contains(&key) => {}
            Some(first) => {
                model.merge_entities(first, key, 1.0)?;
                absorbed.push(key);
            }
        }
    }
    Ok(survivor)
}

/// Record `mention` in the model.
///
/// With the discourse model, the mention joins `entity` (which moves to the
/// front) or starts a new entity. In flat mode every mention starts a new
/// entity; when an antecedent was found the new entity takes over its id.
///
/// # Errors
///
/// [`crate::Error::Discourse`] if `entity` is not in the model.
pub fn update_extent(
    model: &mut DiscourseModel,
    mention: MentionContext,
    entity: Option<EntityKey>,
    use_discourse_model: bool,
) -> Result<()> {
    match (entity, use_discourse_model) {
        (Some(key), true) => {
            let target = model
                .get_mut(key)
                .ok_or(DiscourseError::EntityNotFound(key))?;
            log::debug!("{} → entity {}", mention, target.id());
            target.attach(mention);
            model.mention_entity(key)?;
        }
        (None, true) => {
            log::debug!("{} starts a new entity", mention);
            model.add_entity(DiscourseEntity::from_mention(mention));
        }
        (antecedent, false) => {
            let antecedent_id = match antecedent {
                Some(key) => Some(
                    model
                        .get(key)
                        .ok_or(DiscourseError::EntityNotFound(key))?
                        .id(),
                ),
                None => None,
            };
            let key = model.add_entity(DiscourseEntity::from_mention(mention));
            if let (Some(id), Some(new)) = (antecedent_id, model.get_mut(key)) {
                new.set_id(id);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::MockResolver;
    use anno_coref_core::{Confidence, Gender, NodeRef};

    fn mention(text: &str, sentence: usize) -> Mention {
        Mention::new(text, 0, text.len(), sentence).with_node(NodeRef(sentence as u64))
    }

    fn ctx(text: &str, index: usize) -> MentionContext {
        MentionContext::new(Mention::new(text, index, index + 1, 0), index, index, 10)
    }

    fn seeded(texts: &[&str]) -> (DiscourseModel, Vec<EntityKey>) {
        let mut model = DiscourseModel::new();
        let keys = texts
            .iter()
            .enumerate()
            .map(|(i, t)| model.add_entity(DiscourseEntity::from_mention(ctx(t, i))))
            .collect();
        (model, keys)
    }

    #[test]
    fn check_for_merges_all_abstain() {
        let (mut model, _) = seeded(&["a"]);
        let merged = check_for_merges(&mut model, &[Claim::NoMatch, Claim::NoMatch]).unwrap();
        assert_eq!(merged, None);
        assert_eq!(model.entity_count(), 1);
    }

    #[test]
    fn check_for_merges_first_claim_survives() {
        let (mut model, keys) = seeded(&["a", "b", "c"]);
        let claims = [
            Claim::NoMatch,
            Claim::Matched(keys[1]),
            Claim::Matched(keys[0]),
            Claim::Matched(keys[1]),
            Claim::Matched(keys[2]),
        ];
        let merged = check_for_merges(&mut model, &claims).unwrap();

        assert_eq!(merged, Some(keys[1]));
        assert_eq!(model.entity_count(), 1);
        let texts: Vec<_> = model
            .get(keys[1])
            .unwrap()
            .mentions()
            .iter()
            .map(|m| m.text())
            .collect();
        assert_eq!(texts, vec!["b", "a", "c"]);
    }

    #[test]
    fn check_for_merges_repeated_claim_on_absorbed_entity() {
        let (mut model, keys) = seeded(&["a", "b", "c"]);
        let claims = [
            Claim::Matched(keys[0]),
            Claim::Matched(keys[1]),
            Claim::Matched(keys[1]),
        ];
        let merged = check_for_merges(&mut model, &claims).unwrap();

        assert_eq!(merged, Some(keys[0]));
        assert_eq!(model.entity_count(), 2);
        assert_eq!(model.get(keys[0]).unwrap().mention_count(), 2);
    }

    #[test]
    fn check_for_merges_alternating_claims() {
        let (mut model, keys) = seeded(&["a", "b"]);
        let claims = [
            Claim::Matched(keys[0]),
            Claim::Matched(keys[1]),
            Claim::Matched(keys[0]),
            Claim::Matched(keys[1]),
        ];
        let merged = check_for_merges(&mut model, &claims).unwrap();

        assert_eq!(merged, Some(keys[0]));
        assert_eq!(model.entity_count(), 1);
        assert!(model.get(keys[1]).is_none());
    }

    #[test]
    fn check_for_merges_same_entity_is_noop() {
        let (mut model, keys) = seeded(&["a", "b"]);
        let claims = [Claim::Matched(keys[0]), Claim::Matched(keys[0])];
        let merged = check_for_merges(&mut model, &claims).unwrap();
        assert_eq!(merged, Some(keys[0]));
        assert_eq!(model.entity_count(), 2);
    }

    #[test]
    fn update_extent_attaches_and_promotes() {
        let (mut model, keys) = seeded(&["a", "b"]);
        update_extent(&mut model, ctx("a2", 2), Some(keys[0]), true).unwrap();

        assert_eq!(model.entity_count(), 2);
        assert_eq!(model.entity(0).map(|e| e.key()), Some(keys[0]));
        assert_eq!(model.get(keys[0]).unwrap().mention_count(), 2);
    }

    #[test]
    fn update_extent_respects_confidence_rule() {
        let mut model = DiscourseModel::new();
        let key = model.add_entity(DiscourseEntity::from_mention(
            ctx("he", 0).with_gender(Gender::Male, Confidence::saturating(0.7)),
        ));
        update_extent(
            &mut model,
            ctx("she", 1).with_gender(Gender::Female, Confidence::saturating(0.7)),
            Some(key),
            true,
        )
        .unwrap();
        assert_eq!(model.get(key).unwrap().gender(), Gender::Male);
    }

    #[test]
    fn update_extent_flat_mode_copies_id() {
        let (mut model, keys) = seeded(&["a"]);
        update_extent(&mut model, ctx("a2", 1), Some(keys[0]), false).unwrap();

        assert_eq!(model.entity_count(), 2);
        assert_eq!(model.entity(0).unwrap().id(), model.entity(1).unwrap().id());
        assert_ne!(model.entity(0).unwrap().key(), keys[0]);
    }

    #[test]
    fn update_extent_unknown_entity_is_fatal() {
        let (mut model, keys) = seeded(&["a", "b"]);
        model.merge_entities(keys[0], keys[1], 1.0).unwrap();
        let err = update_extent(&mut model, ctx("x", 2), Some(keys[1]), true).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Discourse(DiscourseError::EntityNotFound(_))
        ));
    }

    #[test]
    fn singular_pronoun_gate() {
        let mut linker = Linker::new(LinkerConfig::default())
            .with_resolver(MockResolver::new("names").applies_to("John"))
            .with_singular_pronoun_resolver(MockResolver::new("pronouns").applies_to("it"));

        let entities = linker
            .get_entities_from_mentions(&[mention("John", 0), mention("it", 1)])
            .unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].mentions()[0].text(), "John");
    }

    #[test]
    fn gated_mention_still_merges_claimed_entities() {
        let mut linker = Linker::new(LinkerConfig::default())
            .with_resolver(MockResolver::new("a").applies_to("A").claims("it", "A"))
            .with_resolver(MockResolver::new("b").applies_to("B").claims("it", "B"))
            .with_singular_pronoun_resolver(MockResolver::new("pronouns").applies_to("it"));

        let contexts = linker
            .build_contexts(&[mention("A", 0), mention("B", 0), mention("it", 1)])
            .unwrap();
        let mut model = DiscourseModel::new();
        let mut contexts = contexts.into_iter();
        linker.resolve_mention(contexts.next().unwrap(), &mut model).unwrap();
        linker.resolve_mention(contexts.next().unwrap(), &mut model).unwrap();
        assert_eq!(model.entity_count(), 2);

        linker.resolve_mention(contexts.next().unwrap(), &mut model).unwrap();
        assert_eq!(model.entity_count(), 1);
        let survivor = model.entity(0).unwrap();
        let texts: Vec<_> = survivor.mentions().iter().map(|m| m.text()).collect();
        assert_eq!(texts, vec!["A", "B"]);
        assert!(model.entities().all(|e| e.mentions().iter().all(|m| m.text() != "it")));
    }

    #[test]
    fn train_mode_last_resolver_does_not_count() {
        let config = LinkerConfig::new(LinkerMode::Train);
        let mut linker = Linker::new(config)
            .with_resolver(MockResolver::new("first").applies_to("a"))
            .with_resolver(MockResolver::new("catch-all").applies_to("a").applies_to("b"));

        // "a" is accepted by the first resolver, "b" only by the last.
        let entities = linker
            .get_entities_from_mentions(&[mention("a", 0), mention("b", 0)])
            .unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].mentions()[0].text(), "a");
    }

    #[test]
    fn eval_mode_counts_last_resolver() {
        let config = LinkerConfig::new(LinkerMode::Eval);
        let mut linker = Linker::new(config)
            .with_resolver(MockResolver::new("first").applies_to("a"))
            .with_resolver(MockResolver::new("catch-all").applies_to("b"));

        let entities = linker
            .get_entities_from_mentions(&[mention("a", 0), mention("b", 0)])
            .unwrap();
        assert_eq!(entities.len(), 2);
    }

    #[test]
    fn sim_mode_skips_cascade() {
        let mut linker = Linker::default_cascade(LinkerConfig::new(LinkerMode::Sim));
        let entities = linker
            .get_entities_from_mentions(&[mention("John", 0)])
            .unwrap();
        assert!(entities.is_empty());
    }

    #[test]
    fn train_propagates_errors() {
        let mut linker = Linker::new(LinkerConfig::default())
            .with_resolver(MockResolver::new("ok"))
            .with_resolver(MockResolver::new("broken").failing_training());
        assert!(matches!(linker.train(), Err(crate::Error::Training(_))));
    }

    #[test]
    fn debug_lists_resolvers() {
        let linker = Linker::default_cascade(LinkerConfig::default());
        let dbg = format!("{:?}", linker);
        assert!(dbg.contains("proper-noun"));
        assert!(dbg.contains("singular-pronoun"));
        assert_eq!(
            linker.resolver_names(),
            vec!["proper-noun", "nominal", "plural-pronoun", "singular-pronoun"]
        );
        assert_eq!(linker.singular_pronoun_index(), Some(3));
    }
}
