//! Property-based tests for discourse model invariants.
//!
//! These hold for any sequence of additions, mentions and merges, not just
//! the handful of documents in the scenario tests.

use anno_coref::{
    Confidence, DiscourseEntity, DiscourseModel, EntityKey, Gender, Mention, MentionContext,
};
use proptest::prelude::*;
use std::collections::HashSet;

fn ctx(index: usize) -> MentionContext {
    let text = format!("m{}", index);
    let len = text.len();
    MentionContext::new(Mention::new(text, index, index + len, 0), index, index, 1)
}

#[derive(Debug, Clone)]
enum Op {
    Add,
    Mention(usize),
    Merge(usize, usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => Just(Op::Add),
        1 => (0..32usize).prop_map(Op::Mention),
        1 => (0..32usize, 0..32usize).prop_map(|(a, b)| Op::Merge(a, b)),
    ]
}

fn key_at(model: &DiscourseModel, rank: usize) -> Option<EntityKey> {
    let n = model.entity_count();
    (n > 0).then(|| model.entity(rank % n).map(DiscourseEntity::key)).flatten()
}

proptest! {
    #[test]
    fn singletons_are_most_recent_first(n in 0..40usize) {
        let mut model = DiscourseModel::new();
        let keys: Vec<_> = (0..n)
            .map(|i| model.add_entity(DiscourseEntity::from_mention(ctx(i))))
            .collect();

        prop_assert_eq!(model.entity_count(), n);
        let order: Vec<_> = model.entities().map(DiscourseEntity::key).collect();
        let expected: Vec<_> = keys.into_iter().rev().collect();
        prop_assert_eq!(order, expected);
    }

    #[test]
    fn ids_stay_unique_under_any_operations(ops in prop::collection::vec(op(), 0..60)) {
        let mut model = DiscourseModel::new();
        let mut next = 0;
        let mut last_id = 0;

        for op in ops {
            match op {
                Op::Add => {
                    let key = model.add_entity(DiscourseEntity::from_mention(ctx(next)));
                    next += 1;
                    let id = model.get(key).map(DiscourseEntity::id).unwrap_or_default();
                    prop_assert!(id > last_id, "id {} not above {}", id, last_id);
                    last_id = id;
                }
                Op::Mention(rank) => {
                    if let Some(key) = key_at(&model, rank) {
                        let before = model.entity_count();
                        model.mention_entity(key).unwrap();
                        prop_assert_eq!(model.entity_count(), before);
                        prop_assert_eq!(model.rank_of(key), Some(0));
                    }
                }
                Op::Merge(a, b) => {
                    if let (Some(x), Some(y)) = (key_at(&model, a), key_at(&model, b)) {
                        if x != y {
                            let before = model.entity_count();
                            let mentions = model.get(x).unwrap().mention_count()
                                + model.get(y).unwrap().mention_count();
                            model.merge_entities(x, y, 1.0).unwrap();
                            prop_assert_eq!(model.entity_count(), before - 1);
                            prop_assert_eq!(model.get(x).unwrap().mention_count(), mentions);
                            prop_assert!(model.get(y).is_none());
                        }
                    }
                }
            }

            let ids: HashSet<_> = model.entities().map(DiscourseEntity::id).collect();
            prop_assert_eq!(ids.len(), model.entity_count());
            prop_assert!(model.next_id() > last_id);
        }

        // Every mention added is still held by exactly one entity.
        let held: usize = model.entities().map(DiscourseEntity::mention_count).sum();
        prop_assert_eq!(held, next);
    }

    #[test]
    fn merge_keeps_survivor_rank(n in 2..20usize, a in 0..20usize, b in 0..20usize) {
        let mut model = DiscourseModel::new();
        for i in 0..n {
            model.add_entity(DiscourseEntity::from_mention(ctx(i)));
        }
        let (a, b) = (a % n, b % n);
        prop_assume!(a != b);
        let survivor = key_at(&model, a).unwrap();
        let absorbed = key_at(&model, b).unwrap();

        model.merge_entities(survivor, absorbed, 1.0).unwrap();

        let expected_rank = if b < a { a - 1 } else { a };
        prop_assert_eq!(model.rank_of(survivor), Some(expected_rank));
    }

    #[test]
    fn attribute_replaced_only_by_strictly_higher_confidence(
        first in 0.0..=1.0f64,
        second in 0.0..=1.0f64,
    ) {
        let mut entity = DiscourseEntity::from_mention(
            ctx(0).with_gender(Gender::Male, Confidence::saturating(first)),
        );
        entity.attach(ctx(1).with_gender(Gender::Female, Confidence::saturating(second)));

        let expected = if second > first { Gender::Female } else { Gender::Male };
        prop_assert_eq!(entity.gender(), expected);
        prop_assert_eq!(entity.mention_count(), 2);
    }
}

#[test]
fn mentioning_a_merged_entity_fails() {
    let mut model = DiscourseModel::new();
    let a = model.add_entity(DiscourseEntity::from_mention(ctx(0)));
    let b = model.add_entity(DiscourseEntity::from_mention(ctx(1)));
    model.merge_entities(a, b, 1.0).unwrap();

    assert!(model.mention_entity(b).unwrap_err().is_consistency_violation());
    assert!(model.merge_entities(a, b, 1.0).is_err());
}

#[test]
fn cleared_model_keeps_counting() {
    let mut model = DiscourseModel::new();
    model.add_entity(DiscourseEntity::from_mention(ctx(0)));
    model.add_entity(DiscourseEntity::from_mention(ctx(1)));
    model.clear();
    assert!(model.is_empty());

    let key = model.add_entity(DiscourseEntity::from_mention(ctx(2)));
    assert_eq!(model.get(key).map(DiscourseEntity::id), Some(3));
}
