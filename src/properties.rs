//! Property-based tests for the engine's algebraic guarantees.
//!
//! These cover the invariants the unit tests only spot-check: merge
//! idempotence, disjointness under arbitrary construction and combination,
//! no-match identity, deletion arithmetic, and the positional/contextual
//! exclusivity of `first`, `last`, `before`, and `after`.

use proptest::prelude::*;

use crate::rule::{ConditionSet, Rule, Transform};
use crate::segment::Segment;
use crate::word::Word;

/// A small closed label pool so that generated segments, conditions, and
/// transformations overlap often enough to exercise the interesting cases.
const FEATURES: &[&str] = &[
    "voice",
    "nasal",
    "syllabic",
    "labial",
    "coronal",
    "dorsal",
    "round",
    "continuant",
    "sonorant",
    "lateral",
];

fn arb_labels() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(FEATURES), 0..4)
}

fn arb_segment() -> impl Strategy<Value = Segment> {
    (arb_labels(), arb_labels(), arb_labels())
        .prop_map(|(positive, negative, zero)| Segment::from_labels(positive, negative, zero))
}

fn arb_condition_set() -> impl Strategy<Value = ConditionSet> {
    (arb_labels(), arb_labels(), arb_labels()).prop_map(|(positive, negative, zero)| {
        ConditionSet::from_labels(positive, negative, zero)
    })
}

fn arb_word() -> impl Strategy<Value = Word> {
    prop::collection::vec(arb_segment(), 0..6).prop_map(Word::new)
}

fn assert_disjoint(segment: &Segment) {
    assert!(segment.positive().is_disjoint(segment.negative()));
    assert!(segment.positive().is_disjoint(segment.zero()));
    assert!(segment.negative().is_disjoint(segment.zero()));
}

/// How many positions of `word` the rule matches.
fn match_count(word: &Word, rule: &Rule) -> usize {
    (0..word.len())
        .filter(|&index| word.index_applicable(index, rule))
        .count()
}

proptest! {
    #[test]
    fn prop_construction_preserves_disjointness(segment in arb_segment()) {
        assert_disjoint(&segment);
    }

    #[test]
    fn prop_combine_preserves_disjointness(s in arb_segment(), t in arb_segment()) {
        assert_disjoint(&s.combine(&t));
    }

    #[test]
    fn prop_combine_idempotent(s in arb_segment(), t in arb_segment()) {
        let once = s.combine(&t);
        prop_assert_eq!(once.combine(&t), once);
    }

    #[test]
    fn prop_combine_result_satisfies_transformation(s in arb_segment(), t in arb_segment()) {
        // Every label the transformation mentions ends up with the
        // transformation's classification.
        let merged = s.combine(&t);
        prop_assert!(t.positive().is_subset(merged.positive()));
        prop_assert!(t.negative().is_subset(merged.negative()));
        prop_assert!(t.zero().is_subset(merged.zero()));
    }

    #[test]
    fn prop_unspecified_bundle_is_identity(s in arb_segment()) {
        // A bundle mentioning no features changes nothing when combined.
        let empty = Segment::default();
        prop_assert!(empty.is_unspecified());
        prop_assert_eq!(s.combine(&empty), s);
    }

    #[test]
    fn prop_no_match_is_identity(word in arb_word()) {
        // "glottal" is outside the generated label pool, so no segment can
        // satisfy the conditions.
        let rule = Rule::new(
            "impossible",
            ConditionSet::new(&["glottal"], &[], &[]),
            Transform::Merge(Segment::new(&[], &["voice"], &[])),
        );
        prop_assert!(!word.applicable(&rule));
        prop_assert_eq!(word.apply_rule(&rule), word);
    }

    #[test]
    fn prop_deletion_shrinks_by_match_count(
        word in arb_word(),
        conditions in arb_condition_set(),
    ) {
        let rule = Rule::new("loss", conditions, Transform::Delete);
        let matches = match_count(&word, &rule);
        prop_assert_eq!(word.apply_rule(&rule).len(), word.len() - matches);
    }

    #[test]
    fn prop_merge_preserves_length(
        word in arb_word(),
        conditions in arb_condition_set(),
        bundle in arb_segment(),
    ) {
        let rule = Rule::new("shift", conditions, Transform::Merge(bundle));
        prop_assert_eq!(word.apply_rule(&rule).len(), word.len());
    }

    #[test]
    fn prop_applicable_iff_some_index_matches(
        word in arb_word(),
        conditions in arb_condition_set(),
    ) {
        let rule = Rule::new("probe", conditions, Transform::Delete);
        prop_assert_eq!(word.applicable(&rule), match_count(&word, &rule) > 0);
    }

    #[test]
    fn prop_first_only_matches_index_zero(
        word in arb_word(),
        conditions in arb_condition_set(),
    ) {
        let rule = Rule {
            first: true,
            ..Rule::new("initial", conditions, Transform::Delete)
        };
        for index in 1..word.len() {
            prop_assert!(!word.index_applicable(index, &rule));
        }
    }

    #[test]
    fn prop_last_only_matches_final_index(
        word in arb_word(),
        conditions in arb_condition_set(),
    ) {
        let rule = Rule {
            last: true,
            ..Rule::new("final", conditions, Transform::Delete)
        };
        for index in 0..word.len().saturating_sub(1) {
            prop_assert!(!word.index_applicable(index, &rule));
        }
    }

    #[test]
    fn prop_before_never_matches_index_zero(
        word in arb_word(),
        context in arb_condition_set(),
    ) {
        let rule = Rule {
            before: Some(context),
            ..Rule::new("post-context", ConditionSet::default(), Transform::Delete)
        };
        if !word.is_empty() {
            prop_assert!(!word.index_applicable(0, &rule));
        }
    }

    #[test]
    fn prop_after_never_matches_last_index(
        word in arb_word(),
        context in arb_condition_set(),
    ) {
        let rule = Rule {
            after: Some(context),
            ..Rule::new("pre-context", ConditionSet::default(), Transform::Delete)
        };
        if !word.is_empty() {
            prop_assert!(!word.index_applicable(word.len() - 1, &rule));
        }
    }

    #[test]
    fn prop_apply_rule_never_mutates_receiver(
        word in arb_word(),
        conditions in arb_condition_set(),
    ) {
        let snapshot = word.clone();
        let _ = word.apply_rule(&Rule::new("probe", conditions, Transform::Delete));
        prop_assert_eq!(word, snapshot);
    }
}
