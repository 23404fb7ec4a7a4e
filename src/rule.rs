//! Declarative sound-change rules.
//!
//! A [`Rule`] is a passive record: a feature-condition set a segment must
//! meet, optional positional flags (`first`, `last`), optional contextual
//! condition sets on the neighbouring segments (`before`, `after`), and a
//! [`Transform`] describing what happens to a matched segment. All matching
//! and rewriting behaviour lives in [`Word`](crate::word::Word).
//!
//! Deletion is a first-class variant of [`Transform`], not a sentinel
//! feature label; the wire format's `"deletion"` marker is translated at
//! the [`serialization`](crate::serialization) boundary.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::segment::Segment;

/// A partial feature specification used for matching.
///
/// A condition set is feature-labelled the same way a segment is: labels
/// asserted positive, negative, or zero. A segment satisfies the set when
/// every asserted label sits in the segment's corresponding set (see
/// [`Segment::meets_conditions`]). Labels the set does not mention are
/// unconstrained, so the empty condition set matches every segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ConditionSet {
    positive: BTreeSet<String>,
    negative: BTreeSet<String>,
    zero: BTreeSet<String>,
}

impl ConditionSet {
    /// Create a condition set from three feature-label slices.
    ///
    /// Duplicate labels across slices keep the later classification, as in
    /// [`Segment::new`].
    pub fn new(positive: &[&str], negative: &[&str], zero: &[&str]) -> Self {
        ConditionSet::from_labels(
            positive.iter().copied(),
            negative.iter().copied(),
            zero.iter().copied(),
        )
    }

    /// Create a condition set from three feature-label iterators.
    pub fn from_labels<P, N, Z>(positive: P, negative: N, zero: Z) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
        Z: IntoIterator,
        Z::Item: Into<String>,
    {
        // Same label precedence as Segment construction.
        let segment = Segment::from_labels(positive, negative, zero);
        ConditionSet {
            positive: segment.positive().clone(),
            negative: segment.negative().clone(),
            zero: segment.zero().clone(),
        }
    }

    /// Labels a matching segment must hold positive.
    pub fn positive(&self) -> &BTreeSet<String> {
        &self.positive
    }

    /// Labels a matching segment must hold negative.
    pub fn negative(&self) -> &BTreeSet<String> {
        &self.negative
    }

    /// Labels a matching segment must hold zero.
    pub fn zero(&self) -> &BTreeSet<String> {
        &self.zero
    }

    /// Returns true if the set asserts nothing (matches every segment).
    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty() && self.zero.is_empty()
    }
}

/// What a rule does to a matched segment.
///
/// Deletion and feature merge are mutually exclusive per rule: a single
/// rule either removes matched segments or rewrites their features, never
/// both. The enum makes the combined form unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Transform {
    /// Merge the bundle into the matched segment via [`Segment::combine`].
    Merge(Segment),
    /// Remove the matched segment from the word entirely.
    Delete,
}

/// A declarative sound-change rule.
///
/// # Examples
///
/// ```rust,ignore
/// use soundlaw::prelude::*;
///
/// // Intervocalic voicing: [-voice] → [+voice] between syllabic segments.
/// let rule = Rule {
///     before: Some(ConditionSet::new(&["syllabic"], &[], &[])),
///     after: Some(ConditionSet::new(&["syllabic"], &[], &[])),
///     ..Rule::new(
///         "intervocalic-voicing",
///         ConditionSet::new(&[], &["voice"], &[]),
///         Transform::Merge(Segment::new(&["voice"], &[], &[])),
///     )
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Short identifier used in reports.
    pub name: String,
    /// Free-form description of the change.
    pub description: String,
    /// Conditions the matched segment itself must meet.
    pub conditions: ConditionSet,
    /// If set, the rule only matches the first segment of a word.
    pub first: bool,
    /// If set, the rule only matches the last segment of a word.
    pub last: bool,
    /// Conditions the preceding segment must meet. A rule with a `before`
    /// context never matches the first segment.
    pub before: Option<ConditionSet>,
    /// Conditions the following segment must meet. A rule with an `after`
    /// context never matches the last segment.
    pub after: Option<ConditionSet>,
    /// The transformation applied to matched segments.
    pub transform: Transform,
}

impl Rule {
    /// Create a rule with no positional flags and no contextual conditions.
    ///
    /// Use struct update syntax to set `first`, `last`, `before`, or
    /// `after`.
    pub fn new(name: impl Into<String>, conditions: ConditionSet, transform: Transform) -> Self {
        Rule {
            name: name.into(),
            description: String::new(),
            conditions,
            first: false,
            last: false,
            before: None,
            after: None,
            transform,
        }
    }
}

/// Errors raised while building a [`Rule`] from its wire form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// The rule record has no `conditions` key.
    #[error("rule {0:?} has no conditions")]
    MissingConditions(String),

    /// The rule record has no `applies` bundle.
    #[error("rule {0:?} has no applies bundle")]
    MissingApplies(String),

    /// The rule record marks deletion but also lists other feature changes.
    ///
    /// The two are mutually exclusive; listing both is treated as an
    /// authoring mistake rather than silently discarding the extra labels.
    #[error("rule {0:?} combines deletion with other feature changes")]
    DeletionWithFeatures(String),
}
