//! Ternary feature bundles.
//!
//! A [`Segment`] describes one sound unit as three pairwise-disjoint sets of
//! feature labels: features the sound explicitly has (`positive`), features
//! it explicitly lacks (`negative`), and features explicitly marked
//! irrelevant (`zero`). A label absent from all three sets is simply
//! unmentioned, which is distinct from `zero` - rules can require an
//! explicit "don't care" marking.
//!
//! Feature labels are opaque strings; the engine performs no validation
//! against any phonological feature inventory.
//!
//! # Functions
//!
//! - [`Segment::meets_conditions`] - Check a segment against a partial
//!   feature specification
//! - [`Segment::combine`] - Merge a transformation bundle into a segment

use std::collections::BTreeSet;
use std::fmt;

use crate::rule::ConditionSet;

/// One sound unit, represented as a ternary feature bundle.
///
/// # Invariant
///
/// The three sets are pairwise disjoint: a feature label appears in at most
/// one of `positive`, `negative`, and `zero`. Every constructor and
/// operation preserves this - re-classifying a label removes it from
/// whichever set previously held it.
///
/// # Value Equality
///
/// Storage is `BTreeSet<String>`, so the derived `PartialEq`/`Eq`/`Hash`
/// are computed from canonical set contents, independent of construction
/// order. Two segments with equal sets are interchangeable values.
///
/// # Examples
///
/// ```rust,ignore
/// use soundlaw::segment::Segment;
///
/// let b = Segment::new(&["voice", "labial"], &["nasal"], &[]);
/// let p = b.combine(&Segment::new(&[], &["voice"], &[]));
///
/// assert!(p.negative().contains("voice"));
/// assert!(!p.positive().contains("voice"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Segment {
    positive: BTreeSet<String>,
    negative: BTreeSet<String>,
    zero: BTreeSet<String>,
}

impl Segment {
    /// Create a segment from three feature-label slices.
    ///
    /// Labels are deduplicated into sets. If the same label appears in more
    /// than one slice, the later classification wins (`zero` over
    /// `negative` over `positive`), so the disjointness invariant holds for
    /// any input.
    pub fn new(positive: &[&str], negative: &[&str], zero: &[&str]) -> Self {
        Segment::from_labels(
            positive.iter().copied(),
            negative.iter().copied(),
            zero.iter().copied(),
        )
    }

    /// Create a segment from three feature-label iterators.
    ///
    /// Same semantics as [`Segment::new`]; this form avoids intermediate
    /// slices when the labels are already owned strings.
    pub fn from_labels<P, N, Z>(positive: P, negative: N, zero: Z) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
        Z: IntoIterator,
        Z::Item: Into<String>,
    {
        let mut segment = Segment::default();
        for feature in positive {
            segment.add_positive(feature.into());
        }
        for feature in negative {
            segment.add_negative(feature.into());
        }
        for feature in zero {
            segment.add_zero(feature.into());
        }
        segment
    }

    /// The features this segment explicitly has.
    pub fn positive(&self) -> &BTreeSet<String> {
        &self.positive
    }

    /// The features this segment explicitly lacks.
    pub fn negative(&self) -> &BTreeSet<String> {
        &self.negative
    }

    /// The features explicitly marked irrelevant for this segment.
    pub fn zero(&self) -> &BTreeSet<String> {
        &self.zero
    }

    /// Returns true if the segment mentions no features at all.
    pub fn is_unspecified(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty() && self.zero.is_empty()
    }

    /// Check whether this segment satisfies a feature-condition set.
    ///
    /// Every feature the condition set asserts positive must be in this
    /// segment's `positive` set, likewise for `negative` and `zero`.
    /// Features the condition set does not mention are unconstrained. The
    /// check is exact set membership - there is no partial or fuzzy
    /// matching.
    ///
    /// An empty condition set is satisfied by every segment.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use soundlaw::prelude::*;
    ///
    /// let b = Segment::new(&["voice"], &["nasal"], &[]);
    /// assert!(b.meets_conditions(&ConditionSet::new(&["voice"], &[], &[])));
    /// assert!(!b.meets_conditions(&ConditionSet::new(&["nasal"], &[], &[])));
    /// ```
    pub fn meets_conditions(&self, conditions: &ConditionSet) -> bool {
        conditions.positive().is_subset(&self.positive)
            && conditions.negative().is_subset(&self.negative)
            && conditions.zero().is_subset(&self.zero)
    }

    /// Merge another bundle into this segment, producing a new segment.
    ///
    /// For every label `other` mentions, the result adopts `other`'s
    /// classification, overriding this segment's prior classification for
    /// that label if any. Labels `other` does not mention keep this
    /// segment's classification. Neither input is mutated.
    ///
    /// Combining is idempotent in its right operand:
    /// `s.combine(t).combine(t) == s.combine(t)`.
    pub fn combine(&self, other: &Segment) -> Segment {
        let mut result = self.clone();
        for feature in &other.positive {
            result.add_positive(feature.clone());
        }
        for feature in &other.negative {
            result.add_negative(feature.clone());
        }
        for feature in &other.zero {
            result.add_zero(feature.clone());
        }
        result
    }

    fn add_positive(&mut self, feature: String) {
        self.negative.remove(&feature);
        self.zero.remove(&feature);
        self.positive.insert(feature);
    }

    fn add_negative(&mut self, feature: String) {
        self.positive.remove(&feature);
        self.zero.remove(&feature);
        self.negative.insert(feature);
    }

    fn add_zero(&mut self, feature: String) {
        self.positive.remove(&feature);
        self.negative.remove(&feature);
        self.zero.insert(feature);
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        for feature in &self.positive {
            parts.push(format!("+{}", feature));
        }
        for feature in &self.negative {
            parts.push(format!("-{}", feature));
        }
        for feature in &self.zero {
            parts.push(format!("0{}", feature));
        }
        write!(f, "[{}]", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_deduplicates() {
        let s = Segment::new(&["voice", "voice"], &["nasal"], &[]);
        assert_eq!(s.positive().len(), 1);
        assert!(s.positive().contains("voice"));
    }

    #[test]
    fn test_new_later_classification_wins() {
        let s = Segment::new(&["voice"], &["voice"], &[]);
        assert!(!s.positive().contains("voice"));
        assert!(s.negative().contains("voice"));

        let s = Segment::new(&["voice"], &[], &["voice"]);
        assert!(s.zero().contains("voice"));
        assert!(!s.positive().contains("voice"));
    }

    #[test]
    fn test_value_equality_is_order_independent() {
        let a = Segment::new(&["voice", "labial"], &["nasal"], &[]);
        let b = Segment::new(&["labial", "voice"], &["nasal"], &[]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_distinguishes_classification() {
        let a = Segment::new(&["voice"], &[], &[]);
        let b = Segment::new(&[], &["voice"], &[]);
        let c = Segment::new(&[], &[], &["voice"]);
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn test_unmentioned_is_not_zero() {
        let unmentioned = Segment::new(&[], &["voice"], &[]);
        let zeroed = Segment::new(&[], &["voice"], &["round"]);
        assert_ne!(unmentioned, zeroed);
    }

    #[test]
    fn test_meets_conditions() {
        let s = Segment::new(&["voice", "labial"], &["nasal"], &["round"]);

        assert!(s.meets_conditions(&ConditionSet::new(&["voice"], &[], &[])));
        assert!(s.meets_conditions(&ConditionSet::new(&["voice", "labial"], &["nasal"], &[])));
        assert!(s.meets_conditions(&ConditionSet::new(&[], &[], &["round"])));

        // Wrong classification fails.
        assert!(!s.meets_conditions(&ConditionSet::new(&["nasal"], &[], &[])));
        assert!(!s.meets_conditions(&ConditionSet::new(&[], &["voice"], &[])));
        // Unmentioned feature fails when required.
        assert!(!s.meets_conditions(&ConditionSet::new(&["dorsal"], &[], &[])));
        // Zero is required explicitly, not implied by absence.
        assert!(!s.meets_conditions(&ConditionSet::new(&[], &[], &["dorsal"])));
    }

    #[test]
    fn test_empty_conditions_match_everything() {
        let empty = ConditionSet::default();
        assert!(Segment::default().meets_conditions(&empty));
        assert!(Segment::new(&["voice"], &[], &[]).meets_conditions(&empty));
    }

    #[test]
    fn test_combine_overrides_mentioned_labels() {
        let s = Segment::new(&["voice"], &["nasal"], &[]);
        let t = Segment::new(&[], &["voice"], &[]);
        let merged = s.combine(&t);

        assert!(merged.negative().contains("voice"));
        assert!(!merged.positive().contains("voice"));
        // Unmentioned labels keep their classification.
        assert!(merged.negative().contains("nasal"));
    }

    #[test]
    fn test_combine_adds_new_labels() {
        let s = Segment::new(&["voice"], &[], &[]);
        let t = Segment::new(&["nasal"], &[], &["round"]);
        let merged = s.combine(&t);

        assert!(merged.positive().contains("voice"));
        assert!(merged.positive().contains("nasal"));
        assert!(merged.zero().contains("round"));
    }

    #[test]
    fn test_combine_does_not_mutate_inputs() {
        let s = Segment::new(&["voice"], &[], &[]);
        let t = Segment::new(&[], &["voice"], &[]);
        let _ = s.combine(&t);

        assert!(s.positive().contains("voice"));
        assert!(t.negative().contains("voice"));
    }

    #[test]
    fn test_combine_with_unspecified_is_identity() {
        let s = Segment::new(&["voice"], &["nasal"], &["round"]);
        assert_eq!(s.combine(&Segment::default()), s);
    }

    #[test]
    fn test_display() {
        let s = Segment::new(&["voice"], &["nasal"], &["round"]);
        assert_eq!(s.to_string(), "[+voice -nasal 0round]");
        assert_eq!(Segment::default().to_string(), "[]");
    }
}
