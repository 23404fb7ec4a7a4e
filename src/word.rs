//! Words: segment sequences with rule matching and application.
//!
//! A [`Word`] is an ordered sequence of [`Segment`]s; the order is the
//! left-to-right sound order and is phonologically meaningful. The matching
//! logic lives in [`Word::index_applicable`], which combines the segment's
//! own conditions with the rule's positional flags and neighbouring-segment
//! contexts, and the rewriting logic in [`Word::apply_rule`], which walks
//! the sequence once and builds a new word.
//!
//! All operations are pure: a word is never mutated after construction.

use std::fmt;

use crate::rule::{Rule, Transform};
use crate::segment::Segment;

/// An ordered sequence of segments representing a single sound-string.
///
/// A word may be empty - deletion rules can reduce a word to nothing.
/// Equality and hashing are element-wise and order-sensitive: two words are
/// equal iff they have the same length and equal segments at every
/// position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Word {
    segments: Vec<Segment>,
}

impl Word {
    /// Create a word from a segment sequence.
    pub fn new(segments: Vec<Segment>) -> Self {
        Word { segments }
    }

    /// The segments of this word, in left-to-right sound order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The number of segments in this word.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the word has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Check whether a rule matches the segment at a given index.
    ///
    /// The segment's own conditions gate everything else; the remaining
    /// checks short-circuit in order:
    ///
    /// 1. The segment at `index` must meet `rule.conditions`.
    /// 2. If `rule.first` is set, `index` must be 0.
    /// 3. If `rule.last` is set, `index` must be the last index.
    /// 4. If `rule.before` is set, a preceding segment must exist and meet
    ///    it (so index 0 never matches).
    /// 5. If `rule.after` is set, a following segment must exist and meet
    ///    it (so the last index never matches).
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range. Matching at an out-of-range index
    /// is a caller defect, not a condition failure; both [`applicable`] and
    /// [`apply_rule`] only probe in-range indices.
    ///
    /// [`applicable`]: Word::applicable
    /// [`apply_rule`]: Word::apply_rule
    pub fn index_applicable(&self, index: usize, rule: &Rule) -> bool {
        if !self.segments[index].meets_conditions(&rule.conditions) {
            return false;
        }

        if rule.first && index != 0 {
            return false;
        }

        if rule.last && index + 1 != self.segments.len() {
            return false;
        }

        if let Some(before) = &rule.before {
            match index.checked_sub(1).map(|i| &self.segments[i]) {
                Some(preceding) if preceding.meets_conditions(before) => {}
                _ => return false,
            }
        }

        if let Some(after) = &rule.after {
            match self.segments.get(index + 1) {
                Some(following) if following.meets_conditions(after) => {}
                _ => return false,
            }
        }

        true
    }

    /// Returns true if the rule matches at least one index of this word.
    ///
    /// Pure existence check; reports neither which positions matched nor
    /// how many.
    pub fn applicable(&self, rule: &Rule) -> bool {
        (0..self.segments.len()).any(|index| self.index_applicable(index, rule))
    }

    /// Apply a rule to every matching position, producing a new word.
    ///
    /// Walks every index in order. Matching segments are either omitted
    /// ([`Transform::Delete`]) or replaced by the result of combining them
    /// with the rule's merge bundle ([`Transform::Merge`]); non-matching
    /// segments are carried over unchanged. The receiver is never mutated.
    ///
    /// If the rule matches nowhere, the output is a new word equal to the
    /// input. A deletion rule matching every segment yields an empty word.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use soundlaw::prelude::*;
    ///
    /// let word = Word::new(vec![Segment::new(&["voice"], &[], &[])]);
    /// let rule = Rule::new(
    ///     "devoicing",
    ///     ConditionSet::new(&["voice"], &[], &[]),
    ///     Transform::Merge(Segment::new(&[], &["voice"], &[])),
    /// );
    ///
    /// let devoiced = word.apply_rule(&rule);
    /// assert!(devoiced.segments()[0].negative().contains("voice"));
    /// ```
    pub fn apply_rule(&self, rule: &Rule) -> Word {
        let mut segments = Vec::with_capacity(self.segments.len());

        for (index, segment) in self.segments.iter().enumerate() {
            if self.index_applicable(index, rule) {
                match &rule.transform {
                    Transform::Merge(bundle) => segments.push(segment.combine(bundle)),
                    Transform::Delete => {}
                }
            } else {
                segments.push(segment.clone());
            }
        }

        Word { segments }
    }
}

impl FromIterator<Segment> for Word {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Word {
            segments: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
