//! Deparsing [`Word`]s back into transcription strings.
//!
//! A segment rarely matches an inventory entry exactly after rules have
//! rewritten its features, so deparsing is a nearest-neighbour search: each
//! segment is rendered as a ternary feature string (`+`/`-`/`0` per label,
//! in a canonical order derived from the inventory) and matched against the
//! feature string of every inventory symbol by Levenshtein distance.
//! Distance ties break to the shortest symbol, then to table order, so
//! words deparse into the simplest transcription available.
//!
//! A [`Deparser`] memoises matches per feature string; rule applications
//! tend to produce the same bundles over and over, so the cache pays for
//! itself on any realistic corpus.

use rustc_hash::FxHashMap;

use crate::inventory::Inventory;
use crate::segment::Segment;
use crate::word::Word;

/// A reusable word-to-transcription converter for one inventory.
///
/// Construction precomputes the canonical feature order and the feature
/// string of every inventory symbol; deparsing then only computes the
/// target segment's feature string and scans the candidates.
#[derive(Debug, Clone)]
pub struct Deparser {
    /// Canonical label order: the sorted union of every label mentioned
    /// anywhere in the inventory.
    order: Vec<String>,
    /// `(symbol, feature string)` per inventory entry, in table order.
    candidates: Vec<(String, String)>,
    /// Memoised best matches, keyed by target feature string.
    cache: FxHashMap<String, String>,
}

impl Deparser {
    /// Build a deparser for an inventory.
    pub fn new(inventory: &Inventory) -> Self {
        let mut labels = std::collections::BTreeSet::new();
        for (_, segment) in inventory.symbols() {
            labels.extend(segment.positive().iter().cloned());
            labels.extend(segment.negative().iter().cloned());
            labels.extend(segment.zero().iter().cloned());
        }
        for diacritic in inventory.diacritics() {
            labels.extend(diacritic.applies.positive().iter().cloned());
            labels.extend(diacritic.applies.negative().iter().cloned());
            labels.extend(diacritic.applies.zero().iter().cloned());
        }
        let order: Vec<String> = labels.into_iter().collect();

        let candidates = inventory
            .symbols()
            .map(|(symbol, segment)| (symbol.to_string(), feature_string_for(&order, segment)))
            .collect();

        Deparser {
            order,
            candidates,
            cache: FxHashMap::default(),
        }
    }

    /// Render a segment as a ternary feature string in canonical order.
    ///
    /// Each label maps to `+`, `-`, or `0`; labels the segment does not
    /// mention render as `0`, and labels outside the inventory's universe
    /// do not appear at all.
    pub fn feature_string(&self, segment: &Segment) -> String {
        feature_string_for(&self.order, segment)
    }

    /// The inventory symbol whose feature string is nearest the segment's.
    ///
    /// Returns an empty string for an empty inventory.
    pub fn deparse_segment(&mut self, segment: &Segment) -> String {
        let target = self.feature_string(segment);
        if let Some(symbol) = self.cache.get(&target) {
            return symbol.clone();
        }

        let symbol = self.best_match(&target);
        self.cache.insert(target, symbol.clone());
        symbol
    }

    /// Deparse a word into a transcription string.
    ///
    /// An empty word deparses to an empty string.
    pub fn deparse_word(&mut self, word: &Word) -> String {
        word.segments()
            .iter()
            .map(|segment| self.deparse_segment(segment))
            .collect()
    }

    /// Deparse a batch of words.
    pub fn deparse_words(&mut self, words: &[Word]) -> Vec<String> {
        words.iter().map(|word| self.deparse_word(word)).collect()
    }

    fn best_match(&self, target: &str) -> String {
        let mut best: Option<(usize, &str)> = None;

        for (symbol, feature_string) in &self.candidates {
            let distance = edit_distance(target, feature_string);
            match &mut best {
                None => best = Some((distance, symbol.as_str())),
                Some((best_distance, best_symbol)) => {
                    if distance < *best_distance
                        || (distance == *best_distance
                            && symbol.chars().count() < best_symbol.chars().count())
                    {
                        *best_distance = distance;
                        *best_symbol = symbol.as_str();
                    }
                }
            }
        }

        best.map(|(_, symbol)| symbol.to_string()).unwrap_or_default()
    }
}

/// Render a segment as a ternary feature string: one `+`, `-`, or `0` per
/// label in `order`. Zero and unmentioned labels both render as `0`; only
/// the explicit marking matters for matching, not for rendering.
fn feature_string_for(order: &[String], segment: &Segment) -> String {
    order
        .iter()
        .map(|label| {
            if segment.positive().contains(label) {
                '+'
            } else if segment.negative().contains(label) {
                '-'
            } else {
                '0'
            }
        })
        .collect()
}

/// Levenshtein distance between two strings, two-row dynamic programming.
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
