//! Segment inventories: transcription symbols mapped to feature bundles.
//!
//! An [`Inventory`] is the bridge between transcription strings and the
//! feature algebra: an ordered table of base symbols (for example IPA
//! letters, including multi-character sequences such as tied digraphs),
//! each with its [`Segment`], plus a table of [`Diacritic`]s whose feature
//! bundles are [`combine`](Segment::combine)d onto the base segment they
//! attach to.
//!
//! Inventories are consumed by [`parse`](crate::parse) and
//! [`deparse`](crate::deparse) and are typically loaded through
//! [`serialization`](crate::serialization).

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::segment::Segment;

/// A diacritic: a single combining character that modifies the features of
/// the base symbol it follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diacritic {
    /// The combining character, e.g. `ʰ` for aspiration.
    pub symbol: char,
    /// The feature bundle merged onto the base segment.
    pub applies: Segment,
}

impl Diacritic {
    /// Create a diacritic.
    pub fn new(symbol: char, applies: Segment) -> Self {
        Diacritic { symbol, applies }
    }
}

/// An ordered symbol table for one transcription system.
///
/// Symbol order is preserved from construction: deparsing prefers earlier
/// symbols on distance ties, and diacritics are applied in table order, so
/// the table order is part of the inventory's meaning.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    segments: Vec<(String, Segment)>,
    by_symbol: FxHashMap<String, usize>,
    diacritics: Vec<Diacritic>,
    diacritic_symbols: FxHashSet<char>,
}

impl Inventory {
    /// Create an inventory from a symbol table and a diacritic table.
    ///
    /// If a symbol appears more than once, the first entry wins for lookup.
    pub fn new(segments: Vec<(String, Segment)>, diacritics: Vec<Diacritic>) -> Self {
        let mut by_symbol = FxHashMap::default();
        for (index, (symbol, _)) in segments.iter().enumerate() {
            by_symbol.entry(symbol.clone()).or_insert(index);
        }
        let diacritic_symbols = diacritics.iter().map(|d| d.symbol).collect();

        Inventory {
            segments,
            by_symbol,
            diacritics,
            diacritic_symbols,
        }
    }

    /// Look up the segment for a base symbol.
    pub fn segment(&self, symbol: &str) -> Option<&Segment> {
        self.by_symbol
            .get(symbol)
            .map(|&index| &self.segments[index].1)
    }

    /// Returns true if the inventory defines this base symbol.
    pub fn contains_symbol(&self, symbol: &str) -> bool {
        self.by_symbol.contains_key(symbol)
    }

    /// Returns true if the character is a known diacritic.
    pub fn is_diacritic(&self, c: char) -> bool {
        self.diacritic_symbols.contains(&c)
    }

    /// The diacritics whose symbol occurs in `token`, in table order.
    pub fn diacritics_in(&self, token: &str) -> SmallVec<[&Diacritic; 2]> {
        self.diacritics
            .iter()
            .filter(|d| token.contains(d.symbol))
            .collect()
    }

    /// Iterate over the base symbols and their segments, in table order.
    pub fn symbols(&self) -> impl Iterator<Item = (&str, &Segment)> {
        self.segments.iter().map(|(s, seg)| (s.as_str(), seg))
    }

    /// Iterate over the diacritic table, in order.
    pub fn diacritics(&self) -> impl Iterator<Item = &Diacritic> {
        self.diacritics.iter()
    }

    /// The number of base symbols.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the inventory has no base symbols.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
