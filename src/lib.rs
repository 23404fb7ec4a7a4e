//! # soundlaw
//!
//! A feature-based phonological rule engine.
//!
//! A word is an ordered sequence of sound [`Segment`](segment::Segment)s,
//! each described by a ternary feature bundle: features the sound has,
//! features it lacks, and features explicitly marked irrelevant. A
//! [`Rule`](rule::Rule) rewrites segments based on their own features and
//! the features of neighbouring segments, producing a new
//! [`Word`](word::Word) without mutating the input.
//!
//! ## Example
//!
//! ```rust,ignore
//! use soundlaw::prelude::*;
//!
//! // A voiced segment followed by a voiceless one.
//! let word = Word::new(vec![
//!     Segment::new(&["voice"], &[], &[]),
//!     Segment::new(&[], &["voice"], &[]),
//! ]);
//!
//! // Final devoicing: [+voice] → [-voice] word-finally.
//! let rule = Rule {
//!     last: true,
//!     ..Rule::new(
//!         "final-devoicing",
//!         ConditionSet::new(&["voice"], &[], &[]),
//!         Transform::Merge(Segment::new(&[], &["voice"], &[])),
//!     )
//! };
//!
//! if word.applicable(&rule) {
//!     let evolved = word.apply_rule(&rule);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`segment`] - Ternary feature bundles and the merge algebra
//! - [`word`] - Segment sequences with rule matching and application
//! - [`rule`] - Declarative rule records (conditions, contexts, transforms)
//! - [`inventory`] - Symbol tables mapping transcription symbols to segments
//! - [`parse`] - Transcription strings → [`Word`](word::Word)s
//! - [`deparse`] - [`Word`](word::Word)s → transcription strings
//! - [`serialization`] - JSON rule and inventory files
//!
//! The engine core ([`segment`], [`word`], [`rule`]) is purely functional:
//! every operation is a bounded, synchronous scan over immutable inputs
//! producing new immutable outputs, so independent word/rule pairs can be
//! processed concurrently without locking. Rule sequencing policy (which
//! rules, in what order, looping to a fixed point) is deliberately left to
//! the caller.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod deparse;
pub mod inventory;
pub mod parse;
pub mod rule;
pub mod segment;
pub mod serialization;
pub mod word;

#[cfg(test)]
mod properties;

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::deparse::Deparser;
    pub use crate::inventory::{Diacritic, Inventory};
    pub use crate::parse::{parse_word, parse_words, ParseError};
    pub use crate::rule::{ConditionSet, Rule, RuleError, Transform};
    pub use crate::segment::Segment;
    pub use crate::serialization::{
        read_inventory, read_rules, write_inventory, write_rules, SerializationError,
    };
    pub use crate::word::Word;
}
