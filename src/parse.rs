//! Parsing transcription strings into [`Word`]s.
//!
//! A transcription string is tokenised greedily: at each position the
//! longest prefix that forms a valid token is consumed. A token is either a
//! base symbol from the [`Inventory`] or a base symbol followed by one or
//! more diacritics, so `bok͡piʰ` tokenises as `b`, `o`, `k͡p`, `iʰ`. Each
//! token then maps to the base symbol's segment combined with the feature
//! bundle of every attached diacritic, in diacritic table order.
//!
//! # Functions
//!
//! - [`parse_word`] - One transcription string → [`Word`]
//! - [`parse_words`] - A batch of transcription strings

use thiserror::Error;

use crate::inventory::Inventory;
use crate::segment::Segment;
use crate::word::Word;

/// Errors raised while parsing transcription strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No prefix of the remaining input forms a known symbol.
    #[error("unknown sequence {remainder:?} while parsing word {word:?}")]
    UnknownSequence {
        /// The full word being parsed.
        word: String,
        /// The unparseable tail of the word.
        remainder: String,
    },
}

/// Parse one transcription string into a [`Word`].
///
/// An empty string parses to an empty word.
///
/// # Errors
///
/// Returns [`ParseError::UnknownSequence`] if any part of the string cannot
/// be matched against the inventory.
///
/// # Examples
///
/// ```rust,ignore
/// use soundlaw::prelude::*;
///
/// let word = parse_word("pʰa", &inventory)?;
/// assert_eq!(word.len(), 2);
/// ```
pub fn parse_word(word: &str, inventory: &Inventory) -> Result<Word, ParseError> {
    let mut segments = Vec::new();
    let mut rest = word;

    while !rest.is_empty() {
        let token = next_token(rest, inventory).ok_or_else(|| ParseError::UnknownSequence {
            word: word.to_string(),
            remainder: rest.to_string(),
        })?;
        segments.push(token_to_segment(token, inventory).ok_or_else(|| {
            ParseError::UnknownSequence {
                word: word.to_string(),
                remainder: rest.to_string(),
            }
        })?);
        rest = &rest[token.len()..];
    }

    Ok(Word::new(segments))
}

/// Parse a batch of transcription strings.
///
/// # Errors
///
/// Fails on the first word containing an unknown sequence.
pub fn parse_words<'a, I>(words: I, inventory: &Inventory) -> Result<Vec<Word>, ParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    words
        .into_iter()
        .map(|word| parse_word(word, inventory))
        .collect()
}

/// The longest valid token prefix of `rest`, if any.
fn next_token<'a>(rest: &'a str, inventory: &Inventory) -> Option<&'a str> {
    for end in (1..=rest.len()).rev() {
        if !rest.is_char_boundary(end) {
            continue;
        }
        let candidate = &rest[..end];
        if valid_token(candidate, inventory) {
            return Some(candidate);
        }
    }
    None
}

/// A token is a base symbol, or a base symbol followed entirely by
/// diacritics.
fn valid_token(token: &str, inventory: &Inventory) -> bool {
    if inventory.contains_symbol(token) {
        return true;
    }

    for (split, _) in token.char_indices().skip(1) {
        if inventory.contains_symbol(&token[..split])
            && token[split..].chars().all(|c| inventory.is_diacritic(c))
        {
            return true;
        }
    }
    false
}

/// Convert a valid token to its segment: the base symbol's segment combined
/// with each attached diacritic's bundle.
fn token_to_segment(token: &str, inventory: &Inventory) -> Option<Segment> {
    let base: String = token
        .chars()
        .filter(|&c| !inventory.is_diacritic(c))
        .collect();

    let mut segment = inventory.segment(&base)?.clone();
    for diacritic in inventory.diacritics_in(token) {
        segment = segment.combine(&diacritic.applies);
    }
    Some(segment)
}
