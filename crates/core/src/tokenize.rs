//! Word and sentence segmentation.
//!
//! Words are maximal runs of word characters: any letter, any numeric
//! character (including `²` and `½`) and underscore. Combining marks and
//! joiners split words. [`tokenize`] case-folds to lowercase first;
//! [`words`] keeps the original case. Sentences are the non-empty segments between
//! runs of `.`, `!` and `?`.
//!
//! Sentiment scoring works on [`clean_tokens`] (stopwords removed) while the
//! readability metrics work on the original-case [`words`]. Keep them
//! apart.

use std::sync::LazyLock;

use regex::Regex;

use crate::lexicon::Lexicon;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\p{L}\p{N}_]+").unwrap());

static SENTENCE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());

/// Lowercased word tokens in text order.
///
/// # Example
///
/// ```rust
/// use lexis_core::tokenize;
///
/// assert_eq!(tokenize("Don't PANIC, it's 42!"), vec!["don", "t", "panic", "it", "s", "42"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD.find_iter(&lowered).map(|m| m.as_str().to_string()).collect()
}

/// Word tokens in text order, case preserved.
pub fn words(text: &str) -> Vec<&str> {
    WORD.find_iter(text).map(|m| m.as_str()).collect()
}

/// Lowercased word tokens with every stopword removed.
pub fn clean_tokens(text: &str, lexicon: &Lexicon) -> Vec<String> {
    tokenize(text).into_iter().filter(|t| !lexicon.is_stopword(t)).collect()
}

/// Number of non-empty sentences in `text`.
///
/// ```rust
/// use lexis_core::sentence_count;
///
/// assert_eq!(sentence_count("One. Two!! Three?"), 3);
/// assert_eq!(sentence_count("...   !?"), 0);
/// ```
pub fn sentence_count(text: &str) -> usize {
    SENTENCE_BREAK.split(text).filter(|s| !s.trim().is_empty()).count()
}
