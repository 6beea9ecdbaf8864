//! Sentiment, readability and linguistic metrics for one article.
//!
//! Every function here is pure: the same text and the same [`Lexicon`]
//! always give bit-identical numbers. The formulas are fixed so results
//! stay comparable with previously published output tables, including the
//! heuristic syllable counter and the `1e-6` denominator guards.

use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;
use crate::tokenize::{clean_tokens, sentence_count, tokenize, words};

/// Added to sentiment denominators so empty input scores 0 instead of NaN.
pub const SENTIMENT_EPSILON: f64 = 0.000001;

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

const PERSONAL_PRONOUNS: &[&str] = &["i", "we", "my", "ours", "us"];

/// Syllables in `word` by vowel-group counting.
///
/// Each vowel (`aeiouy`) not preceded by another vowel starts a group; a
/// trailing `e` removes one group; the result is never below 1.
///
/// ```rust
/// use lexis_core::syllable_count;
///
/// assert_eq!(syllable_count("made"), 1);
/// assert_eq!(syllable_count("syllable"), 2);
/// assert_eq!(syllable_count("beautiful"), 3);
/// ```
pub fn syllable_count(word: &str) -> usize {
    let word = word.to_lowercase();
    let mut count = 0usize;
    let mut prev_was_vowel = false;

    for c in word.chars() {
        let is_vowel = VOWELS.contains(&c);
        if is_vowel && !prev_was_vowel {
            count += 1;
        }
        prev_was_vowel = is_vowel;
    }

    if word.ends_with('e') {
        count = count.saturating_sub(1);
    }

    count.max(1)
}

/// A word is complex when it has more than two syllables.
pub fn is_complex(word: &str) -> bool {
    syllable_count(word) > 2
}

/// Dictionary-based sentiment of one text.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SentimentScores {
    pub positive: usize,
    pub negative: usize,
    /// In `[-1, 1]`; 0 when no sentiment word was found.
    pub polarity: f64,
    /// In `[0, 1]`; share of sentiment words among cleaned tokens.
    pub subjectivity: f64,
}

/// Scores the stopword-free tokens of `text` against the lexicon.
pub fn sentiment_scores(text: &str, lexicon: &Lexicon) -> SentimentScores {
    let cleaned = clean_tokens(text, lexicon);

    let positive = cleaned.iter().filter(|t| lexicon.is_positive(t)).count();
    let negative = cleaned.iter().filter(|t| lexicon.is_negative(t)).count();

    let pos = positive as f64;
    let neg = negative as f64;

    SentimentScores {
        positive,
        negative,
        polarity: (pos - neg) / ((pos + neg) + SENTIMENT_EPSILON),
        subjectivity: (pos + neg) / (cleaned.len() as f64 + SENTIMENT_EPSILON),
    }
}

/// Readability and complexity figures over the original-case, stopword-inclusive words.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Readability {
    pub avg_sentence_length: f64,
    pub percentage_complex_words: f64,
    pub fog_index: f64,
    pub complex_word_count: usize,
    pub word_count: usize,
    pub syllables_per_word: f64,
    pub avg_word_length: f64,
}

/// Computes the readability figures of `text`.
///
/// Text without any sentence or without any word yields all zeros.
pub fn readability(text: &str) -> Readability {
    let words = words(text);
    let sentences = sentence_count(text);

    if sentences == 0 || words.is_empty() {
        return Readability::default();
    }

    let word_count = words.len();
    let n = word_count as f64;

    let mut complex_word_count = 0usize;
    let mut total_syllables = 0usize;
    let mut total_chars = 0usize;
    for word in &words {
        let syllables = syllable_count(word);
        if syllables > 2 {
            complex_word_count += 1;
        }
        total_syllables += syllables;
        total_chars += word.chars().count();
    }

    let avg_sentence_length = n / sentences as f64;
    let percentage_complex_words = complex_word_count as f64 / n * 100.0;

    Readability {
        avg_sentence_length,
        percentage_complex_words,
        fog_index: 0.4 * (avg_sentence_length + percentage_complex_words),
        complex_word_count,
        word_count,
        syllables_per_word: total_syllables as f64 / n,
        avg_word_length: total_chars as f64 / n,
    }
}

/// Occurrences of `i`, `we`, `my`, `ours` and `us`.
///
/// `US` the country counts too; tokens are matched literally.
pub fn personal_pronouns(text: &str) -> usize {
    tokenize(text).iter().filter(|t| PERSONAL_PRONOUNS.contains(&t.as_str())).count()
}

/// All metrics of one article, in output column order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    #[serde(rename = "POSITIVE SCORE")]
    pub positive_score: usize,
    #[serde(rename = "NEGATIVE SCORE")]
    pub negative_score: usize,
    #[serde(rename = "POLARITY SCORE")]
    pub polarity_score: f64,
    #[serde(rename = "SUBJECTIVITY SCORE")]
    pub subjectivity_score: f64,
    #[serde(rename = "AVG SENTENCE LENGTH")]
    pub avg_sentence_length: f64,
    #[serde(rename = "PERCENTAGE OF COMPLEX WORDS")]
    pub percentage_complex_words: f64,
    #[serde(rename = "FOG INDEX")]
    pub fog_index: f64,
    #[serde(rename = "AVG NUMBER OF WORDS PER SENTENCE")]
    pub avg_words_per_sentence: f64,
    #[serde(rename = "COMPLEX WORD COUNT")]
    pub complex_word_count: usize,
    #[serde(rename = "WORD COUNT")]
    pub word_count: usize,
    #[serde(rename = "SYLLABLE PER WORD")]
    pub syllable_per_word: f64,
    #[serde(rename = "PERSONAL PRONOUNS")]
    pub personal_pronouns: usize,
    #[serde(rename = "AVG WORD LENGTH")]
    pub avg_word_length: f64,
}

impl MetricRecord {
    /// Column names of the metric fields, in order.
    pub const COLUMNS: [&'static str; 13] = [
        "POSITIVE SCORE",
        "NEGATIVE SCORE",
        "POLARITY SCORE",
        "SUBJECTIVITY SCORE",
        "AVG SENTENCE LENGTH",
        "PERCENTAGE OF COMPLEX WORDS",
        "FOG INDEX",
        "AVG NUMBER OF WORDS PER SENTENCE",
        "COMPLEX WORD COUNT",
        "WORD COUNT",
        "SYLLABLE PER WORD",
        "PERSONAL PRONOUNS",
        "AVG WORD LENGTH",
    ];

    /// The record emitted when no article text could be obtained.
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    /// Field values as `f64`, aligned with [`MetricRecord::COLUMNS`].
    pub fn values(&self) -> [f64; 13] {
        [
            self.positive_score as f64,
            self.negative_score as f64,
            self.polarity_score,
            self.subjectivity_score,
            self.avg_sentence_length,
            self.percentage_complex_words,
            self.fog_index,
            self.avg_words_per_sentence,
            self.complex_word_count as f64,
            self.word_count as f64,
            self.syllable_per_word,
            self.personal_pronouns as f64,
            self.avg_word_length,
        ]
    }

    /// Field values rendered for a table cell; integer columns print without a fraction.
    pub fn cells(&self) -> [String; 13] {
        [
            self.positive_score.to_string(),
            self.negative_score.to_string(),
            self.polarity_score.to_string(),
            self.subjectivity_score.to_string(),
            self.avg_sentence_length.to_string(),
            self.percentage_complex_words.to_string(),
            self.fog_index.to_string(),
            self.avg_words_per_sentence.to_string(),
            self.complex_word_count.to_string(),
            self.word_count.to_string(),
            self.syllable_per_word.to_string(),
            self.personal_pronouns.to_string(),
            self.avg_word_length.to_string(),
        ]
    }
}

/// Computes every metric for one article's text.
///
/// Empty or whitespace-only text gives [`MetricRecord::zero`].
///
/// # Example
///
/// ```rust
/// use lexis_core::{Lexicon, analyze_article};
///
/// let lexicon = Lexicon::new(["love"], Vec::<&str>::new(), Vec::<&str>::new());
/// let record = analyze_article("I love this. We love it too!", &lexicon);
///
/// assert_eq!(record.positive_score, 2);
/// assert_eq!(record.personal_pronouns, 2);
/// ```
pub fn analyze_article(text: &str, lexicon: &Lexicon) -> MetricRecord {
    if text.trim().is_empty() {
        return MetricRecord::zero();
    }

    let sentiment = sentiment_scores(text, lexicon);
    let readability = readability(text);

    MetricRecord {
        positive_score: sentiment.positive,
        negative_score: sentiment.negative,
        polarity_score: sentiment.polarity,
        subjectivity_score: sentiment.subjectivity,
        avg_sentence_length: readability.avg_sentence_length,
        percentage_complex_words: readability.percentage_complex_words,
        fog_index: readability.fog_index,
        avg_words_per_sentence: readability.avg_sentence_length,
        complex_word_count: readability.complex_word_count,
        word_count: readability.word_count,
        syllable_per_word: readability.syllables_per_word,
        personal_pronouns: personal_pronouns(text),
        avg_word_length: readability.avg_word_length,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn love_lexicon() -> Lexicon {
        Lexicon::new(["love", "great"], ["hate", "awful"], Vec::<&str>::new())
    }

    #[rstest]
    #[case("made", 1)]
    #[case("syllable", 2)]
    #[case("the", 1)]
    #[case("rhythm", 1)]
    #[case("queue", 1)]
    #[case("beautiful", 3)]
    #[case("Readability", 5)]
    #[case("e", 1)]
    #[case("ee", 1)]
    #[case("bcd", 1)]
    #[case("", 1)]
    fn test_syllable_count(#[case] word: &str, #[case] expected: usize) {
        assert_eq!(syllable_count(word), expected);
    }

    #[test]
    fn test_syllable_count_never_below_one() {
        for word in ["", "e", "eee", "xyz", "ye", "42", "_"] {
            assert!(syllable_count(word) >= 1, "{word}");
        }
    }

    #[rstest]
    #[case("syllable", false)]
    #[case("beautiful", true)]
    #[case("made", false)]
    #[case("analysis", true)]
    #[case("simple", false)]
    fn test_is_complex(#[case] word: &str, #[case] expected: bool) {
        assert_eq!(is_complex(word), expected);
        assert_eq!(is_complex(word), syllable_count(word) > 2);
    }

    #[test]
    fn test_sentiment_scores() {
        let scores = sentiment_scores("Great food, awful service, great view.", &love_lexicon());
        assert_eq!(scores.positive, 2);
        assert_eq!(scores.negative, 1);
        assert!((scores.polarity - 1.0 / 3.0).abs() < 1e-5);
        assert!((scores.subjectivity - 3.0 / 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_sentiment_ignores_stopwords() {
        let lexicon = Lexicon::new(["good"], Vec::<&str>::new(), ["good", "the"]);
        let scores = sentiment_scores("The good, the bad", &lexicon);
        assert_eq!(scores.positive, 0);
        assert!((scores.subjectivity - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sentiment_zero_guard() {
        let scores = sentiment_scores("", &love_lexicon());
        assert_eq!(scores.polarity, 0.0);
        assert_eq!(scores.subjectivity, 0.0);
        assert!(!scores.polarity.is_nan());
    }

    #[test]
    fn test_sentiment_bounds() {
        let lexicon = love_lexicon();
        for text in ["love love love", "hate awful", "love hate", "great stuff, hate it", "nothing here"] {
            let scores = sentiment_scores(text, &lexicon);
            assert!((-1.0..=1.0).contains(&scores.polarity), "{text}");
            assert!((0.0..=1.0).contains(&scores.subjectivity), "{text}");
        }
    }

    #[test]
    fn test_readability_zero_words() {
        assert_eq!(readability(""), Readability::default());
        assert_eq!(readability("?!..."), Readability::default());
    }

    #[test]
    fn test_readability_values() {
        // 6 words, 2 sentences, "beautiful" and "analysis" are complex.
        let r = readability("A beautiful day. Analysis is fun!");
        assert_eq!(r.word_count, 6);
        assert_eq!(r.complex_word_count, 2);
        assert!((r.avg_sentence_length - 3.0).abs() < 1e-12);
        assert!((r.percentage_complex_words - 100.0 * 2.0 / 6.0).abs() < 1e-9);
        assert!((r.fog_index - 0.4 * (3.0 + 100.0 * 2.0 / 6.0)).abs() < 1e-9);
        // a=1 beautiful=3 day=1 analysis=4 is=1 fun=1
        assert!((r.syllables_per_word - 11.0 / 6.0).abs() < 1e-12);
        assert!((r.avg_word_length - 26.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_readability_keeps_stopwords() {
        let text = "The the the.";
        assert_eq!(readability(text).word_count, 3);
    }

    #[test]
    fn test_readability_combining_mark_splits_word() {
        // "cafe" + U+0301 tokenizes as cafe, is, nice.
        let r = readability("Cafe\u{301} is nice.");
        assert_eq!(r.word_count, 3);
        assert!((r.syllables_per_word - 1.0).abs() < 1e-12);
        assert!((r.avg_word_length - 10.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_readability_counts_original_case_characters() {
        // "İ" is one char, but lowercases to two.
        let r = readability("İstanbul is big.");
        assert_eq!(r.word_count, 3);
        assert!((r.avg_word_length - 13.0 / 3.0).abs() < 1e-12);
    }

    #[rstest]
    #[case("I think we should.", 2)]
    #[case("My house is ours, not theirs.", 2)]
    #[case("The US economy helps us.", 2)]
    #[case("They said nothing.", 0)]
    #[case("", 0)]
    fn test_personal_pronouns(#[case] text: &str, #[case] expected: usize) {
        assert_eq!(personal_pronouns(text), expected);
    }

    #[test]
    fn test_analyze_article_love() {
        let lexicon = Lexicon::new(["love"], Vec::<&str>::new(), Vec::<&str>::new());
        let record = analyze_article("I love this. We love it too!", &lexicon);

        assert_eq!(record.positive_score, 2);
        assert_eq!(record.negative_score, 0);
        assert!((record.polarity_score - 1.0).abs() < 1e-5);
        assert_eq!(record.personal_pronouns, 2);
        assert_eq!(record.word_count, 7);
        assert_eq!(record.avg_sentence_length, record.avg_words_per_sentence);
    }

    #[test]
    fn test_analyze_article_empty_is_zero() {
        assert!(analyze_article("", &love_lexicon()).is_zero());
        assert!(analyze_article(" \n\t ", &love_lexicon()).is_zero());
    }

    #[test]
    fn test_analyze_article_idempotent() {
        let lexicon = love_lexicon();
        let text = "We love great ideas. I hate awful, complicated bureaucracy!";
        let a = analyze_article(text, &lexicon);
        let b = analyze_article(text, &lexicon);
        assert_eq!(a.values().map(f64::to_bits), b.values().map(f64::to_bits));
    }

    #[test]
    fn test_metric_record_json_keys() {
        let json = serde_json::to_value(MetricRecord::zero()).unwrap();
        for column in MetricRecord::COLUMNS {
            assert!(json.get(column).is_some(), "{column}");
        }
    }

    #[test]
    fn test_cells_integer_columns() {
        let record = MetricRecord { word_count: 12, polarity_score: 0.5, ..Default::default() };
        let cells = record.cells();
        assert_eq!(cells[9], "12");
        assert_eq!(cells[2], "0.5");
        assert_eq!(cells[0], "0");
    }
}
