//! Positive, negative and stopword dictionaries.
//!
//! A [`Lexicon`] is built once at startup from plain text sources and is
//! immutable afterwards. Every entry is lowercased and trimmed on load, so
//! membership tests against lowercased tokens are case-insensitive.
//!
//! Two loading rules exist because the dictionary files are inconsistent:
//!
//! - the positive list is line based (one entry per line);
//! - the negative list and the stopword lists are scanned for word runs,
//!   which tolerates files like `SMITH | Surnames from 1990 census`.
//!
//! A source that cannot be read contributes nothing and is logged. Loading
//! only fails when not a single source could be read.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::tokenize::tokenize;
use crate::{LexisError, Result};

/// Currency names treated as stopwords in addition to the stopword files.
pub const CURRENCY_STOPWORDS: &[&str] = &[
    "AFGHANI", "ARIARY", "BAHT", "BALBOA", "BIRR", "BOLIVAR", "BOLIVIANO", "CEDI", "COLON", "CÓRDOBA", "DALASI",
    "DENAR", "DINAR", "DIRHAM", "DOBRA", "DONG", "DRAM", "ESCUDO", "EURO", "FLORIN", "FORINT", "GOURDE", "GUARANI",
    "GULDEN", "HRYVNIA", "KINA", "KIP", "KORUNA", "KRONA", "KRONE", "KROON", "KUNA", "KWACHA", "KWANZA", "KYAT",
    "LARI", "LATS", "LEK", "LEMPIRA", "LEONE", "LEU", "LEV", "LILANGENI", "LIRA", "LITAS", "LOTI", "MANAT", "METICAL",
    "NAIRA", "NAKFA", "SHEQEL", "NGULTRUM", "NUEVO", "SOL", "OUGUIYA", "PATACA", "PESO", "POUND", "PULA", "QUETZAL",
    "RAND", "REAL", "RENMINBI", "RIAL", "RIEL", "RINGGIT", "RIYAL", "RUBLE", "RUFIYAA", "RUPEE", "RUPIAH", "SHILLING",
    "SOM", "SOMONI", "TAKA", "TALA", "TENGE", "TUGRIK", "VATU", "WON", "YEN", "ZLOTY",
];

/// Fewer stopword categories than this is suspicious and gets a warning.
const EXPECTED_STOPWORD_SOURCES: usize = 6;

/// File locations of the dictionary sources.
#[derive(Debug, Clone, Default)]
pub struct LexiconSources {
    /// Line-based positive word list.
    pub positive: PathBuf,
    /// Negative word list.
    pub negative: PathBuf,
    /// Stopword category lists.
    pub stopwords: Vec<PathBuf>,
}

impl LexiconSources {
    /// Resolves the conventional dictionary layout under `dir`:
    ///
    /// ```text
    /// <dir>/MasterDictionary/positive-words.txt
    /// <dir>/MasterDictionary/negative-words.txt
    /// <dir>/StopWords/*.txt
    /// ```
    ///
    /// Stopword files are sorted by name so loading order is stable.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(LexisError::FileNotFound(dir.to_path_buf()));
        }

        let master = dir.join("MasterDictionary");
        let stop_dir = dir.join("StopWords");

        let mut stopwords = Vec::new();
        match fs::read_dir(&stop_dir) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    let path = entry.path();
                    if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("txt")) {
                        stopwords.push(path);
                    }
                }
            }
            Err(e) => warn!(dir = %stop_dir.display(), error = %e, "stopword directory unreadable"),
        }
        stopwords.sort();

        if stopwords.len() < EXPECTED_STOPWORD_SOURCES {
            warn!(
                found = stopwords.len(),
                expected = EXPECTED_STOPWORD_SOURCES,
                "fewer stopword categories than expected"
            );
        }

        Ok(Self {
            positive: master.join("positive-words.txt"),
            negative: master.join("negative-words.txt"),
            stopwords,
        })
    }

    /// Default dictionary directory (`<config dir>/lexis/dictionaries`).
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lexis").join("dictionaries"))
    }
}

/// The three immutable term sets used for sentiment scoring.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    positive: HashSet<String>,
    negative: HashSet<String>,
    stop: HashSet<String>,
}

impl Lexicon {
    /// Builds a lexicon from in-memory sets, normalizing every entry.
    ///
    /// Useful for synthetic dictionaries in tests. No currency stopwords are
    /// added here; see [`Lexicon::build`] for the full startup load.
    pub fn new<P, N, S>(positive: P, negative: N, stop: S) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        Self { positive: normalize_all(positive), negative: normalize_all(negative), stop: normalize_all(stop) }
    }

    /// Loads all dictionary sources plus the built-in currency stopwords.
    ///
    /// # Errors
    ///
    /// Returns [`LexisError::LexiconError`] when none of the sources could be
    /// read. Individual unreadable sources are logged and skipped.
    pub fn build(sources: &LexiconSources) -> Result<Self> {
        let mut readable = 0usize;
        let mut lexicon = Lexicon::default();

        if let Some(bytes) = read_source(&sources.positive) {
            readable += 1;
            lexicon.positive = parse_line_list(&bytes, &sources.positive);
        }

        if let Some(bytes) = read_source(&sources.negative) {
            readable += 1;
            lexicon.negative = parse_token_blob(&bytes);
        }

        for path in &sources.stopwords {
            if let Some(bytes) = read_source(path) {
                readable += 1;
                lexicon.stop.extend(parse_token_blob(&bytes));
            }
        }

        if readable == 0 {
            return Err(LexisError::LexiconError("no dictionary source could be read".to_string()));
        }

        lexicon.stop.extend(CURRENCY_STOPWORDS.iter().map(|w| w.to_lowercase()));

        info!(
            positive = lexicon.positive.len(),
            negative = lexicon.negative.len(),
            stopwords = lexicon.stop.len(),
            "lexicon loaded"
        );

        Ok(lexicon)
    }

    pub fn is_positive(&self, token: &str) -> bool {
        self.positive.contains(token)
    }

    pub fn is_negative(&self, token: &str) -> bool {
        self.negative.contains(token)
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stop.contains(token)
    }

    /// Sizes of the (positive, negative, stop) sets.
    pub fn sizes(&self) -> (usize, usize, usize) {
        (self.positive.len(), self.negative.len(), self.stop.len())
    }
}

fn normalize_all<I>(words: I) -> HashSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    words
        .into_iter()
        .map(|w| w.as_ref().trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

fn read_source(path: &Path) -> Option<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            warn!(source = %path.display(), error = %e, "dictionary source unreadable, skipping");
            None
        }
    }
}

/// One entry per line: trim, lowercase, drop blanks.
///
/// Lines that are not valid UTF-8 are skipped with a warning.
pub fn parse_line_list(bytes: &[u8], origin: &Path) -> HashSet<String> {
    let mut words = HashSet::new();
    let mut undecodable = 0usize;

    for line in bytes.split(|b| *b == b'\n') {
        match std::str::from_utf8(line) {
            Ok(line) => {
                let word = line.trim().to_lowercase();
                if !word.is_empty() {
                    words.insert(word);
                }
            }
            Err(_) => undecodable += 1,
        }
    }

    if undecodable > 0 {
        warn!(source = %origin.display(), lines = undecodable, "skipped undecodable lines");
    }

    words
}

/// Every word run in the blob, lowercased. Line layout is irrelevant.
pub fn parse_token_blob(bytes: &[u8]) -> HashSet<String> {
    let text = String::from_utf8_lossy(bytes);
    tokenize(&text).into_iter().collect()
}
