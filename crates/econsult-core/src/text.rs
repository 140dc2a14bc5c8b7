//! Text normalisation and keyword tokenisation for consultation comments.
//!
//! Comments arrive from PDF extraction and CSV cells, so they carry
//! compatibility characters (ligatures, full-width forms), zero-width
//! joiners, soft hyphens and stray control bytes. Everything downstream
//! (keyword statistics in particular) works on the normalised form.
//!
//! # Token rules
//!
//! - Words are runs of Unicode word characters and apostrophes, so
//!   Devanagari and Latin comments tokenise the same way.
//! - Purely numeric tokens are dropped, including Devanagari digits.
//! - Tokens of two characters or fewer are dropped.
//! - English and Hindi (romanised and Devanagari) stopwords are dropped.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// English stopwords, plus `coc` (code of conduct), which dominates every
/// consultation on conduct rules without saying anything about stance.
pub const STOPWORDS_EN: &[&str] = &[
    "the", "and", "is", "this", "that", "it", "as", "are", "a", "an", "of", "to", "for", "in",
    "on", "be", "with", "by", "or", "from", "at", "was", "were", "will", "would", "can",
    "should", "not", "but", "has", "have", "i", "we", "you", "they", "their", "our", "your",
    "so", "if", "too", "may", "also", "these", "those", "such", "each", "per", "all", "any",
    "more", "most", "some", "coc",
];

/// Hindi connectors, romanised and in Devanagari.
pub const STOPWORDS_HI: &[&str] = &[
    "aur", "और", "hai", "है", "ke", "का", "की", "को", "ye", "ये", "yeh", "यह", "ka", "के",
    "mein", "में", "par", "पर", "se", "से", "ho", "हो", "ya", "या", "हैं",
];

static STOPWORDS: LazyLock<HashSet<String>> = LazyLock::new(|| {
    STOPWORDS_EN
        .iter()
        .chain(STOPWORDS_HI)
        .map(|w| w.to_lowercase())
        .collect()
});

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w']+").expect("word pattern is valid"));

/// Every code point in the Unicode "Other" categories: controls, format
/// characters, private use and unassigned.
static OTHER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{C}+").expect("other-category pattern is valid"));

/// Normalise text: NFKC, then drop every character in the Unicode "Other"
/// categories (control, format, private use, unassigned), then trim
/// surrounding whitespace.
///
/// Note that line breaks and tabs are control characters and are removed
/// rather than turned into spaces.
pub fn normalize(text: &str) -> String {
    let composed: String = text.nfkc().collect();
    OTHER.replace_all(&composed, "").trim().to_string()
}

/// Normalise, lowercase and split `text` into keyword tokens.
///
/// Returns an empty vector for empty input or input made only of
/// stopwords, numbers and short words.
pub fn tokenize_and_filter(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let lowered = normalize(text).to_lowercase();
    WORD.find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| keep_token(t))
        .map(str::to_string)
        .collect()
}

/// Whether `word` is in the bilingual stopword set.
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word)
}

fn keep_token(token: &str) -> bool {
    !token.chars().all(char::is_numeric)
        && token.chars().count() > 2
        && !is_stopword(token)
}
