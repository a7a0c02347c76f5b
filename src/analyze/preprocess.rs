// src/analyze/preprocess.rs
//! Text preprocessing: whitespace tokenizer, stopword filter and a naive
//! suffix-stripping stemmer.

use crate::config::Lexicon;

/// Whitespace as the dashboard's `/\s+/` sees it: Unicode White_Space minus
/// NEL (U+0085), plus the byte-order mark (U+FEFF).
#[inline]
pub(crate) fn is_separator(c: char) -> bool {
    c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{0085}')
}

/// Lowercase, split on whitespace runs, drop empty fragments.
/// Punctuation stays attached to its word ("much," is one token).
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(is_separator)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Drop tokens that exactly match a stopword. Order is preserved.
pub fn remove_stopwords(tokens: &[String], lexicon: &Lexicon) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| !lexicon.is_stopword(t))
        .cloned()
        .collect()
}

/// Strip one suffix; first matching rule wins: "ing", then "ed", then "s" on
/// tokens longer than three UTF-16 code units. No dictionary, so "this"
/// becomes "thi".
pub fn stem_word(token: &str) -> String {
    if let Some(base) = token.strip_suffix("ing") {
        return base.to_string();
    }
    if let Some(base) = token.strip_suffix("ed") {
        return base.to_string();
    }
    if token.encode_utf16().count() > 3 {
        if let Some(base) = token.strip_suffix('s') {
            return base.to_string();
        }
    }
    token.to_string()
}

pub fn stem_tokens(tokens: &[String]) -> Vec<String> {
    tokens.iter().map(|t| stem_word(t)).collect()
}
