// src/analyze/tfidf.rs
//! Pseudo-TF-IDF over the fixed vocabulary.
//!
//! tf  = share of stemmed tokens that contain the term as a substring
//! idf = ln(100 / (i + 1)) for vocabulary position i (a constant, no corpus)

use crate::config::Lexicon;

const IDF_NUMERATOR: f64 = 100.0;

/// Positional pseudo-IDF weight.
#[inline]
pub fn pseudo_idf(index: usize) -> f64 {
    (IDF_NUMERATOR / (index as f64 + 1.0)).ln()
}

/// One feature per vocabulary term, in vocabulary order.
/// An empty token list yields all zeros.
pub fn vectorize(stemmed: &[String], lexicon: &Lexicon) -> Vec<f64> {
    let total = stemmed.len();
    lexicon
        .vocabulary()
        .iter()
        .enumerate()
        .map(|(i, term)| {
            if total == 0 {
                return 0.0;
            }
            let hits = stemmed.iter().filter(|t| t.contains(term.as_str())).count();
            let tf = hits as f64 / total as f64;
            tf * pseudo_idf(i)
        })
        .collect()
}
