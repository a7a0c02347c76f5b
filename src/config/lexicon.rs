// src/config/lexicon.rs
//! Constant tables used by the scoring pipeline: stopwords, the ordered
//! vocabulary and the bullying keyword list.
//!
//! The built-in lexicon is embedded from `config/lexicon.toml` and parsed once.
//! Custom lexicons can be loaded from disk; they go through the same validation.

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

static BUILTIN: Lazy<Lexicon> = Lazy::new(|| {
    let raw = include_str!("../../config/lexicon.toml");
    Lexicon::from_toml_str(raw).expect("valid built-in lexicon")
});

#[derive(Debug, Deserialize)]
struct LexiconFile {
    stopwords: Vec<String>,
    vocabulary: Vec<String>,
    keywords: Vec<String>,
}

/// Immutable lookup tables for one pipeline configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexicon {
    stopwords: HashSet<String>,
    vocabulary: Vec<String>,
    keywords: Vec<String>,
}

impl Lexicon {
    /// The lexicon shipped with the crate (10-term vocabulary, 12 keywords).
    pub fn builtin() -> &'static Lexicon {
        &BUILTIN
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading lexicon from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing lexicon {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let file: LexiconFile = toml::from_str(s)?;
        Self::new(file.stopwords, file.vocabulary, file.keywords)
    }

    /// Build and validate a lexicon.
    ///
    /// Entries are trimmed and must be lowercase and non-empty. The vocabulary
    /// keeps its order and may not repeat a term; every vocabulary term must
    /// also be a keyword.
    pub fn new(stopwords: Vec<String>, vocabulary: Vec<String>, keywords: Vec<String>) -> Result<Self> {
        let stopwords = clean("stopwords", stopwords)?;
        let vocabulary = clean("vocabulary", vocabulary)?;
        let keywords = clean("keywords", keywords)?;

        if vocabulary.is_empty() {
            bail!("vocabulary must not be empty");
        }
        let mut seen = HashSet::new();
        for term in &vocabulary {
            if !seen.insert(term.as_str()) {
                bail!("duplicate vocabulary term: {term}");
            }
            if !keywords.contains(term) {
                bail!("vocabulary term '{term}' is missing from keywords");
            }
        }

        Ok(Self {
            stopwords: stopwords.into_iter().collect(),
            vocabulary,
            keywords,
        })
    }

    #[inline]
    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }

    /// Ordered vocabulary; index `i` drives the pseudo-IDF weight.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

fn clean(field: &str, items: Vec<String>) -> Result<Vec<String>> {
    let mut out = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim();
        if t.is_empty() {
            bail!("{field}: empty entry");
        }
        if t.chars().any(char::is_uppercase) {
            bail!("{field}: entry '{t}' must be lowercase");
        }
        out.push(t.to_string());
    }
    Ok(out)
}
