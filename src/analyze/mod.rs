// src/analyze/mod.rs
//! Analysis pipeline entry: validates input, runs preprocessing, the three
//! simulated models and the majority vote, and builds the result record.

pub mod ensemble;
pub mod pacing;
pub mod preprocess;
pub mod scoring;
pub mod tfidf;

use chrono::Utc;
use metrics::counter;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::Lexicon;
use crate::error::AnalyzeError;
use crate::result::{AnalysisResult, Preprocessing};
use crate::telemetry::anon_hash;

// Re-export convenient types.
pub use crate::analyze::pacing::{analyze_paced, Stage};
pub use crate::analyze::preprocess::{remove_stopwords, stem_tokens, stem_word, tokenize};
pub use crate::analyze::scoring::{score_all, ScoreInputs};
pub use crate::analyze::tfidf::vectorize;

/// Stateless analyzer bound to one lexicon. Cheap to clone and share across threads.
#[derive(Debug, Clone, Copy)]
pub struct Analyzer<'a> {
    lexicon: &'a Lexicon,
}

impl Default for Analyzer<'static> {
    fn default() -> Self {
        Self::new(Lexicon::builtin())
    }
}

impl<'a> Analyzer<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &'a Lexicon {
        self.lexicon
    }

    /// Tokenize → stopwords → stem → vectorize. Pure; accepts any text.
    pub fn preprocess(&self, text: &str) -> Preprocessing {
        let original_tokens = tokenize(text);
        let filtered_tokens = remove_stopwords(&original_tokens, self.lexicon);
        let stemmed_tokens = stem_tokens(&filtered_tokens);
        let tfidf_vector = vectorize(&stemmed_tokens, self.lexicon);
        Preprocessing {
            original_tokens,
            filtered_tokens,
            stemmed_tokens,
            tfidf_vector,
        }
    }

    /// Full analysis. Empty or whitespace-only text is rejected.
    pub fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalyzeError> {
        validate(text)?;

        let preprocessing = self.preprocess(text);
        let inputs = ScoreInputs::from_text(text, &preprocessing.tfidf_vector, self.lexicon);
        let models = score_all(&inputs);
        let (is_bullying, confidence) = ensemble::aggregate(&models);

        let result = AnalysisResult {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            is_bullying,
            confidence,
            models,
            preprocessing,
            timestamp: Utc::now(),
        };

        debug!(
            id = %anon_hash(text),
            negative_score = inputs.negative_score,
            tfidf_score = inputs.tfidf_score,
            "scored"
        );
        info!(
            id = %anon_hash(text),
            tokens = result.preprocessing.original_tokens.len(),
            votes = result.votes(),
            confidence = result.confidence,
            verdict = result.label(),
            "analysis complete"
        );
        counter!("cyberbully_analyses_total", "verdict" => result.label()).increment(1);

        Ok(result)
    }
}

/// Reject empty or whitespace-only input before any work happens.
pub fn validate(text: &str) -> Result<(), AnalyzeError> {
    if text.chars().all(preprocess::is_separator) {
        counter!("cyberbully_rejected_total").increment(1);
        return Err(AnalyzeError::EmptyText);
    }
    Ok(())
}

/// Convenience entry using the built-in lexicon.
pub fn analyze(text: &str) -> Result<AnalysisResult, AnalyzeError> {
    Analyzer::default().analyze(text)
}
