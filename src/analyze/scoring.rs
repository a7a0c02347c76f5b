//! Simulated classifiers.
//!
//! `ScoreInputs` are the two signals every model sees:
//! - `negative_score` : how many bullying keywords occur in the raw text
//! - `tfidf_score`    : sum of the pseudo-TF-IDF features
//!
//! svm      = (neg*0.4 + tfidf*0.6) / 5,          bullying if > 0.3,  confidence min(raw, 1)
//! logistic = sigmoid(neg*0.5 + tfidf*0.5 - 1),   bullying if > 0.5,  confidence raw
//! bayes    = (neg + tfidf) / 10,                 bullying if > 0.25, confidence min(raw, 1)

use crate::config::Lexicon;
use crate::result::{ModelVerdict, ModelVerdicts};

pub const SVM_THRESHOLD: f64 = 0.3;
pub const LOGISTIC_THRESHOLD: f64 = 0.5;
pub const NAIVE_BAYES_THRESHOLD: f64 = 0.25;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScoreInputs {
    pub negative_score: u32,
    pub tfidf_score: f64,
}

impl ScoreInputs {
    /// Keyword hits are counted on the raw text, not on the processed tokens.
    pub fn from_text(text: &str, tfidf: &[f64], lexicon: &Lexicon) -> Self {
        Self {
            negative_score: negative_score(text, lexicon),
            tfidf_score: tfidf.iter().sum(),
        }
    }
}

/// Number of distinct keywords found anywhere in the lowercased text.
pub fn negative_score(text: &str, lexicon: &Lexicon) -> u32 {
    let lower = text.to_lowercase();
    lexicon
        .keywords()
        .iter()
        .filter(|k| lower.contains(k.as_str()))
        .count() as u32
}

pub fn svm(inputs: &ScoreInputs) -> ModelVerdict {
    let raw = (f64::from(inputs.negative_score) * 0.4 + inputs.tfidf_score * 0.6) / 5.0;
    ModelVerdict::new(raw > SVM_THRESHOLD, raw.min(1.0))
}

/// Sigmoid output is already bounded, so confidence is left unclamped.
pub fn logistic_regression(inputs: &ScoreInputs) -> ModelVerdict {
    let z = f64::from(inputs.negative_score) * 0.5 + inputs.tfidf_score * 0.5 - 1.0;
    let raw = 1.0 / (1.0 + (-z).exp());
    ModelVerdict::new(raw > LOGISTIC_THRESHOLD, raw)
}

pub fn naive_bayes(inputs: &ScoreInputs) -> ModelVerdict {
    let raw = (f64::from(inputs.negative_score) + inputs.tfidf_score) / 10.0;
    ModelVerdict::new(raw > NAIVE_BAYES_THRESHOLD, raw.min(1.0))
}

/// Run all three models against the same inputs.
pub fn score_all(inputs: &ScoreInputs) -> ModelVerdicts {
    ModelVerdicts {
        svm: svm(inputs),
        logistic_regression: logistic_regression(inputs),
        naive_bayes: naive_bayes(inputs),
    }
}
