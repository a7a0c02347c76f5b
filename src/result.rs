//! result.rs — output records of the scoring pipeline.
//!
//! Field names serialize in camelCase so stored history stays readable by the
//! dashboard that consumes it (`isBullying`, `logisticRegression`, `tfidfVector`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Verdict of a single simulated model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelVerdict {
    pub prediction: bool,
    pub confidence: f64,
}

impl ModelVerdict {
    pub fn new(prediction: bool, confidence: f64) -> Self {
        Self {
            prediction,
            confidence,
        }
    }
}

/// The three per-model verdicts, always computed from the same inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelVerdicts {
    pub svm: ModelVerdict,
    pub logistic_regression: ModelVerdict,
    pub naive_bayes: ModelVerdict,
}

impl ModelVerdicts {
    pub fn iter(&self) -> impl Iterator<Item = &ModelVerdict> {
        [&self.svm, &self.logistic_regression, &self.naive_bayes].into_iter()
    }
}

/// Intermediate token streams and the feature vector, kept for explainability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preprocessing {
    pub original_tokens: Vec<String>,
    pub filtered_tokens: Vec<String>,
    pub stemmed_tokens: Vec<String>,
    pub tfidf_vector: Vec<f64>,
}

/// One complete analysis. Immutable once built; history stores these as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub id: String,
    pub text: String,
    pub is_bullying: bool,
    /// Unweighted mean of the three model confidences.
    pub confidence: f64,
    pub models: ModelVerdicts,
    pub preprocessing: Preprocessing,
    pub timestamp: DateTime<Utc>,
}

impl AnalysisResult {
    /// Number of models that predicted bullying (0..=3).
    pub fn votes(&self) -> usize {
        self.models.iter().filter(|v| v.prediction).count()
    }

    pub fn label(&self) -> &'static str {
        if self.is_bullying {
            "bullying"
        } else {
            "safe"
        }
    }
}
