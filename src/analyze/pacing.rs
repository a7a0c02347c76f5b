// src/analyze/pacing.rs
//! Paced analysis for interactive front-ends: walks through the processing
//! stages with a configurable delay each and reports progress, then runs the
//! pure pipeline. Dropping the future abandons the wait; the computation itself
//! is never interrupted.

use std::fmt;

use tracing::debug;

use super::Analyzer;
use crate::config::PacingSettings;
use crate::error::AnalyzeError;
use crate::result::AnalysisResult;

/// Presentation stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Tokenization,
    StopwordRemoval,
    Stemming,
    Vectorization,
    Prediction,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Tokenization,
        Stage::StopwordRemoval,
        Stage::Stemming,
        Stage::Vectorization,
        Stage::Prediction,
    ];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Tokenization => "Tokenization",
            Stage::StopwordRemoval => "Stop word removal",
            Stage::Stemming => "Stemming",
            Stage::Vectorization => "TF-IDF Vectorization",
            Stage::Prediction => "Model predictions",
        };
        f.write_str(s)
    }
}

/// Validate, wait out each stage (reporting `(stage, percent)` after it), analyze.
///
/// Blank text fails immediately, before any delay or progress callback.
pub async fn analyze_paced<F>(
    analyzer: &Analyzer<'_>,
    text: &str,
    pacing: &PacingSettings,
    mut on_progress: F,
) -> Result<AnalysisResult, AnalyzeError>
where
    F: FnMut(Stage, u8),
{
    super::validate(text)?;

    let step = (100 / Stage::ALL.len()) as u8;
    let mut progress: u8 = 0;
    for (stage, delay) in Stage::ALL.into_iter().zip(pacing.durations()) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        progress = progress.saturating_add(step).min(100);
        debug!(%stage, progress, "stage done");
        on_progress(stage, progress);
    }

    analyzer.analyze(text)
}
