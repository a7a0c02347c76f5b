// src/analyze/ensemble.rs
//! Majority vote over the three model verdicts.

use crate::result::ModelVerdicts;

/// Votes needed out of three.
const MAJORITY: usize = 2;

/// `(is_bullying, confidence)`: bullying when at least two models agree;
/// confidence is the plain mean of all three, agreeing or not.
pub fn aggregate(models: &ModelVerdicts) -> (bool, f64) {
    let votes = models.iter().filter(|v| v.prediction).count();
    let sum: f64 = models.iter().map(|v| v.confidence).sum();
    (votes >= MAJORITY, sum / 3.0)
}
