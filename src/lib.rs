// src/lib.rs
//! Deterministic cyberbullying text scoring.
//!
//! Pipeline: tokenize → stopword filter → stem → pseudo-TF-IDF → three
//! simulated models (svm / logistic regression / naive Bayes) → majority vote.
//! Results can be logged to an injected [`history::HistoryStore`].

pub mod analyze;
pub mod config;
pub mod error;
pub mod history;
pub mod result;
pub mod telemetry;

// ---- Re-exports for stable public API ----
pub use crate::analyze::{analyze, analyze_paced, Analyzer, Stage};
pub use crate::config::{AppConfig, Lexicon};
pub use crate::error::{AnalyzeError, StoreError};
pub use crate::history::{HistoryFilter, HistoryStats, HistoryStore, KindFilter, KvHistoryStore};
pub use crate::result::{AnalysisResult, ModelVerdict, ModelVerdicts, Preprocessing};
