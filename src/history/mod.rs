//! history — analysis log, newest first, capped.
//!
//! Callers get a `HistoryStore` injected; the default implementation
//! (`KvHistoryStore`) keeps the whole list as one JSON array under a single
//! key of a `KvStore`.

pub mod kv;
pub mod store;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::result::AnalysisResult;

pub use kv::{FileKv, KvStore, MemoryKv};
pub use store::KvHistoryStore;

pub trait HistoryStore: Send + Sync {
    /// Insert at the front; entries beyond capacity are dropped from the back.
    fn append(&self, result: &AnalysisResult) -> Result<(), StoreError>;
    /// Matching entries, newest first. Unreadable storage reads as empty.
    fn list(&self, filter: &HistoryFilter) -> Vec<AnalysisResult>;
    fn clear(&self) -> Result<(), StoreError>;
    /// Returns whether anything was removed.
    fn remove(&self, id: &str) -> Result<bool, StoreError>;

    fn stats(&self) -> HistoryStats {
        HistoryStats::from_results(&self.list(&HistoryFilter::default()))
    }
}

/// Verdict filter for listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindFilter {
    #[default]
    All,
    Bullying,
    Safe,
}

impl KindFilter {
    pub fn matches(self, r: &AnalysisResult) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Bullying => r.is_bullying,
            KindFilter::Safe => !r.is_bullying,
        }
    }
}

impl FromStr for KindFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(KindFilter::All),
            "bullying" => Ok(KindFilter::Bullying),
            "safe" => Ok(KindFilter::Safe),
            other => Err(format!("unknown filter: {other}")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryFilter {
    /// Case-insensitive substring of the analyzed text; empty matches all.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub kind: KindFilter,
}

impl HistoryFilter {
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn kind(mut self, kind: KindFilter) -> Self {
        self.kind = kind;
        self
    }

    pub fn matches(&self, r: &AnalysisResult) -> bool {
        if let Some(term) = self.search.as_deref().filter(|t| !t.is_empty()) {
            if !r.text.to_lowercase().contains(&term.to_lowercase()) {
                return false;
            }
        }
        self.kind.matches(r)
    }
}

/// Summary counters over the stored history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    pub total: usize,
    pub bullying: usize,
    pub safe: usize,
    pub avg_confidence: f64,
}

impl HistoryStats {
    pub fn from_results(results: &[AnalysisResult]) -> Self {
        let total = results.len();
        let bullying = results.iter().filter(|r| r.is_bullying).count();
        let avg_confidence = if total > 0 {
            results.iter().map(|r| r.confidence).sum::<f64>() / total as f64
        } else {
            0.0
        };
        Self {
            total,
            bullying,
            safe: total - bullying,
            avg_confidence,
        }
    }
}
