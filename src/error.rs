use thiserror::Error;

/// Input validation failures. The pipeline itself never fails on non-empty text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error("please enter some text to analyze")]
    EmptyText,
}

/// History persistence failures surfaced on writes.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("key-value store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("history serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("key-value store lock poisoned")]
    Poisoned,
}
