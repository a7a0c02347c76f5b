// src/config/mod.rs
//! Configuration: the lexicon tables and application settings.

pub mod app;
pub mod lexicon;

pub use app::{AppConfig, HistorySettings, PacingSettings};
pub use lexicon::Lexicon;
