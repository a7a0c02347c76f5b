// src/config/app.rs
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};
use tracing::warn;

pub const DEFAULT_APP_CONFIG_PATH: &str = "config/app.toml";
pub const DEFAULT_HISTORY_PATH: &str = "data/history.json";
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;
pub const DEFAULT_HISTORY_KEY: &str = "analysisResults";

pub const ENV_CONFIG_PATH: &str = "CYBERBULLY_CONFIG_PATH";
pub const ENV_HISTORY_PATH: &str = "CYBERBULLY_HISTORY_PATH";
pub const ENV_HISTORY_CAP: &str = "CYBERBULLY_HISTORY_CAP";
pub const ENV_PACING: &str = "CYBERBULLY_PACING";

fn default_history_path() -> PathBuf {
    PathBuf::from(DEFAULT_HISTORY_PATH)
}
fn default_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}
fn default_key() -> String {
    DEFAULT_HISTORY_KEY.to_string()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub history: HistorySettings,
    #[serde(default)]
    pub pacing: PacingSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistorySettings {
    /// JSON file backing the key-value store.
    #[serde(default = "default_history_path")]
    pub path: PathBuf,
    /// Most-recent entries kept; older ones are dropped on append.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Key the serialized list is stored under.
    #[serde(default = "default_key")]
    pub key: String,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            path: default_history_path(),
            capacity: default_capacity(),
            key: default_key(),
        }
    }
}

/// Cosmetic stage delays in milliseconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PacingSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "PacingSettings::d_tokenize")]
    pub tokenize_ms: u64,
    #[serde(default = "PacingSettings::d_stopwords")]
    pub stopwords_ms: u64,
    #[serde(default = "PacingSettings::d_stemming")]
    pub stemming_ms: u64,
    #[serde(default = "PacingSettings::d_vectorize")]
    pub vectorize_ms: u64,
    #[serde(default = "PacingSettings::d_predict")]
    pub predict_ms: u64,
}

impl PacingSettings {
    fn d_tokenize() -> u64 {
        500
    }
    fn d_stopwords() -> u64 {
        300
    }
    fn d_stemming() -> u64 {
        400
    }
    fn d_vectorize() -> u64 {
        600
    }
    fn d_predict() -> u64 {
        800
    }

    /// All stages at zero delay.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Stage delays in pipeline order; all zero when pacing is disabled.
    pub fn durations(&self) -> [Duration; 5] {
        let ms = |v: u64| {
            if self.enabled {
                Duration::from_millis(v)
            } else {
                Duration::ZERO
            }
        };
        [
            ms(self.tokenize_ms),
            ms(self.stopwords_ms),
            ms(self.stemming_ms),
            ms(self.vectorize_ms),
            ms(self.predict_ms),
        ]
    }
}

impl Default for PacingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            tokenize_ms: Self::d_tokenize(),
            stopwords_ms: Self::d_stopwords(),
            stemming_ms: Self::d_stemming(),
            vectorize_ms: Self::d_vectorize(),
            predict_ms: Self::d_predict(),
        }
    }
}

impl AppConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading app config from {}", path.display()))?;
        let mut cfg: AppConfig = toml::from_str(&data)
            .with_context(|| format!("parsing app config {}", path.display()))?;
        cfg.sanitize();
        Ok(cfg)
    }

    /// Load using env var + fallbacks, then apply env overrides:
    /// 1) $CYBERBULLY_CONFIG_PATH (must exist)
    /// 2) config/app.toml
    /// 3) built-in defaults
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from_file(&pb)?
        } else {
            let fallback = PathBuf::from(DEFAULT_APP_CONFIG_PATH);
            if fallback.exists() {
                Self::load_from_file(&fallback)?
            } else {
                Self::default()
            }
        };
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(p) = env::var(ENV_HISTORY_PATH) {
            if !p.trim().is_empty() {
                self.history.path = PathBuf::from(p.trim());
            }
        }
        if let Some(cap) = parse_capacity_env(env::var(ENV_HISTORY_CAP).ok()) {
            self.history.capacity = cap;
        }
        if let Ok(v) = env::var(ENV_PACING) {
            if matches!(v.trim().to_ascii_lowercase().as_str(), "off" | "0" | "false") {
                self.pacing.enabled = false;
            }
        }
        self.sanitize();
    }

    fn sanitize(&mut self) {
        if self.history.capacity == 0 {
            warn!("history capacity 0 is invalid; using {DEFAULT_HISTORY_CAPACITY}");
            self.history.capacity = DEFAULT_HISTORY_CAPACITY;
        }
        if self.history.key.trim().is_empty() {
            self.history.key = default_key();
        }
    }
}

fn parse_capacity_env(raw: Option<String>) -> Option<usize> {
    let raw = raw?;
    match raw.trim().parse::<usize>() {
        Ok(v) if v > 0 => Some(v),
        _ => {
            warn!(value = %raw, "ignoring invalid {ENV_HISTORY_CAP}");
            None
        }
    }
}
