// src/telemetry.rs
//! Logging helpers. Message text is user content: never log it raw, only the
//! short hashed id produced by `anon_hash`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const ENV_DEV_LOG: &str = "CYBERBULLY_DEV_LOG";
pub const ENV_LOG_JSON: &str = "CYBERBULLY_LOG_JSON";

/// Stable short id for a message, so log lines about the same text can be
/// correlated without the text itself appearing in logs.
///
/// First 6 bytes of SHA-256 as hex; stable across runs.
pub fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// Verbose logging gate: CYBERBULLY_DEV_LOG=1 in a debug build.
pub fn dev_logging_enabled() -> bool {
    cfg!(debug_assertions) && std::env::var(ENV_DEV_LOG).ok().as_deref() == Some("1")
}

/// Install the global subscriber. Honors RUST_LOG; otherwise `info`, or
/// `cyberbully_detector=debug` when dev logging is on. CYBERBULLY_LOG_JSON=1
/// switches to JSON lines. Safe to call more than once.
pub fn init_tracing() {
    let default_directive = if dev_logging_enabled() {
        "cyberbully_detector=debug,info"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let json = std::env::var(ENV_LOG_JSON).ok().as_deref() == Some("1");
    let registry = tracing_subscriber::registry().with(filter);
    let _ = if json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer().compact()).try_init()
    };
}
