// src/config.rs
//! Environment-driven configuration: HTTP bind address plus the knobs the
//! classifier collaborator consumes (artifact directory, thread count).

use std::path::PathBuf;

// --- env names & defaults ---
pub const ENV_PORT: &str = "PORT";
pub const ENV_HOST: &str = "HOST";
pub const ENV_MODEL_DIR: &str = "SENTIMENT_MODEL_DIR";
pub const ENV_NUM_THREADS: &str = "SENTIMENT_NUM_THREADS";
pub const ENV_TEST_MODE: &str = "SENTIMENT_TEST_MODE";

pub const DEFAULT_PORT: u16 = 8000;

/// Where the HTTP server binds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Read `HOST`/`PORT`. Managed platforms inject `PORT`, and there the
    /// service must accept external traffic, so the host default is
    /// `0.0.0.0` when `PORT` is set and loopback otherwise.
    pub fn from_env() -> Self {
        let port_raw = std::env::var(ENV_PORT).ok().filter(|v| !v.trim().is_empty());
        let port = port_raw
            .as_deref()
            .and_then(|v| v.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let default_host = if port_raw.is_some() {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        };
        let host = std::env::var(ENV_HOST)
            .ok()
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| default_host.to_string());

        Self { host, port }
    }
}

/// Knobs consumed by the classifier collaborator, not by the core.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Directory holding model artifacts (`sentiment_lexicon.json`); the
    /// embedded lexicon is used when unset.
    pub model_dir: Option<PathBuf>,
    /// Parallelism hint for model implementations that support it.
    pub num_threads: Option<usize>,
}

impl ClassifierConfig {
    pub fn from_env() -> Self {
        let model_dir = std::env::var(ENV_MODEL_DIR)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let num_threads = std::env::var(ENV_NUM_THREADS)
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&n| n > 0);
        Self {
            model_dir,
            num_threads,
        }
    }
}
