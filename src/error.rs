use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Faults surfaced by an external metadata / episode source.
///
/// The engine never propagates these: a failed lookup is logged and
/// treated as "no data" for that item.
#[derive(Debug, Clone, Error, PartialEq, Serialize, Deserialize)]
pub enum SourceError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("lookup timed out")]
    Timeout,

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Invalid engine configuration. Raised at construction time only.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("min_df must be at least 1, got {0}")]
    MinDf(usize),

    #[error("max_df must be in (0, 1], got {0}")]
    MaxDf(f64),

    #[error("top_k must be at least 1")]
    TopK,

    #[error("tier thresholds must satisfy 0 <= medium <= high, got high={high} medium={medium}")]
    Tiers { high: f64, medium: f64 },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
