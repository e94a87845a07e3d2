//! Engine configuration.
//!
//! All structs deserialize from JSON and fall back to defaults for missing
//! fields. Call `validate` (or use the `from_json` constructors, which do)
//! before handing a config to the engine.
//!
//! ```json
//! {
//!   "vectorizer": { "min_df": 1, "max_df": 0.95 },
//!   "top_k": 10,
//!   "dataset_limit": 500,
//!   "query_episodes": true,
//!   "tiers": { "high": 0.10, "medium": 0.08 }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// TF-IDF fitting parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    /// tokens found in fewer documents are dropped
    pub min_df: usize,
    /// tokens found in a larger fraction of documents are dropped
    pub max_df: f64,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            min_df: 1,
            max_df: 0.95,
        }
    }
}

impl VectorizerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_df < 1 {
            return Err(ConfigError::MinDf(self.min_df));
        }
        if !(self.max_df > 0.0 && self.max_df <= 1.0) {
            return Err(ConfigError::MaxDf(self.max_df));
        }
        Ok(())
    }
}

/// Presentation tiers for similarity scores.
/// Display only, never used for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    pub high: f64,
    pub medium: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            high: 0.10,
            medium: 0.08,
        }
    }
}

impl TierThresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.medium >= 0.0 && self.medium <= self.high) {
            return Err(ConfigError::Tiers {
                high: self.high,
                medium: self.medium,
            });
        }
        Ok(())
    }
}

/// Recommendation workflow parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendConfig {
    pub vectorizer: VectorizerConfig,
    /// number of recommendations kept
    pub top_k: usize,
    /// use only the first N usable dataset records, `None` for all
    pub dataset_limit: Option<usize>,
    /// assemble the query document with episode summaries
    pub query_episodes: bool,
    pub tiers: TierThresholds,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            vectorizer: VectorizerConfig::default(),
            top_k: 10,
            dataset_limit: Some(500),
            query_episodes: true,
            tiers: TierThresholds::default(),
        }
    }
}

impl RecommendConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: RecommendConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.vectorizer.validate()?;
        if self.top_k == 0 {
            return Err(ConfigError::TopK);
        }
        self.tiers.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = RecommendConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.vectorizer.min_df, 1);
        assert_eq!(config.vectorizer.max_df, 0.95);
        assert_eq!(config.top_k, 10);
        assert_eq!(config.tiers.high, 0.10);
        assert_eq!(config.tiers.medium, 0.08);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = RecommendConfig::from_json(r#"{"top_k": 3, "vectorizer": {"min_df": 2}}"#).unwrap();
        assert_eq!(config.top_k, 3);
        assert_eq!(config.vectorizer.min_df, 2);
        assert_eq!(config.vectorizer.max_df, 0.95);
        assert_eq!(config.dataset_limit, Some(500));
    }

    #[test]
    fn null_limit_means_whole_dataset() {
        let config = RecommendConfig::from_json(r#"{"dataset_limit": null}"#).unwrap();
        assert_eq!(config.dataset_limit, None);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            RecommendConfig::from_json(r#"{"vectorizer": {"min_df": 0}}"#),
            Err(ConfigError::MinDf(0))
        ));
        assert!(matches!(
            RecommendConfig::from_json(r#"{"vectorizer": {"max_df": 0.0}}"#),
            Err(ConfigError::MaxDf(_))
        ));
        assert!(matches!(
            RecommendConfig::from_json(r#"{"vectorizer": {"max_df": 1.5}}"#),
            Err(ConfigError::MaxDf(_))
        ));
        assert!(matches!(RecommendConfig::from_json(r#"{"top_k": 0}"#), Err(ConfigError::TopK)));
        assert!(matches!(
            RecommendConfig::from_json(r#"{"tiers": {"high": 0.05, "medium": 0.08}}"#),
            Err(ConfigError::Tiers { .. })
        ));
        assert!(matches!(RecommendConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn max_df_of_one_is_allowed() {
        let config = VectorizerConfig { min_df: 1, max_df: 1.0 };
        assert!(config.validate().is_ok());
    }
}
