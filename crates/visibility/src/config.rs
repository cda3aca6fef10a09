//! Engine configuration
//!
//! ```json
//! { "strategy": "on-submit", "max_depth": 16 }
//! ```
//!
//! Every field is optional; missing fields take their defaults
//! (`on-touch`, no depth limit).

use crate::error::{ConfigError, Result};
use crate::strategy::DisplayStrategy;
use crate::walker::Walker;
use serde::{Deserialize, Serialize};

/// Environment variable holding the display strategy name.
pub const STRATEGY_ENV: &str = "ERROR_VISIBILITY_STRATEGY";

/// Environment variable holding the walker depth limit.
pub const MAX_DEPTH_ENV: &str = "ERROR_VISIBILITY_MAX_DEPTH";

/// Configuration for a [`VisibilityEngine`](crate::engine::VisibilityEngine).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityConfig {
    /// When errors become visible.
    pub strategy: DisplayStrategy,

    /// Structural depth below which the walker stops descending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl VisibilityConfig {
    /// Configuration with the given strategy and no depth limit.
    #[must_use]
    pub fn new(strategy: DisplayStrategy) -> Self {
        Self {
            strategy,
            max_depth: None,
        }
    }

    /// Sets the walker depth limit.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Parses a JSON config document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads [`STRATEGY_ENV`] and [`MAX_DEPTH_ENV`]; unset variables keep
    /// their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(strategy) = lookup(STRATEGY_ENV) {
            config.strategy = strategy.trim().parse()?;
        }

        if let Some(depth) = lookup(MAX_DEPTH_ENV) {
            let depth = depth.trim();
            config.max_depth = Some(depth.parse().map_err(|_| ConfigError::InvalidMaxDepth {
                value: depth.to_owned(),
            })?);
        }

        Ok(config)
    }

    /// Walker honouring this config's depth limit.
    #[must_use]
    pub fn walker(&self) -> Walker {
        Walker::new().max_depth(self.max_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config = VisibilityConfig::from_json("{}").unwrap();
        assert_eq!(config, VisibilityConfig::default());
        assert_eq!(config.strategy, DisplayStrategy::OnTouch);
    }

    #[test]
    fn full_document() {
        let config =
            VisibilityConfig::from_json(r#"{"strategy": "manual", "max_depth": 3}"#).unwrap();
        assert_eq!(config, VisibilityConfig::new(DisplayStrategy::Manual).with_max_depth(3));
    }

    #[test]
    fn unknown_strategy_is_a_parse_error() {
        let err = VisibilityConfig::from_json(r#"{"strategy": "on-blur"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn serializes_without_unset_depth() {
        let config = VisibilityConfig::new(DisplayStrategy::OnSubmit);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"strategy":"on-submit"}"#);
    }

    #[test]
    fn env_lookup() {
        let config = VisibilityConfig::from_lookup(lookup(&[
            (STRATEGY_ENV, " immediate "),
            (MAX_DEPTH_ENV, "8"),
        ]))
        .unwrap();
        assert_eq!(config.strategy, DisplayStrategy::Immediate);
        assert_eq!(config.max_depth, Some(8));

        assert_eq!(
            VisibilityConfig::from_lookup(lookup(&[])).unwrap(),
            VisibilityConfig::default()
        );
    }

    #[test]
    fn env_lookup_rejects_bad_values() {
        assert!(matches!(
            VisibilityConfig::from_lookup(lookup(&[(STRATEGY_ENV, "later")])),
            Err(ConfigError::UnknownStrategy { .. })
        ));
        assert!(matches!(
            VisibilityConfig::from_lookup(lookup(&[(MAX_DEPTH_ENV, "-1")])),
            Err(ConfigError::InvalidMaxDepth { value }) if value == "-1"
        ));
    }

    #[test]
    fn walker_carries_depth() {
        let config = VisibilityConfig::default().with_max_depth(2);
        assert_eq!(config.walker(), Walker::new().with_max_depth(2));
        assert_eq!(VisibilityConfig::default().walker(), Walker::new());
    }
}
