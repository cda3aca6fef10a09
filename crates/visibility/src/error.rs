//! Error type for the configuration surface
//!
//! Every derivation in this crate is infallible. The only place a caller can
//! hand in something the engine cannot use is configuration: strategy and
//! submission names, or a JSON config document.

/// Configuration error.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A display strategy name that is not one of `immediate`, `on-touch`,
    /// `on-submit` or `manual`.
    #[error("unknown display strategy '{value}'")]
    UnknownStrategy {
        /// The rejected input.
        value: String,
    },

    /// A submission status name that is not one of `unsubmitted`,
    /// `submitting` or `submitted`.
    #[error("unknown submission status '{value}'")]
    UnknownSubmissionStatus {
        /// The rejected input.
        value: String,
    },

    /// A depth limit that is not a non-negative integer.
    #[error("invalid max depth '{value}'")]
    InvalidMaxDepth {
        /// The rejected input.
        value: String,
    },

    /// The config document is not valid JSON for
    /// [`VisibilityConfig`](crate::config::VisibilityConfig).
    #[error("invalid visibility config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates an [`UnknownStrategy`](Self::UnknownStrategy) error.
    pub fn unknown_strategy(value: impl Into<String>) -> Self {
        Self::UnknownStrategy {
            value: value.into(),
        }
    }

    /// Creates an [`UnknownSubmissionStatus`](Self::UnknownSubmissionStatus) error.
    pub fn unknown_submission_status(value: impl Into<String>) -> Self {
        Self::UnknownSubmissionStatus {
            value: value.into(),
        }
    }
}

/// Result alias for the configuration surface.
pub type Result<T> = std::result::Result<T, ConfigError>;
