//! Configured entry point
//!
//! [`VisibilityEngine`] binds a [`VisibilityConfig`] so call sites only pass
//! the field tree and the current submission status. It holds no state
//! besides the config and is `Copy`.

use crate::aggregate::{self, FieldsetSummary, VisibilityResult};
use crate::config::VisibilityConfig;
use crate::message::Partition;
use crate::snapshot::FieldSnapshot;
use crate::strategy::{self, DisplayStrategy, SubmissionStatus};
use crate::tree::TreeNode;
use crate::walker::Walker;
use serde_json::Value;

/// The engine's operations with strategy and depth limit pre-applied.
///
/// # Examples
///
/// ```
/// use error_visibility::prelude::*;
/// use serde_json::json;
///
/// let engine = VisibilityEngine::with_strategy(DisplayStrategy::OnSubmit);
///
/// let model = json!({"email": ""});
/// let mut tree = FieldNode::mirror(&model);
/// tree.get_mut(&parse_path("email"))
///     .unwrap()
///     .state_mut()
///     .errors
///     .push(ValidationMessage::new("required"));
///
/// let summary = engine.aggregate_fieldset(&&tree, &model, SubmissionStatus::Submitted);
/// assert!(summary.show_errors);
/// assert_eq!(summary.error_count(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibilityEngine {
    config: VisibilityConfig,
}

impl VisibilityEngine {
    /// Engine for `config`.
    #[must_use]
    pub fn new(config: VisibilityConfig) -> Self {
        Self { config }
    }

    /// Engine for `strategy` with no depth limit.
    #[must_use]
    pub fn with_strategy(strategy: DisplayStrategy) -> Self {
        Self::new(VisibilityConfig::new(strategy))
    }

    /// The bound configuration.
    #[must_use]
    pub fn config(&self) -> &VisibilityConfig {
        &self.config
    }

    /// The bound strategy.
    #[must_use]
    pub fn strategy(&self) -> DisplayStrategy {
        self.config.strategy
    }

    /// Walker honouring the configured depth limit.
    #[must_use]
    pub fn walker(&self) -> Walker {
        self.config.walker()
    }

    /// See [`strategy::should_show_errors`].
    #[must_use]
    pub fn should_show_errors<F>(&self, field: &F, submission: SubmissionStatus) -> bool
    where
        F: FieldSnapshot + ?Sized,
    {
        strategy::should_show_errors(field, self.config.strategy, submission)
    }

    /// See [`strategy::should_show_warnings`].
    #[must_use]
    pub fn should_show_warnings<F>(&self, field: &F, submission: SubmissionStatus) -> bool
    where
        F: FieldSnapshot + ?Sized,
    {
        strategy::should_show_warnings(field, self.config.strategy, submission)
    }

    /// See [`aggregate::collect_leaf_messages`].
    #[must_use]
    pub fn collect_leaf_messages<N: TreeNode>(
        &self,
        root: &N,
        model: &Value,
        submission: SubmissionStatus,
    ) -> Vec<VisibilityResult> {
        aggregate::collect_leaf_messages_with(
            self.walker(),
            root,
            model,
            self.config.strategy,
            submission,
        )
    }

    /// See [`aggregate::aggregate_fieldset`].
    #[must_use]
    pub fn aggregate_fieldset<N: TreeNode>(
        &self,
        root: &N,
        model: &Value,
        submission: SubmissionStatus,
    ) -> FieldsetSummary {
        aggregate::aggregate_fieldset_with(
            self.walker(),
            root,
            model,
            self.config.strategy,
            submission,
        )
    }

    /// See [`aggregate::root_messages`].
    #[must_use]
    pub fn root_messages<N: TreeNode>(&self, root: &N) -> Partition {
        aggregate::root_messages(root)
    }
}

impl From<VisibilityConfig> for VisibilityEngine {
    fn from(config: VisibilityConfig) -> Self {
        Self::new(config)
    }
}
