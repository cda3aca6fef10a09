//! Leaf collection and fieldset aggregation
//!
//! Everything here is a fresh derivation over the caller's current field
//! tree: nothing is cached between calls, and a call never fails. A model
//! key with no matching accessor just contributes nothing.
//!
//! Only leaves are collected. Messages on the walk root itself describe
//! cross-field rules ("these fields, together, are wrong") and are read
//! separately through [`root_messages`].

use crate::message::{self, LiveRegionRole, Partition, Severity, ValidationMessage};
use crate::snapshot::FieldSnapshot;
use crate::strategy::{
    DisplayStrategy, SubmissionStatus, should_show_errors, should_show_warnings,
};
use crate::tree::{FieldPath, TreeNode};
use crate::walker::Walker;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// VISIBILITY RESULT
// ============================================================================

/// One leaf message tagged with its current visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibilityResult {
    /// Leaf the message was read from, relative to the walk root.
    pub path: FieldPath,
    /// The message itself.
    pub message: ValidationMessage,
    /// Whether the leaf's errors are currently shown.
    pub visible: bool,
}

impl VisibilityResult {
    /// Severity of the wrapped message.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.message.severity()
    }
}

/// Iterates the results that are currently visible.
pub fn visible_only(results: &[VisibilityResult]) -> impl Iterator<Item = &VisibilityResult> {
    results.iter().filter(|r| r.visible)
}

/// Every leaf message under `root`, in model order, tagged with
/// [`should_show_errors`] of its leaf.
///
/// # Examples
///
/// ```
/// use error_visibility::aggregate::collect_leaf_messages;
/// use error_visibility::message::ValidationMessage;
/// use error_visibility::strategy::{DisplayStrategy, SubmissionStatus};
/// use error_visibility::tree::{FieldNode, parse_path};
/// use serde_json::json;
///
/// let model = json!({"a": {"b": "", "c": "x"}});
/// let mut tree = FieldNode::mirror(&model);
/// tree.get_mut(&parse_path("a.b"))
///     .unwrap()
///     .state_mut()
///     .errors
///     .push(ValidationMessage::new("required"));
///
/// let results = collect_leaf_messages(
///     &&tree,
///     &model,
///     DisplayStrategy::OnTouch,
///     SubmissionStatus::Unsubmitted,
/// );
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].path.to_string(), "a.b");
/// assert!(!results[0].visible);
/// ```
#[must_use]
pub fn collect_leaf_messages<N: TreeNode>(
    root: &N,
    model: &Value,
    strategy: DisplayStrategy,
    submission: SubmissionStatus,
) -> Vec<VisibilityResult> {
    collect_leaf_messages_with(Walker::new(), root, model, strategy, submission)
}

pub(crate) fn collect_leaf_messages_with<N: TreeNode>(
    walker: Walker,
    root: &N,
    model: &Value,
    strategy: DisplayStrategy,
    submission: SubmissionStatus,
) -> Vec<VisibilityResult> {
    let mut results = Vec::new();
    let mut leaves = 0usize;

    walker.walk_leaves(root, model, |node, _, path| {
        leaves += 1;
        let snapshot = node.snapshot();
        let visible = should_show_errors(&snapshot, strategy, submission);
        results.extend(snapshot.errors().into_iter().map(|message| VisibilityResult {
            path: path.clone(),
            message,
            visible,
        }));
    });

    tracing::debug!(
        %strategy,
        %submission,
        leaves,
        messages = results.len(),
        visible = visible_only(&results).count(),
        "collected leaf messages"
    );
    results
}

/// Messages attached to `root` itself, split by severity.
///
/// These are the cross-field messages that
/// [`collect_leaf_messages`] leaves out.
#[must_use]
pub fn root_messages<N: TreeNode>(root: &N) -> Partition {
    root.snapshot().partitioned_errors()
}

// ============================================================================
// FLAG COMBINATION
// ============================================================================

/// Derived flag that is true iff any of `flags` is true.
///
/// The inputs are re-read on every call, so the combined flag always
/// reflects their current values. With no inputs it is always false.
///
/// # Examples
///
/// ```
/// use error_visibility::aggregate::combine_visibility;
/// use std::cell::Cell;
///
/// let email = Cell::new(false);
/// let phone = Cell::new(false);
/// let email_flag = || email.get();
/// let phone_flag = || phone.get();
/// let flags: [&dyn Fn() -> bool; 2] = [&email_flag, &phone_flag];
/// let banner = combine_visibility(flags);
///
/// assert!(!banner());
/// phone.set(true);
/// assert!(banner());
/// ```
pub fn combine_visibility<I, F>(flags: I) -> impl Fn() -> bool
where
    I: IntoIterator<Item = F>,
    F: Fn() -> bool,
{
    let flags: Vec<F> = flags.into_iter().collect();
    move || flags.iter().any(|flag| flag())
}

// ============================================================================
// FIELDSET SUMMARY
// ============================================================================

/// Group-level state folded over every leaf of a fieldset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldsetSummary {
    /// Any leaf touched.
    pub touched: bool,
    /// Any leaf dirty.
    pub dirty: bool,
    /// Any leaf invalid.
    pub invalid: bool,
    /// Any leaf with validation in flight.
    pub pending: bool,
    /// Blocking messages of all leaves, concatenated in model order.
    pub errors: Vec<ValidationMessage>,
    /// Warnings of all leaves, concatenated in model order.
    pub warnings: Vec<ValidationMessage>,
    /// Any leaf currently showing its errors; drives the group banner.
    pub show_errors: bool,
    /// Any leaf currently showing its warnings.
    pub show_warnings: bool,
}

impl FieldsetSummary {
    /// Returns true if no leaf is invalid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.invalid
    }

    /// Returns true if any leaf carries a warning.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Number of blocking messages.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Number of warnings.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Role for the group's live region, given what is currently shown.
    ///
    /// Visible blocking errors win over visible warnings.
    #[must_use]
    pub fn live_region_role(&self) -> Option<LiveRegionRole> {
        if self.show_errors && !self.errors.is_empty() {
            Some(Severity::Blocking.live_region_role())
        } else if self.show_warnings && !self.warnings.is_empty() {
            Some(Severity::Warning.live_region_role())
        } else {
            None
        }
    }
}

/// Folds every leaf under `root` into one [`FieldsetSummary`].
///
/// Flags are OR-ed. Messages are concatenated, not de-duplicated: the same
/// kind on two different leaves is two messages to render.
#[must_use]
pub fn aggregate_fieldset<N: TreeNode>(
    root: &N,
    model: &Value,
    strategy: DisplayStrategy,
    submission: SubmissionStatus,
) -> FieldsetSummary {
    aggregate_fieldset_with(Walker::new(), root, model, strategy, submission)
}

pub(crate) fn aggregate_fieldset_with<N: TreeNode>(
    walker: Walker,
    root: &N,
    model: &Value,
    strategy: DisplayStrategy,
    submission: SubmissionStatus,
) -> FieldsetSummary {
    let mut summary = FieldsetSummary::default();

    walker.walk_leaves(root, model, |node, _, _| {
        let snapshot = node.snapshot();
        summary.touched |= snapshot.touched();
        summary.dirty |= snapshot.dirty();
        summary.invalid |= snapshot.invalid();
        summary.pending |= snapshot.pending();
        summary.show_errors |= should_show_errors(&snapshot, strategy, submission);
        summary.show_warnings |= should_show_warnings(&snapshot, strategy, submission);

        let split = message::partition(&snapshot.errors());
        summary.errors.extend(split.blocking);
        summary.warnings.extend(split.warnings);
    });

    tracing::debug!(
        %strategy,
        %submission,
        invalid = summary.invalid,
        errors = summary.errors.len(),
        warnings = summary.warnings.len(),
        show_errors = summary.show_errors,
        "aggregated fieldset"
    );
    summary
}

// ============================================================================
// TESTS
// ============================================================================
