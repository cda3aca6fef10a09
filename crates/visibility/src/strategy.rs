//! Error display strategies
//!
//! Decides, per field, whether its errors should currently be shown. The
//! decision is a small table over three inputs:
//!
//! | strategy    | shows when the field is invalid and ...          |
//! |-------------|--------------------------------------------------|
//! | `immediate` | always                                           |
//! | `on-touch`  | the field is touched, or a submit was attempted  |
//! | `on-submit` | a submit was attempted                           |
//! | `manual`    | never (the caller decides)                       |
//!
//! A submission attempt counts as an implicit touch of every field.

use crate::error::ConfigError;
use crate::message;
use crate::snapshot::FieldSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// DISPLAY STRATEGY
// ============================================================================

/// When validation errors become visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayStrategy {
    /// Visible as soon as the field is invalid.
    Immediate,
    /// Visible once the field is touched or a submit was attempted.
    #[default]
    OnTouch,
    /// Visible only after a submit was attempted.
    OnSubmit,
    /// Never decided by the engine.
    Manual,
}

impl DisplayStrategy {
    /// Every strategy, in declaration order.
    pub const ALL: [DisplayStrategy; 4] = [
        DisplayStrategy::Immediate,
        DisplayStrategy::OnTouch,
        DisplayStrategy::OnSubmit,
        DisplayStrategy::Manual,
    ];

    /// Kebab-case name, as used in config.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayStrategy::Immediate => "immediate",
            DisplayStrategy::OnTouch => "on-touch",
            DisplayStrategy::OnSubmit => "on-submit",
            DisplayStrategy::Manual => "manual",
        }
    }
}

impl fmt::Display for DisplayStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| ConfigError::unknown_strategy(s))
    }
}

// ============================================================================
// SUBMISSION STATUS
// ============================================================================

/// Form-wide submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubmissionStatus {
    /// No submit attempted yet.
    #[default]
    Unsubmitted,
    /// A submit is in progress.
    Submitting,
    /// A submit has completed (successfully or not).
    Submitted,
}

impl SubmissionStatus {
    /// Returns true once any submit has been attempted.
    #[must_use]
    pub fn is_attempted(self) -> bool {
        self != SubmissionStatus::Unsubmitted
    }

    /// Lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionStatus::Unsubmitted => "unsubmitted",
            SubmissionStatus::Submitting => "submitting",
            SubmissionStatus::Submitted => "submitted",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionStatus {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unsubmitted" => Ok(SubmissionStatus::Unsubmitted),
            "submitting" => Ok(SubmissionStatus::Submitting),
            "submitted" => Ok(SubmissionStatus::Submitted),
            other => Err(ConfigError::unknown_submission_status(other)),
        }
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Whether `field`'s errors should currently be shown.
///
/// Rules are checked in order and the first match wins: a valid field never
/// shows, `Manual` never shows, `Immediate` always shows, `OnTouch` shows
/// when touched or after a submit attempt, `OnSubmit` only after a submit
/// attempt. `pending()` is not consulted.
///
/// # Examples
///
/// ```
/// use error_visibility::message::ValidationMessage;
/// use error_visibility::snapshot::FieldState;
/// use error_visibility::strategy::{should_show_errors, DisplayStrategy, SubmissionStatus};
///
/// let field = FieldState::new("").with_error(ValidationMessage::new("required"));
///
/// assert!(!should_show_errors(&field, DisplayStrategy::OnTouch, SubmissionStatus::Unsubmitted));
/// assert!(should_show_errors(&field, DisplayStrategy::OnTouch, SubmissionStatus::Submitting));
/// ```
#[must_use]
pub fn should_show_errors<F>(
    field: &F,
    strategy: DisplayStrategy,
    submission: SubmissionStatus,
) -> bool
where
    F: FieldSnapshot + ?Sized,
{
    if !field.invalid() {
        return false;
    }
    timing_allows(field, strategy, submission)
}

/// Whether `field`'s warnings should currently be shown.
///
/// Same timing as [`should_show_errors`], but gated on the field carrying at
/// least one warning instead of on `invalid()`, since warnings alone need
/// not make a field invalid.
#[must_use]
pub fn should_show_warnings<F>(
    field: &F,
    strategy: DisplayStrategy,
    submission: SubmissionStatus,
) -> bool
where
    F: FieldSnapshot + ?Sized,
{
    if !message::has_warnings(&field.errors()) {
        return false;
    }
    timing_allows(field, strategy, submission)
}

fn timing_allows<F>(field: &F, strategy: DisplayStrategy, submission: SubmissionStatus) -> bool
where
    F: FieldSnapshot + ?Sized,
{
    match strategy {
        DisplayStrategy::Manual => false,
        DisplayStrategy::Immediate => true,
        DisplayStrategy::OnTouch => field.touched() || submission.is_attempted(),
        DisplayStrategy::OnSubmit => submission.is_attempted(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ValidationMessage;
    use crate::snapshot::FieldState;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use DisplayStrategy::{Immediate, Manual, OnSubmit, OnTouch};
    use SubmissionStatus::{Submitted, Submitting, Unsubmitted};

    fn invalid(touched: bool) -> FieldState {
        let state = FieldState::new("").with_error(ValidationMessage::new("required"));
        if touched { state.mark_touched() } else { state }
    }

    #[rstest]
    #[case(Immediate, false, Unsubmitted, true)]
    #[case(Immediate, true, Submitted, true)]
    #[case(OnTouch, false, Unsubmitted, false)]
    #[case(OnTouch, true, Unsubmitted, true)]
    #[case(OnTouch, false, Submitting, true)]
    #[case(OnTouch, false, Submitted, true)]
    #[case(OnSubmit, true, Unsubmitted, false)]
    #[case(OnSubmit, false, Submitting, true)]
    #[case(OnSubmit, true, Submitted, true)]
    #[case(Manual, true, Unsubmitted, false)]
    #[case(Manual, true, Submitted, false)]
    fn invalid_field_table(
        #[case] strategy: DisplayStrategy,
        #[case] touched: bool,
        #[case] submission: SubmissionStatus,
        #[case] expected: bool,
    ) {
        assert_eq!(
            should_show_errors(&invalid(touched), strategy, submission),
            expected
        );
    }

    #[test]
    fn valid_field_never_shows() {
        let field = FieldState::new("ok").mark_touched();
        for strategy in DisplayStrategy::ALL {
            assert!(!should_show_errors(&field, strategy, Submitted));
        }
    }

    #[test]
    fn pending_is_not_special_cased() {
        let field = invalid(true).mark_pending();
        assert!(should_show_errors(&field, OnTouch, Unsubmitted));

        let resolved_clean = FieldState::new("x").mark_pending();
        assert!(!should_show_errors(&resolved_clean, Immediate, Unsubmitted));
    }

    #[test]
    fn warnings_follow_the_same_timing() {
        let field = FieldState::new("abc")
            .with_error(ValidationMessage::warning("weak"))
            .with_invalid(false);

        assert!(!should_show_errors(&field, Immediate, Unsubmitted));
        assert!(should_show_warnings(&field, Immediate, Unsubmitted));
        assert!(!should_show_warnings(&field, OnSubmit, Unsubmitted));
        assert!(should_show_warnings(&field, OnSubmit, Submitted));
        assert!(!should_show_warnings(&invalid(true), Immediate, Submitted));
    }

    #[test]
    fn strategy_names_round_trip() {
        for strategy in DisplayStrategy::ALL {
            assert_eq!(strategy.as_str().parse::<DisplayStrategy>().unwrap(), strategy);
        }
        assert_eq!(
            serde_json::to_string(&OnSubmit).unwrap(),
            "\"on-submit\""
        );
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!(matches!(
            "on-blur".parse::<DisplayStrategy>(),
            Err(ConfigError::UnknownStrategy { value }) if value == "on-blur"
        ));
        assert!(matches!(
            "done".parse::<SubmissionStatus>(),
            Err(ConfigError::UnknownSubmissionStatus { .. })
        ));
    }

    #[test]
    fn defaults() {
        assert_eq!(DisplayStrategy::default(), OnTouch);
        assert_eq!(SubmissionStatus::default(), Unsubmitted);
        assert!(!Unsubmitted.is_attempted());
        assert!(Submitting.is_attempted());
    }
}
