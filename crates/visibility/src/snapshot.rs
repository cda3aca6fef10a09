//! Field snapshot capability
//!
//! The engine never talks to a reactive form primitive directly. Callers
//! implement [`FieldSnapshot`] over whatever field representation they use
//! and the engine only reads through it.
//!
//! [`FieldState`] is a plain-data implementation for callers that already
//! hold resolved values, and for tests.

use crate::message::{self, Partition, ValidationMessage};
use serde::{Deserialize, Serialize};

// ============================================================================
// CAPABILITY TRAIT
// ============================================================================

/// Read-only view of one field's validation state.
///
/// A snapshot is recomputed by the caller on demand; the engine holds it for
/// at most one derivation.
///
/// # Examples
///
/// ```rust,ignore
/// use error_visibility::snapshot::FieldSnapshot;
/// use error_visibility::message::ValidationMessage;
///
/// struct Signal<'a>(&'a MyField);
///
/// impl FieldSnapshot for Signal<'_> {
///     type Value = String;
///
///     fn touched(&self) -> bool { self.0.touched.get() }
///     fn dirty(&self) -> bool { self.0.dirty.get() }
///     fn invalid(&self) -> bool { !self.0.errors.get().is_empty() }
///     fn pending(&self) -> bool { self.0.pending.get() }
///     fn errors(&self) -> Vec<ValidationMessage> { self.0.errors.get() }
///     fn value(&self) -> String { self.0.value.get() }
/// }
/// ```
pub trait FieldSnapshot {
    /// Type of the field's current value.
    type Value;

    /// The user has interacted with and left the field.
    fn touched(&self) -> bool;

    /// The value differs from its initial value.
    fn dirty(&self) -> bool;

    /// The field currently has at least one resolved validation message that
    /// makes it invalid.
    fn invalid(&self) -> bool;

    /// Asynchronous validation is still in flight.
    fn pending(&self) -> bool;

    /// Messages from validators that have resolved so far.
    fn errors(&self) -> Vec<ValidationMessage>;

    /// Current value.
    fn value(&self) -> Self::Value;

    /// Logical negation of [`invalid`](Self::invalid).
    fn valid(&self) -> bool {
        !self.invalid()
    }

    /// Messages of this field and everything beneath it.
    ///
    /// Hosts that track an aggregated summary override this; the default is
    /// the field's own [`errors`](Self::errors).
    fn error_summary(&self) -> Vec<ValidationMessage> {
        self.errors()
    }

    /// The field's own messages split by severity.
    fn partitioned_errors(&self) -> Partition {
        message::partition(&self.errors())
    }
}

impl<S: FieldSnapshot + ?Sized> FieldSnapshot for &S {
    type Value = S::Value;

    fn touched(&self) -> bool {
        (**self).touched()
    }

    fn dirty(&self) -> bool {
        (**self).dirty()
    }

    fn invalid(&self) -> bool {
        (**self).invalid()
    }

    fn pending(&self) -> bool {
        (**self).pending()
    }

    fn errors(&self) -> Vec<ValidationMessage> {
        (**self).errors()
    }

    fn value(&self) -> Self::Value {
        (**self).value()
    }

    fn valid(&self) -> bool {
        (**self).valid()
    }

    fn error_summary(&self) -> Vec<ValidationMessage> {
        (**self).error_summary()
    }

    fn partitioned_errors(&self) -> Partition {
        (**self).partitioned_errors()
    }
}

// ============================================================================
// PLAIN DATA SNAPSHOT
// ============================================================================

/// Owned, already-resolved field state.
///
/// Unless overridden, validity is derived from `errors`: any message
/// (warnings included) makes the field invalid, matching hosts that treat
/// every resolved message as a validation failure. Use
/// [`FieldState::with_invalid`] when the host decides validity separately.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldState {
    /// See [`FieldSnapshot::touched`].
    pub touched: bool,
    /// See [`FieldSnapshot::dirty`].
    pub dirty: bool,
    /// See [`FieldSnapshot::pending`].
    pub pending: bool,
    /// Explicit validity override; `None` derives it from `errors`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid: Option<bool>,
    /// See [`FieldSnapshot::errors`].
    pub errors: Vec<ValidationMessage>,
    /// See [`FieldSnapshot::value`].
    pub value: serde_json::Value,
}

impl FieldState {
    /// A pristine, valid field holding `value`.
    pub fn new(value: impl Into<serde_json::Value>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Marks the field touched.
    #[must_use = "builder methods must be chained or built"]
    pub fn mark_touched(mut self) -> Self {
        self.touched = true;
        self
    }

    /// Marks the field dirty.
    #[must_use = "builder methods must be chained or built"]
    pub fn mark_dirty(mut self) -> Self {
        self.dirty = true;
        self
    }

    /// Marks asynchronous validation as in flight.
    #[must_use = "builder methods must be chained or built"]
    pub fn mark_pending(mut self) -> Self {
        self.pending = true;
        self
    }

    /// Adds a resolved message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_error(mut self, error: ValidationMessage) -> Self {
        self.errors.push(error);
        self
    }

    /// Replaces the resolved messages.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_errors(mut self, errors: Vec<ValidationMessage>) -> Self {
        self.errors = errors;
        self
    }

    /// Overrides validity instead of deriving it from `errors`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_invalid(mut self, invalid: bool) -> Self {
        self.invalid = Some(invalid);
        self
    }
}

impl FieldSnapshot for FieldState {
    type Value = serde_json::Value;

    fn touched(&self) -> bool {
        self.touched
    }

    fn dirty(&self) -> bool {
        self.dirty
    }

    fn invalid(&self) -> bool {
        self.invalid.unwrap_or(!self.errors.is_empty())
    }

    fn pending(&self) -> bool {
        self.pending
    }

    fn errors(&self) -> Vec<ValidationMessage> {
        self.errors.clone()
    }

    fn value(&self) -> serde_json::Value {
        self.value.clone()
    }
}

// ============================================================================
// TESTS
// ============================================================================
