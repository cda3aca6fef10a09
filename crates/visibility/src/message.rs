//! Validation messages and their classification
//!
//! A [`ValidationMessage`] is the unit every field reports. Whether it blocks
//! submission or is merely advisory is encoded in its `kind`: a kind starting
//! with [`WARNING_PREFIX`] is a warning, anything else is a blocking error.
//!
//! Classification only ever looks at `kind`, so a message can be reclassified
//! at any time without re-running the validator that produced it.
//!
//! # Examples
//!
//! ```
//! use error_visibility::message::{ValidationMessage, partition};
//!
//! let messages = vec![
//!     ValidationMessage::new("required"),
//!     ValidationMessage::warning("weak"),
//! ];
//!
//! let split = partition(&messages);
//! assert_eq!(split.blocking.len(), 1);
//! assert_eq!(split.warnings[0].kind, "warn:weak");
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Reserved `kind` prefix marking a non-blocking warning.
pub const WARNING_PREFIX: &str = "warn:";

// ============================================================================
// VALIDATION MESSAGE
// ============================================================================

/// A single validation message reported by a field.
///
/// Uses `Cow<'static, str>` so static kinds such as `"required"` never
/// allocate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationMessage {
    /// Free-form identifier. `warn:`-prefixed kinds are warnings.
    pub kind: Cow<'static, str>,

    /// Optional human-readable text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Cow<'static, str>>,
}

impl ValidationMessage {
    /// Creates a message with the given kind and no text.
    ///
    /// The kind is taken verbatim; pass a `warn:`-prefixed kind or use
    /// [`ValidationMessage::warning`] for warnings.
    pub fn new(kind: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind: kind.into(),
            message: None,
        }
    }

    /// Creates a warning, adding [`WARNING_PREFIX`] unless `kind` already
    /// carries it.
    pub fn warning(kind: impl Into<Cow<'static, str>>) -> Self {
        let kind = kind.into();
        let kind = if kind.starts_with(WARNING_PREFIX) {
            kind
        } else {
            Cow::Owned(format!("{WARNING_PREFIX}{kind}"))
        };
        Self {
            kind,
            message: None,
        }
    }

    /// Attaches human-readable text.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Returns the severity derived from `kind`.
    #[must_use]
    pub fn severity(&self) -> Severity {
        if self.kind.starts_with(WARNING_PREFIX) {
            Severity::Warning
        } else {
            Severity::Blocking
        }
    }

    /// Returns true if this message blocks submission.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        is_blocking(self)
    }

    /// Returns true if this message is advisory only.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        is_warning(self)
    }

    /// Returns `kind` with the warning prefix removed, if present.
    #[must_use]
    pub fn base_kind(&self) -> &str {
        self.kind
            .strip_prefix(WARNING_PREFIX)
            .unwrap_or(&self.kind)
    }
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(text) => write!(f, "{}: {}", self.kind, text),
            None => f.write_str(&self.kind),
        }
    }
}

// ============================================================================
// SEVERITY
// ============================================================================

/// Whether a message blocks submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Must be fixed before submitting.
    Blocking,
    /// Advisory only.
    Warning,
}

impl Severity {
    /// ARIA live-region role a renderer should announce this severity with.
    #[must_use]
    pub fn live_region_role(self) -> LiveRegionRole {
        match self {
            Severity::Blocking => LiveRegionRole::Alert,
            Severity::Warning => LiveRegionRole::Status,
        }
    }
}

/// ARIA live-region role used to announce a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiveRegionRole {
    /// `role="alert"`: assertive, interrupts the user.
    Alert,
    /// `role="status"`: polite, announced when idle.
    Status,
}

impl LiveRegionRole {
    /// Attribute value as written into markup.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LiveRegionRole::Alert => "alert",
            LiveRegionRole::Status => "status",
        }
    }
}

impl fmt::Display for LiveRegionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// CLASSIFIER
// ============================================================================

/// Returns true iff `msg.kind` does not start with `warn:`.
///
/// Empty or otherwise odd kinds are blocking.
#[must_use]
pub fn is_blocking(msg: &ValidationMessage) -> bool {
    !msg.kind.starts_with(WARNING_PREFIX)
}

/// Returns true iff `msg.kind` starts with `warn:`.
#[must_use]
pub fn is_warning(msg: &ValidationMessage) -> bool {
    msg.kind.starts_with(WARNING_PREFIX)
}

/// Messages split by severity, each side in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    /// Blocking errors.
    pub blocking: Vec<ValidationMessage>,
    /// Advisory warnings.
    pub warnings: Vec<ValidationMessage>,
}

impl Partition {
    /// Returns true if neither side holds anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocking.is_empty() && self.warnings.is_empty()
    }

    /// Total number of messages on both sides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocking.len() + self.warnings.len()
    }

    /// Appends another partition, keeping order on each side.
    pub fn extend(&mut self, other: Partition) {
        self.blocking.extend(other.blocking);
        self.warnings.extend(other.warnings);
    }
}

impl FromIterator<ValidationMessage> for Partition {
    fn from_iter<I: IntoIterator<Item = ValidationMessage>>(iter: I) -> Self {
        let mut out = Partition::default();
        for msg in iter {
            if is_warning(&msg) {
                out.warnings.push(msg);
            } else {
                out.blocking.push(msg);
            }
        }
        out
    }
}

/// Stable partition of `msgs` into blocking errors and warnings.
#[must_use]
pub fn partition(msgs: &[ValidationMessage]) -> Partition {
    msgs.iter().cloned().collect()
}

/// Iterates the blocking messages of `msgs`.
pub fn blocking(msgs: &[ValidationMessage]) -> impl Iterator<Item = &ValidationMessage> {
    msgs.iter().filter(|m| is_blocking(m))
}

/// Iterates the warnings of `msgs`.
pub fn warnings(msgs: &[ValidationMessage]) -> impl Iterator<Item = &ValidationMessage> {
    msgs.iter().filter(|m| is_warning(m))
}

/// Number of blocking messages in `msgs`.
#[must_use]
pub fn count_blocking(msgs: &[ValidationMessage]) -> usize {
    blocking(msgs).count()
}

/// Number of warnings in `msgs`.
#[must_use]
pub fn count_warnings(msgs: &[ValidationMessage]) -> usize {
    warnings(msgs).count()
}

/// Returns true if any message in `msgs` is blocking.
#[must_use]
pub fn has_blocking(msgs: &[ValidationMessage]) -> bool {
    msgs.iter().any(is_blocking)
}

/// Returns true if any message in `msgs` is a warning.
#[must_use]
pub fn has_warnings(msgs: &[ValidationMessage]) -> bool {
    msgs.iter().any(is_warning)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_kind_is_blocking() {
        let msg = ValidationMessage::new("required");
        assert!(is_blocking(&msg));
        assert!(!is_warning(&msg));
        assert_eq!(msg.severity(), Severity::Blocking);
    }

    #[test]
    fn prefixed_kind_is_warning() {
        let msg = ValidationMessage::new("warn:weak-password");
        assert!(is_warning(&msg));
        assert!(!is_blocking(&msg));
        assert_eq!(msg.base_kind(), "weak-password");
    }

    #[test]
    fn empty_kind_fails_safe_to_blocking() {
        let msg = ValidationMessage::new("");
        assert!(msg.is_blocking());
    }

    #[test]
    fn prefix_is_case_sensitive() {
        assert!(ValidationMessage::new("WARN:weak").is_blocking());
        assert!(ValidationMessage::new("warn").is_blocking());
        assert!(ValidationMessage::new("warning:weak").is_blocking());
    }

    #[test]
    fn warning_constructor_is_idempotent() {
        assert_eq!(ValidationMessage::warning("weak").kind, "warn:weak");
        assert_eq!(ValidationMessage::warning("warn:weak").kind, "warn:weak");
    }

    #[test]
    fn static_kinds_do_not_allocate() {
        let msg = ValidationMessage::new("required");
        assert!(matches!(msg.kind, Cow::Borrowed(_)));
    }

    #[test]
    fn partition_keeps_order_within_each_side() {
        let msgs = vec![
            ValidationMessage::new("a"),
            ValidationMessage::warning("b"),
            ValidationMessage::new("c"),
            ValidationMessage::warning("d"),
        ];

        let split = partition(&msgs);
        let blocking: Vec<_> = split.blocking.iter().map(|m| &*m.kind).collect();
        let warnings: Vec<_> = split.warnings.iter().map(|m| &*m.kind).collect();

        assert_eq!(blocking, vec!["a", "c"]);
        assert_eq!(warnings, vec!["warn:b", "warn:d"]);
        assert_eq!(split.len(), 4);
    }

    #[test]
    fn counting_helpers() {
        let msgs = vec![
            ValidationMessage::new("required"),
            ValidationMessage::new("required"),
            ValidationMessage::warning("weak"),
        ];

        assert_eq!(count_blocking(&msgs), 2);
        assert_eq!(count_warnings(&msgs), 1);
        assert!(has_blocking(&msgs));
        assert!(has_warnings(&msgs));
        assert!(!has_warnings(&msgs[..2]));
    }

    #[test]
    fn live_region_roles() {
        assert_eq!(Severity::Blocking.live_region_role(), LiveRegionRole::Alert);
        assert_eq!(Severity::Warning.live_region_role().as_str(), "status");
    }

    #[test]
    fn display_includes_text_when_present() {
        let msg = ValidationMessage::new("required").with_message("This field is required");
        assert_eq!(msg.to_string(), "required: This field is required");
        assert_eq!(ValidationMessage::new("email").to_string(), "email");
    }

    #[test]
    fn message_json_shape() {
        let msg: ValidationMessage =
            serde_json::from_str(r#"{"kind":"warn:weak","message":"Weak"}"#).unwrap();
        assert!(msg.is_warning());
        assert_eq!(msg.message.as_deref(), Some("Weak"));

        let bare = serde_json::to_string(&ValidationMessage::new("required")).unwrap();
        assert_eq!(bare, r#"{"kind":"required"}"#);
    }
}
