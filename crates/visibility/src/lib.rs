//! # error-visibility
//!
//! Decides which validation messages of a form are visible right now, which
//! of them block submission, and how they roll up into fieldset summaries.
//!
//! The crate is a pure read/derive layer over a caller-owned field tree. It
//! never mutates field state, never runs validators and keeps nothing
//! between calls.
//!
//! ## Quick Start
//!
//! ```rust
//! use error_visibility::prelude::*;
//! use serde_json::json;
//!
//! let model = json!({"a": {"b": "", "c": "x"}});
//! let mut tree = FieldNode::mirror(&model);
//! tree.get_mut(&parse_path("a.b"))
//!     .unwrap()
//!     .state_mut()
//!     .errors
//!     .push(ValidationMessage::new("required"));
//!
//! let before = collect_leaf_messages(
//!     &&tree,
//!     &model,
//!     DisplayStrategy::OnTouch,
//!     SubmissionStatus::Unsubmitted,
//! );
//! assert!(!before[0].visible);
//!
//! let after = collect_leaf_messages(
//!     &&tree,
//!     &model,
//!     DisplayStrategy::OnTouch,
//!     SubmissionStatus::Submitting,
//! );
//! assert!(after[0].visible);
//! ```
//!
//! ## Modules
//!
//! - [`message`]: messages and the `warn:` blocking/warning convention
//! - [`snapshot`]: the [`FieldSnapshot`](snapshot::FieldSnapshot) capability
//! - [`strategy`]: display strategies and the visibility resolver
//! - [`tree`] / [`walker`]: model-shaped accessor trees and their traversal
//! - [`aggregate`]: leaf collection, flag combination, fieldset summaries
//! - [`config`] / [`engine`]: serde config and the configured entry point

pub mod aggregate;
pub mod config;
pub mod engine;
pub mod error;
pub mod message;
pub mod prelude;
pub mod snapshot;
pub mod strategy;
pub mod tree;
pub mod walker;

pub use error::{ConfigError, Result};
