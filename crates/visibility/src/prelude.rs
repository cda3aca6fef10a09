//! Common imports.
//!
//! ```rust
//! use error_visibility::prelude::*;
//! ```

pub use crate::aggregate::{
    FieldsetSummary, VisibilityResult, aggregate_fieldset, collect_leaf_messages,
    combine_visibility, root_messages, visible_only,
};
pub use crate::config::VisibilityConfig;
pub use crate::engine::VisibilityEngine;
pub use crate::error::ConfigError;
pub use crate::message::{
    LiveRegionRole, Partition, Severity, ValidationMessage, is_blocking, is_warning, partition,
};
pub use crate::snapshot::{FieldSnapshot, FieldState};
pub use crate::strategy::{
    DisplayStrategy, SubmissionStatus, should_show_errors, should_show_warnings,
};
pub use crate::tree::{FieldNode, FieldPath, PathSegment, TreeNode, parse_path};
pub use crate::walker::{Walker, walk, walk_with_path};
