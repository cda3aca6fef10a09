//! Model-driven traversal of accessor trees
//!
//! The walker follows the *model*, not the accessor tree: for every member
//! of an object model and every element of an array model it looks up the
//! matching accessor, hands both to the visitor and recurses. A model key
//! with no accessor is skipped, which is what happens while a host's field
//! tree lags behind a model update.
//!
//! Object members are visited in JavaScript `Object.keys` order: keys that
//! are canonical array indices first, ascending by numeric value, then every
//! other key in insertion order (models are built with `preserve_order`).
//! Array elements are visited by index.
//! Owned JSON values cannot form reference cycles; [`Walker::with_max_depth`]
//! bounds descent structurally for very deep models.

use crate::tree::{FieldPath, TreeNode};
use serde_json::{Map, Value};

/// Returns true if `model` is neither an object nor an array.
#[must_use]
pub fn is_leaf(model: &Value) -> bool {
    !matches!(model, Value::Object(_) | Value::Array(_))
}

/// Returns the numeric value of `key` if it is a canonical array index:
/// decimal digits without a leading zero (except `"0"` itself), below
/// `u32::MAX`.
#[must_use]
pub fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse::<u32>().ok().filter(|&index| index != u32::MAX)
}

/// Object members in `Object.keys` order.
///
/// ```
/// use error_visibility::walker::ordered_members;
/// use serde_json::json;
///
/// let model = json!({"b": 1, "10": 2, "2": 3, "a": 4});
/// let keys: Vec<_> = ordered_members(model.as_object().unwrap())
///     .into_iter()
///     .map(|(key, _)| key)
///     .collect();
/// assert_eq!(keys, vec!["2", "10", "b", "a"]);
/// ```
#[must_use]
pub fn ordered_members(members: &Map<String, Value>) -> Vec<(&str, &Value)> {
    let mut indexed: Vec<(u32, &str, &Value)> = Vec::new();
    let mut named: Vec<(&str, &Value)> = Vec::with_capacity(members.len());
    for (key, value) in members {
        match array_index(key) {
            Some(index) => indexed.push((index, key.as_str(), value)),
            None => named.push((key.as_str(), value)),
        }
    }
    indexed.sort_unstable_by_key(|&(index, _, _)| index);

    let mut ordered: Vec<(&str, &Value)> = indexed
        .into_iter()
        .map(|(_, key, value)| (key, value))
        .collect();
    ordered.append(&mut named);
    ordered
}

/// Tree walker with an optional depth limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Walker {
    max_depth: Option<usize>,
}

impl Walker {
    /// A walker with no depth limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops descending once a node's path reaches `max_depth` segments.
    ///
    /// Nodes at exactly `max_depth` are still visited; their children are
    /// not.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Sets or clears the depth limit.
    #[must_use]
    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Visits every descendant of `node` that has both a model value and an
    /// accessor, parent before children. `node` itself is not visited.
    pub fn walk<N, F>(&self, node: &N, model: &Value, mut visitor: F)
    where
        N: TreeNode,
        F: FnMut(&N, &Value, &FieldPath),
    {
        self.descend(node, model, &FieldPath::root(), &mut visitor);
    }

    /// Like [`walk`](Self::walk), but only calls `visitor` for nodes whose
    /// model value is a leaf.
    pub fn walk_leaves<N, F>(&self, node: &N, model: &Value, mut visitor: F)
    where
        N: TreeNode,
        F: FnMut(&N, &Value, &FieldPath),
    {
        self.walk(node, model, |child, child_model, path| {
            if is_leaf(child_model) {
                visitor(child, child_model, path);
            }
        });
    }

    fn descend<N, F>(&self, node: &N, model: &Value, path: &FieldPath, visitor: &mut F)
    where
        N: TreeNode,
        F: FnMut(&N, &Value, &FieldPath),
    {
        if self.max_depth.is_some_and(|max| path.depth() >= max) {
            tracing::trace!(path = %path, "max depth reached, not descending");
            return;
        }

        match model {
            Value::Object(members) => {
                for (key, child_model) in ordered_members(members) {
                    let child_path = path.key(key);
                    match node.child(key) {
                        Some(child) => self.enter(&child, child_model, &child_path, visitor),
                        None => {
                            tracing::trace!(
                                path = %child_path,
                                "no accessor for model key, skipping"
                            );
                        }
                    }
                }
            }
            Value::Array(elements) => {
                for (index, child_model) in elements.iter().enumerate() {
                    let child_path = path.index(index);
                    match node.element(index) {
                        Some(child) => self.enter(&child, child_model, &child_path, visitor),
                        None => {
                            tracing::trace!(
                                path = %child_path,
                                "no accessor for array element, skipping"
                            );
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn enter<N, F>(&self, child: &N, child_model: &Value, child_path: &FieldPath, visitor: &mut F)
    where
        N: TreeNode,
        F: FnMut(&N, &Value, &FieldPath),
    {
        visitor(child, child_model, child_path);
        self.descend(child, child_model, child_path, visitor);
    }
}

/// Visits every descendant of `node` that has both a model value and an
/// accessor, in model order. Leaf models are not re-entered.
///
/// # Examples
///
/// ```
/// use error_visibility::tree::FieldNode;
/// use error_visibility::walker::walk;
/// use serde_json::json;
///
/// let model = json!({"a": {"b": 1}, "c": [true]});
/// let tree = FieldNode::mirror(&model);
///
/// let mut seen = Vec::new();
/// walk(&&tree, &model, |_node, value| seen.push(value.clone()));
///
/// assert_eq!(seen, vec![json!({"b": 1}), json!(1), json!([true]), json!(true)]);
/// ```
pub fn walk<N, F>(node: &N, model: &Value, mut visitor: F)
where
    N: TreeNode,
    F: FnMut(&N, &Value),
{
    Walker::new().walk(node, model, |child, child_model, _| visitor(child, child_model));
}

/// [`walk`] with each node's [`FieldPath`] below `node`.
pub fn walk_with_path<N, F>(node: &N, model: &Value, visitor: F)
where
    N: TreeNode,
    F: FnMut(&N, &Value, &FieldPath),
{
    Walker::new().walk(node, model, visitor);
}

// ============================================================================
// TESTS
// ============================================================================
