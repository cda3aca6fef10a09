//! Model-shaped field accessor trees
//!
//! A [`TreeNode`] is an accessor for one field that can be indexed by object
//! key or array index to reach child accessors. The accessor tree mirrors a
//! data model but is not required to match it exactly; see
//! [`walker`](crate::walker) for how mismatches are handled.
//!
//! [`FieldNode`] is an owned tree for callers without their own accessor
//! type, and [`FieldPath`] names a position in either.

use crate::snapshot::{FieldSnapshot, FieldState};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use smallvec::SmallVec;
use std::fmt;

// ============================================================================
// ACCESSOR TRAIT
// ============================================================================

/// Accessor for one field of a model-shaped tree.
///
/// Nodes are cheap handles (typically references or indices into the host's
/// field store), so lookups return them by value.
pub trait TreeNode: Sized {
    /// Snapshot type produced by this accessor.
    type Snapshot: FieldSnapshot;

    /// Reads the field's current state.
    fn snapshot(&self) -> Self::Snapshot;

    /// Accessor for the object member `key`, if the host has one.
    fn child(&self, key: &str) -> Option<Self>;

    /// Accessor for the array element `index`, if the host has one.
    fn element(&self, index: usize) -> Option<Self>;
}

// ============================================================================
// FIELD PATH
// ============================================================================

/// One step from a node to a child.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object member.
    Key(String),
    /// Array element.
    Index(usize),
}

/// Structural position of a node below the walk root.
///
/// Renders as `user.addresses[0].zip`; the root is the empty path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: SmallVec<[PathSegment; 4]>,
}

impl FieldPath {
    /// The root path.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path extended by `segment`.
    #[must_use]
    pub fn join(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Returns a new path extended by an object key.
    #[must_use]
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.join(PathSegment::Key(key.into()))
    }

    /// Returns a new path extended by an array index.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        self.join(PathSegment::Index(index))
    }

    /// Number of segments; the root has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Returns true for the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments from the root down.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromIterator<PathSegment> for FieldPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// OWNED TREE
// ============================================================================

/// Children of a [`FieldNode`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Children {
    /// No children.
    #[default]
    Leaf,
    /// Object members, in insertion order.
    Object(IndexMap<String, FieldNode>),
    /// Array elements.
    Array(Vec<FieldNode>),
}

/// An owned accessor tree node holding a [`FieldState`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldNode {
    state: FieldState,
    children: Children,
}

impl FieldNode {
    /// A node with no children.
    pub fn leaf(state: FieldState) -> Self {
        Self {
            state,
            children: Children::Leaf,
        }
    }

    /// An object node with the given members.
    pub fn object<K, I>(state: FieldState, members: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, FieldNode)>,
    {
        Self {
            state,
            children: Children::Object(members.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }

    /// An array node with the given elements.
    pub fn array(state: FieldState, elements: Vec<FieldNode>) -> Self {
        Self {
            state,
            children: Children::Array(elements),
        }
    }

    /// Builds a pristine tree with exactly the shape of `model`.
    ///
    /// Every node starts valid, untouched and clean, holding the model value
    /// at its position.
    pub fn mirror(model: &Value) -> Self {
        let state = FieldState::new(model.clone());
        match model {
            Value::Object(map) => Self::object(
                state,
                map.iter().map(|(key, value)| (key.clone(), Self::mirror(value))),
            ),
            Value::Array(items) => Self::array(state, items.iter().map(Self::mirror).collect()),
            _ => Self::leaf(state),
        }
    }

    /// This node's state.
    #[must_use]
    pub fn state(&self) -> &FieldState {
        &self.state
    }

    /// Mutable access to this node's state.
    pub fn state_mut(&mut self) -> &mut FieldState {
        &mut self.state
    }

    /// Replaces this node's state.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_state(mut self, state: FieldState) -> Self {
        self.state = state;
        self
    }

    /// This node's children.
    #[must_use]
    pub fn children(&self) -> &Children {
        &self.children
    }

    /// Inserts or replaces an object member, turning a childless node into
    /// an object node. Returns the previous member, if any.
    ///
    /// Array nodes have no keyed members: `node` is handed back as `Err`
    /// and the array is left untouched.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        node: FieldNode,
    ) -> Result<Option<FieldNode>, FieldNode> {
        if matches!(self.children, Children::Leaf) {
            self.children = Children::Object(IndexMap::new());
        }
        match &mut self.children {
            Children::Object(members) => Ok(members.insert(key.into(), node)),
            _ => Err(node),
        }
    }

    /// Removes an object member, keeping the order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<FieldNode> {
        match &mut self.children {
            Children::Object(members) => members.shift_remove(key),
            _ => None,
        }
    }

    /// Node at `path` below this one.
    #[must_use]
    pub fn get(&self, path: &FieldPath) -> Option<&FieldNode> {
        path.segments().iter().try_fold(self, |node, segment| {
            match (&node.children, segment) {
                (Children::Object(members), PathSegment::Key(key)) => members.get(key),
                (Children::Array(elements), PathSegment::Index(index)) => elements.get(*index),
                _ => None,
            }
        })
    }

    /// Mutable node at `path` below this one.
    pub fn get_mut(&mut self, path: &FieldPath) -> Option<&mut FieldNode> {
        let mut node = self;
        for segment in path.segments() {
            node = match (&mut node.children, segment) {
                (Children::Object(members), PathSegment::Key(key)) => members.get_mut(key)?,
                (Children::Array(elements), PathSegment::Index(index)) => {
                    elements.get_mut(*index)?
                }
                _ => return None,
            };
        }
        Some(node)
    }
}

impl<'a> TreeNode for &'a FieldNode {
    type Snapshot = &'a FieldState;

    fn snapshot(&self) -> &'a FieldState {
        let node: &'a FieldNode = *self;
        &node.state
    }

    fn child(&self, key: &str) -> Option<Self> {
        let node: &'a FieldNode = *self;
        match &node.children {
            Children::Object(members) => members.get(key),
            _ => None,
        }
    }

    fn element(&self, index: usize) -> Option<Self> {
        let node: &'a FieldNode = *self;
        match &node.children {
            Children::Array(elements) => elements.get(index),
            _ => None,
        }
    }
}

/// Builds a [`FieldPath`] from dotted keys and bracketed indices.
///
/// Segments that are not valid indices inside brackets are kept as keys.
///
/// ```
/// use error_visibility::tree::parse_path;
///
/// assert_eq!(parse_path("user.tags[1]").to_string(), "user.tags[1]");
/// assert_eq!(parse_path("").depth(), 0);
/// ```
#[must_use]
pub fn parse_path(path: &str) -> FieldPath {
    let mut segments = Vec::new();
    for part in path.split('.').filter(|p| !p.is_empty()) {
        let mut rest = part;
        if let Some(open) = rest.find('[') {
            if open > 0 {
                segments.push(PathSegment::Key(rest[..open].to_owned()));
            }
            rest = &rest[open..];
            while let Some(stripped) = rest.strip_prefix('[') {
                let Some(close) = stripped.find(']') else {
                    segments.push(PathSegment::Key(rest.to_owned()));
                    rest = "";
                    break;
                };
                let inner = &stripped[..close];
                segments.push(match inner.parse::<usize>() {
                    Ok(index) => PathSegment::Index(index),
                    Err(_) => PathSegment::Key(inner.to_owned()),
                });
                rest = &stripped[close + 1..];
            }
            if !rest.is_empty() {
                segments.push(PathSegment::Key(rest.to_owned()));
            }
        } else {
            segments.push(PathSegment::Key(rest.to_owned()));
        }
    }
    segments.into_iter().collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ValidationMessage;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn path_display() {
        let path = FieldPath::root().key("user").key("tags").index(2).key("label");
        assert_eq!(path.to_string(), "user.tags[2].label");
        assert_eq!(path.depth(), 4);
        assert_eq!(FieldPath::root().to_string(), "");
        assert_eq!(FieldPath::root().index(0).to_string(), "[0]");
    }

    #[test]
    fn path_serializes_as_string() {
        let path = FieldPath::root().key("a").index(1);
        assert_eq!(serde_json::to_value(&path).unwrap(), json!("a[1]"));
    }

    #[test]
    fn parse_path_handles_keys_and_indices() {
        let path = parse_path("a.b[0][1].c");
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("a".into()),
                PathSegment::Key("b".into()),
                PathSegment::Index(0),
                PathSegment::Index(1),
                PathSegment::Key("c".into()),
            ]
        );
        assert_eq!(parse_path("[3]").segments(), &[PathSegment::Index(3)]);
    }

    #[test]
    fn mirror_follows_model_shape() {
        let model = json!({"a": {"b": "", "c": "x"}, "list": [1, 2]});
        let tree = FieldNode::mirror(&model);

        let root = &tree;
        let a = root.child("a").unwrap();
        assert_eq!(a.child("c").unwrap().snapshot().value(), json!("x"));
        assert_eq!(root.child("list").unwrap().element(1).unwrap().state().value, json!(2));
        assert!(root.child("missing").is_none());
        assert!(root.element(0).is_none());
    }

    #[test]
    fn get_mut_reaches_nested_nodes() {
        let mut tree = FieldNode::mirror(&json!({"a": [{"b": 1}]}));
        let path = parse_path("a[0].b");

        tree.get_mut(&path)
            .unwrap()
            .state_mut()
            .errors
            .push(ValidationMessage::new("min"));

        assert_eq!(tree.get(&path).unwrap().state().errors.len(), 1);
        assert!(tree.get(&parse_path("a[1]")).is_none());
        assert!(tree.get(&parse_path("a.b")).is_none());
    }

    #[test]
    fn insert_and_remove_members() {
        let mut node = FieldNode::leaf(FieldState::default());
        assert_eq!(node.insert("x", FieldNode::default()), Ok(None));
        assert_eq!(node.insert("y", FieldNode::default()), Ok(None));
        assert_eq!(
            node.insert("y", FieldNode::leaf(FieldState::new(1))),
            Ok(Some(FieldNode::default()))
        );
        assert!(node.remove("x").is_some());

        match node.children() {
            Children::Object(members) => {
                assert_eq!(members.keys().collect::<Vec<_>>(), vec!["y"]);
            }
            other => panic!("expected object children, got {other:?}"),
        }

        let mut list = FieldNode::array(FieldState::default(), vec![FieldNode::default()]);
        let rejected = FieldNode::leaf(FieldState::new("k"));
        assert_eq!(list.insert("k", rejected.clone()), Err(rejected));
        assert!(matches!(list.children(), Children::Array(elements) if elements.len() == 1));
    }
}
