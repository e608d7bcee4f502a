use std::fmt::Debug;
use std::hash::Hash;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier contract for tree node values.
///
/// Values are expected to be unique across the whole tree. `Default` provides the
/// fallback identifier used for nodes that arrive without a value.
pub trait NodeValue: Clone + Eq + Hash + Default + Debug {}

impl<T> NodeValue for T where T: Clone + Eq + Hash + Default + Debug {}

/// One entry of the caller-supplied hierarchy.
///
/// The tree is a proper tree (owned children), so cycles cannot be expressed.
/// With the `serde` feature enabled, this type derives `Serialize`/`Deserialize`
/// and every field is optional on input.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        default,
        bound(
            serialize = "V: Serialize, A: Serialize",
            deserialize = "V: Deserialize<'de>, A: Deserialize<'de> + Default"
        )
    )
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeNode<V, A = ()> {
    /// Unique identifier; `None` is a caller error reported at render time.
    pub value: Option<V>,
    /// Display label.
    pub text: String,
    /// Ordered children; empty means the node is a leaf.
    pub children: Vec<TreeNode<V, A>>,
    /// Expansion flag, written back by every render.
    pub expanded: bool,
    /// Whether the node can be used as a drag source.
    pub draggable: bool,
    /// Extra attributes carried through untouched.
    pub attrs: A,
}

impl<V, A: Default> Default for TreeNode<V, A> {
    fn default() -> Self {
        Self {
            value: None,
            text: String::new(),
            children: Vec::new(),
            expanded: false,
            draggable: false,
            attrs: A::default(),
        }
    }
}

impl<V, A: Default> TreeNode<V, A> {
    /// Creates a collapsed, non-draggable leaf.
    pub fn new(value: V, text: impl Into<String>) -> Self {
        Self {
            value: Some(value),
            text: text.into(),
            ..Self::default()
        }
    }
}

impl<V, A> TreeNode<V, A> {
    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self
    }

    #[must_use]
    pub const fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    #[must_use]
    pub const fn with_draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    #[must_use]
    pub fn with_attrs(mut self, attrs: A) -> Self {
        self.attrs = attrs;
        self
    }

    /// Returns `true` if the node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Follows an index path from a list of roots.
    pub(crate) fn at_path<'a>(roots: &'a [Self], path: &[u32]) -> Option<&'a Self> {
        let (first, rest) = path.split_first()?;
        let mut node = roots.get(*first as usize)?;
        for idx in rest {
            node = node.children.get(*idx as usize)?;
        }
        Some(node)
    }

    pub(crate) fn at_path_mut<'a>(roots: &'a mut [Self], path: &[u32]) -> Option<&'a mut Self> {
        let (first, rest) = path.split_first()?;
        let mut node = roots.get_mut(*first as usize)?;
        for idx in rest {
            node = node.children.get_mut(*idx as usize)?;
        }
        Some(node)
    }
}
