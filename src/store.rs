use rustc_hash::{FxBuildHasher, FxHashMap};
use smallvec::SmallVec;

use crate::error::TreeError;
use crate::node::{NodeValue, TreeNode};
use crate::presentation::NodeKey;

/// Canonical node hierarchy plus the indices derived from it.
///
/// The tree is owned by value. Presentation entries refer back to it by index
/// path, so relayout never needs to touch node data.
pub struct NodeStore<V, A = ()> {
    roots: Vec<TreeNode<V, A>>,
    // Survives full re-renders so reloading the same data keeps its expansion.
    expansion_memory: FxHashMap<V, bool>,
    // Rebuilt on every render; points at the live presentation entry.
    index: FxHashMap<V, NodeKey>,
    selected: Option<V>,
}

impl<V: NodeValue, A> Default for NodeStore<V, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: NodeValue, A> NodeStore<V, A> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a store with preallocated index capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            roots: Vec::new(),
            expansion_memory: FxHashMap::with_capacity_and_hasher(capacity, FxBuildHasher),
            index: FxHashMap::with_capacity_and_hasher(capacity, FxBuildHasher),
            selected: None,
        }
    }

    /// Replaces the whole tree. The previous tree stays in place on error.
    pub fn replace(&mut self, roots: Vec<TreeNode<V, A>>) -> Result<(), TreeError> {
        ensure_unique_values(&roots)?;
        self.roots = roots;
        Ok(())
    }

    /// Returns the top-level nodes.
    pub fn roots(&self) -> &[TreeNode<V, A>] {
        &self.roots
    }

    /// Gives the tree back to the caller, leaving the store empty.
    pub fn take_roots(&mut self) -> Vec<TreeNode<V, A>> {
        std::mem::take(&mut self.roots)
    }

    pub(crate) fn data(&self, path: &[u32]) -> Option<&TreeNode<V, A>> {
        TreeNode::at_path(&self.roots, path)
    }

    pub(crate) fn data_mut(&mut self, path: &[u32]) -> Option<&mut TreeNode<V, A>> {
        TreeNode::at_path_mut(&mut self.roots, path)
    }

    /// Looks up the presentation handle currently registered for a value.
    #[inline]
    pub fn lookup(&self, value: &V) -> Option<NodeKey> {
        self.index.get(value).copied()
    }

    /// Number of values currently registered in the index.
    pub fn indexed_len(&self) -> usize {
        self.index.len()
    }

    /// Returns the remembered expansion flag for a value.
    pub fn remembered_expansion(&self, value: &V) -> Option<bool> {
        self.expansion_memory.get(value).copied()
    }

    /// Drops all remembered expansion flags.
    pub fn forget_expansion(&mut self) {
        self.expansion_memory.clear();
    }

    pub(crate) fn remember_expansion(&mut self, value: V, expanded: bool) {
        self.expansion_memory.insert(value, expanded);
    }

    /// Returns the selected value, if any.
    pub const fn selected_value(&self) -> Option<&V> {
        self.selected.as_ref()
    }

    pub(crate) fn set_selected(&mut self, value: Option<V>) {
        self.selected = value;
    }

    /// Splits the store into the parts the projector writes during a render.
    pub(crate) fn projection_parts(&mut self) -> ProjectionParts<'_, V, A> {
        ProjectionParts {
            roots: &mut self.roots,
            memory: &mut self.expansion_memory,
            index: &mut self.index,
            selected: self.selected.as_ref(),
        }
    }

    pub(crate) const fn index_mut(&mut self) -> &mut FxHashMap<V, NodeKey> {
        &mut self.index
    }
}

pub(crate) struct ProjectionParts<'a, V, A> {
    pub(crate) roots: &'a mut Vec<TreeNode<V, A>>,
    pub(crate) memory: &'a mut FxHashMap<V, bool>,
    pub(crate) index: &'a mut FxHashMap<V, NodeKey>,
    pub(crate) selected: Option<&'a V>,
}

fn ensure_unique_values<V: NodeValue, A>(roots: &[TreeNode<V, A>]) -> Result<(), TreeError> {
    let mut seen: FxHashMap<&V, SmallVec<[u32; 8]>> = FxHashMap::default();
    let mut stack: Vec<(&TreeNode<V, A>, SmallVec<[u32; 8]>)> = roots
        .iter()
        .enumerate()
        .rev()
        .map(|(idx, node)| (node, SmallVec::from_elem(idx as u32, 1)))
        .collect();

    while let Some((node, path)) = stack.pop() {
        for (idx, child) in node.children.iter().enumerate().rev() {
            let mut child_path = path.clone();
            child_path.push(idx as u32);
            stack.push((child, child_path));
        }
        // Nodes without a value fall back to the default identifier and are not checked.
        let Some(value) = node.value.as_ref() else {
            continue;
        };
        if let Some(first) = seen.get(value) {
            return Err(TreeError::DuplicateValue {
                value: format!("{value:?}"),
                first: first.to_vec(),
                second: path.to_vec(),
            });
        }
        seen.insert(value, path);
    }
    Ok(())
}
