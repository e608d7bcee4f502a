use log::debug;

use crate::drag::MoveRequest;
use crate::node::{NodeValue, TreeNode};

/// Structural edits over a forest of [`TreeNode`]s.
///
/// The widget only reports [`MoveRequest`]s; hosts that keep their data as plain
/// nodes can apply them with this trait and hand the result back through
/// `set_value`.
pub trait TreeEdit<V> {
    type Node;

    /// Index path of the node carrying `value`, in pre-order.
    fn path_of(&self, value: &V) -> Option<Vec<u32>>;

    /// Detaches the node carrying `value` together with its subtree.
    fn remove_node(&mut self, value: &V) -> Option<Self::Node>;

    /// Inserts `node` under `parent` (`None` for the top level) before
    /// `reference`, or at the end when `reference` is `None`.
    ///
    /// Gives the node back if the parent or the reference sibling is missing.
    fn insert_node(
        &mut self,
        parent: Option<&V>,
        reference: Option<&V>,
        node: Self::Node,
    ) -> Result<(), Self::Node>;

    /// Applies a drop. Returns `false` and leaves the tree untouched when the move
    /// is impossible: unknown nodes, a reference outside the parent, a parent inside
    /// the dragged subtree, or a node placed in front of itself.
    fn apply_move(&mut self, request: &MoveRequest<V>) -> bool;
}

impl<V: NodeValue, A> TreeEdit<V> for Vec<TreeNode<V, A>> {
    type Node = TreeNode<V, A>;

    fn path_of(&self, value: &V) -> Option<Vec<u32>> {
        let mut path = Vec::new();
        find_path(self, value, &mut path).then_some(path)
    }

    fn remove_node(&mut self, value: &V) -> Option<TreeNode<V, A>> {
        let path = self.path_of(value)?;
        let (last, parent) = path.split_last()?;
        let siblings = if parent.is_empty() {
            self
        } else {
            &mut TreeNode::at_path_mut(self, parent)?.children
        };
        Some(siblings.remove(*last as usize))
    }

    fn insert_node(
        &mut self,
        parent: Option<&V>,
        reference: Option<&V>,
        node: TreeNode<V, A>,
    ) -> Result<(), TreeNode<V, A>> {
        let siblings = match parent {
            None => self,
            Some(parent) => {
                let Some(path) = self.path_of(parent) else {
                    return Err(node);
                };
                match TreeNode::at_path_mut(self, &path) {
                    Some(parent) => &mut parent.children,
                    None => return Err(node),
                }
            }
        };
        let at = match reference {
            None => siblings.len(),
            Some(reference) => {
                match siblings
                    .iter()
                    .position(|child| child.value.as_ref() == Some(reference))
                {
                    Some(at) => at,
                    None => return Err(node),
                }
            }
        };
        siblings.insert(at, node);
        Ok(())
    }

    fn apply_move(&mut self, request: &MoveRequest<V>) -> bool {
        let dragged = &request.dragged;
        if request.reference.as_ref() == Some(dragged) {
            debug!("tree: move of {dragged:?} in front of itself ignored");
            return false;
        }

        let Some(path) = self.path_of(dragged) else {
            return false;
        };
        if let Some(parent) = &request.parent {
            let Some(source) = TreeNode::at_path(self, &path) else {
                return false;
            };
            let mut scratch = Vec::new();
            if parent == dragged || find_path(&source.children, parent, &mut scratch) {
                debug!("tree: move of {dragged:?} into its own subtree refused");
                return false;
            }
            if self.path_of(parent).is_none() {
                return false;
            }
        }
        if let Some(reference) = &request.reference {
            let siblings_ok = self.path_of(reference).is_some_and(|reference_path| {
                let parent_path = &reference_path[..reference_path.len() - 1];
                match &request.parent {
                    None => parent_path.is_empty(),
                    Some(parent) => self.path_of(parent).as_deref() == Some(parent_path),
                }
            });
            if !siblings_ok {
                return false;
            }
        }

        let Some(node) = self.remove_node(dragged) else {
            return false;
        };
        match self.insert_node(request.parent.as_ref(), request.reference.as_ref(), node) {
            Ok(()) => true,
            Err(node) => {
                // Validated above; restore the node if the tree changed shape anyway.
                if let Some((last, parent)) = path.split_last() {
                    let siblings = if parent.is_empty() {
                        Some(self)
                    } else {
                        TreeNode::at_path_mut(self, parent).map(|parent| &mut parent.children)
                    };
                    if let Some(siblings) = siblings {
                        let at = (*last as usize).min(siblings.len());
                        siblings.insert(at, node);
                    }
                }
                false
            }
        }
    }
}

fn find_path<V: PartialEq, A>(nodes: &[TreeNode<V, A>], value: &V, path: &mut Vec<u32>) -> bool {
    for (idx, node) in nodes.iter().enumerate() {
        path.push(idx as u32);
        if node.value.as_ref() == Some(value) || find_path(&node.children, value, path) {
            return true;
        }
        path.pop();
    }
    false
}
