use crate::drag::MoveRequest;

/// Keyboard-level actions that a user or application can apply to the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeAction {
    /// Select the previous visible row.
    SelectPrev,
    /// Select the next visible row.
    SelectNext,
    /// Select the parent of the selected node.
    SelectParent,
    /// Select the first visible row.
    SelectFirst,
    /// Select the last visible row.
    SelectLast,
    /// Expand the selected node.
    Expand,
    /// Collapse the selected node.
    Collapse,
    /// Toggle expansion of the selected node.
    Toggle,
    /// Expand every node in the tree.
    ExpandAll,
    /// Collapse every node in the tree.
    CollapseAll,
}

/// Result of dispatching a pointer event or action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeEvent<V> {
    /// The event was handled internally and state was updated.
    Handled,
    /// The event was ignored (unknown target, missing binding, nothing to do).
    Unhandled,
    /// A drop requested a relocation; the caller applies it and re-renders.
    Move(MoveRequest<V>),
}

impl<V> TreeEvent<V> {
    pub const fn is_handled(&self) -> bool {
        !matches!(self, Self::Unhandled)
    }
}
