use crate::node::TreeNode;
use crate::pointer::PointerEvent;

/// Callbacks the widget invokes on its host. Every method is optional.
///
/// Callbacks receive shared borrows of node data and cannot reach the widget;
/// follow-up mutations go through the [`TreeEvent`](crate::TreeEvent) returned by
/// [`TreeWidget::dispatch`](crate::TreeWidget::dispatch).
pub trait TreeHost<V, A = ()> {
    /// Called after a click has selected `node`.
    fn on_click(&mut self, node: &TreeNode<V, A>, event: &PointerEvent) {
        let _ = (node, event);
    }

    /// Called on double-click; selection is left unchanged.
    fn on_double_click(&mut self, node: &TreeNode<V, A>, event: &PointerEvent) {
        let _ = (node, event);
    }

    /// Called on drop with the requested relocation.
    ///
    /// `parent` is the new parent (`None` for top level) or the drop target for
    /// "into" drops. `reference` is the node to insert before (`None` appends).
    fn on_move(
        &mut self,
        dragged: &TreeNode<V, A>,
        parent: Option<&TreeNode<V, A>>,
        reference: Option<&TreeNode<V, A>>,
    ) {
        let _ = (dragged, parent, reference);
    }
}

/// Host without callbacks.
impl<V, A> TreeHost<V, A> for () {}

type NodeCallback<'a, V, A> = Box<dyn FnMut(&TreeNode<V, A>, &PointerEvent) + 'a>;
type MoveCallback<'a, V, A> =
    Box<dyn FnMut(&TreeNode<V, A>, Option<&TreeNode<V, A>>, Option<&TreeNode<V, A>>) + 'a>;

/// Host built from optional closures.
pub struct TreeCallbacks<'a, V, A = ()> {
    on_click: Option<NodeCallback<'a, V, A>>,
    on_double_click: Option<NodeCallback<'a, V, A>>,
    on_move: Option<MoveCallback<'a, V, A>>,
}

impl<V, A> Default for TreeCallbacks<'_, V, A> {
    fn default() -> Self {
        Self {
            on_click: None,
            on_double_click: None,
            on_move: None,
        }
    }
}

impl<'a, V, A> TreeCallbacks<'a, V, A> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_click(mut self, f: impl FnMut(&TreeNode<V, A>, &PointerEvent) + 'a) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_double_click(
        mut self,
        f: impl FnMut(&TreeNode<V, A>, &PointerEvent) + 'a,
    ) -> Self {
        self.on_double_click = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_move(
        mut self,
        f: impl FnMut(&TreeNode<V, A>, Option<&TreeNode<V, A>>, Option<&TreeNode<V, A>>) + 'a,
    ) -> Self {
        self.on_move = Some(Box::new(f));
        self
    }
}

impl<V, A> TreeHost<V, A> for TreeCallbacks<'_, V, A> {
    fn on_click(&mut self, node: &TreeNode<V, A>, event: &PointerEvent) {
        if let Some(f) = self.on_click.as_mut() {
            f(node, event);
        }
    }

    fn on_double_click(&mut self, node: &TreeNode<V, A>, event: &PointerEvent) {
        if let Some(f) = self.on_double_click.as_mut() {
            f(node, event);
        }
    }

    fn on_move(
        &mut self,
        dragged: &TreeNode<V, A>,
        parent: Option<&TreeNode<V, A>>,
        reference: Option<&TreeNode<V, A>>,
    ) {
        if let Some(f) = self.on_move.as_mut() {
            f(dragged, parent, reference);
        }
    }
}
