use crate::component::Component;
use crate::config::{TreeConfig, Viewport};
use crate::error::TreeError;
use crate::node::{NodeValue, TreeNode};
use crate::presentation::{NodeKey, Presentation, PresentationNode};
use crate::store::NodeStore;

#[cfg(feature = "keymap")]
use crate::keymap::TreeKeyBindings;

/// Tree widget: node store, presentation and interaction state of one tree.
///
/// Every render rebuilds the presentation from scratch. Handles ([`NodeKey`]) from
/// an earlier render stop resolving after the next one.
pub struct TreeWidget<V, A = ()> {
    pub(crate) store: NodeStore<V, A>,
    pub(crate) view: Presentation<V>,
    pub(crate) drag_source: Option<NodeKey>,
    pub(crate) viewport: Viewport,
    pub(crate) config: TreeConfig,
    #[cfg(feature = "keymap")]
    pub(crate) keymap: TreeKeyBindings,
}

/// Lookup result of [`TreeWidget::get_node`].
#[derive(Clone, Copy, Debug)]
pub struct NodeRef<'a, V, A = ()> {
    key: NodeKey,
    view: &'a PresentationNode<V>,
    data: &'a TreeNode<V, A>,
}

impl<'a, V, A> NodeRef<'a, V, A> {
    pub const fn key(&self) -> NodeKey {
        self.key
    }

    /// Presentation state (flags, label, icon).
    pub const fn view(&self) -> &'a PresentationNode<V> {
        self.view
    }

    /// Node data as stored in the tree.
    pub const fn data(&self) -> &'a TreeNode<V, A> {
        self.data
    }
}

impl<V: NodeValue, A> Default for TreeWidget<V, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: NodeValue, A> TreeWidget<V, A> {
    /// Creates an empty widget with pixel geometry.
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            store: NodeStore::new(),
            view: Presentation::default(),
            drag_source: None,
            viewport: Viewport::default(),
            config,
            #[cfg(feature = "keymap")]
            keymap: TreeKeyBindings::new(),
        }
    }

    #[cfg(feature = "keymap")]
    /// Returns a mutable reference to the key binding set.
    pub const fn keymap_mut(&mut self) -> &mut TreeKeyBindings {
        &mut self.keymap
    }

    /// Replaces the whole tree and re-renders.
    ///
    /// Duplicate explicit values are rejected and leave the current tree untouched.
    pub fn set_value(&mut self, roots: Vec<TreeNode<V, A>>) -> Result<(), TreeError> {
        self.store.replace(roots)?;
        self.render();
        Ok(())
    }

    /// Returns the current tree.
    pub fn get_value(&self) -> &[TreeNode<V, A>] {
        self.store.roots()
    }

    /// Hands the tree back to the caller and leaves the widget empty.
    pub fn take_value(&mut self) -> Vec<TreeNode<V, A>> {
        let roots = self.store.take_roots();
        self.render();
        roots
    }

    /// O(1) lookup of a node by value.
    pub fn get_node(&self, value: &V) -> Option<NodeRef<'_, V, A>> {
        let key = self.store.lookup(value)?;
        let view = self.view.get(key)?;
        let data = self.store.data(&view.path)?;
        Some(NodeRef { key, view, data })
    }

    /// Returns data of indexed nodes matching `predicate`, in index insertion order.
    ///
    /// Nodes shadowed in the index by a later node with the same value are skipped,
    /// so `find` never returns anything `get_node` cannot reach.
    pub fn find<P>(&self, mut predicate: P) -> Vec<&TreeNode<V, A>>
    where
        P: FnMut(&TreeNode<V, A>) -> bool,
    {
        self.view
            .iter()
            .filter(|(key, node)| self.store.lookup(&node.value) == Some(*key))
            .filter_map(|(_, node)| self.store.data(&node.path))
            .filter(|data| predicate(data))
            .collect()
    }

    /// Node data behind a presentation handle.
    pub fn data(&self, key: NodeKey) -> Option<&TreeNode<V, A>> {
        self.view
            .get(key)
            .and_then(|node| self.store.data(&node.path))
    }

    pub const fn presentation(&self) -> &Presentation<V> {
        &self.view
    }

    pub const fn store(&self) -> &NodeStore<V, A> {
        &self.store
    }

    pub const fn config(&self) -> TreeConfig {
        self.config
    }

    pub const fn set_config(&mut self, config: TreeConfig) {
        self.config = config;
    }

    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub const fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Handle of the node currently being dragged, if any.
    pub const fn drag_source(&self) -> Option<NodeKey> {
        self.drag_source
    }

    /// Visible rows in display order.
    pub fn visible_rows(&self) -> Vec<NodeKey> {
        self.view.visible_rows()
    }

    /// Top edge of a visible row in content coordinates.
    pub fn row_top(&self, key: NodeKey) -> Option<f32> {
        let row = self.view.visible_rows().iter().position(|k| *k == key)?;
        Some(row as f32 * self.config.row_height)
    }

    /// Maps a vertical viewport coordinate to a row and the offset inside it.
    pub fn hit_test(&self, y: f32) -> Option<(NodeKey, f32)> {
        if y < 0.0 || self.config.row_height <= 0.0 {
            return None;
        }
        let content_y = self.viewport.scroll_top + y;
        let row = (content_y / self.config.row_height).floor();
        let key = *self.view.visible_rows().get(row as usize)?;
        Some((key, content_y - row * self.config.row_height))
    }
}

impl<V: NodeValue, A> Component for TreeWidget<V, A> {
    fn render(&mut self) {
        let source = self
            .drag_source
            .and_then(|key| self.view.get(key))
            .map(|node| node.value.clone());

        self.view.project(&mut self.store);

        // Keep an in-flight drag pointing at the rebuilt source node.
        self.drag_source = source.and_then(|value| self.store.lookup(&value));
    }

    fn on_unmount(&mut self) {
        self.view.teardown(self.store.index_mut());
        self.drag_source = None;
    }
}
