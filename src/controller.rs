use smallvec::SmallVec;

use crate::action::{TreeAction, TreeEvent};
use crate::drag::{DropZone, MoveRequest};
use crate::host::TreeHost;
use crate::node::{NodeValue, TreeNode};
use crate::pointer::{DRAG_PAYLOAD_DATA, DRAG_PAYLOAD_FORMAT, PointerEvent, PointerKind};
use crate::presentation::{DisclosureIcon, NodeKey};
use crate::tree::TreeWidget;

#[cfg(feature = "keymap")]
use crossterm::event::KeyEvent;

impl<V: NodeValue, A> TreeWidget<V, A> {
    /// Expands a node. No-op for unknown values, leaves and expanded nodes.
    pub fn expand(&mut self, value: &V) -> bool {
        self.store
            .lookup(value)
            .is_some_and(|key| self.set_expanded(key, true))
    }

    /// Collapses a node. No-op for unknown values, leaves and collapsed nodes.
    pub fn collapse(&mut self, value: &V) -> bool {
        self.store
            .lookup(value)
            .is_some_and(|key| self.set_expanded(key, false))
    }

    /// Flips expansion of a non-leaf node.
    pub fn toggle(&mut self, value: &V) -> bool {
        self.store
            .lookup(value)
            .is_some_and(|key| self.toggle_key(key))
    }

    /// Selects a node, reveals it and scrolls it into view.
    ///
    /// A different previous selection is unselected first; collapsed ancestors are
    /// expanded. Returns `false` for unknown values.
    pub fn select(&mut self, value: &V) -> bool {
        let Some(key) = self.store.lookup(value) else {
            return false;
        };
        if let Some(previous) = self.store.selected_value().cloned()
            && previous != *value
        {
            self.unselect(&previous);
        }

        self.store.set_selected(Some(value.clone()));
        if let Some(node) = self.view.get_mut(key) {
            node.selected = true;
        }

        let ancestors: SmallVec<[NodeKey; 8]> = self.view.ancestors(key).collect();
        for ancestor in ancestors {
            self.set_expanded(ancestor, true);
        }
        self.scroll_to(key);
        true
    }

    /// Clears the selection mark of a node. Ancestors stay expanded.
    ///
    /// The stored selection is only cleared when it equals `value`; unselecting some
    /// other node leaves the current selection in place.
    pub fn unselect(&mut self, value: &V) -> bool {
        let Some(key) = self.store.lookup(value) else {
            return false;
        };
        if self.store.selected_value() == Some(value) {
            self.store.set_selected(None);
        }
        if let Some(node) = self.view.get_mut(key) {
            node.selected = false;
        }
        true
    }

    /// Data of the selected node, if it is part of the current tree.
    pub fn get_selected(&self) -> Option<&TreeNode<V, A>> {
        let key = self.selected_key()?;
        self.data(key)
    }

    /// Handle of the selected node in the current presentation.
    pub fn selected_key(&self) -> Option<NodeKey> {
        self.store
            .selected_value()
            .and_then(|value| self.store.lookup(value))
    }

    /// Scrolls the viewport the minimum amount needed to show `key`.
    pub fn scroll_to(&mut self, key: NodeKey) -> bool {
        let Some(top) = self.row_top(key) else {
            return false;
        };
        let bottom = top + self.config.row_height;
        self.viewport
            .scroll_into_view(top, bottom, self.config.scroll_padding)
    }

    /// Expands every non-leaf node.
    pub fn expand_all(&mut self) {
        self.set_all_expanded(true);
    }

    /// Collapses every non-leaf node.
    pub fn collapse_all(&mut self) {
        self.set_all_expanded(false);
    }

    fn set_all_expanded(&mut self, expand: bool) {
        let keys: Vec<NodeKey> = self
            .view
            .iter()
            .filter(|(_, node)| !node.is_leaf())
            .map(|(key, _)| key)
            .collect();
        for key in keys {
            self.set_expanded(key, expand);
        }
    }

    // Touches only the node's icon and container visibility, never re-renders.
    fn set_expanded(&mut self, key: NodeKey, expand: bool) -> bool {
        let Some(node) = self.view.get_mut(key) else {
            return false;
        };
        if node.leaf || node.expanded == expand {
            return false;
        }
        node.expanded = expand;
        node.icon = DisclosureIcon::for_state(false, expand);
        if let Some(sub) = node.subtree.as_mut() {
            sub.visible = expand;
        }
        let value = node.value.clone();
        let path = node.path.clone();

        if let Some(data) = self.store.data_mut(&path) {
            data.expanded = expand;
        }
        self.store.remember_expansion(value, expand);
        true
    }

    fn toggle_key(&mut self, key: NodeKey) -> bool {
        match self.view.get(key) {
            Some(node) if !node.leaf => {
                let expand = !node.expanded;
                self.set_expanded(key, expand)
            }
            _ => false,
        }
    }

    /// Routes a raw pointer event to the node it targets.
    ///
    /// Events for unknown handles or for bindings the node does not carry are
    /// ignored. Drops never change the tree; they return [`TreeEvent::Move`] and
    /// call [`TreeHost::on_move`].
    pub fn dispatch<H>(
        &mut self,
        target: NodeKey,
        event: &mut PointerEvent,
        host: &mut H,
    ) -> TreeEvent<V>
    where
        H: TreeHost<V, A> + ?Sized,
    {
        let Some(node) = self.view.get(target) else {
            return TreeEvent::Unhandled;
        };
        if !node.bindings.contains(event.kind.binding()) {
            return TreeEvent::Unhandled;
        }

        match event.kind {
            PointerKind::Click => self.on_click(target, event, host),
            PointerKind::DoubleClick => {
                event.stop_propagation();
                if let Some(data) = self.data(target) {
                    host.on_double_click(data, event);
                }
                TreeEvent::Handled
            }
            PointerKind::Toggle => {
                event.stop_propagation();
                if self.toggle_key(target) {
                    TreeEvent::Handled
                } else {
                    TreeEvent::Unhandled
                }
            }
            PointerKind::DragStart => {
                event.stop_propagation();
                self.drag_source = Some(target);
                event.payload.set_data(DRAG_PAYLOAD_FORMAT, DRAG_PAYLOAD_DATA);
                log::debug!("tree: drag started on {target:?}");
                TreeEvent::Handled
            }
            PointerKind::DragOver => {
                event.prevent_default();
                event.stop_propagation();
                if self.drag_source != Some(target) {
                    let zone = DropZone::classify(event.offset_y, event.target_height);
                    if let Some(node) = self.view.get_mut(target) {
                        node.zone = Some(zone);
                    }
                }
                TreeEvent::Handled
            }
            PointerKind::DragLeave => {
                event.prevent_default();
                event.stop_propagation();
                if self.drag_source != Some(target)
                    && let Some(node) = self.view.get_mut(target)
                {
                    node.zone = None;
                }
                TreeEvent::Handled
            }
            PointerKind::Drop => self.on_drop(target, event, host),
            PointerKind::DragEnd => {
                event.stop_propagation();
                self.drag_source = None;
                self.clear_zones();
                TreeEvent::Handled
            }
        }
    }

    fn on_click<H>(
        &mut self,
        target: NodeKey,
        event: &mut PointerEvent,
        host: &mut H,
    ) -> TreeEvent<V>
    where
        H: TreeHost<V, A> + ?Sized,
    {
        event.stop_propagation();
        let Some(value) = self.view.get(target).map(|node| node.value.clone()) else {
            return TreeEvent::Unhandled;
        };
        self.select(&value);
        if let Some(data) = self.data(target) {
            host.on_click(data, event);
        }
        TreeEvent::Handled
    }

    fn on_drop<H>(
        &mut self,
        target: NodeKey,
        event: &mut PointerEvent,
        host: &mut H,
    ) -> TreeEvent<V>
    where
        H: TreeHost<V, A> + ?Sized,
    {
        event.prevent_default();
        event.stop_propagation();
        if let Some(node) = self.view.get_mut(target) {
            node.zone = None;
        }

        let Some(source) = self.drag_source.take() else {
            log::debug!("tree: drop on {target:?} without a drag source");
            return TreeEvent::Unhandled;
        };
        if source == target {
            return TreeEvent::Unhandled;
        }

        // Reclassified at drop time; the last drag-over zone is not reused.
        let zone = DropZone::classify(event.offset_y, event.target_height);
        let Some(target_node) = self.view.get(target) else {
            return TreeEvent::Unhandled;
        };
        let (parent, reference) = match zone {
            DropZone::Before => (target_node.parent, Some(target)),
            DropZone::After => (target_node.parent, self.view.next_sibling(target)),
            DropZone::Into => (Some(target), None),
        };

        let Some(dragged) = self.data(source) else {
            log::warn!("tree: drag source {source:?} no longer exists, dropping move");
            return TreeEvent::Unhandled;
        };
        host.on_move(
            dragged,
            parent.and_then(|key| self.data(key)),
            reference.and_then(|key| self.data(key)),
        );

        let value_of = |key: NodeKey| self.view.get(key).map(|node| node.value.clone());
        let Some(dragged) = value_of(source) else {
            return TreeEvent::Unhandled;
        };
        TreeEvent::Move(MoveRequest {
            dragged,
            zone,
            parent: parent.and_then(value_of),
            reference: reference.and_then(value_of),
        })
    }

    fn clear_zones(&mut self) {
        let keys: Vec<NodeKey> = self
            .view
            .iter()
            .filter(|(_, node)| node.zone.is_some())
            .map(|(key, _)| key)
            .collect();
        for key in keys {
            if let Some(node) = self.view.get_mut(key) {
                node.zone = None;
            }
        }
    }

    /// Applies a keyboard-level action.
    pub fn handle_action(&mut self, action: TreeAction) -> TreeEvent<V> {
        let rows = self.view.visible_rows();
        if rows.is_empty() {
            return TreeEvent::Unhandled;
        }
        let selected = self.selected_key();
        let position = selected.and_then(|key| rows.iter().position(|row| *row == key));

        let changed = match action {
            TreeAction::SelectPrev => {
                let idx = position.map_or(0, |idx| idx.saturating_sub(1));
                self.select_key(rows[idx])
            }
            TreeAction::SelectNext => {
                let idx = position.map_or(0, |idx| (idx + 1).min(rows.len() - 1));
                self.select_key(rows[idx])
            }
            TreeAction::SelectFirst => self.select_key(rows[0]),
            TreeAction::SelectLast => self.select_key(rows[rows.len() - 1]),
            TreeAction::SelectParent => selected
                .and_then(|key| self.view.get(key))
                .and_then(|node| node.parent)
                .is_some_and(|parent| self.select_key(parent)),
            TreeAction::Expand => selected.is_some_and(|key| self.set_expanded(key, true)),
            TreeAction::Collapse => selected.is_some_and(|key| self.set_expanded(key, false)),
            TreeAction::Toggle => selected.is_some_and(|key| self.toggle_key(key)),
            TreeAction::ExpandAll => {
                self.expand_all();
                true
            }
            TreeAction::CollapseAll => {
                self.collapse_all();
                true
            }
        };

        if changed {
            TreeEvent::Handled
        } else {
            TreeEvent::Unhandled
        }
    }

    fn select_key(&mut self, key: NodeKey) -> bool {
        let Some(value) = self.view.get(key).map(|node| node.value.clone()) else {
            return false;
        };
        self.select(&value)
    }

    #[cfg(feature = "keymap")]
    /// Resolves a key event into an action and handles it.
    pub fn handle_key(&mut self, key: KeyEvent) -> TreeEvent<V> {
        let Some(action) = self.keymap.resolve(key) else {
            return TreeEvent::Unhandled;
        };
        self.handle_action(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;
    use crate::config::Viewport;
    use crate::host::TreeCallbacks;
    use crate::presentation::Bindings;

    type Tree = TreeWidget<&'static str>;

    fn nested() -> Tree {
        let mut tree = Tree::new();
        tree.set_value(vec![
            TreeNode::new("root", "Root").with_children(vec![
                TreeNode::new("x", "X").with_draggable(true),
                TreeNode::new("y", "Y").with_draggable(true),
                TreeNode::new("z", "Z").with_children(vec![
                    TreeNode::new("z1", "Z1").with_children(vec![TreeNode::new("leaf", "Leaf")]),
                ]),
            ]),
            TreeNode::new("other", "Other"),
        ])
        .unwrap();
        tree
    }

    fn key(tree: &Tree, value: &'static str) -> NodeKey {
        tree.get_node(&value).unwrap().key()
    }

    fn expanded(tree: &Tree, value: &'static str) -> bool {
        tree.get_node(&value).unwrap().view().is_expanded()
    }

    #[test]
    fn select_reveals_nested_child() {
        let mut tree = Tree::new();
        tree.set_value(vec![
            TreeNode::new("a", "Alpha").with_children(vec![TreeNode::new("b", "Beta")]),
        ])
        .unwrap();
        assert!(!expanded(&tree, "a"));

        assert!(tree.select(&"b"));

        assert!(expanded(&tree, "a"));
        assert!(tree.get_node(&"b").unwrap().view().is_selected());
        assert_eq!(tree.get_selected().and_then(|n| n.value), Some("b"));
    }

    #[test]
    fn select_expands_every_ancestor() {
        let mut tree = nested();

        tree.select(&"leaf");

        assert!(expanded(&tree, "root"));
        assert!(expanded(&tree, "z"));
        assert!(expanded(&tree, "z1"));
        assert!(tree.get_value()[0].children[2].expanded);
        assert_eq!(tree.store().remembered_expansion(&"z1"), Some(true));
        assert!(tree.visible_rows().contains(&key(&tree, "leaf")));
    }

    #[test]
    fn selection_is_exclusive() {
        let mut tree = nested();

        tree.select(&"x");
        tree.select(&"y");
        tree.select(&"y");

        let selected: Vec<_> = tree
            .presentation()
            .iter()
            .filter(|(_, node)| node.is_selected())
            .map(|(_, node)| *node.value())
            .collect();
        assert_eq!(selected, vec!["y"]);
    }

    #[test]
    fn unknown_values_are_silent_noops() {
        let mut tree = nested();

        assert!(!tree.select(&"missing"));
        assert!(!tree.unselect(&"missing"));
        assert!(!tree.expand(&"missing"));
        assert!(!tree.collapse(&"missing"));
        assert!(tree.get_selected().is_none());
    }

    #[test]
    fn unselect_keeps_ancestors_expanded() {
        let mut tree = nested();
        tree.select(&"leaf");

        tree.unselect(&"leaf");

        assert!(tree.get_selected().is_none());
        assert!(!tree.get_node(&"leaf").unwrap().view().is_selected());
        assert!(expanded(&tree, "z1"));
    }

    #[test]
    fn expand_and_collapse_are_idempotent() {
        let mut tree = nested();

        assert!(tree.expand(&"root"));
        assert!(!tree.expand(&"root"));
        let node = tree.get_node(&"root").unwrap().view();
        assert_eq!(node.icon(), DisclosureIcon::Expanded);
        assert_eq!(node.subtree_visible(), Some(true));

        assert!(tree.collapse(&"root"));
        assert!(!tree.collapse(&"root"));
        let node = tree.get_node(&"root").unwrap().view();
        assert_eq!(node.icon(), DisclosureIcon::Collapsed);
        assert_eq!(node.subtree_visible(), Some(false));
        assert_eq!(tree.store().remembered_expansion(&"root"), Some(false));
        assert!(!tree.get_value()[0].expanded);
    }

    #[test]
    fn expand_ignores_leaves() {
        let mut tree = nested();

        assert!(!tree.expand(&"other"));
        assert!(!expanded(&tree, "other"));
    }

    #[test]
    fn expand_does_not_rebuild_presentation() {
        let mut tree = nested();
        let before = key(&tree, "x");

        tree.expand(&"root");

        assert_eq!(key(&tree, "x"), before);
    }

    #[test]
    fn select_scrolls_minimally() {
        let mut tree = nested();
        tree.expand_all();
        *tree.viewport_mut() = Viewport::new(0.0, 48.0);

        // Row 5 spans [120, 144).
        tree.select(&"leaf");
        assert!((tree.viewport().scroll_top - 104.0).abs() < f32::EPSILON);

        // Row 1 spans [24, 48), above the window.
        tree.select(&"x");
        assert!((tree.viewport().scroll_top - 16.0).abs() < f32::EPSILON);

        // Row 2 spans [48, 72); its bottom is below the window [16, 64).
        tree.select(&"y");
        assert!((tree.viewport().scroll_top - 32.0).abs() < f32::EPSILON);

        // Fully visible now, nothing moves.
        tree.select(&"y");
        assert!((tree.viewport().scroll_top - 32.0).abs() < f32::EPSILON);
    }

    #[test]
    fn click_selects_then_calls_host() {
        let mut tree = nested();
        let target = key(&tree, "leaf");
        let mut clicked = Vec::new();
        let mut host = TreeCallbacks::<&str>::new().on_click(|node, _| clicked.push(node.value));
        let mut event = PointerEvent::new(PointerKind::Click);

        let outcome = tree.dispatch(target, &mut event, &mut host);
        drop(host);

        assert_eq!(outcome, TreeEvent::Handled);
        assert!(event.propagation_stopped());
        assert_eq!(clicked, vec![Some("leaf")]);
        assert!(expanded(&tree, "z1"));
    }

    #[test]
    fn double_click_leaves_selection_alone() {
        let mut tree = nested();
        let target = key(&tree, "x");
        let mut count = 0;
        let mut host = TreeCallbacks::<&str>::new().on_double_click(|_, _| count += 1);
        let mut event = PointerEvent::new(PointerKind::DoubleClick);

        tree.dispatch(target, &mut event, &mut host);
        drop(host);

        assert_eq!(count, 1);
        assert!(event.propagation_stopped());
        assert!(tree.get_selected().is_none());
    }

    #[test]
    fn icon_click_toggles_non_leaves_only() {
        let mut tree = nested();
        let root = key(&tree, "root");
        let other = key(&tree, "other");

        let mut event = PointerEvent::new(PointerKind::Toggle);
        assert_eq!(tree.dispatch(root, &mut event, &mut ()), TreeEvent::Handled);
        assert!(event.propagation_stopped());
        assert!(expanded(&tree, "root"));

        tree.dispatch(root, &mut PointerEvent::new(PointerKind::Toggle), &mut ());
        assert!(!expanded(&tree, "root"));

        let mut event = PointerEvent::new(PointerKind::Toggle);
        assert_eq!(tree.dispatch(other, &mut event, &mut ()), TreeEvent::Unhandled);
        assert!(event.propagation_stopped());
    }

    #[test]
    fn drag_start_requires_draggable_node() {
        let mut tree = nested();
        let fixed = key(&tree, "other");
        let movable = key(&tree, "x");

        let mut event = PointerEvent::new(PointerKind::DragStart);
        assert_eq!(tree.dispatch(fixed, &mut event, &mut ()), TreeEvent::Unhandled);
        assert!(tree.drag_source().is_none());

        let mut event = PointerEvent::new(PointerKind::DragStart);
        assert_eq!(tree.dispatch(movable, &mut event, &mut ()), TreeEvent::Handled);
        assert_eq!(tree.drag_source(), Some(movable));
        assert_eq!(event.payload.get_data("text"), Some(DRAG_PAYLOAD_DATA));
    }

    fn start_drag(tree: &mut Tree, value: &'static str) -> NodeKey {
        let source = key(tree, value);
        tree.dispatch(source, &mut PointerEvent::new(PointerKind::DragStart), &mut ());
        source
    }

    #[test]
    fn drag_over_styles_exactly_one_zone() {
        let mut tree = nested();
        let source = start_drag(&mut tree, "x");
        let target = key(&tree, "other");

        let mut event = PointerEvent::at(PointerKind::DragOver, 2.0, 24.0);
        tree.dispatch(target, &mut event, &mut ());
        assert!(event.default_prevented());
        assert_eq!(tree.presentation().get(target).unwrap().zone(), Some(DropZone::Before));

        tree.dispatch(target, &mut PointerEvent::at(PointerKind::DragOver, 23.0, 24.0), &mut ());
        assert_eq!(tree.presentation().get(target).unwrap().zone(), Some(DropZone::After));

        tree.dispatch(target, &mut PointerEvent::at(PointerKind::DragOver, 12.0, 24.0), &mut ());
        assert_eq!(tree.presentation().get(target).unwrap().zone(), Some(DropZone::Into));

        tree.dispatch(source, &mut PointerEvent::at(PointerKind::DragOver, 2.0, 24.0), &mut ());
        assert_eq!(tree.presentation().get(source).unwrap().zone(), None);

        let mut event = PointerEvent::new(PointerKind::DragLeave);
        tree.dispatch(target, &mut event, &mut ());
        assert!(event.default_prevented());
        assert_eq!(tree.presentation().get(target).unwrap().zone(), None);
    }

    #[test]
    fn drag_leave_on_source_changes_nothing() {
        let mut tree = nested();
        let source = start_drag(&mut tree, "x");
        let target = key(&tree, "other");
        tree.dispatch(target, &mut PointerEvent::at(PointerKind::DragOver, 12.0, 24.0), &mut ());

        let mut event = PointerEvent::new(PointerKind::DragLeave);
        let outcome = tree.dispatch(source, &mut event, &mut ());

        assert_eq!(outcome, TreeEvent::Handled);
        assert!(event.propagation_stopped());
        assert_eq!(tree.drag_source(), Some(source));
        assert_eq!(tree.presentation().get(source).unwrap().zone(), None);
        assert_eq!(tree.presentation().get(target).unwrap().zone(), Some(DropZone::Into));
    }

    #[test]
    fn unselect_of_other_node_keeps_selection() {
        let mut tree = nested();
        tree.select(&"y");

        assert!(tree.unselect(&"x"));

        assert_eq!(tree.get_selected().and_then(|n| n.value), Some("y"));
        assert!(tree.get_node(&"y").unwrap().view().is_selected());
    }

    #[derive(Default)]
    struct Recorder {
        moves: Vec<(Option<&'static str>, Option<&'static str>, Option<&'static str>)>,
    }

    impl TreeHost<&'static str> for Recorder {
        fn on_move(
            &mut self,
            dragged: &TreeNode<&'static str>,
            parent: Option<&TreeNode<&'static str>>,
            reference: Option<&TreeNode<&'static str>>,
        ) {
            self.moves.push((
                dragged.value,
                parent.and_then(|n| n.value),
                reference.and_then(|n| n.value),
            ));
        }
    }

    fn drop_on(
        tree: &mut Tree,
        source: &'static str,
        target: &'static str,
        area: f32,
    ) -> (TreeEvent<&'static str>, Recorder) {
        start_drag(tree, source);
        let target = key(tree, target);
        let mut recorder = Recorder::default();
        let mut event = PointerEvent::at(PointerKind::Drop, area * 24.0, 24.0);
        let outcome = tree.dispatch(target, &mut event, &mut recorder);
        assert!(event.default_prevented());
        assert!(event.propagation_stopped());
        (outcome, recorder)
    }

    #[test]
    fn drop_after_reports_next_sibling() {
        let mut tree = nested();

        let (outcome, recorder) = drop_on(&mut tree, "y", "x", 0.9);

        assert_eq!(recorder.moves, vec![(Some("y"), Some("root"), Some("y"))]);
        assert_eq!(
            outcome,
            TreeEvent::Move(MoveRequest {
                dragged: "y",
                zone: DropZone::After,
                parent: Some("root"),
                reference: Some("y"),
            })
        );
    }

    #[test]
    fn drop_after_last_child_appends() {
        let mut tree = nested();

        let (_, recorder) = drop_on(&mut tree, "x", "z", 0.9);

        assert_eq!(recorder.moves, vec![(Some("x"), Some("root"), None)]);
    }

    #[test]
    fn drop_before_reports_target() {
        let mut tree = nested();

        let (_, recorder) = drop_on(&mut tree, "x", "other", 0.1);

        assert_eq!(recorder.moves, vec![(Some("x"), None, Some("other"))]);
    }

    #[test]
    fn drop_into_reports_target_as_parent() {
        let mut tree = nested();

        let (outcome, recorder) = drop_on(&mut tree, "y", "other", 0.25);

        assert_eq!(recorder.moves, vec![(Some("y"), Some("other"), None)]);
        assert!(matches!(outcome, TreeEvent::Move(MoveRequest { zone: DropZone::Into, .. })));
    }

    #[test]
    fn drop_reclassifies_instead_of_reusing_drag_over() {
        let mut tree = nested();
        start_drag(&mut tree, "x");
        let target = key(&tree, "other");
        tree.dispatch(target, &mut PointerEvent::at(PointerKind::DragOver, 1.0, 24.0), &mut ());

        let mut recorder = Recorder::default();
        tree.dispatch(target, &mut PointerEvent::at(PointerKind::Drop, 20.0, 24.0), &mut recorder);

        assert_eq!(recorder.moves, vec![(Some("x"), None, None)]);
        assert_eq!(tree.presentation().get(target).unwrap().zone(), None);
        assert!(tree.drag_source().is_none());
    }

    #[test]
    fn drop_on_itself_does_not_move() {
        let mut tree = nested();

        let (outcome, recorder) = drop_on(&mut tree, "x", "x", 0.5);

        assert_eq!(outcome, TreeEvent::Unhandled);
        assert!(recorder.moves.is_empty());
    }

    #[test]
    fn drop_without_drag_source_is_ignored() {
        let mut tree = nested();
        let target = key(&tree, "other");
        let mut recorder = Recorder::default();

        let outcome = tree.dispatch(target, &mut PointerEvent::at(PointerKind::Drop, 12.0, 24.0), &mut recorder);

        assert_eq!(outcome, TreeEvent::Unhandled);
        assert!(recorder.moves.is_empty());
    }

    #[test]
    fn drag_source_survives_rerender() {
        let mut tree = nested();
        start_drag(&mut tree, "y");

        let roots = tree.get_value().to_vec();
        tree.set_value(roots).unwrap();

        assert_eq!(tree.drag_source(), Some(key(&tree, "y")));
        let target = key(&tree, "other");
        let mut recorder = Recorder::default();
        let mut event = PointerEvent::at(PointerKind::Drop, 12.0, 24.0);
        tree.dispatch(target, &mut event, &mut recorder);
        assert_eq!(recorder.moves, vec![(Some("y"), Some("other"), None)]);
    }

    #[test]
    fn drag_end_clears_source_and_zones() {
        let mut tree = nested();
        let source = start_drag(&mut tree, "x");
        let target = key(&tree, "other");
        tree.dispatch(target, &mut PointerEvent::at(PointerKind::DragOver, 12.0, 24.0), &mut ());

        tree.dispatch(source, &mut PointerEvent::new(PointerKind::DragEnd), &mut ());

        assert!(tree.drag_source().is_none());
        assert_eq!(tree.presentation().get(target).unwrap().zone(), None);
    }

    #[test]
    fn stale_handles_are_unhandled() {
        let mut tree = nested();
        let stale = key(&tree, "x");
        tree.render();

        let outcome = tree.dispatch(stale, &mut PointerEvent::new(PointerKind::Click), &mut ());

        assert_eq!(outcome, TreeEvent::Unhandled);
        assert!(tree.get_selected().is_none());
    }

    #[test]
    fn rerender_keeps_selection_mark() {
        let mut tree = nested();
        tree.select(&"x");

        tree.render();

        assert!(tree.get_node(&"x").unwrap().view().is_selected());
        assert!(tree.presentation().get(key(&tree, "x")).unwrap().bindings().contains(Bindings::CLICK));
    }

    #[test]
    fn actions_walk_visible_rows() {
        let mut tree = nested();

        assert_eq!(tree.handle_action(TreeAction::SelectNext), TreeEvent::Handled);
        assert_eq!(tree.get_selected().and_then(|n| n.value), Some("root"));

        tree.handle_action(TreeAction::Expand);
        tree.handle_action(TreeAction::SelectNext);
        assert_eq!(tree.get_selected().and_then(|n| n.value), Some("x"));

        tree.handle_action(TreeAction::SelectParent);
        assert_eq!(tree.get_selected().and_then(|n| n.value), Some("root"));

        tree.handle_action(TreeAction::SelectLast);
        assert_eq!(tree.get_selected().and_then(|n| n.value), Some("other"));

        tree.handle_action(TreeAction::CollapseAll);
        assert_eq!(tree.visible_rows().len(), 2);
        assert_eq!(tree.handle_action(TreeAction::Toggle), TreeEvent::Unhandled);
    }

    #[test]
    fn actions_on_empty_tree_are_unhandled() {
        let mut tree = Tree::new();

        assert_eq!(tree.handle_action(TreeAction::SelectFirst), TreeEvent::Unhandled);
    }
}
