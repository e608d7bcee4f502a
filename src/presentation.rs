use bitflags::bitflags;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::drag::DropZone;
use crate::node::{NodeValue, TreeNode};
use crate::store::{NodeStore, ProjectionParts};

/// Labels longer than this many characters are truncated.
pub const LABEL_LIMIT: usize = 8;
/// Characters kept from a truncated label.
pub const LABEL_KEEP: usize = 7;
/// Suffix appended to truncated labels.
pub const ELLIPSIS: &str = "...";

/// Handle to a presentation node (generational).
///
/// Handles are only valid for the render that produced them; a later render bumps
/// the generation so stale handles resolve to nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeKey(u32, u32);

impl NodeKey {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

bitflags! {
    /// Interaction bindings attached to a presentation node.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Bindings: u8 {
        const CLICK        = 0b0000_0001;
        const DOUBLE_CLICK = 0b0000_0010;
        /// Only attached to draggable nodes.
        const DRAG_START   = 0b0000_0100;
        const DRAG_OVER    = 0b0000_1000;
        const DRAG_LEAVE   = 0b0001_0000;
        const DROP         = 0b0010_0000;
        /// Bound to the disclosure icon rather than the row.
        const TOGGLE       = 0b0100_0000;
        const DRAG_END     = 0b1000_0000;
    }
}

impl Bindings {
    /// Bindings every node receives.
    pub const NODE: Self = Self::CLICK
        .union(Self::DOUBLE_CLICK)
        .union(Self::DRAG_OVER)
        .union(Self::DRAG_LEAVE)
        .union(Self::DROP)
        .union(Self::TOGGLE);

    /// Bindings added for draggable nodes.
    pub const DRAG_SOURCE: Self = Self::DRAG_START.union(Self::DRAG_END);
}

/// State of the disclosure icon in front of a label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisclosureIcon {
    /// Leaf: occupies space but is hidden.
    Placeholder,
    Expanded,
    Collapsed,
}

impl DisclosureIcon {
    pub const fn for_state(leaf: bool, expanded: bool) -> Self {
        match (leaf, expanded) {
            (true, _) => Self::Placeholder,
            (false, true) => Self::Expanded,
            (false, false) => Self::Collapsed,
        }
    }

    #[inline]
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Placeholder)
    }
}

/// Nested container holding the presentation of a node's children.
#[derive(Clone, Debug)]
pub struct SubTree {
    pub(crate) visible: bool,
    pub(crate) children: SmallVec<[NodeKey; 8]>,
}

/// Rendered, interactive projection of one [`TreeNode`].
#[derive(Clone, Debug)]
pub struct PresentationNode<V> {
    pub(crate) value: V,
    // Index path into the store's tree; data is never copied into the presentation.
    pub(crate) path: SmallVec<[u32; 8]>,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) depth: u16,
    pub(crate) leaf: bool,
    pub(crate) expanded: bool,
    pub(crate) selected: bool,
    pub(crate) draggable: bool,
    pub(crate) icon: DisclosureIcon,
    pub(crate) label: String,
    pub(crate) title: String,
    pub(crate) zone: Option<DropZone>,
    pub(crate) bindings: Bindings,
    pub(crate) subtree: Option<SubTree>,
}

impl<V> PresentationNode<V> {
    pub const fn value(&self) -> &V {
        &self.value
    }

    pub const fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    pub const fn depth(&self) -> u16 {
        self.depth
    }

    pub const fn is_leaf(&self) -> bool {
        self.leaf
    }

    pub const fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    pub const fn is_draggable(&self) -> bool {
        self.draggable
    }

    pub const fn icon(&self) -> DisclosureIcon {
        self.icon
    }

    /// Displayed (possibly truncated) label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Full label, used as tooltip.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Drop zone styling currently shown on this node.
    pub const fn zone(&self) -> Option<DropZone> {
        self.zone
    }

    pub const fn bindings(&self) -> Bindings {
        self.bindings
    }

    /// Visibility of the child container, or `None` for leaves.
    pub fn subtree_visible(&self) -> Option<bool> {
        self.subtree.as_ref().map(|sub| sub.visible)
    }

    /// Child handles in tree order.
    pub fn children(&self) -> &[NodeKey] {
        self.subtree
            .as_ref()
            .map(|sub| sub.children.as_slice())
            .unwrap_or_default()
    }
}

/// Arena of presentation nodes produced by the last render.
#[derive(Debug)]
pub struct Presentation<V> {
    nodes: Vec<Option<PresentationNode<V>>>,
    roots: Vec<NodeKey>,
    generation: u32,
    live_bindings: usize,
}

impl<V> Default for Presentation<V> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            generation: 0,
            live_bindings: 0,
        }
    }
}

struct Projector<'a, V> {
    memory: &'a mut FxHashMap<V, bool>,
    index: &'a mut FxHashMap<V, NodeKey>,
    selected: Option<&'a V>,
    path: SmallVec<[u32; 8]>,
}

impl<V> Presentation<V> {
    pub fn get(&self, key: NodeKey) -> Option<&PresentationNode<V>> {
        if key.generation() != self.generation {
            return None;
        }
        self.nodes.get(key.idx()).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, key: NodeKey) -> Option<&mut PresentationNode<V>> {
        if key.generation() != self.generation {
            return None;
        }
        self.nodes.get_mut(key.idx()).and_then(Option::as_mut)
    }

    /// Top-level handles in tree order.
    pub fn roots(&self) -> &[NodeKey] {
        &self.roots
    }

    /// Number of presentation nodes alive.
    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of interaction bindings currently registered.
    pub const fn live_bindings(&self) -> usize {
        self.live_bindings
    }

    /// Iterates nodes in creation order (pre-order of the last render).
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &PresentationNode<V>)> {
        let generation = self.generation;
        self.nodes.iter().enumerate().filter_map(move |(idx, node)| {
            node.as_ref()
                .map(|node| (NodeKey::new(idx as u32, generation), node))
        })
    }

    /// Handles of the container that holds `key` (its parent's children or the roots).
    pub fn siblings(&self, key: NodeKey) -> &[NodeKey] {
        match self.get(key).and_then(|node| node.parent) {
            Some(parent) => self
                .get(parent)
                .map(PresentationNode::children)
                .unwrap_or_default(),
            None => &self.roots,
        }
    }

    /// Next node in the same container, or `None` if `key` is the last one.
    pub fn next_sibling(&self, key: NodeKey) -> Option<NodeKey> {
        let siblings = self.siblings(key);
        let pos = siblings.iter().position(|sibling| *sibling == key)?;
        siblings.get(pos + 1).copied()
    }

    /// Walks parent handles upward, nearest first.
    pub fn ancestors(&self, key: NodeKey) -> impl Iterator<Item = NodeKey> + '_ {
        let mut next = self.get(key).and_then(|node| node.parent);
        std::iter::from_fn(move || {
            let current = next?;
            next = self.get(current).and_then(|node| node.parent);
            Some(current)
        })
    }

    /// Rows not hidden by a collapsed container, in display order.
    pub fn visible_rows(&self) -> Vec<NodeKey> {
        let mut rows = Vec::with_capacity(self.nodes.len());
        for key in &self.roots {
            self.collect_visible(*key, &mut rows);
        }
        rows
    }

    fn collect_visible(&self, key: NodeKey, rows: &mut Vec<NodeKey>) {
        let Some(node) = self.get(key) else {
            return;
        };
        rows.push(key);
        if let Some(sub) = &node.subtree
            && sub.visible
        {
            for child in &sub.children {
                self.collect_visible(*child, rows);
            }
        }
    }

    fn bind(&mut self, node: &mut PresentationNode<V>, bindings: Bindings) {
        node.bindings |= bindings;
        self.live_bindings += bindings.bits().count_ones() as usize;
    }
}

impl<V: NodeValue> Presentation<V> {
    /// Discards the previous presentation and rebuilds it from the store.
    pub(crate) fn project<A>(&mut self, store: &mut NodeStore<V, A>) {
        self.teardown(store.index_mut());
        self.generation = self.generation.wrapping_add(1);

        let ProjectionParts {
            roots,
            memory,
            index,
            selected,
        } = store.projection_parts();
        let mut cx = Projector {
            memory,
            index,
            selected,
            path: SmallVec::new(),
        };
        for (idx, node) in roots.iter_mut().enumerate() {
            cx.path.push(idx as u32);
            let key = self.create(&mut cx, node, None, 0);
            self.roots.push(key);
            cx.path.pop();
        }
        log::debug!(
            "tree: projected {} nodes with {} bindings",
            self.nodes.len(),
            self.live_bindings
        );
    }

    fn create<A>(
        &mut self,
        cx: &mut Projector<'_, V>,
        node: &mut TreeNode<V, A>,
        parent: Option<NodeKey>,
        depth: u16,
    ) -> NodeKey {
        let leaf = node.is_leaf();
        let value = node.value.clone().unwrap_or_else(|| {
            log::warn!(
                "tree: node {:?} at {:?} has no value, falling back to the default identifier",
                node.text,
                cx.path.as_slice()
            );
            V::default()
        });
        let expanded = node.expanded || cx.memory.get(&value).copied() == Some(true);
        node.expanded = expanded;
        cx.memory.insert(value.clone(), expanded);

        let key = NodeKey::new(self.nodes.len() as u32, self.generation);
        let mut entry = PresentationNode {
            selected: cx.selected == Some(&value),
            value: value.clone(),
            path: cx.path.clone(),
            parent,
            depth,
            leaf,
            expanded,
            draggable: node.draggable,
            icon: DisclosureIcon::for_state(leaf, expanded),
            label: truncate_label(&node.text),
            title: node.text.clone(),
            zone: None,
            bindings: Bindings::empty(),
            subtree: None,
        };
        let bindings = if node.draggable {
            Bindings::NODE | Bindings::DRAG_SOURCE
        } else {
            Bindings::NODE
        };
        self.bind(&mut entry, bindings);
        self.nodes.push(Some(entry));
        cx.index.insert(value, key);

        if !leaf {
            let mut children = SmallVec::with_capacity(node.children.len());
            for (idx, child) in node.children.iter_mut().enumerate() {
                cx.path.push(idx as u32);
                children.push(self.create(cx, child, Some(key), depth + 1));
                cx.path.pop();
            }
            if let Some(entry) = self.get_mut(key) {
                entry.subtree = Some(SubTree {
                    visible: expanded,
                    children,
                });
            }
        }
        key
    }

    /// Removes every presentation node, depth-first.
    ///
    /// Each node loses its bindings and index entry before it is dropped.
    pub(crate) fn teardown(&mut self, index: &mut FxHashMap<V, NodeKey>) {
        let roots = std::mem::take(&mut self.roots);
        for key in roots {
            self.clear_node(key, index);
        }
        if self.live_bindings != 0 {
            log::warn!(
                "tree: {} bindings left on detached nodes after teardown",
                self.live_bindings
            );
            self.live_bindings = 0;
        }
        self.nodes.clear();
    }

    fn clear_node(&mut self, key: NodeKey, index: &mut FxHashMap<V, NodeKey>) {
        let Some(node) = self.get_mut(key) else {
            log::warn!("tree: unknown presentation element {key:?} during teardown, skipping");
            return;
        };
        let released = node.bindings.bits().count_ones() as usize;
        node.bindings = Bindings::empty();
        if index.get(&node.value) == Some(&key) {
            index.remove(&node.value);
        }
        let subtree = node.subtree.take();
        self.live_bindings -= released;

        if let Some(sub) = subtree {
            for child in sub.children {
                self.clear_node(child, index);
            }
        }
        if let Some(slot) = self.nodes.get_mut(key.idx()) {
            *slot = None;
        }
    }
}

/// Applies the fixed label policy: more than [`LABEL_LIMIT`] characters keeps the
/// first [`LABEL_KEEP`] and appends [`ELLIPSIS`].
pub fn truncate_label(text: &str) -> String {
    if text.chars().count() > LABEL_LIMIT {
        let mut label: String = text.chars().take(LABEL_KEEP).collect();
        label.push_str(ELLIPSIS);
        label
    } else {
        text.to_owned()
    }
}
