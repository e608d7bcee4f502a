pub use crate::{
    Component, DropZone, MoveRequest, NodeKey, NodeRef, NodeValue, PointerEvent, PointerKind,
    TreeAction, TreeCallbacks, TreeConfig, TreeError, TreeEvent, TreeGlyphs, TreeHost, TreeNode,
    TreeView, TreeViewStyle, TreeWidget,
};

#[cfg(feature = "keymap")]
pub use crate::{KeymapProfile, TreeKeyBindings};

#[cfg(feature = "edit")]
pub use crate::TreeEdit;
