//! Drag-and-drop tree widget for ratatui: a value-indexed node store, a disposable
//! presentation rebuilt on every render, and an interaction controller for
//! selection, expansion, scrolling and drop-zone moves.
//!
//! Feature flags:
//! - `keymap`: crossterm-based key bindings and `TreeWidget::handle_key`.
//! - `edit`: `TreeEdit` for applying `MoveRequest`s to plain node vectors.
//! - `serde`: serde support for nodes, configuration and load options.

mod action;
mod component;
mod config;
mod context;
mod controller;
mod drag;
#[cfg(feature = "edit")]
mod edit;
mod error;
mod glyphs;
mod host;
#[cfg(feature = "keymap")]
mod keymap;
pub mod loader;
mod node;
mod pointer;
pub mod prelude;
mod presentation;
mod store;
mod style;
mod tree;
mod widget;

pub use action::{TreeAction, TreeEvent};
pub use component::Component;
pub use config::{TreeConfig, Viewport};
pub use context::TreeRowContext;
pub use drag::{AFTER_THRESHOLD, BEFORE_THRESHOLD, DropZone, MoveRequest};
#[cfg(feature = "edit")]
pub use edit::TreeEdit;
pub use error::{TreeError, UnknownFormat};
pub use glyphs::{TreeGlyphs, tree_row_line};
pub use host::{TreeCallbacks, TreeHost};
#[cfg(feature = "keymap")]
pub use keymap::{KeymapProfile, TreeKeyBindings};
pub use loader::{FormatLoader, LoadOptions, ModelFormat, ModelLoader};
pub use node::{NodeValue, TreeNode};
pub use pointer::{DRAG_PAYLOAD_DATA, DRAG_PAYLOAD_FORMAT, DragPayload, PointerEvent, PointerKind};
pub use presentation::{
    Bindings, DisclosureIcon, NodeKey, Presentation, PresentationNode, truncate_label,
};
pub use store::NodeStore;
pub use style::TreeViewStyle;
pub use tree::{NodeRef, TreeWidget};
pub use widget::TreeView;
