use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Borders;

use crate::drag::DropZone;

/// Visual settings of [`TreeView`](crate::TreeView).
#[derive(Clone)]
pub struct TreeViewStyle<'a> {
    pub title: Option<Line<'a>>,
    pub block_style: Style,
    pub border_style: Style,
    pub borders: Borders,
    pub row_style: Style,
    pub selected_style: Style,
    pub drop_before_style: Style,
    pub drop_after_style: Style,
    pub drop_into_style: Style,
    pub show_scrollbar: bool,
}

impl TreeViewStyle<'_> {
    /// Style patch for a row showing the given drop zone.
    pub const fn zone_style(&self, zone: DropZone) -> Style {
        match zone {
            DropZone::Before => self.drop_before_style,
            DropZone::After => self.drop_after_style,
            DropZone::Into => self.drop_into_style,
        }
    }
}

impl Default for TreeViewStyle<'_> {
    fn default() -> Self {
        Self {
            title: None,
            block_style: Style::new(),
            border_style: Style::new(),
            borders: Borders::ALL,
            row_style: Style::new(),
            selected_style: Style::new().add_modifier(Modifier::REVERSED),
            drop_before_style: Style::new().add_modifier(Modifier::UNDERLINED),
            drop_after_style: Style::new().add_modifier(Modifier::UNDERLINED),
            drop_into_style: Style::new().add_modifier(Modifier::BOLD),
            show_scrollbar: true,
        }
    }
}
