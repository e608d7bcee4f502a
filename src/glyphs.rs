use ratatui::text::{Line, Span};

use crate::context::TreeRowContext;
use crate::drag::DropZone;
use crate::presentation::DisclosureIcon;

#[derive(Clone, Copy)]
pub struct TreeGlyphs<'a> {
    pub indent: &'a str,
    pub expanded: &'a str,
    pub collapsed: &'a str,
    /// Drawn for leaves; blank but as wide as the other icons.
    pub placeholder: &'a str,
    pub drop_before: &'a str,
    pub drop_after: &'a str,
    pub drop_into: &'a str,
}

impl TreeGlyphs<'static> {
    pub const fn unicode() -> Self {
        Self {
            indent: "  ",
            expanded: "▼",
            collapsed: "▶",
            placeholder: " ",
            drop_before: "↑",
            drop_after: "↓",
            drop_into: "↳",
        }
    }

    pub const fn ascii() -> Self {
        Self {
            indent: "  ",
            expanded: "v",
            collapsed: ">",
            placeholder: " ",
            drop_before: "^",
            drop_after: "_",
            drop_into: "+",
        }
    }
}

impl<'a> TreeGlyphs<'a> {
    pub const fn icon(&self, icon: DisclosureIcon) -> &'a str {
        match icon {
            DisclosureIcon::Placeholder => self.placeholder,
            DisclosureIcon::Expanded => self.expanded,
            DisclosureIcon::Collapsed => self.collapsed,
        }
    }

    pub const fn zone(&self, zone: DropZone) -> &'a str {
        match zone {
            DropZone::Before => self.drop_before,
            DropZone::After => self.drop_after,
            DropZone::Into => self.drop_into,
        }
    }
}

/// Builds the line for one row: indentation, disclosure icon, label, zone marker.
pub fn tree_row_line<'a>(ctx: &TreeRowContext<'a>, glyphs: &TreeGlyphs<'a>) -> Line<'a> {
    let mut spans = Vec::with_capacity(ctx.depth as usize + 5);
    for _ in 0..ctx.depth {
        spans.push(Span::raw(glyphs.indent));
    }
    spans.push(Span::raw(glyphs.icon(ctx.icon)));
    spans.push(Span::raw(" "));
    spans.push(Span::raw(ctx.label));
    if let Some(zone) = ctx.zone {
        spans.push(Span::raw(" "));
        spans.push(Span::raw(glyphs.zone(zone)));
    }
    Line::from(spans).style(ctx.style)
}
