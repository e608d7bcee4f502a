use std::marker::PhantomData;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{
    Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget,
    Widget,
};

use crate::context::TreeRowContext;
use crate::glyphs::{TreeGlyphs, tree_row_line};
use crate::node::NodeValue;
use crate::presentation::PresentationNode;
use crate::style::TreeViewStyle;
use crate::tree::TreeWidget;

/// Ratatui surface for a [`TreeWidget`].
///
/// Rendering syncs the widget's viewport height with the drawn area and takes the
/// first visible row from `scroll_top`, so selection scrolling carries over.
pub struct TreeView<'a, V, A = ()> {
    style: TreeViewStyle<'a>,
    glyphs: TreeGlyphs<'a>,
    _state: PhantomData<fn(&TreeWidget<V, A>)>,
}

impl<'a, V, A> TreeView<'a, V, A> {
    pub const fn new(style: TreeViewStyle<'a>) -> Self {
        Self {
            style,
            glyphs: TreeGlyphs::unicode(),
            _state: PhantomData,
        }
    }

    #[must_use]
    pub const fn glyphs(mut self, glyphs: TreeGlyphs<'a>) -> Self {
        self.glyphs = glyphs;
        self
    }

    fn row<'b>(&self, node: &'b PresentationNode<V>) -> Line<'b>
    where
        'a: 'b,
    {
        let mut style = self.style.row_style;
        if node.is_selected() {
            style = style.patch(self.style.selected_style);
        }
        if let Some(zone) = node.zone() {
            style = style.patch(self.style.zone_style(zone));
        }
        let ctx = TreeRowContext {
            depth: node.depth(),
            icon: node.icon(),
            label: node.label(),
            zone: node.zone(),
            style,
        };
        tree_row_line(&ctx, &self.glyphs)
    }

    fn render_scrollbar(area: Rect, buf: &mut Buffer, total: usize, offset: usize, height: usize) {
        let scroll_len = total.saturating_sub(height).saturating_add(1);
        let mut state = ScrollbarState::new(scroll_len)
            .position(offset.min(scroll_len.saturating_sub(1)))
            .viewport_content_length(height);
        Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .render(area, buf, &mut state);
    }
}

impl<V: NodeValue, A> StatefulWidget for TreeView<'_, V, A> {
    type State = TreeWidget<V, A>;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let mut block = Block::default()
            .borders(self.style.borders)
            .style(self.style.block_style)
            .border_style(self.style.border_style);
        if let Some(title) = self.style.title.clone() {
            block = block.title(title);
        }

        let inner = block.inner(area);
        let row_height = state.config().row_height;
        let height = inner.height as usize;
        state.viewport_mut().height = f32::from(inner.height) * row_height;

        let rows = state.visible_rows();
        let first = if row_height > 0.0 {
            (state.viewport().scroll_top / row_height).floor() as usize
        } else {
            0
        };
        let offset = first.min(rows.len().saturating_sub(height));
        let end = (offset + height).min(rows.len());

        let view = state.presentation();
        let lines: Vec<Line<'_>> = rows[offset..end]
            .iter()
            .filter_map(|key| view.get(*key))
            .map(|node| self.row(node))
            .collect();

        let overflow = self.style.show_scrollbar && rows.len() > height && area.width > 1;
        if overflow {
            let text_area = Rect {
                width: area.width - 1,
                ..area
            };
            let scrollbar_area = Rect {
                x: area.x + area.width - 1,
                y: area.y,
                width: 1,
                height: area.height,
            };
            let mut borders = self.style.borders;
            borders.remove(Borders::RIGHT);
            Paragraph::new(lines)
                .block(block.borders(borders))
                .render(text_area, buf);
            Self::render_scrollbar(scrollbar_area, buf, rows.len(), offset, height);
        } else {
            Paragraph::new(lines).block(block).render(area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TreeConfig;
    use crate::node::TreeNode;

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect::<String>()
    }

    fn terminal_tree() -> TreeWidget<u32> {
        let mut tree = TreeWidget::with_config(TreeConfig::cells());
        let children = (1..=12)
            .map(|idx| TreeNode::new(idx, format!("node-{idx}")))
            .collect();
        tree.set_value(vec![
            TreeNode::new(0, "Supercalifragilistic").with_children(children),
        ])
        .unwrap();
        tree
    }

    #[test]
    fn renders_truncated_labels_and_icons() {
        let mut tree = terminal_tree();
        let style = TreeViewStyle {
            borders: Borders::NONE,
            ..TreeViewStyle::default()
        };
        let view = TreeView::new(style).glyphs(TreeGlyphs::ascii());
        let area = Rect::new(0, 0, 20, 3);
        let mut buffer = Buffer::empty(area);

        view.render(area, &mut buffer, &mut tree);

        assert_eq!(row_text(&buffer, 0).trim_end(), "> Superca...");
        assert!((tree.viewport().height - 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn follows_selection_scroll() {
        let mut tree = terminal_tree();
        let style = TreeViewStyle {
            borders: Borders::NONE,
            show_scrollbar: false,
            ..TreeViewStyle::default()
        };
        let area = Rect::new(0, 0, 20, 4);
        let mut buffer = Buffer::empty(area);
        TreeView::new(style.clone())
            .glyphs(TreeGlyphs::ascii())
            .render(area, &mut buffer, &mut tree);

        tree.select(&10);
        let mut buffer = Buffer::empty(area);
        TreeView::new(style)
            .glyphs(TreeGlyphs::ascii())
            .render(area, &mut buffer, &mut tree);

        assert_eq!(row_text(&buffer, 3).trim_end(), "    node-10");
    }

    #[test]
    fn render_smoke_with_scrollbar() {
        let mut tree = terminal_tree();
        tree.expand_all();
        let area = Rect::new(0, 0, 20, 6);
        let mut buffer = Buffer::empty(area);

        TreeView::new(TreeViewStyle::default()).render(area, &mut buffer, &mut tree);

        let last = area.width - 1;
        assert!((0..area.height).any(|y| buffer[(last, y)].symbol() != " "));
        assert!(row_text(&buffer, 1).contains("Superca..."));
    }
}
