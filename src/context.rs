use ratatui::style::Style;

use crate::drag::DropZone;
use crate::presentation::DisclosureIcon;

/// Everything needed to draw one visible row.
#[derive(Clone, Copy)]
pub struct TreeRowContext<'a> {
    pub depth: u16,
    pub icon: DisclosureIcon,
    /// Display label, already truncated.
    pub label: &'a str,
    pub zone: Option<DropZone>,
    pub style: Style,
}
