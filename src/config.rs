#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Geometry settings used for scrolling and hit testing.
///
/// Units are whatever the host measures rows in: pixels for graphical hosts,
/// cells for terminals.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeConfig {
    /// Height of one rendered row.
    pub row_height: f32,
    /// Space kept between a newly selected row and the viewport edge.
    pub scroll_padding: f32,
}

impl TreeConfig {
    /// Pixel geometry: 24px rows with 8px padding.
    pub const fn pixels() -> Self {
        Self {
            row_height: 24.0,
            scroll_padding: 8.0,
        }
    }

    /// Terminal geometry: one cell per row, no padding.
    pub const fn cells() -> Self {
        Self {
            row_height: 1.0,
            scroll_padding: 0.0,
        }
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::pixels()
    }
}

/// Scroll position and size of the container showing the tree.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub scroll_top: f32,
    /// Zero means no container is attached yet; scrolling is skipped.
    pub height: f32,
}

impl Viewport {
    pub const fn new(scroll_top: f32, height: f32) -> Self {
        Self { scroll_top, height }
    }

    /// Scrolls the minimum amount that brings `[top, bottom)` into view.
    ///
    /// Returns `true` if the scroll position changed.
    pub fn scroll_into_view(&mut self, top: f32, bottom: f32, padding: f32) -> bool {
        if self.height <= 0.0 {
            return false;
        }
        let min_scroll = bottom - self.height;
        let next = if self.scroll_top > top {
            top - padding
        } else if self.scroll_top < min_scroll {
            min_scroll + padding
        } else {
            return false;
        };
        let next = next.max(0.0);
        let changed = (next - self.scroll_top).abs() > f32::EPSILON;
        self.scroll_top = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolls_up_with_padding() {
        let mut viewport = Viewport::new(200.0, 100.0);

        assert!(viewport.scroll_into_view(120.0, 144.0, 8.0));
        assert!((viewport.scroll_top - 112.0).abs() < f32::EPSILON);
    }

    #[test]
    fn scrolls_down_with_padding() {
        let mut viewport = Viewport::new(0.0, 100.0);

        assert!(viewport.scroll_into_view(120.0, 144.0, 8.0));
        assert!((viewport.scroll_top - 52.0).abs() < f32::EPSILON);
    }

    #[test]
    fn leaves_visible_rows_alone() {
        let mut viewport = Viewport::new(50.0, 100.0);

        assert!(!viewport.scroll_into_view(72.0, 96.0, 8.0));
        assert!((viewport.scroll_top - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn never_scrolls_above_origin() {
        let mut viewport = Viewport::new(10.0, 100.0);

        viewport.scroll_into_view(0.0, 24.0, 8.0);
        assert!(viewport.scroll_top.abs() < f32::EPSILON);
    }

    #[test]
    fn detached_viewport_is_ignored() {
        let mut viewport = Viewport::default();

        assert!(!viewport.scroll_into_view(480.0, 504.0, 8.0));
        assert!(viewport.scroll_top.abs() < f32::EPSILON);
    }
}
