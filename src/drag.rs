#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) of the "insert before" band.
pub const BEFORE_THRESHOLD: f32 = 0.25;
/// Lower bound (exclusive) of the "insert after" band.
pub const AFTER_THRESHOLD: f32 = 0.75;

/// Drop zone within a target row, picked from the vertical pointer offset.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DropZone {
    /// Become the immediate predecessor of the target.
    Before,
    /// Become the immediate successor of the target.
    After,
    /// Become a child of the target.
    Into,
}

impl DropZone {
    /// Classifies a pointer offset relative to the target's height.
    ///
    /// The boundaries 0.25 and 0.75 belong to [`DropZone::Into`]. A target without a
    /// positive height has no meaningful bands and always yields `Into`.
    pub fn classify(offset_y: f32, height: f32) -> Self {
        if height.is_nan() || height <= 0.0 {
            return Self::Into;
        }
        Self::from_area(offset_y / height)
    }

    /// Classifies an already normalized offset (`offset / height`).
    pub fn from_area(area: f32) -> Self {
        if area < BEFORE_THRESHOLD {
            Self::Before
        } else if area > AFTER_THRESHOLD {
            Self::After
        } else {
            Self::Into
        }
    }
}

/// Relocation requested by a drop. The widget never applies it itself.
///
/// `parent` and `reference` mirror the arguments of
/// [`TreeHost::on_move`](crate::TreeHost::on_move):
/// - `Before`: `parent` is the target's parent, `reference` is the target;
/// - `After`: `parent` is the target's parent, `reference` is the target's next
///   sibling (`None` means append at the end);
/// - `Into`: `parent` is the target, `reference` is `None`.
///
/// A `None` parent stands for the top level of the tree.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRequest<V> {
    pub dragged: V,
    pub zone: DropZone,
    pub parent: Option<V>,
    pub reference: Option<V>,
}
