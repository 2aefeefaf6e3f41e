// ABOUTME: Drag-to-resize sessions for split dividers.
// ABOUTME: Converts pointer deltas in pixels into clamped split ratios.

use spad_core::{Direction, PaneId};

use crate::store::LayoutStore;
use crate::tree::{clamp_ratio, find_node, PaneNode};

/// Pixel size of the whole editing surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// One pointer-down to pointer-up interaction on a divider.
///
/// Every `update` applies a complete ratio, so dropping the session at any
/// point leaves a consistent layout.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    split_id: PaneId,
    direction: Direction,
    start_ratio: f32,
    extent_px: f32,
}

impl DragSession {
    /// Start dragging the divider of `split_id`; `None` for leaves,
    /// unknown ids, or a viewport with no size along the split axis
    pub fn begin(store: &LayoutStore, split_id: &PaneId, viewport: Viewport) -> Option<Self> {
        let (direction, start_ratio) = match find_node(store.root(), split_id) {
            Some(PaneNode::Split(split)) => (split.direction, split.ratio),
            _ => return None,
        };
        let rect = store.split_rect(split_id)?;
        let extent_px = match direction {
            Direction::Horizontal => viewport.width,
            Direction::Vertical => viewport.height,
        } * rect.extent(direction);

        if extent_px.is_nan() || extent_px <= 0.0 {
            return None;
        }

        Some(Self {
            split_id: split_id.clone(),
            direction,
            start_ratio,
            extent_px,
        })
    }

    pub fn split_id(&self) -> &PaneId {
        &self.split_id
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Ratio the split would get for a pointer offset of `delta_px`.
    ///
    /// `None` for NaN or infinite offsets.
    pub fn ratio_for(&self, delta_px: f32) -> Option<f32> {
        if !delta_px.is_finite() {
            return None;
        }
        Some(clamp_ratio(self.start_ratio + delta_px / self.extent_px))
    }

    /// Apply the pointer offset since `begin`, returns the ratio applied.
    ///
    /// `None` when the offset is not finite or the split no longer exists;
    /// the layout is left unchanged in both cases.
    pub fn update(&self, store: &mut LayoutStore, delta_px: f32) -> Option<f32> {
        let ratio = self.ratio_for(delta_px)?;
        if !matches!(find_node(store.root(), &self.split_id), Some(PaneNode::Split(_))) {
            return None;
        }
        store.set_ratio(&self.split_id, ratio);
        Some(ratio)
    }
}
