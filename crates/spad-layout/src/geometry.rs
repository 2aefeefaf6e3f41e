// ABOUTME: Normalized rectangles for panes and splits.
// ABOUTME: Divides the unit square along each split's direction and ratio.

use std::collections::HashMap;

use serde::Serialize;
use spad_core::{Direction, PaneId};

use crate::tree::PaneNode;

/// Rectangle in normalized coordinates (0.0 to 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn full() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
        }
    }

    /// Extent along the axis a split of `direction` divides
    pub fn extent(&self, direction: Direction) -> f32 {
        match direction {
            Direction::Horizontal => self.width,
            Direction::Vertical => self.height,
        }
    }

    /// Divide into the areas of a split's first and second child
    pub fn divide(&self, direction: Direction, ratio: f32) -> (Rect, Rect) {
        match direction {
            Direction::Horizontal => (
                Rect {
                    x: self.x,
                    y: self.y,
                    width: self.width * ratio,
                    height: self.height,
                },
                Rect {
                    x: self.x + self.width * ratio,
                    y: self.y,
                    width: self.width * (1.0 - ratio),
                    height: self.height,
                },
            ),
            Direction::Vertical => (
                Rect {
                    x: self.x,
                    y: self.y,
                    width: self.width,
                    height: self.height * ratio,
                },
                Rect {
                    x: self.x,
                    y: self.y + self.height * ratio,
                    width: self.width,
                    height: self.height * (1.0 - ratio),
                },
            ),
        }
    }
}

/// Layout rectangles of every leaf
pub fn pane_rects(root: &PaneNode) -> HashMap<PaneId, Rect> {
    let mut result = HashMap::new();
    collect_rects(root, Rect::full(), &mut result);
    result
}

fn collect_rects(node: &PaneNode, rect: Rect, out: &mut HashMap<PaneId, Rect>) {
    match node {
        PaneNode::Leaf(leaf) => {
            out.insert(leaf.id.clone(), rect);
        }
        PaneNode::Split(split) => {
            let (first_rect, second_rect) = rect.divide(split.direction, split.ratio);
            collect_rects(&split.first, first_rect, out);
            collect_rects(&split.second, second_rect, out);
        }
    }
}

/// Rectangle occupied by any node, leaf or split
pub fn node_rect(root: &PaneNode, id: &PaneId) -> Option<Rect> {
    find_rect(root, id, Rect::full())
}

fn find_rect(node: &PaneNode, id: &PaneId, rect: Rect) -> Option<Rect> {
    if node.id() == id {
        return Some(rect);
    }
    match node {
        PaneNode::Leaf(_) => None,
        PaneNode::Split(split) => {
            let (first_rect, second_rect) = rect.divide(split.direction, split.ratio);
            find_rect(&split.first, id, first_rect)
                .or_else(|| find_rect(&split.second, id, second_rect))
        }
    }
}
