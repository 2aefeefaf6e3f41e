// ABOUTME: Structural invariant checks for a layout tree and its active pane.
// ABOUTME: Reports duplicate ids, out-of-range ratios, and a dangling or non-leaf focus.

use std::collections::HashSet;

use spad_core::PaneId;

use crate::tree::{find_node, PaneNode, MAX_RATIO, MIN_RATIO};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("Node id {0} appears more than once")]
    DuplicateId(PaneId),

    #[error("Split {id} has ratio {ratio}, outside the allowed range")]
    RatioOutOfRange { id: PaneId, ratio: f32 },

    #[error("Active pane {0} is not in the tree")]
    ActivePaneMissing(PaneId),

    #[error("Active pane {0} is a split, not a leaf")]
    ActivePaneNotLeaf(PaneId),
}

/// Check every layout invariant, returning the first violation found
pub fn validate(root: &PaneNode, active: &PaneId) -> Result<(), LayoutError> {
    let mut seen = HashSet::new();
    check_node(root, &mut seen)?;

    match find_node(root, active) {
        None => Err(LayoutError::ActivePaneMissing(active.clone())),
        Some(PaneNode::Split(_)) => Err(LayoutError::ActivePaneNotLeaf(active.clone())),
        Some(PaneNode::Leaf(_)) => Ok(()),
    }
}

fn check_node<'a>(node: &'a PaneNode, seen: &mut HashSet<&'a PaneId>) -> Result<(), LayoutError> {
    if !seen.insert(node.id()) {
        return Err(LayoutError::DuplicateId(node.id().clone()));
    }
    match node {
        PaneNode::Leaf(_) => Ok(()),
        PaneNode::Split(split) => {
            // NaN fails the range check as well
            if !(MIN_RATIO..=MAX_RATIO).contains(&split.ratio) {
                return Err(LayoutError::RatioOutOfRange {
                    id: split.id.clone(),
                    ratio: split.ratio,
                });
            }
            check_node(&split.first, seen)?;
            check_node(&split.second, seen)
        }
    }
}
