// ABOUTME: Binary tree structure for editor pane layout.
// ABOUTME: Pure queries and path-copying transformations over shared, immutable nodes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use spad_core::{Direction, FileId, PaneId};

/// Smallest share of a split either child may receive
pub const MIN_RATIO: f32 = 0.2;
/// Largest share of a split the first child may receive
pub const MAX_RATIO: f32 = 0.8;
/// Ratio given to freshly created splits
pub const DEFAULT_RATIO: f32 = 0.5;

/// Clamp a ratio into `[MIN_RATIO, MAX_RATIO]`
pub fn clamp_ratio(ratio: f32) -> f32 {
    ratio.clamp(MIN_RATIO, MAX_RATIO)
}

/// A visible editing surface, optionally showing a file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaf {
    pub id: PaneId,
    pub file_id: Option<FileId>,
}

/// Two sub-panes dividing their area along `direction`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    pub id: PaneId,
    pub direction: Direction,
    /// Fraction of the area given to `first`
    pub ratio: f32,
    pub first: Arc<PaneNode>,
    pub second: Arc<PaneNode>,
}

impl Split {
    /// Same split with different children
    fn with_children(&self, first: Arc<PaneNode>, second: Arc<PaneNode>) -> Split {
        Split {
            id: self.id.clone(),
            direction: self.direction,
            ratio: self.ratio,
            first,
            second,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PaneNode {
    Leaf(Leaf),
    Split(Split),
}

impl PaneNode {
    pub fn leaf(id: impl Into<PaneId>, file_id: Option<FileId>) -> Self {
        PaneNode::Leaf(Leaf {
            id: id.into(),
            file_id,
        })
    }

    /// Build a split node; `ratio` is clamped into the allowed range
    pub fn split(
        id: impl Into<PaneId>,
        direction: Direction,
        ratio: f32,
        first: PaneNode,
        second: PaneNode,
    ) -> Self {
        PaneNode::Split(Split {
            id: id.into(),
            direction,
            ratio: clamp_ratio(ratio),
            first: Arc::new(first),
            second: Arc::new(second),
        })
    }

    pub fn id(&self) -> &PaneId {
        match self {
            PaneNode::Leaf(leaf) => &leaf.id,
            PaneNode::Split(split) => &split.id,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, PaneNode::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            PaneNode::Leaf(leaf) => Some(leaf),
            PaneNode::Split(_) => None,
        }
    }

    pub fn as_split(&self) -> Option<&Split> {
        match self {
            PaneNode::Leaf(_) => None,
            PaneNode::Split(split) => Some(split),
        }
    }
}

/// Depth-first search for the node with the given id
pub fn find_node<'a>(root: &'a PaneNode, id: &PaneId) -> Option<&'a PaneNode> {
    if root.id() == id {
        return Some(root);
    }
    match root {
        PaneNode::Leaf(_) => None,
        PaneNode::Split(split) => {
            find_node(&split.first, id).or_else(|| find_node(&split.second, id))
        }
    }
}

/// The split whose direct child has the given id.
///
/// `None` when `id` is the root or is not in the tree.
pub fn find_parent<'a>(root: &'a PaneNode, id: &PaneId) -> Option<&'a Split> {
    match root {
        PaneNode::Leaf(_) => None,
        PaneNode::Split(split) => {
            if split.first.id() == id || split.second.id() == id {
                Some(split)
            } else {
                find_parent(&split.first, id).or_else(|| find_parent(&split.second, id))
            }
        }
    }
}

/// Return a tree where the subtree with `id` is swapped for `replacement`.
///
/// Only the path from the root to the target is rebuilt; every other subtree
/// is shared with `root`. An unknown id returns `root` itself.
pub fn replace_node(
    root: &Arc<PaneNode>,
    id: &PaneId,
    replacement: Arc<PaneNode>,
) -> Arc<PaneNode> {
    replace_in(root, id, &replacement).unwrap_or_else(|| Arc::clone(root))
}

fn replace_in(
    node: &Arc<PaneNode>,
    id: &PaneId,
    replacement: &Arc<PaneNode>,
) -> Option<Arc<PaneNode>> {
    if node.id() == id {
        return Some(Arc::clone(replacement));
    }
    match &**node {
        PaneNode::Leaf(_) => None,
        PaneNode::Split(split) => {
            if let Some(first) = replace_in(&split.first, id, replacement) {
                let rebuilt = split.with_children(first, Arc::clone(&split.second));
                return Some(Arc::new(PaneNode::Split(rebuilt)));
            }
            replace_in(&split.second, id, replacement).map(|second| {
                let rebuilt = split.with_children(Arc::clone(&split.first), second);
                Arc::new(PaneNode::Split(rebuilt))
            })
        }
    }
}

/// Apply `f` to every node in pre-order.
///
/// `f` returns `Some(patched)` to replace a node or `None` to keep it. If the
/// (possibly patched) node is a split, its children are visited next. Paths
/// that `f` leaves untouched stay shared with `root`.
pub fn map_tree<F>(root: &Arc<PaneNode>, f: &mut F) -> Arc<PaneNode>
where
    F: FnMut(&PaneNode) -> Option<PaneNode>,
{
    let node = match f(&**root) {
        Some(patched) => Arc::new(patched),
        None => Arc::clone(root),
    };

    let rebuilt = match &*node {
        PaneNode::Leaf(_) => None,
        PaneNode::Split(split) => {
            let first = map_tree(&split.first, f);
            let second = map_tree(&split.second, f);
            if Arc::ptr_eq(&first, &split.first) && Arc::ptr_eq(&second, &split.second) {
                None
            } else {
                Some(Arc::new(PaneNode::Split(split.with_children(first, second))))
            }
        }
    };
    rebuilt.unwrap_or(node)
}

pub fn count_leaves(root: &PaneNode) -> usize {
    match root {
        PaneNode::Leaf(_) => 1,
        PaneNode::Split(split) => count_leaves(&split.first) + count_leaves(&split.second),
    }
}

/// Follow `first` children down to a leaf
pub fn first_leaf(root: &PaneNode) -> &Leaf {
    match root {
        PaneNode::Leaf(leaf) => leaf,
        PaneNode::Split(split) => first_leaf(&split.first),
    }
}

/// Every leaf, left to right
pub fn all_leaves(root: &PaneNode) -> Vec<&Leaf> {
    let mut result = Vec::new();
    collect_leaves(root, &mut result);
    result
}

fn collect_leaves<'a>(node: &'a PaneNode, out: &mut Vec<&'a Leaf>) {
    match node {
        PaneNode::Leaf(leaf) => out.push(leaf),
        PaneNode::Split(split) => {
            collect_leaves(&split.first, out);
            collect_leaves(&split.second, out);
        }
    }
}
