// ABOUTME: Stateful owner of the pane tree and the active pane.
// ABOUTME: Every mutation swaps in a new root built by the pure tree functions.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use spad_core::{Direction, FileId, LayoutSettings, PaneId};

use crate::geometry::{self, Rect};
use crate::id::{IdGenerator, INITIAL_PANE_ID};
use crate::tree::{
    all_leaves, clamp_ratio, count_leaves, find_node, find_parent, first_leaf, map_tree,
    replace_node, Leaf, PaneNode, Split, DEFAULT_RATIO,
};

/// Immutable view of the layout handed to readers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSnapshot {
    pub root: Arc<PaneNode>,
    pub active_pane_id: PaneId,
    /// Bumped once per published change
    pub version: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&LayoutSnapshot)>;

pub struct LayoutStore {
    root: Arc<PaneNode>,
    active: PaneId,
    ids: IdGenerator,
    settings: LayoutSettings,
    version: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

fn initial_root() -> Arc<PaneNode> {
    Arc::new(PaneNode::leaf(INITIAL_PANE_ID, None))
}

impl LayoutStore {
    pub fn new() -> Self {
        Self::with_settings(LayoutSettings::default())
    }

    pub fn with_settings(settings: LayoutSettings) -> Self {
        Self {
            root: initial_root(),
            active: PaneId::from(INITIAL_PANE_ID),
            ids: IdGenerator::new(),
            settings,
            version: 0,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn root(&self) -> &Arc<PaneNode> {
        &self.root
    }

    pub fn active_pane_id(&self) -> &PaneId {
        &self.active
    }

    pub fn active_pane(&self) -> Option<&Leaf> {
        find_node(&self.root, &self.active).and_then(PaneNode::as_leaf)
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            root: Arc::clone(&self.root),
            active_pane_id: self.active.clone(),
            version: self.version,
        }
    }

    pub fn is_split(&self) -> bool {
        !self.root.is_leaf()
    }

    pub fn pane_count(&self) -> usize {
        count_leaves(&self.root)
    }

    pub fn leaves(&self) -> Vec<Leaf> {
        all_leaves(&self.root).into_iter().cloned().collect()
    }

    /// Normalized rectangles of every leaf
    pub fn pane_rects(&self) -> HashMap<PaneId, Rect> {
        geometry::pane_rects(&self.root)
    }

    /// Normalized rectangle of a split, `None` for leaves and unknown ids
    pub fn split_rect(&self, split_id: &PaneId) -> Option<Rect> {
        match find_node(&self.root, split_id) {
            Some(PaneNode::Split(_)) => geometry::node_rect(&self.root, split_id),
            _ => None,
        }
    }

    /// Split a leaf in two, returns the new pane's ID.
    ///
    /// The old leaf becomes `first`, the new leaf `second`, and the new leaf
    /// takes focus. Returns `None` for unknown ids, split ids, or when the
    /// configured pane limit is reached.
    pub fn split_pane(
        &mut self,
        pane_id: &PaneId,
        direction: Direction,
        new_file_id: Option<FileId>,
    ) -> Option<PaneId> {
        let old_leaf = match find_node(&self.root, pane_id) {
            Some(PaneNode::Leaf(leaf)) => leaf.clone(),
            Some(PaneNode::Split(_)) => {
                tracing::debug!("Cannot split {}: not a leaf", pane_id);
                return None;
            }
            None => {
                tracing::debug!("Cannot split {}: no such pane", pane_id);
                return None;
            }
        };

        if let Some(max) = self.settings.max_panes {
            if self.pane_count() >= max {
                tracing::warn!("Maximum pane limit ({}) reached", max);
                return None;
            }
        }

        let new_leaf = Leaf {
            id: self.ids.next_pane_id(),
            file_id: new_file_id,
        };
        let new_id = new_leaf.id.clone();
        let split = PaneNode::Split(Split {
            id: self.ids.next_split_id(),
            direction,
            ratio: DEFAULT_RATIO,
            first: Arc::new(PaneNode::Leaf(old_leaf)),
            second: Arc::new(PaneNode::Leaf(new_leaf)),
        });

        self.root = replace_node(&self.root, pane_id, Arc::new(split));
        self.active = new_id.clone();
        tracing::debug!(
            "Split {} {}, new pane {}, total panes: {}",
            pane_id,
            direction,
            new_id,
            self.pane_count()
        );
        self.publish();
        Some(new_id)
    }

    /// Split whichever pane is currently active
    pub fn split_active(
        &mut self,
        direction: Direction,
        new_file_id: Option<FileId>,
    ) -> Option<PaneId> {
        let active = self.active.clone();
        self.split_pane(&active, direction, new_file_id)
    }

    /// Close a pane; its parent split collapses into the surviving sibling.
    ///
    /// The last remaining pane cannot be closed.
    pub fn close_pane(&mut self, pane_id: &PaneId) {
        if self.pane_count() <= 1 {
            tracing::debug!("Refusing to close {}: last pane", pane_id);
            return;
        }
        let Some(parent) = find_parent(&self.root, pane_id) else {
            tracing::debug!("Cannot close {}: no such pane", pane_id);
            return;
        };

        let sibling = if parent.first.id() == pane_id {
            Arc::clone(&parent.second)
        } else {
            Arc::clone(&parent.first)
        };
        let parent_id = parent.id.clone();

        self.root = replace_node(&self.root, &parent_id, Arc::clone(&sibling));

        // Closing a split id removes a whole subtree, which may hold the focus
        let focus_lost = !matches!(find_node(&self.root, &self.active), Some(PaneNode::Leaf(_)));
        if &self.active == pane_id || focus_lost {
            self.active = first_leaf(&sibling).id.clone();
        }

        tracing::debug!(
            "Closed {}, remaining panes: {}",
            pane_id,
            self.pane_count()
        );
        self.publish();
    }

    /// Set a split's ratio, clamped into the allowed range
    pub fn set_ratio(&mut self, split_id: &PaneId, ratio: f32) {
        if ratio.is_nan() {
            tracing::debug!("Ignoring NaN ratio for {}", split_id);
            return;
        }
        let ratio = clamp_ratio(ratio);

        let root = map_tree(&self.root, &mut |node: &PaneNode| match node {
            PaneNode::Split(split) if &split.id == split_id && split.ratio != ratio => {
                Some(PaneNode::Split(Split {
                    ratio,
                    ..split.clone()
                }))
            }
            _ => None,
        });

        if !Arc::ptr_eq(&root, &self.root) {
            self.root = root;
            self.publish();
        }
    }

    /// Shift a split's ratio by `delta`, for keyboard resizing
    pub fn adjust_ratio(&mut self, split_id: &PaneId, delta: f32) {
        let current = match find_node(&self.root, split_id) {
            Some(PaneNode::Split(split)) => split.ratio,
            _ => return,
        };
        self.set_ratio(split_id, current + delta);
    }

    /// Show a file in a pane, or empty it with `None`
    pub fn set_pane_file(&mut self, pane_id: &PaneId, file_id: Option<FileId>) {
        let root = map_tree(&self.root, &mut |node: &PaneNode| match node {
            PaneNode::Leaf(leaf) if &leaf.id == pane_id && leaf.file_id != file_id => {
                Some(PaneNode::Leaf(Leaf {
                    id: leaf.id.clone(),
                    file_id: file_id.clone(),
                }))
            }
            _ => None,
        });

        if !Arc::ptr_eq(&root, &self.root) {
            self.root = root;
            tracing::debug!("Pane {} now shows {:?}", pane_id, file_id);
            self.publish();
        }
    }

    /// Focus a pane. Only leaf ids are accepted.
    pub fn set_active_pane(&mut self, pane_id: &PaneId) {
        match find_node(&self.root, pane_id) {
            Some(PaneNode::Leaf(_)) if &self.active != pane_id => {
                self.active = pane_id.clone();
                tracing::debug!("Focus changed to pane {}", pane_id);
                self.publish();
            }
            Some(PaneNode::Leaf(_)) => {}
            Some(PaneNode::Split(_)) => {
                tracing::debug!("Cannot focus {}: not a leaf", pane_id);
            }
            None => {
                tracing::debug!("Cannot focus {}: no such pane", pane_id);
            }
        }
    }

    /// Focus the next leaf in left-to-right order, wrapping around
    pub fn focus_next(&mut self) {
        self.cycle_focus(1);
    }

    /// Focus the previous leaf in left-to-right order, wrapping around
    pub fn focus_prev(&mut self) {
        self.cycle_focus(-1);
    }

    fn cycle_focus(&mut self, step: isize) {
        let leaves = all_leaves(&self.root);
        if leaves.len() < 2 {
            return;
        }
        let current = leaves
            .iter()
            .position(|leaf| leaf.id == self.active)
            .unwrap_or(0);
        let next = (current as isize + step).rem_euclid(leaves.len() as isize) as usize;
        let target = leaves[next].id.clone();
        self.set_active_pane(&target);
    }

    /// Back to a single empty pane; id numbering starts over
    pub fn reset(&mut self) {
        self.ids.reset();
        self.root = initial_root();
        self.active = PaneId::from(INITIAL_PANE_ID);
        tracing::debug!("Layout reset");
        self.publish();
    }

    /// Register a callback run after every state change
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&LayoutSnapshot) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn publish(&mut self) {
        debug_assert_eq!(
            crate::validate::validate(&self.root, &self.active),
            Ok(()),
            "layout invariant broken"
        );
        self.version += 1;
        if self.listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for (_, listener) in &mut self.listeners {
            listener(&snapshot);
        }
    }
}

impl Default for LayoutStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LayoutStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutStore")
            .field("root", &self.root)
            .field("active", &self.active)
            .field("ids", &self.ids)
            .field("settings", &self.settings)
            .field("version", &self.version)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
