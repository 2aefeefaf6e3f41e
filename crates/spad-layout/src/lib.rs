// ABOUTME: Pane layout management for the editor surface.
// ABOUTME: Binary split tree, layout store, geometry, and drag-to-resize.

pub mod drag;
pub mod geometry;
pub mod id;
pub mod store;
pub mod tree;
pub mod validate;

pub use drag::{DragSession, Viewport};
pub use geometry::Rect;
pub use id::{IdGenerator, INITIAL_PANE_ID};
pub use store::{LayoutSnapshot, LayoutStore, SubscriptionId};
pub use tree::{Leaf, PaneNode, Split, MAX_RATIO, MIN_RATIO};
pub use validate::{validate, LayoutError};

pub use spad_core::{Direction, FileId, PaneId};
