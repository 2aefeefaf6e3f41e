// ABOUTME: Property tests for the layout store.
// ABOUTME: Replays random operation streams and checks tree invariants after every step.

use proptest::prelude::*;
use spad_layout::tree::{all_leaves, find_node};
use spad_layout::{
    validate, Direction, FileId, LayoutStore, PaneId, PaneNode, MAX_RATIO, MIN_RATIO,
};

#[derive(Debug, Clone)]
enum Op {
    Split {
        target: usize,
        direction: Direction,
        file: Option<u8>,
    },
    SplitActive {
        direction: Direction,
    },
    Close {
        target: usize,
    },
    SetRatio {
        target: usize,
        ratio: f32,
    },
    SetFile {
        target: usize,
        file: Option<u8>,
    },
    Focus { target: usize },
    FocusNext,
    Reset,
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Horizontal), Just(Direction::Vertical)]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (any::<usize>(), direction(), proptest::option::of(any::<u8>()))
            .prop_map(|(target, direction, file)| Op::Split { target, direction, file }),
        2 => direction().prop_map(|direction| Op::SplitActive { direction }),
        3 => any::<usize>().prop_map(|target| Op::Close { target }),
        3 => (any::<usize>(), -1.0f32..2.0)
            .prop_map(|(target, ratio)| Op::SetRatio { target, ratio }),
        1 => (any::<usize>(), proptest::option::of(any::<u8>()))
            .prop_map(|(target, file)| Op::SetFile { target, file }),
        2 => any::<usize>().prop_map(|target| Op::Focus { target }),
        1 => Just(Op::FocusNext),
        1 => Just(Op::Reset),
    ]
}

/// Every node id in pre-order, so targets can hit leaves and splits alike
fn node_ids(node: &PaneNode) -> Vec<PaneId> {
    let mut out = vec![node.id().clone()];
    if let PaneNode::Split(split) = node {
        out.extend(node_ids(&split.first));
        out.extend(node_ids(&split.second));
    }
    out
}

fn pick(store: &LayoutStore, index: usize) -> PaneId {
    let ids = node_ids(store.root());
    // Occasionally aim at an id that does not exist
    if index % 11 == 0 {
        return PaneId::from("missing-pane");
    }
    ids[index % ids.len()].clone()
}

fn apply(store: &mut LayoutStore, op: &Op) {
    match op {
        Op::Split {
            target,
            direction,
            file,
        } => {
            let target = pick(store, *target);
            let file = file.map(|f| FileId::new(format!("file-{f}")));
            store.split_pane(&target, *direction, file);
        }
        Op::SplitActive { direction } => {
            store.split_active(*direction, None);
        }
        Op::Close { target } => {
            let target = pick(store, *target);
            store.close_pane(&target);
        }
        Op::SetRatio { target, ratio } => {
            let target = pick(store, *target);
            store.set_ratio(&target, *ratio);
        }
        Op::SetFile { target, file } => {
            let target = pick(store, *target);
            store.set_pane_file(&target, file.map(|f| FileId::new(format!("file-{f}"))));
        }
        Op::Focus { target } => {
            let target = pick(store, *target);
            store.set_active_pane(&target);
        }
        Op::FocusNext => store.focus_next(),
        Op::Reset => store.reset(),
    }
}

fn check_ratios(node: &PaneNode) {
    if let PaneNode::Split(split) = node {
        assert!((MIN_RATIO..=MAX_RATIO).contains(&split.ratio), "ratio {}", split.ratio);
        check_ratios(&split.first);
        check_ratios(&split.second);
    }
}

proptest! {
    #[test]
    fn invariants_hold_for_any_operation_sequence(ops in prop::collection::vec(op(), 1..60)) {
        let mut store = LayoutStore::new();
        for op in &ops {
            apply(&mut store, op);

            prop_assert!(store.pane_count() >= 1);
            check_ratios(store.root());
            prop_assert!(store
                .leaves()
                .iter()
                .any(|leaf| &leaf.id == store.active_pane_id()));
            prop_assert_eq!(validate(store.root(), store.active_pane_id()), Ok(()));
        }
    }

    #[test]
    fn split_then_close_restores_shape(
        ops in prop::collection::vec(op(), 0..30),
        target in any::<usize>(),
        direction in direction(),
    ) {
        let mut store = LayoutStore::new();
        for op in &ops {
            apply(&mut store, op);
        }

        let leaves = store.leaves();
        let original = leaves[target % leaves.len()].clone();
        let count = store.pane_count();
        let before = store.root().clone();

        let new_id = store.split_pane(&original.id, direction, None).unwrap();
        prop_assert_eq!(store.pane_count(), count + 1);
        store.close_pane(&new_id);

        prop_assert_eq!(store.pane_count(), count);
        prop_assert_eq!(store.root(), &before);
        let restored = find_node(store.root(), &original.id).and_then(PaneNode::as_leaf);
        prop_assert_eq!(restored, Some(&original));
    }

    #[test]
    fn set_ratio_twice_equals_once(
        ops in prop::collection::vec(op(), 0..30),
        target in any::<usize>(),
        ratio in -1.0f32..2.0,
    ) {
        let mut store = LayoutStore::new();
        for op in &ops {
            apply(&mut store, op);
        }
        let id = pick(&store, target);

        store.set_ratio(&id, ratio);
        let once = store.snapshot();
        store.set_ratio(&id, ratio);
        prop_assert_eq!(store.snapshot(), once);
    }

    #[test]
    fn close_never_empties_the_layout(
        ops in prop::collection::vec(op(), 0..30),
    ) {
        let mut store = LayoutStore::new();
        for op in &ops {
            apply(&mut store, op);
        }
        let ids: Vec<PaneId> = all_leaves(store.root()).iter().map(|l| l.id.clone()).collect();
        for id in ids {
            store.close_pane(&id);
            prop_assert!(store.pane_count() >= 1);
        }
        prop_assert_eq!(store.pane_count(), 1);
    }
}
