// ABOUTME: Node identifier generation for the pane tree.
// ABOUTME: Ids combine a resettable counter with a short random suffix.

use rand::Rng;
use spad_core::PaneId;

/// Id of the single leaf every fresh layout starts with
pub const INITIAL_PANE_ID: &str = "pane-initial";

pub const PANE_PREFIX: &str = "pane";
pub const SPLIT_PREFIX: &str = "split";

const SUFFIX_LEN: usize = 6;
const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Produces `<prefix>-<counter>-<suffix>` ids.
///
/// The suffix keeps ids from separate sessions apart when their counters
/// line up; within one generator the counter alone is unique.
#[derive(Debug, Default)]
pub struct IdGenerator {
    counter: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_pane_id(&mut self) -> PaneId {
        self.next_id(PANE_PREFIX)
    }

    pub fn next_split_id(&mut self) -> PaneId {
        self.next_id(SPLIT_PREFIX)
    }

    pub fn next_id(&mut self, prefix: &str) -> PaneId {
        self.counter += 1;
        let mut rng = rand::rng();
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| SUFFIX_ALPHABET[rng.random_range(0..SUFFIX_ALPHABET.len())] as char)
            .collect();
        PaneId::new(format!("{}-{}-{}", prefix, self.counter, suffix))
    }

    /// Number of ids handed out since creation or the last reset
    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn reset(&mut self) {
        self.counter = 0;
    }
}
