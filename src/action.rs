use serde::{Deserialize, Serialize};

/// Index into a game's contiguous action space.
#[derive(Clone, Copy, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct ActionId(usize);

impl ActionId {
    pub const fn new(id: usize) -> Self {
        ActionId(id)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// Probability distribution over a contiguous action space, indexed by action.
pub type Policy = Vec<f64>;
