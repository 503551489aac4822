use serde::{Deserialize, Serialize};

/// Seat of an agent in a game's ordered agent list. The wrapped value is the
/// agent-to-index mapping: seat `k` owns entry `k` of every per-agent vector.
#[derive(Clone, Copy, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct AgentId(usize);

impl AgentId {
    pub fn new(id: usize) -> Self {
        AgentId(id)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}
