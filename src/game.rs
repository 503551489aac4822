use super::{action::ActionId, player::AgentId};
use std::fmt::Debug;

/// Contract between the search/learning engines and a concrete game.
///
/// `Clone` must produce an independent deep copy: mutating a clone never
/// affects the original. Both engines rely on this for per-branch and
/// per-simulation value semantics.
pub trait AlternatingGame: Clone {
    /// Stable, information-set-distinguishing key for one agent's view of the
    /// state. Two distinct information sets mapping to the same key corrupt
    /// learning.
    type Observation: Clone + Ord + Debug;

    /// Re-initialize to a fresh start state (possibly stochastic, e.g. a
    /// card deal drawn from the game's own rng).
    fn reset(&mut self);

    /// Apply a legal action for the current actor and advance the turn.
    /// Panics if the game is already over.
    fn step(&mut self, action: ActionId);

    fn observe(&self, agent: AgentId) -> Self::Observation;

    /// Legal actions for the current actor. Non-empty until the game is
    /// terminal; an empty set while non-terminal is a configuration error of
    /// the game, not recoverable by the engines.
    fn available_actions(&self) -> Vec<ActionId>;

    fn game_over(&self) -> bool;

    /// Terminal reward for `agent`. Defined only once `game_over()` is true;
    /// implementations panic before that.
    fn reward(&self, agent: AgentId) -> f64;

    /// The agent whose turn it is.
    fn agent_selection(&self) -> AgentId;

    fn num_agents(&self) -> usize;

    /// Action-space size for `agent`; sizes the regret vectors.
    fn num_actions(&self, agent: AgentId) -> usize;

    /// Ordered agent list, seat 0 first.
    fn agents(&self) -> Vec<AgentId> {
        (0..self.num_agents()).map(AgentId::new).collect()
    }

    /// Reward accrued by `agent` at the current state: the terminal reward
    /// once the game is over, zero mid-game. Games carrying intermediate
    /// rewards override this; rollouts accumulate it at every step.
    fn current_reward(&self, agent: AgentId) -> f64 {
        if self.game_over() {
            self.reward(agent)
        } else {
            0.0
        }
    }

    /// Heuristic value of a non-terminal state for depth-limited search.
    fn evaluate(&self, _agent: AgentId) -> f64 {
        0.0
    }
}
