//! Monte Carlo Tree Search over the alternating-game contract.
//!
//! A whole tree is built and discarded per decision, no reuse across turns.
//! Selection is UCB1 with breadth coverage first, expansion branches one full
//! level, rollouts play uniformly random legal actions to termination, and
//! backpropagation applies the zero-sum sign flip at opponent-controlled
//! nodes.

use super::{action::ActionId, agent::Agent, game::AlternatingGame, player::AgentId};
use rand::{rngs::SmallRng, Rng, SeedableRng};

pub const DEFAULT_EXPLORATION: f64 = std::f64::consts::SQRT_2;

/// How the final action is picked from the root's children.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ActionSelection {
    /// Highest visit count; ties go to the first child in child order.
    MaxCount,
    /// Highest mean value (cumulative reward / visit count).
    MaxValue,
}

struct SearchNode<G> {
    parent: Option<usize>,
    game: G,
    action: Option<ActionId>,
    children: Vec<usize>,
    children_visited: usize,
    visits: usize,
    cum_rewards: Vec<f64>,
    agent: AgentId,
}

/// One decision's ephemeral tree, nodes held in an arena indexed by position.
pub struct SearchTree<G: AlternatingGame> {
    arena: Vec<SearchNode<G>>,
    agent: AgentId,
    exploration: f64,
}

impl<G: AlternatingGame> SearchTree<G> {
    /// Build the tree for one decision. The root is fully expanded before
    /// any simulation: one child per currently legal action.
    pub fn new(game: &G, agent: AgentId, exploration: f64) -> Self {
        let root = SearchNode {
            parent: None,
            game: game.clone(),
            action: None,
            children: Vec::new(),
            children_visited: 0,
            visits: 0,
            cum_rewards: vec![0.0; game.num_agents()],
            agent: game.agent_selection(),
        };
        let mut tree = SearchTree {
            arena: vec![root],
            agent,
            exploration,
        };
        for action in game.available_actions() {
            tree.add_child(0, action);
        }
        tree
    }

    fn add_child(&mut self, parent: usize, action: ActionId) -> usize {
        let mut game = self.arena[parent].game.clone();
        game.step(action);
        let agent = game.agent_selection();
        let num_agents = game.num_agents();
        let id = self.arena.len();
        self.arena.push(SearchNode {
            parent: Some(parent),
            game,
            action: Some(action),
            children: Vec::new(),
            children_visited: 0,
            visits: 0,
            cum_rewards: vec![0.0; num_agents],
            agent,
        });
        self.arena[parent].children.push(id);
        id
    }

    /// One simulation: select, expand, roll out, backpropagate, with a fresh
    /// clone of the live game installed on the root.
    pub fn simulate<R: Rng>(&mut self, game: &G, rng: &mut R) {
        self.arena[0].game = game.clone();
        trace!("selection");
        let leaf = self.select();
        trace!("expansion");
        self.expand(leaf);
        trace!("rollout");
        let rewards = self.rollout(leaf, rng);
        trace!("backprop");
        self.backpropagate(leaf, &rewards);
    }

    /// Descend while children exist: the next never-visited child first,
    /// otherwise the UCB1 argmax for the searching agent. The argmax keeps
    /// the first of tied children; the root's priorities stay tied at
    /// infinity forever, so the tie direction decides where simulations go.
    fn select(&self) -> usize {
        let mut current = 0;
        while !self.arena[current].children.is_empty() {
            let node = &self.arena[current];
            if node.children_visited < node.children.len() {
                return node.children[node.children_visited];
            }
            let mut best = node.children[0];
            let mut best_priority = self.ucb(best);
            for &child in &node.children[1..] {
                let priority = self.ucb(child);
                if priority > best_priority {
                    best = child;
                    best_priority = priority;
                }
            }
            current = best;
        }
        current
    }

    fn ucb(&self, id: usize) -> f64 {
        let node = &self.arena[id];
        let parent_visits = self.arena[node.parent.unwrap()].visits;
        if node.visits == 0 || parent_visits == 0 {
            return f64::INFINITY;
        }
        node.cum_rewards[self.agent.index()] / node.visits as f64
            + self.exploration * ((parent_visits as f64).ln() / node.visits as f64).sqrt()
    }

    /// Branch one full level below a non-terminal leaf and mark the leaf's
    /// path as explored once on its parent.
    fn expand(&mut self, id: usize) {
        if self.arena[id].game.game_over() {
            return;
        }
        if let Some(parent) = self.arena[id].parent {
            self.arena[parent].children_visited += 1;
        }
        let actions = self.arena[id].game.available_actions();
        for action in actions {
            self.add_child(id, action);
        }
    }

    /// Play uniformly random legal actions to termination, accumulating every
    /// agent's reward at every step.
    fn rollout<R: Rng>(&self, id: usize, rng: &mut R) -> Vec<f64> {
        let mut game = self.arena[id].game.clone();
        let mut rewards = vec![0.0; game.num_agents()];
        while !game.game_over() {
            let actions = game.available_actions();
            game.step(actions[rng.random_range(0..actions.len())]);
            for agent in game.agents() {
                rewards[agent.index()] += game.current_reward(agent);
            }
        }
        rewards
    }

    /// Walk from `id` up to, but not including, the root; the root itself
    /// accumulates no reward.
    fn backpropagate(&mut self, id: usize, rewards: &[f64]) {
        let mut current = id;
        while let Some(parent) = self.arena[current].parent {
            let node = &mut self.arena[current];
            node.visits += 1;
            let sign = if node.agent == self.agent { 1.0 } else { -1.0 };
            for (cum, reward) in node.cum_rewards.iter_mut().zip(rewards) {
                *cum += sign * reward;
            }
            current = parent;
        }
    }

    /// Final action choice over the root's children; ties go to the first
    /// child in child order.
    pub fn best_action(&self, mode: ActionSelection) -> (ActionId, f64) {
        let mut best: Option<(ActionId, f64)> = None;
        for &child in &self.arena[0].children {
            let node = &self.arena[child];
            let score = match mode {
                ActionSelection::MaxCount => node.visits as f64,
                ActionSelection::MaxValue => self.mean_value(child),
            };
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((node.action.unwrap(), score));
            }
        }
        best.expect("search tree has no root children")
    }

    fn mean_value(&self, id: usize) -> f64 {
        let node = &self.arena[id];
        if node.visits == 0 {
            return f64::NEG_INFINITY;
        }
        node.cum_rewards[self.agent.index()] / node.visits as f64
    }

    /// The root's children as (incoming action, visit count) pairs, in child
    /// order.
    pub fn root_children(&self) -> Vec<(ActionId, usize)> {
        self.arena[0]
            .children
            .iter()
            .map(|&child| {
                let node = &self.arena[child];
                (node.action.unwrap(), node.visits)
            })
            .collect()
    }
}

/// Online per-decision search agent. Every `action` call rebuilds the tree
/// from scratch.
pub struct MctsAgent {
    agent: AgentId,
    simulations: usize,
    exploration: f64,
    mode: ActionSelection,
    rng: SmallRng,
}

impl MctsAgent {
    pub fn new(agent: AgentId, simulations: usize, seed: u64) -> Self {
        MctsAgent {
            agent,
            simulations,
            exploration: DEFAULT_EXPLORATION,
            mode: ActionSelection::MaxCount,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn mode(mut self, mode: ActionSelection) -> Self {
        self.mode = mode;
        self
    }

    pub fn exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        self
    }

    /// One full search from scratch; returns the chosen action and its score
    /// under the configured selection mode.
    pub fn search<G: AlternatingGame>(&mut self, game: &G) -> (ActionId, f64) {
        let mut tree = SearchTree::new(game, self.agent, self.exploration);
        for _ in 0..self.simulations {
            tree.simulate(game, &mut self.rng);
        }
        tree.best_action(self.mode)
    }
}

impl<G: AlternatingGame> Agent<G> for MctsAgent {
    fn action(&mut self, game: &G) -> ActionId {
        self.search(game).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::TicTacToe;

    #[test]
    fn unvisited_children_have_infinite_priority() {
        let game = TicTacToe::new();
        let tree = SearchTree::new(&game, AgentId::new(0), DEFAULT_EXPLORATION);
        for &child in &tree.arena[0].children {
            assert_eq!(tree.ucb(child), f64::INFINITY);
        }
    }

    #[test]
    fn max_count_breaks_ties_in_child_order() {
        let game = TicTacToe::new();
        let mut tree = SearchTree::new(&game, AgentId::new(0), DEFAULT_EXPLORATION);
        let children = tree.arena[0].children.clone();
        for child in children {
            tree.arena[child].visits = 3;
        }
        let first = tree.arena[tree.arena[0].children[0]].action.unwrap();
        let (action, score) = tree.best_action(ActionSelection::MaxCount);
        assert_eq!(action, first);
        assert_eq!(score, 3.0);
    }

    #[test]
    fn exhausted_coverage_selects_the_first_of_tied_children() {
        let game = TicTacToe::new();
        let mut tree = SearchTree::new(&game, AgentId::new(0), DEFAULT_EXPLORATION);
        // every root child has been covered once; all priorities are tied
        // at infinity because the root itself never accumulates visits
        tree.arena[0].children_visited = tree.arena[0].children.len();
        assert_eq!(tree.select(), tree.arena[0].children[0]);
    }

    #[test]
    fn selection_covers_unvisited_children_first() {
        let game = TicTacToe::new();
        let mut tree = SearchTree::new(&game, AgentId::new(0), DEFAULT_EXPLORATION);
        let second = tree.arena[0].children[1];
        tree.arena[0].children_visited = 1;
        assert_eq!(tree.select(), second);
    }
}
