//! Counterfactual Regret Minimization with sampled opponents.
//!
//! The trainer repeatedly walks cloned copies of its game, enumerating every
//! action on the learning agent's own turns and stepping everyone else's
//! turns with a single sample from their learned policy. Convergence is
//! therefore probabilistic, as with any Monte Carlo CFR variant.

use super::{
    action::{ActionId, Policy},
    agent::Agent,
    game::AlternatingGame,
    node::Node,
    player::AgentId,
};
use indicatif::ProgressIterator;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::collections::BTreeMap;

/// Learns a per-information-set strategy by self-play.
///
/// Owns the information-set table explicitly so that multiple trainers can
/// coexist; the table grows monotonically and is never pruned.
pub struct CfrTrainer<G: AlternatingGame> {
    game: G,
    nodes: BTreeMap<G::Observation, Node>,
    rng: SmallRng,
}

impl<G: AlternatingGame> CfrTrainer<G> {
    pub fn new(game: G, seed: u64) -> Self {
        CfrTrainer {
            game,
            nodes: BTreeMap::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Run `iterations` full iterations, no early stopping.
    pub fn train(&mut self, iterations: usize) {
        for _ in (0..iterations).progress() {
            self.iteration();
        }
        info!(
            "trained {} iterations over {} information sets",
            iterations,
            self.nodes.len()
        );
    }

    /// One iteration: a single reset, then a traversal of that same start
    /// state from every agent's perspective, each followed by an
    /// average-policy advance on every node in the table, so the averaging
    /// denominators move globally and uniformly.
    fn iteration(&mut self) {
        self.game.reset();
        for learner in self.game.agents() {
            let game = self.game.clone();
            let reach = vec![1.0; game.num_agents()];
            let _ = self.traverse(game, learner, reach);

            for node in self.nodes.values_mut() {
                node.advance_average_policy();
            }
        }
    }

    /// Recursive traversal from `learner`'s perspective. `reach` holds one
    /// entry per agent: that agent's probability contribution to reaching the
    /// current state.
    ///
    /// Non-learner turns are resolved by single-sample stepping within this
    /// call frame; the learner's turn recurses into every legal action and
    /// returns the node utility directly, so the value propagated upward is
    /// always an explicit return.
    fn traverse(&mut self, mut game: G, learner: AgentId, reach: Vec<f64>) -> f64 {
        loop {
            if game.game_over() {
                return game.reward(learner);
            }
            let actor = game.agent_selection();
            if actor != learner {
                let action = self.choose_action(&game, actor);
                game.step(action);
                continue;
            }

            let obs = game.observe(learner);
            let num_actions = game.num_actions(learner);
            let curr_policy: Policy = self
                .nodes
                .entry(obs.clone())
                .or_insert_with(|| Node::new(learner, num_actions))
                .current_policy()
                .clone();

            let mut utility = vec![0.0; num_actions];
            let mut node_utility = 0.0;
            for action in game.available_actions() {
                let mut child = game.clone();
                child.step(action);
                let mut child_reach = reach.clone();
                child_reach[learner.index()] *= curr_policy[action.index()];
                utility[action.index()] = self.traverse(child, learner, child_reach);
                node_utility += curr_policy[action.index()] * utility[action.index()];
            }

            // counterfactual reach: every agent's contribution but the learner's own
            let probability: f64 = reach
                .iter()
                .enumerate()
                .filter(|(seat, _)| *seat != learner.index())
                .map(|(_, pr)| pr)
                .product();

            let node = self.nodes.get_mut(&obs).unwrap();
            node.accumulate_regret(&utility, node_utility, probability);
            node.refresh_current_policy();
            return node_utility;
        }
    }

    /// Sample one action from `agent`'s learned policy, or a uniformly
    /// random legal action when its observation has no node yet. Shared by
    /// opponent sampling during traversal and by the public entry point.
    pub fn choose_action(&mut self, game: &G, agent: AgentId) -> ActionId {
        let obs = game.observe(agent);
        match self.nodes.get(&obs) {
            Some(node) => sample(node.policy(), &mut self.rng),
            None => {
                debug!("no information set for {:?}, playing random", obs);
                let actions = game.available_actions();
                actions[self.rng.random_range(0..actions.len())]
            }
        }
    }

    pub fn node(&self, obs: &G::Observation) -> Option<&Node> {
        self.nodes.get(obs)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Snapshot of observation -> learned policy, for reporting.
    pub fn learned_profile(&self) -> BTreeMap<G::Observation, Policy> {
        self.nodes
            .iter()
            .map(|(obs, node)| (obs.clone(), node.policy().clone()))
            .collect()
    }
}

impl<G: AlternatingGame> Agent<G> for CfrTrainer<G> {
    fn action(&mut self, game: &G) -> ActionId {
        self.choose_action(game, game.agent_selection())
    }
}

/// Draw one action index from a categorical distribution. Probability mass
/// the walk does not cover falls on the last action, so a learned policy
/// whose averaging denominator still lags sums below one stays total.
fn sample(policy: &[f64], rng: &mut SmallRng) -> ActionId {
    let mut x = rng.random::<f64>();
    for (id, pr) in policy.iter().enumerate() {
        if x < *pr {
            return ActionId::new(id);
        }
        x -= pr;
    }
    ActionId::new(policy.len() - 1)
}
