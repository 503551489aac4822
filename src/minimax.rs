use super::{action::ActionId, agent::Agent, game::AlternatingGame, player::AgentId};
use ord_subset::OrdSubsetIterExt;

/// Fixed-depth adversarial search: maximize on the owning agent's turns,
/// minimize on everyone else's, falling back to the game's heuristic when the
/// depth budget runs out.
pub struct MinimaxAgent {
    agent: AgentId,
    depth: usize,
}

impl MinimaxAgent {
    pub fn new(agent: AgentId, depth: usize) -> Self {
        MinimaxAgent { agent, depth }
    }

    fn value<G: AlternatingGame>(&self, game: &G, depth: usize) -> f64 {
        if game.game_over() {
            return game.reward(self.agent);
        }
        if depth == 0 {
            return game.evaluate(self.agent);
        }
        let values = game.available_actions().into_iter().map(|action| {
            let mut child = game.clone();
            child.step(action);
            self.value(&child, depth - 1)
        });
        if game.agent_selection() == self.agent {
            values.ord_subset_max().unwrap()
        } else {
            values.ord_subset_min().unwrap()
        }
    }
}

impl<G: AlternatingGame> Agent<G> for MinimaxAgent {
    fn action(&mut self, game: &G) -> ActionId {
        game.available_actions()
            .into_iter()
            .ord_subset_max_by_key(|&action| {
                let mut child = game.clone();
                child.step(action);
                self.value(&child, self.depth)
            })
            .expect("no legal actions")
    }
}
