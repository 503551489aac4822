use super::{action::ActionId, game::AlternatingGame};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::io::{self, Write};

/// Uniform dispatch over decision-makers: the regret-minimizing trainer, the
/// tree-search agents, and the thin baseline agents all pick one action for
/// the live game's current state.
pub trait Agent<G: AlternatingGame> {
    fn action(&mut self, game: &G) -> ActionId;
}

/// Picks a uniformly random legal action.
pub struct RandomAgent {
    rng: SmallRng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        RandomAgent {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl<G: AlternatingGame> Agent<G> for RandomAgent {
    fn action(&mut self, game: &G) -> ActionId {
        let actions = game.available_actions();
        actions[self.rng.random_range(0..actions.len())]
    }
}

/// Reads an action index from stdin, re-prompting until it is legal.
pub struct InputAgent;

impl<G: AlternatingGame> Agent<G> for InputAgent {
    fn action(&mut self, game: &G) -> ActionId {
        let legal = game.available_actions();
        loop {
            print!("action {:?}: ", legal.iter().map(|a| a.index()).collect::<Vec<_>>());
            io::stdout().flush().expect("failed to flush stdout");
            let mut line = String::new();
            io::stdin().read_line(&mut line).expect("failed to read stdin");
            match line.trim().parse::<usize>() {
                Ok(id) if legal.contains(&ActionId::new(id)) => return ActionId::new(id),
                _ => println!("illegal action"),
            }
        }
    }
}
