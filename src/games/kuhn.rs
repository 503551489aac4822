//! Kuhn poker for two or three players.
//!
//! Every player antes one chip and is dealt one card from a deck one card
//! larger than the table. Actions are pass (`p`) and bet (`b`); a hand ends
//! when its action history reaches the terminal set for the player count.

use crate::{action::ActionId, game::AlternatingGame, player::AgentId};
use rand::{rngs::SmallRng, seq::index, SeedableRng};
use std::fmt;

pub const PASS: ActionId = ActionId::new(0);
pub const BET: ActionId = ActionId::new(1);

const MOVES: [char; 2] = ['p', 'b'];
const CARD_NAMES: [char; 4] = ['J', 'Q', 'K', 'L'];

const TERMINAL_2: [&str; 5] = ["pp", "pbp", "pbb", "bp", "bb"];
const TERMINAL_3: [&str; 13] = [
    "ppp", "ppbpp", "ppbpb", "ppbbp", "ppbbb", "pbpp", "pbpb", "pbbp", "pbbb", "bpp", "bpb",
    "bbp", "bbb",
];

#[derive(Clone)]
pub struct KuhnPoker {
    num_agents: usize,
    num_cards: usize,
    hand: Vec<usize>,
    hist: String,
    current: usize,
    rewards: Option<Vec<f64>>,
    rng: SmallRng,
}

impl KuhnPoker {
    /// A freshly dealt hand for 2 or 3 players. The deck holds one card more
    /// than there are players (J Q K, plus L for three-handed).
    pub fn new(num_agents: usize, seed: u64) -> Self {
        assert!(
            num_agents == 2 || num_agents == 3,
            "Kuhn poker supports 2 or 3 players"
        );
        let mut game = KuhnPoker {
            num_agents,
            num_cards: num_agents + 1,
            hand: Vec::new(),
            hist: String::new(),
            current: 0,
            rewards: None,
            rng: SmallRng::seed_from_u64(seed),
        };
        game.reset();
        game
    }

    fn showdown(&self, stake: f64) -> Vec<f64> {
        let winner = self.best_hand_among(|_| true).unwrap();
        (0..self.num_agents)
            .map(|seat| if seat == winner { stake } else { -stake })
            .collect()
    }

    fn best_hand_among<F: Fn(usize) -> bool>(&self, contends: F) -> Option<usize> {
        (0..self.num_agents)
            .filter(|seat| contends(*seat))
            .max_by_key(|seat| self.hand[*seat])
    }

    fn compute_rewards_2(&mut self) {
        if !TERMINAL_2.contains(&self.hist.as_str()) {
            return;
        }
        let rewards = match self.hist.as_str() {
            "pp" => self.showdown(1.0),
            "pbp" => vec![-1.0, 1.0],
            "bp" => vec![1.0, -1.0],
            // pass-bet-bet or bet-bet: showdown for a doubled stake
            _ => self.showdown(2.0),
        };
        self.rewards = Some(rewards);
    }

    fn compute_rewards_3(&mut self) {
        if !TERMINAL_3.contains(&self.hist.as_str()) {
            return;
        }
        let mut pot = self.num_agents as i64;
        let mut contributions = vec![1i64; self.num_agents];
        let mut active = vec![true; self.num_agents];
        let mut turn = 0;
        for mv in self.hist.chars() {
            if mv == 'b' {
                contributions[turn] += 1;
                pot += 1;
            } else {
                active[turn] = false;
            }
            turn = (turn + 1) % self.num_agents;
        }

        let winner = match active.iter().filter(|stays| **stays).count() {
            1 => active.iter().position(|stays| *stays),
            2 | 3 => self.best_hand_among(|seat| active[seat]),
            _ => None,
        };

        let mut rewards = vec![0.0; self.num_agents];
        if let Some(winner) = winner {
            for seat in 0..self.num_agents {
                rewards[seat] = if seat == winner {
                    (pot - contributions[seat]) as f64
                } else {
                    -contributions[seat] as f64
                };
            }
        }
        self.rewards = Some(rewards);
    }
}

impl AlternatingGame for KuhnPoker {
    type Observation = String;

    fn reset(&mut self) {
        self.hist.clear();
        self.rewards = None;
        self.current = 0;
        self.hand = index::sample(&mut self.rng, self.num_cards, self.num_agents).into_vec();
    }

    fn step(&mut self, action: ActionId) {
        if self.rewards.is_some() {
            panic!("step on a finished game");
        }
        self.hist.push(MOVES[action.index()]);
        self.current = (self.current + 1) % self.num_agents;
        match self.num_agents {
            2 => self.compute_rewards_2(),
            _ => self.compute_rewards_3(),
        }
    }

    // own card followed by the public betting history
    fn observe(&self, agent: AgentId) -> String {
        format!("{}{}", self.hand[agent.index()], self.hist)
    }

    fn available_actions(&self) -> Vec<ActionId> {
        if self.rewards.is_some() {
            Vec::new()
        } else {
            vec![PASS, BET]
        }
    }

    fn game_over(&self) -> bool {
        self.rewards.is_some()
    }

    fn reward(&self, agent: AgentId) -> f64 {
        self.rewards.as_ref().expect("reward of an unfinished game")[agent.index()]
    }

    fn agent_selection(&self) -> AgentId {
        AgentId::new(self.current)
    }

    fn num_agents(&self) -> usize {
        self.num_agents
    }

    fn num_actions(&self, _agent: AgentId) -> usize {
        MOVES.len()
    }

    fn evaluate(&self, agent: AgentId) -> f64 {
        if self.game_over() {
            return self.reward(agent);
        }
        // higher card is better
        self.hand[agent.index()] as f64 / self.num_cards as f64
    }
}

impl fmt::Display for KuhnPoker {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cards: String = self.hand.iter().map(|card| CARD_NAMES[*card]).collect();
        write!(f, "{} [{}]", cards, self.hist)
    }
}
