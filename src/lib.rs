//! Self-play decision policies for finite, alternating-turn, zero-sum games.
//!
//! Two engines form the core: a Counterfactual Regret Minimization trainer
//! that learns an approximate equilibrium strategy per information set, and a
//! Monte Carlo Tree Search agent that runs a UCB-guided search from scratch
//! for every decision. Both operate purely against the
//! [`game::AlternatingGame`] contract, never against a specific game's rules.
//!
//! # Example
//! ```
//! use selfplay_rs::cfr::CfrTrainer;
//! use selfplay_rs::games::kuhn::KuhnPoker;
//!
//! let game = KuhnPoker::new(2, 0);
//! let mut trainer = CfrTrainer::new(game, 0);
//! trainer.train(100);
//! assert!(!trainer.is_empty());
//! ```
#[macro_use]
extern crate log;

pub mod action;
pub mod agent;
pub mod game;
pub mod node;
pub mod player;

pub mod cfr;
pub mod mcts;
pub mod minimax;

pub mod games;
