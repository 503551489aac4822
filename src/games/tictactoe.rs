//! Perfect-information 3x3 tic-tac-toe, the reference game for the search
//! agents. Cells are numbered 0..9 row-major; an action is a cell index.

use crate::{action::ActionId, game::AlternatingGame, player::AgentId};
use std::fmt;

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

const MARKS: [char; 2] = ['X', 'O'];

#[derive(Clone, Copy, PartialEq, Debug)]
enum Outcome {
    Win(usize),
    Draw,
}

#[derive(Clone)]
pub struct TicTacToe {
    board: [Option<usize>; 9],
    current: usize,
    outcome: Option<Outcome>,
}

impl TicTacToe {
    pub fn new() -> Self {
        TicTacToe {
            board: [None; 9],
            current: 0,
            outcome: None,
        }
    }

    fn line_won_by(&self, seat: usize) -> bool {
        LINES
            .iter()
            .any(|line| line.iter().all(|cell| self.board[*cell] == Some(seat)))
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        TicTacToe::new()
    }
}

impl AlternatingGame for TicTacToe {
    type Observation = String;

    fn reset(&mut self) {
        self.board = [None; 9];
        self.current = 0;
        self.outcome = None;
    }

    fn step(&mut self, action: ActionId) {
        if self.outcome.is_some() {
            panic!("step on a finished game");
        }
        let cell = action.index();
        if self.board[cell].is_some() {
            panic!("cell {} is already taken", cell);
        }
        self.board[cell] = Some(self.current);
        if self.line_won_by(self.current) {
            self.outcome = Some(Outcome::Win(self.current));
        } else if self.board.iter().all(|cell| cell.is_some()) {
            self.outcome = Some(Outcome::Draw);
        }
        self.current = 1 - self.current;
    }

    // perfect information: both agents see the same key
    fn observe(&self, _agent: AgentId) -> String {
        self.board
            .iter()
            .map(|cell| match cell {
                Some(seat) => MARKS[*seat],
                None => '.',
            })
            .collect()
    }

    fn available_actions(&self) -> Vec<ActionId> {
        if self.outcome.is_some() {
            return Vec::new();
        }
        self.board
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(cell, _)| ActionId::new(cell))
            .collect()
    }

    fn game_over(&self) -> bool {
        self.outcome.is_some()
    }

    fn reward(&self, agent: AgentId) -> f64 {
        match self.outcome.expect("reward of an unfinished game") {
            Outcome::Win(winner) if winner == agent.index() => 1.0,
            Outcome::Win(_) => -1.0,
            Outcome::Draw => 0.0,
        }
    }

    fn agent_selection(&self) -> AgentId {
        AgentId::new(self.current)
    }

    fn num_agents(&self) -> usize {
        2
    }

    fn num_actions(&self, _agent: AgentId) -> usize {
        9
    }

    /// Open-line count difference, scaled well below the terminal rewards.
    fn evaluate(&self, agent: AgentId) -> f64 {
        if self.game_over() {
            return self.reward(agent);
        }
        let me = agent.index();
        let mut score = 0.0;
        for line in &LINES {
            let mine = line.iter().filter(|cell| self.board[**cell] == Some(me)).count();
            let theirs = line
                .iter()
                .filter(|cell| matches!(self.board[**cell], Some(seat) if seat != me))
                .count();
            if theirs == 0 {
                score += mine as f64;
            }
            if mine == 0 {
                score -= theirs as f64;
            }
        }
        score / 24.0
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let mark = match self.board[row * 3 + col] {
                    Some(seat) => MARKS[seat],
                    None => '.',
                };
                write!(f, "{}", mark)?;
            }
            if row < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
