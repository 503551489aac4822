use argh::FromArgs;
use selfplay_rs::agent::{Agent, InputAgent, RandomAgent};
use selfplay_rs::game::AlternatingGame;
use selfplay_rs::games::{kuhn::KuhnPoker, tictactoe::TicTacToe};
use selfplay_rs::mcts::MctsAgent;
use selfplay_rs::minimax::MinimaxAgent;
use selfplay_rs::player::AgentId;
use std::fmt::Display;

#[derive(FromArgs)]
/// Play one match between two agents.
struct Args {
    /// game to play: kuhn | tictactoe
    #[argh(option, default = "String::from(\"tictactoe\")")]
    game: String,
    /// agent on the first seat: random | mcts | minimax | human
    #[argh(option, default = "String::from(\"human\")")]
    first: String,
    /// agent on the second seat: random | mcts | minimax | human
    #[argh(option, default = "String::from(\"mcts\")")]
    second: String,
    /// seed for every random source
    #[argh(option, default = "0")]
    seed: u64,
    /// simulations per mcts decision
    #[argh(option, default = "1000")]
    simulations: usize,
    /// minimax search depth
    #[argh(option, default = "9")]
    depth: usize,
}

fn agent<G: AlternatingGame>(kind: &str, seat: AgentId, args: &Args) -> Box<dyn Agent<G>> {
    let seed = args.seed.wrapping_add(seat.index() as u64);
    match kind {
        "random" => Box::new(RandomAgent::new(seed)),
        "mcts" => Box::new(MctsAgent::new(seat, args.simulations, seed)),
        "minimax" => Box::new(MinimaxAgent::new(seat, args.depth)),
        "human" => Box::new(InputAgent),
        _ => panic!("invalid agent kind: {}", kind),
    }
}

fn play<G: AlternatingGame + Display>(mut game: G, args: &Args) {
    let mut agents: Vec<Box<dyn Agent<G>>> = vec![
        agent(&args.first, AgentId::new(0), args),
        agent(&args.second, AgentId::new(1), args),
    ];
    while !game.game_over() {
        println!("{}\n", game);
        let seat = game.agent_selection();
        let action = agents[seat.index()].action(&game);
        println!("{:?} plays {}", seat, action.index());
        game.step(action);
    }
    println!("{}\n", game);
    for seat in game.agents() {
        println!("{:?}: {}", seat, game.reward(seat));
    }
}

fn main() {
    env_logger::init();
    let args: Args = argh::from_env();
    match args.game.as_str() {
        "kuhn" => play(KuhnPoker::new(2, args.seed), &args),
        "tictactoe" => play(TicTacToe::new(), &args),
        _ => panic!("invalid game name"),
    }
}
