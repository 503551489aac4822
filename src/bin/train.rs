#[macro_use]
extern crate log;

use argh::FromArgs;
use selfplay_rs::cfr::CfrTrainer;
use selfplay_rs::games::kuhn::KuhnPoker;
use std::time::Instant;

#[derive(FromArgs)]
/// Train a CFR policy by self-play and print the learned profile as JSON.
struct Args {
    /// game to train on: kuhn | kuhn3
    #[argh(option, default = "String::from(\"kuhn\")")]
    game: String,
    /// number of training iterations
    #[argh(option, default = "100_000")]
    iterations: usize,
    /// seed for every random source
    #[argh(option, default = "0")]
    seed: u64,
}

fn main() {
    env_logger::init();
    let args: Args = argh::from_env();

    let num_agents = match args.game.as_str() {
        "kuhn" => 2,
        "kuhn3" => 3,
        _ => panic!("invalid game name"),
    };
    let game = KuhnPoker::new(num_agents, args.seed);
    let mut trainer = CfrTrainer::new(game, args.seed);

    let start = Instant::now();
    trainer.train(args.iterations);
    info!(
        "elapsed time: {} [sec]",
        start.elapsed().as_nanos() as f64 / 1_000_000_000 as f64
    );

    let profile = trainer.learned_profile();
    println!(
        "{}",
        serde_json::to_string_pretty(&profile).expect("failed to serialize profile")
    );
}
