extern crate selfplay_rs;

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use selfplay_rs::action::ActionId;
    use selfplay_rs::agent::{Agent, RandomAgent};
    use selfplay_rs::game::AlternatingGame;
    use selfplay_rs::games::tictactoe::TicTacToe;
    use selfplay_rs::mcts::{ActionSelection, MctsAgent, SearchTree, DEFAULT_EXPLORATION};
    use selfplay_rs::player::AgentId;

    #[test]
    fn root_is_fully_expanded_before_any_simulation() {
        let game = TicTacToe::new();
        let tree = SearchTree::new(&game, AgentId::new(0), DEFAULT_EXPLORATION);
        let children = tree.root_children();
        assert_eq!(children.len(), game.available_actions().len());
        assert!(children.iter().all(|(_, visits)| *visits == 0));
    }

    #[test]
    fn each_simulation_contributes_one_backpropagation_path() {
        let game = TicTacToe::new();
        let mut tree = SearchTree::new(&game, AgentId::new(0), DEFAULT_EXPLORATION);
        let mut rng = SmallRng::seed_from_u64(1);
        let simulations = 50;
        for _ in 0..simulations {
            tree.simulate(&game, &mut rng);
        }
        let visits: usize = tree.root_children().iter().map(|(_, v)| v).sum();
        assert_eq!(visits, simulations);
    }

    // X has 0 and 1, O has 3 and 4; X to move wins at 2.
    fn near_win() -> TicTacToe {
        let mut game = TicTacToe::new();
        for cell in [0, 3, 1, 4].iter() {
            game.step(ActionId::new(*cell));
        }
        game
    }

    #[test]
    fn search_finds_the_immediate_win() {
        let game = near_win();
        let mut mcts = MctsAgent::new(AgentId::new(0), 200, 13);
        assert_eq!(mcts.action(&game), ActionId::new(2));
    }

    #[test]
    fn max_value_mode_agrees_on_the_immediate_win() {
        let game = near_win();
        let mut mcts = MctsAgent::new(AgentId::new(0), 200, 13).mode(ActionSelection::MaxValue);
        assert_eq!(mcts.action(&game), ActionId::new(2));
    }

    #[test]
    fn mcts_beats_random_at_tictactoe() {
        let mut mcts = MctsAgent::new(AgentId::new(0), 300, 9);
        let mut random = RandomAgent::new(17);
        let hero = AgentId::new(0);
        let mut score = 0.0;
        for _ in 0..100 {
            let mut game = TicTacToe::new();
            while !game.game_over() {
                let action = if game.agent_selection() == hero {
                    mcts.action(&game)
                } else {
                    random.action(&game)
                };
                game.step(action);
            }
            score += game.reward(hero);
        }
        assert!(score > 40.0, "net score over 100 games was only {}", score);
    }
}
