pub mod kuhn;
pub mod tictactoe;
