mod board;
mod bot_controller;
mod error;
mod game_state;
mod player;
mod search;
mod types;

pub use board::Board;
pub use bot_controller::{
    BotInput, BotType, MoveDecision, calculate_minimax_move, calculate_move, choose_move,
    choose_move_with, decide_move, opening_move,
};
pub use error::{Result, TicTacToeError};
pub use game_state::TicTacToeGameState;
pub use player::PlayerKind;
pub use search::{
    DRAW_SCORE, LOSS_SCORE, SCORE_MAX, SCORE_MIN, Score, SearchAlgorithm, SearchResult, WIN_SCORE,
    score, search_best_move,
};
pub use types::{GameStatus, Line, LineKind, MIN_BOARD_SIZE, Mark, Position, WinningLine};
