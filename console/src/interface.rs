use std::io;

use tictactoe_common::{Board, Mark, PlayerKind, Position};

/// Everything the turn loop needs from whoever is at the keyboard.
pub trait Interface {
    fn show_instructions(&mut self) -> io::Result<()>;
    fn solicit_player_kind(&mut self, mark: Mark) -> io::Result<PlayerKind>;
    fn show_board(&mut self, board: &Board) -> io::Result<()>;
    fn solicit_move(&mut self, mark: Mark) -> io::Result<Position>;
    fn report_invalid_move(&mut self, pos: Position) -> io::Result<()>;
    fn report_move(&mut self, mark: Mark, pos: Position) -> io::Result<()>;
    fn report_game_over(&mut self, winner: Option<Mark>) -> io::Result<()>;
}
