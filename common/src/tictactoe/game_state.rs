use super::board::Board;
use super::error::{Result, TicTacToeError};
use super::types::{GameStatus, Mark, Position, WinningLine};

#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    board: Board,
    current_mark: Mark,
    status: GameStatus,
}

impl TicTacToeGameState {
    pub fn new(size: usize, first_mark: Mark) -> Result<Self> {
        Ok(Self::from_board(Board::new(size)?, first_mark))
    }

    /// Resumes play on an existing board with `next_mark` to move.
    pub fn from_board(board: Board, next_mark: Mark) -> Self {
        let mut state = Self {
            board,
            current_mark: next_mark,
            status: GameStatus::InProgress,
        };
        state.check_game_over();
        state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn winner(&self) -> Option<Mark> {
        self.status.winner()
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        self.board.winning_line()
    }

    pub fn place_mark(&mut self, pos: Position) -> Result<()> {
        if self.status != GameStatus::InProgress {
            return Err(TicTacToeError::GameOver);
        }

        self.board = self.board.mark(self.current_mark, pos)?;

        self.check_game_over();

        if self.status == GameStatus::InProgress {
            self.current_mark = self.current_mark.opponent();
        }

        Ok(())
    }

    fn check_game_over(&mut self) {
        if let Some(winner) = self.board.winner() {
            self.status = GameStatus::won_by(winner);
            return;
        }

        if self.board.all_marked() {
            self.status = GameStatus::Draw;
        }
    }
}
