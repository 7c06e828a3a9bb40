use super::types::MIN_BOARD_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TicTacToeError {
    #[error("board size must be at least {min}, got {0}", min = MIN_BOARD_SIZE)]
    InvalidSize(usize),

    #[error("a {size}x{size} board needs {expected} cells, got {actual}")]
    SizeMismatch {
        size: usize,
        expected: usize,
        actual: usize,
    },

    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("position ({row}, {col}) is outside the {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("cell ({row}, {col}) is already marked")]
    CellOccupied { row: usize, col: usize },

    #[error("invalid cell symbol '{0}'")]
    InvalidCell(char),

    #[error("game is already over")]
    GameOver,

    #[error("search precondition violated: {0}")]
    PreconditionViolated(&'static str),
}

impl TicTacToeError {
    /// Errors a human can fix by picking another cell.
    pub fn is_rejected_move(&self) -> bool {
        matches!(
            self,
            TicTacToeError::OutOfBounds { .. } | TicTacToeError::CellOccupied { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TicTacToeError>;
