use std::str::FromStr;

use super::error::{Result, TicTacToeError};
use super::types::{Line, LineKind, MIN_BOARD_SIZE, Mark, Position, WinningLine, uniform_mark};

/// Immutable snapshot of an N×N grid. Placing a mark produces a new board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Mark>>,
    last_move: Option<Position>,
}

impl Board {
    pub fn new(size: usize) -> Result<Self> {
        let cell_count = cell_count(size)?;
        Ok(Self {
            size,
            cells: vec![None; cell_count],
            last_move: None,
        })
    }

    /// Builds a board from row-major cells.
    pub fn from_cells(size: usize, cells: Vec<Option<Mark>>) -> Result<Self> {
        let expected = cell_count(size)?;
        if cells.len() != expected {
            return Err(TicTacToeError::SizeMismatch {
                size,
                expected,
                actual: cells.len(),
            });
        }

        Ok(Self {
            size,
            cells,
            last_move: None,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Option<Mark>] {
        &self.cells
    }

    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    pub fn last_mark(&self) -> Option<Mark> {
        self.last_move.and_then(|pos| self.cell(pos))
    }

    pub fn is_out_of_bounds(&self, pos: Position) -> bool {
        pos.row >= self.size || pos.col >= self.size
    }

    pub fn read(&self, pos: Position) -> Result<Option<Mark>> {
        self.check_bounds(pos)?;
        Ok(self.cell(pos))
    }

    pub fn mark(&self, mark: Mark, pos: Position) -> Result<Board> {
        self.check_bounds(pos)?;
        if self.cell(pos).is_some() {
            return Err(TicTacToeError::CellOccupied {
                row: pos.row,
                col: pos.col,
            });
        }

        Ok(self.child(mark, pos))
    }

    /// `mark` without the checks, for callers iterating `blank_coordinates`.
    pub(crate) fn child(&self, mark: Mark, pos: Position) -> Board {
        debug_assert!(!self.is_out_of_bounds(pos) && self.cell(pos).is_none());

        let mut cells = self.cells.clone();
        cells[self.index(pos)] = Some(mark);
        Board {
            size: self.size,
            cells,
            last_move: Some(pos),
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = Line> + Clone + '_ {
        LineKind::all(self.size).map(move |kind| Line {
            kind,
            cells: kind.positions(self.size).map(|pos| self.cell(pos)).collect(),
        })
    }

    /// Kinds of the lines crossing `pos`: its row, its column and any diagonal it sits on.
    pub fn lines_through(&self, pos: Position) -> Result<Vec<LineKind>> {
        self.check_bounds(pos)?;

        let mut kinds = vec![LineKind::Row(pos.row), LineKind::Column(pos.col)];
        if pos.row == pos.col {
            kinds.push(LineKind::Diagonal);
        }
        if pos.row + pos.col == self.size - 1 {
            kinds.push(LineKind::AntiDiagonal);
        }
        Ok(kinds)
    }

    pub fn all_coordinates(&self) -> impl Iterator<Item = Position> + Clone + use<> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Position::new(row, col)))
    }

    pub fn blank_coordinates(&self) -> Vec<Position> {
        self.all_coordinates()
            .filter(|&pos| self.cell(pos).is_none())
            .collect()
    }

    /// False for positions outside the board.
    pub fn is_marked(&self, pos: Position) -> bool {
        matches!(self.read(pos), Ok(Some(_)))
    }

    /// False for positions outside the board.
    pub fn is_blank(&self, pos: Position) -> bool {
        matches!(self.read(pos), Ok(None))
    }

    pub fn all_blank(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    pub fn all_marked(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        LineKind::all(self.size).find_map(|kind| self.uniform_line(kind))
    }

    /// Only looks at the lines crossing `pos`.
    pub fn winning_line_through(&self, pos: Position) -> Option<WinningLine> {
        self.lines_through(pos)
            .ok()?
            .into_iter()
            .find_map(|kind| self.uniform_line(kind))
    }

    pub fn has_winning_line(&self) -> bool {
        self.winning_line().is_some()
    }

    pub fn winner(&self) -> Option<Mark> {
        self.winning_line().map(|line| line.mark)
    }

    pub fn is_game_over(&self) -> bool {
        self.has_winning_line() || self.all_marked()
    }

    fn uniform_line(&self, kind: LineKind) -> Option<WinningLine> {
        let mark = uniform_mark(kind.positions(self.size).map(|pos| self.cell(pos)))?;
        Some(WinningLine::new(mark, kind))
    }

    fn check_bounds(&self, pos: Position) -> Result<()> {
        if self.is_out_of_bounds(pos) {
            return Err(TicTacToeError::OutOfBounds {
                row: pos.row,
                col: pos.col,
                size: self.size,
            });
        }
        Ok(())
    }

    fn cell(&self, pos: Position) -> Option<Mark> {
        self.cells[self.index(pos)]
    }

    fn index(&self, pos: Position) -> usize {
        pos.row * self.size + pos.col
    }
}

/// Number of cells on a `size`×`size` board.
fn cell_count(size: usize) -> Result<usize> {
    if size < MIN_BOARD_SIZE {
        return Err(TicTacToeError::InvalidSize(size));
    }
    size.checked_mul(size).ok_or(TicTacToeError::InvalidSize(size))
}

/// Parses rows separated by `/`, e.g. `"X_X/_O_/OXO"`. Blank cells are `_` or `.`.
impl FromStr for Board {
    type Err = TicTacToeError;

    fn from_str(s: &str) -> Result<Self> {
        let rows: Vec<&str> = s.trim().split('/').map(str::trim).collect();
        let size = rows.len();

        let mut cells = Vec::with_capacity(cell_count(size)?);
        for (index, row) in rows.into_iter().enumerate() {
            let row_len = row.chars().count();
            if row_len != size {
                return Err(TicTacToeError::RaggedRow {
                    row: index,
                    expected: size,
                    actual: row_len,
                });
            }

            for symbol in row.chars() {
                let cell = match symbol {
                    '_' | '.' => None,
                    other => Some(
                        Mark::from_symbol(other).ok_or(TicTacToeError::InvalidCell(other))?,
                    ),
                };
                cells.push(cell);
            }
        }

        Board::from_cells(size, cells)
    }
}
