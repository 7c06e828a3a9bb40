use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const MIN_BOARD_SIZE: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Mark> {
        match symbol {
            'X' | 'x' => Some(Mark::X),
            'O' | 'o' => Some(Mark::O),
            _ => None,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Mark {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => {
                Mark::from_symbol(symbol).ok_or_else(|| format!("Unknown mark '{}'", s))
            }
            _ => Err(format!("Unknown mark '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    XWon,
    OWon,
    Draw,
}

impl GameStatus {
    pub fn won_by(mark: Mark) -> Self {
        match mark {
            Mark::X => GameStatus::XWon,
            Mark::O => GameStatus::OWon,
        }
    }

    pub fn winner(&self) -> Option<Mark> {
        match self {
            GameStatus::XWon => Some(Mark::X),
            GameStatus::OWon => Some(Mark::O),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }

    pub fn is_over(&self) -> bool {
        *self != GameStatus::InProgress
    }
}

/// One of the `2 * size + 2` full-length lines of a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineKind {
    Row(usize),
    Column(usize),
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

impl LineKind {
    /// Diagonals first, then each row followed by the column with the same index.
    pub fn all(size: usize) -> impl Iterator<Item = LineKind> + Clone {
        [LineKind::Diagonal, LineKind::AntiDiagonal]
            .into_iter()
            .chain((0..size).flat_map(|i| [LineKind::Row(i), LineKind::Column(i)]))
    }

    pub fn positions(self, size: usize) -> impl Iterator<Item = Position> + Clone {
        (0..size).map(move |i| match self {
            LineKind::Row(row) => Position::new(row, i),
            LineKind::Column(col) => Position::new(i, col),
            LineKind::Diagonal => Position::new(i, i),
            LineKind::AntiDiagonal => Position::new(i, size - 1 - i),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    pub kind: LineKind,
    pub cells: Vec<Option<Mark>>,
}

/// `Some(mark)` when every cell holds that same mark. Empty or partly blank runs give `None`.
pub(crate) fn uniform_mark(mut cells: impl Iterator<Item = Option<Mark>>) -> Option<Mark> {
    let first = cells.next()??;
    cells.all(|cell| cell == Some(first)).then_some(first)
}

impl Line {
    /// The mark filling the whole line, if there is one.
    pub fn uniform_mark(&self) -> Option<Mark> {
        uniform_mark(self.cells.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningLine {
    pub mark: Mark,
    pub kind: LineKind,
}

impl WinningLine {
    pub fn new(mark: Mark, kind: LineKind) -> Self {
        Self { mark, kind }
    }

    pub fn start(&self, size: usize) -> Position {
        match self.kind {
            LineKind::Row(row) => Position::new(row, 0),
            LineKind::Column(col) => Position::new(0, col),
            LineKind::Diagonal => Position::new(0, 0),
            LineKind::AntiDiagonal => Position::new(0, size - 1),
        }
    }

    pub fn end(&self, size: usize) -> Position {
        match self.kind {
            LineKind::Row(row) => Position::new(row, size - 1),
            LineKind::Column(col) => Position::new(size - 1, col),
            LineKind::Diagonal => Position::new(size - 1, size - 1),
            LineKind::AntiDiagonal => Position::new(size - 1, 0),
        }
    }
}
