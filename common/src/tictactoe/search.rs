use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::board::Board;
use super::error::{Result, TicTacToeError};
use super::types::{Mark, Position};

/// Position value from the searching player's point of view.
pub type Score = i32;

pub const WIN_SCORE: Score = 1;
pub const DRAW_SCORE: Score = 0;
pub const LOSS_SCORE: Score = -1;

/// Window bounds, strictly outside every reachable score.
pub const SCORE_MIN: Score = LOSS_SCORE - 1;
pub const SCORE_MAX: Score = WIN_SCORE + 1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchAlgorithm {
    #[default]
    AlphaBeta,
    Minimax,
    Negamax,
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchAlgorithm::AlphaBeta => "alpha-beta",
            SearchAlgorithm::Minimax => "minimax",
            SearchAlgorithm::Negamax => "negamax",
        };
        f.write_str(name)
    }
}

impl FromStr for SearchAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alpha-beta" | "alphabeta" | "alpha_beta" => Ok(SearchAlgorithm::AlphaBeta),
            "minimax" => Ok(SearchAlgorithm::Minimax),
            "negamax" => Ok(SearchAlgorithm::Negamax),
            _ => Err(format!("Unknown search algorithm '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub position: Position,
    pub score: Score,
    pub nodes: u64,
}

/// Picks the blank cell with the best minimax value for `player`.
///
/// Every root candidate is scored with the full window, so root scores are exact and
/// ties go to the first candidate in row-major order. Wins are not discounted by depth.
pub fn search_best_move(
    algorithm: SearchAlgorithm,
    board: &Board,
    player: Mark,
    opponent: Mark,
) -> Result<SearchResult> {
    ensure_searchable(board, player, opponent)?;

    let mut search = Search::new(player, opponent);
    let mut best: Option<(Position, Score)> = None;

    for pos in board.blank_coordinates() {
        let child = board.child(player, pos);
        let score = search.evaluate(algorithm, &child, false);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((pos, score));
        }
    }

    let (position, score) =
        best.ok_or(TicTacToeError::PreconditionViolated("board has no blank cells"))?;

    crate::debug_log!(
        "{} search for {} chose ({}, {}) with score {} after {} nodes",
        algorithm,
        player,
        position.row,
        position.col,
        score,
        search.nodes
    );

    Ok(SearchResult {
        position,
        score,
        nodes: search.nodes,
    })
}

/// Minimax value of `board` for `player`, with `player` to move.
pub fn score(
    algorithm: SearchAlgorithm,
    board: &Board,
    player: Mark,
    opponent: Mark,
) -> Result<Score> {
    ensure_searchable(board, player, opponent)?;
    Ok(Search::new(player, opponent).evaluate(algorithm, board, true))
}

fn ensure_searchable(board: &Board, player: Mark, opponent: Mark) -> Result<()> {
    if player == opponent {
        return Err(TicTacToeError::PreconditionViolated(
            "player and opponent share a mark",
        ));
    }
    if board.has_winning_line() {
        return Err(TicTacToeError::PreconditionViolated("board is already won"));
    }
    if board.all_marked() {
        return Err(TicTacToeError::PreconditionViolated("board has no blank cells"));
    }
    Ok(())
}

struct Search {
    player: Mark,
    opponent: Mark,
    nodes: u64,
}

impl Search {
    fn new(player: Mark, opponent: Mark) -> Self {
        Self {
            player,
            opponent,
            nodes: 0,
        }
    }

    fn evaluate(&mut self, algorithm: SearchAlgorithm, board: &Board, maximizing: bool) -> Score {
        match algorithm {
            SearchAlgorithm::AlphaBeta => self.alpha_beta(board, maximizing, SCORE_MIN, SCORE_MAX),
            SearchAlgorithm::Minimax => self.minimax(board, maximizing),
            SearchAlgorithm::Negamax => {
                let color = if maximizing { 1 } else { -1 };
                color * self.negamax(board, color)
            }
        }
    }

    fn mark_to_move(&self, maximizing: bool) -> Mark {
        if maximizing { self.player } else { self.opponent }
    }

    /// Terminal value of a board reached by search, `None` while play continues.
    fn outcome(&self, board: &Board) -> Option<Score> {
        // a child of a non-terminal board can only be won through its last move
        let winning_line = match board.last_move() {
            Some(pos) => board.winning_line_through(pos),
            None => board.winning_line(),
        };

        match winning_line {
            Some(line) if line.mark == self.player => Some(WIN_SCORE),
            Some(_) => Some(LOSS_SCORE),
            None if board.all_marked() => Some(DRAW_SCORE),
            None => None,
        }
    }

    fn alpha_beta(
        &mut self,
        board: &Board,
        maximizing: bool,
        mut alpha: Score,
        mut beta: Score,
    ) -> Score {
        self.nodes += 1;
        if let Some(score) = self.outcome(board) {
            return score;
        }

        let mark = self.mark_to_move(maximizing);
        let mut best = if maximizing { SCORE_MIN } else { SCORE_MAX };

        for pos in board.blank_coordinates() {
            let child = board.child(mark, pos);
            let eval = self.alpha_beta(&child, !maximizing, alpha, beta);

            if maximizing {
                best = best.max(eval);
                alpha = alpha.max(best);
            } else {
                best = best.min(eval);
                beta = beta.min(best);
            }

            if alpha >= beta {
                break;
            }
        }

        best
    }

    fn minimax(&mut self, board: &Board, maximizing: bool) -> Score {
        self.nodes += 1;
        if let Some(score) = self.outcome(board) {
            return score;
        }

        let mark = self.mark_to_move(maximizing);
        let mut best = if maximizing { SCORE_MIN } else { SCORE_MAX };

        for pos in board.blank_coordinates() {
            let child = board.child(mark, pos);
            let eval = self.minimax(&child, !maximizing);
            best = if maximizing { best.max(eval) } else { best.min(eval) };
        }

        best
    }

    /// Value for the side to move; `color` is 1 when that side is `player`.
    fn negamax(&mut self, board: &Board, color: Score) -> Score {
        self.nodes += 1;
        if let Some(score) = self.outcome(board) {
            return color * score;
        }

        let mark = self.mark_to_move(color > 0);
        let mut best = SCORE_MIN;

        for pos in board.blank_coordinates() {
            let child = board.child(mark, pos);
            best = best.max(-self.negamax(&child, -color));
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALGORITHMS: [SearchAlgorithm; 3] = [
        SearchAlgorithm::AlphaBeta,
        SearchAlgorithm::Minimax,
        SearchAlgorithm::Negamax,
    ];

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    /// Every non-terminal board reachable from the empty 3x3 board with X moving first.
    fn reachable_boards() -> Vec<(Board, Mark)> {
        let mut found = Vec::new();
        let mut stack = vec![(Board::new(3).unwrap(), Mark::X)];
        let mut seen = std::collections::HashSet::new();

        while let Some((current, to_move)) = stack.pop() {
            if current.is_game_over() || !seen.insert(current.cells().to_vec()) {
                continue;
            }
            for pos in current.blank_coordinates() {
                stack.push((current.mark(to_move, pos).unwrap(), to_move.opponent()));
            }
            found.push((current, to_move));
        }

        found
    }

    #[test]
    fn test_completes_top_row() {
        let board = board("X_X/_O_/OXO");
        for algorithm in ALGORITHMS {
            let result = search_best_move(algorithm, &board, Mark::X, Mark::O).unwrap();
            assert_eq!(result.position, Position::new(0, 1));
            assert_eq!(result.score, WIN_SCORE);
        }
    }

    #[test]
    fn test_blocks_row_threat() {
        // X threatens row 1 at (1,2); any other O move loses
        let board = board("O__/XX_/OOX");
        for algorithm in ALGORITHMS {
            let result = search_best_move(algorithm, &board, Mark::O, Mark::X).unwrap();
            assert_eq!(result.position, Position::new(1, 2));
            assert_eq!(result.score, DRAW_SCORE);
        }
    }

    #[test]
    fn test_deep_win_ties_with_immediate_win() {
        // (2,2) wins at once, (0,2) forces a win two moves later; row-major order picks (0,2)
        let board = board("XX_/___/OO_");
        let result =
            search_best_move(SearchAlgorithm::AlphaBeta, &board, Mark::O, Mark::X).unwrap();
        assert_eq!(result.position, Position::new(0, 2));
        assert_eq!(result.score, WIN_SCORE);
    }

    #[test]
    fn test_empty_board_scores_as_draw() {
        let empty = Board::new(3).unwrap();
        assert_eq!(score(SearchAlgorithm::AlphaBeta, &empty, Mark::X, Mark::O), Ok(DRAW_SCORE));
    }

    #[test]
    fn test_pruning_matches_unpruned_minimax_on_reachable_boards() {
        for (board, to_move) in reachable_boards() {
            let opponent = to_move.opponent();
            let pruned = score(SearchAlgorithm::AlphaBeta, &board, to_move, opponent).unwrap();
            let full = score(SearchAlgorithm::Minimax, &board, to_move, opponent).unwrap();
            assert_eq!(pruned, full, "{:?}", board.cells());
        }
    }

    #[test]
    fn test_negamax_matches_minimax_on_reachable_boards() {
        for (board, to_move) in reachable_boards() {
            let opponent = to_move.opponent();
            let negamax = score(SearchAlgorithm::Negamax, &board, to_move, opponent).unwrap();
            let minimax = score(SearchAlgorithm::Minimax, &board, to_move, opponent).unwrap();
            assert_eq!(negamax, minimax, "{:?}", board.cells());
        }
    }

    #[test]
    fn test_algorithms_agree_on_chosen_move() {
        let boards = reachable_boards()
            .into_iter()
            .filter(|(board, _)| board.blank_coordinates().len() <= 6);
        for (board, to_move) in boards {
            let opponent = to_move.opponent();
            let expected =
                search_best_move(SearchAlgorithm::Minimax, &board, to_move, opponent).unwrap();
            for algorithm in [SearchAlgorithm::AlphaBeta, SearchAlgorithm::Negamax] {
                let result = search_best_move(algorithm, &board, to_move, opponent).unwrap();
                assert_eq!(result.position, expected.position);
                assert_eq!(result.score, expected.score);
            }
        }
    }

    #[test]
    fn test_pruning_visits_fewer_nodes() {
        let board = board("X__/___/___");
        let pruned =
            search_best_move(SearchAlgorithm::AlphaBeta, &board, Mark::O, Mark::X).unwrap();
        let full = search_best_move(SearchAlgorithm::Minimax, &board, Mark::O, Mark::X).unwrap();

        assert!(pruned.nodes < full.nodes);
        assert_eq!(pruned.position, full.position);
    }

    #[test]
    fn test_input_board_is_not_mutated() {
        let board = board("X__/_O_/___");
        let snapshot = board.clone();
        search_best_move(SearchAlgorithm::AlphaBeta, &board, Mark::X, Mark::O).unwrap();
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_precondition_violations() {
        let won = board("XXX/OO_/___");
        let full = board("XOX/XOO/OXX");
        let open = Board::new(3).unwrap();

        assert!(matches!(
            search_best_move(SearchAlgorithm::AlphaBeta, &won, Mark::O, Mark::X),
            Err(TicTacToeError::PreconditionViolated(_))
        ));
        assert!(matches!(
            search_best_move(SearchAlgorithm::AlphaBeta, &full, Mark::X, Mark::O),
            Err(TicTacToeError::PreconditionViolated(_))
        ));
        assert!(matches!(
            score(SearchAlgorithm::Minimax, &open, Mark::X, Mark::X),
            Err(TicTacToeError::PreconditionViolated(_))
        ));
    }

    #[test]
    fn test_search_on_larger_board_near_end() {
        let board = board("XOXO/OXOX/OOX_/XXO_");
        let result =
            search_best_move(SearchAlgorithm::AlphaBeta, &board, Mark::X, Mark::O).unwrap();
        // (3,3) completes the main diagonal; (2,3) only draws
        assert_eq!(result.position, Position::new(3, 3));
        assert_eq!(result.score, WIN_SCORE);
    }

    #[test]
    fn test_search_algorithm_from_str() {
        assert_eq!("alpha-beta".parse(), Ok(SearchAlgorithm::AlphaBeta));
        assert_eq!("Negamax".parse(), Ok(SearchAlgorithm::Negamax));
        assert!("mcts".parse::<SearchAlgorithm>().is_err());
        assert_eq!(SearchAlgorithm::Minimax.to_string(), "minimax");
    }
}
