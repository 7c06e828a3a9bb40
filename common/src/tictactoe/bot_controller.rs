use rand::Rng;
use rand::prelude::IndexedRandom;

use super::board::Board;
use super::error::{Result, TicTacToeError};
use super::game_state::TicTacToeGameState;
use super::search::{SearchAlgorithm, search_best_move};
use super::types::{Mark, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotType {
    Minimax,
    Random,
}

pub struct BotInput {
    pub board: Board,
    pub current_mark: Mark,
    pub algorithm: SearchAlgorithm,
}

impl BotInput {
    pub fn from_game_state(state: &TicTacToeGameState, algorithm: SearchAlgorithm) -> Self {
        Self {
            board: state.board().clone(),
            current_mark: state.current_mark(),
            algorithm,
        }
    }
}

pub fn calculate_move<R: Rng + ?Sized>(
    bot_type: BotType,
    input: &BotInput,
    rng: &mut R,
) -> Result<Position> {
    match bot_type {
        BotType::Minimax => calculate_minimax_move(input),
        BotType::Random => calculate_random_move(input, rng),
    }
}

fn calculate_random_move<R: Rng + ?Sized>(input: &BotInput, rng: &mut R) -> Result<Position> {
    if input.board.is_game_over() {
        return Err(TicTacToeError::PreconditionViolated("board is already terminal"));
    }
    input
        .board
        .blank_coordinates()
        .choose(rng)
        .copied()
        .ok_or(TicTacToeError::PreconditionViolated("board has no blank cells"))
}

pub fn calculate_minimax_move(input: &BotInput) -> Result<Position> {
    let bot_mark = input.current_mark;
    choose_move_with(input.algorithm, &input.board, bot_mark, bot_mark.opponent())
}

/// The center of an empty odd-sized board, which is always a minimax-optimal opening.
pub fn opening_move(board: &Board) -> Option<Position> {
    let size = board.size();
    (size % 2 == 1 && board.all_blank()).then(|| Position::new(size / 2, size / 2))
}

/// Best move for `player` using alpha-beta search, with the center opening shortcut.
pub fn choose_move(board: &Board, player: Mark, opponent: Mark) -> Result<Position> {
    choose_move_with(SearchAlgorithm::AlphaBeta, board, player, opponent)
}

pub fn choose_move_with(
    algorithm: SearchAlgorithm,
    board: &Board,
    player: Mark,
    opponent: Mark,
) -> Result<Position> {
    decide_move(algorithm, board, player, opponent).map(|decision| decision.position)
}

/// A chosen cell and the number of nodes searched to find it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveDecision {
    pub position: Position,
    pub nodes: u64,
}

/// `choose_move_with` plus the search cost. The opening shortcut costs zero nodes.
pub fn decide_move(
    algorithm: SearchAlgorithm,
    board: &Board,
    player: Mark,
    opponent: Mark,
) -> Result<MoveDecision> {
    if player == opponent {
        return Err(TicTacToeError::PreconditionViolated(
            "player and opponent share a mark",
        ));
    }
    if let Some(center) = opening_move(board) {
        crate::debug_log!("{} opens in the center ({}, {})", player, center.row, center.col);
        return Ok(MoveDecision {
            position: center,
            nodes: 0,
        });
    }

    let result = search_best_move(algorithm, board, player, opponent)?;
    Ok(MoveDecision {
        position: result.position,
        nodes: result.nodes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::search::DRAW_SCORE;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    /// Plays every legal opponent reply against the engine and returns the worst result seen.
    fn worst_outcome(board: Board, to_move: Mark, engine: Mark) -> Option<Mark> {
        if let Some(winner) = board.winner() {
            return Some(winner);
        }
        if board.all_marked() {
            return None;
        }

        if to_move == engine {
            let choice = choose_move(&board, engine, engine.opponent()).unwrap();
            assert!(board.is_blank(choice));
            let next = board.mark(engine, choice).unwrap();
            return worst_outcome(next, to_move.opponent(), engine);
        }

        let mut worst = Some(engine);
        for reply in board.blank_coordinates() {
            let next = board.mark(to_move, reply).unwrap();
            match worst_outcome(next, engine, engine) {
                Some(winner) if winner != engine => return Some(winner),
                None => worst = None,
                Some(_) => {}
            }
        }
        worst
    }

    #[test]
    fn test_empty_odd_board_opens_in_center() {
        for size in [3, 5, 7] {
            let board = Board::new(size).unwrap();
            assert_eq!(opening_move(&board), Some(pos(size / 2, size / 2)));
            assert_eq!(choose_move(&board, Mark::X, Mark::O), Ok(pos(size / 2, size / 2)));
        }
    }

    #[test]
    fn test_no_opening_shortcut_on_even_or_started_boards() {
        assert_eq!(opening_move(&Board::new(4).unwrap()), None);
        let started = Board::new(3).unwrap().mark(Mark::X, pos(0, 0)).unwrap();
        assert_eq!(opening_move(&started), None);
    }

    #[test]
    fn test_choose_move_completes_winning_line() {
        let board: Board = "X_X/_O_/OXO".parse().unwrap();
        assert_eq!(choose_move(&board, Mark::X, Mark::O), Ok(pos(0, 1)));
    }

    #[test]
    fn test_choose_move_takes_center_after_corner_opening() {
        let board = Board::new(3).unwrap().mark(Mark::X, pos(0, 0)).unwrap();
        // every edge or corner reply loses to X, only the center holds
        assert_eq!(choose_move(&board, Mark::O, Mark::X), Ok(pos(1, 1)));
    }

    #[test]
    fn test_never_loses_moving_first() {
        let worst = worst_outcome(Board::new(3).unwrap(), Mark::X, Mark::X);
        assert_ne!(worst, Some(Mark::O));
    }

    #[test]
    fn test_never_loses_moving_second() {
        let worst = worst_outcome(Board::new(3).unwrap(), Mark::O, Mark::X);
        assert_ne!(worst, Some(Mark::O));
    }

    #[test]
    fn test_never_loses_playing_o() {
        let worst = worst_outcome(Board::new(3).unwrap(), Mark::X, Mark::O);
        assert_ne!(worst, Some(Mark::X));
    }

    #[test]
    fn test_self_play_is_a_draw() {
        let mut board = Board::new(3).unwrap();
        let mut mark = Mark::X;
        while !board.is_game_over() {
            let choice = choose_move(&board, mark, mark.opponent()).unwrap();
            board = board.mark(mark, choice).unwrap();
            mark = mark.opponent();
        }
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_shortcut_skips_search() {
        for size in [3, 5, 9] {
            let empty = Board::new(size).unwrap();
            let decision = decide_move(SearchAlgorithm::Minimax, &empty, Mark::O, Mark::X).unwrap();
            assert_eq!(
                decision,
                MoveDecision {
                    position: pos(size / 2, size / 2),
                    nodes: 0
                }
            );
        }
    }

    #[test]
    fn test_decision_reports_search_cost() {
        let board = Board::new(3).unwrap().mark(Mark::X, pos(0, 0)).unwrap();
        let decision = decide_move(SearchAlgorithm::AlphaBeta, &board, Mark::O, Mark::X).unwrap();
        let searched =
            search_best_move(SearchAlgorithm::AlphaBeta, &board, Mark::O, Mark::X).unwrap();

        assert_eq!(searched.score, DRAW_SCORE);
        assert_eq!(decision.position, searched.position);
        assert_eq!(decision.nodes, searched.nodes);
        assert!(decision.nodes > 0);
    }

    #[test]
    fn test_choose_move_rejects_misuse() {
        let full: Board = "XOX/XOO/OXX".parse().unwrap();
        let won: Board = "OOO/XX_/X__".parse().unwrap();
        let empty = Board::new(3).unwrap();

        assert!(matches!(
            choose_move(&full, Mark::X, Mark::O),
            Err(TicTacToeError::PreconditionViolated(_))
        ));
        assert!(matches!(
            choose_move(&won, Mark::X, Mark::O),
            Err(TicTacToeError::PreconditionViolated(_))
        ));
        assert!(matches!(
            choose_move(&empty, Mark::X, Mark::X),
            Err(TicTacToeError::PreconditionViolated(_))
        ));
    }

    #[test]
    fn test_random_bot_picks_blank_cells() {
        let mut rng = StdRng::seed_from_u64(7);
        let board: Board = "XO_/_X_/O__".parse().unwrap();
        let input = BotInput {
            board: board.clone(),
            current_mark: Mark::O,
            algorithm: SearchAlgorithm::AlphaBeta,
        };

        for _ in 0..20 {
            let choice = calculate_move(BotType::Random, &input, &mut rng).unwrap();
            assert!(board.is_blank(choice));
        }
    }

    #[test]
    fn test_random_bot_rejects_finished_board() {
        let mut rng = StdRng::seed_from_u64(7);
        let input = BotInput {
            board: "XXX/OO_/___".parse().unwrap(),
            current_mark: Mark::O,
            algorithm: SearchAlgorithm::AlphaBeta,
        };
        assert!(calculate_move(BotType::Random, &input, &mut rng).is_err());
    }

    #[test]
    fn test_minimax_bot_uses_configured_algorithm() {
        let mut rng = StdRng::seed_from_u64(1);
        for algorithm in [
            SearchAlgorithm::AlphaBeta,
            SearchAlgorithm::Minimax,
            SearchAlgorithm::Negamax,
        ] {
            let input = BotInput {
                board: "O__/XX_/OOX".parse().unwrap(),
                current_mark: Mark::O,
                algorithm,
            };
            assert_eq!(calculate_move(BotType::Minimax, &input, &mut rng), Ok(pos(1, 2)));
        }
    }
}
