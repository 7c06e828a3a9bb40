use std::io;

use rand::Rng;
use tictactoe_common::config::GameConfig;
use tictactoe_common::{
    BotInput, Mark, PlayerKind, Position, TicTacToeError, TicTacToeGameState, calculate_move,
    log,
};

use crate::interface::Interface;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Rules(#[from] TicTacToeError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Players {
    x: PlayerKind,
    o: PlayerKind,
}

impl Players {
    fn kind(&self, mark: Mark) -> PlayerKind {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }
}

pub struct Game<I: Interface, R: Rng> {
    config: GameConfig,
    interface: I,
    rng: R,
}

impl<I: Interface, R: Rng> Game<I, R> {
    pub fn new(config: GameConfig, interface: I, rng: R) -> Self {
        Self {
            config,
            interface,
            rng,
        }
    }

    #[cfg(test)]
    pub fn into_interface(self) -> I {
        self.interface
    }

    /// Plays one game to the end and returns the winner, `None` for a draw.
    pub fn run(&mut self) -> Result<Option<Mark>, GameError> {
        let players = self.set_up()?;
        let mut state = TicTacToeGameState::new(self.config.board_size, self.config.first_player)?;

        log!(
            "Starting {}x{} game: X is {}, O is {}, {} moves first, {} search",
            self.config.board_size,
            self.config.board_size,
            players.x,
            players.o,
            self.config.first_player,
            self.config.search
        );
        if self.config.board_size > 3 && (!players.x.is_human() || !players.o.is_human()) {
            log!("Exhaustive search on boards larger than 3x3 can take a very long time");
        }

        while !state.is_over() {
            self.handle_one_turn(&mut state, &players)?;
        }

        self.handle_game_over(&state)?;
        Ok(state.winner())
    }

    fn set_up(&mut self) -> Result<Players, GameError> {
        self.interface.show_instructions()?;

        let mut resolve = |mark: Mark| match self.config.player_kind(mark) {
            Some(kind) => Ok(kind),
            None => self.interface.solicit_player_kind(mark),
        };
        let x = resolve(Mark::X)?;
        let o = resolve(Mark::O)?;

        Ok(Players { x, o })
    }

    fn handle_one_turn(
        &mut self,
        state: &mut TicTacToeGameState,
        players: &Players,
    ) -> Result<(), GameError> {
        self.interface.show_board(state.board())?;

        let mark = state.current_mark();
        let pos = self.place_valid_move(state, players.kind(mark))?;
        self.interface.report_move(mark, pos)?;
        Ok(())
    }

    fn place_valid_move(
        &mut self,
        state: &mut TicTacToeGameState,
        kind: PlayerKind,
    ) -> Result<Position, GameError> {
        loop {
            let pos = self.next_move(state, kind)?;
            match state.place_mark(pos) {
                Ok(()) => return Ok(pos),
                Err(err) if err.is_rejected_move() => {
                    self.interface.report_invalid_move(pos)?;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn next_move(
        &mut self,
        state: &TicTacToeGameState,
        kind: PlayerKind,
    ) -> Result<Position, GameError> {
        match kind.bot_type() {
            None => Ok(self.interface.solicit_move(state.current_mark())?),
            Some(bot_type) => {
                let input = BotInput::from_game_state(state, self.config.search);
                Ok(calculate_move(bot_type, &input, &mut self.rng)?)
            }
        }
    }

    fn handle_game_over(&mut self, state: &TicTacToeGameState) -> Result<(), GameError> {
        self.interface.show_board(state.board())?;
        if let Some(line) = state.winning_line() {
            let size = state.board().size();
            let (start, end) = (line.start(size), line.end(size));
            log!(
                "{} completed a line from ({}, {}) to ({}, {})",
                line.mark,
                start.row,
                start.col,
                end.row,
                end.col
            );
        }
        self.interface.report_game_over(state.winner())?;
        Ok(())
    }
}
