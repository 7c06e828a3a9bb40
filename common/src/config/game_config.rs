use serde::{Deserialize, Serialize};

use super::Validate;
use crate::tictactoe::{MIN_BOARD_SIZE, Mark, PlayerKind, SearchAlgorithm};

pub const MAX_BOARD_SIZE: usize = 9;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GameConfig {
    pub board_size: usize,
    /// Asked interactively when unset.
    pub player_x: Option<PlayerKind>,
    pub player_o: Option<PlayerKind>,
    pub first_player: Mark,
    pub search: SearchAlgorithm,
}

impl GameConfig {
    pub fn player_kind(&self, mark: Mark) -> Option<PlayerKind> {
        match mark {
            Mark::X => self.player_x,
            Mark::O => self.player_o,
        }
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        if self.board_size < MIN_BOARD_SIZE || self.board_size > MAX_BOARD_SIZE {
            return Err(format!(
                "Board size must be between {} and {}, got {}",
                MIN_BOARD_SIZE, MAX_BOARD_SIZE, self.board_size
            ));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 3,
            player_x: None,
            player_o: None,
            first_player: Mark::X,
            search: SearchAlgorithm::AlphaBeta,
        }
    }
}
