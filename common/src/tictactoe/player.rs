use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::bot_controller::BotType;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerKind {
    Human,
    Computer,
    Random,
}

impl PlayerKind {
    pub fn bot_type(&self) -> Option<BotType> {
        match self {
            PlayerKind::Human => None,
            PlayerKind::Computer => Some(BotType::Minimax),
            PlayerKind::Random => Some(BotType::Random),
        }
    }

    pub fn is_human(&self) -> bool {
        *self == PlayerKind::Human
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayerKind::Human => "human",
            PlayerKind::Computer => "computer",
            PlayerKind::Random => "random",
        };
        f.write_str(name)
    }
}

impl FromStr for PlayerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(PlayerKind::Human),
            "computer" => Ok(PlayerKind::Computer),
            "random" => Ok(PlayerKind::Random),
            _ => Err(format!("Unknown player kind '{}'", s)),
        }
    }
}
