mod command_line_interface;
mod game;
mod interface;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use command_line_interface::CommandLineInterface;
use game::Game;
use tictactoe_common::config::{
    ConfigManager, FileContentConfigProvider, GameConfig, Validate, YamlConfigSerializer,
};
use tictactoe_common::{Mark, PlayerKind, SearchAlgorithm, debug_log, log, logger};

const CONFIG_FILE_NAME: &str = "tictactoe_config.yaml";

#[derive(Parser)]
#[command(name = "tictactoe", about = "N x N tic-tac-toe against a perfect-play engine")]
struct Args {
    /// Config file, defaults to tictactoe_config.yaml next to the executable
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    size: Option<usize>,

    /// human, computer or random
    #[arg(long)]
    player_x: Option<PlayerKind>,

    /// human, computer or random
    #[arg(long)]
    player_o: Option<PlayerKind>,

    /// Mark that moves first, X or O
    #[arg(long)]
    first: Option<Mark>,

    /// alpha-beta, minimax or negamax
    #[arg(long)]
    search: Option<SearchAlgorithm>,

    /// Write the resulting settings back to the config file
    #[arg(long)]
    save_config: bool,

    #[arg(long)]
    use_log_prefix: bool,

    #[arg(long)]
    verbose: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut GameConfig) {
        if let Some(size) = self.size {
            config.board_size = size;
        }
        if let Some(kind) = self.player_x {
            config.player_x = Some(kind);
        }
        if let Some(kind) = self.player_o {
            config.player_o = Some(kind);
        }
        if let Some(mark) = self.first {
            config.first_player = mark;
        }
        if let Some(search) = self.search {
            config.search = search;
        }
    }
}

fn get_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("TicTacToe".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.verbose);

    let config_path = args.config.clone().unwrap_or_else(get_config_path);
    let config_manager: ConfigManager<FileContentConfigProvider, GameConfig, YamlConfigSerializer> =
        ConfigManager::from_yaml_file(config_path.clone());

    let mut config = config_manager.get_config()?;
    args.apply_overrides(&mut config);
    config.validate()?;
    debug_log!("Using config {:?} from {}", config, config_path.display());

    if args.save_config {
        config_manager.set_config(&config)?;
        log!("Saved config to {}", config_path.display());
    }

    let interface = CommandLineInterface::new(io::stdin().lock(), io::stdout().lock());
    let mut game = Game::new(config, interface, rand::rng());

    match game.run()? {
        Some(mark) => log!("Game over, {} won", mark),
        None => log!("Game over, draw"),
    }

    Ok(())
}
