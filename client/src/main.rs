mod commands;
mod config;
mod error;
mod interface;
mod session;

use std::io;

use clap::{Args, Parser, Subcommand};
use oxo_common::oxo::Player;
use oxo_common::{log, logger};
use rand::Rng;

use config::{CONFIG_FILE, ConfigManager, FirstPlayer, OxoConfig, Validate};
use error::ClientError;
use session::{GameFinish, GameSetup, Mode};

#[derive(Parser)]
#[command(name = "oxo", about = "Play noughts and crosses against a computer that never loses")]
struct Cli {
    #[arg(long)]
    use_log_prefix: bool,

    #[arg(long, default_value = CONFIG_FILE)]
    config: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play a game
    Play(PlayArgs),
    /// Compute the move for a given board, e.g. "_o__x____"
    Suggest {
        #[arg(short, long, default_value = "_o__x____")]
        board: String,
        /// x or o; inferred from the mark counts when omitted
        #[arg(short, long)]
        mover: Option<Player>,
        #[arg(short, long)]
        verbose: bool,
    },
    /// Show the lines through every cell of a board
    Lines {
        #[arg(short, long, default_value_t = 3)]
        size: usize,
    },
}

#[derive(Args, Default)]
struct PlayArgs {
    /// Play against the computer
    #[arg(short, long, conflicts_with_all = ["battle", "local"])]
    computer: bool,
    /// Computer plays against itself
    #[arg(short, long, conflicts_with = "local")]
    battle: bool,
    /// Two humans at one terminal
    #[arg(short, long)]
    local: bool,
    /// Start first when playing against the computer
    #[arg(long)]
    headstart: bool,
    /// Noughts start instead of crosses
    #[arg(long)]
    noughts_start: bool,
    /// Size of the board to play on
    #[arg(short, long)]
    size: Option<usize>,
    /// Show the minimax thought process
    #[arg(short, long)]
    verbose: bool,
    /// Write the effective settings back to the config file
    #[arg(long)]
    save_config: bool,
}

impl PlayArgs {
    fn mode(&self) -> Mode {
        if self.battle {
            Mode::Battle
        } else if self.local {
            Mode::Local
        } else {
            Mode::Computer
        }
    }

    /// File settings overridden by the flags given on the command line.
    fn merge(&self, config: &OxoConfig) -> OxoConfig {
        let mut merged = config.clone();
        if let Some(size) = self.size {
            merged.board_size = size;
        }
        if self.headstart {
            merged.first_player = FirstPlayer::Human;
        }
        merged.noughts_start |= self.noughts_start;
        merged.verbose |= self.verbose;
        merged
    }

    fn setup(&self, config: &OxoConfig) -> GameSetup {
        let human_first = match config.first_player {
            FirstPlayer::Human => true,
            FirstPlayer::Computer => false,
            FirstPlayer::Random => rand::rng().random(),
        };

        GameSetup {
            size: config.board_size,
            mode: self.mode(),
            human_first,
            noughts_start: config.noughts_start,
            verbose: config.verbose,
            opening_shortcut: config.opening_shortcut,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let prefix = if cli.use_log_prefix {
        Some("oxo".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    match cli.command.unwrap_or(Command::Play(PlayArgs::default())) {
        Command::Play(args) => {
            let manager: ConfigManager<_, OxoConfig, _> = ConfigManager::from_yaml_file(&cli.config);
            let config = args.merge(&manager.get_config()?);
            config.validate().map_err(ClientError::InvalidConfig)?;
            if args.save_config {
                manager.set_config(&config)?;
                log!("Saved settings to {}", cli.config);
            }
            let setup = args.setup(&config);

            if setup.size > 3 && setup.mode != Mode::Local {
                log!(
                    "Searching a {0}x{0} board exhaustively may take a very long time",
                    setup.size
                );
            }

            println!("Let's play noughts and crosses!");
            println!("Enter a move as its x coordinate followed by its y coordinate,");
            println!("separated by a space. For example '1 1' is the middle of a 3x3 board.\n");

            let mut session = setup.into_session(io::stdin().lock(), io::stdout())?;
            let finish = session.play()?;
            println!("{}", finish);
            log!(
                "Game over after {} moves, winner: {}",
                session.state().board.occupied_count(),
                match &finish {
                    GameFinish::Win { winner, .. } => winner.name(),
                    GameFinish::Draw => "nobody",
                }
            );
        }
        Command::Suggest { board, mover, verbose } => {
            commands::run_suggest(&board, mover, verbose, &mut io::stdout())?;
        }
        Command::Lines { size } => {
            commands::run_lines(size, &mut io::stdout())?;
        }
    }

    Ok(())
}
