mod board;
mod bot_controller;
mod format;
mod game_state;
mod lines;
mod types;
mod win_detector;

pub use board::{Board, MoveGuard};
pub use bot_controller::{MinimaxSearch, OPENING_CELL, best_move, optimise};
pub use format::BoardTemplate;
pub use game_state::OxoGameState;
pub use lines::{Line, LineIndex, lines_at, lines_through};
pub use types::{Mark, Outcome, Player};
pub use win_detector::{board_state, has_line_through};
