use std::ops::ControlFlow;

use super::board::Board;
use super::types::{Outcome, Player};
use super::win_detector::{board_state, has_line_through};
use crate::error::{OxoError, Result};
use crate::log;

/// Played on an empty board without searching.
pub const OPENING_CELL: usize = 0;

/// Folds child outcomes for `mover`, who prefers own win, then draw, then loss.
/// Stops pulling from `outcomes` at the first win for `mover`.
pub fn optimise(outcomes: impl IntoIterator<Item = Outcome>, mover: Player) -> Outcome {
    let mut preference = Preference::new(mover);
    for outcome in outcomes {
        if let ControlFlow::Break(best) = preference.consider(outcome) {
            return best;
        }
    }
    preference.settle()
}

struct Preference {
    mover: Player,
    draw_seen: bool,
}

impl Preference {
    fn new(mover: Player) -> Self {
        Self { mover, draw_seen: false }
    }

    fn consider(&mut self, outcome: Outcome) -> ControlFlow<Outcome> {
        if outcome == Outcome::win_for(self.mover) {
            return ControlFlow::Break(outcome);
        }
        if outcome == Outcome::Draw {
            self.draw_seen = true;
        }
        ControlFlow::Continue(())
    }

    fn settle(self) -> Outcome {
        if self.draw_seen {
            Outcome::Draw
        } else {
            Outcome::win_for(self.mover.opponent())
        }
    }
}

/// Exhaustive minimax over the full game tree.
#[derive(Debug, Clone)]
pub struct MinimaxSearch {
    opening_shortcut: bool,
    trace: bool,
    nodes_evaluated: u64,
}

impl Default for MinimaxSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl MinimaxSearch {
    pub fn new() -> Self {
        Self {
            opening_shortcut: true,
            trace: false,
            nodes_evaluated: 0,
        }
    }

    pub fn with_opening_shortcut(mut self, enabled: bool) -> Self {
        self.opening_shortcut = enabled;
        self
    }

    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.trace = enabled;
        self
    }

    pub fn nodes_evaluated(&self) -> u64 {
        self.nodes_evaluated
    }

    pub fn reset_stats(&mut self) {
        self.nodes_evaluated = 0;
    }

    /// Value of the position reached by `last_move`, with `mover` next to play
    /// and `depth` cells occupied.
    pub fn evaluate(
        &mut self,
        board: &mut Board,
        mover: Player,
        last_move: usize,
        depth: usize,
    ) -> Outcome {
        self.nodes_evaluated += 1;
        if self.trace {
            log!(
                "{}Examining as {} {}:\n{}",
                pad(depth),
                mover,
                depth,
                indent(&board.to_string(), depth + 1)
            );
        }

        if has_line_through(board, last_move) {
            let outcome = Outcome::win_for(mover.opponent());
            if self.trace {
                log!("{}State here: {}", pad(depth), outcome);
            }
            return outcome;
        }

        if depth == board.cell_count() {
            if self.trace {
                log!("{}Draw here", pad(depth));
            }
            return Outcome::Draw;
        }

        self.fold_children(board, mover, depth + 1)
    }

    /// Game-theoretic value of `board` with `mover` to play.
    pub fn solve(&mut self, board: &mut Board, mover: Player) -> Outcome {
        let state = board_state(board);
        if state.is_finished() {
            return state;
        }
        let depth = board.occupied_count() + 1;
        self.fold_children(board, mover, depth)
    }

    // `child_depth` is the occupied count once `mover` has played.
    fn fold_children(&mut self, board: &mut Board, mover: Player, child_depth: usize) -> Outcome {
        let mut preference = Preference::new(mover);
        let flow = board.for_each_move(mover, |cell, next| {
            let outcome = self.evaluate(next, mover.opponent(), cell, child_depth);
            preference.consider(outcome)
        });

        match flow {
            ControlFlow::Break(outcome) => outcome,
            ControlFlow::Continue(()) => preference.settle(),
        }
    }

    /// Picks a winning move if one exists, else the first drawing move, else
    /// the first empty cell.
    pub fn best_move(&mut self, board: &mut Board, mover: Player) -> Result<usize> {
        if board.is_full() {
            return Err(OxoError::NoLegalMoves);
        }
        if board_state(board).is_finished() {
            return Err(OxoError::GameOver);
        }
        if self.opening_shortcut && board.is_empty_board() {
            return Ok(OPENING_CELL);
        }

        let depth = board.occupied_count() + 1;
        let win = Outcome::win_for(mover);
        let mut draw_move = None;

        let flow = board.for_each_move(mover, |cell, next| {
            let outcome = self.evaluate(next, mover.opponent(), cell, depth);
            if outcome == win {
                if self.trace {
                    log!("Win incoming at {}", cell);
                }
                return ControlFlow::Break(cell);
            }
            if outcome == Outcome::Draw && draw_move.is_none() {
                if self.trace {
                    log!("Draw forcible at {}", cell);
                }
                draw_move = Some(cell);
            }
            ControlFlow::Continue(())
        });

        if let ControlFlow::Break(cell) = flow {
            return Ok(cell);
        }
        match draw_move {
            Some(cell) => Ok(cell),
            None => board.first_empty().ok_or(OxoError::NoLegalMoves),
        }
    }
}

pub fn best_move(board: &mut Board, mover: Player) -> Result<usize> {
    MinimaxSearch::new().best_move(board, mover)
}

fn pad(depth: usize) -> String {
    " ".repeat(depth)
}

fn indent(text: &str, depth: usize) -> String {
    let prefix = pad(depth);
    text.lines()
        .map(|line| format!("{}{}", prefix, line))
        .collect::<Vec<_>>()
        .join("\n")
}
