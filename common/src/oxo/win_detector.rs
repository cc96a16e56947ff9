use super::board::Board;
use super::types::{Mark, Outcome};

/// True when `cell` is occupied and some line through it holds only that mark.
///
/// Only the lines through `cell` are inspected, so this is the check to use
/// right after a move has been played there.
pub fn has_line_through(board: &Board, cell: usize) -> bool {
    let mark = board.get(cell);
    if mark == Mark::Empty {
        return false;
    }

    board
        .line_index()
        .lines_at(cell)
        .any(|line| line.iter().all(|&i| board.get(i) == mark))
}

/// Classifies an arbitrary board without knowing how it was reached.
///
/// Scans every occupied cell, so prefer `has_line_through` when the last move
/// is known.
pub fn board_state(board: &Board) -> Outcome {
    for (cell, mark) in board.cells().iter().enumerate() {
        if let Some(player) = mark.player() {
            if has_line_through(board, cell) {
                return Outcome::win_for(player);
            }
        }
    }

    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}
