use super::board::Board;
use super::types::{Mark, Outcome, Player};
use super::win_detector::{board_state, has_line_through};
use crate::error::{OxoError, Result};

#[derive(Debug, Clone)]
pub struct OxoGameState {
    pub board: Board,
    pub current: Player,
    pub status: Outcome,
    pub last_move: Option<usize>,
}

impl OxoGameState {
    pub fn new(size: usize, first: Player) -> Result<Self> {
        Ok(Self {
            board: Board::new(size)?,
            current: first,
            status: Outcome::InProgress,
            last_move: None,
        })
    }

    /// Resumes from an arbitrary position, classifying it with a full scan.
    pub fn from_board(board: Board, mover: Player) -> Self {
        let status = board_state(&board);
        Self {
            board,
            current: mover,
            status,
            last_move: None,
        }
    }

    pub fn place_mark(&mut self, cell: usize) -> Result<Outcome> {
        if self.status.is_finished() {
            return Err(OxoError::GameOver);
        }

        let cells = self.board.cell_count();
        if cell >= cells {
            return Err(OxoError::CellOutOfRange { cell, cells });
        }

        if self.board.get(cell) != Mark::Empty {
            return Err(OxoError::CellOccupied(cell));
        }

        self.board.set(cell, self.current.to_mark())?;
        self.last_move = Some(cell);

        if has_line_through(&self.board, cell) {
            self.status = Outcome::win_for(self.current);
        } else if self.board.is_full() {
            self.status = Outcome::Draw;
        } else {
            self.current = self.current.opponent();
        }

        Ok(self.status)
    }

    pub fn winner(&self) -> Option<Player> {
        self.status.winner()
    }
}
