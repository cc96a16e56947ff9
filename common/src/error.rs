use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OxoError {
    #[error("board size must be at least 1, got {0}")]
    InvalidBoardSize(usize),

    #[error("board has {0} cells, which is not a positive square number")]
    NotSquare(usize),

    #[error("cell {cell} is out of range for a board of {cells} cells")]
    CellOutOfRange { cell: usize, cells: usize },

    #[error("position ({x}, {y}) is not in range [0,{size})")]
    PositionOutOfRange { x: usize, y: usize, size: usize },

    #[error("cell {0} is already taken")]
    CellOccupied(usize),

    #[error("game is already over")]
    GameOver,

    #[error("no legal moves left on the board")]
    NoLegalMoves,

    #[error("unknown player '{0}' (expected 'x' or 'o')")]
    UnknownPlayer(String),
}

pub type Result<T> = std::result::Result<T, OxoError>;
