use oxo_common::OxoError;
use oxo_common::oxo::{Board, Mark};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("expected two numbers 'x y', got '{0}'")]
    Malformed(String),

    #[error("This position is already taken")]
    Taken,

    #[error(transparent)]
    Board(#[from] OxoError),
}

/// Turns `"x y"` into a cell index, with `x` the column and `y` the row.
pub fn parse_position(text: &str, board: &Board) -> Result<usize, InputError> {
    let malformed = || InputError::Malformed(text.trim().to_string());

    let mut parts = text.split_whitespace();
    let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed());
    };
    let x: usize = x.parse().map_err(|_| malformed())?;
    let y: usize = y.parse().map_err(|_| malformed())?;

    Ok(board.index_of(x, y)?)
}

/// A position that can be played right now: in range and empty.
pub fn read_move(text: &str, board: &Board) -> Result<usize, InputError> {
    let cell = parse_position(text, board)?;
    if board.get(cell) != Mark::Empty {
        return Err(InputError::Taken);
    }
    Ok(cell)
}
