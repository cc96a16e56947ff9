use std::fmt;
use std::ops::{ControlFlow, Deref, DerefMut};
use std::sync::Arc;

use super::lines::LineIndex;
use super::types::{Mark, Player};
use crate::error::{OxoError, Result};

/// A square board stored row-major. Cell `i` sits at `(i % size, i / size)`.
#[derive(Clone)]
pub struct Board {
    size: usize,
    cells: Vec<Mark>,
    lines: Arc<LineIndex>,
}

impl Board {
    pub fn new(size: usize) -> Result<Self> {
        let lines = LineIndex::for_size(size)?;
        Ok(Self {
            size,
            cells: vec![Mark::Empty; size * size],
            lines,
        })
    }

    pub fn from_cells(cells: Vec<Mark>) -> Result<Self> {
        let size = cells.len().isqrt();
        if size == 0 || size * size != cells.len() {
            return Err(OxoError::NotSquare(cells.len()));
        }
        let lines = LineIndex::for_size(size)?;
        Ok(Self { size, cells, lines })
    }

    /// Reads `_`, `x` and `o` (any case) as cells and skips everything else.
    pub fn parse(text: &str) -> Result<Self> {
        let cells = text.chars().filter_map(cell_from_char).collect();
        Self::from_cells(cells)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Mark] {
        &self.cells
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.lines
    }

    pub fn get(&self, cell: usize) -> Mark {
        self.cells[cell]
    }

    pub fn set(&mut self, cell: usize, mark: Mark) -> Result<()> {
        let cells = self.cells.len();
        let slot = self
            .cells
            .get_mut(cell)
            .ok_or(OxoError::CellOutOfRange { cell, cells })?;
        *slot = mark;
        Ok(())
    }

    pub fn is_empty_board(&self) -> bool {
        self.cells.iter().all(|&cell| cell == Mark::Empty)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Mark::Empty)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != Mark::Empty).count()
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&cell| cell == mark).count()
    }

    pub fn first_empty(&self) -> Option<usize> {
        self.cells.iter().position(|&cell| cell == Mark::Empty)
    }

    pub fn coordinates(&self, cell: usize) -> (usize, usize) {
        (cell % self.size, cell / self.size)
    }

    pub fn index_of(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.size || y >= self.size {
            return Err(OxoError::PositionOutOfRange { x, y, size: self.size });
        }
        Ok(y * self.size + x)
    }

    /// Puts `player`'s mark on the empty `cell` until the returned guard is
    /// dropped, at which point the cell is empty again.
    pub fn place(&mut self, cell: usize, player: Player) -> Result<MoveGuard<'_>> {
        match self.cells.get(cell).copied() {
            None => Err(OxoError::CellOutOfRange {
                cell,
                cells: self.cells.len(),
            }),
            Some(Mark::Empty) => Ok(self.occupy(cell, player)),
            Some(_) => Err(OxoError::CellOccupied(cell)),
        }
    }

    // Caller has checked that `cell` is empty.
    fn occupy(&mut self, cell: usize, player: Player) -> MoveGuard<'_> {
        self.cells[cell] = player.to_mark();
        MoveGuard { board: self, cell }
    }

    /// Visits every empty cell in increasing index order with `player`'s mark
    /// placed on it. Each cell is emptied again before the next step starts,
    /// on `Break` and while unwinding as well.
    pub fn for_each_move<B>(
        &mut self,
        player: Player,
        mut visit: impl FnMut(usize, &mut Board) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        for cell in 0..self.cells.len() {
            if self.cells[cell] != Mark::Empty {
                continue;
            }
            let mut guard = self.occupy(cell, player);
            visit(cell, &mut *guard)?;
        }
        ControlFlow::Continue(())
    }
}

fn cell_from_char(c: char) -> Option<Mark> {
    match c {
        '_' => Some(Mark::Empty),
        'x' | 'X' => Some(Mark::X),
        'o' | 'O' => Some(Mark::O),
        _ => None,
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.cells == other.cells
    }
}

impl Eq for Board {}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("size", &self.size)
            .field("cells", &self.cells)
            .finish()
    }
}

pub struct MoveGuard<'a> {
    board: &'a mut Board,
    cell: usize,
}

impl MoveGuard<'_> {
    pub fn cell(&self) -> usize {
        self.cell
    }
}

impl Deref for MoveGuard<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        self.board.cells[self.cell] = Mark::Empty;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(3).unwrap();
        assert_eq!(board.cell_count(), 9);
        assert!(board.is_empty_board());
        assert!(!board.is_full());
        assert_eq!(board.first_empty(), Some(0));
    }

    #[test]
    fn test_new_rejects_zero_size() {
        assert_eq!(Board::new(0).unwrap_err(), OxoError::InvalidBoardSize(0));
    }

    #[test]
    fn test_parse_ignores_other_characters() {
        let board = Board::parse("x o _\n_ X _\n_ _ O").unwrap();
        assert_eq!(board.size(), 3);
        assert_eq!(board.get(0), Mark::X);
        assert_eq!(board.get(1), Mark::O);
        assert_eq!(board.get(4), Mark::X);
        assert_eq!(board.get(8), Mark::O);
        assert_eq!(board.occupied_count(), 4);
    }

    #[test]
    fn test_parse_rejects_non_square() {
        assert_eq!(Board::parse("xo_x_").unwrap_err(), OxoError::NotSquare(5));
        assert_eq!(Board::parse("").unwrap_err(), OxoError::NotSquare(0));
        assert_eq!(Board::parse("hello world").unwrap_err(), OxoError::NotSquare(2));
    }

    #[test]
    fn test_coordinates_round_trip() {
        let board = Board::new(4).unwrap();
        assert_eq!(board.coordinates(6), (2, 1));
        assert_eq!(board.index_of(2, 1), Ok(6));
        assert_eq!(
            board.index_of(4, 0),
            Err(OxoError::PositionOutOfRange { x: 4, y: 0, size: 4 })
        );
    }

    #[test]
    fn test_set_out_of_range() {
        let mut board = Board::new(2).unwrap();
        assert_eq!(
            board.set(4, Mark::X),
            Err(OxoError::CellOutOfRange { cell: 4, cells: 4 })
        );
    }

    #[test]
    fn test_place_guard_restores_cell() {
        let mut board = Board::new(3).unwrap();
        {
            let guard = board.place(4, Player::X).unwrap();
            assert_eq!(guard.cell(), 4);
            assert_eq!(guard.get(4), Mark::X);
        }
        assert!(board.is_empty_board());
    }

    #[test]
    fn test_place_rejects_taken_cell() {
        let mut board = Board::parse("x__ ___ ___").unwrap();
        assert!(matches!(
            board.place(0, Player::O),
            Err(OxoError::CellOccupied(0))
        ));
        assert_eq!(board.get(0), Mark::X);
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_place_rejects_out_of_range_cell() {
        let mut board = Board::new(3).unwrap();
        assert!(matches!(
            board.place(9, Player::X),
            Err(OxoError::CellOutOfRange { cell: 9, cells: 9 })
        ));
        assert!(board.is_empty_board());
    }

    #[test]
    fn test_for_each_move_visits_empty_cells_in_order() {
        let mut board = Board::parse("x__ _o_ ___").unwrap();
        let mut seen = Vec::new();
        let flow: ControlFlow<()> = board.for_each_move(Player::X, |cell, current| {
            assert_eq!(current.get(cell), Mark::X);
            assert_eq!(current.occupied_count(), 3);
            seen.push(cell);
            ControlFlow::Continue(())
        });
        assert_eq!(flow, ControlFlow::Continue(()));
        assert_eq!(seen, vec![1, 2, 3, 5, 6, 7, 8]);
    }

    #[test]
    fn test_for_each_move_leaves_board_unchanged() {
        let mut board = Board::parse("xo_ _x_ o__").unwrap();
        let before = board.clone();
        let _: ControlFlow<()> = board.for_each_move(Player::O, |_, current| {
            let _: ControlFlow<()> = current.for_each_move(Player::X, |_, _| ControlFlow::Continue(()));
            ControlFlow::Continue(())
        });
        assert_eq!(board, before);
    }

    #[test]
    fn test_for_each_move_break_restores_board() {
        let mut board = Board::new(3).unwrap();
        let flow = board.for_each_move(Player::O, |cell, _| {
            if cell == 2 {
                ControlFlow::Break(cell)
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(flow, ControlFlow::Break(2));
        assert!(board.is_empty_board());
    }

    #[test]
    fn test_for_each_move_restores_board_on_panic() {
        let mut board = Board::new(3).unwrap();
        let result = catch_unwind(AssertUnwindSafe(|| {
            let _: ControlFlow<()> = board.for_each_move(Player::X, |cell, _| {
                if cell == 3 {
                    panic!("consumer failed");
                }
                ControlFlow::Continue(())
            });
        }));
        assert!(result.is_err());
        assert!(board.is_empty_board());
    }

    #[test]
    fn test_for_each_move_on_full_board_is_empty() {
        let mut board = Board::parse("xox oxo oxo").unwrap();
        let mut visited = 0;
        let _: ControlFlow<()> = board.for_each_move(Player::X, |_, _| {
            visited += 1;
            ControlFlow::Continue(())
        });
        assert_eq!(visited, 0);
    }
}
