use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use crate::error::{OxoError, Result};

/// Cell indices of one row, column or diagonal, in board order.
pub type Line = Vec<usize>;

static LINE_INDEX_REGISTRY: OnceLock<Mutex<HashMap<usize, Arc<LineIndex>>>> = OnceLock::new();

#[derive(Debug, PartialEq, Eq)]
pub struct LineIndex {
    size: usize,
    lines: Vec<Line>,
    by_cell: Vec<Vec<usize>>,
}

impl LineIndex {
    /// Returns the shared index for `size`, building it on first use.
    pub fn for_size(size: usize) -> Result<Arc<LineIndex>> {
        let registry = LINE_INDEX_REGISTRY.get_or_init(|| Mutex::new(HashMap::new()));
        let mut registry = registry.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(index) = registry.get(&size) {
            return Ok(Arc::clone(index));
        }

        let index = Arc::new(Self::build(size)?);
        registry.insert(size, Arc::clone(&index));
        Ok(index)
    }

    fn build(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(OxoError::InvalidBoardSize(size));
        }

        let mut lines: Vec<Line> = Vec::with_capacity(2 * size + 2);
        for i in 0..size {
            lines.push((i * size..i * size + size).collect());
            lines.push((0..size).map(|k| i + k * size).collect());
        }
        lines.push((0..size).map(|k| k * (size + 1)).collect());
        lines.push((1..=size).map(|k| k * (size - 1)).collect());

        let by_cell: Vec<Vec<usize>> = (0..size * size)
            .map(|cell| {
                lines
                    .iter()
                    .enumerate()
                    .filter(|(_, line)| line.contains(&cell))
                    .map(|(line_idx, _)| line_idx)
                    .collect::<Vec<usize>>()
            })
            .collect();

        Ok(Self { size, lines, by_cell })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Lines containing `cell`. Panics if `cell` is outside the board.
    pub fn lines_at(&self, cell: usize) -> impl Iterator<Item = &[usize]> + '_ {
        self.by_cell[cell].iter().map(|&line_idx| self.lines[line_idx].as_slice())
    }
}

pub fn lines_through(size: usize) -> Result<Arc<LineIndex>> {
    LineIndex::for_size(size)
}

pub fn lines_at(size: usize, cell: usize) -> Result<Vec<Line>> {
    let index = LineIndex::for_size(size)?;
    let cells = size * size;
    if cell >= cells {
        return Err(OxoError::CellOutOfRange { cell, cells });
    }
    Ok(index.lines_at(cell).map(<[usize]>::to_vec).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_count_and_shape() {
        for size in 1..=7 {
            let index = lines_through(size).unwrap();
            assert_eq!(index.lines().len(), 2 * size + 2);
            for line in index.lines() {
                assert_eq!(line.len(), size);
                assert!(line.iter().all(|&cell| cell < size * size));
                let mut sorted = line.clone();
                sorted.sort_unstable();
                sorted.dedup();
                assert_eq!(sorted.len(), size, "duplicate cell in {:?}", line);
            }
        }
    }

    #[test]
    fn test_lines_for_size_three() {
        let index = lines_through(3).unwrap();
        let lines = index.lines();
        assert!(lines.contains(&vec![0, 1, 2]));
        assert!(lines.contains(&vec![6, 7, 8]));
        assert!(lines.contains(&vec![1, 4, 7]));
        assert!(lines.contains(&vec![0, 4, 8]));
        assert!(lines.contains(&vec![2, 4, 6]));
    }

    #[test]
    fn test_membership_counts() {
        for size in 2..=6 {
            let index = lines_through(size).unwrap();
            for cell in 0..size * size {
                let (x, y) = (cell % size, cell / size);
                let on_main = usize::from(x == y);
                let on_anti = usize::from(x + y == size - 1);
                let count = index.lines_at(cell).count();
                assert_eq!(count, 2 + on_main + on_anti, "size {} cell {}", size, cell);
            }

            let last = size * size - 1;
            for corner in [0, size - 1, last - (size - 1), last] {
                assert_eq!(index.lines_at(corner).count(), 3);
            }
        }
    }

    #[test]
    fn test_three_by_three_memberships() {
        let index = lines_through(3).unwrap();
        let counts: Vec<usize> = (0..9).map(|cell| index.lines_at(cell).count()).collect();
        assert_eq!(counts, vec![3, 2, 3, 2, 4, 2, 3, 2, 3]);
    }

    #[test]
    fn test_single_cell_board() {
        let index = lines_through(1).unwrap();
        assert_eq!(index.lines().len(), 4);
        assert_eq!(index.lines_at(0).count(), 4);
    }

    #[test]
    fn test_lines_at_consistent_with_lines_through() {
        let index = lines_through(4).unwrap();
        for cell in 0..16 {
            let through = lines_at(4, cell).unwrap();
            let expected: Vec<Line> = index
                .lines()
                .iter()
                .filter(|line| line.contains(&cell))
                .cloned()
                .collect();
            assert_eq!(through, expected);
        }
    }

    #[test]
    fn test_index_is_cached() {
        let first = lines_through(5).unwrap();
        let second = lines_through(5).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_zero_size_rejected() {
        assert_eq!(lines_through(0), Err(OxoError::InvalidBoardSize(0)));
    }

    #[test]
    fn test_lines_at_out_of_range() {
        assert_eq!(
            lines_at(3, 9),
            Err(OxoError::CellOutOfRange { cell: 9, cells: 9 })
        );
    }
}
