use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use super::board::Board;

static BOARD_TEMPLATE_REGISTRY: OnceLock<Mutex<HashMap<usize, Arc<BoardTemplate>>>> =
    OnceLock::new();

/// Column header and row separator for one board size.
#[derive(Debug)]
pub struct BoardTemplate {
    size: usize,
    header: String,
    separator: String,
}

impl BoardTemplate {
    pub fn for_size(size: usize) -> Arc<BoardTemplate> {
        let registry = BOARD_TEMPLATE_REGISTRY.get_or_init(|| Mutex::new(HashMap::new()));
        let mut registry = registry.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            registry
                .entry(size)
                .or_insert_with(|| Arc::new(Self::build(size))),
        )
    }

    fn build(size: usize) -> Self {
        let header: String = (0..size).map(|x| format!("{:4}", x)).collect();
        let separator = format!("  {}", vec!["---"; size].join("+"));
        Self { size, header, separator }
    }

    /// Lays out one symbol per cell, row-major. `symbols` must hold exactly
    /// `size * size` entries.
    pub fn render(&self, symbols: &[char]) -> String {
        debug_assert_eq!(symbols.len(), self.size * self.size);

        let rows: Vec<String> = symbols
            .chunks(self.size.max(1))
            .enumerate()
            .map(|(y, row)| {
                let cells: Vec<String> = row.iter().map(|c| format!(" {} ", c)).collect();
                format!("{:2}{}", y, cells.join("|"))
            })
            .collect();

        let joiner = format!("\n{}\n", self.separator);
        format!("{}\n{}", self.header, rows.join(joiner.as_str()))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols: Vec<char> = self.cells().iter().map(|mark| mark.symbol()).collect();
        f.write_str(&BoardTemplate::for_size(self.size()).render(&symbols))
    }
}
