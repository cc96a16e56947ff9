use std::io::Write;

use oxo_common::oxo::{Board, BoardTemplate, Mark, MinimaxSearch, Player, board_state, lines_through};

use crate::error::Result;

/// The side to move when none is given: whoever has fewer marks, X on ties.
pub fn infer_mover(board: &Board) -> Player {
    if board.count(Mark::X) > board.count(Mark::O) {
        Player::O
    } else {
        Player::X
    }
}

/// Prints the board and the computed move, or the result if the board is
/// already decided.
pub fn run_suggest<W: Write>(
    board_text: &str,
    mover: Option<Player>,
    verbose: bool,
    output: &mut W,
) -> Result<Option<usize>> {
    let mut board = Board::parse(board_text)?;
    writeln!(output, "{}\n", board)?;

    let state = board_state(&board);
    if state.is_finished() {
        writeln!(output, "Board is already decided: {}", state)?;
        return Ok(None);
    }

    let mover = mover.unwrap_or_else(|| infer_mover(&board));
    let mut search = MinimaxSearch::new().with_trace(verbose);
    let cell = search.best_move(&mut board, mover)?;
    let (x, y) = board.coordinates(cell);
    writeln!(
        output,
        "{} should play at ({}, {}) after examining {} positions",
        mover,
        x,
        y,
        search.nodes_evaluated()
    )?;

    Ok(Some(cell))
}

/// For every cell, lists the lines through it and draws each one with `M`
/// on the cell and `G` on the rest of the line.
pub fn run_lines<W: Write>(size: usize, output: &mut W) -> Result<()> {
    let index = lines_through(size)?;
    let template = BoardTemplate::for_size(size);

    for cell in 0..size * size {
        let lines: Vec<&[usize]> = index.lines_at(cell).collect();
        writeln!(output, "{} {:?}", cell, lines)?;

        for line in lines {
            let mut symbols = vec![' '; size * size];
            for &member in line {
                symbols[member] = 'G';
            }
            symbols[cell] = 'M';
            writeln!(output, "{}\n", template.render(&symbols))?;
        }
    }

    Ok(())
}
