use std::fmt;
use std::io::{BufRead, Write};

use oxo_common::log;
use oxo_common::oxo::{Board, MinimaxSearch, Outcome, OxoGameState, Player};

use crate::error::Result;
use crate::interface::read_move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Computer,
    Battle,
    Local,
}

pub struct ComputerPlayer {
    search: MinimaxSearch,
}

impl ComputerPlayer {
    pub fn new(search: MinimaxSearch) -> Self {
        Self { search }
    }

    fn choose_move(&mut self, board: &mut Board, mover: Player) -> Result<usize> {
        self.search.reset_stats();
        let cell = self.search.best_move(board, mover)?;
        log!(
            "Computer ({}) examined {} positions",
            mover,
            self.search.nodes_evaluated()
        );
        Ok(cell)
    }
}

pub enum Seat {
    Human,
    Computer(ComputerPlayer),
}

impl Seat {
    fn label(&self, mover: Player) -> String {
        match self {
            Seat::Human => mover.to_string(),
            Seat::Computer(_) => format!("Computer ({})", mover),
        }
    }

    fn victory_message(&self, mover: Player) -> String {
        match self {
            Seat::Human => format!("{} wins", mover),
            Seat::Computer(_) => "I'm sorry, Dave. I'm afraid I can't do that.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameFinish {
    Win { winner: Player, message: String },
    Draw,
}

impl fmt::Display for GameFinish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameFinish::Win { message, .. } => write!(f, "Win: {}", message),
            GameFinish::Draw => write!(f, "Draw: Nobody wins!"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameSetup {
    pub size: usize,
    pub mode: Mode,
    pub human_first: bool,
    pub noughts_start: bool,
    pub verbose: bool,
    pub opening_shortcut: bool,
}

impl GameSetup {
    pub fn starting_player(&self) -> Player {
        if self.noughts_start { Player::O } else { Player::X }
    }

    fn computer(&self) -> Seat {
        Seat::Computer(ComputerPlayer::new(
            MinimaxSearch::new()
                .with_trace(self.verbose)
                .with_opening_shortcut(self.opening_shortcut),
        ))
    }

    /// Seats for (X, O).
    fn seats(&self) -> (Seat, Seat) {
        let (first, second) = match self.mode {
            Mode::Battle => (self.computer(), self.computer()),
            Mode::Local => (Seat::Human, Seat::Human),
            Mode::Computer if self.human_first => (Seat::Human, self.computer()),
            Mode::Computer => (self.computer(), Seat::Human),
        };
        match self.starting_player() {
            Player::X => (first, second),
            Player::O => (second, first),
        }
    }

    pub fn into_session<R: BufRead, W: Write>(
        self,
        input: R,
        output: W,
    ) -> Result<GameSession<R, W>> {
        let state = OxoGameState::new(self.size, self.starting_player())?;
        let (x, o) = self.seats();
        Ok(GameSession::new(state, x, o, input, output))
    }
}

pub struct GameSession<R, W> {
    state: OxoGameState,
    x: Seat,
    o: Seat,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> GameSession<R, W> {
    pub fn new(state: OxoGameState, x: Seat, o: Seat, input: R, output: W) -> Self {
        Self { state, x, o, input, output }
    }

    pub fn state(&self) -> &OxoGameState {
        &self.state
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Alternates turns until a line is completed, the board fills up or a
    /// human runs out of input.
    pub fn play(&mut self) -> Result<GameFinish> {
        writeln!(self.output, "{}\n", self.state.board)?;

        loop {
            let mover = self.state.current;
            let seat = match mover {
                Player::X => &mut self.x,
                Player::O => &mut self.o,
            };

            let cell = match &mut *seat {
                Seat::Computer(computer) => computer.choose_move(&mut self.state.board, mover)?,
                Seat::Human => {
                    match prompt_human(&mut self.input, &mut self.output, &self.state.board, mover)? {
                        Some(cell) => cell,
                        None => {
                            let winner = mover.opponent();
                            return Ok(GameFinish::Win {
                                winner,
                                message: format!("{} wins because {} is a coward", winner, mover),
                            });
                        }
                    }
                }
            };

            let outcome = self.state.place_mark(cell)?;
            let (x, y) = self.state.board.coordinates(cell);
            writeln!(self.output, "{} plays at ({}, {})", seat.label(mover), x, y)?;
            writeln!(self.output, "{}\n", self.state.board)?;

            match outcome {
                Outcome::InProgress => {}
                Outcome::Draw => return Ok(GameFinish::Draw),
                Outcome::XWon | Outcome::OWon => {
                    return Ok(GameFinish::Win {
                        winner: mover,
                        message: seat.victory_message(mover),
                    });
                }
            }
        }
    }
}

/// `None` when the input is exhausted.
fn prompt_human<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    board: &Board,
    mover: Player,
) -> Result<Option<usize>> {
    writeln!(output, "You are playing as {}", mover.name())?;
    loop {
        write!(output, "Enter the position you want to play in > ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(None);
        }

        match read_move(&line, board) {
            Ok(cell) => return Ok(Some(cell)),
            Err(err) => writeln!(output, "{}", err)?,
        }
    }
}
