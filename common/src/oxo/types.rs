use std::fmt;
use std::str::FromStr;

use crate::error::OxoError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    Empty,
    X,
    O,
}

impl Mark {
    pub fn symbol(&self) -> char {
        match self {
            Mark::Empty => ' ',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }

    pub fn player(&self) -> Option<Player> {
        match self {
            Mark::X => Some(Player::X),
            Mark::O => Some(Player::O),
            Mark::Empty => None,
        }
    }
}

/// The side about to move. Unlike `Mark` it can never be empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(&self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn to_mark(&self) -> Mark {
        match self {
            Player::X => Mark::X,
            Player::O => Mark::O,
        }
    }

    pub fn symbol(&self) -> char {
        self.to_mark().symbol()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Player::X => "crosses",
            Player::O => "noughts",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Player {
    type Err = OxoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" | "crosses" => Ok(Player::X),
            "o" | "noughts" => Ok(Player::O),
            _ => Err(OxoError::UnknownPlayer(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    XWon,
    OWon,
    Draw,
}

impl Outcome {
    pub fn win_for(player: Player) -> Outcome {
        match player {
            Player::X => Outcome::XWon,
            Player::O => Outcome::OWon,
        }
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::XWon => Some(Player::X),
            Outcome::OWon => Some(Player::O),
            Outcome::Draw | Outcome::InProgress => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        *self != Outcome::InProgress
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "in progress"),
            Outcome::XWon => write!(f, "X wins"),
            Outcome::OWon => write!(f, "O wins"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}
