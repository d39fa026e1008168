//! Console command parsing.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use tempo_core::{Color, Move};

use crate::error::PlayError;

/// Which colour the human wants to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    White,
    Black,
    /// Decided by a coin flip.
    Random,
}

impl ColorChoice {
    /// Settle the choice, flipping a coin for [`ColorChoice::Random`].
    pub fn resolve(self) -> Color {
        match self {
            ColorChoice::White => Color::White,
            ColorChoice::Black => Color::Black,
            ColorChoice::Random => {
                if rand::thread_rng().gen_bool(0.5) {
                    Color::White
                } else {
                    Color::Black
                }
            }
        }
    }
}

impl FromStr for ColorChoice {
    type Err = PlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(ColorChoice::White),
            "black" | "b" => Ok(ColorChoice::Black),
            "random" | "r" => Ok(ColorChoice::Random),
            _ => Err(PlayError::InvalidColor {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColorChoice::White => "white",
            ColorChoice::Black => "black",
            ColorChoice::Random => "random",
        })
    }
}

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `move <uci>` or a bare coordinate move.
    Move(String),
    /// `undo` -- take back to the human's previous turn.
    Undo,
    /// `new [white|black|random]` -- start over, keeping the colour if none given.
    NewGame(Option<ColorChoice>),
    /// `board` -- print the board.
    Board,
    /// `fen` -- print the position as FEN.
    Fen,
    /// `status` -- print whose turn it is or how the game ended.
    Status,
    /// `help` -- list commands.
    Help,
    /// `quit` -- leave.
    Quit,
    /// Anything else.
    Unknown(String),
}

/// Parse a single line of input into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, PlayError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return Ok(Command::Unknown(String::new()));
    }

    match tokens[0] {
        "move" | "m" => match tokens.get(1) {
            Some(mv) => Ok(Command::Move((*mv).to_string())),
            None => Err(PlayError::MissingArgument {
                command: "move".to_string(),
            }),
        },
        "undo" | "u" => Ok(Command::Undo),
        "new" => match tokens.get(1) {
            Some(color) => Ok(Command::NewGame(Some(color.parse()?))),
            None => Ok(Command::NewGame(None)),
        },
        "board" | "d" => Ok(Command::Board),
        "fen" => Ok(Command::Fen),
        "status" => Ok(Command::Status),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        word if word.parse::<Move>().is_ok() => Ok(Command::Move(word.to_string())),
        word => Ok(Command::Unknown(word.to_string())),
    }
}

/// Text printed by `help`.
pub const HELP: &str = "\
commands:
  <move>             play a move in coordinate notation, e.g. e2e4 or e7e8q
  move <move>        same as above
  undo               take back your last move and the engine's reply
  new [colour]       start a new game as white, black or random
  board              show the board
  fen                show the position as FEN
  status             show whose turn it is
  help               show this text
  quit               leave";
