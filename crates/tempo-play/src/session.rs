//! Interactive console session.

use std::io::{BufRead, Write};

use tempo_core::Color;
use tempo_engine::{EngineConfig, Game, GameError};
use tracing::{debug, info, warn};

use crate::command::{Command, HELP, parse_command};
use crate::error::PlayError;

/// A console game: reads commands line by line and answers each one.
///
/// The engine replies as soon as an accepted human move leaves it to move,
/// and opens the game when it has White.
pub struct Session {
    game: Game,
}

impl Session {
    /// Start a session with the human playing `human`.
    pub fn new(human: Color, config: EngineConfig) -> Result<Session, PlayError> {
        Ok(Session {
            game: Game::new(human, config)?,
        })
    }

    /// Wrap an existing game.
    pub fn with_game(game: Game) -> Session {
        Session { game }
    }

    #[inline]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run until `quit` or end of input.
    pub fn run(mut self, input: impl BufRead, mut output: impl Write) -> Result<(), PlayError> {
        writeln!(output, "tempo: you play {}. Type 'help' for commands.", self.game.human())?;
        self.show_board(&mut output)?;
        self.engine_reply(&mut output)?;

        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            debug!(cmd = %trimmed, "received command");

            let command = match parse_command(trimmed) {
                Ok(command) => command,
                Err(e) => {
                    warn!(error = %e, "command parse error");
                    writeln!(output, "error: {e}")?;
                    continue;
                }
            };

            match command {
                Command::Move(mv) => self.handle_move(&mv, &mut output)?,
                Command::Undo => self.handle_undo(&mut output)?,
                Command::NewGame(choice) => {
                    let human = choice.map_or(self.game.human(), |c| c.resolve());
                    self.game.new_game(human)?;
                    writeln!(output, "New game: you play {human}.")?;
                    self.show_board(&mut output)?;
                    self.engine_reply(&mut output)?;
                }
                Command::Board => self.show_board(&mut output)?,
                Command::Fen => writeln!(output, "{}", self.game.position().fen())?,
                Command::Status => self.show_status(&mut output)?,
                Command::Help => writeln!(output, "{HELP}")?,
                Command::Quit => break,
                Command::Unknown(word) => {
                    writeln!(output, "unknown command: {word} (try 'help')")?;
                }
            }
            output.flush()?;
        }

        info!("tempo shutting down");
        Ok(())
    }

    fn handle_move(&mut self, mv: &str, output: &mut impl Write) -> Result<(), PlayError> {
        match self.game.play_human(mv) {
            Ok(played) => {
                writeln!(output, "You play {played}.")?;
                self.show_board(output)?;
                self.engine_reply(output)
            }
            Err(e @ GameError::Shadow(_)) => Err(e.into()),
            Err(e) => {
                writeln!(output, "error: {e}")?;
                Ok(())
            }
        }
    }

    /// Take back to the human's previous turn.
    fn handle_undo(&mut self, output: &mut impl Write) -> Result<(), PlayError> {
        match self.game.undo() {
            Ok(mv) => writeln!(output, "Took back {mv}.")?,
            Err(GameError::NothingToUndo) => {
                writeln!(output, "Nothing to undo.")?;
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }
        if !self.game.is_human_turn() {
            match self.game.undo() {
                Ok(mv) => writeln!(output, "Took back {mv}.")?,
                Err(GameError::NothingToUndo) => {}
                Err(e) => return Err(e.into()),
            }
        }
        self.show_board(output)?;
        self.engine_reply(output)
    }

    /// Let the engine move if it is its turn.
    fn engine_reply(&mut self, output: &mut impl Write) -> Result<(), PlayError> {
        if !self.game.is_engine_turn() {
            return Ok(());
        }
        writeln!(output, "Evaluating...")?;
        output.flush()?;

        let turn = self.game.play_engine()?;
        writeln!(output, "Engine plays {}.", turn.mv)?;
        writeln!(output, "{} positions evaluated.", turn.nodes)?;
        self.show_board(output)
    }

    fn show_board(&self, output: &mut impl Write) -> Result<(), PlayError> {
        writeln!(output, "{}", self.game.shadow())?;
        self.show_status(output)
    }

    fn show_status(&self, output: &mut impl Write) -> Result<(), PlayError> {
        writeln!(output, "{}", self.game.status())?;
        if let Some((leader, pawns)) = self.game.ledger().advantage() {
            let who = if leader == self.game.human() { "You" } else { "Engine" };
            writeln!(output, "{who} (+{pawns})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tempo_core::Color;
    use tempo_engine::{EngineConfig, Game};

    use super::Session;

    fn config() -> EngineConfig {
        EngineConfig {
            deep_depth: 2,
            shallow_depth: 1,
        }
    }

    fn run(session: Session, script: &str) -> String {
        let mut out = Vec::new();
        session.run(Cursor::new(script), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn engine_replies_to_a_move() {
        let session = Session::new(Color::White, config()).unwrap();
        let out = run(session, "e2e4\nquit\n");
        assert!(out.contains("You play e2e4."));
        assert!(out.contains("Engine plays "));
        assert!(out.contains("positions evaluated."));
        assert!(out.contains("White's turn."));
    }

    #[test]
    fn engine_opens_as_white() {
        let session = Session::new(Color::Black, config()).unwrap();
        let out = run(session, "");
        assert!(out.contains("Engine plays "));
        assert!(out.contains("Black's turn."));
    }

    #[test]
    fn errors_are_reported_and_play_continues() {
        let session = Session::new(Color::White, config()).unwrap();
        let out = run(session, "e2e5\nflip\nnew purple\nfen\n");
        assert!(out.contains("error: illegal move: e2e5"));
        assert!(out.contains("unknown command: flip"));
        assert!(out.contains("error: invalid colour: purple"));
        assert!(out.contains("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"));
    }

    #[test]
    fn undo_returns_to_human_turn() {
        let session = Session::new(Color::White, config()).unwrap();
        let out = run(session, "d2d4\nundo\nfen\n");
        assert!(out.contains("Took back "));
        assert!(out.contains("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"));
    }

    #[test]
    fn nothing_to_undo_at_start() {
        let session = Session::new(Color::White, config()).unwrap();
        let out = run(session, "undo\n");
        assert!(out.contains("Nothing to undo."));
    }

    #[test]
    fn finished_game_reports_result() {
        let game = Game::from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
            Color::White,
            config(),
        )
        .unwrap();
        let out = run(Session::with_game(game), "status\ne2e3\n");
        assert!(out.contains("Black wins by checkmate."));
        assert!(out.contains("error: the game is over"));
    }
}
