//! Rules engine adapter over `cozy-chess`.
//!
//! [`Position`] is the authoritative game state: legal move generation,
//! paired `push`/`pop`, terminal-state queries and FEN serialization.
//! `cozy-chess` boards are copy-make, so `pop` is served from a stack of
//! prior boards. The halfmove clock is tracked here as well because
//! `cozy-chess` saturates its own at the fifty-move threshold.

use std::fmt;

use cozy_chess::{Board, File, Square};
use tracing::trace;

use crate::chess_move::{CastleSide, Move};
use crate::color::Color;
use crate::error::RulesError;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;

/// The FEN string for the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Halfmove clock value at which the seventy-five move rule ends the game.
const SEVENTY_FIVE_MOVE_PLIES: u16 = 150;

/// Number of occurrences that ends the game by repetition.
const FIVEFOLD: usize = 5;

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The side to move is checkmated.
    Checkmate { winner: Color },
    /// The side to move has no legal moves and is not in check.
    Stalemate,
    /// The current position has occurred five times.
    FivefoldRepetition,
    /// 75 moves by each side without a capture or pawn move.
    SeventyFiveMoves,
    /// Neither side has mating material.
    InsufficientMaterial,
}

/// State needed to undo one pushed move.
#[derive(Clone)]
struct Undo {
    board: Board,
    mv: Move,
    halfmove_clock: u16,
}

/// Authoritative game state with a make/unmake history.
#[derive(Clone)]
pub struct Position {
    board: Board,
    halfmove_clock: u16,
    history: Vec<Undo>,
}

impl Position {
    /// The standard starting position.
    pub fn new() -> Position {
        Position {
            board: Board::default(),
            halfmove_clock: 0,
            history: Vec::new(),
        }
    }

    /// Parse a position from FEN.
    pub fn from_fen(fen: &str) -> Result<Position, RulesError> {
        let board = Board::from_fen(fen, false).map_err(|_| RulesError::InvalidFen {
            fen: fen.to_string(),
        })?;
        Ok(Position {
            halfmove_clock: u16::from(board.halfmove_clock()),
            board,
            history: Vec::new(),
        })
    }

    /// All legal moves for the side to move; empty if none.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.board.generate_moves(|piece_moves| {
            for mv in piece_moves {
                moves.push(self.from_engine_move(mv));
            }
            false
        });
        moves
    }

    /// Whether the side to move has at least one legal move.
    pub fn has_legal_moves(&self) -> bool {
        let mut found = false;
        self.board.generate_moves(|piece_moves| {
            found = piece_moves.into_iter().next().is_some();
            found
        });
        found
    }

    /// Apply a legal move.
    ///
    /// The move must come from [`legal_moves`](Self::legal_moves); use
    /// [`push_checked`](Self::push_checked) for untrusted input.
    pub fn push(&mut self, mv: Move) {
        let engine_move = self.to_engine_move(mv);
        let stm = self.board.side_to_move();
        let resets_clock = self.board.piece_on(mv.from) == Some(cozy_chess::Piece::Pawn)
            || self.board.color_on(mv.to) == Some(!stm);

        let undo = Undo {
            board: self.board.clone(),
            mv,
            halfmove_clock: self.halfmove_clock,
        };
        self.board.play_unchecked(engine_move);
        self.halfmove_clock = if resets_clock {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };
        self.history.push(undo);
        trace!(mv = %mv, ply = self.history.len(), "push");
    }

    /// Apply `mv` if it is legal, otherwise leave the position untouched.
    pub fn push_checked(&mut self, mv: Move) -> Result<(), RulesError> {
        if !self.legal_moves().contains(&mv) {
            return Err(RulesError::IllegalMove {
                uci_move: mv.to_uci(),
            });
        }
        self.push(mv);
        Ok(())
    }

    /// Undo the most recent move, returning it.
    pub fn pop(&mut self) -> Option<Move> {
        let undo = self.history.pop()?;
        self.board = undo.board;
        self.halfmove_clock = undo.halfmove_clock;
        trace!(mv = %undo.mv, ply = self.history.len(), "pop");
        Some(undo.mv)
    }

    /// Side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.board.side_to_move().into()
    }

    /// Number of moves pushed since the position was created.
    #[inline]
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// The most recently pushed move.
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|undo| undo.mv)
    }

    /// Moves pushed so far, oldest first.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.history.iter().map(|undo| undo.mv)
    }

    /// The piece standing on `sq`.
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        let kind = self.board.piece_on(sq)?;
        let color = self.board.color_on(sq)?;
        Some(Piece::new(kind.into(), color.into()))
    }

    /// Which way `mv` castles, if it is a castling move.
    pub fn castle_side(&self, mv: Move) -> Option<CastleSide> {
        if self.board.piece_on(mv.from) != Some(cozy_chess::Piece::King)
            || mv.from.rank() != mv.to.rank()
        {
            return None;
        }
        let from_file = mv.from.file() as i32;
        let to_file = mv.to.file() as i32;
        match to_file - from_file {
            2 => Some(CastleSide::KingSide),
            -2 => Some(CastleSide::QueenSide),
            _ => None,
        }
    }

    /// Whether the side to move is in check.
    pub fn is_check(&self) -> bool {
        !self.board.checkers().is_empty()
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check() && !self.has_legal_moves()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && !self.has_legal_moves()
    }

    /// Plies since the last capture or pawn move.
    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    pub fn is_seventyfive_moves(&self) -> bool {
        self.halfmove_clock >= SEVENTY_FIVE_MOVE_PLIES
    }

    /// Whether the current position has occurred five times in this game.
    pub fn is_fivefold_repetition(&self) -> bool {
        let current = self.board.hash();
        let earlier = self
            .history
            .iter()
            .filter(|undo| undo.board.hash() == current)
            .count();
        earlier + 1 >= FIVEFOLD
    }

    /// Bare kings, or a lone minor piece against a bare king.
    pub fn is_insufficient_material(&self) -> bool {
        let minors = self.board.pieces(cozy_chess::Piece::Knight)
            | self.board.pieces(cozy_chess::Piece::Bishop);
        match self.board.occupied().len() {
            2 => true,
            3 => minors.len() == 1,
            _ => false,
        }
    }

    /// How the game ended, or `None` while it is still running.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.has_legal_moves() {
            return Some(if self.is_check() {
                Outcome::Checkmate {
                    winner: !self.turn(),
                }
            } else {
                Outcome::Stalemate
            });
        }
        if self.is_fivefold_repetition() {
            Some(Outcome::FivefoldRepetition)
        } else if self.is_seventyfive_moves() {
            Some(Outcome::SeventyFiveMoves)
        } else if self.is_insufficient_material() {
            Some(Outcome::InsufficientMaterial)
        } else {
            None
        }
    }

    /// Checkmate, stalemate, or one of the automatic draws.
    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// Serialize the position as FEN.
    pub fn fen(&self) -> String {
        self.board.to_string()
    }

    /// `cozy-chess` encodes castling as the king capturing its own rook.
    fn from_engine_move(&self, mv: cozy_chess::Move) -> Move {
        let castling = self.board.piece_on(mv.from) == Some(cozy_chess::Piece::King)
            && self.board.color_on(mv.to) == Some(self.board.side_to_move());
        if castling {
            let file = if (mv.to.file() as usize) > (mv.from.file() as usize) {
                File::G
            } else {
                File::C
            };
            return Move::new(mv.from, Square::new(file, mv.from.rank()));
        }
        Move {
            from: mv.from,
            to: mv.to,
            promotion: mv.promotion.map(PieceKind::from),
        }
    }

    fn to_engine_move(&self, mv: Move) -> cozy_chess::Move {
        if let Some(side) = self.castle_side(mv) {
            let rook_file = match side {
                CastleSide::KingSide => File::H,
                CastleSide::QueenSide => File::A,
            };
            return cozy_chess::Move {
                from: mv.from,
                to: Square::new(rook_file, mv.from.rank()),
                promotion: None,
            };
        }
        cozy_chess::Move {
            from: mv.from,
            to: mv.to,
            promotion: mv.promotion.map(Into::into),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position(\"{}\")", self.fen())
    }
}
