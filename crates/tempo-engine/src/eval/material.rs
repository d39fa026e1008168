//! Material ledger: running totals of remaining material per side.
//!
//! Each total starts at [`BASELINE`] and only moves when material leaves or
//! changes on the board, so `BASELINE - remaining(side)` is always the value
//! of that side's missing pieces. The search updates the ledger on every
//! simulated capture and restores it on unmake.

use tempo_core::{Color, PieceKind, ShadowBoard};

/// Sum of the 16 starting pieces of one side.
pub const BASELINE: i32 = 13_900;

/// Once both sides are at or below this total the game counts as an endgame.
pub const ENDGAME_THRESHOLD: i32 = 11_500;

/// Remaining material for White and Black.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialLedger {
    totals: [i32; Color::COUNT],
}

impl MaterialLedger {
    /// Both sides at [`BASELINE`], as in the starting position.
    pub const fn new() -> MaterialLedger {
        MaterialLedger {
            totals: [BASELINE; Color::COUNT],
        }
    }

    /// Totals for an arbitrary position, summed from the shadow board.
    pub fn from_shadow(shadow: &ShadowBoard) -> MaterialLedger {
        let mut totals = [0; Color::COUNT];
        for (_, piece) in shadow.pieces() {
            totals[piece.color().index()] += piece.value();
        }
        MaterialLedger { totals }
    }

    /// Remaining material of `color`.
    #[inline]
    pub fn remaining(&self, color: Color) -> i32 {
        self.totals[color.index()]
    }

    /// Sum of both totals.
    #[inline]
    pub fn total(&self) -> i32 {
        self.totals.iter().sum()
    }

    /// `capturer` took a piece worth `value` from its opponent.
    #[inline]
    pub fn capture(&mut self, capturer: Color, value: i32) {
        self.totals[(!capturer).index()] -= value;
    }

    /// Reverse of [`capture`](Self::capture).
    #[inline]
    pub fn uncapture(&mut self, capturer: Color, value: i32) {
        self.totals[(!capturer).index()] += value;
    }

    /// A pawn of `color` became a `kind`.
    #[inline]
    pub fn promote(&mut self, color: Color, kind: PieceKind) {
        self.totals[color.index()] += kind.value() - PieceKind::Pawn.value();
    }

    /// Reverse of [`promote`](Self::promote).
    #[inline]
    pub fn unpromote(&mut self, color: Color, kind: PieceKind) {
        self.totals[color.index()] -= kind.value() - PieceKind::Pawn.value();
    }

    /// Material of `side` minus material of its opponent.
    #[inline]
    pub fn balance(&self, side: Color) -> i32 {
        self.remaining(side) - self.remaining(!side)
    }

    /// Both sides are at or below [`ENDGAME_THRESHOLD`].
    pub fn is_endgame(&self) -> bool {
        Color::ALL
            .iter()
            .all(|&color| self.remaining(color) <= ENDGAME_THRESHOLD)
    }

    /// The side ahead in material and its margin in whole pawns.
    ///
    /// Returns `None` when material is level.
    pub fn advantage(&self) -> Option<(Color, i32)> {
        let diff = self.balance(Color::White);
        match diff {
            0 => None,
            d if d > 0 => Some((Color::White, d / PieceKind::Pawn.value())),
            d => Some((Color::Black, -d / PieceKind::Pawn.value())),
        }
    }
}

impl Default for MaterialLedger {
    fn default() -> Self {
        Self::new()
    }
}
