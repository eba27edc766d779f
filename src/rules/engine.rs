//! Service traits the turn resolver calls into.
//!
//! Word validity, placement legality, scoring and move search are game
//! rules, not engine concerns. Implementations provide them through
//! [`WordRules`]; racks come from a [`RackDrawer`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Board, Move, PlayError, PlayedRack, Round};

/// Move checker and best-move search.
///
/// ## Implementation Notes
///
/// - `check_played_word`: only reads the board and rack; it never records
///   anything, so a rejected word leaves the game untouched
/// - `search`: must be deterministic, the same position always yields the
///   same ordering
pub trait WordRules {
    /// Check a word typed by a player.
    ///
    /// `coord` and `word` are the raw inputs (lowercase letters in `word`
    /// mark jokers). Returns the scored placement, or the reason for
    /// rejection.
    fn check_played_word(
        &self,
        board: &Board,
        rack: &PlayedRack,
        coord: &str,
        word: &str,
    ) -> Result<Round, PlayError>;

    /// Candidate moves for `rack` on `board`, best score first.
    ///
    /// Returns an empty list when no legal move exists.
    fn search(&self, board: &Board, rack: &PlayedRack) -> Vec<Move>;

    /// The top valid candidate, if any.
    fn best_move(&self, board: &Board, rack: &PlayedRack) -> Option<Move> {
        self.search(board, rack).into_iter().find(Move::is_valid)
    }
}

/// Why no further rack can be drawn.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndOfGame {
    /// No tile left, neither in the bag nor in the rack.
    #[error("no tile left")]
    EmptyBag,
    /// The remaining tiles cannot form a rack passing the vowel and
    /// consonant checks.
    #[error("no legal rack can be drawn")]
    NoLegalRack,
}

/// Source of racks.
pub trait RackDrawer {
    /// Complete `current` into the rack of turn `turn`.
    ///
    /// With `check`, the result must pass the vowel and consonant
    /// requirements; the whole rack may be put back and redrawn to get
    /// there.
    fn draw_rack(
        &mut self,
        turn: usize,
        board: &Board,
        current: &PlayedRack,
        check: bool,
    ) -> Result<PlayedRack, EndOfGame>;

    /// Whether [`draw_rack`](Self::draw_rack) can succeed.
    fn can_draw_rack(&self, board: &Board, current: &PlayedRack, check: bool) -> bool;
}

impl<T: WordRules + ?Sized> WordRules for Box<T> {
    fn check_played_word(
        &self,
        board: &Board,
        rack: &PlayedRack,
        coord: &str,
        word: &str,
    ) -> Result<Round, PlayError> {
        (**self).check_played_word(board, rack, coord, word)
    }

    fn search(&self, board: &Board, rack: &PlayedRack) -> Vec<Move> {
        (**self).search(board, rack)
    }
}

impl<T: RackDrawer + ?Sized> RackDrawer for Box<T> {
    fn draw_rack(
        &mut self,
        turn: usize,
        board: &Board,
        current: &PlayedRack,
        check: bool,
    ) -> Result<PlayedRack, EndOfGame> {
        (**self).draw_rack(turn, board, current, check)
    }

    fn can_draw_rack(&self, board: &Board, current: &PlayedRack, check: bool) -> bool {
        (**self).can_draw_rack(board, current, check)
    }
}
