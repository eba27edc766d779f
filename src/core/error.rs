//! Error types.
//!
//! Three families, matching how callers react to them:
//!
//! - [`PlayError`]: the move checker refused a submission. The numeric
//!   [`code`](PlayError::code) is stable and `0` means "accepted".
//! - [`GameError`]: an engine operation could not be carried out. Most
//!   variants reject user input and leave the engine untouched;
//!   [`is_fatal`](GameError::is_fatal) flags the consistency violations.
//! - `SaveError` (in `session::save`) for persistence.
//!
//! Running out of tiles or moves is not an error; see `EndReason`.

use thiserror::Error;

use super::moves::Move;
use super::player::PlayerId;
use crate::command::CommandId;

/// Why the move checker refused a word.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash)]
pub enum PlayError {
    #[error("invalid letters")]
    InvalidLetters,
    #[error("bad coordinates")]
    BadCoordinates,
    #[error("unknown word")]
    UnknownWord,
    #[error("letters not in the rack")]
    RackMismatch,
    #[error("word is contained in an existing word")]
    WordContainment,
    #[error("word replaces letters on the board")]
    LetterReplacement,
    #[error("invalid cross word")]
    InvalidCrossWord,
    #[error("word is already on the board")]
    DuplicatePlacement,
    #[error("word is not connected to the board")]
    Disconnected,
    #[error("first word must be horizontal")]
    FirstMoveHorizontal,
    #[error("first word must cover the center square")]
    FirstMoveCenter,
    #[error("word goes out of the board")]
    OutOfBoard,
    #[error("too many letters taken from the rack")]
    TooManyRackLetters,
}

impl PlayError {
    /// Every rejection, in code order.
    pub const ALL: [PlayError; 13] = [
        PlayError::InvalidLetters,
        PlayError::BadCoordinates,
        PlayError::UnknownWord,
        PlayError::RackMismatch,
        PlayError::WordContainment,
        PlayError::LetterReplacement,
        PlayError::InvalidCrossWord,
        PlayError::DuplicatePlacement,
        PlayError::Disconnected,
        PlayError::FirstMoveHorizontal,
        PlayError::FirstMoveCenter,
        PlayError::OutOfBoard,
        PlayError::TooManyRackLetters,
    ];

    /// Stable numeric code in `1..=13`.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            PlayError::InvalidLetters => 1,
            PlayError::BadCoordinates => 2,
            PlayError::UnknownWord => 3,
            PlayError::RackMismatch => 4,
            PlayError::WordContainment => 5,
            PlayError::LetterReplacement => 6,
            PlayError::InvalidCrossWord => 7,
            PlayError::DuplicatePlacement => 8,
            PlayError::Disconnected => 9,
            PlayError::FirstMoveHorizontal => 10,
            PlayError::FirstMoveCenter => 11,
            PlayError::OutOfBoard => 12,
            PlayError::TooManyRackLetters => 13,
        }
    }

    /// Inverse of [`code`](Self::code).
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.code() == code)
    }
}

/// Failure of an engine operation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("move rejected: {0}")]
    Rejected(#[from] PlayError),

    #[error("{0} is not a human player")]
    NotHuman(PlayerId),

    #[error("{0} has already played this turn")]
    AlreadyPlayed(PlayerId),

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("the game is finished")]
    Finished,

    #[error("cannot modify a past turn outside arbitration")]
    SealedTurn,

    #[error("command {0} is not in the current turn")]
    UnknownCommand(CommandId),

    #[error("inconsistent game state: {0}")]
    Inconsistent(String),

    #[error("operation only available in arbitration mode")]
    NotArbitration,

    #[error("no player registered")]
    NoPlayers,

    #[error("at most 255 players are supported")]
    TooManyPlayers,

    #[error("{0} does not fit on the board")]
    CannotPlace(Move),
}

impl GameError {
    /// Engine-consistency violations: a caller or integration bug rather
    /// than a bad user input.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, GameError::Inconsistent(_) | GameError::SealedTurn)
    }

    /// Checker code for rejected moves, `None` for other errors.
    #[must_use]
    pub fn play_code(&self) -> Option<u8> {
        match self {
            GameError::Rejected(e) => Some(e.code()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable_and_dense() {
        let codes: Vec<u8> = PlayError::ALL.iter().map(|e| e.code()).collect();
        assert_eq!(codes, (1..=13).collect::<Vec<u8>>());
        assert_eq!(PlayError::UnknownWord.code(), 3);
        assert_eq!(PlayError::TooManyRackLetters.code(), 13);
    }

    #[test]
    fn test_from_code() {
        assert_eq!(PlayError::from_code(9), Some(PlayError::Disconnected));
        assert_eq!(PlayError::from_code(0), None);
        assert_eq!(PlayError::from_code(14), None);
    }

    #[test]
    fn test_fatal_errors() {
        assert!(GameError::SealedTurn.is_fatal());
        assert!(GameError::Inconsistent("x".into()).is_fatal());
        assert!(!GameError::AlreadyPlayed(PlayerId::new(1)).is_fatal());
        assert!(!GameError::from(PlayError::UnknownWord).is_fatal());
        assert!(!GameError::CannotPlace(Move::None).is_fatal());
        assert!(!GameError::TooManyPlayers.is_fatal());
    }

    #[test]
    fn test_rejected_keeps_code() {
        let err: GameError = PlayError::OutOfBoard.into();
        assert_eq!(err.play_code(), Some(12));
        assert_eq!(err.to_string(), "move rejected: word goes out of the board");
        assert_eq!(GameError::Finished.play_code(), None);
    }
}
