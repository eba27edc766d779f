//! Moves, rounds and board coordinates.
//!
//! A [`Move`] is what a player did during a turn. Only `Move::Valid` carries
//! a [`Round`]: the placed word, where it lies and what it scored.
//!
//! Coordinates use the usual word-game notation: `H8` (row letter first) is
//! a horizontal word starting at row H, column 8; `8H` (column number first)
//! is a vertical word starting at the same square.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::str::FromStr;

use super::board::BOARD_SIZE;
use super::error::PlayError;

/// Orientation of a word on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Horizontal,
    Vertical,
}

/// Starting square and orientation of a word.
///
/// Rows and columns are 0-based internally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
    pub dir: Direction,
}

impl Coord {
    /// Create a coordinate, checking it lies on the board.
    pub fn new(row: u8, col: u8, dir: Direction) -> Result<Self, PlayError> {
        if usize::from(row) >= BOARD_SIZE || usize::from(col) >= BOARD_SIZE {
            return Err(PlayError::OutOfBoard);
        }
        Ok(Self { row, col, dir })
    }

    /// Square of the `offset`-th letter of a word starting here.
    ///
    /// Returns `None` past the edge of the board.
    #[must_use]
    pub fn square(self, offset: usize) -> Option<(u8, u8)> {
        let (row, col) = match self.dir {
            Direction::Horizontal => (usize::from(self.row), usize::from(self.col) + offset),
            Direction::Vertical => (usize::from(self.row) + offset, usize::from(self.col)),
        };
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some((row as u8, col as u8))
    }
}

impl FromStr for Coord {
    type Err = PlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let first = s.chars().next().ok_or(PlayError::BadCoordinates)?;

        let (row_part, col_part, dir) = if first.is_ascii_alphabetic() {
            (&s[..1], &s[1..], Direction::Horizontal)
        } else {
            let split = s.len() - 1;
            if !s.is_char_boundary(split) {
                return Err(PlayError::BadCoordinates);
            }
            (&s[split..], &s[..split], Direction::Vertical)
        };

        let row_letter = row_part
            .chars()
            .next()
            .filter(char::is_ascii_alphabetic)
            .ok_or(PlayError::BadCoordinates)?
            .to_ascii_uppercase();
        let col: usize = col_part.parse().map_err(|_| PlayError::BadCoordinates)?;
        if col == 0 {
            return Err(PlayError::BadCoordinates);
        }

        let row = u32::from(row_letter) - u32::from('A');
        if row as usize >= BOARD_SIZE || col > BOARD_SIZE {
            return Err(PlayError::OutOfBoard);
        }
        Coord::new(row as u8, (col - 1) as u8, dir)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let row = char::from(b'A' + self.row);
        match self.dir {
            Direction::Horizontal => write!(f, "{}{}", row, self.col + 1),
            Direction::Vertical => write!(f, "{}{}", self.col + 1, row),
        }
    }
}

/// A placed word.
///
/// Uppercase letters are regular tiles, lowercase letters are jokers
/// standing for that letter. `from_rack[i]` tells whether letter `i` was
/// put down this turn (true) or was already on the board (false).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Round {
    pub word: String,
    pub coord: Coord,
    pub points: i32,
    pub from_rack: SmallVec<[bool; 16]>,
}

impl Round {
    /// A round whose letters all come from the rack.
    pub fn new(word: impl Into<String>, coord: Coord, points: i32) -> Self {
        let word = word.into();
        let from_rack = word.chars().map(|_| true).collect();
        Self {
            word,
            coord,
            points,
            from_rack,
        }
    }

    /// Mark the letters at `positions` as already lying on the board.
    #[must_use]
    pub fn with_board_letters(mut self, positions: &[usize]) -> Self {
        for &pos in positions {
            if let Some(flag) = self.from_rack.get_mut(pos) {
                *flag = false;
            }
        }
        self
    }

    /// Letters put down this turn, with their squares.
    pub fn placed(&self) -> impl Iterator<Item = ((u8, u8), char)> + '_ {
        self.word
            .chars()
            .enumerate()
            .filter(|(i, _)| self.from_rack.get(*i).copied().unwrap_or(false))
            .filter_map(|(i, c)| self.coord.square(i).map(|sq| (sq, c)))
    }

    /// Tiles taken out of the rack (`?` for each joker).
    pub fn rack_tiles(&self) -> impl Iterator<Item = char> + '_ {
        self.placed().map(|(_, c)| tile_of(c))
    }
}

/// Tile that produces a board letter: `?` for jokers.
#[must_use]
pub fn tile_of(letter: char) -> char {
    if letter.is_lowercase() {
        '?'
    } else {
        letter
    }
}

/// What a player did during a turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Nothing played (yet).
    #[default]
    None,
    /// A word accepted by the move checker.
    Valid(Round),
    /// A word the move checker rejected, kept as entered.
    Invalid { word: String, coord: String },
    /// The player passed.
    Pass,
    /// The player exchanged the given letters.
    ChangeLetters(String),
}

impl Move {
    /// Build an invalid move from the raw input.
    pub fn invalid(word: impl Into<String>, coord: impl Into<String>) -> Self {
        Move::Invalid {
            word: word.into(),
            coord: coord.into(),
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Move::Valid(_))
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Move::None)
    }

    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Move::Pass)
    }

    #[must_use]
    pub fn is_change_letters(&self) -> bool {
        matches!(self, Move::ChangeLetters(_))
    }

    /// Points scored; 0 for anything but a valid move.
    #[must_use]
    pub fn score(&self) -> i32 {
        match self {
            Move::Valid(round) => round.points,
            _ => 0,
        }
    }

    #[must_use]
    pub fn round(&self) -> Option<&Round> {
        match self {
            Move::Valid(round) => Some(round),
            _ => None,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::None => write!(f, "(none)"),
            Move::Valid(round) => write!(f, "{} {} ({})", round.word, round.coord, round.points),
            Move::Invalid { word, coord } => write!(f, "#{}# {}", word, coord),
            Move::Pass => write!(f, "(pass)"),
            Move::ChangeLetters(letters) => write!(f, "[-{}]", letters),
        }
    }
}
