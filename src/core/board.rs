//! The shared board.
//!
//! Cells live in an `im::HashMap` so a board snapshot is an O(1) clone.
//! The board only stores letters; placement legality is the move
//! checker's business.

use im::HashMap as ImHashMap;
use serde::{Deserialize, Serialize};

use super::moves::{tile_of, Round};

/// Width and height of the board.
pub const BOARD_SIZE: usize = 15;

/// Letters placed on the board, keyed by `(row, col)`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: ImHashMap<(u8, u8), char>,
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Letter at `(row, col)`; lowercase for a joker.
    #[must_use]
    pub fn letter_at(&self, row: u8, col: u8) -> Option<char> {
        self.cells.get(&(row, col)).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of tiles on the board.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.cells.len()
    }

    /// Tiles on the board as bag tiles (`?` for jokers).
    pub fn tiles(&self) -> impl Iterator<Item = char> + '_ {
        self.cells.values().map(|&c| tile_of(c))
    }

    /// Can every new letter of `round` be put down?
    #[must_use]
    pub fn can_place(&self, round: &Round) -> bool {
        let new_letters = round.from_rack.iter().filter(|&&f| f).count();
        let placed: Vec<_> = round.placed().collect();
        placed.len() == new_letters
            && placed
                .iter()
                .all(|(sq, _)| !self.cells.contains_key(sq))
    }

    /// Put down the new letters of `round`.
    ///
    /// # Panics
    ///
    /// Panics if a target square is taken or off the board.
    pub fn place(&mut self, round: &Round) {
        assert!(self.can_place(round), "Cannot place {} at {}", round.word, round.coord);
        for (square, letter) in round.placed() {
            self.cells.insert(square, letter);
        }
    }

    /// Take back the new letters of `round`.
    pub fn remove(&mut self, round: &Round) {
        for (square, _) in round.placed() {
            self.cells.remove(&square);
        }
    }
}
