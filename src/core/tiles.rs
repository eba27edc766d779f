//! Letter distribution and the bag.
//!
//! The bag is never stored: [`Bag::remaining`] derives it from the tile set,
//! the board and a rack. Undoing a board move therefore puts its tiles
//! back in the bag without any extra bookkeeping.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::rack::PlayedRack;
use super::rng::GameRng;

/// One kind of tile in the distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileInfo {
    /// Uppercase letter, or `?` for the joker.
    pub letter: char,
    /// Number of such tiles in a full bag.
    pub count: u32,
    pub vowel: bool,
    pub consonant: bool,
}

impl TileInfo {
    pub const fn new(letter: char, count: u32, vowel: bool, consonant: bool) -> Self {
        Self {
            letter,
            count,
            vowel,
            consonant,
        }
    }
}

/// Complete letter distribution of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSet {
    tiles: Vec<TileInfo>,
}

impl TileSet {
    pub fn new(tiles: Vec<TileInfo>) -> Self {
        Self { tiles }
    }

    /// The 100-tile English distribution with two jokers.
    ///
    /// `Y` and the joker count as both vowel and consonant.
    #[must_use]
    pub fn english() -> Self {
        const V: (bool, bool) = (true, false);
        const C: (bool, bool) = (false, true);
        const B: (bool, bool) = (true, true);
        #[rustfmt::skip]
        let letters: [(char, u32, (bool, bool)); 27] = [
            ('A', 9, V), ('B', 2, C), ('C', 2, C), ('D', 4, C), ('E', 12, V),
            ('F', 2, C), ('G', 3, C), ('H', 2, C), ('I', 9, V), ('J', 1, C),
            ('K', 1, C), ('L', 4, C), ('M', 2, C), ('N', 6, C), ('O', 8, V),
            ('P', 2, C), ('Q', 1, C), ('R', 6, C), ('S', 4, C), ('T', 6, C),
            ('U', 4, V), ('V', 2, C), ('W', 2, C), ('X', 1, C), ('Y', 2, B),
            ('Z', 1, C), ('?', 2, B),
        ];
        Self::new(
            letters.iter()
                .map(|&(letter, count, (v, c))| TileInfo::new(letter, count, v, c))
                .collect(),
        )
    }

    #[must_use]
    pub fn tiles(&self) -> &[TileInfo] {
        &self.tiles
    }

    #[must_use]
    pub fn info(&self, letter: char) -> Option<&TileInfo> {
        self.tiles.iter().find(|t| t.letter == letter)
    }

    #[must_use]
    pub fn is_vowel(&self, letter: char) -> bool {
        self.info(letter).is_some_and(|t| t.vowel)
    }

    #[must_use]
    pub fn is_consonant(&self, letter: char) -> bool {
        self.info(letter).is_some_and(|t| t.consonant)
    }

    /// Number of tiles in a full bag.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.tiles.iter().map(|t| t.count).sum()
    }
}

impl Default for TileSet {
    fn default() -> Self {
        Self::english()
    }
}

/// Tiles not on the board and not in a given rack.
///
/// Counts are kept in tile-set order so that draws are reproducible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bag {
    counts: Vec<(char, u32)>,
}

impl Bag {
    /// A full bag.
    #[must_use]
    pub fn full(tiles: &TileSet) -> Self {
        Self {
            counts: tiles.tiles().iter().map(|t| (t.letter, t.count)).collect(),
        }
    }

    /// What is left once the board tiles and `rack` are taken out.
    #[must_use]
    pub fn remaining(tiles: &TileSet, board: &Board, rack: &PlayedRack) -> Self {
        let mut used: FxHashMap<char, u32> = FxHashMap::default();
        for tile in board.tiles().chain(rack.letters()) {
            *used.entry(tile).or_insert(0) += 1;
        }

        let mut bag = Self::full(tiles);
        for (letter, count) in &mut bag.counts {
            *count = count.saturating_sub(used.get(letter).copied().unwrap_or(0));
        }
        bag
    }

    /// Number of tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.iter().map(|&(_, n)| n as usize).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn count(&self, letter: char) -> u32 {
        self.counts
            .iter()
            .find(|(c, _)| *c == letter)
            .map_or(0, |&(_, n)| n)
    }

    /// Put a tile (back) into the bag.
    pub fn add(&mut self, letter: char) {
        match self.counts.iter_mut().find(|(c, _)| *c == letter) {
            Some((_, n)) => *n += 1,
            None => self.counts.push((letter, 1)),
        }
    }

    /// Number of tiles counting as vowels.
    #[must_use]
    pub fn vowels(&self, tiles: &TileSet) -> usize {
        self.counts
            .iter()
            .filter(|(c, _)| tiles.is_vowel(*c))
            .map(|&(_, n)| n as usize)
            .sum()
    }

    /// Number of tiles counting as consonants.
    #[must_use]
    pub fn consonants(&self, tiles: &TileSet) -> usize {
        self.counts
            .iter()
            .filter(|(c, _)| tiles.is_consonant(*c))
            .map(|&(_, n)| n as usize)
            .sum()
    }

    /// Take one tile at random, each tile being equally likely.
    pub fn draw(&mut self, rng: &mut GameRng) -> Option<char> {
        let total = self.len();
        if total == 0 {
            return None;
        }
        let mut pick = rng.gen_range_usize(0..total);
        for (letter, count) in &mut self.counts {
            let n = *count as usize;
            if pick < n {
                *count -= 1;
                return Some(*letter);
            }
            pick -= n;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::moves::{Coord, Round};

    #[test]
    fn test_english_distribution() {
        let tiles = TileSet::english();
        assert_eq!(tiles.total(), 100);
        assert!(tiles.is_vowel('E'));
        assert!(!tiles.is_vowel('K'));
        assert!(tiles.is_vowel('Y') && tiles.is_consonant('Y'));
        assert!(tiles.is_vowel('?') && tiles.is_consonant('?'));
    }

    #[test]
    fn test_remaining_removes_board_and_rack() {
        let tiles = TileSet::english();
        let mut board = Board::new();
        let coord: Coord = "H8".parse().unwrap();
        board.place(&Round::new("ZoO", coord, 12));
        let rack: PlayedRack = "QAB".parse().unwrap();

        let bag = Bag::remaining(&tiles, &board, &rack);
        assert_eq!(bag.len(), 100 - 3 - 3);
        assert_eq!(bag.count('Z'), 0);
        assert_eq!(bag.count('Q'), 0);
        assert_eq!(bag.count('?'), 1);
        assert_eq!(bag.count('O'), 7);
    }

    #[test]
    fn test_draw_empties_the_bag() {
        let tiles = TileSet::new(vec![
            TileInfo::new('A', 2, true, false),
            TileInfo::new('B', 1, false, true),
        ]);
        let mut bag = Bag::full(&tiles);
        let mut rng = GameRng::new(7);

        let mut drawn: Vec<_> = std::iter::from_fn(|| bag.draw(&mut rng)).collect();
        drawn.sort_unstable();
        assert_eq!(drawn, vec!['A', 'A', 'B']);
        assert!(bag.is_empty());
    }

    #[test]
    fn test_vowel_and_consonant_counts() {
        let tiles = TileSet::english();
        let mut bag = Bag::full(&TileSet::new(vec![]));
        bag.add('A');
        bag.add('Y');
        bag.add('K');
        bag.add('K');

        assert_eq!(bag.vowels(&tiles), 2);
        assert_eq!(bag.consonants(&tiles), 3);
    }
}
