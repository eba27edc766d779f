//! Random rack drawing from the bag.
//!
//! Each turn draws from its own RNG context stream, so drawing the rack of
//! turn `n` twice (for instance after truncating the log and replaying)
//! gives the same letters.

use smallvec::SmallVec;
use tracing::debug;

use super::engine::{EndOfGame, RackDrawer};
use crate::core::{Bag, Board, DuplicateConfig, GameRng, PlayedRack, TileSet};

/// Attempts at a fresh rack before giving up on the vowel/consonant checks.
const MAX_REDRAWS: usize = 100;

/// [`RackDrawer`] drawing uniformly from the bag.
#[derive(Clone, Debug)]
pub struct RandomDrawer {
    tiles: TileSet,
    rack_size: usize,
    min_vowels: usize,
    min_consonants: usize,
    rng: GameRng,
}

impl RandomDrawer {
    /// A drawer for `tiles`, with 7-letter racks and one vowel plus one
    /// consonant required.
    #[must_use]
    pub fn new(tiles: TileSet, seed: u64) -> Self {
        Self {
            tiles,
            rack_size: 7,
            min_vowels: 1,
            min_consonants: 1,
            rng: GameRng::new(seed),
        }
    }

    /// A drawer following the rack settings of `config`.
    #[must_use]
    pub fn from_config(config: &DuplicateConfig, tiles: TileSet, seed: u64) -> Self {
        Self::new(tiles, seed)
            .with_rack_size(config.rack_size)
            .with_checks(config.min_vowels, config.min_consonants)
    }

    #[must_use]
    pub fn with_rack_size(mut self, rack_size: usize) -> Self {
        self.rack_size = rack_size;
        self
    }

    /// Set the minimum vowels and consonants of a checked rack.
    #[must_use]
    pub fn with_checks(mut self, min_vowels: usize, min_consonants: usize) -> Self {
        self.min_vowels = min_vowels;
        self.min_consonants = min_consonants;
        self
    }

    #[must_use]
    pub fn tiles(&self) -> &TileSet {
        &self.tiles
    }

    /// Tiles left in the bag once `rack` is taken out.
    #[must_use]
    pub fn bag(&self, board: &Board, rack: &PlayedRack) -> Bag {
        Bag::remaining(&self.tiles, board, rack)
    }

    fn is_balanced(&self, letters: impl Iterator<Item = char>) -> bool {
        let (mut vowels, mut consonants) = (0, 0);
        for letter in letters {
            if self.tiles.is_vowel(letter) {
                vowels += 1;
            }
            if self.tiles.is_consonant(letter) {
                consonants += 1;
            }
        }
        vowels >= self.min_vowels && consonants >= self.min_consonants
    }

    fn fill(&self, bag: &mut Bag, have: usize, rng: &mut GameRng) -> SmallVec<[char; 8]> {
        let mut new = SmallVec::new();
        while have + new.len() < self.rack_size {
            match bag.draw(rng) {
                Some(letter) => new.push(letter),
                None => break,
            }
        }
        new
    }
}

impl RackDrawer for RandomDrawer {
    fn draw_rack(
        &mut self,
        turn: usize,
        board: &Board,
        current: &PlayedRack,
        check: bool,
    ) -> Result<PlayedRack, EndOfGame> {
        let pool = Bag::remaining(&self.tiles, board, &PlayedRack::empty());
        if pool.is_empty() {
            return Err(EndOfGame::EmptyBag);
        }
        if !self.can_draw_rack(board, current, check) {
            return Err(EndOfGame::NoLegalRack);
        }

        let mut rng = self.rng.for_context(&format!("turn-{turn}"));

        // Complete the current rack first
        let old: SmallVec<[char; 8]> = current.letters().collect();
        let mut bag = Bag::remaining(&self.tiles, board, current);
        let new = self.fill(&mut bag, old.len(), &mut rng);
        if !check || self.is_balanced(old.iter().chain(new.iter()).copied()) {
            debug!(turn, old = old.len(), new = new.len(), "Rack completed");
            return Ok(PlayedRack::drawn(old, new));
        }

        // Put everything back and draw a fresh rack
        for attempt in 0..MAX_REDRAWS {
            let mut bag = pool.clone();
            let new = self.fill(&mut bag, 0, &mut rng);
            if self.is_balanced(new.iter().copied()) {
                debug!(turn, attempt, "Rack redrawn");
                return Ok(PlayedRack::drawn([], new));
            }
        }
        Err(EndOfGame::NoLegalRack)
    }

    fn can_draw_rack(&self, board: &Board, _current: &PlayedRack, check: bool) -> bool {
        let pool = Bag::remaining(&self.tiles, board, &PlayedRack::empty());
        if pool.is_empty() {
            return false;
        }
        !check
            || (pool.vowels(&self.tiles) >= self.min_vowels
                && pool.consonants(&self.tiles) >= self.min_consonants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Coord, Round, TileInfo};

    fn small_tiles() -> TileSet {
        TileSet::new(vec![
            TileInfo::new('A', 2, true, false),
            TileInfo::new('E', 1, true, false),
            TileInfo::new('B', 3, false, true),
            TileInfo::new('C', 2, false, true),
        ])
    }

    #[test]
    fn test_draw_is_deterministic_per_turn() {
        let board = Board::new();
        let mut d1 = RandomDrawer::new(TileSet::english(), 42);
        let mut d2 = RandomDrawer::new(TileSet::english(), 42);

        let r1 = d1.draw_rack(3, &board, &PlayedRack::empty(), true).unwrap();
        let _ = d2.draw_rack(0, &board, &PlayedRack::empty(), true).unwrap();
        let r2 = d2.draw_rack(3, &board, &PlayedRack::empty(), true).unwrap();

        assert_eq!(r1, r2);
        assert_eq!(r1.len(), 7);
    }

    #[test]
    fn test_from_config() {
        let config = DuplicateConfig::default().with_rack_size(4).with_rack_checks(0, 0);
        let mut drawer = RandomDrawer::from_config(&config, TileSet::english(), 5);

        let rack = drawer.draw_rack(0, &Board::new(), &PlayedRack::empty(), true).unwrap();
        assert_eq!(rack.len(), 4);
    }

    #[test]
    fn test_completes_current_rack() {
        let mut drawer = RandomDrawer::new(TileSet::english(), 1);
        let current: PlayedRack = "EAR".parse().unwrap();

        let rack = drawer.draw_rack(0, &Board::new(), &current, false).unwrap();
        assert_eq!(rack.old(), &['E', 'A', 'R']);
        assert_eq!(rack.new_letters().len(), 4);
    }

    #[test]
    fn test_checked_rack_is_balanced() {
        let tiles = small_tiles();
        let mut drawer = RandomDrawer::new(tiles.clone(), 9).with_rack_size(3);
        // Three consonants: must be put back
        let current: PlayedRack = "BBC".parse().unwrap();

        let rack = drawer.draw_rack(0, &Board::new(), &current, true).unwrap();
        assert_eq!(rack.len(), 3);
        assert!(rack.letters().any(|c| tiles.is_vowel(c)));
        assert!(rack.letters().any(|c| tiles.is_consonant(c)));
        assert!(rack.old().is_empty());
    }

    #[test]
    fn test_no_vowels_left_ends_game() {
        let tiles = small_tiles();
        let mut board = Board::new();
        board.place(&Round::new("AAE", "H8".parse::<Coord>().unwrap(), 3));
        let drawer = RandomDrawer::new(tiles, 1);

        assert!(!drawer.can_draw_rack(&board, &PlayedRack::empty(), true));
        assert!(drawer.can_draw_rack(&board, &PlayedRack::empty(), false));

        let mut drawer = drawer;
        assert_eq!(
            drawer.draw_rack(5, &board, &PlayedRack::empty(), true),
            Err(EndOfGame::NoLegalRack)
        );
    }

    #[test]
    fn test_empty_bag() {
        let tiles = TileSet::new(vec![TileInfo::new('A', 1, true, false)]);
        let mut board = Board::new();
        board.place(&Round::new("A", "H8".parse::<Coord>().unwrap(), 1));
        let mut drawer = RandomDrawer::new(tiles, 1);

        assert_eq!(
            drawer.draw_rack(1, &board, &PlayedRack::empty(), false),
            Err(EndOfGame::EmptyBag)
        );
    }

    #[test]
    fn test_last_tiles_make_a_short_rack() {
        let tiles = small_tiles();
        let mut board = Board::new();
        board.place(&Round::new("ABBC", "H8".parse::<Coord>().unwrap(), 3));
        let mut drawer = RandomDrawer::new(tiles, 4);

        let rack = drawer.draw_rack(2, &board, &PlayedRack::empty(), true).unwrap();
        assert_eq!(rack.len(), 4);
        assert_eq!(drawer.bag(&board, &rack).len(), 0);
    }
}
