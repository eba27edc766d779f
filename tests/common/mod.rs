//! Shared fixtures for the integration tests.
//!
//! - [`ScriptedRules`]: a move checker that knows a fixed list of words and
//!   a search that returns fixed candidates
//! - [`ScriptedDrawer`]: hands out a fixed rack per turn
//! - [`init_tracing`]: log to the test output (`RUST_LOG=debug`)

#![allow(dead_code)]

use std::collections::HashMap;

use rust_duplicate::core::{Board, Coord, Move, PlayError, PlayedRack, Round};
use rust_duplicate::rules::{EndOfGame, RackDrawer, WordRules};

/// Install a fmt subscriber writing to the test output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A valid move of `points` for `word` at `coord`.
pub fn valid(word: &str, coord: &str, points: i32) -> Move {
    Move::Valid(round(word, coord, points))
}

pub fn round(word: &str, coord: &str, points: i32) -> Round {
    let coord: Coord = coord.parse().expect("test coordinates are well formed");
    Round::new(word, coord, points)
}

/// Word rules driven by a script.
///
/// Words are accepted when `(coord, word)` was registered. The search
/// returns the registered candidates that can still be put on the board,
/// in registration order.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRules {
    words: HashMap<(String, String), Round>,
    candidates: Vec<Move>,
}

impl ScriptedRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `word` at `coord` for `points`.
    pub fn word(mut self, coord: &str, word: &str, points: i32) -> Self {
        self.words
            .insert((coord.to_string(), word.to_string()), round(word, coord, points));
        self
    }

    /// Add a search result.
    pub fn candidate(mut self, mv: Move) -> Self {
        self.candidates.push(mv);
        self
    }
}

impl WordRules for ScriptedRules {
    fn check_played_word(
        &self,
        _board: &Board,
        _rack: &PlayedRack,
        coord: &str,
        word: &str,
    ) -> Result<Round, PlayError> {
        if coord.parse::<Coord>().is_err() {
            return Err(PlayError::BadCoordinates);
        }
        self.words
            .get(&(coord.to_string(), word.to_string()))
            .cloned()
            .ok_or(PlayError::UnknownWord)
    }

    fn search(&self, board: &Board, _rack: &PlayedRack) -> Vec<Move> {
        self.candidates
            .iter()
            .filter(|mv| match mv {
                Move::Valid(round) => board.can_place(round),
                _ => true,
            })
            .cloned()
            .collect()
    }
}

/// Rack drawer handing out `racks[turn]`, then reporting an empty bag.
#[derive(Clone, Debug)]
pub struct ScriptedDrawer {
    racks: Vec<PlayedRack>,
    exhausted: bool,
}

impl ScriptedDrawer {
    pub fn new(racks: &[&str]) -> Self {
        Self {
            racks: racks
                .iter()
                .map(|r| r.parse().expect("test racks are well formed"))
                .collect(),
            exhausted: false,
        }
    }
}

impl RackDrawer for ScriptedDrawer {
    fn draw_rack(
        &mut self,
        turn: usize,
        _board: &Board,
        _current: &PlayedRack,
        _check: bool,
    ) -> Result<PlayedRack, EndOfGame> {
        self.exhausted = turn >= self.racks.len();
        self.racks.get(turn).cloned().ok_or(EndOfGame::EmptyBag)
    }

    fn can_draw_rack(&self, _board: &Board, _current: &PlayedRack, _check: bool) -> bool {
        !self.exhausted
    }
}
