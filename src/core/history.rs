//! Per-player history: one record per turn.
//!
//! Record `i` belongs to turn `i` of the navigation log. Commands create
//! records on demand (padding with empty records if a player joined late)
//! and remove them again when undone, so the history always mirrors the
//! executed part of the log.

use serde::{Deserialize, Serialize};

use super::moves::Move;
use super::rack::PlayedRack;

static EMPTY_RACK: PlayedRack = PlayedRack::empty();
static NO_MOVE: Move = Move::None;

/// What happened to one player during one turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnData {
    /// Rack the player had for this turn.
    pub rack: PlayedRack,
    /// Move played (`Move::None` until the player has played).
    pub mv: Move,
    /// Solo bonus points.
    pub solo_points: i32,
    /// Penalty points (subtracted from the total).
    pub penalty_points: i32,
    /// End-of-game adjustment points.
    pub end_game_points: i32,
    /// Number of warnings received.
    pub warnings: u32,
}

impl TurnData {
    /// Points this record contributes to the total score.
    #[must_use]
    pub fn points(&self) -> i32 {
        self.mv.score() + self.solo_points + self.end_game_points - self.penalty_points
    }
}

/// Ordered per-turn records of a player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    turns: Vec<TurnData>,
}

impl History {
    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// All records, oldest first.
    #[must_use]
    pub fn turns(&self) -> &[TurnData] {
        &self.turns
    }

    /// Record of turn `turn`, if it exists.
    #[must_use]
    pub fn turn(&self, turn: usize) -> Option<&TurnData> {
        self.turns.get(turn)
    }

    /// Rack of the turn in progress (empty before the first rack).
    #[must_use]
    pub fn current_rack(&self) -> &PlayedRack {
        self.turns.last().map_or(&EMPTY_RACK, |t| &t.rack)
    }

    /// Rack of the most recent record holding a non-null move.
    ///
    /// Falls back to the current rack when nothing was played yet.
    #[must_use]
    pub fn last_rack(&self) -> &PlayedRack {
        self.turns
            .iter()
            .rev()
            .find(|t| !t.mv.is_null())
            .map_or_else(|| self.current_rack(), |t| &t.rack)
    }

    /// Move of the turn in progress.
    #[must_use]
    pub fn last_move(&self) -> &Move {
        self.turns.last().map_or(&NO_MOVE, |t| &t.mv)
    }

    /// Drop the last record.
    pub fn remove_last_turn(&mut self) {
        self.turns.pop();
    }

    /// Get the record of `turn`, creating it (and any gap before it).
    pub(crate) fn entry(&mut self, turn: usize) -> &mut TurnData {
        if self.turns.len() <= turn {
            self.turns.resize_with(turn + 1, TurnData::default);
        }
        &mut self.turns[turn]
    }

    /// Drop trailing empty records beyond the first `len`.
    ///
    /// Records still holding data are kept: undoing commands out of order
    /// never loses what another command wrote.
    pub(crate) fn trim(&mut self, len: usize) {
        while self.turns.len() > len && self.turns.last() == Some(&TurnData::default()) {
            self.turns.pop();
        }
    }

    #[must_use]
    pub fn move_points(&self) -> i32 {
        self.turns.iter().map(|t| t.mv.score()).sum()
    }

    #[must_use]
    pub fn solo_points(&self) -> i32 {
        self.turns.iter().map(|t| t.solo_points).sum()
    }

    #[must_use]
    pub fn penalty_points(&self) -> i32 {
        self.turns.iter().map(|t| t.penalty_points).sum()
    }

    #[must_use]
    pub fn end_game_points(&self) -> i32 {
        self.turns.iter().map(|t| t.end_game_points).sum()
    }

    #[must_use]
    pub fn warnings(&self) -> u32 {
        self.turns.iter().map(|t| t.warnings).sum()
    }

    /// Recomputed on every call.
    #[must_use]
    pub fn total_score(&self) -> i32 {
        self.turns.iter().map(TurnData::points).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::moves::{Coord, Round};

    fn valid(word: &str, points: i32) -> Move {
        let coord: Coord = "H8".parse().unwrap();
        Move::Valid(Round::new(word, coord, points))
    }

    #[test]
    fn test_empty_history() {
        let history = History::default();

        assert!(history.is_empty());
        assert!(history.current_rack().is_empty());
        assert!(history.last_move().is_null());
        assert_eq!(history.total_score(), 0);
    }

    #[test]
    fn test_entry_pads_missing_turns() {
        let mut history = History::default();
        history.entry(2).warnings = 1;

        assert_eq!(history.len(), 3);
        assert_eq!(history.turn(0), Some(&TurnData::default()));
        assert_eq!(history.warnings(), 1);
    }

    #[test]
    fn test_last_rack_skips_unplayed_turns() {
        let mut history = History::default();
        history.entry(0).rack = "ABCDEFG".parse().unwrap();
        history.entry(0).mv = valid("CAB", 10);
        history.entry(1).rack = "DEFG+HIJ".parse().unwrap();

        assert_eq!(history.current_rack().to_string(), "DEFG+HIJ");
        assert_eq!(history.last_rack().to_string(), "ABCDEFG");
        assert!(history.last_move().is_null());
    }

    #[test]
    fn test_total_score_breakdown() {
        let mut history = History::default();
        history.entry(0).mv = valid("CAB", 10);
        history.entry(1).mv = valid("DEAF", 24);
        history.entry(1).solo_points = 10;
        history.entry(1).penalty_points = 5;
        history.entry(1).end_game_points = -2;

        assert_eq!(history.move_points(), 34);
        assert_eq!(history.solo_points(), 10);
        assert_eq!(history.penalty_points(), 5);
        assert_eq!(history.end_game_points(), -2);
        assert_eq!(history.total_score(), 37);
    }

    #[test]
    fn test_trim_keeps_filled_records() {
        let mut history = History::default();
        history.entry(0).warnings = 1;
        history.entry(2).solo_points = 10;
        history.entry(3);

        history.trim(1);
        assert_eq!(history.len(), 3);

        history.entry(2).solo_points = 0;
        history.trim(1);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_remove_last_turn() {
        let mut history = History::default();
        history.entry(3);
        assert_eq!(history.len(), 4);

        history.remove_last_turn();
        history.remove_last_turn();
        assert_eq!(history.len(), 2);
    }
}
