//! Game state mutated by commands.
//!
//! ## GameState
//!
//! Everything a command can touch:
//! - Player table (each player's [`History`](super::history::History))
//! - Shared board
//! - Master move of the turn in progress
//!
//! The board uses `im` persistent data structures, so a state snapshot is a
//! cheap clone. Tests rely on this to compare "before" and "after undo".

use serde::{Deserialize, Serialize};

use super::board::Board;
use super::moves::Move;
use super::player::{Player, PlayerId, PlayerMap};

/// State shared by every command of the log.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameState {
    /// Registered players, indexed by id.
    pub players: PlayerMap<Player>,

    /// The shared board.
    pub board: Board,

    /// Authoritative move of the turn in progress (`Move::None` if unset).
    pub master_move: Move,
}

impl GameState {
    /// Create an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Look up a player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    /// Look up a player for mutation.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not registered: commands only ever refer to
    /// registered players.
    pub(crate) fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        assert!(self.players.contains(id), "Command refers to unknown {id}");
        &mut self.players[id]
    }

    /// Players ranked by total score, best first.
    ///
    /// Ties keep registration order.
    #[must_use]
    pub fn rankings(&self) -> Vec<(PlayerId, i32)> {
        let mut ranked: Vec<_> = self
            .players
            .iter()
            .map(|(id, p)| (id, p.total_score()))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

/// Serializable summary of one player's standing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLine {
    pub player: PlayerId,
    pub name: String,
    pub moves: i32,
    pub solos: i32,
    pub penalties: i32,
    pub end_game: i32,
    pub warnings: u32,
    pub total: i32,
}

impl ScoreLine {
    #[must_use]
    pub fn of(player: &Player) -> Self {
        Self {
            player: player.id(),
            name: player.name().to_string(),
            moves: player.move_points(),
            solos: player.solo_points(),
            penalties: player.penalty_points(),
            end_game: player.end_game_points(),
            warnings: player.warnings(),
            total: player.total_score(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::moves::{Coord, Round};
    use crate::core::player::PlayerKind;

    fn state_with_players(names: &[&str]) -> GameState {
        let mut state = GameState::new();
        for name in names {
            let id = PlayerId::new(state.players.len() as u8);
            state.players.push(Player::new(id, *name, PlayerKind::Human));
        }
        state
    }

    #[test]
    fn test_game_state_new() {
        let state = GameState::new();

        assert_eq!(state.player_count(), 0);
        assert!(state.board.is_empty());
        assert!(state.master_move.is_null());
    }

    #[test]
    fn test_rankings_are_stable() {
        let mut state = state_with_players(&["a", "b", "c"]);
        let coord: Coord = "H8".parse().unwrap();
        state.player_mut(PlayerId::new(1)).history_mut().entry(0).mv =
            Move::Valid(Round::new("CAT", coord, 10));
        state.player_mut(PlayerId::new(2)).history_mut().entry(0).mv =
            Move::Valid(Round::new("BAT", coord, 10));

        let ranked = state.rankings();
        assert_eq!(
            ranked,
            vec![(PlayerId::new(1), 10), (PlayerId::new(2), 10), (PlayerId::new(0), 0)]
        );
    }

    #[test]
    fn test_score_line() {
        let mut state = state_with_players(&["alice"]);
        let record = state.player_mut(PlayerId::new(0)).history_mut().entry(0);
        record.solo_points = 10;
        record.penalty_points = 4;
        record.warnings = 1;

        let line = ScoreLine::of(&state.players[PlayerId::new(0)]);
        assert_eq!(line.name, "alice");
        assert_eq!(line.solos, 10);
        assert_eq!(line.penalties, 4);
        assert_eq!(line.warnings, 1);
        assert_eq!(line.total, 6);
    }

    #[test]
    #[should_panic(expected = "unknown Player 3")]
    fn test_player_mut_unknown() {
        let mut state = state_with_players(&["a"]);
        state.player_mut(PlayerId::new(3));
    }
}
