//! Player identification, per-player storage and the player record.
//!
//! ## PlayerId
//!
//! Type-safe player identifier supporting up to 255 players. Commands refer
//! to players through their `PlayerId`, never through a reference, so the
//! command log and the player table have independent lifetimes.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by a `Vec`, indexed by `PlayerId`.
//!
//! ## Player
//!
//! Identity (id, name, table number, human or computer) plus a [`History`].
//! Scores are always derived from the history.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::history::History;
use super::moves::Move;
use super::rack::PlayedRack;

/// Most players a game can hold.
pub const MAX_PLAYERS: usize = 255;

/// Player identifier.
///
/// Player indices are 0-based: the first registered player is `PlayerId(0)`,
/// which also acts as the reference player of a duplicate game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// Entries are appended with [`PlayerMap::push`]; the returned id is the
/// index of the new entry.
///
/// ```
/// use rust_duplicate::core::{PlayerId, PlayerMap};
///
/// let mut scores: PlayerMap<i32> = PlayerMap::default();
/// let alice = scores.push(10).unwrap();
/// let bob = scores.push(20).unwrap();
///
/// assert_eq!(scores[alice], 10);
/// assert_eq!(scores.get(bob), Some(&20));
/// assert_eq!(scores.get(PlayerId::new(7)), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> Default for PlayerMap<T> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

impl<T> PlayerMap<T> {
    /// Append an entry and return its player id.
    ///
    /// Returns `None`, dropping `value`, once [`MAX_PLAYERS`] entries are
    /// stored.
    pub fn push(&mut self, value: T) -> Option<PlayerId> {
        let id = u8::try_from(self.data.len()).ok().map(PlayerId)?;
        if id.index() >= MAX_PLAYERS {
            return None;
        }
        self.data.push(value);
        Some(id)
    }

    /// Get the number of players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check whether no player has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check whether `player` refers to a registered entry.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.data.len()
    }

    /// Get a reference to a player's data, if the player exists.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Get a mutable reference to a player's data, if the player exists.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over the stored values in player order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// Who enters the moves of a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerKind {
    /// Moves are submitted through [`play`](crate::Duplicate::play).
    Human,
    /// Moves come from the best-move search.
    ///
    /// `level` is a percentage: 100 always plays the top move, lower
    /// levels play the best move scoring at most `level`% of the top score.
    Computer { level: u8 },
}

/// A registered participant of the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    name: String,
    table: u32,
    kind: PlayerKind,
    history: History,
}

impl Player {
    /// Create a player with an empty history.
    pub fn new(id: PlayerId, name: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            id,
            name: name.into(),
            table: 0,
            kind,
            history: History::default(),
        }
    }

    /// Set the table number (0 when unused).
    #[must_use]
    pub fn with_table(mut self, table: u32) -> Self {
        self.table = table;
        self
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn table(&self) -> u32 {
        self.table
    }

    #[must_use]
    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    #[must_use]
    pub fn is_human(&self) -> bool {
        matches!(self.kind, PlayerKind::Human)
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    pub(crate) fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// The (possibly incomplete) rack of the turn in progress.
    #[must_use]
    pub fn current_rack(&self) -> &PlayedRack {
        self.history.current_rack()
    }

    /// The rack the most recent non-null move was played from.
    #[must_use]
    pub fn last_rack(&self) -> &PlayedRack {
        self.history.last_rack()
    }

    /// The move of the turn in progress (`Move::None` while not played).
    #[must_use]
    pub fn last_move(&self) -> &Move {
        self.history.last_move()
    }

    /// Drop the last per-turn record.
    pub fn remove_last_turn(&mut self) {
        self.history.remove_last_turn();
    }

    /// Has this player played at least one non-null move in the game?
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.history.turns().iter().any(|t| !t.mv.is_null())
    }

    #[must_use]
    pub fn move_points(&self) -> i32 {
        self.history.move_points()
    }

    #[must_use]
    pub fn solo_points(&self) -> i32 {
        self.history.solo_points()
    }

    #[must_use]
    pub fn penalty_points(&self) -> i32 {
        self.history.penalty_points()
    }

    #[must_use]
    pub fn end_game_points(&self) -> i32 {
        self.history.end_game_points()
    }

    #[must_use]
    pub fn warnings(&self) -> u32 {
        self.history.warnings()
    }

    /// Total score: moves + solos + end game - penalties.
    #[must_use]
    pub fn total_score(&self) -> i32 {
        self.history.total_score()
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {} points", self.name, self.id, self.total_score())
    }
}
