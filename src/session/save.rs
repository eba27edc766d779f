//! Saved games.
//!
//! A saved game is the command log itself: player registrations followed by
//! the commands of every turn, in order. Loading replays each command, so a
//! loaded game has the same history, scores and board as the saved one.
//!
//! Two encodings are provided: JSON (readable, for files exchanged with
//! other tools) and bincode (compact).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::command::CommandKind;
use crate::core::{DuplicateConfig, GameError, Move, PlayerId, PlayerKind};
use crate::duplicate::{EndReason, ReferenceGame, REFERENCE_PLAYER};

/// Version written by [`SavedGame`]; loading any other version fails.
pub const FORMAT_VERSION: u32 = 1;

/// Failure to decode or replay a saved game.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid binary data: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("unsupported save format version {0}")]
    UnsupportedVersion(u32),

    #[error("saved command refers to unknown {0}")]
    UnknownPlayer(PlayerId),

    #[error("corrupt saved game: {0}")]
    Corrupt(String),

    #[error("saved game cannot be replayed: {0}")]
    Replay(#[from] GameError),
}

/// A registered player, as saved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPlayer {
    pub id: PlayerId,
    pub name: String,
    pub kind: PlayerKind,
    pub table: u32,
}

/// Everything needed to rebuild a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    pub version: u32,
    pub config: DuplicateConfig,
    pub players: Vec<SavedPlayer>,
    /// Commands of each turn, in log order.
    pub turns: Vec<Vec<CommandKind>>,
    pub reference: Option<ReferenceGame>,
    pub finished: Option<EndReason>,
}

impl SavedGame {
    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SaveError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SaveError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SaveError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Check the version and that player ids follow registration order.
    pub fn validate(&self) -> Result<(), SaveError> {
        if self.version != FORMAT_VERSION {
            return Err(SaveError::UnsupportedVersion(self.version));
        }
        for (index, player) in self.players.iter().enumerate() {
            if player.id.index() != index {
                return Err(SaveError::Corrupt(format!(
                    "{} registered at position {index}",
                    player.id
                )));
            }
        }
        Ok(())
    }

    /// Racks and master moves of the finished turns, to replay this game
    /// as a reference game.
    #[must_use]
    pub fn reference_game(&self) -> ReferenceGame {
        let mut reference = ReferenceGame::default();
        for turn in &self.turns {
            let rack = turn.iter().find_map(|kind| match kind {
                CommandKind::RackAssignment { player, rack } if *player == REFERENCE_PLAYER => {
                    Some(rack)
                }
                _ => None,
            });
            let master = turn.iter().find_map(|kind| match kind {
                CommandKind::BoardMove { mv, .. } => Some(mv),
                _ => None,
            });
            if let (Some(rack), Some(master @ Move::Valid(_))) = (rack, master) {
                reference.push(rack.clone(), master.clone());
            }
        }
        reference
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Coord, Round};

    fn sample() -> SavedGame {
        let master = Move::Valid(Round::new("ZEBRA", "H4".parse::<Coord>().unwrap(), 36));
        SavedGame {
            version: FORMAT_VERSION,
            config: DuplicateConfig::default(),
            players: vec![
                SavedPlayer {
                    id: PlayerId::new(0),
                    name: "Ann".into(),
                    kind: PlayerKind::Human,
                    table: 1,
                },
                SavedPlayer {
                    id: PlayerId::new(1),
                    name: "Bot".into(),
                    kind: PlayerKind::Computer { level: 100 },
                    table: 0,
                },
            ],
            turns: vec![
                vec![
                    CommandKind::RackAssignment {
                        player: PlayerId::new(0),
                        rack: "ZEBRAXY".parse().unwrap(),
                    },
                    CommandKind::MasterMoveSet { mv: master.clone() },
                    CommandKind::BoardMove {
                        player: PlayerId::new(0),
                        mv: master,
                    },
                ],
                vec![CommandKind::RackAssignment {
                    player: PlayerId::new(0),
                    rack: "XY+ABCDE".parse().unwrap(),
                }],
            ],
            reference: None,
            finished: None,
        }
    }

    #[test]
    fn test_json_round_trip() {
        let saved = sample();
        let json = saved.to_json().unwrap();
        assert!(json.contains("ZEBRA"));
        assert_eq!(SavedGame::from_json(&json).unwrap(), saved);
    }

    #[test]
    fn test_bincode_round_trip() {
        let saved = sample();
        let bytes = saved.to_bytes().unwrap();
        assert_eq!(SavedGame::from_bytes(&bytes).unwrap(), saved);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(SavedGame::from_json("{"), Err(SaveError::Json(_))));
    }

    #[test]
    fn test_validate() {
        assert!(sample().validate().is_ok());

        let mut newer = sample();
        newer.version = 2;
        assert!(matches!(newer.validate(), Err(SaveError::UnsupportedVersion(2))));

        let mut shuffled = sample();
        shuffled.players.swap(0, 1);
        assert!(matches!(shuffled.validate(), Err(SaveError::Corrupt(_))));
    }

    #[test]
    fn test_reference_game_skips_unfinished_turn() {
        let reference = sample().reference_game();
        assert_eq!(reference.len(), 1);
        let turn = reference.turn(0).unwrap();
        assert_eq!(turn.rack.to_string(), "ZEBRAXY");
        assert_eq!(turn.master.score(), 36);
    }
}
