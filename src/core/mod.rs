//! Core engine types: players, histories, moves, racks, board, RNG,
//! configuration, errors.
//!
//! These are plain values. Commands (in [`crate::command`]) are the only
//! code that mutates them during a game.

pub mod player;
pub mod history;
pub mod moves;
pub mod rack;
pub mod board;
pub mod tiles;
pub mod rng;
pub mod config;
pub mod state;
pub mod error;

pub use player::{Player, PlayerId, PlayerKind, PlayerMap, MAX_PLAYERS};
pub use history::{History, TurnData};
pub use moves::{Coord, Direction, Move, Round};
pub use rack::{PlayedRack, RackOrigin};
pub use board::{Board, BOARD_SIZE};
pub use tiles::{Bag, TileInfo, TileSet};
pub use rng::GameRng;
pub use config::{DuplicateConfig, GameMode, SoloRule};
pub use state::{GameState, ScoreLine};
pub use error::{GameError, PlayError};
