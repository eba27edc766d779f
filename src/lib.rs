//! # rust-duplicate
//!
//! A turn engine for duplicate-mode word games, built on a command-sourced
//! history.
//!
//! ## Design Principles
//!
//! 1. **Everything Is a Command**: racks, moves, master moves, board
//!    placements and scoring events are commands in a per-turn log. Each
//!    one can be executed and undone, so any past turn can be viewed again.
//!
//! 2. **Derived Scores**: a player's score is summed from its history on
//!    every call. Undoing a command is enough to correct it.
//!
//! 3. **Rules Are Services**: word checking, move search and rack drawing
//!    sit behind the `WordRules` and `RackDrawer` traits.
//!
//! ## Architecture
//!
//! - **One Master Move per Turn**: all players play against the same board
//!   and rack; the best player move (or the search's best move) is put on
//!   the board once, then everyone gets the same next rack.
//!
//! - **Persistent Data Structures**: the board is an `im-rs` map, so state
//!   snapshots are O(1) clones.
//!
//! - **End of Game Is Not an Error**: running out of letters or moves moves
//!   the game to `TurnStatus::Finished`.
//!
//! ## Modules
//!
//! - `core`: Player IDs, histories, moves, racks, board, RNG, configuration
//! - `command`: Commands, turns and the navigable log
//! - `rules`: WordRules and RackDrawer traits, random rack drawer
//! - `duplicate`: Duplicate turn resolver, solo bonus, arbitration
//! - `session`: Front-end facade and saved games

pub mod core;
pub mod command;
pub mod rules;
pub mod duplicate;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerMap, Player, PlayerKind, MAX_PLAYERS,
    History, TurnData,
    Coord, Direction, Move, Round, PlayedRack,
    Board, Bag, TileSet, GameRng,
    DuplicateConfig, GameMode, SoloRule,
    GameState, ScoreLine,
    GameError, PlayError,
};

pub use crate::command::{Command, CommandId, CommandKind, EventKind, Navigation, Turn};

pub use crate::rules::{EndOfGame, RackDrawer, RandomDrawer, WordRules};

pub use crate::duplicate::{
    Duplicate, EndReason, ReferenceGame, ReferenceTurn, TurnStatus, REFERENCE_PLAYER,
};

pub use crate::session::{SaveError, SavedGame, SavedPlayer, Session};
