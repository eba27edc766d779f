//! Command log: every change to a game is an undoable command.
//!
//! A [`Command`] wraps a [`CommandKind`] (what to do) and, once executed,
//! the minimal snapshot needed to undo it (the previous rack, the previous
//! move, ...). Commands refer to players by [`PlayerId`] and are resolved
//! against a [`GameState`] at execute/undo time.
//!
//! Commands are grouped into [`Turn`]s, and turns into a [`Navigation`]
//! log that supports replay and time travel.
//!
//! ## Contract
//!
//! - `execute` then `undo` restores every field the command touched.
//! - Executing an executed command, or undoing a command that was never
//!   executed, is a programming error and panics.
//!
//! ```
//! use rust_duplicate::command::{Command, CommandId, CommandKind};
//! use rust_duplicate::core::{GameState, Player, PlayerId, PlayerKind};
//!
//! let mut state = GameState::new();
//! state.players.push(Player::new(PlayerId::new(0), "ref", PlayerKind::Human));
//! let before = state.clone();
//!
//! let mut cmd = Command::new(
//!     CommandId::new(0),
//!     CommandKind::RackAssignment {
//!         player: PlayerId::new(0),
//!         rack: "ABC+DEF".parse().unwrap(),
//!     },
//! );
//! cmd.execute(&mut state, 0);
//! assert_eq!(state.players[PlayerId::new(0)].current_rack().to_string(), "ABC+DEF");
//!
//! cmd.undo(&mut state);
//! assert_eq!(state, before);
//! ```

mod navigation;
mod turn;

pub use navigation::Navigation;
pub use turn::Turn;

use serde::{Deserialize, Serialize};

use crate::core::{GameState, Move, PlayedRack, PlayerId};

/// Identifier of a command within a [`Navigation`] log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CommandId(pub u32);

impl CommandId {
    /// Create a new command ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CommandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Command({})", self.0)
    }
}

/// Kind of a per-player scoring event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Bonus for being the only top scorer of a turn.
    Solo,
    /// Warning; the value is the number of warnings given.
    Warning,
    /// Points taken away.
    Penalty,
    /// End-of-game adjustment.
    EndGame,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventKind::Solo => "solo",
            EventKind::Warning => "warning",
            EventKind::Penalty => "penalty",
            EventKind::EndGame => "end game",
        };
        f.write_str(name)
    }
}

/// What a command does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandKind {
    /// Give `player` a new rack for the turn.
    RackAssignment { player: PlayerId, rack: PlayedRack },

    /// Record the move of `player` for the turn.
    ///
    /// `arbitration` marks moves entered by an arbiter; those stay in place
    /// when the log is viewed at the start of their turn.
    PlayerMove {
        player: PlayerId,
        mv: Move,
        arbitration: bool,
    },

    /// Put the master move on the shared board.
    BoardMove { player: PlayerId, mv: Move },

    /// Set the authoritative move of the turn.
    MasterMoveSet { mv: Move },

    /// Add a scoring event to `player`.
    PlayerEvent {
        player: PlayerId,
        kind: EventKind,
        value: i32,
    },
}

impl CommandKind {
    /// Player the command is about, if any.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            CommandKind::RackAssignment { player, .. }
            | CommandKind::PlayerMove { player, .. }
            | CommandKind::BoardMove { player, .. }
            | CommandKind::PlayerEvent { player, .. } => Some(*player),
            CommandKind::MasterMoveSet { .. } => None,
        }
    }

    /// Commands describing the starting position of a turn.
    ///
    /// These stay executed when the log is viewed at the start of their
    /// turn: rack assignments and moves entered by an arbiter.
    #[must_use]
    pub fn is_auto_exec(&self) -> bool {
        matches!(
            self,
            CommandKind::RackAssignment { .. }
                | CommandKind::PlayerMove {
                    arbitration: true,
                    ..
                }
        )
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandKind::RackAssignment { player, rack } => {
                write!(f, "RackAssignment({player}, {rack})")
            }
            CommandKind::PlayerMove {
                player,
                mv,
                arbitration,
            } => {
                write!(f, "PlayerMove({player}, {mv}")?;
                if *arbitration {
                    write!(f, ", arbitration")?;
                }
                write!(f, ")")
            }
            CommandKind::BoardMove { player, mv } => write!(f, "BoardMove({player}, {mv})"),
            CommandKind::MasterMoveSet { mv } => write!(f, "MasterMoveSet({mv})"),
            CommandKind::PlayerEvent {
                player,
                kind,
                value,
            } => write!(f, "PlayerEvent({player}, {kind}, {value})"),
        }
    }
}

/// Snapshot taken by `execute`, consumed by `undo`.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Undo {
    Rack {
        turn: usize,
        prev_len: usize,
        old: PlayedRack,
    },
    PlayerMove {
        turn: usize,
        prev_len: usize,
        old: Move,
    },
    Board,
    Master {
        old: Move,
    },
    Event {
        turn: usize,
        prev_len: usize,
    },
}

/// An entry of the log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    id: CommandId,
    kind: CommandKind,
    undo: Option<Undo>,
}

impl Command {
    /// Create a command that has not been executed yet.
    #[must_use]
    pub fn new(id: CommandId, kind: CommandKind) -> Self {
        Self {
            id,
            kind,
            undo: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> CommandId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> &CommandKind {
        &self.kind
    }

    #[must_use]
    pub fn is_executed(&self) -> bool {
        self.undo.is_some()
    }

    #[must_use]
    pub fn is_auto_exec(&self) -> bool {
        self.kind.is_auto_exec()
    }

    /// Apply the command as part of turn `turn`.
    ///
    /// # Panics
    ///
    /// Panics if the command is already executed, if it refers to an
    /// unregistered player, or if a board move cannot be placed.
    pub fn execute(&mut self, state: &mut GameState, turn: usize) {
        assert!(!self.is_executed(), "{} executed twice", self.id);

        let undo = match &self.kind {
            CommandKind::RackAssignment { player, rack } => {
                let history = state.player_mut(*player).history_mut();
                let prev_len = history.len();
                let old = std::mem::replace(&mut history.entry(turn).rack, rack.clone());
                Undo::Rack {
                    turn,
                    prev_len,
                    old,
                }
            }
            CommandKind::PlayerMove { player, mv, .. } => {
                let history = state.player_mut(*player).history_mut();
                let prev_len = history.len();
                let old = std::mem::replace(&mut history.entry(turn).mv, mv.clone());
                Undo::PlayerMove {
                    turn,
                    prev_len,
                    old,
                }
            }
            CommandKind::BoardMove { mv, .. } => {
                if let Move::Valid(round) = mv {
                    state.board.place(round);
                }
                Undo::Board
            }
            CommandKind::MasterMoveSet { mv } => Undo::Master {
                old: std::mem::replace(&mut state.master_move, mv.clone()),
            },
            CommandKind::PlayerEvent {
                player,
                kind,
                value,
            } => {
                let history = state.player_mut(*player).history_mut();
                let prev_len = history.len();
                apply_event(history.entry(turn), *kind, *value);
                Undo::Event { turn, prev_len }
            }
        };
        self.undo = Some(undo);
    }

    /// Revert the command.
    ///
    /// # Panics
    ///
    /// Panics if the command has not been executed.
    pub fn undo(&mut self, state: &mut GameState) {
        let Some(undo) = self.undo.take() else {
            panic!("{} undone without being executed", self.id);
        };

        match (undo, &self.kind) {
            (
                Undo::Rack {
                    turn,
                    prev_len,
                    old,
                },
                CommandKind::RackAssignment { player, .. },
            ) => {
                let history = state.player_mut(*player).history_mut();
                history.entry(turn).rack = old;
                history.trim(prev_len.min(turn));
            }
            (
                Undo::PlayerMove {
                    turn,
                    prev_len,
                    old,
                },
                CommandKind::PlayerMove { player, .. },
            ) => {
                let history = state.player_mut(*player).history_mut();
                history.entry(turn).mv = old;
                history.trim(prev_len.min(turn));
            }
            (Undo::Board, CommandKind::BoardMove { mv, .. }) => {
                if let Move::Valid(round) = mv {
                    state.board.remove(round);
                }
            }
            (Undo::Master { old }, CommandKind::MasterMoveSet { .. }) => {
                state.master_move = old;
            }
            (
                Undo::Event { turn, prev_len },
                CommandKind::PlayerEvent {
                    player,
                    kind,
                    value,
                },
            ) => {
                let history = state.player_mut(*player).history_mut();
                apply_event(history.entry(turn), *kind, -*value);
                history.trim(prev_len.min(turn));
            }
            (undo, kind) => unreachable!("undo snapshot {undo:?} does not match {kind}"),
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.is_executed() {
            write!(f, " [pending]")?;
        }
        Ok(())
    }
}

fn apply_event(record: &mut crate::core::TurnData, kind: EventKind, value: i32) {
    match kind {
        EventKind::Solo => record.solo_points += value,
        EventKind::Penalty => record.penalty_points += value,
        EventKind::EndGame => record.end_game_points += value,
        EventKind::Warning => record.warnings = record.warnings.saturating_add_signed(value),
    }
}
