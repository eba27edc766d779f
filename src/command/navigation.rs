//! The turn log: storage, replay and time travel over commands.
//!
//! The log is a sequence of [`Turn`]s with a cursor. The last turn is the
//! one being built; earlier turns are sealed and may only be modified when
//! history edits are enabled (arbitration).
//!
//! ## Cursor moves
//!
//! Moving the cursor keeps the [`GameState`] in sync with it. A past turn is
//! shown at its *start*: the commands of later turns are undone, and so are
//! the commands of the turn itself except the auto-executable ones (rack
//! assignments and arbiter-entered moves). Moving forward executes them
//! again. The last turn always has all its commands executed.

use tracing::debug;

use super::{Command, CommandId, CommandKind, Turn};
use crate::core::{GameError, GameState};

/// Ordered turns of commands plus a cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    turns: Vec<Turn>,
    current: usize,
    history_edits: bool,
    next_id: u32,
}

impl Default for Navigation {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Navigation {
    /// A log with one empty turn.
    ///
    /// `history_edits` allows modifying sealed turns.
    #[must_use]
    pub fn new(history_edits: bool) -> Self {
        Self {
            turns: vec![Turn::new()],
            current: 0,
            history_edits,
            next_id: 0,
        }
    }

    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    #[must_use]
    pub fn turn(&self, index: usize) -> Option<&Turn> {
        self.turns.get(index)
    }

    /// Number of turns, including the one being built.
    #[must_use]
    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    /// Index of the turn under the cursor.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Turn under the cursor.
    #[must_use]
    pub fn current_turn(&self) -> &Turn {
        &self.turns[self.current]
    }

    /// Index of the turn being built.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.turns.len() - 1
    }

    #[must_use]
    pub fn is_last_turn(&self) -> bool {
        self.current == self.last_index()
    }

    #[must_use]
    pub fn history_edits(&self) -> bool {
        self.history_edits
    }

    fn check_mutable(&self) -> Result<(), GameError> {
        if self.is_last_turn() || self.history_edits {
            Ok(())
        } else {
            Err(GameError::SealedTurn)
        }
    }

    fn make_command(&mut self, kind: CommandKind) -> Command {
        let id = CommandId::new(self.next_id);
        self.next_id += 1;
        Command::new(id, kind)
    }

    fn locate(&self, id: CommandId) -> Result<usize, GameError> {
        self.current_turn()
            .position(id)
            .ok_or(GameError::UnknownCommand(id))
    }

    /// Append a command to the current turn and execute it.
    pub fn add_and_execute(
        &mut self,
        state: &mut GameState,
        kind: CommandKind,
    ) -> Result<CommandId, GameError> {
        self.check_mutable()?;
        let mut command = self.make_command(kind);
        command.execute(state, self.current);
        debug!(turn = self.current, command = %command, "Command added");

        let id = command.id();
        self.turns[self.current].push(command);
        Ok(id)
    }

    /// Execute a command and splice it before the board move of the
    /// current turn (or at its end if the board has not been played).
    pub fn insert_command(
        &mut self,
        state: &mut GameState,
        kind: CommandKind,
    ) -> Result<CommandId, GameError> {
        self.check_mutable()?;
        let mut command = self.make_command(kind);
        command.execute(state, self.current);
        debug!(turn = self.current, command = %command, "Command inserted");

        let id = command.id();
        let turn = &mut self.turns[self.current];
        let index = turn.insertion_point();
        turn.insert(index, command);
        Ok(id)
    }

    /// Execute a command and put it first in the current turn.
    ///
    /// Only for commands that commute with the rest of the turn, such as
    /// the master move reset that opens a turn.
    pub fn prepend_command(
        &mut self,
        state: &mut GameState,
        kind: CommandKind,
    ) -> Result<CommandId, GameError> {
        self.check_mutable()?;
        let mut command = self.make_command(kind);
        command.execute(state, self.current);
        debug!(turn = self.current, command = %command, "Command prepended");

        let id = command.id();
        self.turns[self.current].insert(0, command);
        Ok(id)
    }

    /// Undo and remove `old`, then execute `kind` at the same position.
    pub fn replace_command(
        &mut self,
        state: &mut GameState,
        old: CommandId,
        kind: CommandKind,
    ) -> Result<CommandId, GameError> {
        self.check_mutable()?;
        let index = self.locate(old)?;

        let mut removed = self.turns[self.current].remove(index);
        if removed.is_executed() {
            removed.undo(state);
        }

        let mut command = self.make_command(kind);
        command.execute(state, self.current);
        debug!(turn = self.current, old = %removed, new = %command, "Command replaced");

        let id = command.id();
        self.turns[self.current].insert(index, command);
        Ok(id)
    }

    /// Undo and remove a command of the current turn.
    pub fn drop_command(&mut self, state: &mut GameState, id: CommandId) -> Result<(), GameError> {
        self.check_mutable()?;
        let index = self.locate(id)?;

        let mut removed = self.turns[self.current].remove(index);
        if removed.is_executed() {
            removed.undo(state);
        }
        debug!(turn = self.current, command = %removed, "Command dropped");
        Ok(())
    }

    /// Seal the current turn and open a new one.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is not on the last turn.
    pub fn new_turn(&mut self) {
        assert!(self.is_last_turn(), "New turn opened from a past turn");
        self.turns.push(Turn::new());
        self.current += 1;
    }

    /// Move the cursor one turn back. Returns false on the first turn.
    pub fn prev_turn(&mut self, state: &mut GameState) -> bool {
        if self.current == 0 {
            return false;
        }

        for command in self.turns[self.current].commands_mut().iter_mut().rev() {
            if command.is_executed() {
                command.undo(state);
            }
        }
        self.current -= 1;
        self.rewind_turn(state);
        true
    }

    /// Move the cursor one turn forward. Returns false on the last turn.
    pub fn next_turn(&mut self, state: &mut GameState) -> bool {
        if self.is_last_turn() {
            return false;
        }

        let turn = self.current;
        for command in self.turns[turn].commands_mut() {
            if !command.is_executed() {
                command.execute(state, turn);
            }
        }
        self.current += 1;

        let turn = self.current;
        let all = self.is_last_turn();
        for command in self.turns[turn].commands_mut() {
            if !command.is_executed() && (all || command.is_auto_exec()) {
                command.execute(state, turn);
            }
        }
        true
    }

    /// Move the cursor to the first turn.
    pub fn first_turn(&mut self, state: &mut GameState) {
        while self.prev_turn(state) {}
    }

    /// Move the cursor to the last turn.
    pub fn last_turn(&mut self, state: &mut GameState) {
        while self.next_turn(state) {}
    }

    /// Bring the cursor turn back to its start: undo its executed commands
    /// that are not auto-executed, last-added first.
    pub fn rewind_turn(&mut self, state: &mut GameState) {
        for command in self.turns[self.current].commands_mut().iter_mut().rev() {
            if command.is_executed() && !command.is_auto_exec() {
                command.undo(state);
            }
        }
    }

    /// Drop every turn after the cursor, and the not-yet-executed commands
    /// of the cursor turn, which becomes the turn being built.
    ///
    /// Dropped commands are undone last-added first.
    pub fn clear_future(&mut self, state: &mut GameState) {
        let dropped = self.turns.len() - 1 - self.current;
        while self.turns.len() > self.current + 1 {
            if let Some(mut turn) = self.turns.pop() {
                for command in turn.commands_mut().iter_mut().rev() {
                    if command.is_executed() {
                        command.undo(state);
                    }
                }
            }
        }
        self.turns[self.current]
            .commands_mut()
            .retain(Command::is_executed);
        debug!(turn = self.current, dropped, "Future turns cleared");
    }
}
