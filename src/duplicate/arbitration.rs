//! Arbitration: an arbiter enters the moves, racks and events of each turn.
//!
//! All operations apply to the turn under the cursor, which may be a past
//! turn. Later turns are not revalidated after such an edit.

use tracing::{info, warn};

use super::{Duplicate, EndReason, TurnStatus, REFERENCE_PLAYER};
use crate::command::{Command, CommandId, CommandKind, EventKind};
use crate::core::{GameError, Move, PlayedRack, PlayerId};
use crate::rules::{RackDrawer, WordRules};

impl<R: WordRules, D: RackDrawer> Duplicate<R, D> {
    fn ensure_arbitration(&self) -> Result<(), GameError> {
        if self.config.is_arbitration() {
            Ok(())
        } else {
            Err(GameError::NotArbitration)
        }
    }

    fn ensure_player(&self, player: PlayerId) -> Result<(), GameError> {
        if self.state.players.contains(player) {
            Ok(())
        } else {
            Err(GameError::UnknownPlayer(player))
        }
    }

    /// Record `mv` as the move of `player`, replacing any earlier one.
    ///
    /// Unlike [`play`](Self::play), computer players and players who have
    /// already played are accepted. A valid move must still fit on the
    /// board of the turn.
    pub fn assign_move(&mut self, player: PlayerId, mv: Move) -> Result<CommandId, GameError> {
        self.ensure_arbitration()?;
        self.ensure_player(player)?;
        self.ensure_placeable(&mv)?;
        self.record_player_move(player, mv)
    }

    /// Set the master move of the turn. Only valid moves that fit on the
    /// board, or `Move::None`, are accepted.
    pub fn choose_master_move(&mut self, mv: Move) -> Result<(), GameError> {
        self.ensure_arbitration()?;
        self.ensure_placeable(&mv)?;
        self.set_master_move(mv)
    }

    /// Give every player the rack typed by the arbiter (`OLD+NEW` form).
    pub fn set_rack_manual(&mut self, rack: &str) -> Result<(), GameError> {
        self.ensure_arbitration()?;
        let rack: PlayedRack = rack.parse()?;
        info!(rack = %rack, "Rack set by the arbiter");
        self.give_rack(rack)
    }

    /// Complete the leftover rack at random and give it to every player.
    pub fn set_rack_random(&mut self) -> Result<TurnStatus, GameError> {
        self.ensure_arbitration()?;
        let turn = self.navigation.current_index();
        let leftover = self.leftover_rack(turn);
        match self
            .drawer
            .draw_rack(turn, &self.state.board, &leftover, true)
        {
            Ok(rack) => {
                info!(turn, rack = %rack, "Random rack drawn");
                self.give_rack(rack)?;
                Ok(TurnStatus::AwaitingArbitration)
            }
            Err(end) => self.finish(EndReason::Rack(end)),
        }
    }

    /// Add a scoring event for `player`.
    pub fn add_event(
        &mut self,
        player: PlayerId,
        kind: EventKind,
        value: i32,
    ) -> Result<CommandId, GameError> {
        self.ensure_arbitration()?;
        self.ensure_player(player)?;
        self.navigation
            .insert_command(&mut self.state, CommandKind::PlayerEvent { player, kind, value })
    }

    /// Give `player` a warning.
    ///
    /// Once the player has more warnings than `warnings_limit`, every
    /// further warning also costs `warning_penalty` points.
    pub fn add_warning(&mut self, player: PlayerId) -> Result<CommandId, GameError> {
        let id = self.add_event(player, EventKind::Warning, 1)?;
        let warnings = self.state.players[player].warnings();
        if warnings > self.config.warnings_limit {
            warn!(player = %player, warnings, "Warnings limit exceeded");
            self.add_event(player, EventKind::Penalty, self.config.warning_penalty)?;
        }
        Ok(id)
    }

    /// Remove the first event of `kind` given to `player` in the turn.
    ///
    /// Returns false when there is no such event.
    pub fn remove_event(&mut self, player: PlayerId, kind: EventKind) -> Result<bool, GameError> {
        self.ensure_arbitration()?;
        let Some(id) = self
            .navigation
            .current_turn()
            .find_player_event(player, kind)
            .map(Command::id)
        else {
            return Ok(false);
        };
        self.navigation.drop_command(&mut self.state, id)?;
        Ok(true)
    }

    /// Recompute the solos of the turn with the arbitration solo rule.
    pub fn compute_solos(&mut self) -> Result<(), GameError> {
        self.ensure_arbitration()?;
        self.set_solo_auto(self.config.arbitration_solo)
    }

    /// Rack the arbiter is working with.
    #[must_use]
    pub fn arbitration_rack(&self) -> PlayedRack {
        self.rack_of(REFERENCE_PLAYER)
    }
}
