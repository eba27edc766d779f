//! Move ranking: AI level selection, master move election and the solo
//! bonus.

use tracing::{debug, info};

use super::Duplicate;
use crate::command::{Command, CommandId, CommandKind, EventKind};
use crate::core::{GameError, Move, PlayerId, SoloRule};
use crate::rules::{RackDrawer, WordRules};

/// Pick the move a computer player of `level` plays among `candidates`
/// (best score first).
///
/// The best candidate scoring at most `level`% of the top score, or the
/// weakest candidate when all score more.
pub(crate) fn pick_by_level(candidates: Vec<Move>, level: u8) -> Option<Move> {
    let top = candidates.first()?.score();
    let threshold = top * i32::from(level.min(100)) / 100;
    let index = candidates
        .iter()
        .position(|mv| mv.score() <= threshold)
        .unwrap_or(candidates.len() - 1);
    candidates.into_iter().nth(index)
}

impl<R: WordRules, D: RackDrawer> Duplicate<R, D> {
    /// The player with the strictly highest valid move of the turn under
    /// the cursor. The first player in registration order wins ties.
    #[must_use]
    pub fn find_best_player(&self) -> Option<(PlayerId, Move)> {
        let mut best: Option<(PlayerId, &Move)> = None;
        let mut best_score = -1;
        for id in self.state.players.player_ids() {
            let mv = self.move_of(id);
            if mv.is_valid() && mv.score() > best_score {
                best_score = mv.score();
                best = Some((id, mv));
            }
        }
        best.map(|(id, mv)| (id, mv.clone()))
    }

    /// Recompute the solo bonus of the turn under the cursor.
    ///
    /// Existing solos of the turn are dropped first. A solo is awarded when
    /// at least `rule.min_players` players are active and the top valid
    /// move of the turn was found by exactly one player.
    pub(crate) fn set_solo_auto(&mut self, rule: SoloRule) -> Result<(), GameError> {
        let stale: Vec<CommandId> = self
            .navigation
            .current_turn()
            .events(EventKind::Solo)
            .map(Command::id)
            .collect();
        for id in stale {
            self.navigation.drop_command(&mut self.state, id)?;
        }

        let active = self.state.players.values().filter(|p| p.is_active()).count();
        if (active as u64) < u64::from(rule.min_players) {
            debug!(active, min = rule.min_players, "Not enough players for a solo");
            return Ok(());
        }

        let Some((best, mv)) = self.find_best_player() else {
            return Ok(());
        };
        let tied = self.state.players.player_ids().any(|id| {
            let other = self.move_of(id);
            id != best && other.is_valid() && other.score() >= mv.score()
        });
        if tied {
            debug!(score = mv.score(), "Top score shared, no solo");
            return Ok(());
        }

        info!(player = %best, value = rule.value, "Solo awarded");
        self.navigation.insert_command(
            &mut self.state,
            CommandKind::PlayerEvent {
                player: best,
                kind: EventKind::Solo,
                value: rule.value,
            },
        )?;
        Ok(())
    }
}
