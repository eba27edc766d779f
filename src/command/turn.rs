//! One turn of the log: the commands issued during one round of play.

use super::{Command, CommandId, CommandKind, EventKind};
use crate::core::{Move, PlayerId};

/// Ordered commands of a turn, with typed lookups.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Turn {
    commands: Vec<Command>,
}

impl Turn {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    /// Command with the given id.
    #[must_use]
    pub fn find(&self, id: CommandId) -> Option<&Command> {
        self.commands.iter().find(|c| c.id() == id)
    }

    /// Position of the command with the given id.
    #[must_use]
    pub fn position(&self, id: CommandId) -> Option<usize> {
        self.commands.iter().position(|c| c.id() == id)
    }

    /// The first move command of `player` in this turn.
    #[must_use]
    pub fn find_player_move(&self, player: PlayerId) -> Option<&Command> {
        self.commands.iter().find(|c| {
            matches!(c.kind(), CommandKind::PlayerMove { player: p, .. } if *p == player)
        })
    }

    /// The first rack given to `player` in this turn.
    #[must_use]
    pub fn find_rack_assignment(&self, player: PlayerId) -> Option<&Command> {
        self.commands.iter().find(|c| {
            matches!(c.kind(), CommandKind::RackAssignment { player: p, .. } if *p == player)
        })
    }

    /// The executed move of `player`, if any.
    #[must_use]
    pub fn live_player_move(&self, player: PlayerId) -> Option<&Move> {
        self.commands.iter().find_map(|c| match c.kind() {
            CommandKind::PlayerMove { player: p, mv, .. } if *p == player && c.is_executed() => {
                Some(mv)
            }
            _ => None,
        })
    }

    /// Events of `kind` given to `player` in this turn.
    pub fn player_events(
        &self,
        player: PlayerId,
        kind: EventKind,
    ) -> impl Iterator<Item = &Command> + '_ {
        self.commands.iter().filter(move |c| {
            matches!(
                c.kind(),
                CommandKind::PlayerEvent { player: p, kind: k, .. } if *p == player && *k == kind
            )
        })
    }

    /// The first event of `kind` given to `player` in this turn.
    #[must_use]
    pub fn find_player_event(&self, player: PlayerId, kind: EventKind) -> Option<&Command> {
        self.player_events(player, kind).next()
    }

    /// Events of `kind`, whoever received them.
    pub fn events(&self, kind: EventKind) -> impl Iterator<Item = &Command> + '_ {
        self.commands
            .iter()
            .filter(move |c| matches!(c.kind(), CommandKind::PlayerEvent { kind: k, .. } if *k == kind))
    }

    /// The last master move set in this turn.
    #[must_use]
    pub fn master_move(&self) -> Option<&Move> {
        self.commands.iter().rev().find_map(|c| match c.kind() {
            CommandKind::MasterMoveSet { mv } => Some(mv),
            _ => None,
        })
    }

    /// The move put on the board during this turn.
    #[must_use]
    pub fn board_move(&self) -> Option<&Move> {
        self.commands.iter().find_map(|c| match c.kind() {
            CommandKind::BoardMove { mv, .. } => Some(mv),
            _ => None,
        })
    }

    /// Where out-of-band commands go: just before the board move, or at the
    /// end if the board has not been played yet.
    #[must_use]
    pub fn insertion_point(&self) -> usize {
        self.commands
            .iter()
            .position(|c| matches!(c.kind(), CommandKind::BoardMove { .. }))
            .unwrap_or(self.commands.len())
    }

    pub(crate) fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub(crate) fn insert(&mut self, index: usize, command: Command) {
        self.commands.insert(index, command);
    }

    pub(crate) fn remove(&mut self, index: usize) -> Command {
        self.commands.remove(index)
    }

    pub(crate) fn commands_mut(&mut self) -> &mut Vec<Command> {
        &mut self.commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Coord, Round};

    fn valid(points: i32) -> Move {
        Move::Valid(Round::new("CAT", "H8".parse::<Coord>().unwrap(), points))
    }

    fn sample_turn() -> Turn {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);
        let kinds = vec![
            CommandKind::PlayerMove {
                player: p1,
                mv: valid(10),
                arbitration: false,
            },
            CommandKind::MasterMoveSet { mv: valid(10) },
            CommandKind::PlayerEvent {
                player: p1,
                kind: EventKind::Solo,
                value: 10,
            },
            CommandKind::BoardMove {
                player: p0,
                mv: valid(10),
            },
            CommandKind::MasterMoveSet { mv: Move::None },
        ];
        let mut turn = Turn::new();
        for (i, kind) in kinds.into_iter().enumerate() {
            turn.push(Command::new(CommandId::new(i as u32), kind));
        }
        turn
    }

    #[test]
    fn test_typed_lookups() {
        let turn = sample_turn();
        let p1 = PlayerId::new(1);

        assert_eq!(turn.find_player_move(p1).map(Command::id), Some(CommandId::new(0)));
        assert!(turn.find_player_move(PlayerId::new(0)).is_none());
        assert_eq!(
            turn.find_player_event(p1, EventKind::Solo).map(Command::id),
            Some(CommandId::new(2))
        );
        assert!(turn.find_player_event(p1, EventKind::Penalty).is_none());
        assert_eq!(turn.events(EventKind::Solo).count(), 1);
        assert_eq!(turn.board_move(), Some(&valid(10)));
    }

    #[test]
    fn test_last_master_move_wins() {
        assert_eq!(sample_turn().master_move(), Some(&Move::None));
        assert_eq!(Turn::new().master_move(), None);
    }

    #[test]
    fn test_live_move_requires_execution() {
        let turn = sample_turn();
        assert_eq!(turn.live_player_move(PlayerId::new(1)), None);
    }

    #[test]
    fn test_insertion_point() {
        assert_eq!(sample_turn().insertion_point(), 3);
        assert_eq!(Turn::new().insertion_point(), 0);

        let mut turn = sample_turn();
        turn.remove(3);
        assert_eq!(turn.insertion_point(), 4);
        assert_eq!(turn.position(CommandId::new(4)), Some(3));
    }
}
