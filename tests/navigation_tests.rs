//! Time travel and replay tests.
//!
//! A played game is browsed turn by turn, then truncated and replayed.
//! Viewing a past turn must not alter the game, and replaying the same
//! submissions must rebuild the same log.

mod common;

use common::{init_tracing, valid, ScriptedDrawer, ScriptedRules};
use rust_duplicate::command::CommandKind;
use rust_duplicate::core::{DuplicateConfig, GameError, Move, PlayerId, PlayerKind, TileSet};
use rust_duplicate::duplicate::{Duplicate, TurnStatus};
use rust_duplicate::rules::{RackDrawer, RandomDrawer, WordRules};

fn rules() -> ScriptedRules {
    ScriptedRules::new()
        .word("H8", "CAT", 12)
        .word("A1", "DOG", 15)
        .word("C3", "EMU", 15)
        .word("E5", "FOX", 9)
}

/// Two humans, two resolved turns, waiting in turn 2.
fn two_turns() -> (Duplicate<ScriptedRules, RandomDrawer>, PlayerId, PlayerId) {
    init_tracing();
    let drawer = RandomDrawer::new(TileSet::english(), 7);
    let mut game = Duplicate::new(DuplicateConfig::default(), rules(), drawer);
    let ann = game.add_player("ann", PlayerKind::Human).unwrap();
    let bob = game.add_player("bob", PlayerKind::Human).unwrap();
    game.start().unwrap();
    play_turns(&mut game);
    (game, ann, bob)
}

fn play_turns<R: WordRules, D: RackDrawer>(game: &mut Duplicate<R, D>) {
    game.play("H8", "CAT").unwrap();
    game.play("A1", "DOG").unwrap();
    game.play("C3", "EMU").unwrap();
    game.play("E5", "FOX").unwrap();
}

fn kinds<R, D>(game: &Duplicate<R, D>) -> Vec<Vec<CommandKind>>
where
    R: WordRules,
    D: RackDrawer,
{
    game.navigation()
        .turns()
        .iter()
        .map(|turn| turn.iter().map(|c| c.kind().clone()).collect())
        .collect()
}

// =============================================================================
// Browsing
// =============================================================================

/// The first turn is shown as it started: racks dealt, nothing played.
#[test]
fn test_first_turn_shows_its_start() {
    let (mut game, ann, bob) = two_turns();
    assert_eq!(game.navigation().current_index(), 2);

    game.first_turn();

    assert_eq!(game.navigation().current_index(), 0);
    assert!(game.board().is_empty());
    assert!(game.master_move().is_null());
    assert_eq!(game.move_of(ann), &Move::None);
    assert!(!game.has_played(bob));
    assert_eq!(game.rack_of(ann).len(), 7);
    assert_eq!(game.rack_of(ann), game.rack_of(bob));
    assert!(!game.prev_turn());
}

/// Going back and forth leaves the game exactly as it was.
#[test]
fn test_browsing_round_trip() {
    let (mut game, _, _) = two_turns();
    let before = game.state().clone();
    let log = kinds(&game);

    assert!(game.prev_turn());
    assert_eq!(game.board().tile_count(), 3);
    assert!(game.prev_turn());
    assert!(game.next_turn());
    game.last_turn();

    assert!(!game.next_turn());
    assert_eq!(game.state(), &before);
    assert_eq!(kinds(&game), log);
}

/// Past turns are read-only outside arbitration.
#[test]
fn test_past_turns_are_sealed() {
    let (mut game, _, _) = two_turns();
    game.prev_turn();

    assert_eq!(game.play("H8", "CAT"), Err(GameError::SealedTurn));
    assert_eq!(game.end_turn(), Err(GameError::SealedTurn));
    assert!(GameError::SealedTurn.is_fatal());
}

// =============================================================================
// Replay
// =============================================================================

/// Truncating at turn 0 and submitting the same words again rebuilds the
/// same log and the same state.
#[test]
fn test_replay_with_same_moves_matches() {
    let (mut game, ann, _) = two_turns();
    let before = game.state().clone();
    let log = kinds(&game);

    game.first_turn();
    assert_eq!(game.replay_turn(), Ok(TurnStatus::AwaitingMove(ann)));
    assert_eq!(game.navigation().turn_count(), 1);

    play_turns(&mut game);

    assert_eq!(game.state(), &before);
    assert_eq!(kinds(&game), log);
}

/// Replaying from the last sealed turn and submitting the same words
/// rebuilds the same log, with the master move reset still opening the
/// turn.
#[test]
fn test_replay_from_sealed_turn_matches() {
    let (mut game, ann, _) = two_turns();
    let before = game.state().clone();
    let log = kinds(&game);

    game.first_turn();
    game.next_turn();
    assert_eq!(game.replay_turn(), Ok(TurnStatus::AwaitingMove(ann)));
    assert_eq!(
        game.navigation().current_turn().iter().next().map(|c| c.kind()),
        Some(&CommandKind::MasterMoveSet { mv: Move::None })
    );

    game.play("C3", "EMU").unwrap();
    game.play("E5", "FOX").unwrap();

    assert_eq!(game.state(), &before);
    assert_eq!(kinds(&game), log);
}

/// Replaying the turn being built drops its moves and leaves its opening
/// commands in place.
#[test]
fn test_replay_current_turn_matches() {
    let (mut game, ann, _) = two_turns();
    let before = game.state().clone();
    let log = kinds(&game);
    game.play("H8", "CAT").unwrap();

    assert_eq!(game.replay_turn(), Ok(TurnStatus::AwaitingMove(ann)));

    assert_eq!(game.state(), &before);
    assert_eq!(kinds(&game), log);
}

/// Replaying from turn 1 keeps turn 0 and lets a different move through.
#[test]
fn test_replay_from_middle() {
    let (mut game, ann, bob) = two_turns();
    game.first_turn();
    game.next_turn();
    let turn0 = game.navigation().turn(0).unwrap().clone();

    game.replay_turn().unwrap();
    game.play("E5", "FOX").unwrap();
    let status = game.play("C3", "EMU").unwrap();

    assert_eq!(status, TurnStatus::AwaitingMove(ann));
    assert_eq!(game.navigation().turn(0), Some(&turn0));
    assert_eq!(
        game.navigation().turn(1).unwrap().board_move(),
        Some(&valid("EMU", "C3", 15))
    );
    assert_eq!(game.player(ann).unwrap().total_score(), 12 + 9);
    assert_eq!(game.player(bob).unwrap().total_score(), 15 + 15);
}

/// Replaying the turn a game ended on reopens it.
#[test]
fn test_replay_reopens_finished_game() {
    init_tracing();
    let drawer = ScriptedDrawer::new(&["ABCDEFG"]);
    let mut game = Duplicate::new(DuplicateConfig::default(), ScriptedRules::new(), drawer);
    let ann = game.add_player("ann", PlayerKind::Human).unwrap();
    game.start().unwrap();
    assert!(matches!(game.play("H8", "NOPE"), Ok(TurnStatus::Finished(_))));

    let status = game.replay_turn().unwrap();

    assert_eq!(status, TurnStatus::AwaitingMove(ann));
    assert!(!game.is_finished());
    assert!(!game.has_played(ann));
    assert_eq!(game.rack_of(ann).to_string(), "ABCDEFG");
}
