//! Duplicate-mode turn resolution.
//!
//! Every player gets the same rack and proposes a move against the same
//! board. When the turn closes, one authoritative *master move* is put on
//! the board, solo bonuses are computed, and every player receives the same
//! next rack.
//!
//! ## Turn flow
//!
//! 1. The rack of the turn is dealt to every player (drawn, forced by a
//!    reference game, or kept for the arbiter to set).
//! 2. Humans submit moves through [`Duplicate::play`]. While one of them
//!    has not played, the engine returns [`TurnStatus::AwaitingMove`].
//! 3. Computer players then play, the master move is chosen, the solo rule
//!    applies, the master move goes on the board and the next turn starts.
//!
//! Turns where nobody is human resolve on their own, in a loop, until a
//! human is needed or the game ends. In arbitration mode turns only close
//! through [`Duplicate::end_turn`].
//!
//! Running out of letters or moves is not an error: the game moves to
//! [`TurnStatus::Finished`] with an [`EndReason`].

mod arbitration;
mod solo;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::command::{Command, CommandId, CommandKind, Navigation};
use crate::core::{
    Board, DuplicateConfig, GameError, GameState, Move, PlayError, PlayedRack, Player, PlayerId,
    PlayerKind, TileSet, MAX_PLAYERS,
};
use crate::rules::{EndOfGame, RackDrawer, RandomDrawer, WordRules};

/// The player whose rack drives the game: racks are drawn from it and the
/// master move is put on the board in its name.
pub const REFERENCE_PLAYER: PlayerId = PlayerId(0);

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndReason {
    /// No further rack could be drawn.
    Rack(EndOfGame),
    /// Nobody played a valid move and the search found none either.
    NoPossibleMove,
    /// The reference game has no more turns.
    ReferenceExhausted,
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndReason::Rack(end) => write!(f, "{end}"),
            EndReason::NoPossibleMove => write!(f, "no possible move"),
            EndReason::ReferenceExhausted => write!(f, "end of the reference game"),
        }
    }
}

/// Where the game stands after an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnStatus {
    /// Waiting for this human player to submit a move.
    AwaitingMove(PlayerId),
    /// Arbitration game: waiting for the arbiter to close the turn.
    AwaitingArbitration,
    /// The game is over.
    Finished(EndReason),
}

/// One turn of a reference game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceTurn {
    pub rack: PlayedRack,
    pub master: Move,
}

/// Racks and master moves imposed on a game, turn by turn.
///
/// Replaying a known game this way lets players compare themselves with
/// the original master moves.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceGame {
    turns: Vec<ReferenceTurn>,
}

impl ReferenceGame {
    #[must_use]
    pub fn new(turns: Vec<ReferenceTurn>) -> Self {
        Self { turns }
    }

    pub fn push(&mut self, rack: PlayedRack, master: Move) {
        self.turns.push(ReferenceTurn { rack, master });
    }

    #[must_use]
    pub fn turn(&self, index: usize) -> Option<&ReferenceTurn> {
        self.turns.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// A duplicate game: players, command log and turn resolver.
pub struct Duplicate<R, D = RandomDrawer> {
    config: DuplicateConfig,
    rules: R,
    drawer: D,
    state: GameState,
    navigation: Navigation,
    current_player: PlayerId,
    reference: Option<ReferenceGame>,
    ended: Option<EndReason>,
}

impl<R: WordRules> Duplicate<R, RandomDrawer> {
    /// Create a game drawing racks from `tiles` with the rack size and
    /// vowel/consonant checks of `config`.
    pub fn with_random_drawer(
        config: DuplicateConfig,
        rules: R,
        tiles: TileSet,
        seed: u64,
    ) -> Self {
        let drawer = RandomDrawer::from_config(&config, tiles, seed);
        Self::new(config, rules, drawer)
    }
}

impl<R: WordRules, D: RackDrawer> Duplicate<R, D> {
    /// Create a game without players.
    pub fn new(config: DuplicateConfig, rules: R, drawer: D) -> Self {
        let navigation = Navigation::new(config.is_arbitration());
        Self {
            config,
            rules,
            drawer,
            state: GameState::new(),
            navigation,
            current_player: REFERENCE_PLAYER,
            reference: None,
            ended: None,
        }
    }

    /// Impose racks and master moves from a reference game.
    #[must_use]
    pub fn with_reference(mut self, reference: ReferenceGame) -> Self {
        self.reference = Some(reference);
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &DuplicateConfig {
        &self.config
    }

    #[must_use]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    #[must_use]
    pub fn drawer(&self) -> &D {
        &self.drawer
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.state.board
    }

    #[must_use]
    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.state.player(id)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.state.players.values()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.state.player_count()
    }

    /// Player whose move is being entered.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    /// Authoritative move of the turn so far (`Move::None` if undecided).
    #[must_use]
    pub fn master_move(&self) -> &Move {
        &self.state.master_move
    }

    #[must_use]
    pub fn reference(&self) -> Option<&ReferenceGame> {
        self.reference.as_ref()
    }

    #[must_use]
    pub fn end_reason(&self) -> Option<EndReason> {
        self.ended
    }

    #[must_use]
    pub fn is_arbitration_game(&self) -> bool {
        self.config.is_arbitration()
    }

    /// Whether no further turn can be played.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        if self.ended.is_some() {
            return true;
        }
        match self.state.player(REFERENCE_PLAYER) {
            Some(reference) => {
                !self
                    .drawer
                    .can_draw_rack(&self.state.board, reference.current_rack(), true)
            }
            None => false,
        }
    }

    /// Has `player` recorded a non-null move in the current turn?
    #[must_use]
    pub fn has_played(&self, player: PlayerId) -> bool {
        self.navigation
            .current_turn()
            .find_player_move(player)
            .is_some_and(|c| {
                c.is_executed()
                    && matches!(c.kind(), CommandKind::PlayerMove { mv, .. } if !mv.is_null())
            })
    }

    /// Rack of `player` in the turn under the cursor.
    #[must_use]
    pub fn rack_of(&self, player: PlayerId) -> PlayedRack {
        self.state
            .player(player)
            .and_then(|p| p.history().turn(self.navigation.current_index()))
            .map(|t| t.rack.clone())
            .unwrap_or_default()
    }

    /// Move of `player` in the turn under the cursor.
    #[must_use]
    pub fn move_of(&self, player: PlayerId) -> &Move {
        static NO_MOVE: Move = Move::None;
        self.state
            .player(player)
            .and_then(|p| p.history().turn(self.navigation.current_index()))
            .map_or(&NO_MOVE, |t| &t.mv)
    }

    // === Players ===

    /// Register a player. The first player registered is the reference
    /// player.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        kind: PlayerKind,
    ) -> Result<PlayerId, GameError> {
        self.add_player_at_table(name, kind, 0)
    }

    /// Register a player sitting at `table`.
    ///
    /// A player joining a started game receives the current rack.
    pub fn add_player_at_table(
        &mut self,
        name: impl Into<String>,
        kind: PlayerKind,
        table: u32,
    ) -> Result<PlayerId, GameError> {
        let id = match u8::try_from(self.state.player_count()) {
            Ok(index) if usize::from(index) < MAX_PLAYERS => PlayerId::new(index),
            _ => return Err(GameError::TooManyPlayers),
        };
        let player = Player::new(id, name, kind).with_table(table);
        info!(player = %id, name = player.name(), "Player added");
        self.state
            .players
            .push(player)
            .ok_or(GameError::TooManyPlayers)?;

        if id != REFERENCE_PLAYER && self.ended.is_none() && self.navigation.is_last_turn() {
            let rack = self.state.players[REFERENCE_PLAYER].current_rack().clone();
            if !rack.is_empty() {
                let kind = CommandKind::RackAssignment { player: id, rack };
                self.navigation.add_and_execute(&mut self.state, kind)?;
            }
        }
        Ok(id)
    }

    /// Make `player` the one whose move is entered next.
    pub fn set_player(&mut self, player: PlayerId) -> Result<(), GameError> {
        let target = self
            .state
            .player(player)
            .ok_or(GameError::UnknownPlayer(player))?;
        if !target.is_human() {
            return Err(GameError::NotHuman(player));
        }
        if self.has_played(player) {
            return Err(GameError::AlreadyPlayed(player));
        }
        self.current_player = player;
        Ok(())
    }

    // === Turn flow ===

    /// Deal the first rack (if not done yet) and run the turn loop.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> Result<TurnStatus, GameError> {
        if self.state.players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        if let Some(reason) = self.ended {
            return Ok(TurnStatus::Finished(reason));
        }
        if !self.is_started() {
            if let Some(reason) = self.deal_rack()? {
                return self.finish(reason);
            }
        }
        self.advance()
    }

    fn is_started(&self) -> bool {
        self.navigation.turn_count() > 1 || !self.navigation.current_turn().is_empty()
    }

    /// Check a word against the reference rack without recording anything.
    pub fn check_word(&self, coord: &str, word: &str) -> Result<Move, PlayError> {
        let rack = self.rack_of(REFERENCE_PLAYER);
        self.rules
            .check_played_word(&self.state.board, &rack, coord, word)
            .map(Move::Valid)
    }

    /// Submit the word of the current player.
    ///
    /// A rejected word is recorded as an invalid move, unless the
    /// configuration rejects invalid words: then the checker's error is
    /// returned and nothing is recorded.
    #[instrument(skip(self))]
    pub fn play(&mut self, coord: &str, word: &str) -> Result<TurnStatus, GameError> {
        if self.is_finished() {
            return Err(GameError::Finished);
        }
        if !self.navigation.is_last_turn() && !self.config.is_arbitration() {
            return Err(GameError::SealedTurn);
        }
        let player = self.current_player;
        let current = self
            .state
            .player(player)
            .ok_or(GameError::UnknownPlayer(player))?;
        if !current.is_human() {
            return Err(GameError::NotHuman(player));
        }
        if self.has_played(player) {
            return Err(GameError::AlreadyPlayed(player));
        }

        let rack = self.rack_of(player);
        let mv = match self
            .rules
            .check_played_word(&self.state.board, &rack, coord, word)
        {
            Ok(round) => Move::Valid(round),
            Err(err) if self.config.reject_invalid => {
                debug!(player = %player, %err, "Word rejected");
                return Err(err.into());
            }
            Err(err) => {
                debug!(player = %player, %err, "Recording invalid word");
                Move::invalid(word, coord)
            }
        };

        self.record_player_move(player, mv)?;
        self.advance()
    }

    /// Let computer player `player` play its move.
    pub fn play_ai(&mut self, player: PlayerId) -> Result<(), GameError> {
        let current = self
            .state
            .player(player)
            .ok_or(GameError::UnknownPlayer(player))?;
        let PlayerKind::Computer { level } = current.kind() else {
            return Err(GameError::Inconsistent(format!(
                "AI move requested for human {player}"
            )));
        };
        if self.has_played(player) {
            return Err(GameError::AlreadyPlayed(player));
        }

        let rack = self.rack_of(player);
        let candidates = self.rules.search(&self.state.board, &rack);
        let Some(mv) = solo::pick_by_level(candidates, level) else {
            debug!(player = %player, "No move found");
            return Ok(());
        };
        if mv.is_pass() || mv.is_change_letters() {
            return Err(GameError::Inconsistent(format!(
                "{player} tried to play {mv} in a duplicate game"
            )));
        }
        self.record_player_move(player, mv)?;
        Ok(())
    }

    /// Close the turn now: computer players play, the master move is
    /// chosen and applied, the next turn starts.
    ///
    /// Humans who have not played score nothing for the turn.
    #[instrument(skip(self))]
    pub fn end_turn(&mut self) -> Result<TurnStatus, GameError> {
        if self.is_finished() {
            return Err(GameError::Finished);
        }
        if !self.navigation.is_last_turn() {
            return Err(GameError::SealedTurn);
        }
        if let Some(reason) = self.close_turn()? {
            return self.finish(reason);
        }
        self.advance()
    }

    /// Record `mv` for `player`, replacing an earlier move of the turn.
    fn record_player_move(&mut self, player: PlayerId, mv: Move) -> Result<CommandId, GameError> {
        info!(player = %player, mv = %mv, "Player plays");
        let existing = self
            .navigation
            .current_turn()
            .find_player_move(player)
            .map(Command::id);
        let kind = CommandKind::PlayerMove {
            player,
            mv,
            arbitration: self.config.is_arbitration(),
        };
        match existing {
            Some(old) => {
                debug!(player = %player, "Replacing move");
                self.navigation.replace_command(&mut self.state, old, kind)
            }
            None => self.navigation.add_and_execute(&mut self.state, kind),
        }
    }

    /// Resolve turns until a human or the arbiter is needed.
    fn advance(&mut self) -> Result<TurnStatus, GameError> {
        loop {
            if let Some(status) = self.pending_turn_status() {
                return Ok(status);
            }
            if let Some(reason) = self.close_turn()? {
                return self.finish(reason);
            }
        }
    }

    /// What the current turn is waiting for, or `None` if it can close.
    fn pending_turn_status(&mut self) -> Option<TurnStatus> {
        if let Some(reason) = self.ended {
            return Some(TurnStatus::Finished(reason));
        }
        if self.config.is_arbitration() {
            return Some(TurnStatus::AwaitingArbitration);
        }
        let waiting = self
            .state
            .players
            .iter()
            .find(|(id, p)| p.is_human() && !self.has_played(*id))
            .map(|(id, _)| id)?;
        self.current_player = waiting;
        Some(TurnStatus::AwaitingMove(waiting))
    }

    /// Let the missing computer players play, then resolve the turn.
    fn close_turn(&mut self) -> Result<Option<EndReason>, GameError> {
        self.ensure_placeable(&self.state.master_move)?;
        let missing: Vec<PlayerId> = self
            .state
            .players
            .iter()
            .filter(|(id, p)| !p.is_human() && !self.has_played(*id))
            .map(|(id, _)| id)
            .collect();
        for player in missing {
            self.play_ai(player)?;
        }
        self.resolve_turn()
    }

    /// Decide the master move, apply the solo rule, put the master move on
    /// the board and start the next turn.
    #[instrument(skip(self))]
    fn resolve_turn(&mut self) -> Result<Option<EndReason>, GameError> {
        let turn = self.navigation.current_index();

        if let Some(reference) = &self.reference {
            let expected = reference.turn(turn).map(|t| &t.master);
            if expected != Some(&self.state.master_move) {
                return Err(GameError::Inconsistent(format!(
                    "master move of turn {turn} differs from the reference game"
                )));
            }
        }

        if !self.state.master_move.is_valid() {
            let master = match self.find_best_player() {
                Some((_, mv)) => mv,
                None => {
                    let rack = self.rack_of(REFERENCE_PLAYER);
                    match self.rules.best_move(&self.state.board, &rack) {
                        Some(mv) => mv,
                        None => return Ok(Some(EndReason::NoPossibleMove)),
                    }
                }
            };
            self.ensure_placeable(&master)?;
            self.set_master_move(master)?;
        }

        if let Some(rule) = self.config.active_solo_rule() {
            self.set_solo_auto(rule)?;
        }

        let master = self.state.master_move.clone();
        info!(turn, master = %master, "Master move played");
        self.navigation.add_and_execute(
            &mut self.state,
            CommandKind::BoardMove {
                player: REFERENCE_PLAYER,
                mv: master,
            },
        )?;

        self.navigation.new_turn();
        self.deal_rack()
    }

    /// Rack left to the reference player by the previous turn.
    fn leftover_rack(&self, turn: usize) -> PlayedRack {
        let Some(prev) = turn.checked_sub(1) else {
            return PlayedRack::empty();
        };
        let rack = self.state.players[REFERENCE_PLAYER]
            .history()
            .turn(prev)
            .map(|t| t.rack.clone())
            .unwrap_or_default();
        match self.navigation.turn(prev).and_then(|t| t.board_move()) {
            Some(Move::Valid(round)) => rack.leftover(round),
            _ => rack,
        }
    }

    /// Set the master move and rack of the turn being built, and give the
    /// rack to every player.
    fn deal_rack(&mut self) -> Result<Option<EndReason>, GameError> {
        self.current_player = REFERENCE_PLAYER;
        let turn = self.navigation.current_index();
        let leftover = self.leftover_rack(turn);

        let (rack, master) = if let Some(reference) = &self.reference {
            match reference.turn(turn) {
                Some(t) => (t.rack.clone(), t.master.clone()),
                None => return Ok(Some(EndReason::ReferenceExhausted)),
            }
        } else if !self.config.fills_racks() {
            (leftover, Move::None)
        } else {
            match self
                .drawer
                .draw_rack(turn, &self.state.board, &leftover, true)
            {
                Ok(rack) => (rack, Move::None),
                Err(end) => return Ok(Some(EndReason::Rack(end))),
            }
        };

        if self.state.master_move != master {
            self.set_master_move(master)?;
        }
        debug!(turn, rack = %rack, "Dealing rack");
        self.give_rack(rack)?;
        Ok(None)
    }

    /// Give `rack` to every player, replacing racks already given this
    /// turn.
    fn give_rack(&mut self, rack: PlayedRack) -> Result<(), GameError> {
        let players: Vec<PlayerId> = self.state.players.player_ids().collect();
        for player in players {
            let kind = CommandKind::RackAssignment {
                player,
                rack: rack.clone(),
            };
            let existing = self
                .navigation
                .current_turn()
                .find_rack_assignment(player)
                .map(Command::id);
            match existing {
                Some(old) => self.navigation.replace_command(&mut self.state, old, kind)?,
                None => self.navigation.add_and_execute(&mut self.state, kind)?,
            };
        }
        Ok(())
    }

    /// Reject a valid move whose new letters land on taken or off-board
    /// squares.
    fn ensure_placeable(&self, mv: &Move) -> Result<(), GameError> {
        match mv {
            Move::Valid(round) if !self.state.board.can_place(round) => {
                Err(GameError::CannotPlace(mv.clone()))
            }
            _ => Ok(()),
        }
    }

    fn set_master_move(&mut self, mv: Move) -> Result<(), GameError> {
        if !(mv.is_valid() || mv.is_null()) {
            return Err(GameError::Inconsistent(format!(
                "master move must be a valid word, got {mv}"
            )));
        }
        debug!(master = %mv, "Setting master move");
        self.navigation
            .add_and_execute(&mut self.state, CommandKind::MasterMoveSet { mv })?;
        Ok(())
    }

    fn finish(&mut self, reason: EndReason) -> Result<TurnStatus, GameError> {
        info!(%reason, "End of the game");
        if !self.state.master_move.is_null() {
            self.set_master_move(Move::None)?;
        }
        self.ended = Some(reason);
        Ok(TurnStatus::Finished(reason))
    }

    // === Time travel ===

    /// Show the previous turn. Returns false on the first turn.
    pub fn prev_turn(&mut self) -> bool {
        self.navigation.prev_turn(&mut self.state)
    }

    /// Show the next turn. Returns false on the last turn.
    pub fn next_turn(&mut self) -> bool {
        self.navigation.next_turn(&mut self.state)
    }

    pub fn first_turn(&mut self) {
        self.navigation.first_turn(&mut self.state);
    }

    pub fn last_turn(&mut self) {
        self.navigation.last_turn(&mut self.state);
    }

    /// Drop everything after the start of the turn under the cursor and
    /// play again from there.
    ///
    /// Racks and arbiter-entered moves of that turn are kept, and the log
    /// is rebuilt in its original order: the master move reset opening the
    /// turn goes back ahead of the racks.
    #[instrument(skip(self))]
    pub fn replay_turn(&mut self) -> Result<TurnStatus, GameError> {
        if self.state.players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        self.navigation.rewind_turn(&mut self.state);
        self.navigation.clear_future(&mut self.state);
        self.ended = None;

        let turn = self.navigation.current_index();
        info!(turn, "Replaying from turn");
        let dealt = self
            .navigation
            .current_turn()
            .find_rack_assignment(REFERENCE_PLAYER)
            .is_some();
        if dealt {
            let master = self
                .reference
                .as_ref()
                .and_then(|r| r.turn(turn))
                .map_or(Move::None, |t| t.master.clone());
            if self.state.master_move != master {
                self.navigation
                    .prepend_command(&mut self.state, CommandKind::MasterMoveSet { mv: master })?;
            }
            self.current_player = REFERENCE_PLAYER;
        } else if let Some(reason) = self.deal_rack()? {
            return self.finish(reason);
        }
        self.advance()
    }

    // === Persistence support ===

    /// Append a saved command to the turn being built.
    pub(crate) fn replay_command(&mut self, kind: CommandKind) -> Result<CommandId, GameError> {
        self.navigation.add_and_execute(&mut self.state, kind)
    }

    pub(crate) fn open_turn(&mut self) {
        self.navigation.new_turn();
    }

    /// Restore the end state and current player of a loaded game.
    pub(crate) fn restore(&mut self, ended: Option<EndReason>) -> TurnStatus {
        self.ended = ended;
        self.current_player = REFERENCE_PLAYER;
        self.pending_turn_status()
            .unwrap_or(TurnStatus::AwaitingMove(self.current_player))
    }
}
