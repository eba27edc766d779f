//! Game session: the surface a front end talks to.
//!
//! [`Session`] owns a [`Duplicate`] game and adds what a front end needs
//! around it: the last [`TurnStatus`], checker result codes, score sheets
//! and saving/loading.
//!
//! ## Example
//!
//! ```ignore
//! let config = DuplicateConfig::default().with_rack_size(7);
//! let mut session = Session::with_random_drawer(config, rules, TileSet::english(), 42);
//! session.add_human("Ann", 1)?;
//! session.add_computer("Bot", 100)?;
//! session.start()?;
//!
//! match session.submit("H8", "ZEBRA")? {
//!     0 => println!("recorded"),
//!     code => println!("rejected: {}", PlayError::from_code(code).unwrap()),
//! }
//!
//! let json = session.save().to_json()?;
//! ```

mod save;

pub use save::{SaveError, SavedGame, SavedPlayer, FORMAT_VERSION};

use tracing::{info, instrument};

use crate::command::CommandKind;
use crate::core::{
    DuplicateConfig, GameError, Move, PlayerId, PlayerKind, ScoreLine, TileSet,
};
use crate::duplicate::{Duplicate, ReferenceGame, TurnStatus};
use crate::rules::{RackDrawer, RandomDrawer, WordRules};

/// A duplicate game together with its front-end state.
pub struct Session<R, D = RandomDrawer> {
    game: Duplicate<R, D>,
    status: Option<TurnStatus>,
}

impl<R: WordRules> Session<R, RandomDrawer> {
    /// A session whose racks follow the rack settings of `config`.
    pub fn with_random_drawer(
        config: DuplicateConfig,
        rules: R,
        tiles: TileSet,
        seed: u64,
    ) -> Self {
        Self {
            game: Duplicate::with_random_drawer(config, rules, tiles, seed),
            status: None,
        }
    }

    /// Load `saved` with a random drawer built from its own configuration.
    pub fn load_with_random_drawer(
        saved: SavedGame,
        rules: R,
        tiles: TileSet,
        seed: u64,
    ) -> Result<Self, SaveError> {
        let drawer = RandomDrawer::from_config(&saved.config, tiles, seed);
        Self::load(saved, rules, drawer)
    }
}

impl<R: WordRules, D: RackDrawer> Session<R, D> {
    pub fn new(config: DuplicateConfig, rules: R, drawer: D) -> Self {
        Self {
            game: Duplicate::new(config, rules, drawer),
            status: None,
        }
    }

    /// Replay the racks and master moves of `reference`.
    #[must_use]
    pub fn with_reference(mut self, reference: ReferenceGame) -> Self {
        self.game = self.game.with_reference(reference);
        self
    }

    #[must_use]
    pub fn game(&self) -> &Duplicate<R, D> {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Duplicate<R, D> {
        &mut self.game
    }

    /// Status returned by the last turn operation; `None` before start.
    #[must_use]
    pub fn status(&self) -> Option<TurnStatus> {
        self.status
    }

    fn track(&mut self, status: TurnStatus) -> TurnStatus {
        self.status = Some(status);
        status
    }

    // === Registration ===

    pub fn add_human(
        &mut self,
        name: impl Into<String>,
        table: u32,
    ) -> Result<PlayerId, GameError> {
        self.game.add_player_at_table(name, PlayerKind::Human, table)
    }

    pub fn add_computer(
        &mut self,
        name: impl Into<String>,
        level: u8,
    ) -> Result<PlayerId, GameError> {
        self.game
            .add_player_at_table(name, PlayerKind::Computer { level }, 0)
    }

    // === Play ===

    pub fn start(&mut self) -> Result<TurnStatus, GameError> {
        let status = self.game.start()?;
        Ok(self.track(status))
    }

    /// Submit a word for the current player.
    ///
    /// Returns the checker code: 0 when the move was recorded, the
    /// [`PlayError`](crate::core::PlayError) code when it was rejected.
    /// Other failures are errors.
    #[instrument(skip(self))]
    pub fn submit(&mut self, coord: &str, word: &str) -> Result<u8, GameError> {
        match self.game.play(coord, word) {
            Ok(status) => {
                self.track(status);
                Ok(0)
            }
            Err(GameError::Rejected(err)) => Ok(err.code()),
            Err(err) => Err(err),
        }
    }

    pub fn play(&mut self, coord: &str, word: &str) -> Result<TurnStatus, GameError> {
        let status = self.game.play(coord, word)?;
        Ok(self.track(status))
    }

    pub fn end_turn(&mut self) -> Result<TurnStatus, GameError> {
        let status = self.game.end_turn()?;
        Ok(self.track(status))
    }

    pub fn set_player(&mut self, player: PlayerId) -> Result<(), GameError> {
        self.game.set_player(player)
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.game.current_player()
    }

    #[must_use]
    pub fn has_played(&self, player: PlayerId) -> bool {
        self.game.has_played(player)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.game.is_finished()
    }

    #[must_use]
    pub fn is_arbitration_game(&self) -> bool {
        self.game.is_arbitration_game()
    }

    /// Score sheet, best total first.
    #[must_use]
    pub fn scores(&self) -> Vec<ScoreLine> {
        let state = self.game.state();
        state
            .rankings()
            .into_iter()
            .filter_map(|(id, _)| state.player(id).map(ScoreLine::of))
            .collect()
    }

    // === Time travel ===

    pub fn prev_turn(&mut self) -> bool {
        self.game.prev_turn()
    }

    pub fn next_turn(&mut self) -> bool {
        self.game.next_turn()
    }

    pub fn first_turn(&mut self) {
        self.game.first_turn();
    }

    pub fn last_turn(&mut self) {
        self.game.last_turn();
    }

    /// Play again from the turn under the cursor.
    pub fn replay_turn(&mut self) -> Result<TurnStatus, GameError> {
        let status = self.game.replay_turn()?;
        Ok(self.track(status))
    }

    // === Arbitration ===

    pub fn assign_word(
        &mut self,
        player: PlayerId,
        coord: &str,
        word: &str,
    ) -> Result<(), GameError> {
        let mv = match self.game.check_word(coord, word) {
            Ok(mv) => mv,
            Err(_) => Move::invalid(word, coord),
        };
        self.game.assign_move(player, mv)?;
        Ok(())
    }

    pub fn set_rack(&mut self, rack: &str) -> Result<(), GameError> {
        self.game.set_rack_manual(rack)
    }

    pub fn add_warning(&mut self, player: PlayerId) -> Result<(), GameError> {
        self.game.add_warning(player)?;
        Ok(())
    }

    // === Persistence ===

    /// Snapshot the whole command log.
    #[must_use]
    pub fn save(&self) -> SavedGame {
        let players = self
            .game
            .players()
            .map(|p| SavedPlayer {
                id: p.id(),
                name: p.name().to_string(),
                kind: p.kind(),
                table: p.table(),
            })
            .collect();
        let turns = self
            .game
            .navigation()
            .turns()
            .iter()
            .map(|turn| turn.iter().map(|c| c.kind().clone()).collect())
            .collect();
        SavedGame {
            version: FORMAT_VERSION,
            config: self.game.config().clone(),
            players,
            turns,
            reference: self.game.reference().cloned(),
            finished: self.game.end_reason(),
        }
    }

    /// Rebuild a session by replaying a saved log.
    ///
    /// The loaded game sits on its last turn.
    #[instrument(skip_all, fields(turns = saved.turns.len()))]
    pub fn load(saved: SavedGame, rules: R, drawer: D) -> Result<Self, SaveError> {
        saved.validate()?;

        let mut game = Duplicate::new(saved.config, rules, drawer);
        if let Some(reference) = saved.reference {
            game = game.with_reference(reference);
        }
        for player in saved.players {
            game.add_player_at_table(player.name, player.kind, player.table)?;
        }

        for (index, turn) in saved.turns.into_iter().enumerate() {
            if index > 0 {
                game.open_turn();
            }
            for kind in turn {
                if let Some(player) = kind.player() {
                    if game.player(player).is_none() {
                        return Err(SaveError::UnknownPlayer(player));
                    }
                }
                if let CommandKind::BoardMove {
                    mv: Move::Valid(round),
                    ..
                } = &kind
                {
                    if !game.board().can_place(round) {
                        return Err(SaveError::Corrupt(format!(
                            "{} at {} overlaps the board in turn {index}",
                            round.word, round.coord
                        )));
                    }
                }
                game.replay_command(kind)?;
            }
        }

        let status = game.restore(saved.finished);
        info!(players = game.player_count(), "Game loaded");
        Ok(Self {
            game,
            status: Some(status),
        })
    }
}
