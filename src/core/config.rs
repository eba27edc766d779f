//! Game configuration.
//!
//! The turn resolver never reads ambient settings: everything it needs
//! (mode, bonus thresholds, arbitration toggles, rack legality) is carried
//! by a [`DuplicateConfig`] given at construction.
//!
//! ```
//! use rust_duplicate::core::{DuplicateConfig, GameMode, SoloRule};
//!
//! let config = DuplicateConfig::arbitration()
//!     .with_arbitration_solo(SoloRule::new(4, 5))
//!     .with_warnings(2, 10);
//!
//! assert_eq!(config.mode, GameMode::Arbitration);
//! assert_eq!(config.active_solo_rule(), Some(SoloRule::new(4, 5)));
//! ```

use serde::{Deserialize, Serialize};

/// How the game is run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Regular duplicate game: turns resolve as soon as every human played.
    #[default]
    Duplicate,
    /// Officiated game: moves are entered by an arbiter, turns resolve on
    /// request and past turns may be edited.
    Arbitration,
}

/// When and how much solo bonus is awarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoloRule {
    /// Minimum number of active players for a solo to count.
    pub min_players: u32,
    /// Bonus points.
    pub value: i32,
}

impl SoloRule {
    #[must_use]
    pub const fn new(min_players: u32, value: i32) -> Self {
        Self { min_players, value }
    }
}

impl Default for SoloRule {
    fn default() -> Self {
        Self::new(16, 10)
    }
}

/// Configuration of a duplicate game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateConfig {
    pub mode: GameMode,

    /// Letters per rack.
    pub rack_size: usize,

    /// Refuse invalid submissions instead of recording them as invalid moves.
    pub reject_invalid: bool,

    /// Solo rule of regular duplicate games.
    pub solo: SoloRule,

    /// Compute solos when an arbitration turn is resolved.
    pub arbitration_solo_auto: bool,

    /// Solo rule of arbitration games.
    pub arbitration_solo: SoloRule,

    /// Draw racks automatically in arbitration games.
    pub arbitration_fill_rack: bool,

    /// Warnings tolerated before each further warning costs a penalty.
    pub warnings_limit: u32,

    /// Points of the automatic warning penalty.
    pub warning_penalty: i32,

    /// Minimum vowels in a drawn rack.
    pub min_vowels: usize,

    /// Minimum consonants in a drawn rack.
    pub min_consonants: usize,
}

impl Default for DuplicateConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Duplicate,
            rack_size: 7,
            reject_invalid: false,
            solo: SoloRule::default(),
            arbitration_solo_auto: true,
            arbitration_solo: SoloRule::default(),
            arbitration_fill_rack: true,
            warnings_limit: 3,
            warning_penalty: 5,
            min_vowels: 1,
            min_consonants: 1,
        }
    }
}

impl DuplicateConfig {
    /// Default configuration of a regular duplicate game.
    #[must_use]
    pub fn duplicate() -> Self {
        Self::default()
    }

    /// Default configuration of an arbitration game.
    #[must_use]
    pub fn arbitration() -> Self {
        Self {
            mode: GameMode::Arbitration,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_arbitration(&self) -> bool {
        self.mode == GameMode::Arbitration
    }

    /// Set the rack size.
    #[must_use]
    pub fn with_rack_size(mut self, rack_size: usize) -> Self {
        assert!(rack_size > 0, "Rack size must be positive");
        self.rack_size = rack_size;
        self
    }

    /// Refuse invalid submissions.
    #[must_use]
    pub fn rejecting_invalid(mut self) -> Self {
        self.reject_invalid = true;
        self
    }

    #[must_use]
    pub fn with_solo(mut self, solo: SoloRule) -> Self {
        self.solo = solo;
        self
    }

    #[must_use]
    pub fn with_arbitration_solo(mut self, solo: SoloRule) -> Self {
        self.arbitration_solo = solo;
        self
    }

    /// Toggle automatic solo computation in arbitration games.
    #[must_use]
    pub fn with_arbitration_solo_auto(mut self, auto: bool) -> Self {
        self.arbitration_solo_auto = auto;
        self
    }

    /// Toggle automatic rack draws in arbitration games.
    #[must_use]
    pub fn with_arbitration_fill_rack(mut self, fill: bool) -> Self {
        self.arbitration_fill_rack = fill;
        self
    }

    /// Set the warnings limit and the penalty for exceeding it.
    #[must_use]
    pub fn with_warnings(mut self, limit: u32, penalty: i32) -> Self {
        self.warnings_limit = limit;
        self.warning_penalty = penalty;
        self
    }

    /// Set the vowel and consonant requirements of drawn racks.
    #[must_use]
    pub fn with_rack_checks(mut self, min_vowels: usize, min_consonants: usize) -> Self {
        self.min_vowels = min_vowels;
        self.min_consonants = min_consonants;
        self
    }

    /// Solo rule applied when a turn resolves, if any.
    #[must_use]
    pub fn active_solo_rule(&self) -> Option<SoloRule> {
        match self.mode {
            GameMode::Duplicate => Some(self.solo),
            GameMode::Arbitration => self.arbitration_solo_auto.then_some(self.arbitration_solo),
        }
    }

    /// Whether racks are drawn automatically at the start of a turn.
    #[must_use]
    pub fn fills_racks(&self) -> bool {
        match self.mode {
            GameMode::Duplicate => true,
            GameMode::Arbitration => self.arbitration_fill_rack,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DuplicateConfig::default();

        assert_eq!(config.mode, GameMode::Duplicate);
        assert_eq!(config.rack_size, 7);
        assert!(!config.reject_invalid);
        assert_eq!(config.solo, SoloRule::new(16, 10));
        assert_eq!(config.warnings_limit, 3);
        assert_eq!(config.warning_penalty, 5);
        assert!(config.fills_racks());
    }

    #[test]
    fn test_active_solo_rule() {
        let duplicate = DuplicateConfig::duplicate().with_solo(SoloRule::new(2, 7));
        assert_eq!(duplicate.active_solo_rule(), Some(SoloRule::new(2, 7)));

        let manual = DuplicateConfig::arbitration().with_arbitration_solo_auto(false);
        assert_eq!(manual.active_solo_rule(), None);
    }

    #[test]
    fn test_arbitration_fill_rack() {
        let config = DuplicateConfig::arbitration().with_arbitration_fill_rack(false);
        assert!(config.is_arbitration());
        assert!(!config.fills_racks());
    }

    #[test]
    #[should_panic(expected = "Rack size must be positive")]
    fn test_zero_rack_size() {
        let _ = DuplicateConfig::default().with_rack_size(0);
    }

    #[test]
    fn test_config_serialization() {
        let config = DuplicateConfig::arbitration().with_warnings(1, 20);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: DuplicateConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
