//! Racks as played during a turn.
//!
//! A [`PlayedRack`] separates the letters left over from the previous turn
//! ("old") from the letters drawn for this turn ("new"). The text form is
//! `OLD+NEW`, e.g. `EIS+ATRN`; a rack without new letters prints as `OLD`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::str::FromStr;

use super::error::PlayError;
use super::moves::Round;

/// How the letters of a rack were obtained.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RackOrigin {
    /// Typed in (arbitration, loaded games, reference games).
    #[default]
    Manual,
    /// Drawn at random from the bag.
    Random,
}

/// Letters available to a player for one turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayedRack {
    old: SmallVec<[char; 8]>,
    new: SmallVec<[char; 8]>,
    origin: RackOrigin,
}

impl PlayedRack {
    /// A rack without letters.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            old: SmallVec::new_const(),
            new: SmallVec::new_const(),
            origin: RackOrigin::Manual,
        }
    }

    /// A rack made of leftover letters plus freshly drawn ones.
    pub fn drawn(
        old: impl IntoIterator<Item = char>,
        new: impl IntoIterator<Item = char>,
    ) -> Self {
        Self {
            old: old.into_iter().collect(),
            new: new.into_iter().collect(),
            origin: RackOrigin::Random,
        }
    }

    #[must_use]
    pub fn old(&self) -> &[char] {
        &self.old
    }

    #[must_use]
    pub fn new_letters(&self) -> &[char] {
        &self.new
    }

    #[must_use]
    pub fn origin(&self) -> RackOrigin {
        self.origin
    }

    /// All letters, old ones first.
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.old.iter().chain(self.new.iter()).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.old.len() + self.new.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.old.is_empty() && self.new.is_empty()
    }

    /// Same letters, regardless of the old/new split and origin.
    #[must_use]
    pub fn same_letters(&self, other: &PlayedRack) -> bool {
        let mut mine: SmallVec<[char; 16]> = self.letters().collect();
        let mut theirs: SmallVec<[char; 16]> = other.letters().collect();
        mine.sort_unstable();
        theirs.sort_unstable();
        mine == theirs
    }

    /// Letters remaining once `round` has been played from this rack.
    ///
    /// Every remaining letter becomes an "old" letter.
    #[must_use]
    pub fn leftover(&self, round: &Round) -> PlayedRack {
        let mut remaining: SmallVec<[char; 8]> = self.letters().collect();
        for tile in round.rack_tiles() {
            if let Some(pos) = remaining.iter().position(|&c| c == tile) {
                remaining.remove(pos);
            }
        }
        Self {
            old: remaining,
            new: SmallVec::new(),
            origin: self.origin,
        }
    }
}

impl FromStr for PlayedRack {
    type Err = PlayError;

    /// Parse `OLD+NEW` (or just `OLD`) into a manual rack.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (old, new) = s.trim().split_once('+').unwrap_or((s.trim(), ""));
        let parse = |part: &str| -> Result<SmallVec<[char; 8]>, PlayError> {
            part.chars()
                .map(|c| match c {
                    '?' => Ok('?'),
                    c if c.is_ascii_alphabetic() => Ok(c.to_ascii_uppercase()),
                    _ => Err(PlayError::InvalidLetters),
                })
                .collect()
        };
        Ok(Self {
            old: parse(old)?,
            new: parse(new)?,
            origin: RackOrigin::Manual,
        })
    }
}

impl std::fmt::Display for PlayedRack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in &self.old {
            write!(f, "{c}")?;
        }
        if !self.new.is_empty() {
            write!(f, "+")?;
            for c in &self.new {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}
