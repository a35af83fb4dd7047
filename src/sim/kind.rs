//! Entity kinds and the rules of the game
//!
//! Every token is tagged with a `Kind`. Who beats whom is pure data: an
//! ordered list of (winner, loser) pairs consumed by the collision step.

use serde::{Deserialize, Serialize};

/// The three kinds of glyph in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Rock,
    Paper,
    Scissor,
}

impl Kind {
    /// All kinds, in population order
    pub const ALL: [Kind; 3] = [Kind::Rock, Kind::Paper, Kind::Scissor];

    /// Glyph drawn for this kind
    pub fn glyph(&self) -> &'static str {
        match self {
            Kind::Rock => "\u{1F4A3}",
            Kind::Paper => "\u{1F4DC}",
            Kind::Scissor => "\u{2702}",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Rock => "Rock",
            Kind::Paper => "Paper",
            Kind::Scissor => "Scissor",
        }
    }

    /// Index into per-kind arrays
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Kind::Rock => 0,
            Kind::Paper => 1,
            Kind::Scissor => 2,
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One winner/loser pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub winner: Kind,
    pub loser: Kind,
}

/// Collision rules, applied in this order every tick.
///
/// Order decides simultaneous contact: a scissor broken by a rock under the
/// first rule is gone before the second rule lets scissors cut paper.
pub const RULES: [Rule; 3] = [
    Rule {
        winner: Kind::Rock,
        loser: Kind::Scissor,
    },
    Rule {
        winner: Kind::Scissor,
        loser: Kind::Paper,
    },
    Rule {
        winner: Kind::Paper,
        loser: Kind::Rock,
    },
];
