//! Match state and core simulation types
//!
//! All state a match needs to continue deterministically lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bounds::{BoundingBox, GlyphMetrics, Surface};
use super::kind::Kind;
use crate::settings::MotionSettings;

/// One glyph instance on the surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Anchor: left edge and text baseline
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    /// Eliminated tokens stay in their slot as inert tombstones
    pub alive: bool,
}

impl Token {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            alive: true,
        }
    }

    /// Token sitting still at `pos`
    pub fn at(x: f32, y: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::ZERO)
    }

    #[inline]
    pub fn eliminate(&mut self) {
        self.alive = false;
    }
}

/// All tokens of one kind. Capacity is fixed when the match starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Population {
    pub kind: Kind,
    /// Measured once at setup, shared by every token of this kind
    pub bbox: BoundingBox,
    tokens: Vec<Token>,
}

impl Population {
    pub fn new(kind: Kind, bbox: BoundingBox, tokens: Vec<Token>) -> Self {
        Self { kind, bbox, tokens }
    }

    /// Every slot, tombstones included
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Mutable access to slots; the slot count cannot change
    pub fn tokens_mut(&mut self) -> &mut [Token] {
        &mut self.tokens
    }

    pub fn live(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| t.alive)
    }

    pub fn live_count(&self) -> usize {
        self.live().count()
    }

    pub fn capacity(&self) -> usize {
        self.tokens.len()
    }
}

/// Whether the match is still being decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Live tokens remain in more than one population
    Running,
    /// At most one population has live tokens. `None` is a draw.
    Over { winner: Option<Kind> },
}

impl MatchStatus {
    /// Status implied by per-kind live counts (indexed by `Kind::index`)
    pub fn from_live_counts(counts: [usize; 3]) -> Self {
        let mut survivors = Kind::ALL.into_iter().filter(|k| counts[k.index()] > 0);
        let winner = survivors.next();
        if survivors.next().is_some() {
            MatchStatus::Running
        } else {
            MatchStatus::Over { winner }
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self, MatchStatus::Over { .. })
    }

    /// Sole surviving kind, once the match is over
    pub fn winner(&self) -> Option<Kind> {
        match self {
            MatchStatus::Over { winner } => *winner,
            MatchStatus::Running => None,
        }
    }
}

/// A token removed by a collision rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Elimination {
    pub winner: Kind,
    /// Slot of the winning token in its population
    pub winner_index: usize,
    pub loser: Kind,
    /// Slot of the eliminated token in its population
    pub loser_index: usize,
    /// Where the loser was
    pub pos: Vec2,
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub surface: Surface,
    pub motion: MotionSettings,
    /// Indexed by `Kind::index`
    populations: [Population; 3],
    /// Simulation tick counter
    pub time_ticks: u64,
    pub status: MatchStatus,
}

impl Match {
    /// Build a match from explicit token lists, indexed by `Kind::index`.
    ///
    /// Hosts use this to stage scenarios; `Match::new` seeds the usual
    /// starting layout.
    pub fn from_tokens(
        surface: Surface,
        metrics: &impl GlyphMetrics,
        motion: MotionSettings,
        seed: u64,
        tokens: [Vec<Token>; 3],
    ) -> Self {
        let [rocks, papers, scissors] = tokens;
        let populations = [
            Population::new(Kind::Rock, metrics.measure(Kind::Rock), rocks),
            Population::new(Kind::Paper, metrics.measure(Kind::Paper), papers),
            Population::new(Kind::Scissor, metrics.measure(Kind::Scissor), scissors),
        ];
        Self::with_populations(surface, motion, seed, Pcg32::seed_from_u64(seed), populations)
    }

    pub(crate) fn with_populations(
        surface: Surface,
        motion: MotionSettings,
        seed: u64,
        rng: Pcg32,
        populations: [Population; 3],
    ) -> Self {
        let mut state = Self {
            seed,
            rng,
            surface,
            motion,
            populations,
            time_ticks: 0,
            status: MatchStatus::Running,
        };
        state.status = MatchStatus::from_live_counts(state.live_counts());
        state
    }

    pub fn population(&self, kind: Kind) -> &Population {
        &self.populations[kind.index()]
    }

    pub fn population_mut(&mut self, kind: Kind) -> &mut Population {
        &mut self.populations[kind.index()]
    }

    pub fn populations(&self) -> &[Population; 3] {
        &self.populations
    }

    /// Live tokens per kind, indexed by `Kind::index`
    pub fn live_counts(&self) -> [usize; 3] {
        Kind::ALL.map(|k| self.population(k).live_count())
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    /// Split borrow for the tick: all populations plus the RNG
    pub(crate) fn parts_mut(&mut self) -> (&mut [Population; 3], &mut Pcg32) {
        (&mut self.populations, &mut self.rng)
    }
}
