//! Outcome tally across many matches
//!
//! Hosts that replay matches with different seeds record each outcome here
//! to see which kind wins how often and whether matches finish.

use serde::{Deserialize, Serialize};

use crate::sim::{Kind, MatchOutcome};

/// Win/draw/abort counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    /// Wins indexed by `Kind::index`
    pub wins: [u32; 3],
    /// Finished with no survivors
    pub draws: u32,
    /// Hit the tick limit
    pub aborted: u32,
    /// Ticks across finished matches
    pub total_ticks: u64,
    /// Longest finished match
    pub longest: u64,
}

impl Standings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one match outcome
    pub fn record(&mut self, outcome: &MatchOutcome) {
        if outcome.aborted {
            self.aborted += 1;
            return;
        }

        match outcome.winner() {
            Some(kind) => self.wins[kind.index()] += 1,
            None => self.draws += 1,
        }
        self.total_ticks += outcome.ticks;
        self.longest = self.longest.max(outcome.ticks);
    }

    pub fn wins_for(&self, kind: Kind) -> u32 {
        self.wins[kind.index()]
    }

    /// Matches that reached a result
    pub fn finished(&self) -> u32 {
        self.wins.iter().sum::<u32>() + self.draws
    }

    /// Every recorded match, aborted ones included
    pub fn matches(&self) -> u32 {
        self.finished() + self.aborted
    }

    /// Kind with the most wins; `None` when nobody has won or the top is tied
    pub fn leader(&self) -> Option<Kind> {
        let best = *self.wins.iter().max()?;
        if best == 0 {
            return None;
        }
        let mut top = Kind::ALL.into_iter().filter(|k| self.wins_for(*k) == best);
        let leader = top.next();
        if top.next().is_some() { None } else { leader }
    }

    /// Mean length of finished matches
    pub fn average_ticks(&self) -> Option<f64> {
        match self.finished() {
            0 => None,
            n => Some(self.total_ticks as f64 / f64::from(n)),
        }
    }
}

impl std::fmt::Display for Standings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for kind in Kind::ALL {
            writeln!(f, "{:<8} {:>5} {}", kind.as_str(), self.wins_for(kind), kind.glyph())?;
        }
        writeln!(f, "{:<8} {:>5}", "Draws", self.draws)?;
        writeln!(f, "{:<8} {:>5}", "Aborted", self.aborted)?;
        match self.average_ticks() {
            Some(avg) => write!(f, "Average {avg:.0} ticks, longest {}", self.longest),
            None => write!(f, "No finished matches"),
        }
    }
}
