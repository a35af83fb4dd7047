//! Host loop: tick until the match is decided or the tick limit runs out

use serde::{Deserialize, Serialize};

use super::bounds::GlyphMetrics;
use super::kind::Kind;
use super::state::{Match, MatchStatus};
use super::tick::{TickReport, tick};
use crate::settings::Settings;

/// How a played-out match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub seed: u64,
    /// Final status; still `Running` when aborted
    pub status: MatchStatus,
    /// Ticks simulated
    pub ticks: u64,
    /// Tokens eliminated over the whole match
    pub eliminations: usize,
    /// Stopped by the tick limit before a winner emerged
    pub aborted: bool,
}

impl MatchOutcome {
    pub fn winner(&self) -> Option<Kind> {
        self.status.winner()
    }

    /// Finished with nobody left standing
    pub fn is_draw(&self) -> bool {
        self.status == MatchStatus::Over { winner: None }
    }
}

impl Match {
    /// Tick until over, or until `max_ticks` more ticks have run
    pub fn play_out(&mut self, max_ticks: u64) -> MatchOutcome {
        self.play_out_with(max_ticks, |_| {})
    }

    /// `play_out`, handing every tick's report to `on_tick` (redraw, trace)
    pub fn play_out_with(
        &mut self,
        max_ticks: u64,
        mut on_tick: impl FnMut(&TickReport),
    ) -> MatchOutcome {
        let start = self.time_ticks;
        let mut eliminations = 0;

        while !self.is_over() && self.time_ticks - start < max_ticks {
            let report = tick(self);
            eliminations += report.eliminations.len();
            on_tick(&report);
        }

        let aborted = !self.is_over();
        if aborted {
            let [rocks, papers, scissors] = self.live_counts();
            log::warn!(
                "Match (seed {}) abandoned after {} ticks: {} rocks, {} papers, {} scissors left",
                self.seed,
                self.time_ticks,
                rocks,
                papers,
                scissors
            );
        }

        MatchOutcome {
            seed: self.seed,
            status: self.status,
            ticks: self.time_ticks,
            eliminations,
            aborted,
        }
    }
}

/// Set up and play a full match
pub fn play_match(settings: &Settings, metrics: &impl GlyphMetrics, seed: u64) -> MatchOutcome {
    Match::new(settings, metrics, seed).play_out(settings.max_ticks)
}
