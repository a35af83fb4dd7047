//! Match setup
//!
//! Each kind enters from its own corner of the surface:
//! - rocks drop from top center
//! - papers rise from the bottom left, drifting right
//! - scissors rise from the bottom right, drifting left

use std::ops::Range;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::bounds::{BoundingBox, GlyphMetrics, Surface};
use super::kind::Kind;
use super::state::{Match, Population, Token};
use crate::settings::Settings;

/// Where a kind starts and how fast it may leave
struct StartRegion {
    anchor: Vec2,
    vx: Range<f32>,
    vy: Range<f32>,
}

fn start_region(kind: Kind, bbox: &BoundingBox, surface: &Surface) -> StartRegion {
    match kind {
        Kind::Rock => StartRegion {
            anchor: Vec2::new(surface.width / 2.0, bbox.ascent),
            vx: -3.0..3.0,
            vy: 2.0..4.0,
        },
        Kind::Paper => StartRegion {
            anchor: Vec2::new(-bbox.left, surface.height - bbox.descent),
            vx: 2.0..4.0,
            vy: -2.0..-1.0,
        },
        Kind::Scissor => StartRegion {
            anchor: Vec2::new(surface.width - bbox.width, surface.height - bbox.descent),
            vx: -4.0..0.0,
            vy: -2.0..0.0,
        },
    }
}

fn spawn_population(
    kind: Kind,
    count: usize,
    bbox: BoundingBox,
    surface: &Surface,
    rng: &mut Pcg32,
) -> Population {
    let region = start_region(kind, &bbox, surface);
    let tokens = (0..count)
        .map(|_| {
            let vel = Vec2::new(
                rng.random_range(region.vx.clone()),
                rng.random_range(region.vy.clone()),
            );
            Token::new(region.anchor, vel)
        })
        .collect();
    Population::new(kind, bbox, tokens)
}

impl Match {
    /// Start a match with `settings.count` tokens of each kind.
    ///
    /// A zero count or an unusable surface gives an empty match, already
    /// over with no winner.
    pub fn new(settings: &Settings, metrics: &impl GlyphMetrics, seed: u64) -> Self {
        let surface = settings.surface();
        let mut rng = Pcg32::seed_from_u64(seed);

        let count = if surface.is_degenerate() {
            log::warn!(
                "Surface {}x{} has no area; starting an empty match",
                surface.width,
                surface.height
            );
            0
        } else {
            settings.count
        };

        let populations = Kind::ALL
            .map(|kind| spawn_population(kind, count, metrics.measure(kind), &surface, &mut rng));

        log::info!(
            "Match started: {} per kind on {}x{} (seed {})",
            count,
            surface.width,
            surface.height,
            seed
        );

        Self::with_populations(surface, settings.motion, seed, rng, populations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{FixedMetrics, MatchStatus};

    fn settings(count: usize) -> Settings {
        Settings {
            count,
            ..Default::default()
        }
    }

    #[test]
    fn test_spawn_counts_and_capacity() {
        let state = Match::new(&settings(6), &FixedMetrics::default(), 1);
        for kind in Kind::ALL {
            assert_eq!(state.population(kind).capacity(), 6);
            assert_eq!(state.population(kind).live_count(), 6);
        }
        assert_eq!(state.status, MatchStatus::Running);
    }

    #[test]
    fn test_start_regions_and_velocity_ranges() {
        let metrics = FixedMetrics::default();
        let state = Match::new(&settings(20), &metrics, 99);
        let bbox = metrics.measure(Kind::Rock);

        for t in state.population(Kind::Rock).tokens() {
            assert_eq!(t.pos, Vec2::new(320.0, bbox.ascent));
            assert!((-3.0..3.0).contains(&t.vel.x));
            assert!((2.0..4.0).contains(&t.vel.y));
        }
        for t in state.population(Kind::Paper).tokens() {
            assert_eq!(t.pos, Vec2::new(-bbox.left, 480.0 - bbox.descent));
            assert!((2.0..4.0).contains(&t.vel.x));
            assert!((-2.0..-1.0).contains(&t.vel.y));
        }
        for t in state.population(Kind::Scissor).tokens() {
            assert_eq!(t.pos, Vec2::new(640.0 - bbox.width, 480.0 - bbox.descent));
            assert!((-4.0..0.0).contains(&t.vel.x));
            assert!((-2.0..0.0).contains(&t.vel.y));
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = Match::new(&settings(5), &FixedMetrics::default(), 1234);
        let b = Match::new(&settings(5), &FixedMetrics::default(), 1234);
        for kind in Kind::ALL {
            assert_eq!(a.population(kind).tokens(), b.population(kind).tokens());
        }
    }

    #[test]
    fn test_zero_count_is_over_without_winner() {
        let state = Match::new(&settings(0), &FixedMetrics::default(), 1);
        assert_eq!(state.status, MatchStatus::Over { winner: None });
    }

    #[test]
    fn test_degenerate_surface_is_empty_match() {
        let settings = Settings {
            width: 0.0,
            height: -10.0,
            ..Default::default()
        };
        let state = Match::new(&settings, &FixedMetrics::default(), 1);
        assert_eq!(state.live_counts(), [0, 0, 0]);
        assert!(state.is_over());
        assert_eq!(state.status.winner(), None);
    }
}
