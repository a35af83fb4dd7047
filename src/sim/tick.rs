//! Simulation tick
//!
//! One tick moves every live token, applies the collision rules in order,
//! then recomputes the match status.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::bounds::{Surface, bounce, overlaps};
use super::kind::{RULES, Rule};
use super::state::{Elimination, Match, MatchStatus, Population};
use crate::settings::MotionSettings;

/// What happened during one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Tick number after this step (first tick is 1)
    pub tick: u64,
    /// Eliminations in rule order
    pub eliminations: Vec<Elimination>,
    /// Live tokens per kind after collisions, indexed by `Kind::index`
    pub live_counts: [usize; 3],
    pub status: MatchStatus,
}

/// Advance the match by one step.
///
/// Wall bounces only reverse a token still heading outward, so a glyph that
/// overshoots an edge turns back once rather than flipping every tick until
/// it re-enters. A match that is already over is left untouched.
pub fn tick(state: &mut Match) -> TickReport {
    if state.is_over() {
        return TickReport {
            tick: state.time_ticks,
            eliminations: Vec::new(),
            live_counts: state.live_counts(),
            status: state.status,
        };
    }

    state.time_ticks += 1;
    let surface = state.surface;
    let motion = state.motion;

    let (populations, rng) = state.parts_mut();

    for population in populations.iter_mut() {
        move_population(population, &surface, &motion, rng);
    }

    let mut eliminations = Vec::new();
    for rule in &RULES {
        apply_rule(populations, rule, &mut eliminations);
    }

    for e in &eliminations {
        log::debug!(
            "tick {}: {} #{} eliminated {} #{} at ({:.1}, {:.1})",
            state.time_ticks,
            e.winner,
            e.winner_index,
            e.loser,
            e.loser_index,
            e.pos.x,
            e.pos.y
        );
    }

    let live_counts = state.live_counts();
    state.status = MatchStatus::from_live_counts(live_counts);

    if let MatchStatus::Over { winner } = state.status {
        match winner {
            Some(kind) => log::info!("{} wins after {} ticks", kind, state.time_ticks),
            None => log::info!("No survivors after {} ticks", state.time_ticks),
        }
    }

    TickReport {
        tick: state.time_ticks,
        eliminations,
        live_counts,
        status: state.status,
    }
}

/// Integrate, wander, then bounce every live token of one kind
fn move_population(
    population: &mut Population,
    surface: &Surface,
    motion: &MotionSettings,
    rng: &mut Pcg32,
) {
    let bbox = population.bbox;
    let wanders = motion.wanders();
    let chance = f64::from(motion.jitter_chance.min(1.0));

    for token in population.tokens_mut().iter_mut().filter(|t| t.alive) {
        token.pos += token.vel;

        if wanders && rng.random_bool(chance) {
            token.vel += Vec2::new(
                rng.random_range(-motion.jitter..motion.jitter),
                rng.random_range(-motion.jitter..motion.jitter),
            );
        }

        token.vel = bounce(token.pos, token.vel, &bbox, surface);
    }
}

/// Let every live winner eliminate every live loser it overlaps.
///
/// Losers are tombstoned immediately, so later rules this tick never see them.
fn apply_rule(populations: &mut [Population; 3], rule: &Rule, out: &mut Vec<Elimination>) {
    let winner_kind = rule.winner;
    let loser_kind = rule.loser;

    let winners: Vec<(usize, Vec2)> = populations[winner_kind.index()]
        .tokens()
        .iter()
        .enumerate()
        .filter(|(_, t)| t.alive)
        .map(|(i, t)| (i, t.pos))
        .collect();

    let losers = &mut populations[loser_kind.index()];
    let loser_box = losers.bbox;

    for (winner_index, winner_pos) in winners {
        for (loser_index, loser) in losers.tokens_mut().iter_mut().enumerate() {
            if !loser.alive {
                continue;
            }
            if overlaps(winner_pos, loser.pos, &loser_box) {
                loser.eliminate();
                out.push(Elimination {
                    winner: winner_kind,
                    winner_index,
                    loser: loser_kind,
                    loser_index,
                    pos: loser.pos,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{FixedMetrics, GlyphMetrics, Kind, Token};

    fn staged(tokens: [Vec<Token>; 3]) -> Match {
        Match::from_tokens(
            Surface::new(640.0, 480.0),
            &FixedMetrics::default(),
            MotionSettings::still(),
            42,
            tokens,
        )
    }

    #[test]
    fn test_rock_breaks_superposed_scissor() {
        let mut state = staged([
            vec![Token::at(50.0, 50.0)],
            vec![Token::at(400.0, 400.0)],
            vec![Token::at(50.0, 50.0)],
        ]);

        let report = tick(&mut state);

        assert_eq!(report.live_counts, [1, 1, 0]);
        assert_eq!(report.status, MatchStatus::Running);
        assert_eq!(report.eliminations.len(), 1);
        let e = report.eliminations[0];
        assert_eq!((e.winner, e.loser), (Kind::Rock, Kind::Scissor));
        assert!(state.population(Kind::Rock).tokens()[0].alive);
        assert!(!state.population(Kind::Scissor).tokens()[0].alive);
    }

    #[test]
    fn test_each_rule_eliminates_only_the_loser() {
        for rule in RULES {
            let mut tokens: [Vec<Token>; 3] = [vec![], vec![], vec![]];
            tokens[rule.winner.index()].push(Token::at(100.0, 100.0));
            tokens[rule.loser.index()].push(Token::at(95.0, 105.0));
            let mut state = staged(tokens);

            let report = tick(&mut state);

            assert!(state.population(rule.winner).tokens()[0].alive);
            assert!(!state.population(rule.loser).tokens()[0].alive);
            assert_eq!(
                report.status,
                MatchStatus::Over {
                    winner: Some(rule.winner)
                }
            );
        }
    }

    #[test]
    fn test_rule_order_saves_paper() {
        // Rock overlaps scissor, scissor overlaps paper. The rock rule runs
        // first, so the scissor is gone before it can cut the paper.
        let mut state = staged([
            vec![Token::at(100.0, 100.0)],
            vec![Token::at(95.0, 105.0)],
            vec![Token::at(100.0, 100.0)],
        ]);
        let paper_box = FixedMetrics::default().measure(Kind::Paper);
        let rock_box = FixedMetrics::default().measure(Kind::Rock);
        // Scissor would cut paper if it survived; paper never reaches the rock
        assert!(overlaps(Vec2::new(100.0, 100.0), Vec2::new(95.0, 105.0), &paper_box));
        assert!(!overlaps(Vec2::new(95.0, 105.0), Vec2::new(100.0, 100.0), &rock_box));

        let report = tick(&mut state);

        assert!(!state.population(Kind::Scissor).tokens()[0].alive);
        assert!(state.population(Kind::Paper).tokens()[0].alive);
        assert!(state.population(Kind::Rock).tokens()[0].alive);
        assert_eq!(report.status, MatchStatus::Running);
        assert!(
            report
                .eliminations
                .iter()
                .all(|e| e.loser != Kind::Paper)
        );
    }

    #[test]
    fn test_winner_takes_several_losers() {
        let mut state = staged([
            vec![Token::at(100.0, 100.0)],
            vec![Token::at(500.0, 400.0)],
            vec![
                Token::at(100.0, 100.0),
                Token::at(90.0, 110.0),
                Token::at(300.0, 300.0),
            ],
        ]);

        let report = tick(&mut state);

        assert_eq!(report.eliminations.len(), 2);
        assert_eq!(state.population(Kind::Scissor).live_count(), 1);
        assert_eq!(state.population(Kind::Scissor).capacity(), 3);
    }

    #[test]
    fn test_triple_superposition_resolves_by_rule_order() {
        // Rock breaks scissor, the dead scissor cuts nothing, paper covers rock.
        let mut state = staged([
            vec![Token::at(200.0, 200.0)],
            vec![Token::at(200.0, 200.0)],
            vec![Token::at(200.0, 200.0)],
        ]);

        let report = tick(&mut state);

        let pairs: Vec<_> = report
            .eliminations
            .iter()
            .map(|e| (e.winner, e.loser))
            .collect();
        assert_eq!(pairs, vec![(Kind::Rock, Kind::Scissor), (Kind::Paper, Kind::Rock)]);
        assert_eq!(
            report.status,
            MatchStatus::Over {
                winner: Some(Kind::Paper)
            }
        );
    }

    #[test]
    fn test_empty_match_is_a_draw() {
        let mut state = staged([vec![], vec![], vec![]]);
        assert_eq!(state.status, MatchStatus::Over { winner: None });

        let report = tick(&mut state);
        assert_eq!(report.status, MatchStatus::Over { winner: None });
        assert_eq!(report.tick, 0);
    }

    #[test]
    fn test_tick_after_over_is_noop() {
        let mut state = staged([vec![Token::new(Vec2::new(50.0, 50.0), Vec2::new(1.0, 1.0))], vec![], vec![]]);
        let before = state.population(Kind::Rock).tokens()[0];

        let report = tick(&mut state);

        assert!(report.eliminations.is_empty());
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.population(Kind::Rock).tokens()[0], before);
    }

    #[test]
    fn test_motion_integrates_velocity() {
        let mut state = staged([
            vec![Token::new(Vec2::new(100.0, 100.0), Vec2::new(2.0, -1.5))],
            vec![Token::at(500.0, 400.0)],
            vec![],
        ]);

        tick(&mut state);

        let rock = state.population(Kind::Rock).tokens()[0];
        assert_eq!(rock.pos, Vec2::new(102.0, 98.5));
        assert_eq!(rock.vel, Vec2::new(2.0, -1.5));
    }

    #[test]
    fn test_wall_reverses_velocity() {
        let mut state = staged([
            vec![Token::new(Vec2::new(610.0, 100.0), Vec2::new(3.0, 0.0))],
            vec![Token::at(300.0, 400.0)],
            vec![],
        ]);

        tick(&mut state);

        let rock = state.population(Kind::Rock).tokens()[0];
        assert_eq!(rock.pos.x, 613.0);
        assert_eq!(rock.vel.x, -3.0);
    }

    #[test]
    fn test_tombstones_do_not_move() {
        let mut state = staged([
            vec![Token::new(Vec2::new(100.0, 100.0), Vec2::new(1.0, 1.0))],
            vec![Token::at(500.0, 400.0)],
            vec![],
        ]);
        state.population_mut(Kind::Rock).tokens_mut()[0].eliminate();
        state.status = MatchStatus::Running;

        tick(&mut state);

        let rock = state.population(Kind::Rock).tokens()[0];
        assert_eq!(rock.pos, Vec2::new(100.0, 100.0));
        assert!(!rock.alive);
    }

    #[test]
    fn test_jitter_stays_within_bounds() {
        let settings = Settings {
            motion: MotionSettings {
                jitter_chance: 1.0,
                jitter: 0.25,
            },
            ..Default::default()
        };
        let mut state = Match::new(&settings, &FixedMetrics::default(), 5);
        let before: Vec<Vec2> = state
            .population(Kind::Paper)
            .tokens()
            .iter()
            .map(|t| t.vel)
            .collect();

        tick(&mut state);

        for (t, v0) in state.population(Kind::Paper).tokens().iter().zip(before) {
            // A bounce may flip the sign, so compare magnitudes per axis
            assert!((t.vel.x.abs() - v0.x.abs()).abs() <= 0.25 + 1e-5);
            assert!((t.vel.y.abs() - v0.y.abs()).abs() <= 0.25 + 1e-5);
        }
    }

    fn wandering(seed: u64, jitter_chance: f32) -> Match {
        Match::from_tokens(
            Surface::new(640.0, 480.0),
            &FixedMetrics::default(),
            MotionSettings {
                jitter_chance,
                jitter: 0.25,
            },
            seed,
            [vec![Token::at(200.0, 200.0)], vec![Token::at(400.0, 300.0)], vec![]],
        )
    }

    #[test]
    fn test_jitter_always_fires_at_full_chance() {
        for seed in 0..50 {
            let mut state = wandering(seed, 1.0);

            tick(&mut state);

            for population in state.populations() {
                for token in population.live() {
                    // Tokens start still, away from walls, so vel is the jitter itself
                    assert_ne!(token.vel, Vec2::ZERO, "seed {seed}: {} did not wander", population.kind);
                    assert!(token.vel.x.abs() <= 0.25 && token.vel.y.abs() <= 0.25);
                }
            }
        }
    }

    #[test]
    fn test_jitter_rate_matches_chance() {
        let mut wandered = 0;
        let mut samples = 0;
        for seed in 0..1_000 {
            let mut state = wandering(seed, 0.6);

            tick(&mut state);

            for token in state.populations().iter().flat_map(|p| p.live()) {
                samples += 1;
                if token.vel != Vec2::ZERO {
                    wandered += 1;
                }
            }
        }
        assert_eq!(samples, 2_000);
        let rate = wandered as f64 / samples as f64;
        assert!((0.5..=0.7).contains(&rate), "jitter applied at rate {rate}");
    }

    #[test]
    fn test_determinism() {
        let settings = Settings::default();
        let mut a = Match::new(&settings, &FixedMetrics::default(), 777);
        let mut b = Match::new(&settings, &FixedMetrics::default(), 777);

        for _ in 0..500 {
            let ra = tick(&mut a);
            let rb = tick(&mut b);
            assert_eq!(ra, rb);
        }
        for kind in Kind::ALL {
            assert_eq!(a.population(kind).tokens(), b.population(kind).tokens());
        }
    }
}
