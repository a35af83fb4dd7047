//! RPS Arena entry point
//!
//! Plays matches headlessly and reports the results. `Match::play_out`
//! drives the ticks; `--trace` hooks into each one.

use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};

use rps_arena::Settings;
use rps_arena::Standings;
use rps_arena::sim::{GlyphMetrics, Kind, Match, MatchOutcome, TickReport};

const USAGE: &str = "rps-arena [settings.json] [--matches N] [--seed S] [--trace] [--snapshot]";

/// Parsed command line
#[derive(Debug, Default)]
struct Args {
    settings_path: Option<String>,
    matches: u32,
    seed: Option<u64>,
    trace: bool,
    snapshot: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);
    let mut parsed = Args {
        matches: 1,
        ..Default::default()
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--matches" | "-n" => {
                let value = args.next().context(USAGE)?;
                parsed.matches = value
                    .parse()
                    .with_context(|| format!("Invalid match count `{value}`"))?;
            }
            "--seed" | "-s" => {
                let value = args.next().context(USAGE)?;
                parsed.seed = Some(
                    value
                        .parse()
                        .with_context(|| format!("Invalid seed `{value}`"))?,
                );
            }
            "--trace" => parsed.trace = true,
            "--snapshot" => parsed.snapshot = true,
            "--help" | "-h" => bail!("Usage: {USAGE}"),
            flag if flag.starts_with('-') => bail!("Unknown option `{flag}`\n\nUsage: {USAGE}"),
            path if parsed.settings_path.is_none() => parsed.settings_path = Some(path.to_string()),
            extra => bail!("Unexpected argument `{extra}`\n\nUsage: {USAGE}"),
        }
    }

    Ok(parsed)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Print every elimination in a tick's report
fn trace(report: &TickReport) {
    for e in &report.eliminations {
        println!(
            "[{:>6}] {} {} {} at ({:.0}, {:.0})  -> {} rocks, {} papers, {} scissors",
            report.tick,
            e.winner.glyph(),
            verb(e.winner),
            e.loser.glyph(),
            e.pos.x,
            e.pos.y,
            report.live_counts[Kind::Rock.index()],
            report.live_counts[Kind::Paper.index()],
            report.live_counts[Kind::Scissor.index()],
        );
    }
}

fn verb(winner: Kind) -> &'static str {
    match winner {
        Kind::Rock => "breaks",
        Kind::Paper => "covers",
        Kind::Scissor => "cuts",
    }
}

fn describe(outcome: &MatchOutcome) -> String {
    if outcome.aborted {
        return format!("seed {}: no result after {} ticks", outcome.seed, outcome.ticks);
    }
    match outcome.winner() {
        Some(kind) => format!(
            "seed {}: {} {} wins in {} ticks",
            outcome.seed,
            kind.glyph(),
            kind,
            outcome.ticks
        ),
        None => format!("seed {}: nobody left standing", outcome.seed),
    }
}

fn run() -> Result<()> {
    let args = parse_args()?;

    let mut settings = match &args.settings_path {
        Some(path) => Settings::load(path).with_context(|| format!("Failed to load {path}"))?,
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings = settings.with_seed(seed);
    }

    let metrics = settings.metrics();
    let base_seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!(
        "Playing {} match(es), {} per kind, glyph box {:?}",
        args.matches,
        settings.count,
        metrics.measure(Kind::Rock)
    );

    let mut standings = Standings::new();
    for i in 0..args.matches {
        let seed = base_seed.wrapping_add(u64::from(i));
        let mut state = Match::new(&settings, &metrics, seed);

        let outcome = if args.trace {
            state.play_out_with(settings.max_ticks, trace)
        } else {
            state.play_out(settings.max_ticks)
        };

        println!("{}", describe(&outcome));
        standings.record(&outcome);

        if args.snapshot {
            let json = serde_json::to_string_pretty(&state).context("Failed to serialize match")?;
            println!("{json}");
        }
    }

    if args.matches > 1 {
        println!("\n{standings}");
        log::debug!("{}", serde_json::to_string(&standings)?);
    }

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
