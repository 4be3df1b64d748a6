//! Stack Gap entry point
//!
//! Headless runner: plays sessions with the autopilot against the
//! deterministic tweener and reports how far each one got.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;

use stack_gap::Tuning;
use stack_gap::anim::Tweener;
use stack_gap::sim::{Autopilot, GameEvent, Outcome, Session, TextHud};

#[derive(Parser, Debug)]
#[command(name = "stack-gap")]
#[command(about = "Play Stack Gap headlessly with an autopilot")]
struct Cli {
    /// Seed for the first session; later sessions reseed from it
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Number of sessions to play (each ends on a lost round)
    #[arg(long, default_value_t = 5)]
    sessions: u32,
    /// Autopilot accuracy, 0.0 (wild) to 1.0 (always mid-gap)
    #[arg(long, default_value_t = 0.7)]
    skill: f32,
    /// Simulated frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Stop a session after this many successful rounds
    #[arg(long, default_value_t = 200)]
    max_rounds: u32,
    /// Tuning overrides (JSON)
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Print the default tuning as JSON and exit
    #[arg(long)]
    dump_tuning: bool,
    /// One JSON summary line per session
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct SessionSummary {
    session: u32,
    seed: u64,
    score: u64,
    level: u32,
    rounds: u32,
    ended_by: Option<Outcome>,
    seconds: f32,
}

fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading tuning file {}", path.display()))?;
    Tuning::from_json(&json).with_context(|| format!("loading tuning from {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.dump_tuning {
        println!("{}", Tuning::default().to_json_pretty()?);
        return Ok(());
    }
    if cli.fps == 0 {
        bail!("--fps must be at least 1");
    }

    log::info!("Stack Gap (headless) starting...");
    let tuning = load_tuning(cli.tuning.as_ref())?;
    let dt = 1.0 / cli.fps as f32;
    // Generous cap: a round never takes longer than growth plus drop plus reset
    let round_secs = tuning.grow_duration
        + tuning.rotate_duration
        + tuning.drop_duration
        + tuning.reset_duration
        + 1.0;
    let max_frames = ((cli.max_rounds + 1) as f32 * round_secs / dt).ceil() as u64;

    let mut session = Session::new(cli.seed, tuning, Tweener::new(), TextHud::default())
        .context("starting session")?;
    let mut pilot = Autopilot::new(cli.seed ^ 0x5eed, cli.skill);

    for index in 1..=cli.sessions {
        if index > 1 {
            session.reload();
        }
        let seed = session.seed();
        let mut ended_by = None;
        let mut frames = 0u64;

        while frames < max_frames && session.rounds_played() < cli.max_rounds {
            let input = pilot.input(&session);
            session.tick(&input, dt);
            frames += 1;

            for event in session.drain_events() {
                match event {
                    GameEvent::RoundResolved { outcome, score } => {
                        log::debug!("Round {:?}, score {}", outcome, score);
                    }
                    GameEvent::LevelUp { level } => {
                        log::info!("Session {}: level {}", index, level);
                    }
                    GameEvent::SessionLost { outcome, .. } => ended_by = Some(outcome),
                    _ => {}
                }
            }
            if session.awaiting_reload() {
                break;
            }
        }

        let progression = *session.progression();
        let summary = SessionSummary {
            session: index,
            seed,
            score: progression.score,
            level: progression.level,
            rounds: session.rounds_played(),
            ended_by,
            seconds: frames as f32 * dt,
        };
        if cli.json {
            println!("{}", serde_json::to_string(&summary)?);
        } else {
            println!(
                "session {:>3}  seed {:>20}  {}  ({} rounds, {:.1}s, {})",
                summary.session,
                summary.seed,
                session.hud().title,
                summary.rounds,
                summary.seconds,
                match summary.ended_by {
                    Some(outcome) => format!("lost: {:?}", outcome),
                    None => "stopped".to_string(),
                }
            );
        }
    }

    Ok(())
}
