//! Headless batch harness
//!
//! Runs seeded matches on a fixed 60 Hz virtual clock with the autopilot at
//! the controls and prints one JSON summary line per run. Used for balance
//! sweeps and regression checks without a display.

use std::time::UNIX_EPOCH;

use clap::Parser;
use serde::Serialize;

use gridlock::config::Options;
use gridlock::sim::{FrameInput, GamePhase, MatchState, tick};

#[derive(Parser, Debug)]
#[command(author, version, about = "Run headless gridlock matches and emit JSON summaries")]
struct Cli {
    /// Starting level (ball count)
    #[arg(long, default_value_t = 1)]
    level: u32,
    /// Starting lives
    #[arg(long, default_value_t = 5)]
    lives: u32,
    /// Ball speed multiplier
    #[arg(long, default_value_t = 0.5)]
    ball_speed: f32,
    /// Base RNG seed; consecutive runs add their index
    #[arg(long)]
    seed: Option<u64>,
    /// Number of matches to run
    #[arg(long, default_value_t = 1)]
    runs: u32,
    /// Frame cap per match (60 frames = 1 simulated second)
    #[arg(long, default_value_t = 108_000)]
    max_frames: u64,
}

#[derive(Serialize)]
struct RunSummary {
    seed: u64,
    frames: u64,
    outcome: &'static str,
    level: u32,
    lives: u32,
    percentage: f32,
    walls: usize,
    balls: usize,
}

fn run_match(options: &Options, seed: u64, max_frames: u64) -> RunSummary {
    let mut state = MatchState::new(options, seed);
    let input = FrameInput {
        autoplay: true,
        ..Default::default()
    };

    let mut frames = 0u64;
    while !state.game.quit && frames < max_frames {
        let now = frames * 1000 / 60;
        tick(&mut state, &input, now);
        frames += 1;
    }

    let outcome = match state.game.phase {
        GamePhase::Victory => "victory",
        GamePhase::GameOver => "game_over",
        _ => "frame_cap",
    };
    RunSummary {
        seed,
        frames,
        outcome,
        level: state.game.level,
        lives: state.game.lives,
        percentage: state.game.percentage,
        walls: state.walls.len(),
        balls: state.balls.len(),
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let options = Options {
        start_level: cli.level,
        starting_lives: cli.lives,
        ball_speed: cli.ball_speed,
        ..Default::default()
    };

    let base_seed = cli.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    for run in 0..cli.runs {
        let summary = run_match(&options, base_seed + run as u64, cli.max_frames);
        println!(
            "{}",
            serde_json::to_string(&summary).expect("summary serializes")
        );
    }
}
