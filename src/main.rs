//! Gridlock entry point
//!
//! Parses the command line, then runs the frame-paced game loop over the
//! platform seams. No window backend is wired in this build, so the loop runs
//! the built-in autopilot against the logging sink; a display frontend plugs
//! in by providing its own `EventSource` and `RenderSink`.

use std::time::{Duration, UNIX_EPOCH};

use gridlock::config::{self, Parsed};
use gridlock::consts::FPS_CAP;
use gridlock::platform::{
    Clock, EventSource, LogSink, PlatformError, RenderSink, ScriptedEvents, SystemClock,
    gather_input,
};
use gridlock::sim::{MatchState, tick};

fn main() {
    env_logger::init();

    let options = match config::parse(std::env::args().skip(1)) {
        Ok(Parsed::Run(options)) => options,
        Ok(Parsed::Help) => {
            println!("{}", config::USAGE);
            return;
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let seed = std::time::SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    log::info!(
        "gridlock starting: level {}, lives {}, speed {}, {} theme, {}x{}, seed {}",
        options.start_level,
        options.starting_lives,
        options.ball_speed,
        options.ball_colour.as_str(),
        options.resolution.0,
        options.resolution.1,
        seed
    );
    log::info!("no display backend in this build - running the autopilot demo");

    let mut state = MatchState::new(&options, seed);
    let clock = SystemClock::new();
    // Stand-in event queue until a window backend delivers real events
    let mut events = ScriptedEvents::default();
    let mut sink = LogSink::new();

    if let Err(e) = run(&mut state, &clock, &mut events, &mut sink) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    log::info!(
        "exited at level {} with {} lives, {:.0}% captured",
        state.game.level,
        state.game.lives,
        state.game.percentage
    );
}

/// The game loop: gather input, step the simulation, present, cap the rate
fn run(
    state: &mut MatchState,
    clock: &dyn Clock,
    events: &mut dyn EventSource,
    sink: &mut dyn RenderSink,
) -> Result<(), PlatformError> {
    let frame_budget = Duration::from_millis(1000 / FPS_CAP);
    while !state.game.quit {
        let frame_start = clock.now_ms();

        let mut input = gather_input(events);
        input.autoplay = true;
        tick(state, &input, frame_start);

        sink.frame(state, frame_start)?;

        let elapsed = clock.now_ms().saturating_sub(frame_start);
        if elapsed < frame_budget.as_millis() as u64 {
            std::thread::sleep(frame_budget - Duration::from_millis(elapsed));
        }
    }
    Ok(())
}
