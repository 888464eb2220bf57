//! Command-line options and validation
//!
//! The game binary keeps the historical single-dash flag grammar (`-ls5` or
//! `-ls 5`), which predates clap's conventions, so it is parsed directly.
//! Invalid values are fatal: the caller prints the error to stderr and exits
//! with status 1. Unrecognized arguments are ignored.

use thiserror::Error;

use crate::consts::MAX_LEVEL;

/// Ball/theme colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BallColour {
    #[default]
    Red,
    Blue,
    Green,
}

impl BallColour {
    pub fn as_str(&self) -> &'static str {
        match self {
            BallColour::Red => "red",
            BallColour::Blue => "blue",
            BallColour::Green => "green",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "red" => Some(BallColour::Red),
            "blue" => Some(BallColour::Blue),
            "green" => Some(BallColour::Green),
            _ => None,
        }
    }
}

/// Validated game options
#[derive(Debug, Clone)]
pub struct Options {
    pub start_level: u32,
    pub starting_lives: u32,
    /// Ball speed multiplier over `BALL_SPEED_MODIFIER` pixels per second
    pub ball_speed: f32,
    pub ball_colour: BallColour,
    /// Window size in pixels, 4:3 only
    pub resolution: (u32, u32),
}

impl Default for Options {
    fn default() -> Self {
        Self {
            start_level: 1,
            starting_lives: 5,
            ball_speed: 0.5,
            ball_colour: BallColour::Red,
            resolution: (800, 600),
        }
    }
}

/// Fatal option errors, printed verbatim to stderr
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("starting level must be in range [1, 50]")]
    StartLevel,
    #[error("starting lives must be in range [1, 99]")]
    StartingLives,
    #[error("ball speed must be in range (0.0, 1.0]")]
    BallSpeed,
    #[error("ball colour must be red, blue, or green")]
    BallColour,
    #[error("resolution must be 4:3 aspect ratio")]
    Resolution,
}

pub const USAGE: &str = "COMMAND LINE ARGUMENTS:
-ls $levelselect (=1)
     Set the starting level in $levelselect | range [1, 50].
-sl $startinglives (=5)
     Set the starting lives in $startinglives | range [1, 99].
-bs $ballspeed (=0.5)
     Set the speed of the balls in $ballspeed | range (0.0, 1.0].
-bc $ballcolour (=red)
     Set the colour of the balls in $ballcolour | range [red, blue, green].
-res $resolution (=800x600)
     Set the resolution of the game window in $resolution | range [4:3 aspect ratio]";

/// Outcome of argument parsing
#[derive(Debug, Clone)]
pub enum Parsed {
    Run(Options),
    Help,
}

/// Flag value: attached to the flag itself, or the following argument
fn flag_value(
    arg: &str,
    prefix_len: usize,
    rest: &mut impl Iterator<Item = String>,
) -> Option<String> {
    let attached = &arg[prefix_len..];
    if attached.is_empty() {
        rest.next()
    } else {
        Some(attached.to_string())
    }
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 { a } else { gcd(b, a % b) }
}

fn parse_resolution(value: &str) -> Result<(u32, u32), ConfigError> {
    let mut parts = value.split('x');
    let width: u32 = parts
        .next()
        .and_then(|w| w.parse().ok())
        .ok_or(ConfigError::Resolution)?;
    let height: u32 = parts
        .next()
        .and_then(|h| h.parse().ok())
        .ok_or(ConfigError::Resolution)?;
    if parts.next().is_some() || height == 0 {
        return Err(ConfigError::Resolution);
    }
    let divisor = gcd(width, height);
    if width / divisor == 4 && height / divisor == 3 {
        Ok((width, height))
    } else {
        Err(ConfigError::Resolution)
    }
}

/// Parse command-line arguments (program name already stripped)
pub fn parse<I>(args: I) -> Result<Parsed, ConfigError>
where
    I: IntoIterator<Item = String>,
{
    let mut options = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        if arg == "--help" {
            return Ok(Parsed::Help);
        } else if arg.starts_with("-res") {
            let value = flag_value(&arg, 4, &mut args).ok_or(ConfigError::Resolution)?;
            options.resolution = parse_resolution(&value)?;
        } else if arg.starts_with("-ls") {
            let level: u32 = flag_value(&arg, 3, &mut args)
                .and_then(|v| v.parse().ok())
                .ok_or(ConfigError::StartLevel)?;
            if (1..=MAX_LEVEL).contains(&level) {
                options.start_level = level;
            } else {
                return Err(ConfigError::StartLevel);
            }
        } else if arg.starts_with("-sl") {
            let lives: u32 = flag_value(&arg, 3, &mut args)
                .and_then(|v| v.parse().ok())
                .ok_or(ConfigError::StartingLives)?;
            if (1..=99).contains(&lives) {
                options.starting_lives = lives;
            } else {
                return Err(ConfigError::StartingLives);
            }
        } else if arg.starts_with("-bs") {
            let speed: f32 = flag_value(&arg, 3, &mut args)
                .and_then(|v| v.parse().ok())
                .ok_or(ConfigError::BallSpeed)?;
            if speed > 0.0 && speed <= 1.0 {
                options.ball_speed = speed;
            } else {
                return Err(ConfigError::BallSpeed);
            }
        } else if arg.starts_with("-bc") {
            let colour = flag_value(&arg, 3, &mut args).ok_or(ConfigError::BallColour)?;
            options.ball_colour = BallColour::from_str(&colour).ok_or(ConfigError::BallColour)?;
        }
        // Anything else is ignored
    }

    Ok(Parsed::Run(options))
}
