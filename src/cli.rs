//! Command-line arguments.

use crate::config::EngineConfig;
use crate::snake::FoodPolicy;
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

pub const USAGE: &str = "\
Serpent - terminal snake

Usage: serpent [options]

Options:
  --config <path>      Read settings from a JSON file
  --interval <ms>      Milliseconds between snake moves (default 100)
  --seed <n>           Seed food placement for a repeatable game
  --avoid-snake        Never place food under the snake
  --log-level <level>  off, error, warn, info, debug or trace (default info)
  --version            Show version information
  --help               Show this help message

Controls: arrows / WASD to steer, R to play again, Q or Esc to quit.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub config_path: Option<PathBuf>,
    pub interval_ms: Option<u64>,
    pub seed: Option<u64>,
    pub avoid_snake: bool,
    pub log_level: LevelFilter,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            config_path: None,
            interval_ms: None,
            seed: None,
            avoid_snake: false,
            log_level: LevelFilter::Info,
        }
    }
}

impl RunOptions {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut EngineConfig) {
        if let Some(ms) = self.interval_ms {
            config.tick_interval_ms = ms;
        }
        if self.avoid_snake {
            config.food_policy = FoodPolicy::AvoidSnake;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(RunOptions),
    Help,
    Version,
}

/// Parse arguments (without the program name). Errors are user-facing messages.
pub fn parse_args<I>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = String>,
{
    let mut options = RunOptions::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-v" => return Ok(Command::Version),
            "--avoid-snake" => options.avoid_snake = true,
            "--config" => options.config_path = Some(PathBuf::from(value(&mut args, &arg)?)),
            "--interval" => options.interval_ms = Some(number(&mut args, &arg)?),
            "--seed" => options.seed = Some(number(&mut args, &arg)?),
            "--log-level" => {
                let raw = value(&mut args, &arg)?;
                options.log_level = LevelFilter::from_str(&raw)
                    .map_err(|_| format!("Invalid log level: {}", raw))?;
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(Command::Run(options))
}

fn value<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<String, String> {
    args.next()
        .ok_or_else(|| format!("Missing value for {}", flag))
}

fn number<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<u64, String> {
    let raw = value(args, flag)?;
    raw.parse()
        .map_err(|_| format!("Invalid number for {}: {}", flag, raw))
}
