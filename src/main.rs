use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use log::{info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, backend::Backend, Terminal};
use serpent::app::{App, Scoreboard};
use serpent::cli::{self, Command, RunOptions};
use serpent::config::{project_dirs, EngineConfig};
use serpent::constants::{FRAME_POLL_MS, LOG_FILE_NAME};
use serpent::snake::Engine;
use serpent::terminal::TerminalSession;
use serpent::{build_info, input, ui};
use simplelog::{Config, WriteLogger};
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

fn main() -> Result<()> {
    let command = match cli::parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'serpent --help' for usage.");
            std::process::exit(1);
        }
    };

    match command {
        Command::Help => {
            println!("{}", cli::USAGE);
            Ok(())
        }
        Command::Version => {
            println!("{}", build_info::version_line());
            Ok(())
        }
        Command::Run(options) => run(options),
    }
}

/// Log file in the platform data directory, or the working directory if
/// there is none.
fn log_path() -> PathBuf {
    project_dirs()
        .and_then(|dirs| {
            let dir = dirs.data_dir().to_path_buf();
            fs::create_dir_all(&dir).ok().map(|_| dir.join(LOG_FILE_NAME))
        })
        .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME))
}

// The terminal owns stdout, so logs go to a file.
fn init_logging(level: LevelFilter) -> Result<()> {
    if level == LevelFilter::Off {
        return Ok(());
    }
    let path = log_path();
    let file = File::create(&path)
        .with_context(|| format!("could not create log file {}", path.display()))?;
    WriteLogger::init(level, Config::default(), file).context("could not install logger")?;
    Ok(())
}

fn load_config(options: &RunOptions) -> Result<EngineConfig> {
    let mut config = match &options.config_path {
        Some(path) => {
            info!("loading config from {}", path.display());
            EngineConfig::load(path)?
        }
        None => EngineConfig::load_or_default()?,
    };
    options.apply(&mut config);
    config.validate()?;
    Ok(config)
}

fn run(options: RunOptions) -> Result<()> {
    init_logging(options.log_level)?;
    info!("{}", build_info::version_line());

    let config = load_config(&options).context("invalid configuration")?;
    let rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let engine = Engine::with_rng(&config, Scoreboard::default(), rng)?;
    info!(
        "board {}x{}, step every {}ms, food {:?}",
        config.grid_size, config.grid_size, config.tick_interval_ms, config.food_policy
    );
    let mut app = App::new(engine);

    let mut session = TerminalSession::enter(io::stdout())?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let result = run_loop(&mut terminal, &mut app);

    app.teardown();
    let restored = session.restore();

    info!("final score {}", app.scoreboard().score);
    result?;
    restored.context("could not restore the terminal")
}

/// Frame loop: tick, draw, then wait up to one frame for a key.
fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let start = Instant::now();

    while !app.should_quit() {
        // Parks itself once the game is over, until Play Again.
        app.frame(start.elapsed().as_millis() as u64);

        terminal.draw(|frame| ui::draw_ui(frame, app))?;

        if event::poll(Duration::from_millis(FRAME_POLL_MS))? {
            if let Event::Key(key) = event::read()? {
                let action = input::map_key_event(key, app.scoreboard().game_over);
                app.handle_action(action);
            }
        }
    }

    Ok(())
}
