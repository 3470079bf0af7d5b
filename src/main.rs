//! # Minotaur Main Entry Point
//!
//! Builds a session from the command line, then either plays it through the
//! autopilot, replays a command script, or reads commands from stdin.

use clap::Parser;
use log::{error, info};
use minotaur::{
    dispatch_effects, parse_script, AsciiRenderer, Autopilot, Effect, GameConfig, GameVariant,
    InputHandler, MediaBackend, MediaError, MinotaurResult, PlayerInput, Session, SoundCue,
    HELP_TEXT,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

/// Command line arguments for the maze game.
#[derive(Parser, Debug)]
#[command(name = "minotaur")]
#[command(about = "A dice-driven maze adventure with monsters, treasure and an exit to find")]
#[command(version)]
struct Args {
    /// Random seed for maze generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Game variant to play
    #[arg(long, value_enum, default_value_t = GameVariant::Minotaur)]
    variant: GameVariant,

    /// Override the maze side length
    #[arg(long)]
    size: Option<usize>,

    /// JSON configuration file; replaces the variant preset
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Let the autopilot walk to the exit
    #[arg(long)]
    autoplay: bool,

    /// Command budget for autoplay
    #[arg(long, default_value_t = 10_000)]
    max_turns: u32,

    /// Comma- or space-separated commands to run instead of reading stdin
    #[arg(long)]
    script: Option<String>,
}

fn main() {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    #[cfg(feature = "dev-tools")]
    {
        let filter = tracing_subscriber::EnvFilter::try_new(log_level)
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .parse_filters(log_level)
            .format_timestamp(None)
            .init();
    }
}

fn build_config(args: &Args) -> MinotaurResult<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::for_variant(args.variant, args.seed.unwrap_or(12345)),
    };

    if let Some(seed) = args.seed {
        config.maze.seed = seed;
    }
    if let Some(size) = args.size {
        config.maze.size = size;
    }

    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> MinotaurResult<()> {
    info!("Starting Minotaur v{}", minotaur::VERSION);

    let config = build_config(args)?;
    let mut session = Session::new(config)?;
    let mut renderer = AsciiRenderer::new();
    let mut backend = TerminalBackend::default();

    if args.autoplay {
        info!("Starting in autoplay mode");
        let report = Autopilot::new().run_to_exit(&mut session, &mut backend, args.max_turns)?;
        println!("{}", renderer.render(&session.snapshot()));
        println!(
            "Reached the exit in {} actions ({} media failures)",
            report.actions, report.media_failures
        );
        return Ok(());
    }

    if let Some(script) = &args.script {
        info!("Replaying command script");
        let clock = Instant::now();
        for input in parse_script(script)? {
            if input == PlayerInput::Quit {
                break;
            }
            step(&mut session, &mut backend, &mut renderer, input, &clock)?;
        }
        println!("{}", renderer.render(&session.snapshot()));
        return Ok(());
    }

    run_interactive(&mut session, &mut backend, &mut renderer)
}

fn run_interactive(
    session: &mut Session,
    backend: &mut TerminalBackend,
    renderer: &mut AsciiRenderer,
) -> MinotaurResult<()> {
    let input_handler = InputHandler::new();
    let clock = Instant::now();

    renderer.add_message("Welcome to the labyrinth! Roll the die to start moving.".to_string());
    renderer.add_message(HELP_TEXT.to_string());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let effects = session.advance_clock(elapsed_ms(&clock))?;
        announce(&effects, renderer);
        dispatch_effects(backend, &effects);

        print!("{}> ", renderer.render(&session.snapshot()));
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };

        let input = match input_handler.parse_line(&line) {
            Some(input) => input,
            None => {
                renderer.add_message(format!("Unknown command '{}'", line.trim()));
                continue;
            }
        };

        match input {
            PlayerInput::Quit => {
                info!("Player quit the game");
                break;
            }
            PlayerInput::Help => renderer.add_message(HELP_TEXT.to_string()),
            _ => step(session, backend, renderer, input, &clock)?,
        }
    }

    info!("Game loop ended");
    Ok(())
}

/// Runs one command and everything it triggers.
fn step(
    session: &mut Session,
    backend: &mut TerminalBackend,
    renderer: &mut AsciiRenderer,
    input: PlayerInput,
    clock: &Instant,
) -> MinotaurResult<()> {
    let mut effects = session.advance_clock(elapsed_ms(clock))?;
    effects.extend(session.handle_input(input)?);

    let defeated = effects.contains(&Effect::PlaySound {
        cue: SoundCue::Defeat,
    });

    announce(&effects, renderer);
    let failures = dispatch_effects(backend, &effects);

    // Terminal sounds finish instantly.
    if defeated {
        let closed = if failures > 0 {
            session.defeat_sound_failed("terminal backend")
        } else {
            session.defeat_sound_finished()
        };
        announce(&closed, renderer);
        dispatch_effects(backend, &closed);
    }

    Ok(())
}

fn announce(effects: &[Effect], renderer: &mut AsciiRenderer) {
    for effect in effects {
        let message = match effect {
            Effect::PlayVideo { media } => format!("Something stirs... ({})", media),
            Effect::PlaySound {
                cue: SoundCue::Defeat,
            } => "The enemy falls!".to_string(),
            Effect::VictoryFade => "You found the exit!".to_string(),
            Effect::EncounterClosed { encounter_id } => format!("{} is gone.", encounter_id),
            Effect::BoardReset => "A new maze rises around you.".to_string(),
            _ => continue,
        };
        renderer.add_message(message);
    }
}

fn elapsed_ms(clock: &Instant) -> u64 {
    clock.elapsed().as_millis() as u64
}

/// Backend for terminals: nothing to play, so effects are only logged.
#[derive(Debug, Default)]
struct TerminalBackend {
    performed: usize,
}

impl MediaBackend for TerminalBackend {
    fn perform(&mut self, effect: &Effect) -> Result<(), MediaError> {
        self.performed += 1;
        log::debug!("Effect #{}: {:?}", self.performed, effect);
        Ok(())
    }
}
