use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};
use termsweep_core::{ChordPolicy, Game, GameConfig, RandomBoardGenerator};

mod app;
mod keymap;
mod terminal;
mod theme;
mod view;

use app::App;
use terminal::Tui;
use theme::Theme;
use view::Renderer;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Only chord when the flags around a number match it
    #[arg(long)]
    strict_chord: bool,

    /// TOML file overriding any of the default colors
    #[arg(short, long, value_name = "FILE")]
    theme: Option<PathBuf>,

    /// Write logs here; nothing is logged without it
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn init_logger(args: &Args, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to initialize logger")
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logger(&args, path)?;
    }

    let theme = match &args.theme {
        Some(path) => Theme::load(path)?,
        None => Theme::default(),
    };
    let renderer = Renderer::new(theme.palette()?);

    let chord = if args.strict_chord {
        ChordPolicy::FlagsMatch
    } else {
        ChordPolicy::Always
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("seed: {}", seed);

    let game = Game::new(
        GameConfig::default().with_chord(chord),
        RandomBoardGenerator::new(seed),
    )
    .context("failed to set up the board")?;
    let mut app = App::new(game, renderer);

    let mut tui = Tui::enter()?;
    app.run(tui.terminal_mut())
}
