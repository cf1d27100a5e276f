use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use mineboard_core::BoardEngine;

use session::Session;
use settings::Settings;

mod command;
mod logging;
mod render;
mod session;
mod settings;

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// TOML file with board settings, command line flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    settings: Settings,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose.log_level_filter())?;

    let settings = match &args.config {
        Some(path) => Settings::load(path)?.merge(args.settings),
        None => args.settings,
    };
    let config = settings.game_config()?;
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let engine = BoardEngine::with_sampling(config, seed, settings.sampling())
        .context("could not start a game")?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "Type `help` for a list of commands.")?;
    Session::new(engine).run(io::stdin().lock(), &mut stdout)
}
