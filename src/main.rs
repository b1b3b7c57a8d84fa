mod app;
mod args;
mod command;
mod config;
mod consts;
mod game;
mod highscores;
mod screen;
mod util;
use crate::app::App;
use crate::args::{Arguments, Invocation, USAGE};
use crate::config::Config;
use crate::highscores::HighScoreStore;
use crate::util::error_chain;
use anyhow::Context;
use simplelog::{LevelFilter, WriteLogger};
use std::io::{self, ErrorKind};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = match Invocation::from_env() {
        Ok(Invocation::Run(args)) => args,
        Ok(Invocation::Help) => {
            print!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Ok(Invocation::Version) => {
            println!("gridsnake {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("gridsnake: {e}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };
    let store = match setup(&args) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("gridsnake: {e:#}");
            return ExitCode::from(2);
        }
    };
    let terminal = ratatui::init();
    let r = App::new(store).run(terminal);
    ratatui::restore();
    io_exit(r)
}

/// Start logging, read the configuration, and return the high score store it
/// calls for
fn setup(args: &Arguments) -> anyhow::Result<Box<dyn HighScoreStore>> {
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }
    let config = if let Some(path) = &args.config {
        Config::load(path, false)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?
    } else {
        match Config::default_path() {
            Ok(path) => Config::load(&path, true).with_context(|| {
                format!("failed to load configuration from {}", path.display())
            })?,
            Err(e) => {
                log::warn!("{}; using default configuration", error_chain(&e));
                Config::default()
            }
        }
    };
    Ok(config.high_score_store())
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = fs_err::File::create(path).context("failed to open log file")?;
    WriteLogger::init(LevelFilter::Info, simplelog::Config::default(), file)
        .context("failed to initialize logging")?;
    log::info!("Starting gridsnake {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
