use std::process::ExitCode;

use clap::Parser;
use engine_logging::engine_error;

mod app;
mod cli;
mod config;
mod effects;
mod files;
mod ui;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    engine_logging::initialize(cli.log_destination(), cli.log_level());

    match app::run(cli) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            engine_error!("{err:#}");
            eprintln!("normap: {err:#}");
            ExitCode::from(2)
        }
    }
}
