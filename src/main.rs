//=========================================================================
// tactile-viz
//=========================================================================
//
// Binary entry point: logging, argument parsing, engine run.
//
// Log verbosity comes from RUST_LOG (default `info`), for example
// `RUST_LOG=scene=debug,render=warn`.
//
//=========================================================================

use std::process::ExitCode;

use clap::Parser;
use log::error;

use tactile_viz::cli::Cli;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.into_builder().build().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
