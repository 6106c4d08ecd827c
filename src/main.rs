//! fedconf CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use fedconf::cli::{handle_error, run, Cli};
use fedconf::infrastructure::logging::LoggerImpl;
use fedconf::ConfigLoader;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    let config = match ConfigLoader::load() {
        Ok(config) => config,
        Err(err) => {
            handle_error(&err, json);
            return ExitCode::FAILURE;
        }
    };

    let _logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => {
            handle_error(&err, json);
            return ExitCode::FAILURE;
        }
    };

    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            handle_error(&err, json);
            ExitCode::FAILURE
        }
    }
}
