mod cli;
mod commands;
mod config;
mod guid;
mod kinds;
mod logger;
mod output;

use std::process::ExitCode;

use crate::commands::Options;
use crate::config::Settings;

fn main() -> ExitCode {
    // Step 1: Settings (singleton, from env vars)
    let settings = Settings::get();

    // Step 2: Parse arguments
    let matches = cli::create_root_command().get_matches();

    // Step 3: Initialize logger
    logger::init(cli::is_verbose(&matches), settings.log_filter.as_deref());

    // Step 4: Build the kind registry
    let registry = match kinds::builtin_registry() {
        Ok(registry) => registry,
        Err(e) => {
            output::error(&format!("Failed to register kinds: {e}"));
            return ExitCode::FAILURE;
        }
    };

    let options = Options {
        json: matches.get_flag("json"),
        pretty: matches.get_flag("pretty") || settings.pretty,
    };

    // Step 5: Dispatch to subcommand handler
    let stdout = std::io::stdout();
    match commands::dispatch(&matches, &registry, options, &mut stdout.lock()) {
        Ok(()) => {
            if cli::is_verbose(&matches) {
                output::success("done");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            output::error(&format!("Error: {e:#}"));
            ExitCode::FAILURE
        }
    }
}
