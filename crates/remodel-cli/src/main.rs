//! Remodel CLI - Command-line interface for declarative model mapping
//!
//! Entry point for the `remodel` binary: loads plan documents and maps
//! JSON or YAML records through them.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::LogSettings;
use std::io;
use std::process;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Set up colored output
    control::set_override(cli.use_color());

    let result = Config::load_with_file(cli.config.as_deref()).and_then(|config| {
        // Initialize logging
        let settings = LogSettings::resolve(&config.logging, cli.verbosity_level(), cli.quiet);
        if let Err(e) = logging::init_logging(&settings) {
            eprintln!("Failed to initialize logging: {}", e);
        }
        run(cli, &config)
    });

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("{}", error::format_error(&e, control::SHOULD_COLORIZE.should_colorize()));
            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
fn run(cli: Cli, config: &Config) -> Result<()> {
    tracing::info!(command = ?cli.command, verbosity = cli.verbosity_level(), "Executing command");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Map(args) => handlers::handle_map(args, config, &mut io::stdin().lock(), &mut out),
        Commands::Validate(args) => handlers::handle_validate(args, &mut out),
    }
}
