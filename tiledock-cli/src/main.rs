//! `TileDock` CLI - Command-line interface for `TileDock` layouts
//!
//! Creates, inspects, validates and edits persisted layout documents, and
//! classifies drop regions for debugging host integrations.

mod cli;
mod commands;
mod error;
mod util;

use clap::Parser;
use cli::Cli;
use tiledock_core::tracing::{TracingConfig, TracingLevel, TracingOutput, init_tracing};

fn main() {
    let cli = Cli::parse();

    let context = util::CliContext {
        config_dir: cli.config,
        layout_path: cli.layout,
        quiet: cli.quiet,
    };

    // Without -v/-q the [logging] section decides; a broken settings file
    // is reported by the command itself.
    let tracing_config = match context.settings() {
        Ok(settings) if cli.verbose == 0 && !cli.quiet => settings.logging.tracing_config(),
        _ => TracingConfig::new().with_level(TracingLevel::from_verbosity(cli.verbose, cli.quiet)),
    }
    .with_output(TracingOutput::Stderr);
    if let Err(e) = init_tracing(&tracing_config) {
        eprintln!("Warning: logging disabled: {e}");
    }

    let result = commands::dispatch(&context, cli.command);

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}
