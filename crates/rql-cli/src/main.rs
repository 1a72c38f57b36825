//! # rql - Run ReQL queries and render the results
//!
//! Reads a stream of result documents, decodes the wire pseudo-types, and
//! renders them with one of three presentation strategies: colorized and
//! paginated for terminals, newline-delimited JSON for pipes, or a single
//! streaming JSON array for strict consumers.

use std::process::ExitCode;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod cli;
mod driver;
mod error;
mod output;
mod wire;

use cli::Cli;
use error::{CliError, ErrorCategory};
use output::RenderOutcome;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = initialize_logging(&cli) {
        eprintln!("Failed to initialize logging: {e}");
        return ErrorCategory::Internal.as_exit_code();
    }

    match run(cli) {
        Ok(outcome) => {
            if outcome == RenderOutcome::Quit {
                tracing::debug!("stopped at pager prompt");
            }
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::from(error::exit_code_from_error(&e))
        },
    }
}

fn initialize_logging(cli: &Cli) -> anyhow::Result<()> {
    let level = if cli.verbose || cli.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<RenderOutcome> {
    if !output::should_use_colors() {
        colored::control::set_override(false);
    }

    let mut renderer = output::select(
        cli.format,
        &cli.style,
        cli.pagesize.get(),
        output::is_interactive(),
    );

    let mut source =
        wire::DocumentStream::open(&cli.query, cli.input.as_deref()).map_err(CliError::usage)?;

    driver::execute(&mut source, &mut renderer)
}
