//! # CLI Structure and Argument Parsing
//!
//! Defines the command-line interface for `rql` using `clap` derive macros.
//! The query itself is an opaque string here: the renderer only ever needs
//! its displayable text, and evaluation belongs to the driver behind the
//! [`crate::driver::QuerySource`] seam.
//!
//! ```bash
//! # Interactive terminal: colorized, paginated output
//! rql 'r.table("users")' < dump.json
//!
//! # Piped: newline-delimited JSON automatically
//! rql 'r.table("users")' < dump.json | jq .name
//!
//! # Strict machine parsing
//! rql --format array 'r.table("users")' --input dump.json
//! ```

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;

use crate::output::OutputFormat;

/// Default color theme when `--style` is omitted or unrecognized.
pub const DEFAULT_STYLE: &str = "monokai";

/// Main CLI structure for the `rql` command.
#[derive(Clone, Debug, Parser)]
#[command(name = "rql", about = "Run ReQL queries and render the results", version)]
pub struct Cli {
    /// The query to run, shown alongside interactive output
    pub query: String,

    /// Output format; `auto` picks color on a terminal, newline on a pipe
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Auto, env = "RQL_FORMAT")]
    pub format: OutputFormat,

    /// Color theme for interactive output
    #[arg(long, short = 's', default_value = DEFAULT_STYLE, env = "RQL_STYLE")]
    pub style: String,

    /// Documents to emit before pausing for a keypress (color mode only)
    #[arg(long, short = 'p', default_value = "20")]
    pub pagesize: NonZeroUsize,

    /// Read result documents from this file instead of stdin
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}
