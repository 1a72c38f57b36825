//! # Output Formatting
//!
//! Everything between a query result and the terminal lives here. The
//! module supports three presentation strategies:
//!
//! - **Color**: human-readable output with syntax highlighting, pagination
//!   through large result streams, and the query text echoed back
//! - **Newline**: one compact JSON document per line for streaming
//!   consumers (`jq`, `grep`, line-oriented scripts)
//! - **Array**: a single JSON array, incrementally flushed, parseable by
//!   any JSON reader even when truncated by a fault
//!
//! ## Strategy selection
//!
//! [`select`] resolves the requested [`OutputFormat`] once per invocation:
//! `auto` picks Color on a terminal and Newline on a pipe. The chosen
//! [`Renderer`] is used for the entire rendering of one result; there is
//! no mid-stream switching.
//!
//! ## Shared behavior
//!
//! A mapping result carrying the soft-error field is written to the error
//! stream (tabs expanded to double spaces) and short-circuits every
//! strategy before any formatting or pagination happens.

mod array;
mod color;
mod detect;
mod highlight;
mod newline;
mod pager;

pub use array::ArrayRenderer;
pub use color::ColorRenderer;
pub use detect::{is_interactive, should_use_colors};
pub use highlight::Theme;
pub use newline::NewlineRenderer;
pub use pager::{KeySource, ScriptedKeys, TerminalKeys};

use std::io::{self, Write};

use rql_core::{Document, QueryResult, Result};

/// Output format options supported by the CLI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Color on a terminal, newline-delimited on a pipe (default)
    Auto,
    /// Colorized, paginated output for humans
    Color,
    /// Newline-delimited compact JSON
    Newline,
    /// One JSON array
    Array,
}

/// How a render call finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The whole result was rendered.
    Completed,
    /// The user quit at a pager prompt. Not an error; exits 0.
    Quit,
}

/// A presentation strategy, resolved once per invocation.
pub enum Renderer {
    /// Interactive colorized output.
    Color(ColorRenderer),
    /// Newline-delimited compact JSON.
    Newline(NewlineRenderer),
    /// Streaming JSON array.
    Array(ArrayRenderer),
}

impl Renderer {
    /// Render a result to stdout/stderr.
    pub fn render(&mut self, result: QueryResult, query: &str) -> Result<RenderOutcome> {
        let stdout = io::stdout();
        let stderr = io::stderr();
        let mut out = stdout.lock();
        let mut err = stderr.lock();
        self.render_to(result, query, &mut out, &mut err)
    }

    /// Render a result to explicit sinks.
    pub fn render_to(
        &mut self,
        result: QueryResult,
        query: &str,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<RenderOutcome> {
        match self {
            Self::Color(r) => r.render_to(result, query, out, err),
            Self::Newline(r) => r.render_to(result, out, err),
            Self::Array(r) => r.render_to(result, out, err),
        }
    }
}

/// Choose the presentation strategy for this invocation.
///
/// TTY-ness is the caller's concern and is queried exactly once, at
/// selection time. Unknown format names never reach this function: the
/// clap `ValueEnum` rejects them at parse time with a usage error, which
/// is the configuration-error path for this tool.
#[must_use]
pub fn select(format: OutputFormat, style: &str, page_size: usize, is_tty: bool) -> Renderer {
    match format {
        OutputFormat::Color => Renderer::Color(ColorRenderer::new(Theme::named(style), page_size)),
        OutputFormat::Auto if is_tty => {
            Renderer::Color(ColorRenderer::new(Theme::named(style), page_size))
        },
        OutputFormat::Newline | OutputFormat::Auto => Renderer::Newline(NewlineRenderer),
        OutputFormat::Array => Renderer::Array(ArrayRenderer),
    }
}

/// The soft in-band error message for a document, ready for the error
/// stream: tabs are normalized to double spaces.
pub(crate) fn soft_error_line(doc: &Document) -> Option<String> {
    doc.soft_error().map(|msg| msg.replace('\t', "  "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_on_a_terminal_is_color() {
        let renderer = select(OutputFormat::Auto, "monokai", 20, true);
        assert!(matches!(renderer, Renderer::Color(_)));
    }

    #[test]
    fn auto_on_a_pipe_is_newline() {
        let renderer = select(OutputFormat::Auto, "monokai", 20, false);
        assert!(matches!(renderer, Renderer::Newline(_)));
    }

    #[test]
    fn explicit_formats_ignore_tty() {
        for is_tty in [true, false] {
            assert!(matches!(
                select(OutputFormat::Color, "monokai", 20, is_tty),
                Renderer::Color(_)
            ));
            assert!(matches!(
                select(OutputFormat::Newline, "monokai", 20, is_tty),
                Renderer::Newline(_)
            ));
            assert!(matches!(
                select(OutputFormat::Array, "monokai", 20, is_tty),
                Renderer::Array(_)
            ));
        }
    }

    #[test]
    fn soft_error_line_expands_tabs() {
        let doc = Document::Object(vec![(
            rql_core::FIRST_ERROR_KEY.to_string(),
            Document::from("a\tb\tc"),
        )]);
        assert_eq!(soft_error_line(&doc).as_deref(), Some("a  b  c"));
        assert_eq!(soft_error_line(&Document::Null), None);
    }
}
