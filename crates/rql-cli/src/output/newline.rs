//! Newline-delimited compact JSON output.
//!
//! One document per line, in iteration order, nothing else: no query
//! text, no totals, no pagination. The format of choice for piping into
//! line-oriented tools.

use std::io::Write;

use rql_core::{Document, QueryResult, Result, encode_compact};

use super::{RenderOutcome, soft_error_line};

/// The newline-delimited presentation strategy.
pub struct NewlineRenderer;

impl NewlineRenderer {
    pub(crate) fn render_to(
        &self,
        result: QueryResult,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<RenderOutcome> {
        match result {
            QueryResult::Atom(doc) => {
                if let Some(line) = soft_error_line(&doc) {
                    writeln!(err, "{line}")?;
                    return Ok(RenderOutcome::Completed);
                }
                match doc {
                    Document::Array(items) => {
                        for item in items {
                            writeln!(out, "{}", encode_compact(&item)?)?;
                        }
                    },
                    doc => writeln!(out, "{}", encode_compact(&doc)?)?,
                }
            },
            QueryResult::Cursor(cursor) => {
                for item in cursor {
                    writeln!(out, "{}", encode_compact(&item?)?)?;
                }
            },
        }
        out.flush()?;
        Ok(RenderOutcome::Completed)
    }
}
