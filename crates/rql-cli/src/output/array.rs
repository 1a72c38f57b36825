//! Streaming JSON array output.
//!
//! The strict machine format: a sequence renders as one JSON array,
//! flushed after every write so an incremental consumer always holds
//! valid-so-far JSON. The closing bracket is owed from the moment the
//! opening one is written; a fault mid-iteration still gets it emitted
//! before propagating, so a truncated-but-ungrammatical array is never
//! left on the wire.
//!
//! A single non-sequence result is deliberately not wrapped in brackets;
//! only sequences are arrays.

use std::io::Write;

use rql_core::{Document, QueryResult, Result, encode_compact};

use super::{RenderOutcome, soft_error_line};

/// The JSON-array presentation strategy.
pub struct ArrayRenderer;

impl ArrayRenderer {
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
                writeln!(out, "{}", encode_compact(&doc)?)?;
                out.flush()?;
                Ok(RenderOutcome::Completed)
            },
            QueryResult::Cursor(cursor) => {
                write!(out, "[")?;
                out.flush()?;

                let mut first = true;
                let mut failure = None;
                for item in cursor {
                    match item.and_then(|doc| encode_compact(&doc)) {
                        Ok(text) => {
                            if !first {
                                write!(out, ",")?;
                            }
                            first = false;
                            write!(out, "{text}")?;
                            out.flush()?;
                        },
                        Err(e) => {
                            failure = Some(e);
                            break;
                        },
                    }
                }

                // The closing bracket is emitted even on a fault.
                writeln!(out, "]")?;
                out.flush()?;

                match failure {
                    Some(e) => Err(e),
                    None => Ok(RenderOutcome::Completed),
                }
            },
        }
    }
}
