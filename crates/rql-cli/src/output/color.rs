//! Interactive colorized output with pagination.
//!
//! This is the strategy humans see at a terminal. Small results print
//! directly; anything larger streams one pretty-printed document at a
//! time, pausing for a keystroke every page. The query text is echoed
//! back (highlighted) so a scrolled-away prompt still shows what ran.

use std::io::Write;

use rql_core::{Document, QueryResult, Result, encode_compact, encode_pretty};

use super::highlight::Theme;
use super::pager::{KeySource, TerminalKeys};
use super::{RenderOutcome, soft_error_line};

/// The interactive presentation strategy.
pub struct ColorRenderer {
    theme: Theme,
    page_size: usize,
    keys: Box<dyn KeySource>,
}

impl ColorRenderer {
    /// Create a renderer that reads pagination keys from the terminal.
    #[must_use]
    pub fn new(theme: Theme, page_size: usize) -> Self {
        Self::with_keys(theme, page_size, Box::new(TerminalKeys))
    }

    /// Create a renderer with an explicit key source.
    #[must_use]
    pub fn with_keys(theme: Theme, page_size: usize, keys: Box<dyn KeySource>) -> Self {
        Self {
            theme,
            page_size,
            keys,
        }
    }

    pub(crate) fn render_to(
        &mut self,
        result: QueryResult,
        query: &str,
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
                        let small = items.len() < self.page_size
                            && items.iter().all(Document::is_primitive);
                        if small {
                            self.print_direct(&Document::Array(items), true, query, out)
                        } else {
                            self.paginate(items.into_iter().map(Ok), query, out)
                        }
                    },
                    doc => self.print_direct(&doc, false, query, out),
                }
            },
            QueryResult::Cursor(mut cursor) => {
                // Materialize at most one page to decide whether the
                // small-array fast path applies; a stream that keeps going
                // past that falls through to pagination with the prefix
                // replayed in order.
                let mut buffered: Vec<Result<Document>> = Vec::new();
                let mut drained = false;
                while buffered.len() < self.page_size {
                    match cursor.next() {
                        Some(item) => {
                            let faulted = item.is_err();
                            buffered.push(item);
                            if faulted {
                                break;
                            }
                        },
                        None => {
                            drained = true;
                            break;
                        },
                    }
                }

                let small = drained
                    && !buffered.is_empty()
                    && buffered
                        .iter()
                        .all(|item| item.as_ref().is_ok_and(Document::is_primitive));
                if small {
                    let items: Vec<Document> =
                        buffered.into_iter().filter_map(std::result::Result::ok).collect();
                    self.print_direct(&Document::Array(items), true, query, out)
                } else {
                    self.paginate(buffered.into_iter().chain(cursor), query, out)
                }
            },
        }
    }

    /// Print a small result in full, then the query that produced it.
    ///
    /// Small arrays of primitives use the compact form; everything else
    /// gets the non-compact encoding.
    fn print_direct(
        &self,
        doc: &Document,
        compact: bool,
        query: &str,
        out: &mut dyn Write,
    ) -> Result<RenderOutcome> {
        let text = if compact {
            encode_compact(doc)?
        } else {
            encode_pretty(doc)?
        };
        writeln!(out, "{}", self.theme.highlight_json(&text))?;
        self.write_ran(query, out)?;
        Ok(RenderOutcome::Completed)
    }

    fn paginate(
        &mut self,
        docs: impl Iterator<Item = Result<Document>>,
        query: &str,
        out: &mut dyn Write,
    ) -> Result<RenderOutcome> {
        let mut count = 0usize;
        for item in docs {
            let doc = item?;
            count += 1;
            writeln!(out, "{}", self.theme.highlight_json(&encode_pretty(&doc)?))?;
            if count % self.page_size == 0 {
                writeln!(out, "Running: {}", self.theme.highlight_query(query))?;
                writeln!(out, "[{count}] Hit any key to continue (or q to quit)...")?;
                out.flush()?;
                let key = self.keys.read_key()?;
                if matches!(key, 'q' | 'Q' | '\u{3}') {
                    return Ok(RenderOutcome::Quit);
                }
            }
        }
        writeln!(out, "Total docs: {count}")?;
        self.write_ran(query, out)?;
        Ok(RenderOutcome::Completed)
    }

    fn write_ran(&self, query: &str, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Ran:\n{}", self.theme.highlight_query(query))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::output::pager::ScriptedKeys;
    use rql_core::{Error, FIRST_ERROR_KEY};

    const QUERY: &str = "r.table('users')";

    fn renderer(page_size: usize, keys: impl IntoIterator<Item = char>) -> ColorRenderer {
        colored::control::set_override(false);
        ColorRenderer::with_keys(
            Theme::named("monokai"),
            page_size,
            Box::new(ScriptedKeys::new(keys)),
        )
    }

    fn run(
        renderer: &mut ColorRenderer,
        result: QueryResult,
    ) -> (Result<RenderOutcome>, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let outcome = renderer.render_to(result, QUERY, &mut out, &mut err);
        (
            outcome,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    fn numbers(n: usize) -> Vec<Document> {
        (1..=n as i64).map(Document::from).collect()
    }

    fn mappings(n: usize) -> Vec<Document> {
        (1..=n as i64)
            .map(|i| Document::Object(vec![("id".to_string(), Document::from(i))]))
            .collect()
    }

    #[test]
    fn small_primitive_array_prints_compact_and_skips_pager() {
        // An empty key script errors if the pager is ever consulted.
        let mut r = renderer(5, []);
        let (outcome, out, err) = run(&mut r, QueryResult::cursor_from(numbers(4)));

        assert_eq!(outcome.unwrap(), RenderOutcome::Completed);
        assert!(out.contains("[1,2,3,4]"), "expected compact array in {out:?}");
        assert!(out.contains("Ran:\n"));
        assert!(!out.contains("Total docs"));
        assert!(err.is_empty());
    }

    #[test]
    fn small_array_atom_takes_the_same_path() {
        let mut r = renderer(5, []);
        let (outcome, out, _) = run(&mut r, QueryResult::atom(numbers(4)));
        assert_eq!(outcome.unwrap(), RenderOutcome::Completed);
        assert!(out.contains("[1,2,3,4]"));
    }

    #[test]
    fn array_of_mappings_is_never_small() {
        let mut r = renderer(5, []);
        let (outcome, out, _) = run(&mut r, QueryResult::atom(mappings(2)));
        assert_eq!(outcome.unwrap(), RenderOutcome::Completed);
        assert!(out.contains("Total docs: 2"));
        assert!(!out.contains("Hit any key"));
    }

    #[test]
    fn atom_mapping_prints_pretty_with_query() {
        let mut r = renderer(5, []);
        let doc = Document::Object(vec![("name".to_string(), Document::from("sam"))]);
        let (outcome, out, _) = run(&mut r, QueryResult::Atom(doc));

        assert_eq!(outcome.unwrap(), RenderOutcome::Completed);
        assert!(out.contains("{\n    \"name\": \"sam\"\n}"));
        assert!(out.contains(&format!("Ran:\n{QUERY}")));
    }

    #[test]
    fn pauses_exactly_twice_for_two_pages() {
        let mut r = renderer(5, [' ', 'x']);
        let (outcome, out, _) = run(&mut r, QueryResult::cursor_from(numbers(10)));

        assert_eq!(outcome.unwrap(), RenderOutcome::Completed);
        assert!(out.contains("[5] Hit any key to continue (or q to quit)..."));
        assert!(out.contains("[10] Hit any key to continue (or q to quit)..."));
        assert!(out.contains("Total docs: 10"));
    }

    #[test]
    fn quit_at_first_pause_stops_without_totals() {
        let mut r = renderer(5, ['q']);
        let (outcome, out, _) = run(&mut r, QueryResult::cursor_from(numbers(10)));

        assert_eq!(outcome.unwrap(), RenderOutcome::Quit);
        assert!(out.contains("[5] Hit any key"));
        assert!(!out.contains("6"), "no document past the first page: {out:?}");
        assert!(!out.contains("Total docs"));
    }

    #[test]
    fn uppercase_q_and_ctrl_c_also_quit() {
        for key in ['Q', '\u{3}'] {
            let mut r = renderer(5, [key]);
            let (outcome, _, _) = run(&mut r, QueryResult::cursor_from(numbers(10)));
            assert_eq!(outcome.unwrap(), RenderOutcome::Quit);
        }
    }

    #[test]
    fn empty_cursor_reports_zero_docs() {
        let mut r = renderer(5, []);
        let (outcome, out, _) = run(&mut r, QueryResult::cursor_from(vec![]));

        assert_eq!(outcome.unwrap(), RenderOutcome::Completed);
        assert!(out.contains("Total docs: 0"));
    }

    #[test]
    fn exactly_page_size_primitives_paginates() {
        // Length equal to the page size misses the "below PageSize" test.
        let mut r = renderer(5, [' ']);
        let (outcome, out, _) = run(&mut r, QueryResult::cursor_from(numbers(5)));

        assert_eq!(outcome.unwrap(), RenderOutcome::Completed);
        assert!(out.contains("[5] Hit any key"));
        assert!(out.contains("Total docs: 5"));
    }

    #[test]
    fn buffered_prefix_replays_in_order_before_live_tail() {
        let mut r = renderer(3, [' ', ' ']);
        let (outcome, out, _) = run(&mut r, QueryResult::cursor_from(mappings(7)));

        assert_eq!(outcome.unwrap(), RenderOutcome::Completed);
        let positions: Vec<usize> = (1..=7)
            .map(|i| out.find(&format!("\"id\": {i}")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(out.contains("Total docs: 7"));
    }

    #[test]
    fn soft_error_goes_to_stderr_only() {
        let mut r = renderer(5, []);
        let doc = Document::Object(vec![(
            FIRST_ERROR_KEY.to_string(),
            Document::from("boom\there"),
        )]);
        let (outcome, out, err) = run(&mut r, QueryResult::Atom(doc));

        assert_eq!(outcome.unwrap(), RenderOutcome::Completed);
        assert!(out.is_empty());
        assert_eq!(err, "boom  here\n");
    }

    #[test]
    fn cursor_fault_propagates_after_printed_docs() {
        let items: Vec<Result<Document>> = vec![
            Ok(Document::from(1i64)),
            Err(Error::Driver("connection dropped".to_string())),
        ];
        let mut r = renderer(5, []);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let outcome = r.render_to(
            QueryResult::Cursor(Box::new(items.into_iter())),
            QUERY,
            &mut out,
            &mut err,
        );

        assert!(outcome.is_err());
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains('1'));
        assert!(!out.contains("Total docs"));
    }
}
