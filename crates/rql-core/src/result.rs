//! The result of running a query: one document, or a cursor over many.

use std::fmt;

use crate::document::Document;
use crate::error::Result;

/// A forward-only, single-pass, lazily-produced stream of documents.
///
/// Length is unknown in advance. Faults raised by the driver mid-iteration
/// surface as `Err` items; once iterated the cursor cannot be restarted.
pub type DocumentCursor = Box<dyn Iterator<Item = Result<Document>>>;

/// Either exactly one document or a cursor, never both.
pub enum QueryResult {
    /// A single complete document.
    Atom(Document),
    /// A lazily-produced, size-unbounded sequence of documents.
    Cursor(DocumentCursor),
}

impl QueryResult {
    /// Wrap a single document.
    pub fn atom(doc: impl Into<Document>) -> Self {
        Self::Atom(doc.into())
    }

    /// Wrap a stream of already-materialized documents as a cursor.
    ///
    /// Mostly useful in tests; real cursors come from the driver.
    pub fn cursor_from<I>(docs: I) -> Self
    where
        I: IntoIterator<Item = Document>,
        I::IntoIter: 'static,
    {
        Self::Cursor(Box::new(docs.into_iter().map(Ok)))
    }
}

impl fmt::Debug for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(doc) => f.debug_tuple("Atom").field(doc).finish(),
            Self::Cursor(_) => f.write_str("Cursor(..)"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn cursor_from_yields_in_order() {
        let result = QueryResult::cursor_from(vec![Document::from(1i64), Document::from(2i64)]);
        let QueryResult::Cursor(cursor) = result else {
            unreachable!("cursor_from must build a cursor");
        };
        let docs: Vec<Document> = cursor.map(|d| d.unwrap()).collect();
        assert_eq!(docs, vec![Document::from(1i64), Document::from(2i64)]);
    }

    #[test]
    fn debug_does_not_consume_cursor() {
        let result = QueryResult::cursor_from(vec![Document::Null]);
        assert_eq!(format!("{result:?}"), "Cursor(..)");
        let QueryResult::Cursor(cursor) = result else {
            unreachable!();
        };
        assert_eq!(cursor.count(), 1);
    }
}
