//! The document encoder.
//!
//! Turns one [`Document`] into JSON text, in either of two shapes:
//!
//! - **compact**: no inserted whitespace, mapping keys in insertion order,
//!   `,` and `:` separators. One document fits on one line, suitable for
//!   machine consumers.
//! - **pretty**: 4-space indentation, mapping keys sorted, separators
//!   padded for readability. Suitable for humans at a terminal.
//!
//! Two leaves do not map cleanly onto JSON. Timestamps serialize to an
//! ISO-8601 string in both modes. Binary blobs serialize to a quoted
//! base64 string; the encoder owns escaping for every string-like leaf in
//! the tree, so a blob containing NUL (or any other control byte) can
//! never corrupt the surrounding document structure.

use std::fmt::Write as _;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::SecondsFormat;

use crate::document::Document;
use crate::error::{Error, Result};

const INDENT: &str = "    ";

/// Encode a document, compactly or prettily.
///
/// Never fails for a well-formed document; a non-finite number is the only
/// reachable [`Error::Encode`].
pub fn encode(doc: &Document, compact: bool) -> Result<String> {
    let mut encoder = Encoder {
        out: String::new(),
        compact,
    };
    encoder.write_doc(doc, 0)?;
    Ok(encoder.out)
}

/// Encode with no inserted whitespace and insertion-order keys.
pub fn encode_compact(doc: &Document) -> Result<String> {
    encode(doc, true)
}

/// Encode with 4-space indentation and sorted keys.
pub fn encode_pretty(doc: &Document) -> Result<String> {
    encode(doc, false)
}

struct Encoder {
    out: String,
    compact: bool,
}

impl Encoder {
    fn write_doc(&mut self, doc: &Document, level: usize) -> Result<()> {
        match doc {
            Document::Null => self.out.push_str("null"),
            Document::Bool(true) => self.out.push_str("true"),
            Document::Bool(false) => self.out.push_str("false"),
            Document::Number(n) => {
                if n.as_f64().is_some_and(|f| !f.is_finite()) {
                    return Err(Error::Encode(format!("non-finite number: {n}")));
                }
                self.out.push_str(&n.to_string());
            },
            Document::String(s) => self.write_string(s),
            Document::Time(t) => {
                self.out.push('"');
                self.out
                    .push_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, false));
                self.out.push('"');
            },
            Document::Binary(bytes) => {
                self.out.push('"');
                self.out.push_str(&STANDARD.encode(bytes));
                self.out.push('"');
            },
            Document::Array(items) => self.write_array(items, level)?,
            Document::Object(entries) => self.write_object(entries, level)?,
        }
        Ok(())
    }

    fn write_array(&mut self, items: &[Document], level: usize) -> Result<()> {
        if items.is_empty() {
            self.out.push_str("[]");
            return Ok(());
        }
        self.out.push('[');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.break_line(level + 1);
            self.write_doc(item, level + 1)?;
        }
        self.break_line(level);
        self.out.push(']');
        Ok(())
    }

    fn write_object(&mut self, entries: &[(String, Document)], level: usize) -> Result<()> {
        if entries.is_empty() {
            self.out.push_str("{}");
            return Ok(());
        }

        // Compact keeps wire order; pretty sorts for stable human output.
        let mut ordered: Vec<&(String, Document)> = entries.iter().collect();
        if !self.compact {
            ordered.sort_by(|a, b| a.0.cmp(&b.0));
        }

        self.out.push('{');
        for (i, (key, value)) in ordered.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.break_line(level + 1);
            self.write_string(key);
            self.out.push(':');
            if !self.compact {
                self.out.push(' ');
            }
            self.write_doc(value, level + 1)?;
        }
        self.break_line(level);
        self.out.push('}');
        Ok(())
    }

    fn break_line(&mut self, level: usize) {
        if !self.compact {
            self.out.push('\n');
            for _ in 0..level {
                self.out.push_str(INDENT);
            }
        }
    }

    fn write_string(&mut self, s: &str) {
        self.out.push('"');
        for c in s.chars() {
            match c {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\t' => self.out.push_str("\\t"),
                '\u{8}' => self.out.push_str("\\b"),
                '\u{c}' => self.out.push_str("\\f"),
                c if (c as u32) < 0x20 => {
                    let _ = write!(self.out, "\\u{:04x}", c as u32);
                },
                c => self.out.push(c),
            }
        }
        self.out.push('"');
    }
}
