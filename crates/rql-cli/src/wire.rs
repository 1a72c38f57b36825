//! JSON wire ingestion.
//!
//! Results arrive as plain JSON with two pseudo-types layered on top:
//! timestamps (`{"$reql_type$":"TIME","epoch_time":…,"timezone":…}`) and
//! binary blobs (`{"$reql_type$":"BINARY","data":"<base64>"}`). This
//! module decodes them into the corresponding [`Document`] leaves and
//! adapts a byte stream of JSON values into a [`QuerySource`].
//!
//! The network client itself is out of scope; anything able to pipe JSON
//! documents can stand in for the database behind the [`QuerySource`]
//! seam.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};

use rql_core::{Document, Error, QueryResult, Result};

use crate::driver::QuerySource;

/// Key tagging a JSON object as a wire pseudo-type.
pub const REQL_TYPE_KEY: &str = "$reql_type$";

/// Decode one wire JSON value into a document.
///
/// Well-formed `TIME` and `BINARY` pseudo-type objects become the
/// dedicated leaves; a malformed pseudo-type falls back to its structural
/// reading rather than failing the whole document.
#[must_use]
pub fn decode_wire(value: Value) -> Document {
    match value {
        Value::Object(map) => {
            match map.get(REQL_TYPE_KEY).and_then(Value::as_str) {
                Some("TIME") => {
                    if let Some(t) = decode_time(&map) {
                        return Document::Time(t);
                    }
                    tracing::debug!("malformed TIME pseudo-type, keeping structural form");
                },
                Some("BINARY") => {
                    if let Some(bytes) = decode_binary(&map) {
                        return Document::Binary(bytes);
                    }
                    tracing::debug!("malformed BINARY pseudo-type, keeping structural form");
                },
                _ => {},
            }
            Document::Object(map.into_iter().map(|(k, v)| (k, decode_wire(v))).collect())
        },
        Value::Array(items) => Document::Array(items.into_iter().map(decode_wire).collect()),
        other => Document::from(other),
    }
}

fn decode_time(map: &Map<String, Value>) -> Option<DateTime<FixedOffset>> {
    let epoch = map.get("epoch_time")?.as_f64()?;
    let offset = map
        .get("timezone")
        .and_then(Value::as_str)
        .map_or_else(|| FixedOffset::east_opt(0), parse_offset)?;
    let millis = (epoch * 1000.0).round();
    if !millis.is_finite() {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let utc = DateTime::from_timestamp_millis(millis as i64)?;
    Some(utc.with_timezone(&offset))
}

fn parse_offset(tz: &str) -> Option<FixedOffset> {
    if tz == "Z" {
        return FixedOffset::east_opt(0);
    }
    let (sign, rest) = tz.split_at_checked(1)?;
    let (hours, minutes) = rest.split_once(':')?;
    let secs = hours.parse::<i32>().ok()? * 3600 + minutes.parse::<i32>().ok()? * 60;
    match sign {
        "+" => FixedOffset::east_opt(secs),
        "-" => FixedOffset::west_opt(secs),
        _ => None,
    }
}

fn decode_binary(map: &Map<String, Value>) -> Option<Vec<u8>> {
    let data = map.get("data")?.as_str()?;
    STANDARD.decode(data).ok()
}

/// A [`QuerySource`] over a stream of JSON documents.
///
/// An input holding exactly one JSON value is an atom; anything more is a
/// cursor, produced lazily so unbounded inputs never buffer.
pub struct DocumentStream {
    query: String,
    reader: Option<Box<dyn Read>>,
}

impl DocumentStream {
    /// Read documents from an arbitrary reader.
    pub fn new(query: impl Into<String>, reader: impl Read + 'static) -> Self {
        Self {
            query: query.into(),
            reader: Some(Box::new(reader)),
        }
    }

    /// Read documents from a file, or stdin when no path is given.
    pub fn open(query: impl Into<String>, input: Option<&Path>) -> Result<Self> {
        let reader: Box<dyn Read> = match input {
            Some(path) => Box::new(BufReader::new(File::open(path)?)),
            None => Box::new(io::stdin()),
        };
        Ok(Self {
            query: query.into(),
            reader: Some(reader),
        })
    }
}

impl QuerySource for DocumentStream {
    fn rendered(&self) -> &str {
        &self.query
    }

    fn run(&mut self) -> Result<QueryResult> {
        let reader = self
            .reader
            .take()
            .ok_or_else(|| Error::Driver("document stream already consumed".to_string()))?;
        let mut stream = serde_json::Deserializer::from_reader(reader).into_iter::<Value>();

        // Peek one value past the first to tell an atom from a cursor.
        let Some(first) = stream.next() else {
            return Ok(QueryResult::Cursor(Box::new(std::iter::empty())));
        };
        let first = convert(first)?;

        match stream.next() {
            None => Ok(QueryResult::Atom(first)),
            Some(second) => {
                let prefix = vec![Ok(first), convert(second)];
                Ok(QueryResult::Cursor(Box::new(
                    prefix.into_iter().chain(stream.map(convert)),
                )))
            },
        }
    }
}

fn convert(item: std::result::Result<Value, serde_json::Error>) -> Result<Document> {
    item.map(decode_wire)
        .map_err(|e| Error::Driver(format!("invalid JSON document: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stream(input: &str) -> DocumentStream {
        DocumentStream::new("r.table('t')", std::io::Cursor::new(input.to_string()))
    }

    #[test]
    fn time_pseudo_type_decodes_to_timestamp() {
        let value = json!({
            "$reql_type$": "TIME",
            "epoch_time": 1_376_075_362.662,
            "timezone": "-07:00"
        });
        let Document::Time(t) = decode_wire(value) else {
            unreachable!("expected a timestamp");
        };
        assert_eq!(t.timestamp_millis(), 1_376_075_362_662);
        assert_eq!(t.offset().local_minus_utc(), -7 * 3600);
    }

    #[test]
    fn binary_pseudo_type_decodes_to_bytes() {
        let value = json!({"$reql_type$": "BINARY", "data": "AAEC/w=="});
        assert_eq!(
            decode_wire(value),
            Document::Binary(vec![0x00, 0x01, 0x02, 0xff])
        );
    }

    #[test]
    fn malformed_pseudo_type_stays_structural() {
        let value = json!({"$reql_type$": "TIME", "epoch_time": "not a number"});
        let doc = decode_wire(value);
        assert!(matches!(doc, Document::Object(_)));
        assert!(doc.get("epoch_time").is_some());
    }

    #[test]
    fn pseudo_types_decode_inside_containers() {
        let value = json!([{"at": {"$reql_type$": "TIME", "epoch_time": 0.0, "timezone": "Z"}}]);
        let Document::Array(items) = decode_wire(value) else {
            unreachable!();
        };
        assert!(matches!(items[0].get("at"), Some(Document::Time(_))));
    }

    #[test]
    fn single_value_input_is_an_atom() {
        let result = stream(r#"{"id": 1}"#).run().unwrap();
        assert!(matches!(result, QueryResult::Atom(Document::Object(_))));
    }

    #[test]
    fn multi_value_input_is_a_cursor() {
        let result = stream("{\"id\":1}\n{\"id\":2}\n{\"id\":3}").run().unwrap();
        let QueryResult::Cursor(cursor) = result else {
            unreachable!("expected a cursor");
        };
        let docs: Vec<Document> = cursor.map(|d| d.unwrap()).collect();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[2].get("id"), Some(&Document::from(3i64)));
    }

    #[test]
    fn empty_input_is_an_empty_cursor() {
        let result = stream("").run().unwrap();
        let QueryResult::Cursor(cursor) = result else {
            unreachable!("expected a cursor");
        };
        assert_eq!(cursor.count(), 0);
    }

    #[test]
    fn invalid_json_surfaces_as_a_driver_fault() {
        let mut source = stream("{\"id\":1}\n{broken");
        let QueryResult::Cursor(mut cursor) = source.run().unwrap() else {
            unreachable!();
        };
        assert!(cursor.next().unwrap().is_ok());
        assert!(matches!(cursor.next(), Some(Err(Error::Driver(_)))));
    }

    #[test]
    fn a_stream_runs_at_most_once() {
        let mut source = stream("1");
        assert!(source.run().is_ok());
        assert!(source.run().is_err());
    }
}
