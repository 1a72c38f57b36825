//! Core library for `rql` - the ReQL result renderer.
//!
//! This crate holds the pieces of the renderer that have nothing to do with
//! a terminal: the [`Document`] data model for values coming back from a
//! query, the [`QueryResult`] atom/cursor split, and the JSON encoder that
//! turns documents into compact or pretty text while handling the two
//! non-JSON-native leaves (timestamps and raw binary).
//!
//! The CLI crate (`rql-cli`) layers presentation on top: strategy
//! selection, syntax highlighting, pagination, and the execution driver.

pub mod document;
pub mod encode;
pub mod error;
pub mod result;

pub use document::{Document, FIRST_ERROR_KEY};
pub use encode::{encode, encode_compact, encode_pretty};
pub use error::{Error, Result};
pub use result::{DocumentCursor, QueryResult};
