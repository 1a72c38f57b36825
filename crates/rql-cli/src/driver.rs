//! The execution driver.
//!
//! Thin by design: it exists to pin down the contract between rendering
//! and the excluded query-evaluation collaborator. A [`QuerySource`]
//! yields one [`QueryResult`] and a displayable form of the query; the
//! driver runs it, hands the result to the selected renderer, and tags
//! faults with the right exit category on the way out.

use anyhow::Result;
use rql_core::QueryResult;

use crate::error::CliError;
use crate::output::{RenderOutcome, Renderer};

/// An opaque, runnable query.
///
/// The renderer never introspects the query's structure; it only needs
/// the textual form for display and the result of running it.
pub trait QuerySource {
    /// The displayable textual form of the query.
    fn rendered(&self) -> &str;

    /// Run the query, yielding a single document or a cursor.
    ///
    /// Single-pass: a source is run at most once.
    fn run(&mut self) -> rql_core::Result<QueryResult>;
}

/// Run a query and render its result with the selected strategy.
pub fn execute(source: &mut dyn QuerySource, renderer: &mut Renderer) -> Result<RenderOutcome> {
    let result = source.run().map_err(CliError::query)?;
    let outcome = renderer.render(result, source.rendered())?;
    Ok(outcome)
}
