//! Command line retrieval of INSPIRE HEP database results, and BibTeX loading.
//!
//! `inspire` provides the library half of two small tools:
//!
//! - Querying the INSPIRE search endpoint and turning the result pages into plain text,
//!   BibTeX, LaTeX or MARCXML output
//! - Scraping title, authors and citation counts out of brief-format result pages
//! - Loading a BibTeX file into a table with one column per field name
//!
//! # Getting Started
//!
//! ```no_run
//! use inspire::{query::ResultFormat, Config, Inspire, SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let inspire = Inspire::new(Config::load(Config::default_path())?)?;
//!
//!   // BibTeX for everything Feynman wrote
//!   let query = SearchQuery::new("find a Feynman, Richard").with_format(ResultFormat::Bibtex);
//!   println!("{}", inspire.search_text(&query).await?);
//!
//!   // Most cited records first
//!   let mut records = inspire.search_details(&SearchQuery::new("find t higgs")).await?;
//!   records.sort_by(|a, b| b.citations.cmp(&a.citations));
//!
//!   // A local bibliography as a table
//!   let table = inspire::bibliography::open_and_load("refs.bib")?;
//!   println!("{} entries, {} fields", table.row_count(), table.column_count());
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`query`]: Search queries and URL construction
//! - [`fetch`]: HTTP retrieval with a bounded timeout
//! - [`extract`]: Text and record extraction from result pages
//! - [`bibliography`]: BibTeX loading and the table model
//! - [`config`]: Endpoint and client settings
//! - [`error`]: The library error type

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::path::Path;

#[cfg(test)]
use {tempfile::tempdir, tracing_test::traced_test};

pub mod bibliography;
pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod query;

pub use crate::{
  client::Inspire,
  config::Config,
  extract::RecordDetail,
  fetch::Fetcher,
  query::{ResultFormat, SearchQuery},
};
use crate::error::*;

/// Common traits and types for ergonomic imports.
pub mod prelude {
  pub use crate::{
    bibliography::{BibEntry, DisplayTable},
    error::{InspireError, Result},
    Config, Inspire, RecordDetail, ResultFormat, SearchQuery,
  };
}
