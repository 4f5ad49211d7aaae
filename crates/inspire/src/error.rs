//! Error types for the inspire library.
//!
//! One error type covers both halves of the library:
//! - Querying INSPIRE (URL construction, HTTP retrieval, page scraping)
//! - Loading bibliography files (file access, BibTeX parsing)
//! - Reading configuration
//!
//! # Examples
//!
//! ```no_run
//! use inspire::{error::InspireError, extract};
//!
//! let page = b"<div class=\"record_body\"></div>";
//! match extract::extract_text(page) {
//!   Err(InspireError::StructuralMismatch { bodies, infos }) =>
//!     println!("page layout changed: {bodies} bodies vs {infos} info blocks"),
//!   Err(e) => println!("Other error: {e}"),
//!   Ok(text) => println!("{text}"),
//! }
//! ```

use thiserror::Error;

/// Error type alias used for the [`inspire`](crate) crate.
pub type Result<T> = core::result::Result<T, InspireError>;

/// Errors that can occur when working with the inspire library.
///
/// None of these are retried anywhere in the library; they are logged where
/// they arise and handed back to the caller.
#[derive(Error, Debug)]
pub enum InspireError {
  /// The HTTP request to the search endpoint failed.
  ///
  /// This covers an unreachable network, a timed out request and any
  /// response with a non-2xx status code.
  #[error("failed to retrieve search results: {0}")]
  Fetch(#[from] reqwest::Error),

  /// The result page did not have one "more info" block per record body.
  ///
  /// Records are paired positionally, so unequal counts mean the page layout
  /// is not the one this library understands.
  #[error("number of records is inconsistent: {bodies} record bodies but {infos} info blocks")]
  StructuralMismatch {
    /// Number of `div.record_body` containers found.
    bodies: usize,
    /// Number of `div.moreinfo` containers found.
    infos:  usize,
  },

  /// A bibliography file could not be parsed.
  #[error("failed to parse bibliography: {0}")]
  Parse(String),

  /// The search URL could not be constructed.
  #[error("failed to encode search URL: {0}")]
  Encoding(String),

  /// A file system operation failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// The configuration file is not valid TOML for [`Config`](crate::config::Config).
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// A configuration value is unusable.
  #[error("{0}")]
  Config(String),
}

impl From<url::ParseError> for InspireError {
  fn from(e: url::ParseError) -> Self { Self::Encoding(e.to_string()) }
}
