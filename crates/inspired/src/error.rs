//! Errors raised by the `inspire` command.

use thiserror::Error;

use super::*;

/// Result alias for the command.
pub type Result<T> = core::result::Result<T, InspiredError>;

/// Everything that can make a retrieval fail.
#[derive(Error, Debug)]
pub enum InspiredError {
  /// Building the query, fetching or extracting failed.
  #[error(transparent)]
  Inspire(#[from] InspireError),

  /// Writing the results failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// The records could not be serialized.
  #[error(transparent)]
  Json(#[from] serde_json::Error),
}
