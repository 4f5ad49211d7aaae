//! Errors raised by the viewer.

use thiserror::Error;

use super::*;

/// Result alias for the viewer.
pub type Result<T> = core::result::Result<T, BibviewError>;

/// Failures while setting up the terminal or browsing for files.
#[derive(Error, Debug)]
pub enum BibviewError {
  /// Loading a bibliography failed.
  #[error(transparent)]
  Inspire(#[from] InspireError),

  /// Terminal, directory or log file I/O failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// A directory name produced an invalid file pattern.
  #[error(transparent)]
  Pattern(#[from] glob::PatternError),

  /// A matched path could not be read.
  #[error(transparent)]
  Glob(#[from] glob::GlobError),
}
