//! Terminal viewer for BibTeX bibliographies.
//!
//! `bibview` loads a `.bib` file and shows every entry as a row of a table, with one column
//! per field name found anywhere in the file. A second tab shows the fields of the selected
//! entry. Other files can be opened from a file picker without leaving the viewer; a file
//! that fails to load leaves the current one on screen.
//!
//! # Usage
//!
//! ```bash
//! # Open a file directly
//! bibview refs.bib
//!
//! # Start in the file picker
//! bibview
//! ```
//!
//! The viewer logs to a daily log file rather than the terminal. The file lives in
//! `--log-dir`, by default the `inspire/logs` folder of the platform data directory.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  path::{Path, PathBuf},
  process::ExitCode,
};

use clap::Parser;
use inspire::error::InspireError;
use tracing::{debug, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub mod error;
#[cfg(feature = "tui")] pub mod tui;

use crate::error::*;
#[cfg(test)] use {tempfile::tempdir, tracing_test::traced_test};

/// Name of the log file, suffixed with the date by the daily rotation.
const LOG_FILE: &str = "bibview.log";

/// Command line options
#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal viewer for BibTeX bibliographies")]
pub struct Cli {
  /// Bibliography to open. If not given, starts in the file picker.
  #[arg(value_name = "PATH")]
  path: Option<PathBuf>,

  /// Directory for the log file. If not specified, uses the platform data directory.
  #[arg(long, value_name = "DIR")]
  log_dir: Option<PathBuf>,
}

impl Cli {
  /// Directory the log file is written to.
  pub fn log_dir(&self) -> PathBuf {
    self.log_dir.clone().unwrap_or_else(|| {
      dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("inspire").join("logs")
    })
  }
}

/// Configures logging to a daily rotated file in `log_dir`.
///
/// Logs everything from debug upwards unless `RUST_LOG` says otherwise. The returned guard
/// flushes the file when dropped, so it must live until exit.
fn setup_logging(log_dir: &Path) -> Result<WorkerGuard> {
  std::fs::create_dir_all(log_dir)?;
  let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE);
  let (writer, guard) = tracing_appender::non_blocking(appender);

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(writer)
    .with_ansi(false)
    .with_target(true)
    .init();

  Ok(guard)
}

/// Shows the bibliography in the terminal.
#[cfg(feature = "tui")]
fn view(cli: &Cli) -> Result<()> { tui::run(cli.path.as_deref()) }

/// Prints the bibliography as tab separated values when built without the terminal interface.
#[cfg(not(feature = "tui"))]
fn view(cli: &Cli) -> Result<()> {
  use std::io::Write;

  let Some(path) = &cli.path else {
    return Err(BibviewError::Io(std::io::Error::new(
      std::io::ErrorKind::InvalidInput,
      "a PATH is required without the terminal interface",
    )));
  };
  let table = inspire::bibliography::open_and_load(path)?;
  let mut stdout = std::io::stdout().lock();
  writeln!(stdout, "{}", table.columns().join("\t"))?;
  for row in table.rows() {
    writeln!(stdout, "{}", row.join("\t"))?;
  }
  Ok(())
}

/// Entry point for the viewer.
fn main() -> ExitCode {
  let cli = Cli::parse();

  let log_dir = cli.log_dir();
  let _guard = match setup_logging(&log_dir) {
    Ok(guard) => guard,
    Err(e) => {
      eprintln!("Could not set up logging in {}: {}", log_dir.display(), e);
      return ExitCode::FAILURE;
    },
  };
  debug!("bibview called with the following options: {:?}", cli);

  match view(&cli) {
    Ok(()) => {
      info!("Successfully exited.");
      ExitCode::SUCCESS
    },
    Err(e) => {
      error!("bibview failed: {}", e);
      eprintln!("bibview failed: {e}");
      ExitCode::FAILURE
    },
  }
}
