//! Command line retrieval of INSPIRE HEP database results.
//!
//! `inspire` sends a search to the INSPIRE HEP database and prints the useful part of the
//! result page. By default records are printed as plain text; citation formats print the
//! formatted entries directly.
//!
//! # Usage
//!
//! ```bash
//! # Plain text listing
//! inspire -s "find a Feynman, Richard"
//!
//! # BibTeX, ready to paste into a .bib file
//! inspire -b -s "find a Feynman, Richard" >> refs.bib
//!
//! # LaTeX \bibitem entries in European or US style
//! inspire --latexEU -s "find t higgs boson"
//!
//! # Title, authors and citation counts, as JSON
//! inspire --details --json -s "find a Higgs, P"
//! ```
//!
//! When several format flags are given the last one wins. Nothing is printed to standard
//! output on failure; the error is logged to standard error and the exit code is 1.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  io::{self, Write},
  path::PathBuf,
  process::ExitCode,
};

use clap::Parser;
use inspire::prelude::{Config, Inspire, InspireError, RecordDetail, ResultFormat, SearchQuery};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

pub mod error;
pub mod output;

use crate::error::*;

/// Command line options
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "Command line retrieval of INSPIRE HEP database results",
  after_help = "Example: inspire -b -s \"find a Feynman, Richard\"",
  args_override_self = true
)]
pub struct Cli {
  /// Search string to send to INSPIRE
  #[arg(short, long, value_name = "STRING", default_value = "")]
  search: String,

  /// Output BibTeX entries
  #[arg(short, long, overrides_with_all = ["latex_eu", "latex_us", "marcxml"])]
  bibtex: bool,

  /// Output LaTeX \bibitem entries in European style
  #[arg(long = "latexEU", overrides_with_all = ["bibtex", "latex_us", "marcxml"])]
  latex_eu: bool,

  /// Output LaTeX \bibitem entries in US style
  #[arg(long = "latexUS", overrides_with_all = ["bibtex", "latex_eu", "marcxml"])]
  latex_us: bool,

  /// Output MARCXML records
  #[arg(long, overrides_with_all = ["bibtex", "latex_eu", "latex_us"])]
  marcxml: bool,

  /// Print title, authors and citation count of each record instead of the page text
  #[arg(long, conflicts_with_all = ["bibtex", "latex_eu", "latex_us", "marcxml"])]
  details: bool,

  /// Print details as JSON
  #[arg(long, requires = "details")]
  json: bool,

  /// Offset of the first record to retrieve
  #[arg(long, value_name = "N", default_value_t = 0)]
  start: u32,

  /// Search endpoint, overriding the configuration file
  #[arg(long, value_name = "URL")]
  endpoint: Option<String>,

  /// Request timeout in seconds, overriding the configuration file
  #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
  timeout: Option<u64>,

  /// Configuration file. If not specified, uses the platform configuration directory.
  #[arg(short, long, value_name = "PATH")]
  config: Option<PathBuf>,

  /// Print information about the search
  #[arg(short, long, overrides_with = "debug")]
  verbose: bool,

  /// Print debugging information
  #[arg(long, overrides_with = "verbose")]
  debug: bool,
}

/// How much is logged to standard error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
  /// Only failures
  #[default]
  ErrorOnly,
  /// Progress of the search
  Info,
  /// Queries, URLs and intermediate counts
  Debug,
}

impl Verbosity {
  /// The tracing filter directive for this level.
  fn directive(&self) -> &'static str {
    match self {
      Verbosity::ErrorOnly => "error",
      Verbosity::Info => "info",
      Verbosity::Debug => "debug",
    }
  }
}

impl Cli {
  /// The requested output format, brief when no format flag was given.
  pub fn format(&self) -> ResultFormat {
    if self.bibtex {
      ResultFormat::Bibtex
    } else if self.latex_eu {
      ResultFormat::LatexEu
    } else if self.latex_us {
      ResultFormat::LatexUs
    } else if self.marcxml {
      ResultFormat::Marcxml
    } else {
      ResultFormat::Brief
    }
  }

  /// The requested logging level.
  pub fn verbosity(&self) -> Verbosity {
    match (self.verbose, self.debug) {
      (_, true) => Verbosity::Debug,
      (true, false) => Verbosity::Info,
      (false, false) => Verbosity::ErrorOnly,
    }
  }

  /// The query described by the options.
  pub fn query(&self) -> SearchQuery {
    SearchQuery::new(self.search.as_str())
      .with_format(self.format())
      .with_start_record(self.start)
  }

  /// The configuration file, with command line overrides applied.
  pub fn config(&self) -> inspire::error::Result<Config> {
    let path = self.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(path)?;
    if let Some(endpoint) = &self.endpoint {
      config = config.with_endpoint(endpoint.as_str());
    }
    if let Some(timeout) = self.timeout {
      config = config.with_timeout_secs(timeout);
    }
    config.validated()
  }
}

/// Configures logging to standard error at the given verbosity.
///
/// `RUST_LOG` takes precedence when set. Standard output is left for results only.
fn setup_logging(verbosity: Verbosity) {
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .with_target(verbosity == Verbosity::Debug)
    .init();
}

/// Runs the search and renders what should be printed.
async fn run(cli: &Cli) -> Result<String> {
  let inspire = Inspire::new(cli.config()?)?;
  let query = cli.query();

  if cli.details {
    let records = inspire.search_details(&query).await?;
    debug!("Found {} records", records.len());
    return if cli.json { output::details_json(&records) } else { Ok(output::details_text(&records)) };
  }

  Ok(inspire.search_text(&query).await?)
}

/// Entry point for the `inspire` command.
///
/// Exits with 0 after printing the results, or 1 after logging the error.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
  let cli = Cli::parse();
  setup_logging(cli.verbosity());
  debug!("inspire called with the following options: {:?}", cli);

  let printed = match run(&cli).await {
    Ok(text) => writeln!(io::stdout().lock(), "{text}").map_err(InspiredError::from),
    Err(e) => Err(e),
  };

  match printed {
    Ok(()) => {
      debug!("Successfully exited.");
      ExitCode::SUCCESS
    },
    Err(e) => {
      error!("Error during retrieval of results: {}", e);
      ExitCode::FAILURE
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn try_parse(args: &[&str]) -> clap::error::Result<Cli> {
    Cli::try_parse_from(std::iter::once("inspire").chain(args.iter().copied()))
  }

  fn parse(args: &[&str]) -> Cli { try_parse(args).unwrap() }

  #[test]
  fn test_defaults() {
    let cli = parse(&[]);
    assert_eq!(cli.search, "");
    assert_eq!(cli.format(), ResultFormat::Brief);
    assert_eq!(cli.verbosity(), Verbosity::ErrorOnly);
    assert_eq!(cli.query().start_record(), 0);
  }

  #[test]
  fn test_last_format_wins() {
    assert_eq!(parse(&["-b"]).format(), ResultFormat::Bibtex);
    assert_eq!(parse(&["--latexEU", "-b"]).format(), ResultFormat::Bibtex);
    assert_eq!(parse(&["-b", "--latexUS"]).format(), ResultFormat::LatexUs);
    assert_eq!(parse(&["--marcxml", "--latexEU"]).format(), ResultFormat::LatexEu);
    assert_eq!(parse(&["-b", "--latexUS", "--marcxml"]).format(), ResultFormat::Marcxml);
    assert_eq!(parse(&["-b", "-b"]).format(), ResultFormat::Bibtex);
  }

  #[test]
  fn test_last_verbosity_wins() {
    assert_eq!(parse(&["-v"]).verbosity(), Verbosity::Info);
    assert_eq!(parse(&["--debug"]).verbosity(), Verbosity::Debug);
    assert_eq!(parse(&["--debug", "-v"]).verbosity(), Verbosity::Info);
    assert_eq!(parse(&["-v", "--debug"]).verbosity(), Verbosity::Debug);
  }

  #[test]
  fn test_query() {
    let query = parse(&["-s", "find a Feynman, Richard", "--latexEU", "--start", "200"]).query();
    assert_eq!(query.search(), "find a Feynman, Richard");
    assert_eq!(query.format(), ResultFormat::LatexEu);
    assert_eq!(query.start_record(), 200);
  }

  #[test]
  fn test_invalid_combinations() {
    assert!(try_parse(&["--json"]).is_err());
    assert!(try_parse(&["--details", "-b"]).is_err());
    assert!(try_parse(&["--timeout", "0"]).is_err());
    assert!(try_parse(&["--start", "-1"]).is_err());
    assert!(try_parse(&["--details", "--json"]).is_ok());
  }

  #[test]
  fn test_config_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "endpoint = \"http://example.org/search\"\ntimeout_secs = 9\n").unwrap();
    let path = path.to_str().unwrap();

    let config = parse(&["-c", path]).config().unwrap();
    assert_eq!(config.endpoint, "http://example.org/search");
    assert_eq!(config.timeout_secs, 9);

    let config = parse(&["-c", path, "--endpoint", "http://localhost/search", "--timeout", "2"])
      .config()
      .unwrap();
    assert_eq!(config.endpoint, "http://localhost/search");
    assert_eq!(config.timeout_secs, 2);
  }
}
