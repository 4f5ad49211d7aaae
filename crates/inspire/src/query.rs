//! Search queries against the INSPIRE search endpoint.
//!
//! A [`SearchQuery`] bundles everything the endpoint needs to know: the search
//! string in INSPIRE syntax, the output format and the record to start at.
//! It is built once, turned into a URL once and then dropped.
//!
//! # Examples
//!
//! ```
//! use inspire::query::{ResultFormat, SearchQuery};
//!
//! let query = SearchQuery::new("find a Feynman, Richard").with_format(ResultFormat::Bibtex);
//! let url = query.url("https://inspirehep.net/search").unwrap();
//! assert!(url.as_str().contains("of=hx"));
//! ```

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use url::Url;

use super::*;

/// The search endpoint queried when no other is configured.
pub const DEFAULT_ENDPOINT: &str = "https://inspirehep.net/search";

/// Output formats the search endpoint can render results in.
///
/// Everything except [`ResultFormat::Brief`] comes back wrapped in `<pre>`
/// blocks; the brief format is an HTML listing that has to be scraped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultFormat {
  /// Human readable HTML listing.
  #[default]
  #[serde(rename = "brief")]
  Brief,
  /// BibTeX entries.
  #[serde(rename = "bibtex")]
  Bibtex,
  /// LaTeX `\bibitem`s, European citation style.
  #[serde(rename = "latexEU")]
  LatexEu,
  /// LaTeX `\bibitem`s, US citation style.
  #[serde(rename = "latexUS")]
  LatexUs,
  /// MARCXML records.
  #[serde(rename = "marcxml")]
  Marcxml,
}

impl ResultFormat {
  /// Every format, in the order they are documented.
  pub const ALL: [ResultFormat; 5] =
    [Self::Brief, Self::Bibtex, Self::LatexEu, Self::LatexUs, Self::Marcxml];

  /// The value of the `of` parameter selecting this format.
  pub fn code(&self) -> &'static str {
    match self {
      Self::Brief => "hb",
      Self::Bibtex => "hx",
      Self::LatexEu => "hlxe",
      Self::LatexUs => "hlxu",
      Self::Marcxml => "xm",
    }
  }

  /// The long-hand name of this format, e.g. `latexEU`.
  pub fn name(&self) -> &'static str {
    match self {
      Self::Brief => "brief",
      Self::Bibtex => "bibtex",
      Self::LatexEu => "latexEU",
      Self::LatexUs => "latexUS",
      Self::Marcxml => "marcxml",
    }
  }
}

impl Display for ResultFormat {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.name()) }
}

impl FromStr for ResultFormat {
  type Err = InspireError;

  fn from_str(s: &str) -> Result<Self> {
    Self::ALL
      .into_iter()
      .find(|format| format.name().eq_ignore_ascii_case(s))
      .ok_or_else(|| InspireError::Config(format!("unknown result format \"{s}\"")))
  }
}

/// A single search against the INSPIRE database.
///
/// Construct with [`SearchQuery::new`] and adjust with the `with_*` methods,
/// each of which consumes and returns the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
  /// Search string in INSPIRE syntax. An empty string is sent as-is.
  search:       String,
  /// Requested output format.
  format:       ResultFormat,
  /// Record number to start from.
  start_record: u32,
}

impl SearchQuery {
  /// Number of records requested per page. The endpoint is always asked for this many.
  pub const PAGE_SIZE: u32 = 100;
  /// Interface language requested from the endpoint.
  pub const LANGUAGE: &'static str = "en";

  /// Creates a brief-format query starting at the first record.
  pub fn new(search: impl Into<String>) -> Self {
    Self { search: search.into(), format: ResultFormat::default(), start_record: 0 }
  }

  /// Sets the output format.
  pub fn with_format(mut self, format: ResultFormat) -> Self {
    self.format = format;
    self
  }

  /// Sets the record number to start from.
  pub fn with_start_record(mut self, start_record: u32) -> Self {
    self.start_record = start_record;
    self
  }

  /// The search string.
  pub fn search(&self) -> &str { &self.search }

  /// The output format.
  pub fn format(&self) -> ResultFormat { self.format }

  /// The record number to start from.
  pub fn start_record(&self) -> u32 { self.start_record }

  /// The page size, always [`SearchQuery::PAGE_SIZE`].
  pub fn page_size(&self) -> u32 { Self::PAGE_SIZE }

  /// Builds the request URL against `endpoint`.
  ///
  /// Parameters are appended in a fixed order, each exactly once, and the
  /// search string is form-encoded. Any query string already on `endpoint`
  /// is kept in front of them.
  ///
  /// # Errors
  ///
  /// Returns [`InspireError::Encoding`] if `endpoint` is not an absolute URL.
  pub fn url(&self, endpoint: &str) -> Result<Url> {
    let page_size = self.page_size().to_string();
    let start_record = self.start_record.to_string();
    let url = Url::parse_with_params(endpoint, [
      ("action_search", "Search"),
      ("rg", page_size.as_str()),
      ("of", self.format.code()),
      ("ln", Self::LANGUAGE),
      ("p", self.search.as_str()),
      ("jrec", start_record.as_str()),
    ])?;
    if url.cannot_be_a_base() {
      return Err(InspireError::Encoding(format!("{endpoint} is not a usable endpoint")));
    }
    Ok(url)
  }
}

/// Builds the request URL for `query` against [`DEFAULT_ENDPOINT`].
pub fn build_search_url(query: &SearchQuery) -> Result<Url> { query.url(DEFAULT_ENDPOINT) }

#[cfg(test)]
mod tests {
  use super::*;

  fn params(url: &Url) -> Vec<(String, String)> {
    url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect()
  }

  #[traced_test]
  #[test]
  fn test_default_url() {
    let url = build_search_url(&SearchQuery::new("find a Feynman, Richard")).unwrap();
    assert_eq!(
      url.as_str(),
      "https://inspirehep.net/search?action_search=Search&rg=100&of=hb&ln=en&p=find+a+Feynman%2C+Richard&jrec=0"
    );
  }

  #[traced_test]
  #[test]
  fn test_each_parameter_once() {
    for format in ResultFormat::ALL {
      let query = SearchQuery::new("t \"dark matter\" & a Witten").with_format(format);
      let url = build_search_url(&query).unwrap();
      let pairs = params(&url);
      for key in ["action_search", "rg", "of", "ln", "p", "jrec"] {
        assert_eq!(pairs.iter().filter(|(k, _)| k == key).count(), 1, "{key} in {url}");
      }
      assert_eq!(pairs.len(), 6);
      assert!(pairs.contains(&("of".to_string(), format.code().to_string())));
      assert!(pairs.contains(&("p".to_string(), "t \"dark matter\" & a Witten".to_string())));
      assert!(url.as_str().contains("p=t+%22dark+matter%22+%26+a+Witten"));
    }
  }

  #[traced_test]
  #[test]
  fn test_empty_search_is_sent() {
    let url = build_search_url(&SearchQuery::new("")).unwrap();
    assert!(url.as_str().contains("&p=&"));
  }

  #[traced_test]
  #[test]
  fn test_start_record_and_page_size() {
    let query = SearchQuery::new("a Hawking").with_start_record(201);
    assert_eq!(query.page_size(), 100);
    let pairs = params(&build_search_url(&query).unwrap());
    assert!(pairs.contains(&("jrec".to_string(), "201".to_string())));
    assert!(pairs.contains(&("rg".to_string(), "100".to_string())));
  }

  #[traced_test]
  #[test]
  fn test_custom_endpoint() {
    let url = SearchQuery::new("x").url("http://127.0.0.1:8080/search").unwrap();
    assert_eq!(url.host_str(), Some("127.0.0.1"));
    assert_eq!(url.path(), "/search");
  }

  #[traced_test]
  #[test]
  fn test_bad_endpoint() {
    assert!(matches!(SearchQuery::new("x").url("not a url"), Err(InspireError::Encoding(_))));
    assert!(matches!(SearchQuery::new("x").url("mailto:someone"), Err(InspireError::Encoding(_))));
  }

  #[test]
  fn test_format_names_round_trip() {
    for format in ResultFormat::ALL {
      assert_eq!(format.name().parse::<ResultFormat>().unwrap(), format);
    }
    assert_eq!("LATEXeu".parse::<ResultFormat>().unwrap(), ResultFormat::LatexEu);
    assert!("html".parse::<ResultFormat>().is_err());
  }
}
