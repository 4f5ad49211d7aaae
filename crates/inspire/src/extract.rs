//! Extraction of useful text from INSPIRE result pages.
//!
//! Result pages come in two shapes:
//!
//! - Citation formats (BibTeX, LaTeX, MARCXML) put each record in a `<pre>` block, so the text is
//!   simply the contents of those blocks.
//! - The brief format renders every record as a `div.record_body` followed by a `div.moreinfo`
//!   holding the citation links. The two are paired positionally, so the counts must agree.
//!
//! # Examples
//!
//! ```
//! use inspire::extract::{citation_count, extract_text};
//!
//! let page = b"<html><body><pre>@article{Feynman:1949}</pre></body></html>";
//! assert_eq!(extract_text(page).unwrap(), "@article{Feynman:1949}");
//! assert_eq!(citation_count("Cited by 42 records"), 42);
//! ```

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::*;

/// Line placed between consecutive records in brief-format text.
pub const RECORD_SEPARATOR: &str = "========================================";

/// Prefix of the "more info" text that carries no information.
const DETAILED_RECORD_PREFIX: &str = "Detailed record - ";

lazy_static! {
  static ref PRE: Selector = Selector::parse("pre").unwrap();
  static ref RECORD_BODY: Selector = Selector::parse("div.record_body").unwrap();
  static ref MORE_INFO: Selector = Selector::parse("div.moreinfo").unwrap();
  static ref SMALL: Selector = Selector::parse("small").unwrap();
  static ref LIST: Selector = Selector::parse("ul").unwrap();
  static ref TITLE_LINK: Selector = Selector::parse("a.titlelink").unwrap();
  static ref AUTHOR_LINK: Selector = Selector::parse("a.authorlink").unwrap();
  static ref CITED_BY: Regex = Regex::new(r"Cited by (\d+) records").unwrap();
}

/// Title, authors and citation count of one record in a brief-format page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDetail {
  /// Text of the record's first title link, empty if it has none.
  pub title:     String,
  /// Texts of the record's author links, in page order.
  pub authors:   Vec<String>,
  /// Number of records citing this one.
  pub citations: u64,
}

/// Extracts the readable text of a result page.
///
/// Pages containing `<pre>` blocks yield the text of those blocks joined by
/// newlines. Brief-format pages yield, per record, the body text followed by
/// the "more info" text, with records separated by [`RECORD_SEPARATOR`].
///
/// # Errors
///
/// Returns [`InspireError::StructuralMismatch`] if a brief-format page has a
/// different number of record bodies and info blocks.
pub fn extract_text(data: &[u8]) -> Result<String> {
  let document = parse(data);

  if document.select(&PRE).next().is_some() {
    debug!("Page contains preformatted blocks");
    return Ok(document.select(&PRE).map(element_text).collect::<Vec<_>>().join("\n"));
  }

  let records = paired_records(&document)?;
  if records.is_empty() {
    info!("No useful information found in text.");
    return Ok(String::new());
  }

  let texts: Vec<String> = records
    .iter()
    .map(|(body, more_info)| {
      let info = element_text(*more_info).replace(DETAILED_RECORD_PREFIX, "");
      format!("{}\n{}", body_text(*body), info)
    })
    .collect();

  Ok(texts.join(&format!("\n{RECORD_SEPARATOR}\n")).replace("\n\n", "\n"))
}

/// Extracts the title, authors and citation count of every record in a
/// brief-format page.
///
/// # Errors
///
/// Returns [`InspireError::StructuralMismatch`] if the page has a different
/// number of record bodies and info blocks.
pub fn extract_details(data: &[u8]) -> Result<Vec<RecordDetail>> {
  let document = parse(data);
  let records = paired_records(&document)?;
  if records.is_empty() {
    info!("No useful information found in text.");
  }

  Ok(
    records
      .into_iter()
      .map(|(body, more_info)| RecordDetail {
        title:     body.select(&TITLE_LINK).next().map(element_text).unwrap_or_default(),
        authors:   body.select(&AUTHOR_LINK).map(element_text).collect(),
        citations: citation_count(&element_text(more_info)),
      })
      .collect(),
  )
}

/// Returns the number `N` from the first "Cited by N records" in `text`, or 0.
pub fn citation_count(text: &str) -> u64 {
  CITED_BY
    .captures(text)
    .and_then(|cap| cap.get(1))
    .and_then(|m| m.as_str().parse().ok())
    .unwrap_or(0)
}

/// Parses a response body as an HTML document.
fn parse(data: &[u8]) -> Html { Html::parse_document(&String::from_utf8_lossy(data)) }

/// Collects the record bodies and info blocks of a brief-format page into pairs.
fn paired_records(document: &Html) -> Result<Vec<(ElementRef<'_>, ElementRef<'_>)>> {
  let bodies: Vec<ElementRef> = document.select(&RECORD_BODY).collect();
  let infos: Vec<ElementRef> = document.select(&MORE_INFO).collect();
  debug!("Found {} record bodies and {} info blocks", bodies.len(), infos.len());

  if bodies.len() != infos.len() {
    return Err(InspireError::StructuralMismatch { bodies: bodies.len(), infos: infos.len() });
  }
  Ok(bodies.into_iter().zip(infos).collect())
}

/// All text inside `element`.
fn element_text(element: ElementRef) -> String { element.text().collect() }

/// Text of a record body without the link list in its first `<small>` block.
fn body_text(body: ElementRef) -> String {
  let decoration =
    body.select(&SMALL).next().and_then(|small| small.select(&LIST).next()).map(|ul| ul.id());

  let Some(decoration) = decoration else {
    return element_text(body);
  };

  body
    .descendants()
    .filter(|node| !node.ancestors().any(|ancestor| ancestor.id() == decoration))
    .filter_map(|node| node.value().as_text().map(|text| &**text))
    .collect()
}
