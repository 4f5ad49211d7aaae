//! Loading BibTeX files into a table of entries.
//!
//! A file is parsed into [`BibEntry`] maps, one per record, whose keys are the
//! record's field names. Entries rarely share the same fields, so the table
//! uses the union of all keys as its columns and leaves a cell empty where an
//! entry lacks a field.
//!
//! Field values are normalized to an ASCII, LaTeX-safe form: accented letters
//! become LaTeX accent commands and math is kept inside `$…$`.
//!
//! # Examples
//!
//! ```
//! use inspire::bibliography::{parse_entries, unify_keys, DisplayTable};
//!
//! let entries = parse_entries("@article{a, title = {A}} @book{b, title = {B}, year = 2020}")?;
//! let keys = unify_keys(&entries);
//! let table = DisplayTable::build(&entries, &keys);
//! assert_eq!(table.row_count(), 2);
//! assert_eq!(table.cell(0, "year"), Some(""));
//! # Ok::<(), inspire::error::InspireError>(())
//! ```

use std::collections::{BTreeMap, BTreeSet};

use biblatex::{Bibliography, Chunk, Entry, ParseError, RawBibliography};
use tracing::{debug, error, warn};

use super::*;

/// Key under which an entry's citation key is stored.
pub const ID_KEY: &str = "ID";
/// Key under which an entry's type (e.g. `article`) is stored.
pub const ENTRY_TYPE_KEY: &str = "ENTRYTYPE";

/// One bibliography record: field name to field value.
pub type BibEntry = BTreeMap<String, String>;

/// Entries laid out as a table, one row per entry and one column per key.
///
/// Every cell holds a value; fields an entry does not have are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayTable {
  /// Column headers, the unified key set.
  columns: Vec<String>,
  /// Row-major cell values, each row exactly `columns.len()` long.
  rows:    Vec<Vec<String>>,
}

impl DisplayTable {
  /// Lays `entries` out under the columns `keys`.
  pub fn build(entries: &[BibEntry], keys: &[String]) -> Self {
    let rows = entries
      .iter()
      .map(|entry| keys.iter().map(|key| entry.get(key).cloned().unwrap_or_default()).collect())
      .collect();
    Self { columns: keys.to_vec(), rows }
  }

  /// Number of entries.
  pub fn row_count(&self) -> usize { self.rows.len() }

  /// Number of distinct keys.
  pub fn column_count(&self) -> usize { self.columns.len() }

  /// Whether the table has no entries.
  pub fn is_empty(&self) -> bool { self.rows.is_empty() }

  /// Column headers in display order.
  pub fn columns(&self) -> &[String] { &self.columns }

  /// All rows in entry order.
  pub fn rows(&self) -> &[Vec<String>] { &self.rows }

  /// The cells of one row.
  pub fn row(&self, row: usize) -> Option<&[String]> { self.rows.get(row).map(Vec::as_slice) }

  /// Position of `key` among the columns.
  pub fn column_index(&self, key: &str) -> Option<usize> {
    self.columns.iter().position(|column| column == key)
  }

  /// The value of `key` in `row`, `None` only if the row or key is not in the table.
  pub fn cell(&self, row: usize, key: &str) -> Option<&str> {
    let column = self.column_index(key)?;
    self.rows.get(row).map(|cells| cells[column].as_str())
  }

  /// Non-empty `(key, value)` pairs of one row, for showing a single record.
  pub fn record(&self, row: usize) -> Vec<(&str, &str)> {
    self
      .row(row)
      .map(|cells| {
        self
          .columns
          .iter()
          .zip(cells)
          .filter(|(_, value)| !value.is_empty())
          .map(|(key, value)| (key.as_str(), value.as_str()))
          .collect()
      })
      .unwrap_or_default()
  }
}

/// Reads and parses the bibliography at `path` and lays it out as a table.
///
/// # Errors
///
/// Returns [`InspireError::Io`] if the file cannot be read and
/// [`InspireError::Parse`] if it is not valid BibTeX.
pub fn open_and_load(path: impl AsRef<Path>) -> Result<DisplayTable> {
  let path = path.as_ref();
  debug!("File selected: {}", path.display());

  let entries = load_entries(path)?;
  debug!("Found entries: {}", entries.len());

  let keys = unify_keys(&entries);
  debug!("Number of bibliography keys: {}, keys: {:?}", keys.len(), keys);

  Ok(DisplayTable::build(&entries, &keys))
}

/// Reads and parses the bibliography at `path`.
pub fn load_entries(path: impl AsRef<Path>) -> Result<Vec<BibEntry>> {
  let path = path.as_ref();
  let content = std::fs::read_to_string(path).inspect_err(|e| {
    error!("Could not read {}: {}", path.display(), e);
  })?;
  debug!("File opened: {} ({} bytes)", path.display(), content.len());
  parse_entries(&content).inspect_err(|e| error!("Could not parse {}: {}", path.display(), e))
}

/// Parses BibTeX source into entries, in source order.
///
/// Each entry holds its fields plus [`ID_KEY`] and [`ENTRY_TYPE_KEY`]. The entry type is the
/// one written in the source, lower-cased. Entries sharing a citation key are all kept, each
/// as its own entry under the key it was written with.
///
/// # Errors
///
/// Returns [`InspireError::Parse`] if `src` is not valid BibTeX.
pub fn parse_entries(src: &str) -> Result<Vec<BibEntry>> {
  let written: Vec<(String, String)> = RawBibliography::parse(src)
    .map_err(parse_error)?
    .entries
    .iter()
    .map(|entry| (entry.v.key.v.to_string(), entry.v.kind.v.to_lowercase()))
    .collect();
  let keys = distinct_keys(&written);

  let mut raw = RawBibliography::parse(src).map_err(parse_error)?;
  for (entry, key) in raw.entries.iter_mut().zip(&keys) {
    entry.v.key.v = key.as_str();
  }
  let bibliography = Bibliography::from_raw(raw).map_err(parse_error)?;

  Ok(
    bibliography
      .iter()
      .zip(&written)
      .map(|(entry, (key, entry_type))| to_bib_entry(entry, key, entry_type))
      .collect(),
  )
}

/// Citation keys for the written keys with every repeat given a fresh `key-N` name.
fn distinct_keys(written: &[(String, String)]) -> Vec<String> {
  let in_source: BTreeSet<&str> = written.iter().map(|(key, _)| key.as_str()).collect();
  let mut taken = BTreeSet::new();

  written
    .iter()
    .map(|(key, _)| {
      if taken.insert(key.clone()) {
        return key.clone();
      }
      let mut n = 2;
      let mut renamed = format!("{key}-{n}");
      while in_source.contains(renamed.as_str()) || taken.contains(&renamed) {
        n += 1;
        renamed = format!("{key}-{n}");
      }
      warn!("Duplicate key {key}, keeping both entries");
      taken.insert(renamed.clone());
      renamed
    })
    .collect()
}

/// Wraps a parser error.
fn parse_error(e: ParseError) -> InspireError { InspireError::Parse(e.to_string()) }

/// Returns the sorted, deduplicated field names across `entries`.
pub fn unify_keys(entries: &[BibEntry]) -> Vec<String> {
  entries.iter().flat_map(BibEntry::keys).cloned().collect::<BTreeSet<_>>().into_iter().collect()
}

/// Flattens a parsed entry into a [`BibEntry`] under the key and type written in the source.
fn to_bib_entry(entry: &Entry, key: &str, entry_type: &str) -> BibEntry {
  let mut fields: BibEntry = entry
    .fields
    .iter()
    .map(|(name, chunks)| {
      let value: String = chunks
        .iter()
        .map(|chunk| match &chunk.v {
          Chunk::Normal(s) | Chunk::Verbatim(s) => latex_safe(s),
          Chunk::Math(s) => format!("${s}$"),
        })
        .collect();
      (name.to_lowercase(), value)
    })
    .collect();
  fields.insert(ID_KEY.to_string(), key.to_string());
  fields.insert(ENTRY_TYPE_KEY.to_string(), entry_type.to_string());
  fields
}

/// Replaces non-ASCII characters that have a LaTeX spelling with that spelling.
///
/// Characters without one are kept as they are.
pub fn latex_safe(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for c in text.chars() {
    match latex_spelling(c) {
      Some(spelling) => out.push_str(spelling),
      None => out.push(c),
    }
  }
  out
}

/// LaTeX spelling of a single character.
fn latex_spelling(c: char) -> Option<&'static str> {
  let spelling = match c {
    'à' => r"{\`a}",
    'á' => r"{\'a}",
    'â' => r"{\^a}",
    'ã' => r"{\~a}",
    'ä' => r#"{\"a}"#,
    'å' => r"{\aa}",
    'æ' => r"{\ae}",
    'ç' => r"{\c{c}}",
    'è' => r"{\`e}",
    'é' => r"{\'e}",
    'ê' => r"{\^e}",
    'ë' => r#"{\"e}"#,
    'ì' => r"{\`i}",
    'í' => r"{\'i}",
    'î' => r"{\^i}",
    'ï' => r#"{\"i}"#,
    'ñ' => r"{\~n}",
    'ò' => r"{\`o}",
    'ó' => r"{\'o}",
    'ô' => r"{\^o}",
    'õ' => r"{\~o}",
    'ö' => r#"{\"o}"#,
    'ø' => r"{\o}",
    'ù' => r"{\`u}",
    'ú' => r"{\'u}",
    'û' => r"{\^u}",
    'ü' => r#"{\"u}"#,
    'ý' => r"{\'y}",
    'ÿ' => r#"{\"y}"#,
    'ß' => r"{\ss}",
    'À' => r"{\`A}",
    'Á' => r"{\'A}",
    'Â' => r"{\^A}",
    'Ã' => r"{\~A}",
    'Ä' => r#"{\"A}"#,
    'Å' => r"{\AA}",
    'Æ' => r"{\AE}",
    'Ç' => r"{\c{C}}",
    'È' => r"{\`E}",
    'É' => r"{\'E}",
    'Ê' => r"{\^E}",
    'Ë' => r#"{\"E}"#,
    'Ì' => r"{\`I}",
    'Í' => r"{\'I}",
    'Î' => r"{\^I}",
    'Ï' => r#"{\"I}"#,
    'Ñ' => r"{\~N}",
    'Ò' => r"{\`O}",
    'Ó' => r"{\'O}",
    'Ô' => r"{\^O}",
    'Õ' => r"{\~O}",
    'Ö' => r#"{\"O}"#,
    'Ø' => r"{\O}",
    'Ù' => r"{\`U}",
    'Ú' => r"{\'U}",
    'Û' => r"{\^U}",
    'Ü' => r#"{\"U}"#,
    'Ý' => r"{\'Y}",
    'ć' => r"{\'c}",
    'Ć' => r"{\'C}",
    'č' => r"{\v{c}}",
    'Č' => r"{\v{C}}",
    'ě' => r"{\v{e}}",
    'ł' => r"{\l}",
    'Ł' => r"{\L}",
    'ń' => r"{\'n}",
    'ő' => r"{\H{o}}",
    'ř' => r"{\v{r}}",
    'Ř' => r"{\v{R}}",
    'ś' => r"{\'s}",
    'Ś' => r"{\'S}",
    'š' => r"{\v{s}}",
    'Š' => r"{\v{S}}",
    'ű' => r"{\H{u}}",
    'ź' => r"{\'z}",
    'ż' => r"{\.z}",
    'ž' => r"{\v{z}}",
    'Ž' => r"{\v{Z}}",
    '\u{00a0}' => "~",
    '\u{2013}' => "--",
    '\u{2014}' => "---",
    '\u{2018}' => "`",
    '\u{2019}' => "'",
    '\u{201c}' => "``",
    '\u{201d}' => "''",
    '\u{2026}' => r"\ldots{}",
    _ => return None,
  };
  Some(spelling)
}
