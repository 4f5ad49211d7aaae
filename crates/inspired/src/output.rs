//! Rendering of scraped record details.

use console::style;

use super::*;

/// Prefix for the author line of a record
static AUTHORS_PREFIX: &str = "├─ ";
/// Prefix for the last line of a record
static LAST_PREFIX: &str = "└─ ";

/// Renders `records` as pretty-printed JSON.
pub fn details_json(records: &[RecordDetail]) -> Result<String> {
  Ok(serde_json::to_string_pretty(records)?)
}

/// Renders `records` as a numbered list with authors and citation counts.
///
/// Colors are only emitted when the terminal supports them, so piped output is plain text.
pub fn details_text(records: &[RecordDetail]) -> String {
  records
    .iter()
    .enumerate()
    .map(|(i, record)| {
      let title = if record.title.is_empty() { "(untitled)" } else { record.title.as_str() };
      let authors =
        if record.authors.is_empty() { "-".to_string() } else { record.authors.join("; ") };
      format!(
        "{} {}\n   {}{} {}\n   {}{} {}",
        style(format!("{}.", i + 1)).cyan(),
        style(title).bold(),
        AUTHORS_PREFIX,
        style("Authors:").green(),
        authors,
        LAST_PREFIX,
        style("Citations:").green(),
        record.citations,
      )
    })
    .collect::<Vec<_>>()
    .join("\n")
}
