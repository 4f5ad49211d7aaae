//! Browsing the file system for `.bib` files.

use std::path::{Path, PathBuf};

use glob::{glob_with, MatchOptions, Pattern};
use ratatui::widgets::ListState;

use super::*;

/// File name pattern of the files that can be opened.
pub const BIB_PATTERN: &str = "*.bib";

/// One line of the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEntry {
  /// The parent of the listed directory
  Parent(PathBuf),
  /// A subdirectory
  Directory(PathBuf),
  /// A bibliography file
  File(PathBuf),
}

impl PickerEntry {
  /// The text shown for this entry.
  pub fn label(&self) -> String {
    match self {
      PickerEntry::Parent(_) => "../".to_string(),
      PickerEntry::Directory(path) => format!("{}/", file_name(path)),
      PickerEntry::File(path) => file_name(path),
    }
  }
}

/// Listing of one directory: its parent, subdirectories and `.bib` files.
#[derive(Debug)]
pub struct FilePicker {
  /// Directory being listed
  pub dir:      PathBuf,
  /// Entries in display order
  pub entries:  Vec<PickerEntry>,
  /// Highlighted entry
  pub selected: ListState,
}

impl FilePicker {
  /// Lists `dir`.
  ///
  /// # Errors
  ///
  /// Returns an error if the directory cannot be read.
  pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
    let dir = dir.as_ref().canonicalize()?;
    let entries = list_entries(&dir)?;
    debug!("Listed {} entries in {}", entries.len(), dir.display());

    let mut selected = ListState::default();
    selected.select(if entries.is_empty() { None } else { Some(0) });
    Ok(Self { dir, entries, selected })
  }

  /// The highlighted entry.
  pub fn selected_entry(&self) -> Option<&PickerEntry> {
    self.selected.selected().and_then(|i| self.entries.get(i))
  }

  /// Moves the highlight up one entry.
  pub fn previous(&mut self) {
    if let Some(i) = self.selected.selected() {
      self.selected.select(Some(i.saturating_sub(1)));
    }
  }

  /// Moves the highlight down one entry.
  pub fn next(&mut self) {
    if let Some(i) = self.selected.selected() {
      self.selected.select(Some((i + 1).min(self.entries.len().saturating_sub(1))));
    }
  }

  /// Acts on the highlighted entry.
  ///
  /// Directories are entered and `None` is returned; a file is returned for loading.
  pub fn activate(&mut self) -> Result<Option<PathBuf>> {
    match self.selected_entry().cloned() {
      Some(PickerEntry::File(path)) => Ok(Some(path)),
      Some(PickerEntry::Parent(dir) | PickerEntry::Directory(dir)) => {
        *self = Self::open(dir)?;
        Ok(None)
      },
      None => Ok(None),
    }
  }

  /// Moves to the parent directory, if there is one.
  pub fn leave(&mut self) -> Result<()> {
    if let Some(parent) = self.dir.parent().map(Path::to_path_buf) {
      *self = Self::open(parent)?;
    }
    Ok(())
  }
}

/// The parent, sorted subdirectories and sorted `.bib` files of `dir`.
fn list_entries(dir: &Path) -> Result<Vec<PickerEntry>> {
  let mut entries: Vec<PickerEntry> =
    dir.parent().map(|parent| PickerEntry::Parent(parent.to_path_buf())).into_iter().collect();

  let mut directories = Vec::new();
  for entry in std::fs::read_dir(dir)? {
    let path = entry?.path();
    if path.is_dir() && !file_name(&path).starts_with('.') {
      directories.push(path);
    }
  }
  directories.sort();
  entries.extend(directories.into_iter().map(PickerEntry::Directory));

  let pattern = format!("{}/{}", Pattern::escape(&dir.to_string_lossy()), BIB_PATTERN);
  let options = MatchOptions { case_sensitive: false, ..MatchOptions::new() };
  let mut files = Vec::new();
  for path in glob_with(&pattern, options)? {
    let path = path?;
    if path.is_file() {
      files.push(path);
    }
  }
  files.sort();
  entries.extend(files.into_iter().map(PickerEntry::File));

  Ok(entries)
}

/// Last component of `path` as text.
fn file_name(path: &Path) -> String {
  path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample_dir() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("b.bib"), "").unwrap();
    std::fs::write(dir.path().join("a.bib"), "").unwrap();
    std::fs::write(dir.path().join("UPPER.BIB"), "").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "").unwrap();
    std::fs::create_dir(dir.path().join("papers")).unwrap();
    std::fs::create_dir(dir.path().join(".hidden")).unwrap();
    dir
  }

  #[traced_test]
  #[test]
  fn test_lists_directories_then_bib_files() {
    let dir = sample_dir();
    let picker = FilePicker::open(dir.path()).unwrap();
    let labels: Vec<String> = picker.entries.iter().map(PickerEntry::label).collect();
    assert_eq!(labels, vec!["../", "papers/", "UPPER.BIB", "a.bib", "b.bib"]);
    assert_eq!(picker.selected.selected(), Some(0));
  }

  #[traced_test]
  #[test]
  fn test_navigation() {
    let dir = sample_dir();
    let mut picker = FilePicker::open(dir.path()).unwrap();
    picker.previous();
    assert_eq!(picker.selected.selected(), Some(0));
    for _ in 0..10 {
      picker.next();
    }
    assert_eq!(picker.selected_entry().map(PickerEntry::label).as_deref(), Some("b.bib"));

    let chosen = picker.activate().unwrap().unwrap();
    assert_eq!(chosen.file_name().unwrap(), "b.bib");
  }

  #[traced_test]
  #[test]
  fn test_enter_and_leave_directory() {
    let dir = sample_dir();
    let root = dir.path().canonicalize().unwrap();
    let mut picker = FilePicker::open(&root).unwrap();
    picker.next();
    assert!(picker.activate().unwrap().is_none());
    assert_eq!(picker.dir, root.join("papers"));
    assert_eq!(picker.entries.len(), 1);

    picker.leave().unwrap();
    assert_eq!(picker.dir, root);
  }

  #[test]
  fn test_missing_directory() {
    let dir = tempdir().unwrap();
    assert!(matches!(FilePicker::open(dir.path().join("gone")), Err(BibviewError::Io(_))));
  }
}
