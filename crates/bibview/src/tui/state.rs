//! State of the viewer and its keyboard handling.
//!
//! The viewer holds one [`DisplayTable`] at a time. Opening a file replaces the table
//! wholesale; a file that fails to load leaves the current table in place and raises an
//! error dialog instead.

use std::path::{Path, PathBuf};

use crossterm::event::KeyCode;
use inspire::bibliography::{self, DisplayTable};
use ratatui::widgets::TableState;

use super::*;

/// Rows moved by page up and page down.
const PAGE_ROWS: usize = 10;

/// The two views of a loaded bibliography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
  /// Every entry against every field
  #[default]
  Table,
  /// Fields of the selected entry
  Record,
}

impl Tab {
  /// Tabs in display order.
  pub const ALL: [Tab; 2] = [Tab::Table, Tab::Record];

  /// Title shown in the tab bar.
  pub fn title(&self) -> &'static str {
    match self {
      Tab::Table => "Table",
      Tab::Record => "Record",
    }
  }

  /// Position in the tab bar.
  pub fn index(&self) -> usize {
    match self {
      Tab::Table => 0,
      Tab::Record => 1,
    }
  }

  /// The other tab.
  pub fn toggled(&self) -> Tab {
    match self {
      Tab::Table => Tab::Record,
      Tab::Record => Tab::Table,
    }
  }
}

/// Modal dialog on top of the views.
#[derive(Debug)]
pub enum DialogType {
  /// No dialog is shown
  None,
  /// Choosing a file to open
  Picker(FilePicker),
  /// A load or browse failure
  Error(String),
  /// Asking before quitting
  ExitConfirm,
}

/// Complete state of the viewer.
pub struct Viewer {
  /// Loaded bibliography, empty until a file is opened
  pub table:         DisplayTable,
  /// File the table was loaded from
  pub source:        Option<PathBuf>,
  /// View currently shown
  pub tab:           Tab,
  /// Selected entry
  pub selected:      TableState,
  /// Index of the first field column shown in the table view
  pub column_offset: usize,
  /// Scroll position of the record view
  pub record_scroll: usize,
  /// Active dialog
  pub dialog:        DialogType,
  /// Whether the screen must be redrawn
  pub needs_redraw:  bool,
}

impl Default for Viewer {
  fn default() -> Self { Self::new() }
}

impl Viewer {
  /// An empty viewer.
  pub fn new() -> Self {
    Self {
      table:         DisplayTable::default(),
      source:        None,
      tab:           Tab::Table,
      selected:      TableState::default(),
      column_offset: 0,
      record_scroll: 0,
      dialog:        DialogType::None,
      needs_redraw:  true,
    }
  }

  /// Loads the bibliography at `path` into the viewer.
  ///
  /// On success the table, selection and scroll positions are replaced. On failure the
  /// error is logged and shown in a dialog, and the current table is kept.
  pub fn load(&mut self, path: impl AsRef<Path>) {
    let path = path.as_ref();
    info!("Opening {}", path.display());
    match bibliography::open_and_load(path) {
      Ok(table) => {
        info!("Loaded {} entries with {} fields", table.row_count(), table.column_count());
        self.selected.select(if table.is_empty() { None } else { Some(0) });
        self.table = table;
        self.source = Some(path.to_path_buf());
        self.column_offset = 0;
        self.record_scroll = 0;
        self.dialog = DialogType::None;
      },
      Err(e) => {
        error!("Could not load {}: {}", path.display(), e);
        self.dialog = DialogType::Error(format!("Could not load {}: {}", path.display(), e));
      },
    }
    self.needs_redraw = true;
  }

  /// Shows the file picker, starting next to the current file or in the working directory.
  pub fn open_picker(&mut self) {
    let start = self
      .source
      .as_deref()
      .and_then(Path::parent)
      .filter(|dir| !dir.as_os_str().is_empty())
      .map(Path::to_path_buf)
      .unwrap_or_else(|| PathBuf::from("."));
    self.dialog = match FilePicker::open(&start) {
      Ok(picker) => DialogType::Picker(picker),
      Err(e) => {
        error!("Could not list {}: {}", start.display(), e);
        DialogType::Error(format!("Could not list {}: {}", start.display(), e))
      },
    };
    self.needs_redraw = true;
  }

  /// Index of the selected entry.
  pub fn selected_row(&self) -> Option<usize> { self.selected.selected() }

  /// Handles a key press. Returns true when the viewer should exit.
  pub fn handle_input(&mut self, key: KeyCode) -> bool {
    match &self.dialog {
      DialogType::ExitConfirm => self.handle_exit_dialog(key),
      DialogType::Error(_) => self.handle_error_dialog(key),
      DialogType::Picker(_) => self.handle_picker(key),
      DialogType::None => self.handle_normal_input(key),
    }
  }

  /// Returns true only if the user confirms exit.
  fn handle_exit_dialog(&mut self, key: KeyCode) -> bool {
    match key {
      KeyCode::Char('y') => true,
      KeyCode::Char('n') | KeyCode::Esc => {
        self.dialog = DialogType::None;
        self.needs_redraw = true;
        false
      },
      _ => false,
    }
  }

  /// Dismisses the error dialog on Enter or Esc.
  fn handle_error_dialog(&mut self, key: KeyCode) -> bool {
    if matches!(key, KeyCode::Enter | KeyCode::Esc) {
      self.dialog = DialogType::None;
      self.needs_redraw = true;
    }
    false
  }

  /// Handles input while the file picker is open, loading the file it returns.
  fn handle_picker(&mut self, key: KeyCode) -> bool {
    let DialogType::Picker(picker) = &mut self.dialog else {
      return false;
    };

    let outcome = match key {
      KeyCode::Esc => {
        self.dialog = DialogType::None;
        Ok(None)
      },
      KeyCode::Up | KeyCode::Char('k') => {
        picker.previous();
        Ok(None)
      },
      KeyCode::Down | KeyCode::Char('j') => {
        picker.next();
        Ok(None)
      },
      KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => picker.leave().map(|_| None),
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => picker.activate(),
      _ => return false,
    };
    self.needs_redraw = true;

    match outcome {
      Ok(Some(path)) => self.load(path),
      Ok(None) => {},
      Err(e) => {
        error!("Could not browse: {}", e);
        self.dialog = DialogType::Error(format!("Could not browse: {}", e));
      },
    }
    false
  }

  /// Handles input when no dialog is shown.
  ///
  /// Supports:
  /// - Vim-style navigation (h,j,k,l)
  /// - Arrow keys, page up and down, home and end
  /// - Tab switching
  /// - Opening a file
  /// - Quit command
  fn handle_normal_input(&mut self, key: KeyCode) -> bool {
    match key {
      KeyCode::Char('q') => self.dialog = DialogType::ExitConfirm,
      KeyCode::Char('o') => self.open_picker(),
      KeyCode::Tab | KeyCode::BackTab => self.tab = self.tab.toggled(),
      KeyCode::Char('1') => self.tab = Tab::Table,
      KeyCode::Char('2') => self.tab = Tab::Record,
      KeyCode::Up | KeyCode::Char('k') => self.move_up(1),
      KeyCode::Down | KeyCode::Char('j') => self.move_down(1),
      KeyCode::PageUp => self.move_up(PAGE_ROWS),
      KeyCode::PageDown => self.move_down(PAGE_ROWS),
      KeyCode::Home | KeyCode::Char('g') => self.move_up(usize::MAX),
      KeyCode::End | KeyCode::Char('G') => self.move_down(usize::MAX),
      KeyCode::Left | KeyCode::Char('h') =>
        if self.tab == Tab::Table {
          self.column_offset = self.column_offset.saturating_sub(1);
        },
      KeyCode::Right | KeyCode::Char('l') =>
        if self.tab == Tab::Table {
          let last = self.table.column_count().saturating_sub(1);
          self.column_offset = (self.column_offset + 1).min(last);
        },
      _ => return false,
    }
    self.needs_redraw = true;
    false
  }

  /// Moves the selection, or scrolls the record view, up by `n`.
  fn move_up(&mut self, n: usize) {
    match self.tab {
      Tab::Table =>
        if let Some(i) = self.selected.selected() {
          self.selected.select(Some(i.saturating_sub(n)));
        },
      Tab::Record => self.record_scroll = self.record_scroll.saturating_sub(n),
    }
  }

  /// Moves the selection, or scrolls the record view, down by `n`.
  fn move_down(&mut self, n: usize) {
    match self.tab {
      Tab::Table =>
        if let Some(i) = self.selected.selected() {
          let last = self.table.row_count().saturating_sub(1);
          self.selected.select(Some(i.saturating_add(n).min(last)));
        },
      Tab::Record => {
        let last = self.selected_row().map(|row| self.table.record(row).len()).unwrap_or(0);
        self.record_scroll = self.record_scroll.saturating_add(n).min(last.saturating_sub(1));
      },
    }
  }
}
