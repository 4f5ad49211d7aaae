//! Terminal interface for browsing a bibliography.
//!
//! Uses `ratatui` for rendering and `crossterm` for terminal handling and key events.
//! The screen has two tabs:
//! - Table: every entry against every field, scrolled sideways with left and right
//! - Record: the non-empty fields of the selected entry
//!
//! # Navigation
//!
//! - Up/k, Down/j: Move the selection
//! - Left/h, Right/l: Scroll the table columns
//! - Tab, 1, 2: Switch view
//! - o: Open a `.bib` file
//! - q: Quit

use std::{io, path::Path, time::Duration};

use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use inspire::bibliography::DisplayTable;
use ratatui::{backend::CrosstermBackend, Terminal};

use super::*;

pub mod picker;
pub mod state;
pub mod styles;
pub mod ui;

use self::{
  picker::{FilePicker, PickerEntry},
  state::Viewer,
  ui::UIDrawer,
};

/// Runs the viewer until the user quits, opening `path` first if given.
///
/// The terminal is restored before returning, also when the event loop fails.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, drawn or read from.
pub fn run(path: Option<&Path>) -> Result<()> {
  let mut viewer = Viewer::new();
  match path {
    Some(path) => viewer.load(path),
    None => viewer.open_picker(),
  }

  enable_raw_mode()?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen)?;
  let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
  info!("Viewer started");

  let result = event_loop(&mut terminal, &mut viewer);

  disable_raw_mode()?;
  execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
  terminal.show_cursor()?;
  info!("Viewer closed");

  result
}

/// Draws when needed and dispatches key presses until the viewer asks to exit.
fn event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  viewer: &mut Viewer,
) -> Result<()> {
  loop {
    if viewer.needs_redraw {
      terminal.draw(|frame| UIDrawer::new(frame, viewer).draw())?;
    }

    if event::poll(Duration::from_millis(50))? {
      match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press =>
          if viewer.handle_input(key.code) {
            return Ok(());
          },
        Event::Resize(..) => viewer.needs_redraw = true,
        _ => {},
      }
    }
  }
}
