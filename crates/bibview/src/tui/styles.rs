//! Colors and text styles of the viewer.

use ratatui::style::{Color, Modifier, Style};

/// Help text and secondary information.
pub const HELP: Style = Style::new().fg(Color::DarkGray);

/// The selected entry.
pub const HIGHLIGHT: Style =
  Style::new().bg(Color::DarkGray).fg(Color::LightCyan).add_modifier(Modifier::BOLD);

/// Keyboard shortcuts in help text.
pub const KEY_HIGHLIGHT: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

/// Field names, in the table header and the record view.
pub const LABEL: Style = Style::new().fg(Color::LightBlue).add_modifier(Modifier::BOLD);

/// Field values.
pub const NORMAL: Style = Style::new().fg(Color::Gray);

/// Block titles and the active tab.
pub const TITLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Separator between help items.
pub const SEPARATOR: Style = Style::new().fg(Color::Blue);

/// Border of a panel, brighter when it has focus.
pub fn border_style(focused: bool) -> Style {
  if focused {
    Style::default().fg(Color::LightBlue)
  } else {
    Style::default().fg(Color::Blue)
  }
}
