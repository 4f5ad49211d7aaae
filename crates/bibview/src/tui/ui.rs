//! Drawing of the viewer.
//!
//! Each part of the screen has its own drawing method on [`UIDrawer`]. The screen is a tab
//! bar on top, the active view in the middle and a help bar at the bottom, with any dialog
//! drawn last over the rest.

use ratatui::{
  layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table, Tabs, Wrap},
  Frame,
};

use super::{
  state::{DialogType, Tab, Viewer},
  *,
};

/// Narrowest a table column is drawn.
const MIN_COLUMN_WIDTH: usize = 4;
/// Widest a table column is drawn; longer values are cut.
const MAX_COLUMN_WIDTH: usize = 40;
/// Widest a dialog's text is laid out before wrapping.
const MAX_DIALOG_WIDTH: usize = 72;

/// Renders a [`Viewer`] into one frame.
pub struct UIDrawer<'a, 'b> {
  /// Frame being rendered
  frame: &'a mut Frame<'b>,
  /// State being shown; table and picker selections are updated while drawing
  state: &'a mut Viewer,
}

impl<'a, 'b> UIDrawer<'a, 'b> {
  /// Creates a new drawer instance.
  pub fn new(frame: &'a mut Frame<'b>, state: &'a mut Viewer) -> Self { Self { frame, state } }

  /// Draws the whole screen.
  pub fn draw(&mut self) {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
      .split(self.frame.area());

    self.draw_tabs(chunks[0]);
    if self.state.source.is_none() {
      self.draw_welcome(chunks[1]);
    } else {
      match self.state.tab {
        Tab::Table => self.draw_table(chunks[1]),
        Tab::Record => self.draw_record(chunks[1]),
      }
    }
    self.draw_help_bar(chunks[2]);

    match &self.state.dialog {
      DialogType::None => {},
      DialogType::Picker(_) => self.draw_picker(),
      DialogType::Error(message) => {
        let message = message.clone();
        self.draw_error_dialog(&message);
      },
      DialogType::ExitConfirm => self.draw_exit_dialog(),
    }

    self.state.needs_redraw = false;
  }

  /// Tab bar, titled with the open file.
  fn draw_tabs(&mut self, area: Rect) {
    let title = match &self.state.source {
      Some(path) => Line::from(vec![
        Span::styled(path.display().to_string(), styles::TITLE),
        Span::styled(format!(" ({} entries)", self.state.table.row_count()), styles::NORMAL),
      ]),
      None => Line::from(Span::styled("bibview", styles::TITLE)),
    };

    let tabs = Tabs::new(Tab::ALL.iter().map(|tab| tab.title()))
      .select(self.state.tab.index())
      .style(styles::HELP)
      .highlight_style(styles::TITLE)
      .block(panel(title, false));
    self.frame.render_widget(tabs, area);
  }

  /// Placeholder before any file is open.
  fn draw_welcome(&mut self, area: Rect) {
    let text = vec![
      Line::from(""),
      Line::from(Span::styled("No bibliography loaded.", styles::NORMAL)),
      Line::from(vec![
        Span::styled("Press ", styles::HELP),
        Span::styled("o", styles::KEY_HIGHLIGHT),
        Span::styled(" to open a .bib file.", styles::HELP),
      ]),
    ];
    let welcome = Paragraph::new(text)
      .alignment(Alignment::Center)
      .block(Block::default().borders(Borders::ALL).border_style(styles::border_style(true)));
    self.frame.render_widget(welcome, area);
  }

  /// All entries against the fields from the column offset onwards.
  fn draw_table(&mut self, area: Rect) {
    let table = &self.state.table;
    let offset = self.state.column_offset.min(table.column_count());
    let columns = &table.columns()[offset..];

    let widths: Vec<Constraint> = (offset..table.column_count())
      .map(|column| Constraint::Length(column_width(table, column) as u16))
      .collect();
    let header = Row::new(columns.iter().map(|key| Cell::from(key.as_str()))).style(styles::LABEL);
    let rows = table
      .rows()
      .iter()
      .map(|row| Row::new(row[offset..].iter().map(|value| Cell::from(value.as_str()))));

    let title = Line::from(vec![
      Span::styled("Entries", styles::TITLE),
      Span::styled(
        format!(" (fields {}-{} of {})", offset + 1, table.column_count(), table.column_count()),
        styles::NORMAL,
      ),
    ]);

    let widget = Table::new(rows, widths)
      .header(header)
      .style(styles::NORMAL)
      .row_highlight_style(styles::HIGHLIGHT)
      .highlight_symbol("> ")
      .block(panel(title, true));
    self.frame.render_stateful_widget(widget, area, &mut self.state.selected);
  }

  /// Fields of the selected entry, one per line.
  fn draw_record(&mut self, area: Rect) {
    let row = self.state.selected_row();
    let lines: Vec<Line> = match row {
      Some(row) => self
        .state
        .table
        .record(row)
        .into_iter()
        .map(|(key, value)| {
          Line::from(vec![
            Span::styled(format!("{key}: "), styles::LABEL),
            Span::styled(value.to_string(), styles::NORMAL),
          ])
        })
        .collect(),
      None => vec![Line::from(Span::styled("No entry selected.", styles::HELP))],
    };

    let title = Line::from(vec![
      Span::styled("Record", styles::TITLE),
      Span::styled(
        row
          .map(|row| format!(" ({} of {})", row + 1, self.state.table.row_count()))
          .unwrap_or_default(),
        styles::NORMAL,
      ),
    ]);

    let record = Paragraph::new(lines)
      .wrap(Wrap { trim: false })
      .scroll((self.state.record_scroll as u16, 0))
      .block(panel(title, true));
    self.frame.render_widget(record, area);
  }

  /// Keyboard shortcuts for the current dialog or view.
  fn draw_help_bar(&mut self, area: Rect) {
    let keys: &[(&str, &str)] = match self.state.dialog {
      DialogType::Picker(_) =>
        &[("↑↓", "move"), ("enter", "open"), ("backspace", "up"), ("esc", "close")],
      _ => &[("↑↓←→", "nav"), ("tab", "switch view"), ("o", "open"), ("q", "quit")],
    };

    let mut spans = Vec::new();
    for (i, (key, action)) in keys.iter().enumerate() {
      if i > 0 {
        spans.push(Span::styled(" • ", styles::SEPARATOR));
      }
      spans.push(Span::styled(*key, styles::KEY_HIGHLIGHT));
      spans.push(Span::styled(format!(":{action}"), styles::HELP));
    }
    self.frame.render_widget(Paragraph::new(Line::from(spans)), area);
  }

  /// The file picker, centered over the views.
  fn draw_picker(&mut self) {
    let DialogType::Picker(picker) = &mut self.state.dialog else {
      return;
    };

    let area = centered_rect(70, 70, self.frame.area());
    let items: Vec<ListItem> = picker
      .entries
      .iter()
      .map(|entry| match entry {
        PickerEntry::File(_) => ListItem::new(Span::styled(entry.label(), styles::NORMAL)),
        _ => ListItem::new(Span::styled(entry.label(), styles::LABEL)),
      })
      .collect();

    let list = List::new(items)
      .block(
        Block::default()
          .title(Span::styled(format!("Open {}", picker.dir.display()), styles::TITLE))
          .borders(Borders::ALL)
          .border_style(styles::border_style(true)),
      )
      .highlight_style(styles::HIGHLIGHT)
      .highlight_symbol("> ");

    self.frame.render_widget(Clear, area);
    self.frame.render_stateful_widget(list, area, &mut picker.selected);
  }

  /// Draws a load or browse failure with instructions to dismiss it.
  fn draw_error_dialog(&mut self, message: &str) {
    let content = vec![
      Line::from(Span::styled(message.to_string(), Style::default().fg(Color::White))),
      Line::from(""),
      Line::from(vec![
        Span::styled("Press ", styles::HELP),
        Span::styled("Enter", styles::KEY_HIGHLIGHT),
        Span::styled(" to continue", styles::HELP),
      ]),
    ];

    self.draw_dialog("Error", &content, Color::Red);
  }

  /// Draws the exit confirmation dialog.
  fn draw_exit_dialog(&mut self) {
    let content = vec![
      Line::from(Span::styled("Are you sure you want to quit?", Style::default().fg(Color::White))),
      Line::from(""),
      Line::from(vec![
        Span::styled("Press ", styles::HELP),
        Span::styled("y", styles::KEY_HIGHLIGHT),
        Span::styled(" to confirm, ", styles::HELP),
        Span::styled("n", styles::KEY_HIGHLIGHT),
        Span::styled(" to cancel", styles::HELP),
      ]),
    ];

    self.draw_dialog("Exit Confirmation", &content, Color::Yellow);
  }

  /// Draws a centered dialog box with the given content.
  fn draw_dialog(&mut self, title: &str, content: &[Line], color: Color) {
    let area = self.frame.area();
    let dialog_box = create_dialog_box(title, content, area);

    self.frame.render_widget(Clear, dialog_box);
    self.frame.render_widget(
      Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(title, Style::default().fg(color).add_modifier(Modifier::BOLD))),
      dialog_box,
    );

    self.frame.render_widget(
      Paragraph::new(content.to_vec()).alignment(Alignment::Center).wrap(Wrap { trim: true }),
      dialog_box.inner(Margin { vertical: 1, horizontal: 2 }),
    );
  }
}

/// A bordered block with `title`.
fn panel<'a>(title: Line<'a>, focused: bool) -> Block<'a> {
  Block::default().title(title).borders(Borders::ALL).border_style(styles::border_style(focused))
}

/// Width for `column`, fitted to its header and values within the drawing limits.
fn column_width(table: &DisplayTable, column: usize) -> usize {
  let header = table.columns()[column].chars().count();
  table
    .rows()
    .iter()
    .map(|row| row[column].chars().count())
    .fold(header, usize::max)
    .clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
}

/// A dialog box sized to its content, centered in `r` and never larger than it.
///
/// Lines wider than the box are counted as wrapped, with a spare row for word breaks.
fn create_dialog_box(title: &str, content: &[Line], r: Rect) -> Rect {
  let content_width = content.iter().map(|line| line.width()).max().unwrap_or(0);
  let width = (title.len().max(content_width).clamp(40, MAX_DIALOG_WIDTH) as u16 + 4).min(r.width);
  let inner_width = usize::from(width.saturating_sub(4)).max(1);
  let rows: usize = content
    .iter()
    .map(|line| match line.width().div_ceil(inner_width) {
      0 | 1 => 1,
      n => n + 1,
    })
    .sum();
  let height = (rows as u16 + 2).min(r.height);

  Rect {
    x: r.x + (r.width - width) / 2,
    y: r.y + (r.height - height) / 2,
    width,
    height,
  }
}

/// A rectangle of the given percentages of `r`, centered in it.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
  let popup_layout = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Percentage((100 - percent_y) / 2),
      Constraint::Percentage(percent_y),
      Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

  Layout::default()
    .direction(Direction::Horizontal)
    .constraints([
      Constraint::Percentage((100 - percent_x) / 2),
      Constraint::Percentage(percent_x),
      Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
