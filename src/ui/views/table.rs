//! Artwork table view.
//!
//! Shows the current page with a checkbox column. Selection state is read
//! from the [`SelectionCoordinator`] on every render; the view only owns the
//! cursor and the anchor of an in-progress range selection.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::api::Artwork;
use crate::selection::{Identified, SelectionCoordinator};

/// Actions the table asks the app to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    /// Flip the row at this index.
    ToggleRow(usize),
    /// Flip the select-all checkbox.
    ToggleSelectAll,
    /// Replace the page's selection with rows `start..=end`.
    RangeSelect { start: usize, end: usize },
    /// Open the "Select artworks..." popup.
    OpenSelectCount,
    /// Submit the visible selection.
    Submit,
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
    MoreRows,
    FewerRows,
    Reload,
}

/// The artwork table view.
#[derive(Debug, Default)]
pub struct ArtworkTable {
    /// Index of the highlighted row.
    cursor: usize,
    /// Start of an in-progress range selection.
    anchor: Option<usize>,
    /// Table state for ratatui.
    table_state: TableState,
}

impl ArtworkTable {
    /// Create a table with the cursor on the first row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the cursor after a new page arrives.
    pub fn reset(&mut self, row_count: usize) {
        self.anchor = None;
        self.cursor = 0;
        self.table_state
            .select(if row_count == 0 { None } else { Some(0) });
    }

    fn move_to(&mut self, index: usize) {
        self.cursor = index;
        self.table_state.select(Some(index));
    }

    /// Handle keyboard input.
    ///
    /// `row_count` is the number of rows on the current page.
    pub fn handle_input(&mut self, key: KeyEvent, row_count: usize) -> Option<TableAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                if self.cursor + 1 < row_count {
                    self.move_to(self.cursor + 1);
                }
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                if self.cursor > 0 {
                    self.move_to(self.cursor - 1);
                }
                None
            }
            (KeyCode::Home, _) => {
                if row_count > 0 {
                    self.move_to(0);
                }
                None
            }
            (KeyCode::End, _) => {
                if row_count > 0 {
                    self.move_to(row_count - 1);
                }
                None
            }
            (KeyCode::Char(' '), KeyModifiers::NONE) if self.cursor < row_count => {
                Some(TableAction::ToggleRow(self.cursor))
            }
            (KeyCode::Char('v'), KeyModifiers::NONE) if row_count > 0 => match self.anchor.take() {
                None => {
                    self.anchor = Some(self.cursor);
                    None
                }
                Some(anchor) => Some(TableAction::RangeSelect {
                    start: anchor.min(self.cursor),
                    end: anchor.max(self.cursor).min(row_count - 1),
                }),
            },
            (KeyCode::Esc, _) => {
                self.anchor = None;
                None
            }
            (KeyCode::Char('a'), KeyModifiers::NONE) => Some(TableAction::ToggleSelectAll),
            (KeyCode::Char('s'), KeyModifiers::NONE) => Some(TableAction::OpenSelectCount),
            (KeyCode::Enter, _) => Some(TableAction::Submit),
            (KeyCode::Char('n') | KeyCode::Char('l'), KeyModifiers::NONE) | (KeyCode::Right, _) => {
                Some(TableAction::NextPage)
            }
            (KeyCode::Char('p') | KeyCode::Char('h'), KeyModifiers::NONE) | (KeyCode::Left, _) => {
                Some(TableAction::PreviousPage)
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) => Some(TableAction::FirstPage),
            (KeyCode::Char('G'), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                Some(TableAction::LastPage)
            }
            (KeyCode::Char('+'), _) => Some(TableAction::MoreRows),
            (KeyCode::Char('-'), _) => Some(TableAction::FewerRows),
            (KeyCode::Char('r'), KeyModifiers::NONE) => Some(TableAction::Reload),
            _ => None,
        }
    }

    /// Render the table for the coordinator's current page.
    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        selection: &SelectionCoordinator<Artwork>,
        loading: bool,
    ) {
        let block = Block::default()
            .title(format!(
                " Art Institute of Chicago Collection ({} selected) ",
                selection.selection_set_len()
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let Some(page) = selection.current_page() else {
            let text = if loading { "Loading artworks..." } else { "No page loaded" };
            let paragraph = Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        };

        if page.is_empty() {
            let paragraph = Paragraph::new("No artworks on this page")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let range = self
            .anchor
            .map(|a| (a.min(self.cursor), a.max(self.cursor)));

        let rows: Vec<Row> = page
            .records
            .iter()
            .enumerate()
            .map(|(index, artwork)| {
                let selected = selection.is_selected(&artwork.id());
                let checkbox = if selected { "[x]" } else { "[ ]" };
                let check_style = if selected {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                };
                let title = Text::from(vec![
                    Line::from(Span::styled(
                        artwork.title.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        artwork.artist_name().to_string(),
                        Style::default().fg(Color::DarkGray),
                    )),
                ]);
                let mut row = Row::new(vec![
                    Cell::from(Span::styled(checkbox, check_style)),
                    Cell::from(id_cell(artwork)),
                    Cell::from(title),
                    Cell::from(artwork.date_text().to_string()),
                ])
                .height(2);
                if range.is_some_and(|(start, end)| index >= start && index <= end) {
                    row = row.style(Style::default().bg(Color::Indexed(236)));
                }
                row
            })
            .collect();

        let header_checkbox = if selection.select_all_flag() { "[x]" } else { "[ ]" };
        let header = Row::new(vec![
            Cell::from(header_checkbox),
            Cell::from("ID & Image"),
            Cell::from("Title & Artist"),
            Cell::from("Date"),
        ])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

        let widths = [
            Constraint::Length(4),
            Constraint::Length(10),
            Constraint::Min(20),
            Constraint::Length(18),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        if self.table_state.selected().is_none() {
            self.table_state.select(Some(self.cursor.min(page.len() - 1)));
        }
        frame.render_stateful_widget(table, area, &mut self.table_state);
    }
}

/// The ID on the first line and a thumbnail marker on the second.
fn id_cell(artwork: &Artwork) -> Text<'static> {
    let marker = if artwork.has_thumbnail() {
        Span::styled("▣ image", Style::default().fg(Color::Green))
    } else {
        Span::styled("□ none", Style::default().fg(Color::DarkGray))
    };
    Text::from(vec![Line::from(artwork.id.to_string()), Line::from(marker)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Thumbnail;

    fn text_lines(text: &Text<'_>) -> Vec<String> {
        text.lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_id_cell_marks_thumbnail() {
        let mut artwork = Artwork {
            id: 27992,
            title: "A Sunday on La Grande Jatte".to_string(),
            artist_title: None,
            date_display: None,
            thumbnail: None,
        };
        assert_eq!(text_lines(&id_cell(&artwork)), vec!["27992", "□ none"]);

        artwork.thumbnail = Some(Thumbnail {
            lqip: Some("data:image/gif;base64,R0lGOD".to_string()),
            ..Thumbnail::default()
        });
        assert_eq!(text_lines(&id_cell(&artwork)), vec!["27992", "▣ image"]);
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut table = ArtworkTable::new();
        table.reset(3);
        table.handle_input(key(KeyCode::Up), 3);
        assert_eq!(table.cursor, 0);
        for _ in 0..5 {
            table.handle_input(key(KeyCode::Char('j')), 3);
        }
        assert_eq!(table.cursor, 2);
        table.handle_input(key(KeyCode::Home), 3);
        assert_eq!(table.cursor, 0);
        table.handle_input(key(KeyCode::End), 3);
        assert_eq!(table.cursor, 2);
    }

    #[test]
    fn test_space_toggles_cursor_row() {
        let mut table = ArtworkTable::new();
        table.reset(3);
        table.handle_input(key(KeyCode::Down), 3);
        assert_eq!(
            table.handle_input(key(KeyCode::Char(' ')), 3),
            Some(TableAction::ToggleRow(1))
        );
    }

    #[test]
    fn test_space_on_empty_page_does_nothing() {
        let mut table = ArtworkTable::new();
        table.reset(0);
        assert_eq!(table.handle_input(key(KeyCode::Char(' ')), 0), None);
    }

    #[test]
    fn test_range_select() {
        let mut table = ArtworkTable::new();
        table.reset(10);
        table.handle_input(key(KeyCode::Down), 10);
        table.handle_input(key(KeyCode::Down), 10);
        table.handle_input(key(KeyCode::Down), 10);

        assert_eq!(table.handle_input(key(KeyCode::Char('v')), 10), None);
        assert_eq!(table.anchor, Some(3));

        table.handle_input(key(KeyCode::Up), 10);
        table.handle_input(key(KeyCode::Up), 10);
        assert_eq!(
            table.handle_input(key(KeyCode::Char('v')), 10),
            Some(TableAction::RangeSelect { start: 1, end: 3 })
        );
        assert_eq!(table.anchor, None);
    }

    #[test]
    fn test_escape_cancels_range() {
        let mut table = ArtworkTable::new();
        table.reset(5);
        table.handle_input(key(KeyCode::Char('v')), 5);
        table.handle_input(key(KeyCode::Esc), 5);
        assert_eq!(table.anchor, None);
    }

    #[test]
    fn test_reset_clears_anchor() {
        let mut table = ArtworkTable::new();
        table.reset(5);
        table.handle_input(key(KeyCode::Down), 5);
        table.handle_input(key(KeyCode::Char('v')), 5);
        table.reset(5);
        assert_eq!(table.anchor, None);
        assert_eq!(table.cursor, 0);
    }

    #[test]
    fn test_navigation_keys() {
        let mut table = ArtworkTable::new();
        assert_eq!(
            table.handle_input(key(KeyCode::Char('n')), 0),
            Some(TableAction::NextPage)
        );
        assert_eq!(
            table.handle_input(key(KeyCode::Left), 0),
            Some(TableAction::PreviousPage)
        );
        assert_eq!(
            table.handle_input(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT), 0),
            Some(TableAction::LastPage)
        );
        assert_eq!(
            table.handle_input(key(KeyCode::Char('+')), 0),
            Some(TableAction::MoreRows)
        );
        assert_eq!(
            table.handle_input(key(KeyCode::Char('r')), 0),
            Some(TableAction::Reload)
        );
    }
}
