//! "Select artworks..." popup.
//!
//! A small overlay with a digits-only input for the number of rows to
//! select from the top of the current page. The typed value survives
//! closing and reopening the popup.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Longest accepted input; anything larger is clamped by the page anyway.
const MAX_DIGITS: usize = 6;

/// Largest count that fits in `MAX_DIGITS`.
const MAX_COUNT: usize = 999_999;

/// Actions produced by the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountInputAction {
    /// Apply with the parsed count (`None` when the input is empty).
    Apply(Option<usize>),
    /// Close without applying.
    Cancel,
}

/// Digits-only input shown as a centered popup.
#[derive(Debug, Clone, Default)]
pub struct CountInput {
    /// The typed digits.
    value: String,
    /// Whether the popup is open.
    visible: bool,
}

impl CountInput {
    /// Create a closed, empty popup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the popup.
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Close the popup, keeping the typed value.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Check if the popup is open.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Parse the input. Empty input is `None`.
    pub fn count(&self) -> Option<usize> {
        self.value.parse().ok()
    }

    /// Add one to the count, starting at the minimum of 1 and stopping at
    /// `MAX_COUNT`.
    fn increment(&mut self) {
        let next = self.count().map_or(1, |n| (n + 1).min(MAX_COUNT));
        self.value = next.to_string();
    }

    /// Subtract one from the count, never going below 1.
    fn decrement(&mut self) {
        let next = self.count().map_or(1, |n| n.saturating_sub(1).max(1));
        self.value = next.to_string();
    }

    /// Handle keyboard input while the popup is open.
    ///
    /// The popup closes itself on `Apply` and `Cancel`.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<CountInputAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) if c.is_ascii_digit() => {
                if self.value.len() < MAX_DIGITS {
                    // No leading zeros
                    if self.value == "0" {
                        self.value.clear();
                    }
                    self.value.push(c);
                }
                None
            }
            (KeyCode::Backspace, _) => {
                self.value.pop();
                None
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.value.clear();
                None
            }
            (KeyCode::Up, _) | (KeyCode::Char('+'), _) => {
                self.increment();
                None
            }
            (KeyCode::Down, _) | (KeyCode::Char('-'), _) => {
                self.decrement();
                None
            }
            (KeyCode::Enter, _) => {
                self.hide();
                Some(CountInputAction::Apply(self.count()))
            }
            (KeyCode::Esc, _) => {
                self.hide();
                Some(CountInputAction::Cancel)
            }
            _ => None,
        }
    }

    /// Render the popup centered in the given area.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let width = 36.min(area.width);
        let height = 5.min(area.height);
        let popup = Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        );

        frame.render_widget(Clear, popup);

        let input_line = if self.value.is_empty() {
            Line::from(Span::styled(
                "Enter number",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(Span::styled(
                self.value.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ))
        };
        let hint = Line::from(Span::styled(
            "Enter apply · ↑/↓ adjust · Esc cancel",
            Style::default().fg(Color::DarkGray),
        ));

        let block = Block::default()
            .title(" Number of artworks to select ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let paragraph = Paragraph::new(vec![input_line, Line::raw(""), hint]).block(block);
        frame.render_widget(paragraph, popup);

        if popup.width > 2 && popup.height > 2 {
            let cursor_x = popup.x + 1 + (self.value.len() as u16).min(popup.width - 3);
            frame.set_cursor_position(Position::new(cursor_x, popup.y + 1));
        }
    }
}
