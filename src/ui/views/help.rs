//! Help screen listing key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Key binding sections: (heading, [(keys, description)]).
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Rows",
        &[
            ("j / ↓", "Move down"),
            ("k / ↑", "Move up"),
            ("space", "Toggle row"),
            ("a", "Toggle select all on this page"),
            ("v", "Start / finish range selection"),
            ("s", "Select the first N rows"),
            ("Enter", "Submit the selected rows"),
        ],
    ),
    (
        "Pages",
        &[
            ("n / l / →", "Next page"),
            ("p / h / ←", "Previous page"),
            ("g / G", "First / last page"),
            ("+ / -", "More / fewer rows per page"),
            ("r", "Reload current page"),
        ],
    ),
    (
        "Global",
        &[("?", "Show this help"), ("q / Ctrl+C", "Quit")],
    ),
];

/// Actions from the help screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpAction {
    /// Close the help screen.
    Close,
}

/// The help screen.
#[derive(Debug, Default)]
pub struct HelpView;

impl HelpView {
    /// Create the help view.
    pub fn new() -> Self {
        Self
    }

    /// Handle keyboard input.
    pub fn handle_input(&self, key: KeyEvent) -> Option<HelpAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) | (KeyCode::Char('q') | KeyCode::Char('?'), KeyModifiers::NONE) => {
                Some(HelpAction::Close)
            }
            _ => None,
        }
    }

    /// Build the help text.
    fn lines() -> Vec<Line<'static>> {
        let mut lines = vec![Line::raw("")];
        for (heading, bindings) in SECTIONS {
            lines.push(Line::styled(
                format!("{}:", heading),
                Style::default().fg(Color::Yellow),
            ));
            for (keys, description) in bindings.iter() {
                lines.push(Line::raw(format!("  {:<12} {}", keys, description)));
            }
            lines.push(Line::raw(""));
        }
        lines.push(Line::styled(
            "Press Esc or q to close this help screen",
            Style::default().fg(Color::DarkGray),
        ));
        lines
    }

    /// Render the help screen over the given area.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);
        let paragraph = Paragraph::new(Self::lines())
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_keys() {
        let help = HelpView::new();
        for code in [KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('?')] {
            assert_eq!(
                help.handle_input(KeyEvent::new(code, KeyModifiers::NONE)),
                Some(HelpAction::Close)
            );
        }
        assert_eq!(
            help.handle_input(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE)),
            None
        );
    }

    #[test]
    fn test_lines_cover_every_binding() {
        let text: Vec<String> = HelpView::lines()
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert!(text.iter().any(|l| l.contains("Select the first N rows")));
        assert!(text.iter().any(|l| l.contains("Reload current page")));
    }
}
