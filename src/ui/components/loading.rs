//! Loading indicator component.
//!
//! An animated spinner shown in the status bar while a page fetch is in
//! flight.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

/// Spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// A loading indicator with an animated spinner.
#[derive(Debug, Clone)]
pub struct LoadingIndicator {
    /// The message to display.
    message: String,
    /// Current spinner frame index.
    spinner_state: usize,
    /// Whether the loading indicator is active.
    active: bool,
}

impl Default for LoadingIndicator {
    fn default() -> Self {
        Self::with_message("Loading...")
    }
}

impl LoadingIndicator {
    /// Create a loading indicator with a custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            spinner_state: 0,
            active: false,
        }
    }

    /// Start with a specific message.
    pub fn start_with_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.active = true;
        self.spinner_state = 0;
    }

    /// Stop the loading indicator.
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Check if the loading indicator is active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance the spinner animation. Called on each tick.
    pub fn tick(&mut self) {
        if self.active {
            self.spinner_state = (self.spinner_state + 1) % SPINNER_FRAMES.len();
        }
    }

    /// Get the current spinner frame.
    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_state]
    }

    /// Get the formatted loading text, or an empty string when idle.
    pub fn text(&self) -> String {
        if self.active {
            format!("{} {}", self.spinner_frame(), self.message)
        } else {
            String::new()
        }
    }

    /// Render the loading indicator left-aligned in the given area.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.active {
            return;
        }

        let paragraph = Paragraph::new(self.text())
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Left);

        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_inactive() {
        let loading = LoadingIndicator::default();
        assert!(!loading.is_active());
        assert_eq!(loading.text(), "");
    }

    #[test]
    fn test_start_and_stop() {
        let mut loading = LoadingIndicator::default();
        loading.start_with_message("Loading page 2...");
        assert!(loading.is_active());
        assert_eq!(loading.message, "Loading page 2...");
        assert!(loading.text().ends_with("Loading page 2..."));

        loading.stop();
        assert!(!loading.is_active());
    }

    #[test]
    fn test_tick_wraps_frames() {
        let mut loading = LoadingIndicator::default();
        loading.start_with_message("x");
        loading.tick();
        assert_eq!(loading.spinner_frame(), SPINNER_FRAMES[1]);
        for _ in 1..SPINNER_FRAMES.len() {
            loading.tick();
        }
        assert_eq!(loading.spinner_frame(), SPINNER_FRAMES[0]);
    }

    #[test]
    fn test_tick_inactive_does_not_advance() {
        let mut loading = LoadingIndicator::default();
        loading.tick();
        assert_eq!(loading.spinner_frame(), SPINNER_FRAMES[0]);
    }
}
