//! Main application state and event loop logic.
//!
//! This module implements The Elm Architecture (TEA) pattern: all input
//! flows through [`App::update`] and [`App::handle_api_message`], and
//! [`App::view`] renders purely from the current state.
//!
//! The app never performs network calls itself. Page changes queue a
//! sequenced [`PageRequest`] that the main loop picks up with
//! [`App::take_pending_request`] and hands to the task spawner.

use tracing::{debug, info, trace, warn};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::api::Artwork;
use crate::config::Config;
use crate::error::AppError;
use crate::events::Event;
use crate::selection::{Identified, SelectionCoordinator};
use crate::tasks::{ApiMessage, RequestSequencer};
use crate::ui::{
    selection_panel, ArtworkTable, CountInput, CountInputAction, HelpAction, HelpView,
    LoadingIndicator, NotificationManager, PageRequest, Paginator, TableAction,
};

/// The current screen state of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Browsing the artwork table.
    #[default]
    Browsing,
    /// Help screen is displayed.
    Help,
    /// Application is in the process of exiting.
    Exiting,
}

/// The main application struct that holds all state.
pub struct App {
    /// The current view state.
    state: AppState,
    /// Whether the application should quit.
    should_quit: bool,
    /// Durable selection and the page on screen.
    selection: SelectionCoordinator<Artwork>,
    /// The artwork table view.
    table: ArtworkTable,
    /// Paginator state.
    paginator: Paginator,
    /// "Select artworks..." popup.
    count_input: CountInput,
    /// Help screen.
    help_view: HelpView,
    /// Notification manager for toast messages.
    notifications: NotificationManager,
    /// Status bar spinner.
    loading: LoadingIndicator,
    /// Sequence numbers for page fetches.
    sequencer: RequestSequencer,
    /// Request waiting to be dispatched by the main loop.
    pending_request: Option<(u64, PageRequest)>,
    /// Message of the last failed load, until the next successful one.
    load_error: Option<String>,
}

impl App {
    /// Create the application and queue the first page.
    pub fn new(config: &Config) -> Self {
        debug!("Creating new application instance");

        let paginator = Paginator::new(
            config.display.page_size,
            config.display.rows_per_page_options.clone(),
        );
        let initial = paginator.current();

        let mut app = Self {
            state: AppState::Browsing,
            should_quit: false,
            selection: SelectionCoordinator::new(),
            table: ArtworkTable::new(),
            paginator,
            count_input: CountInput::new(),
            help_view: HelpView::new(),
            notifications: NotificationManager::new(),
            loading: LoadingIndicator::default(),
            sequencer: RequestSequencer::new(),
            pending_request: None,
            load_error: None,
        };
        app.request_page(initial);
        app
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Queue a page fetch, superseding any fetch still in flight.
    fn request_page(&mut self, request: PageRequest) {
        let seq = self.sequencer.issue();
        info!(
            seq,
            page = request.page_number,
            rows = request.page_size,
            "Requesting page"
        );
        self.pending_request = Some((seq, request));
        self.loading
            .start_with_message(format!("Loading page {}...", request.page_number));
    }

    /// Take the request the main loop should dispatch, if any.
    pub fn take_pending_request(&mut self) -> Option<(u64, PageRequest)> {
        self.pending_request.take()
    }

    /// Apply the result of a background task.
    ///
    /// Responses to superseded requests are dropped without touching state.
    pub fn handle_api_message(&mut self, message: ApiMessage) {
        match message {
            ApiMessage::PageFetched {
                seq,
                page_number,
                page_size,
                result,
            } => {
                if !self.sequencer.is_current(seq) {
                    debug!(
                        seq,
                        latest = self.sequencer.latest(),
                        page_number,
                        "Discarding stale page response"
                    );
                    return;
                }
                self.loading.stop();

                match result {
                    Ok(page) => {
                        info!(
                            page = page.current_page,
                            rows = page.len(),
                            total = page.total_records,
                            "Page loaded"
                        );
                        self.paginator.sync_with(&page);
                        self.table.reset(page.len());
                        self.selection.on_page_loaded(page);
                        self.load_error = None;
                    }
                    Err(e) => {
                        let error = AppError::from(e);
                        warn!(page_number, page_size, error = %error, "Failed to load page");

                        self.notifications.error(Self::failure_message(&error));
                        self.load_error = Some(error.user_message());

                        // Keep showing the last good page
                        if let Some(page) = self.selection.current_page() {
                            self.paginator.sync_with(page);
                        }
                    }
                }
            }
        }
    }

    /// Notification text for a failed load.
    ///
    /// Only errors a reload can fix get the reload hint.
    fn failure_message(error: &AppError) -> String {
        match error.suggested_action() {
            Some(action) if error.is_recoverable() => {
                format!("{} {}", error.user_message(), action)
            }
            _ => error.user_message(),
        }
    }

    /// Update the application state based on an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Quit => {
                info!("Quit event received");
                self.quit();
            }
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => {
                self.loading.tick();
                self.notifications.tick();
            }
        }
    }

    fn quit(&mut self) {
        self.should_quit = true;
        self.state = AppState::Exiting;
    }

    /// Handle keyboard input events.
    fn handle_key_event(&mut self, key_event: crossterm::event::KeyEvent) {
        use crossterm::event::{KeyCode, KeyModifiers};

        // Quit on Ctrl+C (always works)
        if key_event.code == KeyCode::Char('c') && key_event.modifiers == KeyModifiers::CONTROL {
            self.quit();
            return;
        }

        // The popup blocks other input while open
        if self.count_input.is_visible() {
            match self.count_input.handle_input(key_event) {
                Some(CountInputAction::Apply(count)) => {
                    debug!(?count, "Select first N applied");
                    self.selection.select_first_n(count);
                    if count.is_some_and(|n| n > 0) && self.selection.current_page().is_some() {
                        self.notifications.info(format!(
                            "Selected the first {} artworks",
                            self.selection.visible_selection_count()
                        ));
                    }
                }
                Some(CountInputAction::Cancel) => debug!("Select first N cancelled"),
                None => {}
            }
            return;
        }

        match self.state {
            AppState::Help => {
                if let Some(HelpAction::Close) = self.help_view.handle_input(key_event) {
                    self.state = AppState::Browsing;
                }
            }
            AppState::Browsing => {
                if key_event.modifiers == KeyModifiers::NONE {
                    match key_event.code {
                        KeyCode::Char('q') => {
                            self.quit();
                            return;
                        }
                        KeyCode::Char('?') => {
                            self.state = AppState::Help;
                            return;
                        }
                        _ => {}
                    }
                }

                let row_count = self.selection.current_page().map_or(0, |p| p.len());
                if let Some(action) = self.table.handle_input(key_event, row_count) {
                    self.apply_table_action(action);
                }
            }
            AppState::Exiting => {}
        }
    }

    /// Carry out an action reported by the table.
    fn apply_table_action(&mut self, action: TableAction) {
        debug!(?action, "Table action");
        let navigation = match action {
            TableAction::ToggleRow(index) => {
                self.selection.toggle_row_at(index);
                None
            }
            TableAction::ToggleSelectAll => {
                let checked = !self.selection.select_all_flag();
                self.selection.toggle_select_all(checked);
                None
            }
            TableAction::RangeSelect { start, end } => {
                let rows: Vec<Artwork> = self
                    .selection
                    .current_page()
                    .and_then(|page| page.records.get(start..=end))
                    .map(|rows| rows.to_vec())
                    .unwrap_or_default();
                if !rows.is_empty() {
                    self.selection.set_visible_selection(&rows);
                }
                None
            }
            TableAction::OpenSelectCount => {
                self.count_input.show();
                None
            }
            TableAction::Submit => {
                self.submit();
                None
            }
            TableAction::NextPage => self.paginator.next_page(),
            TableAction::PreviousPage => self.paginator.previous_page(),
            TableAction::FirstPage => self.paginator.first_page(),
            TableAction::LastPage => self.paginator.last_page(),
            TableAction::MoreRows => self.paginator.more_rows(),
            TableAction::FewerRows => self.paginator.fewer_rows(),
            TableAction::Reload => Some(self.paginator.current()),
        };

        if let Some(request) = navigation {
            self.request_page(request);
        }
    }

    /// Submit the visible selection.
    fn submit(&mut self) {
        let ids: Vec<u64> = self
            .selection
            .visible_selection()
            .into_iter()
            .map(|artwork| artwork.id())
            .collect();
        if ids.is_empty() {
            debug!("Submit ignored: nothing selected on this page");
            return;
        }

        info!(count = ids.len(), ids = ?ids, "Submitted selected artworks");
        self.notifications
            .success(format!("Submitted {} selected artworks", ids.len()));
    }

    /// Render the application UI.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let visible_count = self.selection.visible_selection_count();
        let panel_height = selection_panel::desired_height(visible_count, area.height / 3);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),               // Table
                Constraint::Length(panel_height), // Selection panel
                Constraint::Length(1),            // Paginator
                Constraint::Length(1),            // Status bar
            ])
            .split(area);

        self.table
            .render(frame, chunks[0], &self.selection, self.loading.is_active());
        selection_panel::render(
            frame,
            chunks[1],
            &self.selection.snapshot(),
            self.selection.selection_set_len(),
        );
        self.paginator.render(frame, chunks[2]);
        self.render_status_bar(frame, chunks[3], visible_count);

        if self.state == AppState::Help {
            self.help_view.render(frame, centered(area, 60, 24));
        }
        self.count_input.render(frame, area);
        self.notifications.render(frame, area);
    }

    /// Render the status bar: spinner, load error, or hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect, visible_count: usize) {
        if self.loading.is_active() {
            self.loading.render(frame, area);
            return;
        }

        let line = if let Some(error) = &self.load_error {
            Line::from(vec![
                Span::styled(
                    " Failed to load page ",
                    Style::default().fg(Color::Black).bg(Color::Red),
                ),
                Span::raw(" "),
                Span::styled(error.clone(), Style::default().fg(Color::Red)),
            ])
        } else {
            let mut spans = vec![
                Span::styled(" [s] ", Style::default().fg(Color::Cyan)),
                Span::raw("Select artworks...  "),
            ];
            if visible_count > 0 {
                spans.push(Span::styled("[Enter] ", Style::default().fg(Color::Cyan)));
                spans.push(Span::styled(
                    format!("Submit ({})  ", visible_count),
                    Style::default().fg(Color::Green),
                ));
            }
            spans.push(Span::styled(
                "[?] help  [q] quit",
                Style::default().fg(Color::DarkGray),
            ));
            Line::from(spans)
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// A rectangle of at most `width` x `height` centered in `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
