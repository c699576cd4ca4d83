//! Paginator for the artwork table.
//!
//! Tracks `first` (zero-based index of the first record shown), `rows`
//! (page size) and the total record count, and turns navigation into
//! [`PageRequest`]s. Rendering shows first/prev/next/last, a window of page
//! links around the current page, the rows-per-page choice and a
//! "Showing X to Y of Z" report.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::api::Page;

/// Number of page links shown around the current page.
const PAGE_LINK_COUNT: u64 = 5;

/// A request for one page of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// One-based page number.
    pub page_number: u32,
    /// Records per page.
    pub page_size: u32,
}

/// Paginator state.
#[derive(Debug, Clone)]
pub struct Paginator {
    /// Zero-based index of the first record on the current page.
    first: u64,
    /// Records per page.
    rows: u32,
    /// Total records in the collection (0 until the first load).
    total_records: u64,
    /// Selectable page sizes, sorted ascending.
    rows_per_page_options: Vec<u32>,
}

impl Paginator {
    /// Create a paginator at the first page.
    pub fn new(rows: u32, rows_per_page_options: Vec<u32>) -> Self {
        let rows = rows.max(1);
        let mut options = rows_per_page_options;
        if !options.contains(&rows) {
            options.push(rows);
        }
        options.retain(|&o| o > 0);
        options.sort_unstable();
        options.dedup();
        Self {
            first: 0,
            rows,
            total_records: 0,
            rows_per_page_options: options,
        }
    }

    /// One-based current page number.
    pub fn page_number(&self) -> u64 {
        self.first / u64::from(self.rows) + 1
    }

    /// Number of pages at the current page size.
    pub fn page_count(&self) -> u64 {
        self.total_records.div_ceil(u64::from(self.rows))
    }

    /// Adopt the metadata of a loaded page.
    pub fn sync_with<R>(&mut self, page: &Page<R>) {
        self.first = page.offset;
        self.rows = page.page_size.max(1);
        self.total_records = page.total_records;
    }

    /// Handle a page-change event from navigation.
    ///
    /// Sets `first`/`rows` and returns the request for
    /// `page = first / rows + 1`.
    pub fn on_page_change(&mut self, first: u64, rows: u32) -> PageRequest {
        let rows = rows.max(1);
        let page_number = first / u64::from(rows) + 1;
        self.rows = rows;
        self.first = (page_number - 1) * u64::from(rows);
        PageRequest {
            page_number: u32::try_from(page_number).unwrap_or(u32::MAX),
            page_size: rows,
        }
    }

    /// The request that reloads the current page.
    pub fn current(&self) -> PageRequest {
        PageRequest {
            page_number: u32::try_from(self.page_number()).unwrap_or(u32::MAX),
            page_size: self.rows,
        }
    }

    /// Go to a one-based page, if it differs from the current one and exists.
    pub fn go_to(&mut self, page_number: u64) -> Option<PageRequest> {
        let last = self.page_count().max(1);
        if page_number == 0 || page_number > last || page_number == self.page_number() {
            return None;
        }
        let first = (page_number - 1) * u64::from(self.rows);
        Some(self.on_page_change(first, self.rows))
    }

    /// Go to the next page.
    pub fn next_page(&mut self) -> Option<PageRequest> {
        self.go_to(self.page_number() + 1)
    }

    /// Go to the previous page.
    pub fn previous_page(&mut self) -> Option<PageRequest> {
        self.go_to(self.page_number().saturating_sub(1))
    }

    /// Go to the first page.
    pub fn first_page(&mut self) -> Option<PageRequest> {
        self.go_to(1)
    }

    /// Go to the last page.
    pub fn last_page(&mut self) -> Option<PageRequest> {
        self.go_to(self.page_count())
    }

    /// Switch to the next larger rows-per-page option.
    ///
    /// The record at `first` stays on the resulting page.
    pub fn more_rows(&mut self) -> Option<PageRequest> {
        let next = self
            .rows_per_page_options
            .iter()
            .copied()
            .find(|&o| o > self.rows)?;
        Some(self.on_page_change(self.first, next))
    }

    /// Switch to the next smaller rows-per-page option.
    pub fn fewer_rows(&mut self) -> Option<PageRequest> {
        let next = self
            .rows_per_page_options
            .iter()
            .rev()
            .copied()
            .find(|&o| o < self.rows)?;
        Some(self.on_page_change(self.first, next))
    }

    /// One-based page numbers to show as links, centered on the current page.
    pub fn page_links(&self) -> Vec<u64> {
        let count = self.page_count();
        if count == 0 {
            return Vec::new();
        }
        let current = self.page_number().min(count);
        let visible = PAGE_LINK_COUNT.min(count);
        let start = current
            .saturating_sub(visible / 2)
            .max(1)
            .min(count - visible + 1);
        (start..start + visible).collect()
    }

    /// The "Showing {first} to {last} of {total}" report, one-based.
    pub fn report(&self) -> String {
        if self.total_records == 0 {
            return "Showing 0 to 0 of 0".to_string();
        }
        let first = (self.first + 1).min(self.total_records);
        let last = (self.first + u64::from(self.rows)).min(self.total_records);
        format!("Showing {} to {} of {}", first, last, self.total_records)
    }

    /// Render the paginator on a single line.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let current = self.page_number();
        let enabled = Style::default().fg(Color::Cyan);
        let disabled = Style::default().fg(Color::DarkGray);
        let can_back = current > 1;
        let can_forward = current < self.page_count();

        let mut spans = vec![
            Span::styled("« ", if can_back { enabled } else { disabled }),
            Span::styled("‹ ", if can_back { enabled } else { disabled }),
        ];
        for page in self.page_links() {
            let style = if page == current {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            spans.push(Span::styled(format!(" {} ", page), style));
        }
        spans.push(Span::styled(" ›", if can_forward { enabled } else { disabled }));
        spans.push(Span::styled(" »", if can_forward { enabled } else { disabled }));

        let options: Vec<String> = self
            .rows_per_page_options
            .iter()
            .map(|&o| {
                if o == self.rows {
                    format!("[{}]", o)
                } else {
                    o.to_string()
                }
            })
            .collect();
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            format!("Rows: {}", options.join(" ")),
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::raw("   "));
        spans.push(Span::styled(self.report(), disabled));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(total: u64, rows: u32) -> Paginator {
        let mut paginator = Paginator::new(rows, vec![10, 25, 50]);
        paginator.sync_with(&Page::<u32>::new(Vec::new(), 0, rows, total));
        paginator
    }

    #[test]
    fn test_initial_state() {
        let paginator = Paginator::new(10, vec![10, 25, 50]);
        assert_eq!(paginator.first, 0);
        assert_eq!(paginator.page_number(), 1);
        assert_eq!(paginator.page_count(), 0);
        assert_eq!(
            paginator.current(),
            PageRequest {
                page_number: 1,
                page_size: 10
            }
        );
    }

    #[test]
    fn test_page_change_computes_page_number() {
        let mut paginator = loaded(25, 10);
        let request = paginator.on_page_change(20, 10);
        assert_eq!(request.page_number, 3);
        assert_eq!(paginator.first, 20);
    }

    #[test]
    fn test_next_and_previous() {
        let mut paginator = loaded(25, 10);
        assert_eq!(paginator.previous_page(), None);

        let request = paginator.next_page().unwrap();
        assert_eq!(request.page_number, 2);
        let request = paginator.next_page().unwrap();
        assert_eq!(request.page_number, 3);
        assert_eq!(paginator.next_page(), None);

        let request = paginator.previous_page().unwrap();
        assert_eq!(request.page_number, 2);
    }

    #[test]
    fn test_first_and_last() {
        let mut paginator = loaded(25, 10);
        assert_eq!(paginator.first_page(), None);
        assert_eq!(paginator.last_page().unwrap().page_number, 3);
        assert_eq!(paginator.first, 20);
        assert_eq!(paginator.first_page().unwrap().page_number, 1);
    }

    #[test]
    fn test_rows_change_keeps_first_record_visible() {
        let mut paginator = loaded(120, 10);
        paginator.on_page_change(30, 10); // page 4, records 31-40

        let request = paginator.more_rows().unwrap();
        assert_eq!(request.page_size, 25);
        assert_eq!(request.page_number, 2); // records 26-50
        assert_eq!(paginator.first, 25);

        let request = paginator.more_rows().unwrap();
        assert_eq!(request.page_size, 50);
        assert_eq!(request.page_number, 1);
        assert_eq!(paginator.more_rows(), None);

        let request = paginator.fewer_rows().unwrap();
        assert_eq!(request.page_size, 25);
        assert_eq!(request.page_number, 1);
    }

    #[test]
    fn test_report() {
        let mut paginator = loaded(25, 10);
        assert_eq!(paginator.report(), "Showing 1 to 10 of 25");
        paginator.last_page();
        assert_eq!(paginator.report(), "Showing 21 to 25 of 25");
        assert_eq!(Paginator::new(10, vec![]).report(), "Showing 0 to 0 of 0");
    }

    #[test]
    fn test_page_links_window() {
        let mut paginator = loaded(1000, 10);
        assert_eq!(paginator.page_links(), vec![1, 2, 3, 4, 5]);

        paginator.go_to(50);
        assert_eq!(paginator.page_links(), vec![48, 49, 50, 51, 52]);

        paginator.last_page();
        assert_eq!(paginator.page_links(), vec![96, 97, 98, 99, 100]);

        let short = loaded(25, 10);
        assert_eq!(short.page_links(), vec![1, 2, 3]);
    }

    #[test]
    fn test_options_include_rows() {
        let paginator = Paginator::new(30, vec![50, 10, 0, 25, 10]);
        assert_eq!(paginator.rows_per_page_options, vec![10, 25, 30, 50]);
    }

    #[test]
    fn test_sync_with_server_metadata() {
        let mut paginator = Paginator::new(10, vec![10, 25, 50]);
        paginator.sync_with(&Page::<u32>::new(Vec::new(), 40, 20, 100));
        assert_eq!(paginator.first, 40);
        assert_eq!(paginator.rows, 20);
        assert_eq!(paginator.page_number(), 3);
        assert_eq!(paginator.page_count(), 5);
    }
}
