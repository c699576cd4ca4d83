//! Selection panel shown under the table.
//!
//! A "Select All (n selected)" checkbox line followed by the selected rows
//! of the current page.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::api::Artwork;
use crate::selection::SelectionSnapshot;

/// Height the panel wants for a given number of visible selections.
pub fn desired_height(visible_count: usize, max: u16) -> u16 {
    // Borders plus the select-all line, then one line per artwork
    u16::try_from(visible_count)
        .unwrap_or(u16::MAX)
        .saturating_add(3)
        .min(max)
}

/// Build the panel lines from a snapshot.
fn panel_lines(snapshot: &SelectionSnapshot<'_, Artwork>, total_selected: usize) -> Vec<Line<'static>> {
    let checkbox = if snapshot.select_all_flag { "[x]" } else { "[ ]" };
    let mut summary = vec![
        Span::styled(
            format!("{} ", checkbox),
            Style::default().fg(if snapshot.select_all_flag {
                Color::Green
            } else {
                Color::White
            }),
        ),
        Span::raw(format!(
            "Select All ({} selected)",
            snapshot.visible_selection_count
        )),
    ];
    let off_page = total_selected.saturating_sub(snapshot.visible_selection_count);
    if off_page > 0 {
        summary.push(Span::styled(
            format!("  +{} on other pages", off_page),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let mut lines = vec![Line::from(summary)];
    lines.extend(snapshot.visible_selection_list.iter().map(|artwork| {
        let mut spans = vec![
            Span::raw("  "),
            Span::styled(
                artwork.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", artwork.artist_name()),
                Style::default().fg(Color::Gray),
            ),
        ];
        if !artwork.date_text().is_empty() {
            spans.push(Span::styled(
                format!("  {}", artwork.date_text()),
                Style::default().fg(Color::DarkGray),
            ));
        }
        if artwork.has_thumbnail() {
            spans.push(Span::styled(
                format!("  [{}]", artwork.alt_text()),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ));
        }
        Line::from(spans)
    }));
    lines
}

/// Render the panel.
///
/// `total_selected` is the size of the whole selection set, including ids
/// from other pages.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    snapshot: &SelectionSnapshot<'_, Artwork>,
    total_selected: usize,
) {
    let block = Block::default()
        .title(" Selection ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let paragraph = Paragraph::new(panel_lines(snapshot, total_selected)).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Thumbnail;
    use crate::api::Page;
    use crate::selection::SelectionCoordinator;

    fn artwork(id: u64, title: &str) -> Artwork {
        Artwork {
            id,
            title: title.to_string(),
            artist_title: Some("Claude Monet".to_string()),
            date_display: Some("1890".to_string()),
            thumbnail: None,
        }
    }

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_lines_list_visible_selection() {
        let mut coord = SelectionCoordinator::new();
        coord.on_page_loaded(Page::new(
            vec![artwork(1, "Stacks of Wheat"), artwork(2, "Water Lilies")],
            0,
            10,
            2,
        ));
        coord.toggle_row(2, true);

        let lines = panel_lines(&coord.snapshot(), coord.selection_set_len());
        assert_eq!(lines.len(), 2);
        assert_eq!(line_text(&lines[0]), "[ ] Select All (1 selected)");
        assert!(line_text(&lines[1]).contains("Water Lilies"));
        assert!(line_text(&lines[1]).contains("Claude Monet"));
    }

    #[test]
    fn test_lines_show_thumbnail_alt_text() {
        let mut described = artwork(1, "Stacks of Wheat");
        described.thumbnail = Some(Thumbnail {
            lqip: Some("data:image/gif;base64,R0lGOD".to_string()),
            alt_text: Some("Painting of haystacks at dusk.".to_string()),
            ..Thumbnail::default()
        });
        let mut untitled_alt = artwork(2, "Water Lilies");
        untitled_alt.thumbnail = Some(Thumbnail {
            lqip: Some("data:image/gif;base64,R0lGOD".to_string()),
            ..Thumbnail::default()
        });

        let mut coord = SelectionCoordinator::new();
        coord.on_page_loaded(Page::new(
            vec![described, untitled_alt, artwork(3, "Nighthawks")],
            0,
            10,
            3,
        ));
        coord.toggle_select_all(true);

        let lines = panel_lines(&coord.snapshot(), coord.selection_set_len());
        assert!(line_text(&lines[1]).ends_with("[Painting of haystacks at dusk.]"));
        assert!(line_text(&lines[2]).ends_with("[Water Lilies]"));
        assert!(!line_text(&lines[3]).contains('['));
    }

    #[test]
    fn test_lines_mention_off_page_selection() {
        let mut coord = SelectionCoordinator::new();
        coord.toggle_row(99, true);
        coord.on_page_loaded(Page::new(vec![artwork(1, "Stacks of Wheat")], 0, 10, 1));
        coord.toggle_select_all(true);

        let lines = panel_lines(&coord.snapshot(), coord.selection_set_len());
        let summary = line_text(&lines[0]);
        assert!(summary.starts_with("[x] Select All (1 selected)"));
        assert!(summary.contains("+1 on other pages"));
    }

    #[test]
    fn test_desired_height() {
        assert_eq!(desired_height(0, 10), 3);
        assert_eq!(desired_height(4, 10), 7);
        assert_eq!(desired_height(40, 10), 10);
        assert_eq!(desired_height(70_000, 400), 400);
        assert_eq!(desired_height(usize::MAX, u16::MAX), u16::MAX);
    }
}
