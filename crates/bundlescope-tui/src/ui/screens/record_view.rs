use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

use crate::{app::AppState, ui::Theme, ui::components::StatusBar};
use bundlescope_types::SearchHit;

/// Record view screen: search results (or a whole record) line by line
pub struct RecordViewScreen;

impl RecordViewScreen {
    pub fn render(frame: &mut Frame, state: &mut AppState) {
        let area = frame.area();

        // The filter bar only appears while searching or with a filter applied
        let show_filter_bar = state.ui_state.search_active
            || state.ui_state.active_filter.is_some()
            || state.ui_state.filter_error.is_some();

        let mut constraints = vec![Constraint::Length(3)]; // Header always
        if show_filter_bar {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Min(1)); // Hits
        constraints.push(Constraint::Length(1)); // Status bar

        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let mut idx = 0;

        Self::render_header(frame, chunks[idx], state);
        idx += 1;

        if show_filter_bar {
            Self::render_filter_bar(frame, chunks[idx], state);
            idx += 1;
        }

        Self::render_hits(frame, chunks[idx], state);
        idx += 1;

        Self::render_status_bar(frame, chunks[idx], state);

        if let Some(msg) = state.ui_state.error_message.clone() {
            super::render_notice(frame, &msg);
        }
    }

    fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
        let scope = state
            .selected_record
            .as_ref()
            .map(|(_, name)| name.as_str())
            .unwrap_or("All records");

        let mut spans = vec![
            Span::styled("bundlescope", Theme::title()),
            Span::styled(" │ ", Theme::text_dim()),
            Span::styled(scope, Theme::text_highlight()),
            Span::styled(" │ ", Theme::text_dim()),
            Span::styled(
                format!("{} lines", state.ui_state.hits.len()),
                Theme::text(),
            ),
        ];
        if state.ui_state.hit_limit_reached {
            spans.push(Span::styled(" (capped)", Theme::text_dim()));
        }

        let header = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );

        frame.render_widget(header, area);
    }

    fn render_filter_bar(frame: &mut Frame, area: Rect, state: &AppState) {
        let mut spans = vec![];

        // Prompt
        if state.ui_state.search_active {
            spans.push(Span::styled(
                " /",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(" Search: ", Theme::text_dim()));
        }

        // Input or current filter pattern
        let pattern = if state.ui_state.search_active {
            &state.ui_state.search_input
        } else if let Some(filter) = &state.ui_state.active_filter {
            filter.pattern()
        } else {
            ""
        };

        spans.push(Span::styled(pattern.to_string(), Theme::text_highlight()));

        // Cursor when active
        if state.ui_state.search_active {
            spans.push(Span::styled(
                "█",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::SLOW_BLINK),
            ));
        }

        // Error message
        if let Some(err) = &state.ui_state.filter_error {
            spans.push(Span::styled(" ", Theme::text()));
            spans.push(Span::styled(
                format!("⚠ {}", err),
                Style::default().fg(Color::Red),
            ));
        }

        // Case sensitivity indicator
        if state.ui_state.active_filter.is_some() || state.ui_state.search_active {
            spans.push(Span::styled("  ", Theme::text()));
            let case_text = if state.ui_state.filter_case_insensitive {
                "[i] case-insensitive"
            } else {
                "[I] case-sensitive"
            };
            spans.push(Span::styled(case_text, Theme::text_dim()));
        }

        // Hints
        if state.ui_state.search_active {
            spans.push(Span::styled(
                "  [Enter] Apply  [Esc] Cancel",
                Theme::text_dim(),
            ));
        } else if state.ui_state.active_filter.is_some() {
            spans.push(Span::styled("  [n] Clear  [/] Edit", Theme::text_dim()));
        }

        let bar = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border_focused()),
        );

        frame.render_widget(bar, area);
    }

    fn render_hits(frame: &mut Frame, area: Rect, state: &mut AppState) {
        let view_height = area.height.saturating_sub(2) as usize;
        let hit_count = state.ui_state.hits.len();

        if hit_count == 0 {
            let message = if state.ui_state.active_filter.is_some() {
                "No matching lines"
            } else if state.selected_record.is_none() {
                "Press / to search across all records"
            } else {
                "Record is empty"
            };
            let empty = Paragraph::new(Span::styled(message, Theme::text_dim())).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Theme::border()),
            );
            frame.render_widget(empty, area);
            return;
        }

        // Clamp scroll to the last full page
        let max_scroll = hit_count.saturating_sub(view_height);
        state.ui_state.scroll = state.ui_state.scroll.min(max_scroll);
        let scroll = state.ui_state.scroll;

        // Only results across all records carry the record-name prefix
        let show_names = state.selected_record.is_none();

        let lines: Vec<Line> = state
            .ui_state
            .hits
            .iter()
            .skip(scroll)
            .take(view_height)
            .map(|hit| Self::hit_line(hit, show_names))
            .collect();

        let widget = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );
        frame.render_widget(widget, area);

        let mut scrollbar_state = ScrollbarState::new(hit_count).position(scroll);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area,
            &mut scrollbar_state,
        );
    }

    /// One result line: dim "name:lineno" prefix plus the line with matches
    /// highlighted
    fn hit_line(hit: &SearchHit, show_name: bool) -> Line<'_> {
        let mut spans = Vec::new();

        if show_name {
            spans.push(Span::styled(
                format!("{}:", hit.record_name),
                Theme::text_dim(),
            ));
        }
        spans.push(Span::styled(
            format!("{:>5} ", hit.line_number),
            Theme::text_dim(),
        ));

        // Regex match offsets always fall on char boundaries, so these
        // slices cannot split a code point
        let mut cursor = 0;
        for &(start, end) in &hit.spans {
            if start > cursor {
                spans.push(Span::styled(&hit.line[cursor..start], Theme::text()));
            }
            spans.push(Span::styled(&hit.line[start..end], Theme::match_span()));
            cursor = end;
        }
        if cursor < hit.line.len() {
            spans.push(Span::styled(&hit.line[cursor..], Theme::text()));
        }

        Line::from(spans)
    }

    fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
        let right = format!(
            "{}/{}",
            (state.ui_state.scroll + 1).min(state.ui_state.hits.len()),
            state.ui_state.hits.len()
        );

        let status = StatusBar::new()
            .hints(vec![
                ("/", "Search"),
                ("n", "Clear"),
                ("e", "Export"),
                ("Esc", "Back"),
                ("q", "Quit"),
            ])
            .right(right);

        frame.render_widget(status, area);
    }
}
