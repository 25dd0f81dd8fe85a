use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    app::AppState,
    ui::{
        Layout, Theme,
        components::{ListSelector, ListSelectorExt, StatusBar, list_nav_hints},
    },
};
use bundlescope_search::RecordStore;

/// Record selection screen: every extracted log file, plus an all-records row
pub struct RecordSelectScreen;

impl RecordSelectScreen {
    pub fn render(frame: &mut Frame, state: &mut AppState, store: &RecordStore) {
        let area = frame.area();
        let (header_area, content_area, status_area) = Layout::main(area);

        Self::render_header(frame, header_area);
        Self::render_list(frame, content_area, state, store);
        Self::render_status_bar(frame, status_area, state, store);

        if let Some(msg) = state.ui_state.error_message.clone() {
            super::render_notice(frame, &msg);
        }
    }

    fn render_header(frame: &mut Frame, area: Rect) {
        let title = Line::from(vec![
            Span::styled("bundlescope", Theme::title()),
            Span::styled(" │ ", Theme::text_dim()),
            Span::styled("Select Record", Theme::text()),
        ]);

        let header = Paragraph::new(title).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );

        frame.render_widget(header, area);
    }

    fn render_list(frame: &mut Frame, area: Rect, state: &mut AppState, store: &RecordStore) {
        let list_area = Layout::centered_list(area, 80);

        let records = store.all();
        let mut rows: Vec<(String, String, bool)> = Vec::with_capacity(records.len() + 1);
        rows.push((
            format!("All records ({})", records.len()),
            String::new(),
            true,
        ));
        for record in &records {
            rows.push((record.name.clone(), record.display_size(), false));
        }

        let selector = ListSelector::new(" Extracted Logs ").rows(rows);

        frame.render_list_selector(list_area, selector, &mut state.ui_state.list_state);
    }

    fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, store: &RecordStore) {
        let right = format!(
            "{} records · {}kb",
            store.len(),
            store.total_bytes() / 1024
        );

        let mut hints = list_nav_hints();
        if !state.load_failures.is_empty() {
            hints.push(("!", "some archives failed"));
        }

        let status = StatusBar::new().hints(hints).right(right);

        frame.render_widget(status, area);
    }
}
