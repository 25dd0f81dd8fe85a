use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget},
};

use crate::ui::Theme;

/// A generic list selector component
pub struct ListSelector<'a> {
    items: Vec<ListItem<'a>>,
    title: &'a str,
    highlight_symbol: &'a str,
}

impl<'a> ListSelector<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            items: Vec::new(),
            title,
            highlight_symbol: "▶ ",
        }
    }

    /// Add rows from an iterator of (left_text, right_text, is_aggregate)
    /// tuples. The aggregate flag styles the all-records row.
    pub fn rows<I, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = (S, S, bool)>,
        S: Into<String>,
    {
        self.items = rows
            .into_iter()
            .map(|(left, right, is_aggregate)| {
                let style = if is_aggregate {
                    Theme::list_item_aggregate()
                } else {
                    Theme::list_item()
                };

                let right = right.into();
                let mut spans = vec![Span::styled(left.into(), style)];
                if !right.is_empty() {
                    spans.push(Span::styled(format!("  {}", right), Theme::text_dim()));
                }

                ListItem::new(Line::from(spans))
            })
            .collect();
        self
    }
}

impl StatefulWidget for ListSelector<'_> {
    type State = ListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border_focused())
            .title(Span::styled(self.title, Theme::title()));

        let list = List::new(self.items)
            .block(block)
            .highlight_style(Theme::list_item_selected())
            .highlight_symbol(self.highlight_symbol);

        StatefulWidget::render(list, area, buf, state);
    }
}

/// Extension trait to render ListSelector more easily
pub trait ListSelectorExt {
    fn render_list_selector(&mut self, area: Rect, selector: ListSelector, state: &mut ListState);
}

impl ListSelectorExt for ratatui::Frame<'_> {
    fn render_list_selector(&mut self, area: Rect, selector: ListSelector, state: &mut ListState) {
        self.render_stateful_widget(selector, area, state);
    }
}
