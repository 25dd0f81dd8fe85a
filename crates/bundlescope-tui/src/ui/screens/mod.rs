mod record_select;
mod record_view;

pub use record_select::RecordSelectScreen;
pub use record_view::RecordViewScreen;

use ratatui::{
    Frame,
    layout::Rect,
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::ui::Theme;

/// One-line notice popup anchored near the bottom of the screen, used for
/// errors and export confirmations. Dismissed with Esc.
pub(crate) fn render_notice(frame: &mut Frame, message: &str) {
    let area = frame.area();
    let width = (message.len() as u16 + 4).min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + area.height.saturating_sub(4);
    let popup_area = Rect::new(x, y, width, 3);

    frame.render_widget(Clear, popup_area);
    let widget = Paragraph::new(Span::styled(message, Theme::error())).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::error()),
    );
    frame.render_widget(widget, popup_area);
}
