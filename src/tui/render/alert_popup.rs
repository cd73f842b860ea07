use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::util::unicode;

/// Render the blocking notification popup, centered over the whole screen.
/// Input is held until it is dismissed.
pub fn render_alert_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(message) = &app.alert else {
        return;
    };

    let message_width = unicode::display_width(message) as u16;
    let width = (message_width + 6).max(24).min(area.width);
    let height = 5.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    let popup = Rect::new(x, y, width, height);

    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.red))
        .style(Style::default().bg(app.theme.background));

    let lines = vec![
        Line::from(Span::styled(
            message.clone(),
            Style::default().fg(app.theme.text_bright),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "press any key",
            Style::default().fg(app.theme.dim),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, popup);
}
