//! Modal alert overlay.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::help::popup_area;
use crate::registration::{Alert, AlertKind};
use crate::theme::Palette;

/// Render `alert` centered over the current frame.
pub fn render_alert(frame: &mut Frame, alert: &Alert, palette: &Palette) {
    let area = popup_area(frame.area(), 60, 30);
    frame.render_widget(Clear, area);

    let accent = match alert.kind {
        AlertKind::Info => palette.success,
        AlertKind::Error => palette.error,
    };
    let block = Block::default()
        .title(format!(" {} ", alert.title))
        .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .style(Style::default().bg(palette.surface).fg(palette.text_primary));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [body, footer] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    frame.render_widget(
        Paragraph::new(alert.message.as_str())
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center),
        body,
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "OK (Enter)",
            Style::default()
                .fg(palette.text_secondary)
                .add_modifier(Modifier::ITALIC),
        )))
        .alignment(Alignment::Center),
        footer,
    );
}
