//! Logs panel component
//!
//! Tail of the in-memory log buffer, newest at the bottom, color-coded by
//! level.

use crate::logging::{LogEntry, LogLevel};
use crate::theme::Theme;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

fn log_level_style(level: LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default().fg(theme.alert),
        LogLevel::Warn => Style::default().fg(theme.warn),
        LogLevel::Info => Style::default().fg(theme.text),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(theme.muted),
    }
}

fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}: {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.target,
        entry.message
    )
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let visible = area.height.saturating_sub(2) as usize;

    let items: Vec<ListItem> = if app.log_buffer.is_empty() {
        vec![ListItem::new("(no log entries)").style(Style::default().fg(theme.muted))]
    } else {
        app.log_buffer
            .recent(visible)
            .iter()
            .map(|e| ListItem::new(format_log_entry(e)).style(log_level_style(e.level, theme)))
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(format!(" System Logs ({}) ", app.log_buffer.len())),
    );

    f.render_widget(list, area);
}
