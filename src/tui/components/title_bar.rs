// Title bar component
//
// Renders the app name, the two top-level screens as tabs, and the dashboard
// mode when the dashboard is showing.

use crate::tui::app::App;
use crate::view::{DashboardMode, Screen};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let view = app.console.view();

    let tab = |screen: Screen, key: &str| {
        let style = if view.screen() == screen {
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme.muted)
        };
        Span::styled(format!("[{}] {}", key, screen.name()), style)
    };

    let mut spans = vec![
        Span::styled(
            " ◆ 决策智能中枢 ",
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        ),
        Span::raw("──── "),
        tab(Screen::Dashboard, "1"),
        Span::raw("  "),
        tab(Screen::AgentCenter, "2"),
    ];

    if view.screen() == Screen::Dashboard {
        let mode = match view.mode() {
            DashboardMode::Monitor => "实时监控",
            DashboardMode::Config => "决策流配置",
        };
        let style = if view.can_toggle_mode() {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.muted)
        };
        spans.push(Span::raw("  │  "));
        spans.push(Span::styled(format!("模式: {} (m)", mode), style));
    }

    let title = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.title)),
    );

    f.render_widget(title, area);
}
