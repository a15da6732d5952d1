// Monitor view
//
// KPI cards across the top, the realtime decision feed on the left, and the
// decision distribution and system health on the right.

use crate::monitor::{FeedKind, KpiTone, DISTRIBUTION, HEALTH, KPI_CARDS};
use crate::tui::app::App;
use crate::tui::components::badge;
use crate::util::truncate_to_width;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Gauge, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(6)])
        .split(area);

    render_kpis(f, rows[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(66), Constraint::Percentage(34)])
        .split(rows[1]);

    render_feed(f, body[0], app);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(8)])
        .split(body[1]);

    render_distribution(f, side[0], app);
    render_health(f, side[1], app);
}

fn render_kpis(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (card, cell) in KPI_CARDS.iter().zip(cells.iter()) {
        let note_color = match card.tone {
            KpiTone::Good => theme.success,
            KpiTone::Warn => theme.warn,
            KpiTone::Muted => theme.muted,
        };
        let text = vec![
            Line::from(Span::styled(
                card.value,
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(card.note, Style::default().fg(note_color))),
        ];
        let paragraph = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(format!(" {} ", card.label)),
        );
        f.render_widget(paragraph, *cell);
    }
}

fn render_feed(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    // borders + highlight symbol
    let text_width = area.width.saturating_sub(6) as usize;

    let items: Vec<ListItem> = app
        .feed
        .iter()
        .map(|item| {
            let (marker, color) = match item.kind {
                FeedKind::Alert => ("▲", theme.alert),
                FeedKind::Success => ("✔", theme.success),
                FeedKind::Running => ("◉", theme.accent),
            };

            let mut lines = vec![
                Line::from(vec![
                    Span::styled(format!("{} ", marker), Style::default().fg(color)),
                    Span::styled(
                        item.title.clone(),
                        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("  {}", item.time), Style::default().fg(theme.muted)),
                ]),
                Line::from(Span::styled(
                    format!("  {}", truncate_to_width(&item.text, text_width)),
                    Style::default().fg(theme.muted),
                )),
            ];
            if !item.badges.is_empty() {
                let mut spans = vec![Span::raw("  ")];
                for status in &item.badges {
                    spans.push(badge(*status));
                    spans.push(Span::raw(" "));
                }
                lines.push(Line::from(spans));
            }
            ListItem::new(Text::from(lines))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_focused))
                .title(" 实时决策流监控 "),
        )
        .highlight_style(Style::default().bg(theme.border).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

    let mut state = ListState::default().with_selected(Some(app.feed_selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_distribution(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let colors = [theme.accent, theme.warn, theme.muted];

    let bars: Vec<Bar> = DISTRIBUTION
        .iter()
        .zip(colors)
        .map(|((label, value), color)| {
            Bar::default()
                .label(Line::from(*label))
                .value(*value)
                .text_value(format!("{}%", value))
                .style(Style::default().fg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" 决策分布 ")
                .border_style(Style::default().fg(theme.border)),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(8)
        .bar_gap(2)
        .max(100);

    f.render_widget(chart, area);
}

fn render_health(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" 系统健康度 ")
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(inner);

    for (gauge, row) in HEALTH.iter().zip(rows.iter()) {
        let widget = Gauge::default()
            .block(Block::default().title(gauge.label))
            .gauge_style(Style::default().fg(theme.accent))
            .percent(gauge.fill)
            .label(gauge.display);
        f.render_widget(widget, *row);
    }
}
