// Decision detail view
//
// Layout:
//   header (title, status, latest reading)
//   trend chart        | Copilot chat
//   trace chain | node |
//                      | input line

use crate::conversation::ChatRole;
use crate::detail::StreamDetailData;
use crate::theme::status_color;
use crate::tui::app::{App, DetailFocus};
use crate::tui::components::badge;
use crate::util::{fit_width, tail_to_width, wrap_to_width};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(session) = app.console.session() else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(10)])
        .split(area);

    render_header(f, rows[0], app, &session.detail, session.curated);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(rows[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(cols[0]);

    render_chart(f, left[0], app, &session.detail);

    let trace = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(left[1]);

    render_trace_chain(f, trace[0], app);
    render_node_detail(f, trace[1], app);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(cols[1]);

    render_chat(f, right[0], app);
    render_input(f, right[1], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App, detail: &StreamDetailData, curated: bool) {
    let theme = &app.theme;

    let mut title = vec![
        Span::styled(
            detail.title.clone(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        badge(detail.status),
    ];
    if let Some(value) = detail.latest_value() {
        title.push(Span::styled(
            format!("  当前值 {:.2}", value),
            Style::default().fg(status_color(detail.status)),
        ));
    }
    if !curated {
        title.push(Span::styled("  (无追溯数据)", Style::default().fg(theme.muted)));
    }

    let paragraph = Paragraph::new(vec![
        Line::from(title),
        Line::from(Span::styled(
            detail.subtitle.clone(),
            Style::default().fg(theme.muted),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" 决策详情 "),
    );
    f.render_widget(paragraph, area);
}

fn render_chart(f: &mut Frame, area: Rect, app: &App, detail: &StreamDetailData) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" 趋势 ");

    if detail.trend_series.is_empty() {
        let placeholder = Paragraph::new(Span::styled(
            "暂无趋势数据",
            Style::default().fg(theme.muted),
        ))
        .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let points: Vec<(f64, f64)> = detail
        .trend_series
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value))
        .collect();

    // A single point draws nothing as a line
    let graph_type = if points.len() > 1 {
        GraphType::Line
    } else {
        GraphType::Scatter
    };

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(graph_type)
        .style(Style::default().fg(theme.chart_line))
        .data(&points);

    let [y_min, y_max] = detail.y_axis_range;
    let x_max = (points.len().saturating_sub(1)).max(1) as f64;
    let x_labels: Vec<String> = match (detail.trend_series.first(), detail.trend_series.last()) {
        (Some(first), Some(last)) if points.len() > 1 => vec![first.time.clone(), last.time.clone()],
        (Some(first), _) => vec![first.time.clone()],
        _ => Vec::new(),
    };

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(theme.muted))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(theme.muted))
                .bounds([y_min, y_max])
                .labels(vec![format!("{:.2}", y_min), format!("{:.2}", y_max)]),
        );

    f.render_widget(chart, area);
}

fn render_trace_chain(f: &mut Frame, area: Rect, app: &App) {
    let Some(session) = app.console.session() else {
        return;
    };
    let theme = &app.theme;
    let focused = app.detail_focus == DetailFocus::Trace;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused {
            theme.border_focused
        } else {
            theme.border
        }))
        .title(" 追溯链 ");

    let chain = session.trace.chain();
    if chain.is_empty() {
        let placeholder = Paragraph::new(Span::styled(
            "该决策流暂无追溯链路",
            Style::default().fg(theme.muted),
        ))
        .wrap(Wrap { trim: true })
        .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    // borders, highlight symbol, marker, badge
    let label_width = (area.width as usize).saturating_sub(18).max(4);
    let items: Vec<ListItem> = chain
        .iter()
        .map(|node| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled("● ", Style::default().fg(status_color(node.status))),
                    Span::raw(fit_width(&node.label, label_width)),
                    badge(node.status),
                ]),
                Line::from(Span::styled(
                    format!("  {} · {}", node.kind, node.timestamp),
                    Style::default().fg(theme.muted),
                )),
            ])
        })
        .collect();

    let selected = chain.iter().position(|n| session.trace.is_active(n.id));
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(theme.border).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");
    let mut state = ListState::default().with_selected(selected);
    f.render_stateful_widget(list, area, &mut state);
}

fn render_node_detail(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" 节点详情 ");

    let Some(node) = app.console.session().and_then(|s| s.trace.active_node()) else {
        let placeholder = Paragraph::new(Span::styled(
            "选择追溯节点查看详情",
            Style::default().fg(theme.muted),
        ))
        .block(block);
        f.render_widget(placeholder, area);
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                node.label.clone(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            badge(node.status),
        ]),
        Line::from(Span::styled(node.description.clone(), Style::default().fg(theme.text))),
    ];

    if !node.metrics.is_empty() {
        lines.push(Line::default());
        for metric in &node.metrics {
            let mut spans = vec![
                Span::styled(format!("{}: ", metric.label), Style::default().fg(theme.muted)),
                Span::styled(
                    metric.value.clone(),
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                ),
            ];
            if let Some(trend) = metric.trend {
                spans.push(Span::styled(
                    format!(" {}", trend.arrow()),
                    Style::default().fg(theme.warn),
                ));
            }
            lines.push(Line::from(spans));
        }
    }

    if !node.evidence.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("证据", Style::default().fg(theme.muted))));
        for item in &node.evidence {
            lines.push(Line::from(format!("• {}", item)));
        }
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    f.render_widget(paragraph, area);
}

fn render_chat(f: &mut Frame, area: Rect, app: &App) {
    let Some(session) = app.console.session() else {
        return;
    };
    let theme = &app.theme;
    let conversation = &session.conversation;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" Copilot ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if conversation.is_empty() {
        let placeholder = Paragraph::new(Span::styled(
            "向 Copilot 提问以开始对话",
            Style::default().fg(theme.muted),
        ));
        f.render_widget(placeholder, inner);
        return;
    }

    let width = inner.width.saturating_sub(2) as usize;
    let mut lines: Vec<Line> = Vec::new();
    for message in conversation.messages() {
        let (name, color) = match message.role {
            ChatRole::User => ("你", theme.chat_user),
            ChatRole::Agent => ("Copilot", theme.chat_agent),
        };
        lines.push(Line::from(vec![
            Span::styled(name, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {}", message.time), Style::default().fg(theme.muted)),
        ]));
        for chunk in wrap_to_width(&message.content, width) {
            lines.push(Line::from(format!("  {}", chunk)));
        }
        lines.push(Line::default());
    }

    // Awaiting a reply
    if conversation
        .messages()
        .last()
        .is_some_and(|m| m.role == ChatRole::User)
    {
        lines.push(Line::from(Span::styled(
            "Copilot 正在分析…",
            Style::default().fg(theme.muted).add_modifier(Modifier::ITALIC),
        )));
    }

    // Keep the newest messages in view
    let skip = lines.len().saturating_sub(inner.height as usize);
    let visible: Vec<Line> = lines.into_iter().skip(skip).collect();
    f.render_widget(Paragraph::new(visible), inner);
}

fn render_input(f: &mut Frame, area: Rect, app: &App) {
    let Some(session) = app.console.session() else {
        return;
    };
    let theme = &app.theme;
    let typing = app.is_typing();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if typing {
            theme.border_focused
        } else {
            theme.border
        }))
        .title(if typing { " 输入 (Enter 发送, Esc 返回) " } else { " 输入 (Tab/i) " });
    let inner = block.inner(area);

    let input = session.conversation.input();
    let width = inner.width.saturating_sub(1) as usize;
    // Show the tail of long input so the cursor stays visible
    let shown = tail_to_width(input, width);

    let text = if shown.is_empty() && !typing {
        Span::styled("询问根因或调整建议…", Style::default().fg(theme.muted))
    } else {
        Span::styled(shown.as_str(), Style::default().fg(theme.text))
    };
    f.render_widget(Paragraph::new(Line::from(text)).block(block), area);

    if typing {
        let x = inner.x + (shown.width() as u16).min(inner.width.saturating_sub(1));
        f.set_cursor_position((x, inner.y));
    }
}
