// Stream configuration views
//
// The config list (all decision streams plus a "new stream" row) and the
// orchestration canvas for a single draft: its agent pipeline on the left,
// the agent library on the right.

use crate::tui::app::{App, EditorFocus};
use crate::tui::components::badge;
use crate::util::truncate_to_width;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

pub fn render_list(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let catalog = app.console.catalog();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(5)])
        .split(area);

    let header = Row::new(["ID", "名称", "状态", "智能体", "更新时间"])
        .style(Style::default().fg(theme.muted).add_modifier(Modifier::BOLD));

    let mut rows = vec![Row::new(vec![
        Cell::from(""),
        Cell::from(Span::styled("+ 新建决策流", Style::default().fg(theme.accent))),
    ])];
    rows.extend(catalog.streams().iter().map(|stream| {
        Row::new(vec![
            Cell::from(stream.id.clone()),
            Cell::from(stream.name.clone()),
            Cell::from(Line::from(vec![
                badge(stream.status.badge()),
                Span::raw(format!(" {}", stream.status.as_str())),
            ])),
            Cell::from(stream.agent_ids.len().to_string()),
            Cell::from(Span::styled(
                stream.updated_at.clone(),
                Style::default().fg(theme.muted),
            )),
        ])
    }));

    let table = Table::new(
        rows,
        [
            Constraint::Length(7),
            Constraint::Min(16),
            Constraint::Length(18),
            Constraint::Length(6),
            Constraint::Length(18),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_focused))
            .title(" 决策流配置 "),
    )
    .row_highlight_style(Style::default().bg(theme.border).add_modifier(Modifier::BOLD))
    .highlight_symbol("▶ ");

    let mut state = TableState::default().with_selected(Some(app.stream_selected));
    f.render_stateful_widget(table, chunks[0], &mut state);

    render_stream_summary(f, chunks[1], app);
}

/// Description and participants of the highlighted stream
fn render_stream_summary(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let catalog = app.console.catalog();

    let lines = match app
        .stream_selected
        .checked_sub(1)
        .and_then(|i| catalog.streams().get(i))
    {
        Some(stream) => {
            let names: Vec<&str> = catalog
                .participants(stream)
                .into_iter()
                .map(|a| a.name.as_str())
                .collect();
            vec![
                Line::from(Span::styled(
                    stream.description.clone(),
                    Style::default().fg(theme.text),
                )),
                Line::from(vec![
                    Span::styled("参与智能体: ", Style::default().fg(theme.muted)),
                    Span::raw(if names.is_empty() {
                        "无".to_string()
                    } else {
                        names.join(" → ")
                    }),
                ]),
            ]
        }
        None => vec![Line::from(Span::styled(
            "从空白画布开始编排新的决策流",
            Style::default().fg(theme.muted),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(" 概要 "),
        );
    f.render_widget(paragraph, area);
}

pub fn render_editor(f: &mut Frame, area: Rect, app: &App) {
    let Some(draft) = app.console.view().draft() else {
        return;
    };
    let theme = &app.theme;
    let catalog = app.console.catalog();
    let stream = draft.stream();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(5)])
        .split(area);

    let mut title = vec![
        Span::styled(
            if stream.name.is_empty() {
                "未命名决策流".to_string()
            } else {
                stream.name.clone()
            },
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        badge(stream.status.badge()),
    ];
    if draft.is_new() {
        title.push(Span::styled("  [新建]", Style::default().fg(theme.accent)));
    }
    if draft.is_dirty() {
        title.push(Span::styled("  ● 未保存", Style::default().fg(theme.warn)));
    }
    let header = Paragraph::new(vec![
        Line::from(title),
        Line::from(Span::styled(
            format!("{}  {}", stream.id, stream.description),
            Style::default().fg(theme.muted),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" 编排画布 "),
    );
    f.render_widget(header, chunks[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    // Pipeline
    let pipeline_focused = app.editor_focus == EditorFocus::Pipeline;
    let width = panes[0].width.saturating_sub(10) as usize;
    let pipeline = draft.pipeline(catalog);
    let items: Vec<ListItem> = if pipeline.is_empty() {
        vec![ListItem::new(Span::styled(
            "从右侧智能体库添加节点",
            Style::default().fg(theme.muted),
        ))]
    } else {
        pipeline
            .iter()
            .enumerate()
            .map(|(i, agent)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:>2}. ", i + 1), Style::default().fg(theme.muted)),
                    Span::raw(truncate_to_width(&agent.name, width)),
                    Span::raw(" "),
                    badge(agent.style.badge()),
                ]))
            })
            .collect()
    };
    let list = List::new(items)
        .block(pane_block(" 执行流程 ", pipeline_focused, app))
        .highlight_style(Style::default().bg(theme.border).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");
    let mut state = ListState::default();
    if pipeline_focused && !pipeline.is_empty() {
        state.select(Some(draft.cursor()));
    }
    f.render_stateful_widget(list, panes[0], &mut state);

    // Library
    let library_focused = app.editor_focus == EditorFocus::Library;
    let items: Vec<ListItem> = catalog
        .agents()
        .iter()
        .map(|agent| {
            let used = stream.agent_ids.contains(&agent.id);
            ListItem::new(Line::from(vec![
                Span::styled(
                    if used { "✓ " } else { "  " },
                    Style::default().fg(theme.success),
                ),
                Span::raw(agent.name.clone()),
                Span::styled(format!("  {}", agent.role), Style::default().fg(theme.muted)),
            ]))
        })
        .collect();
    let list = List::new(items)
        .block(pane_block(" 智能体库 ", library_focused, app))
        .highlight_style(Style::default().bg(theme.border).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");
    let mut state = ListState::default();
    if library_focused {
        state.select(Some(app.library_selected));
    }
    f.render_stateful_widget(list, panes[1], &mut state);
}

fn pane_block<'a>(title: &'a str, focused: bool, app: &App) -> Block<'a> {
    let color = if focused {
        app.theme.border_focused
    } else {
        app.theme.border
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title)
}
