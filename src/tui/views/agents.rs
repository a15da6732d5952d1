// Agent center view
//
// The agent registry as a table, and a tabbed page for a single agent:
// basic info with its risk tolerance, or the decision streams it takes
// part in.

use crate::catalog::Agent;
use crate::tui::app::App;
use crate::tui::components::badge;
use crate::view::{AgentCenterMode, AgentTab};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Gauge, List, ListItem, Paragraph, Row, Table, TableState, Tabs, Wrap,
    },
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    match app.console.view().agent_center() {
        AgentCenterMode::List => render_list(f, area, app),
        AgentCenterMode::Detail { agent, tab } => render_agent(f, area, app, agent, *tab, false),
        AgentCenterMode::Create { agent, tab } => render_agent(f, area, app, agent, *tab, true),
    }
}

fn render_list(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let header = Row::new(["ID", "名称", "角色", "决策风格", "风险容忍度", "最近活动"])
        .style(Style::default().fg(theme.muted).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = app
        .console
        .catalog()
        .agents()
        .iter()
        .map(|agent| {
            Row::new(vec![
                Cell::from(agent.id.clone()),
                Cell::from(agent.name.clone()),
                Cell::from(agent.role.clone()),
                Cell::from(Line::from(vec![
                    badge(agent.style.badge()),
                    Span::raw(format!(" {}", agent.style.label())),
                ])),
                Cell::from(format!("{}%", agent.risk_tolerance)),
                Cell::from(Span::styled(
                    agent.recent_activity.clone(),
                    Style::default().fg(theme.muted),
                )),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(7),
            Constraint::Min(14),
            Constraint::Min(12),
            Constraint::Length(28),
            Constraint::Length(10),
            Constraint::Min(16),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_focused))
            .title(" 智能体中心 (n 新建) "),
    )
    .row_highlight_style(Style::default().bg(theme.border).add_modifier(Modifier::BOLD))
    .highlight_symbol("▶ ");

    let mut state = TableState::default().with_selected(Some(app.agent_selected));
    f.render_stateful_widget(table, area, &mut state);
}

fn render_agent(f: &mut Frame, area: Rect, app: &App, agent: &Agent, tab: AgentTab, creating: bool) {
    let theme = &app.theme;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(5),
        ])
        .split(area);

    let mut title = vec![
        Span::styled(
            agent.name.clone(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        badge(agent.style.badge()),
    ];
    if creating {
        title.push(Span::styled("  [新建]", Style::default().fg(theme.accent)));
    }
    let header = Paragraph::new(vec![
        Line::from(title),
        Line::from(Span::styled(
            format!("{}  {}", agent.id, agent.role),
            Style::default().fg(theme.muted),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border)),
    );
    f.render_widget(header, chunks[0]);

    let selected = match tab {
        AgentTab::Info => 0,
        AgentTab::Process => 1,
    };
    let tabs = Tabs::new(vec![" 基本信息 ", " 流程参与 "])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        )
        .select(selected)
        .style(Style::default().fg(theme.text))
        .highlight_style(
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, chunks[1]);

    match tab {
        AgentTab::Info => render_info_tab(f, chunks[2], app, agent),
        AgentTab::Process => render_process_tab(f, chunks[2], app, agent),
    }
}

fn render_info_tab(f: &mut Frame, area: Rect, app: &App, agent: &Agent) {
    let theme = &app.theme;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(3)])
        .split(area);

    let field = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<8}", label), Style::default().fg(theme.muted)),
            Span::raw(value),
        ])
    };
    let or_dash = |s: &str| {
        if s.is_empty() {
            "-".to_string()
        } else {
            s.to_string()
        }
    };

    let lines = vec![
        field("角色", or_dash(&agent.role)),
        field("决策风格", agent.style.label().to_string()),
        field("能力", or_dash(&agent.capabilities.join("、"))),
        field("最近活动", or_dash(&agent.recent_activity)),
    ];
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(" 基本信息 "),
        );
    f.render_widget(paragraph, chunks[0]);

    let ratio = f64::from(agent.risk_tolerance.min(100)) / 100.0;
    let color = if agent.risk_tolerance >= 50 {
        theme.warn
    } else {
        theme.success
    };
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(" 风险容忍度 "),
        )
        .gauge_style(Style::default().fg(color))
        .ratio(ratio)
        .label(format!("{}%", agent.risk_tolerance));
    f.render_widget(gauge, chunks[1]);
}

fn render_process_tab(f: &mut Frame, area: Rect, app: &App, agent: &Agent) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" 参与的决策流 ");

    let streams = app.console.catalog().streams_with_agent(&agent.id);
    if streams.is_empty() {
        let placeholder = Paragraph::new(Span::styled(
            "尚未参与任何决策流",
            Style::default().fg(theme.muted),
        ))
        .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = streams
        .iter()
        .map(|stream| {
            let position = stream
                .agent_ids
                .iter()
                .position(|id| *id == agent.id)
                .map(|i| format!("第 {}/{} 步", i + 1, stream.agent_ids.len()))
                .unwrap_or_default();
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!("{} ", stream.id), Style::default().fg(theme.muted)),
                    Span::styled(
                        stream.name.clone(),
                        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    badge(stream.status.badge()),
                ]),
                Line::from(Span::styled(
                    format!("  {}  ·  {}", position, stream.updated_at),
                    Style::default().fg(theme.muted),
                )),
            ])
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}
