// Status bar component
//
// Renders uptime, current location with the decision or agent id, key hints
// for it and the Copilot reply delay at the bottom of the screen.

use crate::tui::app::App;
use crate::view::{AgentCenterMode, DashboardView, Screen};
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn key_hints(app: &App) -> &'static str {
    if app.is_typing() {
        return "Enter 发送 · Esc/Tab 返回追溯链";
    }
    let view = app.console.view();
    match view.screen() {
        Screen::Dashboard => match view.dashboard_view() {
            DashboardView::Monitor => "↑↓ 选择 · Enter 进入对话 · m 切换模式",
            DashboardView::ConfigList => "↑↓ 选择 · Enter 编排 · n 新建 · d 详情 · m 切换模式",
            DashboardView::ConfigEditor => "Tab 切换列表 · a 添加 · x 移除 · Esc 返回",
            DashboardView::DecisionDetail => "↑↓/Home/End 追溯节点 · Tab/i 输入指令 · Esc 返回",
        },
        Screen::AgentCenter => match view.agent_center() {
            AgentCenterMode::List => "↑↓ 选择 · Enter 查看 · n 新建",
            _ => "Tab/←→ 切换标签 · Esc 返回",
        },
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let location = match app.subject() {
        Some(id) => format!("{} {}", app.location(), id),
        None => app.location().to_string(),
    };
    let status_text = format!(
        " {} │ {} │ {} │ Copilot ~{}ms │ L 日志 · q 退出",
        app.uptime(),
        location,
        key_hints(app),
        app.reply_delay().as_millis(),
    );

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
