// Views module - screen-level rendering logic
//
// Each view fills the content slot between the title bar and the footer:
// - Monitor: KPI cards, realtime decision feed, distribution and health
// - Streams: stream config list and the orchestration editor
// - Detail: decision detail with trend, trace chain and Copilot chat
// - Agents: agent list and agent detail/create
//
// This module lays out the shell and dispatches on the view state.

mod agents;
mod detail;
mod monitor;
mod streams;

use super::app::App;
use crate::tui::components;
use crate::view::{DashboardView, Screen};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &App) {
    let mut constraints = vec![Constraint::Length(3), Constraint::Min(10)];
    if app.show_logs {
        constraints.push(Constraint::Length(8));
    }
    constraints.push(Constraint::Length(2));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    components::render_title(f, chunks[0], app);

    let content = chunks[1];
    let view = app.console.view();
    match view.screen() {
        Screen::Dashboard => match view.dashboard_view() {
            DashboardView::Monitor => monitor::render(f, content, app),
            DashboardView::ConfigList => streams::render_list(f, content, app),
            DashboardView::ConfigEditor => streams::render_editor(f, content, app),
            DashboardView::DecisionDetail => detail::render(f, content, app),
        },
        Screen::AgentCenter => agents::render(f, content, app),
    }

    if app.show_logs {
        components::render_logs_panel(f, chunks[2], app);
    }
    components::render_status(f, chunks[chunks.len() - 1], app);
}
