// Components module - reusable UI building blocks
//
// Shell components are rendered on every screen:
// - Title bar: app name, screen tabs, dashboard mode
// - Status bar: uptime, location, key hints, reply delay
// - Logs panel: system log tail (toggled with L)
//
// Badges are shared by every view that shows a status level.

pub mod badge;
pub mod logs_panel;
pub mod status_bar;
pub mod title_bar;

// Usage: components::render_title(f, area, app)

use crate::tui::app::App;
use ratatui::{layout::Rect, Frame};

/// Render the title bar (convenience wrapper)
pub fn render_title(f: &mut Frame, area: Rect, app: &App) {
    title_bar::render(f, area, app);
}

/// Render the status bar (convenience wrapper)
pub fn render_status(f: &mut Frame, area: Rect, app: &App) {
    status_bar::render(f, area, app);
}

/// Render the logs panel (convenience wrapper)
pub fn render_logs_panel(f: &mut Frame, area: Rect, app: &App) {
    logs_panel::render(f, area, app);
}

pub use badge::badge;
