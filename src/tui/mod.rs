// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, console events)
// - Layered key dispatch from global keys down to the active view

pub mod app;
pub mod components;
pub mod views;

use crate::config::Config;
use crate::events::ConsoleEvent;
use crate::view::{AgentCenterMode, AgentTab, DashboardView, Screen};
use anyhow::{Context, Result};
use app::{App, DetailFocus};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// whether or not the loop failed.
pub async fn run_tui(
    mut app: App,
    mut event_rx: mpsc::Receiver<ConsoleEvent>,
    config: &Config,
) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut app, &mut event_rx, config.tick_rate()).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three sources with tokio::select!:
/// 1. Keyboard input
/// 2. Timer ticks (uptime, log panel refresh)
/// 3. Console events (simulated agent replies)
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: &mut mpsc::Receiver<ConsoleEvent>,
    tick_rate: Duration,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(tick_rate);

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            _ = tick_interval.tick() => {}

            Some(console_event) = event_rx.recv() => {
                app.console.handle_event(console_event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Chat input → Global → Screen-specific
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    // Ctrl+C always quits, even mid-typing
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        app.should_quit = true;
        return;
    }

    // Layer 1: chat input captures everything while typing
    if app.is_typing() {
        handle_chat_input(app, key_event.code);
        return;
    }

    // Layer 2: global keys
    if handle_global_keys(app, key_event.code) {
        return;
    }

    // Layer 3: the active screen
    match app.console.view().screen() {
        Screen::Dashboard => handle_dashboard_keys(app, key_event.code),
        Screen::AgentCenter => handle_agent_keys(app, key_event.code),
    }
}

fn handle_chat_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc | KeyCode::Tab => app.detail_focus = DetailFocus::Trace,
        KeyCode::Enter => {
            app.console.submit_input();
        }
        KeyCode::Backspace => app.console.pop_input(),
        KeyCode::Char(c) => app.console.push_input(c),
        _ => {}
    }
}

/// Handle global keys - returns true if handled
fn handle_global_keys(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.should_quit = true;
            true
        }
        KeyCode::F(1) | KeyCode::Char('1') => {
            app.console.switch_screen(Screen::Dashboard);
            true
        }
        KeyCode::F(2) | KeyCode::Char('2') => {
            app.console.switch_screen(Screen::AgentCenter);
            true
        }
        KeyCode::BackTab => {
            let next = app.console.view().screen().next();
            app.console.switch_screen(next);
            true
        }
        KeyCode::Char('L') => {
            app.show_logs = !app.show_logs;
            true
        }
        _ => false,
    }
}

fn handle_dashboard_keys(app: &mut App, key: KeyCode) {
    let view = app.console.view().dashboard_view();

    // Monitor/config toggle; ViewController refuses it when not allowed
    if key == KeyCode::Char('m') {
        app.console.toggle_mode();
        return;
    }

    match view {
        DashboardView::Monitor => match key {
            KeyCode::Up | KeyCode::Char('k') => app.feed_move(false),
            KeyCode::Down | KeyCode::Char('j') => app.feed_move(true),
            KeyCode::Enter => app.open_selected_feed(),
            _ => {}
        },
        DashboardView::ConfigList => match key {
            KeyCode::Up | KeyCode::Char('k') => app.stream_move(false),
            KeyCode::Down | KeyCode::Char('j') => app.stream_move(true),
            KeyCode::Enter => app.open_selected_stream(),
            KeyCode::Char('n') => {
                app.stream_selected = 0;
                app.open_selected_stream();
            }
            KeyCode::Char('d') => app.inspect_selected_stream(),
            _ => {}
        },
        DashboardView::ConfigEditor => match key {
            KeyCode::Esc => app.console.close_editor(),
            KeyCode::Tab => app.toggle_editor_focus(),
            KeyCode::Up | KeyCode::Char('k') => app.editor_move(false),
            KeyCode::Down | KeyCode::Char('j') => app.editor_move(true),
            KeyCode::Enter | KeyCode::Char('a') => {
                if app.editor_focus == app::EditorFocus::Library {
                    app.add_library_agent();
                }
            }
            KeyCode::Delete | KeyCode::Char('x') => {
                if app.editor_focus == app::EditorFocus::Pipeline {
                    app.remove_pipeline_agent();
                }
            }
            _ => {}
        },
        DashboardView::DecisionDetail => match key {
            KeyCode::Esc => app.close_decision(),
            KeyCode::Up | KeyCode::Char('k') => app.console.select_previous_node(),
            KeyCode::Down | KeyCode::Char('j') => app.console.select_next_node(),
            KeyCode::Home => app.jump_to_node(false),
            KeyCode::End => app.jump_to_node(true),
            KeyCode::Tab | KeyCode::Char('i') => app.detail_focus = DetailFocus::Chat,
            _ => {}
        },
    }
}

fn handle_agent_keys(app: &mut App, key: KeyCode) {
    if matches!(app.console.view().agent_center(), AgentCenterMode::List) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.agent_move(false),
            KeyCode::Down | KeyCode::Char('j') => app.agent_move(true),
            KeyCode::Enter => app.open_selected_agent(),
            KeyCode::Char('n') => app.console.create_agent(),
            _ => {}
        }
        return;
    }

    match key {
        KeyCode::Esc => app.console.close_agent(),
        KeyCode::Tab => app.toggle_agent_tab(),
        KeyCode::Left => app.set_agent_tab(AgentTab::Info),
        KeyCode::Right => app.set_agent_tab(AgentTab::Process),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StreamCatalog;
    use crate::console::Console;
    use crate::conversation::{ReplyScheduler, DEFAULT_REPLY_TEXT};
    use crate::detail::{DetailTable, StreamDetailResolver};
    use crate::logging::LogBuffer;

    fn setup() -> (App, mpsc::Receiver<ConsoleEvent>) {
        let (tx, rx) = mpsc::channel(16);
        let console = Console::new(
            StreamCatalog::builtin(),
            StreamDetailResolver::new(DetailTable::builtin().unwrap()),
            ReplyScheduler::new(tx, Duration::from_millis(1000)),
            DEFAULT_REPLY_TEXT,
            Screen::Dashboard,
        );
        (App::new(console, LogBuffer::new(), &Config::default()), rx)
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, _rx) = setup();
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);

        let (mut app, _rx) = setup();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_mode_toggle_ignored_in_detail() {
        let (mut app, _rx) = setup();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(
            app.console.view().dashboard_view(),
            DashboardView::DecisionDetail
        );
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.console.view().dashboard_view(), DashboardView::ConfigList);
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_captures_global_keys() {
        let (mut app, mut rx) = setup();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "q1m");
        assert!(!app.should_quit);
        assert_eq!(app.console.session().unwrap().conversation.input(), "q1m");

        let before = app.console.session().unwrap().conversation.len();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.console.session().unwrap().conversation.len(), before + 1);

        if let Some(event) = rx.recv().await {
            app.console.handle_event(event);
        }
        assert_eq!(app.console.session().unwrap().conversation.len(), before + 2);

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Esc);
        assert!(app.console.session().is_none());
    }

    #[test]
    fn test_trace_navigation_keys() {
        let (mut app, _rx) = setup();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        let active = app
            .console
            .session()
            .and_then(|s| s.trace.active_node())
            .map(|n| n.id);
        assert_eq!(active, Some(3));

        press(&mut app, KeyCode::Home);
        let active = app
            .console
            .session()
            .and_then(|s| s.trace.active_node())
            .map(|n| n.id);
        assert_eq!(active, Some(1));
    }

    #[test]
    fn test_backtab_cycles_screens() {
        let (mut app, _rx) = setup();
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.console.view().screen(), Screen::AgentCenter);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.console.view().screen(), Screen::Dashboard);
    }

    #[test]
    fn test_agent_screen_keys() {
        let (mut app, _rx) = setup();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Right);
        match app.console.view().agent_center() {
            AgentCenterMode::Detail { agent, tab } => {
                assert_eq!(agent.id, "A-002");
                assert_eq!(*tab, AgentTab::Process);
            }
            other => panic!("expected agent detail, got {:?}", other),
        }
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('n'));
        assert!(matches!(
            app.console.view().agent_center(),
            AgentCenterMode::Create { .. }
        ));
    }
}
