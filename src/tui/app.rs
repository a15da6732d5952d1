// TUI application state
//
// Wraps the console core with the purely visual state the terminal needs:
// list cursors, panel focus, the log panel toggle and the active theme.
// All domain transitions go through `Console`; nothing here decides what a
// screen shows, only where the cursor sits on it.

use crate::config::{Config, StartScreen};
use crate::console::Console;
use crate::logging::LogBuffer;
use crate::monitor::{self, FeedItem};
use crate::theme::Theme;
use crate::view::{AgentCenterMode, AgentTab, DashboardView, Screen};
use std::time::{Duration, Instant};

/// Which half of the decision detail receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailFocus {
    #[default]
    Trace,
    /// Keys are typed into the Copilot input line
    Chat,
}

/// Which list of the stream editor has the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorFocus {
    #[default]
    Pipeline,
    Library,
}

impl From<StartScreen> for Screen {
    fn from(start: StartScreen) -> Self {
        match start {
            StartScreen::Dashboard => Screen::Dashboard,
            StartScreen::Agents => Screen::AgentCenter,
        }
    }
}

/// Step a cursor by one inside `0..len`
fn step(cursor: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (cursor + 1).min(len - 1)
    } else {
        cursor.saturating_sub(1)
    }
}

pub struct App {
    pub console: Console,
    pub theme: Theme,
    pub log_buffer: LogBuffer,
    pub should_quit: bool,
    pub show_logs: bool,
    start_time: Instant,

    /// Monitor feed, built once from the static catalog
    pub feed: Vec<FeedItem>,
    pub feed_selected: usize,
    /// Config list cursor; row 0 is the "new stream" entry
    pub stream_selected: usize,
    pub editor_focus: EditorFocus,
    pub library_selected: usize,
    pub agent_selected: usize,
    pub detail_focus: DetailFocus,
}

impl App {
    pub fn new(console: Console, log_buffer: LogBuffer, config: &Config) -> Self {
        let feed = monitor::feed(console.catalog());
        let theme = Theme::by_name(&config.theme);
        tracing::debug!(requested = %config.theme, theme = %theme.name, "Theme selected");
        Self {
            console,
            theme,
            log_buffer,
            should_quit: false,
            show_logs: false,
            start_time: Instant::now(),
            feed,
            feed_selected: 0,
            stream_selected: 0,
            editor_focus: EditorFocus::default(),
            library_selected: 0,
            agent_selected: 0,
            detail_focus: DetailFocus::default(),
        }
    }

    /// Format uptime as "HH:MM:SS"
    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    }

    pub fn reply_delay(&self) -> Duration {
        self.console.replies().delay()
    }

    /// True while keystrokes are going into the chat input line
    pub fn is_typing(&self) -> bool {
        self.detail_focus == DetailFocus::Chat
            && self.console.view().screen() == Screen::Dashboard
            && self.console.session().is_some()
    }

    // ─── Monitor ────────────────────────────────────────────

    pub fn feed_move(&mut self, forward: bool) {
        self.feed_selected = step(self.feed_selected, self.feed.len(), forward);
    }

    pub fn open_selected_feed(&mut self) {
        if let Some(item) = self.feed.get(self.feed_selected) {
            let id = item.decision_id.clone();
            self.open_decision(&id);
        }
    }

    // ─── Stream config ──────────────────────────────────────

    /// Rows in the config list, including the "new stream" entry
    pub fn stream_rows(&self) -> usize {
        self.console.catalog().streams().len() + 1
    }

    pub fn stream_move(&mut self, forward: bool) {
        self.stream_selected = step(self.stream_selected, self.stream_rows(), forward);
    }

    fn selected_stream_id(&self) -> Option<String> {
        let index = self.stream_selected.checked_sub(1)?;
        self.console
            .catalog()
            .streams()
            .get(index)
            .map(|s| s.id.clone())
    }

    /// Enter on the config list: new draft on row 0, edit otherwise
    pub fn open_selected_stream(&mut self) {
        let opened = match self.selected_stream_id() {
            Some(id) => self.console.edit_stream(&id),
            None => self.console.create_stream(),
        };
        if opened {
            self.editor_focus = EditorFocus::Pipeline;
            self.library_selected = 0;
        }
    }

    pub fn inspect_selected_stream(&mut self) {
        if let Some(id) = self.selected_stream_id() {
            self.open_decision(&id);
        }
    }

    // ─── Stream editor ──────────────────────────────────────

    pub fn toggle_editor_focus(&mut self) {
        self.editor_focus = match self.editor_focus {
            EditorFocus::Pipeline => EditorFocus::Library,
            EditorFocus::Library => EditorFocus::Pipeline,
        };
    }

    pub fn editor_move(&mut self, forward: bool) {
        match self.editor_focus {
            EditorFocus::Pipeline => {
                if let Some(draft) = self.console.draft_mut() {
                    if forward {
                        draft.cursor_next();
                    } else {
                        draft.cursor_previous();
                    }
                }
            }
            EditorFocus::Library => {
                let len = self.console.catalog().agents().len();
                self.library_selected = step(self.library_selected, len, forward);
            }
        }
    }

    pub fn add_library_agent(&mut self) {
        let Some(agent_id) = self
            .console
            .catalog()
            .agents()
            .get(self.library_selected)
            .map(|a| a.id.clone())
        else {
            return;
        };
        if let Some(draft) = self.console.draft_mut() {
            if draft.add_agent(&agent_id) {
                tracing::debug!("Added {} to draft {}", agent_id, draft.stream().id);
            }
        }
    }

    pub fn remove_pipeline_agent(&mut self) {
        if let Some(draft) = self.console.draft_mut() {
            if let Some(removed) = draft.remove_selected() {
                tracing::debug!("Removed {} from draft {}", removed, draft.stream().id);
            }
        }
    }

    // ─── Decision detail ────────────────────────────────────

    pub fn open_decision(&mut self, decision_id: &str) {
        if self.console.open_decision(decision_id) {
            self.detail_focus = DetailFocus::Trace;
        }
    }

    /// Jump to the first or last node of the trace chain
    pub fn jump_to_node(&mut self, last: bool) {
        let Some(chain) = self.console.session().map(|s| s.trace.chain()) else {
            return;
        };
        let node = if last { chain.last() } else { chain.first() };
        if let Some(id) = node.map(|n| n.id) {
            self.console.select_trace_node(id);
        }
    }

    pub fn close_decision(&mut self) {
        self.detail_focus = DetailFocus::Trace;
        self.console.close_decision();
    }

    // ─── Agent center ───────────────────────────────────────

    pub fn agent_move(&mut self, forward: bool) {
        let len = self.console.catalog().agents().len();
        self.agent_selected = step(self.agent_selected, len, forward);
    }

    pub fn open_selected_agent(&mut self) {
        if let Some(id) = self
            .console
            .catalog()
            .agents()
            .get(self.agent_selected)
            .map(|a| a.id.clone())
        {
            self.console.open_agent(&id);
        }
    }

    pub fn toggle_agent_tab(&mut self) {
        if let Some(tab) = self.console.view().agent_center().tab() {
            self.console.set_agent_tab(tab.toggle());
        }
    }

    pub fn set_agent_tab(&mut self, tab: AgentTab) {
        self.console.set_agent_tab(tab);
    }

    /// Short label of the current location, for the status bar
    pub fn location(&self) -> &'static str {
        let view = self.console.view();
        match view.screen() {
            Screen::Dashboard => match view.dashboard_view() {
                DashboardView::Monitor => "监控",
                DashboardView::ConfigList => "决策流配置",
                DashboardView::ConfigEditor => "编排画布",
                DashboardView::DecisionDetail => "决策详情",
            },
            Screen::AgentCenter => match view.agent_center() {
                AgentCenterMode::List => "智能体列表",
                AgentCenterMode::Detail { .. } => "智能体详情",
                AgentCenterMode::Create { .. } => "新建智能体",
            },
        }
    }

    /// Id of the decision or agent the current page is about
    pub fn subject(&self) -> Option<&str> {
        let view = self.console.view();
        match view.screen() {
            Screen::Dashboard => view.selected_decision(),
            Screen::AgentCenter => view.agent_center().agent().map(|a| a.id.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StreamCatalog;
    use crate::conversation::{ReplyScheduler, DEFAULT_REPLY_TEXT};
    use crate::detail::{DetailTable, StreamDetailResolver};
    use tokio::sync::mpsc;

    fn app() -> App {
        let (tx, _rx) = mpsc::channel(4);
        let console = Console::new(
            StreamCatalog::builtin(),
            StreamDetailResolver::new(DetailTable::builtin().unwrap()),
            ReplyScheduler::new(tx, Duration::from_millis(1000)),
            DEFAULT_REPLY_TEXT,
            Screen::Dashboard,
        );
        App::new(console, LogBuffer::new(), &Config::default())
    }

    #[test]
    fn test_step_clamps() {
        assert_eq!(step(0, 0, true), 0);
        assert_eq!(step(2, 3, true), 2);
        assert_eq!(step(0, 3, false), 0);
        assert_eq!(step(1, 3, true), 2);
    }

    #[test]
    fn test_feed_enter_opens_alert() {
        let mut app = app();
        app.open_selected_feed();
        assert_eq!(app.console.view().selected_decision(), Some("DS-04"));
        assert_eq!(app.location(), "决策详情");
        assert_eq!(app.subject(), Some("DS-04"));
    }

    #[test]
    fn test_subject_follows_screen() {
        let mut app = app();
        assert_eq!(app.subject(), None);

        app.console.switch_screen(Screen::AgentCenter);
        assert!(app.console.open_agent("A-002"));
        assert_eq!(app.subject(), Some("A-002"));

        app.console.close_agent();
        assert_eq!(app.subject(), None);
    }

    #[test]
    fn test_config_row_zero_creates_stream() {
        let mut app = app();
        app.console.toggle_mode();
        app.open_selected_stream();
        let draft = app.console.view().draft().unwrap();
        assert!(draft.is_new());

        app.console.close_editor();
        app.stream_move(true);
        app.open_selected_stream();
        assert_eq!(
            app.console.view().draft().map(|d| d.stream().id.as_str()),
            Some("DS-01")
        );
    }

    #[test]
    fn test_editor_library_add_and_remove() {
        let mut app = app();
        app.console.toggle_mode();
        app.open_selected_stream();
        app.toggle_editor_focus();
        app.editor_move(true);
        app.add_library_agent();
        assert_eq!(
            app.console.view().draft().unwrap().stream().agent_ids,
            vec!["A-002"]
        );

        app.toggle_editor_focus();
        app.remove_pipeline_agent();
        assert!(app.console.view().draft().unwrap().stream().agent_ids.is_empty());
    }

    #[test]
    fn test_typing_only_with_open_decision() {
        let mut app = app();
        app.detail_focus = DetailFocus::Chat;
        assert!(!app.is_typing());
        app.open_decision("DS-05");
        app.detail_focus = DetailFocus::Chat;
        assert!(app.is_typing());
        app.close_decision();
        assert!(!app.is_typing());
    }
}
