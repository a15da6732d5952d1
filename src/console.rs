// Console state
//
// Owns the catalog, the detail resolver and the view state machine, plus the
// session bound to the open decision. Opening a decision resolves its detail
// and seeds the trace and chat from it; the session lives exactly as long as
// the detail overlay does.

use crate::catalog::StreamCatalog;
use crate::conversation::{ConversationLog, ReplyScheduler};
use crate::detail::{StreamDetailData, StreamDetailResolver};
use crate::editor::StreamDraft;
use crate::events::ConsoleEvent;
use crate::trace::TraceChainModel;
use crate::view::{AgentTab, Screen, ViewController};

/// Everything bound to the currently open decision
#[derive(Debug, Clone)]
pub struct DecisionSession {
    pub decision_id: String,
    /// False when the detail is a generated placeholder
    pub curated: bool,
    pub detail: StreamDetailData,
    pub trace: TraceChainModel,
    pub conversation: ConversationLog,
}

impl DecisionSession {
    fn open(decision_id: &str, resolver: &StreamDetailResolver) -> Self {
        let resolution = resolver.resolve(decision_id);
        let curated = resolution.is_curated();
        let detail = resolution.into_detail();
        let trace = TraceChainModel::from_detail(&detail);
        let conversation = ConversationLog::seeded(detail.seed_messages.clone());
        Self {
            decision_id: decision_id.to_string(),
            curated,
            detail,
            trace,
            conversation,
        }
    }
}

pub struct Console {
    catalog: StreamCatalog,
    resolver: StreamDetailResolver,
    view: ViewController,
    session: Option<DecisionSession>,
    replies: ReplyScheduler,
    reply_text: String,
}

impl Console {
    pub fn new(
        catalog: StreamCatalog,
        resolver: StreamDetailResolver,
        replies: ReplyScheduler,
        reply_text: impl Into<String>,
        start_screen: Screen,
    ) -> Self {
        Self {
            catalog,
            resolver,
            view: ViewController::new(start_screen),
            session: None,
            replies,
            reply_text: reply_text.into(),
        }
    }

    pub fn catalog(&self) -> &StreamCatalog {
        &self.catalog
    }

    pub fn view(&self) -> &ViewController {
        &self.view
    }

    pub fn session(&self) -> Option<&DecisionSession> {
        self.session.as_ref()
    }

    pub fn replies(&self) -> &ReplyScheduler {
        &self.replies
    }

    // ─── Navigation ─────────────────────────────────────────

    pub fn switch_screen(&mut self, screen: Screen) {
        self.view.switch_screen(screen);
    }

    pub fn toggle_mode(&mut self) -> bool {
        self.view.toggle_mode()
    }

    /// Open a catalog stream in the editor
    pub fn edit_stream(&mut self, stream_id: &str) -> bool {
        match self.catalog.stream(stream_id) {
            Some(stream) => self
                .view
                .open_editor(StreamDraft::new(stream.clone(), &self.catalog)),
            None => false,
        }
    }

    pub fn create_stream(&mut self) -> bool {
        self.view.create_stream()
    }

    pub fn close_editor(&mut self) {
        self.view.close_editor();
    }

    pub fn draft_mut(&mut self) -> Option<&mut StreamDraft> {
        self.view.draft_mut()
    }

    pub fn open_agent(&mut self, agent_id: &str) -> bool {
        match self.catalog.agent(agent_id) {
            Some(agent) => {
                self.view.open_agent(agent.clone());
                true
            }
            None => false,
        }
    }

    pub fn create_agent(&mut self) {
        self.view.create_agent();
    }

    pub fn close_agent(&mut self) {
        self.view.close_agent();
    }

    pub fn set_agent_tab(&mut self, tab: AgentTab) {
        self.view.set_agent_tab(tab);
    }

    // ─── Decision detail ────────────────────────────────────

    /// Show the detail for `decision_id`. The trace and chat are reseeded
    /// only when the id differs from the one already open.
    pub fn open_decision(&mut self, decision_id: &str) -> bool {
        if !self.view.open_decision(decision_id) && self.session.is_some() {
            return false;
        }

        let session = DecisionSession::open(decision_id, &self.resolver);
        tracing::info!(
            decision = decision_id,
            curated = session.curated,
            conversation = session.conversation.conversation_id(),
            messages = session.conversation.len(),
            "Opened decision {}",
            session.detail.title
        );
        self.session = Some(session);
        true
    }

    pub fn close_decision(&mut self) {
        if let Some(id) = self.view.close_decision() {
            tracing::debug!(decision = %id, "Closed decision");
        }
        self.session = None;
    }

    pub fn select_trace_node(&mut self, node_id: u32) -> bool {
        self.session
            .as_mut()
            .map(|s| s.trace.select_node(node_id))
            .unwrap_or(false)
    }

    pub fn select_next_node(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.trace.select_next();
        }
    }

    pub fn select_previous_node(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.trace.select_previous();
        }
    }

    // ─── Copilot chat ───────────────────────────────────────

    pub fn push_input(&mut self, c: char) {
        if let Some(session) = self.session.as_mut() {
            session.conversation.push_input(c);
        }
    }

    pub fn pop_input(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.conversation.pop_input();
        }
    }

    /// Send the pending input line. Returns true if a message went out.
    pub fn submit_input(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        match session.conversation.submit_input() {
            Some(reply) => {
                tracing::debug!(
                    decision = %session.decision_id,
                    message_id = reply.in_reply_to,
                    "Scheduled Copilot reply"
                );
                self.replies.schedule(reply);
                true
            }
            None => false,
        }
    }

    /// Apply an event from the background channel
    pub fn handle_event(&mut self, event: ConsoleEvent) {
        match event {
            ConsoleEvent::AgentReply(reply) => {
                let appended = self
                    .session
                    .as_mut()
                    .map(|s| s.conversation.append_agent_reply(reply, &self.reply_text))
                    .unwrap_or(false);
                if !appended {
                    tracing::debug!(
                        conversation = reply.conversation_id,
                        message_id = reply.in_reply_to,
                        "Dropping reply for a closed conversation"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::{ChatRole, DEFAULT_REPLY_TEXT};
    use crate::detail::DetailTable;
    use crate::view::DashboardView;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn send(console: &mut Console, text: &str) -> bool {
        for c in text.chars() {
            console.push_input(c);
        }
        console.submit_input()
    }

    fn console() -> (Console, mpsc::Receiver<ConsoleEvent>) {
        let (tx, rx) = mpsc::channel(16);
        let resolver = StreamDetailResolver::new(DetailTable::builtin().unwrap());
        let console = Console::new(
            StreamCatalog::builtin(),
            resolver,
            ReplyScheduler::new(tx, Duration::from_millis(1000)),
            DEFAULT_REPLY_TEXT,
            Screen::Dashboard,
        );
        (console, rx)
    }

    async fn deliver(console: &mut Console, rx: &mut mpsc::Receiver<ConsoleEvent>) {
        match rx.recv().await {
            Some(event) => console.handle_event(event),
            None => panic!("event channel closed"),
        }
    }

    #[test]
    fn test_open_decision_seeds_session() {
        let (mut console, _rx) = console();
        assert!(console.open_decision("DS-04"));

        let session = console.session().unwrap();
        assert!(session.curated);
        assert_eq!(session.trace.active_node().map(|n| n.id), Some(1));
        assert_eq!(session.conversation.len(), session.detail.seed_messages.len());
        assert_eq!(console.view().dashboard_view(), DashboardView::DecisionDetail);
    }

    #[test]
    fn test_unknown_decision_opens_fallback() {
        let (mut console, _rx) = console();
        console.open_decision("DS-99");

        let session = console.session().unwrap();
        assert!(!session.curated);
        assert_eq!(session.detail.subtitle, "Stream ID: DS-99");
        assert!(session.trace.active_node().is_none());
        assert!(!console.select_trace_node(1));
    }

    #[test]
    fn test_reopening_same_decision_keeps_state() {
        let (mut console, _rx) = console();
        console.open_decision("DS-04");
        console.select_trace_node(3);
        let conversation = console.session().unwrap().conversation.conversation_id();

        assert!(!console.open_decision("DS-04"));
        let session = console.session().unwrap();
        assert_eq!(session.trace.active_node().map(|n| n.id), Some(3));
        assert_eq!(session.conversation.conversation_id(), conversation);

        assert!(console.open_decision("DS-05"));
        assert_eq!(console.session().unwrap().decision_id, "DS-05");
        assert_eq!(
            console.session().unwrap().trace.active_node().map(|n| n.id),
            Some(1)
        );
    }

    #[test]
    fn test_close_decision_drops_session() {
        let (mut console, _rx) = console();
        console.open_decision("DS-01");
        console.close_decision();
        assert!(console.session().is_none());
        assert_eq!(console.view().dashboard_view(), DashboardView::Monitor);
        assert!(!send(&mut console, "x"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_appends_user_then_agent() {
        let (mut console, mut rx) = console();
        console.open_decision("DS-04");
        let seeded = console.session().unwrap().conversation.len();

        assert!(send(&mut console, "请给出调整方案"));
        assert_eq!(console.session().unwrap().conversation.len(), seeded + 1);

        deliver(&mut console, &mut rx).await;
        let log = &console.session().unwrap().conversation;
        assert_eq!(log.len(), seeded + 2);
        let last = log.messages().last().unwrap();
        assert_eq!(last.role, ChatRole::Agent);
        assert_eq!(last.content, DEFAULT_REPLY_TEXT);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_input_uses_pending_line() {
        let (mut console, mut rx) = console();
        console.open_decision("DS-05");
        for c in "ok".chars() {
            console.push_input(c);
        }
        console.push_input('!');
        console.pop_input();
        assert!(console.submit_input());

        deliver(&mut console, &mut rx).await;
        let log = &console.session().unwrap().conversation;
        let user = &log.messages()[log.len() - 2];
        assert_eq!(user.content, "ok");
        assert_eq!(log.input(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_after_switching_decision_is_dropped() {
        let (mut console, mut rx) = console();
        console.open_decision("DS-04");
        send(&mut console, "x");

        console.open_decision("DS-05");
        let seeded = console.session().unwrap().conversation.len();
        deliver(&mut console, &mut rx).await;
        assert_eq!(console.session().unwrap().conversation.len(), seeded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_after_close_is_dropped() {
        let (mut console, mut rx) = console();
        console.open_decision("DS-04");
        send(&mut console, "x");
        console.close_decision();

        deliver(&mut console, &mut rx).await;
        assert!(console.session().is_none());
    }

    #[test]
    fn test_edit_and_agent_lookups() {
        let (mut console, _rx) = console();
        assert!(!console.edit_stream("DS-01"));
        console.toggle_mode();
        assert!(!console.edit_stream("DS-404"));
        assert!(console.edit_stream("DS-01"));
        assert!(console.draft_mut().unwrap().add_agent("A-009"));

        assert!(console.open_agent("A-002"));
        assert!(!console.open_agent("A-404"));
    }
}
