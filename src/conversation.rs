// Copilot conversation log
//
// Append-only transcript attached to an open decision. The log is reseeded
// when a different decision is opened; user sends append immediately and
// each one schedules exactly one simulated agent reply on the event channel.

use crate::events::ConsoleEvent;
use chrono::Local;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

/// Default acknowledgment appended after every user message
pub const DEFAULT_REPLY_TEXT: &str = "已收到指令。正在根据当前约束条件重新评估决策参数...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChatRole {
    Agent,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    /// 1-based position in the conversation
    pub id: u32,
    pub role: ChatRole,
    pub content: String,
    pub time: String,
}

/// Ticket for a reply owed to a specific conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingReply {
    pub conversation_id: u64,
    /// Id of the user message being answered
    pub in_reply_to: u32,
}

fn next_conversation_id() -> u64 {
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    COUNTER.fetch_add(1, Ordering::Relaxed)
}

fn clock_now() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

/// Ordered chat transcript plus the pending input line
#[derive(Debug, Clone)]
pub struct ConversationLog {
    conversation_id: u64,
    messages: Vec<ChatMessage>,
    input: String,
}

impl ConversationLog {
    /// Start a conversation from seed messages
    pub fn seeded(messages: Vec<ChatMessage>) -> Self {
        let mut log = Self {
            conversation_id: 0,
            messages: Vec::new(),
            input: String::new(),
        };
        log.seed(messages);
        log
    }

    /// Replace the whole transcript and start a new conversation lifetime.
    /// Replies owed to the previous lifetime are dropped when they arrive.
    pub fn seed(&mut self, messages: Vec<ChatMessage>) {
        self.conversation_id = next_conversation_id();
        self.messages = messages;
        self.input.clear();
    }

    pub fn conversation_id(&self) -> u64 {
        self.conversation_id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    // ─── Pending input ──────────────────────────────────────

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn push_input(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_input(&mut self) {
        self.input.pop();
    }

    /// Send whatever is in the input line
    pub fn submit_input(&mut self) -> Option<PendingReply> {
        let text = std::mem::take(&mut self.input);
        let reply = self.send_user_message(&text);
        if reply.is_none() {
            // whitespace-only input stays editable
            self.input = text;
        }
        reply
    }

    /// Append a user message. Blank text is ignored.
    pub fn send_user_message(&mut self, text: &str) -> Option<PendingReply> {
        if text.trim().is_empty() {
            return None;
        }

        let id = self.next_id();
        self.messages.push(ChatMessage {
            id,
            role: ChatRole::User,
            content: text.to_string(),
            time: clock_now(),
        });
        self.input.clear();

        Some(PendingReply {
            conversation_id: self.conversation_id,
            in_reply_to: id,
        })
    }

    /// Append the agent reply for `reply`.
    /// Returns false (and appends nothing) when the ticket belongs to an
    /// earlier conversation lifetime.
    pub fn append_agent_reply(&mut self, reply: PendingReply, content: &str) -> bool {
        if reply.conversation_id != self.conversation_id {
            return false;
        }

        let id = self.next_id();
        self.messages.push(ChatMessage {
            id,
            role: ChatRole::Agent,
            content: content.to_string(),
            time: clock_now(),
        });
        true
    }

    fn next_id(&self) -> u32 {
        self.messages.len() as u32 + 1
    }
}

/// Schedules simulated agent replies.
///
/// Each scheduled reply is an independent single-shot task: it sleeps the
/// configured delay, then posts `ConsoleEvent::AgentReply`. Tasks are never
/// cancelled or merged, so N sends produce N replies.
#[derive(Debug, Clone)]
pub struct ReplyScheduler {
    tx: mpsc::Sender<ConsoleEvent>,
    delay: Duration,
}

impl ReplyScheduler {
    pub fn new(tx: mpsc::Sender<ConsoleEvent>, delay: Duration) -> Self {
        Self { tx, delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn schedule(&self, reply: PendingReply) {
        let tx = self.tx.clone();
        let delay = self.delay;
        tracing::debug!(
            conversation = reply.conversation_id,
            message_id = reply.in_reply_to,
            "Scheduling agent reply in {:?}",
            delay
        );
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(ConsoleEvent::AgentReply(reply)).await.is_err() {
                tracing::debug!("Event channel closed, dropping agent reply");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(n: u32) -> Vec<ChatMessage> {
        (1..=n)
            .map(|id| ChatMessage {
                id,
                role: ChatRole::Agent,
                content: format!("seed {id}"),
                time: "09:00".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_blank_messages_are_ignored() {
        let mut log = ConversationLog::seeded(seed(2));
        assert!(log.send_user_message("").is_none());
        assert!(log.send_user_message("   ").is_none());
        assert!(log.send_user_message("\t\n").is_none());
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_user_message_gets_next_id() {
        let mut log = ConversationLog::seeded(seed(2));
        let reply = log.send_user_message("x").unwrap();

        assert_eq!(log.len(), 3);
        let last = log.messages().last().unwrap();
        assert_eq!(last.id, 3);
        assert_eq!(last.role, ChatRole::User);
        assert_eq!(last.content, "x");
        assert_eq!(reply.in_reply_to, 3);
        assert_eq!(reply.conversation_id, log.conversation_id());
    }

    #[test]
    fn test_ids_strictly_increase() {
        let mut log = ConversationLog::seeded(seed(2));
        let first = log.send_user_message("a").unwrap();
        log.send_user_message("b").unwrap();
        assert!(log.append_agent_reply(first, DEFAULT_REPLY_TEXT));
        log.send_user_message("c").unwrap();

        let ids: Vec<u32> = log.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_submit_input_clears_pending_text() {
        let mut log = ConversationLog::seeded(seed(1));
        for c in "调整间隙".chars() {
            log.push_input(c);
        }
        assert!(log.submit_input().is_some());
        assert_eq!(log.input(), "");
        assert_eq!(log.messages().last().unwrap().content, "调整间隙");
    }

    #[test]
    fn test_submit_whitespace_keeps_input() {
        let mut log = ConversationLog::seeded(seed(1));
        log.push_input(' ');
        assert!(log.submit_input().is_none());
        assert_eq!(log.input(), " ");
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_reseed_replaces_messages_and_drops_stale_replies() {
        let mut log = ConversationLog::seeded(seed(2));
        let stale = log.send_user_message("x").unwrap();

        log.seed(seed(1));
        assert_eq!(log.len(), 1);
        assert_ne!(log.conversation_id(), stale.conversation_id);
        assert!(!log.append_agent_reply(stale, DEFAULT_REPLY_TEXT));
        assert_eq!(log.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduler_posts_one_reply_after_delay() {
        let (tx, mut rx) = mpsc::channel(16);
        let scheduler = ReplyScheduler::new(tx, Duration::from_millis(1000));
        let mut log = ConversationLog::seeded(seed(2));

        let reply = log.send_user_message("x").unwrap();
        scheduler.schedule(reply);
        assert_eq!(log.len(), 3);
        assert!(rx.try_recv().is_err());

        let start = tokio::time::Instant::now();
        let received = match rx.recv().await {
            Some(ConsoleEvent::AgentReply(reply)) => reply,
            other => panic!("expected AgentReply, got {:?}", other),
        };
        assert!(start.elapsed() >= Duration::from_millis(1000));
        assert_eq!(received, reply);

        assert!(log.append_agent_reply(received, DEFAULT_REPLY_TEXT));
        assert_eq!(log.len(), 4);
        let last = log.messages().last().unwrap();
        assert_eq!(last.role, ChatRole::Agent);
        assert_eq!(last.id, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_sends_each_get_a_reply() {
        let (tx, mut rx) = mpsc::channel(16);
        let scheduler = ReplyScheduler::new(tx, Duration::from_millis(1000));
        let mut log = ConversationLog::seeded(seed(2));

        for text in ["a", "b", "c"] {
            let reply = log.send_user_message(text).unwrap();
            scheduler.schedule(reply);
        }

        for _ in 0..3 {
            let reply = match rx.recv().await {
                Some(ConsoleEvent::AgentReply(reply)) => reply,
                other => panic!("expected AgentReply, got {:?}", other),
            };
            assert!(log.append_agent_reply(reply, DEFAULT_REPLY_TEXT));
        }

        assert_eq!(log.len(), 8);
        let agent_replies = log
            .messages()
            .iter()
            .skip(2)
            .filter(|m| m.role == ChatRole::Agent)
            .count();
        assert_eq!(agent_replies, 3);
        assert!(log.messages().windows(2).all(|w| w[0].id < w[1].id));
    }
}
