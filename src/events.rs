// Events that flow from background tasks to the console event loop
//
// Everything that mutates console state off the keyboard path arrives here
// as a ConsoleEvent on an mpsc channel, so all mutation stays on the single
// event-loop task.

use crate::conversation::PendingReply;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEvent {
    /// A simulated Copilot reply timer fired
    AgentReply(PendingReply),
}

/// Default capacity of the console event channel
pub const EVENT_CHANNEL_CAPACITY: usize = 256;
