// Low-code stream editor draft
//
// The editor works on a private copy of the stream. Edits change only the
// copy; nothing is written back to the catalog. Ids the catalog doesn't know
// are dropped from the copy, so the cursor always points at a shown agent.

use crate::catalog::{Agent, DecisionStream, StreamCatalog};

#[derive(Debug, Clone, PartialEq)]
pub struct StreamDraft {
    stream: DecisionStream,
    /// Pipeline slot under the cursor
    cursor: usize,
    dirty: bool,
}

impl StreamDraft {
    pub fn new(mut stream: DecisionStream, catalog: &StreamCatalog) -> Self {
        let before = stream.agent_ids.len();
        stream.agent_ids.retain(|id| catalog.agent(id).is_some());
        if stream.agent_ids.len() < before {
            tracing::debug!(
                stream = %stream.id,
                dropped = before - stream.agent_ids.len(),
                "Dropped unknown agents from draft"
            );
        }
        Self {
            stream,
            cursor: 0,
            dirty: false,
        }
    }

    /// Empty draft for a stream that doesn't exist yet
    pub fn blank() -> Self {
        Self {
            stream: DecisionStream::blank(),
            cursor: 0,
            dirty: false,
        }
    }

    pub fn stream(&self) -> &DecisionStream {
        &self.stream
    }

    pub fn is_new(&self) -> bool {
        self.stream.id == crate::catalog::NEW_STREAM_ID
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Pipeline as shown on the canvas; dangling ids are left out
    pub fn pipeline<'a>(&'a self, catalog: &'a StreamCatalog) -> Vec<&'a Agent> {
        catalog.participants(&self.stream)
    }

    /// Append an agent to the end of the pipeline. An agent appears at most
    /// once; returns false if it was already there.
    pub fn add_agent(&mut self, agent_id: &str) -> bool {
        if self.stream.agent_ids.iter().any(|id| id == agent_id) {
            return false;
        }
        self.stream.agent_ids.push(agent_id.to_string());
        self.dirty = true;
        true
    }

    /// Remove the agent under the cursor
    pub fn remove_selected(&mut self) -> Option<String> {
        if self.cursor >= self.stream.agent_ids.len() {
            return None;
        }
        let removed = self.stream.agent_ids.remove(self.cursor);
        self.cursor = self
            .cursor
            .min(self.stream.agent_ids.len().saturating_sub(1));
        self.dirty = true;
        Some(removed)
    }

    pub fn cursor_next(&mut self) {
        if self.cursor + 1 < self.stream.agent_ids.len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_previous(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }
}
