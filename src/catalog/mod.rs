//! Static catalog of decision streams and agents
//!
//! Loaded once at startup and never mutated. Streams reference agents by id
//! (many-to-many); ids that don't resolve are skipped when a stream's
//! participant list is materialised.

mod seed;

use crate::detail::StatusLevel;
use serde::Serialize;

/// Lifecycle state of a decision stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreamStatus {
    Active,
    Paused,
    Draft,
}

impl StreamStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamStatus::Active => "ACTIVE",
            StreamStatus::Paused => "PAUSED",
            StreamStatus::Draft => "DRAFT",
        }
    }

    /// Badge level used in stream lists and the editor header
    pub fn badge(&self) -> StatusLevel {
        match self {
            StreamStatus::Active => StatusLevel::Verified,
            StreamStatus::Paused => StatusLevel::Uncertain,
            StreamStatus::Draft => StatusLevel::Processing,
        }
    }
}

/// Decision style of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentStyle {
    #[default]
    Conservative,
    Aggressive,
}

impl AgentStyle {
    pub fn label(&self) -> &'static str {
        match self {
            AgentStyle::Conservative => "保守 (Conservative)",
            AgentStyle::Aggressive => "激进 (Aggressive)",
        }
    }

    pub fn badge(&self) -> StatusLevel {
        match self {
            AgentStyle::Conservative => StatusLevel::Verified,
            AgentStyle::Aggressive => StatusLevel::Risk,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub role: String,
    pub capabilities: Vec<String>,
    pub style: AgentStyle,
    /// Percent, 0-100
    pub risk_tolerance: u8,
    pub recent_activity: String,
}

/// Sentinel id of an agent being created
pub const NEW_AGENT_ID: &str = "A-NEW";

impl Agent {
    /// Blank template opened by "create agent"
    pub fn blank() -> Self {
        Self {
            id: NEW_AGENT_ID.to_string(),
            name: "新智能体".to_string(),
            role: String::new(),
            capabilities: Vec::new(),
            style: AgentStyle::Conservative,
            risk_tolerance: 0,
            recent_activity: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionStream {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: StreamStatus,
    /// Participating agents in pipeline order
    pub agent_ids: Vec<String>,
    pub updated_at: String,
}

/// Sentinel id of a stream being created
pub const NEW_STREAM_ID: &str = "NEW";

impl DecisionStream {
    /// Blank draft opened by "new stream"
    pub fn blank() -> Self {
        Self {
            id: NEW_STREAM_ID.to_string(),
            name: "新决策流".to_string(),
            description: "点击配置".to_string(),
            status: StreamStatus::Draft,
            agent_ids: Vec::new(),
            updated_at: "Now".to_string(),
        }
    }
}

/// Read-only registry of streams and agents
#[derive(Debug, Clone, Default)]
pub struct StreamCatalog {
    streams: Vec<DecisionStream>,
    agents: Vec<Agent>,
}

impl StreamCatalog {
    pub fn new(streams: Vec<DecisionStream>, agents: Vec<Agent>) -> Self {
        Self { streams, agents }
    }

    /// The catalog shipped with the console
    pub fn builtin() -> Self {
        Self::new(seed::streams(), seed::agents())
    }

    pub fn streams(&self) -> &[DecisionStream] {
        &self.streams
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn stream(&self, id: &str) -> Option<&DecisionStream> {
        self.streams.iter().find(|s| s.id == id)
    }

    pub fn agent(&self, id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Materialised participant list of a stream, in pipeline order.
    /// Ids with no matching agent are skipped.
    pub fn participants(&self, stream: &DecisionStream) -> Vec<&Agent> {
        stream
            .agent_ids
            .iter()
            .filter_map(|id| {
                let agent = self.agent(id);
                if agent.is_none() {
                    tracing::trace!("Skipping unknown agent {} in stream {}", id, stream.id);
                }
                agent
            })
            .collect()
    }

    pub fn active_streams(&self) -> impl Iterator<Item = &DecisionStream> {
        self.streams
            .iter()
            .filter(|s| s.status == StreamStatus::Active)
    }

    /// Streams an agent takes part in
    pub fn streams_with_agent(&self, agent_id: &str) -> Vec<&DecisionStream> {
        self.streams
            .iter()
            .filter(|s| s.agent_ids.iter().any(|id| id == agent_id))
            .collect()
    }
}
