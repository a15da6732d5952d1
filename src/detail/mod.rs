//! Decision detail model
//!
//! A decision detail is what the console shows once an alert or stream row is
//! opened: the headline, a short trend series, the traceability chain that
//! explains why the decision fired, and the Copilot conversation seed.

mod curated;
mod resolver;

pub use curated::DetailTable;
pub use resolver::StreamDetailResolver;

use crate::conversation::ChatMessage;
use serde::Serialize;
use thiserror::Error;

/// Severity/progress level shared by trace nodes, details and badges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusLevel {
    Risk,
    Uncertain,
    Normal,
    Processing,
    Verified,
}

impl StatusLevel {
    /// Badge label
    pub fn label(&self) -> &'static str {
        match self {
            StatusLevel::Risk => "风险",
            StatusLevel::Uncertain => "待确认",
            StatusLevel::Normal => "正常",
            StatusLevel::Processing => "处理中",
            StatusLevel::Verified => "已验证",
        }
    }
}

/// Direction marker on a trace metric
// Part of the record format; the shipped scenarios set none
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
}

/// One causal checkpoint in a traceability chain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceNode {
    /// Position-ordered id, unique within its chain
    pub id: u32,
    pub label: String,
    /// Source category of the checkpoint ("传感器", "自动控制", ...)
    #[serde(rename = "type")]
    pub kind: String,
    pub status: StatusLevel,
    pub timestamp: String,
    pub description: String,
    pub metrics: Vec<Metric>,
    pub evidence: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub time: String,
    pub value: f64,
}

/// Everything the detail screen needs for one decision
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamDetailData {
    pub title: String,
    pub subtitle: String,
    pub status: StatusLevel,
    pub y_axis_range: [f64; 2],
    pub trend_series: Vec<TrendPoint>,
    pub trace_chain: Vec<TraceNode>,
    pub seed_messages: Vec<ChatMessage>,
}

/// Malformed curated detail record
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("detail {decision_id}: y axis range [{min}, {max}] is empty")]
    EmptyAxisRange {
        decision_id: String,
        min: f64,
        max: f64,
    },

    #[error("detail {decision_id}: trace node id {node_id} appears more than once")]
    DuplicateTraceNode { decision_id: String, node_id: u32 },

    #[error("detail {decision_id}: seed message #{position} has id {found}, expected {expected}")]
    SeedMessageId {
        decision_id: String,
        position: usize,
        expected: u32,
        found: u32,
    },
}

impl StreamDetailData {
    /// Check the structural rules the console relies on.
    ///
    /// Conversation ids continue from the seed length, so seeds must be
    /// numbered 1..=N in order.
    pub fn validate(&self, decision_id: &str) -> Result<(), CatalogError> {
        let [min, max] = self.y_axis_range;
        if min.partial_cmp(&max) != Some(std::cmp::Ordering::Less) {
            return Err(CatalogError::EmptyAxisRange {
                decision_id: decision_id.to_string(),
                min,
                max,
            });
        }

        for (i, node) in self.trace_chain.iter().enumerate() {
            if self.trace_chain[..i].iter().any(|n| n.id == node.id) {
                return Err(CatalogError::DuplicateTraceNode {
                    decision_id: decision_id.to_string(),
                    node_id: node.id,
                });
            }
        }

        for (i, message) in self.seed_messages.iter().enumerate() {
            let expected = i as u32 + 1;
            if message.id != expected {
                return Err(CatalogError::SeedMessageId {
                    decision_id: decision_id.to_string(),
                    position: i,
                    expected,
                    found: message.id,
                });
            }
        }

        Ok(())
    }

    /// Last value of the trend series, if any
    pub fn latest_value(&self) -> Option<f64> {
        self.trend_series.last().map(|p| p.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::ChatRole;

    fn sample() -> StreamDetailData {
        StreamDetailData {
            title: "t".to_string(),
            subtitle: "s".to_string(),
            status: StatusLevel::Normal,
            y_axis_range: [0.0, 10.0],
            trend_series: vec![TrendPoint {
                time: "Now".to_string(),
                value: 3.0,
            }],
            trace_chain: vec![],
            seed_messages: vec![ChatMessage {
                id: 1,
                role: ChatRole::Agent,
                content: "hi".to_string(),
                time: "Now".to_string(),
            }],
        }
    }

    fn node(id: u32) -> TraceNode {
        TraceNode {
            id,
            label: format!("n{id}"),
            kind: "k".to_string(),
            status: StatusLevel::Normal,
            timestamp: "00:00".to_string(),
            description: String::new(),
            metrics: vec![],
            evidence: vec![],
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_detail() {
        assert_eq!(sample().validate("DS-T"), Ok(()));
    }

    #[test]
    fn test_validate_rejects_inverted_axis() {
        let mut detail = sample();
        detail.y_axis_range = [5.0, 5.0];
        assert!(matches!(
            detail.validate("DS-T"),
            Err(CatalogError::EmptyAxisRange { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_node_ids() {
        let mut detail = sample();
        detail.trace_chain = vec![node(1), node(2), node(1)];
        assert_eq!(
            detail.validate("DS-T"),
            Err(CatalogError::DuplicateTraceNode {
                decision_id: "DS-T".to_string(),
                node_id: 1
            })
        );
    }

    #[test]
    fn test_validate_rejects_gapped_seed_ids() {
        let mut detail = sample();
        detail.seed_messages[0].id = 2;
        assert!(matches!(
            detail.validate("DS-T"),
            Err(CatalogError::SeedMessageId { expected: 1, found: 2, .. })
        ));
    }
}
