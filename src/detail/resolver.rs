// Decision id -> detail resolution
//
// Lookup is an explicit two-branch match: a curated record when one exists,
// a generated placeholder otherwise. The tag survives into the console so
// the presentation layer can tell real scenarios from synthetic ones.

use super::{DetailTable, StatusLevel, StreamDetailData, TrendPoint};
use crate::conversation::{ChatMessage, ChatRole};

/// Title shown for streams without curated data
pub const FALLBACK_TITLE: &str = "通用决策流详情";

/// Seed message shown for streams without curated data
pub const FALLBACK_MESSAGE: &str = "系统正在聚合该决策流的实时数据...";

/// Result of resolving a decision id
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    /// Hand-authored scenario, returned as stored
    Curated(&'a StreamDetailData),
    /// Placeholder generated for an id with no scenario
    Fallback(StreamDetailData),
}

impl Resolution<'_> {
    pub fn is_curated(&self) -> bool {
        matches!(self, Resolution::Curated(_))
    }

    pub fn detail(&self) -> &StreamDetailData {
        match self {
            Resolution::Curated(detail) => detail,
            Resolution::Fallback(detail) => detail,
        }
    }

    pub fn into_detail(self) -> StreamDetailData {
        match self {
            Resolution::Curated(detail) => detail.clone(),
            Resolution::Fallback(detail) => detail,
        }
    }
}

/// Maps decision ids to detail records
#[derive(Debug, Clone, Default)]
pub struct StreamDetailResolver {
    table: DetailTable,
}

impl StreamDetailResolver {
    pub fn new(table: DetailTable) -> Self {
        Self { table }
    }

    /// Resolve any id; never fails
    pub fn resolve(&self, decision_id: &str) -> Resolution<'_> {
        match self.table.get(decision_id) {
            Some(detail) => Resolution::Curated(detail),
            None => Resolution::Fallback(fallback_detail(decision_id)),
        }
    }

    pub fn table(&self) -> &DetailTable {
        &self.table
    }
}

fn fallback_detail(decision_id: &str) -> StreamDetailData {
    StreamDetailData {
        title: FALLBACK_TITLE.to_string(),
        subtitle: format!("Stream ID: {}", decision_id),
        status: StatusLevel::Processing,
        y_axis_range: [0.0, 100.0],
        trend_series: vec![TrendPoint {
            time: "Now".to_string(),
            value: 50.0,
        }],
        trace_chain: Vec::new(),
        seed_messages: vec![ChatMessage {
            id: 1,
            role: ChatRole::Agent,
            content: FALLBACK_MESSAGE.to_string(),
            time: "Now".to_string(),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> StreamDetailResolver {
        StreamDetailResolver::new(DetailTable::builtin().unwrap())
    }

    #[test]
    fn test_known_ids_return_the_stored_record() {
        let resolver = resolver();
        for id in resolver.table().ids() {
            let resolution = resolver.resolve(id);
            assert!(resolution.is_curated(), "{id} should be curated");
            assert_eq!(Some(resolution.detail()), resolver.table().get(id));
        }
    }

    #[test]
    fn test_ds04_trace_chain_and_seed() {
        let resolver = resolver();
        let detail = resolver.resolve("DS-04").into_detail();

        let labels: Vec<&str> = detail.trace_chain.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["IoT感知", "设备归因", "物料关联", "质量预测"]);
        assert!(detail.seed_messages[0]
            .content
            .starts_with("监测到 #3 涂布机左侧面密度偏差"));
    }

    #[test]
    fn test_ds05_is_verified_and_ends_in_automatic_control() {
        let resolver = resolver();
        let detail = resolver.resolve("DS-05").into_detail();

        assert_eq!(detail.status, StatusLevel::Verified);
        assert_eq!(detail.trace_chain.len(), 3);
        assert_eq!(detail.trace_chain.last().unwrap().kind, "自动控制");
    }

    #[test]
    fn test_unknown_id_falls_back() {
        let resolver = resolver();
        let resolution = resolver.resolve("DS-99");
        assert!(!resolution.is_curated());

        let detail = resolution.detail();
        assert_eq!(detail.title, FALLBACK_TITLE);
        assert!(detail.subtitle.contains("DS-99"));
        assert_eq!(detail.status, StatusLevel::Processing);
        assert_eq!(detail.y_axis_range, [0.0, 100.0]);
        assert_eq!(detail.trend_series.len(), 1);
        assert_eq!(detail.trend_series[0].time, "Now");
        assert!(detail.trace_chain.is_empty());
        assert_eq!(detail.seed_messages.len(), 1);
        assert_eq!(detail.seed_messages[0].role, ChatRole::Agent);
        assert_eq!(detail.seed_messages[0].content, FALLBACK_MESSAGE);
    }

    #[test]
    fn test_fallback_accepts_any_string() {
        let resolver = resolver();
        for id in ["", "   ", "ds-04", "DS-03", "流-1"] {
            let detail = resolver.resolve(id).into_detail();
            assert!(detail.trace_chain.is_empty(), "{id:?}");
            assert_eq!(detail.seed_messages.len(), 1);
            assert!(detail.validate(id).is_ok());
        }
    }
}
