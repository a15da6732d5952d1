// Monitor dashboard content
//
// KPI cards, decision distribution and system health are static snapshots.
// The realtime feed is built from the catalog: two pinned events (the DS-04
// quality alert and the DS-05 energy optimisation) followed by every other
// ACTIVE stream in catalog order.

use crate::catalog::StreamCatalog;
use crate::detail::StatusLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KpiTone {
    Good,
    Warn,
    Muted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KpiCard {
    pub label: &'static str,
    pub value: &'static str,
    pub note: &'static str,
    pub tone: KpiTone,
}

pub const KPI_CARDS: [KpiCard; 4] = [
    KpiCard {
        label: "今日自动决策",
        value: "1,204",
        note: "↑ 12% 环比增长",
        tone: KpiTone::Good,
    },
    KpiCard {
        label: "待人工复核",
        value: "14",
        note: "3 个高风险项",
        tone: KpiTone::Warn,
    },
    KpiCard {
        label: "活跃智能体",
        value: "8/12",
        note: "系统负载 42%",
        tone: KpiTone::Muted,
    },
    KpiCard {
        label: "决策闭环率",
        value: "98.2%",
        note: "行动反馈延迟 < 5s",
        tone: KpiTone::Muted,
    },
];

/// Share of decisions by handling path, in percent
pub const DISTRIBUTION: [(&str, u64); 3] = [("自动决策", 65), ("人工介入", 25), ("待处理", 10)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthGauge {
    pub label: &'static str,
    pub display: &'static str,
    /// Bar fill, 0-100
    pub fill: u16,
}

pub const HEALTH: [HealthGauge; 2] = [
    HealthGauge {
        label: "算力资源消耗",
        display: "72%",
        fill: 72,
    },
    HealthGauge {
        label: "数据延迟",
        display: "12ms",
        fill: 95,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    Alert,
    Success,
    Running,
}

/// One row of the realtime feed; selecting it opens `decision_id`
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub decision_id: String,
    pub kind: FeedKind,
    pub title: String,
    pub time: String,
    pub text: String,
    pub badges: Vec<StatusLevel>,
}

const ALERT_STREAM: &str = "DS-04";
const SUCCESS_STREAM: &str = "DS-05";

pub fn feed(catalog: &StreamCatalog) -> Vec<FeedItem> {
    let mut items = vec![
        FeedItem {
            decision_id: ALERT_STREAM.to_string(),
            kind: FeedKind::Alert,
            title: "涂布厚度异常波动预警 (Quality)".to_string(),
            time: "10:42:05".to_string(),
            text: "监测到 #3 涂布机左侧面密度偏差 > 2%。预计影响电芯一致性。".to_string(),
            badges: vec![StatusLevel::Risk, StatusLevel::Processing],
        },
        FeedItem {
            decision_id: SUCCESS_STREAM.to_string(),
            kind: FeedKind::Success,
            title: "化成工艺自动优化完成 (Energy)".to_string(),
            time: "10:38:00".to_string(),
            text: "根据当前批次电解液活性，动态调整了恒流充电时长 (-12min)。产能效率预期提升 1.8%。"
                .to_string(),
            badges: Vec::new(),
        },
    ];

    items.extend(
        catalog
            .active_streams()
            .filter(|s| s.id != ALERT_STREAM && s.id != SUCCESS_STREAM)
            .map(|s| FeedItem {
                decision_id: s.id.clone(),
                kind: FeedKind::Running,
                title: s.name.clone(),
                time: s.updated_at.clone(),
                text: s.description.clone(),
                badges: Vec::new(),
            }),
    );
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_pins_alert_and_success_first() {
        let items = feed(&StreamCatalog::builtin());
        let ids: Vec<&str> = items.iter().map(|i| i.decision_id.as_str()).collect();
        assert_eq!(ids, vec!["DS-04", "DS-05", "DS-01", "DS-02", "DS-06", "DS-08"]);
        assert_eq!(items[0].kind, FeedKind::Alert);
        assert_eq!(items[0].badges, vec![StatusLevel::Risk, StatusLevel::Processing]);
        assert_eq!(items[1].kind, FeedKind::Success);
        assert!(items[2..].iter().all(|i| i.kind == FeedKind::Running));
    }

    #[test]
    fn test_running_rows_mirror_stream() {
        let catalog = StreamCatalog::builtin();
        let items = feed(&catalog);
        let ds08 = items.iter().find(|i| i.decision_id == "DS-08").unwrap();
        let stream = catalog.stream("DS-08").unwrap();
        assert_eq!(ds08.title, stream.name);
        assert_eq!(ds08.time, "10:00");
    }

    #[test]
    fn test_feed_without_other_active_streams() {
        let items = feed(&StreamCatalog::default());
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_distribution_sums_to_hundred() {
        assert_eq!(DISTRIBUTION.iter().map(|(_, v)| v).sum::<u64>(), 100);
    }
}
