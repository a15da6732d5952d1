// Curated decision details
//
// Hand-authored scenarios for the streams that have a demo story behind
// them. Streams without an entry here resolve to the generic fallback.

use super::{CatalogError, Metric, StatusLevel, StreamDetailData, TraceNode, TrendPoint};
use crate::conversation::{ChatMessage, ChatRole};
use std::collections::HashMap;

/// Validated lookup table of curated details keyed by decision id
#[derive(Debug, Clone, Default)]
pub struct DetailTable {
    records: HashMap<String, StreamDetailData>,
}

impl DetailTable {
    /// Build a table, rejecting malformed records
    pub fn new(
        records: impl IntoIterator<Item = (String, StreamDetailData)>,
    ) -> Result<Self, CatalogError> {
        let records: HashMap<_, _> = records.into_iter().collect();
        for (id, detail) in &records {
            detail.validate(id)?;
        }
        Ok(Self { records })
    }

    /// The scenarios shipped with the console
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(builtin_records())
    }

    pub fn get(&self, decision_id: &str) -> Option<&StreamDetailData> {
        self.records.get(decision_id)
    }

    /// Curated ids in sorted order
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.records.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Builders
// ─────────────────────────────────────────────────────────────────────────────

fn series(points: &[(&str, f64)]) -> Vec<TrendPoint> {
    points
        .iter()
        .map(|(time, value)| TrendPoint {
            time: time.to_string(),
            value: *value,
        })
        .collect()
}

fn metric(label: &str, value: &str) -> Metric {
    Metric {
        label: label.to_string(),
        value: value.to_string(),
        trend: None,
    }
}

#[allow(clippy::too_many_arguments)]
fn node(
    id: u32,
    label: &str,
    kind: &str,
    status: StatusLevel,
    timestamp: &str,
    description: &str,
    metrics: Vec<Metric>,
    evidence: &[&str],
) -> TraceNode {
    TraceNode {
        id,
        label: label.to_string(),
        kind: kind.to_string(),
        status,
        timestamp: timestamp.to_string(),
        description: description.to_string(),
        metrics,
        evidence: evidence.iter().map(|e| e.to_string()).collect(),
    }
}

fn agent_says(id: u32, content: &str, time: &str) -> ChatMessage {
    ChatMessage {
        id,
        role: ChatRole::Agent,
        content: content.to_string(),
        time: time.to_string(),
    }
}

fn builtin_records() -> Vec<(String, StreamDetailData)> {
    use StatusLevel::*;

    vec![
        (
            "DS-01".to_string(),
            StreamDetailData {
                title: "生产排程动态调整事件".to_string(),
                subtitle: "来源: Demand-Forecast-Agent | 触发: 需求激增 +15%".to_string(),
                status: Processing,
                y_axis_range: [800.0, 1200.0],
                trend_series: series(&[
                    ("T-5", 850.0),
                    ("T-4", 860.0),
                    ("T-3", 900.0),
                    ("T-2", 1050.0),
                    ("T-1", 1150.0),
                    ("Now", 1180.0),
                ]),
                trace_chain: vec![
                    node(1, "需求感知", "ERP事件", Normal, "09:00",
                        "CRM系统同步 Q4 储能电芯追加订单。",
                        vec![metric("新增需求", "200 MWh")],
                        &["Sales Order #8821"]),
                    node(2, "产能评估", "APS计算", Risk, "09:05",
                        "当前 #2 产线排程饱和，预计交付延期 3 天。",
                        vec![metric("负荷率", "110%")],
                        &["APS Simulation"]),
                    node(3, "排程优化", "决策输出", Processing, "09:10",
                        "建议开启周末加班班次，并调配 #3 线 20% 产能。",
                        vec![metric("追回天数", "2.5天")],
                        &["Schedule Option B"]),
                ],
                seed_messages: vec![
                    agent_says(1, "监测到 Q4 订单需求激增 15%，当前产能存在 3 天的交付缺口。", "09:00"),
                    agent_says(2, "已生成 2 套调整方案：\nA. 启用周末加班 (成本 +12%)\nB. 外协部分模组组装 (风险较高)\n建议执行方案 A。", "09:01"),
                ],
            },
        ),
        (
            "DS-02".to_string(),
            StreamDetailData {
                title: "电解液供应中断预警".to_string(),
                subtitle: "来源: Supply-Chain-Radar | 触发: 供应商不可抗力".to_string(),
                status: Risk,
                y_axis_range: [0.0, 100.0],
                trend_series: series(&[
                    ("T-5", 100.0),
                    ("T-4", 98.0),
                    ("T-3", 95.0),
                    ("T-2", 80.0),
                    ("T-1", 40.0),
                    ("Now", 15.0),
                ]),
                trace_chain: vec![
                    node(1, "舆情监控", "外部数据", Risk, "Yesterday",
                        "监测到核心电解液溶剂厂发生火灾事故。",
                        vec![metric("影响概率", "99%")],
                        &["News API"]),
                    node(2, "库存影响", "库存推演", Risk, "08:30",
                        "预计现有安全库存仅能支撑 3 天生产。",
                        vec![metric("剩余天数", "3.0")],
                        &["WMS Forecast"]),
                    node(3, "紧急寻源", "采购执行", Processing, "09:00",
                        "已自动联系备选供应商 B，锁定 50 吨现货。",
                        vec![metric("溢价率", "+5%")],
                        &["RFQ #9902"]),
                ],
                seed_messages: vec![
                    agent_says(1, "警告：主供应商 A 厂发生不可抗力，预计断供 2 周。", "08:30"),
                    agent_says(2, "已启动《缺料应急预案》。备选供应商 B 响应报价，需总经理审批溢价采购单。", "08:35"),
                ],
            },
        ),
        (
            "DS-04".to_string(),
            StreamDetailData {
                title: "涂布厚度异常波动".to_string(),
                subtitle: "来源: Coating-Machine-03 | 触发: Gauge-03 读数偏移".to_string(),
                status: Risk,
                y_axis_range: [138.0, 145.0],
                trend_series: series(&[
                    ("10:38", 140.2),
                    ("10:39", 140.5),
                    ("10:40", 141.1),
                    ("10:41", 142.8),
                    ("10:42", 143.2),
                    ("10:43", 143.0),
                ]),
                trace_chain: vec![
                    node(1, "IoT感知", "传感器", Risk, "10:42:01",
                        "β射线测厚仪读数连续5次超限，呈左厚右薄趋势。",
                        vec![metric("偏差", "+2.4%")],
                        &["PLC Log"]),
                    node(2, "设备归因", "设备诊断", Risk, "10:42:03",
                        "#3 涂布头左侧调节螺栓热膨胀导致间隙偏移。",
                        vec![metric("偏移量", "+5μm")],
                        &["Thermal Model"]),
                    node(3, "物料关联", "LIMS数据", Uncertain, "10:42:04",
                        "当前浆料粘度略低，加剧了间隙敏感性。",
                        vec![metric("粘度", "3800cP")],
                        &["Batch Info"]),
                    node(4, "质量预测", "CPK模型", Risk, "Future",
                        "预计本卷极片 CPK 将跌破 1.33。",
                        vec![metric("Pred. CPK", "1.05")],
                        &["Quality Engine"]),
                ],
                seed_messages: vec![
                    agent_says(1, "监测到 #3 涂布机左侧面密度偏差 > 2%。建议调整左侧模头间隙 -5μm。", "10:42:05"),
                    agent_says(2, "风险评估：若不调整，预计产生 1200m 报废极片。是否授权自动下发 PLC 指令？", "10:42:10"),
                ],
            },
        ),
        (
            "DS-05".to_string(),
            StreamDetailData {
                title: "化成工艺能耗优化".to_string(),
                subtitle: "来源: Energy-Grid-Agent | 触发: 电价波谷窗口".to_string(),
                status: Verified,
                y_axis_range: [0.4, 1.2],
                trend_series: series(&[
                    ("09:00", 1.1),
                    ("09:15", 1.0),
                    ("09:30", 0.8),
                    ("09:45", 0.6),
                    ("10:00", 0.5),
                    ("10:15", 0.5),
                ]),
                trace_chain: vec![
                    node(1, "电价预测", "外部信号", Normal, "09:15",
                        "预测未来 2 小时将进入深度谷电时段 (0.3元/kWh)。",
                        vec![metric("价差", "-60%")],
                        &["Grid API"]),
                    node(2, "工艺匹配", "MES状态", Normal, "09:20",
                        "化成车间 #2-#5 柜处于待机状态，具备启动条件。",
                        vec![metric("可用柜数", "4")],
                        &["MES State"]),
                    node(3, "调度执行", "自动控制", Verified, "09:30",
                        "已自动提前启动化成流程，预计节约电费 4500 元。",
                        vec![metric("节约成本", "¥4.5k")],
                        &["Control Log"]),
                ],
                seed_messages: vec![
                    agent_says(1, "检测到电价谷值窗口。已自动调度 #2-#5 化成柜提前启动。", "09:30"),
                    agent_says(2, "优化结果：本批次单 Wh 能耗成本降低 12%。", "10:38"),
                ],
            },
        ),
        (
            "DS-06".to_string(),
            StreamDetailData {
                title: "AGV 物流拥堵疏导".to_string(),
                subtitle: "来源: Logistics-Agent | 触发: 涂布区交汇死锁".to_string(),
                status: Processing,
                y_axis_range: [0.0, 20.0],
                trend_series: series(&[
                    ("10:30", 5.0),
                    ("10:32", 8.0),
                    ("10:34", 15.0),
                    ("10:36", 18.0),
                    ("10:38", 12.0),
                    ("10:40", 6.0),
                ]),
                trace_chain: vec![
                    node(1, "拥堵感知", "位置监控", Risk, "10:34",
                        "涂布机 B 区路口检测到 3 台 AGV 等待超过 120秒。",
                        vec![metric("等待时长", "125s")],
                        &["RCS Map"]),
                    node(2, "路径重构", "算法优化", Processing, "10:35",
                        "重新计算全局路径，临时开放 C 通道作为单向分流。",
                        vec![metric("通行效率", "+40%")],
                        &["Pathfinder v2"]),
                    node(3, "指令下发", "调度指令", Normal, "10:36",
                        "更新 AGV-04, AGV-09 任务路径。",
                        vec![metric("延迟减少", "3min")],
                        &["Task Queue"]),
                ],
                seed_messages: vec![
                    agent_says(1, "涂布 B 区发生物流死锁。正在尝试重规划路径。", "10:34"),
                    agent_says(2, "已临时启用 C 通道分流，拥堵指数正在下降。", "10:38"),
                ],
            },
        ),
        (
            "DS-08".to_string(),
            StreamDetailData {
                title: "NMP 排放浓度异常管控".to_string(),
                subtitle: "来源: EHS-Guardian | 触发: 回收塔 A 效率下降".to_string(),
                status: Risk,
                y_axis_range: [20.0, 60.0],
                trend_series: series(&[
                    ("09:50", 25.0),
                    ("09:52", 28.0),
                    ("09:54", 35.0),
                    ("09:56", 48.0),
                    ("09:58", 55.0),
                    ("10:00", 52.0),
                ]),
                trace_chain: vec![
                    node(1, "排放监测", "环保传感器", Risk, "09:56",
                        "烟囱出口 VOCs 浓度瞬时值达到 55mg/m³ (预警线 50)。",
                        vec![metric("浓度", "55mg")],
                        &["Sensor E-01"]),
                    node(2, "设备联动", "回收系统", Risk, "09:57",
                        "检测到 NMP 回收塔 A 喷淋液流量异常偏低。",
                        vec![metric("流量", "Low")],
                        &["Pump Status"]),
                    node(3, "合规控制", "产线干预", Processing, "10:00",
                        "自动触发涂布机降速 30% 以减少挥发量，直至回收系统恢复。",
                        vec![metric("降速", "-30%")],
                        &["Interlock Logic"]),
                ],
                seed_messages: vec![
                    agent_says(1, "警报：NMP 排放浓度接近合规红线。", "09:56"),
                    agent_says(2, "已触发环保联锁机制：涂布机降速运行。已通知设备科检查回收塔喷淋泵。", "10:00"),
                ],
            },
        ),
    ]
}
