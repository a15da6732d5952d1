// Built-in mock catalog
//
// Ten decision streams from a lithium battery plant and the nine agents
// that run them.

use super::{Agent, AgentStyle, DecisionStream, StreamStatus};

fn agent(
    id: &str,
    name: &str,
    role: &str,
    capabilities: &[&str],
    style: AgentStyle,
    risk_tolerance: u8,
    recent_activity: &str,
) -> Agent {
    Agent {
        id: id.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        capabilities: capabilities.iter().map(|c| c.to_string()).collect(),
        style,
        risk_tolerance,
        recent_activity: recent_activity.to_string(),
    }
}

fn stream(
    id: &str,
    name: &str,
    description: &str,
    status: StreamStatus,
    agent_ids: &[&str],
    updated_at: &str,
) -> DecisionStream {
    DecisionStream {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        status,
        agent_ids: agent_ids.iter().map(|a| a.to_string()).collect(),
        updated_at: updated_at.to_string(),
    }
}

pub(super) fn agents() -> Vec<Agent> {
    use AgentStyle::*;

    vec![
        agent("A-001", "排程优化智能体", "APS-Scheduler / 生产计划",
            &["产能负荷测算", "排程方案生成", "加班班次推荐"],
            Conservative, 30, "10:42 调整 #2 线周末排程"),
        agent("A-002", "库存管理智能体", "Inventory-Keeper / 仓储",
            &["安全库存推演", "库龄分析", "呆滞物料识别"],
            Conservative, 20, "09:50 更新电解液安全库存"),
        agent("A-003", "工艺参数智能体", "Process-Tuner / 工艺优化",
            &["模头间隙补偿", "AGV 路径协同", "参数寻优"],
            Aggressive, 65, "10:42 建议左侧模头间隙 -5μm"),
        agent("A-004", "采购寻源智能体", "Sourcing-Agent / 供应链采购",
            &["备选供应商比价", "RFQ 自动发起", "溢价审批路由"],
            Aggressive, 55, "09:00 锁定供应商 B 现货 50 吨"),
        agent("A-005", "供应链风险雷达", "Supply-Chain-Radar / 风险监控",
            &["舆情监控", "断供概率评估", "合规预警"],
            Conservative, 15, "昨天 识别溶剂厂火灾事故"),
        agent("A-006", "需求预测智能体", "Demand-Forecast-Agent / 销售计划",
            &["订单波动感知", "需求预测", "交付缺口测算"],
            Conservative, 25, "09:00 同步 Q4 追加订单"),
        agent("A-007", "人力排班智能体", "Workforce-Planner / 人力资源",
            &["技能矩阵匹配", "班次生成"],
            Conservative, 10, "5天前 生成下周排班草案"),
        agent("A-008", "质量风控智能体", "Quality-Guardian / 质量风控",
            &["CPK 偏移监测", "人机料法环根因追溯", "报废风险预测"],
            Conservative, 5, "10:42 判定涂布面密度超限"),
        agent("A-009", "设备健康智能体", "Equipment-Health / 设备与能源",
            &["故障征兆识别", "谷电窗口调度", "排放联锁控制"],
            Aggressive, 45, "10:00 触发涂布机降速联锁"),
    ]
}

pub(super) fn streams() -> Vec<DecisionStream> {
    use StreamStatus::*;

    vec![
        stream("DS-01", "产销协同决策流", "基于订单需求波动自动调整生产排程与物料计划",
            Active, &["A-006", "A-002", "A-001"], "10:42"),
        stream("DS-02", "供应链风险阻断流", "监测上游供应中断风险并触发寻源与库存预警",
            Active, &["A-005", "A-004"], "昨天"),
        stream("DS-03", "设备预测性维护流", "设备故障征兆识别与维修工单自动下发",
            Paused, &["A-009", "A-008"], "3天前"),
        stream("DS-04", "质量异常根因阻断流", "实时监控CPK偏移，自动关联人机料法环追溯根因",
            Active, &["A-008", "A-003"], "10:15"),
        stream("DS-05", "能耗削峰填谷优化流", "根据电价策略动态调整高能耗工序（如化成）运行时间",
            Active, &["A-001", "A-009"], "09:30"),
        stream("DS-06", "AGV物流动态调度流", "基于产线节拍实时优化AGV配送路径，消除堵塞",
            Active, &["A-003", "A-001"], "10:40"),
        stream("DS-07", "呆滞库存自动清洗流", "识别超过90天库龄物料，自动推荐促销或转卖方案",
            Draft, &["A-002", "A-006"], "2天前"),
        stream("DS-08", "环保排放合规监控流", "实时监测NMP回收效率，异常时自动触发产线降速",
            Active, &["A-009", "A-005"], "10:00"),
        stream("DS-09", "新品导入(NPI)加速流", "自动比对试产数据与研发标准，生成工艺优化建议",
            Paused, &["A-004", "A-008"], "1周前"),
        stream("DS-10", "劳动力智能排班流", "根据订单预测与技能矩阵，动态调整人员排班表",
            Draft, &["A-001", "A-007"], "5天前"),
    ]
}
