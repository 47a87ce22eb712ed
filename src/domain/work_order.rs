// ==========================================
// 工单排程看板 - 工单领域模型
// ==========================================
// 红线: 同一工作中心的任意两张工单，闭区间日期不得相交
// 红线: start_date <= end_date 在写入时规范化
// ==========================================

use crate::domain::types::WorkOrderStatus;
use crate::engine::calendar::iso_date;
use chrono::NaiveDate;
use std::collections::HashSet;
use serde::{Deserialize, Serialize};

// ==========================================
// WorkCenter - 工作中心
// ==========================================
// 静态参考数据，会话内不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkCenter {
    pub id: String,   // 工作中心ID
    pub name: String, // 名称
}

impl WorkCenter {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

// ==========================================
// WorkOrder - 工单
// ==========================================
// 持久化格式: camelCase 字段 + YYYY-MM-DD 日期字符串
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub id: String,              // 工单ID (唯一)
    pub work_center_id: String,  // 所属工作中心
    pub name: String,            // 名称 (trim 后非空)
    pub status: WorkOrderStatus, // 状态
    #[serde(with = "iso_date")]
    pub start_date: NaiveDate,   // 开始日期 (含)
    #[serde(with = "iso_date")]
    pub end_date: NaiveDate,     // 结束日期 (含)
}

impl WorkOrder {
    /// 闭区间包含的天数
    pub fn span_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days().abs() + 1
    }

    /// 判断某天是否落在工单区间内
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

// ==========================================
// WorkOrderDraft - 提交候选
// ==========================================
// 用途: 新建/编辑提交时的候选数据，尚未规范化
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderDraft {
    pub work_center_id: String,
    pub name: String,
    pub status: WorkOrderStatus,
    #[serde(with = "iso_date")]
    pub start_date: NaiveDate,
    #[serde(with = "iso_date")]
    pub end_date: NaiveDate,
}

impl WorkOrderDraft {
    pub fn new(
        work_center_id: &str,
        name: &str,
        status: WorkOrderStatus,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            work_center_id: work_center_id.to_string(),
            name: name.to_string(),
            status,
            start_date,
            end_date,
        }
    }

    /// 绑定ID生成工单
    pub fn into_work_order(self, id: String) -> WorkOrder {
        WorkOrder {
            id,
            work_center_id: self.work_center_id,
            name: self.name,
            status: self.status,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

impl From<&WorkOrder> for WorkOrderDraft {
    fn from(order: &WorkOrder) -> Self {
        Self {
            work_center_id: order.work_center_id.clone(),
            name: order.name.clone(),
            status: order.status,
            start_date: order.start_date,
            end_date: order.end_date,
        }
    }
}

// ==========================================
// SubmitMode - 提交模式
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitMode {
    /// 新建: 分配新ID并追加
    Create,
    /// 编辑: 保留ID，原位替换
    Edit { id: String },
}

impl SubmitMode {
    /// 重叠检测时需要排除的工单ID
    pub fn exclude_id(&self) -> Option<&str> {
        match self {
            SubmitMode::Create => None,
            SubmitMode::Edit { id } => Some(id.as_str()),
        }
    }
}

// ==========================================
// 集合约束检查
// ==========================================

/// 检查工单集合是否满足约束，返回第一条违例描述
///
/// 约束: ID 唯一；名称 trim 后非空；start <= end；
///       同一工作中心的闭区间两两不相交
pub fn find_invariant_violation(orders: &[WorkOrder]) -> Option<String> {
    let mut seen_ids = HashSet::new();

    for (i, order) in orders.iter().enumerate() {
        if !seen_ids.insert(order.id.as_str()) {
            return Some(format!("工单ID重复: {}", order.id));
        }
        if order.name.trim().is_empty() {
            return Some(format!("工单名称为空: {}", order.id));
        }
        if order.start_date > order.end_date {
            return Some(format!("工单开始日期晚于结束日期: {}", order.id));
        }
        let clash = orders[..i].iter().find(|other| {
            other.work_center_id == order.work_center_id
                && other.start_date <= order.end_date
                && order.start_date <= other.end_date
        });
        if let Some(other) = clash {
            return Some(format!("工单区间重叠: {} 与 {}", other.id, order.id));
        }
    }

    None
}
