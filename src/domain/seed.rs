// ==========================================
// 工单排程看板 - 内置种子数据
// ==========================================
// 用途: 无持久化数据或数据损坏时的回退列表
// ==========================================

use crate::domain::types::WorkOrderStatus;
use crate::domain::work_order::{WorkCenter, WorkOrder};
use chrono::NaiveDate;

/// 默认工作中心列表
pub fn seed_work_centers() -> Vec<WorkCenter> {
    vec![
        WorkCenter::new("wc-1", "Extrusion Line A"),
        WorkCenter::new("wc-2", "CNC Machine 1"),
        WorkCenter::new("wc-3", "Assembly Station"),
        WorkCenter::new("wc-4", "Quality Control"),
        WorkCenter::new("wc-5", "Packaging Line"),
    ]
}

/// 默认工单列表
pub fn seed_work_orders() -> Vec<WorkOrder> {
    vec![
        seed_order("wo-1", "wc-1", "Extrude Batch 1042", WorkOrderStatus::Complete, (2026, 1, 10), (2026, 1, 14)),
        seed_order("wo-2", "wc-1", "Extrude Batch 1043", WorkOrderStatus::Open, (2026, 1, 18), (2026, 1, 20)),
        seed_order("wo-3", "wc-3", "Assemble Unit K", WorkOrderStatus::InProgress, (2026, 1, 13), (2026, 1, 17)),
    ]
}

fn seed_order(
    id: &str,
    work_center_id: &str,
    name: &str,
    status: WorkOrderStatus,
    start: (i32, u32, u32),
    end: (i32, u32, u32),
) -> WorkOrder {
    WorkOrder {
        id: id.to_string(),
        work_center_id: work_center_id.to_string(),
        name: name.to_string(),
        status,
        start_date: ymd(start),
        end_date: ymd(end),
    }
}

// 种子日期均为合法常量
fn ymd((y, m, d): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}
