// ==========================================
// 工单排程看板 - 领域类型定义
// ==========================================
// 职责: 工单状态、缩放级别、面板模式等枚举
// 约束: 缩放级别的像素密度与可见天数固定，不单独存储
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 工单状态 (Work Order Status)
// ==========================================
// 序列化格式: kebab-case (与持久化数据一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkOrderStatus {
    Open,       // 未开始
    InProgress, // 进行中
    Complete,   // 已完成
    Blocked,    // 阻塞
}

impl WorkOrderStatus {
    /// 面板下拉选项顺序
    pub const ALL: [WorkOrderStatus; 4] = [
        WorkOrderStatus::Open,
        WorkOrderStatus::InProgress,
        WorkOrderStatus::Complete,
        WorkOrderStatus::Blocked,
    ];

    /// 序列化值
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkOrderStatus::Open => "open",
            WorkOrderStatus::InProgress => "in-progress",
            WorkOrderStatus::Complete => "complete",
            WorkOrderStatus::Blocked => "blocked",
        }
    }

    /// 显示标签
    pub fn label(&self) -> &'static str {
        match self {
            WorkOrderStatus::Open => "Open",
            WorkOrderStatus::InProgress => "In Progress",
            WorkOrderStatus::Complete => "Complete",
            WorkOrderStatus::Blocked => "Blocked",
        }
    }

    /// (值, 标签) 选项列表，供表单下拉使用
    pub fn options() -> Vec<(WorkOrderStatus, &'static str)> {
        Self::ALL.iter().map(|s| (*s, s.label())).collect()
    }
}

impl Default for WorkOrderStatus {
    fn default() -> Self {
        WorkOrderStatus::Open
    }
}

impl fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WorkOrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "open" => Ok(WorkOrderStatus::Open),
            "in-progress" => Ok(WorkOrderStatus::InProgress),
            "complete" => Ok(WorkOrderStatus::Complete),
            "blocked" => Ok(WorkOrderStatus::Blocked),
            other => Err(format!("未知工单状态: {}", other)),
        }
    }
}

// ==========================================
// 缩放级别 (Zoom Level)
// ==========================================
// day → 56px/29天, week → 20px/112天, month → 8px/365天
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomLevel {
    Day,
    Week,
    Month,
}

impl ZoomLevel {
    pub const ALL: [ZoomLevel; 3] = [ZoomLevel::Day, ZoomLevel::Week, ZoomLevel::Month];

    /// 每天对应的像素宽度
    pub fn pixels_per_day(&self) -> f64 {
        match self {
            ZoomLevel::Day => 56.0,
            ZoomLevel::Week => 20.0,
            ZoomLevel::Month => 8.0,
        }
    }

    /// 可见窗口总天数
    pub fn total_visible_days(&self) -> u32 {
        match self {
            ZoomLevel::Day => 29,
            ZoomLevel::Week => 112,
            ZoomLevel::Month => 365,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ZoomLevel::Day => "day",
            ZoomLevel::Week => "week",
            ZoomLevel::Month => "month",
        }
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        ZoomLevel::Day
    }
}

impl fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ZoomLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(ZoomLevel::Day),
            "week" => Ok(ZoomLevel::Week),
            "month" => Ok(ZoomLevel::Month),
            other => Err(format!("未知缩放级别: {}", other)),
        }
    }
}

// ==========================================
// 面板模式 (Panel Mode)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelMode {
    Create, // 新建
    Edit,   // 编辑
}

impl PanelMode {
    /// 主按钮文案
    pub fn primary_cta(&self) -> &'static str {
        match self {
            PanelMode::Create => "Create",
            PanelMode::Edit => "Save",
        }
    }
}

impl fmt::Display for PanelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelMode::Create => write!(f, "create"),
            PanelMode::Edit => write!(f, "edit"),
        }
    }
}
