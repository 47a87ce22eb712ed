// ==========================================
// 工单排程看板 - 时间轴视图模型
// ==========================================
// 职责: 列、条形几何、点击意图等时间轴数据契约
// 红线: 列整体重建，不可原位修改
// ==========================================

use crate::domain::types::WorkOrderStatus;
use serde::{Deserialize, Serialize};

// ==========================================
// TimelineColumn - 时间轴列
// ==========================================
// 像素宽度 = span_days * pixels_per_day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineColumn {
    pub key: String,    // 稳定键 (d-{i} / w-{i} / m-{year}-{month})
    pub label: String,  // 表头文案
    pub span_days: u32, // 跨越天数 (>= 1)
}

impl TimelineColumn {
    pub fn width_px(&self, pixels_per_day: f64) -> f64 {
        f64::from(self.span_days) * pixels_per_day
    }
}

/// 表头列视图模型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderColumn {
    pub key: String,
    pub label: String,
    pub width_px: f64,
}

/// 网格列视图模型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridColumn {
    pub key: String,
    pub width_px: f64,
}

// ==========================================
// BarGeometry - 工单条几何
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarGeometry {
    pub left_px: f64,
    pub width_px: f64,
}

impl BarGeometry {
    /// 两侧各内缩 inset_px（仅视觉间隙，宽度不小于 0）
    pub fn inset(self, inset_px: f64) -> Self {
        if inset_px <= 0.0 {
            return self;
        }
        Self {
            left_px: self.left_px + inset_px,
            width_px: (self.width_px - inset_px * 2.0).max(0.0),
        }
    }
}

/// 按工作中心过滤后的工单条视图模型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarView {
    pub id: String,
    pub name: String,
    pub status: WorkOrderStatus,
    pub left_px: f64,
    pub width_px: f64,
}

// ==========================================
// PointerIntent - 点击意图
// ==========================================
// 鼠标点击与键盘激活统一成同一个坐标值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerIntent {
    pub x: f64, // 相对轨道起点的横坐标 (已含滚动偏移)
    pub y: f64,
}

/// 轨道矩形（视口坐标）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PointerIntent {
    /// 鼠标点击: client 坐标减去轨道左上角，再加上横向滚动偏移
    pub fn from_click(client_x: f64, client_y: f64, track: TrackRect, scroll_left: f64) -> Self {
        Self {
            x: client_x - track.left + scroll_left,
            y: client_y - track.top,
        }
    }

    /// 键盘激活: 取轨道中心点
    pub fn from_keyboard(track: TrackRect, scroll_left: f64) -> Self {
        Self {
            x: track.width / 2.0 + scroll_left,
            y: track.height / 2.0,
        }
    }
}
