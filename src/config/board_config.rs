// ==========================================
// 工单排程看板 - 看板配置
// ==========================================
// 职责: 锚点偏移、新建默认跨度、条形内缩、存储键、初始缩放
// 来源: 默认值 + config_kv 表覆写（见 ConfigManager）
// ==========================================

use crate::domain::types::ZoomLevel;
use crate::engine::calendar::add_days;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 配置键
pub mod config_keys {
    pub const ANCHOR_OFFSET_DAYS: &str = "anchor_offset_days";
    pub const DEFAULT_SPAN_DAYS: &str = "default_span_days";
    pub const BAR_INSET_PX: &str = "bar_inset_px";
    pub const STORAGE_KEY: &str = "storage_key";
    pub const INITIAL_ZOOM: &str = "initial_zoom";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// 锚点在“今天”之前的天数
    pub anchor_offset_days: i64,
    /// 点击新建时的默认跨度（闭区间天数）
    pub default_span_days: u32,
    /// 条形两侧视觉内缩（像素）
    pub bar_inset_px: f64,
    /// 工单列表持久化键
    pub storage_key: String,
    /// 启动时的缩放级别
    pub initial_zoom: ZoomLevel,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            anchor_offset_days: 14,
            default_span_days: 7,
            bar_inset_px: 0.0,
            storage_key: "work_orders".to_string(),
            initial_zoom: ZoomLevel::Day,
        }
    }
}

impl BoardConfig {
    /// 由“今天”推出锚点（天序号 0）
    pub fn anchor_for(&self, today: NaiveDate) -> NaiveDate {
        add_days(today, -self.anchor_offset_days)
    }
}
