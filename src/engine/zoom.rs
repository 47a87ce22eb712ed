// ==========================================
// 工单排程看板 - 缩放与视图状态
// ==========================================
// 职责: 持有当前缩放级别，派生像素密度/可见天数，触发列重建
// 约束: 锚点固定；同级别切换为空操作
// 延迟动作: 视口居中依赖列布局提交后的容器宽度，
//           因此只做标记，由渲染方在本轮渲染完成后调用 after_render 消费
// ==========================================

use crate::domain::timeline::{GridColumn, HeaderColumn, TimelineColumn};
use crate::domain::types::ZoomLevel;
use crate::engine::column_builder::ColumnBuilder;
use crate::engine::coordinate::{center_scroll_left, CoordinateMapper};
use chrono::NaiveDate;
use tracing::{debug, info};

// ==========================================
// TimelineView - 时间轴视图状态
// ==========================================
#[derive(Debug, Clone)]
pub struct TimelineView {
    mapper: CoordinateMapper,
    today: NaiveDate,
    zoom: ZoomLevel,
    columns: Vec<TimelineColumn>,
    layout_revision: u64,
    recenter_pending: bool,
}

impl TimelineView {
    /// 创建视图，构建初始列并登记一次居中
    pub fn new(anchor: NaiveDate, today: NaiveDate, zoom: ZoomLevel) -> Self {
        let mut view = Self {
            mapper: CoordinateMapper::new(anchor),
            today,
            zoom,
            columns: Vec::new(),
            layout_revision: 0,
            recenter_pending: false,
        };
        view.apply_zoom();
        view
    }

    /// 切换缩放级别
    ///
    /// # 返回
    /// - true: 级别变化，已重建列并登记居中
    /// - false: 与当前级别相同，不做任何事
    pub fn set_timescale(&mut self, zoom: ZoomLevel) -> bool {
        if zoom == self.zoom {
            return false;
        }
        info!(from = %self.zoom, to = %zoom, "切换时间轴缩放级别");
        self.zoom = zoom;
        self.apply_zoom();
        true
    }

    fn apply_zoom(&mut self) {
        self.columns = ColumnBuilder::new().build(
            self.mapper.anchor(),
            self.total_visible_days(),
            self.zoom,
        );
        self.layout_revision += 1;
        self.recenter_pending = true;
    }

    /// 渲染完成后调用，消费待执行的居中动作
    ///
    /// # 返回
    /// - Some(scroll_left): 需要设置的横向滚动位置
    /// - None: 无待执行动作
    pub fn after_render(&mut self, viewport_width_px: f64) -> Option<f64> {
        if !self.recenter_pending {
            return None;
        }
        self.recenter_pending = false;
        let scroll_left = center_scroll_left(self.today_line_offset_px(), viewport_width_px);
        debug!(scroll_left, viewport_width_px, "视口居中到今天");
        Some(scroll_left)
    }

    // ===== 派生值 =====

    pub fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    pub fn anchor(&self) -> NaiveDate {
        self.mapper.anchor()
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn pixels_per_day(&self) -> f64 {
        self.zoom.pixels_per_day()
    }

    pub fn total_visible_days(&self) -> u32 {
        self.zoom.total_visible_days()
    }

    pub fn total_width_px(&self) -> f64 {
        f64::from(self.total_visible_days()) * self.pixels_per_day()
    }

    pub fn columns(&self) -> &[TimelineColumn] {
        &self.columns
    }

    /// 列重建次数
    pub fn layout_revision(&self) -> u64 {
        self.layout_revision
    }

    pub fn has_pending_recenter(&self) -> bool {
        self.recenter_pending
    }

    pub fn today_line_offset_px(&self) -> f64 {
        self.mapper
            .today_line_offset_px(self.today, self.pixels_per_day())
    }

    pub fn header_columns(&self) -> Vec<HeaderColumn> {
        let ppd = self.pixels_per_day();
        self.columns
            .iter()
            .map(|c| HeaderColumn {
                key: c.key.clone(),
                label: c.label.clone(),
                width_px: c.width_px(ppd),
            })
            .collect()
    }

    pub fn grid_columns(&self) -> Vec<GridColumn> {
        let ppd = self.pixels_per_day();
        self.columns
            .iter()
            .map(|c| GridColumn {
                key: c.key.clone(),
                width_px: c.width_px(ppd),
            })
            .collect()
    }
}
