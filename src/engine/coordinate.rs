// ==========================================
// 工单排程看板 - 坐标映射
// ==========================================
// 职责: 日期区间 ↔ 像素偏移/宽度，点击位置 → 日期
// 约束: 天序号以锚点为 0，锚点构造后不再变化
// ==========================================

use crate::domain::timeline::{BarGeometry, PointerIntent};
use crate::engine::calendar::{add_days, checked_add_days, diff_days};
use crate::engine::error::{EngineError, EngineResult};
use chrono::NaiveDate;

// ==========================================
// CoordinateMapper - 坐标映射器
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateMapper {
    anchor: NaiveDate,
}

impl CoordinateMapper {
    pub fn new(anchor: NaiveDate) -> Self {
        Self { anchor }
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    /// 日期 → 天序号
    pub fn date_to_day_index(&self, date: NaiveDate) -> i64 {
        diff_days(self.anchor, date)
    }

    /// 天序号 → 日期
    pub fn day_index_to_date(&self, day_index: i64) -> NaiveDate {
        add_days(self.anchor, day_index)
    }

    /// 工单条几何
    ///
    /// left = start 天序号 * ppd；宽度按闭区间天数计算，至少 1 天
    pub fn bar_geometry(&self, start: NaiveDate, end: NaiveDate, pixels_per_day: f64) -> BarGeometry {
        let start_day = self.date_to_day_index(start);
        let end_day = self.date_to_day_index(end);
        let day_count = (end_day - start_day + 1).max(1);

        BarGeometry {
            left_px: start_day as f64 * pixels_per_day,
            width_px: day_count as f64 * pixels_per_day,
        }
    }

    /// 像素位置 → 天序号（向下取整）
    ///
    /// # 错误
    /// - x 非有限值或 ppd 非正 → InvalidPointer
    /// - 天序号对应的日期超出可表示范围 → InvalidPointer
    pub fn pixel_position_to_day_index(&self, x_px: f64, pixels_per_day: f64) -> EngineResult<i64> {
        if !x_px.is_finite() || !pixels_per_day.is_finite() || pixels_per_day <= 0.0 {
            return Err(invalid_pointer(x_px, pixels_per_day));
        }
        let day_index = (x_px / pixels_per_day).floor() as i64;
        match checked_add_days(self.anchor, day_index) {
            Some(_) => Ok(day_index),
            None => Err(invalid_pointer(x_px, pixels_per_day)),
        }
    }

    /// 点击意图 → 新建工单的默认区间 [start, start + span_days - 1]
    pub fn create_range_from_pointer(
        &self,
        intent: PointerIntent,
        pixels_per_day: f64,
        span_days: u32,
    ) -> EngineResult<(NaiveDate, NaiveDate)> {
        let start_day = self.pixel_position_to_day_index(intent.x, pixels_per_day)?;
        let start = checked_add_days(self.anchor, start_day)
            .ok_or_else(|| invalid_pointer(intent.x, pixels_per_day))?;
        let end = start_day
            .checked_add(i64::from(span_days.max(1)) - 1)
            .and_then(|end_day| checked_add_days(self.anchor, end_day))
            .ok_or_else(|| invalid_pointer(intent.x, pixels_per_day))?;
        Ok((start, end))
    }

    /// "今天" 指示线的像素偏移（落在当天列的中点）
    pub fn today_line_offset_px(&self, today: NaiveDate, pixels_per_day: f64) -> f64 {
        self.date_to_day_index(today) as f64 * pixels_per_day + pixels_per_day / 2.0
    }
}

fn invalid_pointer(x_px: f64, pixels_per_day: f64) -> EngineError {
    EngineError::InvalidPointer {
        x: x_px.to_string(),
        pixels_per_day: pixels_per_day.to_string(),
    }
}

/// 视口居中的滚动位置，不小于 0
pub fn center_scroll_left(target_offset_px: f64, viewport_width_px: f64) -> f64 {
    (target_offset_px - viewport_width_px / 2.0).max(0.0)
}
