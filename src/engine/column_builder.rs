// ==========================================
// 工单排程看板 - 时间轴列构建器
// ==========================================
// 职责: 按缩放级别生成可变宽度的列网格
// 输入: 锚点日期 + 可见天数 N + 缩放级别
// 输出: 有序 TimelineColumn 列表
// ==========================================
// 规则:
// - day:   N 列，每列 1 天
// - week:  ceil(N/7) 列，每列固定 7 天（末列允许超出窗口）
// - month: 按自然月边界切分，首末月截断到可见窗口内；键为 m-{年}-{月份0起}
// ==========================================

use crate::domain::timeline::TimelineColumn;
use crate::domain::types::ZoomLevel;
use crate::engine::calendar::{
    add_days, diff_days, first_of_next_month, month_label, short_date_label,
};
use chrono::{Datelike, NaiveDate};
use tracing::debug;

const DAYS_PER_WEEK: u32 = 7;

// ==========================================
// ColumnBuilder - 列构建器
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct ColumnBuilder {
    // 无状态构建器
}

impl ColumnBuilder {
    pub fn new() -> Self {
        Self {}
    }

    /// 按缩放级别构建列
    pub fn build(&self, anchor: NaiveDate, total_days: u32, zoom: ZoomLevel) -> Vec<TimelineColumn> {
        let columns = match zoom {
            ZoomLevel::Day => self.build_day_columns(anchor, total_days),
            ZoomLevel::Week => self.build_week_columns(anchor, total_days),
            ZoomLevel::Month => self.build_month_columns(anchor, total_days),
        };
        debug!(
            zoom = %zoom,
            total_days,
            column_count = columns.len(),
            "时间轴列已重建"
        );
        columns
    }

    /// 日视图: 每天一列
    pub fn build_day_columns(&self, anchor: NaiveDate, total_days: u32) -> Vec<TimelineColumn> {
        (0..total_days)
            .map(|i| TimelineColumn {
                key: format!("d-{}", i),
                label: short_date_label(add_days(anchor, i64::from(i))),
                span_days: 1,
            })
            .collect()
    }

    /// 周视图: 每 7 天一列，统一宽度
    pub fn build_week_columns(&self, anchor: NaiveDate, total_days: u32) -> Vec<TimelineColumn> {
        let weeks = total_days.div_ceil(DAYS_PER_WEEK);
        (0..weeks)
            .map(|i| {
                let start = add_days(anchor, i64::from(i * DAYS_PER_WEEK));
                let end = add_days(start, i64::from(DAYS_PER_WEEK - 1));
                TimelineColumn {
                    key: format!("w-{}", i),
                    label: format!("{}–{}", short_date_label(start), short_date_label(end)),
                    span_days: DAYS_PER_WEEK,
                }
            })
            .collect()
    }

    /// 月视图: 对齐自然月边界，累计天数达到 N 为止
    pub fn build_month_columns(&self, anchor: NaiveDate, total_days: u32) -> Vec<TimelineColumn> {
        let mut columns = Vec::new();
        let mut cursor = anchor;
        let mut consumed: u32 = 0;

        while consumed < total_days {
            let remaining = total_days - consumed;
            // 本月剩余天数（含 cursor 当天）
            let days_left_in_month = first_of_next_month(cursor)
                .map(|next| diff_days(cursor, next))
                .and_then(|d| u32::try_from(d).ok())
                .unwrap_or(remaining);
            let span_days = days_left_in_month.min(remaining).max(1);

            columns.push(TimelineColumn {
                key: format!("m-{}-{}", cursor.year(), cursor.month0()),
                label: month_label(cursor),
                span_days,
            });

            consumed += span_days;
            cursor = add_days(cursor, i64::from(span_days));
        }

        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn total_span(columns: &[TimelineColumn]) -> u32 {
        columns.iter().map(|c| c.span_days).sum()
    }

    #[test]
    fn test_day_columns() {
        let columns = ColumnBuilder::new().build(date(2026, 1, 5), 29, ZoomLevel::Day);
        assert_eq!(columns.len(), 29);
        assert!(columns.iter().all(|c| c.span_days == 1));
        assert_eq!(columns[0].key, "d-0");
        assert_eq!(columns[0].label, "Jan 5");
        assert_eq!(columns[28].key, "d-28");
        assert_eq!(columns[28].label, "Feb 2");
    }

    #[test]
    fn test_week_columns_fixed_width() {
        let columns = ColumnBuilder::new().build(date(2026, 1, 5), 112, ZoomLevel::Week);
        assert_eq!(columns.len(), 16);
        assert!(columns.iter().all(|c| c.span_days == 7));
        assert_eq!(columns[0].key, "w-0");
        assert_eq!(columns[0].label, "Jan 5–Jan 11");
        assert_eq!(columns[1].label, "Jan 12–Jan 18");
    }

    #[test]
    fn test_week_columns_partial_last_week() {
        let columns = ColumnBuilder::new().build(date(2026, 1, 5), 30, ZoomLevel::Week);
        assert_eq!(columns.len(), 5);
        assert_eq!(total_span(&columns), 35);
        assert_eq!(columns[4].span_days, 7);
    }

    #[test]
    fn test_month_columns_aligned_and_clipped() {
        // 锚点 1/20，可见 60 天: 1月剩 12 天, 2月 28 天, 3月截断 20 天
        let columns = ColumnBuilder::new().build(date(2026, 1, 20), 60, ZoomLevel::Month);
        let spans: Vec<u32> = columns.iter().map(|c| c.span_days).collect();
        assert_eq!(spans, vec![12, 28, 20]);
        assert_eq!(columns[0].key, "m-2026-0");
        assert_eq!(columns[0].label, "Jan 2026");
        assert_eq!(columns[1].key, "m-2026-1");
        assert_eq!(columns[2].key, "m-2026-2");
    }

    #[test]
    fn test_month_columns_cross_year() {
        let columns = ColumnBuilder::new().build(date(2025, 12, 15), 365, ZoomLevel::Month);
        assert_eq!(total_span(&columns), 365);
        assert_eq!(columns[0].key, "m-2025-11");
        assert_eq!(columns[0].span_days, 17);
        assert_eq!(columns[1].key, "m-2026-0");
        assert_eq!(columns[1].span_days, 31);
        assert_eq!(columns.len(), 13);
    }

    #[test]
    fn test_span_covers_visible_days_for_every_zoom() {
        let builder = ColumnBuilder::new();
        for anchor in [date(2026, 1, 1), date(2026, 2, 28), date(2024, 2, 29), date(2026, 12, 31)] {
            for zoom in ZoomLevel::ALL {
                let n = zoom.total_visible_days();
                let columns = builder.build(anchor, n, zoom);
                assert!(total_span(&columns) >= n, "zoom={} anchor={}", zoom, anchor);
                assert!(columns.iter().all(|c| c.span_days >= 1));
            }
        }
    }

    #[test]
    fn test_keys_unique_and_stable() {
        let builder = ColumnBuilder::new();
        for zoom in ZoomLevel::ALL {
            let a = builder.build(date(2026, 1, 5), zoom.total_visible_days(), zoom);
            let b = builder.build(date(2026, 1, 5), zoom.total_visible_days(), zoom);
            assert_eq!(a, b);
            let keys: HashSet<&str> = a.iter().map(|c| c.key.as_str()).collect();
            assert_eq!(keys.len(), a.len());
        }
    }

    #[test]
    fn test_zero_days_yields_no_columns() {
        let builder = ColumnBuilder::new();
        for zoom in ZoomLevel::ALL {
            assert!(builder.build(date(2026, 1, 5), 0, zoom).is_empty());
        }
    }
}
