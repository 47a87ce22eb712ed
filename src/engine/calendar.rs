// ==========================================
// 工单排程看板 - 日历算术
// ==========================================
// 职责: 日期与天序号的纯函数换算
// 约束: 一律按本地日历日处理，不经过 UTC，避免跨日偏移
// ==========================================

use crate::engine::error::{EngineError, EngineResult};
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// 当前本地日历日
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// 截断到当日零点
pub fn start_of_day(dt: NaiveDateTime) -> NaiveDateTime {
    dt.date().and_time(NaiveTime::MIN)
}

/// 日历日加减（自动跨月/跨年），越界时饱和到可表示的边界
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    checked_add_days(date, days).unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// 日历日加减，结果不可表示时返回 None
pub fn checked_add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    Duration::try_days(days).and_then(|delta| date.checked_add_signed(delta))
}

/// 整日差值 b - a
pub fn diff_days(a: NaiveDate, b: NaiveDate) -> i64 {
    b.signed_duration_since(a).num_days()
}

/// 时刻间的整日差值 b - a，四舍五入以吸收夏令时漂移
pub fn diff_days_rounded(a: NaiveDateTime, b: NaiveDateTime) -> i64 {
    let seconds = b.signed_duration_since(a).num_seconds() as f64;
    (seconds / SECONDS_PER_DAY).round() as i64
}

/// 解析 YYYY-MM-DD 为本地日历日
///
/// # 错误
/// - 分组位数不对、含非数字、日期不存在 → InvalidDateFormat
pub fn parse_date_only(iso: &str) -> EngineResult<NaiveDate> {
    let invalid = || EngineError::InvalidDateFormat {
        input: iso.to_string(),
    };

    let bytes = iso.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return Err(invalid());
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return Err(invalid());
    }

    let year: i32 = iso[0..4].parse().map_err(|_| invalid())?;
    let month: u32 = iso[5..7].parse().map_err(|_| invalid())?;
    let day: u32 = iso[8..10].parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// 格式化为 YYYY-MM-DD（4-2-2 位补零）
pub fn format_date_only(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// 面板日期输入框显示格式 MM.DD.YYYY
pub fn format_date_dotted(date: NaiveDate) -> String {
    format!("{:02}.{:02}.{:04}", date.month(), date.day(), date.year())
}

/// serde 适配: 日期字段按 YYYY-MM-DD 严格读写
///
/// 用法: `#[serde(with = "crate::engine::calendar::iso_date")]`
pub mod iso_date {
    use super::{format_date_only, parse_date_only};
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_date_only(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_date_only(&raw).map_err(de::Error::custom)
    }
}

/// 短日期标签，如 "Jan 5"
pub fn short_date_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// 月份标签，如 "Jan 2026"
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// 下个月的 1 号
pub fn first_of_next_month(date: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
}
