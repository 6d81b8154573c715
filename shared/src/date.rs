//! 时间类型模块
//!
//! 后端返回的 `created_at` 既可能是 RFC 3339（带时区），
//! 也可能是不带时区的 ISO 8601（按 UTC 解释）。
//! - `Timestamp`: 可比较的毫秒时间戳
//! - `parse_timestamp` / `format_*`: 解析与显示

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// 毫秒时间戳
///
/// 内部存储为 `i64`，表示自 Unix 纪元以来的毫秒数
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    #[inline]
    pub const fn new(ms: i64) -> Self {
        Self(ms)
    }

    #[inline]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// 当前时间（wasm 下由 chrono 的 `wasmbind` 读取 `Date.now()`）
    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    /// 向前推 `days` 天
    pub fn days_before(&self, days: u32) -> Self {
        Self(self.0 - Duration::days(i64::from(days)).num_milliseconds())
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp_millis())
    }
}

impl From<i64> for Timestamp {
    fn from(ms: i64) -> Self {
        Self(ms)
    }
}

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d"];

/// 解析后端时间字符串
///
/// 返回 None 如果解析失败
pub fn parse_timestamp(s: &str) -> Option<Timestamp> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(Timestamp::from(dt.with_timezone(&Utc)));
    }
    // Flask `jsonify` 对 datetime 的默认输出
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(Timestamp::from(dt.with_timezone(&Utc)));
    }
    NAIVE_FORMATS.iter().find_map(|fmt| {
        NaiveDateTime::parse_from_str(s, fmt)
            .ok()
            .or_else(|| {
                chrono::NaiveDate::parse_from_str(s, fmt)
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
            .map(|naive| Timestamp::from(naive.and_utc()))
    })
}

/// 日志列表中的格式: `Mar 01, 2024 10:00`
///
/// 无法解析时原样返回。
pub fn format_short(s: &str) -> String {
    match parse_timestamp(s).and_then(|ts| ts.to_datetime()) {
        Some(dt) => dt.format("%b %d, %Y %H:%M").to_string(),
        None => s.to_string(),
    }
}

/// 仪表盘中的格式: `2024-03-01 10:00:00`
pub fn format_long(s: &str) -> String {
    match parse_timestamp(s).and_then(|ts| ts.to_datetime()) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339_and_naive() {
        let a = parse_timestamp("2024-03-01T10:00:00Z").unwrap();
        let b = parse_timestamp("2024-03-01T10:00:00").unwrap();
        let c = parse_timestamp("2024-03-01T12:00:00+02:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert!(parse_timestamp("2024-03-01T10:00:00.123456").is_some());
        assert!(parse_timestamp("Fri, 01 Mar 2024 10:00:00 GMT").is_some());
        assert!(parse_timestamp("2024-03-01").is_some());
    }

    #[test]
    fn test_parse_garbage_is_none() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_days_before() {
        let now = parse_timestamp("2024-03-08T00:00:00Z").unwrap();
        let cutoff = now.days_before(7);
        assert_eq!(cutoff, parse_timestamp("2024-03-01T00:00:00Z").unwrap());
    }

    #[test]
    fn test_format_short_falls_back_to_raw() {
        assert_eq!(format_short("2024-03-01T10:05:00Z"), "Mar 01, 2024 10:05");
        assert_eq!(format_short("n/a"), "n/a");
        assert_eq!(format_long("2024-03-01T10:05:00Z"), "2024-03-01 10:05:00");
    }
}
