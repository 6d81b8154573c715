//! 客户端列表查询
//!
//! 搜索、日期截止、排序、分页全部作用于已经取回的结果集，
//! 不向服务端发送任何分页参数。
//!
//! 处理顺序固定为：过滤 → 排序 → 分页。

use crate::date::{Timestamp, parse_timestamp};
use crate::{ManagedUser, PrescriptionLog, PrescriptionScan};
use std::cmp::Ordering;

/// 可选的每页条数
pub const PAGE_SIZES: [usize; 4] = [5, 10, 20, 50];
pub const DEFAULT_PAGE_SIZE: usize = 10;

// =========================================================
// 可查询条目 (List entries)
// =========================================================

/// 可被搜索与按日期过滤的条目
pub trait ListEntry {
    fn created_at(&self) -> &str;
    /// `needle` 已经转为小写且非空
    fn matches(&self, needle: &str) -> bool;
}

fn contains_lower(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

impl ListEntry for PrescriptionLog {
    fn created_at(&self) -> &str {
        &self.created_at
    }

    fn matches(&self, needle: &str) -> bool {
        contains_lower(&self.user.name, needle)
            || contains_lower(&self.user.email, needle)
            || contains_lower(&self.ocr_text, needle)
            || self.found_drugs.iter().any(|d| contains_lower(d, needle))
    }
}

impl ListEntry for PrescriptionScan {
    fn created_at(&self) -> &str {
        &self.created_at
    }

    fn matches(&self, needle: &str) -> bool {
        contains_lower(&self.ocr_text, needle)
            || self.found_drugs.iter().any(|d| contains_lower(d, needle))
    }
}

impl ListEntry for ManagedUser {
    fn created_at(&self) -> &str {
        &self.created_at
    }

    fn matches(&self, needle: &str) -> bool {
        contains_lower(&self.name, needle) || contains_lower(&self.email, needle)
    }
}

// =========================================================
// 日期范围 (Date range)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    LastDay,
    #[default]
    LastWeek,
    LastMonth,
    LastQuarter,
    LastYear,
}

impl DateRange {
    pub const ALL: [DateRange; 5] = [
        DateRange::LastDay,
        DateRange::LastWeek,
        DateRange::LastMonth,
        DateRange::LastQuarter,
        DateRange::LastYear,
    ];

    pub fn days(&self) -> u32 {
        match self {
            DateRange::LastDay => 1,
            DateRange::LastWeek => 7,
            DateRange::LastMonth => 30,
            DateRange::LastQuarter => 90,
            DateRange::LastYear => 365,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DateRange::LastDay => "Last 24 hours",
            DateRange::LastWeek => "Last 7 days",
            DateRange::LastMonth => "Last 30 days",
            DateRange::LastQuarter => "Last 90 days",
            DateRange::LastYear => "Last year",
        }
    }

    /// 从下拉框的值（天数字符串）解析
    pub fn parse(value: &str) -> Option<Self> {
        let days: u32 = value.trim().parse().ok()?;
        Self::ALL.into_iter().find(|r| r.days() == days)
    }

    pub fn cutoff(&self, now: Timestamp) -> Timestamp {
        now.days_before(self.days())
    }
}

// =========================================================
// 排序 (Sorting)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// 某类条目的一个可排序字段
pub trait SortField<T>: Copy + PartialEq {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: Copy + PartialEq> SortSpec<F> {
    pub fn new(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// 点击表头：同一字段翻转方向，新字段从降序开始
    pub fn toggle(self, field: F) -> Self {
        if self.field == field {
            Self::new(field, self.direction.flipped())
        } else {
            Self::new(field, SortDirection::Desc)
        }
    }
}

/// 忽略大小写比较，相等时再按原文比较以保证全序
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// 无法解析的时间视为最早
fn compare_created(a: &str, b: &str) -> Ordering {
    parse_timestamp(a).cmp(&parse_timestamp(b))
}

fn compare_drugs(a: &[String], b: &[String]) -> Ordering {
    compare_text(&a.join(", "), &b.join(", "))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogSortField {
    User,
    OcrText,
    Drugs,
    #[default]
    CreatedAt,
}

impl SortField<PrescriptionLog> for LogSortField {
    fn compare(&self, a: &PrescriptionLog, b: &PrescriptionLog) -> Ordering {
        match self {
            LogSortField::User => compare_text(&a.user.name, &b.user.name),
            LogSortField::OcrText => compare_text(&a.ocr_text, &b.ocr_text),
            LogSortField::Drugs => compare_drugs(&a.found_drugs, &b.found_drugs),
            LogSortField::CreatedAt => compare_created(&a.created_at, &b.created_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanSortField {
    OcrText,
    Drugs,
    #[default]
    CreatedAt,
}

impl SortField<PrescriptionScan> for ScanSortField {
    fn compare(&self, a: &PrescriptionScan, b: &PrescriptionScan) -> Ordering {
        match self {
            ScanSortField::OcrText => compare_text(&a.ocr_text, &b.ocr_text),
            ScanSortField::Drugs => compare_drugs(&a.found_drugs, &b.found_drugs),
            ScanSortField::CreatedAt => compare_created(&a.created_at, &b.created_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserSortField {
    #[default]
    Name,
    Email,
    CreatedAt,
}

impl SortField<ManagedUser> for UserSortField {
    fn compare(&self, a: &ManagedUser, b: &ManagedUser) -> Ordering {
        match self {
            UserSortField::Name => compare_text(&a.name, &b.name),
            UserSortField::Email => compare_text(&a.email, &b.email),
            UserSortField::CreatedAt => compare_created(&a.created_at, &b.created_at),
        }
    }
}

// =========================================================
// 分页 (Pagination)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// 从 1 开始，已限制在有效范围内
    pub current: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// 本页第一条的序号（从 1 开始），空列表为 0
    pub first_item: usize,
    pub last_item: usize,
}

impl PageInfo {
    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_pages
    }

    pub fn summary(&self) -> String {
        format!(
            "Showing {} to {} of {} results",
            self.first_item, self.last_item, self.total_items
        )
    }
}

/// 切出第 `page` 页
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> (&[T], PageInfo) {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);
    let current = page.clamp(1, total_pages.max(1));

    let start = ((current - 1) * per_page).min(total_items);
    let end = (start + per_page).min(total_items);

    let info = PageInfo {
        current,
        total_pages,
        total_items,
        first_item: if start < end { start + 1 } else { 0 },
        last_item: end,
    };
    (&items[start..end], info)
}

// =========================================================
// 组合查询 (Query)
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery<F> {
    pub search: String,
    /// None 表示不按日期过滤
    pub date_range: Option<DateRange>,
    pub sort: SortSpec<F>,
    pub page: usize,
    pub per_page: usize,
}

impl<F: Copy + PartialEq + Default> Default for ListQuery<F> {
    fn default() -> Self {
        Self {
            search: String::new(),
            date_range: None,
            sort: SortSpec::new(F::default(), SortDirection::Desc),
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

/// 查询结果：当前页条目 + 分页信息
#[derive(Debug)]
pub struct QueryOutcome<'a, T> {
    pub items: Vec<&'a T>,
    pub page: PageInfo,
}

impl<F: Copy + PartialEq> ListQuery<F> {
    /// 过滤（搜索 ∧ 日期）后排序，不分页
    pub fn filter_sorted<'a, T>(&self, items: &'a [T], now: Timestamp) -> Vec<&'a T>
    where
        T: ListEntry,
        F: SortField<T>,
    {
        let needle = self.search.trim().to_lowercase();
        let cutoff = self.date_range.map(|range| range.cutoff(now));

        let mut filtered: Vec<&T> = items
            .iter()
            .filter(|item| needle.is_empty() || item.matches(&needle))
            .filter(|item| match cutoff {
                None => true,
                Some(cutoff) => {
                    parse_timestamp(item.created_at()).is_some_and(|ts| ts >= cutoff)
                }
            })
            .collect();

        let SortSpec { field, direction } = self.sort;
        filtered.sort_by(|a, b| direction.apply(field.compare(a, b)));
        filtered
    }

    pub fn run<'a, T>(&self, items: &'a [T], now: Timestamp) -> QueryOutcome<'a, T>
    where
        T: ListEntry,
        F: SortField<T>,
    {
        let filtered = self.filter_sorted(items, now);
        let (page_items, page) = paginate(&filtered, self.page, self.per_page);
        QueryOutcome {
            items: page_items.to_vec(),
            page,
        }
    }
}

#[cfg(test)]
mod tests;
