use super::*;
use crate::{Role, UserStatus, UserSummary};

// =========================================================
// 辅助函数
// =========================================================

fn now() -> Timestamp {
    parse_timestamp("2024-03-31T12:00:00Z").unwrap()
}

fn log(id: &str, name: &str, text: &str, drugs: &[&str], created_at: &str) -> PrescriptionLog {
    PrescriptionLog {
        id: id.to_string(),
        ocr_text: text.to_string(),
        found_drugs: drugs.iter().map(|d| d.to_string()).collect(),
        created_at: created_at.to_string(),
        user: UserSummary {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
        },
    }
}

fn sample_logs() -> Vec<PrescriptionLog> {
    vec![
        log("1", "Ana", "Amoxicillin 500mg tid", &["Amoxicillin"], "2024-03-30T09:00:00Z"),
        log("2", "Bruno", "Ibuprofen 200mg", &["Ibuprofen"], "2024-03-28T09:00:00Z"),
        log("3", "Carla", "Paracetamol", &["Paracetamol", "Codeine"], "2024-03-20T09:00:00Z"),
        log("4", "Diego", "Amoxicillin 250mg", &["Amoxicillin"], "2024-01-02T09:00:00Z"),
        log("5", "Eva", "illegible", &[], "not a date"),
    ]
}

fn ids(items: &[&PrescriptionLog]) -> Vec<String> {
    items.iter().map(|l| l.id.clone()).collect()
}

fn query() -> ListQuery<LogSortField> {
    ListQuery::default()
}

// =========================================================
// 过滤测试
// =========================================================

#[test]
fn test_empty_search_matches_everything() {
    let logs = sample_logs();
    let result = query().filter_sorted(&logs, now());
    assert_eq!(result.len(), logs.len());
}

#[test]
fn test_search_spans_user_text_and_drugs() {
    let logs = sample_logs();

    let mut q = query();
    q.search = "BRUNO".to_string();
    assert_eq!(ids(&q.filter_sorted(&logs, now())), vec!["2"]);

    q.search = "carla@example".to_string();
    assert_eq!(ids(&q.filter_sorted(&logs, now())), vec!["3"]);

    q.search = "codeine".to_string();
    assert_eq!(ids(&q.filter_sorted(&logs, now())), vec!["3"]);

    q.search = "amoxi".to_string();
    let mut found = ids(&q.filter_sorted(&logs, now()));
    found.sort();
    assert_eq!(found, vec!["1", "4"]);
}

#[test]
fn test_date_range_excludes_old_entries_even_when_search_matches() {
    let logs = sample_logs();
    let mut q = query();
    q.date_range = Some(DateRange::LastWeek);
    q.search = "amoxicillin".to_string();

    let result = q.filter_sorted(&logs, now());
    assert_eq!(ids(&result), vec!["1"]);

    let cutoff = now().days_before(7);
    for entry in q.filter_sorted(&logs, now()) {
        assert!(parse_timestamp(&entry.created_at).unwrap() >= cutoff);
    }
}

#[test]
fn test_date_range_excludes_unparsable_dates() {
    let logs = sample_logs();
    let mut q = query();
    q.date_range = Some(DateRange::LastYear);
    let result = q.filter_sorted(&logs, now());
    assert!(!ids(&result).contains(&"5".to_string()));
    assert_eq!(result.len(), 4);
}

#[test]
fn test_date_range_parse_from_select_value() {
    assert_eq!(DateRange::parse("7"), Some(DateRange::LastWeek));
    assert_eq!(DateRange::parse("365"), Some(DateRange::LastYear));
    assert_eq!(DateRange::parse("8"), None);
    assert_eq!(DateRange::parse("abc"), None);
}

// =========================================================
// 排序测试
// =========================================================

#[test]
fn test_sort_created_at_desc_then_asc_reverses() {
    let logs: Vec<_> = sample_logs().into_iter().take(4).collect();
    let mut q = query();
    q.sort = SortSpec::new(LogSortField::CreatedAt, SortDirection::Desc);
    let desc = ids(&q.filter_sorted(&logs, now()));
    assert_eq!(desc, vec!["1", "2", "3", "4"]);

    q.sort = q.sort.toggle(LogSortField::CreatedAt);
    assert_eq!(q.sort.direction, SortDirection::Asc);
    let asc = ids(&q.filter_sorted(&logs, now()));

    let mut reversed = desc.clone();
    reversed.reverse();
    assert_eq!(asc, reversed);
}

#[test]
fn test_toggle_new_field_starts_descending() {
    let spec = SortSpec::new(LogSortField::CreatedAt, SortDirection::Asc);
    let next = spec.toggle(LogSortField::User);
    assert_eq!(next, SortSpec::new(LogSortField::User, SortDirection::Desc));
}

#[test]
fn test_sort_by_user_and_drugs() {
    let logs = sample_logs();
    let mut q = query();
    q.sort = SortSpec::new(LogSortField::User, SortDirection::Asc);
    assert_eq!(ids(&q.filter_sorted(&logs, now())), vec!["1", "2", "3", "4", "5"]);

    q.sort = SortSpec::new(LogSortField::Drugs, SortDirection::Asc);
    let sorted = ids(&q.filter_sorted(&logs, now()));
    // 空列表最小
    assert_eq!(sorted.first().map(String::as_str), Some("5"));
    assert_eq!(sorted.last().map(String::as_str), Some("3"));
}

#[test]
fn test_unparsable_dates_sort_as_oldest() {
    let logs = sample_logs();
    let mut q = query();
    q.sort = SortSpec::new(LogSortField::CreatedAt, SortDirection::Desc);
    let sorted = ids(&q.filter_sorted(&logs, now()));
    assert_eq!(sorted.last().map(String::as_str), Some("5"));
}

// =========================================================
// 分页测试
// =========================================================

#[test]
fn test_pagination_last_partial_page() {
    let items: Vec<u32> = (1..=25).collect();
    let (page, info) = paginate(&items, 3, 10);
    assert_eq!(page.len(), 5);
    assert_eq!(page, &[21, 22, 23, 24, 25]);
    assert!(!info.has_next());
    assert!(info.has_prev());
    assert_eq!(info.total_pages, 3);
    assert_eq!(info.summary(), "Showing 21 to 25 of 25 results");
}

#[test]
fn test_pagination_clamps_page() {
    let items: Vec<u32> = (1..=25).collect();
    let (page, info) = paginate(&items, 9, 10);
    assert_eq!(info.current, 3);
    assert_eq!(page.len(), 5);

    let (page, info) = paginate(&items, 0, 10);
    assert_eq!(info.current, 1);
    assert_eq!(page.len(), 10);
    assert!(!info.has_prev());
}

#[test]
fn test_pagination_empty() {
    let items: Vec<u32> = Vec::new();
    let (page, info) = paginate(&items, 1, 10);
    assert!(page.is_empty());
    assert_eq!(info.current, 1);
    assert_eq!(info.total_pages, 0);
    assert_eq!(info.first_item, 0);
    assert!(!info.has_next());
    assert!(!info.has_prev());
}

#[test]
fn test_run_paginates_filtered_results() {
    let logs: Vec<PrescriptionLog> = (0..25)
        .map(|i| {
            log(
                &i.to_string(),
                "Ana",
                "text",
                &["x"],
                &format!("2024-03-30T{:02}:00:00Z", i % 24),
            )
        })
        .collect();
    let mut q = query();
    q.page = 3;
    q.per_page = 10;
    let outcome = q.run(&logs, now());
    assert_eq!(outcome.items.len(), 5);
    assert!(!outcome.page.has_next());
}

// =========================================================
// 其他条目类型
// =========================================================

#[test]
fn test_users_search_by_email() {
    let users = vec![
        ManagedUser {
            id: "u1".to_string(),
            name: "Ana".to_string(),
            email: "ana@clinic.org".to_string(),
            role: Role::User,
            status: UserStatus::Active,
            created_at: "2024-01-01T00:00:00Z".to_string(),
        },
        ManagedUser {
            id: "u2".to_string(),
            name: "Root".to_string(),
            email: "root@example.com".to_string(),
            role: Role::Admin,
            status: UserStatus::Inactive,
            created_at: String::new(),
        },
    ];
    let mut q: ListQuery<UserSortField> = ListQuery::default();
    q.search = "clinic".to_string();
    let result = q.filter_sorted(&users, now());
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, "u1");
}
