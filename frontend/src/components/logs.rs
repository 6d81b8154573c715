//! 识别日志
//!
//! 搜索同时匹配用户名、邮箱、OCR 文本和药品；日期范围默认最近 7 天，
//! `created_at` 无法解析的条目会被日期过滤排除。

use leptos::prelude::*;
use rxlens_shared::PrescriptionLog;
use rxlens_shared::date::format_short;
use rxlens_shared::listing::{DateRange, LogSortField, SortDirection, SortSpec};
use rxlens_shared::text::truncate_chars;

use crate::components::icons::RefreshCw;
use crate::components::remote::{Loading, use_remote};
use crate::components::table::{DateRangeSelect, ListControls, SearchBox};
use crate::components::widgets::{Pagination, SortHeader};

const OCR_PREVIEW_CHARS: usize = 80;

#[component]
fn LogRow(log: PrescriptionLog) -> impl IntoView {
    let drugs = if log.found_drugs.is_empty() {
        "None".to_string()
    } else {
        log.found_drugs.join(", ")
    };

    view! {
        <tr class="hover">
            <td>
                <div class="font-medium">{log.user.name.clone()}</div>
                <div class="text-xs text-base-content/60">{log.user.email.clone()}</div>
            </td>
            <td class="max-w-sm text-sm" title=log.ocr_text.clone()>
                {truncate_chars(&log.ocr_text, OCR_PREVIEW_CHARS)}
            </td>
            <td class="text-sm">{drugs}</td>
            <td class="whitespace-nowrap text-sm">{format_short(&log.created_at)}</td>
        </tr>
    }
}

#[component]
pub fn LogsPage() -> impl IntoView {
    let logs = use_remote("Failed to load logs", |api| async move { api.logs().await });
    let controls = ListControls::new(
        SortSpec::new(LogSortField::CreatedAt, SortDirection::Desc),
        Some(DateRange::default()),
    );
    let view_state = controls.apply(logs.data);
    let page_info = Signal::derive(move || view_state.with(|(_, info)| *info));

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <div class="flex flex-col lg:flex-row lg:items-center justify-between gap-4">
                    <h3 class="card-title">"Recognition Logs"</h3>
                    <div class="flex flex-col md:flex-row gap-2 w-full lg:w-auto">
                        <SearchBox
                            value=controls.search
                            page=controls.page
                            placeholder="Search user, text or drugs..."
                        />
                        <DateRangeSelect value=controls.date_range page=controls.page />
                        <button
                            class="btn btn-ghost btn-square"
                            aria-label="Refresh"
                            disabled=move || logs.loading.get()
                            on:click=move |_| logs.reload()
                        >
                            <RefreshCw attr:class="h-4 w-4" />
                        </button>
                    </div>
                </div>

                <Show when=move || !logs.loading.get() fallback=|| view! { <Loading /> }>
                    <div class="overflow-x-auto">
                        <table class="table">
                            <thead>
                                <tr>
                                    <SortHeader title="User" field=LogSortField::User sort=controls.sort />
                                    <SortHeader title="Extracted Text" field=LogSortField::OcrText sort=controls.sort />
                                    <SortHeader title="Drugs" field=LogSortField::Drugs sort=controls.sort />
                                    <SortHeader title="Date" field=LogSortField::CreatedAt sort=controls.sort />
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || view_state.with(|(items, _)| items.clone())
                                    key=|log| log.id.clone()
                                    children=|log| view! { <LogRow log=log /> }
                                />
                            </tbody>
                        </table>
                        <Show when=move || page_info.get().total_items == 0>
                            <p class="py-8 text-center text-base-content/50">"No logs match the current filters"</p>
                        </Show>
                    </div>
                    <Pagination info=page_info page=controls.page per_page=controls.per_page />
                </Show>
            </div>
        </div>
    }
}
