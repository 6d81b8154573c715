//! 通用小组件：统计卡片、置信度条、排序表头、分页

use leptos::prelude::*;
use rxlens_shared::ConfidenceTier;
use rxlens_shared::confidence::{bar_width, label};
use rxlens_shared::listing::{PAGE_SIZES, PageInfo, SortDirection, SortSpec};

use crate::components::icons::{ArrowUpDown, ChevronLeft, ChevronRight};

#[component]
pub fn StatCard(
    #[prop(into)] title: String,
    #[prop(into)] value: Signal<String>,
    #[prop(optional, into)] description: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="stat">
            <div class="stat-figure text-primary">{children()}</div>
            <div class="stat-title">{title}</div>
            <div class="stat-value text-primary text-3xl">{move || value.get()}</div>
            {description.map(|d| view! { <div class="stat-desc">{d}</div> })}
        </div>
    }
}

/// 置信度进度条
///
/// 宽度被限制在 0..100，标签始终显示原始分数。
#[component]
pub fn ConfidenceBar(#[prop(into)] title: String, score: f64) -> impl IntoView {
    let tier = ConfidenceTier::classify(score);

    view! {
        <div class="space-y-1">
            <div class="flex justify-between text-sm">
                <span class="font-medium">{title}</span>
                <span class=format!("font-semibold {}", tier.text_class())>{label(score)}</span>
            </div>
            <div class="w-full h-2 rounded-full bg-base-300 overflow-hidden">
                <div
                    class=format!("h-2 rounded-full {}", tier.bar_class())
                    style=format!("width: {:.1}%", bar_width(score))
                ></div>
            </div>
        </div>
    }
}

/// 可点击排序的表头
#[component]
pub fn SortHeader<F>(
    title: &'static str,
    field: F,
    sort: RwSignal<SortSpec<F>>,
    #[prop(optional)] class: &'static str,
) -> impl IntoView
where
    F: Copy + PartialEq + Send + Sync + 'static,
{
    let indicator = move || {
        let spec = sort.get();
        if spec.field != field {
            return view! { <ArrowUpDown attr:class="h-3 w-3 opacity-40" /> }.into_any();
        }
        match spec.direction {
            SortDirection::Asc => view! { <span class="text-xs">"▲"</span> }.into_any(),
            SortDirection::Desc => view! { <span class="text-xs">"▼"</span> }.into_any(),
        }
    };

    view! {
        <th class=class>
            <button
                class="flex items-center gap-1 hover:text-primary"
                on:click=move |_| sort.update(|s| *s = s.toggle(field))
            >
                {title}
                {indicator}
            </button>
        </th>
    }
}

/// 分页控件
///
/// 修改每页条数时回到第一页。
#[component]
pub fn Pagination(
    #[prop(into)] info: Signal<PageInfo>,
    page: RwSignal<usize>,
    per_page: RwSignal<usize>,
) -> impl IntoView {
    let on_per_page = move |ev: leptos::ev::Event| {
        if let Ok(size) = event_target_value(&ev).parse::<usize>() {
            per_page.set(size);
            page.set(1);
        }
    };

    view! {
        <div class="flex flex-col md:flex-row items-center justify-between gap-4 p-4">
            <div class="text-sm text-base-content/70">{move || info.get().summary()}</div>
            <div class="flex items-center gap-4">
                <label class="flex items-center gap-2 text-sm">
                    "Rows per page"
                    <select class="select select-bordered select-sm" on:change=on_per_page>
                        {PAGE_SIZES
                            .into_iter()
                            .map(|size| {
                                view! {
                                    <option value=size.to_string() selected=move || per_page.get() == size>
                                        {size}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </label>
                <div class="join">
                    <button
                        class="join-item btn btn-sm"
                        disabled=move || !info.get().has_prev()
                        on:click=move |_| page.set(info.get_untracked().current.saturating_sub(1).max(1))
                    >
                        <ChevronLeft attr:class="h-4 w-4" />
                        "Previous"
                    </button>
                    <button class="join-item btn btn-sm btn-disabled">
                        {move || {
                            let i = info.get();
                            format!("Page {} of {}", i.current, i.total_pages.max(1))
                        }}
                    </button>
                    <button
                        class="join-item btn btn-sm"
                        disabled=move || !info.get().has_next()
                        on:click=move |_| page.set(info.get_untracked().current + 1)
                    >
                        "Next"
                        <ChevronRight attr:class="h-4 w-4" />
                    </button>
                </div>
            </div>
        </div>
    }
}
