//! 列表视图的查询状态
//!
//! 搜索、日期范围、排序和分页各自是一个信号，组合成 [`ListQuery`]
//! 后交给 shared 里的纯函数求出当前页。修改过滤条件时回到第一页。

use leptos::prelude::*;
use rxlens_shared::date::Timestamp;
use rxlens_shared::listing::{DateRange, ListEntry, ListQuery, PageInfo, SortField, SortSpec};

use crate::components::icons::Search;
use crate::config::use_config;

pub struct ListControls<F: 'static> {
    pub search: RwSignal<String>,
    pub date_range: RwSignal<Option<DateRange>>,
    pub sort: RwSignal<SortSpec<F>>,
    pub page: RwSignal<usize>,
    pub per_page: RwSignal<usize>,
}

impl<F: 'static> Clone for ListControls<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: 'static> Copy for ListControls<F> {}

impl<F> ListControls<F>
where
    F: Copy + PartialEq + Send + Sync + 'static,
{
    pub fn new(sort: SortSpec<F>, date_range: Option<DateRange>) -> Self {
        Self {
            search: RwSignal::new(String::new()),
            date_range: RwSignal::new(date_range),
            sort: RwSignal::new(sort),
            page: RwSignal::new(1),
            per_page: RwSignal::new(use_config().default_page_size),
        }
    }

    /// 当前查询（追踪所有条件）
    pub fn query(&self) -> ListQuery<F> {
        ListQuery {
            search: self.search.get(),
            date_range: self.date_range.get(),
            sort: self.sort.get(),
            page: self.page.get(),
            per_page: self.per_page.get(),
        }
    }

    /// 当前页的条目与分页信息
    pub fn apply<T>(self, data: RwSignal<Vec<T>>) -> Memo<(Vec<T>, PageInfo)>
    where
        T: ListEntry + Clone + PartialEq + Send + Sync + 'static,
        F: SortField<T>,
    {
        Memo::new(move |_| {
            let query = self.query();
            data.with(|items| {
                let outcome = query.run(items, Timestamp::now());
                (
                    outcome.items.into_iter().cloned().collect(),
                    outcome.page,
                )
            })
        })
    }
}

#[component]
pub fn SearchBox(
    value: RwSignal<String>,
    page: RwSignal<usize>,
    #[prop(into)] placeholder: String,
) -> impl IntoView {
    view! {
        <label class="input input-bordered flex items-center gap-2 w-full md:max-w-sm">
            <Search attr:class="h-4 w-4 opacity-60" />
            <input
                type="search"
                class="grow"
                placeholder=placeholder
                prop:value=value
                on:input=move |ev| {
                    value.set(event_target_value(&ev));
                    page.set(1);
                }
            />
        </label>
    }
}

/// 日期范围下拉框
#[component]
pub fn DateRangeSelect(value: RwSignal<Option<DateRange>>, page: RwSignal<usize>) -> impl IntoView {
    let on_change = move |ev: leptos::ev::Event| {
        value.set(DateRange::parse(&event_target_value(&ev)));
        page.set(1);
    };

    view! {
        <select class="select select-bordered" on:change=on_change>
            {DateRange::ALL
                .into_iter()
                .map(|range| {
                    view! {
                        <option
                            value=range.days().to_string()
                            selected=move || value.get() == Some(range)
                        >
                            {range.label()}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}
