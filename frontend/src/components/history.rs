use leptos::prelude::*;
use rxlens_shared::PrescriptionScan;
use rxlens_shared::date::format_short;
use rxlens_shared::listing::{ScanSortField, SortDirection, SortSpec};

use crate::components::remote::{Loading, use_remote};
use crate::components::table::{ListControls, SearchBox};
use crate::components::widgets::{Pagination, SortHeader};

fn drugs_cell(drugs: &[String]) -> AnyView {
    if drugs.is_empty() {
        return view! { <span class="text-base-content/50">"None"</span> }.into_any();
    }
    view! {
        <div class="flex flex-wrap gap-1">
            {drugs
                .iter()
                .map(|d| view! { <span class="badge badge-sm badge-outline">{d.clone()}</span> })
                .collect_view()}
        </div>
    }
    .into_any()
}

#[component]
fn ScanRow(scan: PrescriptionScan) -> impl IntoView {
    view! {
        <tr class="hover">
            <td class="max-w-md">
                <p class="line-clamp-2 break-words">{scan.ocr_text.clone()}</p>
            </td>
            <td>{drugs_cell(&scan.found_drugs)}</td>
            <td class="whitespace-nowrap text-sm">{format_short(&scan.created_at)}</td>
        </tr>
    }
}

#[component]
pub fn HistoryPage() -> impl IntoView {
    let history = use_remote("Failed to load history", |api| async move {
        api.history().await
    });
    let controls = ListControls::new(
        SortSpec::new(ScanSortField::CreatedAt, SortDirection::Desc),
        None,
    );
    let view_state = controls.apply(history.data);
    let page_info = Signal::derive(move || view_state.with(|(_, info)| *info));

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <div class="flex flex-col md:flex-row md:items-center justify-between gap-4">
                    <h3 class="card-title">"Recognition History"</h3>
                    <SearchBox
                        value=controls.search
                        page=controls.page
                        placeholder="Search text or drugs..."
                    />
                </div>

                <Show when=move || !history.loading.get() fallback=|| view! { <Loading /> }>
                    <div class="overflow-x-auto">
                        <table class="table">
                            <thead>
                                <tr>
                                    <SortHeader title="Extracted Text" field=ScanSortField::OcrText sort=controls.sort />
                                    <SortHeader title="Drugs" field=ScanSortField::Drugs sort=controls.sort />
                                    <SortHeader title="Date" field=ScanSortField::CreatedAt sort=controls.sort />
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || view_state.with(|(items, _)| items.clone())
                                    key=|scan| scan.id.clone()
                                    children=|scan| view! { <ScanRow scan=scan /> }
                                />
                            </tbody>
                        </table>
                        <Show when=move || page_info.get().total_items == 0>
                            <p class="py-8 text-center text-base-content/50">"No scans found"</p>
                        </Show>
                    </div>
                    <Pagination info=page_info page=controls.page per_page=controls.per_page />
                </Show>
            </div>
        </div>
    }
}
