use leptos::prelude::*;
use rxlens_shared::date::{format_long, format_short};
use rxlens_shared::text::{group_thousands, truncate_chars};
use rxlens_shared::{PrescriptionScan, UserDashboardStats};

use crate::components::icons::*;
use crate::components::remote::{Loading, use_remote};
use crate::components::widgets::StatCard;
use crate::web::route::AppRoute;
use crate::web::router::Link;

/// 最近扫描中 OCR 文本的最大显示长度
const PREVIEW_CHARS: usize = 100;

#[component]
fn RecentScan(scan: PrescriptionScan) -> impl IntoView {
    let drugs = if scan.found_drugs.is_empty() {
        "No drugs detected".to_string()
    } else {
        scan.found_drugs.join(", ")
    };

    view! {
        <li class="py-3 flex items-start gap-3">
            <div class="p-2 rounded-lg bg-primary/10 text-primary">
                <FileText attr:class="h-5 w-5" />
            </div>
            <div class="flex-1 min-w-0">
                <p class="text-sm break-words">{truncate_chars(&scan.ocr_text, PREVIEW_CHARS)}</p>
                <p class="text-xs text-base-content/60 mt-1">{drugs}</p>
            </div>
            <span class="text-xs text-base-content/60 whitespace-nowrap">{format_short(&scan.created_at)}</span>
        </li>
    }
}

#[component]
pub fn UserDashboardPage() -> impl IntoView {
    let stats = use_remote("Failed to load dashboard", |api| async move {
        api.user_dashboard().await
    });
    let data = stats.data;

    let last_upload = move || {
        data.with(|s| {
            s.last_upload
                .as_ref()
                .map(|u| format_long(&u.created_at))
                .unwrap_or_else(|| "Never".to_string())
        })
    };

    view! {
        <div class="space-y-6">
            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                <StatCard
                    title="Total Uploads"
                    value=move || group_thousands(data.with(|s: &UserDashboardStats| s.total_uploads))
                >
                    <Upload attr:class="h-8 w-8" />
                </StatCard>
                <StatCard
                    title="Success Rate"
                    value=move || format!("{:.1}%", data.with(|s| s.success_rate))
                >
                    <CircleCheck attr:class="h-8 w-8" />
                </StatCard>
                <StatCard title="Last Upload" value=last_upload>
                    <History attr:class="h-8 w-8" />
                </StatCard>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <div class="flex items-center justify-between">
                        <h3 class="card-title">"Recent Scans"</h3>
                        <Link to=AppRoute::UserUpload class="btn btn-primary btn-sm">
                            <Upload attr:class="h-4 w-4" />
                            "New Upload"
                        </Link>
                    </div>
                    <Show
                        when=move || !stats.loading.get()
                        fallback=|| view! { <Loading /> }
                    >
                        <Show
                            when=move || data.with(|s| !s.recent_scans.is_empty())
                            fallback=|| view! {
                                <p class="py-8 text-center text-base-content/50">"No scans yet. Upload a prescription to get started."</p>
                            }
                        >
                            <ul class="divide-y divide-base-200">
                                <For
                                    each=move || data.with(|s| s.recent_scans.clone())
                                    key=|scan| scan.id.clone()
                                    children=|scan| view! { <RecentScan scan=scan /> }
                                />
                            </ul>
                        </Show>
                    </Show>
                </div>
            </div>
        </div>
    }
}
