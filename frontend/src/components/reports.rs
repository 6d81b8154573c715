use leptos::prelude::*;
use leptos::task::spawn_local;
use rxlens_shared::text::group_thousands;
use rxlens_shared::{ReportData, ReportPeriod};

use crate::api::use_api;
use crate::components::charts::{DonutChart, LineChart};
use crate::components::icons::*;
use crate::components::remote::{Loading, use_error_reporter, use_remote};
use crate::components::widgets::StatCard;
use crate::notify::use_notifier;
use crate::web::save_bytes;

#[component]
pub fn ReportsPage() -> impl IntoView {
    let api = use_api();
    let notifier = use_notifier();
    let reporter = use_error_reporter();

    let period = RwSignal::new(ReportPeriod::default());
    // 读取 period 时被加载副作用追踪，切换周期会自动重新请求
    let report = use_remote("Failed to load reports", move |api| {
        let period = period.get();
        async move { api.reports(period).await }
    });
    let data = report.data;
    let (is_exporting, set_is_exporting) = signal(false);

    let activity = Signal::derive(move || {
        data.with(|r: &ReportData| {
            r.recognition_activity
                .iter()
                .map(|p| (p.name.clone(), p.recognitions as f64))
                .collect::<Vec<_>>()
        })
    });
    let distribution = Signal::derive(move || {
        data.with(|r| {
            r.prescription_distribution
                .iter()
                .map(|s| (s.name.clone(), s.value))
                .collect::<Vec<_>>()
        })
    });

    let on_period = move |ev: leptos::ev::Event| {
        if let Some(next) = ReportPeriod::parse(&event_target_value(&ev)) {
            period.set(next);
        }
    };

    let on_export = move |_| {
        if is_exporting.get_untracked() {
            return;
        }
        set_is_exporting.set(true);
        let period = period.get_untracked();
        let client = api.client();
        spawn_local(async move {
            match client.export_report(period).await {
                Ok(file) => match save_bytes(&file.bytes, &file.content_type, &file.filename) {
                    Ok(()) => notifier.success("Report exported successfully"),
                    Err(e) => {
                        log::error!("[Reports] Failed to save {}: {}", file.filename, e);
                        notifier.error("Export failed", e);
                    }
                },
                Err(e) => reporter.report("Export failed", &e),
            }
            set_is_exporting.set(false);
        });
    };

    view! {
        <div class="space-y-6">
            <div class="flex flex-col md:flex-row md:items-center justify-between gap-4">
                <select class="select select-bordered w-full md:w-48" on:change=on_period>
                    {ReportPeriod::ALL
                        .into_iter()
                        .map(|p| {
                            view! {
                                <option value=p.as_str() selected=move || period.get() == p>
                                    {p.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                <button class="btn btn-primary" disabled=move || is_exporting.get() on:click=on_export>
                    {move || if is_exporting.get() {
                        view! { <span class="loading loading-spinner"></span> "Exporting..." }.into_any()
                    } else {
                        view! { <Download attr:class="h-4 w-4" /> "Export Report" }.into_any()
                    }}
                </button>
            </div>

            <div class="stats shadow w-full stats-vertical lg:stats-horizontal bg-base-100">
                <StatCard title="Total Patients" value=move || group_thousands(data.with(|r| r.total_patients))>
                    <Users attr:class="h-8 w-8" />
                </StatCard>
                <StatCard
                    title="Active Prescriptions"
                    value=move || group_thousands(data.with(|r| r.active_prescriptions))
                >
                    <FileText attr:class="h-8 w-8" />
                </StatCard>
                <StatCard
                    title="Recognition Accuracy"
                    value=move || format!("{:.1}%", data.with(|r| r.recognition_accuracy))
                >
                    <CircleCheck attr:class="h-8 w-8" />
                </StatCard>
                <StatCard title="System Uptime" value=move || format!("{:.1}%", data.with(|r| r.system_uptime))>
                    <Activity attr:class="h-8 w-8" />
                </StatCard>
            </div>

            <Show when=move || !report.loading.get() fallback=|| view! { <Loading /> }>
                <div class="grid gap-6 lg:grid-cols-2">
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <h3 class="card-title">"Recognition Activity"</h3>
                            <LineChart series=activity />
                        </div>
                    </div>
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <h3 class="card-title">"Prescription Distribution"</h3>
                            <DonutChart series=distribution />
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}
