use leptos::prelude::*;
use rxlens_shared::date::format_short;
use rxlens_shared::text::group_thousands;
use rxlens_shared::{ActivityEntry, AdminDashboardStats};

use crate::components::charts::{BarChart, LineChart};
use crate::components::icons::*;
use crate::components::remote::{Loading, use_remote};
use crate::components::widgets::StatCard;

fn status_badge(status: &str) -> &'static str {
    match status {
        "success" | "completed" => "badge badge-success badge-sm",
        "failed" | "error" => "badge badge-error badge-sm",
        _ => "badge badge-ghost badge-sm",
    }
}

#[component]
fn ActivityRow(entry: ActivityEntry) -> impl IntoView {
    let status = if entry.status.is_empty() {
        "unknown".to_string()
    } else {
        entry.status.clone()
    };

    view! {
        <tr class="hover">
            <td>
                <div class="font-medium">{entry.user.name.clone()}</div>
                <div class="text-xs text-base-content/60">{entry.user.email.clone()}</div>
            </td>
            <td class="text-sm">{entry.model.clone()}</td>
            <td><span class=status_badge(&status)>{status.clone()}</span></td>
            <td class="whitespace-nowrap text-sm">{format_short(&entry.created_at)}</td>
        </tr>
    }
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let stats = use_remote("Failed to load dashboard", |api| async move {
        api.admin_dashboard().await
    });
    let data = stats.data;

    let scans_per_day = Signal::derive(move || {
        data.with(|s: &AdminDashboardStats| {
            s.scans_per_day
                .iter()
                .map(|d| (d.date.clone(), d.scans as f64))
                .collect::<Vec<_>>()
        })
    });
    let accuracy = Signal::derive(move || {
        data.with(|s| {
            s.accuracy_trends
                .iter()
                .map(|p| (p.date.clone(), p.accuracy))
                .collect::<Vec<_>>()
        })
    });

    view! {
        <div class="space-y-6">
            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                <StatCard title="Total Users" value=move || group_thousands(data.with(|s| s.total_users))>
                    <Users attr:class="h-8 w-8" />
                </StatCard>
                <StatCard title="Total Scans" value=move || group_thousands(data.with(|s| s.total_scans))>
                    <ScanText attr:class="h-8 w-8" />
                </StatCard>
                <StatCard title="Success Rate" value=move || format!("{:.1}%", data.with(|s| s.success_rate))>
                    <Activity attr:class="h-8 w-8" />
                </StatCard>
            </div>

            <Show when=move || !stats.loading.get() fallback=|| view! { <Loading /> }>
                <div class="grid gap-6 lg:grid-cols-2">
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <h3 class="card-title">"Scans per Day"</h3>
                            <BarChart series=scans_per_day />
                        </div>
                    </div>
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <h3 class="card-title">"Accuracy Trends"</h3>
                            <LineChart series=accuracy max=100.0 />
                        </div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h3 class="card-title">"Recent Activity"</h3>
                        <div class="overflow-x-auto">
                            <table class="table">
                                <thead>
                                    <tr>
                                        <th>"User"</th>
                                        <th>"Model"</th>
                                        <th>"Status"</th>
                                        <th>"Date"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || data.with(|s| s.recent_activity.clone())
                                        key=|entry| entry.id.clone()
                                        children=|entry| view! { <ActivityRow entry=entry /> }
                                    />
                                </tbody>
                            </table>
                            <Show when=move || data.with(|s| s.recent_activity.is_empty())>
                                <p class="py-8 text-center text-base-content/50">"No recent activity"</p>
                            </Show>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}
