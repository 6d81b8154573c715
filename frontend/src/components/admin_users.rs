use leptos::prelude::*;
use leptos::task::spawn_local;
use rxlens_shared::date::format_short;
use rxlens_shared::listing::{SortDirection, SortSpec, UserSortField};
use rxlens_shared::text::initials;
use rxlens_shared::{ManagedUser, UserStatus};

use crate::api::use_api;
use crate::components::remote::{Loading, use_error_reporter, use_remote};
use crate::components::table::{ListControls, SearchBox};
use crate::components::widgets::{Pagination, SortHeader};
use crate::notify::use_notifier;

fn status_of(list: &[ManagedUser], id: &str) -> UserStatus {
    list.iter()
        .find(|u| u.id == id)
        .map(|u| u.status)
        .unwrap_or_default()
}

#[component]
fn UserRow(
    user: ManagedUser,
    users: RwSignal<Vec<ManagedUser>>,
    pending: RwSignal<Option<String>>,
) -> impl IntoView {
    let api = use_api();
    let notifier = use_notifier();
    let reporter = use_error_reporter();
    let id = StoredValue::new(user.id.clone());

    // 列表中的最新状态，切换成功后只更新本地这一条
    let status = move || users.with(|list| id.with_value(|id| status_of(list, id)));
    let is_pending = move || pending.with(|p| id.with_value(|id| p.as_ref() == Some(id)));

    let on_toggle = move |_| {
        if pending.with_untracked(|p| p.is_some()) {
            return;
        }
        let user_id = id.get_value();
        let next = users
            .with_untracked(|list| status_of(list, &user_id))
            .toggled();
        pending.set(Some(user_id.clone()));
        let client = api.client();
        spawn_local(async move {
            match client.update_user_status(&user_id, next).await {
                Ok(resp) => {
                    users.update(|list| {
                        if let Some(u) = list.iter_mut().find(|u| u.id == user_id) {
                            u.status = next;
                        }
                    });
                    notifier.success(
                        resp.message
                            .unwrap_or_else(|| format!("User marked {}", next.as_str())),
                    );
                }
                Err(e) => reporter.report("Failed to update user", &e),
            }
            pending.set(None);
        });
    };

    view! {
        <tr class="hover">
            <td>
                <div class="flex items-center gap-3">
                    <div class="avatar placeholder">
                        <div class="bg-neutral text-neutral-content w-9 rounded-full">
                            <span class="text-xs">{initials(&user.name)}</span>
                        </div>
                    </div>
                    <span class="font-medium">{user.name.clone()}</span>
                </div>
            </td>
            <td class="text-sm">{user.email.clone()}</td>
            <td><span class="badge badge-ghost badge-sm">{user.role.to_string()}</span></td>
            <td>
                {move || {
                    let (class, text) = match status() {
                        UserStatus::Active => ("badge badge-success badge-sm", "Active"),
                        UserStatus::Inactive => ("badge badge-error badge-sm", "Inactive"),
                    };
                    view! { <span class=class>{text}</span> }
                }}
            </td>
            <td class="whitespace-nowrap text-sm">{format_short(&user.created_at)}</td>
            <td class="text-right">
                <button class="btn btn-xs btn-outline" disabled=is_pending on:click=on_toggle>
                    {move || match status() {
                        UserStatus::Active => "Deactivate",
                        UserStatus::Inactive => "Activate",
                    }}
                </button>
            </td>
        </tr>
    }
}

#[component]
pub fn AdminUsersPage() -> impl IntoView {
    let remote = use_remote("Failed to load users", |api| async move { api.users().await });
    let users = remote.data;
    let pending = RwSignal::new(Option::<String>::None);

    let controls = ListControls::new(SortSpec::new(UserSortField::Name, SortDirection::Asc), None);
    let view_state = controls.apply(users);
    let page_info = Signal::derive(move || view_state.with(|(_, info)| *info));

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <div class="flex flex-col md:flex-row md:items-center justify-between gap-4">
                    <h3 class="card-title">"User Management"</h3>
                    <SearchBox value=controls.search page=controls.page placeholder="Search name or email..." />
                </div>

                <Show when=move || !remote.loading.get() fallback=|| view! { <Loading /> }>
                    <div class="overflow-x-auto">
                        <table class="table">
                            <thead>
                                <tr>
                                    <SortHeader title="Name" field=UserSortField::Name sort=controls.sort />
                                    <SortHeader title="Email" field=UserSortField::Email sort=controls.sort />
                                    <th>"Role"</th>
                                    <th>"Status"</th>
                                    <SortHeader title="Joined" field=UserSortField::CreatedAt sort=controls.sort />
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || view_state.with(|(items, _)| items.clone())
                                    key=|user| user.id.clone()
                                    children=move |user| view! { <UserRow user=user users=users pending=pending /> }
                                />
                            </tbody>
                        </table>
                        <Show when=move || page_info.get().total_items == 0>
                            <p class="py-8 text-center text-base-content/50">"No users found"</p>
                        </Show>
                    </div>
                    <Pagination info=page_info page=controls.page per_page=controls.per_page />
                </Show>
            </div>
        </div>
    }
}
