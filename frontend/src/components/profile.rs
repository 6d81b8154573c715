use leptos::prelude::*;
use leptos::task::spawn_local;
use rxlens_shared::text::initials;
use rxlens_shared::validation::{Field, FieldErrors, PasswordChange};

use crate::api::use_api;
use crate::components::form::TextField;
use crate::components::remote::use_error_reporter;
use crate::notify::use_notifier;
use crate::session::use_session;

/// 修改谁的密码
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordTarget {
    /// 普通用户，按 id 提交
    User(String),
    /// 当前管理员
    Admin,
}

#[component]
pub fn PasswordForm(target: PasswordTarget) -> impl IntoView {
    let api = use_api();
    let notifier = use_notifier();
    let reporter = use_error_reporter();
    let target = StoredValue::new(target);

    let current = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }
        let change = PasswordChange {
            current: current.get_untracked(),
            new: new_password.get_untracked(),
            confirm: confirm.get_untracked(),
        };
        if let Err(field_errors) = change.validate() {
            errors.set(field_errors);
            return;
        }

        set_is_submitting.set(true);
        let client = api.client();
        let target = target.get_value();
        spawn_local(async move {
            let outcome = match &target {
                PasswordTarget::User(user_id) => {
                    client
                        .update_password(user_id, &change.current, &change.new)
                        .await
                }
                PasswordTarget::Admin => {
                    client
                        .change_admin_password(&change.current, &change.new)
                        .await
                }
            };
            match outcome {
                Ok(resp) => {
                    notifier.success(
                        resp.message
                            .unwrap_or_else(|| "Password updated successfully".to_string()),
                    );
                    current.set(String::new());
                    new_password.set(String::new());
                    confirm.set(String::new());
                }
                Err(e) => reporter.report("Failed to update password", &e),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <form class="card-body" on:submit=on_submit novalidate>
                <h3 class="card-title">"Change Password"</h3>
                <TextField
                    id="current-password"
                    title="Current password"
                    kind="password"
                    autocomplete="current-password"
                    value=current
                    errors=errors
                    field=Field::CurrentPassword
                />
                <TextField
                    id="new-password"
                    title="New password"
                    kind="password"
                    autocomplete="new-password"
                    value=new_password
                    errors=errors
                    field=Field::NewPassword
                />
                <TextField
                    id="confirm-password"
                    title="Confirm new password"
                    kind="password"
                    autocomplete="new-password"
                    value=confirm
                    errors=errors
                    field=Field::ConfirmPassword
                />
                <div class="card-actions justify-end mt-2">
                    <button class="btn btn-primary" disabled=move || is_submitting.get()>
                        {move || if is_submitting.get() {
                            view! { <span class="loading loading-spinner"></span> "Updating..." }.into_any()
                        } else {
                            "Update Password".into_any()
                        }}
                    </button>
                </div>
            </form>
        </div>
    }
}

/// 用户资料页：资料只读，来自会话
#[component]
pub fn UserProfilePage() -> impl IntoView {
    let session = use_session();
    let Some(current) = session.get_untracked() else {
        // 路由守卫保证这里总有会话
        return ().into_any();
    };
    let user = current.user;

    let row = |title: &'static str, value: String| {
        view! {
            <div class="flex justify-between py-3">
                <span class="text-base-content/60">{title}</span>
                <span class="font-medium">{value}</span>
            </div>
        }
    };

    view! {
        <div class="max-w-3xl mx-auto space-y-6">
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <div class="flex items-center gap-4 mb-4">
                        <div class="avatar placeholder">
                            <div class="bg-primary text-primary-content w-16 rounded-full">
                                <span class="text-xl">{initials(&user.name)}</span>
                            </div>
                        </div>
                        <div>
                            <h3 class="text-xl font-semibold">{user.name.clone()}</h3>
                            <p class="text-base-content/60">{user.email.clone()}</p>
                        </div>
                    </div>
                    <div class="divide-y divide-base-200">
                        {row("Name", user.name.clone())}
                        {row("Email", user.email.clone())}
                        {row("Role", user.role.to_string())}
                    </div>
                </div>
            </div>
            <PasswordForm target=PasswordTarget::User(user.id.clone()) />
        </div>
    }
    .into_any()
}
