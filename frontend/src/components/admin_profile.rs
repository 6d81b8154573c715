use leptos::prelude::*;
use leptos::task::spawn_local;
use rxlens_shared::AdminProfile;
use rxlens_shared::validation::{Field, FieldErrors, validate_profile};

use crate::api::use_api;
use crate::components::form::TextField;
use crate::components::profile::{PasswordForm, PasswordTarget};
use crate::components::remote::{Loading, use_error_reporter, use_remote};
use crate::notify::use_notifier;

#[component]
pub fn AdminProfilePage() -> impl IntoView {
    let api = use_api();
    let notifier = use_notifier();
    let reporter = use_error_reporter();

    let profile = use_remote("Failed to load profile", |api| async move {
        api.admin_profile().await
    });

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let (is_saving, set_is_saving) = signal(false);

    // 加载完成后把服务器上的资料填入表单
    Effect::new(move |_| {
        profile.data.with(|p: &AdminProfile| {
            name.set(p.name.clone());
            email.set(p.email.clone());
            phone.set(p.phone.clone().unwrap_or_default());
        });
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_saving.get_untracked() {
            return;
        }
        let (name_value, email_value) = (name.get_untracked(), email.get_untracked());
        if let Err(field_errors) = validate_profile(&name_value, &email_value) {
            errors.set(field_errors);
            return;
        }
        let phone_value = phone.get_untracked();
        let update = AdminProfile {
            name: name_value.trim().to_string(),
            email: email_value.trim().to_string(),
            phone: Some(phone_value.trim().to_string()).filter(|p| !p.is_empty()),
        };

        set_is_saving.set(true);
        let client = api.client();
        spawn_local(async move {
            match client.update_admin_profile(update).await {
                Ok(saved) => {
                    profile.data.set(saved);
                    notifier.success("Profile updated successfully");
                }
                Err(e) => reporter.report("Failed to update profile", &e),
            }
            set_is_saving.set(false);
        });
    };

    view! {
        <div class="max-w-3xl mx-auto space-y-6">
            <Show when=move || !profile.loading.get() fallback=|| view! { <Loading /> }>
                <div class="card bg-base-100 shadow-xl">
                    <form class="card-body" on:submit=on_submit novalidate>
                        <h3 class="card-title">"Profile Information"</h3>
                        <TextField id="name" title="Name" value=name errors=errors field=Field::Name />
                        <TextField
                            id="email"
                            title="Email"
                            kind="email"
                            autocomplete="email"
                            value=email
                            errors=errors
                            field=Field::Email
                        />
                        <div class="form-control">
                            <label class="label" for="phone">
                                <span class="label-text">"Phone"</span>
                                <span class="label-text-alt text-base-content/50">"Optional"</span>
                            </label>
                            <input
                                id="phone"
                                type="tel"
                                class="input input-bordered"
                                prop:value=phone
                                on:input=move |ev| phone.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="card-actions justify-end mt-4">
                            <button class="btn btn-primary" disabled=move || is_saving.get()>
                                {move || if is_saving.get() {
                                    view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                                } else {
                                    "Save Changes".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </Show>
            <PasswordForm target=PasswordTarget::Admin />
        </div>
    }
}
