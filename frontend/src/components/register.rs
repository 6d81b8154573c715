use leptos::prelude::*;
use leptos::task::spawn_local;
use rxlens_shared::validation::{Field, FieldErrors, validate_registration};
use rxlens_shared::{Role, Session};

use crate::api::use_api;
use crate::components::icons::ScanText;
use crate::components::form::{FieldError, TextField};
use crate::notify::use_notifier;
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::Link;

/// 注册页
///
/// 注册成功后后端直接返回令牌，视同登录。
#[component]
pub fn RegisterPage() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let notifier = use_notifier();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let role = RwSignal::new(Option::<Role>::None);
    let errors = RwSignal::new(FieldErrors::new());
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }
        let name = name.get_untracked();
        let email = email.get_untracked();
        let password = password.get_untracked();
        if let Err(field_errors) = validate_registration(
            &name,
            &email,
            &password,
            &confirm.get_untracked(),
            role.get_untracked(),
        ) {
            errors.set(field_errors);
            return;
        }
        let Some(role) = role.get_untracked() else {
            return;
        };

        set_is_submitting.set(true);
        let client = api.client();
        spawn_local(async move {
            match client.register(&name, &email, &password, role).await {
                Ok(resp) => {
                    session.login(Session::new(resp.user, resp.token));
                    notifier.success("Account created");
                }
                Err(e) => notifier.error("Registration failed", e.to_string()),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="flex flex-col items-center gap-2 mb-4">
                    <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                        <ScanText attr:class="h-8 w-8" />
                    </div>
                    <h1 class="text-3xl font-bold">"Create an account"</h1>
                    <p class="text-base-content/70">"Start digitizing prescriptions in minutes"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit novalidate>
                        <TextField id="name" title="Full name" value=name errors=errors field=Field::Name />
                        <TextField
                            id="email"
                            title="Email"
                            kind="email"
                            autocomplete="email"
                            value=email
                            errors=errors
                            field=Field::Email
                        />
                        <TextField
                            id="password"
                            title="Password"
                            kind="password"
                            autocomplete="new-password"
                            value=password
                            errors=errors
                            field=Field::Password
                        />
                        <TextField
                            id="confirm"
                            title="Confirm password"
                            kind="password"
                            autocomplete="new-password"
                            value=confirm
                            errors=errors
                            field=Field::ConfirmPassword
                        />

                        <div class="form-control">
                            <label class="label" for="role">
                                <span class="label-text">"Account type"</span>
                            </label>
                            <select
                                id="role"
                                class="select select-bordered"
                                on:change=move |ev| {
                                    role.set(Role::parse(&event_target_value(&ev)));
                                    errors.update(|e| e.clear(Field::Role));
                                }
                            >
                                <option value="" selected=move || role.get().is_none()>"Select account type"</option>
                                <option value="user">"User"</option>
                                <option value="admin">"Admin"</option>
                            </select>
                            <label class="label"><FieldError errors=errors field=Field::Role /></label>
                        </div>

                        <div class="form-control mt-4">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creating account..." }.into_any()
                                } else {
                                    "Register".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "Already have an account? "
                            <Link to=AppRoute::Login class="link link-primary">"Sign in"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
