use leptos::prelude::*;
use leptos::task::spawn_local;
use rxlens_shared::Session;
use rxlens_shared::validation::{Field, FieldErrors, validate_login};

use crate::api::use_api;
use crate::components::form::TextField;
use crate::components::icons::{CircleAlert, ScanText};
use crate::notify::use_notifier;
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::Link;

#[component]
pub fn LoginPage() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let notifier = use_notifier();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let errors = RwSignal::new(FieldErrors::new());

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }
        let (email, password) = (email.get_untracked(), password.get_untracked());
        if let Err(field_errors) = validate_login(&email, &password) {
            errors.set(field_errors);
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let client = api.client();
        spawn_local(async move {
            match client.login(&email, &password).await {
                // 路由服务监听会话变化，自动跳转到对应角色的首页
                Ok(resp) => {
                    session.login(Session::new(resp.user, resp.token));
                    notifier.success(resp.message.unwrap_or_else(|| "Login successful".to_string()));
                }
                Err(e) => {
                    set_error_msg.set(Some(e.to_string()));
                    notifier.error("Login failed", e.to_string());
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <ScanText attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Welcome back"</h1>
                        <p class="text-base-content/70">"Sign in to your RxLens account"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit novalidate>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <CircleAlert attr:class="h-5 w-5" />
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <TextField
                            id="email"
                            title="Email"
                            kind="email"
                            placeholder="you@example.com"
                            autocomplete="email"
                            value=email
                            errors=errors
                            field=Field::Email
                        />
                        <TextField
                            id="password"
                            title="Password"
                            kind="password"
                            placeholder="••••••••"
                            autocomplete="current-password"
                            value=password
                            errors=errors
                            field=Field::Password
                        />
                        <div class="form-control mt-4">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign in".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "Don't have an account? "
                            <Link to=AppRoute::Register class="link link-primary">"Register"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
