//! 表单输入与行内错误

use leptos::prelude::*;
use rxlens_shared::validation::{Field, FieldErrors};

/// 行内字段错误
#[component]
pub fn FieldError(errors: RwSignal<FieldErrors>, field: Field) -> impl IntoView {
    move || {
        errors.with(|e| e.get(field).map(str::to_string)).map(|msg| {
            view! { <span class="label-text-alt text-error">{msg}</span> }
        })
    }
}

/// 带标签和行内错误的输入框，输入时清除该字段的错误
#[component]
pub fn TextField(
    id: &'static str,
    title: &'static str,
    value: RwSignal<String>,
    errors: RwSignal<FieldErrors>,
    field: Field,
    #[prop(default = "text")] kind: &'static str,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] autocomplete: &'static str,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label" for=id>
                <span class="label-text">{title}</span>
            </label>
            <input
                id=id
                type=kind
                class="input input-bordered"
                placeholder=placeholder
                autocomplete=autocomplete
                prop:value=value
                on:input=move |ev| {
                    value.set(event_target_value(&ev));
                    errors.update(|e| e.clear(field));
                }
            />
            <label class="label"><FieldError errors=errors field=field /></label>
        </div>
    }
}
