//! 处方上传与识别
//!
//! 页面状态全部由 [`UploadMachine`] 决定，组件只负责把 DOM 事件翻译成状态转换。

use leptos::prelude::*;
use leptos::task::spawn_local;
use rxlens_shared::PredictionResult;
use rxlens_shared::upload::{ACCEPTED_MIME_TYPES, UploadMachine, UploadPhase};
use web_sys::HtmlInputElement;

use crate::api::use_api;
use crate::components::icons::*;
use crate::components::remote::use_error_reporter;
use crate::components::widgets::ConfidenceBar;
use crate::notify::use_notifier;
use crate::web::{ObjectUrl, SelectedFile};

#[component]
fn ResultPanel(result: PredictionResult) -> impl IntoView {
    let drugs = result.found_drugs.clone();

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body space-y-4">
                <h3 class="card-title">
                    <CircleCheck attr:class="h-5 w-5 text-success" />
                    "Recognition Result"
                </h3>

                <div class="grid gap-4 md:grid-cols-2">
                    <ConfidenceBar title="OCR Confidence" score=result.ocr_confidence />
                    <ConfidenceBar title="Drug Confidence" score=result.drug_confidence />
                </div>

                <div>
                    <h4 class="font-semibold mb-2">"Extracted Text"</h4>
                    <pre class="bg-base-200 rounded-lg p-4 text-sm whitespace-pre-wrap break-words">
                        {result.ocr_text}
                    </pre>
                </div>

                <div>
                    <h4 class="font-semibold mb-2">"Detected Drugs"</h4>
                    {if drugs.is_empty() {
                        view! { <p class="text-sm text-base-content/60">"No drugs detected"</p> }.into_any()
                    } else {
                        view! {
                            <div class="flex flex-wrap gap-2">
                                {drugs
                                    .into_iter()
                                    .map(|drug| view! { <span class="badge badge-primary badge-outline">{drug}</span> })
                                    .collect_view()}
                            </div>
                        }
                        .into_any()
                    }}
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn UploadPage() -> impl IntoView {
    let api = use_api();
    let notifier = use_notifier();
    let reporter = use_error_reporter();

    // SelectedFile 持有浏览器 File，只能放在本地存储里
    let machine = RwSignal::new_local(UploadMachine::<SelectedFile>::new());
    // 替换或卸载时旧的预览地址随之撤销
    let preview = StoredValue::new_local(Option::<ObjectUrl>::None);
    let preview_src = RwSignal::new(Option::<String>::None);
    let (dragging, set_dragging) = signal(false);

    let choose = move |file: SelectedFile| {
        let next_preview = ObjectUrl::preview(&file);
        match machine.try_update(|m| m.select(file)) {
            Some(Ok(())) => {
                preview_src.set(next_preview.as_ref().map(|url| url.as_str().to_string()));
                preview.set_value(next_preview);
            }
            Some(Err(rejection)) => {
                log::warn!("[Upload] File rejected: {rejection:?}");
                notifier.error("Invalid file type", rejection.to_string());
            }
            None => {}
        }
    };

    let on_file_change = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|list| list.get(0)) {
            choose(SelectedFile::from_file(file));
        }
        // 允许重复选择同一个文件
        input.set_value("");
    };

    let on_drop = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        set_dragging.set(false);
        let file = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|list| list.get(0));
        if let Some(file) = file {
            choose(SelectedFile::from_file(file));
        }
    };

    let on_clear = move |_| {
        if machine.try_update(|m| m.reset()).unwrap_or(false) {
            preview.set_value(None);
            preview_src.set(None);
        }
    };

    let on_submit = move |_| {
        let Some(Ok(file)) = machine.try_update(|m| m.begin_submit()) else {
            return;
        };
        log::info!("[Upload] Submitting {}", file.name());
        let client = api.client();
        spawn_local(async move {
            let outcome = match client.predict(file).await {
                Ok(result) => {
                    notifier.success("Prescription processed successfully");
                    Ok(result)
                }
                Err(err) => {
                    reporter.report("Upload failed", &err);
                    Err(err.to_string())
                }
            };
            machine.update(|m| {
                m.complete(outcome);
            });
        });
    };

    let is_uploading = move || machine.with(|m| m.is_uploading());
    let can_submit = move || machine.with(|m| m.can_submit());
    let file_info = move || {
        machine.with(|m| {
            m.file()
                .map(|f| (f.name().to_string(), f.size_label()))
        })
    };
    let failure = move || machine.with(|m| m.error().map(str::to_string));
    let result = move || machine.with(|m| m.result().cloned());

    let zone_class = move || {
        let base = "flex flex-col items-center justify-center gap-3 border-2 border-dashed rounded-xl p-10 text-center transition-colors cursor-pointer";
        if dragging.get() {
            format!("{base} border-primary bg-primary/5")
        } else {
            format!("{base} border-base-300 hover:border-primary/50")
        }
    };

    view! {
        <div class="max-w-4xl mx-auto space-y-6">
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body space-y-4">
                    <h3 class="card-title">"Upload Prescription"</h3>
                    <p class="text-sm text-base-content/70">
                        "Upload a clear photo or scan of a handwritten prescription (JPG, PNG or PDF)."
                    </p>

                    <label
                        class=zone_class
                        on:dragover=move |ev: leptos::ev::DragEvent| {
                            ev.prevent_default();
                            set_dragging.set(true);
                        }
                        on:dragleave=move |_| set_dragging.set(false)
                        on:drop=on_drop
                    >
                        <Upload attr:class="h-10 w-10 text-primary" />
                        <span class="font-medium">"Drag and drop your file here"</span>
                        <span class="text-sm text-base-content/60">"or click to browse"</span>
                        <input
                            type="file"
                            class="hidden"
                            accept=ACCEPTED_MIME_TYPES.join(",")
                            disabled=is_uploading
                            on:change=on_file_change
                        />
                    </label>

                    {move || {
                        file_info()
                            .map(|(name, size)| {
                                view! {
                                    <div class="flex items-center gap-4 p-3 rounded-lg bg-base-200">
                                        {move || match preview_src.get() {
                                            Some(src) => view! {
                                                <img src=src alt="Prescription preview" class="h-20 w-20 object-cover rounded" />
                                            }
                                            .into_any(),
                                            None => view! { <FileText attr:class="h-10 w-10 text-base-content/60" /> }.into_any(),
                                        }}
                                        <div class="flex-1 min-w-0">
                                            <p class="font-medium truncate">{name}</p>
                                            <p class="text-xs text-base-content/60">{size}</p>
                                        </div>
                                        <button
                                            class="btn btn-ghost btn-sm btn-square"
                                            aria-label="Remove file"
                                            disabled=is_uploading
                                            on:click=on_clear
                                        >
                                            <X attr:class="h-4 w-4" />
                                        </button>
                                    </div>
                                }
                            })
                    }}

                    {move || {
                        failure()
                            .map(|message| {
                                view! {
                                    <div role="alert" class="alert alert-error text-sm">
                                        <CircleAlert attr:class="h-5 w-5" />
                                        <span>{message}</span>
                                    </div>
                                }
                            })
                    }}

                    <div class="card-actions justify-end">
                        <button class="btn btn-primary" disabled=move || !can_submit() on:click=on_submit>
                            {move || if is_uploading() {
                                view! { <span class="loading loading-spinner"></span> "Processing..." }.into_any()
                            } else if machine.with(|m| matches!(m.phase(), UploadPhase::Failed(_))) {
                                view! { <RefreshCw attr:class="h-4 w-4" /> "Try again" }.into_any()
                            } else {
                                view! { <ScanText attr:class="h-4 w-4" /> "Process Prescription" }.into_any()
                            }}
                        </button>
                    </div>
                </div>
            </div>

            {move || result().map(|result| view! { <ResultPanel result=result /> })}
        </div>
    }
}
