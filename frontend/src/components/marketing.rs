//! 公开介绍页
//!
//! 首页、关于、工作原理和联系页共用同一个顶栏与页脚，无需登录。

use std::time::Duration;

use leptos::prelude::*;
use rxlens_shared::validation::{ContactMessage, Field, FieldErrors};
use web_sys::HtmlInputElement;

use crate::components::form::{FieldError, TextField};
use crate::components::icons::*;
use crate::notify::use_notifier;
use crate::web::route::AppRoute;
use crate::web::router::Link;

const PUBLIC_NAV: [(&str, AppRoute); 3] = [
    ("About", AppRoute::About),
    ("How It Works", AppRoute::HowItWorks),
    ("Contact", AppRoute::Contact),
];

/// 公开页面外壳
#[component]
pub fn PublicLayout(children: Children) -> impl IntoView {
    view! {
        <div class="flex flex-col min-h-screen">
            <div class="navbar bg-base-100 shadow-sm px-4 md:px-8">
                <div class="flex-1">
                    <Link to=AppRoute::Landing class="flex items-center gap-2">
                        <ScanText attr:class="h-6 w-6 text-primary" />
                        <span class="text-xl font-bold">"RxLens"</span>
                    </Link>
                </div>
                <div class="flex-none gap-2">
                    <div class="hidden md:flex gap-1">
                        {PUBLIC_NAV
                            .into_iter()
                            .map(|(title, route)| view! {
                                <Link to=route class="btn btn-ghost btn-sm">{title}</Link>
                            })
                            .collect_view()}
                    </div>
                    <Link to=AppRoute::Login class="btn btn-ghost">"Sign in"</Link>
                    <Link to=AppRoute::Register class="btn btn-primary">"Register"</Link>
                </div>
            </div>

            <main class="flex-1">{children()}</main>

            <footer class="footer footer-center gap-4 p-6 bg-base-200 text-base-content/60">
                <nav class="flex gap-4">
                    {PUBLIC_NAV
                        .into_iter()
                        .map(|(title, route)| view! { <Link to=route class="link link-hover">{title}</Link> })
                        .collect_view()}
                </nav>
                <p>"RxLens prescription recognition"</p>
            </footer>
        </div>
    }
}

#[component]
fn Hero(title: &'static str, text: &'static str) -> impl IntoView {
    view! {
        <section class="bg-base-200 py-16 md:py-24">
            <div class="max-w-3xl mx-auto px-4 text-center">
                <h1 class="mb-6 text-4xl md:text-5xl font-bold">{title}</h1>
                <p class="text-xl text-base-content/70">{text}</p>
            </div>
        </section>
    }
}

// =========================================================
// 关于
// =========================================================

const IMPACT: [(&str, &str); 3] = [
    (
        "Patient Safety",
        "Reducing prescription errors means better patient outcomes and safer medication administration.",
    ),
    (
        "Healthcare Efficiency",
        "A faster prescription workflow saves time for healthcare professionals and pharmacists.",
    ),
    (
        "Research Advancement",
        "Digitized prescriptions create valuable datasets for medical research.",
    ),
];

fn impact_icon(index: usize) -> AnyView {
    let class = "h-6 w-6 text-primary";
    match index {
        0 => view! { <ShieldCheck attr:class=class /> }.into_any(),
        1 => view! { <Activity attr:class=class /> }.into_any(),
        _ => view! { <FileText attr:class=class /> }.into_any(),
    }
}

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <PublicLayout>
            <Hero
                title="About RxLens"
                text="We are a team of developers and researchers working on an overlooked problem in healthcare: reading handwritten prescriptions."
            />

            <section class="py-16 md:py-24">
                <div class="max-w-5xl mx-auto px-4 grid gap-12 md:grid-cols-2 items-center">
                    <div class="space-y-4">
                        <h2 class="text-3xl md:text-4xl font-bold">"Our Mission"</h2>
                        <p class="text-base-content/70">
                            "Digitizing handwritten prescriptions reduces medical errors, improves patient outcomes and saves time for healthcare professionals."
                        </p>
                        <p class="text-base-content/70">
                            "The team combines machine learning with user experience design to build something practical in real clinical settings."
                        </p>
                    </div>
                    <div class="card bg-primary/10">
                        <div class="card-body flex-row items-center gap-3">
                            <Heart attr:class="h-5 w-5 text-primary" />
                            <span class="font-medium">"Committed to improving healthcare through technology"</span>
                        </div>
                    </div>
                </div>
            </section>

            <section class="bg-base-200 py-16 md:py-24">
                <div class="max-w-6xl mx-auto px-4">
                    <div class="mb-12 text-center">
                        <h2 class="mb-4 text-3xl md:text-4xl font-bold">"Why This Matters"</h2>
                        <p class="mx-auto max-w-2xl text-base-content/70">
                            "Misreading a prescription can lead to serious health complications. OCR turns handwriting into structured digital text and lowers that risk."
                        </p>
                    </div>
                    <div class="grid gap-6 md:grid-cols-3">
                        {IMPACT
                            .iter()
                            .enumerate()
                            .map(|(i, (title, text))| view! {
                                <div class="card bg-base-100 shadow">
                                    <div class="card-body">
                                        <div class="mb-2 w-fit rounded-full bg-primary/10 p-3">{impact_icon(i)}</div>
                                        <h3 class="card-title">{*title}</h3>
                                        <p class="text-base-content/70">{*text}</p>
                                    </div>
                                </div>
                            })
                            .collect_view()}
                    </div>
                </div>
            </section>

            <section class="py-16 md:py-24">
                <div class="max-w-3xl mx-auto px-4 space-y-4">
                    <h2 class="text-3xl md:text-4xl font-bold">"Academic Background"</h2>
                    <p class="text-base-content/70">
                        "RxLens grew out of an academic research project on AI-based medical document analysis, built with input from medical professionals."
                    </p>
                    <Link to=AppRoute::HowItWorks class="btn btn-primary">
                        "Explore Our Technology"
                        <ArrowRight attr:class="h-4 w-4" />
                    </Link>
                </div>
            </section>

            <section class="bg-gradient-to-br from-primary to-secondary text-primary-content py-16">
                <div class="max-w-3xl mx-auto px-4 text-center space-y-6">
                    <h2 class="text-3xl md:text-4xl font-bold">"Join Us in Transforming Healthcare"</h2>
                    <div class="flex justify-center gap-4">
                        <Link to=AppRoute::Register class="btn bg-base-100 text-primary border-none">"Get Started"</Link>
                        <Link to=AppRoute::Contact class="btn btn-outline text-primary-content">"Contact Us"</Link>
                    </div>
                </div>
            </section>
        </PublicLayout>
    }
}

// =========================================================
// 工作原理
// =========================================================

const WORKFLOW: [(&str, &str); 5] = [
    ("Upload Image", "Upload a photo or scan of the handwritten prescription."),
    ("Image Preprocessing", "The image is enhanced and normalized for recognition."),
    ("Text Prediction", "Recognition models read the image and predict its text."),
    ("Result Display", "The text is shown in a readable format with a confidence level."),
    ("Storage & Retrieval", "Results are stored and can be reviewed or exported later."),
];

fn workflow_icon(index: usize) -> AnyView {
    let class = "h-6 w-6";
    match index {
        0 => view! { <Upload attr:class=class /> }.into_any(),
        1 => view! { <Cpu attr:class=class /> }.into_any(),
        2 => view! { <ScanText attr:class=class /> }.into_any(),
        3 => view! { <FileText attr:class=class /> }.into_any(),
        _ => view! { <Database attr:class=class /> }.into_any(),
    }
}

struct Model {
    name: &'static str,
    full_name: &'static str,
    summary: &'static str,
    strengths: [&'static str; 3],
}

const MODELS: [Model; 3] = [
    Model {
        name: "CNN",
        full_name: "Convolutional Neural Networks",
        summary: "Extract features from images and find the shapes of handwritten characters.",
        strengths: [
            "Powerful image feature extraction",
            "Character-level recognition",
            "Robust to variations in handwriting",
        ],
    },
    Model {
        name: "CRNN",
        full_name: "Convolutional Recurrent Neural Networks",
        summary: "Combine convolution with recurrence for sequence prediction over connected handwriting.",
        strengths: [
            "Sequential text recognition",
            "Contextual understanding",
            "Effective for cursive writing",
        ],
    },
    Model {
        name: "TrOCR",
        full_name: "Transformer OCR",
        summary: "Uses a transformer architecture for text recognition.",
        strengths: [
            "Attention across the whole line",
            "Long-range dependencies",
            "Handles complex layouts",
        ],
    },
];

const ACCURACY: [(&str, u8); 4] = [
    ("Character Recognition", 95),
    ("Word Recognition", 92),
    ("Medical Term Recognition", 90),
    ("Processing Speed", 98),
];

#[component]
pub fn HowItWorksPage() -> impl IntoView {
    view! {
        <PublicLayout>
            <Hero
                title="How It Works"
                text="Optical character recognition backed by machine learning models reads handwritten prescriptions."
            />

            <section class="py-16 md:py-24">
                <div class="max-w-4xl mx-auto px-4">
                    <h2 class="mb-12 text-center text-3xl md:text-4xl font-bold">"Our Workflow"</h2>
                    <ul class="steps steps-vertical w-full">
                        {WORKFLOW
                            .iter()
                            .enumerate()
                            .map(|(i, (title, text))| view! {
                                <li class="step step-primary">
                                    <div class="flex items-start gap-4 py-4 text-left">
                                        <div class="rounded-full bg-primary/10 p-3 text-primary">{workflow_icon(i)}</div>
                                        <div>
                                            <h3 class="text-xl font-medium">{*title}</h3>
                                            <p class="text-base-content/70">{*text}</p>
                                        </div>
                                    </div>
                                </li>
                            })
                            .collect_view()}
                    </ul>
                </div>
            </section>

            <section class="bg-base-200 py-16 md:py-24">
                <div class="max-w-6xl mx-auto px-4">
                    <h2 class="mb-12 text-center text-3xl md:text-4xl font-bold">"Our Models"</h2>
                    <div class="grid gap-6 md:grid-cols-3">
                        {MODELS
                            .iter()
                            .map(|model| view! {
                                <div class="card bg-base-100 shadow">
                                    <div class="card-body">
                                        <h3 class="card-title">{model.name}</h3>
                                        <h4 class="font-medium text-primary">{model.full_name}</h4>
                                        <p class="text-base-content/70">{model.summary}</p>
                                        <ul class="space-y-2 mt-2">
                                            {model
                                                .strengths
                                                .iter()
                                                .map(|s| view! {
                                                    <li class="flex items-start gap-2 text-sm">
                                                        <CircleCheck attr:class="mt-0.5 h-4 w-4 text-primary" />
                                                        {*s}
                                                    </li>
                                                })
                                                .collect_view()}
                                        </ul>
                                    </div>
                                </div>
                            })
                            .collect_view()}
                    </div>
                </div>
            </section>

            <section class="py-16 md:py-24">
                <div class="max-w-3xl mx-auto px-4 space-y-6">
                    <h2 class="text-3xl md:text-4xl font-bold">"Accuracy & Performance"</h2>
                    {ACCURACY
                        .iter()
                        .map(|(label, percent)| view! {
                            <div class="space-y-1">
                                <div class="flex justify-between">
                                    <span class="font-medium">{*label}</span>
                                    <span class="text-primary">{format!("{}%", percent)}</span>
                                </div>
                                <progress class="progress progress-primary w-full" value=percent.to_string() max="100"></progress>
                            </div>
                        })
                        .collect_view()}
                    <p class="text-sm text-base-content/60">
                        "* Based on internal testing with a diverse set of handwritten prescriptions"
                    </p>
                </div>
            </section>

            <section class="bg-base-200 py-16">
                <div class="max-w-3xl mx-auto px-4 text-center space-y-6">
                    <h2 class="text-3xl md:text-4xl font-bold">"Ready to Experience the Technology?"</h2>
                    <div class="flex justify-center gap-4">
                        <Link to=AppRoute::Register class="btn btn-primary">"Try It Now"</Link>
                        <Link to=AppRoute::Contact class="btn btn-outline">
                            "Request a Demo"
                            <ArrowRight attr:class="h-4 w-4" />
                        </Link>
                    </div>
                </div>
            </section>
        </PublicLayout>
    }
}

// =========================================================
// 联系
// =========================================================

const FAQ: [(&str, &str); 4] = [
    (
        "How accurate is the recognition?",
        "Internal testing shows over 90% accuracy on medical terms and 95% on characters.",
    ),
    (
        "Is my data secure?",
        "Uploads are only visible to your account and to administrators.",
    ),
    (
        "Which file formats are supported?",
        "JPEG, PNG, TIFF and PDF scans or smartphone photos.",
    ),
    (
        "Can it integrate with existing software?",
        "Results can be exported, and the backend exposes an HTTP API.",
    ),
];

const SUCCESS_VISIBLE: Duration = Duration::from_secs(5);

#[component]
fn ContactForm() -> impl IntoView {
    let notifier = use_notifier();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let subject = RwSignal::new(String::new());
    let message = RwSignal::new(String::new());
    let screenshot = RwSignal::new(Option::<String>::None);
    let errors = RwSignal::new(FieldErrors::new());
    let sent = RwSignal::new(false);

    let on_screenshot = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        screenshot.set(input.files().and_then(|list| list.get(0)).map(|f| f.name()));
    };

    // 没有对应的后端接口，消息只在本地确认
    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let contact = ContactMessage {
            name: name.get_untracked(),
            email: email.get_untracked(),
            subject: subject.get_untracked(),
            message: message.get_untracked(),
        };
        if let Err(field_errors) = contact.validate() {
            errors.set(field_errors);
            return;
        }
        log::info!("[Contact] Message from {} accepted", contact.email.trim());

        for field in [name, email, subject, message] {
            field.set(String::new());
        }
        screenshot.set(None);
        sent.set(true);
        notifier.success("Message sent");
        set_timeout(move || sent.set(false), SUCCESS_VISIBLE);
    };

    view! {
        <form class="card-body" on:submit=on_submit novalidate>
            <div class="grid gap-4 md:grid-cols-2">
                <TextField id="contact-name" title="Your Name" value=name errors=errors field=Field::Name placeholder="John Doe" />
                <TextField
                    id="contact-email"
                    title="Your Email"
                    kind="email"
                    value=email
                    errors=errors
                    field=Field::Email
                    placeholder="john@example.com"
                />
            </div>
            <TextField
                id="contact-subject"
                title="Subject"
                value=subject
                errors=errors
                field=Field::Subject
                placeholder="How can we help you?"
            />
            <div class="form-control">
                <label class="label" for="contact-message">
                    <span class="label-text">"Message"</span>
                </label>
                <textarea
                    id="contact-message"
                    class="textarea textarea-bordered"
                    rows="5"
                    placeholder="Your message here..."
                    prop:value=message
                    on:input=move |ev| {
                        message.set(event_target_value(&ev));
                        errors.update(|e| e.clear(Field::Message));
                    }
                ></textarea>
                <label class="label"><FieldError errors=errors field=Field::Message /></label>
            </div>
            <div class="form-control">
                <label class="label" for="contact-screenshot">
                    <span class="label-text">"Screenshot"</span>
                    <span class="label-text-alt text-base-content/50">"Optional"</span>
                </label>
                <input
                    id="contact-screenshot"
                    type="file"
                    accept="image/*"
                    class="file-input file-input-bordered"
                    on:change=on_screenshot
                />
                {move || screenshot.get().map(|file| view! {
                    <span class="label-text-alt mt-1 text-base-content/60">{file}</span>
                })}
            </div>
            <Show when=move || sent.get()>
                <div role="alert" class="alert alert-success">
                    <CircleCheck attr:class="h-5 w-5" />
                    <span>"Your message has been sent. We'll get back to you soon!"</span>
                </div>
            </Show>
            <button class="btn btn-primary w-full mt-2">
                <Send attr:class="h-4 w-4" />
                "Send Message"
            </button>
        </form>
    }
}

#[component]
pub fn ContactPage() -> impl IntoView {
    view! {
        <PublicLayout>
            <Hero
                title="Contact Us"
                text="Need help or want to collaborate? Reach out for support, partnership or academic collaboration."
            />

            <section class="py-16 md:py-24">
                <div class="max-w-6xl mx-auto px-4 grid gap-12 md:grid-cols-3">
                    <div class="space-y-6">
                        <h2 class="text-2xl font-bold">"Get In Touch"</h2>
                        <div class="flex items-start gap-3">
                            <Mail attr:class="h-5 w-5 text-primary" />
                            <span>"support@rxlens.app"</span>
                        </div>
                        <div class="flex items-start gap-3">
                            <Phone attr:class="h-5 w-5 text-primary" />
                            <span>"+252-614-859913"</span>
                        </div>
                        <div class="flex items-start gap-3">
                            <MapPin attr:class="h-5 w-5 text-primary" />
                            <span>"Mogadishu, Somalia"</span>
                        </div>
                    </div>
                    <div class="card bg-base-100 shadow-xl md:col-span-2">
                        <ContactForm />
                    </div>
                </div>
            </section>

            <section class="bg-base-200 py-16 md:py-24">
                <div class="max-w-3xl mx-auto px-4 space-y-4">
                    <h2 class="mb-4 text-center text-3xl font-bold">"Frequently Asked Questions"</h2>
                    {FAQ
                        .iter()
                        .map(|(question, answer)| view! {
                            <div class="collapse collapse-arrow bg-base-100">
                                <input type="checkbox" />
                                <div class="collapse-title font-medium">{*question}</div>
                                <div class="collapse-content text-base-content/70"><p>{*answer}</p></div>
                            </div>
                        })
                        .collect_view()}
                </div>
            </section>
        </PublicLayout>
    }
}
