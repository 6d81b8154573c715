use leptos::prelude::*;

use crate::components::icons::*;
use crate::components::marketing::PublicLayout;
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::Link;

const FEATURES: [(&str, &str); 6] = [
    ("Easy Upload", "Upload handwritten prescriptions with ease through a simple interface."),
    ("Instant Results", "Get digital results with confidence scores in seconds."),
    ("Secure Access", "Role-based access keeps your data secure and private."),
    ("Recognition History", "Review your past prescription recognitions anytime."),
    ("Clinic Ready", "Suited to individual practitioners, clinics, and researchers alike."),
    ("Structured Data", "Turn handwritten notes into structured, searchable text."),
];

fn feature_icon(index: usize) -> AnyView {
    let class = "h-6 w-6 text-primary";
    match index {
        0 => view! { <Upload attr:class=class /> }.into_any(),
        1 => view! { <Zap attr:class=class /> }.into_any(),
        2 => view! { <ShieldCheck attr:class=class /> }.into_any(),
        3 => view! { <History attr:class=class /> }.into_any(),
        4 => view! { <Users attr:class=class /> }.into_any(),
        _ => view! { <FileText attr:class=class /> }.into_any(),
    }
}

#[component]
pub fn LandingPage() -> impl IntoView {
    let session = use_session();
    // 已登录时 "Get Started" 直接进入对应角色的首页
    let start_route = move || {
        session
            .get()
            .map(|s| AppRoute::home_for(s.role()))
            .unwrap_or(AppRoute::Register)
    };

    view! {
        <PublicLayout>
            <section class="bg-gradient-to-br from-primary to-secondary text-primary-content py-16 md:py-24">
                <div class="max-w-6xl mx-auto px-4 grid gap-8 md:grid-cols-2">
                    <div class="flex flex-col justify-center space-y-6">
                        <h1 class="text-4xl md:text-5xl font-bold leading-tight">
                            "Transforming Handwritten Prescriptions into Digital Clarity"
                        </h1>
                        <p class="text-lg md:text-xl">
                            "An OCR system that digitizes and decodes handwritten medical prescriptions."
                        </p>
                        <div>
                            {move || {
                                let route = start_route();
                                view! {
                                    <Link to=route class="btn btn-lg bg-base-100 text-primary border-none">
                                        "Get Started"
                                        <ArrowRight attr:class="h-4 w-4" />
                                    </Link>
                                }
                            }}
                            <Link to=AppRoute::HowItWorks class="btn btn-lg btn-ghost ml-2">"Learn More"</Link>
                        </div>
                    </div>
                    <div class="flex flex-col justify-center space-y-4 text-lg">
                        <p>"Trusted by healthcare professionals"</p>
                        <div class="flex gap-6">
                            {["Fast", "Accurate", "Secure"]
                                .into_iter()
                                .map(|label| view! {
                                    <span class="flex items-center gap-2 text-sm">
                                        <CircleCheck attr:class="h-5 w-5" />
                                        {label}
                                    </span>
                                })
                                .collect_view()}
                        </div>
                    </div>
                </div>
            </section>

            <section class="py-16 md:py-24 bg-base-100">
                <div class="max-w-6xl mx-auto px-4">
                    <div class="mb-12 text-center">
                        <h2 class="mb-4 text-3xl md:text-4xl font-bold">"Key Features"</h2>
                        <p class="mx-auto max-w-2xl text-base-content/70">
                            "A complete workflow for digitizing handwritten prescriptions accurately and efficiently."
                        </p>
                    </div>
                    <div class="grid gap-6 sm:grid-cols-2 lg:grid-cols-3">
                        {FEATURES
                            .iter()
                            .enumerate()
                            .map(|(i, (title, text))| view! {
                                <div class="card bg-base-200 border-2 border-transparent hover:border-primary/20">
                                    <div class="card-body items-center text-center">
                                        <div class="mb-2 rounded-full bg-primary/10 p-3">{feature_icon(i)}</div>
                                        <h3 class="card-title">{*title}</h3>
                                        <p class="text-base-content/70">{*text}</p>
                                    </div>
                                </div>
                            })
                            .collect_view()}
                    </div>
                </div>
            </section>
        </PublicLayout>
    }
}
