//! RxLens 前端应用
//!
//! 处方 OCR 系统的浏览器端，所有状态通过 Context 注入：
//! - `config`: 运行时配置（API 地址等）
//! - `session`: 会话状态与持久化
//! - `notify`: 通知队列
//! - `web::route` / `web::router`: 路由定义与带守卫的路由服务
//! - `components`: 页面与 UI 组件

mod api;
mod components {
    pub mod admin_dashboard;
    pub mod admin_profile;
    pub mod admin_users;
    mod charts;
    mod form;
    pub mod history;
    pub mod icons;
    pub mod landing;
    pub mod layout;
    pub mod login;
    pub mod logs;
    pub mod marketing;
    pub mod profile;
    pub mod register;
    mod remote;
    pub mod reports;
    mod table;
    pub mod upload;
    pub mod user_dashboard;
    mod widgets;
}
mod config;
mod error;
mod notify;
mod session;

use leptos::prelude::*;
use rxlens_shared::Role;

use crate::components::admin_dashboard::AdminDashboardPage;
use crate::components::admin_profile::AdminProfilePage;
use crate::components::admin_users::AdminUsersPage;
use crate::components::history::HistoryPage;
use crate::components::landing::LandingPage;
use crate::components::layout::Shell;
use crate::components::login::LoginPage;
use crate::components::logs::LogsPage;
use crate::components::marketing::{AboutPage, ContactPage, HowItWorksPage};
use crate::components::profile::UserProfilePage;
use crate::components::register::RegisterPage;
use crate::components::reports::ReportsPage;
use crate::components::upload::UploadPage;
use crate::components::user_dashboard::UserDashboardPage;
use crate::config::AppConfig;
use crate::notify::{Notifier, Toaster};
use crate::session::SessionContext;

// 浏览器原生 API 的轻量封装
pub(crate) mod web {
    mod blob;
    mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use blob::{ObjectUrl, SelectedFile, save_bytes};
    pub use http::{FetchTransport, HttpRequest, HttpResponse, HttpTransport};
    pub use storage::{KeyValueStore, LocalStorage};

    #[cfg(test)]
    pub use http::{MockTransport, RequestBody};
    #[cfg(test)]
    pub use storage::MemoryStore;
}

use web::LocalStorage;
use web::route::AppRoute;
use web::router::{Link, Router, RouterOutlet};

#[component]
fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center space-y-4">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl">"Page not found"</p>
                <Link to=AppRoute::Landing class="btn btn-primary">"Back to home"</Link>
            </div>
        </div>
    }
}

fn in_shell(role: Role, page: AnyView) -> AnyView {
    view! { <Shell role=role>{page}</Shell> }.into_any()
}

/// 路由匹配函数
///
/// 角色区域的页面包在对应角色的外壳中。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Landing => view! { <LandingPage /> }.into_any(),
        AppRoute::About => view! { <AboutPage /> }.into_any(),
        AppRoute::HowItWorks => view! { <HowItWorksPage /> }.into_any(),
        AppRoute::Contact => view! { <ContactPage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::UserDashboard => in_shell(Role::User, view! { <UserDashboardPage /> }.into_any()),
        AppRoute::UserUpload => in_shell(Role::User, view! { <UploadPage /> }.into_any()),
        AppRoute::UserHistory => in_shell(Role::User, view! { <HistoryPage /> }.into_any()),
        AppRoute::UserProfile => in_shell(Role::User, view! { <UserProfilePage /> }.into_any()),
        AppRoute::AdminDashboard => {
            in_shell(Role::Admin, view! { <AdminDashboardPage /> }.into_any())
        }
        AppRoute::AdminUsers => in_shell(Role::Admin, view! { <AdminUsersPage /> }.into_any()),
        AppRoute::AdminLogs => in_shell(Role::Admin, view! { <LogsPage /> }.into_any()),
        AppRoute::AdminReports => in_shell(Role::Admin, view! { <ReportsPage /> }.into_any()),
        AppRoute::AdminProfile => in_shell(Role::Admin, view! { <AdminProfilePage /> }.into_any()),
        AppRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 配置
    let config = AppConfig::load(&LocalStorage);
    let notifier = Notifier::new(config.toast_duration);
    provide_context(config);

    // 2. 会话（从 LocalStorage 恢复）
    let session = SessionContext::new(LocalStorage);
    provide_context(session);

    // 3. 通知
    provide_context(notifier);

    // 4. 路由器只依赖角色信号
    let session_role = session.role_signal();

    view! {
        <Router session_role=session_role>
            <RouterOutlet matcher=route_matcher />
        </Router>
        <Toaster />
    }
}
