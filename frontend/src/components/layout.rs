//! 角色区域的外壳：侧边栏 + 顶栏
//!
//! 侧边栏条目来自每个角色的导航表，当前条目高亮，顶栏标题取当前条目的名称。

use leptos::prelude::*;
use rxlens_shared::Role;
use rxlens_shared::text::initials;

use crate::components::icons::*;
use crate::notify::use_notifier;
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub title: &'static str,
    pub route: AppRoute,
}

const USER_NAV: [NavItem; 4] = [
    NavItem { title: "Dashboard", route: AppRoute::UserDashboard },
    NavItem { title: "Upload", route: AppRoute::UserUpload },
    NavItem { title: "History", route: AppRoute::UserHistory },
    NavItem { title: "Profile", route: AppRoute::UserProfile },
];

const ADMIN_NAV: [NavItem; 5] = [
    NavItem { title: "Dashboard", route: AppRoute::AdminDashboard },
    NavItem { title: "Users", route: AppRoute::AdminUsers },
    NavItem { title: "Logs", route: AppRoute::AdminLogs },
    NavItem { title: "Reports", route: AppRoute::AdminReports },
    NavItem { title: "Profile", route: AppRoute::AdminProfile },
];

pub fn nav_items(role: Role) -> &'static [NavItem] {
    match role {
        Role::User => &USER_NAV,
        Role::Admin => &ADMIN_NAV,
    }
}

/// 顶栏标题
pub fn page_title(role: Role, route: AppRoute) -> &'static str {
    nav_items(role)
        .iter()
        .find(|item| item.route == route)
        .map(|item| item.title)
        .unwrap_or(match role {
            Role::User => "Dashboard",
            Role::Admin => "Admin",
        })
}

fn nav_icon(route: AppRoute) -> AnyView {
    match route {
        AppRoute::UserDashboard | AppRoute::AdminDashboard => {
            view! { <LayoutDashboard attr:class="h-5 w-5 text-sky-400" /> }.into_any()
        }
        AppRoute::UserUpload => view! { <Upload attr:class="h-5 w-5 text-violet-400" /> }.into_any(),
        AppRoute::UserHistory => view! { <History attr:class="h-5 w-5 text-pink-400" /> }.into_any(),
        AppRoute::AdminUsers => view! { <Users attr:class="h-5 w-5 text-violet-400" /> }.into_any(),
        AppRoute::AdminLogs => view! { <ClipboardList attr:class="h-5 w-5 text-emerald-400" /> }.into_any(),
        AppRoute::AdminReports => view! { <BarChart attr:class="h-5 w-5 text-pink-400" /> }.into_any(),
        _ => view! { <User attr:class="h-5 w-5 text-orange-400" /> }.into_any(),
    }
}

#[component]
pub fn Shell(role: Role, children: Children) -> impl IntoView {
    let router = use_router();
    let session = use_session();
    let notifier = use_notifier();
    let current = router.current_route();

    let on_logout = move |_| {
        session.logout();
        notifier.success("Logged out successfully");
    };

    let user_name = move || session.get().map(|s| s.user.name).unwrap_or_default();

    view! {
        <div class="drawer lg:drawer-open">
            <input id="shell-drawer" type="checkbox" class="drawer-toggle" />
            <div class="drawer-content flex flex-col min-h-screen bg-base-200">
                <div class="navbar bg-base-100 shadow-sm px-4">
                    <div class="flex-none lg:hidden">
                        <label for="shell-drawer" class="btn btn-square btn-ghost" aria-label="Open menu">
                            <Menu attr:class="h-5 w-5" />
                        </label>
                    </div>
                    <div class="flex-1">
                        <h1 class="text-xl font-semibold">{move || page_title(role, current.get())}</h1>
                    </div>
                    <div class="flex-none flex items-center gap-3">
                        <span class="hidden md:inline text-sm text-base-content/70">{user_name}</span>
                        <div class="avatar placeholder">
                            <div class="bg-primary text-primary-content w-9 rounded-full">
                                <span class="text-sm">{move || initials(&user_name())}</span>
                            </div>
                        </div>
                    </div>
                </div>
                <main class="flex-1 p-4 md:p-8">{children()}</main>
            </div>
            <div class="drawer-side z-40">
                <label for="shell-drawer" aria-label="Close menu" class="drawer-overlay"></label>
                <aside class="w-64 min-h-full bg-neutral text-neutral-content flex flex-col py-4">
                    <Link to=AppRoute::home_for(role) class="flex items-center gap-2 px-6 mb-10">
                        <ScanText attr:class="h-7 w-7 text-primary" />
                        <span class="text-2xl font-bold">"RxLens"</span>
                    </Link>
                    <ul class="menu px-3 gap-1 flex-1 w-full">
                        {nav_items(role)
                            .iter()
                            .map(|item| {
                                let route = item.route;
                                let class = Signal::derive(move || {
                                    if current.get() == route {
                                        "active font-medium".to_string()
                                    } else {
                                        "text-neutral-content/70".to_string()
                                    }
                                });
                                view! {
                                    <li>
                                        <Link to=route class=class>
                                            {nav_icon(route)}
                                            {item.title}
                                        </Link>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                    <div class="px-3">
                        <button class="btn btn-ghost w-full justify-start text-neutral-content/70" on:click=on_logout>
                            <LogOut attr:class="h-5 w-5" />
                            "Logout"
                        </button>
                    </div>
                </aside>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_items_are_guarded_by_their_role() {
        for role in [Role::User, Role::Admin] {
            for item in nav_items(role) {
                assert_eq!(item.route.required_role(), Some(role));
            }
        }
    }

    #[test]
    fn test_page_title() {
        assert_eq!(page_title(Role::Admin, AppRoute::AdminLogs), "Logs");
        assert_eq!(page_title(Role::User, AppRoute::UserUpload), "Upload");
        assert_eq!(page_title(Role::Admin, AppRoute::NotFound), "Admin");
    }
}
