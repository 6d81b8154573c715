//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程，
//! 首次加载、程序导航与浏览器前进后退都经过同一个守卫。

use leptos::prelude::*;
use rxlens_shared::Role;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, Resolution};

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

fn write_history(path: &str, use_push: bool) {
    if use_push {
        push_history_state(path);
    } else {
        replace_history_state(path);
    }
}

fn log_redirect(from: AppRoute, to: AppRoute, role: Option<Role>) {
    match role {
        None => log::info!("[Router] {} requires a session. Redirecting to {}.", from, to),
        Some(role) => log::info!("[Router] {} not available to {}. Redirecting to {}.", from, role, to),
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入的会话角色信号实现与会话模块的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 当前会话角色（注入的信号）
    session_role: Signal<Option<Role>>,
}

impl RouterService {
    /// 创建新的路由服务
    ///
    /// 初始路由同样经过守卫，被拒绝时以 replaceState 重定向。
    fn new(session_role: Signal<Option<Role>>) -> Self {
        let requested = AppRoute::from_path(&current_path());
        let role = session_role.get_untracked();
        let initial_route = match requested.resolve(role) {
            Resolution::Render(route) => route,
            Resolution::Redirect(redirect) => {
                log_redirect(requested, redirect, role);
                replace_history_state(redirect.to_path());
                redirect
            }
        };
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            session_role,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    pub fn navigate_to(&self, route: AppRoute) {
        self.navigate_to_route(route, true);
    }

    /// 导航到指定路由
    ///
    /// # Arguments
    /// * `target_route` - 目标路由
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        let role = self.session_role.get_untracked();

        // --- Step 1: 验证目标路由 ---
        let route = match target_route.resolve(role) {
            Resolution::Render(route) => route,
            Resolution::Redirect(redirect) => {
                log_redirect(target_route, redirect, role);
                redirect
            }
        };

        // --- Step 2: 加载页面 (更新状态) ---
        write_history(route.to_path(), use_push);
        self.set_route.set(route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let session_role = self.session_role;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());
            let role = session_role.get_untracked();

            // popstate 时也执行守卫逻辑
            match target_route.resolve(role) {
                Resolution::Render(route) => set_route.set(route),
                Resolution::Redirect(redirect) => {
                    log_redirect(target_route, redirect, role);
                    replace_history_state(redirect.to_path());
                    set_route.set(redirect);
                }
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置会话变化时的自动重定向
    ///
    /// 登录后离开登录页；注销或会话失效后离开受保护页面。
    fn setup_session_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let session_role = self.session_role;

        Effect::new(move |_| {
            let role = session_role.get();
            let route = current_route.get_untracked();

            if let Resolution::Redirect(redirect) = route.resolve(role) {
                log::info!(
                    "[Router] Session changed ({}), redirecting to {}.",
                    role.map(|r| r.as_str()).unwrap_or("signed out"),
                    redirect
                );
                push_history_state(redirect.to_path());
                set_route.set(redirect);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(session_role: Signal<Option<Role>>) -> RouterService {
    let router = RouterService::new(session_role);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_session_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 会话角色信号
    session_role: Signal<Option<Role>>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    // 提供路由服务到 Context
    provide_router(session_role);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 经过路由服务的链接
///
/// 带修饰键的点击交给浏览器处理（新标签页打开）。
#[component]
pub fn Link(
    /// 目标路由
    to: AppRoute,
    #[prop(into, optional)] class: MaybeProp<String>,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: leptos::ev::MouseEvent| {
        if ev.ctrl_key() || ev.meta_key() || ev.shift_key() || ev.button() != 0 {
            return;
        }
        ev.prevent_default();
        router.navigate_to(to);
    };

    view! {
        <a href=to.to_path() class=move || class.get() on:click=on_click>
            {children()}
        </a>
    }
}
