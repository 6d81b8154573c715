//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其访问规则。

use std::fmt::Display;

use rxlens_shared::{AccessDecision, Role, check_access};

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 首页 (默认路由)
    #[default]
    Landing,
    /// 介绍页
    About,
    HowItWorks,
    Contact,
    Login,
    Register,
    UserDashboard,
    UserUpload,
    UserHistory,
    UserProfile,
    AdminDashboard,
    AdminUsers,
    AdminLogs,
    AdminReports,
    AdminProfile,
    /// 页面未找到
    NotFound,
}

/// 守卫的结论
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// 渲染目标路由
    Render(AppRoute),
    /// 改为跳转到另一个路由
    Redirect(AppRoute),
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    ///
    /// 忽略查询串、片段与末尾斜杠。
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        match path {
            "/" => Self::Landing,
            "/about" => Self::About,
            "/how-it-works" => Self::HowItWorks,
            "/contact" => Self::Contact,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/user" | "/user/dashboard" => Self::UserDashboard,
            "/user/upload" => Self::UserUpload,
            "/user/history" => Self::UserHistory,
            "/user/profile" => Self::UserProfile,
            "/admin" | "/admin/dashboard" => Self::AdminDashboard,
            "/admin/users" => Self::AdminUsers,
            "/admin/logs" => Self::AdminLogs,
            "/admin/reports" => Self::AdminReports,
            "/admin/profile" => Self::AdminProfile,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::About => "/about",
            Self::HowItWorks => "/how-it-works",
            Self::Contact => "/contact",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::UserDashboard => "/user/dashboard",
            Self::UserUpload => "/user/upload",
            Self::UserHistory => "/user/history",
            Self::UserProfile => "/user/profile",
            Self::AdminDashboard => "/admin/dashboard",
            Self::AdminUsers => "/admin/users",
            Self::AdminLogs => "/admin/logs",
            Self::AdminReports => "/admin/reports",
            Self::AdminProfile => "/admin/profile",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫逻辑：该路由要求的角色**
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Self::UserDashboard | Self::UserUpload | Self::UserHistory | Self::UserProfile => {
                Some(Role::User)
            }
            Self::AdminDashboard
            | Self::AdminUsers
            | Self::AdminLogs
            | Self::AdminReports
            | Self::AdminProfile => Some(Role::Admin),
            Self::Landing
            | Self::About
            | Self::HowItWorks
            | Self::Contact
            | Self::Login
            | Self::Register
            | Self::NotFound => None,
        }
    }

    /// 已认证用户是否应该离开此路由（登录、注册页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 各角色的首页
    pub fn home_for(role: Role) -> Self {
        match role {
            Role::User => Self::UserDashboard,
            Role::Admin => Self::AdminDashboard,
        }
    }

    /// 对目标路由执行守卫
    pub fn resolve(self, session_role: Option<Role>) -> Resolution {
        if let Some(required) = self.required_role() {
            return match check_access(session_role, required) {
                AccessDecision::Granted => Resolution::Render(self),
                AccessDecision::Denied(_) => Resolution::Redirect(Self::auth_failure_redirect()),
            };
        }
        match session_role {
            Some(role) if self.should_redirect_when_authenticated() => {
                Resolution::Redirect(Self::home_for(role))
            }
            _ => Resolution::Render(self),
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [AppRoute; 16] = [
        AppRoute::Landing,
        AppRoute::About,
        AppRoute::HowItWorks,
        AppRoute::Contact,
        AppRoute::Login,
        AppRoute::Register,
        AppRoute::UserDashboard,
        AppRoute::UserUpload,
        AppRoute::UserHistory,
        AppRoute::UserProfile,
        AppRoute::AdminDashboard,
        AppRoute::AdminUsers,
        AppRoute::AdminLogs,
        AppRoute::AdminReports,
        AppRoute::AdminProfile,
        AppRoute::NotFound,
    ];

    #[test]
    fn test_path_round_trip() {
        for route in ALL.into_iter().filter(|r| *r != AppRoute::NotFound) {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
        assert_eq!(AppRoute::from_path("/admin/logs/"), AppRoute::AdminLogs);
        assert_eq!(AppRoute::from_path("/user/history?page=2"), AppRoute::UserHistory);
        assert_eq!(AppRoute::from_path("/admin/models"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path(""), AppRoute::Landing);
        assert_eq!(AppRoute::from_path("/how-it-works/"), AppRoute::HowItWorks);
        assert_eq!(AppRoute::from_path("/contact?topic=demo"), AppRoute::Contact);
    }

    #[test]
    fn test_guarded_routes_redirect_without_session() {
        for route in ALL.into_iter().filter(|r| r.required_role().is_some()) {
            assert_eq!(route.resolve(None), Resolution::Redirect(AppRoute::Login));
        }
    }

    #[test]
    fn test_wrong_role_redirects_to_login() {
        assert_eq!(
            AppRoute::AdminLogs.resolve(Some(Role::User)),
            Resolution::Redirect(AppRoute::Login)
        );
        assert_eq!(
            AppRoute::UserUpload.resolve(Some(Role::Admin)),
            Resolution::Redirect(AppRoute::Login)
        );
        assert_eq!(
            AppRoute::UserUpload.resolve(Some(Role::User)),
            Resolution::Render(AppRoute::UserUpload)
        );
    }

    #[test]
    fn test_authenticated_users_leave_login_and_register() {
        assert_eq!(
            AppRoute::Login.resolve(Some(Role::Admin)),
            Resolution::Redirect(AppRoute::AdminDashboard)
        );
        assert_eq!(
            AppRoute::Register.resolve(Some(Role::User)),
            Resolution::Redirect(AppRoute::UserDashboard)
        );
        assert_eq!(AppRoute::Login.resolve(None), Resolution::Render(AppRoute::Login));
    }

    #[test]
    fn test_public_routes_always_render() {
        for role in [None, Some(Role::User), Some(Role::Admin)] {
            assert_eq!(AppRoute::Landing.resolve(role), Resolution::Render(AppRoute::Landing));
            assert_eq!(AppRoute::NotFound.resolve(role), Resolution::Render(AppRoute::NotFound));
            for page in [AppRoute::About, AppRoute::HowItWorks, AppRoute::Contact] {
                assert_eq!(page.resolve(role), Resolution::Render(page));
            }
        }
    }
}
