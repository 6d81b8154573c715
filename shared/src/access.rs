//! 访问控制
//!
//! 角色是封闭枚举，所有受保护区域共用同一个 `check_access`。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 拒绝访问的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// 没有持久化的会话
    NoSession,
    /// 有会话，但角色与区域不符
    WrongRole { actual: Role, required: Role },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Granted,
    Denied(DenyReason),
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessDecision::Granted)
    }
}

/// **核心守卫逻辑**
///
/// 不做服务端校验，令牌是否仍有效由后续 API 调用的 401 决定。
pub fn check_access(session_role: Option<Role>, required: Role) -> AccessDecision {
    match session_role {
        None => AccessDecision::Denied(DenyReason::NoSession),
        Some(actual) if actual != required => {
            AccessDecision::Denied(DenyReason::WrongRole { actual, required })
        }
        Some(_) => AccessDecision::Granted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_session_is_denied() {
        assert_eq!(
            check_access(None, Role::User),
            AccessDecision::Denied(DenyReason::NoSession)
        );
        assert_eq!(
            check_access(None, Role::Admin),
            AccessDecision::Denied(DenyReason::NoSession)
        );
    }

    #[test]
    fn test_wrong_role_is_denied() {
        assert_eq!(
            check_access(Some(Role::User), Role::Admin),
            AccessDecision::Denied(DenyReason::WrongRole {
                actual: Role::User,
                required: Role::Admin
            })
        );
        assert!(!check_access(Some(Role::Admin), Role::User).is_granted());
    }

    #[test]
    fn test_matching_role_is_granted() {
        assert!(check_access(Some(Role::User), Role::User).is_granted());
        assert!(check_access(Some(Role::Admin), Role::Admin).is_granted());
    }

    #[test]
    fn test_role_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert!(serde_json::from_str::<Role>("\"superuser\"").is_err());
        assert_eq!(Role::parse("user"), Some(Role::User));
    }
}
