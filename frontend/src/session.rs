//! 会话模块
//!
//! `SessionStore` 是唯一读写 `token` / `user` 存储键的地方。
//! `SessionContext` 通过 Context 共享，路由服务只读取注入的角色信号。

use leptos::prelude::*;
use rxlens_shared::{Role, STORAGE_TOKEN_KEY, STORAGE_USER_KEY, Session, SessionUser};

use crate::web::{KeyValueStore, LocalStorage};

/// 会话持久化
#[derive(Debug, Clone, Default)]
pub struct SessionStore<S> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 读取会话
    ///
    /// 两个键缺一不可；`user` 无法解析时视为无会话，并清除残留数据。
    pub fn load(&self) -> Option<Session> {
        let token = self.store.get(STORAGE_TOKEN_KEY);
        let user = self.store.get(STORAGE_USER_KEY);

        match (token, user) {
            (Some(token), Some(user)) if !token.trim().is_empty() => {
                match serde_json::from_str::<SessionUser>(&user) {
                    Ok(user) => Some(Session::new(user, token)),
                    Err(e) => {
                        log::warn!("[Session] Discarding malformed stored user: {}", e);
                        self.clear();
                        None
                    }
                }
            }
            (None, None) => None,
            _ => {
                log::warn!("[Session] Discarding incomplete stored session");
                self.clear();
                None
            }
        }
    }

    pub fn save(&self, session: &Session) -> bool {
        match serde_json::to_string(&session.user) {
            Ok(user) => {
                self.store.set(STORAGE_TOKEN_KEY, &session.token)
                    && self.store.set(STORAGE_USER_KEY, &user)
            }
            Err(e) => {
                log::error!("[Session] Failed to serialize user: {}", e);
                false
            }
        }
    }

    pub fn clear(&self) {
        self.store.delete(STORAGE_TOKEN_KEY);
        self.store.delete(STORAGE_USER_KEY);
    }
}

/// 会话上下文
///
/// 包含当前会话信号与存储，通过 Context 在组件间共享。
pub struct SessionContext<S: 'static = LocalStorage> {
    session: RwSignal<Option<Session>>,
    store: StoredValue<SessionStore<S>>,
}

impl<S: 'static> Clone for SessionContext<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: 'static> Copy for SessionContext<S> {}

impl<S> SessionContext<S>
where
    S: KeyValueStore + Send + Sync + 'static,
{
    /// 创建会话上下文，并从存储恢复会话
    pub fn new(store: S) -> Self {
        let store = SessionStore::new(store);
        let initial = store.load();
        if let Some(session) = &initial {
            log::info!(
                "[Session] Restored session for {} ({})",
                session.user.email,
                session.role()
            );
        }
        Self {
            session: RwSignal::new(initial),
            store: StoredValue::new(store),
        }
    }

    /// 当前会话（响应式）
    pub fn get(&self) -> Option<Session> {
        self.session.get()
    }

    pub fn get_untracked(&self) -> Option<Session> {
        self.session.get_untracked()
    }

    pub fn token_untracked(&self) -> Option<String> {
        self.session
            .with_untracked(|s| s.as_ref().map(|s| s.token.clone()))
    }

    /// 角色信号（注入路由服务）
    pub fn role_signal(&self) -> Signal<Option<Role>> {
        let session = self.session;
        Signal::derive(move || session.with(|s| s.as_ref().map(Session::role)))
    }

    /// 登录成功后保存会话
    pub fn login(&self, session: Session) {
        log::info!(
            "[Session] Signed in as {} ({})",
            session.user.email,
            session.role()
        );
        self.store.with_value(|store| {
            if !store.save(&session) {
                log::warn!("[Session] Session could not be persisted");
            }
        });
        self.session.set(Some(session));
    }

    /// 注销
    ///
    /// 导航由路由服务的会话监听自动处理。
    pub fn logout(&self) {
        log::info!("[Session] Signed out");
        self.store.with_value(|store| store.clear());
        self.session.set(None);
    }

    /// 服务端拒绝令牌（401/403）或本地没有令牌
    pub fn expire(&self) {
        if self.session.with_untracked(Option::is_some) {
            log::warn!("[Session] Session expired");
        }
        self.store.with_value(|store| store.clear());
        self.session.set(None);
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::MemoryStore;

    const USER_JSON: &str = r#"{"id":"u1","name":"Ana","email":"ana@x.org","role":"user"}"#;

    fn session(role: Role) -> Session {
        Session::new(
            SessionUser {
                id: "u1".to_string(),
                name: "Ana".to_string(),
                email: "ana@x.org".to_string(),
                role,
            },
            "jwt-token",
        )
    }

    #[test]
    fn test_load_valid_session() {
        let store = MemoryStore::with(&[(STORAGE_TOKEN_KEY, "jwt-token"), (STORAGE_USER_KEY, USER_JSON)]);
        let loaded = SessionStore::new(store).load().unwrap();
        assert_eq!(loaded, session(Role::User));
    }

    #[test]
    fn test_malformed_user_reads_as_absent_and_is_removed() {
        let store = MemoryStore::with(&[(STORAGE_TOKEN_KEY, "jwt"), (STORAGE_USER_KEY, "{not json")]);
        assert!(SessionStore::new(store.clone()).load().is_none());
        assert!(!store.contains(STORAGE_TOKEN_KEY));
        assert!(!store.contains(STORAGE_USER_KEY));
    }

    #[test]
    fn test_unknown_role_reads_as_absent() {
        let user = r#"{"id":"u1","name":"Ana","email":"ana@x.org","role":"superuser"}"#;
        let store = MemoryStore::with(&[(STORAGE_TOKEN_KEY, "jwt"), (STORAGE_USER_KEY, user)]);
        assert!(SessionStore::new(store).load().is_none());
    }

    #[test]
    fn test_token_without_user_reads_as_absent() {
        let store = MemoryStore::with(&[(STORAGE_TOKEN_KEY, "jwt")]);
        assert!(SessionStore::new(store.clone()).load().is_none());
        assert!(!store.contains(STORAGE_TOKEN_KEY));
    }

    #[test]
    fn test_save_then_load() {
        let store = SessionStore::new(MemoryStore::default());
        assert!(store.load().is_none());
        assert!(store.save(&session(Role::Admin)));
        assert_eq!(store.load(), Some(session(Role::Admin)));
        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_context_login_logout_expire() {
        let owner = Owner::new();
        owner.set();

        let backing = MemoryStore::default();
        let ctx = SessionContext::new(backing.clone());
        let role = ctx.role_signal();
        assert_eq!(role.get_untracked(), None);

        ctx.login(session(Role::Admin));
        assert_eq!(role.get_untracked(), Some(Role::Admin));
        assert_eq!(ctx.token_untracked().as_deref(), Some("jwt-token"));
        assert!(backing.contains(STORAGE_TOKEN_KEY));

        ctx.logout();
        assert!(ctx.get_untracked().is_none());
        assert!(!backing.contains(STORAGE_USER_KEY));

        ctx.login(session(Role::User));
        ctx.expire();
        assert!(ctx.token_untracked().is_none());
        assert!(!backing.contains(STORAGE_TOKEN_KEY));
    }

    #[test]
    fn test_context_restores_stored_session() {
        let owner = Owner::new();
        owner.set();

        let backing = MemoryStore::with(&[(STORAGE_TOKEN_KEY, "jwt-token"), (STORAGE_USER_KEY, USER_JSON)]);
        let ctx = SessionContext::new(backing);
        assert_eq!(ctx.get_untracked(), Some(session(Role::User)));
    }
}
