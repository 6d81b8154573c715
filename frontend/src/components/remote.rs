//! 远程数据加载
//!
//! 所有数据视图共用同一套流程：挂载时请求，等待时显示加载状态，
//! 成功后写入本地状态，失败时弹出通知并回到空状态。
//! 只有最后一次发出的请求会被采用，更早的响应直接丢弃。

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ApiFactory, RxLensApi, use_api};
use crate::error::ApiError;
use crate::notify::{Notifier, use_notifier};
use crate::session::{SessionContext, use_session};

/// API 错误上报
///
/// 认证失败会让会话失效，路由服务随后跳转到登录页。
#[derive(Clone, Copy)]
pub struct ErrorReporter {
    session: SessionContext,
    notifier: Notifier,
}

impl ErrorReporter {
    pub fn report(&self, title: &str, err: &ApiError) {
        if err.is_auth_failure() {
            self.session.expire();
            self.notifier
                .error("Session expired", "Please sign in again.");
            return;
        }
        self.notifier.error(title, err.to_string());
    }
}

pub fn use_error_reporter() -> ErrorReporter {
    ErrorReporter {
        session: use_session(),
        notifier: use_notifier(),
    }
}

/// 一次请求结束后的处理结果
#[derive(Debug, PartialEq)]
enum Completion<T> {
    /// 之后已经发出了新请求
    Stale,
    Loaded(T),
    /// 携带回退用的空值
    Failed(T, ApiError),
}

/// `ticket` 是请求发出时的序号，`latest` 是当前最新序号
fn complete<T: Default>(ticket: u64, latest: u64, outcome: Result<T, ApiError>) -> Completion<T> {
    if ticket != latest {
        return Completion::Stale;
    }
    match outcome {
        Ok(value) => Completion::Loaded(value),
        Err(err) => Completion::Failed(T::default(), err),
    }
}

/// 一份远程数据
pub struct Remote<T: 'static> {
    pub data: RwSignal<T>,
    pub loading: RwSignal<bool>,
    version: RwSignal<u64>,
    issued: StoredValue<u64>,
}

impl<T: 'static> Clone for Remote<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for Remote<T> {}

impl<T: Send + Sync + 'static> Remote<T> {
    /// 重新请求
    pub fn reload(&self) {
        self.version.update(|v| *v += 1);
    }
}

/// 挂载时加载数据
///
/// `fetch` 每次加载都会拿到一个携带当前令牌的新客户端。
pub fn use_remote<T, F, Fut>(error_title: &'static str, fetch: F) -> Remote<T>
where
    T: Default + Send + Sync + 'static,
    F: Fn(RxLensApi) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let api: ApiFactory = use_api();
    let reporter = use_error_reporter();

    let remote = Remote {
        data: RwSignal::new(T::default()),
        loading: RwSignal::new(true),
        version: RwSignal::new(0),
        issued: StoredValue::new(0),
    };

    Effect::new(move |_| {
        remote.version.track();
        remote.issued.update_value(|n| *n += 1);
        let ticket = remote.issued.get_value();
        remote.loading.set(true);
        let request = fetch(api.client());
        spawn_local(async move {
            let outcome = request.await;
            // 组件已卸载
            let Some(latest) = remote.issued.try_get_value() else {
                return;
            };
            match complete(ticket, latest, outcome) {
                Completion::Stale => {
                    log::debug!("[Remote] Dropped stale response #{}", ticket);
                    return;
                }
                Completion::Loaded(value) => remote.data.set(value),
                Completion::Failed(empty, err) => {
                    remote.data.set(empty);
                    reporter.report(error_title, &err);
                }
            }
            remote.loading.set(false);
        });
    });

    remote
}

/// 加载指示器
#[component]
pub fn Loading(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center gap-2 py-10 text-base-content/60">
            <span class="loading loading-spinner loading-md"></span>
            {label.unwrap_or_else(|| "Loading...".to_string())}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_success_is_loaded() {
        assert_eq!(complete(3, 3, Ok(vec![1, 2])), Completion::Loaded(vec![1, 2]));
    }

    #[test]
    fn test_failure_falls_back_to_empty() {
        let err = ApiError::Network("offline".into());
        assert_eq!(
            complete::<Vec<u32>>(1, 1, Err(err.clone())),
            Completion::Failed(Vec::new(), err)
        );
    }

    #[test]
    fn test_older_response_is_dropped() {
        // 周期切换后，上一周期的响应晚到
        assert_eq!(complete(1, 2, Ok(vec![7])), Completion::Stale);
        let err = ApiError::Status {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(complete::<Vec<u32>>(1, 2, Err(err)), Completion::Stale);
    }
}
