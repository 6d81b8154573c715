//! 通知（Toast）
//!
//! 所有视图共享一个通知队列，每条通知可手动关闭，并在配置的时长后自动消失。

use std::time::Duration;

use leptos::prelude::*;

use crate::components::icons::{CircleAlert, CircleCheck, X};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub title: String,
    pub message: Option<String>,
}

/// 通知队列（纯数据）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastQueue {
    items: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    /// 入队并返回新通知的 id
    pub fn push(&mut self, kind: ToastKind, title: String, message: Option<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast {
            id,
            kind,
            title,
            message,
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        self.items.len() != before
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

/// 通知服务
#[derive(Clone, Copy)]
pub struct Notifier {
    queue: RwSignal<ToastQueue>,
    duration: Duration,
}

impl Notifier {
    pub fn new(duration: Duration) -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::default()),
            duration,
        }
    }

    pub fn success(&self, title: impl Into<String>) {
        self.push(ToastKind::Success, title.into(), None);
    }

    pub fn error(&self, title: impl Into<String>, message: impl Into<String>) {
        self.push(ToastKind::Error, title.into(), Some(message.into()));
    }

    fn push(&self, kind: ToastKind, title: String, message: Option<String>) {
        let mut id = 0;
        self.queue
            .update(|queue| id = queue.push(kind, title, message));

        let queue = self.queue;
        set_timeout(
            move || {
                queue.update(|q| {
                    q.dismiss(id);
                });
            },
            self.duration,
        );
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|q| {
            q.dismiss(id);
        });
    }
}

/// 从 Context 获取通知服务
pub fn use_notifier() -> Notifier {
    use_context::<Notifier>().expect("Notifier should be provided")
}

/// 通知出口
#[component]
pub fn Toaster() -> impl IntoView {
    let notifier = use_notifier();

    view! {
        <div class="toast toast-top toast-end z-50">
            <For
                each=move || notifier.queue.with(|q| q.items().to_vec())
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let is_error = toast.kind == ToastKind::Error;
                    view! {
                        <div
                            role="alert"
                            class=if is_error { "alert alert-error shadow-lg" } else { "alert alert-success shadow-lg" }
                        >
                            {if is_error {
                                view! { <CircleAlert attr:class="h-5 w-5" /> }.into_any()
                            } else {
                                view! { <CircleCheck attr:class="h-5 w-5" /> }.into_any()
                            }}
                            <div>
                                <h3 class="font-bold">{toast.title}</h3>
                                {toast.message.map(|m| view! { <div class="text-xs">{m}</div> })}
                            </div>
                            <button
                                class="btn btn-ghost btn-xs btn-circle"
                                aria-label="Dismiss"
                                on:click=move |_| notifier.dismiss(id)
                            >
                                <X attr:class="h-4 w-4" />
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_push_and_dismiss() {
        let mut queue = ToastQueue::default();
        let first = queue.push(ToastKind::Success, "Saved".to_string(), None);
        let second = queue.push(
            ToastKind::Error,
            "Upload failed".to_string(),
            Some("Network error".to_string()),
        );
        assert_ne!(first, second);
        assert_eq!(queue.items().len(), 2);

        assert!(queue.dismiss(first));
        assert!(!queue.dismiss(first));
        assert_eq!(queue.items().len(), 1);
        assert_eq!(queue.items()[0].title, "Upload failed");
    }
}
