use contracts::shared::api_error::ApiError;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::icons::icon;

/// Время показа уведомления
const AUTO_DISMISS_MS: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Success,
}

impl NoticeKind {
    fn class(self) -> &'static str {
        match self {
            Self::Error => "snackbar snackbar--error",
            Self::Success => "snackbar snackbar--success",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

/// Сервис snackbar-уведомлений (через context, как ModalService)
#[derive(Clone, Copy)]
pub struct NotificationService {
    notices: RwSignal<Vec<Notice>>,
    next_id: StoredValue<u64>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            notices: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(1),
        }
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NoticeKind::Error, message.into());
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NoticeKind::Success, message.into());
    }

    pub fn api_error(&self, err: &ApiError) {
        self.error(err.user_message());
    }

    pub fn dismiss(&self, id: u64) {
        // сервис может пережить уведомления, но не наоборот
        let _ = self.notices.try_update(|list| list.retain(|n| n.id != id));
    }

    pub fn notices(&self) -> Signal<Vec<Notice>> {
        self.notices.into()
    }

    fn push(&self, kind: NoticeKind, message: String) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        match kind {
            NoticeKind::Error => log::error!("{}", message),
            NoticeKind::Success => log::info!("{}", message),
        }
        self.notices.update(|list| list.push(Notice { id, kind, message }));

        let this = *self;
        spawn_local(async move {
            TimeoutFuture::new(AUTO_DISMISS_MS).await;
            this.dismiss(id);
        });
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notifications() -> NotificationService {
    use_context::<NotificationService>().expect("NotificationService not found")
}

/// Стек уведомлений в правом нижнем углу
#[component]
pub fn Snackbar() -> impl IntoView {
    let service = use_notifications();

    view! {
        <div class="snackbar-stack">
            <For
                each=move || service.notices().get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div class=notice.kind.class() role="status">
                            <span class="snackbar__message">{notice.message}</span>
                            <button
                                class="snackbar__close"
                                title="Close"
                                on:click=move |_| service.dismiss(id)
                            >
                                {icon("x")}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
