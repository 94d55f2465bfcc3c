//! TopHeader: brand, sidebar toggle, signed-in user and sign out.

use crate::layout::global_context::use_app_context;
use crate::shared::icons::icon;
use crate::system::session::{use_session, SessionInfo};
use leptos::prelude::*;

/// "Amina Yusuf · supervisor · KE"
fn user_line(info: &SessionInfo) -> String {
    let parts: Vec<&str> = [&info.user, &info.role, &info.country]
        .into_iter()
        .filter_map(|v| v.as_deref())
        .filter(|v| !v.trim().is_empty())
        .collect();
    if parts.is_empty() {
        "Guest".to_string()
    } else {
        parts.join(" · ")
    }
}

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_app_context();
    let session = use_session();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if ctx.left_open.get() { "Hide navigation" } else { "Show navigation" }
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">"Distribution Dashboard"</span>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    {icon("user")}
                    <span>{move || session.info.with(user_line)}</span>
                </div>
                <Show when=move || session.info.with(SessionInfo::is_signed_in)>
                    <button
                        class="top-header__icon-btn"
                        on:click=move |_| session.sign_out()
                        title="Sign out"
                    >
                        {icon("log-out")}
                    </button>
                </Show>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_line_skips_missing_parts() {
        let info = SessionInfo {
            token: Some("t".into()),
            user: Some("Amina Yusuf".into()),
            role: None,
            country: Some("KE".into()),
        };
        assert_eq!(user_line(&info), "Amina Yusuf · KE");
        assert_eq!(user_line(&SessionInfo::default()), "Guest");
    }
}
