use contracts::domain::a005_call_center_ticket::dto::*;
use contracts::domain::common::code_label;
use contracts::shared::endpoint::fetch_data;
use contracts::shared::table::{format_datetime, EMPTY_CELL};
use leptos::prelude::*;
use thaw::*;

use crate::layout::global_context::use_app_context;
use crate::layout::tabs::tab_labels::{detail_tab_label, ticket_detail_key};
use crate::shared::api_client::HttpTransport;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;

fn text_or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => EMPTY_CELL.to_string(),
    }
}

/// Комментарии от новых к старым
fn newest_first(mut comments: Vec<TicketComment>) -> Vec<TicketComment> {
    comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    comments
}

#[component]
pub fn TicketDetail(id: String, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let tabs_store = use_app_context();
    let notify = use_notifications();

    let (ticket, set_ticket) = signal::<Option<TicketDetail>>(None);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);

    let tab_key = ticket_detail_key(&id);
    wasm_bindgen_futures::spawn_local(async move {
        match fetch_data::<TicketDetail, _>(&HttpTransport, &detail_path(&id), &[]).await {
            Ok(detail) => {
                tabs_store.update_tab_title(&tab_key, &detail_tab_label("Ticket", &detail.ticket_number));
                let _ = set_ticket.try_set(Some(detail));
            }
            Err(err) => {
                log::warn!("ticket {} failed to load: {}", id, err);
                notify.api_error(&err);
                let _ = set_error.try_set(Some(err.user_message()));
            }
        }
        let _ = set_loading.try_set(false);
    });

    view! {
        <PageFrame page_id="a005_call_center_ticket--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">
                        {move || ticket.with(|t| match t {
                            Some(t) => format!("Ticket {}", t.ticket_number),
                            None => "Ticket".to_string(),
                        })}
                    </h1>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        {icon("x")}
                        "Close"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || {
                    if loading.get() {
                        return view! {
                            <div class="page__placeholder">
                                <Spinner size=SpinnerSize::Small />
                                " Loading…"
                            </div>
                        }
                        .into_any();
                    }
                    if let Some(err) = error.get() {
                        return view! {
                            <div class="warning-box warning-box--error">
                                <strong>"Error: "</strong>
                                {err}
                            </div>
                        }
                        .into_any();
                    }
                    match ticket.get() {
                        Some(detail) => view! { <TicketBody detail=detail /> }.into_any(),
                        None => view! { <div class="page__placeholder">"No data"</div> }.into_any(),
                    }
                }}
            </div>
        </PageFrame>
    }
}

#[component]
fn TicketBody(detail: TicketDetail) -> impl IntoView {
    let fields = vec![
        ("Customer", detail.customer_name.clone()),
        ("Phone", text_or_dash(detail.phone.as_deref())),
        ("Subject", detail.subject.clone()),
        ("Priority", code_label(PRIORITIES, &detail.priority)),
        ("Status", code_label(STATUSES, &detail.status)),
        ("Assignee", text_or_dash(detail.assigned_to.as_deref())),
        ("Created", format_datetime(&detail.created_at)),
        (
            "Updated",
            detail
                .updated_at
                .as_deref()
                .map(format_datetime)
                .unwrap_or_else(|| EMPTY_CELL.to_string()),
        ),
    ];
    let description = text_or_dash(detail.description.as_deref());
    let comments = newest_first(detail.comments);
    let has_comments = !comments.is_empty();

    view! {
        <div class="detail-grid">
            {fields
                .into_iter()
                .map(|(label, value)| {
                    view! {
                        <div class="detail-grid__label">{label}</div>
                        <div class="detail-grid__value">{value}</div>
                    }
                })
                .collect_view()}
        </div>

        <h3 class="section-title">"Description"</h3>
        <p class="detail-text">{description}</p>

        <h3 class="section-title">"Comments"</h3>
        <Show
            when=move || has_comments
            fallback=|| view! { <div class="page__placeholder">"No comments yet"</div> }
        >
            <ul class="comment-list">
                {comments
                    .clone()
                    .into_iter()
                    .map(|c| {
                        view! {
                            <li class="comment-list__item">
                                <div class="comment-list__meta">
                                    <span class="comment-list__author">{text_or_dash(c.author.as_deref())}</span>
                                    <span class="comment-list__time">{format_datetime(&c.created_at)}</span>
                                </div>
                                <div class="comment-list__body">{c.body}</div>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(at: &str) -> TicketComment {
        TicketComment {
            author: None,
            created_at: at.into(),
            body: "note".into(),
        }
    }

    #[test]
    fn comments_are_sorted_newest_first() {
        let sorted = newest_first(vec![
            comment("2024-05-01T09:10:00Z"),
            comment("2024-05-02T08:00:00Z"),
            comment("2024-05-01T12:00:00Z"),
        ]);
        let times: Vec<&str> = sorted.iter().map(|c| c.created_at.as_str()).collect();
        assert_eq!(
            times,
            vec!["2024-05-02T08:00:00Z", "2024-05-01T12:00:00Z", "2024-05-01T09:10:00Z"]
        );
    }

    #[test]
    fn blank_text_shows_dash() {
        assert_eq!(text_or_dash(Some("   ")), "-");
        assert_eq!(text_or_dash(None), "-");
        assert_eq!(text_or_dash(Some(" agent1 ")), "agent1");
    }
}
