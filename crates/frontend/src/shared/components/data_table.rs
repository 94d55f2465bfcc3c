//! Generic list table.
//!
//! Owns page/page size, asks the page's `list` callback for rows whenever
//! the page, the filter query or `refresh_key` changes, and renders only the
//! response of the newest request.

use contracts::shared::api_error::ApiError;
use contracts::shared::list_query::{ListQuery, ListResult, DEFAULT_PAGE_SIZE};
use contracts::shared::request_fence::RequestFence;
use contracts::shared::table::ColumnDef;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;
use thaw::*;

use super::column_filter::{ColumnFilter, FilterBinding};
use super::pagination_controls::PaginationControls;
use crate::shared::api_client::ListFn;

/// Что делать с ответом на запрос страницы `requested`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Settle {
    /// Показать пришедшие строки
    Show,
    /// Страница за пределами `total_pages`, перейти на указанную
    MoveTo(u32),
    /// Запрос не удался: пустая страница без повторного запроса
    Degrade,
}

fn settle<R>(requested: u32, outcome: &Result<ListResult<R>, ApiError>) -> Settle {
    match outcome {
        Err(_) => Settle::Degrade,
        Ok(fetched) => {
            let clamped = fetched.clamp_page(requested);
            if clamped == requested {
                Settle::Show
            } else {
                Settle::MoveTo(clamped)
            }
        }
    }
}

/// Filters changed since the last run while the table is past page 1
fn needs_page_reset(prev: Option<&ListQuery>, current: &ListQuery, page: u32) -> bool {
    page != 1 && prev.is_some_and(|p| p != current)
}

#[component]
pub fn DataTable<R>(
    /// Page source
    list: ListFn<R>,
    columns: Vec<ColumnDef<R>>,
    /// Filter state; a change sends the table back to page 1
    #[prop(optional, into)]
    query: Option<Signal<ListQuery>>,
    /// Header filters, matched to columns by `ColumnDef::filter`
    #[prop(optional)]
    filters: Vec<FilterBinding>,
    /// Bump to reload the current page
    #[prop(optional, into)]
    refresh_key: Option<Signal<u32>>,
    #[prop(optional)]
    on_loading: Option<Callback<bool>>,
    #[prop(optional)]
    on_row_click: Option<Callback<R>>,
) -> impl IntoView
where
    R: Clone + Send + Sync + 'static,
{
    let page = RwSignal::new(1u32);
    let page_size = RwSignal::new(DEFAULT_PAGE_SIZE);
    let result = RwSignal::new(ListResult::<R>::degraded(DEFAULT_PAGE_SIZE));
    let loading = RwSignal::new(false);
    let fence = RequestFence::new();

    let set_loading = move |value: bool| {
        loading.set(value);
        if let Some(cb) = on_loading {
            cb.run(value);
        }
    };

    let effect_fence = fence.clone();
    Effect::new(move |prev: Option<ListQuery>| {
        let filters = query.map(|q| q.get()).unwrap_or_default();
        if let Some(key) = refresh_key {
            key.track();
        }
        let requested_page = page.get();
        let size = page_size.get();

        if needs_page_reset(prev.as_ref(), &filters, requested_page) {
            // загрузка будет в следующем проходе, уже с первой страницей
            page.set(1);
            return filters;
        }

        let token = effect_fence.issue();
        let request = filters.clone().with_page(requested_page).with_page_size(size);
        let list = Arc::clone(&list);
        let fence = effect_fence.clone();
        set_loading(true);

        spawn_local(async move {
            let outcome = list(request).await;
            if !fence.is_current(token) {
                log::debug!("dropping stale response for page {}", requested_page);
                return;
            }
            set_loading(false);

            match (settle(requested_page, &outcome), outcome) {
                (Settle::MoveTo(target), _) => {
                    log::debug!("page {} is out of range, moving to {}", requested_page, target);
                    page.set(target);
                }
                (Settle::Show, Ok(fetched)) => result.set(fetched),
                (_, Err(err)) => {
                    log::warn!("list request for page {} failed: {}", requested_page, err);
                    result.set(ListResult::degraded(size));
                }
                (Settle::Degrade, Ok(_)) => {}
            }
        });

        filters
    });

    on_cleanup(move || fence.invalidate());

    let columns = Arc::new(columns);
    let column_count = columns.len().max(1).to_string();
    let header_columns = Arc::clone(&columns);
    let body_columns = Arc::clone(&columns);

    let header = header_columns
        .iter()
        .copied()
        .map(|col| {
            let binding = col
                .filter
                .and_then(|key| filters.iter().find(|b| b.key == key).copied());
            view! {
                <TableHeaderCell resizable=true min_width=80.0 class=col.align.css_class()>
                    <span class="data-table__header">
                        {col.label}
                        {binding.map(|binding| view! { <ColumnFilter binding=binding /> })}
                    </span>
                </TableHeaderCell>
            }
        })
        .collect_view();

    let placeholder = move |text: &'static str, colspan: String| {
        view! {
            <TableRow>
                <TableCell class="data-table__placeholder" attr:colspan=colspan>
                    {text}
                </TableCell>
            </TableRow>
        }
        .into_any()
    };

    let body = move || {
        let current = result.get();
        if current.is_empty() {
            let text = if loading.get() { "Loading…" } else { "No data" };
            return placeholder(text, column_count.clone());
        }
        current
            .rows
            .into_iter()
            .map(|row| {
                let cells = body_columns
                    .iter()
                    .copied()
                    .map(|col| {
                        let text = col.display(&row);
                        view! {
                            <TableCell class=col.align.css_class()>
                                <TableCellLayout truncate=true>{text}</TableCellLayout>
                            </TableCell>
                        }
                    })
                    .collect_view();
                match on_row_click {
                    Some(cb) => view! {
                        <TableRow on:click=move |_| cb.run(row.clone()) attr:style="cursor: pointer;">
                            {cells}
                        </TableRow>
                    }
                    .into_any(),
                    None => view! { <TableRow>{cells}</TableRow> }.into_any(),
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="data-table">
            <div class="data-table__toolbar">
                <Show when=move || loading.get()>
                    <Spinner size=SpinnerSize::Small />
                </Show>
                <PaginationControls
                    current_page=Signal::derive(move || page.get())
                    total_pages=Signal::derive(move || result.with(|r| r.total_pages))
                    total_records=Signal::derive(move || result.with(|r| r.total_records))
                    page_size=Signal::derive(move || page_size.get())
                    on_page_change=Callback::new(move |p: u32| page.set(p))
                    on_page_size_change=Callback::new(move |size: u32| {
                        page.set(1);
                        page_size.set(size);
                    })
                />
            </div>
            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>{header}</TableRow>
                    </TableHeader>
                    <TableBody>{body}</TableBody>
                </Table>
            </div>
        </div>
    }
}
