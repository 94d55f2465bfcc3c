use crate::shared::icons::icon;
use leptos::prelude::*;

pub const PAGE_SIZE_OPTIONS: [u32; 4] = [20, 50, 100, 200];

/// "2 / 5 (231)"; без общего числа записей скобки опускаются
fn pagination_info(page: u32, total_pages: u32, total_records: Option<u64>) -> String {
    let total = total_pages.max(1);
    match total_records {
        Some(count) => format!("{} / {} ({})", page.clamp(1, total), total, count),
        None => format!("{} / {}", page.clamp(1, total), total),
    }
}

/// Pagination controls (1-indexed pages)
#[component]
pub fn PaginationControls(
    /// Current page, starting from 1
    #[prop(into)]
    current_page: Signal<u32>,

    #[prop(into)]
    total_pages: Signal<u32>,

    /// Total count of records, if the server reported it
    #[prop(into)]
    total_records: Signal<Option<u64>>,

    #[prop(into)]
    page_size: Signal<u32>,

    on_page_change: Callback<u32>,

    on_page_size_change: Callback<u32>,

    #[prop(optional)]
    page_size_options: Option<Vec<u32>>,
) -> impl IntoView {
    let page_size_opts = page_size_options.unwrap_or_else(|| PAGE_SIZE_OPTIONS.to_vec());
    let on_first = move || current_page.get() <= 1;
    let on_last = move || current_page.get() >= total_pages.get().max(1);

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=on_first
                title="First page"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page > 1 {
                        on_page_change.run(page - 1);
                    }
                }
                disabled=on_first
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || pagination_info(current_page.get(), total_pages.get(), total_records.get())}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page < total_pages.get() {
                        on_page_change.run(page + 1);
                    }
                }
                disabled=on_last
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(total_pages.get().max(1))
                disabled=on_last
                title="Last page"
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                        on_page_size_change.run(size);
                    }
                }
                prop:value=move || page_size.get().to_string()
            >
                {page_size_opts.into_iter().map(|size| {
                    view! {
                        <option value=size.to_string() selected=move || page_size.get() == size>
                            {size.to_string()}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_is_one_based_and_clamped() {
        assert_eq!(pagination_info(2, 5, Some(231)), "2 / 5 (231)");
        assert_eq!(pagination_info(1, 0, None), "1 / 1");
        assert_eq!(pagination_info(9, 3, None), "3 / 3");
    }
}
