//! PageFrame: root wrapper of every page rendered inside a tab.

use super::page_standard::*;
use leptos::prelude::*;

/// Sets `id`, `data-page-category` and the category class on the page root.
#[component]
pub fn PageFrame(
    /// `{entity}--{category}`, e.g. `"a005_call_center_ticket--detail"`
    page_id: &'static str,
    /// One of the PAGE_CAT_* constants
    category: &'static str,
    children: Children,
) -> impl IntoView {
    debug_assert!(is_valid_page_id(page_id), "bad page id {page_id}");
    let class = match category {
        PAGE_CAT_DETAIL => "page page--detail",
        PAGE_CAT_DASHBOARD => "page page--dashboard",
        PAGE_CAT_FORM => "page page--form",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            {children()}
        </div>
    }
}
