//! Page categories for tab pages.
//!
//! Every page rendered inside a tab declares an HTML `id` of the form
//! `{entity}--{category}` (e.g. `"a001_sales_order--list"`) and a
//! `data-page-category` attribute with one of the constants below.

/// Table with filters and pagination
pub const PAGE_CAT_LIST: &str = "list";

/// One record
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Report with summary cards
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// Create form
pub const PAGE_CAT_FORM: &str = "form";

/// Checks the `{entity}--{category}` format
pub fn is_valid_page_id(id: &str) -> bool {
    matches!(id.split_once("--"), Some((entity, category)) if !entity.is_empty() && !category.is_empty())
}
