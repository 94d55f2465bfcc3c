//! Uniform request/response contract shared by every list page.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::filter::FilterSelection;

pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Value of a server-side filter parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterValue {
    One(String),
    Many(Vec<String>),
}

impl FilterValue {
    /// Query-string form; multiple values are comma-joined
    pub fn to_param(&self) -> String {
        match self {
            Self::One(v) => v.clone(),
            Self::Many(values) => values.join(","),
        }
    }
}

/// Page request: 1-based page, positive page size, non-empty filters only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    page: u32,
    page_size: u32,
    filters: BTreeMap<String, FilterValue>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

impl ListQuery {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
            filters: BTreeMap::new(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn filters(&self) -> &BTreeMap<String, FilterValue> {
        &self.filters
    }

    pub fn filter(&self, key: &str) -> Option<&FilterValue> {
        self.filters.get(key)
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Trimmed text filter; blank text removes the key.
    pub fn with_text(mut self, key: &str, value: &str) -> Self {
        self.set_text(key, value);
        self
    }

    pub fn with_selection(mut self, key: &str, selection: &FilterSelection) -> Self {
        self.set_selection(key, selection);
        self
    }

    pub fn with_value(mut self, key: &str, value: FilterValue) -> Self {
        self.set_value(key, value);
        self
    }

    pub fn set_text(&mut self, key: &str, value: &str) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.filters.remove(key);
        } else {
            self.filters
                .insert(key.to_string(), FilterValue::One(trimmed.to_string()));
        }
    }

    pub fn set_selection(&mut self, key: &str, selection: &FilterSelection) {
        match selection.to_filter_value() {
            Some(value) => {
                self.filters.insert(key.to_string(), value);
            }
            None => {
                self.filters.remove(key);
            }
        }
    }

    pub fn set_value(&mut self, key: &str, value: FilterValue) {
        let is_empty = match &value {
            FilterValue::One(v) => v.trim().is_empty(),
            FilterValue::Many(values) => values.iter().all(|v| v.trim().is_empty()),
        };
        if is_empty {
            self.filters.remove(key);
            return;
        }
        let value = match value {
            FilterValue::One(v) => FilterValue::One(v.trim().to_string()),
            FilterValue::Many(values) => FilterValue::Many(
                values
                    .into_iter()
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
                    .collect(),
            ),
        };
        self.filters.insert(key.to_string(), value);
    }

    pub fn active_filter_count(&self) -> usize {
        self.filters.len()
    }
}

/// Normalized page of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResult<R> {
    pub rows: Vec<R>,
    pub total_pages: u32,
    pub current_page: u32,
    pub page_size: u32,
    pub total_records: Option<u64>,
}

impl<R> ListResult<R> {
    /// Empty single-page result used when a fetch fails
    pub fn degraded(page_size: u32) -> Self {
        Self {
            rows: Vec::new(),
            total_pages: 1,
            current_page: 1,
            page_size: page_size.max(1),
            total_records: None,
        }
    }

    /// Builds a result, enforcing `total_pages ≥ 1`, `current_page ≥ 1`,
    /// `page_size > 0` and `rows.len() ≤ page_size`.
    pub fn new(
        mut rows: Vec<R>,
        total_pages: u32,
        current_page: u32,
        page_size: u32,
        total_records: Option<u64>,
    ) -> Self {
        let page_size = page_size.max(1);
        if rows.len() > page_size as usize {
            log::warn!(
                "server returned {} rows for page size {}; extra rows dropped",
                rows.len(),
                page_size
            );
            rows.truncate(page_size as usize);
        }
        Self {
            rows,
            total_pages: total_pages.max(1),
            current_page: current_page.max(1),
            page_size,
            total_records,
        }
    }

    /// Page number clamped into `[1, total_pages]`
    pub fn clamp_page(&self, page: u32) -> u32 {
        page.clamp(1, self.total_pages.max(1))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn map_rows<T>(self, f: impl FnMut(R) -> T) -> ListResult<T> {
        ListResult {
            rows: self.rows.into_iter().map(f).collect(),
            total_pages: self.total_pages,
            current_page: self.current_page,
            page_size: self.page_size,
            total_records: self.total_records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_and_size_are_clamped_to_one() {
        let q = ListQuery::new(0, 0);
        assert_eq!(q.page(), 1);
        assert_eq!(q.page_size(), 1);
        assert_eq!(q.with_page(0).page(), 1);
    }

    #[test]
    fn blank_filters_are_not_stored() {
        let q = ListQuery::default()
            .with_text("search", "   ")
            .with_text("status", " open ")
            .with_value("warehouse_id", FilterValue::Many(vec![" ".into()]))
            .with_selection("salesman_id", &FilterSelection::single());

        assert_eq!(q.active_filter_count(), 1);
        assert_eq!(q.filter("status"), Some(&FilterValue::One("open".into())));
    }

    #[test]
    fn clearing_a_text_filter_removes_the_key() {
        let mut q = ListQuery::default().with_text("search", "abc");
        q.set_text("search", "");
        assert!(q.filters().is_empty());
    }

    #[test]
    fn many_values_join_with_commas() {
        let v = FilterValue::Many(vec!["a".into(), "b".into()]);
        assert_eq!(v.to_param(), "a,b");
    }

    #[test]
    fn result_invariants_hold() {
        let r = ListResult::new(vec![1, 2, 3, 4], 0, 0, 3, Some(4));
        assert_eq!(r.rows, vec![1, 2, 3]);
        assert_eq!(r.total_pages, 1);
        assert_eq!(r.current_page, 1);
        assert_eq!(r.clamp_page(7), 1);

        let r = ListResult::new(vec!['x'], 5, 2, 50, None);
        assert_eq!(r.clamp_page(0), 1);
        assert_eq!(r.clamp_page(9), 5);
        assert_eq!(r.clamp_page(3), 3);
    }

    #[test]
    fn degraded_result_is_a_single_empty_page() {
        let r: ListResult<u8> = ListResult::degraded(100);
        assert!(r.is_empty());
        assert_eq!((r.total_pages, r.current_page, r.page_size), (1, 1, 100));
    }
}
