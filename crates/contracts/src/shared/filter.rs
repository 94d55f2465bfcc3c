//! Column filter options and toggle-select semantics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::list_query::FilterValue;

/// One entry of a filter dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Current selection of a column filter.
///
/// `Single` is toggle-select: choosing the already selected value clears it.
/// `Multi` toggles membership of each value independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSelection {
    Single(Option<String>),
    Multi(BTreeSet<String>),
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self::Single(None)
    }
}

impl FilterSelection {
    pub fn single() -> Self {
        Self::Single(None)
    }

    pub fn multi() -> Self {
        Self::Multi(BTreeSet::new())
    }

    /// `is_single = false` enables multi-value selection
    pub fn with_mode(is_single: bool) -> Self {
        if is_single {
            Self::single()
        } else {
            Self::multi()
        }
    }

    pub fn toggle(&mut self, value: &str) {
        match self {
            Self::Single(current) => {
                if current.as_deref() == Some(value) {
                    *current = None;
                } else {
                    *current = Some(value.to_string());
                }
            }
            Self::Multi(values) => {
                if !values.remove(value) {
                    values.insert(value.to_string());
                }
            }
        }
    }

    pub fn clear(&mut self) {
        match self {
            Self::Single(current) => *current = None,
            Self::Multi(values) => values.clear(),
        }
    }

    pub fn is_selected(&self, value: &str) -> bool {
        match self {
            Self::Single(current) => current.as_deref() == Some(value),
            Self::Multi(values) => values.contains(value),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(current) => current.as_deref().map_or(true, str::is_empty),
            Self::Multi(values) => values.is_empty(),
        }
    }

    /// Selected value as the legacy single-value string (`""` when unset)
    pub fn as_single_value(&self) -> String {
        match self {
            Self::Single(current) => current.clone().unwrap_or_default(),
            Self::Multi(values) => values.iter().next().cloned().unwrap_or_default(),
        }
    }

    pub fn to_filter_value(&self) -> Option<FilterValue> {
        match self {
            Self::Single(Some(v)) if !v.trim().is_empty() => Some(FilterValue::One(v.clone())),
            Self::Single(_) => None,
            Self::Multi(values) => {
                let values: Vec<String> = values
                    .iter()
                    .filter(|v| !v.trim().is_empty())
                    .cloned()
                    .collect();
                if values.is_empty() {
                    None
                } else {
                    Some(FilterValue::Many(values))
                }
            }
        }
    }

    pub fn selected_values(&self) -> Vec<String> {
        match self {
            Self::Single(current) => current.iter().cloned().collect(),
            Self::Multi(values) => values.iter().cloned().collect(),
        }
    }

    pub fn selected_count(&self) -> usize {
        match self {
            Self::Single(current) => usize::from(current.is_some()),
            Self::Multi(values) => values.len(),
        }
    }
}

/// Label for a selected value, falling back to the raw value.
pub fn option_label<'a>(options: &'a [FilterOption], value: &'a str) -> &'a str {
    options
        .iter()
        .find(|o| o.value == value)
        .map(|o| o.label.as_str())
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_click_on_same_value_clears_single_selection() {
        let mut sel = FilterSelection::single();
        sel.toggle("S001");
        assert_eq!(sel.as_single_value(), "S001");
        sel.toggle("S001");
        assert_eq!(sel.as_single_value(), "");
        assert!(sel.is_empty());
        assert_eq!(sel.to_filter_value(), None);
    }

    #[test]
    fn single_selection_switches_to_other_value() {
        let mut sel = FilterSelection::single();
        sel.toggle("S001");
        sel.toggle("S002");
        assert_eq!(sel, FilterSelection::Single(Some("S002".into())));
    }

    #[test]
    fn multi_selection_toggles_membership() {
        let mut sel = FilterSelection::with_mode(false);
        sel.toggle("open");
        sel.toggle("closed");
        assert_eq!(sel.selected_count(), 2);
        assert_eq!(
            sel.to_filter_value(),
            Some(FilterValue::Many(vec!["closed".into(), "open".into()]))
        );

        sel.toggle("open");
        sel.toggle("closed");
        assert!(sel.is_empty());
        assert_eq!(sel.to_filter_value(), None);
    }

    #[test]
    fn option_label_falls_back_to_value() {
        let options = vec![FilterOption::new("W1", "Main warehouse")];
        assert_eq!(option_label(&options, "W1"), "Main warehouse");
        assert_eq!(option_label(&options, "W9"), "W9");
    }
}
