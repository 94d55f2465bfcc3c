//! Pieces shared by the entity modules.

use crate::shared::filter::FilterOption;

/// Fixed `(value, label)` pairs of a status-like column
pub type CodeList = &'static [(&'static str, &'static str)];

/// Dropdown options of a fixed code list
pub fn code_options(codes: CodeList) -> Vec<FilterOption> {
    codes
        .iter()
        .map(|(value, label)| FilterOption::new(*value, *label))
        .collect()
}

/// Human label of a code, or the code itself when unknown
pub fn code_label(codes: CodeList, value: &str) -> String {
    codes
        .iter()
        .find(|(v, _)| v.eq_ignore_ascii_case(value))
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| value.to_string())
}
