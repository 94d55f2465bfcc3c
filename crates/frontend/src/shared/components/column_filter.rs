//! Column filters: a binding of a filter key to its options and selection,
//! plus the dropdown that edits it.

use contracts::shared::filter::{option_label, FilterOption, FilterSelection};
use contracts::shared::list_query::ListQuery;
use leptos::prelude::*;

use super::filter_panel::FilterTag;
use crate::shared::icons::icon;

/// Options of a filter plus whether they are still being fetched
#[derive(Clone, Copy)]
pub struct OptionList {
    pub options: Signal<Vec<FilterOption>>,
    pub loading: Signal<bool>,
}

impl From<Signal<Vec<FilterOption>>> for OptionList {
    fn from(options: Signal<Vec<FilterOption>>) -> Self {
        Self {
            options,
            loading: Signal::derive(|| false),
        }
    }
}

/// Filter key + options + current selection
#[derive(Clone, Copy)]
pub struct FilterBinding {
    pub key: &'static str,
    pub label: &'static str,
    pub options: Signal<Vec<FilterOption>>,
    pub loading: Signal<bool>,
    pub selection: RwSignal<FilterSelection>,
}

impl FilterBinding {
    /// Toggle-select binding: a second click on the selected value clears it
    pub fn single(
        key: &'static str,
        label: &'static str,
        options: impl Into<OptionList>,
    ) -> Self {
        Self::with_selection(key, label, options, FilterSelection::single())
    }

    pub fn multi(
        key: &'static str,
        label: &'static str,
        options: impl Into<OptionList>,
    ) -> Self {
        Self::with_selection(key, label, options, FilterSelection::multi())
    }

    fn with_selection(
        key: &'static str,
        label: &'static str,
        options: impl Into<OptionList>,
        selection: FilterSelection,
    ) -> Self {
        let list = options.into();
        Self {
            key,
            label,
            options: list.options,
            loading: list.loading,
            selection: RwSignal::new(selection),
        }
    }

    pub fn toggle(&self, value: &str) {
        self.selection.update(|s| s.toggle(value));
    }

    pub fn clear(&self) {
        self.selection.update(FilterSelection::clear);
    }

    /// Adds the current selection to `query` (tracked read)
    pub fn apply(&self, query: ListQuery) -> ListQuery {
        self.selection.with(|s| query.with_selection(self.key, s))
    }
}

/// Query with all bindings applied
pub fn bindings_query(bindings: &[FilterBinding]) -> ListQuery {
    bindings
        .iter()
        .fold(ListQuery::default(), |query, binding| binding.apply(query))
}

/// "Salesman: John Doe" chips for every selected value
fn tag_labels(
    label: &str,
    options: &[FilterOption],
    selection: &FilterSelection,
) -> Vec<(String, String)> {
    selection
        .selected_values()
        .into_iter()
        .map(|value| {
            let text = format!("{}: {}", label, option_label(options, &value));
            (value, text)
        })
        .collect()
}

/// Text shown instead of the option list, if any
fn menu_placeholder(has_options: bool, loading: bool) -> Option<&'static str> {
    match (has_options, loading) {
        (true, _) => None,
        (false, true) => Some("Loading…"),
        (false, false) => Some("No options"),
    }
}

/// Dropdown with toggleable options
#[component]
pub fn ColumnFilter(binding: FilterBinding) -> impl IntoView {
    let open = RwSignal::new(false);
    let is_active = move || binding.selection.with(|s| !s.is_empty());

    view! {
        <span class="column-filter">
            <button
                class=move || {
                    if is_active() {
                        "column-filter__toggle column-filter__toggle--active"
                    } else {
                        "column-filter__toggle"
                    }
                }
                title=format!("Filter by {}", binding.label.to_lowercase())
                on:click=move |ev| {
                    ev.stop_propagation();
                    open.update(|o| *o = !*o);
                }
            >
                {icon("filter")}
            </button>
            <Show when=move || open.get()>
                <div class="column-filter__menu" on:click=|ev| ev.stop_propagation()>
                    {move || {
                        let options = binding.options.get();
                        if let Some(text) = menu_placeholder(!options.is_empty(), binding.loading.get()) {
                            return view! {
                                <div class="column-filter__empty">{text}</div>
                            }
                            .into_any();
                        }
                        options
                            .into_iter()
                            .map(|option| {
                                let value = option.value.clone();
                                let value_for_click = option.value.clone();
                                view! {
                                    <div
                                        class=move || {
                                            if binding.selection.with(|s| s.is_selected(&value)) {
                                                "column-filter__option column-filter__option--selected"
                                            } else {
                                                "column-filter__option"
                                            }
                                        }
                                        on:click=move |_| {
                                            binding.toggle(&value_for_click);
                                            if matches!(binding.selection.get_untracked(), FilterSelection::Single(_)) {
                                                open.set(false);
                                            }
                                        }
                                    >
                                        {option.label}
                                    </div>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                    <div class="column-filter__footer">
                        <button
                            class="column-filter__clear"
                            on:click=move |_| {
                                binding.clear();
                                open.set(false);
                            }
                        >
                            "Clear"
                        </button>
                    </div>
                </div>
            </Show>
        </span>
    }
}

/// Labelled filter for the filter panel
#[component]
pub fn FilterField(binding: FilterBinding) -> impl IntoView {
    view! {
        <div class="filter-field">
            <span class="filter-field__label">{binding.label}</span>
            <ColumnFilter binding=binding />
            <span class="filter-field__value">
                {move || {
                    let options = binding.options.get();
                    let values = binding.selection.with(FilterSelection::selected_values);
                    if values.is_empty() {
                        "All".to_string()
                    } else {
                        values
                            .iter()
                            .map(|v| option_label(&options, v).to_string())
                            .collect::<Vec<_>>()
                            .join(", ")
                    }
                }}
            </span>
        </div>
    }
}

/// Chips for every selected value of every binding
#[component]
pub fn FilterTags(bindings: Vec<FilterBinding>) -> impl IntoView {
    move || {
        bindings
            .iter()
            .flat_map(|binding| {
                let binding = *binding;
                let options = binding.options.get();
                binding.selection.with(|s| tag_labels(binding.label, &options, s))
                    .into_iter()
                    .map(move |(value, text)| {
                        view! {
                            <FilterTag
                                label=text
                                on_remove=Callback::new(move |_| binding.toggle(&value))
                            />
                        }
                    })
            })
            .collect_view()
    }
}

pub fn active_count(bindings: &[FilterBinding]) -> usize {
    bindings
        .iter()
        .filter(|b| b.selection.with(|s| !s.is_empty()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_use_option_labels() {
        let options = vec![
            FilterOption::new("S001", "John Doe (S001)"),
            FilterOption::new("S002", "Mary Wanjiru"),
        ];
        let mut selection = FilterSelection::multi();
        selection.toggle("S002");
        selection.toggle("S404");
        assert_eq!(
            tag_labels("Salesman", &options, &selection),
            vec![
                ("S002".to_string(), "Salesman: Mary Wanjiru".to_string()),
                ("S404".to_string(), "Salesman: S404".to_string()),
            ]
        );
    }

    #[test]
    fn loading_text_only_while_options_are_fetched() {
        assert_eq!(menu_placeholder(false, true), Some("Loading…"));
        assert_eq!(menu_placeholder(false, false), Some("No options"));
        assert_eq!(menu_placeholder(true, true), None);
        assert_eq!(menu_placeholder(true, false), None);
    }

    #[test]
    fn empty_selection_has_no_tags() {
        assert!(tag_labels("Status", &[], &FilterSelection::single()).is_empty());
    }
}
