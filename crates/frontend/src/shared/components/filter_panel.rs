use crate::shared::icons::icon;
use leptos::prelude::*;

/// Collapsible filter panel above a list.
///
/// The header row carries the title with the active filter badge and the
/// page's actions (refresh, export, create).
#[component]
pub fn FilterPanel(
    #[prop(into)]
    is_expanded: RwSignal<bool>,

    /// Number of active filters (badge)
    #[prop(into)]
    active_filters_count: Signal<usize>,

    /// Buttons on the right side of the header
    #[prop(optional, into)]
    actions: Option<ViewFn>,

    /// Active filter chips, shown even when collapsed
    #[prop(optional, into)]
    filter_tags: Option<ViewFn>,

    children: ChildrenFn,
) -> impl IntoView {
    let chevron_class = move || {
        if is_expanded.get() {
            "filter-panel__chevron filter-panel__chevron--expanded"
        } else {
            "filter-panel__chevron"
        }
    };

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                <div
                    class="filter-panel-header__left"
                    on:click=move |_| is_expanded.update(|e| *e = !*e)
                >
                    <span class=chevron_class>{icon("chevron-down")}</span>
                    {icon("filter")}
                    <span class="filter-panel__title">"Filters"</span>
                    <Show when=move || { active_filters_count.get() > 0 }>
                        <span class="badge badge--primary">{move || active_filters_count.get()}</span>
                    </Show>
                </div>
                <div class="filter-panel-header__right">
                    {actions.as_ref().map(ViewFn::run)}
                </div>
            </div>

            {filter_tags.as_ref().map(|tags| view! {
                <div class="filter-panel__tags">{tags.run()}</div>
            })}

            <div class=move || {
                if is_expanded.get() {
                    "filter-panel__collapsible filter-panel__collapsible--expanded"
                } else {
                    "filter-panel__collapsible filter-panel__collapsible--collapsed"
                }
            }>
                <div class="filter-panel-content">{children()}</div>
            </div>
        </div>
    }
}

/// Active filter chip
#[component]
pub fn FilterTag(
    #[prop(into)]
    label: String,

    on_remove: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="filter-tag">
            <span>{label}</span>
            <span
                class="filter-tag__remove"
                title="Remove filter"
                on:click=move |e| {
                    e.stop_propagation();
                    on_remove.run(());
                }
            >
                {icon("x")}
            </span>
        </div>
    }
}
