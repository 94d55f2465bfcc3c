use crate::layout::global_context::{use_app_context, Tab as TabData};
use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;

/// Ярлык вкладки в полосе вкладок
#[component]
pub fn Tab(tab: TabData) -> impl IntoView {
    let tabs_store = use_app_context();

    let key_for_active = tab.key.clone();
    let is_active =
        Memo::new(move |_| tabs_store.active.with(|a| a.as_deref() == Some(key_for_active.as_str())));

    let key_for_click = tab.key.clone();
    let key_for_close = tab.key.clone();
    let on_close = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        tabs_store.close_tab(&key_for_close);
    };

    // заголовок может смениться после загрузки записи
    let key_for_title = tab.key.clone();
    let title = move || {
        tabs_store.opened.with(|tabs| {
            tabs.iter()
                .find(|t| t.key == key_for_title)
                .map(|t| t.title.clone())
                .unwrap_or_default()
        })
    };

    view! {
        <div
            class="tab"
            class:active=is_active
            on:click=move |_| tabs_store.activate_tab(&key_for_click)
        >
            <span class="tab__title">{title}</span>
            <button class="tab-close" title="Close" on:click=on_close>
                {icon("x")}
            </button>
        </div>
    }
}
