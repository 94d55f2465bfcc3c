//! Sidebar with collapsible menu groups

use crate::layout::global_context::use_app_context;
use crate::layout::tabs::tab_label_for_key;
use crate::layout::tabs::tab_labels::*;
use crate::shared::icons::icon;
use leptos::prelude::*;

struct MenuGroup {
    id: &'static str,
    label: &'static str,
    /// (tab key, icon)
    items: &'static [(&'static str, &'static str)],
}

const MENU_GROUPS: &[MenuGroup] = &[
    MenuGroup {
        id: "sales",
        label: "Sales",
        items: &[
            (SALES_ORDERS, "orders"),
            (COLLECTIONS, "collections"),
            (LOYALTY_POINTS, "loyalty"),
        ],
    },
    MenuGroup {
        id: "inventory",
        label: "Inventory",
        items: &[(STOCK_TRANSFERS, "transfers"), (ASSET_REQUESTS, "assets")],
    },
    MenuGroup {
        id: "service",
        label: "Customer Service",
        items: &[(TICKETS, "tickets")],
    },
    MenuGroup {
        id: "reports",
        label: "Reports",
        items: &[(SALES_REPORT, "reports")],
    },
];

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_app_context();
    // все группы раскрыты при старте
    let expanded_groups = RwSignal::new(MENU_GROUPS.iter().map(|g| g.id).collect::<Vec<_>>());

    let toggle_group = move |id: &'static str| {
        expanded_groups.update(|items| {
            if let Some(pos) = items.iter().position(|x| *x == id) {
                items.remove(pos);
            } else {
                items.push(id);
            }
        });
    };

    view! {
        <div class="app-sidebar__content">
            {MENU_GROUPS.iter().map(|group| {
                let id = group.id;
                let is_expanded = move || expanded_groups.with(|e| e.contains(&id));
                view! {
                    <div>
                        <div
                            class="app-sidebar__item app-sidebar__group"
                            on:click=move |_| toggle_group(id)
                        >
                            <div class="app-sidebar__item-content">
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=is_expanded
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>
                        <Show when=is_expanded>
                            <div class="app-sidebar__children">
                                {group.items.iter().map(|&(key, icon_name)| {
                                    let label = tab_label_for_key(key);
                                    view! {
                                        <div
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || {
                                                ctx.active.with(|a| a.as_deref() == Some(key))
                                            }
                                            on:click=move |_| ctx.open_tab(key, label)
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(icon_name)}
                                                <span>{label}</span>
                                            </div>
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
