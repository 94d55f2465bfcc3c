use contracts::domain::a005_call_center_ticket::dto::*;
use contracts::domain::common::{code_label, code_options};
use contracts::shared::table::{format_datetime, ColumnDef};
use leptos::prelude::*;
use thaw::*;

use crate::layout::global_context::use_app_context;
use crate::layout::tabs::tab_labels::{
    detail_tab_label, tab_label_for_key, ticket_detail_key, TICKETS, TICKET_NEW,
};
use crate::shared::api_client::list_fn;
use crate::shared::components::column_filter::{
    active_count, bindings_query, FilterBinding, FilterField, FilterTags,
};
use crate::shared::components::data_table::DataTable;
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;

fn columns() -> Vec<ColumnDef<TicketRow>> {
    vec![
        ColumnDef::new("ticket_number", "Ticket", |r: &TicketRow| Some(r.ticket_number.clone())),
        ColumnDef::new("created_at", "Created", |r: &TicketRow| Some(format_datetime(&r.created_at))),
        ColumnDef::new("customer", "Customer", |r: &TicketRow| Some(r.customer_name.clone())),
        ColumnDef::new("phone", "Phone", |r: &TicketRow| r.phone.clone()),
        ColumnDef::new("subject", "Subject", |r: &TicketRow| Some(r.subject.clone())),
        ColumnDef::new("priority", "Priority", |r: &TicketRow| Some(code_label(PRIORITIES, &r.priority)))
            .filtered_by(FILTER_PRIORITY),
        ColumnDef::new("status", "Status", |r: &TicketRow| Some(code_label(STATUSES, &r.status)))
            .filtered_by(FILTER_STATUS),
        ColumnDef::new("assigned_to", "Assignee", |r: &TicketRow| r.assigned_to.clone()),
    ]
}

#[component]
pub fn TicketList() -> impl IntoView {
    let tabs_store = use_app_context();
    let notify = use_notifications();

    let status = FilterBinding::multi(FILTER_STATUS, "Status", Signal::derive(|| code_options(STATUSES)));
    let priority = FilterBinding::single(
        FILTER_PRIORITY,
        "Priority",
        Signal::derive(|| code_options(PRIORITIES)),
    );
    let bindings = vec![status, priority];

    let search = RwSignal::new(String::new());
    let query = {
        let bindings = bindings.clone();
        Signal::derive(move || bindings_query(&bindings).with_text(FILTER_SEARCH, &search.get()))
    };
    let active_filters = {
        let bindings = bindings.clone();
        Signal::derive(move || active_count(&bindings))
    };

    let refresh = RwSignal::new(0u32);
    let revision = tabs_store.list_revision(TICKETS);
    let refresh_key = Signal::derive(move || refresh.get().wrapping_add(revision.get()));

    let loading = RwSignal::new(false);
    let is_expanded = RwSignal::new(false);
    let tag_bindings = bindings.clone();

    let open_detail = Callback::new(move |row: TicketRow| {
        tabs_store.open_tab(
            &ticket_detail_key(&row.id),
            &detail_tab_label("Ticket", &row.ticket_number),
        );
    });

    view! {
        <PageFrame page_id="a005_call_center_ticket--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Call Center Tickets"</h1>
                </div>
                <div class="page__header-right">
                    <SearchInput
                        value=search
                        on_change=Callback::new(move |v: String| search.set(v))
                        placeholder="Customer, phone or subject"
                    />
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| tabs_store.open_tab(TICKET_NEW, tab_label_for_key(TICKET_NEW))
                    >
                        {icon("plus")}
                        "New ticket"
                    </Button>
                </div>
            </div>
            <div class="page__content">
                <FilterPanel
                    is_expanded=is_expanded
                    active_filters_count=active_filters
                    actions=move || view! {
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| refresh.update(|n| *n += 1)
                            disabled=loading
                        >
                            {icon("refresh")}
                            "Refresh"
                        </Button>
                    }
                    filter_tags=move || view! { <FilterTags bindings=tag_bindings.clone() /> }
                >
                    <Flex gap=FlexGap::Medium>
                        <FilterField binding=status />
                        <FilterField binding=priority />
                    </Flex>
                </FilterPanel>

                <DataTable
                    list=list_fn(&LIST_ENDPOINT, notify)
                    columns=columns()
                    query=query
                    filters=bindings
                    refresh_key=refresh_key
                    on_loading=Callback::new(move |v: bool| loading.set(v))
                    on_row_click=open_detail
                />
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_at_is_shortened() {
        let row = TicketRow {
            id: "12".into(),
            ticket_number: "CC-12".into(),
            created_at: "2024-05-01T09:00:00Z".into(),
            customer_name: "Mini Market 24".into(),
            phone: None,
            subject: "Late delivery".into(),
            priority: "urgent".into(),
            status: "in_progress".into(),
            assigned_to: None,
        };
        let cells: Vec<String> = columns().iter().map(|c| c.display(&row)).collect();
        assert_eq!(cells[1], "2024-05-01 09:00");
        assert_eq!(cells[5], "Urgent");
        assert_eq!(cells[6], "In progress");
        assert_eq!(cells[7], "-");
    }
}
