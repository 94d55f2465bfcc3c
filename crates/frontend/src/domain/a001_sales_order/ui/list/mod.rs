use contracts::domain::a001_sales_order::dto::*;
use contracts::domain::common::{code_label, code_options};
use contracts::shared::reference_cache::ReferenceKind;
use contracts::shared::table::{format_amount, ColumnDef};
use leptos::prelude::*;
use thaw::*;

use crate::layout::global_context::use_app_context;
use crate::layout::tabs::tab_labels::{detail_tab_label, sales_order_detail_key};
use crate::shared::api_client::list_fn;
use crate::shared::components::column_filter::{
    active_count, bindings_query, FilterBinding, FilterField, FilterTags,
};
use crate::shared::components::data_table::DataTable;
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::export::ExportButtons;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::reference_options::use_reference_options;

fn columns() -> Vec<ColumnDef<SalesOrderRow>> {
    vec![
        ColumnDef::new("order_number", "Order No.", |r: &SalesOrderRow| Some(r.order_number.clone())),
        ColumnDef::new("order_date", "Date", |r: &SalesOrderRow| Some(r.order_date.clone())),
        ColumnDef::new("customer", "Customer", |r: &SalesOrderRow| r.customer_name.clone()),
        ColumnDef::new("salesman", "Salesman", |r: &SalesOrderRow| r.salesman_name.clone())
            .filtered_by(FILTER_SALESMAN),
        ColumnDef::new("warehouse", "Warehouse", |r: &SalesOrderRow| r.warehouse_name.clone())
            .filtered_by(FILTER_WAREHOUSE),
        ColumnDef::new("status", "Status", |r: &SalesOrderRow| Some(code_label(STATUSES, &r.status)))
            .filtered_by(FILTER_STATUS),
        ColumnDef::new("total_amount", "Total", |r: &SalesOrderRow| Some(format_amount(r.total_amount))).right(),
    ]
}

#[component]
pub fn SalesOrderList() -> impl IntoView {
    let tabs_store = use_app_context();
    let notify = use_notifications();

    let salesman = FilterBinding::single(
        FILTER_SALESMAN,
        "Salesman",
        use_reference_options(ReferenceKind::Salesman),
    );
    let warehouse = FilterBinding::single(
        FILTER_WAREHOUSE,
        "Warehouse",
        use_reference_options(ReferenceKind::Warehouse),
    );
    let status = FilterBinding::multi(FILTER_STATUS, "Status", Signal::derive(|| code_options(STATUSES)));
    let bindings = vec![salesman, warehouse, status];

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
    let loading = RwSignal::new(false);
    let is_expanded = RwSignal::new(false);

    let open_detail = Callback::new(move |row: SalesOrderRow| {
        tabs_store.open_tab(
            &sales_order_detail_key(&row.id),
            &detail_tab_label("Order", &row.order_number),
        );
    });

    let tag_bindings = bindings.clone();

    view! {
        <PageFrame page_id="a001_sales_order--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Sales Orders"</h1>
                </div>
                <div class="page__header-right">
                    <SearchInput
                        value=search
                        on_change=Callback::new(move |v: String| search.set(v))
                        placeholder="Order no. or customer"
                    />
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
                        <ExportButtons endpoint=&EXPORT_ENDPOINT query=query />
                    }
                    filter_tags=move || view! { <FilterTags bindings=tag_bindings.clone() /> }
                >
                    <Flex gap=FlexGap::Medium>
                        <FilterField binding=salesman />
                        <FilterField binding=warehouse />
                        <FilterField binding=status />
                    </Flex>
                </FilterPanel>

                <DataTable
                    list=list_fn(&LIST_ENDPOINT, notify)
                    columns=columns()
                    query=query
                    filters=bindings
                    refresh_key=refresh
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

    fn row() -> SalesOrderRow {
        SalesOrderRow {
            id: "101".into(),
            order_number: "SO-101".into(),
            order_date: "2024-05-02".into(),
            customer_name: None,
            salesman_id: Some("7".into()),
            salesman_name: Some("Ahmed Ali".into()),
            warehouse_name: None,
            status: "confirmed".into(),
            total_amount: 1250.0,
        }
    }

    #[test]
    fn cells_render_labels_and_placeholders() {
        let cols = columns();
        let cells: Vec<String> = cols.iter().map(|c| c.display(&row())).collect();
        assert_eq!(
            cells,
            vec!["SO-101", "2024-05-02", "-", "Ahmed Ali", "-", "Confirmed", "1,250.00"]
        );
    }

    #[test]
    fn filterable_columns_point_at_known_keys() {
        let keys: Vec<_> = columns().iter().filter_map(|c| c.filter).collect();
        assert_eq!(keys, vec![FILTER_SALESMAN, FILTER_WAREHOUSE, FILTER_STATUS]);
    }
}
