use contracts::domain::a003_stock_transfer::dto::*;
use contracts::domain::common::{code_label, code_options};
use contracts::shared::reference_cache::ReferenceKind;
use contracts::shared::table::ColumnDef;
use leptos::prelude::*;
use thaw::*;

use crate::shared::api_client::list_fn;
use crate::shared::components::column_filter::{
    active_count, bindings_query, FilterBinding, FilterField, FilterTags,
};
use crate::shared::components::data_table::DataTable;
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::reference_options::use_reference_options;

fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn columns() -> Vec<ColumnDef<StockTransferRow>> {
    vec![
        ColumnDef::new("transfer_number", "Transfer No.", |r: &StockTransferRow| Some(r.transfer_number.clone())),
        ColumnDef::new("transfer_date", "Date", |r: &StockTransferRow| Some(r.transfer_date.clone())),
        ColumnDef::new("source", "From", |r: &StockTransferRow| r.source_warehouse_name.clone())
            .filtered_by(FILTER_SOURCE_WAREHOUSE),
        ColumnDef::new("destination", "To", |r: &StockTransferRow| r.destination_warehouse_name.clone())
            .filtered_by(FILTER_DESTINATION_WAREHOUSE),
        ColumnDef::new("item_count", "Items", |r: &StockTransferRow| Some(r.item_count.to_string())).right(),
        ColumnDef::new("total_quantity", "Quantity", |r: &StockTransferRow| r.total_quantity.map(format_quantity))
            .right(),
        ColumnDef::new("status", "Status", |r: &StockTransferRow| Some(code_label(STATUSES, &r.status)))
            .filtered_by(FILTER_STATUS),
    ]
}

#[component]
pub fn StockTransferList() -> impl IntoView {
    let notify = use_notifications();

    // оба фильтра по складам берут один и тот же кэшированный справочник
    let warehouses = use_reference_options(ReferenceKind::Warehouse);
    let source = FilterBinding::single(FILTER_SOURCE_WAREHOUSE, "From warehouse", warehouses);
    let destination =
        FilterBinding::single(FILTER_DESTINATION_WAREHOUSE, "To warehouse", warehouses);
    let status = FilterBinding::multi(FILTER_STATUS, "Status", Signal::derive(|| code_options(STATUSES)));
    let bindings = vec![source, destination, status];

    let query = {
        let bindings = bindings.clone();
        Signal::derive(move || bindings_query(&bindings))
    };
    let active_filters = {
        let bindings = bindings.clone();
        Signal::derive(move || active_count(&bindings))
    };

    let refresh = RwSignal::new(0u32);
    let loading = RwSignal::new(false);
    let is_expanded = RwSignal::new(false);
    let tag_bindings = bindings.clone();

    view! {
        <PageFrame page_id="a003_stock_transfer--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Stock Transfers"</h1>
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
                        <FilterField binding=source />
                        <FilterField binding=destination />
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
                />
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_quantities_drop_decimals() {
        assert_eq!(format_quantity(12.0), "12");
        assert_eq!(format_quantity(2.5), "2.50");
    }

    #[test]
    fn missing_quantity_renders_placeholder() {
        let row = StockTransferRow {
            id: "T-9".into(),
            transfer_number: "ST-0009".into(),
            transfer_date: "2024-04-30".into(),
            source_warehouse_name: Some("Main".into()),
            destination_warehouse_name: None,
            item_count: 4,
            total_quantity: None,
            status: "in_transit".into(),
        };
        let cells: Vec<String> = columns().iter().map(|c| c.display(&row)).collect();
        assert_eq!(cells[3], "-");
        assert_eq!(cells[4], "4");
        assert_eq!(cells[5], "-");
        assert_eq!(cells[6], "In transit");
    }
}
