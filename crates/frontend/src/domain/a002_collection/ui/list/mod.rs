use contracts::domain::a002_collection::dto::*;
use contracts::domain::common::{code_label, code_options};
use contracts::shared::reference_cache::ReferenceKind;
use contracts::shared::table::{format_amount, ColumnDef};
use leptos::prelude::*;
use thaw::*;

use crate::shared::api_client::list_fn;
use crate::shared::components::column_filter::{
    active_count, bindings_query, FilterBinding, FilterField, FilterTags,
};
use crate::shared::components::data_table::DataTable;
use crate::shared::components::date_range::{DateRange, DateRangeFilter};
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::export::ExportButtons;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::reference_options::use_reference_options;

fn columns() -> Vec<ColumnDef<CollectionRow>> {
    vec![
        ColumnDef::new("receipt_number", "Receipt No.", |r: &CollectionRow| Some(r.receipt_number.clone())),
        ColumnDef::new("collection_date", "Date", |r: &CollectionRow| Some(r.collection_date.clone())),
        ColumnDef::new("customer", "Customer", |r: &CollectionRow| r.customer_name.clone()),
        ColumnDef::new("salesman", "Salesman", |r: &CollectionRow| r.salesman_name.clone())
            .filtered_by(FILTER_SALESMAN),
        ColumnDef::new("payment_mode", "Payment mode", |r: &CollectionRow| {
            Some(code_label(PAYMENT_MODES, &r.payment_mode))
        })
        .filtered_by(FILTER_PAYMENT_MODE),
        ColumnDef::new("reference_no", "Reference", |r: &CollectionRow| r.reference_no.clone()),
        ColumnDef::new("amount", "Amount", |r: &CollectionRow| Some(format_amount(r.amount))).right(),
    ]
}

#[component]
pub fn CollectionList() -> impl IntoView {
    let notify = use_notifications();

    let salesman = FilterBinding::single(
        FILTER_SALESMAN,
        "Salesman",
        use_reference_options(ReferenceKind::Salesman),
    );
    let payment_mode = FilterBinding::multi(
        FILTER_PAYMENT_MODE,
        "Payment mode",
        Signal::derive(|| code_options(PAYMENT_MODES)),
    );
    let bindings = vec![salesman, payment_mode];
    let period = DateRange::empty(FILTER_DATE_FROM, FILTER_DATE_TO);

    let query = {
        let bindings = bindings.clone();
        Signal::derive(move || period.apply(bindings_query(&bindings)))
    };
    let active_filters = {
        let bindings = bindings.clone();
        Signal::derive(move || active_count(&bindings) + usize::from(period.is_set()))
    };

    let refresh = RwSignal::new(0u32);
    let loading = RwSignal::new(false);
    let is_expanded = RwSignal::new(true);
    let tag_bindings = bindings.clone();

    view! {
        <PageFrame page_id="a002_collection--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Collections"</h1>
                </div>
                <div class="page__header-right">
                    <ExportButtons endpoint=&EXPORT_ENDPOINT query=query />
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
                    <Flex gap=FlexGap::Medium align=FlexAlign::End>
                        <DateRangeFilter range=period label="Collection date" />
                        <FilterField binding=salesman />
                        <FilterField binding=payment_mode />
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
