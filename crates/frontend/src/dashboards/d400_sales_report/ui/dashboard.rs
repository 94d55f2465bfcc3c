use contracts::dashboards::d400_sales_report::dto::*;
use contracts::shared::reference_cache::ReferenceKind;
use contracts::shared::request_fence::RequestFence;
use contracts::shared::table::{format_amount, ColumnDef};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::dashboards::d400_sales_report::api;
use crate::shared::api_client::list_fn;
use crate::shared::components::column_filter::{
    active_count, bindings_query, FilterBinding, FilterField, FilterTags,
};
use crate::shared::components::data_table::DataTable;
use crate::shared::components::date_range::{DateRange, DateRangeFilter};
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::components::stat_card::{CardStatus, StatCard};
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use crate::shared::reference_options::use_reference_options;

/// Пороги доли собранной выручки, %
const RATE_GOOD: f64 = 90.0;
const RATE_WARNING: f64 = 70.0;

fn rate_status(rate: Option<f64>) -> CardStatus {
    match rate {
        Some(r) if r >= RATE_GOOD => CardStatus::Good,
        Some(r) if r >= RATE_WARNING => CardStatus::Warning,
        Some(_) => CardStatus::Bad,
        None => CardStatus::Neutral,
    }
}

fn outstanding_status(outstanding: f64) -> CardStatus {
    if outstanding > 0.0 {
        CardStatus::Warning
    } else {
        CardStatus::Good
    }
}

fn columns() -> Vec<ColumnDef<SalesReportRow>> {
    vec![
        ColumnDef::new("salesman", "Salesman", |r: &SalesReportRow| Some(r.salesman_name.clone()))
            .filtered_by(FILTER_SALESMAN),
        ColumnDef::new("warehouse", "Warehouse", |r: &SalesReportRow| r.warehouse_name.clone())
            .filtered_by(FILTER_WAREHOUSE),
        ColumnDef::new("order_count", "Orders", |r: &SalesReportRow| Some(r.order_count.to_string())).right(),
        ColumnDef::new("total_sales", "Sales", |r: &SalesReportRow| Some(format_amount(r.total_sales))).right(),
        ColumnDef::new("total_collections", "Collected", |r: &SalesReportRow| {
            Some(format_amount(r.total_collections))
        })
        .right(),
        ColumnDef::new("outstanding", "Outstanding", |r: &SalesReportRow| Some(format_amount(r.outstanding))).right(),
    ]
}

/// Sales report: period totals as cards plus the per-salesman table
#[component]
pub fn SalesReportDashboard() -> impl IntoView {
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
    let bindings = vec![salesman, warehouse];
    let period = DateRange::month_to_date(FILTER_DATE_FROM, FILTER_DATE_TO);

    let query = {
        let bindings = bindings.clone();
        Signal::derive(move || period.apply(bindings_query(&bindings)))
    };
    let active_filters = {
        let bindings = bindings.clone();
        Signal::derive(move || active_count(&bindings))
    };

    let refresh = RwSignal::new(0u32);
    let table_loading = RwSignal::new(false);
    let is_expanded = RwSignal::new(true);
    let tag_bindings = bindings.clone();

    // Итоги
    let summary = RwSignal::new(None::<SalesSummary>);
    let summary_loading = RwSignal::new(false);
    let fence = RequestFence::new();

    let effect_fence = fence.clone();
    Effect::new(move |_| {
        let q = query.get();
        refresh.track();

        let token = effect_fence.issue();
        let fence = effect_fence.clone();
        summary_loading.set(true);
        spawn_local(async move {
            let reply = api::get_summary(&q).await;
            if !fence.is_current(token) {
                return;
            }
            match reply {
                Ok(s) => {
                    let _ = summary.try_set(Some(s));
                }
                Err(err) => {
                    log::warn!("sales summary failed: {}", err);
                    notify.api_error(&err);
                    let _ = summary.try_set(None);
                }
            }
            let _ = summary_loading.try_set(false);
        });
    });
    on_cleanup(move || fence.invalidate());

    let total_sales = Signal::derive(move || summary.get().map(|s| format_amount(s.total_sales)));
    let total_collections =
        Signal::derive(move || summary.get().map(|s| format_amount(s.total_collections)));
    let order_count = Signal::derive(move || summary.get().map(|s| s.order_count.to_string()));
    let outstanding = Signal::derive(move || summary.get().map(|s| format_amount(s.outstanding)));
    let rate = Signal::derive(move || summary.get().and_then(|s| s.collection_rate()));
    let rate_subtitle = Signal::derive(move || rate.get().map(|r| format!("{:.1}% collected", r)));
    let collections_status = Signal::derive(move || rate_status(rate.get()));
    let outstanding_card_status = Signal::derive(move || {
        summary
            .get()
            .map(|s| outstanding_status(s.outstanding))
            .unwrap_or_default()
    });

    let busy = Signal::derive(move || table_loading.get() || summary_loading.get());

    view! {
        <PageFrame page_id="d400_sales_report--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Sales Report"</h1>
                </div>
                <div class="page__header-right">
                    <Show when=move || busy.get()>
                        <Spinner size=SpinnerSize::Small />
                    </Show>
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
                            disabled=busy
                        >
                            {icon("refresh")}
                            "Refresh"
                        </Button>
                    }
                    filter_tags=move || view! { <FilterTags bindings=tag_bindings.clone() /> }
                >
                    <Flex gap=FlexGap::Medium align=FlexAlign::End>
                        <DateRangeFilter range=period label="Period" />
                        <FilterField binding=salesman />
                        <FilterField binding=warehouse />
                    </Flex>
                </FilterPanel>

                <div class="stat-cards">
                    <StatCard label="Total sales" icon_name="orders" value=total_sales />
                    <StatCard
                        label="Collections"
                        icon_name="collections"
                        value=total_collections
                        status=collections_status
                        subtitle=rate_subtitle
                    />
                    <StatCard label="Orders" icon_name="reports" value=order_count />
                    <StatCard
                        label="Outstanding"
                        icon_name="loyalty"
                        value=outstanding
                        status=outstanding_card_status
                    />
                </div>

                <DataTable
                    list=list_fn(&LIST_ENDPOINT, notify)
                    columns=columns()
                    query=query
                    filters=bindings
                    refresh_key=refresh
                    on_loading=Callback::new(move |v: bool| table_loading.set(v))
                />
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_rate_thresholds() {
        assert_eq!(rate_status(Some(95.0)), CardStatus::Good);
        assert_eq!(rate_status(Some(90.0)), CardStatus::Good);
        assert_eq!(rate_status(Some(75.0)), CardStatus::Warning);
        assert_eq!(rate_status(Some(12.5)), CardStatus::Bad);
        assert_eq!(rate_status(None), CardStatus::Neutral);
    }

    #[test]
    fn settled_outstanding_is_good() {
        assert_eq!(outstanding_status(0.0), CardStatus::Good);
        assert_eq!(outstanding_status(250.0), CardStatus::Warning);
    }
}
