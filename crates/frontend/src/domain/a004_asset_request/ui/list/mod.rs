use contracts::domain::a004_asset_request::dto::*;
use contracts::domain::common::{code_label, code_options};
use contracts::shared::reference_cache::ReferenceKind;
use contracts::shared::table::ColumnDef;
use leptos::prelude::*;
use thaw::*;

use crate::layout::global_context::use_app_context;
use crate::layout::tabs::tab_labels::{tab_label_for_key, ASSET_REQUESTS, ASSET_REQUEST_NEW};
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

fn columns() -> Vec<ColumnDef<AssetRequestRow>> {
    vec![
        ColumnDef::new("request_number", "Request No.", |r: &AssetRequestRow| Some(r.request_number.clone())),
        ColumnDef::new("request_date", "Date", |r: &AssetRequestRow| Some(r.request_date.clone())),
        ColumnDef::new("outlet", "Outlet", |r: &AssetRequestRow| Some(r.outlet_name.clone())),
        ColumnDef::new("salesman", "Salesman", |r: &AssetRequestRow| r.salesman_name.clone())
            .filtered_by(FILTER_SALESMAN),
        ColumnDef::new("asset_type", "Asset", |r: &AssetRequestRow| Some(code_label(ASSET_TYPES, &r.asset_type))),
        ColumnDef::new("status", "Status", |r: &AssetRequestRow| Some(code_label(STATUSES, &r.status)))
            .filtered_by(FILTER_STATUS),
        ColumnDef::new("reason", "Reason", |r: &AssetRequestRow| r.reason.clone()),
    ]
}

#[component]
pub fn AssetRequestList() -> impl IntoView {
    let tabs_store = use_app_context();
    let notify = use_notifications();

    let salesman = FilterBinding::single(
        FILTER_SALESMAN,
        "Salesman",
        use_reference_options(ReferenceKind::Salesman),
    );
    let status = FilterBinding::multi(FILTER_STATUS, "Status", Signal::derive(|| code_options(STATUSES)));
    let bindings = vec![salesman, status];

    let query = {
        let bindings = bindings.clone();
        Signal::derive(move || bindings_query(&bindings))
    };
    let active_filters = {
        let bindings = bindings.clone();
        Signal::derive(move || active_count(&bindings))
    };

    // ручное обновление + обновление после создания заявки
    let refresh = RwSignal::new(0u32);
    let revision = tabs_store.list_revision(ASSET_REQUESTS);
    let refresh_key = Signal::derive(move || refresh.get().wrapping_add(revision.get()));

    let loading = RwSignal::new(false);
    let is_expanded = RwSignal::new(false);
    let tag_bindings = bindings.clone();

    view! {
        <PageFrame page_id="a004_asset_request--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Chiller Requests"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| {
                            tabs_store.open_tab(ASSET_REQUEST_NEW, tab_label_for_key(ASSET_REQUEST_NEW))
                        }
                    >
                        {icon("plus")}
                        "New request"
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
                        <FilterField binding=salesman />
                        <FilterField binding=status />
                    </Flex>
                </FilterPanel>

                <DataTable
                    list=list_fn(&LIST_ENDPOINT, notify)
                    columns=columns()
                    query=query
                    filters=bindings
                    refresh_key=refresh_key
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
    fn asset_type_and_status_use_labels() {
        let row = AssetRequestRow {
            id: "5".into(),
            request_number: "AR-5".into(),
            request_date: "2024-05-03".into(),
            outlet_name: "Corner Shop".into(),
            salesman_name: None,
            asset_type: "display_rack".into(),
            status: "approved".into(),
            reason: None,
        };
        let cells: Vec<String> = columns().iter().map(|c| c.display(&row)).collect();
        assert_eq!(cells[4], "Display rack");
        assert_eq!(cells[5], "Approved");
        assert_eq!(cells[6], "-");
    }
}
