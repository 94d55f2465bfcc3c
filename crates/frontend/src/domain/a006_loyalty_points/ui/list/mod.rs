use contracts::domain::a006_loyalty_points::dto::*;
use contracts::domain::common::{code_label, code_options};
use contracts::shared::table::{format_datetime, ColumnDef};
use leptos::prelude::*;
use thaw::*;

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

/// Баллы целые, дробную часть не показываем
fn format_points(value: f64) -> String {
    format!("{:.0}", value)
}

fn columns() -> Vec<ColumnDef<LoyaltyPointsRow>> {
    vec![
        ColumnDef::new("customer_id", "Customer ID", |r: &LoyaltyPointsRow| Some(r.customer_id.clone())),
        ColumnDef::new("customer", "Customer", |r: &LoyaltyPointsRow| Some(r.customer_name.clone())),
        ColumnDef::new("tier", "Tier", |r: &LoyaltyPointsRow| r.tier.as_deref().map(|t| code_label(TIERS, t)))
            .filtered_by(FILTER_TIER),
        ColumnDef::new("points_earned", "Earned", |r: &LoyaltyPointsRow| Some(format_points(r.points_earned))).right(),
        ColumnDef::new("points_redeemed", "Redeemed", |r: &LoyaltyPointsRow| Some(format_points(r.points_redeemed)))
            .right(),
        ColumnDef::new("balance", "Balance", |r: &LoyaltyPointsRow| Some(format_points(r.balance))).right(),
        ColumnDef::new("last_activity", "Last activity", |r: &LoyaltyPointsRow| {
            r.last_activity.as_deref().map(format_datetime)
        }),
    ]
}

#[component]
pub fn LoyaltyPointsList() -> impl IntoView {
    let notify = use_notifications();

    let tier = FilterBinding::multi(FILTER_TIER, "Tier", Signal::derive(|| code_options(TIERS)));
    let bindings = vec![tier];

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
    let tag_bindings = bindings.clone();

    view! {
        <PageFrame page_id="a006_loyalty_points--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Loyalty Points"</h1>
                </div>
                <div class="page__header-right">
                    <SearchInput
                        value=search
                        on_change=Callback::new(move |v: String| search.set(v))
                        placeholder="Customer name or ID"
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
                    }
                    filter_tags=move || view! { <FilterTags bindings=tag_bindings.clone() /> }
                >
                    <FilterField binding=tier />
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
    fn missing_tier_and_activity_show_placeholder() {
        let row = LoyaltyPointsRow {
            customer_id: "88".into(),
            customer_name: "Fresh Mart".into(),
            tier: None,
            points_earned: 120.0,
            points_redeemed: 20.0,
            balance: 100.0,
            last_activity: None,
        };
        let cells: Vec<String> = columns().iter().map(|c| c.display(&row)).collect();
        assert_eq!(cells, vec!["88", "Fresh Mart", "-", "120", "20", "100", "-"]);
    }

    #[test]
    fn tier_code_gets_label() {
        let row = LoyaltyPointsRow {
            customer_id: "1".into(),
            customer_name: "A".into(),
            tier: Some("gold".into()),
            points_earned: 0.0,
            points_redeemed: 0.0,
            balance: 0.0,
            last_activity: Some("2024-05-01T10:15:00Z".into()),
        };
        let cells: Vec<String> = columns().iter().map(|c| c.display(&row)).collect();
        assert_eq!(cells[2], "Gold");
        assert_eq!(cells[6], "2024-05-01 10:15");
    }
}
