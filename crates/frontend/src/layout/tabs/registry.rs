//! Tab content registry: tab.key → View

use crate::dashboards::d400_sales_report::ui::SalesReportDashboard;
use crate::domain::a001_sales_order::ui::details::SalesOrderDetail;
use crate::domain::a001_sales_order::ui::list::SalesOrderList;
use crate::domain::a002_collection::ui::list::CollectionList;
use crate::domain::a003_stock_transfer::ui::list::StockTransferList;
use crate::domain::a004_asset_request::ui::create::AssetRequestForm;
use crate::domain::a004_asset_request::ui::list::AssetRequestList;
use crate::domain::a005_call_center_ticket::ui::create::TicketForm;
use crate::domain::a005_call_center_ticket::ui::details::TicketDetail;
use crate::domain::a005_call_center_ticket::ui::list::TicketList;
use crate::domain::a006_loyalty_points::ui::list::LoyaltyPointsList;
use crate::layout::global_context::AppGlobalContext;
use leptos::logging::log;
use leptos::prelude::*;

use super::tab_labels::*;

/// Рендерит контент вкладки по её ключу.
///
/// `tabs_store` нужен страницам записей и формам, чтобы закрыть свою вкладку.
pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let key_for_close = key.to_string();
    let on_close = Callback::new(move |_: ()| tabs_store.close_tab(&key_for_close));

    match key {
        SALES_ORDERS => view! { <SalesOrderList /> }.into_any(),
        k if k.starts_with(SALES_ORDER_DETAIL) => {
            let id = k[SALES_ORDER_DETAIL.len()..].to_string();
            view! { <SalesOrderDetail id=id on_close=on_close /> }.into_any()
        }
        COLLECTIONS => view! { <CollectionList /> }.into_any(),
        STOCK_TRANSFERS => view! { <StockTransferList /> }.into_any(),
        ASSET_REQUESTS => view! { <AssetRequestList /> }.into_any(),
        ASSET_REQUEST_NEW => view! { <AssetRequestForm on_close=on_close /> }.into_any(),
        TICKETS => view! { <TicketList /> }.into_any(),
        TICKET_NEW => view! { <TicketForm on_close=on_close /> }.into_any(),
        k if k.starts_with(TICKET_DETAIL) => {
            let id = k[TICKET_DETAIL.len()..].to_string();
            view! { <TicketDetail id=id on_close=on_close /> }.into_any()
        }
        LOYALTY_POINTS => view! { <LoyaltyPointsList /> }.into_any(),
        SALES_REPORT => view! { <SalesReportDashboard /> }.into_any(),
        _ => {
            log!("⚠️ Unknown tab type: {}", key);
            view! { <div class="placeholder">{"Unknown page"}</div> }.into_any()
        }
    }
}
