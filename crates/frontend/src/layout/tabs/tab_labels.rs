//! Tab keys and titles in one place.
//!
//! List and report tabs have fixed keys; detail tabs append the record id
//! to a per-entity prefix.

pub const SALES_ORDERS: &str = "a001_sales_order";
pub const SALES_ORDER_DETAIL: &str = "a001_sales_order_detail_";
pub const COLLECTIONS: &str = "a002_collection";
pub const STOCK_TRANSFERS: &str = "a003_stock_transfer";
pub const ASSET_REQUESTS: &str = "a004_asset_request";
pub const ASSET_REQUEST_NEW: &str = "a004_asset_request_new";
pub const TICKETS: &str = "a005_call_center_ticket";
pub const TICKET_DETAIL: &str = "a005_ticket_detail_";
pub const TICKET_NEW: &str = "a005_ticket_new";
pub const LOYALTY_POINTS: &str = "a006_loyalty_points";
pub const SALES_REPORT: &str = "d400_sales_report";

/// Заголовок вкладки для фиксированного ключа. Fallback: сам ключ.
pub fn tab_label_for_key(key: &str) -> &str {
    match key {
        SALES_ORDERS => "Sales Orders",
        COLLECTIONS => "Collections",
        STOCK_TRANSFERS => "Stock Transfers",
        ASSET_REQUESTS => "Chiller Requests",
        ASSET_REQUEST_NEW => "New Chiller Request",
        TICKETS => "Call Center",
        TICKET_NEW => "New Ticket",
        LOYALTY_POINTS => "Loyalty Points",
        SALES_REPORT => "Sales Report",
        _ => key,
    }
}

/// "Order · SO-1001"
pub fn detail_tab_label(entity: &str, id: &str) -> String {
    format!("{} · {}", entity, id)
}

pub fn sales_order_detail_key(id: &str) -> String {
    format!("{}{}", SALES_ORDER_DETAIL, id)
}

pub fn ticket_detail_key(id: &str) -> String {
    format!("{}{}", TICKET_DETAIL, id)
}

/// Заголовок для любого ключа, включая вкладки записей
pub fn title_for_key(key: &str) -> String {
    if let Some(id) = key.strip_prefix(SALES_ORDER_DETAIL) {
        return detail_tab_label("Order", id);
    }
    if let Some(id) = key.strip_prefix(TICKET_DETAIL) {
        return detail_tab_label("Ticket", id);
    }
    tab_label_for_key(key).to_string()
}
