pub mod a001_sales_order;
pub mod a002_collection;
pub mod a003_stock_transfer;
pub mod a004_asset_request;
pub mod a005_call_center_ticket;
pub mod a006_loyalty_points;
pub mod common;
