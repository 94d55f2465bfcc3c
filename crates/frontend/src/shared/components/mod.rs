pub mod column_filter;
pub mod data_table;
pub mod date_range;
pub mod filter_panel;
pub mod pagination_controls;
pub mod stat_card;
