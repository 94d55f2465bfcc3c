pub mod api_client;
pub mod api_utils;
pub mod components;
pub mod export;
pub mod icons;
pub mod list_utils;
pub mod notifications;
pub mod page_frame;
pub mod page_standard;
pub mod reference_options;
