//! Вкладки
//!
//! - `page` - обёртка контента вкладки
//! - `registry` - tab.key → View
//! - `tab_labels` - ключи и заголовки

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::{detail_tab_label, tab_label_for_key, title_for_key};
