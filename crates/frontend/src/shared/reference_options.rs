//! Справочники для фильтров (торговые агенты, склады).
//!
//! Один [`ReferenceCache`] на сессию: каждый список загружается один раз,
//! сколько бы страниц его ни запросили одновременно.

use async_trait::async_trait;
use contracts::shared::api_error::ApiError;
use contracts::shared::endpoint::fetch_data;
use contracts::shared::filter::FilterOption;
use contracts::shared::reference_cache::{
    LoadState, OptionSource, ReferenceCache, ReferenceKind, ReferenceOptionDto,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;

use super::api_client::HttpTransport;
use super::components::column_filter::OptionList;
use super::notifications::use_notifications;

/// Загрузка справочника из ERP API
struct HttpOptionSource;

#[async_trait(?Send)]
impl OptionSource for HttpOptionSource {
    async fn load_options(&self, kind: ReferenceKind) -> Result<Vec<FilterOption>, ApiError> {
        let dtos: Vec<ReferenceOptionDto> =
            fetch_data(&HttpTransport, kind.options_path(), &[]).await?;
        log::debug!("{:?} options loaded: {}", kind, dtos.len());
        Ok(dtos.into_iter().map(FilterOption::from).collect())
    }
}

thread_local! {
    static CACHE: Rc<ReferenceCache> = Rc::new(ReferenceCache::new(Rc::new(HttpOptionSource)));
}

pub fn reference_cache() -> Rc<ReferenceCache> {
    CACHE.with(Rc::clone)
}

/// Опции справочника и флаг загрузки.
///
/// Ошибка загрузки показывается уведомлением и снимает флаг; следующий
/// вызов повторит запрос.
pub fn use_reference_options(kind: ReferenceKind) -> OptionList {
    let cache = reference_cache();
    let (options, set_options) = signal(cache.get(kind));
    let needs_load = cache.state(kind) != LoadState::Loaded;
    let (loading, set_loading) = signal(needs_load);

    if needs_load {
        let notify = use_notifications();
        spawn_local(async move {
            match cache.options(kind).await {
                Ok(list) => {
                    let _ = set_options.try_set(list);
                }
                Err(err) => {
                    notify.error(format!("{} list: {}", kind.label(), err.user_message()));
                }
            }
            let _ = set_loading.try_set(false);
        });
    }

    OptionList {
        options: options.into(),
        loading: loading.into(),
    }
}
