//! HTTP-транспорт к ERP API поверх gloo-net.
//!
//! Все запросы идут через [`HttpTransport`]: Bearer-токен из сессии,
//! проверка HTTP-статуса и единая проверка конверта ответа.

use async_trait::async_trait;
use contracts::shared::api_error::{check_envelope, ApiError};
use contracts::shared::endpoint::{fetch_list, ApiTransport, ListEndpoint};
use contracts::shared::list_query::{ListQuery, ListResult};
use futures::future::{FutureExt, LocalBoxFuture};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use super::api_utils::erp_url;
use super::notifications::NotificationService;
use crate::system::session;

/// Асинхронный источник страниц для `DataTable`
pub type ListFn<R> =
    Arc<dyn Fn(ListQuery) -> LocalBoxFuture<'static, Result<ListResult<R>, ApiError>> + Send + Sync>;

#[derive(Debug, Clone, Copy, Default)]
pub struct HttpTransport;

fn authorize(builder: RequestBuilder) -> RequestBuilder {
    match session::access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn read_body(path: &str, response: Response) -> Result<Value, ApiError> {
    if !response.ok() {
        log::warn!("{} answered with status {}", path, response.status());
        return Err(ApiError::Http {
            status: response.status(),
        });
    }
    let body: Value = response.json().await.map_err(ApiError::decode)?;
    check_envelope(&body)?;
    Ok(body)
}

#[async_trait(?Send)]
impl ApiTransport for HttpTransport {
    async fn get_json(&self, path: &str, params: &[(String, String)]) -> Result<Value, ApiError> {
        let url = erp_url(path);
        let response = authorize(Request::get(&url))
            .query(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .send()
            .await
            .map_err(ApiError::transport)?;
        read_body(path, response).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let url = erp_url(path);
        let response = authorize(Request::post(&url))
            .json(body)
            .map_err(ApiError::decode)?
            .send()
            .await
            .map_err(ApiError::transport)?;
        read_body(path, response).await
    }
}

/// Колбэк списка для `DataTable`: запрос к `endpoint`. Ошибка показывается
/// пользователю и возвращается таблице, которая сама решает, что рисовать.
pub fn list_fn<R>(endpoint: &'static ListEndpoint, notify: NotificationService) -> ListFn<R>
where
    R: DeserializeOwned + 'static,
{
    Arc::new(move |query: ListQuery| {
        async move {
            let result = fetch_list(&HttpTransport, endpoint, &query).await;
            if let Err(err) = &result {
                log::warn!("list {} failed: {}", endpoint.path, err);
                notify.api_error(err);
            }
            result
        }
        .boxed_local()
    })
}
