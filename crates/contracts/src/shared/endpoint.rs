//! Endpoint descriptors and the fetch helpers built on top of them.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::api_error::ApiError;
use super::list_query::{ListQuery, ListResult};
use super::pagination::{normalize, PageParamStyle, PaginationAdapter};

/// Minimal HTTP surface the list/detail helpers need.
///
/// Implementations return the decoded JSON body and are expected to run
/// [`check_envelope`](super::api_error::check_envelope) on it, so callers
/// see application failures as [`ApiError::Application`].
#[async_trait(?Send)]
pub trait ApiTransport {
    async fn get_json(&self, path: &str, params: &[(String, String)]) -> Result<Value, ApiError>;

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError>;
}

/// A paginated list endpoint of the ERP API
#[derive(Clone, Copy)]
pub struct ListEndpoint {
    pub path: &'static str,
    pub page_params: PageParamStyle,
    pub adapter: &'static dyn PaginationAdapter,
}

impl std::fmt::Debug for ListEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListEndpoint")
            .field("path", &self.path)
            .field("page_params", &self.page_params)
            .field("adapter", &self.adapter.name())
            .finish()
    }
}

impl ListEndpoint {
    /// Page keys first, then filters in key order
    pub fn request_params(&self, query: &ListQuery) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = self
            .page_params
            .params(query.page(), query.page_size())
            .into_iter()
            .collect();
        params.extend(
            query
                .filters()
                .iter()
                .map(|(key, value)| (key.clone(), value.to_param())),
        );
        params
    }

    /// Filters only, for export endpoints that ignore paging
    pub fn filter_params(&self, query: &ListQuery) -> Vec<(String, String)> {
        query
            .filters()
            .iter()
            .map(|(key, value)| (key.clone(), value.to_param()))
            .collect()
    }
}

pub async fn fetch_list<R, T>(
    transport: &T,
    endpoint: &ListEndpoint,
    query: &ListQuery,
) -> Result<ListResult<R>, ApiError>
where
    R: DeserializeOwned,
    T: ApiTransport + ?Sized,
{
    let params = endpoint.request_params(query);
    let body = transport.get_json(endpoint.path, &params).await?;
    normalize(&body, endpoint.adapter, query)
}

/// Like [`fetch_list`], but never fails: errors are handed to `notify` and a
/// degraded single empty page is returned instead.
pub async fn fetch_list_or_degrade<R, T>(
    transport: &T,
    endpoint: &ListEndpoint,
    query: &ListQuery,
    notify: impl FnOnce(&ApiError),
) -> ListResult<R>
where
    R: DeserializeOwned,
    T: ApiTransport + ?Sized,
{
    match fetch_list(transport, endpoint, query).await {
        Ok(result) => result,
        Err(err) => {
            log::warn!("list {} failed: {}", endpoint.path, err);
            notify(&err);
            ListResult::degraded(query.page_size())
        }
    }
}

/// GET an endpoint whose payload sits under `data`
pub async fn fetch_data<R, T>(
    transport: &T,
    path: &str,
    params: &[(String, String)],
) -> Result<R, ApiError>
where
    R: DeserializeOwned,
    T: ApiTransport + ?Sized,
{
    let body = transport.get_json(path, params).await?;
    unwrap_data(body)
}

/// POST a request and decode the `data` payload of the reply
pub async fn post_data<B, R, T>(transport: &T, path: &str, request: &B) -> Result<R, ApiError>
where
    B: Serialize,
    R: DeserializeOwned,
    T: ApiTransport + ?Sized,
{
    let body = serde_json::to_value(request).map_err(ApiError::decode)?;
    let reply = transport.post_json(path, &body).await?;
    unwrap_data(reply)
}

fn unwrap_data<R: DeserializeOwned>(mut body: Value) -> Result<R, ApiError> {
    let data = body
        .get_mut("data")
        .map(Value::take)
        .ok_or_else(|| ApiError::decode("response has no `data` field"))?;
    serde_json::from_value(data).map_err(ApiError::decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api_error::check_envelope;
    use crate::shared::filter::FilterSelection;
    use crate::shared::pagination::NestedTotalPages;
    use futures::executor::block_on;
    use serde::Deserialize;
    use serde_json::json;
    use std::cell::{Cell, RefCell};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: String,
    }

    /// Replays canned bodies and records requested params
    struct FakeTransport {
        reply: Result<Value, ApiError>,
        last_params: RefCell<Vec<(String, String)>>,
        calls: Cell<usize>,
    }

    impl FakeTransport {
        fn replying(reply: Result<Value, ApiError>) -> Self {
            Self {
                reply,
                last_params: RefCell::new(Vec::new()),
                calls: Cell::new(0),
            }
        }
    }

    #[async_trait(?Send)]
    impl ApiTransport for FakeTransport {
        async fn get_json(
            &self,
            _path: &str,
            params: &[(String, String)],
        ) -> Result<Value, ApiError> {
            self.calls.set(self.calls.get() + 1);
            *self.last_params.borrow_mut() = params.to_vec();
            let body = self.reply.clone()?;
            check_envelope(&body)?;
            Ok(body)
        }

        async fn post_json(&self, _path: &str, _body: &Value) -> Result<Value, ApiError> {
            self.reply.clone()
        }
    }

    const ORDERS: ListEndpoint = ListEndpoint {
        path: "/api/orders",
        page_params: PageParamStyle::PageLimit,
        adapter: &NestedTotalPages,
    };

    #[test]
    fn page_two_of_five_is_normalized() {
        let transport = FakeTransport::replying(Ok(json!({
            "data": [{"id": "1"}, {"id": "2"}, {"id": "3"}],
            "pagination": {"totalPages": 5, "page": 2, "limit": 50}
        })));
        let query = ListQuery::new(2, 50);

        let result: ListResult<Row> = block_on(fetch_list(&transport, &ORDERS, &query)).unwrap();

        assert_eq!(result.rows.len(), 3);
        assert_eq!(result.total_pages, 5);
        assert_eq!(result.current_page, 2);
        assert_eq!(result.page_size, 50);
        assert_eq!(
            *transport.last_params.borrow(),
            vec![("page".to_string(), "2".to_string()), ("limit".to_string(), "50".to_string())]
        );
    }

    #[test]
    fn transport_failure_degrades_and_notifies() {
        let transport =
            FakeTransport::replying(Err(ApiError::transport("connection reset by peer")));
        let notified = RefCell::new(Vec::new());

        let result: ListResult<Row> = block_on(fetch_list_or_degrade(
            &transport,
            &ORDERS,
            &ListQuery::new(3, 25),
            |e| notified.borrow_mut().push(e.clone()),
        ));

        assert!(result.rows.is_empty());
        assert_eq!(result.total_pages, 1);
        assert_eq!(result.current_page, 1);
        assert_eq!(notified.borrow().len(), 1);
        assert!(notified.borrow()[0].is_transport());
    }

    #[test]
    fn application_error_flag_degrades_the_same_way() {
        let transport = FakeTransport::replying(Ok(json!({
            "success": false,
            "message": "Unknown warehouse"
        })));
        let notified = RefCell::new(None);

        let result: ListResult<Row> = block_on(fetch_list_or_degrade(
            &transport,
            &ORDERS,
            &ListQuery::default(),
            |e| *notified.borrow_mut() = Some(e.clone()),
        ));

        assert!(result.is_empty());
        assert_eq!(
            notified.into_inner(),
            Some(ApiError::application("Unknown warehouse"))
        );
    }

    #[test]
    fn reselecting_salesman_drops_the_filter_from_the_request() {
        let transport = FakeTransport::replying(Ok(json!({"data": []})));
        let mut salesman = FilterSelection::single();

        salesman.toggle("S001");
        let query = ListQuery::default().with_selection("salesman_id", &salesman);
        let _ = block_on(fetch_list::<Row, _>(&transport, &ORDERS, &query));
        assert!(transport
            .last_params
            .borrow()
            .contains(&("salesman_id".to_string(), "S001".to_string())));

        salesman.toggle("S001");
        assert_eq!(salesman.as_single_value(), "");
        let query = ListQuery::default().with_selection("salesman_id", &salesman);
        let _ = block_on(fetch_list::<Row, _>(&transport, &ORDERS, &query));
        assert!(!transport
            .last_params
            .borrow()
            .iter()
            .any(|(k, _)| k == "salesman_id"));
        assert_eq!(transport.calls.get(), 2);
    }

    #[test]
    fn detail_payload_is_read_from_data() {
        let transport = FakeTransport::replying(Ok(json!({"data": {"id": "42"}})));
        let row: Row = block_on(fetch_data(&transport, "/api/orders/42", &[])).unwrap();
        assert_eq!(row, Row { id: "42".into() });

        let transport = FakeTransport::replying(Ok(json!({"id": "42"})));
        let err = block_on(fetch_data::<Row, _>(&transport, "/api/orders/42", &[])).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
