//! Pagination request keys and response adapters.
//!
//! The ERP API is inconsistent: some endpoints take `page`/`per_page`, others
//! `current_page`/`limit`, and the response carries paging info under
//! `pagination.totalPages`, `pagination.last_page` or `meta.total_pages`.
//! Each endpoint picks one [`PageParamStyle`] and one [`PaginationAdapter`];
//! nothing else in the app inspects these shapes.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::api_error::ApiError;
use super::list_query::{ListQuery, ListResult};

/// Names of the page/size query parameters an endpoint expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageParamStyle {
    /// `page` + `per_page`
    PagePerPage,
    /// `page` + `limit`
    PageLimit,
    /// `current_page` + `limit`
    CurrentPageLimit,
}

impl PageParamStyle {
    pub fn keys(self) -> (&'static str, &'static str) {
        match self {
            Self::PagePerPage => ("page", "per_page"),
            Self::PageLimit => ("page", "limit"),
            Self::CurrentPageLimit => ("current_page", "limit"),
        }
    }

    pub fn params(self, page: u32, page_size: u32) -> [(String, String); 2] {
        let (page_key, size_key) = self.keys();
        [
            (page_key.to_string(), page.to_string()),
            (size_key.to_string(), page_size.to_string()),
        ]
    }
}

/// Paging numbers extracted from a response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub total_pages: u32,
    pub current_page: u32,
    pub page_size: u32,
    pub total_records: Option<u64>,
}

/// Strategy for reading one endpoint family's pagination envelope.
pub trait PaginationAdapter: Send + Sync {
    fn name(&self) -> &'static str;

    fn page_meta(&self, body: &Value, query: &ListQuery) -> PageMeta;

    /// Rows of the page; defaults to the top-level `data` array
    fn rows<'a>(&self, body: &'a Value) -> Result<&'a Vec<Value>, ApiError> {
        body.get("data")
            .and_then(Value::as_array)
            .ok_or_else(|| ApiError::decode("response has no `data` array"))
    }
}

/// Field names of one envelope family
struct Fields {
    container: &'static str,
    total_pages: &'static str,
    current_page: &'static str,
    page_size: &'static str,
    total_records: &'static str,
}

fn read_meta(body: &Value, query: &ListQuery, f: &Fields) -> PageMeta {
    let block = body.get(f.container);
    let field = |name: &str| block.and_then(|b| b.get(name)).and_then(lenient_u64);

    let page_size = field(f.page_size)
        .and_then(|v| u32::try_from(v).ok())
        .filter(|v| *v > 0)
        .unwrap_or(query.page_size());
    let current_page = field(f.current_page)
        .and_then(|v| u32::try_from(v).ok())
        .filter(|v| *v > 0)
        .unwrap_or(query.page());
    let total_records = field(f.total_records);
    let total_pages = field(f.total_pages)
        .and_then(|v| u32::try_from(v).ok())
        .or_else(|| {
            total_records.map(|total| {
                let pages = total.div_ceil(u64::from(page_size));
                u32::try_from(pages).unwrap_or(u32::MAX)
            })
        })
        .unwrap_or(1)
        .max(1);

    PageMeta {
        total_pages,
        current_page,
        page_size,
        total_records,
    }
}

/// Accepts `5`, `5.0` and `"5"`
fn lenient_u64(v: &Value) -> Option<u64> {
    match v {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// `{ data, pagination: { totalPages, page, limit, total } }`
pub struct NestedTotalPages;

impl PaginationAdapter for NestedTotalPages {
    fn name(&self) -> &'static str {
        "pagination.totalPages"
    }

    fn page_meta(&self, body: &Value, query: &ListQuery) -> PageMeta {
        read_meta(
            body,
            query,
            &Fields {
                container: "pagination",
                total_pages: "totalPages",
                current_page: "page",
                page_size: "limit",
                total_records: "total",
            },
        )
    }
}

/// `{ data, pagination: { last_page, current_page, per_page, total } }`
pub struct NestedLastPage;

impl PaginationAdapter for NestedLastPage {
    fn name(&self) -> &'static str {
        "pagination.last_page"
    }

    fn page_meta(&self, body: &Value, query: &ListQuery) -> PageMeta {
        read_meta(
            body,
            query,
            &Fields {
                container: "pagination",
                total_pages: "last_page",
                current_page: "current_page",
                page_size: "per_page",
                total_records: "total",
            },
        )
    }
}

/// `{ data, meta: { total_pages, current_page, per_page, total_count } }`
pub struct MetaTotalPages;

impl PaginationAdapter for MetaTotalPages {
    fn name(&self) -> &'static str {
        "meta.total_pages"
    }

    fn page_meta(&self, body: &Value, query: &ListQuery) -> PageMeta {
        read_meta(
            body,
            query,
            &Fields {
                container: "meta",
                total_pages: "total_pages",
                current_page: "current_page",
                page_size: "per_page",
                total_records: "total_count",
            },
        )
    }
}

/// Decodes rows and paging info into a [`ListResult`].
///
/// Any row that does not match `R` rejects the whole page.
pub fn normalize<R: DeserializeOwned>(
    body: &Value,
    adapter: &dyn PaginationAdapter,
    query: &ListQuery,
) -> Result<ListResult<R>, ApiError> {
    let raw_rows = adapter.rows(body)?;
    let rows = raw_rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            serde_json::from_value::<R>(row.clone())
                .map_err(|e| ApiError::decode(format!("row {i}: {e}")))
        })
        .collect::<Result<Vec<R>, ApiError>>()?;

    let meta = adapter.page_meta(body, query);
    Ok(ListResult::new(
        rows,
        meta.total_pages,
        meta.current_page,
        meta.page_size,
        meta.total_records,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: String,
    }

    #[test]
    fn param_styles_use_endpoint_specific_keys() {
        assert_eq!(
            PageParamStyle::PagePerPage.params(2, 50),
            [("page".into(), "2".into()), ("per_page".into(), "50".into())]
        );
        assert_eq!(PageParamStyle::PageLimit.keys(), ("page", "limit"));
        assert_eq!(PageParamStyle::CurrentPageLimit.keys(), ("current_page", "limit"));
    }

    #[test]
    fn total_pages_envelope_maps_to_list_result() {
        let body = json!({
            "data": [{"id": "a"}, {"id": "b"}, {"id": "c"}],
            "pagination": {"totalPages": 5, "page": 2, "limit": 50}
        });
        let query = ListQuery::new(2, 50);
        let result: ListResult<Row> = normalize(&body, &NestedTotalPages, &query).unwrap();

        assert_eq!(result.rows.len(), 3);
        assert_eq!(result.total_pages, 5);
        assert_eq!(result.current_page, 2);
        assert_eq!(result.page_size, 50);
        assert_eq!(result.total_records, None);
    }

    #[test]
    fn last_page_envelope_accepts_string_numbers() {
        let body = json!({
            "data": [{"id": "a"}],
            "pagination": {"last_page": "7", "current_page": "3", "per_page": "20", "total": 131}
        });
        let meta = NestedLastPage.page_meta(&body, &ListQuery::new(3, 20));
        assert_eq!(
            meta,
            PageMeta {
                total_pages: 7,
                current_page: 3,
                page_size: 20,
                total_records: Some(131)
            }
        );
    }

    #[test]
    fn meta_envelope_derives_pages_from_total_count() {
        let body = json!({
            "data": [],
            "meta": {"current_page": 1, "per_page": 25, "total_count": 51}
        });
        let meta = MetaTotalPages.page_meta(&body, &ListQuery::new(1, 25));
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.total_records, Some(51));
    }

    #[test]
    fn missing_pagination_falls_back_to_the_request() {
        let body = json!({"data": [{"id": "a"}]});
        let result: ListResult<Row> =
            normalize(&body, &MetaTotalPages, &ListQuery::new(4, 10)).unwrap();
        assert_eq!(result.total_pages, 1);
        assert_eq!(result.current_page, 4);
        assert_eq!(result.page_size, 10);
    }

    #[test]
    fn zero_total_pages_is_reported_as_one() {
        let body = json!({"data": [], "pagination": {"totalPages": 0, "page": 1, "limit": 50}});
        let meta = NestedTotalPages.page_meta(&body, &ListQuery::default());
        assert_eq!(meta.total_pages, 1);
    }

    #[test]
    fn missing_data_array_is_a_decode_error() {
        let body = json!({"items": []});
        let err = normalize::<Row>(&body, &NestedTotalPages, &ListQuery::default()).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn malformed_row_rejects_the_page() {
        let body = json!({"data": [{"id": "a"}, {"name": "no id"}]});
        let err = normalize::<Row>(&body, &NestedLastPage, &ListQuery::default()).unwrap_err();
        match err {
            ApiError::Decode(msg) => assert!(msg.starts_with("row 1")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
