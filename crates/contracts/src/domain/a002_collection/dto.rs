use serde::{Deserialize, Serialize};

use crate::domain::common::CodeList;
use crate::shared::endpoint::ListEndpoint;
use crate::shared::export::ExportEndpoint;
use crate::shared::lenient;
use crate::shared::pagination::{NestedLastPage, PageParamStyle};

pub const LIST_ENDPOINT: ListEndpoint = ListEndpoint {
    path: "/api/collections",
    page_params: PageParamStyle::PagePerPage,
    adapter: &NestedLastPage,
};

pub const EXPORT_ENDPOINT: ExportEndpoint = ExportEndpoint {
    path: "/api/collections/export",
    list: LIST_ENDPOINT,
};

pub const FILTER_SALESMAN: &str = "salesman_id";
pub const FILTER_PAYMENT_MODE: &str = "payment_mode";
pub const FILTER_DATE_FROM: &str = "date_from";
pub const FILTER_DATE_TO: &str = "date_to";

pub const PAYMENT_MODES: CodeList = &[
    ("cash", "Cash"),
    ("cheque", "Cheque"),
    ("bank_transfer", "Bank transfer"),
    ("card", "Card"),
];

/// Поступление оплаты от клиента
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionRow {
    #[serde(deserialize_with = "lenient::id_string")]
    pub id: String,
    pub receipt_number: String,
    pub collection_date: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub salesman_name: Option<String>,
    pub payment_mode: String,
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub amount: f64,
    #[serde(default)]
    pub reference_no: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_query::{ListQuery, ListResult};
    use crate::shared::pagination::normalize;
    use serde_json::json;

    #[test]
    fn last_page_envelope_decodes() {
        let body = json!({
            "data": [{"id": 1, "receipt_number": "RC-1", "collection_date": "2024-05-01",
                      "payment_mode": "cash", "amount": "300.5"}],
            "pagination": {"current_page": 2, "last_page": 3, "per_page": 25, "total": 51}
        });
        let result: ListResult<CollectionRow> =
            normalize(&body, LIST_ENDPOINT.adapter, &ListQuery::new(2, 25)).unwrap();
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.current_page, 2);
        assert_eq!(result.rows[0].amount, 300.5);
        assert_eq!(result.rows[0].reference_no, None);
    }

    #[test]
    fn request_uses_per_page_and_date_range() {
        let query = ListQuery::new(1, 25)
            .with_text(FILTER_DATE_FROM, "2024-05-01")
            .with_text(FILTER_DATE_TO, "2024-05-31");
        let params = LIST_ENDPOINT.request_params(&query);
        assert_eq!(params[1], ("per_page".to_string(), "25".to_string()));
        assert!(params.contains(&("date_to".to_string(), "2024-05-31".to_string())));
    }
}
