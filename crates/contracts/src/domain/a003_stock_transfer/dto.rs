use serde::{Deserialize, Serialize};

use crate::domain::common::CodeList;
use crate::shared::endpoint::ListEndpoint;
use crate::shared::lenient;
use crate::shared::pagination::{MetaTotalPages, PageParamStyle};

pub const LIST_ENDPOINT: ListEndpoint = ListEndpoint {
    path: "/api/stock-transfers",
    page_params: PageParamStyle::CurrentPageLimit,
    adapter: &MetaTotalPages,
};

pub const FILTER_SOURCE_WAREHOUSE: &str = "source_warehouse_id";
pub const FILTER_DESTINATION_WAREHOUSE: &str = "destination_warehouse_id";
pub const FILTER_STATUS: &str = "status";

pub const STATUSES: CodeList = &[
    ("draft", "Draft"),
    ("in_transit", "In transit"),
    ("received", "Received"),
    ("cancelled", "Cancelled"),
];

/// Перемещение между складами
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockTransferRow {
    #[serde(deserialize_with = "lenient::id_string")]
    pub id: String,
    pub transfer_number: String,
    pub transfer_date: String,
    #[serde(default)]
    pub source_warehouse_name: Option<String>,
    #[serde(default)]
    pub destination_warehouse_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub item_count: u64,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub total_quantity: Option<f64>,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_query::{ListQuery, ListResult};
    use crate::shared::pagination::normalize;
    use serde_json::json;

    #[test]
    fn meta_envelope_and_current_page_params() {
        let query = ListQuery::new(2, 10);
        assert_eq!(
            LIST_ENDPOINT.request_params(&query)[0],
            ("current_page".to_string(), "2".to_string())
        );

        let body = json!({
            "data": [{"id": "T-9", "transfer_number": "ST-0009", "transfer_date": "2024-04-30",
                      "source_warehouse_name": "Main", "item_count": 4, "status": "in_transit"}],
            "meta": {"current_page": 2, "per_page": 10, "total_pages": 2, "total_count": 11}
        });
        let result: ListResult<StockTransferRow> =
            normalize(&body, LIST_ENDPOINT.adapter, &query).unwrap();
        assert_eq!(result.total_pages, 2);
        assert_eq!(result.rows[0].item_count, 4);
        assert_eq!(result.rows[0].destination_warehouse_name, None);
    }
}
